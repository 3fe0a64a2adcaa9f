#![cfg(test)]
use std::time::Duration;

use ipscope_core::panels;
use ipscope_core::prober::probe_local_addresses;

use crate::support::ScriptedCandidates;

#[tokio::test]
async fn keeps_first_occurrence_order() {
    let source = ScriptedCandidates::new(&[
        "candidate:1 1 udp 2122260223 192.168.1.20 54321 typ host",
        "candidate:2 1 udp 2122194687 10.0.0.5 40000 typ host",
        "candidate:3 1 udp 2122260223 192.168.1.20 54999 typ host",
        "candidate:4 1 udp 2122260223 127.0.0.1 5000 typ host",
        "candidate:5 1 udp 2122260223 0.0.0.0 5000 typ host",
        "candidate:6 1 udp 2122260223 fe80::1 5000 typ host",
    ]);

    let found = probe_local_addresses(&source, Duration::from_secs(2)).await;
    let found: Vec<&str> = found.iter().map(|a| a.as_str()).collect();

    assert_eq!(found, vec!["192.168.1.20", "10.0.0.5"]);
}

#[tokio::test]
async fn negotiation_error_discards_everything() {
    let mut source = ScriptedCandidates::new(&["candidate:1 1 udp 1 192.168.1.20 1 typ host"]);
    source.lines.push(Err("peer connection closed".to_string()));

    let found = probe_local_addresses(&source, Duration::from_secs(2)).await;
    assert!(found.is_empty());

    let rows = panels::local_network_rows(&found, None);
    assert_eq!(rows[0].value, "⚠️ Unable to detect local IP");
}

#[tokio::test]
async fn private_first_candidate_drives_class() {
    let source = ScriptedCandidates::new(&[
        "candidate:1 1 udp 1 172.20.3.4 1 typ host",
        "candidate:2 1 udp 1 100.64.1.1 1 typ host",
    ]);

    let found = probe_local_addresses(&source, Duration::from_secs(2)).await;
    let rows = panels::local_network_rows(&found, None);

    assert_eq!(rows[0].label, "Private IP 1");
    assert_eq!(rows[1].label, "Local IP 2");
    assert_eq!(rows[2].value, "Class B Private");
    assert_eq!(rows[3].value, "255.255.0.0 (likely)");
}
