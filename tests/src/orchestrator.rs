#![cfg(test)]
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use ipscope_core::fetcher::{HttpSource, IdentityFetcher};
use ipscope_core::orchestrator::{self, Services};
use ipscope_core::panels::{Panel, PanelUpdate};
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::{FixedEnvironment, ScriptedCandidates};

async fn services(server: &MockServer) -> Services {
    let http = HttpSource::new(Some(Duration::from_secs(5))).expect("client builds");
    Services {
        fetcher: IdentityFetcher::new(
            Arc::new(http),
            vec![format!("{}/ip", server.uri())],
            format!("{}/geo/{{ip}}", server.uri()),
        ),
        candidates: Arc::new(ScriptedCandidates::new(&[
            "candidate:1 1 udp 2122260223 192.168.7.2 50000 typ host",
        ])),
        environment: Arc::new(FixedEnvironment),
        probe_window: Duration::from_millis(500),
    }
}

#[tokio::test]
async fn every_panel_arrives_once() {
    let server = MockServer::start().await;
    Mock::given(path("/ip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ip": "198.51.100.20" })))
        .mount(&server)
        .await;
    Mock::given(path("/geo/198.51.100.20"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel::<PanelUpdate>();
    orchestrator::load_all(Arc::new(services(&server).await), tx);

    let mut updates: Vec<PanelUpdate> = Vec::new();
    while let Some(update) = rx.recv().await {
        updates.push(update);
    }

    let panels: BTreeSet<Panel> = updates.iter().map(|u| u.panel).collect();
    assert_eq!(updates.len(), Panel::ALL.len());
    assert_eq!(panels.len(), Panel::ALL.len());

    let public = updates.iter().find(|u| u.panel == Panel::PublicIp).unwrap();
    assert_eq!(public.rows[0].value, "198.51.100.20");
    assert_eq!(public.rows[1].value, "📱 Mobile");

    let local = updates.iter().find(|u| u.panel == Panel::LocalNetwork).unwrap();
    assert_eq!(local.rows[0].value, "192.168.7.2");
}

#[tokio::test]
async fn report_collects_everything() {
    let server = MockServer::start().await;
    Mock::given(path("/ip"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let report = orchestrator::gather_report(&services(&server).await).await;

    assert!(report.public.ip.is_none());
    assert_eq!(report.local_addresses.len(), 1);
    assert_eq!(report.device.language.as_deref(), Some("en-GB"));

    let doc = serde_json::to_value(&report).unwrap();
    assert_eq!(doc["local_addresses"][0], "192.168.7.2");
    assert_eq!(doc["public"]["geo"]["status"], "unavailable");
}
