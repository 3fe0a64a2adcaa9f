#![cfg(test)]
use async_trait::async_trait;
use ipscope_common::device::{ConnectionInfo, Dimensions};
use ipscope_core::inspector::Environment;
use ipscope_core::prober::{CandidateSource, CandidateStream, ProbeError};
use tokio::sync::mpsc;

/// Replays a fixed list of candidate lines, then closes the stream.
pub struct ScriptedCandidates {
    pub lines: Vec<Result<String, String>>,
}

impl ScriptedCandidates {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| Ok(l.to_string())).collect(),
        }
    }
}

#[async_trait]
impl CandidateSource for ScriptedCandidates {
    async fn gather(&self) -> Result<CandidateStream, ProbeError> {
        let (tx, rx) = mpsc::channel(self.lines.len().max(1));
        for line in &self.lines {
            let item = line.clone().map_err(ProbeError::Negotiation);
            tx.send(item).await.expect("receiver alive");
        }
        Ok(rx)
    }
}

/// Fixed readouts for a phone-like client.
pub struct FixedEnvironment;

impl Environment for FixedEnvironment {
    fn identification(&self) -> String {
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148 Safari/604.1"
            .to_string()
    }
    fn platform(&self) -> Option<String> {
        Some("iPhone".to_string())
    }
    fn language(&self) -> Option<String> {
        Some("en-GB".to_string())
    }
    fn screen(&self) -> Option<Dimensions> {
        Some(Dimensions::new(390, 844))
    }
    fn viewport(&self) -> Option<Dimensions> {
        Some(Dimensions::new(390, 664))
    }
    fn color_depth(&self) -> Option<u8> {
        Some(24)
    }
    fn online(&self) -> Option<bool> {
        Some(true)
    }
    fn cookies_enabled(&self) -> Option<bool> {
        None
    }
    fn connection(&self) -> Option<ConnectionInfo> {
        None
    }
}
