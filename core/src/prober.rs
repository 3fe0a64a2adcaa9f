//! Best-effort discovery of locally bound addresses.
//!
//! A [`CandidateSource`] produces ICE-style candidate lines (for example
//! `candidate:1 1 udp 2122260223 192.168.1.20 54321 typ host`). The prober
//! pulls the first IPv4-shaped token out of each line, drops unspecified and
//! loopback addresses, and deduplicates by literal text. Gathering stops when
//! the source signals the end of candidates or the probe window elapses,
//! whichever comes first. Any failure collapses to an empty result.

use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use ipscope_common::network::address::AddressCandidate;
use regex::Regex;
use thiserror::Error;
use tokio::sync::mpsc::Receiver;
use tokio::time::{Instant, timeout_at};
use tracing::debug;

mod host;

pub use host::HostGatherer;

static IPV4_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,3}(\.[0-9]{1,3}){3})").expect("IPv4 token pattern is valid")
});

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not set up candidate gathering: {0}")]
    Setup(String),
    #[error("candidate negotiation failed: {0}")]
    Negotiation(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Stream of candidate lines for one probe cycle.
///
/// Closing the channel means "no more candidates". An `Err` item means the
/// negotiation failed and everything gathered so far is discarded.
pub type CandidateStream = Receiver<Result<String, ProbeError>>;

#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Begins gathering. An error here means the session could not be constructed.
    async fn gather(&self) -> Result<CandidateStream, ProbeError>;
}

/// Collects local addresses from `source`, bounded by `window`.
///
/// Never fails; any setup or negotiation error yields an empty list.
pub async fn probe_local_addresses(
    source: &dyn CandidateSource,
    window: Duration,
) -> Vec<AddressCandidate> {
    let deadline: Instant = Instant::now() + window;

    let mut stream: CandidateStream = match timeout_at(deadline, source.gather()).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            debug!("Local address probe unavailable: {e}");
            return Vec::new();
        }
        Err(_) => {
            debug!("Local address probe timed out during setup");
            return Vec::new();
        }
    };

    let mut seen: HashSet<AddressCandidate> = HashSet::new();
    let mut addresses: Vec<AddressCandidate> = Vec::new();

    loop {
        match timeout_at(deadline, stream.recv()).await {
            Ok(Some(Ok(line))) => {
                let Some(candidate) = extract_candidate(&line) else {
                    continue;
                };
                if seen.insert(candidate.clone()) {
                    addresses.push(candidate);
                }
            }
            Ok(Some(Err(e))) => {
                debug!("Local address probe failed: {e}");
                return Vec::new();
            }
            Ok(None) => break,
            Err(_) => {
                debug!("Probe window elapsed with {} candidate(s)", addresses.len());
                break;
            }
        }
    }

    addresses
}

/// First IPv4-shaped token in `line`, unless it is unspecified or loopback.
pub fn extract_candidate(line: &str) -> Option<AddressCandidate> {
    let token = IPV4_TOKEN.captures(line)?.get(1)?;
    AddressCandidate::accept(token.as_str())
}
