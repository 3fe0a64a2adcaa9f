//! # Orchestrator
//!
//! Fires the three gathering components independently. Each one publishes its
//! own panels as soon as its result is in, so panels fill in whatever order
//! the network allows. Nothing here waits on all of them together except
//! [`gather_report`], which exists for machine-readable output.

use std::sync::Arc;
use std::time::Duration;

use ipscope_common::config::Config;
use ipscope_common::device::{ConnectionInfo, DeviceSnapshot};
use ipscope_common::network::address::AddressCandidate;
use ipscope_common::network::geo::PublicIdentity;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;

use crate::fetcher::{HttpSource, IdentityFetcher};
use crate::inspector::{self, Environment, NativeEnvironment};
use crate::panels::{self, Panel, PanelUpdate};
use crate::prober::{self, CandidateSource, HostGatherer};

/// Delay between consecutive panels starting their highlight.
pub const CARD_STAGGER: Duration = Duration::from_millis(120);
/// How long each panel stays highlighted.
pub const CARD_FLASH: Duration = Duration::from_millis(800);
/// When the data reload fires, relative to the refresh request.
pub const RELOAD_DELAY: Duration = Duration::from_millis(400);

pub struct Services {
    pub fetcher: IdentityFetcher,
    pub candidates: Arc<dyn CandidateSource>,
    pub environment: Arc<dyn Environment>,
    pub probe_window: Duration,
}

impl Services {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let http = Arc::new(HttpSource::new(cfg.http_timeout)?);
        Ok(Self {
            fetcher: IdentityFetcher::new(http, cfg.ip_endpoints.clone(), cfg.geo_endpoint.clone()),
            candidates: Arc::new(HostGatherer::new()),
            environment: Arc::new(NativeEnvironment::new(cfg.user_agent.clone())),
            probe_window: cfg.probe_window,
        })
    }
}

/// Starts all gathering in the background and returns immediately.
///
/// Updates arrive on `updates`; the channel closes once every task is done
/// and the caller has dropped its own sender.
pub fn load_all(services: Arc<Services>, updates: UnboundedSender<PanelUpdate>) {
    tokio::spawn(load_identity(services.clone(), updates.clone()));
    tokio::spawn(load_local_network(services.clone(), updates.clone()));
    tokio::spawn(load_device(services, updates));
}

async fn load_identity(services: Arc<Services>, updates: UnboundedSender<PanelUpdate>) {
    let identity: PublicIdentity = services.fetcher.fetch_public_identity().await;
    let kind = inspector::classify_device(&services.environment.identification());

    publish(&updates, Panel::PublicIp, panels::public_ip_rows(&identity, kind));
    publish(&updates, Panel::Location, panels::location_rows(&identity.geo));
    publish(&updates, Panel::Network, panels::network_rows(&identity.geo));
}

async fn load_local_network(services: Arc<Services>, updates: UnboundedSender<PanelUpdate>) {
    let addresses: Vec<AddressCandidate> =
        prober::probe_local_addresses(services.candidates.as_ref(), services.probe_window).await;
    let connection: Option<ConnectionInfo> = services.environment.connection();

    publish(
        &updates,
        Panel::LocalNetwork,
        panels::local_network_rows(&addresses, connection.as_ref()),
    );
}

async fn load_device(services: Arc<Services>, updates: UnboundedSender<PanelUpdate>) {
    let snapshot: DeviceSnapshot = inspector::snapshot(services.environment.as_ref());
    publish(&updates, Panel::Device, panels::device_rows(&snapshot));
}

fn publish(updates: &UnboundedSender<PanelUpdate>, panel: Panel, rows: Vec<panels::Row>) {
    if updates.send(PanelUpdate::new(panel, rows)).is_err() {
        trace!("Dropped {} update, receiver gone", panel.title());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStep {
    FlashOn(usize),
    FlashOff(usize),
    Reload,
    Done,
}

/// The refresh sequence for `cards` panels, sorted by offset.
///
/// The reload is not tied to the animation; data may land while panels are
/// still highlighted.
pub fn refresh_timeline(cards: usize) -> Vec<(Duration, RefreshStep)> {
    let mut steps: Vec<(Duration, RefreshStep)> = Vec::with_capacity(cards * 2 + 2);
    for idx in 0..cards {
        let start: Duration = CARD_STAGGER * idx as u32;
        steps.push((start, RefreshStep::FlashOn(idx)));
        steps.push((start + CARD_FLASH, RefreshStep::FlashOff(idx)));
    }
    steps.push((RELOAD_DELAY, RefreshStep::Reload));
    steps.push((CARD_STAGGER * cards as u32 + CARD_FLASH, RefreshStep::Done));
    steps.sort_by_key(|(at, _)| *at);
    steps
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub public: PublicIdentity,
    pub local_addresses: Vec<AddressCandidate>,
    pub connection: Option<ConnectionInfo>,
    pub device: DeviceSnapshot,
}

/// Runs everything and waits for all of it.
pub async fn gather_report(services: &Services) -> Report {
    let (public, local_addresses) = tokio::join!(
        services.fetcher.fetch_public_identity(),
        prober::probe_local_addresses(services.candidates.as_ref(), services.probe_window),
    );
    Report {
        public,
        local_addresses,
        connection: services.environment.connection(),
        device: inspector::snapshot(services.environment.as_ref()),
    }
}
