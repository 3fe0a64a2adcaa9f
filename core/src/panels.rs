//! # Display Panels
//!
//! Turns gathered results into labelled rows for the five display regions.
//! These builders are pure: they decide *what* is shown, including every
//! fallback text, and leave colour and layout to the front end.

use ipscope_common::device::{ConnectionInfo, DeviceKind, DeviceSnapshot, Dimensions};
use ipscope_common::network::address::{AddressCandidate, NetworkClass};
use ipscope_common::network::geo::{GeoLookup, GeoRecord, PublicIdentity};
use serde::Serialize;

pub const NOT_AVAILABLE: &str = "N/A";
pub const VIEWPORT_LABEL: &str = "Viewport";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Panel {
    PublicIp,
    Location,
    Network,
    LocalNetwork,
    Device,
}

impl Panel {
    pub const ALL: [Panel; 5] = [
        Panel::PublicIp,
        Panel::Location,
        Panel::Network,
        Panel::LocalNetwork,
        Panel::Device,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Panel::PublicIp => "Public IP",
            Panel::Location => "Location",
            Panel::Network => "Network Provider",
            Panel::LocalNetwork => "Local Network",
            Panel::Device => "Device",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Normal,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub label: String,
    pub value: String,
    pub tone: Tone,
}

impl Row {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            tone: Tone::Normal,
        }
    }

    pub fn warning(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tone: Tone::Warning,
            ..Self::new(label, value)
        }
    }
}

/// New content for one panel. Replaces whatever the panel showed before.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelUpdate {
    pub panel: Panel,
    pub rows: Vec<Row>,
}

impl PanelUpdate {
    pub fn new(panel: Panel, rows: Vec<Row>) -> Self {
        Self { panel, rows }
    }
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

pub fn public_ip_rows(identity: &PublicIdentity, device: DeviceKind) -> Vec<Row> {
    match &identity.ip {
        Some(ip) => vec![Row::new("Public IP", ip), Row::new("Device Type", device.label())],
        None => vec![Row::warning("Public IP", "Unable to fetch IP")],
    }
}

pub fn location_rows(geo: &GeoLookup) -> Vec<Row> {
    let GeoLookup::Found(record) = geo else {
        return vec![
            Row::warning("Status", "⚠️ Location data unavailable"),
            Row::new("Note", "The lookup service could not be reached or refused the address"),
        ];
    };

    vec![
        Row::new("Country", country(record)),
        Row::new("City", or_na(record.city.as_deref())),
        Row::new("Region", or_na(record.region.as_deref())),
        Row::new("Postal Code", or_na(record.postal_code.as_deref())),
        Row::new("Timezone", or_na(record.timezone.as_deref())),
        Row::new("Coordinates", coordinates(record)),
    ]
}

pub fn network_rows(geo: &GeoLookup) -> Vec<Row> {
    let GeoLookup::Found(record) = geo else {
        return vec![
            Row::warning("Status", "⚠️ Network details unavailable"),
            Row::new("Note", "Outbound lookups may be blocked on this network"),
        ];
    };

    let connection: &str = if record.mobile.unwrap_or(false) {
        "Mobile"
    } else {
        "Broadband"
    };

    vec![
        Row::new("ISP", or_na(record.isp.as_deref())),
        Row::new("Organization", or_na(record.org.as_deref())),
        Row::new("AS Number", or_na(record.asn.as_deref())),
        Row::new("Connection Type", connection),
    ]
}

fn country(record: &GeoRecord) -> String {
    match (&record.country, &record.country_code) {
        (Some(name), Some(code)) => format!("{name} ({code})"),
        (Some(name), None) => name.clone(),
        (None, _) => NOT_AVAILABLE.to_string(),
    }
}

fn coordinates(record: &GeoRecord) -> String {
    match (record.latitude, record.longitude) {
        (Some(lat), Some(lon)) => format!("{lat}, {lon}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn local_network_rows(
    addresses: &[AddressCandidate],
    connection: Option<&ConnectionInfo>,
) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();

    match addresses.first() {
        Some(first) => {
            for (idx, addr) in addresses.iter().enumerate() {
                let kind: &str = if addr.is_private() { "Private" } else { "Local" };
                rows.push(Row::new(format!("{kind} IP {}", idx + 1), addr.as_str()));
            }
            let class: NetworkClass = NetworkClass::of(first);
            rows.push(Row::new("Network Class", class.label()));
            rows.push(Row::new("Subnet Mask (Estimated)", class.subnet_guess()));
        }
        None => {
            rows.push(Row::warning("Status", "⚠️ Unable to detect local IP"));
            rows.push(Row::new("Note", "Interface enumeration may be restricted here"));
            rows.push(Row::new(
                "Alternative",
                "Run \"ip addr\" (Linux), \"ifconfig\" (macOS) or \"ipconfig\" (Windows)",
            ));
        }
    }

    if let Some(connection) = connection {
        rows.push(Row::new(
            "Connection Type",
            connection.kind.as_deref().unwrap_or("Unknown"),
        ));
        if let Some(downlink) = connection.downlink_mbps {
            rows.push(Row::new("Downlink Speed", format!("{downlink} Mbps")));
        }
        if let Some(rtt) = connection.rtt_ms {
            rows.push(Row::new("Round Trip Time", format!("{rtt} ms")));
        }
    }

    rows
}

pub fn device_rows(snapshot: &DeviceSnapshot) -> Vec<Row> {
    let dims = |d: Option<Dimensions>| d.map(|d| d.to_string()).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let flag = |f: Option<bool>, yes: &str, no: &str| match f {
        Some(true) => yes.to_string(),
        Some(false) => no.to_string(),
        None => NOT_AVAILABLE.to_string(),
    };

    vec![
        Row::new("Browser", snapshot.browser.name()),
        Row::new("Platform", or_na(snapshot.platform.as_deref())),
        Row::new("Language", or_na(snapshot.language.as_deref())),
        Row::new("Screen Resolution", dims(snapshot.screen)),
        Row::new(VIEWPORT_LABEL, dims(snapshot.viewport)),
        Row::new(
            "Color Depth",
            snapshot
                .color_depth
                .map(|depth| format!("{depth}-bit"))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        Row::new("Online Status", flag(snapshot.online, "🟢 Online", "🔴 Offline")),
        Row::new("Cookies Enabled", flag(snapshot.cookies_enabled, "✅ Yes", "❌ No")),
    ]
}

/// Rewrites the viewport row in place. Returns `false` when there is none.
pub fn overwrite_viewport(rows: &mut [Row], viewport: Dimensions) -> bool {
    match rows.iter_mut().find(|row| row.label == VIEWPORT_LABEL) {
        Some(row) => {
            row.value = viewport.to_string();
            true
        }
        None => false,
    }
}
