//! # Device Model
//!
//! Classification results and environment readouts for the machine running
//! the tool. Every readout is optional: a missing value is a normal state and
//! renders as a placeholder.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceKind {
    Tablet,
    Mobile,
    Desktop,
}

impl DeviceKind {
    pub fn label(self) -> &'static str {
        match self {
            DeviceKind::Tablet => "📱 Tablet",
            DeviceKind::Mobile => "📱 Mobile",
            DeviceKind::Desktop => "💻 Desktop",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BrowserFamily {
    Firefox,
    Opera,
    InternetExplorer,
    Edge,
    Chrome,
    Safari,
    Unknown,
}

impl BrowserFamily {
    pub fn name(self) -> &'static str {
        match self {
            BrowserFamily::Firefox => "Firefox",
            BrowserFamily::Opera => "Opera",
            BrowserFamily::InternetExplorer => "Internet Explorer",
            BrowserFamily::Edge => "Edge",
            BrowserFamily::Chrome => "Chrome",
            BrowserFamily::Safari => "Safari",
            BrowserFamily::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BrowserFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.width, self.height)
    }
}

/// Link readout for the primary interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConnectionInfo {
    /// e.g. `wifi` or `ethernet`
    pub kind: Option<String>,
    pub downlink_mbps: Option<f64>,
    pub rtt_ms: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSnapshot {
    pub identification: String,
    pub kind: DeviceKind,
    pub browser: BrowserFamily,
    pub platform: Option<String>,
    pub language: Option<String>,
    pub screen: Option<Dimensions>,
    pub viewport: Option<Dimensions>,
    pub color_depth: Option<u8>,
    pub online: Option<bool>,
    pub cookies_enabled: Option<bool>,
}
