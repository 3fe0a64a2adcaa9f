use std::path::PathBuf;
use std::time::Duration;

/// Public address lookups, tried in order until one yields an address.
pub const DEFAULT_IP_ENDPOINTS: &[&str] = &[
    "https://api.ipify.org?format=json",
    "https://ipinfo.io/json",
    "http://ip-api.com/json/",
];

/// Geolocation lookup. `{ip}` is replaced with the public address.
pub const DEFAULT_GEO_ENDPOINT: &str = "http://ip-api.com/json/{ip}";

/// Upper bound for local candidate gathering.
pub const DEFAULT_PROBE_WINDOW: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct Config {
    pub ip_endpoints: Vec<String>,
    pub geo_endpoint: String,
    pub probe_window: Duration,
    /// `None` leaves requests bounded only by the OS network stack.
    pub http_timeout: Option<Duration>,
    /// Identification string used for device and browser classification.
    ///
    /// When absent a string describing this host is synthesized.
    pub user_agent: Option<String>,
    /// Location of the preference file. `None` selects the per-user default.
    pub preferences: Option<PathBuf>,
    pub no_banner: bool,
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ip_endpoints: DEFAULT_IP_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            probe_window: DEFAULT_PROBE_WINDOW,
            http_timeout: None,
            user_agent: None,
            preferences: None,
            no_banner: false,
            quiet: 0,
        }
    }
}
