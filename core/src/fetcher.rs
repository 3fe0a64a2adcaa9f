//! # Public Identity Fetcher
//!
//! Resolves the public address through an ordered list of lookup endpoints,
//! then asks a geolocation service about it. Nothing here returns an error to
//! the caller: a failed endpoint moves on to the next one, and an exhausted
//! list or failed geolocation produces the corresponding fallback state.

use std::sync::Arc;

use async_trait::async_trait;
use ipscope_common::network::geo::{GeoLookup, GeoRecord, PublicIdentity};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

mod http;

pub use http::HttpSource;

const GEO_SUCCESS: &str = "success";
const IP_PLACEHOLDER: &str = "{ip}";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("{url} returned a body that is not JSON: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Anything that can GET a URL and hand back a JSON document.
#[async_trait]
pub trait JsonSource: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoResponse {
    status: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
    region_name: Option<String>,
    city: Option<String>,
    zip: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    timezone: Option<String>,
    isp: Option<String>,
    org: Option<String>,
    #[serde(rename = "as")]
    asn: Option<String>,
    mobile: Option<bool>,
}

impl From<GeoResponse> for GeoRecord {
    fn from(resp: GeoResponse) -> Self {
        GeoRecord {
            country: non_empty(resp.country),
            country_code: non_empty(resp.country_code),
            region: non_empty(resp.region_name),
            city: non_empty(resp.city),
            postal_code: non_empty(resp.zip),
            latitude: resp.lat,
            longitude: resp.lon,
            timezone: non_empty(resp.timezone),
            isp: non_empty(resp.isp),
            org: non_empty(resp.org),
            asn: non_empty(resp.asn),
            mobile: resp.mobile,
        }
    }
}

pub struct IdentityFetcher {
    source: Arc<dyn JsonSource>,
    ip_endpoints: Vec<String>,
    geo_endpoint: String,
}

impl IdentityFetcher {
    /// `geo_endpoint` may contain `{ip}`; otherwise the address is appended.
    pub fn new(source: Arc<dyn JsonSource>, ip_endpoints: Vec<String>, geo_endpoint: String) -> Self {
        Self {
            source,
            ip_endpoints,
            geo_endpoint,
        }
    }

    pub async fn fetch_public_identity(&self) -> PublicIdentity {
        let Some(ip) = self.lookup_address().await else {
            debug!("All {} address endpoint(s) failed", self.ip_endpoints.len());
            return PublicIdentity::unreachable();
        };
        let geo: GeoLookup = self.lookup_geo(&ip).await;
        PublicIdentity { ip: Some(ip), geo }
    }

    /// Walks the endpoint list once, stopping at the first usable address.
    async fn lookup_address(&self) -> Option<String> {
        for url in &self.ip_endpoints {
            match self.source.get_json(url).await {
                Ok(body) => match parse_address(&body) {
                    Some(ip) => return Some(ip),
                    None => debug!("{url} returned no address"),
                },
                Err(e) => debug!("Address lookup failed: {e}"),
            }
        }
        None
    }

    async fn lookup_geo(&self, ip: &str) -> GeoLookup {
        let url: String = geo_url(&self.geo_endpoint, ip);
        let body: Value = match self.source.get_json(&url).await {
            Ok(body) => body,
            Err(e) => {
                debug!("Detailed info unavailable: {e}");
                return GeoLookup::Unavailable;
            }
        };

        let resp: GeoResponse = match serde_json::from_value(body) {
            Ok(resp) => resp,
            Err(e) => {
                debug!("Unexpected geolocation payload: {e}");
                return GeoLookup::Unavailable;
            }
        };

        if resp.status.as_deref() != Some(GEO_SUCCESS) {
            debug!("Geolocation lookup reported status {:?}", resp.status);
            return GeoLookup::Unavailable;
        }
        GeoLookup::Found(resp.into())
    }
}

/// Accepts `{"query": ...}` or `{"ip": ...}`, preferring `query`.
fn parse_address(body: &Value) -> Option<String> {
    ["query", "ip"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|ip| !ip.is_empty())
        .map(str::to_string)
}

fn geo_url(template: &str, ip: &str) -> String {
    if template.contains(IP_PLACEHOLDER) {
        template.replace(IP_PLACEHOLDER, ip)
    } else {
        format!("{}{}", template, ip)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned bodies by URL; unknown URLs fail with a 503.
    #[derive(Default)]
    struct CannedSource {
        bodies: HashMap<String, Value>,
        requests: Mutex<Vec<String>>,
    }

    impl CannedSource {
        fn with(mut self, url: &str, body: Value) -> Self {
            self.bodies.insert(url.to_string(), body);
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl JsonSource for CannedSource {
        async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.bodies.get(url).cloned().ok_or(FetchError::Status {
                url: url.to_string(),
                status: 503,
            })
        }
    }

    fn fetcher(source: Arc<CannedSource>) -> IdentityFetcher {
        IdentityFetcher::new(
            source,
            vec!["https://first.test/".to_string(), "https://second.test/".to_string()],
            "https://geo.test/json/{ip}".to_string(),
        )
    }

    fn geo_success() -> Value {
        json!({
            "status": "success",
            "country": "Netherlands",
            "countryCode": "NL",
            "regionName": "North Holland",
            "city": "Amsterdam",
            "zip": "",
            "lat": 52.37,
            "lon": 4.89,
            "timezone": "Europe/Amsterdam",
            "isp": "Example BV",
            "org": "Example",
            "as": "AS64500 Example BV",
            "mobile": false
        })
    }

    #[tokio::test]
    async fn falls_back_to_second_endpoint() {
        let source = Arc::new(
            CannedSource::default()
                .with("https://second.test/", json!({ "ip": "203.0.113.9" }))
                .with("https://geo.test/json/203.0.113.9", geo_success()),
        );

        let identity = fetcher(source.clone()).fetch_public_identity().await;

        assert_eq!(identity.ip.as_deref(), Some("203.0.113.9"));
        assert_eq!(
            source.requests(),
            vec![
                "https://first.test/".to_string(),
                "https://second.test/".to_string(),
                "https://geo.test/json/203.0.113.9".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn first_success_stops_the_walk() {
        let source = Arc::new(
            CannedSource::default()
                .with("https://first.test/", json!({ "query": "198.51.100.1" }))
                .with("https://second.test/", json!({ "ip": "203.0.113.9" })),
        );

        let identity = fetcher(source.clone()).fetch_public_identity().await;

        assert_eq!(identity.ip.as_deref(), Some("198.51.100.1"));
        assert!(!source.requests().contains(&"https://second.test/".to_string()));
    }

    #[tokio::test]
    async fn empty_address_counts_as_failure() {
        let source = Arc::new(
            CannedSource::default()
                .with("https://first.test/", json!({ "ip": "" }))
                .with("https://second.test/", json!({ "ip": "203.0.113.9" })),
        );

        let identity = fetcher(source).fetch_public_identity().await;
        assert_eq!(identity.ip.as_deref(), Some("203.0.113.9"));
    }

    #[tokio::test]
    async fn exhausted_endpoints_are_unreachable() {
        let source = Arc::new(CannedSource::default());
        let identity = fetcher(source.clone()).fetch_public_identity().await;

        assert_eq!(identity, PublicIdentity::unreachable());
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn geo_failure_status_is_unavailable() {
        let source = Arc::new(
            CannedSource::default()
                .with("https://first.test/", json!({ "ip": "10.0.0.1" }))
                .with(
                    "https://geo.test/json/10.0.0.1",
                    json!({ "status": "fail", "message": "private range", "country": "Nowhere" }),
                ),
        );

        let identity = fetcher(source).fetch_public_identity().await;
        assert_eq!(identity.ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(identity.geo, GeoLookup::Unavailable);
    }

    #[tokio::test]
    async fn geo_success_maps_fields_and_blanks() {
        let source = Arc::new(
            CannedSource::default()
                .with("https://first.test/", json!({ "ip": "203.0.113.9" }))
                .with("https://geo.test/json/203.0.113.9", geo_success()),
        );

        let identity = fetcher(source).fetch_public_identity().await;
        let GeoLookup::Found(record) = identity.geo else {
            panic!("expected a geo record");
        };
        assert_eq!(record.country_code.as_deref(), Some("NL"));
        assert_eq!(record.region.as_deref(), Some("North Holland"));
        assert_eq!(record.postal_code, None);
        assert_eq!(record.asn.as_deref(), Some("AS64500 Example BV"));
        assert_eq!(record.mobile, Some(false));
    }

    #[test]
    fn geo_url_substitutes_or_appends() {
        assert_eq!(geo_url("http://ip-api.com/json/{ip}", "1.2.3.4"), "http://ip-api.com/json/1.2.3.4");
        assert_eq!(geo_url("http://ip-api.com/json/", "1.2.3.4"), "http://ip-api.com/json/1.2.3.4");
    }
}
