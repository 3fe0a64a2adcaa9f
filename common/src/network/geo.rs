use serde::Serialize;

/// Approximate location and ownership of a public address.
///
/// Every field is optional; lookup services routinely omit some of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoRecord {
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub isp: Option<String>,
    pub org: Option<String>,
    pub asn: Option<String>,
    pub mobile: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "record", rename_all = "lowercase")]
pub enum GeoLookup {
    Found(GeoRecord),
    Unavailable,
}

/// Result of the public address lookup.
///
/// `ip` is `None` when every lookup endpoint failed, in which case `geo` is
/// always [`GeoLookup::Unavailable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicIdentity {
    pub ip: Option<String>,
    pub geo: GeoLookup,
}

impl PublicIdentity {
    pub fn unreachable() -> Self {
        Self {
            ip: None,
            geo: GeoLookup::Unavailable,
        }
    }
}
