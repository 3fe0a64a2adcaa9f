#![cfg(test)]
use std::sync::Arc;
use std::time::Duration;

use ipscope_common::device::DeviceKind;
use ipscope_common::network::geo::{GeoLookup, PublicIdentity};
use ipscope_core::fetcher::{HttpSource, IdentityFetcher};
use ipscope_core::panels;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_for(server: &MockServer, ip_paths: &[&str]) -> IdentityFetcher {
    let http = HttpSource::new(Some(Duration::from_secs(5))).expect("client builds");
    IdentityFetcher::new(
        Arc::new(http),
        ip_paths.iter().map(|p| format!("{}{}", server.uri(), p)).collect(),
        format!("{}/geo/{{ip}}", server.uri()),
    )
}

/// A failing first endpoint falls through to the second, and the third is
/// never asked.
#[tokio::test]
async fn falls_back_to_next_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/first"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ip": "198.51.100.7" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/third"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ip": "192.0.2.1" })))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geo/198.51.100.7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "country": "Netherlands",
            "countryCode": "NL",
            "regionName": "North Holland",
            "city": "Amsterdam",
            "zip": "1012",
            "lat": 52.37,
            "lon": 4.89,
            "timezone": "Europe/Amsterdam",
            "isp": "Example Fiber",
            "org": "Example BV",
            "as": "AS64500 Example",
            "mobile": false
        })))
        .mount(&server)
        .await;

    let identity: PublicIdentity = fetcher_for(&server, &["/first", "/second", "/third"])
        .fetch_public_identity()
        .await;

    assert_eq!(identity.ip.as_deref(), Some("198.51.100.7"));
    let GeoLookup::Found(record) = &identity.geo else {
        panic!("expected geolocation, got {:?}", identity.geo);
    };
    assert_eq!(record.city.as_deref(), Some("Amsterdam"));
    assert_eq!(record.asn.as_deref(), Some("AS64500 Example"));

    let location = panels::location_rows(&identity.geo);
    assert!(location.iter().any(|r| r.value == "Netherlands (NL)"));
    let network = panels::network_rows(&identity.geo);
    assert!(network.iter().any(|r| r.label == "Connection Type" && r.value == "Broadband"));
}

#[tokio::test]
async fn geo_failure_keeps_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "query": "203.0.113.9" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geo/203.0.113.9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "fail",
            "message": "reserved range"
        })))
        .mount(&server)
        .await;

    let identity = fetcher_for(&server, &["/ip"]).fetch_public_identity().await;

    assert_eq!(identity.ip.as_deref(), Some("203.0.113.9"));
    assert!(matches!(identity.geo, GeoLookup::Unavailable));

    let public = panels::public_ip_rows(&identity, DeviceKind::Desktop);
    assert_eq!(public[0].value, "203.0.113.9");
    assert_eq!(panels::location_rows(&identity.geo)[0].value, "⚠️ Location data unavailable");
    assert_eq!(panels::network_rows(&identity.geo)[0].value, "⚠️ Network details unavailable");
}

#[tokio::test]
async fn exhausted_endpoints_report_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let identity = fetcher_for(&server, &["/a", "/b"]).fetch_public_identity().await;

    assert!(identity.ip.is_none());
    assert!(matches!(identity.geo, GeoLookup::Unavailable));
    assert_eq!(
        panels::public_ip_rows(&identity, DeviceKind::Desktop)[0].value,
        "Unable to fetch IP"
    );
}
