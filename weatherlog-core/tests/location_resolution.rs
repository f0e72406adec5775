//! Integration tests for the location resolver using wiremock.
//!
//! Each test points the resolver at mock geocoding / IP-lookup endpoints and
//! verifies which of them is (or is not) consulted.

use std::time::Duration;

use weatherlog_core::{LocationResolver, error::ResolveError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

fn resolver_against(geocode: &MockServer, ip: &MockServer) -> LocationResolver {
    LocationResolver::with_endpoints(TIMEOUT, geocode.uri(), ip.uri()).unwrap()
}

#[tokio::test]
async fn coordinate_pair_skips_both_services() {
    let geocode = MockServer::start().await;
    let ip = MockServer::start().await;

    // Any request to either server would be a contract violation.
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(500)).expect(0).mount(&geocode).await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(500)).expect(0).mount(&ip).await;

    let resolver = resolver_against(&geocode, &ip);
    let coords = resolver.resolve("28.6139,77.2090").await.unwrap();

    assert_eq!(coords.latitude, 28.6139);
    assert_eq!(coords.longitude, 77.2090);
}

#[tokio::test]
async fn blank_input_uses_only_ip_geolocation() {
    let geocode = MockServer::start().await;
    let ip = MockServer::start().await;

    Mock::given(method("GET")).respond_with(ResponseTemplate::new(500)).expect(0).mount(&geocode).await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "203.0.113.9",
            "loc": "37.3860,-122.0838",
            "city": "Mountain View"
        })))
        .expect(1)
        .mount(&ip)
        .await;

    let resolver = resolver_against(&geocode, &ip);
    let coords = resolver.resolve("   ").await.unwrap();

    assert_eq!(coords.latitude, 37.3860);
    assert_eq!(coords.longitude, -122.0838);
}

#[tokio::test]
async fn text_input_is_geocoded() {
    let geocode = MockServer::start().await;
    let ip = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "New York"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "lat": "40.7128", "lon": "-74.0060", "display_name": "New York, USA" }
        ])))
        .expect(1)
        .mount(&geocode)
        .await;

    Mock::given(method("GET")).respond_with(ResponseTemplate::new(500)).expect(0).mount(&ip).await;

    let resolver = resolver_against(&geocode, &ip);
    let coords = resolver.resolve("New York").await.unwrap();

    assert_eq!(coords.latitude, 40.7128);
    assert_eq!(coords.longitude, -74.0060);
}

#[tokio::test]
async fn no_geocoder_match_is_unresolved() {
    let geocode = MockServer::start().await;
    let ip = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&geocode)
        .await;

    let resolver = resolver_against(&geocode, &ip);
    let err = resolver.resolve("xyzzyplugh").await.unwrap_err();

    assert!(matches!(err, ResolveError::Unresolved));
}

#[tokio::test]
async fn geocoder_server_error_is_a_provider_error() {
    let geocode = MockServer::start().await;
    let ip = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&geocode)
        .await;

    let resolver = resolver_against(&geocode, &ip);
    let err = resolver.resolve("Paris").await.unwrap_err();

    // Distinguishable from a no-match; the UI still collapses both.
    assert!(matches!(err, ResolveError::Provider(_)));
}

#[tokio::test]
async fn ip_lookup_failure_is_a_provider_error() {
    let geocode = MockServer::start().await;
    let ip = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ip)
        .await;

    let resolver = resolver_against(&geocode, &ip);
    let err = resolver.resolve("").await.unwrap_err();

    assert!(matches!(err, ResolveError::Provider(_)));
}

#[tokio::test]
async fn malformed_ip_payload_is_unresolved() {
    let geocode = MockServer::start().await;
    let ip = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "203.0.113.9",
            "loc": "not-a-pair"
        })))
        .mount(&ip)
        .await;

    let resolver = resolver_against(&geocode, &ip);
    let err = resolver.resolve("").await.unwrap_err();

    assert!(matches!(err, ResolveError::Unresolved));
}
