//! Location resolution: free text, raw coordinate pairs, or IP fallback.
//!
//! Resolution order for a user-supplied string:
//! 1. blank input delegates to IP-based geolocation;
//! 2. a comma-separated pair of two numeric tokens is returned directly,
//!    with no network call;
//! 3. anything else goes to the forward geocoder (Nominatim).

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::ResolveError;
use crate::model::Coordinates;

const GEOCODE_URL: &str = "https://nominatim.openstreetmap.org";
const IP_LOOKUP_URL: &str = "https://ipinfo.io";

/// Nominatim asks API consumers to identify themselves.
const USER_AGENT: &str = "weatherlog/0.1";

/// Resolves user input into coordinates using external geolocation services.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    http: Client,
    geocode_url: String,
    ip_url: String,
}

/// One match from the Nominatim search endpoint. `lat`/`lon` arrive as strings.
#[derive(Debug, Deserialize)]
struct GeocodeMatch {
    lat: String,
    lon: String,
}

/// ipinfo-style payload: `loc` is a `"lat,lon"` string.
#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    loc: String,
}

impl LocationResolver {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            geocode_url: GEOCODE_URL.to_string(),
            ip_url: IP_LOOKUP_URL.to_string(),
        })
    }

    /// Same resolver, pointed at alternative endpoints (test doubles).
    pub fn with_endpoints(
        timeout: Duration,
        geocode_url: impl Into<String>,
        ip_url: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let mut resolver = Self::new(timeout)?;
        resolver.geocode_url = geocode_url.into();
        resolver.ip_url = ip_url.into();
        Ok(resolver)
    }

    /// Resolve user input to coordinates.
    pub async fn resolve(&self, input: &str) -> Result<Coordinates, ResolveError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return self.ip_lookup().await;
        }

        match parse_input(trimmed) {
            ParsedInput::Pair(coords) => Ok(coords),
            // All-numeric comma input that is not a two-token pair is a typo,
            // not a place name; do not send it to the geocoder.
            ParsedInput::NumericButNotPair => Err(ResolveError::Unresolved),
            ParsedInput::Text => self.geocode(trimmed).await,
        }
    }

    /// Forward-geocode free text via the Nominatim search endpoint.
    async fn geocode(&self, query: &str) -> Result<Coordinates, ResolveError> {
        let url = format!("{}/search", self.geocode_url);

        let res = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        // A non-2xx status is a provider problem, not a no-match.
        let res = res.error_for_status().inspect_err(|err| {
            tracing::warn!(%err, "geocoding request failed");
        })?;

        let matches: Vec<GeocodeMatch> = res.json().await?;

        let best = matches.first().ok_or(ResolveError::Unresolved)?;

        let latitude: f64 = best.lat.parse().map_err(|_| ResolveError::Unresolved)?;
        let longitude: f64 = best.lon.parse().map_err(|_| ResolveError::Unresolved)?;

        Ok(Coordinates { latitude, longitude })
    }

    /// Approximate the caller's position from network origin (no input).
    async fn ip_lookup(&self) -> Result<Coordinates, ResolveError> {
        let url = format!("{}/json", self.ip_url);

        let res = self.http.get(&url).send().await?;

        let res = res.error_for_status().inspect_err(|err| {
            tracing::warn!(%err, "IP geolocation request failed");
        })?;

        let body: IpLookupResponse = res.json().await?;

        parse_pair(&body.loc).ok_or(ResolveError::Unresolved)
    }
}

#[derive(Debug, PartialEq)]
enum ParsedInput {
    /// Exactly two numeric tokens: use them as `(lat, lon)` directly.
    Pair(Coordinates),
    /// Comma-separated and all tokens numeric, but not exactly two of them.
    NumericButNotPair,
    /// Anything else: treat as a place name.
    Text,
}

fn parse_input(input: &str) -> ParsedInput {
    if !input.contains(',') {
        return ParsedInput::Text;
    }

    let tokens: Vec<&str> = input.split(',').map(str::trim).collect();

    if !tokens.iter().all(|t| is_numeric_token(t)) {
        return ParsedInput::Text;
    }

    match tokens.as_slice() {
        [lat, lon] => match (lat.parse::<f64>(), lon.parse::<f64>()) {
            (Ok(latitude), Ok(longitude)) => {
                ParsedInput::Pair(Coordinates { latitude, longitude })
            }
            _ => ParsedInput::NumericButNotPair,
        },
        _ => ParsedInput::NumericButNotPair,
    }
}

/// A token is numeric if, after removing at most one `.` and at most one `-`,
/// the remainder is non-empty and all digits. This keeps plain text like
/// "New York" away from the coordinate path.
fn is_numeric_token(token: &str) -> bool {
    let without_dot = token.replacen('.', "", 1);
    let without_sign = without_dot.replacen('-', "", 1);

    !without_sign.is_empty() && without_sign.chars().all(|c| c.is_ascii_digit())
}

/// Parse a `"lat,lon"` string into coordinates.
fn parse_pair(s: &str) -> Option<Coordinates> {
    let (lat, lon) = s.split_once(',')?;

    Some(Coordinates {
        latitude: lat.trim().parse().ok()?,
        longitude: lon.trim().parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_pair(input: &str) -> Coordinates {
        match parse_input(input) {
            ParsedInput::Pair(c) => c,
            other => panic!("expected a coordinate pair for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn well_formed_pair_is_returned_unchanged() {
        let coords = expect_pair("28.6139,77.2090");
        assert_eq!(coords.latitude, 28.6139);
        assert_eq!(coords.longitude, 77.2090);
    }

    #[test]
    fn negative_coordinates_parse() {
        let coords = expect_pair("-33.87, -151.21");
        assert_eq!(coords.latitude, -33.87);
        assert_eq!(coords.longitude, -151.21);
    }

    #[test]
    fn plain_text_falls_through_to_geocoding() {
        assert_eq!(parse_input("New York"), ParsedInput::Text);
        assert_eq!(parse_input("Paris, France"), ParsedInput::Text);
    }

    #[test]
    fn three_numeric_tokens_are_unresolved_not_geocoded() {
        assert_eq!(parse_input("1,2,3"), ParsedInput::NumericButNotPair);
    }

    #[test]
    fn numeric_token_allows_one_dot_and_one_sign() {
        assert!(is_numeric_token("28.6139"));
        assert!(is_numeric_token("-77"));
        assert!(is_numeric_token("-77.5"));
        assert!(!is_numeric_token("1.2.3"));
        assert!(!is_numeric_token("12a"));
        assert!(!is_numeric_token(""));
        assert!(!is_numeric_token("-"));
        assert!(!is_numeric_token("."));
    }

    #[test]
    fn ip_payload_loc_parses() {
        let coords = parse_pair("37.3860,-122.0838").unwrap();
        assert_eq!(coords.latitude, 37.3860);
        assert_eq!(coords.longitude, -122.0838);
        assert!(parse_pair("garbage").is_none());
    }
}
