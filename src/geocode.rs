use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::constants::STATUS_OK;
use crate::error::Result;
use crate::types::Coordinates;

/// Converts a one-line address into coordinates.
///
/// `Ok(None)` means the service answered but had no match for the address.
/// Errors are per-row: callers downgrade them to [`Coordinates::SENTINEL`].
pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> std::result::Result<Option<Coordinates>, GeocodeError>;
}

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("geocoding response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unexpected geocoding response: {0}")]
    UnexpectedShape(String),
}

impl GeocodeError {
    pub fn kind(&self) -> &'static str {
        match self {
            GeocodeError::Network(_) => "network",
            GeocodeError::Parse(_) => "parse",
            GeocodeError::UnexpectedShape(_) => "unexpected_shape",
        }
    }
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

/// Client for the Google Maps geocoding JSON API
pub struct GoogleGeocoder {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(endpoint: &str, api_key: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

impl Geocoder for GoogleGeocoder {
    #[instrument(skip(self))]
    fn geocode(&self, address: &str) -> std::result::Result<Option<Coordinates>, GeocodeError> {
        let body = self
            .client
            .get(&self.endpoint)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()?
            .text()?;
        parse_response(&body)
    }
}

/// Extracts the first result's location from a geocoding response body.
pub fn parse_response(body: &str) -> std::result::Result<Option<Coordinates>, GeocodeError> {
    let value: Value = serde_json::from_str(body)?;

    let status = value
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| GeocodeError::UnexpectedShape("status not found".into()))?;
    if status != STATUS_OK {
        debug!(status, "No coordinates for address");
        return Ok(None);
    }

    let location = value
        .pointer("/results/0/geometry/location")
        .ok_or_else(|| GeocodeError::UnexpectedShape("results[0].geometry.location not found".into()))?;
    let location: Location = serde_json::from_value(location.clone())
        .map_err(|e| GeocodeError::UnexpectedShape(format!("invalid location: {e}")))?;

    Ok(Some(Coordinates {
        lat: location.lat,
        lng: location.lng,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok_response() {
        let body = r#"{
            "status": "OK",
            "results": [
                {"geometry": {"location": {"lat": 39.8, "lng": -89.6}}},
                {"geometry": {"location": {"lat": 1.0, "lng": 2.0}}}
            ]
        }"#;
        let coordinates = parse_response(body).unwrap();
        assert_eq!(coordinates, Some(Coordinates { lat: 39.8, lng: -89.6 }));
    }

    #[test]
    fn test_parse_non_ok_status() {
        let body = r#"{"status": "ZERO_RESULTS", "results": []}"#;
        assert_eq!(parse_response(body).unwrap(), None);

        let body = r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#;
        assert_eq!(parse_response(body).unwrap(), None);
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_response("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, GeocodeError::Parse(_)));
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn test_parse_unexpected_shape() {
        let err = parse_response(r#"{"results": []}"#).unwrap_err();
        assert!(matches!(err, GeocodeError::UnexpectedShape(_)));

        let err = parse_response(r#"{"status": "OK", "results": []}"#).unwrap_err();
        assert!(matches!(err, GeocodeError::UnexpectedShape(_)));

        let body = r#"{"status": "OK", "results": [{"geometry": {"location": {"lat": "north"}}}]}"#;
        let err = parse_response(body).unwrap_err();
        assert_eq!(err.kind(), "unexpected_shape");
    }
}
