//! Coordinates: parsing "lat, lon" text and looking up the current position
//!
//! There is no platform position API on the desktop, so the current position
//! comes from an IP geolocation service.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;

use crate::error::GeoError;

/// Upper bound on one position lookup
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Two signed decimals separated by a comma, e.g. `25.0330, 121.5654`
static COORDINATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?\d+\.\d+),\s*(-?\d+\.\d+)$").expect("valid coordinate regex"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Text form written into the location field: 4 decimals, comma-space
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Parse a location string that is literally a decimal pair
pub fn parse_coordinates(location: &str) -> Option<Coordinates> {
    let caps = COORDINATE_PATTERN.captures(location.trim())?;
    let latitude = caps.get(1)?.as_str().parse().ok()?;
    let longitude = caps.get(2)?.as_str().parse().ok()?;
    Some(Coordinates { latitude, longitude })
}

#[derive(Debug, Deserialize)]
struct PositionReply {
    #[serde(alias = "latitude")]
    lat: Option<f64>,
    #[serde(alias = "longitude")]
    lon: Option<f64>,
}

/// Looks up the machine's approximate position
#[derive(Debug, Clone)]
pub struct Geolocator {
    client: Client,
    url: String,
}

impl Geolocator {
    pub fn new(url: &str) -> Self {
        Self::with_timeout(url, LOOKUP_TIMEOUT)
    }

    pub fn with_timeout(url: &str, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            tracing::warn!("Could not build geolocation client, lookups have no timeout: {}", e);
            Client::new()
        });
        Self {
            client,
            url: url.to_string(),
        }
    }

    pub async fn current_position(&self) -> Result<Coordinates, GeoError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::Status(status.as_u16()));
        }

        let reply: PositionReply = response.json().await?;
        match (reply.lat, reply.lon) {
            (Some(lat), Some(lon)) => {
                tracing::info!("Detected position {:.4}, {:.4}", lat, lon);
                Ok(Coordinates::new(lat, lon))
            }
            _ => Err(GeoError::NoPosition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_pair() {
        let coords = parse_coordinates("25.0330, 121.5654").unwrap();
        assert_eq!(coords.latitude, 25.0330);
        assert_eq!(coords.longitude, 121.5654);
    }

    #[test]
    fn test_parse_negative_without_space() {
        let coords = parse_coordinates("-33.8688,-151.2093").unwrap();
        assert_eq!(coords, Coordinates::new(-33.8688, -151.2093));
    }

    #[test]
    fn test_free_text_is_not_coordinates() {
        assert!(parse_coordinates("Taipei 101").is_none());
        assert!(parse_coordinates("25, 121").is_none());
        assert!(parse_coordinates("25.0330, 121.5654, 3.0").is_none());
        assert!(parse_coordinates("").is_none());
    }

    #[test]
    fn test_format_four_decimals() {
        assert_eq!(Coordinates::new(25.03301234, 121.5).format(), "25.0330, 121.5000");
        let round_trip = parse_coordinates(&Coordinates::new(-1.23449, 7.0).format()).unwrap();
        assert_eq!(round_trip, Coordinates::new(-1.2345, 7.0));
    }

    #[tokio::test]
    async fn test_current_position_with_mock() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "success", "lat": 25.033, "lon": 121.5654}"#)
            .create_async()
            .await;

        let locator = Geolocator::new(&format!("{}/json", server.url()));
        let coords = locator.current_position().await.unwrap();
        assert_eq!(coords, Coordinates::new(25.033, 121.5654));
    }

    #[tokio::test]
    async fn test_current_position_missing_fields() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/json")
            .with_status(200)
            .with_body(r#"{"status": "fail", "message": "private range"}"#)
            .create_async()
            .await;

        let locator = Geolocator::new(&format!("{}/json", server.url()));
        assert!(matches!(locator.current_position().await, Err(GeoError::NoPosition)));
    }

    #[tokio::test]
    async fn test_hung_lookup_times_out() {
        // accepts the connection but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let locator = Geolocator::with_timeout(&format!("http://{}/json", addr), Duration::from_millis(200));
        match locator.current_position().await {
            Err(GeoError::Http(e)) => assert!(e.is_timeout()),
            other => panic!("Expected timeout, got {:?}", other),
        }
    }
}
