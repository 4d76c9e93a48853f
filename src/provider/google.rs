//! Google Directions API client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{DepartureTime, DirectionsProvider, ProviderDuration, ProviderError, RawRoute, RouteQuery};
use crate::config::ProviderConfig;
use crate::models::Coord;

/// Statuses meaning "the request was fine, there is just no route".
const NO_ROUTE_STATUSES: [&str; 2] = ["ZERO_RESULTS", "NOT_FOUND"];

/// HTTP client for the Google Directions API.
pub struct GoogleDirectionsProvider {
    client: Client,
    base_url: Url,
    api_key: String,
    traffic_model: String,
}

impl GoogleDirectionsProvider {
    /// Create a provider from configuration and an API key.
    pub fn new(config: &ProviderConfig, api_key: String) -> Result<Self, ProviderError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ProviderError::Malformed(format!("invalid base URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
            traffic_model: config.traffic_model.clone(),
        })
    }

    /// Create a provider reading the API key from the configured environment variable.
    pub fn from_env(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ProviderError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(config, api_key)
    }

    /// Build the request URL for `query`.
    ///
    /// The API refuses departure times in the past, so a departure that is
    /// already due is sent as "now".
    fn request_url(&self, query: &RouteQuery, now: DateTime<Utc>) -> Url {
        let departure = match query.departure {
            DepartureTime::At(at) if at > now => at.timestamp().to_string(),
            _ => "now".to_string(),
        };

        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("origin", &query.origin)
                .append_pair("destination", &query.destination)
                .append_pair("mode", query.mode.as_str())
                .append_pair("departure_time", &departure)
                .append_pair("alternatives", if query.alternatives { "true" } else { "false" });
            if query.mode.uses_traffic() {
                pairs.append_pair("traffic_model", &self.traffic_model);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }
}

#[async_trait]
impl DirectionsProvider for GoogleDirectionsProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn get_routes(&self, query: &RouteQuery) -> Result<Vec<RawRoute>, ProviderError> {
        debug!(
            "Requesting directions {} → {} ({})",
            query.origin, query.destination, query.mode
        );

        let url = self.request_url(query, Utc::now());
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        parse_directions_response(&body)
    }
}

// ── Wire format ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<GoogleRoute>,
}

#[derive(Debug, Deserialize)]
struct GoogleRoute {
    #[serde(default)]
    summary: String,
    overview_polyline: Polyline,
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct Polyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct Leg {
    duration: TextValue,
    #[serde(default)]
    duration_in_traffic: Option<TextValue>,
    distance: TextValue,
    start_location: LatLng,
    end_location: LatLng,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    text: String,
    value: u64,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<LatLng> for Coord {
    fn from(p: LatLng) -> Self {
        Coord::new(p.lat, p.lng)
    }
}

/// Map a Directions API JSON body to raw routes, reading the first leg of each route.
pub fn parse_directions_response(body: &str) -> Result<Vec<RawRoute>, ProviderError> {
    let response: DirectionsResponse = serde_json::from_str(body)?;

    if NO_ROUTE_STATUSES.contains(&response.status.as_str()) {
        return Err(ProviderError::NoRoutes {
            status: response.status,
        });
    }
    if response.status != "OK" {
        return Err(ProviderError::Api {
            status: response.status,
            message: response.error_message.unwrap_or_default(),
        });
    }

    response
        .routes
        .into_iter()
        .map(|route| -> Result<RawRoute, ProviderError> {
            let leg = route
                .legs
                .into_iter()
                .next()
                .ok_or_else(|| ProviderError::Malformed("route has no legs".to_string()))?;

            Ok(RawRoute {
                duration: ProviderDuration::new(leg.duration.text, leg.duration.value),
                duration_in_traffic: leg
                    .duration_in_traffic
                    .map(|d| ProviderDuration::new(d.text, d.value)),
                distance_text: leg.distance.text,
                distance_meters: Some(leg.distance.value),
                polyline: route.overview_polyline.points,
                summary: route.summary,
                start: leg.start_location.into(),
                end: leg.end_location.into(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TravelMode;
    use pretty_assertions::assert_eq;

    fn provider() -> GoogleDirectionsProvider {
        GoogleDirectionsProvider::new(&ProviderConfig::default(), "test-key".to_string()).unwrap()
    }

    fn ok_body() -> &'static str {
        r#"{
            "status": "OK",
            "routes": [
                {
                    "summary": "NH 275",
                    "overview_polyline": { "points": "abc123" },
                    "legs": [
                        {
                            "duration": { "text": "3 hours 5 mins", "value": 11100 },
                            "duration_in_traffic": { "text": "3 hours 40 mins", "value": 13200 },
                            "distance": { "text": "145.6 km", "value": 145600 },
                            "start_location": { "lat": 12.9716, "lng": 77.5946 },
                            "end_location": { "lat": 12.2958, "lng": 76.6394 }
                        }
                    ]
                },
                {
                    "summary": "SH 17",
                    "overview_polyline": { "points": "def456" },
                    "legs": [
                        {
                            "duration": { "text": "3 hours 30 mins", "value": 12600 },
                            "distance": { "text": "160 km", "value": 160000 },
                            "start_location": { "lat": 12.9716, "lng": 77.5946 },
                            "end_location": { "lat": 12.2958, "lng": 76.6394 }
                        }
                    ]
                }
            ]
        }"#
    }

    #[test]
    fn test_parse_ok_response() {
        let routes = parse_directions_response(ok_body()).unwrap();
        assert_eq!(routes.len(), 2);

        let first = &routes[0];
        assert_eq!(first.summary, "NH 275");
        assert_eq!(first.polyline, "abc123");
        assert_eq!(first.duration, ProviderDuration::new("3 hours 5 mins", 11100));
        assert_eq!(
            first.duration_in_traffic,
            Some(ProviderDuration::new("3 hours 40 mins", 13200))
        );
        assert_eq!(first.distance_meters, Some(145600));
        assert_eq!(first.start, Coord::new(12.9716, 77.5946));
        assert_eq!(first.end, Coord::new(12.2958, 76.6394));
    }

    #[test]
    fn test_parse_missing_traffic_duration() {
        let routes = parse_directions_response(ok_body()).unwrap();
        let second = &routes[1];
        assert!(second.duration_in_traffic.is_none());
        assert_eq!(second.travel_seconds(TravelMode::Driving), 12600);
    }

    #[test]
    fn test_parse_zero_results() {
        let err = parse_directions_response(r#"{"status": "ZERO_RESULTS", "routes": []}"#)
            .unwrap_err();
        assert!(err.is_no_routes());

        let err = parse_directions_response(r#"{"status": "NOT_FOUND"}"#).unwrap_err();
        assert!(err.is_no_routes());
    }

    #[test]
    fn test_parse_api_error() {
        let body = r#"{
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "routes": []
        }"#;
        match parse_directions_response(body).unwrap_err() {
            ProviderError::Api { status, message } => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message, "The provided API key is invalid.");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_route_without_legs() {
        let body = r#"{
            "status": "OK",
            "routes": [{ "summary": "x", "overview_polyline": { "points": "" }, "legs": [] }]
        }"#;
        assert!(matches!(
            parse_directions_response(body),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_directions_response("<html>oops</html>"),
            Err(ProviderError::Json(_))
        ));
    }

    #[test]
    fn test_request_url_now() {
        let query = RouteQuery::now("Bengaluru", "Mysuru Palace", TravelMode::Driving);
        let url = provider().request_url(&query, Utc::now());
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert!(pairs.contains(&("origin".to_string(), "Bengaluru".to_string())));
        assert!(pairs.contains(&("destination".to_string(), "Mysuru Palace".to_string())));
        assert!(pairs.contains(&("mode".to_string(), "driving".to_string())));
        assert!(pairs.contains(&("departure_time".to_string(), "now".to_string())));
        assert!(pairs.contains(&("alternatives".to_string(), "true".to_string())));
        assert!(pairs.contains(&("traffic_model".to_string(), "best_guess".to_string())));
        assert!(pairs.contains(&("key".to_string(), "test-key".to_string())));
    }

    #[test]
    fn test_request_url_future_departure() {
        let now = Utc::now();
        let at = now + chrono::Duration::hours(2);
        let query = RouteQuery::departing_at("A", "B", TravelMode::Walking, at);
        let url = provider().request_url(&query, now);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert!(pairs.contains(&("departure_time".to_string(), at.timestamp().to_string())));
        assert!(pairs.contains(&("alternatives".to_string(), "false".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "traffic_model"));
    }

    #[test]
    fn test_request_url_past_departure_sends_now() {
        let now = Utc::now();
        let query = RouteQuery::departing_at("A", "B", TravelMode::Driving, now);
        let url = provider().request_url(&query, now);
        assert!(url.query().unwrap().contains("departure_time=now"));
    }

    #[test]
    fn test_from_env_missing_key() {
        let config = ProviderConfig {
            api_key_env: "TRAFFIC_ETA_TEST_UNSET_KEY".to_string(),
            ..ProviderConfig::default()
        };
        assert!(matches!(
            GoogleDirectionsProvider::from_env(&config),
            Err(ProviderError::MissingApiKey(_))
        ));
    }
}
