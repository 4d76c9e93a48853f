//! Candidate routes returned by the directions provider.

use serde::{Deserialize, Serialize};

use super::TravelMode;
use crate::parse::{parse_distance_km, parse_duration, ParseError};
use crate::provider::RawRoute;

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One candidate route between origin and destination.
///
/// Derived values (`eta_minutes`, `distance_km`) are parsed from the provider's
/// human-readable text on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Provider's human-readable duration, e.g. "1 hour 20 mins"
    pub eta_text: String,

    /// Provider's human-readable distance, e.g. "12.3 km"
    pub distance_text: String,

    /// Encoded path geometry (opaque to this crate)
    pub geometry: String,

    /// Route label, e.g. "NH48"
    pub summary: String,

    pub start: Coord,
    pub end: Coord,
}

impl Route {
    /// Build a route from a raw provider payload.
    ///
    /// Driving routes prefer the traffic-adjusted duration and fall back to the
    /// plain duration when the provider omits it.
    pub fn from_raw(raw: &RawRoute, mode: TravelMode) -> Self {
        let eta_text = match (&raw.duration_in_traffic, mode.uses_traffic()) {
            (Some(traffic), true) => traffic.text.clone(),
            _ => raw.duration.text.clone(),
        };

        Self {
            eta_text,
            distance_text: raw.distance_text.clone(),
            geometry: raw.polyline.clone(),
            summary: raw.summary.clone(),
            start: raw.start,
            end: raw.end,
        }
    }

    /// Total travel time in minutes.
    pub fn eta_minutes(&self) -> Result<u64, ParseError> {
        parse_duration(&self.eta_text)
    }

    /// Route length in kilometres.
    pub fn distance_km(&self) -> Result<f64, ParseError> {
        parse_distance_km(&self.distance_text)
    }
}
