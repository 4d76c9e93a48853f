//! Directions provider boundary.
//!
//! The dashboard never computes paths itself. It asks a [`DirectionsProvider`]
//! for candidate routes and works with whatever comes back:
//! - [`google::GoogleDirectionsProvider`]: HTTP client for the Google Directions API
//! - [`cache::CachedProvider`]: memoizes identical "leave now" lookups

pub mod cache;
pub mod google;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Coord, TravelMode};

pub use cache::CachedProvider;
pub use google::GoogleDirectionsProvider;

/// Errors that can occur at the provider boundary.
///
/// `NoRoutes` means the provider answered but found nothing (usually bad
/// locations). Everything else means the answer itself could not be obtained.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No routes found (provider status {status})")]
    NoRoutes { status: String },

    #[error("Provider unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Provider rejected request ({status}): {message}")]
    Api { status: String, message: String },

    #[error("Malformed provider response: {0}")]
    Malformed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API key not set (expected environment variable {0})")]
    MissingApiKey(String),
}

impl ProviderError {
    /// The provider answered, but there is no route between the locations.
    pub fn is_no_routes(&self) -> bool {
        matches!(self, ProviderError::NoRoutes { .. })
    }

    /// The failure is likely to go away on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Unreachable(_) => true,
            ProviderError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            ProviderError::Api { status, .. } => {
                status == "OVER_QUERY_LIMIT" || status == "UNKNOWN_ERROR"
            }
            _ => false,
        }
    }
}

/// When the trip starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepartureTime {
    Now,
    At(DateTime<Utc>),
}

/// A directions lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteQuery {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
    pub departure: DepartureTime,
    /// Ask for alternative routes in addition to the recommended one
    pub alternatives: bool,
}

impl RouteQuery {
    /// Leave now, with alternatives. Used for the fastest-route lookup.
    pub fn now(origin: impl Into<String>, destination: impl Into<String>, mode: TravelMode) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            mode,
            departure: DepartureTime::Now,
            alternatives: true,
        }
    }

    /// Leave at a given time, single best route. Used for trend sampling.
    pub fn departing_at(
        origin: impl Into<String>,
        destination: impl Into<String>,
        mode: TravelMode,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            mode,
            departure: DepartureTime::At(at),
            alternatives: false,
        }
    }
}

/// A duration as the provider reports it: display text plus exact seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDuration {
    pub text: String,
    pub seconds: u64,
}

impl ProviderDuration {
    pub fn new(text: impl Into<String>, seconds: u64) -> Self {
        Self {
            text: text.into(),
            seconds,
        }
    }
}

/// A route exactly as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRoute {
    pub duration: ProviderDuration,

    /// Traffic-adjusted duration; only present for driving with a departure time
    pub duration_in_traffic: Option<ProviderDuration>,

    pub distance_text: String,
    pub distance_meters: Option<u64>,

    /// Encoded overview polyline
    pub polyline: String,

    pub summary: String,
    pub start: Coord,
    pub end: Coord,
}

impl RawRoute {
    /// Authoritative travel time in seconds for `mode`.
    ///
    /// Driving reads the traffic-adjusted value and falls back to the plain
    /// duration when it is missing.
    pub fn travel_seconds(&self, mode: TravelMode) -> u64 {
        match (&self.duration_in_traffic, mode.uses_traffic()) {
            (Some(traffic), true) => traffic.seconds,
            _ => self.duration.seconds,
        }
    }
}

/// Trait for directions providers.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Fetch candidate routes. An empty list and `ProviderError::NoRoutes`
    /// both mean nothing connects the two locations.
    async fn get_routes(&self, query: &RouteQuery) -> Result<Vec<RawRoute>, ProviderError>;
}
