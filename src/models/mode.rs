//! Travel modes offered by the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the traveller gets from origin to destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown travel mode: {0} (expected driving, walking or bicycling)")]
pub struct UnknownModeError(pub String);

impl TravelMode {
    pub const ALL: [TravelMode; 3] = [TravelMode::Driving, TravelMode::Walking, TravelMode::Bicycling];

    /// Wire name used by the directions provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
        }
    }

    /// Returns true if the provider's traffic-adjusted duration is authoritative for this mode.
    pub fn uses_traffic(&self) -> bool {
        matches!(self, TravelMode::Driving)
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving" | "drive" | "car" => Ok(TravelMode::Driving),
            "walking" | "walk" => Ok(TravelMode::Walking),
            "bicycling" | "cycling" | "bike" => Ok(TravelMode::Bicycling),
            _ => Err(UnknownModeError(s.to_string())),
        }
    }
}
