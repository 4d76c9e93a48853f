//! # Traffic ETA
//!
//! Route ETA dashboard backend: picks the fastest of a provider's candidate
//! routes, estimates fuel cost, and samples how the ETA changes over the next
//! few hours.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (routes, travel modes, trend samples)
//! - **parse**: Provider duration/distance text parsing
//! - **select**: Fastest-route selection, ETA labels, fuel cost
//! - **trend**: Hourly ETA trend sampling and statistics
//! - **provider**: Directions provider boundary (Google client, cache)
//! - **journey**: Composition of the above for one trip
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod journey;
pub mod models;
pub mod parse;
pub mod provider;
pub mod select;
pub mod trend;

pub use models::*;
pub use parse::{parse_distance_km, parse_duration, ParseError};
pub use select::{estimate_fuel_cost, format_eta, select_fastest, SelectError};
pub use trend::sample_trend;
