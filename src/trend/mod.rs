//! Hourly ETA trend sampling.
//!
//! Queries the provider once per hour offset from "now" and collects whatever
//! succeeds. A failed hour-slot is logged and left out; it never aborts the
//! remaining slots.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{TravelMode, TrendSample, TrendStats};
use crate::provider::{DirectionsProvider, RouteQuery};

/// Default number of hourly samples.
pub const DEFAULT_HORIZON_HOURS: u32 = 6;

/// Sample the travel time for departures at `now`, `now + 1h`, ... `now + (horizon_hours - 1)h`.
///
/// Samples are returned in departure order, labelled "HH:MM" in `now`'s time
/// zone. Driving reads the traffic-adjusted duration, other modes the plain
/// duration. The result may be shorter than `horizon_hours`, or empty.
pub async fn sample_trend<P, Tz>(
    provider: &P,
    origin: &str,
    destination: &str,
    mode: TravelMode,
    horizon_hours: u32,
    now: DateTime<Tz>,
) -> Vec<TrendSample>
where
    P: DirectionsProvider + ?Sized,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut samples = Vec::new();

    for offset in 0..horizon_hours {
        let departure = now.clone() + chrono::Duration::hours(i64::from(offset));
        let label = departure.format("%H:%M").to_string();
        let query =
            RouteQuery::departing_at(origin, destination, mode, departure.with_timezone(&Utc));

        match provider.get_routes(&query).await {
            Ok(routes) => match routes.first() {
                Some(route) => {
                    let eta_minutes = route.travel_seconds(mode) as f64 / 60.0;
                    debug!("Trend sample {}: {:.2} min", label, eta_minutes);
                    samples.push(TrendSample::new(label, eta_minutes));
                }
                None => warn!("Skipping trend sample at {}: no route returned", label),
            },
            Err(e) => warn!("Skipping trend sample at {}: {}", label, e),
        }
    }

    samples
}

/// A sampled series together with its statistics.
#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    pub samples: Vec<TrendSample>,
    /// `None` when no sample succeeded
    pub stats: Option<TrendStats>,
}

impl TrendReport {
    pub fn new(samples: Vec<TrendSample>) -> Self {
        let stats = TrendStats::from_samples(&samples);
        Self { samples, stats }
    }
}
