//! ETA trend series and its summary statistics.

use serde::{Deserialize, Serialize};

/// A single point on the ETA trend: departure time label and travel time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSample {
    /// Departure time formatted as "HH:MM"
    pub label: String,

    /// Travel time in minutes at that departure time
    pub eta_minutes: f64,
}

impl TrendSample {
    pub fn new(label: impl Into<String>, eta_minutes: f64) -> Self {
        Self {
            label: label.into(),
            eta_minutes,
        }
    }
}

/// Reductions over a trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendStats {
    /// Highest ETA in the series
    pub peak_eta: f64,

    /// Departure label at which the peak first occurs (congestion peak)
    pub peak_label: String,

    /// Lowest ETA in the series
    pub min_eta: f64,

    /// Departure label at which the minimum first occurs (smoothest travel window)
    pub min_label: String,

    /// Arithmetic mean of all ETAs
    pub average_eta: f64,

    pub sample_count: usize,
}

impl TrendStats {
    /// Compute statistics for a series. Returns `None` for an empty series.
    ///
    /// Ties on peak or minimum resolve to the earliest sample.
    pub fn from_samples(samples: &[TrendSample]) -> Option<Self> {
        let first = samples.first()?;
        let mut peak = first;
        let mut min = first;
        let mut total = 0.0;

        for sample in samples {
            if sample.eta_minutes > peak.eta_minutes {
                peak = sample;
            }
            if sample.eta_minutes < min.eta_minutes {
                min = sample;
            }
            total += sample.eta_minutes;
        }

        Some(Self {
            peak_eta: peak.eta_minutes,
            peak_label: peak.label.clone(),
            min_eta: min.eta_minutes,
            min_label: min.label.clone(),
            average_eta: total / samples.len() as f64,
            sample_count: samples.len(),
        })
    }

    /// Spread between the slowest and fastest departure.
    pub fn variation(&self) -> f64 {
        self.peak_eta - self.min_eta
    }
}
