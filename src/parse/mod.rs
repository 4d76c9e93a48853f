//! Parsing of the provider's human-readable durations and distances.
//!
//! Providers render travel times as text such as "1 hour 20 mins" or
//! "2 days 3 hours". Unit order and the set of units present vary, so each unit
//! keyword is located independently and its count is read from the token
//! immediately before it.

use thiserror::Error;

/// Errors that can occur while parsing provider text.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Unit '{unit}' has no preceding count in {text:?}")]
    MissingCount { unit: String, text: String },

    #[error("Invalid count {token:?} for unit '{unit}'")]
    InvalidCount { unit: String, token: String },

    #[error("Duration too large: {0:?}")]
    Overflow(String),

    #[error("Invalid distance: {0:?}")]
    InvalidDistance(String),

    #[error("Unknown distance unit '{unit}' in {text:?}")]
    UnknownDistanceUnit { unit: String, text: String },
}

const MINUTES_PER_DAY: u64 = 1440;
const MINUTES_PER_HOUR: u64 = 60;

#[derive(Clone, Copy)]
enum DurationUnit {
    Day,
    Hour,
    Minute,
}

/// Recognised keywords in scan order. A later keyword for the same unit
/// overwrites an earlier one; counts are never summed.
const DURATION_KEYWORDS: [(&str, DurationUnit); 6] = [
    ("day", DurationUnit::Day),
    ("days", DurationUnit::Day),
    ("hour", DurationUnit::Hour),
    ("hours", DurationUnit::Hour),
    ("min", DurationUnit::Minute),
    ("mins", DurationUnit::Minute),
];

/// Convert a duration such as "1 hour 20 mins" into total minutes.
///
/// Commas are stripped before tokenizing on whitespace. Text without any
/// recognised unit yields `Ok(0)`. A unit keyword in first position, or a
/// non-integer token before a keyword, is an error.
pub fn parse_duration(text: &str) -> Result<u64, ParseError> {
    let cleaned = text.replace(',', "");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let (mut days, mut hours, mut minutes) = (0u64, 0u64, 0u64);

    for (keyword, unit) in DURATION_KEYWORDS {
        let Some(pos) = tokens.iter().position(|t| *t == keyword) else {
            continue;
        };
        let count = count_before(&tokens, pos, text)?;
        match unit {
            DurationUnit::Day => days = count,
            DurationUnit::Hour => hours = count,
            DurationUnit::Minute => minutes = count,
        }
    }

    days.checked_mul(MINUTES_PER_DAY)
        .zip(hours.checked_mul(MINUTES_PER_HOUR))
        .and_then(|(d, h)| d.checked_add(h))
        .and_then(|total| total.checked_add(minutes))
        .ok_or_else(|| ParseError::Overflow(text.to_string()))
}

fn count_before(tokens: &[&str], pos: usize, text: &str) -> Result<u64, ParseError> {
    let unit = tokens[pos];
    if pos == 0 {
        return Err(ParseError::MissingCount {
            unit: unit.to_string(),
            text: text.to_string(),
        });
    }

    let token = tokens[pos - 1];
    token.parse().map_err(|_| ParseError::InvalidCount {
        unit: unit.to_string(),
        token: token.to_string(),
    })
}

/// Convert a distance such as "12.3 km" or "1,204 km" into kilometres.
///
/// The first token is the number; the optional second token is the unit
/// (`km`, `m`, `mi` or `ft`). A bare number is taken as kilometres.
pub fn parse_distance_km(text: &str) -> Result<f64, ParseError> {
    let cleaned = text.replace(',', "");
    let mut tokens = cleaned.split_whitespace();

    let value: f64 = tokens
        .next()
        .and_then(|n| n.parse().ok())
        .filter(|v: &f64| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| ParseError::InvalidDistance(text.to_string()))?;

    let factor = match tokens.next() {
        None | Some("km") => 1.0,
        Some("m") => 0.001,
        Some("mi") => 1.609_344,
        Some("ft") => 0.000_304_8,
        Some(other) => {
            return Err(ParseError::UnknownDistanceUnit {
                unit: other.to_string(),
                text: text.to_string(),
            })
        }
    };

    Ok(value * factor)
}
