use axum::extract::{Query, State};
use axum::Json;
use chrono::Local;
use serde::Deserialize;

use super::journey::parse_mode;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::config::MAX_HORIZON_HOURS;
use crate::trend::{sample_trend, TrendReport};

#[derive(Debug, Deserialize)]
pub struct TrendParams {
    pub origin: String,
    pub destination: String,
    pub mode: Option<String>,
    pub hours: Option<u32>,
}

pub async fn trend(
    State(state): State<AppState>,
    Query(params): Query<TrendParams>,
) -> Result<Json<TrendReport>, ApiError> {
    let mode = parse_mode(params.mode.as_deref())?;
    let origin = params.origin.trim();
    let destination = params.destination.trim();
    if origin.is_empty() || destination.is_empty() {
        return Err(ApiError::BadRequest(
            "Start and destination locations are required".to_string(),
        ));
    }

    let hours = params.hours.unwrap_or(state.config.trend.horizon_hours);
    if hours == 0 || hours > MAX_HORIZON_HOURS {
        return Err(ApiError::BadRequest(format!(
            "hours must be between 1 and {}",
            MAX_HORIZON_HOURS
        )));
    }

    // Labels follow the server's wall clock
    let now = Local::now().fixed_offset();
    let samples =
        sample_trend(state.provider.as_ref(), origin, destination, mode, hours, now).await;

    Ok(Json(TrendReport::new(samples)))
}
