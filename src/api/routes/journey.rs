use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::journey::{plan_journey, JourneyReport, JourneyRequest};
use crate::models::TravelMode;

#[derive(Debug, Deserialize)]
pub struct JourneyParams {
    pub origin: String,
    pub destination: String,
    pub mode: Option<String>,
    pub fuel_price: Option<f64>,
    pub efficiency: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct JourneyResponse {
    #[serde(flatten)]
    pub report: JourneyReport,
    pub currency: String,
}

/// Parse an optional `mode` query parameter, defaulting to driving.
pub(crate) fn parse_mode(mode: Option<&str>) -> Result<TravelMode, ApiError> {
    mode.map(str::parse::<TravelMode>)
        .transpose()
        .map(Option::unwrap_or_default)
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

pub async fn journey(
    State(state): State<AppState>,
    Query(params): Query<JourneyParams>,
) -> Result<Json<JourneyResponse>, ApiError> {
    let fuel = &state.config.fuel;
    let request = JourneyRequest {
        origin: params.origin,
        destination: params.destination,
        mode: parse_mode(params.mode.as_deref())?,
        fuel_price_per_liter: params.fuel_price.unwrap_or(fuel.price_per_liter),
        efficiency_km_per_liter: params.efficiency.unwrap_or(fuel.efficiency_km_per_liter),
    };

    let report = plan_journey(state.provider.as_ref(), &request).await?;

    Ok(Json(JourneyResponse {
        report,
        currency: fuel.currency.clone(),
    }))
}
