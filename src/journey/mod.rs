//! Journey planning: the composition the dashboard shows for one trip.
//!
//! Fetches candidate routes leaving now, selects the fastest, and derives the
//! ETA label, distance, fuel cost and map payload for it.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::models::{Coord, Route, TravelMode};
use crate::parse::ParseError;
use crate::provider::{DirectionsProvider, ProviderError, RouteQuery};
use crate::select::{estimate_fuel_cost, format_eta, rank_routes, select_fastest, SelectError};

/// Errors that can occur while planning a journey.
#[derive(Debug, Error)]
pub enum JourneyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No routes found between the given locations")]
    NoRoutes,

    #[error(transparent)]
    Provider(ProviderError),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// What the user asked for.
#[derive(Debug, Clone)]
pub struct JourneyRequest {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
    pub fuel_price_per_liter: f64,
    pub efficiency_km_per_liter: f64,
}

impl JourneyRequest {
    /// Reject input the selector would choke on.
    pub fn validate(&self) -> Result<(), JourneyError> {
        if self.origin.trim().is_empty() || self.destination.trim().is_empty() {
            return Err(JourneyError::InvalidInput(
                "Start and destination locations are required".to_string(),
            ));
        }
        if !(self.efficiency_km_per_liter > 0.0) {
            return Err(JourneyError::InvalidInput(
                "Fuel efficiency must be greater than 0 km/l".to_string(),
            ));
        }
        if !(self.fuel_price_per_liter >= 0.0) {
            return Err(JourneyError::InvalidInput(
                "Fuel price must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// The fastest route as displayed.
#[derive(Debug, Clone, Serialize)]
pub struct FastestRoute {
    pub summary: String,
    pub eta_minutes: u64,
    pub eta_label: String,
    pub distance_text: String,
    pub distance_km: f64,
}

/// Everything the map renderer needs.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    /// Encoded path, decoded by the renderer
    pub geometry: String,
    pub start: Coord,
    pub end: Coord,
}

/// A slower candidate route.
#[derive(Debug, Clone, Serialize)]
pub struct RouteOption {
    pub summary: String,
    pub eta_label: String,
    pub distance_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JourneyReport {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
    pub fastest: FastestRoute,
    pub estimated_fuel_cost: f64,
    pub map: MapView,
    /// Remaining routes, fastest first
    pub alternatives: Vec<RouteOption>,
}

/// ETA label for display. A zero-minute trip shows as "< 1 min" rather than nothing.
pub fn display_eta(minutes: u64) -> String {
    let label = format_eta(minutes);
    if label.is_empty() {
        "< 1 min".to_string()
    } else {
        label
    }
}

/// Plan a journey leaving now.
pub async fn plan_journey<P>(
    provider: &P,
    request: &JourneyRequest,
) -> Result<JourneyReport, JourneyError>
where
    P: DirectionsProvider + ?Sized,
{
    request.validate()?;

    let query = RouteQuery::now(
        request.origin.trim(),
        request.destination.trim(),
        request.mode,
    );
    let raw_routes = match provider.get_routes(&query).await {
        Ok(routes) if routes.is_empty() => return Err(JourneyError::NoRoutes),
        Ok(routes) => routes,
        Err(e) if e.is_no_routes() => return Err(JourneyError::NoRoutes),
        Err(e) => return Err(JourneyError::Provider(e)),
    };

    let routes: Vec<Route> = raw_routes
        .iter()
        .map(|raw| Route::from_raw(raw, request.mode))
        .collect();

    let fastest = select_fastest(&routes)?;
    let eta_minutes = fastest.eta_minutes()?;
    let distance_km = fastest.distance_km()?;
    let estimated_fuel_cost = estimate_fuel_cost(
        distance_km,
        request.fuel_price_per_liter,
        request.efficiency_km_per_liter,
    )?;

    let alternatives = rank_routes(&routes)?
        .into_iter()
        .filter(|route| !std::ptr::eq(*route, fastest))
        .map(|route| -> Result<RouteOption, ParseError> {
            Ok(RouteOption {
                summary: route.summary.clone(),
                eta_label: display_eta(route.eta_minutes()?),
                distance_text: route.distance_text.clone(),
            })
        })
        .collect::<Result<Vec<_>, ParseError>>()?;

    info!(
        "Fastest of {} route(s) {} → {}: {} ({} min)",
        routes.len(),
        request.origin,
        request.destination,
        fastest.summary,
        eta_minutes
    );

    Ok(JourneyReport {
        origin: request.origin.clone(),
        destination: request.destination.clone(),
        mode: request.mode,
        fastest: FastestRoute {
            summary: fastest.summary.clone(),
            eta_minutes,
            eta_label: display_eta(eta_minutes),
            distance_text: fastest.distance_text.clone(),
            distance_km,
        },
        estimated_fuel_cost,
        map: MapView {
            geometry: fastest.geometry.clone(),
            start: fastest.start,
            end: fastest.end,
        },
        alternatives,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::{raw_route, unreachable, MockProvider};
    use crate::provider::DepartureTime;

    fn request(mode: TravelMode) -> JourneyRequest {
        JourneyRequest {
            origin: "Bengaluru".to_string(),
            destination: "Mangaluru".to_string(),
            mode,
            fuel_price_per_liter: 100.0,
            efficiency_km_per_liter: 15.0,
        }
    }

    #[tokio::test]
    async fn test_plan_journey_picks_fastest() {
        let provider = MockProvider::new(vec![Ok(vec![
            raw_route("NH 75", 3 * 3600, Some(4 * 3600)),
            raw_route("NH 48", 3 * 3600 + 1800, Some(3 * 3600 + 1800)),
            raw_route("SH 88", 5 * 3600, None),
        ])]);

        let report = plan_journey(&provider, &request(TravelMode::Driving))
            .await
            .unwrap();

        assert_eq!(report.fastest.summary, "NH 48");
        assert_eq!(report.fastest.eta_minutes, 210);
        assert_eq!(report.fastest.eta_label, "3 hrs 30 min");
        assert_eq!(report.estimated_fuel_cost, 1000.0);
        assert_eq!(report.map.geometry, "_p~iF~ps|U_ulLnnqC_mqNvxq`@");

        let alternatives: Vec<&str> = report
            .alternatives
            .iter()
            .map(|r| r.summary.as_str())
            .collect();
        assert_eq!(alternatives, vec!["NH 75", "SH 88"]);
    }

    #[tokio::test]
    async fn test_plan_journey_queries_now_with_alternatives() {
        let provider = MockProvider::new(vec![Ok(vec![raw_route("A", 600, None)])]);
        plan_journey(&provider, &request(TravelMode::Walking))
            .await
            .unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].departure, DepartureTime::Now);
        assert!(calls[0].alternatives);
        assert_eq!(calls[0].mode, TravelMode::Walking);
    }

    #[tokio::test]
    async fn test_plan_journey_no_routes() {
        let provider = MockProvider::new(vec![Ok(vec![])]);
        let err = plan_journey(&provider, &request(TravelMode::Driving))
            .await
            .unwrap_err();
        assert!(matches!(err, JourneyError::NoRoutes));

        let provider = MockProvider::new(vec![Err(ProviderError::NoRoutes {
            status: "NOT_FOUND".to_string(),
        })]);
        let err = plan_journey(&provider, &request(TravelMode::Driving))
            .await
            .unwrap_err();
        assert!(matches!(err, JourneyError::NoRoutes));
    }

    #[tokio::test]
    async fn test_plan_journey_provider_unreachable() {
        let provider = MockProvider::new(vec![Err(unreachable())]);
        let err = plan_journey(&provider, &request(TravelMode::Driving))
            .await
            .unwrap_err();
        match err {
            JourneyError::Provider(e) => assert!(e.is_transient()),
            other => panic!("Expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_plan_journey_rejects_zero_efficiency_before_calling_provider() {
        let provider = MockProvider::new(vec![]);
        let mut req = request(TravelMode::Driving);
        req.efficiency_km_per_liter = 0.0;

        let err = plan_journey(&provider, &req).await.unwrap_err();
        assert!(matches!(err, JourneyError::InvalidInput(_)));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_plan_journey_rejects_blank_locations() {
        let provider = MockProvider::new(vec![]);
        let mut req = request(TravelMode::Driving);
        req.destination = "   ".to_string();

        assert!(matches!(
            plan_journey(&provider, &req).await,
            Err(JourneyError::InvalidInput(_))
        ));
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_display_eta_handles_zero() {
        assert_eq!(display_eta(0), "< 1 min");
        assert_eq!(display_eta(61), "1 hrs 1 min");
    }
}
