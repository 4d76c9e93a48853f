//! Fastest-route selection, ETA labels and fuel cost estimation.
//!
//! All functions here are pure: they never mutate the supplied routes and
//! return the same result for the same input.

use thiserror::Error;

use crate::models::Route;
use crate::parse::ParseError;

/// Errors that can occur during route selection.
#[derive(Debug, Error, PartialEq)]
pub enum SelectError {
    #[error("No routes to select from")]
    EmptyInput,

    #[error("Fuel efficiency must be greater than 0 km/l (got {efficiency})")]
    Division { efficiency: f64 },

    #[error("Route ETA could not be parsed: {0}")]
    Parse(#[from] ParseError),
}

/// Order routes by parsed ETA, fastest first.
///
/// The sort is stable: routes with equal ETAs keep the provider's order.
pub fn rank_routes(routes: &[Route]) -> Result<Vec<&Route>, SelectError> {
    let mut keyed = routes
        .iter()
        .map(|route| route.eta_minutes().map(|minutes| (minutes, route)))
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by_key(|(minutes, _)| *minutes);

    Ok(keyed.into_iter().map(|(_, route)| route).collect())
}

/// Pick the route with the smallest ETA. Ties go to the earliest route.
pub fn select_fastest(routes: &[Route]) -> Result<&Route, SelectError> {
    rank_routes(routes)?
        .into_iter()
        .next()
        .ok_or(SelectError::EmptyInput)
}

/// Compact ETA label such as "2 hrs 5 min".
///
/// Zero-valued components are omitted, so a total of 0 minutes yields an
/// empty string. Callers must handle that case before display.
pub fn format_eta(minutes: u64) -> String {
    let days = minutes / 1440;
    let hours = (minutes % 1440) / 60;
    let mins = minutes % 60;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(format!("{} day", days));
    }
    if hours > 0 {
        parts.push(format!("{} hrs", hours));
    }
    if mins > 0 {
        parts.push(format!("{} min", mins));
    }

    parts.join(" ")
}

/// Fuel cost for a trip: litres needed times price per litre.
pub fn estimate_fuel_cost(
    distance_km: f64,
    price_per_liter: f64,
    efficiency_km_per_liter: f64,
) -> Result<f64, SelectError> {
    // Also rejects NaN
    if !(efficiency_km_per_liter > 0.0) {
        return Err(SelectError::Division {
            efficiency: efficiency_km_per_liter,
        });
    }

    Ok((distance_km / efficiency_km_per_liter) * price_per_liter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coord;

    fn route(summary: &str, eta: &str) -> Route {
        Route {
            eta_text: eta.to_string(),
            distance_text: "10 km".to_string(),
            geometry: String::new(),
            summary: summary.to_string(),
            start: Coord::new(0.0, 0.0),
            end: Coord::new(1.0, 1.0),
        }
    }

    #[test]
    fn test_select_fastest_picks_minimum() {
        let routes = vec![
            route("A", "1 hour 5 mins"),
            route("B", "58 mins"),
            route("C", "1 day 1 min"),
        ];
        assert_eq!(select_fastest(&routes).unwrap().summary, "B");
    }

    #[test]
    fn test_select_fastest_tie_keeps_first() {
        let routes = vec![route("A", "50 mins"), route("B", "30 mins"), route("C", "30 mins")];
        let fastest = select_fastest(&routes).unwrap();
        assert!(std::ptr::eq(fastest, &routes[1]));
    }

    #[test]
    fn test_select_fastest_empty() {
        assert_eq!(select_fastest(&[]), Err(SelectError::EmptyInput));
    }

    #[test]
    fn test_select_fastest_is_idempotent() {
        let routes = vec![route("A", "50 mins"), route("B", "30 mins"), route("C", "30 mins")];
        let before = routes.clone();

        let first = select_fastest(&routes).unwrap().clone();
        let second = select_fastest(&routes).unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(routes, before);
    }

    #[test]
    fn test_select_fastest_propagates_parse_error() {
        let routes = vec![route("A", "30 mins"), route("B", "mins 30")];
        assert!(matches!(
            select_fastest(&routes),
            Err(SelectError::Parse(ParseError::MissingCount { .. }))
        ));
    }

    #[test]
    fn test_rank_routes_is_stable() {
        let routes = vec![
            route("A", "2 hours"),
            route("B", "40 mins"),
            route("C", "2 hours"),
            route("D", "40 mins"),
        ];
        let order: Vec<&str> = rank_routes(&routes)
            .unwrap()
            .iter()
            .map(|r| r.summary.as_str())
            .collect();
        assert_eq!(order, vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn test_format_eta() {
        assert_eq!(format_eta(125), "2 hrs 5 min");
        assert_eq!(format_eta(45), "45 min");
        assert_eq!(format_eta(120), "2 hrs");
        assert_eq!(format_eta(1441), "1 day 1 min");
        assert_eq!(format_eta(3075), "2 day 3 hrs 15 min");
    }

    #[test]
    fn test_format_eta_zero_is_empty() {
        assert_eq!(format_eta(0), "");
    }

    #[test]
    fn test_estimate_fuel_cost() {
        assert_eq!(estimate_fuel_cost(150.0, 100.0, 15.0), Ok(1000.0));
        assert_eq!(estimate_fuel_cost(0.0, 100.0, 15.0), Ok(0.0));
    }

    #[test]
    fn test_estimate_fuel_cost_rejects_bad_efficiency() {
        assert!(matches!(
            estimate_fuel_cost(150.0, 100.0, 0.0),
            Err(SelectError::Division { .. })
        ));
        assert!(estimate_fuel_cost(150.0, 100.0, -5.0).is_err());
        assert!(estimate_fuel_cost(150.0, 100.0, f64::NAN).is_err());
    }
}
