//! REST API endpoints.
//!
//! Axum-based HTTP API the dashboard front end talks to: fastest-route journey
//! details and the hourly ETA trend.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::journey::JourneyError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No routes found: {0}")]
    NoRoutes(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Directions provider unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Directions provider error: {0}")]
    BadGateway(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NoRoutes(_) => (StatusCode::NOT_FOUND, "NO_ROUTES"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "PROVIDER_UNAVAILABLE")
            }
            ApiError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
        };

        if status.is_server_error() {
            tracing::warn!("{}", self);
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<JourneyError> for ApiError {
    fn from(err: JourneyError) -> Self {
        match err {
            JourneyError::InvalidInput(msg) => ApiError::BadRequest(msg),
            JourneyError::NoRoutes => {
                ApiError::NoRoutes("Invalid locations. Please enter valid city names".to_string())
            }
            JourneyError::Provider(e) if e.is_transient() => {
                ApiError::ServiceUnavailable(e.to_string())
            }
            JourneyError::Provider(e) => ApiError::BadGateway(e.to_string()),
            // The provider sent text the selector could not read
            JourneyError::Select(e) => ApiError::BadGateway(e.to_string()),
            JourneyError::Parse(e) => ApiError::BadGateway(e.to_string()),
        }
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            tracing::warn!("Invalid CORS origin {:?}, allowing any origin", origin);
            layer.allow_origin(Any)
        }
    }
}

/// Build the API router.
pub fn build_router(state: AppState, access_log: bool) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    let router = Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/journey", get(routes::journey::journey))
        .route("/api/trend", get(routes::trend::trend))
        .layer(cors)
        .with_state(state);

    if access_log {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::unreachable;
    use crate::provider::ProviderError;

    #[test]
    fn test_journey_error_mapping() {
        let err: ApiError = JourneyError::NoRoutes.into();
        assert!(matches!(err, ApiError::NoRoutes(_)));

        let err: ApiError = JourneyError::InvalidInput("x".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err: ApiError = JourneyError::Provider(unreachable()).into();
        assert!(matches!(err, ApiError::ServiceUnavailable(_)));

        let err: ApiError = JourneyError::Provider(ProviderError::Api {
            status: "REQUEST_DENIED".to_string(),
            message: "bad key".to_string(),
        })
        .into();
        assert!(matches!(err, ApiError::BadGateway(_)));
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::NoRoutes("x".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("x".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ServiceUnavailable("x".to_string())
                .into_response()
                .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::BadGateway("x".to_string()).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
