//! REST API.
//!
//! Axum-based HTTP surface. Domain failures from the aggregation service
//! deliberately come back as 200 plain text so chat bots can relay them
//! verbatim; only request-validation failures and genuinely unexpected
//! errors use the structured JSON envelope with a 4xx/5xx status.

pub mod routes;
pub mod state;

use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        method: String,
        path: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(method: &Method, uri: &Uri, message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            method: method.to_string(),
            path: uri.path().to_string(),
        }
    }
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest { .. } => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let (message, method, path) = match self {
            ApiError::NotFound(message) | ApiError::Internal(message) => (message, None, None),
            ApiError::BadRequest {
                message,
                method,
                path,
            } => (message, Some(method), Some(path)),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                method,
                path,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Assemble the router, nesting under the configured prefix when set.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/ping", get(routes::ping::ping))
        .route("/faceit/player/elo/:id", get(routes::player::elo))
        .route(
            "/faceit/player/get-command/:id",
            get(routes::player::get_command),
        )
        .route("/calender/subscribe-url", get(routes::calendar::subscribe_url))
        .route("/calender/custom-url", get(routes::calendar::custom_url))
        .route("/flights/current/:id", get(routes::flights::current_flight));

    let router = match state.config.route_prefix.as_deref() {
        Some(prefix) => Router::new().nest(prefix, api),
        None => api,
    };

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
