//! Volanta flight lookup endpoint.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct FlightQuery {
    username: Option<String>,
}

/// `GET /flights/current/:id`
///
/// Resolves the user's in-progress flight to its details URL. The
/// `username` query wins over the path id, mirroring the elo endpoint.
pub async fn current_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<FlightQuery>,
) -> Result<Response, ApiError> {
    let username = match query.username.as_deref() {
        Some(username) if !username.is_empty() => username,
        _ => id.as_str(),
    };

    match state.flights.get_current_flight(username).await {
        Some(url) => Ok((StatusCode::OK, url).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            format!("no current flight found for {username}"),
        )
            .into_response()),
    }
}
