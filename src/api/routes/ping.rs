//! Liveness endpoint with a deliberately strict query parameter, used
//! to demonstrate the error envelope to integrators.

use axum::extract::{OriginalUri, Query};
use axum::http::Method;
use serde::Deserialize;

use crate::api::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct PingQuery {
    name: Option<String>,
}

/// `GET /ping?name=` — answers `pong {name}`; names shorter than four
/// characters are rejected with the JSON error envelope.
pub async fn ping(
    method: Method,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PingQuery>,
) -> Result<String, ApiError> {
    let name = query.name.unwrap_or_default();
    if name.len() < 4 {
        return Err(ApiError::bad_request(
            &method,
            &uri,
            "name must be at least 4 characters long",
        ));
    }

    Ok(format!("pong {name}"))
}
