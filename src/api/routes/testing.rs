//! Shared helpers for route tests: an [`AppState`] wired to mock
//! transports and one-shot request drivers.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::build_router;
use crate::calendar::CoverageIndex;
use crate::config::AppConfig;
use crate::faceit::FaceitClient;
use crate::fetch::MockFetch;
use crate::flights::VolantaClient;
use crate::usage::UsageLog;

/// State backed by the given canned transports. The data-API mock also
/// serves the Volanta feed; tests that exercise flights register the
/// feed fragment on `internal`.
pub fn test_state(data: MockFetch, internal: MockFetch) -> AppState {
    test_state_with(data, internal, CoverageIndex::empty())
}

pub fn test_state_with(data: MockFetch, internal: MockFetch, coverage: CoverageIndex) -> AppState {
    let internal = Arc::new(internal);
    let usage_dir = std::env::temp_dir().join(format!("faceit-relay-test-{}", Uuid::new_v4()));

    AppState {
        config: Arc::new(test_config(usage_dir.clone())),
        faceit: Arc::new(FaceitClient::with_transports(Arc::new(data), internal.clone())),
        flights: Arc::new(VolantaClient::with_transport(internal)),
        coverage: Arc::new(coverage),
        player_log: Arc::new(UsageLog::new(&usage_dir, "players.json")),
        user_log: Arc::new(UsageLog::new(&usage_dir, "users.json")),
        bot_log: Arc::new(UsageLog::new(&usage_dir, "bots.json")),
    }
}

fn test_config(usage_dir: PathBuf) -> AppConfig {
    AppConfig {
        environment: "test".to_string(),
        route_prefix: None,
        port: 0,
        faceit_api_key: Uuid::new_v4().to_string(),
        usage_dir,
        coverage_file: None,
    }
}

/// Drive one GET through the full router, returning status and raw body.
pub async fn get_response(state: AppState, path: &str) -> (StatusCode, Vec<u8>) {
    let router = build_router(state);
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

/// Like [`get_response`] but decodes the body as UTF-8 text.
pub async fn get_text(state: AppState, path: &str) -> (StatusCode, String) {
    let (status, body) = get_response(state, path).await;
    (status, String::from_utf8(body).unwrap())
}
