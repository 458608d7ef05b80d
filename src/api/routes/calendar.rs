//! Calendar endpoints serving ICS feeds of championship matches.

use axum::extract::{OriginalUri, Query, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calendar::presets::custom_calendar;
use crate::calendar::{map_match_event, render_ics, CalendarEvent};
use crate::models::ChampionshipMatch;

#[derive(Debug, Deserialize)]
pub struct SubscribeQuery {
    team: String,
    championship: String,
}

/// `GET /calender/subscribe-url?team=&championship=`
///
/// ICS feed of one team's matches in one championship.
pub async fn subscribe_url(
    State(state): State<AppState>,
    Query(query): Query<SubscribeQuery>,
) -> Result<Response, ApiError> {
    let matches = state
        .faceit
        .get_team_matches_of_championship(&query.team, &query.championship)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    let events = to_events(&state, &matches);
    Ok(ics_response(&render_ics(&events), "matches.ics"))
}

#[derive(Debug, Deserialize)]
pub struct CustomQuery {
    #[serde(rename = "type")]
    preset: String,
}

/// `GET /calender/custom-url?type=<preset>`
///
/// ICS feed combining every team of a preset grouping.
pub async fn custom_url(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<CustomQuery>,
) -> Result<Response, ApiError> {
    let Some(preset) = custom_calendar(&query.preset) else {
        return Err(ApiError::bad_request(
            &method,
            &uri,
            format!("unknown calendar type: {}", query.preset),
        ));
    };

    let mut events = Vec::new();
    for team in preset.teams {
        let matches = state
            .faceit
            .get_team_matches_of_championship(team.team_id, team.championship_id)
            .await
            .map_err(|err| ApiError::Internal(err.to_string()))?;
        events.extend(to_events(&state, &matches));
    }
    events.sort_by_key(|event| event.start_ms);

    let file_name = format!("{}.ics", preset.name);
    Ok(ics_response(&render_ics(&events), &file_name))
}

fn to_events(state: &AppState, matches: &[ChampionshipMatch]) -> Vec<CalendarEvent> {
    matches
        .iter()
        .map(|m| map_match_event(m, state.coverage.get(&m.match_id)))
        .collect()
}

fn ics_response(body: &str, file_name: &str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body.to_string(),
    )
        .into_response()
}
