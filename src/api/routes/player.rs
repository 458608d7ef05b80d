//! Player endpoints: the Elo summary and the bot command snippet.

use axum::extract::rejection::QueryRejection;
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::faceit::FaceitError;
use crate::models::{BotText, CurrentView, PlayerSummary, RankingView, TodayView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    #[default]
    Cs2,
    Csgo,
}

impl Game {
    fn as_str(self) -> &'static str {
        match self {
            Game::Cs2 => "cs2",
            Game::Csgo => "csgo",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EloQuery {
    #[serde(default)]
    format: Format,
    nickname: Option<String>,
    #[serde(default)]
    game: Game,
    #[serde(default)]
    minimal: bool,
    #[serde(default)]
    position: bool,
    #[serde(default)]
    today: bool,
    #[serde(default)]
    current: bool,
}

/// `GET /faceit/player/elo/:id`
///
/// Optional sections (ranking, today delta, current projection) are all
/// fetched unless `minimal` narrows the response to the explicitly
/// requested ones. Domain failures answer 200 with bot-readable text.
pub async fn elo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    query: Result<Query<EloQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|r| ApiError::bad_request(&method, &uri, r.body_text()))?;
    let game = query.game.as_str();

    // The nickname query wins over the path id so chat commands can pass
    // `$(querystring)` straight through.
    let identifier = match query.nickname.as_deref() {
        Some(nickname) if !nickname.is_empty() => nickname,
        _ => id.as_str(),
    };

    let Ok(player) = state.faceit.get_player(identifier, game).await else {
        return Ok(bot_text("player not found"));
    };

    let Some(stats) = player.game(game) else {
        return Ok(bot_text(&format!("player did not play {game} yet")));
    };

    let mut summary = PlayerSummary {
        id: Some(player.player_id.clone()),
        name: Some(player.nickname.clone()),
        level: Some(stats.skill_level),
        elo: Some(stats.faceit_elo),
        ..Default::default()
    };

    if !query.minimal || query.position {
        let Ok(pair) = state
            .faceit
            .get_position(&player.player_id, game, &stats.region, &player.country)
            .await
        else {
            return Ok(bot_text(&format!("player did not play {game} yet")));
        };

        summary.country = Some(RankingView::new(&player.country, pair.country));
        summary.region = Some(RankingView::new(&stats.region, pair.region));
    }

    if !query.minimal || query.today {
        match state
            .faceit
            .get_today(&player.player_id, game, stats.faceit_elo)
            .await
        {
            Ok(today) => {
                summary.today = Some(TodayView {
                    matches: today.matches,
                    wins: today.wins,
                    loses: today.loses,
                    elo: today.delta,
                    last_matches: today.recent_form,
                });
            }
            Err(FaceitError::NoMatches) => summary.today = Some(TodayView::none()),
            // History or detail fetch trouble: drop the section rather
            // than fail the whole summary.
            Err(_) => {}
        }
    }

    if !query.minimal || query.current {
        if let Ok(current) = state.faceit.get_current(&player.player_id).await {
            summary.current = Some(CurrentView {
                name: current.name,
                map: current.map,
                gain: current.gain,
                loss: current.loss,
            });
        }
    }

    record_usage(&state, &player.player_id, &headers);

    Ok(match query.format {
        Format::Json => Json(summary).into_response(),
        Format::Text => bot_text(&summary.to_bot_string()),
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct GetCommandQuery {
    bot: Option<String>,
}

/// `GET /faceit/player/get-command/:id`
///
/// Emits a ready-to-paste chat-bot command pointing back at the elo
/// endpoint, resolving the path id to a stable player id first.
pub async fn get_command(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<GetCommandQuery>,
) -> Result<Response, ApiError> {
    let bot = query.bot.as_deref().unwrap_or("nightbot");

    let Ok(player) = state.faceit.get_player(&id, Game::default().as_str()).await else {
        return Ok(bot_text("player not found"));
    };

    let base = public_base_url(&state, &headers);
    let elo_url = format!("{base}/faceit/player/elo/{}", player.player_id);

    if bot == "nightbot" {
        let mut response = String::from("Bot: nightbot\n\n");
        response.push_str(&format!(
            "Add new Command:       !addcom !elo $(urlfetch {elo_url}?nickname=$(querystring))\n"
        ));
        response.push_str(&format!(
            "Edit existing Command: !editcom !elo $(urlfetch {elo_url}?nickname=$(querystring))\n"
        ));
        return Ok(bot_text(&response));
    }

    let mut response = String::from("Bot not found, available bot(s): nightbot\n\n");
    response.push_str(&format!("Url to be used:                {elo_url}\n"));
    response.push_str(&format!(
        "Url with optional querystring: {elo_url}?nickname=<optional_querystring>\n\n"
    ));
    response.push_str("=> replace \"<optional_querystring>\" with bot specific variable\n");
    Ok(bot_text(&response))
}

fn bot_text(text: &str) -> Response {
    (StatusCode::OK, text.to_string()).into_response()
}

/// Scheme + host + configured prefix, reconstructed from proxy headers.
fn public_base_url(state: &AppState, headers: &HeaderMap) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get("host")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    let mut base = format!("{scheme}://{host}");
    if let Some(prefix) = &state.config.route_prefix {
        base.push_str(prefix);
    }
    base
}

/// Usage counters: which players are looked up, which bots call us and,
/// for nightbot, which chat user asked.
fn record_usage(state: &AppState, player_id: &str, headers: &HeaderMap) {
    state.player_log.record(player_id);

    if let Some(agent) = headers.get("user-agent").and_then(|v| v.to_str().ok()) {
        state.bot_log.record(agent);
    }

    if let Some(channel) = headers.get("nightbot-channel").and_then(|v| v.to_str().ok()) {
        let name = url::form_urlencoded::parse(channel.as_bytes())
            .find(|(key, _)| key == "name")
            .map(|(_, value)| value.into_owned());
        if let Some(name) = name {
            state.user_log.record(&name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{get_response, get_text, test_state};
    use crate::fetch::MockFetch;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn player_body() -> Value {
        json!({
            "player_id": "u1",
            "nickname": "shroud",
            "games": {
                "cs2": { "skill_level": 10, "faceit_elo": 2500, "region": "EU" }
            },
            "country": "de"
        })
    }

    #[tokio::test]
    async fn test_minimal_json_summary_has_only_core_fields() {
        let state = test_state(
            MockFetch::new().respond("players?nickname=shroud", player_body()),
            MockFetch::new(),
        );

        let (status, body) = get_response(
            state,
            "/faceit/player/elo/u1?nickname=shroud&format=json&minimal=true",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["id"], json!("u1"));
        assert_eq!(obj["name"], json!("shroud"));
        assert_eq!(obj["level"], json!(10));
        assert_eq!(obj["elo"], json!(2500));
        assert!(!obj.contains_key("country"));
        assert!(!obj.contains_key("current"));
        assert!(!obj.contains_key("today"));
    }

    #[tokio::test]
    async fn test_minimal_text_summary() {
        let state = test_state(
            MockFetch::new().respond("players?nickname=shroud", player_body()),
            MockFetch::new(),
        );

        let (status, text) =
            get_text(state, "/faceit/player/elo/u1?nickname=shroud&minimal=true").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "shroud ist FaceIT Level 10, Elo 2500");
    }

    #[tokio::test]
    async fn test_unknown_player_is_plain_text_200() {
        let state = test_state(MockFetch::new(), MockFetch::new());

        let (status, text) = get_text(state, "/faceit/player/elo/u1?nickname=ghost").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "player not found");
    }

    #[tokio::test]
    async fn test_unranked_player_full_request() {
        // Without ranking data the non-minimal request short-circuits.
        let state = test_state(
            MockFetch::new().respond("players?nickname=shroud", player_body()),
            MockFetch::new(),
        );

        let (status, text) = get_text(state, "/faceit/player/elo/u1?nickname=shroud").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "player did not play cs2 yet");
    }

    #[tokio::test]
    async fn test_minimal_with_today_section() {
        let data = MockFetch::new()
            .respond("players?nickname=shroud", player_body())
            .respond("/history", json!({ "items": [] }));

        let state = test_state(data, MockFetch::new());
        let (status, text) = get_text(
            state,
            "/faceit/player/elo/u1?nickname=shroud&minimal=true&today=true",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "shroud ist FaceIT Level 10, Elo 2500 - Today: 0");
    }

    #[tokio::test]
    async fn test_bad_game_value_is_400_envelope() {
        let state = test_state(MockFetch::new(), MockFetch::new());

        let (status, body) =
            get_response(state, "/faceit/player/elo/u1?nickname=shroud&game=dota").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], json!("BAD_REQUEST"));
        assert_eq!(json["error"]["path"], json!("/faceit/player/elo/u1"));
    }

    #[tokio::test]
    async fn test_get_command_nightbot_snippet() {
        let uuid = "11111111-2222-4333-8444-555555555555";
        let state = test_state(
            MockFetch::new().respond(&format!("players/{uuid}"), player_body()),
            MockFetch::new(),
        );

        let (status, text) =
            get_text(state, &format!("/faceit/player/get-command/{uuid}")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(text.starts_with("Bot: nightbot"));
        assert!(text.contains("!addcom !elo $(urlfetch "));
        assert!(text.contains("/faceit/player/elo/u1?nickname=$(querystring)"));
    }

    #[tokio::test]
    async fn test_get_command_unknown_bot_lists_urls() {
        let uuid = "11111111-2222-4333-8444-555555555555";
        let state = test_state(
            MockFetch::new().respond(&format!("players/{uuid}"), player_body()),
            MockFetch::new(),
        );

        let (_, text) = get_text(
            state,
            &format!("/faceit/player/get-command/{uuid}?bot=streamelements"),
        )
        .await;

        assert!(text.starts_with("Bot not found, available bot(s): nightbot"));
        assert!(text.contains("/faceit/player/elo/u1"));
    }
}
