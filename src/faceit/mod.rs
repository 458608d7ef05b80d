//! Faceit aggregation service.
//!
//! Resolves players, derives leaderboard positions, estimates today's Elo
//! delta from match history, projects gain/loss for the match currently in
//! progress, and serves championship match listings through a TTL cache.
//!
//! Two transports: the documented Data API v4 (bearer-authenticated) and
//! the undocumented `www.faceit.com/api` match endpoints (anonymous,
//! defensively typed). Every failure is a tagged [`FaceitError`]; nothing
//! on this layer panics or bubbles a raw transport error to a route.

pub mod gain_loss;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone, Timelike};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::warn;
use url::Url;
use uuid::Uuid;

use crate::cache::TtlCache;
use crate::fetch::{Fetch, FetchError, Fetcher};
use crate::models::{
    ChampionshipMatch, ChampionshipMatchPage, MatchDetails, MatchDetailsEnvelope,
    MatchGroupsEnvelope, MatchHistoryPage, Player, PlayerSearchPage, RankingPage, RankingPair,
};

pub use gain_loss::{calculate_gain_loss, calculate_gain_loss_hub, GainLoss};

const DATA_API_BASE: &str = "https://open.faceit.com/data/v4";
const INTERNAL_API_BASE: &str = "https://www.faceit.com/api";

/// Upstream page size; pagination continues while a page comes back full.
const MATCH_PAGE_SIZE: usize = 100;

/// Championship listings barely change within a broadcast day.
const CHAMPIONSHIP_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Domain failures of the aggregation service.
#[derive(Debug, Error)]
pub enum FaceitError {
    #[error("player not found")]
    PlayerNotFound,

    #[error("player has not played ranked yet")]
    PlayerDidNotPlayYet,

    #[error("match history unavailable")]
    MatchesNotFound,

    #[error("no matches in the current window")]
    NoMatches,

    #[error("match details unavailable")]
    MatchDetailsNotFound,

    #[error("player absent from match rosters")]
    PlayerNotInMatch,

    #[error("no ongoing or ready match")]
    NoCurrentMatch,

    /// Upstream payload no longer matches the expected shape.
    #[error("unexpected upstream payload: {0}")]
    Schema(#[source] serde_json::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Today's session, derived from history plus the oldest match's recorded
/// Elo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayStats {
    pub matches: u32,
    pub wins: u32,
    pub loses: u32,
    /// `current_elo - elo_at_oldest_match_today`. Elo updates once per
    /// match, so this difference is the whole session's delta.
    pub delta: i64,
    /// `W`/`L` per match, most recent first, at most five entries.
    pub recent_form: String,
}

/// The player's in-progress (or about-to-start) match with its projected
/// Elo swing.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentMatch {
    pub name: String,
    pub map: Option<String>,
    pub gain: i32,
    pub loss: i32,
}

/// Aggregation client. Construct once at startup and share.
pub struct FaceitClient {
    data_api: Arc<dyn Fetch>,
    internal_api: Arc<dyn Fetch>,
    championship_cache: Mutex<TtlCache<Vec<ChampionshipMatch>>>,
}

impl FaceitClient {
    /// Build a client talking to the real Faceit endpoints.
    pub fn new(api_key: &str) -> Result<Self, FetchError> {
        Ok(Self::with_transports(
            Arc::new(Fetcher::authenticated(api_key)?),
            Arc::new(Fetcher::anonymous()?),
        ))
    }

    /// Build a client over explicit transports (tests inject canned ones).
    pub fn with_transports(data_api: Arc<dyn Fetch>, internal_api: Arc<dyn Fetch>) -> Self {
        Self {
            data_api,
            internal_api,
            championship_cache: Mutex::new(TtlCache::new(CHAMPIONSHIP_CACHE_TTL)),
        }
    }

    /// Resolve a player by id, exact nickname, or fuzzy search, in that
    /// order. The exact lookup runs before search because the search index
    /// lags behind; search is the typo-tolerant last resort.
    pub async fn get_player(&self, identifier: &str, game: &str) -> Result<Player, FaceitError> {
        if Uuid::parse_str(identifier).is_ok() {
            return self.fetch_player_by_id(identifier).await;
        }

        match self.fetch_player_by_name(identifier).await {
            Ok(player) if player.game(game).is_some() => return Ok(player),
            Err(err @ FaceitError::Schema(_)) => return Err(err),
            // Exact hit without data for this game, or no exact hit at
            // all: fall through to search.
            Ok(_) | Err(_) => {}
        }

        self.fetch_player_by_search(identifier).await
    }

    /// Region-wide and country-filtered rank, via two independent lookups
    /// (the ranking endpoint serves one scope per response).
    pub async fn get_position(
        &self,
        player_id: &str,
        game: &str,
        region: &str,
        country: &str,
    ) -> Result<RankingPair, FaceitError> {
        let region_rank = self
            .fetch_ranking(game, region, player_id, None)
            .await
            .map_err(|_| FaceitError::PlayerDidNotPlayYet)?;

        let country_rank = self
            .fetch_ranking(game, region, player_id, Some(country))
            .await
            .map_err(|_| FaceitError::PlayerDidNotPlayYet)?;

        Ok(RankingPair {
            region: region_rank,
            country: country_rank,
        })
    }

    /// Today's Elo delta and win/loss tally.
    ///
    /// "Today" starts at 04:00 local time; before 04:00 a session still
    /// belongs to the previous esports day. The delta is reconstructed
    /// from the player's Elo recorded at the oldest match of the window.
    pub async fn get_today(
        &self,
        player_id: &str,
        game: &str,
        current_elo: i64,
    ) -> Result<TodayStats, FaceitError> {
        let since = history_window_start(Local::now());
        let history = self.fetch_history_since(player_id, game, since).await?;

        // History arrives newest-first, so the session opener is last.
        let Some(oldest) = history.last() else {
            return Err(FaceitError::NoMatches);
        };

        let details = self
            .fetch_match_details(&oldest.match_id)
            .await
            .map_err(|_| FaceitError::MatchDetailsNotFound)?;

        let elo_at_open = details
            .roster_player(player_id)
            .ok_or(FaceitError::PlayerNotInMatch)?
            .elo;

        let matches = history.len() as u32;
        let wins = history.iter().filter(|m| m.is_win_for(player_id)).count() as u32;
        let recent_form = history
            .iter()
            .take(5)
            .map(|m| if m.is_win_for(player_id) { "W" } else { "L" })
            .collect::<Vec<_>>()
            .join(" ");

        Ok(TodayStats {
            matches,
            wins,
            loses: matches - wins,
            delta: current_elo - elo_at_open,
            recent_form,
        })
    }

    /// Projected gain/loss for the player's current match.
    pub async fn get_current(&self, player_id: &str) -> Result<CurrentMatch, FaceitError> {
        let groups = self
            .fetch_current_groups(player_id)
            .await
            .map_err(|_| FaceitError::NoCurrentMatch)?;

        let match_id = groups
            .current_match_id()
            .ok_or(FaceitError::NoCurrentMatch)?
            .to_string();

        let details = self
            .fetch_match_details(&match_id)
            .await
            .map_err(|_| FaceitError::NoCurrentMatch)?;

        let is_faction1 = details.teams.faction1.has_player(player_id);

        // A published win probability marks a ranked matchmaking match;
        // hubs carry no stats block and fall back to average-Elo.
        let projection = match &details.teams.faction1.stats {
            Some(stats) => calculate_gain_loss(
                details.is_super_match(),
                is_faction1,
                stats.win_probability,
            ),
            None => calculate_gain_loss_hub(
                is_faction1,
                details.teams.faction1.elo_avg(),
                details.teams.faction2.elo_avg(),
            ),
        };

        Ok(CurrentMatch {
            name: details.entity.name.clone(),
            map: details.picked_map().map(str::to_string),
            gain: projection.gain,
            loss: projection.loss,
        })
    }

    /// All championship matches involving the given team.
    pub async fn get_team_matches_of_championship(
        &self,
        team_id: &str,
        championship_id: &str,
    ) -> Result<Vec<ChampionshipMatch>, FaceitError> {
        let all = self.get_matches_of_championship(championship_id).await?;
        Ok(all
            .into_iter()
            .filter(|m| m.involves_team(team_id))
            .collect())
    }

    /// Full match list of a championship, paged 100 at a time and cached
    /// for an hour. A mid-pagination failure stops the walk and keeps what
    /// was collected so far rather than failing the whole listing.
    async fn get_matches_of_championship(
        &self,
        championship_id: &str,
    ) -> Result<Vec<ChampionshipMatch>, FaceitError> {
        {
            let mut cache = self.championship_cache.lock().await;
            if let Some(cached) = cache.get(championship_id) {
                return Ok(cached.clone());
            }
        }

        let mut matches: Vec<ChampionshipMatch> = Vec::new();
        let mut offset = 0usize;

        loop {
            let url = data_url(
                &format!("championships/{championship_id}/matches"),
                &[
                    ("type", "all".to_string()),
                    ("limit", MATCH_PAGE_SIZE.to_string()),
                    ("offset", offset.to_string()),
                ],
            )?;

            let page: ChampionshipMatchPage = match self.data_api.get_json(&url).await {
                Ok(value) => match serde_json::from_value(value) {
                    Ok(page) => page,
                    Err(err) => {
                        warn!("championship {championship_id}: bad page at offset {offset}: {err}");
                        break;
                    }
                },
                Err(err) => {
                    warn!("championship {championship_id}: fetch failed at offset {offset}: {err}");
                    break;
                }
            };

            let count = page.items.len();
            matches.extend(page.items);

            if count < MATCH_PAGE_SIZE {
                break;
            }
            offset += MATCH_PAGE_SIZE;
        }

        self.championship_cache
            .lock()
            .await
            .set(championship_id, matches.clone());

        Ok(matches)
    }

    // ── Upstream fetches ────────────────────────────────────────

    async fn fetch_player_by_id(&self, player_id: &str) -> Result<Player, FaceitError> {
        let url = data_url(&format!("players/{player_id}"), &[])?;
        let value = self
            .data_api
            .get_json(&url)
            .await
            .map_err(|_| FaceitError::PlayerNotFound)?;
        decode(value)
    }

    async fn fetch_player_by_name(&self, nickname: &str) -> Result<Player, FaceitError> {
        let url = data_url("players", &[("nickname", nickname.to_string())])?;
        let value = self.data_api.get_json(&url).await?;
        decode(value)
    }

    async fn fetch_player_by_search(&self, nickname: &str) -> Result<Player, FaceitError> {
        let url = data_url(
            "search/players",
            &[
                ("nickname", nickname.to_string()),
                ("limit", "1".to_string()),
            ],
        )?;

        let value = self
            .data_api
            .get_json(&url)
            .await
            .map_err(|_| FaceitError::PlayerNotFound)?;
        let page: PlayerSearchPage = decode(value)?;

        let Some(hit) = page.items.first() else {
            return Err(FaceitError::PlayerNotFound);
        };

        self.fetch_player_by_id(&hit.player_id).await
    }

    async fn fetch_ranking(
        &self,
        game: &str,
        region: &str,
        player_id: &str,
        country: Option<&str>,
    ) -> Result<u32, FaceitError> {
        let mut params = Vec::new();
        if let Some(country) = country {
            params.push(("country", country.to_string()));
        }

        let url = data_url(
            &format!("rankings/games/{game}/regions/{region}/players/{player_id}"),
            &params,
        )?;

        let value = self.data_api.get_json(&url).await?;
        let page: RankingPage = decode(value)?;

        page.position_of(player_id)
            .ok_or(FaceitError::PlayerDidNotPlayYet)
    }

    async fn fetch_history_since(
        &self,
        player_id: &str,
        game: &str,
        since: i64,
    ) -> Result<Vec<crate::models::HistoryMatch>, FaceitError> {
        let url = data_url(
            &format!("players/{player_id}/history"),
            &[("game", game.to_string()), ("from", since.to_string())],
        )?;

        let value = self
            .data_api
            .get_json(&url)
            .await
            .map_err(|_| FaceitError::MatchesNotFound)?;
        let page: MatchHistoryPage = decode(value).map_err(|_| FaceitError::MatchesNotFound)?;

        Ok(page.items)
    }

    async fn fetch_match_details(&self, match_id: &str) -> Result<MatchDetails, FaceitError> {
        let url = internal_url(&format!("match/v2/match/{match_id}"))?;
        let value = self.internal_api.get_json(&url).await?;
        let envelope: MatchDetailsEnvelope = decode(value)?;
        Ok(envelope.payload)
    }

    async fn fetch_current_groups(
        &self,
        player_id: &str,
    ) -> Result<MatchGroupsEnvelope, FaceitError> {
        let url = internal_url(&format!(
            "match/v1/matches/groupByState?userId={player_id}"
        ))?;
        let value = self.internal_api.get_json(&url).await?;
        decode(value)
    }
}

/// Start of the current esports day as epoch seconds: 04:00 local today
/// when the clock has passed 04:00, otherwise 04:00 yesterday.
pub fn history_window_start<Tz: TimeZone>(now: DateTime<Tz>) -> i64 {
    let anchor = now
        .clone()
        .with_hour(4)
        .and_then(|t| t.with_minute(0))
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0));

    // 04:00 may not exist on a DST transition day; the raw timestamp is
    // the least-wrong anchor then.
    let Some(anchor) = anchor else {
        return now.timestamp();
    };

    if now.hour() >= 4 {
        anchor.timestamp()
    } else {
        (anchor - chrono::Duration::days(1)).timestamp()
    }
}

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, FaceitError> {
    serde_json::from_value(value).map_err(FaceitError::Schema)
}

fn data_url(path: &str, params: &[(&str, String)]) -> Result<Url, FaceitError> {
    let mut url = Url::parse(&format!("{DATA_API_BASE}/{path}"))
        .map_err(|e| FaceitError::Fetch(FetchError::Unknown(e.to_string())))?;
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

fn internal_url(path: &str) -> Result<Url, FaceitError> {
    Url::parse(&format!("{INTERNAL_API_BASE}/{path}"))
        .map_err(|e| FaceitError::Fetch(FetchError::Unknown(e.to_string())))
}
