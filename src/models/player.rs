//! Player and ranking payloads from the Faceit Data API v4.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Player snapshot as returned by `/players/{id}` and `/players?nickname=`.
///
/// Fetched fresh per request, never persisted. Deserialization doubles as
/// the schema check: a payload missing any required field is a schema
/// mismatch, not a "not found".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub player_id: String,
    pub nickname: String,
    #[serde(default)]
    pub games: HashMap<String, GameStats>,
    pub country: String,
}

impl Player {
    /// Stats for one game, when the player has played it.
    pub fn game(&self, game: &str) -> Option<&GameStats> {
        self.games.get(game)
    }
}

/// Per-game skill data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStats {
    pub skill_level: u32,
    pub faceit_elo: i64,
    pub region: String,
}

/// One page of the fuzzy player search (`/search/players`).
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSearchPage {
    #[serde(default)]
    pub items: Vec<PlayerSearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSearchHit {
    pub player_id: String,
}

/// One page of a ranking lookup
/// (`/rankings/games/{game}/regions/{region}/players/{id}`).
#[derive(Debug, Clone, Deserialize)]
pub struct RankingPage {
    #[serde(default)]
    pub items: Vec<RankingEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingEntry {
    pub player_id: String,
    #[serde(default)]
    pub position: u32,
}

impl RankingPage {
    /// The requested player's entry within the page, if ranked.
    pub fn position_of(&self, player_id: &str) -> Option<u32> {
        self.items
            .iter()
            .find(|entry| entry.player_id == player_id)
            .map(|entry| entry.position)
    }
}

/// Region and country rank, fetched through two independent lookups since
/// the API returns only one scope per response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankingPair {
    pub region: u32,
    pub country: u32,
}
