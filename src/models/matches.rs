//! Match payloads: history, internal match details, championship listings.
//!
//! The `/players/{id}/history` and championship endpoints belong to the
//! documented Data API v4. Match details and the current-match grouping
//! come from the undocumented `www.faceit.com/api/match/v1+v2` endpoints,
//! so those types keep every field optional that has ever been observed
//! missing.

use std::collections::HashMap;

use serde::Deserialize;

// ── Match history (Data API v4) ─────────────────────────────────

/// One page of match history, newest match first.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchHistoryPage {
    #[serde(default)]
    pub items: Vec<HistoryMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryMatch {
    pub match_id: String,
    #[serde(default)]
    pub teams: Option<HistoryTeams>,
    #[serde(default)]
    pub results: Option<HistoryResults>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryTeams {
    #[serde(default)]
    pub faction1: HistoryFaction,
    #[serde(default)]
    pub faction2: HistoryFaction,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryFaction {
    #[serde(default)]
    pub players: Vec<HistoryPlayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryPlayer {
    pub player_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResults {
    pub winner: String,
}

impl HistoryMatch {
    /// Whether the given player won this match. A record missing teams or
    /// results counts as a loss, mirroring how incomplete upstream data
    /// has always been treated.
    pub fn is_win_for(&self, player_id: &str) -> bool {
        let (Some(teams), Some(results)) = (&self.teams, &self.results) else {
            return false;
        };

        let in_faction1 = teams
            .faction1
            .players
            .iter()
            .any(|p| p.player_id == player_id);

        if in_faction1 {
            results.winner == "faction1"
        } else {
            results.winner == "faction2"
        }
    }
}

// ── Match details (internal match/v2) ───────────────────────────

/// Envelope of `api/match/v2/match/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchDetailsEnvelope {
    pub payload: MatchDetails,
}

/// Full roster and metadata of a single match.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchDetails {
    pub teams: MatchTeams,
    #[serde(default)]
    pub tags: Vec<String>,
    pub entity: MatchEntity,
    #[serde(default)]
    pub voting: Option<MapVoting>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchTeams {
    pub faction1: MatchFaction,
    pub faction2: MatchFaction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchFaction {
    pub roster: Vec<RosterPlayer>,
    /// Present on ranked matchmaking matches, absent on hub matches.
    #[serde(default)]
    pub stats: Option<FactionStats>,
}

impl MatchFaction {
    /// Mean roster Elo; 0 for an empty roster.
    pub fn elo_avg(&self) -> f64 {
        if self.roster.is_empty() {
            return 0.0;
        }
        let sum: i64 = self.roster.iter().map(|p| p.elo).sum();
        sum as f64 / self.roster.len() as f64
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.roster.iter().any(|p| p.id == player_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterPlayer {
    pub id: String,
    pub elo: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactionStats {
    pub win_probability: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchEntity {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapVoting {
    pub map: MapPick,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapPick {
    #[serde(default)]
    pub pick: Vec<String>,
}

impl MatchDetails {
    /// The player's roster entry in either faction.
    pub fn roster_player(&self, player_id: &str) -> Option<&RosterPlayer> {
        self.teams
            .faction1
            .roster
            .iter()
            .chain(self.teams.faction2.roster.iter())
            .find(|p| p.id == player_id)
    }

    pub fn is_super_match(&self) -> bool {
        self.tags.iter().any(|t| t == "super")
    }

    /// Picked map when a vote happened.
    pub fn picked_map(&self) -> Option<&str> {
        self.voting
            .as_ref()
            .and_then(|v| v.map.pick.first())
            .map(String::as_str)
    }
}

// ── Current match grouping (internal match/v1) ──────────────────

/// Envelope of `api/match/v1/matches/groupByState?userId=`.
/// Buckets are keyed by state name ("ONGOING", "READY", ...).
#[derive(Debug, Clone, Deserialize)]
pub struct MatchGroupsEnvelope {
    #[serde(default)]
    pub payload: HashMap<String, Vec<MatchRef>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchRef {
    pub id: String,
}

impl MatchGroupsEnvelope {
    /// The match closest to resolution: the ONGOING bucket is consulted
    /// first and, when present, READY is not considered at all.
    pub fn current_match_id(&self) -> Option<&str> {
        self.payload
            .get("ONGOING")
            .or_else(|| self.payload.get("READY"))
            .and_then(|bucket| bucket.first())
            .map(|m| m.id.as_str())
    }
}

// ── Championship matches (Data API v4) ──────────────────────────

/// One page of `/championships/{id}/matches`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChampionshipMatchPage {
    #[serde(default)]
    pub items: Vec<ChampionshipMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChampionshipMatch {
    pub match_id: String,
    /// Epoch seconds; unscheduled matches omit it.
    #[serde(default)]
    pub scheduled_at: Option<i64>,
    pub teams: ChampionshipTeams,
    pub faceit_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChampionshipTeams {
    pub faction1: ChampionshipFaction,
    pub faction2: ChampionshipFaction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChampionshipFaction {
    pub faction_id: String,
    pub name: String,
}

impl ChampionshipMatch {
    pub fn involves_team(&self, team_id: &str) -> bool {
        self.teams.faction1.faction_id == team_id || self.teams.faction2.faction_id == team_id
    }
}
