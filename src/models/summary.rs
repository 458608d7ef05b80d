//! Assembled player Elo summary.
//!
//! Plain immutable records with optional sections; rendering happens
//! through [`BotText`] for the chat-bot string and serde for JSON.
//! Absent sections are omitted from both outputs.

use serde::Serialize;

/// Single-line text rendering for chat-bot integrations.
pub trait BotText {
    fn to_bot_string(&self) -> String;
}

/// A rank within one scope (country or region), carrying the flag emoji
/// derived from the scope's two-letter code.
#[derive(Debug, Clone, Serialize)]
pub struct RankingView {
    pub name: String,
    pub rank: u32,
    pub flag: String,
}

impl RankingView {
    pub fn new(name: &str, rank: u32) -> Self {
        Self {
            name: name.to_string(),
            rank,
            flag: flag_emoji(name),
        }
    }
}

impl BotText for RankingView {
    fn to_bot_string(&self) -> String {
        format!("Platz {} {}", self.rank, self.flag)
    }
}

/// Projected gain/loss for the match currently in progress or about to
/// start.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentView {
    pub name: String,
    pub map: Option<String>,
    pub gain: i32,
    pub loss: i32,
}

impl BotText for CurrentView {
    fn to_bot_string(&self) -> String {
        format!("Current: +{}/-{}", self.gain, self.loss)
    }
}

/// Today's session: match count, win/loss tally, Elo delta and the recent
/// form string ("W L W ...", most recent first, at most five entries).
#[derive(Debug, Clone, Serialize)]
pub struct TodayView {
    pub matches: u32,
    pub wins: u32,
    pub loses: u32,
    pub elo: i64,
    #[serde(rename = "lastMatches")]
    pub last_matches: String,
}

impl TodayView {
    /// Marker for an empty esports day.
    pub fn none() -> Self {
        Self {
            matches: 0,
            wins: 0,
            loses: 0,
            elo: 0,
            last_matches: String::new(),
        }
    }
}

impl BotText for TodayView {
    fn to_bot_string(&self) -> String {
        let delta = if self.elo > 0 {
            format!("+{}", self.elo)
        } else {
            self.elo.to_string()
        };

        if self.last_matches.is_empty() {
            format!("Today: {delta}")
        } else {
            format!("Today: {delta} ({})", self.last_matches)
        }
    }
}

/// The full summary assembled by the elo route. Sections the caller did
/// not request (or that could not be computed) stay `None` and disappear
/// from both renderings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elo: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<RankingView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<RankingView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<TodayView>,
}

impl BotText for PlayerSummary {
    fn to_bot_string(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        let level = self.level.unwrap_or(0);
        let elo = self.elo.unwrap_or(0);
        parts.push(format!(
            "{} ist FaceIT Level {level}, Elo {elo}",
            self.name.as_deref().unwrap_or("")
        ));

        if let Some(country) = &self.country {
            parts.push(country.to_bot_string());
        }
        if let Some(current) = &self.current {
            parts.push(current.to_bot_string());
        }
        if let Some(today) = &self.today {
            parts.push(today.to_bot_string());
        }

        parts.join(" - ")
    }
}

/// Regional-indicator flag emoji for a two-letter country/region code.
/// Characters outside A-Z pass through unchanged.
pub fn flag_emoji(code: &str) -> String {
    code.to_uppercase()
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                // 0x1F1E6 is REGIONAL INDICATOR SYMBOL LETTER A.
                char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flag_emoji_de() {
        assert_eq!(flag_emoji("de"), "\u{1F1E9}\u{1F1EA}");
    }

    #[test]
    fn test_ranking_view_bot_string() {
        let ranking = RankingView::new("de", 42);
        assert_eq!(ranking.to_bot_string(), "Platz 42 \u{1F1E9}\u{1F1EA}");
    }

    #[test]
    fn test_current_view_bot_string() {
        let current = CurrentView {
            name: "EU Matchmaking".to_string(),
            map: Some("de_mirage".to_string()),
            gain: 23,
            loss: 27,
        };
        assert_eq!(current.to_bot_string(), "Current: +23/-27");
    }

    #[test]
    fn test_today_view_positive_delta_with_form() {
        let today = TodayView {
            matches: 3,
            wins: 2,
            loses: 1,
            elo: 37,
            last_matches: "W L W".to_string(),
        };
        assert_eq!(today.to_bot_string(), "Today: +37 (W L W)");
    }

    #[test]
    fn test_today_view_negative_delta() {
        let today = TodayView {
            matches: 1,
            wins: 0,
            loses: 1,
            elo: -25,
            last_matches: "L".to_string(),
        };
        assert_eq!(today.to_bot_string(), "Today: -25 (L)");
    }

    #[test]
    fn test_today_view_no_matches_omits_parenthetical() {
        assert_eq!(TodayView::none().to_bot_string(), "Today: 0");
    }

    #[test]
    fn test_summary_bot_string_minimal() {
        let summary = PlayerSummary {
            id: Some("p1".to_string()),
            name: Some("shroud".to_string()),
            level: Some(10),
            elo: Some(2500),
            ..Default::default()
        };
        assert_eq!(
            summary.to_bot_string(),
            "shroud ist FaceIT Level 10, Elo 2500"
        );
    }

    #[test]
    fn test_summary_bot_string_full() {
        let summary = PlayerSummary {
            id: Some("p1".to_string()),
            name: Some("shroud".to_string()),
            level: Some(10),
            elo: Some(2500),
            country: Some(RankingView::new("de", 3)),
            region: Some(RankingView::new("EU", 120)),
            current: Some(CurrentView {
                name: "EU Matchmaking".to_string(),
                map: None,
                gain: 25,
                loss: 25,
            }),
            today: Some(TodayView {
                matches: 2,
                wins: 1,
                loses: 1,
                elo: -3,
                last_matches: "L W".to_string(),
            }),
        };

        assert_eq!(
            summary.to_bot_string(),
            "shroud ist FaceIT Level 10, Elo 2500 - Platz 3 \u{1F1E9}\u{1F1EA} - Current: +25/-25 - Today: -3 (L W)"
        );
    }

    #[test]
    fn test_summary_json_omits_absent_sections() {
        let summary = PlayerSummary {
            id: Some("p1".to_string()),
            name: Some("shroud".to_string()),
            level: Some(10),
            elo: Some(2500),
            ..Default::default()
        };

        let json = serde_json::to_value(&summary).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 4);
        assert!(!obj.contains_key("country"));
        assert!(!obj.contains_key("current"));
        assert!(!obj.contains_key("today"));
    }

    #[test]
    fn test_today_json_field_name() {
        let json = serde_json::to_value(TodayView::none()).unwrap();
        assert!(json.as_object().unwrap().contains_key("lastMatches"));
    }
}
