//! Calendar export: match → event mapping and ICS rendering.
//!
//! Championship matches become two-hour calendar events. When broadcast
//! coverage is known for a match, the event picks up a status-prefixed
//! title, the coverage link and, when a stream exists, the Twitch URL.

pub mod presets;

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::models::ChampionshipMatch;

/// Calendar event descriptor, one per exported match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Scheduled start in epoch milliseconds; 0 for unscheduled matches.
    pub start_ms: i64,
    pub title: String,
    pub description: String,
    pub duration_hours: u32,
    pub url: String,
}

/// Broadcast coverage state for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageStatus {
    NotReady,
    Claimable,
    Claimed,
}

/// One covered match, keyed by its Faceit match id.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverageMatch {
    pub id: u64,
    pub faceit_id: String,
    pub status: CoverageStatus,
    #[serde(default)]
    pub twitch_channel: Option<String>,
}

#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("failed to read coverage file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse coverage file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Coverage entries loaded once at startup from a JSON file.
#[derive(Debug, Default)]
pub struct CoverageIndex {
    matches: HashMap<String, CoverageMatch>,
}

impl CoverageIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load from a JSON array of coverage matches.
    pub fn load(path: &Path) -> Result<Self, CoverageError> {
        let contents = std::fs::read_to_string(path)?;
        let entries: Vec<CoverageMatch> = serde_json::from_str(&contents)?;
        Ok(Self {
            matches: entries
                .into_iter()
                .map(|m| (m.faceit_id.clone(), m))
                .collect(),
        })
    }

    pub fn get(&self, faceit_id: &str) -> Option<&CoverageMatch> {
        self.matches.get(faceit_id)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Map a championship match to its calendar event, enriched with coverage
/// data when available.
pub fn map_match_event(m: &ChampionshipMatch, coverage: Option<&CoverageMatch>) -> CalendarEvent {
    let matchroom_url = m.faceit_url.replace("{lang}", "en");

    let mut title = format!("{} vs {}", m.teams.faction1.name, m.teams.faction2.name);
    let mut description = vec![
        "DACHCS Masters Match:".to_string(),
        title.clone(),
        format!("Faceit Matchroom: {matchroom_url}"),
    ];
    let mut url = matchroom_url;

    if let Some(coverage) = coverage {
        match coverage.status {
            CoverageStatus::Claimable => title = format!("[BESTÄTIGT] {title}"),
            CoverageStatus::Claimed => title = format!("[LIVE] {title}"),
            CoverageStatus::NotReady => {}
        }

        let coverage_url = format!("https://dachcs.de/coverage/match/{}", coverage.id);
        description.push(format!("DACHCS Match: {coverage_url}"));
        url = coverage_url;

        if let Some(channel) = &coverage.twitch_channel {
            let twitch_url = format!("https://twitch.tv/{channel}");
            description.push(format!("Twitch: {twitch_url}"));
            url = twitch_url;
        }
    }

    CalendarEvent {
        start_ms: m.scheduled_at.unwrap_or(0) * 1000,
        title,
        description: description.join("\n"),
        duration_hours: 2,
        url,
    }
}

/// Render events as a `text/calendar` payload.
pub fn render_ics(events: &[CalendarEvent]) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//faceit-relay//EN".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
    ];

    for (index, event) in events.iter().enumerate() {
        let start = DateTime::<Utc>::from_timestamp_millis(event.start_ms)
            .unwrap_or_else(|| DateTime::<Utc>::from_timestamp_millis(0).unwrap_or_default());
        let end = start + chrono::Duration::hours(i64::from(event.duration_hours));

        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}-{}@faceit-relay", event.start_ms, index));
        lines.push(format!("DTSTAMP:{}", ics_timestamp(start)));
        lines.push(format!("DTSTART:{}", ics_timestamp(start)));
        lines.push(format!("DTEND:{}", ics_timestamp(end)));
        lines.push(format!("SUMMARY:{}", escape_ics(&event.title)));
        lines.push(format!("DESCRIPTION:{}", escape_ics(&event.description)));
        lines.push(format!("URL:{}", event.url));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());
    // ICS requires CRLF line endings.
    lines.join("\r\n") + "\r\n"
}

fn ics_timestamp(when: DateTime<Utc>) -> String {
    when.format("%Y%m%dT%H%M%SZ").to_string()
}

fn escape_ics(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace(';', "\\;")
        .replace('\n', "\\n")
}
