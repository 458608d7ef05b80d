//! Volanta flight-position lookup.
//!
//! The Volanta web asset is a public JSON feed of all active flights;
//! the lookup scans it for a network user name and hands back the flight
//! details URL. Any failure collapses to "no flight found".

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::fetch::{Fetch, Fetcher};

const FLIGHT_POSITIONS_URL: &str = "https://webassets.volanta.app/volanta-flight-positions.json";

#[derive(Debug, Clone, Deserialize)]
struct FlightFeed {
    #[serde(default)]
    data: Vec<FlightPosition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlightPosition {
    id: String,
    network_user_name: String,
}

/// Client for the flight feed.
pub struct VolantaClient {
    transport: Arc<dyn Fetch>,
}

impl VolantaClient {
    pub fn new() -> Result<Self, crate::fetch::FetchError> {
        Ok(Self {
            transport: Arc::new(Fetcher::anonymous()?),
        })
    }

    pub fn with_transport(transport: Arc<dyn Fetch>) -> Self {
        Self { transport }
    }

    /// URL of the user's current flight, or `None` when the feed is
    /// unreachable, malformed, or simply has no matching entry.
    pub async fn get_current_flight(&self, username: &str) -> Option<String> {
        let url = Url::parse(FLIGHT_POSITIONS_URL).ok()?;
        let value = self.transport.get_json(&url).await.ok()?;
        let feed: FlightFeed = serde_json::from_value(value).ok()?;

        let found = feed
            .data
            .iter()
            .find(|f| f.network_user_name.eq_ignore_ascii_case(username))?;

        debug!("flight match for {}: {}", username, found.id);
        Some(format!(
            "https://fly.volanta.app/flights/{}/details",
            found.id
        ))
    }
}
