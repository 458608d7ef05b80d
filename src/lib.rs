//! # Faceit Relay
//!
//! A small aggregation backend over the Faceit esports APIs, serving
//! chat-bot-friendly player summaries, championship calendars and a
//! Volanta flight lookup.
//!
//! ## Architecture
//!
//! - **fetch**: Authenticated/anonymous JSON transport over reqwest
//! - **cache**: In-memory TTL cache with lazy eviction
//! - **models**: Upstream payload shapes and the summary DTOs
//! - **faceit**: The aggregation service (player, ranking, today, current)
//! - **calendar**: Championship match to ICS event mapping, presets
//! - **flights**: Volanta current-flight lookup
//! - **usage**: JSON usage counter files
//! - **config**: Environment configuration, validated at startup
//! - **api**: REST endpoints

pub mod api;
pub mod cache;
pub mod calendar;
pub mod config;
pub mod faceit;
pub mod fetch;
pub mod flights;
pub mod models;
pub mod usage;
