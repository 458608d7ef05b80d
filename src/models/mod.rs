//! Core data structures.
//!
//! Wire types for upstream Faceit payloads (typed deserialization is the
//! schema check) and the assembled player summary DTO.

pub mod matches;
pub mod player;
pub mod summary;

pub use matches::*;
pub use player::*;
pub use summary::*;
