//! The aggregation and rating engine.
//!
//! Everything here is a pure function of the append-only [`MatchLog`]
//! except the [`RatingTracker`], which `record_match` mutates once per
//! settled tournament match. Reads take `&self` and may run concurrently;
//! the write path holds `&mut self` and so serialises the rating updates
//! per match. [`MatchLog::matches_for`] is the single filtering primitive
//! every metric composes from.
//!
//! [`MatchLog`]: match_log::MatchLog
//! [`MatchLog::matches_for`]: match_log::MatchLog::matches_for
//! [`RatingTracker`]: rating_tracker::RatingTracker

pub mod arena_model;
pub mod constants;
pub mod counters;
pub mod distribution;
pub mod elo;
pub mod error;
pub mod match_log;
pub mod matchups;
pub mod rating_tracker;
pub mod records;
pub mod registry;
pub mod scoring;
pub mod snapshot;
pub mod standings;
pub mod streaks;
pub mod structures;

pub use arena_model::{ArenaModel, HeadToHead};
pub use error::StatsError;
