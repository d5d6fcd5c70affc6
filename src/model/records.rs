use crate::model::{
    error::StatsError,
    structures::{entity_kind::EntityKind, finish_condition::FinishCondition, side::Side}
};
use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

/// One side of a match: who fielded what.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSide {
    pub competitor_id: i32,
    pub loadout_id: i32,
    pub launch_device_id: Option<i32>
}

/// A single settled contest. Records are append-only: once in the log they
/// are never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: i32,
    /// `None` marks an exhibition match outside any tournament.
    pub tournament_id: Option<i32>,
    pub side_a: MatchSide,
    pub side_b: MatchSide,
    pub venue_id: Option<i32>,
    /// `None` iff the match was a draw.
    pub winner: Option<Side>,
    pub is_draw: bool,
    pub finish: FinishCondition,
    pub started_at: Option<DateTime<FixedOffset>>,
    pub ended_at: Option<DateTime<FixedOffset>>
}

impl MatchRecord {
    pub fn side(&self, side: Side) -> &MatchSide {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => Some(end.signed_duration_since(start)),
            _ => None
        }
    }

    /// Checks the three-way consistency invariant:
    /// `is_draw == winner.is_none() == (finish == Draw)`.
    pub fn validate(&self) -> Result<(), StatsError> {
        let violation = |reason: &str| StatsError::InvariantViolation {
            match_id: self.match_id,
            reason: reason.to_string()
        };

        if self.is_draw {
            if self.winner.is_some() {
                return Err(violation("a draw cannot declare a winner"));
            }
            if self.finish != FinishCondition::Draw {
                return Err(violation("a draw must carry the DRAW finish condition"));
            }
        } else {
            if self.winner.is_none() {
                return Err(violation("a settled match must declare a winner"));
            }
            if self.finish == FinishCondition::Draw {
                return Err(violation("a settled match cannot carry the DRAW finish condition"));
            }
        }

        Ok(())
    }
}

/// The current rating of one entity inside one tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingRecord {
    pub tournament_id: i32,
    pub entity_kind: EntityKind,
    pub entity_id: i32,
    pub rating: i32
}

/// One applied rating change, kept as history alongside the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingAdjustment {
    pub tournament_id: i32,
    pub entity_kind: EntityKind,
    pub entity_id: i32,
    pub match_id: i32,
    pub rating_before: i32,
    pub rating_after: i32
}

/// A rating update that could not be applied because the entity was never
/// registered for the tournament. Non-fatal; the match itself is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkippedUpdate {
    pub tournament_id: i32,
    pub entity_kind: EntityKind,
    pub entity_id: i32
}

/// What happened when a match was recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordOutcome {
    pub match_id: i32,
    pub adjustments: Vec<RatingAdjustment>,
    pub skipped: Vec<SkippedUpdate>
}
