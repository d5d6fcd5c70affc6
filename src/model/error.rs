use crate::model::structures::entity_kind::EntityKind;
use thiserror::Error;

/// Errors surfaced by the engine. Undefined metrics (empty denominators,
/// modes of empty sets) are not errors and resolve to neutral values;
/// skipped rating updates are reported in the record outcome instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// The id is absent from the authoritative registry. Distinct from a
    /// registered entity with zero activity, which yields all-zero metrics.
    #[error("no {kind} with id {id}")]
    EntityNotFound { kind: EntityKind, id: i32 },

    /// The draw/winner/finish consistency invariant does not hold. Fatal to
    /// the write path; such a record never reaches an aggregator.
    #[error("match {match_id} is inconsistent: {reason}")]
    InvariantViolation { match_id: i32, reason: String },

    /// Match ids are assigned monotonically; an append must carry a higher
    /// id than every record already in the log.
    #[error("match id {id} is not above the last recorded id {last}")]
    NonMonotonicMatchId { id: i32, last: i32 },

    /// Ratings and tournament registration exist for competitors and
    /// loadouts only.
    #[error("{0} entities are not rated")]
    UnratedKind(EntityKind)
}
