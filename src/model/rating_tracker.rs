use crate::model::{
    constants::DEFAULT_RATING,
    records::{RatingAdjustment, RatingRecord},
    structures::entity_kind::EntityKind
};
use indexmap::IndexMap;
use std::collections::HashMap;

type RatingKey = (i32, EntityKind, i32);

/// The engine's only mutable state: tournament registrations and the
/// rating record behind each `(tournament, kind, entity)` key, with the
/// adjustment history that led to it.
///
/// Registration is what the original participant table was: an entity
/// unknown to a tournament has no rating at all, which readers see as the
/// "unregistered" sentinel (`None`) rather than the default value.
#[derive(Debug, Clone, Default)]
pub struct RatingTracker {
    ratings: IndexMap<RatingKey, RatingRecord>,
    adjustments: HashMap<RatingKey, Vec<RatingAdjustment>>
}

impl RatingTracker {
    pub fn new() -> RatingTracker {
        RatingTracker::default()
    }

    /// Registers an entity as a tournament participant, creating its
    /// rating record at the default. Re-registering is a no-op.
    pub fn register(&mut self, tournament_id: i32, kind: EntityKind, entity_id: i32) -> bool {
        let key = (tournament_id, kind, entity_id);
        if self.ratings.contains_key(&key) {
            return false;
        }

        self.ratings.insert(
            key,
            RatingRecord {
                tournament_id,
                entity_kind: kind,
                entity_id,
                rating: DEFAULT_RATING
            }
        );
        true
    }

    pub fn is_registered(&self, tournament_id: i32, kind: EntityKind, entity_id: i32) -> bool {
        self.ratings.contains_key(&(tournament_id, kind, entity_id))
    }

    /// The current rating, or `None` when the entity was never registered
    /// for the tournament.
    pub fn rating(&self, tournament_id: i32, kind: EntityKind, entity_id: i32) -> Option<i32> {
        self.ratings
            .get(&(tournament_id, kind, entity_id))
            .map(|r| r.rating)
    }

    /// Applies one rating change and records it in the history. The key
    /// must be registered; the caller (the Elo engine) checks first.
    pub fn apply(
        &mut self,
        tournament_id: i32,
        kind: EntityKind,
        entity_id: i32,
        new_rating: i32,
        match_id: i32
    ) -> Option<RatingAdjustment> {
        let key = (tournament_id, kind, entity_id);
        let record = self.ratings.get_mut(&key)?;

        let adjustment = RatingAdjustment {
            tournament_id,
            entity_kind: kind,
            entity_id,
            match_id,
            rating_before: record.rating,
            rating_after: new_rating
        };
        record.rating = new_rating;
        self.adjustments.entry(key).or_default().push(adjustment.clone());

        Some(adjustment)
    }

    /// Registered participants of a kind within one tournament, ascending.
    pub fn participants(&self, tournament_id: i32, kind: EntityKind) -> Vec<i32> {
        let mut ids: Vec<i32> = self
            .ratings
            .values()
            .filter(|r| r.tournament_id == tournament_id && r.entity_kind == kind)
            .map(|r| r.entity_id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// The tournament ladder for one kind, rating descending, entity id
    /// ascending among equals.
    pub fn leaderboard(&self, tournament_id: i32, kind: EntityKind) -> Vec<&RatingRecord> {
        let mut board: Vec<&RatingRecord> = self
            .ratings
            .values()
            .filter(|r| r.tournament_id == tournament_id && r.entity_kind == kind)
            .collect();
        board.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.entity_id.cmp(&b.entity_id)));
        board
    }

    pub fn adjustments(
        &self,
        tournament_id: i32,
        kind: EntityKind,
        entity_id: i32
    ) -> Option<&Vec<RatingAdjustment>> {
        self.adjustments.get(&(tournament_id, kind, entity_id))
    }
}
