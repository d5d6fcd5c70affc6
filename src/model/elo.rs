use crate::model::{
    constants::{DEFAULT_RATING, K_FACTOR, RATING_SCALE},
    rating_tracker::RatingTracker,
    records::{MatchRecord, RatingAdjustment, SkippedUpdate},
    structures::{entity_kind::EntityKind, side::Side}
};
use tracing::{debug, warn};

/// Expected score of a rated entity against its opponent, on the logistic
/// curve: `1 / (1 + 10^((r2 - r1) / 400))`.
pub fn expected_score(rating: i32, opponent_rating: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent_rating - rating) as f64 / RATING_SCALE))
}

/// Applies the per-match rating updates for one settled, tournament-scoped
/// record: competitor A/B and loadout A/B, four updates in total, each
/// against its direct opponent's corresponding rating.
///
/// Updates are independent. An unregistered entity's own update is skipped
/// (reported, never fatal) while the rest proceed; an unregistered
/// *opponent* stands in at the default rating for the expectation only.
/// Draws and exhibition matches never reach this function via
/// [`ArenaModel::record_match`](crate::model::arena_model::ArenaModel::record_match),
/// and are ignored here as well.
pub fn apply_match(
    tracker: &mut RatingTracker,
    record: &MatchRecord
) -> (Vec<RatingAdjustment>, Vec<SkippedUpdate>) {
    let mut adjustments = Vec::new();
    let mut skipped = Vec::new();

    let (Some(tournament_id), Some(winner)) = (record.tournament_id, record.winner) else {
        return (adjustments, skipped);
    };

    let pairs = [
        (
            EntityKind::Competitor,
            record.side_a.competitor_id,
            record.side_b.competitor_id
        ),
        (
            EntityKind::Loadout,
            record.side_a.loadout_id,
            record.side_b.loadout_id
        )
    ];

    for (kind, a_id, b_id) in pairs {
        if a_id == b_id {
            // A mirror pairing carries no rating information.
            debug!(
                "match {}: {} {} faced itself, no rating change",
                record.match_id, kind, a_id
            );
            continue;
        }

        let actual_a = if winner == Side::A { 1.0 } else { 0.0 };
        let rating_a = tracker.rating(tournament_id, kind, a_id);
        let rating_b = tracker.rating(tournament_id, kind, b_id);

        for (entity_id, own, opponent, actual) in [
            (a_id, rating_a, rating_b, actual_a),
            (b_id, rating_b, rating_a, 1.0 - actual_a)
        ] {
            let Some(current) = own else {
                warn!(
                    "match {}: {} {} is not registered for tournament {}, rating update skipped",
                    record.match_id, kind, entity_id, tournament_id
                );
                skipped.push(SkippedUpdate {
                    tournament_id,
                    entity_kind: kind,
                    entity_id
                });
                continue;
            };

            let expected = expected_score(current, opponent.unwrap_or(DEFAULT_RATING));
            let new_rating = (current as f64 + K_FACTOR * (actual - expected)).round() as i32;

            if let Some(adjustment) =
                tracker.apply(tournament_id, kind, entity_id, new_rating, record.match_id)
            {
                adjustments.push(adjustment);
            }
        }
    }

    (adjustments, skipped)
}
