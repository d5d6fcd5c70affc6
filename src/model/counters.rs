use crate::model::{
    records::MatchRecord,
    registry::EntityRegistry,
    scoring::points_for,
    structures::{entity_kind::EntityKind, finish_condition::FinishCondition}
};
use indexmap::IndexMap;
use serde::Serialize;

/// The per-entity counter block: counts, percentages, points and the most
/// common winning/losing finish conditions.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CounterSummary {
    pub matches_played: i32,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub win_percentage: f64,
    pub non_loss_percentage: f64,
    pub total_points: i32,
    pub average_points_per_match: f64,
    pub most_common_winning_finish: Option<FinishCondition>,
    pub most_common_loss_finish: Option<FinishCondition>
}

/// Folds a filtered match view into a [`CounterSummary`].
///
/// A decided match is a win when the entity appears on the winning side
/// and a loss otherwise, so an entity present on both sides (a mirror
/// loadout, a shared sub-part, the venue of the match) is on the winning
/// side by definition and never records a loss against itself. This keeps
/// `wins + losses + draws == matches_played` for every kind.
pub fn summarize<'a, I>(matches: I, registry: &EntityRegistry, kind: EntityKind, id: i32) -> CounterSummary
where
    I: Iterator<Item = &'a MatchRecord>
{
    let mut summary = CounterSummary::default();
    let mut win_finishes: IndexMap<FinishCondition, i32> = IndexMap::new();
    let mut loss_finishes: IndexMap<FinishCondition, i32> = IndexMap::new();

    for record in matches {
        let membership = registry.membership(kind, id, record);
        if !membership.participates() {
            continue;
        }

        summary.matches_played += 1;

        if record.is_draw {
            summary.draws += 1;
            continue;
        }

        let Some(winner) = record.winner else {
            continue;
        };

        if membership.on(winner) {
            summary.wins += 1;
            summary.total_points += points_for(record.finish, true);
            *win_finishes.entry(record.finish).or_insert(0) += 1;
        } else {
            summary.losses += 1;
            *loss_finishes.entry(record.finish).or_insert(0) += 1;
        }
    }

    let decided = summary.matches_played - summary.draws;
    if decided > 0 {
        summary.win_percentage = summary.wins as f64 / decided as f64 * 100.0;
    }
    if summary.matches_played > 0 {
        summary.non_loss_percentage =
            (summary.wins + summary.draws) as f64 / summary.matches_played as f64 * 100.0;
        summary.average_points_per_match = summary.total_points as f64 / summary.matches_played as f64;
    }

    summary.most_common_winning_finish = mode(&win_finishes);
    summary.most_common_loss_finish = mode(&loss_finishes);
    summary
}

/// Mode of a tally map. Insertion order is first-encounter order, which is
/// the tie-break: the earliest-seen condition wins among equals.
fn mode(counts: &IndexMap<FinishCondition, i32>) -> Option<FinishCondition> {
    let mut best: Option<(FinishCondition, i32)> = None;
    for (&finish, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((finish, count))
        }
    }
    best.map(|(finish, _)| finish)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{match_log::MatchLog, structures::side::Side},
        utils::test_utils::{generate_match, generate_registry, generate_side, timestamp}
    };
    use approx::assert_abs_diff_eq;

    fn log_with(records: Vec<MatchRecord>) -> MatchLog {
        let mut log = MatchLog::new();
        for record in records {
            log.append(record).unwrap();
        }
        log
    }

    #[test]
    fn test_zero_activity_entity() {
        let registry = generate_registry();
        let log = MatchLog::new();

        let summary = summarize(log.iter(), &registry, EntityKind::Competitor, 1);
        assert_eq!(summary, CounterSummary::default());
        assert_eq!(summary.win_percentage, 0.0);
        assert!(summary.most_common_winning_finish.is_none());
    }

    #[test]
    fn test_counts_sum_to_matches_played() {
        let registry = generate_registry();
        let a = generate_side(1, 10, None);
        let b = generate_side(2, 11, None);
        let log = log_with(vec![
            generate_match(1, None, a, b, Some(Side::A), FinishCondition::Survivor, Some(timestamp(0))),
            generate_match(2, None, a, b, Some(Side::B), FinishCondition::Burst, Some(timestamp(1))),
            generate_match(3, None, a, b, None, FinishCondition::Draw, Some(timestamp(2))),
            generate_match(4, None, b, a, Some(Side::B), FinishCondition::Extreme, Some(timestamp(3))),
        ]);

        let summary = summarize(log.iter(), &registry, EntityKind::Competitor, 1);
        assert_eq!(summary.matches_played, 4);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.wins + summary.losses + summary.draws, summary.matches_played);
    }

    #[test]
    fn test_percentages_and_points() {
        let registry = generate_registry();
        let a = generate_side(1, 10, None);
        let b = generate_side(2, 11, None);
        // Survivor win (1 pt), Burst win (2 pts), Knockout loss (0 pts)
        let log = log_with(vec![
            generate_match(1, Some(1), a, b, Some(Side::A), FinishCondition::Survivor, Some(timestamp(0))),
            generate_match(2, Some(1), a, b, Some(Side::A), FinishCondition::Burst, Some(timestamp(1))),
            generate_match(3, Some(1), a, b, Some(Side::B), FinishCondition::Knockout, Some(timestamp(2))),
        ]);

        let summary = summarize(log.iter(), &registry, EntityKind::Competitor, 1);
        assert_eq!(summary.matches_played, 3);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.total_points, 3);
        assert_abs_diff_eq!(summary.win_percentage, 66.66666666666667, epsilon = 1e-9);
        assert_abs_diff_eq!(summary.non_loss_percentage, 66.66666666666667, epsilon = 1e-9);
        assert_abs_diff_eq!(summary.average_points_per_match, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_draws_leave_win_percentage_denominator() {
        let registry = generate_registry();
        let a = generate_side(1, 10, None);
        let b = generate_side(2, 11, None);
        let log = log_with(vec![
            generate_match(1, None, a, b, Some(Side::A), FinishCondition::Survivor, Some(timestamp(0))),
            generate_match(2, None, a, b, None, FinishCondition::Draw, Some(timestamp(1))),
        ]);

        let summary = summarize(log.iter(), &registry, EntityKind::Competitor, 1);
        // 1 win out of 1 decided match
        assert_abs_diff_eq!(summary.win_percentage, 100.0, epsilon = 1e-9);
        // (1 win + 1 draw) / 2 played
        assert_abs_diff_eq!(summary.non_loss_percentage, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_all_draws_yield_zero_win_percentage() {
        let registry = generate_registry();
        let a = generate_side(1, 10, None);
        let b = generate_side(2, 11, None);
        let log = log_with(vec![generate_match(
            1,
            None,
            a,
            b,
            None,
            FinishCondition::Draw,
            Some(timestamp(0))
        )]);

        let summary = summarize(log.iter(), &registry, EntityKind::Competitor, 1);
        assert_eq!(summary.win_percentage, 0.0);
        assert_abs_diff_eq!(summary.non_loss_percentage, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mirror_matches_never_count_as_losses() {
        let registry = generate_registry();
        // Loadout 10 on both sides: it is on the winning side by definition
        let a = generate_side(1, 10, None);
        let b = generate_side(2, 10, None);
        let log = log_with(vec![generate_match(
            1,
            None,
            a,
            b,
            Some(Side::A),
            FinishCondition::Survivor,
            Some(timestamp(0))
        )]);

        let summary = summarize(log.iter(), &registry, EntityKind::Loadout, 10);
        assert_eq!(summary.matches_played, 1);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.draws, 0);
        assert_eq!(summary.wins + summary.losses + summary.draws, summary.matches_played);
    }

    #[test]
    fn test_most_common_finish_tie_breaks_by_first_encountered() {
        let registry = generate_registry();
        let a = generate_side(1, 10, None);
        let b = generate_side(2, 11, None);
        // One Burst win, one Survivor win: tie broken by the earlier match
        let log = log_with(vec![
            generate_match(1, None, a, b, Some(Side::A), FinishCondition::Burst, Some(timestamp(0))),
            generate_match(2, None, a, b, Some(Side::A), FinishCondition::Survivor, Some(timestamp(1))),
        ]);

        let summary = summarize(log.iter(), &registry, EntityKind::Competitor, 1);
        assert_eq!(summary.most_common_winning_finish, Some(FinishCondition::Burst));
    }

    #[test]
    fn test_most_common_loss_finish() {
        let registry = generate_registry();
        let a = generate_side(1, 10, None);
        let b = generate_side(2, 11, None);
        let log = log_with(vec![
            generate_match(1, None, a, b, Some(Side::B), FinishCondition::Knockout, Some(timestamp(0))),
            generate_match(2, None, a, b, Some(Side::B), FinishCondition::Knockout, Some(timestamp(1))),
            generate_match(3, None, a, b, Some(Side::B), FinishCondition::Burst, Some(timestamp(2))),
        ]);

        let summary = summarize(log.iter(), &registry, EntityKind::Competitor, 1);
        assert_eq!(summary.most_common_loss_finish, Some(FinishCondition::Knockout));
        assert_eq!(summary.most_common_winning_finish, None);
    }

    #[test]
    fn test_venue_counters_track_decided_matches() {
        let registry = generate_registry();
        let a = generate_side(1, 10, None);
        let b = generate_side(2, 11, None);
        let mut in_venue =
            generate_match(1, None, a, b, Some(Side::A), FinishCondition::Survivor, Some(timestamp(0)));
        in_venue.venue_id = Some(500);
        let mut drawn = generate_match(2, None, a, b, None, FinishCondition::Draw, Some(timestamp(1)));
        drawn.venue_id = Some(500);
        let log = log_with(vec![in_venue, drawn]);

        // The venue sits on both sides, so every decided match there is a
        // "win" and the counter identity still holds
        let summary = summarize(log.iter(), &registry, EntityKind::Venue, 500);
        assert_eq!(summary.matches_played, 2);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.wins + summary.losses + summary.draws, summary.matches_played);
    }
}
