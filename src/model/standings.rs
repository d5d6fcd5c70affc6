use serde::Serialize;
use crate::model::{
    counters, match_log::MatchLog, rating_tracker::RatingTracker, registry::EntityRegistry,
    structures::entity_kind::EntityKind
};

/// One participant's line in a tournament table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StandingsRow {
    pub participant_id: i32,
    pub wins: i32,
    pub matches: i32
}

/// Standings for one tournament and one participant kind: every registered
/// participant with its wins and matches inside that tournament, ordered by
/// wins descending and participant id ascending among equals. Participants
/// with no matches yet appear with zeros; a tournament with no registered
/// participants of the kind yields an empty table.
pub fn tournament_standings(
    log: &MatchLog,
    registry: &EntityRegistry,
    tracker: &RatingTracker,
    tournament_id: i32,
    kind: EntityKind
) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = tracker
        .participants(tournament_id, kind)
        .into_iter()
        .map(|participant_id| {
            let summary = counters::summarize(
                log.matches_for(registry, kind, participant_id, Some(tournament_id)),
                registry,
                kind,
                participant_id
            );
            StandingsRow {
                participant_id,
                wins: summary.wins,
                matches: summary.matches_played
            }
        })
        .collect();

    rows.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.participant_id.cmp(&b.participant_id)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::structures::{finish_condition::FinishCondition, side::Side},
        utils::test_utils::{generate_match, generate_registry, generate_side, timestamp}
    };

    #[test]
    fn test_empty_tournament_yields_empty_table() {
        let log = MatchLog::new();
        let registry = generate_registry();
        let tracker = RatingTracker::new();

        let rows = tournament_standings(&log, &registry, &tracker, 1, EntityKind::Competitor);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_zero_activity_participants_rank_with_zeros() {
        let log = MatchLog::new();
        let registry = generate_registry();
        let mut tracker = RatingTracker::new();
        tracker.register(1, EntityKind::Competitor, 2);
        tracker.register(1, EntityKind::Competitor, 1);

        let rows = tournament_standings(&log, &registry, &tracker, 1, EntityKind::Competitor);
        assert_eq!(
            rows,
            vec![
                StandingsRow { participant_id: 1, wins: 0, matches: 0 },
                StandingsRow { participant_id: 2, wins: 0, matches: 0 }
            ]
        );
    }

    #[test]
    fn test_ordering_by_wins_then_id() {
        let registry = generate_registry();
        let mut tracker = RatingTracker::new();
        for id in [1, 2, 3] {
            tracker.register(1, EntityKind::Competitor, id);
        }

        // Competitor 1: 2 wins in 2; competitor 2: 1 win in 2; competitor 3: 1 win in 2.
        let mut log = MatchLog::new();
        let c1 = generate_side(1, 10, None);
        let c2 = generate_side(2, 11, None);
        let c3 = generate_side(3, 12, None);
        log.append(generate_match(1, Some(1), c1, c2, Some(Side::A), FinishCondition::Survivor, Some(timestamp(0)))).unwrap();
        log.append(generate_match(2, Some(1), c1, c3, Some(Side::A), FinishCondition::Burst, Some(timestamp(1)))).unwrap();
        log.append(generate_match(3, Some(1), c2, c3, Some(Side::A), FinishCondition::Knockout, Some(timestamp(2)))).unwrap();
        log.append(generate_match(4, Some(1), c3, c2, Some(Side::A), FinishCondition::Extreme, Some(timestamp(3)))).unwrap();

        let rows = tournament_standings(&log, &registry, &tracker, 1, EntityKind::Competitor);
        assert_eq!(
            rows,
            vec![
                StandingsRow { participant_id: 1, wins: 2, matches: 2 },
                StandingsRow { participant_id: 2, wins: 1, matches: 3 },
                StandingsRow { participant_id: 3, wins: 1, matches: 3 }
            ]
        );
    }

    #[test]
    fn test_counts_are_scoped_to_the_tournament() {
        let registry = generate_registry();
        let mut tracker = RatingTracker::new();
        tracker.register(1, EntityKind::Loadout, 10);

        let mut log = MatchLog::new();
        let a = generate_side(1, 10, None);
        let b = generate_side(2, 11, None);
        // One win in tournament 1, one win outside it
        log.append(generate_match(1, Some(1), a, b, Some(Side::A), FinishCondition::Survivor, Some(timestamp(0)))).unwrap();
        log.append(generate_match(2, None, a, b, Some(Side::A), FinishCondition::Survivor, Some(timestamp(1)))).unwrap();

        let rows = tournament_standings(&log, &registry, &tracker, 1, EntityKind::Loadout);
        assert_eq!(rows, vec![StandingsRow { participant_id: 10, wins: 1, matches: 1 }]);
    }
}
