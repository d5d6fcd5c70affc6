use crate::model::{
    records::MatchRecord, registry::EntityRegistry, structures::entity_kind::EntityKind
};

/// The signed current streak: positive for an active win streak, negative
/// for an active loss streak.
///
/// `matches` must be ordered most recent first (see
/// [`MatchLog::ended_desc_for`](crate::model::match_log::MatchLog::ended_desc_for)).
/// The walk accumulates same-outcome results and stops at the first result
/// of the opposite sign. A draw stops the walk immediately and the whole
/// streak collapses to 0, whatever was accumulated before it.
pub fn current_streak<'a, I>(matches: I, registry: &EntityRegistry, kind: EntityKind, id: i32) -> i32
where
    I: IntoIterator<Item = &'a MatchRecord>
{
    let mut streak = 0;

    for record in matches {
        if record.is_draw {
            return 0;
        }

        let membership = registry.membership(kind, id, record);
        let Some(winner) = record.winner else {
            continue;
        };
        if !membership.participates() {
            continue;
        }

        if membership.on(winner) {
            if streak >= 0 {
                streak += 1;
            } else {
                break;
            }
        } else if streak <= 0 {
            streak -= 1;
        } else {
            break;
        }
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{
            match_log::MatchLog,
            structures::{finish_condition::FinishCondition, side::Side}
        },
        utils::test_utils::{generate_match, generate_registry, generate_side, timestamp}
    };

    fn streak_of(outcomes: &[Option<Side>]) -> i32 {
        let registry = generate_registry();
        let a = generate_side(1, 10, None);
        let b = generate_side(2, 11, None);
        let mut log = MatchLog::new();

        for (i, winner) in outcomes.iter().enumerate() {
            let finish = match winner {
                Some(_) => FinishCondition::Survivor,
                None => FinishCondition::Draw
            };
            log.append(generate_match(
                i as i32 + 1,
                None,
                a,
                b,
                *winner,
                finish,
                Some(timestamp(i as i64))
            ))
            .unwrap();
        }

        let ordered = log.ended_desc_for(&registry, EntityKind::Competitor, 1);
        current_streak(ordered, &registry, EntityKind::Competitor, 1)
    }

    #[test]
    fn test_empty_log_yields_zero() {
        assert_eq!(streak_of(&[]), 0);
    }

    #[test]
    fn test_win_streak() {
        assert_eq!(streak_of(&[Some(Side::A), Some(Side::A), Some(Side::A)]), 3);
    }

    #[test]
    fn test_loss_streak() {
        assert_eq!(streak_of(&[Some(Side::B), Some(Side::B)]), -2);
    }

    #[test]
    fn test_streak_stops_at_opposite_result() {
        // Oldest to newest: L, W, W — current streak is the two wins
        assert_eq!(streak_of(&[Some(Side::B), Some(Side::A), Some(Side::A)]), 2);
        // Oldest to newest: W, L — current streak is the loss
        assert_eq!(streak_of(&[Some(Side::A), Some(Side::B)]), -1);
    }

    #[test]
    fn test_most_recent_draw_yields_zero() {
        assert_eq!(streak_of(&[Some(Side::A), Some(Side::A), None]), 0);
    }

    #[test]
    fn test_draw_behind_wins_collapses_the_streak() {
        // Oldest to newest: D, W, W — the walk reaches the draw and returns 0
        assert_eq!(streak_of(&[None, Some(Side::A), Some(Side::A)]), 0);
    }

    #[test]
    fn test_streak_is_pure() {
        let outcomes = [Some(Side::B), Some(Side::A), Some(Side::A)];
        assert_eq!(streak_of(&outcomes), streak_of(&outcomes));
    }
}
