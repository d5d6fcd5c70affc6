use crate::model::{
    constants::MATCHUP_LIMIT,
    records::MatchRecord,
    registry::EntityRegistry,
    structures::{entity_kind::EntityKind, side::Side}
};
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;

/// One row of an opponent table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupRecord {
    pub opponent_id: i32,
    pub matches_played: i32,
    pub wins: i32,
    pub win_rate: f64
}

/// Groups an entity's matches by same-kind opposing entity. Self-matchups
/// (the entity on both sides of a record) carry no opposing entity and are
/// skipped, as are venue kinds, which never face an opponent. A sub-part
/// subject can meet several opposing sub-parts in one match; each opponent
/// group counts the match once.
pub fn matchup_table<'a, I>(
    matches: I,
    registry: &EntityRegistry,
    kind: EntityKind,
    id: i32
) -> Vec<MatchupRecord>
where
    I: Iterator<Item = &'a MatchRecord>
{
    let mut groups: HashMap<i32, (i32, i32)> = HashMap::new();

    for record in matches {
        let membership = registry.membership(kind, id, record);
        let Some(side) = membership.exclusive_side() else {
            continue;
        };

        let won = record.winner == Some(side);
        for opponent in opponents_of(registry, kind, id, record, side.opposite()) {
            let entry = groups.entry(opponent).or_insert((0, 0));
            entry.0 += 1;
            if won {
                entry.1 += 1;
            }
        }
    }

    groups
        .into_iter()
        .map(|(opponent_id, (matches_played, wins))| MatchupRecord {
            opponent_id,
            matches_played,
            wins,
            win_rate: wins as f64 / matches_played as f64
        })
        .collect()
}

/// Same-kind entities on the opposing side, excluding the subject itself.
fn opponents_of(
    registry: &EntityRegistry,
    kind: EntityKind,
    id: i32,
    record: &MatchRecord,
    opposing: Side
) -> Vec<i32> {
    let side = record.side(opposing);
    let ids: Vec<i32> = match kind {
        EntityKind::Competitor => vec![side.competitor_id],
        EntityKind::Loadout => vec![side.loadout_id],
        EntityKind::SubPart => registry.sub_part_ids(side.loadout_id).to_vec(),
        EntityKind::LaunchDevice => side.launch_device_id.into_iter().collect(),
        EntityKind::LaunchDeviceClass => side
            .launch_device_id
            .and_then(|d| registry.device_class_of(d))
            .into_iter()
            .collect(),
        EntityKind::Venue | EntityKind::VenueClass => Vec::new()
    };

    ids.into_iter().unique().filter(|&o| o != id).collect()
}

/// Opponents ranked by win rate descending; ties go to the opponent faced
/// more often. Capped to the top [`MATCHUP_LIMIT`].
pub fn best_matchups<'a, I>(
    matches: I,
    registry: &EntityRegistry,
    kind: EntityKind,
    id: i32
) -> Vec<MatchupRecord>
where
    I: Iterator<Item = &'a MatchRecord>
{
    let mut table = matchup_table(matches, registry, kind, id);
    table.sort_by(|a, b| {
        b.win_rate
            .partial_cmp(&a.win_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.matches_played.cmp(&a.matches_played))
            .then(a.opponent_id.cmp(&b.opponent_id))
    });
    table.truncate(MATCHUP_LIMIT);
    table
}

/// The reverse ranking of [`best_matchups`], with the same tie-break.
pub fn worst_matchups<'a, I>(
    matches: I,
    registry: &EntityRegistry,
    kind: EntityKind,
    id: i32
) -> Vec<MatchupRecord>
where
    I: Iterator<Item = &'a MatchRecord>
{
    let mut table = matchup_table(matches, registry, kind, id);
    table.sort_by(|a, b| {
        a.win_rate
            .partial_cmp(&b.win_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.matches_played.cmp(&a.matches_played))
            .then(a.opponent_id.cmp(&b.opponent_id))
    });
    table.truncate(MATCHUP_LIMIT);
    table
}

/// The opponent faced most often; ties go to the lowest opponent id.
pub fn most_common_opponent<'a, I>(
    matches: I,
    registry: &EntityRegistry,
    kind: EntityKind,
    id: i32
) -> Option<MatchupRecord>
where
    I: Iterator<Item = &'a MatchRecord>
{
    matchup_table(matches, registry, kind, id)
        .into_iter()
        .sorted_by(|a, b| {
            b.matches_played
                .cmp(&a.matches_played)
                .then(a.opponent_id.cmp(&b.opponent_id))
        })
        .next()
}
