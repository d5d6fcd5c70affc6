use crate::model::{
    records::MatchRecord,
    registry::EntityRegistry,
    structures::{
        distribution_scope::DistributionScope, entity_kind::EntityKind,
        finish_condition::FinishCondition
    }
};
use indexmap::IndexMap;
use strum::IntoEnumIterator;

/// Tallies finish conditions over a filtered match view. The map always
/// carries all five conditions in declaration order, zeros included, so
/// consumers render stable rows.
///
/// `WinsOnly` counts only matches the entity won; `All` counts every match
/// it participated in regardless of outcome, which is what whole-venue
/// aggregates use.
pub fn distribution_for<'a, I>(
    matches: I,
    registry: &EntityRegistry,
    kind: EntityKind,
    id: i32,
    scope: DistributionScope
) -> IndexMap<FinishCondition, i32>
where
    I: Iterator<Item = &'a MatchRecord>
{
    let mut counts: IndexMap<FinishCondition, i32> =
        FinishCondition::iter().map(|f| (f, 0)).collect();

    for record in matches {
        let membership = registry.membership(kind, id, record);
        if !membership.participates() {
            continue;
        }

        let counted = match scope {
            DistributionScope::All => true,
            DistributionScope::WinsOnly => record.winner.is_some_and(|w| membership.on(w))
        };

        if counted {
            counts[&record.finish] += 1;
        }
    }

    counts
}
