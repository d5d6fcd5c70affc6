use crate::model::{
    error::StatsError, records::MatchRecord, registry::EntityRegistry,
    structures::entity_kind::EntityKind
};

/// The append-only match log, ordered by ascending match id. Every metric
/// in the engine is a fold over one of the filtered views produced here;
/// no component derives its own notion of "which matches count".
#[derive(Debug, Clone, Default)]
pub struct MatchLog {
    records: Vec<MatchRecord>
}

impl MatchLog {
    pub fn new() -> MatchLog {
        MatchLog::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record after checking the consistency invariant and the
    /// monotonic id rule. These are the only fatal write-path conditions.
    pub fn append(&mut self, record: MatchRecord) -> Result<(), StatsError> {
        record.validate()?;

        if let Some(last) = self.records.last() {
            if record.match_id <= last.match_id {
                return Err(StatsError::NonMonotonicMatchId {
                    id: record.match_id,
                    last: last.match_id
                });
            }
        }

        self.records.push(record);
        Ok(())
    }

    /// All records in log order. The iterator is restartable: call again
    /// for a fresh pass, clone it for independent consumers.
    pub fn iter(&self) -> impl Iterator<Item = &MatchRecord> + Clone {
        self.records.iter()
    }

    pub fn by_tournament(&self, tournament_id: i32) -> impl Iterator<Item = &MatchRecord> + Clone {
        self.records
            .iter()
            .filter(move |r| r.tournament_id == Some(tournament_id))
    }

    /// Every match the entity participates in (on either side, via the
    /// registry's membership rule for its kind), optionally narrowed to one
    /// tournament. Ascending match id.
    pub fn matches_for<'a>(
        &'a self,
        registry: &'a EntityRegistry,
        kind: EntityKind,
        id: i32,
        tournament_id: Option<i32>
    ) -> impl Iterator<Item = &'a MatchRecord> + Clone + 'a {
        self.records.iter().filter(move |r| {
            if let Some(t) = tournament_id {
                if r.tournament_id != Some(t) {
                    return false;
                }
            }
            registry.membership(kind, id, r).participates()
        })
    }

    /// The entity's matches with a known end time, most recent first — the
    /// view the streak walk runs over.
    pub fn ended_desc_for<'a>(
        &'a self,
        registry: &'a EntityRegistry,
        kind: EntityKind,
        id: i32
    ) -> Vec<&'a MatchRecord> {
        let mut matches: Vec<&MatchRecord> = self
            .matches_for(registry, kind, id, None)
            .filter(|r| r.ended_at.is_some())
            .collect();
        matches.sort_by_key(|r| std::cmp::Reverse(r.ended_at));
        matches
    }
}
