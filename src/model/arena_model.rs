use crate::{
    model::{
        counters::{self, CounterSummary},
        distribution, elo,
        error::StatsError,
        match_log::MatchLog,
        matchups::{self, MatchupRecord},
        rating_tracker::RatingTracker,
        records::{MatchRecord, RecordOutcome},
        registry::EntityRegistry,
        standings::{self, StandingsRow},
        streaks,
        structures::{
            distribution_scope::DistributionScope, entity_kind::EntityKind,
            finish_condition::FinishCondition, matchup_mode::MatchupMode
        }
    },
    utils::progress_utils::progress_bar
};
use chrono::Duration;
use serde::Serialize;
use indexmap::IndexMap;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::{debug, info};

/// Head-to-head record between two entities of the same kind, seen from
/// the first entity's side.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HeadToHead {
    pub matches_played: i32,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub win_percentage: f64,
    pub non_loss_percentage: f64
}

/// The engine behind the query interface: an entity registry, the
/// append-only match log, and the rating tracker.
///
/// Every read takes `&self` and is a pure scan over the log; reads may run
/// concurrently from any number of threads, and the bulk paths fan out with
/// rayon. `record_match` is the single write: it holds `&mut self`, which
/// serialises the read-modify-write on the at most four rating records a
/// match touches.
pub struct ArenaModel {
    registry: EntityRegistry,
    log: MatchLog,
    tracker: RatingTracker
}

impl ArenaModel {
    pub fn new(registry: EntityRegistry) -> ArenaModel {
        ArenaModel {
            registry,
            log: MatchLog::new(),
            tracker: RatingTracker::new()
        }
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn log(&self) -> &MatchLog {
        &self.log
    }

    pub fn tracker(&self) -> &RatingTracker {
        &self.tracker
    }

    fn require_entity(&self, kind: EntityKind, id: i32) -> Result<(), StatsError> {
        if self.registry.contains(kind, id) {
            Ok(())
        } else {
            Err(StatsError::EntityNotFound { kind, id })
        }
    }

    /// Registers a competitor or loadout as a tournament participant,
    /// creating its rating record at the default. Registering twice is a
    /// no-op.
    pub fn register_participant(
        &mut self,
        tournament_id: i32,
        kind: EntityKind,
        entity_id: i32
    ) -> Result<(), StatsError> {
        if !kind.is_rated() {
            return Err(StatsError::UnratedKind(kind));
        }
        self.require_entity(kind, entity_id)?;

        if !self.tracker.register(tournament_id, kind, entity_id) {
            debug!(
                "{} {} already registered for tournament {}",
                kind, entity_id, tournament_id
            );
        }
        Ok(())
    }

    /// Appends a match to the log and applies the rating updates it
    /// triggers. The append and the updates form one unit of work: a
    /// record that fails validation changes nothing.
    pub fn record_match(&mut self, record: MatchRecord) -> Result<RecordOutcome, StatsError> {
        let match_id = record.match_id;
        self.log.append(record)?;

        // The freshly appended record drives the rating side effect.
        let (adjustments, skipped) = match self.log.iter().last() {
            Some(settled) => elo::apply_match(&mut self.tracker, settled),
            None => (Vec::new(), Vec::new())
        };

        debug!(
            "recorded match {}: {} rating updates, {} skipped",
            match_id,
            adjustments.len(),
            skipped.len()
        );

        Ok(RecordOutcome {
            match_id,
            adjustments,
            skipped
        })
    }

    /// Replays a batch of records in order, stopping at the first rejected
    /// one.
    pub fn process(&mut self, records: Vec<MatchRecord>) -> Result<Vec<RecordOutcome>, StatsError> {
        let bar = progress_bar(records.len() as u64, "Processing match records".to_string());
        let mut outcomes = Vec::with_capacity(records.len());

        for record in records {
            outcomes.push(self.record_match(record)?);
            bar.inc(1);
        }

        bar.finish();
        info!("processed {} match records", outcomes.len());
        Ok(outcomes)
    }

    pub fn counters(
        &self,
        kind: EntityKind,
        id: i32,
        tournament_id: Option<i32>
    ) -> Result<CounterSummary, StatsError> {
        self.require_entity(kind, id)?;
        Ok(counters::summarize(
            self.log.matches_for(&self.registry, kind, id, tournament_id),
            &self.registry,
            kind,
            id
        ))
    }

    /// The signed current streak over the entity's whole match history.
    pub fn streak(&self, kind: EntityKind, id: i32) -> Result<i32, StatsError> {
        self.require_entity(kind, id)?;
        let ordered = self.log.ended_desc_for(&self.registry, kind, id);
        Ok(streaks::current_streak(ordered, &self.registry, kind, id))
    }

    pub fn finish_distribution(
        &self,
        kind: EntityKind,
        id: i32,
        tournament_id: Option<i32>,
        scope: DistributionScope
    ) -> Result<IndexMap<FinishCondition, i32>, StatsError> {
        self.require_entity(kind, id)?;
        Ok(distribution::distribution_for(
            self.log.matches_for(&self.registry, kind, id, tournament_id),
            &self.registry,
            kind,
            id,
            scope
        ))
    }

    pub fn matchups(
        &self,
        kind: EntityKind,
        id: i32,
        mode: MatchupMode
    ) -> Result<Vec<MatchupRecord>, StatsError> {
        self.require_entity(kind, id)?;
        let matches = self.log.matches_for(&self.registry, kind, id, None);

        Ok(match mode {
            MatchupMode::Best => matchups::best_matchups(matches, &self.registry, kind, id),
            MatchupMode::Worst => matchups::worst_matchups(matches, &self.registry, kind, id),
            MatchupMode::MostCommon => matchups::most_common_opponent(matches, &self.registry, kind, id)
                .into_iter()
                .collect()
        })
    }

    /// The entity's rating within a tournament; `None` means it was never
    /// registered there.
    pub fn rating(
        &self,
        kind: EntityKind,
        id: i32,
        tournament_id: i32
    ) -> Result<Option<i32>, StatsError> {
        if !kind.is_rated() {
            return Err(StatsError::UnratedKind(kind));
        }
        self.require_entity(kind, id)?;
        Ok(self.tracker.rating(tournament_id, kind, id))
    }

    pub fn standings(&self, tournament_id: i32, kind: EntityKind) -> Vec<StandingsRow> {
        standings::tournament_standings(&self.log, &self.registry, &self.tracker, tournament_id, kind)
    }

    /// Record of `id` against `opponent_id` (same kind), counting matches
    /// where the two face each other from opposite sides.
    pub fn head_to_head(
        &self,
        kind: EntityKind,
        id: i32,
        opponent_id: i32
    ) -> Result<HeadToHead, StatsError> {
        self.require_entity(kind, id)?;
        self.require_entity(kind, opponent_id)?;

        let mut record = HeadToHead::default();
        for m in self.log.matches_for(&self.registry, kind, id, None) {
            let own = self.registry.membership(kind, id, m).exclusive_side();
            let theirs = self.registry.membership(kind, opponent_id, m).exclusive_side();
            let Some(side) = own else { continue };
            if theirs != Some(side.opposite()) {
                continue;
            }

            record.matches_played += 1;
            if m.is_draw {
                record.draws += 1;
            } else if m.winner == Some(side) {
                record.wins += 1;
            } else {
                record.losses += 1;
            }
        }

        let decided = record.matches_played - record.draws;
        if decided > 0 {
            record.win_percentage = record.wins as f64 / decided as f64 * 100.0;
        }
        if record.matches_played > 0 {
            record.non_loss_percentage =
                (record.wins + record.draws) as f64 / record.matches_played as f64 * 100.0;
        }
        Ok(record)
    }

    /// Share of the entity's wins that ended by Burst, as a percentage of
    /// its wins. Zero for an entity with no wins.
    pub fn burst_rate(&self, kind: EntityKind, id: i32) -> Result<f64, StatsError> {
        let summary = self.counters(kind, id, None)?;
        if summary.wins == 0 {
            return Ok(0.0);
        }

        let winning = self.finish_distribution(kind, id, None, DistributionScope::WinsOnly)?;
        Ok(winning[&FinishCondition::Burst] as f64 / summary.wins as f64 * 100.0)
    }

    /// Mean duration of a tournament's matches that carry both timestamps;
    /// `None` when no match does.
    pub fn average_match_duration(&self, tournament_id: i32) -> Option<Duration> {
        let durations: Vec<Duration> = self
            .log
            .by_tournament(tournament_id)
            .filter_map(|m| m.duration())
            .collect();

        if durations.is_empty() {
            return None;
        }

        let total_ms: i64 = durations.iter().map(|d| d.num_milliseconds()).sum();
        Some(Duration::milliseconds(total_ms / durations.len() as i64))
    }

    /// Counters for every registered entity of a kind, computed in
    /// parallel. Rows come back in ascending entity id.
    pub fn counter_report(
        &self,
        kind: EntityKind,
        tournament_id: Option<i32>
    ) -> Vec<(i32, CounterSummary)> {
        self.registry
            .ids(kind)
            .into_par_iter()
            .map(|id| {
                let summary = counters::summarize(
                    self.log.matches_for(&self.registry, kind, id, tournament_id),
                    &self.registry,
                    kind,
                    id
                );
                (id, summary)
            })
            .collect()
    }

    /// Every tournament id seen in the log, ascending.
    pub fn tournament_ids(&self) -> Vec<i32> {
        self.log
            .iter()
            .filter_map(|m| m.tournament_id)
            .unique()
            .sorted()
            .collect()
    }
}
