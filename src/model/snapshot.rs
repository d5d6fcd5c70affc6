use crate::model::{
    arena_model::ArenaModel, error::StatsError, records::MatchRecord, registry::EntityRegistry,
    structures::entity_kind::EntityKind
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedEntry {
    pub id: i32,
    pub name: String
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadoutEntry {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub sub_part_ids: Vec<i32>
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassedEntry {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub class_id: Option<i32>
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantEntry {
    pub tournament_id: i32,
    pub kind: EntityKind,
    pub entity_id: i32
}

/// Everything needed to rebuild a model from a file: the registry tables,
/// the tournament registrations and the ordered match list. This is the
/// bin's input format; the engine itself never reads files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub competitors: Vec<NamedEntry>,
    #[serde(default)]
    pub sub_parts: Vec<NamedEntry>,
    #[serde(default)]
    pub loadouts: Vec<LoadoutEntry>,
    #[serde(default)]
    pub venue_classes: Vec<NamedEntry>,
    #[serde(default)]
    pub venues: Vec<ClassedEntry>,
    #[serde(default)]
    pub launch_device_classes: Vec<NamedEntry>,
    #[serde(default)]
    pub launch_devices: Vec<ClassedEntry>,
    #[serde(default)]
    pub participants: Vec<ParticipantEntry>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>
}

impl Snapshot {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Snapshot, SnapshotError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn registry(&self) -> EntityRegistry {
        let mut registry = EntityRegistry::new();

        for entry in &self.competitors {
            registry.add_competitor(entry.id, &entry.name);
        }
        for entry in &self.sub_parts {
            registry.add_sub_part(entry.id, &entry.name);
        }
        for entry in &self.loadouts {
            registry.add_loadout(entry.id, &entry.name, &entry.sub_part_ids);
        }
        for entry in &self.venue_classes {
            registry.add_venue_class(entry.id, &entry.name);
        }
        for entry in &self.venues {
            registry.add_venue(entry.id, &entry.name, entry.class_id);
        }
        for entry in &self.launch_device_classes {
            registry.add_launch_device_class(entry.id, &entry.name);
        }
        for entry in &self.launch_devices {
            registry.add_launch_device(entry.id, &entry.name, entry.class_id);
        }

        registry
    }

    /// Builds a model, registers the participants and replays the match
    /// list through it.
    pub fn build_model(self) -> Result<ArenaModel, StatsError> {
        let mut model = ArenaModel::new(self.registry());

        for participant in &self.participants {
            model.register_participant(participant.tournament_id, participant.kind, participant.entity_id)?;
        }

        info!(
            "snapshot: {} participants registered, replaying {} matches",
            self.participants.len(),
            self.matches.len()
        );
        model.process(self.matches)?;
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::structures::{finish_condition::FinishCondition, side::Side},
        utils::test_utils::{generate_match, generate_side, timestamp}
    };
    use std::io::Write;

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            competitors: vec![
                NamedEntry { id: 1, name: "Kai".to_string() },
                NamedEntry { id: 2, name: "Rin".to_string() },
            ],
            sub_parts: vec![NamedEntry { id: 100, name: "Dran Sword".to_string() }],
            loadouts: vec![
                LoadoutEntry { id: 10, name: "Sword Strike".to_string(), sub_part_ids: vec![100] },
                LoadoutEntry { id: 11, name: "Arrow Guard".to_string(), sub_part_ids: vec![] },
            ],
            participants: vec![
                ParticipantEntry { tournament_id: 1, kind: EntityKind::Competitor, entity_id: 1 },
                ParticipantEntry { tournament_id: 1, kind: EntityKind::Competitor, entity_id: 2 },
            ],
            matches: vec![generate_match(
                1,
                Some(1),
                generate_side(1, 10, None),
                generate_side(2, 11, None),
                Some(Side::A),
                FinishCondition::Burst,
                Some(timestamp(0))
            )],
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_round_trips_through_serde() {
        let snapshot = sample_snapshot();
        let encoded = serde_json::to_string_pretty(&snapshot).unwrap();
        let decoded: Snapshot = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded.competitors.len(), 2);
        assert_eq!(decoded.matches, snapshot.matches);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let encoded = serde_json::to_string(&sample_snapshot()).unwrap();
        file.write_all(encoded.as_bytes()).unwrap();

        let snapshot = Snapshot::from_file(file.path()).unwrap();
        assert_eq!(snapshot.loadouts.len(), 2);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.competitors.is_empty());
        assert!(snapshot.matches.is_empty());
    }

    #[test]
    fn test_build_model_replays_the_log() {
        let model = sample_snapshot().build_model().unwrap();

        assert_eq!(model.log().len(), 1);
        let summary = model.counters(EntityKind::Competitor, 1, Some(1)).unwrap();
        assert_eq!(summary.wins, 1);
        // Both competitors were registered, so the match was rated
        assert_eq!(model.rating(EntityKind::Competitor, 1, 1).unwrap(), Some(1016));
    }

    #[test]
    fn test_build_model_rejects_unknown_participants() {
        let mut snapshot = sample_snapshot();
        snapshot.participants.push(ParticipantEntry {
            tournament_id: 1,
            kind: EntityKind::Competitor,
            entity_id: 99
        });

        assert!(snapshot.build_model().is_err());
    }
}
