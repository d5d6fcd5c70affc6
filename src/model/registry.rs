use crate::model::{
    records::{MatchRecord, MatchSide},
    structures::{
        entity_kind::EntityKind,
        side::{Side, SideMembership}
    }
};
use std::collections::HashMap;

/// A loadout is a fixed combination of interchangeable sub-parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loadout {
    pub name: String,
    pub sub_part_ids: Vec<i32>
}

/// A venue and the class it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venue {
    pub name: String,
    pub class_id: Option<i32>
}

/// A launch device and the class it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchDevice {
    pub name: String,
    pub class_id: Option<i32>
}

/// The authoritative entity tables plus the static joins that resolve the
/// derived kinds. This is the single source for "does this id exist" and
/// "is this entity part of that match side" — there is no other membership
/// logic anywhere in the engine.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    competitors: HashMap<i32, String>,
    loadouts: HashMap<i32, Loadout>,
    sub_parts: HashMap<i32, String>,
    venues: HashMap<i32, Venue>,
    venue_classes: HashMap<i32, String>,
    launch_devices: HashMap<i32, LaunchDevice>,
    launch_device_classes: HashMap<i32, String>
}

impl EntityRegistry {
    pub fn new() -> EntityRegistry {
        EntityRegistry::default()
    }

    pub fn add_competitor(&mut self, id: i32, name: &str) {
        self.competitors.insert(id, name.to_string());
    }

    pub fn add_loadout(&mut self, id: i32, name: &str, sub_part_ids: &[i32]) {
        self.loadouts.insert(
            id,
            Loadout {
                name: name.to_string(),
                sub_part_ids: sub_part_ids.to_vec()
            }
        );
    }

    pub fn add_sub_part(&mut self, id: i32, name: &str) {
        self.sub_parts.insert(id, name.to_string());
    }

    pub fn add_venue_class(&mut self, id: i32, name: &str) {
        self.venue_classes.insert(id, name.to_string());
    }

    pub fn add_venue(&mut self, id: i32, name: &str, class_id: Option<i32>) {
        self.venues.insert(
            id,
            Venue {
                name: name.to_string(),
                class_id
            }
        );
    }

    pub fn add_launch_device_class(&mut self, id: i32, name: &str) {
        self.launch_device_classes.insert(id, name.to_string());
    }

    pub fn add_launch_device(&mut self, id: i32, name: &str, class_id: Option<i32>) {
        self.launch_devices.insert(
            id,
            LaunchDevice {
                name: name.to_string(),
                class_id
            }
        );
    }

    pub fn contains(&self, kind: EntityKind, id: i32) -> bool {
        match kind {
            EntityKind::Competitor => self.competitors.contains_key(&id),
            EntityKind::Loadout => self.loadouts.contains_key(&id),
            EntityKind::SubPart => self.sub_parts.contains_key(&id),
            EntityKind::Venue => self.venues.contains_key(&id),
            EntityKind::VenueClass => self.venue_classes.contains_key(&id),
            EntityKind::LaunchDevice => self.launch_devices.contains_key(&id),
            EntityKind::LaunchDeviceClass => self.launch_device_classes.contains_key(&id)
        }
    }

    pub fn name(&self, kind: EntityKind, id: i32) -> Option<&str> {
        match kind {
            EntityKind::Competitor => self.competitors.get(&id).map(String::as_str),
            EntityKind::Loadout => self.loadouts.get(&id).map(|l| l.name.as_str()),
            EntityKind::SubPart => self.sub_parts.get(&id).map(String::as_str),
            EntityKind::Venue => self.venues.get(&id).map(|v| v.name.as_str()),
            EntityKind::VenueClass => self.venue_classes.get(&id).map(String::as_str),
            EntityKind::LaunchDevice => self.launch_devices.get(&id).map(|d| d.name.as_str()),
            EntityKind::LaunchDeviceClass => self.launch_device_classes.get(&id).map(String::as_str)
        }
    }

    /// All known ids of a kind, ascending.
    pub fn ids(&self, kind: EntityKind) -> Vec<i32> {
        let mut ids: Vec<i32> = match kind {
            EntityKind::Competitor => self.competitors.keys().copied().collect(),
            EntityKind::Loadout => self.loadouts.keys().copied().collect(),
            EntityKind::SubPart => self.sub_parts.keys().copied().collect(),
            EntityKind::Venue => self.venues.keys().copied().collect(),
            EntityKind::VenueClass => self.venue_classes.keys().copied().collect(),
            EntityKind::LaunchDevice => self.launch_devices.keys().copied().collect(),
            EntityKind::LaunchDeviceClass => self.launch_device_classes.keys().copied().collect()
        };
        ids.sort_unstable();
        ids
    }

    pub fn sub_part_ids(&self, loadout_id: i32) -> &[i32] {
        self.loadouts.get(&loadout_id).map(|l| l.sub_part_ids.as_slice()).unwrap_or(&[])
    }

    pub fn venue_class_of(&self, venue_id: i32) -> Option<i32> {
        self.venues.get(&venue_id).and_then(|v| v.class_id)
    }

    pub fn device_class_of(&self, device_id: i32) -> Option<i32> {
        self.launch_devices.get(&device_id).and_then(|d| d.class_id)
    }

    /// Which sides of `record` the entity appears on. Venue kinds are
    /// unsided: when the venue matches, the entity counts as present on
    /// both sides of the record.
    pub fn membership(&self, kind: EntityKind, id: i32, record: &MatchRecord) -> SideMembership {
        match kind {
            EntityKind::Venue => {
                if record.venue_id == Some(id) {
                    SideMembership::BOTH
                } else {
                    SideMembership::NONE
                }
            }
            EntityKind::VenueClass => {
                let class = record.venue_id.and_then(|v| self.venue_class_of(v));
                if class == Some(id) {
                    SideMembership::BOTH
                } else {
                    SideMembership::NONE
                }
            }
            _ => SideMembership {
                side_a: self.side_has(kind, id, record.side(Side::A)),
                side_b: self.side_has(kind, id, record.side(Side::B))
            }
        }
    }

    fn side_has(&self, kind: EntityKind, id: i32, side: &MatchSide) -> bool {
        match kind {
            EntityKind::Competitor => side.competitor_id == id,
            EntityKind::Loadout => side.loadout_id == id,
            EntityKind::SubPart => self.sub_part_ids(side.loadout_id).contains(&id),
            EntityKind::LaunchDevice => side.launch_device_id == Some(id),
            EntityKind::LaunchDeviceClass => {
                side.launch_device_id.and_then(|d| self.device_class_of(d)) == Some(id)
            }
            // Handled in membership(); a venue is not attached to a side.
            EntityKind::Venue | EntityKind::VenueClass => false
        }
    }
}
