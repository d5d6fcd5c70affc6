use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use strum_macros::{Display, EnumIter};

/// Everything metrics can be computed for. Competitor, loadout and launch
/// device match a record's sides directly; the remaining kinds join through
/// the registry (sub-part composition, venue and device classes).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Competitor,
    Loadout,
    SubPart,
    Venue,
    VenueClass,
    LaunchDevice,
    LaunchDeviceClass
}

impl EntityKind {
    /// Kinds that carry a tournament Elo ladder.
    pub fn is_rated(self) -> bool {
        matches!(self, EntityKind::Competitor | EntityKind::Loadout)
    }

    /// Venue kinds belong to the match as a whole rather than to one side,
    /// so they never win, lose, or face an opponent.
    pub fn is_sided(self) -> bool {
        !matches!(self, EntityKind::Venue | EntityKind::VenueClass)
    }
}

impl TryFrom<i32> for EntityKind {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(EntityKind::Competitor),
            1 => Ok(EntityKind::Loadout),
            2 => Ok(EntityKind::SubPart),
            3 => Ok(EntityKind::Venue),
            4 => Ok(EntityKind::VenueClass),
            5 => Ok(EntityKind::LaunchDevice),
            6 => Ok(EntityKind::LaunchDeviceClass),
            _ => Err(())
        }
    }
}
