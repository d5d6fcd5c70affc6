use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use strum_macros::{Display, EnumIter};

/// How a settled match ended. `Draw` is reserved for matches with no winner.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishCondition {
    Survivor,
    Knockout,
    Burst,
    Extreme,
    Draw
}

impl TryFrom<i32> for FinishCondition {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(FinishCondition::Survivor),
            1 => Ok(FinishCondition::Knockout),
            2 => Ok(FinishCondition::Burst),
            3 => Ok(FinishCondition::Extreme),
            4 => Ok(FinishCondition::Draw),
            _ => Err(())
        }
    }
}
