use serde::{Deserialize, Serialize};

/// Which slice of the opponent table a matchup query returns.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchupMode {
    Best,
    Worst,
    MostCommon
}
