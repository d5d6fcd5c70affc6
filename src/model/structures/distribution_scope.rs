use serde::{Deserialize, Serialize};

/// Restriction applied when tallying finish conditions: every match the
/// entity took part in, or only the matches it won.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistributionScope {
    All,
    WinsOnly
}
