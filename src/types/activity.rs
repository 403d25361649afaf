//! Activity kinds and the scored entries produced by the activity ranking.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The activities the scorer knows about, in declaration order.
///
/// Declaration order doubles as the tie-break order of a ranking: a stable
/// descending sort keeps it for equal scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Activity {
    Skiing,
    Surfing,
    IndoorSightseeing,
    OutdoorSightseeing,
}

impl Activity {
    /// All activities, in declaration order.
    pub const ALL: [Activity; 4] = [
        Activity::Skiing,
        Activity::Surfing,
        Activity::IndoorSightseeing,
        Activity::OutdoorSightseeing,
    ];

    fn tag(&self) -> &'static str {
        match self {
            Activity::Skiing => "SKIING",
            Activity::Surfing => "SURFING",
            Activity::IndoorSightseeing => "INDOOR_SIGHTSEEING",
            Activity::OutdoorSightseeing => "OUTDOOR_SIGHTSEEING",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One entry of an activity ranking: the activity, a suitability score in
/// 0..=100 and an advisory message for the score band.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityScore {
    pub activity: Activity,
    pub score: u8,
    pub message: String,
}
