//! Defines the data structures for stations: the bundled catalog records used
//! by suggestion queries, the scored pairing a query produces, and the
//! metadata shape returned by the upstream observations API.

use serde::{Deserialize, Serialize};

// --- Catalog records ---

/// A single entry in the station catalog.
///
/// Catalog records are loaded once at client construction and never mutated.
/// Field names follow the camelCase convention of the bundled JSON dataset.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Catalog identifier, unique within the dataset (e.g. "de-leipzig").
    pub id: String,
    /// Human-readable display name (e.g. "Leipzig").
    pub name: String,
    /// Country the station is located in.
    pub country: String,
    /// Identifier of the physical station at the upstream data source.
    /// Distinct from [`Station::id`].
    pub station_id: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// A catalog station paired with its relevance score for one query.
///
/// Produced by a suggestion request and discarded after pagination; scores
/// are only comparable within the query that produced them.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredStation {
    pub station: Station,
    /// Rounded relevance score, always at least 1 for returned candidates.
    pub score: u32,
}

// --- Upstream metadata ---

/// Station metadata as returned by the observations API.
///
/// Only the fields the aggregation consumes are required; everything else is
/// optional so partial upstream records still decode.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StationDetails {
    /// Display name of the station.
    pub description: Option<String>,
    /// Sensor codes declared present on this station (e.g. "th0", "wind0").
    #[serde(default)]
    pub sensors: Vec<String>,
    /// Upstream station identifier.
    pub sid: Option<i64>,
    /// Two-letter country code.
    pub cc: Option<String>,
    /// Elevation above sea level in meters.
    pub elevation: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<StationTimezone>,
}

impl StationDetails {
    /// Whether the station declares a sensor with the given code.
    pub fn declares_sensor(&self, code: &str) -> bool {
        self.sensors.iter().any(|s| s == code)
    }
}

/// Timezone block of a [`StationDetails`] record.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StationTimezone {
    /// IANA timezone name (e.g. "Europe/Berlin").
    pub tzfile: String,
    /// Abbreviated timezone name (e.g. "CEST").
    pub tzname: Option<String>,
    /// Offset from UTC in seconds.
    pub utcoffset: Option<i64>,
    /// Daylight saving offset in seconds.
    pub dst: Option<i64>,
}
