//! The aggregated weather snapshot and the typed failure outcomes of a
//! weather lookup.

use crate::types::sensor::{SensorKind, SensorReading};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One point-in-time aggregated weather reading for a station.
///
/// Every measurement field is optional because each originates from an
/// independently fetched sensor: an absent field means that sensor was
/// unavailable or not declared on the station, never that it read zero.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// The station identifier the lookup was made with.
    pub station_id: String,
    /// Display name reported by the upstream station record.
    pub name: Option<String>,
    /// IANA timezone name of the station's location.
    pub timezone: Option<String>,
    /// Air temperature in degrees Celsius.
    pub temperature: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Wind speed in meters per second.
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees.
    pub wind_direction: Option<f64>,
    /// Current rain rate in millimeters per hour.
    pub rain_rate: Option<f64>,
    /// When this snapshot was assembled.
    pub last_updated: DateTime<Utc>,
}

impl WeatherSnapshot {
    /// Merges a decoded sensor reading into the snapshot according to the
    /// sensor class's value layout. Returns whether any field was filled,
    /// which is what counts as a sensor contribution for the completeness
    /// check.
    pub(crate) fn merge_reading(&mut self, kind: SensorKind, reading: &SensorReading) -> bool {
        let mut merged = false;
        match kind {
            SensorKind::TempHumidity => {
                if let Some(v) = reading.values.first() {
                    self.temperature = Some(*v);
                    merged = true;
                }
                if let Some(v) = reading.values.get(1) {
                    self.humidity = Some(*v);
                    merged = true;
                }
            }
            SensorKind::Wind => {
                // Layout: direction, speed, average speed. The average is
                // not consumed.
                if let Some(v) = reading.values.first() {
                    self.wind_direction = Some(*v);
                    merged = true;
                }
                if let Some(v) = reading.values.get(1) {
                    self.wind_speed = Some(*v);
                    merged = true;
                }
            }
            SensorKind::Rain => {
                // Layout: current rate, yesterday's total, running total.
                // Only the current rate is consumed.
                if let Some(v) = reading.values.first() {
                    self.rain_rate = Some(*v);
                    merged = true;
                }
            }
        }
        merged
    }
}

/// Typed failure outcome of a weather lookup.
///
/// Failures are returned, never panicked, and are never cached. The
/// `RateLimited` and `Internal` kinds are reserved: no current code path
/// produces them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeatherFailure {
    #[error("Station {station_id} not found or is unavailable")]
    StationNotFound { station_id: String },

    #[error("No weather data available for station {station_id}")]
    DataUnavailable { station_id: String },

    #[error("Rate limited by the upstream data source")]
    RateLimited,

    #[error("An unexpected error occurred while fetching weather data")]
    Internal,
}

impl WeatherFailure {
    /// Stable machine-readable code for the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            WeatherFailure::StationNotFound { .. } => "STATION_NOT_FOUND",
            WeatherFailure::DataUnavailable { .. } => "DATA_UNAVAILABLE",
            WeatherFailure::RateLimited => "RATE_LIMITED",
            WeatherFailure::Internal => "INTERNAL_ERROR",
        }
    }
}

/// Outcome of a weather lookup: exactly one of a snapshot or a typed
/// failure, matched exhaustively by callers.
pub type WeatherResult = Result<WeatherSnapshot, WeatherFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            station_id: "1004".to_string(),
            name: None,
            timezone: None,
            temperature: None,
            humidity: None,
            wind_speed: None,
            wind_direction: None,
            rain_rate: None,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_merges_temperature_and_humidity() {
        let mut snapshot = empty_snapshot();
        let reading = SensorReading {
            timestamp: 1697324400,
            values: vec![22.5, 65.0],
        };

        assert!(snapshot.merge_reading(SensorKind::TempHumidity, &reading));
        assert_eq!(snapshot.temperature, Some(22.5));
        assert_eq!(snapshot.humidity, Some(65.0));
        assert_eq!(snapshot.wind_speed, None);
    }

    #[test]
    fn test_merges_wind_direction_and_speed_only() {
        let mut snapshot = empty_snapshot();
        let reading = SensorReading {
            timestamp: 1697324400,
            values: vec![180.0, 5.5, 6.0],
        };

        assert!(snapshot.merge_reading(SensorKind::Wind, &reading));
        assert_eq!(snapshot.wind_direction, Some(180.0));
        assert_eq!(snapshot.wind_speed, Some(5.5));
    }

    #[test]
    fn test_merges_only_the_current_rain_rate() {
        let mut snapshot = empty_snapshot();
        let reading = SensorReading {
            timestamp: 1697324400,
            values: vec![0.5, 10.0, 100.0],
        };

        assert!(snapshot.merge_reading(SensorKind::Rain, &reading));
        assert_eq!(snapshot.rain_rate, Some(0.5));
    }

    #[test]
    fn test_empty_values_do_not_count_as_a_contribution() {
        let mut snapshot = empty_snapshot();
        let reading = SensorReading {
            timestamp: 1697324400,
            values: Vec::new(),
        };

        assert!(!snapshot.merge_reading(SensorKind::TempHumidity, &reading));
        assert_eq!(snapshot.temperature, None);
        assert_eq!(snapshot.humidity, None);
    }

    #[test]
    fn test_failure_codes_are_stable() {
        let failure = WeatherFailure::StationNotFound {
            station_id: "1004".to_string(),
        };
        assert_eq!(failure.code(), "STATION_NOT_FOUND");
        assert!(failure.to_string().contains("1004"));
    }
}
