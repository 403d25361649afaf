//! Sensor classes known to the aggregation, their upstream codes, and the
//! decoded reading shape shared by the latest-value and time-series endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The sensor classes consumed by the weather aggregation.
///
/// Each variant maps to a fixed upstream sensor code and a fixed layout of
/// the values array in its readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Combined temperature and humidity sensor; readings carry 2 values.
    TempHumidity,
    /// Wind sensor; readings carry direction, speed and average speed.
    Wind,
    /// Rain sensor; readings carry current rate, yesterday's total and the
    /// running total, of which only the current rate is consumed.
    Rain,
}

impl SensorKind {
    /// All sensor classes, in the order the aggregation attempts them.
    pub const ALL: [SensorKind; 3] = [SensorKind::TempHumidity, SensorKind::Wind, SensorKind::Rain];

    /// The upstream sensor code, as it appears in a station's declared
    /// sensor list and in request paths.
    pub fn code(&self) -> &'static str {
        match self {
            SensorKind::TempHumidity => "th0",
            SensorKind::Wind => "wind0",
            SensorKind::Rain => "rain0",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One decoded sensor reading: a unix timestamp plus the sensor-specific
/// ordered values.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SensorReading {
    /// Seconds since the unix epoch.
    pub timestamp: i64,
    /// Numeric values whose count and meaning depend on the sensor class.
    pub values: Vec<f64>,
}

impl SensorReading {
    /// Decodes the upstream wire shape, a flat array of timestamp followed
    /// by values. An empty array carries no reading.
    pub(crate) fn from_wire(raw: Vec<f64>) -> Option<Self> {
        let (timestamp, values) = raw.split_first()?;
        Some(Self {
            timestamp: *timestamp as i64,
            values: values.to_vec(),
        })
    }
}

/// A relative time window accepted by the time-series endpoint, rendered as
/// e.g. `last24h` in request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSeriesPeriod {
    count: u32,
    unit: PeriodUnit,
}

/// Time unit of a [`TimeSeriesPeriod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl PeriodUnit {
    fn suffix(&self) -> &'static str {
        match self {
            PeriodUnit::Seconds => "s",
            PeriodUnit::Minutes => "m",
            PeriodUnit::Hours => "h",
            PeriodUnit::Days => "d",
            PeriodUnit::Weeks => "w",
        }
    }
}

impl TimeSeriesPeriod {
    pub fn new(count: u32, unit: PeriodUnit) -> Self {
        Self { count, unit }
    }

    /// The last `count` hours.
    pub fn hours(count: u32) -> Self {
        Self::new(count, PeriodUnit::Hours)
    }

    /// The last `count` days.
    pub fn days(count: u32) -> Self {
        Self::new(count, PeriodUnit::Days)
    }
}

/// Renders the period as it appears in request paths.
///
/// # Examples
///
/// ```
/// use stationcast::TimeSeriesPeriod;
///
/// assert_eq!(TimeSeriesPeriod::hours(24).to_string(), "last24h");
/// assert_eq!(TimeSeriesPeriod::days(7).to_string(), "last7d");
/// ```
impl fmt::Display for TimeSeriesPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "last{}{}", self.count, self.unit.suffix())
    }
}
