//! Threshold-based activity scoring over a weather snapshot.

use crate::activity::messages::{activity_message, FALLBACK_MESSAGE};
use crate::types::activity::{Activity, ActivityScore};
use crate::types::weather::WeatherSnapshot;

const COLD_TEMP_CELSIUS: f64 = 5.0;
const PLEASANT_TEMP_CELSIUS: f64 = 10.0;
const WINDY_SPEED_MS: f64 = 5.0;
const RAIN_RATE_THRESHOLD: f64 = 0.0;

// Base scores in ideal conditions, and outside them.
const SKIING_IDEAL: u8 = 90;
const SKIING_DEFAULT: u8 = 10;
const SURFING_IDEAL: u8 = 80;
const SURFING_DEFAULT: u8 = 20;
const INDOOR_IDEAL: u8 = 85;
const INDOOR_DEFAULT: u8 = 40;
const OUTDOOR_IDEAL: u8 = 95;
const OUTDOOR_DEFAULT: u8 = 30;

/// Scores every activity against the snapshot, best first.
///
/// Absent measurements count as zero for the comparisons without touching
/// the snapshot itself: a station with no temperature sensor still ranks,
/// it just ranks as a freezing, windless, dry place. The sort is stable,
/// so equal scores would keep declaration order, though the score table
/// never actually produces a tie.
pub fn score_activities(weather: &WeatherSnapshot) -> Vec<ActivityScore> {
    let temperature = weather.temperature.unwrap_or(0.0);
    let rain_rate = weather.rain_rate.unwrap_or(0.0);
    let wind_speed = weather.wind_speed.unwrap_or(0.0);

    let mut scores = vec![
        entry(
            Activity::Skiing,
            if temperature < COLD_TEMP_CELSIUS {
                SKIING_IDEAL
            } else {
                SKIING_DEFAULT
            },
        ),
        entry(
            Activity::Surfing,
            if wind_speed > WINDY_SPEED_MS {
                SURFING_IDEAL
            } else {
                SURFING_DEFAULT
            },
        ),
        entry(
            Activity::IndoorSightseeing,
            if rain_rate > RAIN_RATE_THRESHOLD {
                INDOOR_IDEAL
            } else {
                INDOOR_DEFAULT
            },
        ),
        entry(
            Activity::OutdoorSightseeing,
            if rain_rate == RAIN_RATE_THRESHOLD && temperature > PLEASANT_TEMP_CELSIUS {
                OUTDOOR_IDEAL
            } else {
                OUTDOOR_DEFAULT
            },
        ),
    ];
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores
}

/// The ranking served when no weather data could be fetched: a single
/// low-confidence indoor recommendation.
pub fn fallback_ranking() -> Vec<ActivityScore> {
    vec![ActivityScore {
        activity: Activity::IndoorSightseeing,
        score: INDOOR_DEFAULT,
        message: FALLBACK_MESSAGE.to_string(),
    }]
}

fn entry(activity: Activity, score: u8) -> ActivityScore {
    ActivityScore {
        activity,
        score,
        message: activity_message(activity, score).to_string(),
    }
}
