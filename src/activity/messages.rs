use crate::types::activity::Activity;

/// The single entry returned when no weather data could be fetched.
pub(crate) const FALLBACK_MESSAGE: &str =
    "Indoor activities recommended due to weather data unavailability";

/// Returns the advisory line for an activity at a given score.
///
/// Messages come in four bands: 80 and up, 60 to 79, 40 to 59, and
/// everything below.
pub fn activity_message(activity: Activity, score: u8) -> &'static str {
    if score >= 80 {
        match activity {
            Activity::Skiing => "Perfect conditions for skiing! Cold temperatures and fresh snow.",
            Activity::Surfing => "Great surfing conditions with ideal wind and temperature.",
            Activity::IndoorSightseeing => "Good time for museums and indoor activities.",
            Activity::OutdoorSightseeing => "Beautiful weather for outdoor exploration.",
        }
    } else if score >= 60 {
        match activity {
            Activity::Skiing => "Good skiing conditions, though not ideal.",
            Activity::Surfing => "Decent surfing conditions.",
            Activity::IndoorSightseeing => "Indoor activities are a good option.",
            Activity::OutdoorSightseeing => "Pleasant conditions for outdoor activities.",
        }
    } else if score >= 40 {
        match activity {
            Activity::Skiing => "Marginal conditions for skiing.",
            Activity::Surfing => "Surfing conditions are suboptimal.",
            Activity::IndoorSightseeing => "Consider indoor activities.",
            Activity::OutdoorSightseeing => "Weather is okay for outdoor activities.",
        }
    } else {
        match activity {
            Activity::Skiing => "Poor skiing conditions - too warm or not enough snow.",
            Activity::Surfing => "Not recommended for surfing today.",
            Activity::IndoorSightseeing => "Great time to explore indoor attractions.",
            Activity::OutdoorSightseeing => "Weather not ideal for outdoor activities.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges_select_the_higher_band() {
        assert_eq!(
            activity_message(Activity::Skiing, 80),
            "Perfect conditions for skiing! Cold temperatures and fresh snow."
        );
        assert_eq!(
            activity_message(Activity::Skiing, 79),
            "Good skiing conditions, though not ideal."
        );
        assert_eq!(
            activity_message(Activity::Surfing, 60),
            "Decent surfing conditions."
        );
        assert_eq!(
            activity_message(Activity::Surfing, 59),
            "Surfing conditions are suboptimal."
        );
        assert_eq!(
            activity_message(Activity::IndoorSightseeing, 40),
            "Consider indoor activities."
        );
        assert_eq!(
            activity_message(Activity::IndoorSightseeing, 39),
            "Great time to explore indoor attractions."
        );
    }

    #[test]
    fn test_every_activity_has_a_message_in_every_band() {
        for activity in Activity::ALL {
            for score in [0, 40, 60, 80, 100] {
                assert!(!activity_message(activity, score).is_empty());
            }
        }
    }
}
