//! This module provides the main entry point for the station query client.
//! It bundles fuzzy station suggestion over the built-in catalog, current
//! weather lookups against an observations endpoint, and weather-driven
//! activity rankings behind one configured client value.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bon::bon;
use chrono::{DateTime, Utc};
use log::warn;

use crate::activity::scorer::{fallback_ranking, score_activities};
use crate::error::StationcastError;
use crate::metrics::{MetricsSink, NoopMetrics, Operation, TimingRecord};
use crate::observations::client::{ObservationsClient, RetryPolicy, DEFAULT_REQUEST_TIMEOUT};
use crate::stations::catalog::StationCatalog;
use crate::stations::suggest::{SuggestEngine, DEFAULT_SUGGESTION_LIMIT, DEFAULT_SUGGESTION_TTL};
use crate::types::activity::ActivityScore;
use crate::types::page::SuggestPage;
use crate::types::weather::WeatherResult;
use crate::weather::service::{WeatherService, DEFAULT_WEATHER_TTL};

/// The main client for station suggestions, weather lookups and activity
/// rankings.
///
/// Construction wires a station catalog, an HTTP client for the
/// observations API, the two TTL caches and a metrics sink together.
/// The client is ready after construction; no call performs I/O until a
/// weather lookup actually needs the upstream API.
///
/// # Examples
///
/// ```
/// use stationcast::Stationcast;
///
/// # fn main() -> Result<(), stationcast::StationcastError> {
/// let client = Stationcast::builder()
///     .base_url("https://observations.example.com/api/v1")
///     .build()?;
///
/// let page = client.suggest_stations().query("leip").call();
/// assert!(!page.stations.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct Stationcast {
    suggest: SuggestEngine,
    weather: WeatherService,
    metrics: Arc<dyn MetricsSink>,
}

#[bon]
impl Stationcast {
    /// Creates a new `Stationcast` client.
    ///
    /// This method uses a builder pattern: start with
    /// `Stationcast::builder()`, set the fields below and finish with
    /// `.build()`.
    ///
    /// # Arguments
    ///
    /// * `.base_url(&str)`: **Required.** Root URL of the observations
    ///   API, with no trailing slash expected (one is tolerated).
    /// * `.catalog(Option<StationCatalog>)`: Optional. The station
    ///   catalog to suggest from. Defaults to the bundled dataset.
    /// * `.weather_ttl(Option<Duration>)`: Optional. How long weather
    ///   snapshots stay cached. Defaults to 5 minutes.
    /// * `.suggestion_ttl(Option<Duration>)`: Optional. How long ranked
    ///   suggestion lists stay cached. Defaults to 5 minutes.
    /// * `.timeout(Option<Duration>)`: Optional. Per-request HTTP
    ///   timeout. Defaults to 5 seconds.
    /// * `.retry_policy(Option<RetryPolicy>)`: Optional. Backoff
    ///   schedule for transient upstream failures. Defaults to 3 retries
    ///   starting at 100 ms.
    /// * `.metrics(Option<Arc<dyn MetricsSink>>)`: Optional. Receiver
    ///   for per-call timing records. Defaults to a sink that discards
    ///   them.
    ///
    /// # Errors
    ///
    /// Returns [`StationcastError::Catalog`] if the bundled dataset fails
    /// to parse and [`StationcastError::Observations`] if the HTTP client
    /// cannot be built.
    #[builder]
    pub fn new(
        base_url: &str,
        catalog: Option<StationCatalog>,
        weather_ttl: Option<Duration>,
        suggestion_ttl: Option<Duration>,
        timeout: Option<Duration>,
        retry_policy: Option<RetryPolicy>,
        metrics: Option<Arc<dyn MetricsSink>>,
    ) -> Result<Self, StationcastError> {
        let catalog = match catalog {
            Some(catalog) => catalog,
            None => StationCatalog::bundled()?,
        };
        let client = ObservationsClient::with_config(
            base_url,
            retry_policy.unwrap_or_default(),
            timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        )?;
        Ok(Self {
            suggest: SuggestEngine::with_ttl(
                catalog,
                suggestion_ttl.unwrap_or(DEFAULT_SUGGESTION_TTL),
            ),
            weather: WeatherService::with_ttl(client, weather_ttl.unwrap_or(DEFAULT_WEATHER_TTL)),
            metrics: metrics.unwrap_or_else(|| Arc::new(NoopMetrics)),
        })
    }

    /// Suggests catalog stations for a search query, best match first.
    ///
    /// This method uses a builder pattern and performs no I/O.
    ///
    /// # Arguments
    ///
    /// * `.query(&str)`: **Required.** Free-form search text; matching is
    ///   case-insensitive and ignores diacritics.
    /// * `.limit(Option<usize>)`: Optional. Stations per page, clamped
    ///   to `1..=50`. Defaults to `8`.
    /// * `.after(Option<&str>)`: Optional. Cursor from a previous page's
    ///   `end_cursor`. Malformed cursors restart at the first page.
    ///
    /// # Returns
    ///
    /// A [`SuggestPage`] holding the scored stations of the requested
    /// window, whether more follow, and the cursor to continue with.
    ///
    /// # Examples
    ///
    /// ```
    /// use stationcast::Stationcast;
    ///
    /// # fn main() -> Result<(), stationcast::StationcastError> {
    /// let client = Stationcast::builder()
    ///     .base_url("https://observations.example.com/api/v1")
    ///     .build()?;
    ///
    /// let first = client.suggest_stations().query("leipzig").limit(5).call();
    /// if let Some(cursor) = &first.end_cursor {
    ///     let second = client
    ///         .suggest_stations()
    ///         .query("leipzig")
    ///         .limit(5)
    ///         .after(cursor)
    ///         .call();
    ///     assert_ne!(first.stations, second.stations);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn suggest_stations(
        &self,
        query: &str,
        limit: Option<usize>,
        after: Option<&str>,
    ) -> SuggestPage {
        let start = Utc::now();
        let started = Instant::now();
        let page = self
            .suggest
            .suggest(query, limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT), after);
        self.record(Operation::SuggestStations, start, started, true);
        page
    }

    /// Fetches the current weather snapshot for a station.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.station_id(&str)`: **Required.** Upstream station identifier,
    ///   as found in [`Station::station_id`](crate::Station::station_id).
    ///
    /// # Returns
    ///
    /// A [`WeatherResult`]: the aggregated snapshot on success, or a
    /// typed [`WeatherFailure`](crate::WeatherFailure) when the station
    /// is unknown or no declared sensor delivered data. Partial sensor
    /// outages degrade the snapshot instead of failing it.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use stationcast::{Stationcast, StationcastError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), StationcastError> {
    /// let client = Stationcast::builder()
    ///     .base_url("https://observations.example.com/api/v1")
    ///     .build()?;
    ///
    /// match client.current_weather().station_id("2231").call().await {
    ///     Ok(snapshot) => println!("{:?} degrees", snapshot.temperature),
    ///     Err(failure) => println!("{}: {}", failure.code(), failure),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn current_weather(&self, station_id: &str) -> WeatherResult {
        let start = Utc::now();
        let started = Instant::now();
        let result = self.weather.current(station_id).await;
        self.record(Operation::CurrentWeather, start, started, result.is_ok());
        result
    }

    /// Ranks activities for a station based on its current weather.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.station_id(&str)`: **Required.** Upstream station identifier.
    ///
    /// # Returns
    ///
    /// All activities scored and sorted best first, each with an advisory
    /// message for its score band. When the weather lookup fails the
    /// ranking degrades to a single low-confidence indoor recommendation
    /// instead of erroring.
    #[builder]
    pub async fn rank_activities(&self, station_id: &str) -> Vec<ActivityScore> {
        let start = Utc::now();
        let started = Instant::now();
        match self.weather.current(station_id).await {
            Ok(snapshot) => {
                let ranking = score_activities(&snapshot);
                self.record(Operation::RankActivities, start, started, true);
                ranking
            }
            Err(failure) => {
                warn!(
                    "Could not get weather data for activity ranking of station {}: {}",
                    station_id, failure
                );
                self.record(Operation::RankActivities, start, started, false);
                fallback_ranking()
            }
        }
    }

    /// Drops expired entries from both caches.
    ///
    /// Expiry is otherwise lazy, so a long-lived client that sees many
    /// distinct queries can call this periodically to bound memory.
    pub async fn sweep_caches(&self) {
        self.suggest.sweep_cache();
        self.weather.sweep_cache().await;
    }

    fn record(&self, operation: Operation, start: DateTime<Utc>, started: Instant, success: bool) {
        self.metrics.record(
            operation,
            TimingRecord {
                start,
                end: Utc::now(),
                duration: started.elapsed(),
                success,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::InMemoryMetrics;
    use crate::types::activity::Activity;
    use crate::types::weather::WeatherFailure;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // Helper to build a client against a mock server with fast retries.
    fn client(base_url: &str) -> Result<Stationcast, StationcastError> {
        Stationcast::builder()
            .base_url(base_url)
            .retry_policy(RetryPolicy::new(1, 1, 10))
            .build()
    }

    async fn mount_full_station(server: &MockServer, station_id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/{station_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "description": "Leipzig/Halle",
                "sensors": ["th0", "wind0", "rain0"],
                "timezone": { "tzfile": "Europe/Berlin" }
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/{station_id}/th0")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([1700000000.0, 2.0, 80.0])),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/{station_id}/wind0")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([1700000000.0, 200.0, 3.0, 2.5])),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/{station_id}/rain0")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([1700000000.0, 0.0, 1.2, 95.0])),
            )
            .mount(server)
            .await;
    }

    #[test]
    fn test_suggest_from_bundled_catalog() -> Result<(), StationcastError> {
        let client = client("http://localhost:0")?;

        // A prefix is enough to rank the full name first.
        let page = client.suggest_stations().query("Leip").call();

        assert_eq!(page.stations[0].station.name, "Leipzig");
        Ok(())
    }

    #[test]
    fn test_suggest_pages_walk_with_cursors() -> Result<(), StationcastError> {
        let client = client("http://localhost:0")?;

        let first = client.suggest_stations().query("berlin").limit(3).call();
        assert!(first.has_next_page);
        let cursor = first.end_cursor.as_deref().unwrap();

        let second = client
            .suggest_stations()
            .query("berlin")
            .limit(3)
            .after(cursor)
            .call();

        assert_ne!(first.stations, second.stations);
        Ok(())
    }

    #[tokio::test]
    async fn test_full_weather_snapshot() -> Result<(), StationcastError> {
        let server = MockServer::start().await;
        mount_full_station(&server, "2231").await;
        let client = client(&server.uri())?;

        let snapshot = client
            .current_weather()
            .station_id("2231")
            .call()
            .await
            .unwrap();

        assert_eq!(snapshot.name.as_deref(), Some("Leipzig/Halle"));
        assert_eq!(snapshot.temperature, Some(2.0));
        assert_eq!(snapshot.humidity, Some(80.0));
        assert_eq!(snapshot.wind_direction, Some(200.0));
        assert_eq!(snapshot.wind_speed, Some(3.0));
        assert_eq!(snapshot.rain_rate, Some(0.0));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_station_is_a_typed_failure() -> Result<(), StationcastError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/9999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let client = client(&server.uri())?;

        let failure = client
            .current_weather()
            .station_id("9999")
            .call()
            .await
            .unwrap_err();

        assert_eq!(
            failure,
            WeatherFailure::StationNotFound {
                station_id: "9999".to_string()
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_cold_station_ranks_skiing_first() -> Result<(), StationcastError> {
        let server = MockServer::start().await;
        mount_full_station(&server, "2231").await;
        let client = client(&server.uri())?;

        let ranking = client.rank_activities().station_id("2231").call().await;

        assert_eq!(ranking.len(), 4);
        assert_eq!(ranking[0].activity, Activity::Skiing);
        assert_eq!(ranking[0].score, 90);
        Ok(())
    }

    #[tokio::test]
    async fn test_activity_ranking_falls_back_without_weather() -> Result<(), StationcastError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/9999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let client = client(&server.uri())?;

        let ranking = client.rank_activities().station_id("9999").call().await;

        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].activity, Activity::IndoorSightseeing);
        assert_eq!(ranking[0].score, 40);
        Ok(())
    }

    #[tokio::test]
    async fn test_weather_is_cached_between_calls() -> Result<(), StationcastError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2231"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "description": "Leipzig/Halle",
                "sensors": ["th0"],
                "timezone": { "tzfile": "Europe/Berlin" }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/2231/th0"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([1700000000.0, 2.0, 80.0])),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = client(&server.uri())?;

        let first = client
            .current_weather()
            .station_id("2231")
            .call()
            .await
            .unwrap();
        // Second lookup and the ranking below both hit the cache.
        let second = client
            .current_weather()
            .station_id("2231")
            .call()
            .await
            .unwrap();
        let ranking = client.rank_activities().station_id("2231").call().await;

        assert_eq!(first, second);
        assert_eq!(ranking[0].activity, Activity::Skiing);
        Ok(())
    }

    #[tokio::test]
    async fn test_operations_record_metrics() -> Result<(), StationcastError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/9999"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let metrics = Arc::new(InMemoryMetrics::new());
        let client = Stationcast::builder()
            .base_url(&server.uri())
            .retry_policy(RetryPolicy::new(1, 1, 10))
            .metrics(metrics.clone())
            .build()?;

        client.suggest_stations().query("leipzig").call();
        let _ = client.current_weather().station_id("9999").call().await;

        assert_eq!(metrics.call_count(Operation::SuggestStations), 1);
        assert_eq!(metrics.error_count(Operation::SuggestStations), 0);
        assert_eq!(metrics.call_count(Operation::CurrentWeather), 1);
        assert_eq!(metrics.error_count(Operation::CurrentWeather), 1);

        let records = metrics.records(Operation::CurrentWeather);
        assert_eq!(records.len(), 1);
        assert!(!records[0].success);
        assert!(records[0].end >= records[0].start);
        Ok(())
    }
}
