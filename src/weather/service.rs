//! Aggregates per-sensor observations into one weather snapshot per
//! station, with a TTL cache in front of the upstream API.

use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::cache::TtlCache;
use crate::observations::client::ObservationsClient;
use crate::types::sensor::{SensorKind, SensorReading};
use crate::types::station::StationDetails;
use crate::types::weather::{WeatherFailure, WeatherResult, WeatherSnapshot};

pub(crate) const DEFAULT_WEATHER_TTL: Duration = Duration::from_secs(300);

fn sensor_label(kind: SensorKind) -> &'static str {
    match kind {
        SensorKind::TempHumidity => "temperature/humidity",
        SensorKind::Wind => "wind",
        SensorKind::Rain => "rain",
    }
}

/// Weather lookups over one observations endpoint.
///
/// A lookup fails only when the station itself is unknown or no declared
/// sensor contributes a field; individual sensor failures degrade the
/// snapshot instead of failing it. Only complete successes enter the
/// cache, so a degraded snapshot is retried on the next request.
pub struct WeatherService {
    client: ObservationsClient,
    cache: Mutex<TtlCache<String, WeatherSnapshot>>,
    ttl: Duration,
}

impl WeatherService {
    pub fn new(client: ObservationsClient) -> Self {
        Self::with_ttl(client, DEFAULT_WEATHER_TTL)
    }

    pub fn with_ttl(client: ObservationsClient, ttl: Duration) -> Self {
        Self {
            client,
            cache: Mutex::new(TtlCache::new()),
            ttl,
        }
    }

    /// Returns the current weather snapshot for `station_id`.
    ///
    /// # Errors
    ///
    /// * [`WeatherFailure::StationNotFound`] when the upstream API has no
    ///   record of the station, or fetching the record fails outright.
    /// * [`WeatherFailure::DataUnavailable`] when the station exists but
    ///   no declared sensor contributed a single field.
    pub async fn current(&self, station_id: &str) -> WeatherResult {
        let key = station_id.to_string();
        {
            let mut cache = self.cache.lock().await;
            if let Some(cached) = cache.get(&key) {
                debug!("Returning cached weather data for station {}", station_id);
                return Ok(cached);
            }
        }

        let station = match self.client.get_station(station_id).await {
            Ok(station) => station,
            Err(e) => {
                warn!("Failed to fetch station {}: {}", station_id, e);
                return Err(WeatherFailure::StationNotFound { station_id: key });
            }
        };

        let mut snapshot = WeatherSnapshot {
            station_id: key.clone(),
            name: station.description.clone(),
            timezone: station.timezone.as_ref().map(|tz| tz.tzfile.clone()),
            temperature: None,
            humidity: None,
            wind_speed: None,
            wind_direction: None,
            rain_rate: None,
            last_updated: Utc::now(),
        };

        let (th, wind, rain) = tokio::join!(
            self.fetch_declared(&station, station_id, SensorKind::TempHumidity),
            self.fetch_declared(&station, station_id, SensorKind::Wind),
            self.fetch_declared(&station, station_id, SensorKind::Rain),
        );

        let mut contributed = false;
        for (kind, reading) in [
            (SensorKind::TempHumidity, th),
            (SensorKind::Wind, wind),
            (SensorKind::Rain, rain),
        ] {
            if let Some(reading) = reading {
                contributed |= snapshot.merge_reading(kind, &reading);
            }
        }

        if !contributed {
            info!("No weather data available for station {}", station_id);
            return Err(WeatherFailure::DataUnavailable { station_id: key });
        }

        let mut cache = self.cache.lock().await;
        cache.set(key, snapshot.clone(), self.ttl);
        info!(
            "Weather data fetched for station {} (temperature: {}, wind: {}, rain: {})",
            station_id,
            snapshot.temperature.is_some(),
            snapshot.wind_speed.is_some(),
            snapshot.rain_rate.is_some()
        );
        Ok(snapshot)
    }

    /// Fetches the latest reading of `kind` if the station declares the
    /// sensor. Fetch failures are logged and reported as absent so one
    /// bad sensor cannot sink the lookup.
    async fn fetch_declared(
        &self,
        station: &StationDetails,
        station_id: &str,
        kind: SensorKind,
    ) -> Option<SensorReading> {
        if !station.declares_sensor(kind.code()) {
            return None;
        }
        match self.client.latest_reading(station_id, kind).await {
            Ok(Some(reading)) => Some(reading),
            Ok(None) => {
                debug!(
                    "No {} reading available for station {}",
                    sensor_label(kind),
                    station_id
                );
                None
            }
            Err(e) => {
                warn!(
                    "Failed to fetch {} data for station {}: {}",
                    sensor_label(kind),
                    station_id,
                    e
                );
                None
            }
        }
    }

    /// Drops expired snapshots.
    pub async fn sweep_cache(&self) {
        self.cache.lock().await.cleanup();
    }
}
