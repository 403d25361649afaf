//! HTTP client for the station observations API.
//!
//! The API serves station metadata at `/{station_id}`, the latest reading
//! of a sensor at `/{station_id}/{sensor}` and a windowed series at
//! `/{station_id}/{sensor}/{period}`. Sensor payloads are flat number
//! arrays with the epoch timestamp first; a missing resource comes back
//! as 404 or a `null` body, both of which decode to `None` here rather
//! than an error.

use std::time::Duration;

use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use crate::observations::error::ObservationsError;
use crate::types::sensor::{SensorKind, SensorReading, TimeSeriesPeriod};
use crate::types::station::StationDetails;

pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_INITIAL_DELAY_MS: u64 = 100;
const DEFAULT_MAX_DELAY_MS: u64 = 5000;

/// Backoff schedule for transient upstream failures.
///
/// Retries apply to network-level failures (timeouts, refused or reset
/// connections) and 5xx responses. Client errors are terminal: a 404 in
/// particular means "no such resource" and is never retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles each attempt.
    pub initial_delay: Duration,
    /// Ceiling for the doubled delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_millis(initial_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
        }
    }

    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        let delay_ms = (self.initial_delay.as_millis() as u64).saturating_mul(factor);
        Duration::from_millis(delay_ms.min(self.max_delay.as_millis() as u64))
    }
}

fn is_retryable_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    status.is_server_error()
}

/// Client for one observations API endpoint.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct ObservationsClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl ObservationsClient {
    /// Creates a client with the default timeout and retry schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ObservationsError::ClientBuild`] if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, ObservationsError> {
        Self::with_config(base_url, RetryPolicy::default(), DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a client with an explicit retry schedule and request timeout.
    pub fn with_config(
        base_url: &str,
        retry: RetryPolicy,
        timeout: Duration,
    ) -> Result<Self, ObservationsError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ObservationsError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        })
    }

    /// Fetches metadata for a station.
    ///
    /// # Arguments
    ///
    /// * `station_id` - Identifier of the station as it appears in the
    ///   suggestion catalog, e.g. `"2231"`.
    ///
    /// # Returns
    ///
    /// The station's details, including which sensors it declares.
    ///
    /// # Errors
    ///
    /// Returns [`ObservationsError::StationNotFound`] when the API
    /// answers 404 or a `null` body, and the usual network and decode
    /// errors otherwise.
    pub async fn get_station(&self, station_id: &str) -> Result<StationDetails, ObservationsError> {
        let details: Option<StationDetails> = self.get_json(station_id).await?;
        details.ok_or_else(|| ObservationsError::StationNotFound {
            station_id: station_id.to_string(),
        })
    }

    /// Fetches the latest reading of one sensor.
    ///
    /// Returns `Ok(None)` when the station does not expose the sensor or
    /// has no data for it; only transport-level problems are errors.
    pub async fn latest_reading(
        &self,
        station_id: &str,
        sensor: SensorKind,
    ) -> Result<Option<SensorReading>, ObservationsError> {
        let path = format!("{}/{}", station_id, sensor.code());
        let raw: Option<Vec<f64>> = self.get_json(&path).await?;
        Ok(raw.and_then(SensorReading::from_wire))
    }

    /// Fetches a windowed series of readings for one sensor.
    ///
    /// Rows the API reports empty are dropped, so the result may be
    /// shorter than the window. An unknown sensor yields an empty series.
    pub async fn time_series(
        &self,
        station_id: &str,
        sensor: SensorKind,
        period: TimeSeriesPeriod,
    ) -> Result<Vec<SensorReading>, ObservationsError> {
        let path = format!("{}/{}/{}", station_id, sensor.code(), period);
        let raw: Option<Vec<Vec<f64>>> = self.get_json(&path).await?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .filter_map(SensorReading::from_wire)
            .collect())
    }

    /// GETs `path` under the base URL and decodes the JSON body.
    ///
    /// 404 and a literal `null` body both map to `Ok(None)`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, ObservationsError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.send_with_retry(&url).await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            info!("Resource not found (404) at {}", url);
            return Ok(None);
        }

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ObservationsError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ObservationsError::NetworkRequest(url, e)
                });
            }
        };

        response
            .json::<Option<T>>()
            .await
            .map_err(|e| ObservationsError::BodyDecode(url, e))
    }

    /// Sends the request, retrying per the policy. The final response is
    /// returned as-is; status classification happens in the caller.
    async fn send_with_retry(&self, url: &str) -> Result<reqwest::Response, ObservationsError> {
        let mut attempt = 0;
        loop {
            if attempt > 0 {
                let delay = self.retry.delay_for_attempt(attempt - 1);
                info!(
                    "Retrying request to {} (attempt {} of {}) after {:?}",
                    url, attempt, self.retry.max_retries, delay
                );
                tokio::time::sleep(delay).await;
            }

            match self.http.get(url).send().await {
                Ok(response) => {
                    if is_retryable_status(response.status()) && attempt < self.retry.max_retries {
                        warn!(
                            "Upstream returned {} for {}, will retry",
                            response.status(),
                            url
                        );
                        attempt += 1;
                        continue;
                    }
                    return Ok(response);
                }
                Err(e) => {
                    if !is_retryable_error(&e) || attempt >= self.retry.max_retries {
                        return Err(ObservationsError::NetworkRequest(url.to_string(), e));
                    }
                    warn!("Request to {} failed ({}), will retry", url, e);
                    attempt += 1;
                }
            }
        }
    }
}
