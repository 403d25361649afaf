use thiserror::Error;

/// Errors raised while talking to the observations API.
#[derive(Debug, Error)]
pub enum ObservationsError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode response body from {0}")]
    BodyDecode(String, #[source] reqwest::Error),

    #[error("Station {station_id} not found (no data returned from observations API)")]
    StationNotFound { station_id: String },
}
