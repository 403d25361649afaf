mod activity;
mod cache;
mod error;
mod metrics;
mod observations;
mod stationcast;
mod stations;
mod types;
mod weather;

pub use error::StationcastError;
pub use stationcast::*;

pub use activity::messages::activity_message;
pub use activity::scorer::{fallback_ranking, score_activities};
pub use cache::TtlCache;
pub use metrics::{
    InMemoryMetrics, MetricsSink, NoopMetrics, Operation, OperationSummary, TimingRecord,
};
pub use observations::client::{ObservationsClient, RetryPolicy};
pub use observations::error::ObservationsError;
pub use stations::catalog::StationCatalog;
pub use stations::cursor::{decode_cursor, encode_cursor};
pub use stations::error::CatalogError;
pub use stations::score::{normalize, score_station};
pub use stations::suggest::{SuggestEngine, DEFAULT_SUGGESTION_LIMIT};
pub use types::activity::{Activity, ActivityScore};
pub use types::page::SuggestPage;
pub use types::sensor::{PeriodUnit, SensorKind, SensorReading, TimeSeriesPeriod};
pub use types::station::{ScoredStation, Station, StationDetails, StationTimezone};
pub use types::weather::{WeatherFailure, WeatherResult, WeatherSnapshot};
pub use weather::service::WeatherService;
