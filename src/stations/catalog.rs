use crate::stations::error::CatalogError;
use crate::types::station::Station;

const BUNDLED_STATIONS: &str = include_str!("../../data/stations.json");

/// Read-only set of stations available to suggestion queries.
///
/// The catalog is loaded once at client construction and never mutated;
/// iteration order is the declaration order of the dataset, which doubles
/// as the tie-break order when scores are equal.
#[derive(Debug, Clone)]
pub struct StationCatalog {
    stations: Vec<Station>,
}

impl StationCatalog {
    /// Loads the station dataset bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the bundled dataset is malformed,
    /// which would indicate a broken build rather than a runtime condition.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_STATIONS)
    }

    /// Parses a catalog from a JSON array of station records.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if `json` is not a valid array of
    /// stations.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let stations = serde_json::from_str::<Vec<Station>>(json)?;
        Ok(Self::from_stations(stations))
    }

    /// Builds a catalog from an in-memory station list, preserving its
    /// order.
    pub fn from_stations(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
