use crate::observations::error::ObservationsError;
use crate::stations::error::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationcastError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Observations(#[from] ObservationsError),
}
