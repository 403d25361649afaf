use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse station dataset")]
    Parse(#[from] serde_json::Error),
}
