use geoformat_api::{CatalogError, ConfigError, NegotiationError, ResolveError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoformatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Negotiation(#[from] NegotiationError),
    #[error("{0}")]
    Resolve(#[from] ResolveError),
    #[error("{0}")]
    Catalog(#[from] CatalogError),
    #[error("Config file not found: {0}")]
    MissingConfig(String),
}

pub type Result<T> = std::result::Result<T, GeoformatError>;
