//! Error types for CareMap

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CareMapError {
    // Query parameter errors
    #[error("Invalid coordinate ({lat}, {lon}): latitude must be in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("Invalid radius {radius_km} km: must be a finite, non-negative number")]
    InvalidRadius { radius_km: f64 },

    #[error("Unknown entity kind: {kind}. Use coordinator, worker, customer, or lab")]
    UnknownEntityKind { kind: String },

    #[error("Unknown lab service: {service}")]
    UnknownLabService { service: String },

    // Session errors
    #[error("No dataset generated yet. Call initialize() first")]
    NotInitialized,

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CareMapError {
    fn from(err: serde_json::Error) -> Self {
        CareMapError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CareMapError>;
