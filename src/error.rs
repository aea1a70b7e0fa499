//! Error types for advanced-maps

use thiserror::Error;

/// Main error type for advanced-maps operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Search gateway error: {0}")]
    Gateway(String),

    #[error("Routing error: {0}")]
    Routing(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for advanced-maps operations
pub type Result<T> = std::result::Result<T, Error>;
