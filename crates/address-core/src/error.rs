//! Error types for address extraction

use thiserror::Error;

/// Main error type for all extraction operations
#[derive(Error, Debug)]
pub enum AddressError {
    #[error("Insufficient input: found {found} non-empty lines, at least {required} required")]
    InsufficientInput { found: usize, required: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Country index error: {0}")]
    Index(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, AddressError>;
