//! Error handling for foxmarks

use thiserror::Error;

/// Main error type for foxmarks operations
#[derive(Error, Debug)]
pub enum FoxmarksError {
    #[error("Bookmark database not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for foxmarks operations
pub type Result<T> = std::result::Result<T, FoxmarksError>;
