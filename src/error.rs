//! Error types for the map pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for pipeline operations.
pub type MapResult<T> = Result<T, MapError>;

/// Errors from fetching, parsing, rendering, or writing the map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to parse GeoJSON from {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render map template: {0}")]
    Template(#[from] askama::Error),

    #[error("Could not open viewer: {0}")]
    Viewer(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MapError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MapError::Io {
            path: path.into(),
            source,
        }
    }
}
