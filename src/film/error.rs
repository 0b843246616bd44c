//! Film loading errors.

use std::path::PathBuf;

/// Errors that can occur while loading a film document.
#[derive(Debug, thiserror::Error)]
pub enum FilmLoadError {
    #[error("Film data not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server answered {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid film data in {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid film location '{0}'")]
    InvalidLocation(String),
}

impl FilmLoadError {
    /// Whether trying again could succeed (network or transient I/O).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Status { .. } | Self::Read { .. } | Self::NotFound { .. }
        )
    }
}
