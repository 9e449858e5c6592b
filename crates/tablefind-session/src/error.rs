use std::path::PathBuf;

use tablefind_provider::ProviderError;
use thiserror::Error;

/// Failures of the durable key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value for '{key}' could not be encoded: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Which provider call a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Search,
    Detail,
}

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::Search => write!(f, "search"),
            Lookup::Detail => write!(f, "detail"),
        }
    }
}

/// Conditions reported by search, selection, and favorites operations.
///
/// None of these are fatal; the state they guard is left as it was.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Transport or non-2xx failure from a search or detail provider.
    #[error("restaurant {lookup} provider unavailable: {source}")]
    ProviderUnavailable {
        lookup: Lookup,
        #[source]
        source: ProviderError,
    },

    /// The detail provider answered without a usable record.
    #[error("no restaurant details found for '{key}'")]
    DetailNotFound { key: String },

    /// A durable write failed; the in-memory state was not changed.
    #[error("favorites could not be saved: {0}")]
    StorageUnavailable(#[from] StorageError),
}

impl SessionError {
    /// Short, retry-oriented message suitable for showing to a user.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::ProviderUnavailable {
                lookup: Lookup::Search,
                ..
            } => "Failed to fetch restaurants. Please try again.",
            SessionError::ProviderUnavailable {
                lookup: Lookup::Detail,
                ..
            }
            | SessionError::DetailNotFound { .. } => {
                "Failed to fetch restaurant details. Please try again."
            }
            SessionError::StorageUnavailable(_) => {
                "Could not save your favorites. Please try again."
            }
        }
    }
}
