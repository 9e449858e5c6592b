use thiserror::Error;

/// Errors returned by the upstream search and detail clients.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {host} (retry after {retry_after_secs}s)")]
    RateLimited { host: String, retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body was not JSON at all.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid provider base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ProviderError {
    /// `true` when the provider answered but the payload was unreadable.
    ///
    /// Search sessions report this as "no results" rather than as an outage.
    #[must_use]
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, ProviderError::Deserialize { .. })
    }
}
