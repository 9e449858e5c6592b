//! HTTP clients for the upstream restaurant providers.
//!
//! Both providers sit behind `RapidAPI`, so they share one transport that
//! owns the `reqwest::Client`, the credential headers, status handling, and
//! retry policy. The provider modules only decide paths, query parameters,
//! and which envelope keys hold the results.

mod places;
mod restaurants;

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ProviderError;
use crate::retry::retry_with_backoff;

pub use places::PlaceSearchClient;
pub use restaurants::RestaurantSearchClient;

/// Connection settings shared by every provider client.
///
/// The API key is supplied here at construction and never read from
/// process-wide state.
#[derive(Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub api_key: String,
    pub api_host: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first failure for transient errors.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .field("api_host", &self.api_host)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .finish()
    }
}

impl ClientSettings {
    /// Builds settings from application config and an explicit API key.
    #[must_use]
    pub fn from_config(config: &tablefind_core::AppConfig, api_key: &str) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: api_key.to_owned(),
            api_host: config.api_host.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
        }
    }
}

/// Shared `RapidAPI` transport.
pub(crate) struct Transport {
    client: Client,
    base_url: Url,
    api_key: String,
    api_host: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl Transport {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
    pub(crate) fn new(settings: &ClientSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&settings.user_agent)
            .build()?;

        // Ensure exactly one trailing slash so `Url::join` appends to the
        // base path instead of replacing its last segment.
        let normalised = format!("{}/", settings.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ProviderError::InvalidBaseUrl {
            base_url: settings.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_key: settings.api_key.clone(),
            api_host: settings.api_host.clone(),
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    /// Builds the request URL for `path` with percent-encoded `params`.
    pub(crate) fn build_url(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, ProviderError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ProviderError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join path '{path}': {e}"),
            })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends an authenticated GET with retry and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::RateLimited`]: HTTP 429 after all retries.
    /// - [`ProviderError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ProviderError::Http`]: network or TLS failure after all retries.
    /// - [`ProviderError::Deserialize`]: body is not JSON (not retried).
    pub(crate) async fn get_json(&self, url: Url) -> Result<serde_json::Value, ProviderError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header("X-RapidAPI-Key", &self.api_key)
                    .header("X-RapidAPI-Host", &self.api_host)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(1);
                    return Err(ProviderError::RateLimited {
                        host: self.api_host.clone(),
                        retry_after_secs,
                    });
                }

                if !status.is_success() {
                    return Err(ProviderError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: redact_url(&url),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|e| ProviderError::Deserialize {
                    context: redact_url(&url),
                    source: e,
                })
            }
        })
        .await
    }
}

/// URL without its query string, safe to put in logs and error messages.
fn redact_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
