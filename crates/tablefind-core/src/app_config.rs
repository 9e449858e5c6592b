use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which upstream search/detail API the session talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Place-search API keyed by `place_id` (Google Maps scraper on `RapidAPI`).
    Places,
    /// Restaurant-search API keyed by `_id` with structured addresses.
    Restaurants,
}

impl ProviderKind {
    /// `RapidAPI` host used when `TABLEFIND_API_HOST` is not set.
    #[must_use]
    pub fn default_host(self) -> &'static str {
        match self {
            ProviderKind::Places => "google-map-scraper1.p.rapidapi.com",
            ProviderKind::Restaurants => "restaurants-near-me-usa.p.rapidapi.com",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Places => write!(f, "places"),
            ProviderKind::Restaurants => write!(f, "restaurants"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    pub api_host: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub data_dir: PathBuf,
    pub remember_search: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_host", &self.api_host)
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("data_dir", &self.data_dir)
            .field("remember_search", &self.remember_search)
            .finish()
    }
}
