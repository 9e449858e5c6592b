//! The configured provider client behind one type.

use serde_json::Value;
use tablefind_core::{AppConfig, ConfigError, ProviderKind};
use tablefind_provider::{
    ClientSettings, DetailProvider, PlaceSearchClient, ProviderError, RestaurantSearchClient,
    SearchProvider, SearchQuery,
};

pub(crate) enum Upstream {
    Places(PlaceSearchClient),
    Restaurants(RestaurantSearchClient),
}

impl Upstream {
    /// Builds the client selected by `TABLEFIND_PROVIDER`.
    ///
    /// # Errors
    ///
    /// Returns an error if `TABLEFIND_API_KEY` is unset or the client cannot
    /// be constructed.
    pub(crate) fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("TABLEFIND_API_KEY".to_string()))?;
        let settings = ClientSettings::from_config(config, api_key);
        tracing::debug!(provider = %config.provider, base_url = %settings.base_url, "building provider client");

        Ok(match config.provider {
            ProviderKind::Places => Upstream::Places(PlaceSearchClient::new(&settings)?),
            ProviderKind::Restaurants => {
                Upstream::Restaurants(RestaurantSearchClient::new(&settings)?)
            }
        })
    }
}

impl SearchProvider for Upstream {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Value>, ProviderError> {
        match self {
            Upstream::Places(client) => client.search(query).await,
            Upstream::Restaurants(client) => client.search(query).await,
        }
    }
}

impl DetailProvider for Upstream {
    async fn detail(&self, key: &str) -> Result<Option<Value>, ProviderError> {
        match self {
            Upstream::Places(client) => client.detail(key).await,
            Upstream::Restaurants(client) => client.detail(key).await,
        }
    }
}
