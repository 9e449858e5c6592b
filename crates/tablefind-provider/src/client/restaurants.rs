//! Restaurant-search provider (`/search`, `/restaurant`).

use crate::envelope::{result_array, result_object};
use crate::error::ProviderError;
use crate::provider::{DetailProvider, SearchProvider, SearchQuery};

use super::{ClientSettings, Transport};

const SEARCH_PATH: &str = "search";
const DETAIL_PATH: &str = "restaurant";

/// Client for the restaurant-search API.
///
/// Location travels separately from the text query, as free text, explicit
/// coordinates, or both.
pub struct RestaurantSearchClient {
    transport: Transport,
}

impl RestaurantSearchClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built or
    /// [`ProviderError::InvalidBaseUrl`] if the base URL is malformed.
    pub fn new(settings: &ClientSettings) -> Result<Self, ProviderError> {
        Ok(Self {
            transport: Transport::new(settings)?,
        })
    }

    fn search_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
        let criteria = &query.criteria;
        let text: Vec<&str> = [criteria.name.trim(), criteria.food_type.trim()]
            .into_iter()
            .chain(
                criteria
                    .cuisine
                    .filter(|c| !c.is_match_all())
                    .map(tablefind_core::Cuisine::as_str),
            )
            .filter(|s| !s.is_empty())
            .collect();

        let mut params = Vec::new();
        if !text.is_empty() {
            params.push(("query", text.join(" ")));
        }
        if let Some(coords) = query.coordinates {
            params.push(("latitude", coords.latitude.to_string()));
            params.push(("longitude", coords.longitude.to_string()));
        }
        if !criteria.location.trim().is_empty() {
            params.push(("location", criteria.location.trim().to_string()));
        }
        params
    }
}

impl SearchProvider for RestaurantSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<serde_json::Value>, ProviderError> {
        let params = Self::search_params(query);
        let borrowed: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let url = self.transport.build_url(SEARCH_PATH, &borrowed)?;

        tracing::debug!(path = SEARCH_PATH, "searching restaurants");
        let body = self.transport.get_json(url).await?;
        let results = result_array(&body, &["restaurants", "results"]);
        tracing::debug!(count = results.len(), "restaurant search returned");
        Ok(results)
    }
}

impl DetailProvider for RestaurantSearchClient {
    async fn detail(&self, key: &str) -> Result<Option<serde_json::Value>, ProviderError> {
        let url = self.transport.build_url(DETAIL_PATH, &[("id", key)])?;
        let body = self.transport.get_json(url).await?;
        Ok(result_object(&body, &["restaurant", "result"]))
    }
}
