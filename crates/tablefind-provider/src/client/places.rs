//! Place-search provider (`/api/places/search`, `/api/place/detail`).

use crate::envelope::{result_array, result_object};
use crate::error::ProviderError;
use crate::provider::{DetailProvider, SearchProvider, SearchQuery};

use super::{ClientSettings, Transport};

const SEARCH_PATH: &str = "api/places/search";
const DETAIL_PATH: &str = "api/place/detail";

/// Client for the place-search API.
///
/// All non-empty criteria fields are joined into one free-text `query`.
pub struct PlaceSearchClient {
    transport: Transport,
}

impl PlaceSearchClient {
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
        let mut params = vec![("query", query.criteria.query_terms().join(" "))];
        if let Some(coords) = query.coordinates {
            params.push(("lat", coords.latitude.to_string()));
            params.push(("lng", coords.longitude.to_string()));
        }
        params
    }
}

impl SearchProvider for PlaceSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<serde_json::Value>, ProviderError> {
        let params = Self::search_params(query);
        let borrowed: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let url = self.transport.build_url(SEARCH_PATH, &borrowed)?;

        tracing::debug!(path = SEARCH_PATH, "searching places");
        let body = self.transport.get_json(url).await?;
        let results = result_array(&body, &["results"]);
        tracing::debug!(count = results.len(), "place search returned");
        Ok(results)
    }
}

impl DetailProvider for PlaceSearchClient {
    async fn detail(&self, key: &str) -> Result<Option<serde_json::Value>, ProviderError> {
        let url = self.transport.build_url(DETAIL_PATH, &[("place", key)])?;
        let body = self.transport.get_json(url).await?;
        Ok(result_object(&body, &["result", "place"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablefind_core::{Cuisine, SearchCriteria};

    #[test]
    fn search_params_join_non_empty_fields() {
        let query = SearchQuery::new(SearchCriteria {
            name: "tagine".to_owned(),
            location: "Casablanca".to_owned(),
            food_type: String::new(),
            cuisine: Some(Cuisine::Moroccan),
        });
        let params = PlaceSearchClient::search_params(&query);
        assert_eq!(params, vec![("query", "tagine Casablanca moroccan".to_owned())]);
    }

    #[test]
    fn search_params_include_coordinates() {
        let query = SearchQuery::new(SearchCriteria::default()).with_coordinates(33.57, -7.59);
        let params = PlaceSearchClient::search_params(&query);
        assert_eq!(params[1], ("lat", "33.57".to_owned()));
        assert_eq!(params[2], ("lng", "-7.59".to_owned()));
    }
}
