//! Collaborator contracts for upstream search and detail lookups.
//!
//! Providers return raw provider-shaped JSON objects; turning them into
//! [`tablefind_core::CanonicalRestaurant`] is the normalizer's job, so a new
//! provider only has to fetch.

use std::future::Future;

use tablefind_core::SearchCriteria;

use crate::error::ProviderError;

/// Explicit coordinates for providers that search around a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One search request. Each provider decides how to turn the criteria into
/// its own query parameters; only non-empty fields are ever sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub criteria: SearchCriteria,
    pub coordinates: Option<Coordinates>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(criteria: SearchCriteria) -> Self {
        Self {
            criteria,
            coordinates: None,
        }
    }

    #[must_use]
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates {
            latitude,
            longitude,
        });
        self
    }
}

pub trait SearchProvider {
    /// Runs a search and returns the provider's raw result objects.
    ///
    /// A response without a recognisable result list yields `Ok(vec![])`.
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<serde_json::Value>, ProviderError>> + Send;
}

pub trait DetailProvider {
    /// Fetches one raw restaurant object by provider key.
    ///
    /// Returns `Ok(None)` when the provider answers without a record.
    fn detail(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, ProviderError>> + Send;
}
