//! Search session state: the last submitted criteria and the canonical
//! results they produced.
//!
//! Submissions follow the same ticket discipline as detail fetches: a
//! response only lands if it belongs to the most recent submission.

use serde_json::Value;
use tablefind_core::{filter_restaurants, CanonicalRestaurant, SearchCriteria};
use tablefind_provider::{normalize_results, ProviderError, SearchProvider, SearchQuery};

use crate::error::{Lookup, SessionError, StorageError};
use crate::storage::KeyValueStore;

/// Storage key for the remembered search form fields.
pub const LAST_SEARCH_KEY: &str = "last_search";

/// Proof that a search was submitted at a particular generation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    generation: u64,
    query: SearchQuery,
}

impl SearchTicket {
    #[must_use]
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

/// Reported condition of a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// New results are in place.
    Loaded { count: usize },
    /// The provider answered with nothing usable; results are now empty.
    NoResults,
    /// A newer submission happened first; nothing changed.
    Superseded,
}

impl SearchOutcome {
    /// Message for the user when the outcome is worth reporting.
    #[must_use]
    pub fn user_message(self) -> Option<&'static str> {
        match self {
            SearchOutcome::NoResults => Some("No restaurants found. Please try a different search."),
            SearchOutcome::Loaded { .. } | SearchOutcome::Superseded => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SearchSession {
    criteria: SearchCriteria,
    results: Vec<CanonicalRestaurant>,
    generation: u64,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from previously remembered criteria with no results.
    #[must_use]
    pub fn with_criteria(criteria: SearchCriteria) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn results(&self) -> &[CanonicalRestaurant] {
        &self.results
    }

    /// The last results narrowed by the current criteria.
    #[must_use]
    pub fn filtered(&self) -> Vec<&CanonicalRestaurant> {
        filter_restaurants(&self.results, &self.criteria)
    }

    /// Finds a record in the last results by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&CanonicalRestaurant> {
        self.results.iter().find(|r| r.id == id)
    }

    /// Records `query` as the current submission and returns its ticket.
    pub fn begin_submit(&mut self, query: SearchQuery) -> SearchTicket {
        self.generation += 1;
        self.criteria = query.criteria.clone();
        SearchTicket {
            generation: self.generation,
            query,
        }
    }

    /// Reconciles a finished search against the current generation.
    ///
    /// A malformed response (body that is not JSON) is treated the same as an
    /// empty one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ProviderUnavailable`] for transport and status
    /// failures of the current submission. Previous results are kept.
    pub fn complete_submit(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Vec<Value>, ProviderError>,
    ) -> Result<SearchOutcome, SessionError> {
        if ticket.generation != self.generation {
            tracing::warn!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale search result"
            );
            return Ok(SearchOutcome::Superseded);
        }

        let raw = match result {
            Ok(raw) => raw,
            Err(e) if e.is_malformed_response() => {
                tracing::warn!(error = %e, "search response was malformed");
                Vec::new()
            }
            Err(source) => {
                tracing::warn!(error = %source, "search failed; keeping previous results");
                return Err(SessionError::ProviderUnavailable {
                    lookup: Lookup::Search,
                    source,
                });
            }
        };

        self.results = normalize_results(&raw);
        if self.results.is_empty() {
            tracing::info!("search returned no usable results");
            return Ok(SearchOutcome::NoResults);
        }
        tracing::info!(count = self.results.len(), "search results loaded");
        Ok(SearchOutcome::Loaded {
            count: self.results.len(),
        })
    }

    /// Runs `query` against `provider` and stores the outcome.
    ///
    /// # Errors
    ///
    /// As [`SearchSession::complete_submit`].
    pub async fn submit<P: SearchProvider>(
        &mut self,
        provider: &P,
        query: SearchQuery,
    ) -> Result<SearchOutcome, SessionError> {
        let ticket = self.begin_submit(query);
        let result = provider.search(ticket.query()).await;
        self.complete_submit(&ticket, result)
    }
}

/// Persists the search form fields for the next session.
///
/// # Errors
///
/// Returns [`StorageError`] if the criteria cannot be encoded or written.
pub fn remember_criteria<S: KeyValueStore>(
    storage: &S,
    criteria: &SearchCriteria,
) -> Result<(), StorageError> {
    let encoded = serde_json::to_string(criteria).map_err(|e| StorageError::Encode {
        key: LAST_SEARCH_KEY.to_string(),
        source: e,
    })?;
    storage.set(LAST_SEARCH_KEY, &encoded)
}

/// Loads remembered search fields. Anything unreadable is treated as absent.
#[must_use]
pub fn recall_criteria<S: KeyValueStore>(storage: &S) -> Option<SearchCriteria> {
    let text = match storage.get(LAST_SEARCH_KEY) {
        Ok(text) => text?,
        Err(e) => {
            tracing::warn!(error = %e, "could not read remembered search");
            return None;
        }
    };
    serde_json::from_str(&text)
        .map_err(|e| tracing::warn!(error = %e, "remembered search is corrupt"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;
    use tablefind_core::Cuisine;

    struct FixedSearch(Vec<Value>);

    impl SearchProvider for FixedSearch {
        async fn search(&self, _query: &SearchQuery) -> Result<Vec<Value>, ProviderError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSearch;

    impl SearchProvider for FailingSearch {
        async fn search(&self, _query: &SearchQuery) -> Result<Vec<Value>, ProviderError> {
            Err(ProviderError::RateLimited {
                host: "example.test".to_owned(),
                retry_after_secs: 1,
            })
        }
    }

    struct MalformedSearch;

    impl SearchProvider for MalformedSearch {
        async fn search(&self, _query: &SearchQuery) -> Result<Vec<Value>, ProviderError> {
            let source = serde_json::from_str::<Value>("<html>").unwrap_err();
            Err(ProviderError::Deserialize {
                context: "https://example.test/search".to_owned(),
                source,
            })
        }
    }

    fn casablanca_criteria() -> SearchCriteria {
        SearchCriteria {
            name: String::new(),
            location: "casa".to_owned(),
            food_type: String::new(),
            cuisine: Some(Cuisine::Other),
        }
    }

    fn tagine_palace() -> Value {
        json!({"place_id": "p1", "name": "Tagine Palace", "location": "Casablanca", "cuisine": "moroccan"})
    }

    #[tokio::test]
    async fn successful_search_normalizes_and_filters() {
        let mut session = SearchSession::new();
        let provider = FixedSearch(vec![tagine_palace(), json!({"name": "no id"})]);

        let outcome = session
            .submit(&provider, SearchQuery::new(casablanca_criteria()))
            .await
            .unwrap();

        assert_eq!(outcome, SearchOutcome::Loaded { count: 1 });
        let filtered = session.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "p1");
        assert_eq!(session.criteria(), &casablanca_criteria());
    }

    #[tokio::test]
    async fn empty_results_clear_previous_set() {
        let mut session = SearchSession::new();
        session
            .submit(&FixedSearch(vec![tagine_palace()]), SearchQuery::default())
            .await
            .unwrap();

        let outcome = session
            .submit(&FixedSearch(Vec::new()), SearchQuery::default())
            .await
            .unwrap();

        assert_eq!(outcome, SearchOutcome::NoResults);
        assert!(session.results().is_empty());
        assert!(outcome.user_message().is_some());
    }

    #[tokio::test]
    async fn only_unusable_records_is_no_results() {
        let mut session = SearchSession::new();
        let outcome = session
            .submit(&FixedSearch(vec![json!({"name": "nameless id"})]), SearchQuery::default())
            .await
            .unwrap();
        assert_eq!(outcome, SearchOutcome::NoResults);
    }

    #[tokio::test]
    async fn malformed_response_is_no_results() {
        let mut session = SearchSession::new();
        session
            .submit(&FixedSearch(vec![tagine_palace()]), SearchQuery::default())
            .await
            .unwrap();

        let outcome = session
            .submit(&MalformedSearch, SearchQuery::default())
            .await
            .unwrap();
        assert_eq!(outcome, SearchOutcome::NoResults);
        assert!(session.results().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_keeps_previous_results() {
        let mut session = SearchSession::new();
        session
            .submit(&FixedSearch(vec![tagine_palace()]), SearchQuery::default())
            .await
            .unwrap();

        let err = session
            .submit(&FailingSearch, SearchQuery::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::ProviderUnavailable {
                lookup: Lookup::Search,
                ..
            }
        ));
        assert_eq!(err.user_message(), "Failed to fetch restaurants. Please try again.");
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn late_response_does_not_overwrite_newer_submission() {
        let mut session = SearchSession::new();
        let older = session.begin_submit(SearchQuery::default());
        let newer = session.begin_submit(SearchQuery::new(casablanca_criteria()));

        let landed = session
            .complete_submit(&newer, Ok(vec![tagine_palace()]))
            .unwrap();
        let late = session
            .complete_submit(&older, Ok(Vec::new()))
            .unwrap();

        assert_eq!(landed, SearchOutcome::Loaded { count: 1 });
        assert_eq!(late, SearchOutcome::Superseded);
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.criteria(), &casablanca_criteria());
    }

    #[test]
    fn both_shapes_resolve_name() {
        let mut session = SearchSession::new();
        let ticket = session.begin_submit(SearchQuery::default());
        session
            .complete_submit(
                &ticket,
                Ok(vec![
                    json!({"place_id": "p1", "name": "Tagine Palace"}),
                    json!({"_id": "r1", "restaurant_name": "Pasta Nova"}),
                ]),
            )
            .unwrap();

        let names: Vec<&str> = session.results().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Tagine Palace", "Pasta Nova"]);
        assert_eq!(session.find("r1").unwrap().name, "Pasta Nova");
    }

    #[test]
    fn remembered_criteria_round_trip() {
        let storage = MemoryStore::new();
        assert!(recall_criteria(&storage).is_none());

        remember_criteria(&storage, &casablanca_criteria()).unwrap();
        assert_eq!(recall_criteria(&storage), Some(casablanca_criteria()));

        storage.set(LAST_SEARCH_KEY, "not json").unwrap();
        assert!(recall_criteria(&storage).is_none());
    }
}
