//! One user's session: the single owner of every piece of mutable state.

use tablefind_core::{CanonicalRestaurant, SearchCriteria};
use tablefind_provider::{DetailProvider, SearchProvider, SearchQuery};

use crate::error::SessionError;
use crate::favorites::{FavoriteSet, FavoritesStore};
use crate::images::ImageFallbacks;
use crate::search::{recall_criteria, remember_criteria, SearchOutcome, SearchSession};
use crate::selection::{DetailOutcome, Selection, SelectionCoordinator};
use crate::storage::KeyValueStore;

#[derive(Debug)]
pub struct Session<S> {
    storage: S,
    remember_search: bool,
    search: SearchSession,
    favorites: FavoritesStore<S>,
    selection: SelectionCoordinator,
    images: ImageFallbacks,
}

impl<S: KeyValueStore + Clone> Session<S> {
    /// Hydrates favorites and, when `remember_search` is set, the last
    /// submitted criteria.
    pub fn start(storage: S, remember_search: bool) -> Self {
        let criteria = if remember_search {
            recall_criteria(&storage).unwrap_or_default()
        } else {
            SearchCriteria::default()
        };
        Self {
            favorites: FavoritesStore::hydrate(storage.clone()),
            storage,
            remember_search,
            search: SearchSession::with_criteria(criteria),
            selection: SelectionCoordinator::new(),
            images: ImageFallbacks::new(),
        }
    }

    /// Criteria of the last submission, or remembered ones at start-up.
    #[must_use]
    pub fn criteria(&self) -> &SearchCriteria {
        self.search.criteria()
    }

    /// Submits a search. The criteria are remembered first when enabled; a
    /// failure to remember them is logged and does not block the search.
    ///
    /// # Errors
    ///
    /// See [`SearchSession::complete_submit`].
    pub async fn submit<P: SearchProvider>(
        &mut self,
        provider: &P,
        query: SearchQuery,
    ) -> Result<SearchOutcome, SessionError> {
        if self.remember_search {
            if let Err(e) = remember_criteria(&self.storage, &query.criteria) {
                tracing::warn!(error = %e, "could not remember search fields");
            }
        }
        self.search.submit(provider, query).await
    }

    /// Last results, narrowed by the current criteria.
    #[must_use]
    pub fn visible_results(&self) -> Vec<&CanonicalRestaurant> {
        self.search.filtered()
    }

    #[must_use]
    pub fn results(&self) -> &[CanonicalRestaurant] {
        self.search.results()
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoriteSet {
        self.favorites.favorites()
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    /// # Errors
    ///
    /// Returns [`SessionError::StorageUnavailable`] when the write fails.
    pub fn toggle_favorite(
        &mut self,
        record: &CanonicalRestaurant,
    ) -> Result<&FavoriteSet, SessionError> {
        self.favorites.toggle(record)
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        self.selection.state()
    }

    pub fn open(&mut self, record: CanonicalRestaurant) {
        self.selection.select(record);
    }

    pub fn close(&mut self) {
        self.selection.close();
    }

    /// Opens a record by key through a detail fetch.
    ///
    /// # Errors
    ///
    /// See [`SelectionCoordinator::complete_detail`].
    pub async fn open_with_detail<P: DetailProvider>(
        &mut self,
        provider: &P,
        key: &str,
    ) -> Result<DetailOutcome, SessionError> {
        self.selection.select_with_detail_fetch(provider, key).await
    }

    /// Marks the image for `id` as broken for the rest of the session.
    pub fn report_image_failure(&mut self, id: &str) -> bool {
        self.images.report_failure(id)
    }

    #[must_use]
    pub fn image_url<'a>(&self, record: &'a CanonicalRestaurant) -> &'a str {
        self.images.image_url(record)
    }
}
