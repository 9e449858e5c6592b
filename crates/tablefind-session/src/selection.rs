//! Which record is being inspected, and reconciliation of detail fetches.
//!
//! Every `select`, `close`, and detail request bumps a generation counter.
//! A detail fetch carries the generation it was started at in a
//! [`DetailTicket`]; when it completes, the result only lands if no newer
//! gesture has happened since. The last requester wins, never the first
//! responder.

use serde_json::Value;
use tablefind_core::CanonicalRestaurant;
use tablefind_provider::{normalize_restaurant, DetailProvider, ProviderError};

use crate::error::{Lookup, SessionError};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    Closed,
    Open(CanonicalRestaurant),
}

impl Selection {
    #[must_use]
    pub fn record(&self) -> Option<&CanonicalRestaurant> {
        match self {
            Selection::Closed => None,
            Selection::Open(record) => Some(record),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Selection::Open(_))
    }
}

/// Proof that a detail fetch was requested at a particular generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    key: String,
}

impl DetailTicket {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// What happened to a completed detail fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    /// The enriched record is now the selection.
    Opened,
    /// A newer gesture happened first; the result was discarded.
    Superseded,
}

#[derive(Debug, Default)]
pub struct SelectionCoordinator {
    state: Selection,
    generation: u64,
}

impl SelectionCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &Selection {
        &self.state
    }

    #[must_use]
    pub fn selected(&self) -> Option<&CanonicalRestaurant> {
        self.state.record()
    }

    /// Opens `record`, replacing any current selection and superseding any
    /// in-flight detail fetch.
    pub fn select(&mut self, record: CanonicalRestaurant) {
        self.generation += 1;
        self.state = Selection::Open(record);
    }

    /// Returns to `Closed`. Also supersedes any in-flight detail fetch.
    pub fn close(&mut self) {
        self.generation += 1;
        self.state = Selection::Closed;
    }

    /// Starts a detail fetch for `key`. Only the most recent ticket can land.
    pub fn begin_detail(&mut self, key: &str) -> DetailTicket {
        self.generation += 1;
        DetailTicket {
            generation: self.generation,
            key: key.to_string(),
        }
    }

    /// Reconciles a finished detail fetch against the current generation.
    ///
    /// A stale ticket is always `Ok(Superseded)`, even if its fetch failed.
    ///
    /// # Errors
    ///
    /// For a current ticket: [`SessionError::ProviderUnavailable`] when the
    /// fetch failed and [`SessionError::DetailNotFound`] when it returned no
    /// usable record. The selection is left as it was in both cases.
    pub fn complete_detail(
        &mut self,
        ticket: &DetailTicket,
        result: Result<Option<Value>, ProviderError>,
    ) -> Result<DetailOutcome, SessionError> {
        if ticket.generation != self.generation {
            tracing::debug!(key = %ticket.key, "discarding stale detail result");
            return Ok(DetailOutcome::Superseded);
        }

        let raw = result.map_err(|source| {
            tracing::warn!(key = %ticket.key, error = %source, "detail fetch failed");
            SessionError::ProviderUnavailable {
                lookup: Lookup::Detail,
                source,
            }
        })?;

        let record = raw
            .as_ref()
            .and_then(normalize_restaurant)
            .ok_or_else(|| SessionError::DetailNotFound {
                key: ticket.key.clone(),
            })?;

        self.state = Selection::Open(record);
        Ok(DetailOutcome::Opened)
    }

    /// Fetches the detail for `key` from `provider` and opens it.
    ///
    /// # Errors
    ///
    /// As [`SelectionCoordinator::complete_detail`].
    pub async fn select_with_detail_fetch<P: DetailProvider>(
        &mut self,
        provider: &P,
        key: &str,
    ) -> Result<DetailOutcome, SessionError> {
        let ticket = self.begin_detail(key);
        let result = provider.detail(key).await;
        self.complete_detail(&ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(id: &str, name: &str) -> Value {
        json!({"place_id": id, "name": name, "location": "Casablanca"})
    }

    fn normalized(id: &str, name: &str) -> CanonicalRestaurant {
        normalize_restaurant(&raw(id, name)).unwrap()
    }

    struct FixedDetail(Option<Value>);

    impl DetailProvider for FixedDetail {
        async fn detail(&self, _key: &str) -> Result<Option<Value>, ProviderError> {
            Ok(self.0.clone())
        }
    }

    struct FailingDetail;

    impl DetailProvider for FailingDetail {
        async fn detail(&self, _key: &str) -> Result<Option<Value>, ProviderError> {
            Err(ProviderError::UnexpectedStatus {
                status: 503,
                url: "https://example.test/api/place/detail".to_owned(),
            })
        }
    }

    #[test]
    fn select_replaces_without_close() {
        let mut coord = SelectionCoordinator::new();
        coord.select(normalized("a", "A"));
        coord.select(normalized("b", "B"));
        assert_eq!(coord.selected().unwrap().id, "b");
    }

    #[test]
    fn close_is_idempotent() {
        let mut coord = SelectionCoordinator::new();
        coord.close();
        coord.select(normalized("a", "A"));
        coord.close();
        coord.close();
        assert_eq!(coord.state(), &Selection::Closed);
    }

    #[test]
    fn late_detail_for_a_does_not_revert_newer_selection_b() {
        let mut coord = SelectionCoordinator::new();
        let ticket_a = coord.begin_detail("a");
        coord.select(normalized("b", "B"));

        let outcome = coord
            .complete_detail(&ticket_a, Ok(Some(raw("a", "A"))))
            .unwrap();
        assert_eq!(outcome, DetailOutcome::Superseded);
        assert_eq!(coord.selected().unwrap().id, "b");
    }

    #[test]
    fn out_of_order_detail_fetches_keep_last_requested() {
        let mut coord = SelectionCoordinator::new();
        let ticket_a = coord.begin_detail("a");
        let ticket_b = coord.begin_detail("b");

        let b = coord
            .complete_detail(&ticket_b, Ok(Some(raw("b", "B"))))
            .unwrap();
        let a = coord
            .complete_detail(&ticket_a, Ok(Some(raw("a", "A"))))
            .unwrap();

        assert_eq!(b, DetailOutcome::Opened);
        assert_eq!(a, DetailOutcome::Superseded);
        assert_eq!(coord.selected().unwrap().name, "B");
    }

    #[test]
    fn stale_failure_is_not_reported() {
        let mut coord = SelectionCoordinator::new();
        let ticket = coord.begin_detail("a");
        coord.close();
        let outcome = coord
            .complete_detail(
                &ticket,
                Err(ProviderError::UnexpectedStatus {
                    status: 500,
                    url: "https://example.test/".to_owned(),
                }),
            )
            .unwrap();
        assert_eq!(outcome, DetailOutcome::Superseded);
    }

    #[test]
    fn close_supersedes_in_flight_fetch() {
        let mut coord = SelectionCoordinator::new();
        let ticket = coord.begin_detail("a");
        coord.close();
        coord
            .complete_detail(&ticket, Ok(Some(raw("a", "A"))))
            .unwrap();
        assert!(!coord.state().is_open());
    }

    /// Detail provider that answers after a per-key delay.
    struct DelayedDetail;

    impl DetailProvider for DelayedDetail {
        async fn detail(&self, key: &str) -> Result<Option<Value>, ProviderError> {
            let delay = if key == "a" { 50 } else { 5 };
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
            Ok(Some(raw(key, &key.to_uppercase())))
        }
    }

    #[tokio::test]
    async fn concurrent_fetches_land_for_latest_request_only() {
        let mut coord = SelectionCoordinator::new();
        let provider = DelayedDetail;

        let ticket_a = coord.begin_detail("a");
        let ticket_b = coord.begin_detail("b");
        let (a, b) = futures::join!(provider.detail("a"), provider.detail("b"));

        // b resolved first, a arrives late.
        assert_eq!(coord.complete_detail(&ticket_b, b).unwrap(), DetailOutcome::Opened);
        assert_eq!(
            coord.complete_detail(&ticket_a, a).unwrap(),
            DetailOutcome::Superseded
        );
        assert_eq!(coord.selected().unwrap().id, "b");
    }

    #[tokio::test]
    async fn detail_fetch_opens_enriched_record() {
        let mut coord = SelectionCoordinator::new();
        let provider = FixedDetail(Some(json!({
            "place_id": "p1",
            "name": "Tagine Palace",
            "phone_number": "+212 522 000000"
        })));

        let outcome = coord.select_with_detail_fetch(&provider, "p1").await.unwrap();
        assert_eq!(outcome, DetailOutcome::Opened);
        let selected = coord.selected().unwrap();
        assert_eq!(selected.phone.as_deref(), Some("+212 522 000000"));
    }

    #[tokio::test]
    async fn failed_detail_fetch_keeps_prior_state() {
        let mut coord = SelectionCoordinator::new();
        coord.select(normalized("a", "A"));

        let err = coord
            .select_with_detail_fetch(&FailingDetail, "b")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::ProviderUnavailable {
                lookup: Lookup::Detail,
                ..
            }
        ));
        assert_eq!(coord.selected().unwrap().id, "a");
    }

    #[tokio::test]
    async fn empty_detail_is_not_found() {
        let mut coord = SelectionCoordinator::new();
        let err = coord
            .select_with_detail_fetch(&FixedDetail(None), "p9")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::DetailNotFound { ref key } if key == "p9"));
        assert_eq!(coord.state(), &Selection::Closed);

        let err = coord
            .select_with_detail_fetch(&FixedDetail(Some(json!({"name": "No id"}))), "p9")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::DetailNotFound { .. }));
    }
}
