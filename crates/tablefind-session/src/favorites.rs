//! The persisted favorites set.
//!
//! Membership is keyed on [`CanonicalRestaurant::id`]. Every toggle is
//! written through to the durable store before the in-memory set changes.

use std::collections::HashSet;

use tablefind_core::CanonicalRestaurant;

use crate::error::{SessionError, StorageError};
use crate::storage::KeyValueStore;

/// Storage key holding the JSON-encoded favorites array.
pub const FAVORITES_KEY: &str = "favorites";

/// Favorited records in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct FavoriteSet {
    entries: Vec<CanonicalRestaurant>,
    ids: HashSet<String>,
}

impl FavoriteSet {
    /// Builds a set from stored records. Records with a blank id and later
    /// duplicates of an id are dropped; a zero price tier is raised to 1.
    #[must_use]
    pub fn from_records(records: Vec<CanonicalRestaurant>) -> Self {
        let mut set = Self::default();
        for mut record in records {
            if record.id.trim().is_empty() {
                tracing::warn!(name = %record.name, "dropping stored favorite without an id");
                continue;
            }
            record.price_tier = record.price_tier.max(1);
            if set.ids.insert(record.id.clone()) {
                set.entries.push(record);
            }
        }
        set
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CanonicalRestaurant> {
        if !self.contains(id) {
            return None;
        }
        self.entries.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalRestaurant> {
        self.entries.iter()
    }

    /// Ids in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|r| r.id.as_str()).collect()
    }

    /// The set that results from toggling `record`, leaving `self` untouched.
    fn toggled(&self, record: &CanonicalRestaurant) -> Self {
        let mut next = self.clone();
        if next.ids.remove(&record.id) {
            next.entries.retain(|r| r.id != record.id);
        } else {
            next.ids.insert(record.id.clone());
            next.entries.push(record.clone());
        }
        next
    }
}

/// Write-through favorites backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct FavoritesStore<S> {
    storage: S,
    set: FavoriteSet,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Loads the favorites once from `storage`.
    ///
    /// An absent key, an unreadable store, or a value that does not decode
    /// all yield an empty set.
    pub fn hydrate(storage: S) -> Self {
        let set = match storage.get(FAVORITES_KEY) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<CanonicalRestaurant>>(&text) {
                Ok(records) => FavoriteSet::from_records(records),
                Err(e) => {
                    tracing::warn!(error = %e, "stored favorites are corrupt; starting empty");
                    FavoriteSet::default()
                }
            },
            Ok(None) => FavoriteSet::default(),
            Err(e) => {
                tracing::warn!(error = %e, "favorites storage unavailable; starting empty");
                FavoriteSet::default()
            }
        };
        tracing::debug!(count = set.len(), "favorites hydrated");
        Self { storage, set }
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoriteSet {
        &self.set
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.set.contains(id)
    }

    /// Adds `record` if its id is absent, removes it otherwise, and persists
    /// the result before returning it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StorageUnavailable`] if the write fails; the
    /// in-memory set is unchanged in that case.
    pub fn toggle(&mut self, record: &CanonicalRestaurant) -> Result<&FavoriteSet, SessionError> {
        let next = self.set.toggled(record);
        let records: Vec<&CanonicalRestaurant> = next.iter().collect();
        let encoded = serde_json::to_string(&records).map_err(|e| StorageError::Encode {
            key: FAVORITES_KEY.to_string(),
            source: e,
        })?;
        self.storage.set(FAVORITES_KEY, &encoded)?;

        tracing::debug!(
            id = %record.id,
            favorite = next.contains(&record.id),
            count = next.len(),
            "favorites updated"
        );
        self.set = next;
        Ok(&self.set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use tablefind_core::{DEFAULT_IMAGE_URL, DEFAULT_PRICE_TIER};

    fn record(id: &str, name: &str) -> CanonicalRestaurant {
        CanonicalRestaurant {
            id: id.to_owned(),
            name: name.to_owned(),
            address: Some("Casablanca".to_owned()),
            primary_image_url: DEFAULT_IMAGE_URL.to_owned(),
            rating: Some(4.5),
            review_count: Some(12),
            price_tier: DEFAULT_PRICE_TIER,
            cuisines: vec!["moroccan".to_owned()],
            category: None,
            phone: None,
            website: None,
            status: None,
            detail_key: None,
            raw: serde_json::Value::Null,
        }
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".to_owned()))
        }
    }

    /// Store whose reads always fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("offline".to_owned()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("offline".to_owned()))
        }
    }

    #[test]
    fn toggle_on_empty_store_persists_single_record() {
        let storage = MemoryStore::new();
        let mut store = FavoritesStore::hydrate(storage.clone());
        let p1 = record("p1", "Tagine Palace");

        let set = store.toggle(&p1).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains("p1"));

        let stored = storage.get(FAVORITES_KEY).unwrap().unwrap();
        let decoded: Vec<CanonicalRestaurant> = serde_json::from_str(&stored).unwrap();
        assert_eq!(decoded, vec![p1]);
    }

    #[test]
    fn toggle_twice_restores_original_set() {
        let storage = MemoryStore::new();
        let mut store = FavoritesStore::hydrate(storage.clone());
        store.toggle(&record("a", "First")).unwrap();
        let before = store.favorites().ids().join(",");

        let r = record("b", "Second");
        store.toggle(&r).unwrap();
        store.toggle(&r).unwrap();

        assert_eq!(store.favorites().ids().join(","), before);
        let reloaded = FavoritesStore::hydrate(storage);
        assert_eq!(reloaded.favorites().ids(), vec!["a"]);
    }

    #[test]
    fn removal_is_by_id_not_full_equality() {
        let mut store = FavoritesStore::hydrate(MemoryStore::new());
        store.toggle(&record("p1", "Tagine Palace")).unwrap();

        let renamed = record("p1", "Tagine Palace (Downtown)");
        let set = store.toggle(&renamed).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn failed_write_leaves_set_unchanged() {
        let mut store = FavoritesStore::hydrate(ReadOnlyStore);
        let err = store.toggle(&record("p1", "Tagine Palace")).unwrap_err();

        assert!(matches!(err, SessionError::StorageUnavailable(_)));
        assert!(!store.is_favorite("p1"));
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn hydrate_survives_unreadable_storage() {
        let store = FavoritesStore::hydrate(BrokenStore);
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn hydrate_survives_corrupt_value() {
        let storage = MemoryStore::new();
        storage.set(FAVORITES_KEY, "{\"not\": \"an array\"").unwrap();
        let store = FavoritesStore::hydrate(storage);
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn hydrate_drops_blank_ids_and_raises_zero_price_tier() {
        let storage = MemoryStore::new();
        let stored = serde_json::json!([
            {
                "id": "",
                "name": "Ghost",
                "address": null,
                "primary_image_url": DEFAULT_IMAGE_URL,
                "rating": null,
                "review_count": null,
                "price_tier": 0,
                "phone": null,
                "website": null,
                "status": null
            },
            {
                "id": "p1",
                "name": "Tagine Palace",
                "address": null,
                "primary_image_url": DEFAULT_IMAGE_URL,
                "rating": null,
                "review_count": null,
                "price_tier": 0,
                "phone": null,
                "website": null,
                "status": null
            }
        ]);
        storage.set(FAVORITES_KEY, &stored.to_string()).unwrap();

        let store = FavoritesStore::hydrate(storage);
        assert_eq!(store.favorites().len(), 1);
        assert!(!store.is_favorite(""));
        assert_eq!(store.favorites().get("p1").unwrap().price_tier, 1);
    }

    #[test]
    fn hydrate_restores_order_and_drops_duplicate_ids() {
        let storage = MemoryStore::new();
        let records = vec![record("b", "B"), record("a", "A"), record("b", "B again")];
        storage
            .set(FAVORITES_KEY, &serde_json::to_string(&records).unwrap())
            .unwrap();

        let store = FavoritesStore::hydrate(storage);
        assert_eq!(store.favorites().ids(), vec!["b", "a"]);
        assert_eq!(store.favorites().get("b").unwrap().name, "B");
        assert!(store.is_favorite("a"));
    }
}
