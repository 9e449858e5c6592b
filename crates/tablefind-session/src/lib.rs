//! Session-level state for restaurant search: the last search and its
//! results, the favorites set, the inspected record, and image fallbacks.
//!
//! All state is owned by one coordinating context; concurrency between
//! in-flight provider calls is resolved with generation tickets rather than
//! locks, so a late response can never overwrite a newer one.

pub mod error;
pub mod favorites;
pub mod images;
pub mod search;
pub mod selection;
pub mod session;
pub mod storage;

pub use error::{Lookup, SessionError, StorageError};
pub use favorites::{FavoriteSet, FavoritesStore, FAVORITES_KEY};
pub use images::ImageFallbacks;
pub use search::{
    recall_criteria, remember_criteria, SearchOutcome, SearchSession, SearchTicket, LAST_SEARCH_KEY,
};
pub use selection::{DetailOutcome, DetailTicket, Selection, SelectionCoordinator};
pub use session::Session;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
