pub mod client;
pub mod envelope;
pub mod error;
pub mod normalize;
pub mod provider;
pub(crate) mod retry;

pub use client::{ClientSettings, PlaceSearchClient, RestaurantSearchClient};
pub use error::ProviderError;
pub use normalize::{normalize_restaurant, normalize_results, UpstreamShape};
pub use provider::{Coordinates, DetailProvider, SearchProvider, SearchQuery};
