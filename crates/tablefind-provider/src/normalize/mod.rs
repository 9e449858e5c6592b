//! Normalization from raw provider objects to [`CanonicalRestaurant`].
//!
//! Each known upstream shape has one mapping branch ([`place`],
//! [`restaurant`]) that only reads fields; defaults and invariants are
//! applied once in [`finish`]. Supporting a new provider means adding a
//! variant to [`UpstreamShape`] and one mapping module.

mod fields;
mod place;
mod restaurant;

use serde_json::Value;
use tablefind_core::{CanonicalRestaurant, DEFAULT_IMAGE_URL, DEFAULT_PRICE_TIER};

/// The closed set of upstream result shapes this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamShape {
    /// Place-search results keyed by `place_id` with flat `location` text.
    PlaceSearch,
    /// Restaurant-search results keyed by `_id` with photo categories and a
    /// structured address.
    RestaurantSearch,
}

impl UpstreamShape {
    /// Classifies a raw result object by its distinguishing fields.
    #[must_use]
    pub fn detect(raw: &Value) -> Self {
        let restaurant_markers = ["_id", "food_photos", "weighted_rating_value", "store_photos"];
        if restaurant_markers.iter().any(|k| raw.get(*k).is_some())
            || (raw.get("address").is_some_and(Value::is_object) && raw.get("place_id").is_none())
        {
            UpstreamShape::RestaurantSearch
        } else {
            UpstreamShape::PlaceSearch
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            UpstreamShape::PlaceSearch => "place_search",
            UpstreamShape::RestaurantSearch => "restaurant_search",
        }
    }
}

/// Fields read from a provider object before defaults are applied.
struct Mapped {
    id: String,
    detail_key: Option<String>,
    name: Option<String>,
    address: Option<String>,
    images: Vec<String>,
    rating: Option<f64>,
    review_count: Option<u64>,
    price_tier: Option<u8>,
    cuisines: Vec<String>,
    category: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    status: Option<String>,
}

fn finish(mapped: Mapped, raw: &Value) -> CanonicalRestaurant {
    let detail_key = mapped.detail_key.filter(|k| *k != mapped.id);
    let primary_image_url = mapped
        .images
        .into_iter()
        .next()
        .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

    CanonicalRestaurant {
        id: mapped.id,
        name: mapped.name.unwrap_or_default(),
        address: mapped.address,
        primary_image_url,
        rating: mapped.rating,
        review_count: mapped.review_count,
        price_tier: mapped.price_tier.unwrap_or(DEFAULT_PRICE_TIER).max(1),
        cuisines: mapped.cuisines,
        category: mapped.category,
        phone: mapped.phone,
        website: mapped.website,
        status: mapped.status,
        detail_key,
        raw: raw.clone(),
    }
}

/// Normalizes one raw provider object.
///
/// Never fails on missing or oddly-typed fields; they fall back to the
/// canonical defaults. Returns `None` only when no identifier can be
/// resolved, in which case the record is unusable and must be dropped.
#[must_use]
pub fn normalize_restaurant(raw: &Value) -> Option<CanonicalRestaurant> {
    let shape = UpstreamShape::detect(raw);
    let mapped = match shape {
        UpstreamShape::PlaceSearch => place::map(raw),
        UpstreamShape::RestaurantSearch => restaurant::map(raw),
    };
    mapped.map(|m| finish(m, raw))
}

/// Normalizes a provider result list, silently dropping unusable records.
///
/// Input order is preserved.
#[must_use]
pub fn normalize_results(raw: &[Value]) -> Vec<CanonicalRestaurant> {
    let normalized: Vec<CanonicalRestaurant> =
        raw.iter().filter_map(normalize_restaurant).collect();

    let dropped = raw.len() - normalized.len();
    if dropped > 0 {
        tracing::debug!(
            received = raw.len(),
            dropped,
            "dropped provider results without an identifier"
        );
    }

    normalized
}

#[cfg(test)]
#[path = "../normalize_test.rs"]
mod tests;
