//! Place-search shape: `place_id`, flat `location`/`full_address`,
//! `cuisine` as free text, Google-style `price_level` and `business_status`.

use serde_json::Value;

use super::fields::{
    first_count, first_f64, first_price_tier, first_text, image_candidates, resolve_address,
    string_list,
};
use super::Mapped;

const ID_KEYS: [&str; 5] = ["id", "place_id", "business_id", "google_id", "cid"];
const DETAIL_KEYS: [&str; 2] = ["place_id", "business_id"];
const IMAGE_ARRAYS: [&str; 2] = ["photos", "photos_sample"];
const IMAGE_SINGLES: [&str; 4] = ["cover_photo", "photo", "thumbnail", "icon"];

pub(super) fn map(raw: &Value) -> Option<Mapped> {
    let id = first_text(raw, &ID_KEYS)?;

    let mut cuisines = string_list(raw, "cuisine");
    if cuisines.is_empty() {
        cuisines = string_list(raw, "cuisines");
    }

    Some(Mapped {
        detail_key: first_text(raw, &DETAIL_KEYS),
        name: first_text(raw, &["name", "title"]),
        address: resolve_address(
            raw,
            &["full_address", "formatted_address", "address", "location"],
        ),
        images: image_candidates(raw, &IMAGE_ARRAYS, &IMAGE_SINGLES),
        rating: first_f64(raw, &["rating"]),
        review_count: first_count(raw, &["review_count", "reviews", "user_ratings_total"]),
        price_tier: first_price_tier(raw, &["price_level", "price"]),
        cuisines,
        category: first_text(raw, &["category", "type", "food_type", "foodType"]),
        phone: first_text(
            raw,
            &["phone_number", "phone", "formatted_phone_number", "international_phone_number"],
        ),
        website: first_text(raw, &["website"]),
        status: first_text(raw, &["business_status", "status"]),
        id,
    })
}
