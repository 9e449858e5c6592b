//! Restaurant-search shape: `_id`, categorised photo arrays
//! (`food_photos`, `logo_photos`, `store_photos`), `weighted_rating_value`,
//! and a structured `address.{street_addr,city,state,zipcode}` object.

use serde_json::Value;

use super::fields::{
    first_count, first_f64, first_price_tier, first_text, image_candidates, resolve_address,
    string_list,
};
use super::Mapped;

const ID_KEYS: [&str; 3] = ["_id", "id", "restaurant_id"];
const IMAGE_ARRAYS: [&str; 3] = ["food_photos", "logo_photos", "store_photos"];
const IMAGE_SINGLES: [&str; 3] = ["cover_photo", "thumbnail", "icon"];

pub(super) fn map(raw: &Value) -> Option<Mapped> {
    let id = first_text(raw, &ID_KEYS)?;

    Some(Mapped {
        detail_key: None,
        name: first_text(raw, &["name", "restaurant_name"]),
        address: resolve_address(raw, &["full_address", "address"]),
        images: image_candidates(raw, &IMAGE_ARRAYS, &IMAGE_SINGLES),
        rating: first_f64(raw, &["weighted_rating_value", "rating"]),
        review_count: first_count(raw, &["aggregated_rating_count", "review_count"]),
        price_tier: first_price_tier(raw, &["price_range_num", "price_range", "price_level"]),
        cuisines: string_list(raw, "cuisines"),
        category: first_text(raw, &["category", "food_type"]),
        phone: first_text(raw, &["phone_number", "phone"]),
        website: first_text(raw, &["website", "website_url"]),
        status: first_text(raw, &["status", "business_status"]),
        id,
    })
}
