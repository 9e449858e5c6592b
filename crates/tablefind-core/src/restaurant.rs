use serde::{Deserialize, Serialize};

/// Image shown when a provider supplies no usable photo, or when a photo
/// previously failed to load.
pub const DEFAULT_IMAGE_URL: &str = "/images/restaurant-placeholder.jpg";

/// Price tier assumed when the provider does not report one.
pub const DEFAULT_PRICE_TIER: u8 = 2;

/// A restaurant normalized from any upstream search or detail provider.
///
/// Every provider shape is converted into this record before it reaches
/// filtering, selection, or the favorites store, so nothing downstream needs
/// to know which provider produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRestaurant {
    /// Stable identifier; never empty. Favorite membership is keyed on it.
    pub id: String,
    pub name: String,
    /// Single-line address, e.g. `"12 Rue Tahar, Casablanca, CS 20250"`.
    pub address: Option<String>,
    /// First usable photo, or [`DEFAULT_IMAGE_URL`].
    pub primary_image_url: String,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    /// Count of price symbols (`$$` is 2). Always at least 1.
    pub price_tier: u8,
    /// Possibly empty; never absent.
    #[serde(default)]
    pub cuisines: Vec<String>,
    /// Free-text category (e.g. `"Sushi restaurant"`) when the provider has one.
    #[serde(default)]
    pub category: Option<String>,
    /// Stored exactly as the provider formatted it.
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Operational status such as `"OPERATIONAL"` or `"CLOSED_TEMPORARILY"`.
    pub status: Option<String>,
    /// Provider-specific key for detail lookups when it differs from `id`.
    #[serde(default)]
    pub detail_key: Option<String>,
    /// The provider object this record was built from. Not persisted.
    #[serde(skip)]
    pub raw: serde_json::Value,
}

impl CanonicalRestaurant {
    /// Returns the key to send to a detail provider for this record.
    #[must_use]
    pub fn detail_key(&self) -> &str {
        self.detail_key.as_deref().unwrap_or(&self.id)
    }

    /// Returns the price tier rendered as dollar signs, e.g. `"$$$"`.
    #[must_use]
    pub fn price_symbols(&self) -> String {
        "$".repeat(usize::from(self.price_tier.max(1)))
    }

    /// Returns the rating as five filled/empty stars, or `None` when unrated.
    #[must_use]
    pub fn star_rating(&self) -> Option<String> {
        let rating = self.rating.filter(|r| r.is_finite() && *r > 0.0)?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let filled = rating.round().clamp(0.0, 5.0) as usize;
        Some(format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled)))
    }

    /// Returns `true` when the record still points at a provider photo.
    #[must_use]
    pub fn has_own_image(&self) -> bool {
        self.primary_image_url != DEFAULT_IMAGE_URL
    }
}
