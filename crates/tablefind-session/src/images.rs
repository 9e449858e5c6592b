//! Session cache of images that failed to load.
//!
//! Once the presentation layer reports a failure for a record, that record
//! renders the placeholder for the rest of the session and the broken URL is
//! never handed out again.

use std::collections::HashSet;

use tablefind_core::{CanonicalRestaurant, DEFAULT_IMAGE_URL};

#[derive(Debug, Default)]
pub struct ImageFallbacks {
    broken: HashSet<String>,
}

impl ImageFallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the image for `id` failed to load.
    ///
    /// Returns `true` only the first time for a given id.
    pub fn report_failure(&mut self, id: &str) -> bool {
        let downgraded = self.broken.insert(id.to_string());
        if downgraded {
            tracing::debug!(id, "image downgraded to placeholder");
        }
        downgraded
    }

    #[must_use]
    pub fn is_downgraded(&self, id: &str) -> bool {
        self.broken.contains(id)
    }

    /// The URL to render for `record`.
    #[must_use]
    pub fn image_url<'a>(&self, record: &'a CanonicalRestaurant) -> &'a str {
        if self.is_downgraded(&record.id) {
            DEFAULT_IMAGE_URL
        } else {
            &record.primary_image_url
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablefind_core::DEFAULT_PRICE_TIER;

    fn record(id: &str, image: &str) -> CanonicalRestaurant {
        CanonicalRestaurant {
            id: id.to_owned(),
            name: "Tagine Palace".to_owned(),
            address: None,
            primary_image_url: image.to_owned(),
            rating: None,
            review_count: None,
            price_tier: DEFAULT_PRICE_TIER,
            cuisines: Vec::new(),
            category: None,
            phone: None,
            website: None,
            status: None,
            detail_key: None,
            raw: serde_json::Value::Null,
        }
    }

    #[test]
    fn healthy_image_passes_through() {
        let fallbacks = ImageFallbacks::new();
        let r = record("p1", "https://img/p1.jpg");
        assert_eq!(fallbacks.image_url(&r), "https://img/p1.jpg");
    }

    #[test]
    fn failure_downgrades_once_and_sticks() {
        let mut fallbacks = ImageFallbacks::new();
        let r = record("p1", "https://img/broken.jpg");

        assert!(fallbacks.report_failure("p1"));
        assert!(!fallbacks.report_failure("p1"));
        assert_eq!(fallbacks.image_url(&r), DEFAULT_IMAGE_URL);
        assert_eq!(fallbacks.image_url(&r), DEFAULT_IMAGE_URL);
    }

    #[test]
    fn downgrade_is_per_record() {
        let mut fallbacks = ImageFallbacks::new();
        fallbacks.report_failure("p1");
        let other = record("p2", "https://img/p2.jpg");
        assert!(!fallbacks.is_downgraded("p2"));
        assert_eq!(fallbacks.image_url(&other), "https://img/p2.jpg");
    }
}
