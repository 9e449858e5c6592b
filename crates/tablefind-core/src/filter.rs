//! Client-side narrowing of canonical results by the search form fields.
//!
//! A record is kept when it matches **any** non-empty criterion: name against
//! `name`, location against `address`, food type against `category` or any
//! cuisine, and cuisine against any entry in `cuisines`. Matching is a
//! case-insensitive substring test. [`Cuisine::Other`] matches every record,
//! and criteria with no non-empty field keep everything.

use crate::criteria::{Cuisine, SearchCriteria};
use crate::restaurant::CanonicalRestaurant;

/// Lowercased, trimmed needles for one filter pass.
struct Needles {
    name: Option<String>,
    location: Option<String>,
    food_type: Option<String>,
    cuisine: Option<Cuisine>,
}

impl Needles {
    fn from_criteria(criteria: &SearchCriteria) -> Self {
        let needle = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
        };
        Self {
            name: needle(&criteria.name),
            location: needle(&criteria.location),
            food_type: needle(&criteria.food_type),
            cuisine: criteria.cuisine,
        }
    }

    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.food_type.is_none()
            && self.cuisine.is_none()
    }

    fn matches(&self, record: &CanonicalRestaurant) -> bool {
        let name = self
            .name
            .as_deref()
            .is_some_and(|n| contains_ci(&record.name, n));

        let location = self
            .location
            .as_deref()
            .is_some_and(|l| record.address.as_deref().is_some_and(|a| contains_ci(a, l)));

        let food_type = self.food_type.as_deref().is_some_and(|f| {
            record.category.as_deref().is_some_and(|c| contains_ci(c, f))
                || record.cuisines.iter().any(|c| contains_ci(c, f))
        });

        let cuisine = self.cuisine.is_some_and(|c| {
            c.is_match_all() || record.cuisines.iter().any(|rc| contains_ci(rc, c.as_str()))
        });

        name || location || food_type || cuisine
    }
}

/// `needle` must already be lowercase.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Returns the records matching `criteria`, preserving input order.
#[must_use]
pub fn filter_restaurants<'a>(
    records: &'a [CanonicalRestaurant],
    criteria: &SearchCriteria,
) -> Vec<&'a CanonicalRestaurant> {
    let needles = Needles::from_criteria(criteria);
    if needles.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|r| needles.matches(r)).collect()
}
