//! User-entered search criteria and the cuisine selector vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Cuisine options offered by the search form.
///
/// [`Cuisine::Other`] is the match-all sentinel: selecting it never narrows
/// the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cuisine {
    American,
    Italian,
    Japanese,
    Chinese,
    Turkish,
    Indian,
    Mexican,
    Moroccan,
    Other,
}

impl Cuisine {
    pub const ALL: [Cuisine; 9] = [
        Cuisine::American,
        Cuisine::Italian,
        Cuisine::Japanese,
        Cuisine::Chinese,
        Cuisine::Turkish,
        Cuisine::Indian,
        Cuisine::Mexican,
        Cuisine::Moroccan,
        Cuisine::Other,
    ];

    /// Lowercase slug, as used in queries and filter comparisons.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Cuisine::American => "american",
            Cuisine::Italian => "italian",
            Cuisine::Japanese => "japanese",
            Cuisine::Chinese => "chinese",
            Cuisine::Turkish => "turkish",
            Cuisine::Indian => "indian",
            Cuisine::Mexican => "mexican",
            Cuisine::Moroccan => "moroccan",
            Cuisine::Other => "other",
        }
    }

    #[must_use]
    pub fn is_match_all(self) -> bool {
        self == Cuisine::Other
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cuisine {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Cuisine::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| {
                ConfigError::Validation(format!(
                    "unknown cuisine '{s}'; expected one of: {}",
                    Cuisine::ALL.map(Cuisine::as_str).join(", ")
                ))
            })
    }
}

/// The four search form fields.
///
/// All text fields are free text; an empty (or whitespace-only) field is an
/// absent criterion. `cuisine: None` is the unselected state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub food_type: String,
    #[serde(default)]
    pub cuisine: Option<Cuisine>,
}

impl SearchCriteria {
    /// Returns `true` when no field carries a criterion.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.location.trim().is_empty()
            && self.food_type.trim().is_empty()
            && self.cuisine.is_none()
    }

    /// Non-empty fields in form order, trimmed, for providers that build a
    /// single free-text query.
    ///
    /// The match-all cuisine is omitted since it carries no search intent.
    #[must_use]
    pub fn query_terms(&self) -> Vec<&str> {
        let cuisine = self
            .cuisine
            .filter(|c| !c.is_match_all())
            .map(Cuisine::as_str);
        [
            Some(self.name.trim()),
            Some(self.location.trim()),
            Some(self.food_type.trim()),
            cuisine,
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect()
    }
}
