//! String normalization for search payload fields.
//!
//! Filter `key`/`value` and the search term follow different rules for
//! missing input: an absent key or value becomes `null`, an absent search
//! term becomes `""`. The backend distinguishes the two.

use serde_json::Value;

/// Normalizer for payload strings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer;

impl Normalizer {
    /// Create a new normalizer
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Lowercase a string
    #[must_use]
    pub fn fold(&self, s: &str) -> String {
        s.to_lowercase()
    }

    /// Normalize an optional filter field: `None` stays `None`, strings are lowercased
    #[must_use]
    pub fn normalize(&self, value: Option<&str>) -> Option<String> {
        value.map(|s| self.fold(s))
    }

    /// Normalize a raw JSON filter field: anything that is not a string maps to `None`
    #[must_use]
    pub fn normalize_value(&self, value: Option<&Value>) -> Option<String> {
        self.normalize(value.and_then(Value::as_str))
    }

    /// Normalize the search term: missing maps to the empty string
    #[must_use]
    pub fn normalize_search_term(&self, term: Option<&str>) -> String {
        term.map(|s| self.fold(s)).unwrap_or_default()
    }
}
