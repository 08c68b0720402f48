//! Validated search requests.

use crate::codes::{Operator, ParameterKind};
use serde::{Deserialize, Serialize};

/// One structured search constraint after enum resolution.
///
/// `key` and `value` are kept exactly as received; casing is folded later
/// when the payload is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterFilter {
    /// Resolved parameter kind
    pub kind: ParameterKind,
    /// Resolved operator
    pub operator: Operator,
    /// Optional key
    pub key: Option<String>,
    /// Optional value
    pub value: Option<String>,
}

impl ParameterFilter {
    /// Create a filter with the default operator and no key or value
    #[must_use]
    pub fn new(kind: ParameterKind) -> Self {
        Self {
            kind,
            operator: Operator::default(),
            key: None,
            value: None,
        }
    }

    /// Set operator
    #[must_use]
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    /// Set key
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Whether both key and value are present and non-empty
    #[must_use]
    pub fn has_key_and_value(&self) -> bool {
        let filled = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.key) && filled(&self.value)
    }
}

/// Search request that passed shape and enum validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedRequest {
    /// Free-text term, unnormalized
    pub search_term: Option<String>,
    /// Filters in the order received
    pub filters: Vec<ParameterFilter>,
    /// Natural-language prompt the request was extracted from, if supplied
    pub prompt: Option<String>,
}

impl ValidatedRequest {
    /// Create an empty request
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search term
    #[must_use]
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Append a filter
    #[must_use]
    pub fn with_filter(mut self, filter: ParameterFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set prompt
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults_to_equal() {
        let filter = ParameterFilter::new(ParameterKind::Storey);
        assert_eq!(filter.operator, Operator::Equal);
        assert!(filter.key.is_none());
        assert!(filter.value.is_none());
    }

    #[test]
    fn test_has_key_and_value() {
        let filter = ParameterFilter::new(ParameterKind::Property)
            .with_key("Color")
            .with_value("Red");
        assert!(filter.has_key_and_value());

        let filter = ParameterFilter::new(ParameterKind::Property).with_key("Color");
        assert!(!filter.has_key_and_value());

        let filter = ParameterFilter::new(ParameterKind::Property)
            .with_key("Color")
            .with_value("");
        assert!(!filter.has_key_and_value());
    }

    #[test]
    fn test_request_preserves_filter_order() {
        let request = ValidatedRequest::new()
            .with_filter(ParameterFilter::new(ParameterKind::Distance))
            .with_filter(ParameterFilter::new(ParameterKind::EntityType));
        assert_eq!(request.filters[0].kind, ParameterKind::Distance);
        assert_eq!(request.filters[1].kind, ParameterKind::EntityType);
    }
}
