//! Opt-in gating rules for extracted filters.
//!
//! The extraction prompt tells the upstream agent to emit at most one
//! filter, to use `EntityType` only when a type is named, and to build a
//! `Property` filter only with both key and value. None of this is enforced
//! by default; each rule can be switched on independently.

use dtwin_core::{ParameterKind, SearchError, SearchResult, ValidatedRequest};
use serde::{Deserialize, Serialize};

/// Policy configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SearchPolicy {
    /// Reject requests with more than one filter
    pub enforce_single_filter: bool,
    /// Reject `Property` filters missing a key or a value
    pub require_property_value: bool,
    /// Reject `EntityType` filters unless the prompt names a type
    pub require_entity_type_explicit_mention: bool,
}

impl SearchPolicy {
    /// Every rule on
    #[must_use]
    pub fn strict() -> Self {
        Self {
            enforce_single_filter: true,
            require_property_value: true,
            require_entity_type_explicit_mention: true,
        }
    }

    /// Set single-filter rule
    #[must_use]
    pub fn with_single_filter(mut self, enabled: bool) -> Self {
        self.enforce_single_filter = enabled;
        self
    }

    /// Set property-value rule
    #[must_use]
    pub fn with_property_value(mut self, enabled: bool) -> Self {
        self.require_property_value = enabled;
        self
    }

    /// Set entity-type mention rule
    #[must_use]
    pub fn with_entity_type_mention(mut self, enabled: bool) -> Self {
        self.require_entity_type_explicit_mention = enabled;
        self
    }

    /// Whether any rule is enabled
    #[must_use]
    pub fn is_enforcing(&self) -> bool {
        self.enforce_single_filter
            || self.require_property_value
            || self.require_entity_type_explicit_mention
    }

    /// Check a validated request against the enabled rules
    ///
    /// # Errors
    ///
    /// Returns the first rule violation found
    pub fn check(&self, request: &ValidatedRequest) -> SearchResult<()> {
        if self.enforce_single_filter && request.filters.len() > 1 {
            return Err(SearchError::TooManyFilters {
                count: request.filters.len(),
            });
        }

        for (index, filter) in request.filters.iter().enumerate() {
            match filter.kind {
                ParameterKind::Property
                    if self.require_property_value && !filter.has_key_and_value() =>
                {
                    return Err(SearchError::IncompletePropertyFilter { index });
                }
                ParameterKind::EntityType if self.require_entity_type_explicit_mention => {
                    if !mentions_type(request.prompt.as_deref(), filter.value.as_deref()) {
                        return Err(SearchError::EntityTypeNotMentioned { index });
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// A prompt mentions a type when it contains the word "type", or names the
/// filter value as a whole word and that value is an IFC class (`IfcWall`)
fn mentions_type(prompt: Option<&str>, value: Option<&str>) -> bool {
    let Some(prompt) = prompt else {
        return false;
    };
    let prompt = prompt.to_lowercase();
    let mut words = prompt.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty());
    let value = value.map(str::to_lowercase).filter(|v| is_ifc_class(v));
    words.any(|word| word == "type" || word == "types" || value.as_deref() == Some(word))
}

fn is_ifc_class(name: &str) -> bool {
    name.len() > 3 && name.starts_with("ifc") && name.chars().all(char::is_alphanumeric)
}
