//! Shape and enum validation of raw search arguments.
//!
//! Checks run in a fixed order and the first failure aborts the whole
//! request. No partially validated filter list ever escapes.

use dtwin_core::{
    EnumRegistry, Operator, ParameterFilter, ParameterKind, SearchError, SearchResult,
    ValidatedRequest,
};
use serde_json::{Map, Value};

/// Top-level argument carrying the free-text term
pub const SEARCH_TERM_FIELD: &str = "searchTerm";
/// Top-level argument carrying the filter list
pub const PARAMETERS_FIELD: &str = "parameters";
/// Optional top-level argument carrying the originating prompt
pub const PROMPT_FIELD: &str = "prompt";

/// Validator for search tool arguments
#[derive(Debug, Clone, Copy)]
pub struct SearchValidator<'r> {
    registry: &'r EnumRegistry,
}

impl<'r> SearchValidator<'r> {
    /// Create a validator over an enum registry
    #[must_use]
    pub fn new(registry: &'r EnumRegistry) -> Self {
        Self { registry }
    }

    /// Validate a single object argument
    ///
    /// # Errors
    ///
    /// Returns the first shape or enum error encountered
    pub fn validate(&self, raw: &Value) -> SearchResult<ValidatedRequest> {
        let args = raw.as_object().ok_or(SearchError::InvalidArgumentShape)?;
        self.validate_object(args)
    }

    /// Validate arguments passed as separate named values
    ///
    /// Same semantics as [`SearchValidator::validate`] with the outer object
    /// already taken apart by the caller.
    ///
    /// # Errors
    ///
    /// Returns the first shape or enum error encountered
    pub fn validate_named(
        &self,
        search_term: Option<&Value>,
        parameters: Option<&Value>,
        prompt: Option<&Value>,
    ) -> SearchResult<ValidatedRequest> {
        Ok(ValidatedRequest {
            search_term: as_string(search_term),
            filters: self.validate_parameters(parameters)?,
            prompt: as_string(prompt),
        })
    }

    fn validate_object(&self, args: &Map<String, Value>) -> SearchResult<ValidatedRequest> {
        self.validate_named(
            args.get(SEARCH_TERM_FIELD),
            args.get(PARAMETERS_FIELD),
            args.get(PROMPT_FIELD),
        )
    }

    /// Validate the filter list; absent or `null` is an empty list
    fn validate_parameters(&self, parameters: Option<&Value>) -> SearchResult<Vec<ParameterFilter>> {
        let items = match parameters {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(SearchError::InvalidParametersShape),
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.validate_parameter(index, item))
            .collect()
    }

    fn validate_parameter(&self, index: usize, item: &Value) -> SearchResult<ParameterFilter> {
        let obj = item
            .as_object()
            .ok_or(SearchError::InvalidParameterShape { index })?;

        let kind = self.resolve_kind(obj.get("parameter")).inspect_err(|err| {
            tracing::debug!(index, error = %err, "rejected parameter kind");
        })?;
        let operator = self.resolve_operator(obj.get("operator")).inspect_err(|err| {
            tracing::debug!(index, error = %err, "rejected operator");
        })?;

        Ok(ParameterFilter {
            kind,
            operator,
            key: as_string(obj.get("key")),
            value: as_string(obj.get("value")),
        })
    }

    fn resolve_kind(&self, raw: Option<&Value>) -> SearchResult<ParameterKind> {
        match raw {
            Some(Value::String(name)) => {
                self.registry
                    .parameter(name)
                    .map_err(|_| SearchError::UnknownParameterKind {
                        value: name.clone(),
                    })
            }
            other => Err(SearchError::UnknownParameterKind {
                value: render(other),
            }),
        }
    }

    /// Missing, `null` and `""` all select the default operator
    fn resolve_operator(&self, raw: Option<&Value>) -> SearchResult<Operator> {
        match raw {
            None | Some(Value::Null) => Ok(Operator::default()),
            Some(Value::String(name)) if name.is_empty() => Ok(Operator::default()),
            Some(Value::String(name)) => {
                self.registry
                    .operator(name)
                    .map_err(|_| SearchError::UnknownOperator {
                        value: name.clone(),
                    })
            }
            Some(other) => Err(SearchError::UnknownOperator {
                value: other.to_string(),
            }),
        }
    }
}

fn as_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_owned)
}

fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| "null".to_string(), Value::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::SearchPolicy;
    use serde_json::json;

    fn validate(raw: Value) -> SearchResult<ValidatedRequest> {
        let registry = EnumRegistry::standard();
        SearchValidator::new(&registry).validate(&raw)
    }

    #[test]
    fn test_validate_full_request() {
        let request = validate(json!({
            "searchTerm": "Wall",
            "parameters": [
                {"parameter": "Property", "operator": "Equal", "key": "Color", "value": "Red"}
            ]
        }))
        .unwrap();

        assert_eq!(request.search_term.as_deref(), Some("Wall"));
        assert_eq!(request.filters.len(), 1);
        assert_eq!(request.filters[0].kind, ParameterKind::Property);
        assert_eq!(request.filters[0].operator, Operator::Equal);
        // casing is untouched until the payload is built
        assert_eq!(request.filters[0].key.as_deref(), Some("Color"));
    }

    #[test]
    fn test_top_level_must_be_object() {
        assert_eq!(validate(json!([])), Err(SearchError::InvalidArgumentShape));
        assert_eq!(validate(json!("wall")), Err(SearchError::InvalidArgumentShape));
        assert_eq!(validate(Value::Null), Err(SearchError::InvalidArgumentShape));
    }

    #[test]
    fn test_parameters_must_be_list() {
        assert_eq!(
            validate(json!({"parameters": {"parameter": "Storey"}})),
            Err(SearchError::InvalidParametersShape)
        );
        assert_eq!(
            validate(json!({"parameters": "Storey"})),
            Err(SearchError::InvalidParametersShape)
        );
    }

    #[test]
    fn test_absent_or_null_parameters_is_empty() {
        assert!(validate(json!({})).unwrap().filters.is_empty());
        assert!(validate(json!({"parameters": null})).unwrap().filters.is_empty());
        assert!(validate(json!({"parameters": []})).unwrap().filters.is_empty());
    }

    #[test]
    fn test_element_must_be_object() {
        assert_eq!(
            validate(json!({"parameters": [{"parameter": "Storey"}, "Distance"]})),
            Err(SearchError::InvalidParameterShape { index: 1 })
        );
    }

    #[test]
    fn test_unknown_parameter_kind() {
        assert_eq!(
            validate(json!({"parameters": [{"parameter": "Elevation", "operator": "Equal"}]})),
            Err(SearchError::UnknownParameterKind {
                value: "Elevation".to_string()
            })
        );
    }

    #[test]
    fn test_missing_parameter_kind() {
        assert_eq!(
            validate(json!({"parameters": [{"operator": "Equal"}]})),
            Err(SearchError::UnknownParameterKind {
                value: "null".to_string()
            })
        );
        assert_eq!(
            validate(json!({"parameters": [{"parameter": 3}]})),
            Err(SearchError::UnknownParameterKind {
                value: "3".to_string()
            })
        );
    }

    #[test]
    fn test_operator_defaults_to_equal() {
        for op in [json!({}), json!({"operator": null}), json!({"operator": ""})] {
            let mut filter = op.as_object().unwrap().clone();
            filter.insert("parameter".to_string(), json!("Storey"));
            let request = validate(json!({"parameters": [filter]})).unwrap();
            assert_eq!(request.filters[0].operator, Operator::Equal);
        }
    }

    #[test]
    fn test_unknown_operator() {
        assert_eq!(
            validate(json!({"parameters": [{"parameter": "Storey", "operator": "Like"}]})),
            Err(SearchError::UnknownOperator {
                value: "Like".to_string()
            })
        );
        assert_eq!(
            validate(json!({"parameters": [{"parameter": "Storey", "operator": 2}]})),
            Err(SearchError::UnknownOperator {
                value: "2".to_string()
            })
        );
    }

    #[test]
    fn test_first_failing_filter_aborts() {
        let result = validate(json!({
            "parameters": [
                {"parameter": "Storey"},
                {"parameter": "Elevation"},
                {"parameter": "Distance", "operator": "Near"}
            ]
        }));
        assert_eq!(
            result,
            Err(SearchError::UnknownParameterKind {
                value: "Elevation".to_string()
            })
        );
    }

    #[test]
    fn test_case_insensitive_names() {
        let request = validate(json!({
            "parameters": [{"parameter": "storey", "operator": "NOTEQUAL"}]
        }))
        .unwrap();
        assert_eq!(request.filters[0].kind, ParameterKind::Storey);
        assert_eq!(request.filters[0].operator, Operator::NotEqual);
    }

    #[test]
    fn test_non_string_fields_become_none() {
        let request = validate(json!({
            "searchTerm": 42,
            "parameters": [{"parameter": "Distance", "key": null, "value": 7}]
        }))
        .unwrap();
        assert!(request.search_term.is_none());
        assert!(request.filters[0].key.is_none());
        assert!(request.filters[0].value.is_none());
    }

    #[test]
    fn test_prompt_is_captured() {
        let request = validate(json!({"prompt": "IfcWall type only"})).unwrap();
        assert_eq!(request.prompt.as_deref(), Some("IfcWall type only"));
    }

    #[test]
    fn test_named_matches_object() {
        let registry = EnumRegistry::standard();
        let validator = SearchValidator::new(&registry);
        let term = json!("Door");
        let params = json!([{"parameter": "EntityType", "value": "IfcDoor"}]);
        let prompt = json!("every IfcDoor");

        let named = validator
            .validate_named(Some(&term), Some(&params), Some(&prompt))
            .unwrap();
        let object = validator
            .validate(&json!({"searchTerm": term, "parameters": params, "prompt": prompt}))
            .unwrap();
        assert_eq!(named, object);
        assert_eq!(named.prompt.as_deref(), Some("every IfcDoor"));

        assert_eq!(
            validator.validate_named(None, Some(&json!(5)), None),
            Err(SearchError::InvalidParametersShape)
        );
    }

    #[test]
    fn test_named_prompt_satisfies_mention_rule() {
        let registry = EnumRegistry::standard();
        let validator = SearchValidator::new(&registry);
        let params = json!([{"parameter": "EntityType", "value": "IfcSlab"}]);
        let policy = SearchPolicy::default().with_entity_type_mention(true);

        let with_prompt = validator
            .validate_named(None, Some(&params), Some(&json!("list IfcSlab on level 2")))
            .unwrap();
        assert!(policy.check(&with_prompt).is_ok());

        let without = validator.validate_named(None, Some(&params), None).unwrap();
        assert_eq!(
            policy.check(&without),
            Err(SearchError::EntityTypeNotMentioned { index: 0 })
        );
    }
}
