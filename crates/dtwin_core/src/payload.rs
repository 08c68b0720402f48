//! Canonical search payload sent to the search backend.
//!
//! The envelope is a wire contract:
//!
//! ```text
//! {"function":{"command":"search","arguments":{"searchTerm":"...","parameters":[
//!     {"parameter":3,"operator":1,"key":"color","value":"red"}]}}}
//! ```
//!
//! Field order follows struct declaration order, so encoding the same
//! payload always yields the same bytes.

use crate::error::SearchResult;
use serde::{Deserialize, Serialize};

/// Command name carried by the envelope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Element search
    #[default]
    Search,
}

/// Filter in coded form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodedFilter {
    /// Parameter kind code
    pub parameter: u8,
    /// Operator code
    pub operator: u8,
    /// Lowercased key or null
    pub key: Option<String>,
    /// Lowercased value or null
    pub value: Option<String>,
}

/// `arguments` object of the envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchArguments {
    /// Lowercased search term, empty when absent
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    /// Coded filters in input order
    pub parameters: Vec<CodedFilter>,
}

/// `function` object of the envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionCall {
    /// Always `search`
    pub command: Command,
    /// Search arguments
    pub arguments: SearchArguments,
}

/// The complete payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanonicalPayload {
    /// Function call wrapper
    pub function: FunctionCall,
}

impl CanonicalPayload {
    /// Wrap normalized arguments in the search envelope
    #[must_use]
    pub fn search(search_term: String, parameters: Vec<CodedFilter>) -> Self {
        Self {
            function: FunctionCall {
                command: Command::Search,
                arguments: SearchArguments {
                    search_term,
                    parameters,
                },
            },
        }
    }

    /// Normalized search term
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.function.arguments.search_term
    }

    /// Coded filters
    #[must_use]
    pub fn parameters(&self) -> &[CodedFilter] {
        &self.function.arguments.parameters
    }

    /// Compact JSON bytes
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_bytes(&self) -> SearchResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Payload as a JSON value
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_value(&self) -> SearchResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_red() -> CanonicalPayload {
        CanonicalPayload::search(
            "wall".to_string(),
            vec![CodedFilter {
                parameter: 3,
                operator: 1,
                key: Some("color".to_string()),
                value: Some("red".to_string()),
            }],
        )
    }

    #[test]
    fn test_wire_layout() {
        let bytes = color_red().to_bytes().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"function":{"command":"search","arguments":{"searchTerm":"wall","parameters":[{"parameter":3,"operator":1,"key":"color","value":"red"}]}}}"#
        );
    }

    #[test]
    fn test_null_key_and_value() {
        let payload = CanonicalPayload::search(
            String::new(),
            vec![CodedFilter {
                parameter: 1,
                operator: 1,
                key: None,
                value: None,
            }],
        );
        let value = payload.to_value().unwrap();
        let filter = &value["function"]["arguments"]["parameters"][0];
        assert!(filter["key"].is_null());
        assert!(filter["value"].is_null());
        assert_eq!(value["function"]["arguments"]["searchTerm"], "");
    }

    #[test]
    fn test_encode_deterministic() {
        let payload = color_red();
        assert_eq!(payload.to_bytes().unwrap(), payload.to_bytes().unwrap());
    }

    #[test]
    fn test_rejects_drifted_envelope() {
        let drifted = r#"{"function":{"command":"search","arguments":{"searchTerm":"","parameters":[{"Parameter":3,"Operator":1,"Key":null,"Value":null}]}}}"#;
        assert!(serde_json::from_str::<CanonicalPayload>(drifted).is_err());
    }

    #[test]
    fn test_accessors() {
        let payload = color_red();
        assert_eq!(payload.search_term(), "wall");
        assert_eq!(payload.parameters().len(), 1);
        assert_eq!(payload.function.command, Command::Search);
    }
}
