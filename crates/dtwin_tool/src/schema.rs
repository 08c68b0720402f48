//! Tool schemas published to the dispatch host.

use crate::validate::{PARAMETERS_FIELD, PROMPT_FIELD, SEARCH_TERM_FIELD};
use dtwin_core::EnumRegistry;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Schema for a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// Tool version
    pub version: String,
    /// Description shown to the calling agent
    pub description: String,
    /// Input schema
    pub input: InputSchema,
    /// Output schema
    pub output: OutputSchema,
}

impl ToolSchema {
    /// Create a new tool schema
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: String::new(),
            input: InputSchema::new(),
            output: OutputSchema::new(),
        }
    }

    /// Set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set input schema
    #[must_use]
    pub fn with_input(mut self, schema: InputSchema) -> Self {
        self.input = schema;
        self
    }

    /// Set output schema
    #[must_use]
    pub fn with_output(mut self, schema: OutputSchema) -> Self {
        self.output = schema;
        self
    }
}

/// Input schema for a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSchema {
    /// JSON Schema document
    pub json_schema: Value,
    /// Required top-level fields
    pub required_fields: Vec<String>,
}

impl InputSchema {
    /// Schema accepting an empty object
    #[must_use]
    pub fn new() -> Self {
        Self {
            json_schema: json!({"type": "object", "properties": {}}),
            required_fields: Vec::new(),
        }
    }

    /// Set JSON schema
    #[must_use]
    pub fn with_json_schema(mut self, schema: Value) -> Self {
        self.json_schema = schema;
        self
    }

    /// Add a required field
    #[must_use]
    pub fn with_required_field(mut self, field: impl Into<String>) -> Self {
        self.required_fields.push(field.into());
        self
    }
}

impl Default for InputSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Output schema for a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSchema {
    /// Content type (e.g., "application/json")
    pub content_type: String,
    /// Whether output is a pure function of the input
    pub deterministic: bool,
}

impl OutputSchema {
    /// JSON, deterministic
    #[must_use]
    pub fn new() -> Self {
        Self {
            content_type: "application/json".to_string(),
            deterministic: true,
        }
    }

    /// Set content type
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set whether output is deterministic
    #[must_use]
    pub fn with_deterministic(mut self, deterministic: bool) -> Self {
        self.deterministic = deterministic;
        self
    }
}

impl Default for OutputSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON Schema of the search tool arguments.
///
/// The enum lists come straight from the registry so the published schema
/// cannot disagree with what the validator accepts.
#[must_use]
pub fn search_input_schema(registry: &EnumRegistry) -> InputSchema {
    let schema = json!({
        "type": "object",
        "properties": {
            SEARCH_TERM_FIELD: {
                "type": ["string", "null"],
                "description": "Singular, lowercase free text (1-3 words); empty when nothing specific remains"
            },
            PARAMETERS_FIELD: {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "parameter": {"type": "string", "enum": registry.parameters().names()},
                        "operator": {"type": "string", "enum": registry.operators().names()},
                        "key": {"type": ["string", "null"]},
                        "value": {"type": ["string", "null"]}
                    },
                    "required": ["parameter"]
                }
            },
            PROMPT_FIELD: {
                "type": "string",
                "description": "Original user prompt, used only by opt-in gating rules"
            }
        }
    });
    InputSchema::new().with_json_schema(schema)
}
