//! Tool trait

use crate::schema::ToolSchema;
use dtwin_core::SearchError;
use serde_json::Value;

/// Result of a tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// JSON result handed back to the caller
    pub data: Value,
}

impl ToolOutput {
    /// Wrap a JSON result
    #[must_use]
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Compact JSON bytes
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_bytes(&self) -> Result<Vec<u8>, ToolError> {
        serde_json::to_vec(&self.data).map_err(|e| ToolError::Encoding {
            reason: e.to_string(),
        })
    }
}

/// Tool call error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// No tool registered under this name
    #[error("Tool not found: {name}")]
    NotFound {
        /// Requested name
        name: String,
    },

    /// A tool with this name is already registered
    #[error("Tool already registered: {name}")]
    AlreadyRegistered {
        /// Conflicting name
        name: String,
    },

    /// Input could not be read as JSON
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Parser message
        reason: String,
    },

    /// Search compilation failed
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Output could not be encoded
    #[error("Encoding failed: {reason}")]
    Encoding {
        /// Serializer message
        reason: String,
    },
}

/// A callable exposed to the dispatch host
pub trait Tool: Send + Sync {
    /// Registered name
    fn name(&self) -> &str;

    /// Published schema
    fn schema(&self) -> ToolSchema;

    /// Invoke the tool with its JSON arguments
    ///
    /// # Errors
    ///
    /// Returns error if the arguments are rejected
    fn call(&self, args: &Value) -> Result<ToolOutput, ToolError>;
}
