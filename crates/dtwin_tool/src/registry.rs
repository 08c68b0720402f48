//! Tool registry for name-based dispatch.

use crate::adapter::builtin::{AboutTool, EchoTool, SearchTool};
use crate::policy::SearchPolicy;
use crate::schema::ToolSchema;
use crate::trait_::{Tool, ToolError, ToolOutput};
use dtwin_core::EnumRegistry;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

/// Entry for a registered tool
#[derive(Clone)]
pub struct ToolEntry {
    /// The tool itself
    pub tool: Arc<dyn Tool>,
    /// Schema captured at registration
    pub schema: ToolSchema,
}

impl ToolEntry {
    /// Create a new tool entry
    #[must_use]
    pub fn new(tool: Arc<dyn Tool>) -> Self {
        let schema = tool.schema();
        Self { tool, schema }
    }
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Registry for tools
///
/// Tools are kept in registration order. The registry is filled once at
/// startup and only read afterwards, so it can be shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, ToolEntry>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `echo`, `dtwin_about` and `dtwin_search`
    #[must_use]
    pub fn with_builtins(registry: Arc<EnumRegistry>, policy: SearchPolicy) -> Self {
        let builtins: [Arc<dyn Tool>; 3] = [
            Arc::new(EchoTool),
            Arc::new(AboutTool),
            Arc::new(SearchTool::new(registry).with_policy(policy)),
        ];
        let tools = builtins
            .into_iter()
            .map(|tool| (tool.name().to_string(), ToolEntry::new(tool)))
            .collect();
        Self { tools }
    }

    /// Register a tool
    ///
    /// # Errors
    ///
    /// Returns error if a tool with the same name is already registered
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::AlreadyRegistered { name });
        }
        self.tools.insert(name, ToolEntry::new(tool));
        Ok(())
    }

    /// Get a tool by name
    ///
    /// # Errors
    ///
    /// Returns error if tool not found
    pub fn get(&self, name: &str) -> Result<Arc<dyn Tool>, ToolError> {
        self.tools
            .get(name)
            .map(|e| Arc::clone(&e.tool))
            .ok_or_else(|| ToolError::NotFound {
                name: name.to_string(),
            })
    }

    /// Call a tool by name
    ///
    /// # Errors
    ///
    /// Returns error if tool not found or the call fails
    pub fn call(&self, name: &str, args: &Value) -> Result<ToolOutput, ToolError> {
        self.get(name)?.call(args)
    }

    /// List all registered tool names
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Schemas of all registered tools
    #[must_use]
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|e| e.schema.clone()).collect()
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the count of registered tools
    #[must_use]
    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
