//! Host adapter: the boundary a tool-dispatch host calls into.

use crate::registry::ToolRegistry;
use crate::schema::ToolSchema;
use crate::trait_::{ToolError, ToolOutput};
use serde_json::Value;
use std::sync::Arc;

/// Adapter for executing registered tools from raw host input
#[derive(Debug, Clone)]
pub struct HostAdapter {
    tools: Arc<ToolRegistry>,
}

impl HostAdapter {
    /// Create a new host adapter
    #[must_use]
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self { tools }
    }

    /// Execute a tool by name
    ///
    /// # Errors
    ///
    /// Returns error if tool not found or execution fails
    pub fn execute_tool(&self, name: &str, args: &Value) -> Result<ToolOutput, ToolError> {
        let span = tracing::debug_span!("tool_call", tool = name);
        let _guard = span.enter();

        let result = self.tools.call(name, args);
        match &result {
            Ok(_) => tracing::debug!("tool call succeeded"),
            Err(err) => tracing::info!(error = %err, "tool call rejected"),
        }
        result
    }

    /// Execute a tool with JSON-encoded arguments; empty input means `{}`
    ///
    /// # Errors
    ///
    /// Returns error if input is not JSON, tool not found or execution fails
    pub fn execute_json(&self, name: &str, input: &[u8]) -> Result<ToolOutput, ToolError> {
        let args = if input.iter().all(u8::is_ascii_whitespace) {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_slice(input).map_err(|e| ToolError::InvalidInput {
                reason: e.to_string(),
            })?
        };
        self.execute_tool(name, &args)
    }

    /// Schemas of available tools
    #[must_use]
    pub fn describe_tools(&self) -> Vec<ToolSchema> {
        self.tools.schemas()
    }

    /// Check if a tool is available
    #[must_use]
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains(name)
    }
}

/// Builtin tools
pub mod builtin {
    use crate::builder::compile;
    use crate::policy::SearchPolicy;
    use crate::schema::{InputSchema, OutputSchema, ToolSchema, search_input_schema};
    use crate::trait_::{Tool, ToolError, ToolOutput};
    use dtwin_core::{EnumRegistry, SearchError};
    use once_cell::sync::Lazy;
    use serde_json::{Value, json};
    use std::sync::Arc;

    /// Name of the search tool
    pub const SEARCH_TOOL: &str = "dtwin_search";
    /// Name of the about tool
    pub const ABOUT_TOOL: &str = "dtwin_about";
    /// Name of the echo tool
    pub const ECHO_TOOL: &str = "echo";

    /// Key under which a host passes the single structured argument
    pub const ARGS_FIELD: &str = "args";

    const SEARCH_DESCRIPTION: &str = "Build the search payload for dTwin. \
Parameters are matched by exact, case-insensitive equality per enum: EntityType(1), \
PropertySet(2), Property(3), ClassificationParameterSet(4), ClassificationParameter(5), \
Storey(6), Distance(7); operators Equal(1), NotEqual(2). \
Use EntityType only when the prompt explicitly mentions a type, build Property only \
with both key and value, and emit at most one parameter; express everything else \
through searchTerm (singular, lowercase, or empty). \
For a storey without a known GUID use value \"placeholder\".";

    static ABOUT: Lazy<Value> = Lazy::new(|| {
        json!({
            "topic": "dtwin",
            "overview": "dTwin is Nemetschek’s cloud/SaaS, horizontal and open digital twin platform for built assets. It harmonizes and visualizes all facility data (BIM/CAD, IWMS/CAFM, BMS, IoT, scans, 360° imagery) into a single, lifecycle view to deliver visual analytics and connected intelligence for operations.",
            "tagline": "Visual analytics and connected intelligence for built assets.",
            "elevator_pitch": "Harmonize all building data in one digital twin, see your asset in 3D context, and act on data-driven insights across design, construction, and operations.",
            "launch": {"announced": "2023-10-18"},
            "capabilities": [
                "Data harmonization/federation across BIM, IWMS, BMS, IoT, scans, 360° imagery",
                "Visual analytics, dashboards, KPIs, heatmaps in 2D/3D",
                "Cloud-based, horizontal/open platform for Building Lifecycle Intelligence",
                "Real-time operations with live sensor/BMS streams",
                "3D context combining BIM, point clouds, panoramic imagery"
            ],
            "integrations": [
                "BIM/CAD (IFC models)",
                "IWMS/CAFM (e.g., Spacewell)",
                "BMS (building management systems)",
                "IoT sensors (energy, IAQ, occupancy)",
                "Laser scanning point clouds",
                "360° photogrammetry/panoramic imagery"
            ],
            "use_cases": [
                "Operational dashboards & monitoring",
                "Portfolio/facility insights and reporting",
                "Scan-to-twin visualization and comparison",
                "Industrial & infrastructure operations (e.g., ports)"
            ],
            "case_studies": [
                {"name": "Nemetschek Haus (HQ)", "summary": "Cloud-based twin consolidating heterogeneous legacy data."},
                {"name": "UMEX Port, Constanța", "summary": "3D context + live KPIs for unloading operations and energy."},
                {"name": "Iowa State University", "summary": "Pilot with live sensors in a 3D-printed shed for IAQ/energy."}
            ],
            "key_phrases": [
                "horizontal and open digital twin",
                "Building Lifecycle Intelligence",
                "visual analytics and connected intelligence"
            ],
            "short_about": "dTwin harmonizes and visualizes all your facility’s data in a digital twin so you can see and understand your asset and act data-driven to increase its value."
        })
    });

    /// The fixed dTwin overview object
    #[must_use]
    pub fn about() -> &'static Value {
        &ABOUT
    }

    /// Search tool - compiles search intent into the canonical payload
    #[derive(Debug, Clone)]
    pub struct SearchTool {
        registry: Arc<EnumRegistry>,
        policy: SearchPolicy,
    }

    impl SearchTool {
        /// Create a search tool with the pass-through policy
        #[must_use]
        pub fn new(registry: Arc<EnumRegistry>) -> Self {
            Self {
                registry,
                policy: SearchPolicy::default(),
            }
        }

        /// Set policy
        #[must_use]
        pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
            self.policy = policy;
            self
        }
    }

    impl Tool for SearchTool {
        fn name(&self) -> &str {
            SEARCH_TOOL
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema::new(SEARCH_TOOL, env!("CARGO_PKG_VERSION"))
                .with_description(SEARCH_DESCRIPTION)
                .with_input(search_input_schema(&self.registry))
        }

        /// Accepts either `{"args": {...}}` or the named arguments directly.
        fn call(&self, args: &Value) -> Result<ToolOutput, ToolError> {
            let object = args.as_object().ok_or(SearchError::InvalidArgumentShape)?;
            let raw = object.get(ARGS_FIELD).unwrap_or(args);
            let payload = compile(&self.registry, &self.policy, raw)?;
            Ok(ToolOutput::new(payload.to_value()?))
        }
    }

    /// About tool - returns the fixed dTwin overview
    #[derive(Debug, Clone, Copy, Default)]
    pub struct AboutTool;

    impl Tool for AboutTool {
        fn name(&self) -> &str {
            ABOUT_TOOL
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema::new(ABOUT_TOOL, env!("CARGO_PKG_VERSION"))
                .with_description("Return the official dTwin overview text.")
        }

        fn call(&self, _args: &Value) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::new(about().clone()))
        }
    }

    /// Echo tool - returns `message` unchanged
    #[derive(Debug, Clone, Copy, Default)]
    pub struct EchoTool;

    impl Tool for EchoTool {
        fn name(&self) -> &str {
            ECHO_TOOL
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema::new(ECHO_TOOL, env!("CARGO_PKG_VERSION"))
                .with_description("Echo a message back to the caller.")
                .with_input(
                    InputSchema::new()
                        .with_json_schema(json!({
                            "type": "object",
                            "properties": {"message": {"type": "string"}}
                        }))
                        .with_required_field("message"),
                )
                .with_output(OutputSchema::new().with_content_type("text/plain"))
        }

        fn call(&self, args: &Value) -> Result<ToolOutput, ToolError> {
            let message = args
                .get("message")
                .and_then(Value::as_str)
                .ok_or_else(|| ToolError::InvalidInput {
                    reason: "`message` must be a string".to_string(),
                })?;
            Ok(ToolOutput::new(Value::String(message.to_string())))
        }
    }
}
