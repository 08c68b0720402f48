//! dTwin Search Tools
//!
//! Validation, normalization, and compilation of search requests into the
//! canonical backend payload, plus the tools exposed to a dispatch host.
//! Every call is synchronous and stateless.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod trait_;
pub mod schema;
pub mod normalize;
pub mod validate;
pub mod policy;
pub mod builder;
pub mod registry;
pub mod adapter;

pub use trait_::{Tool, ToolOutput, ToolError};
pub use schema::{ToolSchema, InputSchema, OutputSchema, search_input_schema};
pub use normalize::Normalizer;
pub use validate::SearchValidator;
pub use policy::SearchPolicy;
pub use builder::{PayloadBuilder, compile};
pub use registry::{ToolRegistry, ToolEntry};
pub use adapter::HostAdapter;
pub use adapter::builtin::{AboutTool, EchoTool, SearchTool};
