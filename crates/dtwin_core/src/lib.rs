//! dTwin Search Core Types
//!
//! This crate contains pure types and logic with no I/O.
//! Canonical payloads serialize to a byte-stable JSON envelope.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codes;
pub mod error;
pub mod payload;
pub mod request;

// Re-exports
pub use codes::{Coded, EnumEntry, EnumRegistry, EnumTable, Operator, ParameterKind};
pub use error::{EnumError, SearchError, SearchResult};
pub use payload::{CanonicalPayload, CodedFilter, Command, FunctionCall, SearchArguments};
pub use request::{ParameterFilter, ValidatedRequest};
