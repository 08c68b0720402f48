//! Core error types for dTwin search.

/// Search result type
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors raised while compiling a search request.
///
/// Every variant is a caller error. Nothing is retried or recovered; the
/// message is meant to be surfaced verbatim to whoever produced the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Top-level arguments are not an object
    #[error("Tool expects a single object argument")]
    InvalidArgumentShape,

    /// `parameters` is present but not a list
    #[error("`parameters` must be a list")]
    InvalidParametersShape,

    /// A `parameters` element is not an object
    #[error("Each parameter must be an object (element {index})")]
    InvalidParameterShape {
        /// Position of the offending element
        index: usize,
    },

    /// `parameter` is missing or not a known parameter kind
    #[error("Unknown parameter enum: {value}")]
    UnknownParameterKind {
        /// Rejected value as received
        value: String,
    },

    /// `operator` is not a known operator
    #[error("Unknown operator enum: {value}")]
    UnknownOperator {
        /// Rejected value as received
        value: String,
    },

    /// More filters than the single-filter policy allows
    #[error("At most one parameter is allowed, got {count}")]
    TooManyFilters {
        /// Number of filters received
        count: usize,
    },

    /// A `Property` filter lacks a key or a value
    #[error("Property parameter {index} requires both key and value")]
    IncompletePropertyFilter {
        /// Position of the offending filter
        index: usize,
    },

    /// An `EntityType` filter was emitted without the prompt mentioning a type
    #[error("EntityType parameter {index} used without an explicit type mention")]
    EntityTypeNotMentioned {
        /// Position of the offending filter
        index: usize,
    },

    /// Payload could not be encoded
    #[error("Encoding failed: {reason}")]
    Encoding {
        /// Underlying serializer message
        reason: String,
    },
}

impl SearchError {
    /// Stable machine-readable name of the error kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgumentShape => "InvalidArgumentShape",
            Self::InvalidParametersShape => "InvalidParametersShape",
            Self::InvalidParameterShape { .. } => "InvalidParameterShape",
            Self::UnknownParameterKind { .. } => "UnknownParameterKind",
            Self::UnknownOperator { .. } => "UnknownOperator",
            Self::TooManyFilters { .. } => "TooManyFilters",
            Self::IncompletePropertyFilter { .. } => "IncompletePropertyFilter",
            Self::EntityTypeNotMentioned { .. } => "EntityTypeNotMentioned",
            Self::Encoding { .. } => "Encoding",
        }
    }

    /// Whether the error comes from an opt-in policy rather than input shape
    #[must_use]
    pub const fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            Self::TooManyFilters { .. }
                | Self::IncompletePropertyFilter { .. }
                | Self::EntityTypeNotMentioned { .. }
        )
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding {
            reason: err.to_string(),
        }
    }
}

/// Enum registry lookup error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnumError {
    /// Name is not part of the fixed table
    #[error("Unknown {table} value: {name}")]
    UnknownEnumValue {
        /// Table that was searched
        table: &'static str,
        /// Name as received
        name: String,
    },
}
