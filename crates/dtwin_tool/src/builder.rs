//! Compile validated requests into the canonical search payload.

use crate::normalize::Normalizer;
use crate::policy::SearchPolicy;
use crate::validate::SearchValidator;
use dtwin_core::{
    CanonicalPayload, Coded, CodedFilter, EnumRegistry, ParameterFilter, SearchResult,
    ValidatedRequest,
};
use serde_json::Value;

/// Builds canonical payloads from validated requests
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadBuilder {
    policy: SearchPolicy,
    normalizer: Normalizer,
}

impl PayloadBuilder {
    /// Create a builder with the pass-through policy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set policy
    #[must_use]
    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the payload. Filter order is preserved.
    ///
    /// # Errors
    ///
    /// Returns error if an enabled policy rule rejects the request
    pub fn build(&self, request: &ValidatedRequest) -> SearchResult<CanonicalPayload> {
        self.policy.check(request)?;

        let parameters = request
            .filters
            .iter()
            .map(|filter| self.code(filter))
            .collect();
        let search_term = self
            .normalizer
            .normalize_search_term(request.search_term.as_deref());

        Ok(CanonicalPayload::search(search_term, parameters))
    }

    fn code(&self, filter: &ParameterFilter) -> CodedFilter {
        CodedFilter {
            parameter: filter.kind.code(),
            operator: filter.operator.code(),
            key: self.normalizer.normalize(filter.key.as_deref()),
            value: self.normalizer.normalize(filter.value.as_deref()),
        }
    }
}

/// Validate raw arguments and build their payload in one step
///
/// # Errors
///
/// Returns the first validation or policy error
pub fn compile(
    registry: &EnumRegistry,
    policy: &SearchPolicy,
    raw: &Value,
) -> SearchResult<CanonicalPayload> {
    let request = SearchValidator::new(registry).validate(raw)?;
    let payload = PayloadBuilder::new()
        .with_policy(*policy)
        .build(&request)
        .inspect_err(|err| {
            tracing::debug!(
                enforcing = policy.is_enforcing(),
                policy_violation = err.is_policy_violation(),
                error = %err,
                "search request rejected"
            );
        })?;
    tracing::debug!(
        filters = payload.parameters().len(),
        search_term = payload.search_term(),
        "compiled search payload"
    );
    Ok(payload)
}
