use thiserror::Error;

/// Errors produced anywhere in the identity / metadata / authorization pipeline.
///
/// Exactly one of an evaluator's `object` or `error` is meaningful per
/// [`crate::evaluator::EvaluationResponse`]; this is the `error` side.
#[derive(Debug, Error, Clone)]
pub enum CoreError {
    #[error("credential not found")]
    CredentialNotFound,

    #[error("credential location not supported: {0}")]
    CredentialLocationUnsupported(String),

    #[error("evaluator {evaluator} failed: {cause}")]
    EvaluatorFailure { evaluator: String, cause: String },

    #[error("cancelled")]
    Cancelled,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("invalid regex: {0}")]
    RegexInvalid(String),

    #[error("no identity verifier configured")]
    NoIdentityVerifier,

    #[error("no identity verifier succeeded: {0}")]
    IdentityFailed(String),

    #[error("failed to serialize authorization context: {0}")]
    ContextSerialization(String),
}

impl CoreError {
    /// Wrap an opaque evaluator-side failure, keeping only a short cause string
    /// (spec.md §7: "error bodies do not leak evaluator internals beyond a short
    /// cause string").
    pub fn evaluator_failure(evaluator: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        CoreError::EvaluatorFailure {
            evaluator: evaluator.into(),
            cause: cause.to_string(),
        }
    }
}

/// The outcome of a full `AuthPipeline::evaluate()` call, naming which phase
/// denied the request so the response layer can pick the right Envoy status
/// (spec.md §6).
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    #[error("identity: {0}")]
    Identity(CoreError),

    #[error("authorization: {0}")]
    Authorization(CoreError),
}
