//! Core identity / metadata / authorization evaluation pipeline for an
//! Envoy ext-authz `Check` service (see spec.md / SPEC_FULL.md).
//!
//! This crate is deliberately narrow: it owns the pipeline state machine,
//! the concurrent strategy runner, the pattern-matching authorization
//! evaluator, and the credential locator. The gRPC transport, concrete
//! identity/metadata/authorization backends, and configuration loading are
//! external collaborators that consume the types exported here.

pub mod config;
pub mod context;
pub mod credential;
pub mod error;
pub mod evaluator;
pub mod pattern;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod selector;
pub mod strategy;

#[cfg(test)]
pub mod test_utils;

pub use config::ApiConfig;
pub use credential::{CredentialLocation, CredentialLocator, CredentialLocatorConfig};
pub use error::{CoreError, PipelineError};
pub use evaluator::{EvaluationResponse, Evaluator, EvaluatorId, EvaluatorRef};
pub use pattern::{JsonPatternMatchingRuleConfig, Operator, PatternMatchingConfig, PatternMatchingEvaluator};
pub use pipeline::{AuthPipeline, PipelineView};
pub use request::HttpRequestInfo;
pub use response::{CheckOutcome, EnvoyStatus};
pub use strategy::{run_strategy, Strategy};
