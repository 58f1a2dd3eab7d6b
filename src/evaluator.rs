//! The evaluator contract (spec.md §4.2) used uniformly for identity,
//! metadata, and authorization steps.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::CoreError;
use crate::pipeline::PipelineView;

/// Stable identity for an evaluator instance, used as the key for the
/// pipeline's internal result maps (spec.md §9: "equal-by-value configs
/// must still be distinguishable"). Two `Arc`s around distinct evaluator
/// instances never collide even if the evaluators are configured
/// identically; derived from the `Arc`'s backing allocation address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvaluatorId(usize);

pub(crate) fn evaluator_id(evaluator: &Arc<dyn Evaluator>) -> EvaluatorId {
    EvaluatorId(Arc::as_ptr(evaluator) as *const () as usize)
}

/// Every identity, metadata, and authorization config element implements
/// this uniformly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Run the step; may block on I/O and must honor `cancel` promptly.
    async fn call(&self, view: PipelineView, cancel: CancellationToken) -> Result<Value, CoreError>;

    /// Stable identifier used when naming this evaluator's entry in the
    /// `auth.metadata` object of the authorization context.
    fn name(&self) -> &str;
}

/// A reference to the evaluator a response came from: its name (for the
/// authorization context) and its pointer identity (for the pipeline's
/// internal result maps).
#[derive(Debug, Clone)]
pub struct EvaluatorRef {
    pub id: EvaluatorId,
    pub name: String,
}

/// `{evaluator, object, error}` from spec.md §3. Exactly one of `object`
/// or `error` is meaningful.
#[derive(Debug, Clone)]
pub struct EvaluationResponse {
    pub evaluator: EvaluatorRef,
    pub object: Option<Value>,
    pub error: Option<CoreError>,
}

impl EvaluationResponse {
    pub fn success(&self) -> bool {
        self.error.is_none()
    }
}
