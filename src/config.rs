use std::sync::Arc;

use crate::evaluator::Evaluator;

/// A resolved, immutable per-API configuration (spec.md §3): three ordered
/// lists of named evaluators. Built by the (out-of-scope) config layer and
/// shared across requests via `Arc`; the pipeline only ever borrows it.
#[derive(Clone, Default)]
pub struct ApiConfig {
    pub identity: Vec<Arc<dyn Evaluator>>,
    pub metadata: Vec<Arc<dyn Evaluator>>,
    pub authorization: Vec<Arc<dyn Evaluator>>,
}

impl ApiConfig {
    pub fn new(
        identity: Vec<Arc<dyn Evaluator>>,
        metadata: Vec<Arc<dyn Evaluator>>,
        authorization: Vec<Arc<dyn Evaluator>>,
    ) -> Self {
        Self {
            identity,
            metadata,
            authorization,
        }
    }
}
