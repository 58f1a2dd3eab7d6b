//! A minimal `Evaluator` built from an async closure, for standing up ad
//! hoc identity / metadata / authorization steps in tests without a
//! mocking framework — the same pass-through role
//! `test_utils::tower_test::ExampleService<S>` plays for `tower::Service`
//! in the teacher crate, adapted to this crate's own evaluator contract.

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::CoreError;
use crate::evaluator::Evaluator;
use crate::pipeline::PipelineView;

pub struct ClosureEvaluator<F, Fut> {
    name: String,
    f: F,
    _marker: PhantomData<fn() -> Fut>,
}

impl<F, Fut> ClosureEvaluator<F, Fut>
where
    F: Fn(PipelineView, CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, CoreError>> + Send,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<F, Fut> Evaluator for ClosureEvaluator<F, Fut>
where
    F: Fn(PipelineView, CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, CoreError>> + Send,
{
    async fn call(&self, view: PipelineView, cancel: CancellationToken) -> Result<Value, CoreError> {
        (self.f)(view, cancel).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
