//! Concurrent strategy runner (spec.md §4.3): runs a set of evaluators
//! concurrently under one of three strategies with shared cancellation.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use crate::evaluator::{evaluator_id, EvaluationResponse, Evaluator, EvaluatorRef};
use crate::pipeline::PipelineView;

/// Which event triggers cancelling the other evaluators in the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// First success cancels siblings. Used by the identity phase.
    OneOf,
    /// First failure cancels siblings. Used by the authorization phase.
    AllOf,
    /// Never cancels; all evaluators run to completion. Used by the
    /// metadata phase.
    AnyOf,
}

/// Fan out `evaluators` under `strategy`, deriving a child cancellation
/// scope from `parent_scope`. Returns a receiver that yields one response
/// per evaluator, in completion order, and closes once every task has
/// emitted its response (each spawned task holds one clone of the sender;
/// the channel closes itself once every clone is dropped).
///
/// A task that observes cancellation before invoking `call` skips silently
/// (emits nothing); a task whose `call` is already in flight when
/// cancellation fires still emits exactly one response.
pub fn run_strategy(
    evaluators: Vec<Arc<dyn Evaluator>>,
    strategy: Strategy,
    parent_scope: &CancellationToken,
    view: PipelineView,
) -> mpsc::Receiver<EvaluationResponse> {
    let capacity = evaluators.len().max(1);
    let (tx, rx) = mpsc::channel(capacity);
    let scope = parent_scope.child_token();

    for evaluator in evaluators {
        let tx = tx.clone();
        let scope = scope.clone();
        let view = view.clone();

        tokio::spawn(async move {
            if scope.is_cancelled() {
                trace!(evaluator = evaluator.name(), "skipping cancelled evaluator");
                return;
            }

            let evaluator_ref = EvaluatorRef {
                id: evaluator_id(&evaluator),
                name: evaluator.name().to_string(),
            };

            let result = evaluator.call(view, scope.clone()).await;

            match (&result, strategy) {
                (Ok(_), Strategy::OneOf) => scope.cancel(),
                (Err(_), Strategy::AllOf) => scope.cancel(),
                _ => {}
            }

            let response = match result {
                Ok(object) => EvaluationResponse {
                    evaluator: evaluator_ref,
                    object: Some(object),
                    error: None,
                },
                Err(error) => {
                    warn!(evaluator = %evaluator_ref.name, %error, "evaluator failed");
                    EvaluationResponse {
                        evaluator: evaluator_ref,
                        object: None,
                        error: Some(error),
                    }
                }
            };

            // The receiver may already be gone if the pipeline stopped
            // draining early; that's fine, there is nothing left to do.
            let _ = tx.send(response).await;
        });
    }

    rx
}
