//! Maps a finished pipeline evaluation onto the Envoy ext-authz response
//! shape described in spec.md §6. The gRPC transport (out of scope) turns
//! `CheckOutcome` into the actual protobuf `CheckResponse`.

use std::collections::HashMap;

use crate::error::{CoreError, PipelineError};

/// The subset of Envoy's gRPC status codes this core ever selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvoyStatus {
    Ok,
    PermissionDenied,
    Unauthenticated,
    Internal,
}

#[derive(Debug, Clone)]
pub enum CheckOutcome {
    Allow {
        response_headers: HashMap<String, String>,
    },
    Deny {
        status: EnvoyStatus,
        reason: String,
    },
}

impl CheckOutcome {
    pub fn allow(response_headers: HashMap<String, String>) -> Self {
        CheckOutcome::Allow { response_headers }
    }

    pub fn status(&self) -> EnvoyStatus {
        match self {
            CheckOutcome::Allow { .. } => EnvoyStatus::Ok,
            CheckOutcome::Deny { status, .. } => *status,
        }
    }

    /// Translate a pipeline failure into a deny outcome. `EvaluatorFailure`
    /// and `RegexInvalid` are treated as `Internal` regardless of phase —
    /// both represent a broken evaluator/config rather than a legitimate
    /// identity or authorization denial (see DESIGN.md).
    pub fn from_pipeline_error(error: PipelineError) -> Self {
        let (status, cause) = match error {
            PipelineError::Identity(cause) => (classify_identity(&cause), cause),
            PipelineError::Authorization(cause) => (classify_authorization(&cause), cause),
        };

        CheckOutcome::Deny {
            status,
            reason: cause.to_string(),
        }
    }
}

fn classify_identity(cause: &CoreError) -> EnvoyStatus {
    match cause {
        CoreError::EvaluatorFailure { .. } => EnvoyStatus::Internal,
        _ => EnvoyStatus::Unauthenticated,
    }
}

fn classify_authorization(cause: &CoreError) -> EnvoyStatus {
    match cause {
        CoreError::EvaluatorFailure { .. } | CoreError::RegexInvalid(_) => EnvoyStatus::Internal,
        _ => EnvoyStatus::PermissionDenied,
    }
}
