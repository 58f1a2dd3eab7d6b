//! The Auth Pipeline state machine (spec.md §4.4): orchestrates identity,
//! metadata, authorization; owns the per-request mutable result maps and
//! assembles the authorization context.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::context::{build_authorization_context, serialize};
use crate::error::{CoreError, PipelineError};
use crate::evaluator::EvaluatorId;
use crate::request::HttpRequestInfo;
use crate::strategy::{run_strategy, Strategy};

/// Per-request state shared (read-write) between the pipeline's single
/// consumer loop and (read-only) the concurrently running evaluator tasks
/// of the current phase.
struct PipelineState {
    request: HttpRequestInfo,
    identity: DashMap<EvaluatorId, (String, Value)>,
    metadata: DashMap<EvaluatorId, (String, Value)>,
    authorization: DashMap<EvaluatorId, (String, Value)>,
}

/// The read-only view evaluators receive (spec.md §4.2): the request, the
/// parent cancellation scope, already-resolved identity/metadata, and an
/// on-demand serialization of the authorization context.
#[derive(Clone)]
pub struct PipelineView {
    state: Arc<PipelineState>,
    parent_scope: CancellationToken,
}

impl PipelineView {
    pub fn request(&self) -> &HttpRequestInfo {
        &self.state.request
    }

    pub fn parent_scope(&self) -> &CancellationToken {
        &self.parent_scope
    }

    /// The first non-null identity entry, if any (spec.md §4.4: "the
    /// pipeline iterates its map; the first non-null identity entry is
    /// chosen").
    pub fn resolved_identity(&self) -> Option<(String, Value)> {
        self.state
            .identity
            .iter()
            .next()
            .map(|entry| entry.value().clone())
    }

    pub fn resolved_metadata(&self) -> HashMap<String, Value> {
        self.state
            .metadata
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Serialized `{ "context": ..., "auth": { "identity": ..., "metadata": {...} } }`
    /// using the state of `identity` and `metadata` at the moment of the call.
    pub fn authorization_json(&self) -> Result<String, CoreError> {
        let identity = self.resolved_identity().map(|(_, object)| object);
        let metadata = self.resolved_metadata();
        let context = build_authorization_context(&self.state.request, identity, &metadata);
        serialize(&context)
    }
}

/// One instance per Check call (spec.md §3).
pub struct AuthPipeline {
    config: Arc<ApiConfig>,
    state: Arc<PipelineState>,
    scope: CancellationToken,
}

impl AuthPipeline {
    pub fn new(config: Arc<ApiConfig>, request: HttpRequestInfo, scope: CancellationToken) -> Self {
        Self {
            config,
            state: Arc::new(PipelineState {
                request,
                identity: DashMap::new(),
                metadata: DashMap::new(),
                authorization: DashMap::new(),
            }),
            scope,
        }
    }

    pub fn view(&self) -> PipelineView {
        PipelineView {
            state: self.state.clone(),
            parent_scope: self.scope.clone(),
        }
    }

    pub fn identity(&self) -> Option<(String, Value)> {
        self.view().resolved_identity()
    }

    pub fn metadata(&self) -> HashMap<String, Value> {
        self.view().resolved_metadata()
    }

    pub fn authorization(&self) -> HashMap<String, Value> {
        self.state
            .authorization
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// `START -> IDENTITY -> METADATA -> AUTHORIZATION -> ALLOW`, denying
    /// at the first phase that fails (spec.md §4.4).
    pub async fn evaluate(&self) -> Result<(), PipelineError> {
        self.run_identity_phase()
            .await
            .map_err(PipelineError::Identity)?;

        self.run_metadata_phase().await;

        self.run_authorization_phase()
            .await
            .map_err(PipelineError::Authorization)?;

        info!("request allowed");
        Ok(())
    }

    async fn run_identity_phase(&self) -> Result<(), CoreError> {
        if self.config.identity.is_empty() {
            return Err(CoreError::NoIdentityVerifier);
        }

        let mut rx = run_strategy(
            self.config.identity.clone(),
            Strategy::OneOf,
            &self.scope,
            self.view(),
        );

        let mut last_error = None;
        while let Some(response) = rx.recv().await {
            match (response.object, response.error) {
                (Some(object), _) => {
                    if self.state.identity.is_empty() {
                        debug!(evaluator = %response.evaluator.name, "identity resolved");
                        self.state
                            .identity
                            .insert(response.evaluator.id, (response.evaluator.name, object));
                    }
                }
                (None, Some(error)) => last_error = Some(error),
                (None, None) => {}
            }
        }

        if self.state.identity.is_empty() {
            return Err(last_error.unwrap_or_else(|| {
                CoreError::IdentityFailed("no identity verifier succeeded".to_string())
            }));
        }

        Ok(())
    }

    async fn run_metadata_phase(&self) {
        if self.config.metadata.is_empty() {
            return;
        }

        let mut rx = run_strategy(
            self.config.metadata.clone(),
            Strategy::AnyOf,
            &self.scope,
            self.view(),
        );

        while let Some(response) = rx.recv().await {
            match (response.object, response.error) {
                (Some(object), _) => {
                    self.state
                        .metadata
                        .insert(response.evaluator.id, (response.evaluator.name, object));
                }
                (None, Some(error)) => {
                    tracing::warn!(evaluator = %response.evaluator.name, %error, "metadata fetch failed, ignoring");
                }
                (None, None) => {}
            }
        }
    }

    async fn run_authorization_phase(&self) -> Result<(), CoreError> {
        if self.config.authorization.is_empty() {
            return Ok(());
        }

        let mut rx = run_strategy(
            self.config.authorization.clone(),
            Strategy::AllOf,
            &self.scope,
            self.view(),
        );

        let mut first_error = None;
        while let Some(response) = rx.recv().await {
            match (response.object, response.error) {
                (Some(object), _) => {
                    self.state
                        .authorization
                        .insert(response.evaluator.id, (response.evaluator.name, object));
                }
                (None, Some(error)) => {
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
                (None, None) => {}
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
