//! The upload request flow.
//!
//! One request drives one sequential pass through the flow states below.
//! Every request-level failure is folded into per-product error entries; the
//! endpoint itself always answers HTTP 200.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::aggregate::aggregate_results;
use crate::catalog::ProductCatalog;
use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::ep::PipelineApi;
use crate::error::RequestError;
use crate::models::{PipelineDocument, ProductSummary, UploadRequest, UploadStatus};
use crate::tasks::build_upload_tasks;
use crate::uploader::{execute_upload_tasks, Uploader};

lazy_static! {
    /// The pattern locating the task id inside a pipeline run URL.
    static ref TASK_ID_PATTERN: Regex = Regex::new(r"/tasks/([a-f0-9]+)").expect("failed to compile TASK_ID_PATTERN regex");
}

/// The flow states of one upload request, in pass order.
#[derive(Clone, Copy, Debug)]
enum FlowState {
    Idle,
    Authenticating,
    FetchingPipelineData,
    BuildingTasks,
    Uploading,
    Aggregating,
    Done,
    Failed,
}

/// The shared dependencies of the request flow.
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: ProductCatalog,
    pub credentials: CredentialStore,
    pub ep: Arc<dyn PipelineApi>,
    pub uploader: Arc<dyn Uploader>,
}

/// Drive one upload request to completion, returning one summary per requested product.
pub async fn handle_upload(state: &AppState, request: UploadRequest) -> Vec<ProductSummary> {
    tracing::info!(state = ?FlowState::Idle, products = ?request.products, "received upload request");

    match run_flow(state, &request).await {
        Ok(summaries) => {
            tracing::debug!(state = ?FlowState::Done, "upload request complete");
            summaries
        }
        Err(err) => {
            tracing::warn!(state = ?FlowState::Failed, error = %err, "upload request failed");
            error_entries(&request.products, &err.to_string())
        }
    }
}

async fn run_flow(state: &AppState, request: &UploadRequest) -> Result<Vec<ProductSummary>, RequestError> {
    let has_dynamic_products = request.products.iter().any(|product| !state.catalog.is_fixed(product));

    // Fixed-path-only requests skip straight to task building with an empty document.
    let document = if has_dynamic_products {
        tracing::debug!(state = ?FlowState::Authenticating, "resolving EP API token");
        let token = resolve_token(state, request.custom_token.as_deref()).await.ok_or(RequestError::NoToken)?;

        tracing::debug!(state = ?FlowState::FetchingPipelineData, "fetching pipeline results");
        let task_id = extract_task_id_from_url(&request.pipeline_url)?;
        state.ep.fetch_results(&task_id, &token).await?
    } else {
        PipelineDocument::default()
    };

    tracing::debug!(state = ?FlowState::BuildingTasks, "building upload tasks");
    let tasks = build_upload_tasks(&state.catalog, &document, &request.products, &request.date_version);
    tracing::info!(count = tasks.len(), "built upload tasks");

    tracing::debug!(state = ?FlowState::Uploading, "executing upload tasks");
    let outcomes = execute_upload_tasks(state.uploader.as_ref(), &tasks).await;

    tracing::debug!(state = ?FlowState::Aggregating, "aggregating upload outcomes");
    Ok(aggregate_results(&outcomes, &request.products))
}

/// Resolve the EP API token to use for this request.
///
/// A non-blank caller-supplied token wins and is persisted for future
/// requests when it differs from the stored one; otherwise the stored token
/// is used, falling back to the token from the environment.
async fn resolve_token(state: &AppState, custom_token: Option<&str>) -> Option<String> {
    let stored = match state.credentials.get().await {
        Ok(stored) => stored,
        Err(err) => {
            tracing::warn!(error = ?err, "error reading credential file, ignoring stored token");
            None
        }
    };

    if let Some(custom) = custom_token.map(str::trim).filter(|custom| !custom.is_empty()) {
        if stored.as_deref() != Some(custom) {
            if let Err(err) = state.credentials.set(custom).await {
                tracing::warn!(error = ?err, "error persisting caller-supplied token");
            }
        }
        return Some(custom.to_string());
    }

    stored.or_else(|| state.config.ep_api_token.clone().filter(|token| !token.trim().is_empty()))
}

/// Extract the task id from a pipeline run URL.
fn extract_task_id_from_url(url: &str) -> Result<String, RequestError> {
    if url.trim().is_empty() {
        return Err(RequestError::MissingPipelineUrl);
    }
    TASK_ID_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|cap| cap.as_str().to_string())
        .ok_or(RequestError::MalformedPipelineUrl)
}

/// One error entry per requested product carrying the given message.
fn error_entries(products: &[String], message: &str) -> Vec<ProductSummary> {
    products
        .iter()
        .map(|product| ProductSummary {
            product: product.clone(),
            status: UploadStatus::Error,
            message: message.to_string(),
            uploaded_paths: None,
            failed_files: None,
        })
        .collect()
}
