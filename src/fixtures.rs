#![allow(dead_code)]
//! Shared test fixtures: fabricated catalogs, EP documents and stub clients.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::catalog::ProductCatalog;
use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::ep::PipelineApi;
use crate::error::EpError;
use crate::handler::AppState;
use crate::models::{ActionRecord, PipelineData, PipelineDocument, UploadStatus};
use crate::tasks::UploadTask;
use crate::uploader::{UploadOutcome, Uploader};

/// A small fabricated catalog mirroring the production table shapes.
pub fn test_catalog() -> ProductCatalog {
    let family_base_paths = HashMap::from([
        ("ST3".to_string(), "base/ST3/".to_string()),
        ("ST35".to_string(), "base/ST35/".to_string()),
    ]);
    let product_actions = HashMap::from([
        ("ST3_DEV".to_string(), vec!["ST3 DEV SOP".to_string(), "ST3 IFS".to_string(), "st3 sop dev".to_string()]),
        ("ST3_PROD".to_string(), vec!["ST3  PROD SOP".to_string(), "ST3 IFS".to_string(), "st3 sop prod".to_string()]),
        ("ST35_PROD".to_string(), vec!["ST35 PROD SOP".to_string(), "ST35 IFS".to_string()]),
    ]);
    let fixed_paths = HashMap::from([("ST3_DEV_json".to_string(), "obs://fixed/ST3_dev/test.json".to_string())]);
    ProductCatalog::new(family_base_paths, product_actions, fixed_paths)
}

/// Build an action record from a name, type tag and result pairs.
pub fn action(name: &str, action_type: &str, result: &[(&str, &str)]) -> ActionRecord {
    ActionRecord {
        proc_act_name: name.to_string(),
        action_type: action_type.to_string(),
        result: result.iter().map(|(key, val)| (key.to_string(), val.to_string())).collect(),
    }
}

/// Build an EP document from a list of actions.
pub fn document(actions: Vec<ActionRecord>) -> PipelineDocument {
    PipelineDocument {
        data: PipelineData { action_task_list: actions },
    }
}

/// Build a config from a sparse env plus the given token file path.
pub fn test_config(token_file_path: &str) -> Config {
    let mut config: Config = envy::from_iter(vec![("RUST_LOG".to_string(), "error".to_string())]).expect("failed to build test config");
    config.token_file_path = token_file_path.to_string();
    config
}

/// Build an app state over stub clients.
pub fn test_state(token_file_path: &str, ep: Arc<dyn PipelineApi>, uploader: Arc<dyn Uploader>) -> AppState {
    let config = Arc::new(test_config(token_file_path));
    AppState {
        config,
        catalog: test_catalog(),
        credentials: CredentialStore::new(token_file_path),
        ep,
        uploader,
    }
}

/// An uploader which succeeds except for configured source paths, recording every call.
#[derive(Default)]
pub struct StubUploader {
    /// Source OBS paths which should produce an error outcome.
    pub fail_on: Vec<String>,
    /// Every task received, in call order.
    pub calls: Mutex<Vec<UploadTask>>,
}

#[async_trait]
impl Uploader for StubUploader {
    async fn upload(&self, task: &UploadTask) -> UploadOutcome {
        self.calls.lock().expect("stub uploader lock poisoned").push(task.clone());
        let failed = self.fail_on.iter().any(|path| path == &task.obs_path);
        UploadOutcome {
            product_key: task.product_key.clone(),
            obs_path: task.obs_path.clone(),
            target_path: task.target_path.clone(),
            status: if failed { UploadStatus::Error } else { UploadStatus::Success },
            message: if failed { "stubbed upload failure".into() } else { "upload succeeded".into() },
        }
    }
}

/// A pipeline API stub answering every fetch with the same canned document.
pub struct StubPipelineApi {
    pub document: PipelineDocument,
}

#[async_trait]
impl PipelineApi for StubPipelineApi {
    async fn fetch_results(&self, _task_id: &str, _token: &str) -> Result<PipelineDocument, EpError> {
        Ok(self.document.clone())
    }
}

/// A pipeline API stub failing every fetch with the produced error.
pub struct FailingPipelineApi {
    pub make_error: fn() -> EpError,
}

#[async_trait]
impl PipelineApi for FailingPipelineApi {
    async fn fetch_results(&self, _task_id: &str, _token: &str) -> Result<PipelineDocument, EpError> {
        Err((self.make_error)())
    }
}

/// A pipeline API stub which panics when called, for asserting EP is never contacted.
pub struct PanickingPipelineApi;

#[async_trait]
impl PipelineApi for PanickingPipelineApi {
    async fn fetch_results(&self, task_id: &str, _token: &str) -> Result<PipelineDocument, EpError> {
        panic!("the pipeline API must not be called, got a fetch for task id {}", task_id);
    }
}
