//! Wire types: the inbound HTTP API and the EP pipeline-result document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An inbound upload request from the front end.
#[derive(Clone, Debug, Deserialize)]
pub struct UploadRequest {
    /// The pipeline run URL carrying the task id, required for dynamic products.
    #[serde(default)]
    pub pipeline_url: String,
    /// The date-version segment of the destination folder.
    #[serde(default)]
    pub date_version: String,
    /// An optional caller-supplied EP API token overriding the stored one.
    #[serde(default)]
    pub custom_token: Option<String>,
    /// The product keys to upload, in caller order.
    #[serde(default)]
    pub products: Vec<String>,
}

/// The terminal per-product artifact returned to the caller.
#[derive(Clone, Debug, Serialize)]
pub struct ProductSummary {
    /// The requested product key.
    pub product: String,
    pub status: UploadStatus,
    /// A human readable summary of the product's outcome.
    pub message: String,
    /// The full destination paths of successfully uploaded files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_paths: Option<Vec<String>>,
    /// Details of the files which failed to upload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_files: Option<Vec<FailedFile>>,
}

/// One failed file of a product summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    /// The source OBS path which failed to upload.
    pub obs_path: String,
    /// The upload service's failure message.
    pub reason: String,
}

/// A success/error marker shared by per-file outcomes and per-product summaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Error,
}

/// The EP pipeline-result document.
///
/// Only the fields this service consumes are modeled; everything else in the
/// response is ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PipelineDocument {
    #[serde(default)]
    pub data: PipelineData,
}

/// The `data` envelope of the EP pipeline-result document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PipelineData {
    /// The flat list of recorded actions, in EP response order.
    #[serde(default)]
    pub action_task_list: Vec<ActionRecord>,
}

/// One recorded action of a pipeline run. Read-only for the whole request.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ActionRecord {
    /// The action's display name, matched against the catalog's recognized names.
    #[serde(default)]
    pub proc_act_name: String,
    /// The action's type tag.
    #[serde(default)]
    pub action_type: String,
    /// The action's result mapping, holding the `*_obs_path` fields among others.
    #[serde(default)]
    pub result: HashMap<String, String>,
}
