//! Upload execution against the upload microservice.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;

use crate::config::Config;
use crate::models::UploadStatus;
use crate::tasks::UploadTask;

/// The result of attempting one upload task.
#[derive(Clone, Debug)]
pub struct UploadOutcome {
    /// The product key of the originating task.
    pub product_key: String,
    /// The source OBS path of the originating task.
    pub obs_path: String,
    /// The destination folder of the originating task.
    pub target_path: String,
    pub status: UploadStatus,
    /// A human readable description of the outcome.
    pub message: String,
}

/// The capability of uploading one task's file.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Upload the given task's file, capturing the outcome.
    ///
    /// This is infallible by contract: any failure is folded into an error
    /// outcome so that one bad file never aborts its siblings.
    async fn upload(&self, task: &UploadTask) -> UploadOutcome;
}

/// Run the given tasks strictly sequentially, one outcome per task in task order.
pub async fn execute_upload_tasks(uploader: &dyn Uploader, tasks: &[UploadTask]) -> Vec<UploadOutcome> {
    if tasks.is_empty() {
        tracing::debug!("no upload tasks to execute");
        return Vec::new();
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    for task in tasks {
        tracing::info!(product = %task.product_key, obs_path = %task.obs_path, target_path = %task.target_path, "uploading file");
        let outcome = uploader.upload(task).await;
        tracing::info!(product = %task.product_key, status = ?outcome.status, message = %outcome.message, "upload finished");
        outcomes.push(outcome);
    }
    outcomes
}

/// The JSON body of one upload call.
#[derive(Debug, Serialize)]
struct UploadPayload<'a> {
    obs_path: &'a str,
    target_path: &'a str,
}

/// An `Uploader` backed by the HTTP upload microservice.
pub struct HttpUploader {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpUploader {
    /// Create a new instance with the configured endpoint and per-call timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upload_timeout_seconds))
            .build()
            .context("error building upload service HTTP client")?;
        Ok(Self {
            client,
            endpoint: config.upload_api_url.clone(),
        })
    }

    fn outcome(task: &UploadTask, status: UploadStatus, message: String) -> UploadOutcome {
        UploadOutcome {
            product_key: task.product_key.clone(),
            obs_path: task.obs_path.clone(),
            target_path: task.target_path.clone(),
            status,
            message,
        }
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, task: &UploadTask) -> UploadOutcome {
        let payload = UploadPayload {
            obs_path: &task.obs_path,
            target_path: &task.target_path,
        };
        let res = self.client.post(&self.endpoint).json(&payload).send().await;
        match res {
            // Success is exactly HTTP 200.
            Ok(response) if response.status().as_u16() == 200 => Self::outcome(task, UploadStatus::Success, "upload succeeded".into()),
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                Self::outcome(task, UploadStatus::Error, format!("upload failed (status: {}, detail: {})", status, body))
            }
            Err(err) => Self::outcome(task, UploadStatus::Error, format!("upload request failed: {}", err)),
        }
    }
}
