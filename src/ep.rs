//! EP pipeline-result API client.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::Config;
use crate::error::EpError;
use crate::models::PipelineDocument;

/// The capability of fetching a pipeline run's recorded actions from EP.
#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// Fetch the pipeline-result document of the given task id.
    async fn fetch_results(&self, task_id: &str, token: &str) -> Result<PipelineDocument, EpError>;
}

/// A `PipelineApi` backed by the EP HTTP API.
pub struct HttpPipelineApi {
    client: reqwest::Client,
    host: String,
}

impl HttpPipelineApi {
    /// Create a new instance with the configured host and per-call timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.ep_timeout_seconds))
            .build()
            .context("error building EP HTTP client")?;
        Ok(Self {
            client,
            host: config.ep_host.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PipelineApi for HttpPipelineApi {
    async fn fetch_results(&self, task_id: &str, token: &str) -> Result<PipelineDocument, EpError> {
        let url = format!("{}/backend/pipeline/api/pipelines/result/{}", self.host, task_id);
        tracing::debug!(url = %url, "calling EP pipeline-result API");

        let response = self.client.get(&url).bearer_auth(token).send().await.map_err(|err| {
            if err.is_timeout() {
                EpError::Timeout
            } else {
                EpError::Upstream(err.to_string())
            }
        })?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(EpError::Auth(status.as_u16()));
        }
        if !status.is_success() {
            return Err(EpError::Upstream(format!("unexpected status {} from EP", status)));
        }

        response
            .json::<PipelineDocument>()
            .await
            .map_err(|err| EpError::Upstream(format!("error decoding EP response body: {}", err)))
    }
}
