//! Runtime configuration.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Runtime configuration data.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// The server's logging config, which uses Rust's `env_logger` directives.
    pub rust_log: String,
    /// The port on which the HTTP API listens.
    #[serde(default = "Config::default_http_port")]
    pub http_port: u16,

    /// The base URL of the EP host serving the pipeline-result API.
    #[serde(default = "Config::default_ep_host")]
    pub ep_host: String,
    /// The EP API bearer token to fall back on when the credential file holds none.
    #[serde(default)]
    pub ep_api_token: Option<String>,
    /// The path of the credential file holding the persisted EP API token.
    #[serde(default = "Config::default_token_file_path")]
    pub token_file_path: String,
    /// The timeout in seconds applied to each EP API call.
    #[serde(default = "Config::default_ep_timeout_seconds")]
    pub ep_timeout_seconds: u64,

    /// The URL of the upload microservice endpoint.
    #[serde(default = "Config::default_upload_api_url")]
    pub upload_api_url: String,
    /// The timeout in seconds applied to each upload call.
    #[serde(default = "Config::default_upload_timeout_seconds")]
    pub upload_timeout_seconds: u64,
}

impl Config {
    /// Create a new config instance.
    ///
    /// Currently this routine just parses the runtime environment and builds the application
    /// config from that. In the future, this may take into account an optional config file as
    /// well.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Result<Self> {
        let config: Config = envy::from_env().context("error building config from env")?;
        Ok(config)
    }

    fn default_http_port() -> u16 {
        8000
    }

    fn default_ep_host() -> String {
        "https://ep.momenta.works".into()
    }

    fn default_token_file_path() -> String {
        ".env".into()
    }

    fn default_ep_timeout_seconds() -> u64 {
        15
    }

    fn default_upload_api_url() -> String {
        "http://10.21.15.30:8087/upload/".into()
    }

    fn default_upload_timeout_seconds() -> u64 {
        300
    }
}
