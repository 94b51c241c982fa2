//! The OBS relay service.
//!
//! Bridges the EP pipeline-result API and the OBS upload microservice: callers
//! request a set of products for a pipeline run, the relay discovers the source
//! OBS paths from the run's recorded actions and issues one upload per file.

mod aggregate;
mod app;
mod catalog;
mod config;
mod credentials;
#[cfg(test)]
mod credentials_test;
mod ep;
mod error;
mod extract;
#[cfg(test)]
mod fixtures;
mod handler;
mod models;
#[cfg(test)]
mod models_test;
mod server;
mod target;
mod tasks;
mod uploader;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;

use crate::app::App;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup tracing/logging system.
    tracing_subscriber::registry()
        // Filter spans based on the RUST_LOG env var.
        .with(tracing_subscriber::EnvFilter::from_default_env())
        // Send a copy of all spans to stdout in compact form.
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(true),
        )
        // Install this registry as the global tracing registry.
        .try_init()
        .context("error initializing logging/tracing system")?;

    let cfg = Arc::new(Config::new()?);
    tracing::info!(
        http_port = %cfg.http_port,
        ep_host = %cfg.ep_host,
        upload_api_url = %cfg.upload_api_url,
        token_file_path = %cfg.token_file_path,
        "starting OBS relay",
    );
    let res = App::new(cfg).await?.spawn().await.context("error joining app task").and_then(|inner| inner);
    if let Err(err) = res {
        tracing::error!(error = ?err);
    }

    // Ensure any pending output is flushed.
    let _ = std::io::stdout().flush();
    let _ = std::io::stderr().flush();

    Ok(())
}
