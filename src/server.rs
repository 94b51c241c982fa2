//! The HTTP API server.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use axum::routing::{get, post, Router};
use axum::AddExtensionLayer;
use futures::prelude::*;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::handler::{self, AppState};
use crate::models::{ProductSummary, UploadRequest};

/// Spawn the HTTP server serving the upload API and healthcheck.
pub fn spawn_http_server(config: &Config, state: Arc<AppState>, mut shutdown: broadcast::Receiver<()>) -> JoinHandle<Result<()>> {
    let app = Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .route("/api/start-upload", post(start_upload))
        .layer(AddExtensionLayer::new(state));
    let server = axum::Server::bind(&([0, 0, 0, 0], config.http_port).into())
        .serve(app.into_make_service())
        .with_graceful_shutdown(async move {
            let _res = shutdown.recv().await;
        });
    tracing::info!("HTTP server is listening at 0.0.0.0:{}", config.http_port);
    tokio::spawn(server.map_err(anyhow::Error::from))
}

/// Handle an upload request from the front end.
///
/// Always answers 200; every failure mode is encoded as per-product
/// `status: "error"` entries in the body.
async fn start_upload(Extension(state): Extension<Arc<AppState>>, Json(request): Json<UploadRequest>) -> axum::Json<Vec<ProductSummary>> {
    let summaries = handler::handle_upload(&state, request).await;
    axum::Json(summaries)
}
