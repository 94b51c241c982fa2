use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::StreamExt;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::{BroadcastStream, SignalStream};
use tokio_stream::StreamMap;

use crate::catalog::ProductCatalog;
use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::ep::HttpPipelineApi;
use crate::handler::AppState;
use crate::server::spawn_http_server;
use crate::uploader::HttpUploader;

/// The application object for when the relay is running as a server.
pub struct App {
    /// The application's runtime config.
    _config: Arc<Config>,

    /// A channel used for triggering graceful shutdown.
    shutdown_tx: broadcast::Sender<()>,
    /// A channel used for triggering graceful shutdown.
    shutdown_rx: BroadcastStream<()>,

    /// The join handle of the HTTP server.
    http_server: JoinHandle<Result<()>>,
}

impl App {
    /// Create a new instance.
    pub async fn new(config: Arc<Config>) -> Result<Self> {
        let (shutdown_tx, _) = broadcast::channel(100);

        let state = Arc::new(AppState {
            config: config.clone(),
            catalog: ProductCatalog::default(),
            credentials: CredentialStore::new(config.token_file_path.clone()),
            ep: Arc::new(HttpPipelineApi::new(&config).context("error building EP client")?),
            uploader: Arc::new(HttpUploader::new(&config).context("error building uploader client")?),
        });

        let http_server = spawn_http_server(&config, state, shutdown_tx.subscribe());

        Ok(Self {
            _config: config,
            shutdown_rx: BroadcastStream::new(shutdown_tx.subscribe()),
            shutdown_tx,
            http_server,
        })
    }

    pub fn spawn(self) -> JoinHandle<Result<()>> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) -> Result<()> {
        let mut signals = StreamMap::new();
        signals.insert("sigterm", SignalStream::new(signal(SignalKind::terminate()).context("error building signal stream")?));
        signals.insert("sigint", SignalStream::new(signal(SignalKind::interrupt()).context("error building signal stream")?));

        loop {
            tokio::select! {
                Some((_, sig)) = signals.next() => {
                    tracing::debug!(signal = ?sig, "signal received, beginning graceful shutdown");
                    let _ = self.shutdown_tx.send(());
                    break;
                }
                _ = self.shutdown_rx.next() => break,
            }
        }

        // Begin shutdown routine.
        tracing::debug!("OBS relay is shutting down");
        if let Err(err) = self.http_server.await.context("error joining HTTP server handle").and_then(|res| res) {
            tracing::error!(error = ?err, "error shutting down HTTP server");
        }

        tracing::debug!("OBS relay shutdown complete");
        Ok(())
    }
}
