//! Persisted EP API token storage.
//!
//! The token lives in a dotenv-style file as `EP_API_TOKEN=<value>`. All
//! reads and writes go through one mutex so concurrent requests can never
//! interleave their writes.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::sync::Mutex;

/// The credential file key holding the EP API token.
const TOKEN_KEY: &str = "EP_API_TOKEN";

/// The on-disk EP API token store.
pub struct CredentialStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CredentialStore {
    /// Create a new store over the given file path. The file itself is only
    /// touched by `get`/`set`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Read the stored token, `None` when the file or the key is absent.
    pub async fn get(&self) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err).context("error reading credential file"),
        };
        Ok(contents
            .lines()
            .filter_map(|line| line.trim().strip_prefix(TOKEN_KEY))
            .filter_map(|rest| rest.strip_prefix('='))
            .map(|val| val.trim().to_string())
            .find(|val| !val.is_empty()))
    }

    /// Persist the given token, creating the file if absent, else updating the
    /// key in place. Unrelated lines of the file are preserved.
    pub async fn set(&self, token: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err).context("error reading credential file"),
        };

        let mut lines: Vec<String> = Vec::new();
        let mut replaced = false;
        for line in contents.lines() {
            if line.trim().starts_with(&format!("{}=", TOKEN_KEY)) && !replaced {
                lines.push(format!("{}={}", TOKEN_KEY, token));
                replaced = true;
            } else {
                lines.push(line.to_string());
            }
        }
        if !replaced {
            lines.push(format!("{}={}", TOKEN_KEY, token));
        }

        let mut updated = lines.join("\n");
        updated.push('\n');
        tokio::fs::write(&self.path, updated).await.context("error writing credential file")?;
        tracing::info!(path = %self.path.display(), "persisted updated EP API token");
        Ok(())
    }
}
