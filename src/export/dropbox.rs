//! Dropbox file backup.
//!
//! Uploads a single local file to a remote path with overwrite semantics.
//! One call, no retry, no chunked upload session, so only suitable for small
//! files (the content-upload endpoint caps single calls at 150 MB).

use crate::error::{Result, TavleError};
use serde_json::json;
use std::path::Path;
use tracing::{debug, instrument};

const DROPBOX_UPLOAD_URL: &str = "https://content.dropboxapi.com/2/files/upload";

/// Dropbox API client.
pub struct DropboxClient {
    http: reqwest::Client,
    token: String,
}

impl DropboxClient {
    pub fn new(token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.to_string(),
        }
    }

    /// Upload a local file's bytes to `dest_path`, overwriting any existing
    /// object at that path.
    #[instrument(skip(self), fields(local = %local_path.display(), dest = %dest_path))]
    pub async fn upload_file(&self, local_path: &Path, dest_path: &str) -> Result<()> {
        let bytes = tokio::fs::read(local_path).await?;
        debug!("Uploading {} bytes to Dropbox", bytes.len());

        let api_arg = json!({
            "path": dest_path,
            "mode": "overwrite",
            "autorename": false,
            "mute": false,
        });

        let response = self
            .http
            .post(DROPBOX_UPLOAD_URL)
            .bearer_auth(&self.token)
            .header("Dropbox-API-Arg", api_arg.to_string())
            .header("Content-Type", "application/octet-stream")
            .body(bytes)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(TavleError::Dropbox(format!("{}: {}", status, body)))
        }
    }
}
