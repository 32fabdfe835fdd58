use colored::*;
use futures_util::StreamExt;
use reqwest::Client;
use std::path::PathBuf;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{CatalogError, Result};

pub const DEFAULT_OUT_DIR: &str = "downloads";

/// Streams remote files into a local output directory.
pub struct Downloader {
    client: Client,
    out_dir: PathBuf,
}

impl Downloader {
    pub fn new(client: Client, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            out_dir: out_dir.into(),
        }
    }

    /// Download `url` to `<out_dir>/<filename>`, replacing any existing file.
    ///
    /// The body is written chunk by chunk as it arrives and is never held in
    /// memory as a whole.
    pub async fn download(&self, url: &str, filename: &str) -> Result<PathBuf> {
        info!("Downloading \"{}\" into \"{}\"", url.green(), filename.blue());

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        fs::create_dir_all(&self.out_dir).await?;
        let path = self.out_dir.join(filename);
        let mut file = File::create(&path).await?;

        let mut written = 0usize;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len();
        }
        file.flush().await?;

        debug!("Wrote {} bytes to {}", written, path.display());
        Ok(path)
    }
}
