//! Image fetch side-task: download listing images referenced by imported
//! rows and store them locally under content-addressed names.
//!
//! Failures here are never fatal to the owning row — a listing without a
//! mirrored image still scores and ranks; the raw remote URL stays on the
//! row.

use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use sha2::{Digest, Sha256};

use crate::error::IngestError;
use crate::retry::retry_with_backoff;

/// Stored filenames use the first 16 hex chars of the content hash; enough
/// to dedup identical images across uploads without unwieldy names.
const HASH_PREFIX_LEN: usize = 16;

pub struct ImageFetcher {
    client: reqwest::Client,
    image_dir: PathBuf,
    max_concurrent: usize,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl ImageFetcher {
    /// Builds the HTTP client and ensures the storage directory exists.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Http`] if the client cannot be built, or
    /// [`IngestError::Store`] if the directory cannot be created.
    pub fn new(
        image_dir: &Path,
        timeout_secs: u64,
        user_agent: &str,
        max_concurrent: usize,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, IngestError> {
        std::fs::create_dir_all(image_dir).map_err(|e| IngestError::Store {
            path: image_dir.display().to_string(),
            source: e,
        })?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            image_dir: image_dir.to_path_buf(),
            max_concurrent: max_concurrent.max(1),
            max_retries,
            backoff_base_ms,
        })
    }

    /// Builds a fetcher from the application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`ImageFetcher::new`].
    pub fn from_app_config(config: &xpick_core::AppConfig) -> Result<Self, IngestError> {
        Self::new(
            &config.image_dir,
            config.image_request_timeout_secs,
            &config.image_user_agent,
            config.image_max_concurrent,
            config.image_max_retries,
            config.image_retry_backoff_ms,
        )
    }

    /// Downloads one image with bounded retries and writes it under the
    /// storage directory. Returns the stored file path.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnsupportedScheme`] for non-http(s) URLs,
    /// [`IngestError::Http`]/[`IngestError::UnexpectedStatus`] once retries
    /// are exhausted, or [`IngestError::Store`] if the write fails.
    pub async fn fetch_and_store(&self, url: &str) -> Result<PathBuf, IngestError> {
        if !is_http_url(url) {
            return Err(IngestError::UnsupportedScheme {
                url: url.to_string(),
            });
        }

        let (bytes, content_type) =
            retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(IngestError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                let content_type = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("image/jpeg")
                    .to_string();
                let bytes = response.bytes().await?;
                Ok((bytes, content_type))
            })
            .await?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hasher.finalize();
        let mut name = String::with_capacity(HASH_PREFIX_LEN + 4);
        for byte in digest.iter().take(HASH_PREFIX_LEN / 2) {
            name.push_str(&format!("{byte:02x}"));
        }
        name.push('.');
        name.push_str(extension_for(&content_type));

        let path = self.image_dir.join(name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| IngestError::Store {
                path: path.display().to_string(),
                source: e,
            })?;

        Ok(path)
    }

    /// Drains a queue of `(row_id, url)` tasks through a bounded worker
    /// pool. Individual failures are logged and yield `None`; the batch
    /// always completes.
    pub async fn fetch_batch(&self, tasks: Vec<(i64, String)>) -> Vec<(i64, Option<PathBuf>)> {
        stream::iter(tasks.into_iter().map(|(row_id, url)| async move {
            match self.fetch_and_store(&url).await {
                Ok(path) => (row_id, Some(path)),
                Err(e) => {
                    tracing::warn!(row_id, url = %url, error = %e, "image fetch abandoned");
                    (row_id, None)
                }
            }
        }))
        .buffer_unordered(self.max_concurrent)
        .collect()
        .await
    }
}

/// `true` for http/https URLs, ASCII-case-insensitively.
pub(crate) fn is_http_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// File extension for a Content-Type header value.
fn extension_for(content_type: &str) -> &'static str {
    let subtype = content_type
        .split('/')
        .nth(1)
        .unwrap_or("")
        .split(';')
        .next()
        .unwrap_or("")
        .trim();
    match subtype {
        "png" => "png",
        "gif" => "gif",
        "webp" => "webp",
        "avif" => "avif",
        "svg+xml" => "svg",
        _ => "jpg",
    }
}
