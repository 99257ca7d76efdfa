//! HTTP/HTTPS downloads into the fetcher's scratch directory

use crate::error::RetrievalError;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Downloads a remote resource to a local file
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    /// Create a downloader whose requests (connect + body) are bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self, RetrievalError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| RetrievalError::Request {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }

    /// Fetch `url` and write the body to a new file inside `dir`.
    ///
    /// The file is kept on disk; its lifetime follows `dir`.
    pub async fn download(&self, url: &str, dir: &Path) -> Result<PathBuf, RetrievalError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| RetrievalError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Status {
                url: url.to_string(),
                status,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| RetrievalError::Request {
                url: url.to_string(),
                source,
            })?;

        tracing::debug!("Fetched {} bytes from: {}", bytes.len(), url);

        let mut file = tempfile::Builder::new()
            .prefix("download-")
            .tempfile_in(dir)
            .map_err(|e| RetrievalError::io(dir, e))?;
        file.write_all(&bytes)
            .map_err(|e| RetrievalError::io(file.path(), e))?;
        let (_, path) = file
            .keep()
            .map_err(|e| RetrievalError::io(dir, e.error))?;

        Ok(path)
    }
}
