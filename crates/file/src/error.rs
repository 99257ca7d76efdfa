//! Error types for dataset retrieval.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while getting the raw bytes of a dataset onto the local disk.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("Failed to fetch URL {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP request failed with status {status} for URL: {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Local filesystem failure.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive could not be opened or unpacked.
    #[error("Failed to extract archive {}: {reason}", path.display())]
    Extraction { path: PathBuf, reason: String },
}

impl RetrievalError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RetrievalError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn extraction(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        RetrievalError::Extraction {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// A file could not be read as a delimited-text table.
#[derive(Debug, Error)]
#[error("Failed to parse {} as CSV: {source}", path.display())]
pub struct ParseError {
    pub path: PathBuf,
    #[source]
    pub source: csv::Error,
}

/// Any error produced by [`crate::Fetcher::retrieve`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T, E = FetchError> = std::result::Result<T, E>;
