//! Dataset retrieval for neo4j-import
//!
//! This crate turns a location (local path or HTTP/HTTPS URL) plus a declared
//! data shape into one or more in-memory [`TabularDataset`]s.
//!
//! # Source Types
//!
//! - **Local**: a file on the local filesystem
//! - **Remote**: an HTTP/HTTPS URL, downloaded into the fetcher's scratch directory first
//!
//! # Archive Kinds
//!
//! - **Csv**: the location is a single CSV file
//! - **Zip** / **Tar**: the archive is unpacked and every regular file inside it
//!   is parsed as CSV. Gzip-compressed tarballs are accepted as `Tar`.
//!
//! The archive kind is declared by the caller and never sniffed from the
//! content; a mismatch surfaces as an extraction or parse failure.
//!
//! # Example
//!
//! ```ignore
//! use neo4j_import_file::{ArchiveKind, DataSource, Fetcher, FetcherConfig, RetrievalSpec};
//!
//! let fetcher = Fetcher::new(FetcherConfig::default())?;
//! let mut spec = RetrievalSpec::new(
//!     DataSource::parse("https://example.com/dataset.zip"),
//!     ArchiveKind::Zip,
//! );
//! let datasets = fetcher.retrieve(&mut spec).await?;
//! // spec.source now points at the downloaded copy
//! ```

mod archive;
mod error;
mod http;
mod local;
mod table;

use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

pub use archive::{extract_tar, extract_zip};
pub use error::{FetchError, ParseError, Result, RetrievalError};
pub use http::HttpDownloader;
pub use local::list_files_recursive;
pub use table::{DatasetSummary, TabularDataset};

/// Default bound on a single download (connect + transfer)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the data lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Local filesystem path
    Local(PathBuf),
    /// HTTP/HTTPS URL
    Remote(String),
}

impl DataSource {
    /// Parse a string into a DataSource
    ///
    /// - `http://` or `https://` -> Remote
    /// - Everything else -> Local
    pub fn parse(uri: &str) -> Self {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            DataSource::Remote(uri.to_string())
        } else {
            DataSource::Local(PathBuf::from(uri))
        }
    }

    /// Get a display name for logging
    pub fn display_name(&self) -> String {
        match self {
            DataSource::Local(path) => path.display().to_string(),
            DataSource::Remote(url) => url.clone(),
        }
    }
}

/// Declared shape of the data at a [`DataSource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// A single CSV file
    Csv,
    /// A zip archive of CSV files
    Zip,
    /// A tar archive (optionally gzip-compressed) of CSV files
    Tar,
}

/// What to retrieve and how to interpret it.
///
/// After a successful remote retrieval `source` is rewritten to
/// [`DataSource::Local`] pointing at the downloaded copy, so a second
/// `retrieve` call reads from disk instead of the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalSpec {
    pub source: DataSource,
    pub kind: ArchiveKind,
}

impl RetrievalSpec {
    pub fn new(source: DataSource, kind: ArchiveKind) -> Self {
        Self { source, kind }
    }
}

/// Configuration for a [`Fetcher`]
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Bound on each download
    pub timeout: Duration,
    /// CSV field delimiter
    pub delimiter: u8,
    /// Leave downloads and extracted files on disk after the fetcher is dropped
    pub persist_scratch: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            delimiter: b',',
            persist_scratch: false,
        }
    }
}

enum Scratch {
    Scoped(TempDir),
    Persistent(PathBuf),
}

impl Scratch {
    fn path(&self) -> &Path {
        match self {
            Scratch::Scoped(dir) => dir.path(),
            Scratch::Persistent(path) => path,
        }
    }
}

/// Retrieves datasets into memory.
///
/// Every download and extraction lands in a scratch directory owned by the
/// fetcher. The directory is removed when the fetcher is dropped unless
/// [`FetcherConfig::persist_scratch`] is set.
pub struct Fetcher {
    config: FetcherConfig,
    downloader: HttpDownloader,
    scratch: Scratch,
}

impl Fetcher {
    pub fn new(config: FetcherConfig) -> Result<Self, RetrievalError> {
        let dir = tempfile::Builder::new()
            .prefix("neo4j-import-")
            .tempdir()
            .map_err(|e| RetrievalError::io(std::env::temp_dir(), e))?;
        let scratch = if config.persist_scratch {
            Scratch::Persistent(dir.keep())
        } else {
            Scratch::Scoped(dir)
        };
        let downloader = HttpDownloader::new(config.timeout)?;

        tracing::debug!("Fetcher scratch directory: {}", scratch.path().display());

        Ok(Self {
            config,
            downloader,
            scratch,
        })
    }

    /// Directory holding downloads and extracted archives
    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }

    /// Retrieve the data described by `spec` and parse it into datasets.
    ///
    /// A `Csv` spec yields exactly one dataset. Archive specs yield one
    /// dataset per regular file in the archive, in the order given by
    /// [`list_files_recursive`]. The first file that fails to parse aborts
    /// the whole batch.
    pub async fn retrieve(&self, spec: &mut RetrievalSpec) -> Result<Vec<TabularDataset>> {
        tracing::info!(
            "Retrieving {:?} data from: {}",
            spec.kind,
            spec.source.display_name()
        );

        let location = match spec.source.clone() {
            DataSource::Local(path) => path,
            DataSource::Remote(url) => {
                let path = self.downloader.download(&url, self.scratch.path()).await?;
                tracing::debug!("Downloaded {} to {}", url, path.display());
                spec.source = DataSource::Local(path.clone());
                path
            }
        };

        let datasets = match spec.kind {
            ArchiveKind::Csv => {
                vec![TabularDataset::from_path(&location, self.config.delimiter)?]
            }
            ArchiveKind::Zip => {
                let dir = self.extraction_dir()?;
                extract_zip(&location, &dir)?;
                self.parse_all(&dir)?
            }
            ArchiveKind::Tar => {
                let dir = self.extraction_dir()?;
                extract_tar(&location, &dir)?;
                self.parse_all(&dir)?
            }
        };

        tracing::info!(
            "Retrieved {} dataset(s) from {}",
            datasets.len(),
            location.display()
        );

        Ok(datasets)
    }

    fn extraction_dir(&self) -> Result<PathBuf, RetrievalError> {
        let dir = tempfile::Builder::new()
            .prefix("extract-")
            .tempdir_in(self.scratch.path())
            .map_err(|e| RetrievalError::io(self.scratch.path(), e))?;
        Ok(dir.keep())
    }

    fn parse_all(&self, dir: &Path) -> Result<Vec<TabularDataset>> {
        let files = list_files_recursive(dir)?;
        let mut datasets = Vec::with_capacity(files.len());
        for file in files {
            tracing::debug!("Parsing extracted file: {}", file.display());
            datasets.push(TabularDataset::from_path(&file, self.config.delimiter)?);
        }
        Ok(datasets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_local_file() {
        let source = DataSource::parse("/data/file.csv");
        assert_eq!(source, DataSource::Local(PathBuf::from("/data/file.csv")));
    }

    #[test]
    fn test_parse_http_url() {
        let source = DataSource::parse("https://example.com/data.zip");
        assert!(matches!(source, DataSource::Remote(_)));
        let source = DataSource::parse("http://example.com/data.zip");
        assert!(matches!(source, DataSource::Remote(_)));
    }

    #[tokio::test]
    async fn test_retrieve_local_csv() {
        let fetcher = Fetcher::new(FetcherConfig::default()).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name,age\nAlice,30\nBob,25\n").unwrap();
        file.flush().unwrap();

        let mut spec = RetrievalSpec::new(
            DataSource::Local(file.path().to_path_buf()),
            ArchiveKind::Csv,
        );
        let datasets = fetcher.retrieve(&mut spec).await.unwrap();

        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].row_count(), 2);
        // local sources are left untouched
        assert_eq!(spec.source, DataSource::Local(file.path().to_path_buf()));
    }

    #[tokio::test]
    async fn test_retrieve_tar_fails_fast_on_bad_file() {
        let fetcher = Fetcher::new(FetcherConfig::default()).unwrap();
        let temp_dir = tempfile::TempDir::new().unwrap();
        let archive = temp_dir.path().join("data.tar");

        let mut builder = tar::Builder::new(Vec::new());
        for (name, contents) in [("a.csv", "x,y\n1,2\n"), ("b.csv", "x,y\n1,2,3\n")] {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, contents.as_bytes())
                .unwrap();
        }
        std::fs::write(&archive, builder.into_inner().unwrap()).unwrap();

        let mut spec = RetrievalSpec::new(DataSource::Local(archive), ArchiveKind::Tar);
        let err = fetcher.retrieve(&mut spec).await.unwrap_err();
        match err {
            FetchError::Parse(e) => assert!(e.path.ends_with("b.csv")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_retrieve_missing_csv() {
        let fetcher = Fetcher::new(FetcherConfig::default()).unwrap();
        let mut spec = RetrievalSpec::new(
            DataSource::Local(PathBuf::from("/nonexistent/data.csv")),
            ArchiveKind::Csv,
        );
        assert!(matches!(
            fetcher.retrieve(&mut spec).await,
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn test_scratch_removed_on_drop() {
        let fetcher = Fetcher::new(FetcherConfig::default()).unwrap();
        let scratch = fetcher.scratch_dir().to_path_buf();
        assert!(scratch.is_dir());
        drop(fetcher);
        assert!(!scratch.exists());
    }

    #[test]
    fn test_scratch_persisted() {
        let config = FetcherConfig {
            persist_scratch: true,
            ..Default::default()
        };
        let fetcher = Fetcher::new(config).unwrap();
        let scratch = fetcher.scratch_dir().to_path_buf();
        drop(fetcher);
        assert!(scratch.is_dir());
        std::fs::remove_dir_all(scratch).unwrap();
    }
}
