//! Local filesystem enumeration

use crate::error::RetrievalError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List every regular file under `root`, recursively.
///
/// Traversal is depth-first with entries sorted by file name at each level,
/// so the order is stable for a given directory tree.
pub fn list_files_recursive(root: &Path) -> Result<Vec<PathBuf>, RetrievalError> {
    let mut results = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            RetrievalError::io(path, e.into())
        })?;
        if entry.file_type().is_file() {
            results.push(entry.into_path());
        }
    }

    tracing::debug!(
        "Listed {} files under directory: {}",
        results.len(),
        root.display()
    );

    Ok(results)
}
