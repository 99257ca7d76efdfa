//! Error types for import statement generation and execution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while staging, building or executing an import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The staged file does not live under the import root.
    #[error("{} is not inside the import root {}", path.display(), root.display())]
    PathOutsideImportRoot { path: PathBuf, root: PathBuf },

    /// The import root itself is unusable.
    #[error("Invalid import root: {0}")]
    InvalidImportRoot(String),

    /// `execute` was called before any statement was built.
    #[error("No import statement has been built; call a node_from_* method first")]
    StatementNotBuilt,

    /// The database rejected the statement.
    #[error("Failed to execute import statement")]
    Execution {
        statement: String,
        #[source]
        source: anyhow::Error,
    },

    /// A label or property key cannot be expressed as a Cypher identifier.
    #[error("Invalid Cypher identifier: {0:?}")]
    InvalidIdentifier(String),

    /// An index was requested for a node pattern without labels.
    #[error("Index on property '{0}' requires at least one label")]
    IndexWithoutLabel(String),

    /// A schema column is missing from the dataset.
    #[error("Column '{column}' not found in dataset '{dataset}'")]
    UnknownColumn { column: String, dataset: String },

    /// Writing the staged CSV failed.
    #[error("Failed to stage CSV in {}: {reason}", dir.display())]
    Staging { dir: PathBuf, reason: String },

    /// The requested capability does not exist yet.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

pub type Result<T> = std::result::Result<T, ImportError>;
