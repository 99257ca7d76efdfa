//! Staging datasets and building node-import statements.

use crate::clause::{CreateClause, ImportStatement, IndexClause, LoadCsvClause, PeriodicCommit};
use crate::cypher::Identifier;
use crate::error::{ImportError, Result};
use crate::import_root::ImportRoot;
use crate::link::RelationshipImport;
use crate::schema::NodeSchema;
use crate::session::{ExecutionSummary, WriteSession};
use neo4j_import_file::TabularDataset;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

/// Builds `LOAD CSV` node-import statements for one import root.
///
/// The builder remembers the last statement it built until it is executed.
/// Methods take `&mut self`; use one builder per import job.
#[derive(Debug)]
pub struct ImportQueryBuilder {
    root: ImportRoot,
    commit: PeriodicCommit,
    statement: Option<ImportStatement>,
}

impl ImportQueryBuilder {
    pub fn new(root: ImportRoot) -> Self {
        Self {
            root,
            commit: PeriodicCommit::default(),
            statement: None,
        }
    }

    /// Rows per periodic commit. Without it the database default applies.
    pub fn with_commit_size(mut self, rows: u64) -> Self {
        self.commit = PeriodicCommit {
            batch_size: Some(rows),
        };
        self
    }

    pub fn root(&self) -> &ImportRoot {
        &self.root
    }

    /// The statement waiting to be executed, if any.
    pub fn statement(&self) -> Option<&ImportStatement> {
        self.statement.as_ref()
    }

    /// Write `dataset` to a new CSV file in the import directory and build a
    /// statement loading it.
    pub fn node_from_dataset(
        &mut self,
        dataset: &TabularDataset,
        schema: &NodeSchema,
    ) -> Result<&ImportStatement> {
        let referenced = schema
            .property_columns()
            .iter()
            .map(String::as_str)
            .chain(schema.identifier_column());
        for column in referenced {
            if !dataset.has_column(column) {
                return Err(ImportError::UnknownColumn {
                    column: column.to_string(),
                    dataset: dataset.name().to_string(),
                });
            }
        }

        let staged = self.stage(dataset)?;
        // an unbuildable schema drops the temp file before it is kept
        let statement = self.build_statement(staged.path(), schema)?;
        let path = staged
            .into_temp_path()
            .keep()
            .map_err(|e| self.staging_error(e.error.to_string()))?;
        info!(
            "Staged {} rows from '{}' at {}",
            dataset.row_count(),
            dataset.name(),
            path.display()
        );
        debug!("Generated import statement: {}", statement);
        Ok(&*self.statement.insert(statement))
    }

    /// Build a statement loading an already staged CSV file.
    ///
    /// `path` must lie under the import root's base path.
    pub fn node_from_file(&mut self, path: &Path, schema: &NodeSchema) -> Result<&ImportStatement> {
        let statement = self.build_statement(path, schema)?;
        debug!("Generated import statement: {}", statement);
        Ok(&*self.statement.insert(statement))
    }

    /// Same as [`Self::node_from_file`] without remembering the result.
    pub fn build_statement(&self, path: &Path, schema: &NodeSchema) -> Result<ImportStatement> {
        let relative = self.root.relative_url_path(path)?;

        let labels = schema
            .label_names()
            .iter()
            .map(|l| Identifier::new(l))
            .collect::<Result<Vec<_>>>()?;
        let properties = schema
            .property_columns()
            .iter()
            .map(|p| Identifier::new(p))
            .collect::<Result<Vec<_>>>()?;

        let index = match schema.identifier_column() {
            None => None,
            Some(column) if labels.is_empty() => {
                return Err(ImportError::IndexWithoutLabel(column.to_string()))
            }
            Some(column) => {
                if !schema.property_columns().iter().any(|p| p == column) {
                    warn!("Index column '{column}' is not among the imported properties");
                }
                Some(IndexClause::new(labels.clone(), Identifier::new(column)?))
            }
        };

        Ok(ImportStatement::new(
            self.commit,
            LoadCsvClause::new(relative),
            CreateClause::new(labels, properties),
            index,
        ))
    }

    /// Run the built statement and forget it.
    ///
    /// Fails with [`ImportError::StatementNotBuilt`] without touching the
    /// session when nothing was built. On failure the statement is kept, so
    /// the caller may retry.
    pub async fn execute<S>(&mut self, session: &S) -> Result<ExecutionSummary>
    where
        S: WriteSession + ?Sized,
    {
        let statement = self.statement.as_ref().ok_or(ImportError::StatementNotBuilt)?;

        let parts = statement.parts();
        for part in &parts {
            debug!("Running: {}", part);
            session
                .run_write(part)
                .await
                .map_err(|source| ImportError::Execution {
                    statement: part.clone(),
                    source,
                })?;
        }

        info!(
            "Executed import of {} ({} statement(s))",
            statement.load().url(),
            parts.len()
        );
        self.statement = None;
        Ok(ExecutionSummary {
            statements_run: parts.len(),
        })
    }

    /// Like [`Self::execute`] but logs failures and returns `None` instead.
    pub async fn execute_or_log<S>(&mut self, session: &S) -> Option<ExecutionSummary>
    where
        S: WriteSession + ?Sized,
    {
        match self.execute(session).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                error!("Import statement failed: {e:#}");
                None
            }
        }
    }

    /// Write `dataset` to a temp file in the import directory. The file is
    /// removed on drop unless the caller keeps it.
    fn stage(&self, dataset: &TabularDataset) -> Result<NamedTempFile> {
        let dir = self.root.import_dir();
        std::fs::create_dir_all(dir).map_err(|e| self.staging_error(e.to_string()))?;
        let mut file = tempfile::Builder::new()
            .prefix("tmp")
            .suffix(".csv")
            .tempfile_in(dir)
            .map_err(|e| self.staging_error(e.to_string()))?;

        let mut writer = BufWriter::new(file.as_file_mut());
        dataset
            .write_csv(&mut writer)
            .map_err(|e| self.staging_error(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| self.staging_error(e.to_string()))?;
        drop(writer);

        Ok(file)
    }

    fn staging_error(&self, reason: String) -> ImportError {
        ImportError::Staging {
            dir: self.root.import_dir().to_path_buf(),
            reason,
        }
    }
}

impl RelationshipImport for ImportQueryBuilder {
    fn link_nodes(
        &mut self,
        _on_left: &NodeSchema,
        _on_right: &NodeSchema,
    ) -> Result<&ImportStatement> {
        Err(ImportError::NotImplemented("relationship import"))
    }
}
