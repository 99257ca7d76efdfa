//! Fetch -> stage -> build -> execute.

use anyhow::{Context, Result};
use neo4j_import_file::{
    ArchiveKind, DataSource, Fetcher, FetcherConfig, RetrievalSpec, TabularDataset,
};
use neo4j_import_query::{ImportQueryBuilder, ImportRoot, NodeSchema, WriteSession};
use std::path::{Path, PathBuf};
use tracing::info;

/// How datasets become nodes
#[derive(Debug, Clone, Default)]
pub struct NodeImportConfig {
    /// Neo4j import directory (absolute)
    pub import_dir: PathBuf,
    /// Staging sub-directory, relative to `import_dir`
    pub import_subdir: PathBuf,
    pub labels: Vec<String>,
    /// Columns to import; empty means every column of the dataset
    pub properties: Vec<String>,
    pub id_column: Option<String>,
    pub commit_size: Option<u64>,
}

impl NodeImportConfig {
    fn import_root(&self) -> Result<ImportRoot> {
        ImportRoot::new(&self.import_dir, &self.import_subdir).with_context(|| {
            format!(
                "Invalid import directory {} / {}",
                self.import_dir.display(),
                self.import_subdir.display()
            )
        })
    }

    fn builder(&self) -> Result<ImportQueryBuilder> {
        let builder = ImportQueryBuilder::new(self.import_root()?);
        Ok(match self.commit_size {
            Some(rows) => builder.with_commit_size(rows),
            None => builder,
        })
    }

    /// Node schema for one dataset
    pub fn schema_for(&self, columns: &[String]) -> NodeSchema {
        let schema = if self.properties.is_empty() {
            NodeSchema::new().properties(columns.iter().cloned())
        } else {
            NodeSchema::new().properties(self.properties.iter().cloned())
        };
        let schema = schema.labels(self.labels.iter().cloned());
        match &self.id_column {
            Some(column) => schema.identifier(column.clone()),
            None => schema,
        }
    }
}

/// Retrieve every dataset at `source`
pub async fn fetch_datasets(
    source: &str,
    kind: ArchiveKind,
    config: FetcherConfig,
) -> Result<Vec<TabularDataset>> {
    let fetcher = Fetcher::new(config).context("Failed to prepare scratch directory")?;
    let mut spec = RetrievalSpec::new(DataSource::parse(source), kind);
    let datasets = fetcher
        .retrieve(&mut spec)
        .await
        .with_context(|| format!("Failed to retrieve {source}"))?;
    Ok(datasets)
}

/// Stage each dataset and build its statement, one builder per dataset
pub fn build_node_imports(
    datasets: &[TabularDataset],
    config: &NodeImportConfig,
) -> Result<Vec<ImportQueryBuilder>> {
    let mut builders = Vec::with_capacity(datasets.len());
    for dataset in datasets {
        let mut builder = config.builder()?;
        let schema = config.schema_for(dataset.columns());
        builder
            .node_from_dataset(dataset, &schema)
            .with_context(|| format!("Failed to build import for dataset '{}'", dataset.name()))?;
        builders.push(builder);
    }
    info!("Built {} node import statement(s)", builders.len());
    Ok(builders)
}

/// Build a statement for a CSV file already inside the import directory.
///
/// The header row is read only when no explicit properties are configured.
pub fn build_node_import_from_file(
    file: &Path,
    delimiter: u8,
    config: &NodeImportConfig,
) -> Result<ImportQueryBuilder> {
    let columns = if config.properties.is_empty() {
        TabularDataset::read_columns(file, delimiter)
            .with_context(|| format!("Failed to read header of {}", file.display()))?
    } else {
        Vec::new()
    };
    let mut builder = config.builder()?;
    let schema = config.schema_for(&columns);
    builder
        .node_from_file(file, &schema)
        .with_context(|| format!("Failed to build import for {}", file.display()))?;
    Ok(builder)
}

/// Run every built statement in order, stopping at the first failure
pub async fn execute_all<S>(builders: &mut [ImportQueryBuilder], session: &S) -> Result<usize>
where
    S: WriteSession + ?Sized,
{
    let total = builders.len();
    let mut statements_run = 0;
    for (i, builder) in builders.iter_mut().enumerate() {
        let summary = builder
            .execute(session)
            .await
            .with_context(|| format!("Import {} of {total} failed", i + 1))?;
        statements_run += summary.statements_run;
    }
    info!("Executed {} statement(s)", statements_run);
    Ok(statements_run)
}
