//! Command-line interface for neo4j-import
//!
//! # Usage Examples
//!
//! ## Inspect a dataset
//! ```bash
//! neo4j-import fetch --source https://example.com/dataset.zip --kind zip
//! neo4j-import fetch --source ./people.csv --kind csv --format json
//! ```
//!
//! ## Generate node imports
//! ```bash
//! # Dry run: stage the CSV files and print the statements
//! neo4j-import nodes \
//!   --source https://example.com/dataset.tar.gz --kind tar \
//!   --import-dir /var/lib/neo4j/import --import-subdir staging \
//!   --label Person --property name --property age --id-column name
//!
//! # Run them against Neo4j
//! neo4j-import nodes \
//!   --source ./people.csv --kind csv \
//!   --import-dir /var/lib/neo4j/import --label Person \
//!   --execute --neo4j-uri bolt://localhost:7687 --neo4j-password secret
//!
//! # Build from a file already inside the import directory
//! neo4j-import nodes-from-file \
//!   --file /var/lib/neo4j/import/people.csv \
//!   --import-dir /var/lib/neo4j/import --label Person
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use neo4j_import::config::{parse_delimiter, parse_duration};
use neo4j_import::fetch::{ArchiveKind, FetcherConfig, TabularDataset};
use neo4j_import::neo4j_client::new_neo4j_client;
use neo4j_import::pipeline::{self, NodeImportConfig};
use neo4j_import::query::ImportQueryBuilder;
use neo4j_import::Neo4jOpts;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "neo4j-import")]
#[command(about = "A tool for importing tabular datasets into Neo4j with LOAD CSV")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Retrieve a dataset and print the tables it contains
    Fetch {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Retrieve a dataset, stage it in the import directory and build node imports
    Nodes {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        import: ImportArgs,

        /// Run the statements instead of printing them
        #[arg(long)]
        execute: bool,

        #[command(flatten)]
        neo4j: Neo4jOpts,
    },

    /// Build a node import for a CSV file already inside the import directory
    NodesFromFile {
        /// Staged CSV file
        #[arg(long)]
        file: PathBuf,

        /// CSV field delimiter of the file's header row
        #[arg(long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,

        #[command(flatten)]
        import: ImportArgs,

        /// Run the statement instead of printing it
        #[arg(long)]
        execute: bool,

        #[command(flatten)]
        neo4j: Neo4jOpts,
    },
}

#[derive(Args, Clone, Debug)]
struct SourceArgs {
    /// Local path or HTTP/HTTPS URL
    #[arg(long)]
    source: String,

    /// Declared shape of the data at the source
    #[arg(long, value_enum, default_value = "zip")]
    kind: SourceKind,

    /// Download timeout (e.g. "30s", "5m")
    #[arg(long, default_value = "30s", value_parser = parse_duration)]
    timeout: Duration,

    /// CSV field delimiter
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Keep downloaded and extracted files after exit
    #[arg(long)]
    keep_temp: bool,
}

impl SourceArgs {
    fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            timeout: self.timeout,
            delimiter: self.delimiter,
            persist_scratch: self.keep_temp,
        }
    }
}

#[derive(Args, Clone, Debug)]
struct ImportArgs {
    /// Neo4j import directory (absolute path)
    #[arg(long, env = "NEO4J_IMPORT_DIR")]
    import_dir: PathBuf,

    /// Staging sub-directory relative to the import directory
    #[arg(long)]
    import_subdir: Option<PathBuf>,

    /// Label for the created nodes (repeatable)
    #[arg(long = "label", value_name = "LABEL")]
    labels: Vec<String>,

    /// Column imported as a property (repeatable; default: all columns)
    #[arg(long = "property", value_name = "COLUMN")]
    properties: Vec<String>,

    /// Column to index
    #[arg(long)]
    id_column: Option<String>,

    /// Rows per periodic commit
    #[arg(long)]
    commit_size: Option<u64>,
}

impl From<ImportArgs> for NodeImportConfig {
    fn from(args: ImportArgs) -> Self {
        Self {
            import_dir: args.import_dir,
            import_subdir: args.import_subdir.unwrap_or_default(),
            labels: args.labels,
            properties: args.properties,
            id_column: args.id_column,
            commit_size: args.commit_size,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
enum SourceKind {
    /// A single CSV file
    #[value(name = "csv")]
    Csv,
    /// Zip archive of CSV files
    #[value(name = "zip")]
    Zip,
    /// Tar archive (optionally gzipped) of CSV files
    #[value(name = "tar")]
    Tar,
}

impl From<SourceKind> for ArchiveKind {
    fn from(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Csv => ArchiveKind::Csv,
            SourceKind::Zip => ArchiveKind::Zip,
            SourceKind::Tar => ArchiveKind::Tar,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // reqwest and neo4rs both pull in rustls; pin the provider once
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { source, format } => {
            let datasets = pipeline::fetch_datasets(
                &source.source,
                source.kind.clone().into(),
                source.fetcher_config(),
            )
            .await?;
            print_datasets(&datasets, &format)?;
        }
        Commands::Nodes {
            source,
            import,
            execute,
            neo4j,
        } => {
            let datasets = pipeline::fetch_datasets(
                &source.source,
                source.kind.clone().into(),
                source.fetcher_config(),
            )
            .await?;
            let config = NodeImportConfig::from(import);
            let mut builders = pipeline::build_node_imports(&datasets, &config)?;
            finish(&mut builders, execute, &neo4j).await?;
        }
        Commands::NodesFromFile {
            file,
            delimiter,
            import,
            execute,
            neo4j,
        } => {
            let config = NodeImportConfig::from(import);
            let builder = pipeline::build_node_import_from_file(&file, delimiter, &config)?;
            finish(&mut [builder], execute, &neo4j).await?;
        }
    }

    Ok(())
}

async fn finish(
    builders: &mut [ImportQueryBuilder],
    execute: bool,
    neo4j: &Neo4jOpts,
) -> anyhow::Result<()> {
    if execute {
        let graph = new_neo4j_client(neo4j).await?;
        let count = pipeline::execute_all(builders, &graph).await?;
        tracing::info!("Import finished: {count} statement(s) executed");
    } else {
        for statement in builders.iter().filter_map(|b| b.statement()) {
            println!("{statement}");
        }
    }
    Ok(())
}

fn print_datasets(datasets: &[TabularDataset], format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for dataset in datasets {
                println!(
                    "{}: {} rows, columns: {}",
                    dataset.name(),
                    dataset.row_count(),
                    dataset.columns().join(", ")
                );
            }
        }
        OutputFormat::Json => {
            let summaries: Vec<_> = datasets.iter().map(TabularDataset::summary).collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }
    Ok(())
}
