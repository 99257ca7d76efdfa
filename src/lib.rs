//! neo4j-import library
//!
//! Moves tabular datasets (remote archives or local files) into Neo4j:
//!
//! 1. [`fetch`] retrieves and parses the data into in-memory tables.
//! 2. [`query`] stages each table as a CSV file inside Neo4j's import
//!    directory and generates a `LOAD CSV` statement for it.
//! 3. The statement is run against a Neo4j session, or printed for review.
//!
//! # CLI Usage
//!
//! ```bash
//! # Inspect the tables in a remote archive
//! neo4j-import fetch --source https://example.com/movies.zip --kind zip
//!
//! # Stage and print the import statements (dry run)
//! neo4j-import nodes --source people.csv --kind csv \
//!   --import-dir /var/lib/neo4j/import --label Person --id-column name
//!
//! # Stage and run them
//! neo4j-import nodes --source people.csv --kind csv \
//!   --import-dir /var/lib/neo4j/import --label Person --execute \
//!   --neo4j-uri bolt://localhost:7687 --neo4j-password secret
//! ```

use clap::Parser;

pub mod config;
pub mod neo4j_client;
pub mod pipeline;

pub use neo4j_import_file as fetch;
pub use neo4j_import_query as query;

#[derive(Parser, Clone, Debug)]
pub struct Neo4jOpts {
    /// Neo4j connection URI
    #[arg(long, default_value = "bolt://localhost:7687", env = "NEO4J_URI")]
    pub neo4j_uri: String,

    /// Neo4j username
    #[arg(long, default_value = "neo4j", env = "NEO4J_USERNAME")]
    pub neo4j_username: String,

    /// Neo4j password (required to execute)
    #[arg(long, env = "NEO4J_PASSWORD")]
    pub neo4j_password: Option<String>,

    /// Neo4j database name
    #[arg(long, default_value = "neo4j", env = "NEO4J_DATABASE")]
    pub neo4j_database: String,
}
