//! Cypher bulk-import statement generation
//!
//! Turns a [`NodeSchema`] and a CSV file staged inside Neo4j's import
//! directory into a `LOAD CSV` statement:
//!
//! ```text
//! USING PERIODIC COMMIT LOAD CSV WITH HEADERS FROM "file:///tmpXYZ.csv" AS row
//! CREATE (:Person {name: row.name, age: row.age}); CREATE INDEX ON :Person(name);
//! ```
//!
//! Files are referenced by their path relative to the import root, never by
//! absolute path, and labels/property keys are quoted per Cypher's
//! identifier rules.
//!
//! # Example
//!
//! ```ignore
//! use neo4j_import_query::{ImportQueryBuilder, ImportRoot, NodeSchema};
//!
//! let root = ImportRoot::new("/var/lib/neo4j/import", "staging")?;
//! let mut builder = ImportQueryBuilder::new(root);
//! let schema = NodeSchema::new()
//!     .properties(["name", "age"])
//!     .identifier("name")
//!     .label("Person");
//! builder.node_from_dataset(&dataset, &schema)?;
//! builder.execute(&graph).await?;
//! ```

mod builder;
mod clause;
mod cypher;
mod error;
mod import_root;
mod link;
mod schema;
mod session;

pub use builder::ImportQueryBuilder;
pub use clause::{
    CreateClause, ImportStatement, IndexClause, LoadCsvClause, PeriodicCommit, ROW_VARIABLE,
};
pub use cypher::{string_literal, Identifier};
pub use error::{ImportError, Result};
pub use import_root::ImportRoot;
pub use link::RelationshipImport;
pub use schema::NodeSchema;
pub use session::{ExecutionSummary, WriteSession};
