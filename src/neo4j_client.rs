//! Neo4j client utilities
//!
//! This module provides utilities for creating Neo4j Graph connections.

use crate::Neo4jOpts;
use anyhow::{Context, Result};
use neo4rs::{ConfigBuilder, Graph};

/// Create a new Neo4j Graph connection
pub async fn new_neo4j_client(opts: &Neo4jOpts) -> Result<Graph> {
    let password = opts
        .neo4j_password
        .as_deref()
        .context("A Neo4j password is required; pass --neo4j-password or set NEO4J_PASSWORD")?;
    tracing::debug!("Connecting to Neo4j at: {}", opts.neo4j_uri);
    let config = ConfigBuilder::default()
        .uri(&opts.neo4j_uri)
        .user(&opts.neo4j_username)
        .password(password)
        .db(opts.neo4j_database.as_str())
        .build()
        .context("Invalid Neo4j connection settings")?;

    let graph = Graph::connect(config)
        .with_context(|| format!("Failed to connect to Neo4j at {}", opts.neo4j_uri))?;
    tracing::debug!("Neo4j connection established");
    Ok(graph)
}
