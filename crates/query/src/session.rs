//! Database session seam used to run generated statements.

use async_trait::async_trait;
use neo4rs::{query, Graph};

/// Anything that can run a Cypher write statement.
#[async_trait]
pub trait WriteSession: Send + Sync {
    async fn run_write(&self, cypher: &str) -> anyhow::Result<()>;
}

#[async_trait]
impl WriteSession for Graph {
    async fn run_write(&self, cypher: &str) -> anyhow::Result<()> {
        // PERIODIC COMMIT is only allowed in auto-commit transactions, so no
        // explicit txn here.
        self.run(query(cypher)).await?;
        Ok(())
    }
}

/// Outcome of a successful execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionSummary {
    pub statements_run: usize,
}
