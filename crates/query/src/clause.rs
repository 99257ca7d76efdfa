//! Clause-level representation of a bulk-import statement.
//!
//! Each clause renders itself through `Display`; [`ImportStatement`] joins
//! them in a fixed order.

use crate::cypher::{string_literal, Identifier};
use std::fmt;

/// Variable bound to each CSV row by `LOAD CSV`.
pub const ROW_VARIABLE: &str = "row";

/// `USING PERIODIC COMMIT [n]` hint so large files commit in batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodicCommit {
    pub batch_size: Option<u64>,
}

impl fmt::Display for PeriodicCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.batch_size {
            Some(n) => write!(f, "USING PERIODIC COMMIT {n} "),
            None => f.write_str("USING PERIODIC COMMIT "),
        }
    }
}

/// `LOAD CSV WITH HEADERS FROM "file:///<path>" AS row`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadCsvClause {
    relative_path: String,
}

impl LoadCsvClause {
    /// `relative_path` is `/`-separated and relative to the import root.
    pub fn new(relative_path: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
        }
    }

    pub fn url(&self) -> String {
        format!("file:///{}", self.relative_path)
    }
}

impl fmt::Display for LoadCsvClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LOAD CSV WITH HEADERS FROM {} AS {ROW_VARIABLE} ",
            string_literal(&self.url())
        )
    }
}

/// `CREATE (:L1:L2 {p1: row.p1, ...})`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateClause {
    labels: Vec<Identifier>,
    properties: Vec<Identifier>,
}

impl CreateClause {
    pub fn new(labels: Vec<Identifier>, properties: Vec<Identifier>) -> Self {
        Self { labels, properties }
    }
}

impl fmt::Display for CreateClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE (")?;
        for label in &self.labels {
            write!(f, ":{label}")?;
        }
        if !self.properties.is_empty() {
            if !self.labels.is_empty() {
                f.write_str(" ")?;
            }
            let entries = self
                .properties
                .iter()
                .map(|p| format!("{p}: {ROW_VARIABLE}.{p}"))
                .collect::<Vec<_>>();
            write!(f, "{{{}}}", entries.join(", "))?;
        }
        f.write_str(")")
    }
}

/// `CREATE INDEX ON :L(p)`, one per label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexClause {
    labels: Vec<Identifier>,
    property: Identifier,
}

impl IndexClause {
    /// Callers guarantee `labels` is non-empty.
    pub fn new(labels: Vec<Identifier>, property: Identifier) -> Self {
        Self { labels, property }
    }

    /// Each index declaration as a standalone statement.
    pub fn statements(&self) -> Vec<String> {
        self.labels
            .iter()
            .map(|label| format!("CREATE INDEX ON :{label}({})", self.property))
            .collect()
    }
}

impl fmt::Display for IndexClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in self.statements() {
            write!(f, " {statement};")?;
        }
        Ok(())
    }
}

/// A generated bulk-import statement.
///
/// Rendered as `{commit}{load}{create};{index}` where the index part is empty
/// when no identifier column was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    commit: PeriodicCommit,
    load: LoadCsvClause,
    create: CreateClause,
    index: Option<IndexClause>,
}

impl ImportStatement {
    pub fn new(
        commit: PeriodicCommit,
        load: LoadCsvClause,
        create: CreateClause,
        index: Option<IndexClause>,
    ) -> Self {
        Self {
            commit,
            load,
            create,
            index,
        }
    }

    /// The whole statement as one text blob.
    pub fn text(&self) -> String {
        self.to_string()
    }

    /// Statements to submit one at a time: the load, then each index.
    ///
    /// Bolt runs a single statement per request, so the `;`-joined text can't
    /// be sent as is.
    pub fn parts(&self) -> Vec<String> {
        let mut parts = vec![format!("{}{}{}", self.commit, self.load, self.create)];
        if let Some(index) = &self.index {
            parts.extend(index.statements());
        }
        parts
    }

    pub fn load(&self) -> &LoadCsvClause {
        &self.load
    }

    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }
}

impl fmt::Display for ImportStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = self
            .index
            .as_ref()
            .map(|i| i.to_string())
            .unwrap_or_default();
        write!(f, "{}{}{};{}", self.commit, self.load, self.create, index)
    }
}
