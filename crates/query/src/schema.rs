//! Desired node shape for an import.

/// Which columns become node properties, which column is indexed, and the
/// labels every created node receives.
///
/// Properties and labels behave as sets: duplicates are dropped and the
/// first-seen order is kept, so rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSchema {
    properties: Vec<String>,
    identifier: Option<String>,
    labels: Vec<String>,
}

impl NodeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, column: impl Into<String>) -> Self {
        push_unique(&mut self.properties, column.into());
        self
    }

    pub fn properties<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for column in columns {
            push_unique(&mut self.properties, column.into());
        }
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        push_unique(&mut self.labels, label.into());
        self
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for label in labels {
            push_unique(&mut self.labels, label.into());
        }
        self
    }

    /// Column whose property gets an index.
    pub fn identifier(mut self, column: impl Into<String>) -> Self {
        self.identifier = Some(column.into());
        self
    }

    pub fn property_columns(&self) -> &[String] {
        &self.properties
    }

    pub fn identifier_column(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn label_names(&self) -> &[String] {
        &self.labels
    }
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}
