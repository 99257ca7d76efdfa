//! In-memory tabular datasets parsed from delimited text.

use crate::error::ParseError;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;

/// A table with named columns and string cells.
///
/// Every row has exactly `columns.len()` cells; ragged input is rejected at
/// parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularDataset {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Shape of a dataset, used for listings.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub name: String,
    pub columns: Vec<String>,
    pub row_count: usize,
}

impl TabularDataset {
    /// Build a dataset from already-split values.
    ///
    /// Returns `None` if any row's length differs from the column count.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Option<Self> {
        if rows.iter().any(|row| row.len() != columns.len()) {
            return None;
        }
        Some(Self {
            name: name.into(),
            columns,
            rows,
        })
    }

    /// Parse a CSV file whose first record is the header row.
    pub fn from_path(path: &Path, delimiter: u8) -> Result<Self, ParseError> {
        let file = std::fs::File::open(path).map_err(|e| ParseError {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_reader(name, file, delimiter).map_err(|source| ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read only the header row of a CSV file.
    pub fn read_columns(path: &Path, delimiter: u8) -> Result<Vec<String>, ParseError> {
        let parse_error = |source: csv::Error| ParseError {
            path: path.to_path_buf(),
            source,
        };
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .from_path(path)
            .map_err(parse_error)?;
        let headers = csv_reader.headers().map_err(parse_error)?;
        Ok(headers.iter().map(|h| h.to_string()).collect())
    }

    /// Parse CSV from any reader. The first record is the header row.
    pub fn from_reader<R: Read>(
        name: impl Into<String>,
        reader: R,
        delimiter: u8,
    ) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .from_reader(reader);

        let columns = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<String>>();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(|v| v.to_string()).collect());
        }

        Ok(Self {
            name: name.into(),
            columns,
            rows,
        })
    }

    /// Name of the file the dataset was read from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, column: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let idx = self.columns.iter().position(|c| c == column)?;
        Some(self.rows.iter().map(move |row| row[idx].as_str()))
    }

    /// Write the dataset as comma-separated UTF-8 text with a header row.
    ///
    /// No positional index column is added; the output has exactly the
    /// dataset's columns.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.columns)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            name: self.name.clone(),
            columns: self.columns.clone(),
            row_count: self.rows.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEOPLE: &str = "name,age\nAlice,30\nBob,25\n";

    #[test]
    fn test_from_reader() {
        let ds = TabularDataset::from_reader("people.csv", PEOPLE.as_bytes(), b',').unwrap();
        assert_eq!(ds.name(), "people.csv");
        assert_eq!(ds.columns(), &["name".to_string(), "age".to_string()]);
        assert_eq!(ds.row_count(), 2);
        let ages: Vec<&str> = ds.column("age").unwrap().collect();
        assert_eq!(ages, vec!["30", "25"]);
        assert!(ds.column("missing").is_none());
    }

    #[test]
    fn test_custom_delimiter() {
        let ds = TabularDataset::from_reader("t", "a;b\n1;2\n".as_bytes(), b';').unwrap();
        assert_eq!(ds.columns().len(), 2);
        assert_eq!(ds.rows()[0], vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = TabularDataset::from_reader("t", "a,b\n1,2,3\n".as_bytes(), b',');
        assert!(result.is_err());
    }

    #[test]
    fn test_read_columns_stops_at_header() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("people.tsv");
        // the second record is ragged; reading only the header must not see it
        std::fs::write(&path, "name\tage\nAlice\t30\textra\n").unwrap();

        let columns = TabularDataset::read_columns(&path, b'\t').unwrap();
        assert_eq!(columns, vec!["name".to_string(), "age".to_string()]);
        assert!(TabularDataset::from_path(&path, b'\t').is_err());
    }

    #[test]
    fn test_read_columns_missing_file() {
        let err = TabularDataset::read_columns(Path::new("/nonexistent/h.csv"), b',').unwrap_err();
        assert_eq!(err.path, Path::new("/nonexistent/h.csv"));
    }

    #[test]
    fn test_header_only() {
        let ds = TabularDataset::from_reader("t", "a,b,c\n".as_bytes(), b',').unwrap();
        assert_eq!(ds.columns().len(), 3);
        assert_eq!(ds.row_count(), 0);
    }

    #[test]
    fn test_write_csv_has_no_index_column() {
        let ds = TabularDataset::from_reader("people.csv", PEOPLE.as_bytes(), b',').unwrap();
        let mut out = Vec::new();
        ds.write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), PEOPLE);
    }

    #[test]
    fn test_write_csv_quotes_delimiters() {
        let ds = TabularDataset::new(
            "q",
            vec!["text".to_string()],
            vec![vec!["hello, world".to_string()]],
        )
        .unwrap();
        let mut out = Vec::new();
        ds.write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "text\n\"hello, world\"\n");
    }

    #[test]
    fn test_new_rejects_ragged() {
        assert!(TabularDataset::new("x", vec!["a".to_string()], vec![vec![]]).is_none());
    }

    #[test]
    fn test_from_path_reports_file() {
        let err = TabularDataset::from_path(Path::new("/nonexistent/data.csv"), b',').unwrap_err();
        assert_eq!(err.path, Path::new("/nonexistent/data.csv"));
    }
}
