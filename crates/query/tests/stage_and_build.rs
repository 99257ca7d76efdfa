//! Staging datasets into a real import directory and building statements from them.

use neo4j_import_file::TabularDataset;
use neo4j_import_query::{ImportError, ImportQueryBuilder, ImportRoot, NodeSchema};
use std::path::Path;
use tempfile::TempDir;

fn abc_dataset() -> TabularDataset {
    TabularDataset::from_reader("abc.csv", "a,b,c\n1,2,3\n4,5,6\n".as_bytes(), b',').unwrap()
}

#[test]
fn test_staged_file_is_descendant_of_root() {
    let import_dir = TempDir::new().unwrap();
    let root = ImportRoot::new(import_dir.path(), "staging/nodes").unwrap();
    let mut builder = ImportQueryBuilder::new(root);

    let schema = NodeSchema::new().properties(["a", "b", "c"]).label("Row");
    let statement = builder.node_from_dataset(&abc_dataset(), &schema).unwrap();

    let url = statement.load().url();
    let relative = url.strip_prefix("file:///").unwrap();
    assert!(relative.starts_with("staging/nodes/tmp"));
    assert!(relative.ends_with(".csv"));

    let staged = import_dir.path().join(relative);
    assert!(staged.is_file());
    assert_eq!(
        std::fs::read_to_string(&staged).unwrap(),
        "a,b,c\n1,2,3\n4,5,6\n"
    );
    assert!(!statement.text().contains(&import_dir.path().display().to_string()));
}

#[test]
fn test_staged_file_round_trips() {
    let import_dir = TempDir::new().unwrap();
    let root = ImportRoot::new(import_dir.path(), "").unwrap();
    let mut builder = ImportQueryBuilder::new(root);

    let schema = NodeSchema::new().property("a").label("Row");
    let url = builder
        .node_from_dataset(&abc_dataset(), &schema)
        .unwrap()
        .load()
        .url();

    let staged = import_dir
        .path()
        .join(url.strip_prefix("file:///").unwrap());
    let reread = TabularDataset::from_path(&staged, b',').unwrap();
    assert_eq!(reread.columns(), abc_dataset().columns());
    assert_eq!(reread.rows(), abc_dataset().rows());
}

#[test]
fn test_each_staging_gets_a_new_file() {
    let import_dir = TempDir::new().unwrap();
    let root = ImportRoot::new(import_dir.path(), "").unwrap();
    let mut builder = ImportQueryBuilder::new(root);
    let schema = NodeSchema::new().property("a").label("Row");

    let first = builder
        .node_from_dataset(&abc_dataset(), &schema)
        .unwrap()
        .load()
        .url();
    let second = builder
        .node_from_dataset(&abc_dataset(), &schema)
        .unwrap()
        .load()
        .url();
    assert_ne!(first, second);
}

#[test]
fn test_unknown_column_rejected_before_staging() {
    let import_dir = TempDir::new().unwrap();
    let root = ImportRoot::new(import_dir.path(), "").unwrap();
    let mut builder = ImportQueryBuilder::new(root);

    let schema = NodeSchema::new().property("a").identifier("z").label("Row");
    let err = builder
        .node_from_dataset(&abc_dataset(), &schema)
        .unwrap_err();
    assert!(matches!(err, ImportError::UnknownColumn { ref column, .. } if column == "z"));
    assert_eq!(std::fs::read_dir(import_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_unbuildable_schema_leaves_no_staged_file() {
    let import_dir = TempDir::new().unwrap();
    let root = ImportRoot::new(import_dir.path(), "").unwrap();
    let mut builder = ImportQueryBuilder::new(root);

    let schema = NodeSchema::new().property("a").identifier("a");
    let err = builder
        .node_from_dataset(&abc_dataset(), &schema)
        .unwrap_err();
    assert!(matches!(err, ImportError::IndexWithoutLabel(_)));
    assert_eq!(std::fs::read_dir(import_dir.path()).unwrap().count(), 0);

    let schema = NodeSchema::new().property("a").label("Bad\0Label");
    let err = builder
        .node_from_dataset(&abc_dataset(), &schema)
        .unwrap_err();
    assert!(matches!(err, ImportError::InvalidIdentifier(_)));
    assert_eq!(std::fs::read_dir(import_dir.path()).unwrap().count(), 0);
    assert!(builder.statement().is_none());
}

#[test]
fn test_file_outside_root_rejected() {
    let import_dir = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    let outside = elsewhere.path().join("people.csv");
    std::fs::write(&outside, "name\nAlice\n").unwrap();

    let root = ImportRoot::new(import_dir.path(), "").unwrap();
    let mut builder = ImportQueryBuilder::new(root);
    let err = builder
        .node_from_file(&outside, &NodeSchema::new().property("name"))
        .unwrap_err();
    assert!(matches!(err, ImportError::PathOutsideImportRoot { .. }));

    let sneaky = import_dir.path().join("..").join("people.csv");
    assert!(builder
        .node_from_file(Path::new(&sneaky), &NodeSchema::new().property("name"))
        .is_err());
}
