//! Tests for CatalogService

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use wildlife_explorer::application::services::CatalogService;
use wildlife_explorer::application::ApplicationError;
use wildlife_explorer::domain::{DomainError, SerializedNode};
use wildlife_explorer::infrastructure::traits::RealFileSystem;

const FIXTURE: &str = "tests/resources/animals.csv";

fn service() -> CatalogService {
    CatalogService::new(Arc::new(RealFileSystem))
}

#[test]
fn given_csv_source_when_loading_then_tree_and_stats_returned() {
    // Act
    let loaded = service().load_csv(Path::new(FIXTURE)).unwrap();

    // Assert
    assert_eq!(loaded.tree.item_count(), 8);
    let stats = loaded.stats.expect("csv load reports stats");
    assert_eq!(stats.records, 8);
    assert_eq!(stats.skipped_incomplete, 1);
}

#[test]
fn given_missing_csv_when_loading_then_error_names_path() {
    let err = service()
        .load_csv(Path::new("tests/resources/no-such.csv"))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("read catalog"));
    assert!(err.to_string().contains("no-such.csv"));
}

#[test]
fn given_tree_when_exporting_then_importing_then_structure_identical() {
    // Arrange
    let service = service();
    let tree = service.load_csv(Path::new(FIXTURE)).unwrap().tree;

    // Act
    let json = service.export_json(&tree).unwrap();
    let restored = service.import_json(&json).unwrap();

    // Assert
    assert_eq!(restored.to_serialized(), tree.to_serialized());
    assert_eq!(restored.item_count(), tree.item_count());
}

#[test]
fn given_tree_when_exporting_then_json_keeps_insertion_order_and_tags() {
    let service = service();
    let tree = service.load_csv(Path::new(FIXTURE)).unwrap().tree;

    let json = service.export_json(&tree).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["nodeType"], "folder");
    let statuses: Vec<&String> = value["children"].as_object().unwrap().keys().collect();
    assert_eq!(statuses, ["Native", "Invasive", "Non-Native"]);
    let jay = &value["children"]["Native"]["children"]["Passeriformes"]["children"]["Corvidae"]
        ["children"]["Blue Jay"];
    assert_eq!(jay["nodeType"], "item");
    assert_eq!(jay["item"]["commonName"], "Blue Jay");
    assert_eq!(jay["item"]["scientificName"], "Cyanocitta cristata");
}

#[test]
fn given_written_snapshot_when_loading_by_extension_then_json_path_used() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("tree.json");
    let service = service();
    let tree = service.load_csv(Path::new(FIXTURE)).unwrap().tree;
    service.write_json(&tree, &target).unwrap();

    // Act
    let loaded = service.load(&target).unwrap();

    // Assert
    assert!(loaded.stats.is_none());
    assert_eq!(loaded.tree.to_serialized(), tree.to_serialized());
}

#[test]
fn given_item_root_when_importing_then_domain_error() {
    let json = r#"{"nodeType": "item", "name": "Blue Jay",
        "item": {"commonName": "Blue Jay", "localStatus": "Native", "order": "Passeriformes"}}"#;

    let err = service().import_json(json).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::RootNotFolder(ref name)) if name == "Blue Jay"
    ));
}

#[test]
fn given_mismatched_child_key_when_importing_then_domain_error() {
    let json = r#"{"nodeType": "folder", "name": "__root__", "children": {
        "Native": {"nodeType": "folder", "name": "Invasive", "children": {}}}}"#;

    let err = service().import_json(json).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::NameMismatch { .. })
    ));
}

#[test]
fn given_garbage_when_importing_then_operation_failed() {
    let err = service().import_json("{ not json").unwrap_err();

    assert!(err.to_string().contains("parse tree snapshot"));
}

#[test]
fn given_folder_without_children_key_when_importing_then_empty_folder() {
    let json = r#"{"nodeType": "folder", "name": "__root__"}"#;

    let tree = service().import_json(json).unwrap();

    assert!(matches!(tree.to_serialized(), SerializedNode::Folder { ref children, .. } if children.is_empty()));
}
