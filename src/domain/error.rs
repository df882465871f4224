//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent structural violations in a catalog tree.
///
/// Ingestion and navigation never fail; only rebuilding a tree from an
/// external snapshot can.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("tree root must be a folder, found item: {0}")]
    RootNotFolder(String),

    #[error("child key '{key}' does not match node name '{name}'")]
    NameMismatch { key: String, name: String },
}
