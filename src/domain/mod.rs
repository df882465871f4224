//! Domain layer: catalog entities and the content tree engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod ordering;
pub mod parser;
pub mod serialized;
pub mod tree_traits;

pub use arena::{CatalogTree, Direction, Folder, NodeKind, TreeNode, ROOT_NAME};
pub use builder::{BuildStats, TreeBuilder};
pub use entities::{clean_cell, normalize_header, Column, Item, WRAP_HINT};
pub use error::DomainError;
pub use ordering::{display_cmp, natural_cmp, DisplayKey, SiblingOrder};
pub use parser::{parse_rows, Row};
pub use serialized::SerializedNode;
pub use tree_traits::TreeNodeConvert;
