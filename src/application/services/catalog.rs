//! Catalog service
//!
//! Loads the content tree from a CSV source or a JSON snapshot and writes
//! snapshots back out.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{BuildStats, CatalogTree, SerializedNode, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// A freshly built tree plus what the builder had to say about its input.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub tree: CatalogTree,
    /// Present only when the tree came from tabular data
    pub stats: Option<BuildStats>,
}

/// Service for reading and writing catalog trees.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
}

impl CatalogService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read a path, picking the format from its extension (`.json` or CSV).
    pub fn load(&self, path: &Path) -> ApplicationResult<LoadedCatalog> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            self.load_json(path)
        } else {
            self.load_csv(path)
        }
    }

    pub fn load_csv(&self, path: &Path) -> ApplicationResult<LoadedCatalog> {
        debug!("load_csv: {}", path.display());
        let text = self.fs.read_to_string(path).with_path_context("read catalog", path)?;

        let mut builder = TreeBuilder::new();
        let tree = builder.build_from_text(&text);
        let stats = builder.stats();
        info!(
            "loaded {} records from {} ({} rows skipped)",
            stats.records,
            path.display(),
            stats.skipped_blank + stats.skipped_incomplete
        );
        Ok(LoadedCatalog {
            tree,
            stats: Some(stats),
        })
    }

    pub fn load_json(&self, path: &Path) -> ApplicationResult<LoadedCatalog> {
        debug!("load_json: {}", path.display());
        let text = self.fs.read_to_string(path).with_path_context("read snapshot", path)?;
        let tree = self.import_json(&text)?;
        Ok(LoadedCatalog { tree, stats: None })
    }

    /// Rebuild a tree from its JSON snapshot.
    pub fn import_json(&self, text: &str) -> ApplicationResult<CatalogTree> {
        let snapshot: SerializedNode =
            serde_json::from_str(text).map_err(|e| ApplicationError::OperationFailed {
                context: "parse tree snapshot".to_string(),
                source: Box::new(e),
            })?;
        Ok(CatalogTree::from_serialized(&snapshot)?)
    }

    /// Pretty-printed JSON snapshot, children in insertion order.
    pub fn export_json(&self, tree: &CatalogTree) -> ApplicationResult<String> {
        serde_json::to_string_pretty(&tree.to_serialized()).map_err(|e| {
            ApplicationError::OperationFailed {
                context: "serialize tree snapshot".to_string(),
                source: Box::new(e),
            }
        })
    }

    pub fn write_json(&self, tree: &CatalogTree, path: &Path) -> ApplicationResult<()> {
        let json = self.export_json(tree)?;
        self.fs.write(path, &json).with_path_context("write snapshot", path)
    }
}
