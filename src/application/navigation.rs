//! Navigation engine: a cursor over an immutable catalog tree.
//!
//! The navigator holds only a path, never an index into the arena. Every
//! derived value (current node, entries, can-go flags) is recomputed from the
//! path and the tree on demand.
//!
//! path
//! - `[]` is the root, `["Native"]` is inside Native, `["Native", "Passeriformes"]`
//!   one level deeper.
//!
//! entries
//! - children of the current folder, or the current item alone when the cursor
//!   is on a leaf. Listed in the navigator's [`SiblingOrder`], the same order
//!   that prev/next and the first/last predicates use.

use std::sync::Arc;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::{CatalogTree, Direction, DisplayKey, NodeKind, SiblingOrder, TreeNode};

/// Kind of a visible entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    Item,
}

/// One visible child at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
    pub index: Index,
}

impl DisplayKey for Entry {
    fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Cursor state plus move operations.
#[derive(Debug, Clone)]
pub struct Navigator {
    tree: Arc<CatalogTree>,
    path: Vec<String>,
    order: SiblingOrder,
}

impl Navigator {
    /// New session at the root.
    pub fn new(tree: Arc<CatalogTree>, order: SiblingOrder) -> Self {
        Self {
            tree,
            path: Vec::new(),
            order,
        }
    }

    pub fn tree(&self) -> &CatalogTree {
        &self.tree
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn order(&self) -> SiblingOrder {
        self.order
    }

    /// Index of the node at the cursor, the root when the path does not resolve.
    pub fn node_index(&self) -> Index {
        self.tree.node_at(&self.path).unwrap_or_else(|| self.tree.root())
    }

    pub fn node(&self) -> &TreeNode {
        self.tree
            .get_node(self.node_index())
            .unwrap_or_else(|| self.tree.root_node())
    }

    /// What to show at the cursor.
    pub fn entries(&self) -> Vec<Entry> {
        let idx = self.node_index();
        match &self.node().kind {
            NodeKind::Folder(_) => self
                .tree
                .children(idx, self.order)
                .into_iter()
                .filter_map(|child| self.tree.get_node(child).map(|n| entry(child, n)))
                .collect(),
            NodeKind::Item(_) => vec![entry(idx, self.node())],
        }
    }

    pub fn can_go_up(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn can_go_to_prev(&self) -> bool {
        !self.tree.is_first_sibling(&self.path, self.order)
    }

    pub fn can_go_to_next(&self) -> bool {
        !self.tree.is_last_sibling(&self.path, self.order)
    }

    // ---------------------------------------------------------------
    // Transitions. Each returns whether the path changed.
    // ---------------------------------------------------------------

    /// Descend into `name`. No-op while the cursor is on an item.
    #[instrument(level = "debug", skip(self))]
    pub fn push(&mut self, name: &str) -> bool {
        if !self.node().is_folder() {
            debug!("push ignored: cursor is on an item");
            return false;
        }
        self.path.push(name.to_string());
        true
    }

    #[instrument(level = "debug", skip(self))]
    pub fn up(&mut self) -> bool {
        self.set_path(CatalogTree::parent_path(&self.path))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn prev(&mut self) -> bool {
        self.step(Direction::Prev)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn next(&mut self) -> bool {
        self.step(Direction::Next)
    }

    /// Back to the root.
    pub fn reset(&mut self) -> bool {
        self.set_path(Vec::new())
    }

    /// Replace the cursor wholesale.
    pub fn set_path(&mut self, path: Vec<String>) -> bool {
        if path == self.path {
            return false;
        }
        self.path = path;
        true
    }

    fn step(&mut self, direction: Direction) -> bool {
        let target = self.tree.sibling_at(&self.path, direction, self.order);
        self.set_path(target)
    }
}

fn entry(index: Index, node: &TreeNode) -> Entry {
    Entry {
        name: node.name.clone(),
        kind: match node.kind {
            NodeKind::Folder(_) => EntryKind::Folder,
            NodeKind::Item(_) => EntryKind::Item,
        },
        index,
    }
}
