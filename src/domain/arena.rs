//! Arena-backed catalog tree and its read-only accessors.
//!
//! Nodes live in a generational arena and are addressed by [`Index`]. Folders
//! keep their children in an insertion-ordered map from name to index. Once
//! [`crate::domain::TreeBuilder`] hands a tree out, nothing can mutate it:
//! every mutating method is crate-private and used only during the build.

use generational_arena::{Arena, Index};
use indexmap::IndexMap;
use tracing::{instrument, warn};

use crate::domain::entities::Item;
use crate::domain::ordering::{display_cmp, DisplayKey, SiblingOrder};

/// Name of the synthetic root folder.
pub const ROOT_NAME: &str = "__root__";

/// Branch payload: named children in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct Folder {
    pub children: IndexMap<String, Index>,
}

/// Node discriminator.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Folder(Folder),
    Item(Item),
}

/// Tree node in the arena.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    /// Index of the parent folder, None for the root
    pub parent: Option<Index>,
    pub kind: NodeKind,
}

impl TreeNode {
    pub fn as_folder(&self) -> Option<&Folder> {
        match &self.kind {
            NodeKind::Folder(folder) => Some(folder),
            NodeKind::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match &self.kind {
            NodeKind::Folder(_) => None,
            NodeKind::Item(item) => Some(item),
        }
    }
}

impl DisplayKey for TreeNode {
    fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder(_))
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Step direction for sibling moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    pub fn offset(self) -> isize {
        match self {
            Direction::Prev => -1,
            Direction::Next => 1,
        }
    }

    fn step(self, index: usize, len: usize) -> Option<usize> {
        let target = index.checked_add_signed(self.offset())?;
        (target < len).then_some(target)
    }
}

/// Immutable folder/item hierarchy with a synthetic root.
#[derive(Debug, Clone)]
pub struct CatalogTree {
    arena: Arena<TreeNode>,
    root: Index,
}

impl Default for CatalogTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogTree {
    /// Empty tree: just the root folder.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            name: ROOT_NAME.to_string(),
            parent: None,
            kind: NodeKind::Folder(Folder::default()),
        });
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_node(&self) -> &TreeNode {
        &self.arena[self.root]
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    // ---------------------------------------------------------------
    // Construction (crate-private, used by the builder only)
    // ---------------------------------------------------------------

    /// Return the folder named `name` under `parent`, creating it when absent.
    ///
    /// An existing folder is never replaced. An item sitting at that name is.
    pub(crate) fn ensure_folder(&mut self, parent: Index, name: &str) -> Index {
        match self.child_of(parent, name) {
            Some(existing) if self.is_folder(existing) => existing,
            Some(existing) => {
                warn!("replacing item '{}' with a folder of the same name", name);
                self.remove_subtree(existing);
                self.attach(parent, name, NodeKind::Folder(Folder::default()))
            }
            None => self.attach(parent, name, NodeKind::Folder(Folder::default())),
        }
    }

    /// Put `item` under `parent`, keyed by its name. Last write wins.
    pub(crate) fn put_item(&mut self, parent: Index, item: Item) -> Index {
        let name = item.name.clone();
        match self.child_of(parent, &name) {
            Some(existing) if !self.is_folder(existing) => {
                if let Some(node) = self.arena.get_mut(existing) {
                    node.kind = NodeKind::Item(item);
                }
                existing
            }
            Some(existing) => {
                warn!("replacing folder '{}' with an item of the same name", name);
                self.remove_subtree(existing);
                self.attach(parent, &name, NodeKind::Item(item))
            }
            None => self.attach(parent, &name, NodeKind::Item(item)),
        }
    }

    fn attach(&mut self, parent: Index, name: &str, kind: NodeKind) -> Index {
        let idx = self.arena.insert(TreeNode {
            name: name.to_string(),
            parent: Some(parent),
            kind,
        });
        if let Some(TreeNode {
            kind: NodeKind::Folder(folder),
            ..
        }) = self.arena.get_mut(parent)
        {
            // An existing key keeps its position; only the index is swapped.
            folder.children.insert(name.to_string(), idx);
        }
        idx
    }

    fn remove_subtree(&mut self, idx: Index) {
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                if let NodeKind::Folder(folder) = node.kind {
                    stack.extend(folder.children.values().copied());
                }
            }
        }
    }

    fn is_folder(&self, idx: Index) -> bool {
        self.arena.get(idx).is_some_and(|n| n.is_folder())
    }

    fn child_of(&self, parent: Index, name: &str) -> Option<Index> {
        self.arena
            .get(parent)?
            .as_folder()?
            .children
            .get(name)
            .copied()
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    /// Resolve a path from the root. The empty path is the root itself.
    #[instrument(level = "trace", skip(self, path))]
    pub fn node_at<S: AsRef<str>>(&self, path: &[S]) -> Option<Index> {
        path.iter()
            .try_fold(self.root, |current, segment| self.child_of(current, segment.as_ref()))
    }

    /// Like [`Self::node_at`] but returns the node itself.
    pub fn node_at_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&TreeNode> {
        self.node_at(path).and_then(|idx| self.get_node(idx))
    }

    /// Drop the last segment; the root's parent path is the root.
    pub fn parent_path<S: AsRef<str>>(path: &[S]) -> Vec<String> {
        let keep = path.len().saturating_sub(1);
        path[..keep].iter().map(|s| s.as_ref().to_string()).collect()
    }

    /// Children of a folder in the requested order. Items have none.
    pub fn children(&self, idx: Index, order: SiblingOrder) -> Vec<Index> {
        let Some(folder) = self.get_node(idx).and_then(TreeNode::as_folder) else {
            return Vec::new();
        };
        let mut children: Vec<Index> = folder.children.values().copied().collect();
        if order == SiblingOrder::Display {
            children.sort_by(|a, b| display_cmp(&self.arena[*a], &self.arena[*b]));
        }
        children
    }

    /// Names of the siblings of the node at `path` (itself included), or None
    /// for the root and for paths whose parent is not a folder.
    fn sibling_names<S: AsRef<str>>(&self, path: &[S], order: SiblingOrder) -> Option<Vec<&str>> {
        if path.is_empty() {
            return None;
        }
        let parent = self.node_at(&path[..path.len() - 1])?;
        self.get_node(parent)?.as_folder()?;
        Some(
            self.children(parent, order)
                .into_iter()
                .map(|idx| self.arena[idx].name.as_str())
                .collect(),
        )
    }

    fn position<S: AsRef<str>>(siblings: &[&str], path: &[S]) -> Option<usize> {
        let last = path.last()?.as_ref();
        siblings.iter().position(|name| *name == last)
    }

    /// True for the root, for unresolvable parents, for names missing from
    /// their parent, and for the first child in `order`.
    pub fn is_first_sibling<S: AsRef<str>>(&self, path: &[S], order: SiblingOrder) -> bool {
        match self.sibling_names(path, order) {
            None => true,
            Some(siblings) => Self::position(&siblings, path).map_or(true, |i| i == 0),
        }
    }

    /// True for the root, for unresolvable parents, and for the last child in `order`.
    pub fn is_last_sibling<S: AsRef<str>>(&self, path: &[S], order: SiblingOrder) -> bool {
        match self.sibling_names(path, order) {
            None => true,
            Some(siblings) => match Self::position(&siblings, path) {
                Some(i) => i + 1 == siblings.len(),
                None => siblings.is_empty(),
            },
        }
    }

    /// Path of the neighbouring sibling, or `path` unchanged at a boundary.
    #[instrument(level = "trace", skip(self, path))]
    pub fn sibling_at<S: AsRef<str>>(
        &self,
        path: &[S],
        direction: Direction,
        order: SiblingOrder,
    ) -> Vec<String> {
        let unchanged = || -> Vec<String> { path.iter().map(|s| s.as_ref().to_string()).collect() };

        let Some(siblings) = self.sibling_names(path, order) else {
            return unchanged();
        };
        let Some(target) = Self::position(&siblings, path)
            .and_then(|i| direction.step(i, siblings.len()))
        else {
            return unchanged();
        };

        let mut next = Self::parent_path(path);
        next.push(siblings[target].to_string());
        next
    }

    /// Names from the root down to `idx` (empty for the root).
    pub fn path_of(&self, idx: Index) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = self.get_node(idx);
        while let Some(node) = current {
            let Some(parent) = node.parent else { break };
            path.push(node.name.clone());
            current = self.get_node(parent);
        }
        path.reverse();
        path
    }

    // ---------------------------------------------------------------
    // Whole-tree queries
    // ---------------------------------------------------------------

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// All items, in pre-order insertion order.
    pub fn items(&self) -> impl Iterator<Item = (Index, &Item)> {
        self.iter().filter_map(|(idx, node)| node.as_item().map(|item| (idx, item)))
    }

    pub fn item_count(&self) -> usize {
        self.items().count()
    }

    /// Folders below the root.
    pub fn folder_count(&self) -> usize {
        self.iter().filter(|(_, n)| n.is_folder()).count() - 1
    }

    /// Number of levels, counting the root. An empty tree has depth 1.
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        match self.get_node(idx).map(|n| &n.kind) {
            Some(NodeKind::Folder(folder)) => {
                1 + folder
                    .children
                    .values()
                    .map(|&child| self.calculate_depth(child))
                    .max()
                    .unwrap_or(0)
            }
            Some(NodeKind::Item(_)) => 1,
            None => 0,
        }
    }
}

/// Pre-order traversal in insertion order.
pub struct TreeIterator<'a> {
    tree: &'a CatalogTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a CatalogTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current) {
                if let NodeKind::Folder(folder) = &node.kind {
                    // Reverse so the first child is visited first
                    self.stack.extend(folder.children.values().rev().copied());
                }
                return Some((current, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> Item {
        Item {
            name: name.into(),
            scientific_name: String::new(),
            habitat: String::new(),
            diet: String::new(),
            fun_fact: String::new(),
            local_status: "Native".into(),
            order: "Order".into(),
            family: None,
        }
    }

    #[test]
    fn test_ensure_folder_is_idempotent() {
        let mut tree = CatalogTree::new();
        let a = tree.ensure_folder(tree.root(), "A");
        let again = tree.ensure_folder(tree.root(), "A");
        assert_eq!(a, again);
        assert_eq!(tree.children(tree.root(), SiblingOrder::Insertion).len(), 1);
    }

    #[test]
    fn test_put_item_overwrites_in_place() {
        let mut tree = CatalogTree::new();
        let root = tree.root();
        tree.put_item(root, item("Owl"));
        tree.put_item(root, item("Crow"));
        let mut newer = item("Owl");
        newer.diet = "Mice".into();
        tree.put_item(root, newer);

        let names: Vec<_> = tree
            .children(root, SiblingOrder::Insertion)
            .into_iter()
            .map(|i| tree.get_node(i).unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["Owl", "Crow"]);
        let owl = tree.node_at_path(&["Owl"]).unwrap().as_item().unwrap();
        assert_eq!(owl.diet, "Mice");
    }

    #[test]
    fn test_item_replaced_by_folder_removes_node() {
        let mut tree = CatalogTree::new();
        let root = tree.root();
        let old = tree.put_item(root, item("Clash"));
        let folder = tree.ensure_folder(root, "Clash");
        assert!(tree.get_node(old).is_none());
        assert!(tree.get_node(folder).unwrap().is_folder());
    }

    #[test]
    fn test_path_of_roundtrips_node_at() {
        let mut tree = CatalogTree::new();
        let a = tree.ensure_folder(tree.root(), "A");
        let b = tree.ensure_folder(a, "B");
        let leaf = tree.put_item(b, item("Leaf"));
        let path = tree.path_of(leaf);
        assert_eq!(path, vec!["A", "B", "Leaf"]);
        assert_eq!(tree.node_at(&path), Some(leaf));
        assert!(tree.path_of(tree.root()).is_empty());
    }

    #[test]
    fn test_direction_step() {
        assert_eq!(Direction::Prev.step(0, 3), None);
        assert_eq!(Direction::Prev.step(2, 3), Some(1));
        assert_eq!(Direction::Next.step(2, 3), None);
        assert_eq!(Direction::Next.step(0, 3), Some(1));
    }
}
