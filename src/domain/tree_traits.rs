//! Text rendering of catalog trees via `termtree`.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{CatalogTree, NodeKind};
use crate::domain::ordering::SiblingOrder;

pub trait TreeNodeConvert {
    fn to_tree_string(&self, order: SiblingOrder) -> Tree<String>;
}

impl TreeNodeConvert for CatalogTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, order: SiblingOrder) -> Tree<String> {
        fn build_tree(tree: &CatalogTree, idx: Index, order: SiblingOrder, parent: &mut Tree<String>) {
            for child_idx in tree.children(idx, order) {
                if let Some(child) = tree.get_node(child_idx) {
                    let label = match &child.kind {
                        NodeKind::Folder(_) => format!("{}/", child.name),
                        NodeKind::Item(_) => child.name.clone(),
                    };
                    let mut child_tree = Tree::new(label);
                    build_tree(tree, child_idx, order, &mut child_tree);
                    parent.push(child_tree);
                }
            }
        }

        let mut root = Tree::new(".".to_string());
        build_tree(self, self.root(), order, &mut root);
        root
    }
}
