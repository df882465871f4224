//! Nested, serde-friendly form of a catalog tree.
//!
//! ```json
//! {"nodeType": "folder", "name": "__root__", "children": {
//!     "Native": {"nodeType": "folder", "name": "Native", "children": {...}}}}
//! ```
//!
//! Children keep their order through serialization (`indexmap`).

use generational_arena::Index;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::arena::{CatalogTree, NodeKind, ROOT_NAME};
use crate::domain::entities::Item;
use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "lowercase")]
pub enum SerializedNode {
    Folder {
        name: String,
        #[serde(default)]
        children: IndexMap<String, SerializedNode>,
    },
    Item {
        name: String,
        item: Item,
    },
}

impl SerializedNode {
    pub fn name(&self) -> &str {
        match self {
            SerializedNode::Folder { name, .. } | SerializedNode::Item { name, .. } => name,
        }
    }
}

impl CatalogTree {
    /// Snapshot the tree as nested data, children in insertion order.
    #[instrument(level = "debug", skip(self))]
    pub fn to_serialized(&self) -> SerializedNode {
        self.serialize_node(self.root())
    }

    fn serialize_node(&self, idx: Index) -> SerializedNode {
        match self.get_node(idx).map(|n| (&n.name, &n.kind)) {
            Some((name, NodeKind::Folder(folder))) => SerializedNode::Folder {
                name: name.clone(),
                children: folder
                    .children
                    .iter()
                    .map(|(key, &child)| (key.clone(), self.serialize_node(child)))
                    .collect(),
            },
            Some((name, NodeKind::Item(item))) => SerializedNode::Item {
                name: name.clone(),
                item: item.clone(),
            },
            None => SerializedNode::Folder {
                name: ROOT_NAME.to_string(),
                children: IndexMap::new(),
            },
        }
    }

    /// Rebuild a tree from its nested form.
    ///
    /// The top node must be a folder and every child key must equal the
    /// child's own name, so that paths stay canonical.
    #[instrument(level = "debug", skip(snapshot))]
    pub fn from_serialized(snapshot: &SerializedNode) -> Result<Self, DomainError> {
        let SerializedNode::Folder { children, .. } = snapshot else {
            return Err(DomainError::RootNotFolder(snapshot.name().to_string()));
        };

        let mut tree = CatalogTree::new();
        let mut stack: Vec<(Index, &IndexMap<String, SerializedNode>)> = vec![(tree.root(), children)];

        while let Some((parent, children)) = stack.pop() {
            for (key, child) in children {
                if key != child.name() {
                    return Err(DomainError::NameMismatch {
                        key: key.clone(),
                        name: child.name().to_string(),
                    });
                }
                match child {
                    SerializedNode::Folder { name, children } => {
                        let idx = tree.ensure_folder(parent, name);
                        stack.push((idx, children));
                    }
                    SerializedNode::Item { name, item } => {
                        if item.name != *name {
                            return Err(DomainError::NameMismatch {
                                key: name.clone(),
                                name: item.name.clone(),
                            });
                        }
                        tree.put_item(parent, item.clone());
                    }
                }
            }
        }

        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::TreeBuilder;

    const CSV: &str = "Common Name,Local Status,Order,Family,Diet\n\
                       Blue Jay,Native,Passeriformes,Corvidae,Nuts/Seeds\n\
                       Robin,Native,Passeriformes,,Worms\n\
                       Starling,Invasive,Passeriformes,Sturnidae,Insects\n";

    #[test]
    fn test_roundtrip_preserves_structure() {
        let tree = TreeBuilder::new().build_from_text(CSV);
        let snapshot = tree.to_serialized();
        let rebuilt = CatalogTree::from_serialized(&snapshot).unwrap();
        assert_eq!(rebuilt.to_serialized(), snapshot);
    }

    #[test]
    fn test_json_uses_node_type_tag() {
        let tree = TreeBuilder::new().build_from_text(CSV);
        let json = serde_json::to_value(tree.to_serialized()).unwrap();
        assert_eq!(json["nodeType"], "folder");
        assert_eq!(json["name"], ROOT_NAME);
        let robin = &json["children"]["Native"]["children"]["Passeriformes"]["children"]["Robin"];
        assert_eq!(robin["nodeType"], "item");
        assert_eq!(robin["item"]["commonName"], "Robin");
        assert!(robin["item"].get("family").is_none());
    }

    #[test]
    fn test_rejects_item_root() {
        let tree = TreeBuilder::new().build_from_text(CSV);
        let robin = tree
            .node_at_path(&["Native", "Passeriformes", "Robin"])
            .and_then(|n| n.as_item())
            .cloned()
            .unwrap();
        let snapshot = SerializedNode::Item {
            name: "Robin".into(),
            item: robin,
        };
        assert!(matches!(
            CatalogTree::from_serialized(&snapshot),
            Err(DomainError::RootNotFolder(_))
        ));
    }

    #[test]
    fn test_rejects_key_name_mismatch() {
        let mut children = IndexMap::new();
        children.insert(
            "Alias".to_string(),
            SerializedNode::Folder {
                name: "Native".into(),
                children: IndexMap::new(),
            },
        );
        let snapshot = SerializedNode::Folder {
            name: ROOT_NAME.into(),
            children,
        };
        assert!(matches!(
            CatalogTree::from_serialized(&snapshot),
            Err(DomainError::NameMismatch { .. })
        ));
    }
}
