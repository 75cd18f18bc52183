//! Workspace Tree DTO
//!
//! The nested hydration payload handed to the frontend: folders with
//! embedded ordered pages and sub-folders, plus root-level pages.

use std::collections::HashMap;

use super::node::{Node, NodeKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceTree {
    pub folders: Vec<FolderTree>,
    pub pages: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderTree {
    pub folder: Node,
    pub folders: Vec<FolderTree>,
    pub pages: Vec<Node>,
}

/// Nest a flat node list by parent_id, ordered by position within each
/// sibling list.
pub fn build_workspace_tree(nodes: Vec<Node>) -> WorkspaceTree {
    let mut by_parent: HashMap<Option<u32>, Vec<Node>> = HashMap::new();
    for node in nodes {
        by_parent.entry(node.parent_id).or_default().push(node);
    }
    for children in by_parent.values_mut() {
        children.sort_by_key(|n| (n.position, n.id));
    }

    fn collect(parent: Option<u32>, by_parent: &HashMap<Option<u32>, Vec<Node>>) -> (Vec<FolderTree>, Vec<Node>) {
        let mut folders = Vec::new();
        let mut pages = Vec::new();
        if let Some(children) = by_parent.get(&parent) {
            for node in children {
                match node.kind {
                    NodeKind::Folder => {
                        let (sub_folders, sub_pages) = collect(Some(node.id), by_parent);
                        folders.push(FolderTree {
                            folder: node.clone(),
                            folders: sub_folders,
                            pages: sub_pages,
                        });
                    }
                    NodeKind::Page => pages.push(node.clone()),
                }
            }
        }
        (folders, pages)
    }

    let (folders, pages) = collect(None, &by_parent);
    WorkspaceTree { folders, pages }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u32, kind: NodeKind, parent_id: Option<u32>, position: i32) -> Node {
        Node {
            id,
            workspace_id: 1,
            name: format!("n{}", id),
            kind,
            parent_id,
            position,
        }
    }

    #[test]
    fn test_build_workspace_tree_nests_by_parent_and_order() {
        let nodes = vec![
            node(1, NodeKind::Folder, None, 0),
            node(2, NodeKind::Page, None, 1),
            node(3, NodeKind::Page, Some(1), 1),
            node(4, NodeKind::Folder, Some(1), 0),
            node(5, NodeKind::Page, Some(4), 0),
        ];

        let tree = build_workspace_tree(nodes);

        assert_eq!(tree.pages.len(), 1);
        assert_eq!(tree.pages[0].id, 2);
        assert_eq!(tree.folders.len(), 1);

        let f1 = &tree.folders[0];
        assert_eq!(f1.folder.id, 1);
        assert_eq!(f1.pages.len(), 1);
        assert_eq!(f1.pages[0].id, 3);
        assert_eq!(f1.folders.len(), 1);

        let f4 = &f1.folders[0];
        assert_eq!(f4.folder.id, 4);
        assert_eq!(f4.pages[0].id, 5);
    }

    #[test]
    fn test_empty_folder_keeps_empty_lists() {
        let tree = build_workspace_tree(vec![node(1, NodeKind::Folder, None, 0)]);
        assert_eq!(tree.folders.len(), 1);
        assert!(tree.folders[0].folders.is_empty());
        assert!(tree.folders[0].pages.is_empty());
    }
}
