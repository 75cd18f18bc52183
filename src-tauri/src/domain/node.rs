//! Node Entity
//!
//! A node in a workspace's content tree: either a folder (grouping) or a
//! page (leaf document). Single parent, ordered among siblings.

use super::entity::Entity;
use serde::{Deserialize, Serialize};

/// Node kind determines behavior: folders may contain children, pages never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    Page,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Folder => "folder",
            NodeKind::Page => "page",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "folder" => NodeKind::Folder,
            _ => NodeKind::Page,
        }
    }
}

/// A folder or page row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier, shared across both kinds
    pub id: u32,
    pub workspace_id: u32,
    /// Folder name or page title
    pub name: String,
    pub kind: NodeKind,
    /// Parent folder ID (None = root level)
    pub parent_id: Option<u32>,
    /// Position within siblings (for ordering)
    pub position: i32,
}

impl Node {
    pub fn new_page(workspace_id: u32, name: String, parent_id: Option<u32>) -> Self {
        Self {
            id: 0,
            workspace_id,
            name,
            kind: NodeKind::Page,
            parent_id,
            position: 0,
        }
    }

    pub fn new_folder(workspace_id: u32, name: String, parent_id: Option<u32>) -> Self {
        Self {
            id: 0,
            workspace_id,
            name,
            kind: NodeKind::Folder,
            parent_id,
            position: 0,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl Entity for Node {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// One record of a full-replace structure batch. A batch carries one record
/// per node in the tree and is applied as a single transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureUpdate {
    pub id: u32,
    pub kind: NodeKind,
    pub parent_id: Option<u32>,
    pub order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let page = Node::new_page(1, "Untitled".to_string(), None);
        assert_eq!(page.id(), 0);
        assert_eq!(page.kind, NodeKind::Page);
        assert!(page.is_root());

        let folder = Node::new_folder(1, "Docs".to_string(), Some(3));
        assert_eq!(folder.kind, NodeKind::Folder);
        assert!(!folder.is_root());
    }

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(NodeKind::Folder.as_str(), "folder");
        assert_eq!(NodeKind::from_str("folder"), NodeKind::Folder);
        assert_eq!(NodeKind::from_str("page"), NodeKind::Page);
    }
}
