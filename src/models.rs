//! Frontend Models
//!
//! Data structures matching backend entities.

use serde::{Deserialize, Serialize};

/// Node kind: a folder groups other nodes, a page is a leaf document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    Page,
}

/// Tree node data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: u32,
    pub workspace_id: u32,
    pub name: String,
    pub kind: NodeKind,
    pub parent_id: Option<u32>,
    pub position: i32,
}

/// Workspace data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: u32,
    pub name: String,
}

/// One record of a full-replace structure batch.
///
/// A batch covers every node in the tree, not just the moved ones, so the
/// backend can treat each batch as an authoritative snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureUpdate {
    pub id: u32,
    pub kind: NodeKind,
    pub parent_id: Option<u32>,
    pub order: i32,
}

/// Nested hydration payload: folders with embedded ordered pages and
/// sub-folders, plus root-level pages.
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
