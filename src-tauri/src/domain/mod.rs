//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod node;
mod tree;
mod workspace;

pub use entity::{DomainError, DomainResult, Entity};
pub use node::{Node, NodeKind, StructureUpdate};
pub use tree::{build_workspace_tree, FolderTree, WorkspaceTree};
pub use workspace::Workspace;
