//! Node Repository Modules
//!
//! Node data access split by concern:
//! - node_repo: Core CRUD operations
//! - node_hierarchy: Parent-child operations (children, descendants, cascade delete)
//! - node_positioning: Sibling position management
//! - node_structure: Transactional full-tree structure replacement

mod node_hierarchy;
mod node_positioning;
mod node_repo;
mod node_structure;

pub use node_hierarchy::NodeHierarchyOperations;
pub use node_positioning::NodePositioningOperations;
pub use node_repo::NodeRepository;
pub use node_structure::StructureOperations;
