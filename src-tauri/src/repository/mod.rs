//! Repository Layer
//!
//! SQLite-backed data access. Connection setup and migrations live in `db`,
//! node operations are split by concern under `node`.

mod db;
mod node;
mod traits;
mod workspace_repo;

#[cfg(test)]
mod tests;

pub use db::{open_and_migrate, DbState, SharedConnection};
pub use node::{NodeHierarchyOperations, NodePositioningOperations, NodeRepository, StructureOperations};
pub use traits::Repository;
pub use workspace_repo::WorkspaceRepository;
