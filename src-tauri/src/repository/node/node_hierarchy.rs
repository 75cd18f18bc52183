//! Node Hierarchy Operations
//!
//! Parent-child relationships: children queries, descendant walks, and the
//! cascading delete that keeps no dangling parent references behind.

use async_trait::async_trait;
use rusqlite::params;

use super::node_repo::row_to_node;
use crate::domain::{DomainError, DomainResult, Node};

const NODE_COLUMNS: &str = "id, workspace_id, name, kind, parent_id, position";

/// Trait for node hierarchy operations
#[async_trait]
pub trait NodeHierarchyOperations {
    /// Get children of a parent folder (None = root nodes of the workspace)
    async fn get_children(&self, workspace_id: u32, parent_id: Option<u32>) -> DomainResult<Vec<Node>>;

    /// Get all descendants of a node recursively
    async fn get_descendants(&self, id: u32) -> DomainResult<Vec<Node>>;

    /// Delete a node and its whole subtree, compacting the former sibling list
    async fn delete_cascade(&self, id: u32) -> DomainResult<()>;
}

#[async_trait]
impl NodeHierarchyOperations for super::node_repo::NodeRepository {
    async fn get_children(&self, workspace_id: u32, parent_id: Option<u32>) -> DomainResult<Vec<Node>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM nodes WHERE workspace_id = ? AND parent_id IS ? ORDER BY position",
                NODE_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let rows = stmt
            .query_map(params![workspace_id, parent_id], row_to_node)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn get_descendants(&self, id: u32) -> DomainResult<Vec<Node>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut result = Vec::new();
        let mut to_visit = vec![id];

        while let Some(current_id) = to_visit.pop() {
            let mut stmt = conn
                .prepare(&format!("SELECT {} FROM nodes WHERE parent_id = ?", NODE_COLUMNS))
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            let rows = stmt
                .query_map(params![current_id], row_to_node)
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            for row in rows {
                let node = row.map_err(|e| DomainError::Internal(e.to_string()))?;
                to_visit.push(node.id);
                result.push(node);
            }
        }

        Ok(result)
    }

    async fn delete_cascade(&self, id: u32) -> DomainResult<()> {
        use super::node_positioning::NodePositioningOperations;

        // Collect the subtree before mutating anything
        let mut doomed = vec![id];
        doomed.extend(self.get_descendants(id).await?.into_iter().map(|n| n.id));

        let (workspace_id, parent_id) = {
            let mut guard = self.conn.lock().await;
            let conn = guard
                .as_mut()
                .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

            let (workspace_id, parent_id): (u32, Option<u32>) = conn
                .query_row(
                    "SELECT workspace_id, parent_id FROM nodes WHERE id = ?",
                    params![id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .map_err(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => {
                        DomainError::NotFound(format!("Node {} not found", id))
                    }
                    other => DomainError::Internal(other.to_string()),
                })?;

            let tx = conn
                .transaction()
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            for did in &doomed {
                tx.execute("DELETE FROM nodes WHERE id = ?", params![did])
                    .map_err(|e| DomainError::Internal(e.to_string()))?;
            }
            tx.commit().map_err(|e| DomainError::Internal(e.to_string()))?;

            (workspace_id, parent_id)
        };

        // Compact the list the deleted node was part of
        self.reindex_nodes(workspace_id, parent_id).await
    }
}
