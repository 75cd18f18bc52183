//! Node Positioning Operations
//!
//! Sibling position management within one parent list.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult};

/// Trait for node positioning operations
#[async_trait]
pub trait NodePositioningOperations {
    /// Get next position for a parent list (used in create)
    async fn get_next_position(&self, workspace_id: u32, parent_id: Option<u32>) -> DomainResult<i32>;

    /// Reindex nodes under a parent to be sequential (0, 1, 2, ...)
    async fn reindex_nodes(&self, workspace_id: u32, parent_id: Option<u32>) -> DomainResult<()>;
}

#[async_trait]
impl NodePositioningOperations for super::node_repo::NodeRepository {
    async fn get_next_position(&self, workspace_id: u32, parent_id: Option<u32>) -> DomainResult<i32> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM nodes
             WHERE workspace_id = ? AND parent_id IS ?",
            params![workspace_id, parent_id],
            |row| row.get(0),
        )
        .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn reindex_nodes(&self, workspace_id: u32, parent_id: Option<u32>) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let ids: Vec<u32> = {
            let mut stmt = conn
                .prepare(
                    "SELECT id FROM nodes WHERE workspace_id = ? AND parent_id IS ?
                     ORDER BY position, id",
                )
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            stmt.query_map(params![workspace_id, parent_id], |row| row.get(0))
                .map_err(|e| DomainError::Internal(e.to_string()))?
                .collect::<Result<_, _>>()
                .map_err(|e| DomainError::Internal(e.to_string()))?
        };

        let now = chrono::Utc::now().timestamp_millis();
        for (new_pos, id) in ids.iter().enumerate() {
            conn.execute(
                "UPDATE nodes SET position = ?, updated_at = ? WHERE id = ?",
                params![new_pos as i32, now, *id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }

        Ok(())
    }
}
