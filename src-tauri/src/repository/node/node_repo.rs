//! Node Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Node CRUD. Specialized operations are in
//! separate modules:
//! - node_hierarchy: children, descendants, cascade delete
//! - node_positioning: sibling position management
//! - node_structure: transactional structure replacement

use async_trait::async_trait;
use rusqlite::{params, Row};

use super::super::db::SharedConnection;
use super::super::traits::Repository;
use crate::domain::{DomainError, DomainResult, Node, NodeKind};

const NODE_COLUMNS: &str = "id, workspace_id, name, kind, parent_id, position";

/// SQLite implementation of the Node repository
#[derive(Clone)]
pub struct NodeRepository {
    pub(super) conn: SharedConnection,
}

impl NodeRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn list_by_workspace(&self, workspace_id: u32) -> DomainResult<Vec<Node>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM nodes WHERE workspace_id = ? ORDER BY parent_id NULLS FIRST, position ASC",
                NODE_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let rows = stmt
            .query_map(params![workspace_id], row_to_node)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

pub(super) fn row_to_node(row: &Row<'_>) -> rusqlite::Result<Node> {
    let kind: String = row.get(3)?;
    Ok(Node {
        id: row.get(0)?,
        workspace_id: row.get(1)?,
        name: row.get(2)?,
        kind: NodeKind::from_str(&kind),
        parent_id: row.get(4)?,
        position: row.get(5)?,
    })
}

#[async_trait]
impl Repository<Node> for NodeRepository {
    /// Insert at the end of the target sibling list; the stored entity's
    /// position field is ignored.
    async fn create(&self, entity: &Node) -> DomainResult<Node> {
        use super::node_positioning::NodePositioningOperations;
        let position = self
            .get_next_position(entity.workspace_id, entity.parent_id)
            .await?;

        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let now = chrono::Utc::now().timestamp_millis();
        conn.execute(
            "INSERT INTO nodes (workspace_id, name, kind, parent_id, position, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.workspace_id,
                entity.name,
                entity.kind.as_str(),
                entity.parent_id,
                position,
                now,
                now
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        created.position = position;
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Node>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM nodes WHERE id = ?", NODE_COLUMNS))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query_map(params![id], row_to_node)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        match rows.next() {
            Some(row) => Ok(Some(row.map_err(|e| DomainError::Internal(e.to_string()))?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Node>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM nodes ORDER BY parent_id NULLS FIRST, position ASC",
                NODE_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let rows = stmt
            .query_map([], row_to_node)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn update(&self, entity: &Node) -> DomainResult<Node> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let affected = conn
            .execute(
                "UPDATE nodes SET name = ?, parent_id = ?, position = ?, updated_at = ? WHERE id = ?",
                params![
                    entity.name,
                    entity.parent_id,
                    entity.position,
                    chrono::Utc::now().timestamp_millis(),
                    entity.id
                ],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if affected == 0 {
            return Err(DomainError::NotFound(format!("Node {} not found", entity.id)));
        }
        Ok(entity.clone())
    }

    /// Delete a node and, for folders, its entire subtree. Delegated to the
    /// hierarchy module, which also compacts the former sibling list.
    async fn delete(&self, id: u32) -> DomainResult<()> {
        use super::node_hierarchy::NodeHierarchyOperations;
        self.delete_cascade(id).await
    }
}
