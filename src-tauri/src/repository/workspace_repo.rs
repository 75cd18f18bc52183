//! Workspace Repository
//!
//! CRUD for workspaces. Deleting a workspace removes its nodes too.

use async_trait::async_trait;
use rusqlite::params;

use super::db::SharedConnection;
use super::traits::Repository;
use crate::domain::{DomainError, DomainResult, Workspace};

#[derive(Clone)]
pub struct WorkspaceRepository {
    conn: SharedConnection,
}

impl WorkspaceRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Workspace> for WorkspaceRepository {
    async fn create(&self, entity: &Workspace) -> DomainResult<Workspace> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute("INSERT INTO workspaces (name) VALUES (?)", params![entity.name])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(Workspace {
            id: conn.last_insert_rowid() as u32,
            name: entity.name.clone(),
        })
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Workspace>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        match conn.query_row(
            "SELECT id, name FROM workspaces WHERE id = ?",
            params![id],
            |row| {
                Ok(Workspace {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        ) {
            Ok(ws) => Ok(Some(ws)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::Internal(e.to_string())),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Workspace>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare("SELECT id, name FROM workspaces ORDER BY id")
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Workspace {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn update(&self, entity: &Workspace) -> DomainResult<Workspace> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let affected = conn
            .execute(
                "UPDATE workspaces SET name = ? WHERE id = ?",
                params![entity.name, entity.id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if affected == 0 {
            return Err(DomainError::NotFound(format!("Workspace {} not found", entity.id)));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        tx.execute("DELETE FROM nodes WHERE workspace_id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        tx.execute("DELETE FROM workspaces WHERE id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        tx.commit().map_err(|e| DomainError::Internal(e.to_string()))
    }
}
