//! Node Structure Operations
//!
//! Applies a full-replace structure batch in one transaction. A batch is an
//! authoritative snapshot of the whole tree, so replaying one is harmless and
//! a late-arriving batch simply overwrites an earlier one.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult, NodeKind, StructureUpdate};

/// Trait for structure replacement
#[async_trait]
pub trait StructureOperations {
    /// Apply all records atomically: either every node's parent/position is
    /// updated, or none are.
    async fn apply_structure(&self, updates: &[StructureUpdate]) -> DomainResult<()>;
}

/// Reject malformed batches before touching the database: duplicate ids,
/// parents that are not folder records of the same batch, or parent chains
/// that loop.
fn validate_batch(updates: &[StructureUpdate]) -> DomainResult<()> {
    let mut folders = HashSet::new();
    let mut seen = HashSet::new();
    let mut parents: HashMap<u32, Option<u32>> = HashMap::new();

    for u in updates {
        if !seen.insert(u.id) {
            return Err(DomainError::InvalidInput(format!(
                "duplicate node {} in structure batch",
                u.id
            )));
        }
        if u.kind == NodeKind::Folder {
            folders.insert(u.id);
        }
        parents.insert(u.id, u.parent_id);
    }

    for u in updates {
        if let Some(pid) = u.parent_id {
            if !folders.contains(&pid) {
                return Err(DomainError::InvalidInput(format!(
                    "node {} refers to parent {} which is not a folder in the batch",
                    u.id, pid
                )));
            }
        }
        // Walk the parent chain; a chain longer than the batch means a loop
        let mut hops = 0;
        let mut current = u.parent_id;
        while let Some(pid) = current {
            if pid == u.id {
                return Err(DomainError::InvalidInput(format!(
                    "node {} is its own ancestor",
                    u.id
                )));
            }
            hops += 1;
            if hops > updates.len() {
                return Err(DomainError::InvalidInput(
                    "structure batch contains a parent cycle".to_string(),
                ));
            }
            current = parents.get(&pid).copied().flatten();
        }
    }

    Ok(())
}

#[async_trait]
impl StructureOperations for super::node_repo::NodeRepository {
    async fn apply_structure(&self, updates: &[StructureUpdate]) -> DomainResult<()> {
        validate_batch(updates)?;

        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let now = chrono::Utc::now().timestamp_millis();
        for u in updates {
            let affected = tx
                .execute(
                    "UPDATE nodes SET parent_id = ?, position = ?, updated_at = ? WHERE id = ?",
                    params![u.parent_id, u.order, now, u.id],
                )
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            if affected == 0 {
                // Dropping the transaction rolls every prior record back
                return Err(DomainError::NotFound(format!(
                    "node {} from structure batch not in store",
                    u.id
                )));
            }
        }

        tx.commit().map_err(|e| DomainError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, kind: NodeKind, parent_id: Option<u32>, order: i32) -> StructureUpdate {
        StructureUpdate {
            id,
            kind,
            parent_id,
            order,
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_batch() {
        let batch = vec![
            record(1, NodeKind::Folder, None, 0),
            record(2, NodeKind::Page, Some(1), 0),
            record(3, NodeKind::Page, None, 1),
        ];
        assert!(validate_batch(&batch).is_ok());
    }

    #[test]
    fn test_validate_rejects_orphan_parent() {
        let batch = vec![record(2, NodeKind::Page, Some(99), 0)];
        assert!(matches!(
            validate_batch(&batch),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_rejects_page_parent() {
        let batch = vec![
            record(1, NodeKind::Page, None, 0),
            record(2, NodeKind::Page, Some(1), 0),
        ];
        assert!(matches!(
            validate_batch(&batch),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_rejects_cycle() {
        let batch = vec![
            record(1, NodeKind::Folder, Some(2), 0),
            record(2, NodeKind::Folder, Some(1), 0),
        ];
        assert!(matches!(
            validate_batch(&batch),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let batch = vec![
            record(1, NodeKind::Folder, None, 0),
            record(1, NodeKind::Folder, None, 1),
        ];
        assert!(matches!(
            validate_batch(&batch),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
