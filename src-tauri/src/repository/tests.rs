//! Repository Integration Tests
//!
//! Tests for NodeRepository with in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{Node, NodeKind, StructureUpdate};
    use crate::repository::{
        open_and_migrate, NodeHierarchyOperations, NodeRepository, Repository, StructureOperations,
        WorkspaceRepository,
    };
    use std::path::Path;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn setup_test_db() -> NodeRepository {
        let conn = open_and_migrate(Path::new(":memory:")).expect("Failed to init test DB");
        NodeRepository::new(Arc::new(Mutex::new(Some(conn))))
    }

    async fn create_page(repo: &NodeRepository, parent_id: Option<u32>) -> Node {
        repo.create(&Node::new_page(1, "Untitled".to_string(), parent_id))
            .await
            .expect("Failed to create page")
    }

    async fn create_folder(repo: &NodeRepository, name: &str, parent_id: Option<u32>) -> Node {
        repo.create(&Node::new_folder(1, name.to_string(), parent_id))
            .await
            .expect("Failed to create folder")
    }

    fn snapshot(updates: &[Node]) -> Vec<StructureUpdate> {
        updates
            .iter()
            .map(|n| StructureUpdate {
                id: n.id,
                kind: n.kind,
                parent_id: n.parent_id,
                order: n.position,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_positions() {
        let repo = setup_test_db();

        let a = create_page(&repo, None).await;
        let b = create_page(&repo, None).await;
        let folder = create_folder(&repo, "Docs", None).await;
        let child = create_page(&repo, Some(folder.id)).await;

        assert!(a.id > 0);
        assert_eq!(a.position, 0);
        assert_eq!(b.position, 1);
        assert_eq!(folder.position, 2);
        // positions restart per sibling list
        assert_eq!(child.position, 0);
    }

    #[tokio::test]
    async fn test_get_children_ordered_by_position() {
        let repo = setup_test_db();

        let folder = create_folder(&repo, "Docs", None).await;
        let p1 = create_page(&repo, Some(folder.id)).await;
        let p2 = create_page(&repo, Some(folder.id)).await;

        let children = repo.get_children(1, Some(folder.id)).await.unwrap();
        let ids: Vec<u32> = children.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![p1.id, p2.id]);

        let roots = repo.get_children(1, None).await.unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].id, folder.id);
    }

    /// Deleting a folder cascades to its pages and leaves no dangling
    /// parent references.
    #[tokio::test]
    async fn test_delete_folder_cascades() {
        let repo = setup_test_db();

        let folder = create_folder(&repo, "Docs", None).await;
        let p1 = create_page(&repo, Some(folder.id)).await;
        let p2 = create_page(&repo, Some(folder.id)).await;
        let survivor = create_page(&repo, None).await;

        repo.delete(folder.id).await.expect("Delete failed");

        for gone in [folder.id, p1.id, p2.id] {
            assert!(repo.find_by_id(gone).await.unwrap().is_none());
        }
        let remaining = repo.list_by_workspace(1).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, survivor.id);
        // sibling list compacted after the folder left it
        assert_eq!(remaining[0].position, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_node_is_not_found() {
        let repo = setup_test_db();
        assert!(repo.delete(999).await.is_err());
    }

    #[tokio::test]
    async fn test_apply_structure_moves_and_reorders() {
        let repo = setup_test_db();

        let folder = create_folder(&repo, "Docs", None).await;
        let a = create_page(&repo, None).await;
        let b = create_page(&repo, None).await;

        // Move b into the folder, promote a to first root
        let batch = vec![
            StructureUpdate { id: a.id, kind: NodeKind::Page, parent_id: None, order: 0 },
            StructureUpdate { id: folder.id, kind: NodeKind::Folder, parent_id: None, order: 1 },
            StructureUpdate { id: b.id, kind: NodeKind::Page, parent_id: Some(folder.id), order: 0 },
        ];
        repo.apply_structure(&batch).await.expect("apply failed");

        let roots = repo.get_children(1, None).await.unwrap();
        let root_ids: Vec<u32> = roots.iter().map(|n| n.id).collect();
        assert_eq!(root_ids, vec![a.id, folder.id]);

        let inside = repo.get_children(1, Some(folder.id)).await.unwrap();
        assert_eq!(inside.len(), 1);
        assert_eq!(inside[0].id, b.id);
        assert_eq!(inside[0].position, 0);
    }

    /// Full-replace per node, not delta-apply: replaying a batch leaves the
    /// store exactly as after the first application, so retries are safe.
    #[tokio::test]
    async fn test_apply_structure_is_idempotent() {
        let repo = setup_test_db();

        let folder = create_folder(&repo, "Docs", None).await;
        let a = create_page(&repo, None).await;
        let batch = vec![
            StructureUpdate { id: a.id, kind: NodeKind::Page, parent_id: Some(folder.id), order: 0 },
            StructureUpdate { id: folder.id, kind: NodeKind::Folder, parent_id: None, order: 0 },
        ];

        repo.apply_structure(&batch).await.expect("first apply");
        let after_once = snapshot(&repo.list_by_workspace(1).await.unwrap());

        repo.apply_structure(&batch).await.expect("second apply");
        let after_twice = snapshot(&repo.list_by_workspace(1).await.unwrap());

        assert_eq!(after_once, after_twice);
    }

    /// A batch naming an unknown node fails as a whole: no record of it may
    /// be applied.
    #[tokio::test]
    async fn test_apply_structure_is_atomic() {
        let repo = setup_test_db();

        let folder = create_folder(&repo, "Docs", None).await;
        let a = create_page(&repo, Some(folder.id)).await;
        let before = snapshot(&repo.list_by_workspace(1).await.unwrap());

        let batch = vec![
            StructureUpdate { id: a.id, kind: NodeKind::Page, parent_id: None, order: 0 },
            StructureUpdate { id: folder.id, kind: NodeKind::Folder, parent_id: None, order: 1 },
            StructureUpdate { id: 9999, kind: NodeKind::Page, parent_id: None, order: 2 },
        ];
        assert!(repo.apply_structure(&batch).await.is_err());

        let after = snapshot(&repo.list_by_workspace(1).await.unwrap());
        assert_eq!(before, after, "failed batch must not change the store");
    }

    #[tokio::test]
    async fn test_apply_structure_rejects_orphan_parent() {
        let repo = setup_test_db();
        let a = create_page(&repo, None).await;

        // parent 42 is not part of the batch
        let batch = vec![StructureUpdate {
            id: a.id,
            kind: NodeKind::Page,
            parent_id: Some(42),
            order: 0,
        }];
        assert!(repo.apply_structure(&batch).await.is_err());
    }

    #[tokio::test]
    async fn test_workspace_delete_removes_nodes() {
        let conn = open_and_migrate(Path::new(":memory:")).expect("Failed to init test DB");
        let shared = Arc::new(Mutex::new(Some(conn)));
        let nodes = NodeRepository::new(shared.clone());
        let workspaces = WorkspaceRepository::new(shared);

        nodes
            .create(&Node::new_page(1, "Untitled".to_string(), None))
            .await
            .unwrap();
        workspaces.delete(1).await.expect("Delete failed");

        assert!(nodes.list_by_workspace(1).await.unwrap().is_empty());
        assert!(workspaces.find_by_id(1).await.unwrap().is_none());
    }
}
