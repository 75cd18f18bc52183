//! Drag/Drop Reconciler
//!
//! Pure functions that turn a finished drag gesture into a new tree plus the
//! full-replace structure batch for it. No signals, no IO: callers apply the
//! result optimistically and hand the batch to the sync layer.

use crate::models::{NodeKind, StructureUpdate};
use crate::tree::TreeModel;

/// Where a drop landed, in resolution priority order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropSpot {
    /// The synthetic placeholder shown inside a childless folder.
    EmptyFolder(u32),
    /// An existing node: the dragged item takes its slot, pushing it and the
    /// following siblings down by one.
    Node(u32),
}

/// Direction for keyboard reordering through the flattened order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveDir {
    Up,
    Down,
}

/// Compute the tree resulting from dropping `dragged` on `spot`.
///
/// Returns the new tree and its structure batch, or None when the gesture is
/// a no-op: unknown ids, self-drop, or a cycle-forming drop (a folder onto
/// its own descendant).
pub fn reconcile_drop(
    tree: &TreeModel,
    dragged: u32,
    spot: DropSpot,
) -> Option<(TreeModel, Vec<StructureUpdate>)> {
    tree.find(dragged)?;
    let target_id = match spot {
        DropSpot::Node(id) | DropSpot::EmptyFolder(id) => id,
    };
    if target_id == dragged || tree.is_descendant(dragged, target_id) {
        return None;
    }

    let mut next = tree.clone();
    match spot {
        DropSpot::EmptyFolder(folder_id) => {
            let folder = next.find(folder_id)?;
            if folder.kind != NodeKind::Folder || !next.sibling_ids(Some(folder_id)).is_empty() {
                return None;
            }
            next.detach(dragged);
            next.attach_end(dragged, Some(folder_id));
        }
        DropSpot::Node(target) => {
            // Removal first, so same-list moves need no index arithmetic.
            next.detach(dragged);
            let (parent, index) = next.parent_list(target)?;
            next.insert_at(dragged, parent, index);
        }
    }
    let batch = next.structure_updates();
    Some((next, batch))
}

/// Keyboard reorder: move `id` one step through the same linear order a drag
/// would follow. Up takes the previous flat item's slot; Down lands just
/// after the next flat item outside the node's own subtree.
pub fn reconcile_keyboard_move(
    tree: &TreeModel,
    id: u32,
    dir: MoveDir,
) -> Option<(TreeModel, Vec<StructureUpdate>)> {
    let flat = tree.flatten();
    let pos = flat.iter().position(|f| f.node.id == id)?;
    match dir {
        MoveDir::Up => {
            if pos == 0 {
                return None;
            }
            reconcile_drop(tree, id, DropSpot::Node(flat[pos - 1].node.id))
        }
        MoveDir::Down => {
            let target = flat[pos + 1..]
                .iter()
                .find(|f| !tree.is_descendant(id, f.node.id))?;
            let mut next = tree.clone();
            next.detach(id);
            let (parent, index) = next.parent_list(target.node.id)?;
            next.insert_at(id, parent, index + 1);
            let batch = next.structure_updates();
            Some((next, batch))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FolderTree, Node, NodeKind, WorkspaceTree};
    use crate::tree::TreeModel;

    fn folder(id: u32, parent_id: Option<u32>, position: i32) -> Node {
        Node {
            id,
            workspace_id: 1,
            name: format!("Folder {}", id),
            kind: NodeKind::Folder,
            parent_id,
            position,
        }
    }

    fn page(id: u32, parent_id: Option<u32>, position: i32) -> Node {
        Node {
            id,
            workspace_id: 1,
            name: format!("Page {}", id),
            kind: NodeKind::Page,
            parent_id,
            position,
        }
    }

    fn order_of(batch: &[StructureUpdate], id: u32) -> (Option<u32>, i32) {
        let u = batch.iter().find(|u| u.id == id).expect("id in batch");
        (u.parent_id, u.order)
    }

    fn assert_no_orphans(batch: &[StructureUpdate]) {
        for u in batch {
            if let Some(pid) = u.parent_id {
                assert!(
                    batch.iter().any(|p| p.id == pid && p.kind == NodeKind::Folder),
                    "parent {} of {} missing from batch",
                    pid,
                    u.id
                );
            }
        }
    }

    /// Scenario A: drag P2 out of F1 into empty sibling folder F2.
    #[test]
    fn test_drop_into_empty_folder() {
        let tree = TreeModel::hydrate(&WorkspaceTree {
            folders: vec![
                FolderTree {
                    folder: folder(1, None, 0),
                    folders: vec![],
                    pages: vec![page(10, Some(1), 0), page(11, Some(1), 1)],
                },
                FolderTree {
                    folder: folder(2, None, 1),
                    folders: vec![],
                    pages: vec![],
                },
            ],
            pages: vec![],
        });

        let (next, batch) =
            reconcile_drop(&tree, 11, DropSpot::EmptyFolder(2)).expect("valid drop");

        assert_eq!(next.sibling_ids(Some(1)), &[10]);
        assert_eq!(next.sibling_ids(Some(2)), &[11]);
        assert_eq!(order_of(&batch, 10), (Some(1), 0));
        assert_eq!(order_of(&batch, 11), (Some(2), 0));
        assert_no_orphans(&batch);
    }

    /// Scenario B: root pages [A, B, C]; dragging C onto A gives [C, A, B].
    #[test]
    fn test_reorder_within_root() {
        let tree = TreeModel::hydrate(&WorkspaceTree {
            folders: vec![],
            pages: vec![page(1, None, 0), page(2, None, 1), page(3, None, 2)],
        });

        let (next, batch) = reconcile_drop(&tree, 3, DropSpot::Node(1)).expect("valid drop");

        assert_eq!(next.sibling_ids(None), &[3, 1, 2]);
        assert_eq!(order_of(&batch, 3), (None, 0));
        assert_eq!(order_of(&batch, 1), (None, 1));
        assert_eq!(order_of(&batch, 2), (None, 2));
    }

    /// Scenario C: dropping a folder into its own subtree is a no-op.
    #[test]
    fn test_cycle_drop_rejected() {
        let tree = TreeModel::hydrate(&WorkspaceTree {
            folders: vec![FolderTree {
                folder: folder(1, None, 0),
                folders: vec![FolderTree {
                    folder: folder(2, Some(1), 0),
                    folders: vec![],
                    pages: vec![],
                }],
                pages: vec![page(10, Some(1), 1)],
            }],
            pages: vec![],
        });

        assert!(reconcile_drop(&tree, 1, DropSpot::Node(10)).is_none());
        assert!(reconcile_drop(&tree, 1, DropSpot::EmptyFolder(2)).is_none());
        assert!(reconcile_drop(&tree, 1, DropSpot::Node(1)).is_none());
    }

    #[test]
    fn test_drop_on_unknown_target_is_noop() {
        let tree = TreeModel::hydrate(&WorkspaceTree {
            folders: vec![],
            pages: vec![page(1, None, 0)],
        });
        assert!(reconcile_drop(&tree, 1, DropSpot::Node(99)).is_none());
        assert!(reconcile_drop(&tree, 99, DropSpot::Node(1)).is_none());
    }

    #[test]
    fn test_empty_folder_spot_requires_childless_folder() {
        let tree = TreeModel::hydrate(&WorkspaceTree {
            folders: vec![FolderTree {
                folder: folder(1, None, 0),
                folders: vec![],
                pages: vec![page(10, Some(1), 0)],
            }],
            pages: vec![page(2, None, 1), page(3, None, 2)],
        });
        // folder already has a child
        assert!(reconcile_drop(&tree, 2, DropSpot::EmptyFolder(1)).is_none());
        // target is a page, not a folder
        assert!(reconcile_drop(&tree, 2, DropSpot::EmptyFolder(3)).is_none());
    }

    /// Cross-level reparent: dropping a root page onto a nested page takes
    /// the nested page's slot inside the folder.
    #[test]
    fn test_cross_level_reparent() {
        let tree = TreeModel::hydrate(&WorkspaceTree {
            folders: vec![FolderTree {
                folder: folder(1, None, 0),
                folders: vec![],
                pages: vec![page(10, Some(1), 0), page(11, Some(1), 1)],
            }],
            pages: vec![page(2, None, 1)],
        });

        let (next, batch) = reconcile_drop(&tree, 2, DropSpot::Node(11)).expect("valid drop");
        assert_eq!(next.sibling_ids(Some(1)), &[10, 2, 11]);
        assert_eq!(next.sibling_ids(None), &[1]);
        assert_eq!(order_of(&batch, 2), (Some(1), 1));
        assert_eq!(order_of(&batch, 11), (Some(1), 2));
        assert_no_orphans(&batch);
    }

    #[test]
    fn test_keyboard_move_up_and_down() {
        let tree = TreeModel::hydrate(&WorkspaceTree {
            folders: vec![],
            pages: vec![page(1, None, 0), page(2, None, 1), page(3, None, 2)],
        });

        let (up, _) = reconcile_keyboard_move(&tree, 2, MoveDir::Up).expect("move up");
        assert_eq!(up.sibling_ids(None), &[2, 1, 3]);

        let (down, _) = reconcile_keyboard_move(&tree, 2, MoveDir::Down).expect("move down");
        assert_eq!(down.sibling_ids(None), &[1, 3, 2]);

        // already at the edges
        assert!(reconcile_keyboard_move(&tree, 1, MoveDir::Up).is_none());
        assert!(reconcile_keyboard_move(&tree, 3, MoveDir::Down).is_none());
    }

    /// Moving a folder down skips over its own subtree.
    #[test]
    fn test_keyboard_move_folder_down_skips_descendants() {
        let tree = TreeModel::hydrate(&WorkspaceTree {
            folders: vec![FolderTree {
                folder: folder(1, None, 0),
                folders: vec![],
                pages: vec![page(10, Some(1), 0)],
            }],
            pages: vec![page(2, None, 1)],
        });

        let (next, _) = reconcile_keyboard_move(&tree, 1, MoveDir::Down).expect("move down");
        assert_eq!(next.sibling_ids(None), &[2, 1]);
        assert_eq!(next.sibling_ids(Some(1)), &[10]);
    }
}
