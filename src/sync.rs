//! Structure Sync
//!
//! Bridges reconciled tree state to the backend. The new tree is applied to
//! the visible model immediately; the batch then goes out as one logical
//! request. On failure the local state is not rolled back field by field:
//! the status chip flips to Failed and a full refetch resynchronizes.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{AppContext, SyncStatus};
use crate::models::StructureUpdate;
use crate::tree::TreeModel;

/// Apply `next` optimistically and persist its structure batch.
///
/// Safe to call while a previous batch is still in flight: batches are
/// full-replace snapshots, so the last one to land wins.
pub fn commit(ctx: AppContext, tree: RwSignal<TreeModel>, next: TreeModel, batch: Vec<StructureUpdate>) {
    tree.set(next);
    ctx.set_sync_status(SyncStatus::Saving);
    spawn_local(async move {
        match commands::update_structure(&batch).await {
            Ok(()) => ctx.set_sync_status(SyncStatus::Idle),
            Err(e) => {
                log::error!("update_structure failed: {}", e);
                ctx.set_sync_status(SyncStatus::Failed(e));
                // Resync from the durable store rather than leaving the
                // optimistic tree diverged indefinitely.
                ctx.reload();
            }
        }
    });
}
