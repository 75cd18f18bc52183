//! Sync Status Chip
//!
//! Small indicator for the last structure persist. Failures stay visible
//! until the refetch lands.

use leptos::prelude::*;

use crate::context::{AppContext, SyncStatus};

#[component]
pub fn SyncStatusChip() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let label = move || match ctx.sync_status.get() {
        SyncStatus::Idle => String::new(),
        SyncStatus::Saving => "Saving...".to_string(),
        SyncStatus::Failed(e) => format!("Structure failed to save: {}", e),
    };
    let chip_class = move || match ctx.sync_status.get() {
        SyncStatus::Idle => "sync-chip idle",
        SyncStatus::Saving => "sync-chip saving",
        SyncStatus::Failed(_) => "sync-chip failed",
    };

    view! {
        <span class=chip_class>{label}</span>
    }
}
