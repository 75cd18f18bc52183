//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

/// Result of the last structure persist, shown in the status chip.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SyncStatus {
    #[default]
    Idle,
    Saving,
    Failed(String),
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to refetch the tree from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to refetch the tree from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Structure persist status - read
    pub sync_status: ReadSignal<SyncStatus>,
    set_sync_status: WriteSignal<SyncStatus>,
    /// Current workspace ID - read
    pub current_workspace: ReadSignal<u32>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        sync_status: (ReadSignal<SyncStatus>, WriteSignal<SyncStatus>),
        current_workspace: ReadSignal<u32>,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            sync_status: sync_status.0,
            set_sync_status: sync_status.1,
            current_workspace,
        }
    }

    /// Trigger a full refetch-and-replace of the tree
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn set_sync_status(&self, status: SyncStatus) {
        self.set_sync_status.set(status);
    }
}
