//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use crate::models::Workspace;
use leptos::prelude::*;
use reactive_stores::Store;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All workspaces
    pub workspaces: Vec<Workspace>,
    /// Current workspace ID
    pub current_workspace_id: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            current_workspace_id: 1,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Add a workspace to the store
pub fn store_add_workspace(store: &AppStore, workspace: Workspace) {
    store.workspaces().write().push(workspace);
}
