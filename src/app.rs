//! Notefold Frontend App
//!
//! Main application component: hydrates the tree for the current workspace
//! and wires the tree view, create form, and sync status together.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{NewNodeForm, PageTreeView, SyncStatusChip, WorkspaceTabBar};
use crate::context::{AppContext, SyncStatus};
use crate::store::{AppState, AppStateStoreFields};
use crate::tree::TreeModel;

#[component]
pub fn App() -> impl IntoView {
    // State
    let tree = RwSignal::new(TreeModel::new());
    let (current_workspace, set_current_workspace) = signal(1u32); // Default workspace ID = 1
    let (selected, set_selected) = signal::<Option<u32>>(None);
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (sync_status, set_sync_status) = signal(SyncStatus::Idle);

    let store = Store::new(AppState::new());
    provide_context(store);

    // Provide context to all children
    provide_context(AppContext::new(
        (reload_trigger, set_reload_trigger),
        (sync_status, set_sync_status),
        current_workspace,
    ));

    // Load workspaces on mount (and after reloads)
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        spawn_local(async move {
            match commands::list_workspaces().await {
                Ok(loaded) => store.workspaces().set(loaded),
                Err(e) => log::error!("list_workspaces failed: {}", e),
            }
        });
    });

    // Hydrate the tree when workspace or trigger changes. This is also the
    // resync path after a failed structure persist.
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        let ws_id = current_workspace.get();
        log::debug!("hydrating workspace {} (trigger {})", ws_id, trigger);
        spawn_local(async move {
            match commands::get_workspace_tree(ws_id).await {
                Ok(dto) => {
                    let model = TreeModel::hydrate(&dto);
                    log::debug!("hydrated {} nodes", model.len());
                    tree.set(model);
                    set_sync_status.set(SyncStatus::Idle);
                }
                Err(e) => log::error!("get_workspace_tree failed: {}", e),
            }
        });
    });

    view! {
        <div class="app-layout">
            <main class="main-content">
                <WorkspaceTabBar
                    current_workspace=current_workspace
                    set_current_workspace=set_current_workspace
                />

                <header class="content-header">
                    <h1>"Notefold"</h1>
                    <SyncStatusChip />
                </header>

                <NewNodeForm tree=tree selected=selected />

                <PageTreeView
                    tree=tree
                    selected=selected
                    set_selected=set_selected
                />

                <p class="node-count">
                    {move || format!("{} nodes", tree.with(|t| t.len()))}
                </p>
            </main>
        </div>
    }
}
