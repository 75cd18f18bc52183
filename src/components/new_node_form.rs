//! New Node Form Component
//!
//! Creates a page or folder, under the selected folder or at root.
//! New nodes append at the end of the target sibling list. Pages are
//! created untitled; the title belongs to the document editor.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, CreateFolderArgs, CreatePageArgs};
use crate::context::AppContext;
use crate::models::NodeKind;
use crate::tree::TreeModel;

#[component]
pub fn NewNodeForm(
    tree: RwSignal<TreeModel>,
    selected: ReadSignal<Option<u32>>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (folder_name, set_folder_name) = signal(String::new());

    // Creating lands under the selected folder, or at root otherwise
    let target_folder = move || {
        selected.get().filter(|id| {
            tree.with(|t| t.find(*id).map(|n| n.kind) == Some(NodeKind::Folder))
        })
    };

    let create_page = move |_| {
        let workspace = ctx.current_workspace.get();
        let folder = target_folder();
        spawn_local(async move {
            match commands::create_page(&CreatePageArgs {
                workspace_id: workspace,
                folder_id: folder,
            })
            .await
            {
                Ok(node) => tree.update(|t| t.insert(node)),
                Err(e) => log::error!("create_page failed: {}", e),
            }
        });
    };

    let create_folder = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = folder_name.get();
        if name.is_empty() {
            return;
        }
        let workspace = ctx.current_workspace.get();
        let parent = target_folder();
        spawn_local(async move {
            match commands::create_folder(&CreateFolderArgs {
                workspace_id: workspace,
                parent_id: parent,
                name: &name,
            })
            .await
            {
                Ok(node) => {
                    set_folder_name.set(String::new());
                    tree.update(|t| t.insert(node));
                }
                Err(e) => log::error!("create_folder failed: {}", e),
            }
        });
    };

    view! {
        <div class="new-node-form">
            <button type="button" class="new-page-btn" on:click=create_page>
                {move || if let Some(fid) = target_folder() {
                    format!("New page in #{}", fid)
                } else {
                    "New page".to_string()
                }}
            </button>

            <form class="new-folder-form" on:submit=create_folder>
                <input
                    type="text"
                    placeholder="Folder name..."
                    prop:value=move || folder_name.get()
                    on:input=move |ev| set_folder_name.set(event_target_value(&ev))
                />
                <button type="submit">"New folder"</button>
            </form>
        </div>
    }
}
