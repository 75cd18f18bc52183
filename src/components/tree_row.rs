//! Tree Row Component
//!
//! One row of the page tree: icon, name, inline folder rename, delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::models::{Node, NodeKind};
use crate::tree::TreeModel;

#[component]
pub fn TreeRow(
    node: Node,
    depth: usize,
    tree: RwSignal<TreeModel>,
    set_selected: WriteSignal<Option<u32>>,
) -> impl IntoView {
    let id = node.id;
    let kind = node.kind;
    let name = node.name.clone();

    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(name.clone());

    let start_rename = move |_| {
        if kind == NodeKind::Folder {
            set_editing.set(true);
        }
    };

    let submit_rename = move || {
        let new_name = draft.get_untracked();
        set_editing.set(false);
        if new_name.is_empty() {
            return;
        }
        spawn_local(async move {
            match commands::rename_folder(id, &new_name).await {
                Ok(updated) => tree.update(|t| t.rename(id, &updated.name)),
                Err(e) => log::error!("rename_folder failed: {}", e),
            }
        });
    };

    let delete = move |_| {
        spawn_local(async move {
            match commands::delete_node(id).await {
                Ok(()) => {
                    // Cascades the subtree locally, matching the backend
                    tree.update(|t| {
                        t.remove(id);
                    });
                    set_selected.set(None);
                }
                Err(e) => log::error!("delete_node failed: {}", e),
            }
        });
    };

    let icon = match kind {
        NodeKind::Folder => "▸",
        NodeKind::Page => "·",
    };

    view! {
        <div class="tree-row" style=format!("padding-left: {}em", depth)>
            <span class="tree-row-icon">{icon}</span>
            {move || if editing.get() {
                view! {
                    <input
                        type="text"
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            match ev.key().as_str() {
                                "Enter" => submit_rename(),
                                "Escape" => set_editing.set(false),
                                _ => {}
                            }
                        }
                        on:blur=move |_| submit_rename()
                    />
                }.into_any()
            } else {
                let label = name.clone();
                view! {
                    <span class="tree-row-name" on:dblclick=start_rename>{label}</span>
                }.into_any()
            }}
            <button class="tree-row-delete" on:click=delete>"×"</button>
        </div>
    }
}
