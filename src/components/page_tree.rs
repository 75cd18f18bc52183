//! Page Tree View Component
//!
//! Displays the folder/page tree with drag-and-drop reordering.
//! Gestures resolve through the reconciler; the result is applied
//! optimistically and persisted as one structure batch.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::NodeKind;
use crate::reconcile::{self, DropSpot, MoveDir};
use crate::sync;
use crate::tree::TreeModel;
use crate::components::TreeRow;

use leptos_treedrag::*;

/// Element id of the scrollable viewport, shared with drag auto-scroll.
const SCROLL_CONTAINER_ID: &str = "page-tree-scroll";

/// Page tree view component with DnD support
#[component]
pub fn PageTreeView(
    tree: RwSignal<TreeModel>,
    selected: ReadSignal<Option<u32>>,
    set_selected: WriteSignal<Option<u32>>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    // Create DnD signals and global gesture handlers
    let dnd = create_dnd_signals();
    bind_global_mouseup(dnd, move |dragged_id, target| {
        let spot = match target {
            DropTarget::Node(id) => DropSpot::Node(id),
            DropTarget::EmptyFolder(id) => DropSpot::EmptyFolder(id),
        };
        match reconcile::reconcile_drop(&tree.get_untracked(), dragged_id, spot) {
            Some((next, batch)) => sync::commit(ctx, tree, next, batch),
            // Cycle-forming or stale drop: forest unchanged
            None => log::debug!("drop of {} on {:?} resolved to no-op", dragged_id, spot),
        }
    });
    bind_escape_cancel(dnd);
    bind_autoscroll(dnd, SCROLL_CONTAINER_ID);

    // Alt+Arrow moves the selected node through the same linear order a
    // pointer drag would follow.
    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if !ev.alt_key() {
            return;
        }
        let dir = match ev.key().as_str() {
            "ArrowUp" => MoveDir::Up,
            "ArrowDown" => MoveDir::Down,
            _ => return,
        };
        let Some(id) = selected.get_untracked() else {
            return;
        };
        ev.prevent_default();
        if let Some((next, batch)) =
            reconcile::reconcile_keyboard_move(&tree.get_untracked(), id, dir)
        {
            sync::commit(ctx, tree, next, batch);
        }
    };

    let flat_items = move || tree.get().flatten();

    view! {
        <div
            class="tree-view"
            id=SCROLL_CONTAINER_ID
            tabindex="0"
            on:keydown=on_keydown
        >
            <For
                each=flat_items
                key=|flat| {
                    (
                        flat.node.id,
                        flat.depth,
                        flat.node.name.clone(),
                        flat.node.position,
                        flat.node.parent_id,
                    )
                }
                children=move |flat| {
                    let id = flat.node.id;
                    let depth = flat.depth;
                    let is_folder = flat.node.kind == NodeKind::Folder;
                    let is_empty_folder = move || {
                        is_folder && tree.with(|t| t.sibling_ids(Some(id)).is_empty())
                    };
                    let is_selected = move || selected.get() == Some(id);

                    let on_mousedown = make_on_mousedown(dnd, id);
                    let on_mouseenter = make_on_node_mouseenter(dnd, id);
                    let on_mouseleave = make_on_mouseleave(dnd);

                    let is_dragging = move || dnd.dragging_id_read.get() == Some(id);
                    let is_drop_target = move || {
                        matches!(dnd.drop_target_read.get(), Some(DropTarget::Node(tid)) if tid == id)
                    };

                    let row_class = move || {
                        let mut c = String::from("tree-row-wrapper");
                        if is_selected() { c.push_str(" selected"); }
                        if is_dragging() { c.push_str(" dragging"); }
                        if is_drop_target() { c.push_str(" drop-target"); }
                        c
                    };

                    view! {
                        <div
                            class=row_class
                            on:mousedown=on_mousedown
                            on:mouseenter=on_mouseenter
                            on:mouseleave=on_mouseleave
                            on:click=move |_| {
                                // The click trailing a drop must not select
                                if !dnd.drag_just_ended_read.get_untracked() {
                                    set_selected.set(Some(id));
                                }
                            }
                        >
                            <TreeRow
                                node=flat.node.clone()
                                depth=depth
                                tree=tree
                                set_selected=set_selected
                            />
                        </div>

                        // Droppable placeholder inside a childless folder
                        {move || is_empty_folder().then(|| view! {
                            <EmptyFolderZone dnd=dnd folder_id=id depth=depth + 1 />
                        })}
                    }
                }
            />
        </div>
    }
}

/// Placeholder surface rendered inside a folder with zero children;
/// dropping here makes the dragged node the folder's only child.
#[component]
fn EmptyFolderZone(dnd: DndSignals, folder_id: u32, depth: usize) -> impl IntoView {
    let on_mouseenter = make_on_empty_folder_mouseenter(dnd, folder_id);
    let on_mouseleave = make_on_mouseleave(dnd);

    let is_active = move || {
        matches!(dnd.drop_target_read.get(), Some(DropTarget::EmptyFolder(fid)) if fid == folder_id)
    };
    let is_dragging = move || dnd.dragging_id_read.get().is_some();

    let zone_class = move || {
        let mut c = String::from("empty-folder-zone");
        if !is_dragging() { c.push_str(" idle"); }
        if is_active() { c.push_str(" active"); }
        c
    };

    view! {
        <div
            class=zone_class
            style=format!("padding-left: {}em", depth)
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            "(empty)"
        </div>
    }
}
