//! Leptos TreeDrag Utilities
//!
//! Drag-and-drop for hierarchical lists in Leptos, using mouse events.
//! A movement threshold distinguishes click from drag; one gesture runs at a
//! time. Supports dropping onto nodes, onto empty-folder placeholders,
//! Escape-cancel, and edge auto-scroll of a named container.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropTarget {
    /// Drop on an existing node (take its slot)
    Node(u32),
    /// Drop on the placeholder inside a childless folder
    EmptyFolder(u32),
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// Distance from a scroll container edge where auto-scroll kicks in
const SCROLL_EDGE_PX: f64 = 48.0;
/// Fastest auto-scroll step, reached right at the edge
const SCROLL_MAX_STEP_PX: f64 = 24.0;
const SCROLL_TICK_MS: u32 = 16;

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<u32>>,
    pub pending_id_write: WriteSignal<Option<u32>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
    /// Signed px per tick for the auto-scroll interval
    scroll_step_read: ReadSignal<f64>,
    scroll_step_write: WriteSignal<f64>,
    /// The single auto-scroll timer for the current gesture
    scroll_timer: StoredValue<Option<Interval>, LocalStorage>,
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<u32>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    let (scroll_step_read, scroll_step_write) = signal(0.0f64);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
        scroll_step_read,
        scroll_step_write,
        scroll_timer: StoredValue::new_local(None),
    }
}

/// End drag operation (drop or cancel). Clears all gesture state, including
/// the auto-scroll timer, and raises the click guard so the click event that
/// trails the mouseup does not act on the dragged row.
pub fn end_drag(dnd: &DndSignals) {
    stop_autoscroll(dnd);
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);
    schedule_click_guard_reset(dnd.drag_just_ended_write);
}

/// Lower the click guard once the trailing click has had time to fire.
#[cfg(target_arch = "wasm32")]
fn schedule_click_guard_reset(clear: WriteSignal<bool>) {
    if let Some(win) = web_sys::window() {
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn schedule_click_guard_reset(_clear: WriteSignal<bool>) {}

/// Cancel the gesture with no drop: discard speculative state entirely.
pub fn cancel_drag(dnd: &DndSignals) {
    dnd.drop_target_write.set(None);
    end_drag(dnd);
}

fn stop_autoscroll(dnd: &DndSignals) {
    dnd.scroll_step_write.set(0.0);
    // Dropping the Interval cancels it
    dnd.scroll_timer.set_value(None);
}

/// Create mousedown handler for draggable rows
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            // Record pending drag with position
            dnd.pending_id_write.set(Some(item_id));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mousemove handler for document - starts drag if moved enough
fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_id_read.get_untracked();

        // If we have a pending drag and haven't started dragging yet
        if pending.is_some() && dnd.dragging_id_read.get_untracked().is_none() {
            let start_x = dnd.start_x_read.get_untracked();
            let start_y = dnd.start_y_read.get_untracked();
            let dx = (ev.client_x() - start_x).abs();
            let dy = (ev.client_y() - start_y).abs();

            // Start dragging if moved beyond threshold
            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                dnd.dragging_id_write.set(pending);
            }
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for nodes (dragged item takes the node's slot)
pub fn make_on_node_mouseenter(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_id_read.get_untracked() {
            // Don't allow dropping on self
            if dragging != item_id {
                dnd.drop_target_write.set(Some(DropTarget::Node(item_id)));
            }
        }
    }
}

/// Create mouseenter handler for empty-folder placeholders
pub fn make_on_empty_folder_mouseenter(dnd: DndSignals, folder_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_id_read.get_untracked() {
            if dragging != folder_id {
                dnd.drop_target_write.set(Some(DropTarget::EmptyFolder(folder_id)));
            }
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(u32, DropTarget) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging_id = dnd.dragging_id_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();

        // Clear pending state first
        dnd.pending_id_write.set(None);

        // If we were actually dragging (not just clicking)
        if let (Some(dragged), Some(target)) = (dragging_id, drop_target) {
            end_drag(&dnd);
            on_drop(dragged, target);
        } else {
            // Dropped outside any droppable surface, or plain click
            end_drag(&dnd);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}

/// Bind Escape to cancel an in-flight gesture with no mutation
pub fn bind_escape_cancel(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && dnd.dragging_id_read.get_untracked().is_some() {
            cancel_drag(&dnd);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        }
    }
    on_keydown.forget();
}

/// Auto-scroll the container while dragging near its top or bottom edge.
///
/// Speed is inversely proportional to edge distance. At most one interval is
/// alive per gesture; it is dropped on drop, cancel, or when the pointer
/// re-enters the non-edge zone.
pub fn bind_autoscroll(dnd: DndSignals, container_id: &'static str) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_none() {
            if dnd.scroll_timer.with_value(Option::is_some) {
                stop_autoscroll(&dnd);
            }
            return;
        }
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(container_id))
        else {
            return;
        };

        let rect = el.get_bounding_client_rect();
        let y = ev.client_y() as f64;
        let step = if y < rect.top() + SCROLL_EDGE_PX {
            let closeness = ((rect.top() + SCROLL_EDGE_PX - y) / SCROLL_EDGE_PX).min(1.0);
            -closeness * SCROLL_MAX_STEP_PX
        } else if y > rect.bottom() - SCROLL_EDGE_PX {
            let closeness = ((y - (rect.bottom() - SCROLL_EDGE_PX)) / SCROLL_EDGE_PX).min(1.0);
            closeness * SCROLL_MAX_STEP_PX
        } else {
            0.0
        };

        if step == 0.0 {
            stop_autoscroll(&dnd);
            return;
        }
        dnd.scroll_step_write.set(step);

        if dnd.scroll_timer.with_value(Option::is_none) {
            let interval = Interval::new(SCROLL_TICK_MS, move || {
                let step = dnd.scroll_step_read.get_untracked();
                if let Some(el) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.get_element_by_id(container_id))
                {
                    el.set_scroll_top(el.scroll_top() + step.round() as i32);
                }
            });
            dnd.scroll_timer.set_value(Some(interval));
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_drag_raises_click_guard_and_clears_gesture() {
        let dnd = create_dnd_signals();
        dnd.pending_id_write.set(Some(7));
        dnd.dragging_id_write.set(Some(7));
        dnd.drop_target_write.set(Some(DropTarget::Node(3)));

        end_drag(&dnd);

        assert!(dnd.drag_just_ended_read.get_untracked());
        assert_eq!(dnd.dragging_id_read.get_untracked(), None);
        assert_eq!(dnd.pending_id_read.get_untracked(), None);
        assert_eq!(dnd.drop_target_read.get_untracked(), None);
    }

    #[test]
    fn test_cancel_drag_discards_target_and_guards_click() {
        let dnd = create_dnd_signals();
        dnd.dragging_id_write.set(Some(2));
        dnd.drop_target_write.set(Some(DropTarget::EmptyFolder(5)));

        cancel_drag(&dnd);

        assert_eq!(dnd.drop_target_read.get_untracked(), None);
        assert!(dnd.drag_just_ended_read.get_untracked());
    }
}
