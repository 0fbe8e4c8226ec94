//! Leptos DragDrop Utilities
//!
//! Sortable-list drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag, and reports the
//! end of a drag as `(active_id, over_id)`.

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// How long clicks are swallowed after a drop
const CLICK_SUPPRESS_MS: i32 = 100;

/// DnD state signals for one sortable list
#[derive(Clone, Copy)]
pub struct DndSignals {
    /// Row being dragged
    pub dragging_id: RwSignal<Option<u64>>,
    /// Row under the pointer while dragging
    pub over_id: RwSignal<Option<u64>>,
    /// True for a moment after a drop so the row's click can be ignored
    pub drag_just_ended: RwSignal<bool>,
    /// Pending row id (mousedown but not yet dragging)
    pub pending_id: RwSignal<Option<u64>>,
    /// Start position for movement detection
    pub start: RwSignal<(i32, i32)>,
    /// When set, mousedown does not arm a drag
    pub disabled: RwSignal<bool>,
}

pub fn create_dnd_signals() -> DndSignals {
    DndSignals {
        dragging_id: RwSignal::new(None),
        over_id: RwSignal::new(None),
        drag_just_ended: RwSignal::new(false),
        pending_id: RwSignal::new(None),
        start: RwSignal::new((0, 0)),
        disabled: RwSignal::new(false),
    }
}

impl DndSignals {
    pub fn is_dragging(&self, item_id: u64) -> bool {
        self.dragging_id.get() == Some(item_id)
    }

    pub fn is_over(&self, item_id: u64) -> bool {
        self.over_id.get() == Some(item_id) && self.dragging_id.get() != Some(item_id)
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.try_set(disabled);
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id.try_set(None);
    dnd.over_id.try_set(None);
    dnd.pending_id.try_set(None);
    dnd.drag_just_ended.try_set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.try_set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            CLICK_SUPPRESS_MS,
        );
        cb.forget();
    }
}

/// Create mousedown handler for draggable rows
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, item_id: u64) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || dnd.disabled.get_untracked() {
            return;
        }
        // Ignore if target is input or button
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        dnd.pending_id.set(Some(item_id));
        dnd.start.set((ev.client_x(), ev.client_y()));
    }
}

/// Create mouseenter handler for rows
pub fn make_on_mouseenter(dnd: DndSignals, item_id: u64) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id.get_untracked().is_some() {
            dnd.over_id.set(Some(item_id));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id.get_untracked().is_some() {
            dnd.over_id.set(None);
        }
    }
}

/// Bind window mousemove/mouseup handlers for the lifetime of the calling
/// component. `on_drag_end` receives `(active_id, over_id)` for every drag
/// that crossed the threshold, including drops outside any row.
pub fn bind_drag_listeners<F>(dnd: DndSignals, on_drag_end: F)
where
    F: Fn(u64, Option<u64>) + Clone + 'static,
{
    let on_mousemove = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        let Some(pending) = dnd.pending_id.try_get_untracked().flatten() else {
            return;
        };
        if dnd.dragging_id.try_get_untracked().flatten().is_some() {
            return;
        }
        let Some((start_x, start_y)) = dnd.start.try_get_untracked() else {
            return;
        };
        let dx = (ev.client_x() - start_x).abs();
        let dy = (ev.client_y() - start_y).abs();

        // Start dragging if moved beyond threshold
        if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
            dnd.dragging_id.try_set(Some(pending));
        }
    });

    let on_mouseup = window_event_listener(ev::mouseup, move |_ev: web_sys::MouseEvent| {
        let dragging = dnd.dragging_id.try_get_untracked().flatten();
        let over = dnd.over_id.try_get_untracked().flatten();
        dnd.pending_id.try_set(None);

        // Plain click otherwise: the row's click handler fires on its own
        if let Some(active_id) = dragging {
            end_drag(&dnd);
            on_drag_end(active_id, over);
        }
    });

    on_cleanup(move || {
        on_mousemove.remove();
        on_mouseup.remove();
    });
}
