use super::{MapState, ViewBoxAnimation};
use crate::rendering::pointer_position;
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent, PointerEvent, WheelEvent};
use worldmap_core::WheelDeltaMode;

/// Wheel, double-click and drag handlers for the map's SVG element.
///
/// Gesture zoom is applied to the displayed viewBox immediately.
#[derive(Clone, Copy)]
pub struct ZoomGesture {
    state: MapState,
    animation: ViewBoxAnimation,
    dragging: RwSignal<bool>,
}

pub fn use_zoom_gesture(state: MapState, animation: ViewBoxAnimation) -> ZoomGesture {
    ZoomGesture {
        state,
        animation,
        dragging: create_rw_signal(false),
    }
}

impl ZoomGesture {
    pub fn is_dragging(&self) -> Signal<bool> {
        self.dragging.into()
    }

    pub fn on_wheel(&self, ev: WheelEvent) {
        ev.prevent_default();
        let Some(pointer) = pointer_position(&ev) else {
            return;
        };
        let mode = WheelDeltaMode::from_dom(ev.delta_mode());
        if let Some(viewbox) = self.state.wheel(ev.delta_y(), mode, ev.ctrl_key(), pointer) {
            self.animation.jump_to(viewbox);
        }
    }

    /// Shift+double-click zooms out.
    pub fn on_double_click(&self, ev: MouseEvent) {
        ev.prevent_default();
        let Some(pointer) = pointer_position(&ev) else {
            return;
        };
        if let Some(viewbox) = self.state.double_click(pointer, ev.shift_key()) {
            self.animation.jump_to(viewbox);
        }
    }

    pub fn on_pointer_down(&self, ev: PointerEvent) {
        if ev.button() != 0 {
            return;
        }
        let Some(pointer) = pointer_position(&ev) else {
            return;
        };
        // Keep receiving moves when the pointer leaves the element mid-drag
        if let Some(element) = ev
            .current_target()
            .and_then(|target| target.dyn_into::<Element>().ok())
        {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
        self.state.drag_start(pointer);
        self.dragging.set(true);
    }

    pub fn on_pointer_move(&self, ev: PointerEvent) {
        if !self.dragging.get_untracked() {
            return;
        }
        let Some(pointer) = pointer_position(&ev) else {
            return;
        };
        if let Some(viewbox) = self.state.drag_move(pointer) {
            self.animation.jump_to(viewbox);
        }
    }

    pub fn on_pointer_up(&self, _ev: PointerEvent) {
        if self.dragging.get_untracked() {
            self.state.drag_end();
            self.dragging.set(false);
        }
    }
}
