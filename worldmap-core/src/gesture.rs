//! Gesture adapter: keyboard and pointer input to viewBox operations.
//!
//! Continuous gestures are tracked as a zoom transform `{k, x, y}` the same
//! way a d3 zoom behaviour does. Every gesture step yields a [`ZoomEvent`]
//! which the [`ViewBoxController`] turns into either a rescale or a shift.

use crate::viewbox::{PanDirection, ScaleExtent, ViewBox, ViewBoxController};
use serde::{Deserialize, Serialize};

/// Per-event output of a continuous zoom/drag gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomEvent {
    /// Gesture scale factor after this event.
    pub k: f64,
    /// Translation change since the previous event, in pixels.
    pub dx: f64,
    pub dy: f64,
    /// Pointer position the gesture is anchored at.
    pub anchor: (f64, f64),
}

/// Accumulated scale and translation of a gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    /// Point in untransformed space currently under screen point `p`.
    pub fn invert(&self, p: (f64, f64)) -> (f64, f64) {
        ((p.0 - self.x) / self.k, (p.1 - self.y) / self.k)
    }

    /// Same transform at scale `k`, keeping screen point `p` fixed.
    pub fn scaled_about(&self, k: f64, p: (f64, f64)) -> Self {
        if k == self.k {
            return *self;
        }
        let (ux, uy) = self.invert(p);
        Self {
            k,
            x: p.0 - ux * k,
            y: p.1 - uy * k,
        }
    }
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Unit of a wheel event's delta, as reported by `WheelEvent.deltaMode`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelDeltaMode {
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => WheelDeltaMode::Line,
            2 => WheelDeltaMode::Page,
            _ => WheelDeltaMode::Pixel,
        }
    }

    fn factor(self) -> f64 {
        match self {
            WheelDeltaMode::Pixel => 0.002,
            WheelDeltaMode::Line => 0.05,
            WheelDeltaMode::Page => 1.0,
        }
    }
}

const PINCH_MULTIPLIER: f64 = 10.0;
const DOUBLE_CLICK_FACTOR: f64 = 2.0;

fn finite(p: (f64, f64)) -> bool {
    p.0.is_finite() && p.1.is_finite()
}

/// Tracks wheel, double-click and drag input as one zoom transform.
#[derive(Clone, Debug)]
pub struct ZoomTracker {
    transform: ZoomTransform,
    extent: ScaleExtent,
    drag_last: Option<(f64, f64)>,
}

impl ZoomTracker {
    pub fn new(extent: ScaleExtent) -> Self {
        Self {
            transform: ZoomTransform::IDENTITY,
            extent,
            drag_last: None,
        }
    }

    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_last.is_some()
    }

    pub fn reset(&mut self) {
        self.transform = ZoomTransform::IDENTITY;
        self.drag_last = None;
    }

    /// Wheel step. Returns `None` when the scale is pinned at a bound and
    /// would not change, mirroring how a d3 zoom swallows such events.
    pub fn wheel(
        &mut self,
        delta_y: f64,
        mode: WheelDeltaMode,
        pinch: bool,
        pointer: (f64, f64),
    ) -> Option<ZoomEvent> {
        if !delta_y.is_finite() || !finite(pointer) {
            return None;
        }
        let multiplier = if pinch { PINCH_MULTIPLIER } else { 1.0 };
        let exponent = -delta_y * mode.factor() * multiplier;
        let k = self.extent.clamp(self.transform.k * 2f64.powf(exponent));
        if k == self.transform.k {
            return None;
        }
        let next = self.transform.scaled_about(k, pointer);
        Some(self.emit(next, pointer))
    }

    /// Double-click zoom: doubles the scale, or halves it when `zoom_out`.
    pub fn double_click(&mut self, pointer: (f64, f64), zoom_out: bool) -> Option<ZoomEvent> {
        if !finite(pointer) {
            return None;
        }
        let factor = if zoom_out {
            1.0 / DOUBLE_CLICK_FACTOR
        } else {
            DOUBLE_CLICK_FACTOR
        };
        let k = self.extent.clamp(self.transform.k * factor);
        let next = self.transform.scaled_about(k, pointer);
        Some(self.emit(next, pointer))
    }

    pub fn drag_start(&mut self, pointer: (f64, f64)) {
        if finite(pointer) {
            self.drag_last = Some(pointer);
        }
    }

    pub fn drag_move(&mut self, pointer: (f64, f64)) -> Option<ZoomEvent> {
        let last = self.drag_last?;
        if !finite(pointer) {
            return None;
        }
        self.drag_last = Some(pointer);
        let next = ZoomTransform {
            k: self.transform.k,
            x: self.transform.x + (pointer.0 - last.0),
            y: self.transform.y + (pointer.1 - last.1),
        };
        Some(self.emit(next, pointer))
    }

    pub fn drag_end(&mut self) {
        self.drag_last = None;
    }

    fn emit(&mut self, next: ZoomTransform, anchor: (f64, f64)) -> ZoomEvent {
        let event = ZoomEvent {
            k: next.k,
            dx: next.x - self.transform.x,
            dy: next.y - self.transform.y,
            anchor,
        };
        self.transform = next;
        event
    }
}

/// Discrete action bound to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Pan(PanDirection),
    ZoomIn,
    ZoomOut,
}

/// Key identity (`KeyboardEvent.key`) to action.
pub static KEY_BINDINGS: &[(&str, KeyAction)] = &[
    ("ArrowUp", KeyAction::Pan(PanDirection::Up)),
    ("ArrowDown", KeyAction::Pan(PanDirection::Down)),
    ("ArrowLeft", KeyAction::Pan(PanDirection::Left)),
    ("ArrowRight", KeyAction::Pan(PanDirection::Right)),
    ("+", KeyAction::ZoomIn),
    ("=", KeyAction::ZoomIn),
    ("-", KeyAction::ZoomOut),
    ("_", KeyAction::ZoomOut),
];

/// Look up the action bound to `key`. Unbound keys yield `None`.
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    KEY_BINDINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, action)| *action)
}

/// Routes input events to a [`ViewBoxController`].
#[derive(Clone, Debug)]
pub struct GestureAdapter {
    tracker: ZoomTracker,
}

impl GestureAdapter {
    pub fn new(extent: ScaleExtent) -> Self {
        Self {
            tracker: ZoomTracker::new(extent),
        }
    }

    pub fn tracker(&self) -> &ZoomTracker {
        &self.tracker
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    /// Resolve a key press. Unbound keys leave the controller untouched.
    pub fn key(&self, key: &str) -> Option<KeyAction> {
        action_for_key(key)
    }

    pub fn apply_key(&self, key: &str, controller: &mut ViewBoxController) -> Option<ViewBox> {
        let action = self.key(key)?;
        Some(match action {
            KeyAction::Pan(direction) => controller.pan(direction),
            KeyAction::ZoomIn => controller.zoom_in(),
            KeyAction::ZoomOut => controller.zoom_out(),
        })
    }

    pub fn wheel(
        &mut self,
        delta_y: f64,
        mode: WheelDeltaMode,
        pinch: bool,
        pointer: (f64, f64),
        controller: &mut ViewBoxController,
    ) -> Option<ViewBox> {
        let event = self.tracker.wheel(delta_y, mode, pinch, pointer)?;
        Some(controller.zoom(&event))
    }

    pub fn double_click(
        &mut self,
        pointer: (f64, f64),
        zoom_out: bool,
        controller: &mut ViewBoxController,
    ) -> Option<ViewBox> {
        let event = self.tracker.double_click(pointer, zoom_out)?;
        Some(controller.zoom(&event))
    }

    pub fn drag_start(&mut self, pointer: (f64, f64)) {
        self.tracker.drag_start(pointer);
    }

    pub fn drag_move(
        &mut self,
        pointer: (f64, f64),
        controller: &mut ViewBoxController,
    ) -> Option<ViewBox> {
        let event = self.tracker.drag_move(pointer)?;
        Some(controller.zoom(&event))
    }

    pub fn drag_end(&mut self) {
        self.tracker.drag_end();
    }
}
