use crate::error::ViewBoxParseError;
use crate::gesture::ZoomEvent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rectangle of SVG user space mapped onto the visible area.
///
/// Serialized to and from the `viewBox` attribute as `"x y width height"`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Full canvas rectangle anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Resize to `width` x `height` keeping the same visual center.
    pub fn resized_about_center(&self, width: f64, height: f64) -> Self {
        Self {
            x: self.x - (width - self.width) / 2.0,
            y: self.y - (height - self.height) / 2.0,
            width,
            height,
        }
    }

    /// Component-wise linear interpolation, `t = 0` is `self`.
    pub fn lerp(&self, other: &ViewBox, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            width: self.width + (other.width - self.width) * t,
            height: self.height + (other.height - self.height) * t,
        }
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for ViewBox {
    type Err = ViewBoxParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 4 {
            return Err(ViewBoxParseError::WrongArity(parts.len()));
        }

        let mut values = [0.0; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ViewBoxParseError::InvalidNumber(part.to_string()))?;
        }

        let [x, y, width, height] = values;
        if width <= 0.0 || height <= 0.0 {
            return Err(ViewBoxParseError::NonPositiveSize);
        }
        Ok(Self::new(x, y, width, height))
    }
}

/// Direction of a discrete pan step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    pub const ALL: [PanDirection; 4] = [
        PanDirection::Up,
        PanDirection::Down,
        PanDirection::Left,
        PanDirection::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            PanDirection::Up => PanDirection::Down,
            PanDirection::Down => PanDirection::Up,
            PanDirection::Left => PanDirection::Right,
            PanDirection::Right => PanDirection::Left,
        }
    }
}

/// Allowed range for the gesture scale factor `k`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleExtent {
    pub min: f64,
    pub max: f64,
}

impl ScaleExtent {
    /// Symmetric extent allowing `doublings` halvings/doublings from 1.
    pub fn from_doublings(doublings: i32) -> Self {
        let max = 2f64.powi(doublings);
        Self { min: 1.0 / max, max }
    }

    pub fn clamp(&self, k: f64) -> f64 {
        k.clamp(self.min, self.max)
    }
}

impl Default for ScaleExtent {
    fn default() -> Self {
        Self::from_doublings(7)
    }
}

/// Owns the SVG viewBox and applies pan, zoom and reset to it.
#[derive(Clone, Debug)]
pub struct ViewBoxController {
    original: ViewBox,
    current: ViewBox,
    /// Gesture scale seen on the previous zoom event.
    last_k: f64,
    pan_fraction: f64,
    zoom_step: f64,
    scale_extent: ScaleExtent,
}

impl ViewBoxController {
    pub fn new(width: f64, height: f64, pan_fraction: f64, zoom_step: f64) -> Self {
        let original = ViewBox::from_size(width, height);
        Self {
            original,
            current: original,
            last_k: 1.0,
            pan_fraction,
            zoom_step,
            scale_extent: ScaleExtent::default(),
        }
    }

    pub fn with_scale_extent(mut self, scale_extent: ScaleExtent) -> Self {
        self.scale_extent = scale_extent;
        self
    }

    pub fn current(&self) -> ViewBox {
        self.current
    }

    pub fn original(&self) -> ViewBox {
        self.original
    }

    pub fn scale_extent(&self) -> ScaleExtent {
        self.scale_extent
    }

    /// Gesture scale applied by the most recent rescale.
    pub fn last_scale(&self) -> f64 {
        self.last_k
    }

    /// Shift the viewBox by a fixed fraction of its size along one axis.
    ///
    /// Panning is unbounded.
    pub fn pan(&mut self, direction: PanDirection) -> ViewBox {
        let dx = self.current.width * self.pan_fraction;
        let dy = self.current.height * self.pan_fraction;
        match direction {
            PanDirection::Up => self.current.y -= dy,
            PanDirection::Down => self.current.y += dy,
            PanDirection::Left => self.current.x -= dx,
            PanDirection::Right => self.current.x += dx,
        }
        self.current
    }

    /// Discard all pan and zoom and show the full canvas again.
    pub fn reset(&mut self) -> ViewBox {
        self.current = self.original;
        self.last_k = 1.0;
        self.current
    }

    /// Apply one event from a continuous zoom gesture.
    ///
    /// A scale change resizes the viewBox around its center; an unchanged
    /// scale is a drag and shifts the viewBox by the gesture delta.
    /// Events carrying a non-finite scale or delta are ignored.
    pub fn zoom(&mut self, event: &ZoomEvent) -> ViewBox {
        if !(event.k.is_finite() && event.dx.is_finite() && event.dy.is_finite()) {
            return self.current;
        }
        let k = self.scale_extent.clamp(event.k);
        if k == self.last_k {
            self.shift_by_gesture_delta(event.dx, event.dy)
        } else {
            self.rescale(k)
        }
    }

    /// Translation-only branch of [`zoom`](Self::zoom).
    ///
    /// The delta is applied verbatim in pixels, including while the gesture
    /// scale is pinned at either end of the extent. Whatever the gesture
    /// source reports in that state is passed through unchanged.
    /// [`ZoomTracker`](crate::gesture::ZoomTracker) reports the change since
    /// the previous event, not the gesture's accumulated translation.
    pub fn shift_by_gesture_delta(&mut self, dx: f64, dy: f64) -> ViewBox {
        self.current.x -= dx;
        self.current.y -= dy;
        self.current
    }

    fn rescale(&mut self, k: f64) -> ViewBox {
        let scale = 1.0 + (k - 1.0) / 10.0;
        let width = self.original.width / scale;
        let height = self.original.height / scale;
        self.current = self.current.resized_about_center(width, height);
        self.last_k = k;
        self.current
    }

    /// Step zoom in around the current center.
    pub fn zoom_in(&mut self) -> ViewBox {
        self.step_zoom(1.0 - self.zoom_step)
    }

    /// Step zoom out around the current center.
    pub fn zoom_out(&mut self) -> ViewBox {
        self.step_zoom(1.0 + self.zoom_step)
    }

    fn step_zoom(&mut self, factor: f64) -> ViewBox {
        let min_width = self.original.width / self.scale_extent.max;
        let max_width = self.original.width / self.scale_extent.min;
        let width = (self.current.width * factor).clamp(min_width, max_width);
        let ratio = width / self.current.width;
        self.current = self
            .current
            .resized_about_center(width, self.current.height * ratio);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ViewBoxController {
        ViewBoxController::new(960.0, 500.0, 0.05, 0.15)
    }

    fn scale_event(k: f64) -> ZoomEvent {
        ZoomEvent {
            k,
            dx: 0.0,
            dy: 0.0,
            anchor: (480.0, 250.0),
        }
    }

    #[test]
    fn viewbox_formats_as_svg_attribute() {
        assert_eq!(ViewBox::new(48.0, 0.0, 960.0, 500.0).to_string(), "48 0 960 500");
        assert_eq!(ViewBox::new(-2.5, 1.25, 10.0, 5.0).to_string(), "-2.5 1.25 10 5");
    }

    #[test]
    fn viewbox_parses_whitespace_and_commas() {
        let vb: ViewBox = "0 0 960 500".parse().unwrap();
        assert_eq!(vb, ViewBox::new(0.0, 0.0, 960.0, 500.0));

        let vb: ViewBox = " -10,20.5  30,40 ".parse().unwrap();
        assert_eq!(vb, ViewBox::new(-10.0, 20.5, 30.0, 40.0));
    }

    #[test]
    fn viewbox_parse_rejects_bad_input() {
        assert_eq!(
            "0 0 960".parse::<ViewBox>(),
            Err(ViewBoxParseError::WrongArity(3))
        );
        assert_eq!(
            "0 0 abc 500".parse::<ViewBox>(),
            Err(ViewBoxParseError::InvalidNumber("abc".to_string()))
        );
        assert_eq!(
            "0 0 0 500".parse::<ViewBox>(),
            Err(ViewBoxParseError::NonPositiveSize)
        );
    }

    #[test]
    fn pan_right_moves_by_five_percent_of_width() {
        let mut c = controller();
        assert_eq!(c.pan(PanDirection::Right).to_string(), "48 0 960 500");
        assert_eq!(c.pan(PanDirection::Left).to_string(), "0 0 960 500");
    }

    #[test]
    fn pan_vertical_uses_height() {
        let mut c = controller();
        assert_eq!(c.pan(PanDirection::Down), ViewBox::new(0.0, 25.0, 960.0, 500.0));
        assert_eq!(c.pan(PanDirection::Up), ViewBox::new(0.0, 0.0, 960.0, 500.0));
        assert_eq!(c.pan(PanDirection::Up), ViewBox::new(0.0, -25.0, 960.0, 500.0));
    }

    #[test]
    fn pan_then_opposite_restores_for_every_direction() {
        for direction in PanDirection::ALL {
            let mut c = controller();
            let before = c.current();
            c.pan(direction);
            assert_ne!(c.current(), before);
            c.pan(direction.opposite());
            assert_eq!(c.current(), before, "direction {:?}", direction);
        }
    }

    #[test]
    fn pan_is_unbounded() {
        let mut c = controller();
        for _ in 0..1000 {
            c.pan(PanDirection::Left);
        }
        assert_eq!(c.current().x, -48_000.0);
    }

    #[test]
    fn reset_restores_original_after_history() {
        let mut c = controller();
        c.pan(PanDirection::Right);
        c.zoom(&scale_event(4.0));
        c.pan(PanDirection::Down);
        c.zoom_in();
        c.shift_by_gesture_delta(13.0, -7.0);

        assert_eq!(c.reset(), ViewBox::new(0.0, 0.0, 960.0, 500.0));
        assert_eq!(c.last_scale(), 1.0);
    }

    #[test]
    fn scale_change_resizes_around_center() {
        let mut c = controller();
        let before = c.current().center();

        // k = 11 gives scale 2
        let vb = c.zoom(&scale_event(11.0));
        assert_eq!(vb.width, 480.0);
        assert_eq!(vb.height, 250.0);
        assert_eq!(vb.center(), before);
        assert_eq!(c.last_scale(), 11.0);
    }

    #[test]
    fn rescale_is_relative_to_original_size() {
        let mut c = controller();
        c.zoom(&scale_event(11.0));
        let vb = c.zoom(&scale_event(1.0 + 10.0 * 3.0));
        assert_eq!(vb.width, 240.0);
        assert_eq!(vb.height, 500.0 / 4.0);
    }

    #[test]
    fn unchanged_scale_shifts_by_raw_delta() {
        let mut c = controller();
        let vb = c.zoom(&ZoomEvent {
            k: 1.0,
            dx: 30.0,
            dy: -12.0,
            anchor: (0.0, 0.0),
        });
        assert_eq!(vb, ViewBox::new(-30.0, 12.0, 960.0, 500.0));
    }

    #[test]
    fn scale_is_clamped_to_extent() {
        let mut c = controller();
        c.zoom(&scale_event(1000.0));
        assert_eq!(c.last_scale(), 128.0);

        c.zoom(&scale_event(1e-9));
        assert_eq!(c.last_scale(), 1.0 / 128.0);
        assert!(c.current().width > 0.0);
        assert!(c.current().height > 0.0);
    }

    #[test]
    fn non_finite_zoom_events_are_ignored() {
        let mut c = controller();
        c.zoom(&scale_event(2.0));
        let before = c.current();

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(c.zoom(&scale_event(bad)), before);
            let shifted = ZoomEvent {
                k: 2.0,
                dx: bad,
                dy: 0.0,
                anchor: (480.0, 250.0),
            };
            assert_eq!(c.zoom(&shifted), before);
            let shifted = ZoomEvent {
                k: 2.0,
                dx: 0.0,
                dy: bad,
                anchor: (480.0, 250.0),
            };
            assert_eq!(c.zoom(&shifted), before);
        }
        assert_eq!(c.last_scale(), 2.0);
    }

    #[test]
    fn pinned_scale_routes_through_translation_branch() {
        let mut c = controller();
        c.zoom(&scale_event(128.0));
        let pinned = c.current();

        // Still above the bound: clamps to the same k, so only the delta applies.
        let vb = c.zoom(&ZoomEvent {
            k: 256.0,
            dx: 5.0,
            dy: 5.0,
            anchor: (0.0, 0.0),
        });
        assert_eq!(vb.width, pinned.width);
        assert_eq!(vb.height, pinned.height);
        assert_eq!(vb.x, pinned.x - 5.0);
        assert_eq!(vb.y, pinned.y - 5.0);
    }

    #[test]
    fn step_zoom_keeps_center_and_aspect() {
        let mut c = controller();
        let center = c.current().center();
        let vb = c.zoom_in();
        assert!((vb.width - 816.0).abs() < 1e-9);
        assert!((vb.height - 425.0).abs() < 1e-9);
        assert!((vb.center().0 - center.0).abs() < 1e-9);
        assert!((vb.center().1 - center.1).abs() < 1e-9);

        let vb = c.zoom_out();
        assert!((vb.width / vb.height - 960.0 / 500.0).abs() < 1e-9);
    }

    #[test]
    fn step_zoom_respects_extent() {
        let mut c = controller();
        for _ in 0..200 {
            c.zoom_in();
        }
        assert!((c.current().width - 960.0 / 128.0).abs() < 1e-9);

        for _ in 0..400 {
            c.zoom_out();
        }
        assert!((c.current().width - 960.0 * 128.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_interpolates_each_component() {
        let a = ViewBox::new(0.0, 0.0, 100.0, 50.0);
        let b = ViewBox::new(10.0, -10.0, 200.0, 150.0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), ViewBox::new(5.0, -5.0, 150.0, 100.0));
    }
}
