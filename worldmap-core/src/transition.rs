use crate::viewbox::ViewBox;

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Animated move of the displayed viewBox towards the controller's target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBoxTransition {
    from: ViewBox,
    to: ViewBox,
    started_at: f64,
    duration: f64,
}

impl ViewBoxTransition {
    /// `started_at` and `duration` are in milliseconds.
    pub fn new(from: ViewBox, to: ViewBox, started_at: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
        }
    }

    pub fn target(&self) -> ViewBox {
        self.to
    }

    /// The viewBox to display at `now`, and whether the transition is over.
    pub fn sample(&self, now: f64) -> (ViewBox, bool) {
        if self.duration <= 0.0 {
            return (self.to, true);
        }
        let t = (now - self.started_at) / self.duration;
        if t >= 1.0 {
            return (self.to, true);
        }
        (self.from.lerp(&self.to, ease_in_out_cubic(t)), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn sample_moves_from_start_to_target() {
        let from = ViewBox::new(0.0, 0.0, 960.0, 500.0);
        let to = ViewBox::new(48.0, 0.0, 960.0, 500.0);
        let transition = ViewBoxTransition::new(from, to, 100.0, 250.0);

        assert_eq!(transition.sample(100.0), (from, false));
        let (mid, done) = transition.sample(225.0);
        assert!(!done);
        assert!((mid.x - 24.0).abs() < 1e-9);
        assert_eq!(transition.sample(350.0), (to, true));
        assert_eq!(transition.sample(1_000.0), (to, true));
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let from = ViewBox::new(0.0, 0.0, 960.0, 500.0);
        let to = ViewBox::new(0.0, 25.0, 960.0, 500.0);
        assert_eq!(ViewBoxTransition::new(from, to, 0.0, 0.0).sample(0.0), (to, true));
    }
}
