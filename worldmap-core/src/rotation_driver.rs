//! Frame-driven rotation of the globe about its axis.
//!
//! Each `start` hands out a [`FrameToken`]. `stop` and `start` bump the
//! generation, so ticks carrying an older token are rejected and a frame
//! scheduled before a stop can never move the globe afterwards.

/// Identifies the run that scheduled an animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameToken(u32);

#[derive(Clone, Debug)]
pub struct RotationDriver {
    /// Degrees of longitude per millisecond
    speed: f64,
    running: bool,
    start_angle: f64,
    started_at: f64,
    last_angle: f64,
    generation: u32,
}

impl RotationDriver {
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            running: false,
            start_angle: 0.0,
            started_at: 0.0,
            last_angle: 0.0,
            generation: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Angle of the most recent frame, kept across stop and start.
    pub fn last_angle(&self) -> f64 {
        self.last_angle
    }

    /// Token for the current run, if one is active.
    pub fn token(&self) -> Option<FrameToken> {
        self.running.then_some(FrameToken(self.generation))
    }

    /// Resume from the last angle. `now` is in milliseconds.
    pub fn start(&mut self, now: f64) -> FrameToken {
        self.generation = self.generation.wrapping_add(1);
        self.running = true;
        self.start_angle = self.last_angle;
        self.started_at = now;
        log::debug!(
            "rotation started at {:.2} deg (run {})",
            self.start_angle,
            self.generation
        );
        FrameToken(self.generation)
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.generation = self.generation.wrapping_add(1);
        self.running = false;
        log::debug!("rotation stopped at {:.2} deg", self.last_angle);
    }

    /// Forget the remembered angle. Stops any running rotation first.
    pub fn reset_angle(&mut self) {
        self.stop();
        self.last_angle = 0.0;
    }

    /// Angle for a frame at `now`, or `None` when the token is stale.
    pub fn tick(&mut self, token: FrameToken, now: f64) -> Option<f64> {
        if !self.running || token.0 != self.generation {
            return None;
        }
        let angle = self.start_angle + (now - self.started_at) * self.speed;
        self.last_angle = angle;
        Some(angle)
    }
}
