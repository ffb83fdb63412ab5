use std::f64::consts::{PI, TAU};

/// Wrap a longitude in radians into `[-PI, PI]`.
pub fn wrap_longitude(lambda: f64) -> f64 {
    let wrapped = (lambda + PI).rem_euclid(TAU) - PI;
    // rem_euclid maps +PI to -PI; keep the sign of the input at the seam
    if wrapped == -PI && lambda > 0.0 {
        PI
    } else {
        wrapped
    }
}

/// Three-axis spherical rotation (yaw, pitch, roll), applied before the raw
/// projection. Angles are stored in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    delta_lambda: f64,
    cos_phi: f64,
    sin_phi: f64,
    cos_gamma: f64,
    sin_gamma: f64,
    degrees: [f64; 3],
}

impl Rotation {
    pub fn from_degrees(degrees: [f64; 3]) -> Self {
        let [lambda, phi, gamma] = degrees.map(f64::to_radians);
        Self {
            delta_lambda: lambda,
            cos_phi: phi.cos(),
            sin_phi: phi.sin(),
            cos_gamma: gamma.cos(),
            sin_gamma: gamma.sin(),
            degrees,
        }
    }

    pub fn identity() -> Self {
        Self::from_degrees([0.0, 0.0, 0.0])
    }

    pub fn degrees(&self) -> [f64; 3] {
        self.degrees
    }

    fn tilts(&self) -> bool {
        self.sin_phi != 0.0 || self.sin_gamma != 0.0
    }

    /// Rotate a point given in radians. Output longitude is in `[-PI, PI]`.
    pub fn apply(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let lambda = wrap_longitude(lambda + self.delta_lambda);
        if !self.tilts() {
            return (lambda, phi);
        }

        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * self.cos_phi + x * self.sin_phi;

        (
            (y * self.cos_gamma - k * self.sin_gamma).atan2(x * self.cos_phi - z * self.sin_phi),
            (k * self.cos_gamma + y * self.sin_gamma).clamp(-1.0, 1.0).asin(),
        )
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}
