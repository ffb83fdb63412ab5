//! Raw projection formulas.
//!
//! Each formula maps a rotated `(lambda, phi)` in radians to unit plane
//! coordinates with y pointing north. Scaling, translation and the y flip to
//! screen space happen in [`Projection`](super::Projection).

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, SQRT_2};

const EPSILON: f64 = 1e-6;

/// Mercator latitude limit; keeps the output square and finite.
pub const MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

const SINUSOIDAL_MOLLWEIDE_PHI: f64 = 0.710_988_959_620_756_7;
const SINUSOIDAL_MOLLWEIDE_Y: f64 = 0.052_803_527_454_2;

/// Parameters of Hufnagel's family of pseudocylindrical projections.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HufnagelParams {
    pub a: f64,
    pub b: f64,
    pub psi_max: f64,
    pub ratio: f64,
}

impl Default for HufnagelParams {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            psi_max: FRAC_PI_4,
            ratio: SQRT_2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawProjection {
    Aitoff,
    AzimuthalEqualArea,
    Boggs,
    Bromley,
    CylindricalStereographic { parallel: f64 },
    Eckert4,
    Fahey,
    Gilbert,
    Homolosine,
    Hufnagel(HufnagelParams),
    Mercator,
    Mollweide,
    NaturalEarth1,
    Orthographic,
    Patterson,
}

impl RawProjection {
    pub fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        match *self {
            RawProjection::Aitoff => aitoff(lambda, phi),
            RawProjection::AzimuthalEqualArea => azimuthal_equal_area(lambda, phi),
            RawProjection::Boggs => boggs(lambda, phi),
            RawProjection::Bromley => mollweide_bromley(1.0, 4.0 / PI, PI, lambda, phi),
            RawProjection::CylindricalStereographic { parallel } => {
                let cos_phi0 = parallel.cos();
                (lambda * cos_phi0, (1.0 + cos_phi0) * (phi / 2.0).tan())
            }
            RawProjection::Eckert4 => eckert4(lambda, phi),
            RawProjection::Fahey => fahey(lambda, phi),
            RawProjection::Gilbert => {
                let half_phi_tan = (phi / 2.0).tan().clamp(-1.0, 1.0);
                orthographic(lambda / 2.0, half_phi_tan.asin())
            }
            RawProjection::Homolosine => homolosine(lambda, phi),
            RawProjection::Hufnagel(params) => hufnagel(&params, lambda, phi),
            RawProjection::Mercator => {
                let limit = MERCATOR_MAX_LAT.to_radians();
                let phi = phi.clamp(-limit, limit);
                (lambda, (FRAC_PI_4 + phi / 2.0).tan().ln())
            }
            RawProjection::Mollweide => mollweide(lambda, phi),
            RawProjection::NaturalEarth1 => natural_earth1(lambda, phi),
            RawProjection::Orthographic => orthographic(lambda, phi),
            RawProjection::Patterson => patterson(lambda, phi),
        }
    }
}

fn sinci(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        x / x.sin()
    }
}

fn aitoff(lambda: f64, phi: f64) -> (f64, f64) {
    let half = lambda / 2.0;
    let cos_phi = phi.cos();
    let sincia = sinci((cos_phi * half.cos()).clamp(-1.0, 1.0).acos());
    (2.0 * cos_phi * half.sin() * sincia, phi.sin() * sincia)
}

fn azimuthal_equal_area(lambda: f64, phi: f64) -> (f64, f64) {
    let cos_phi = phi.cos();
    let denom = 1.0 + lambda.cos() * cos_phi;
    if denom <= 0.0 {
        return (2.0, 0.0);
    }
    let k = (2.0 / denom).sqrt();
    (k * cos_phi * lambda.sin(), k * phi.sin())
}

fn orthographic(lambda: f64, phi: f64) -> (f64, f64) {
    (phi.cos() * lambda.sin(), phi.sin())
}

/// Auxiliary angle shared by Mollweide, Bromley and Boggs.
fn mollweide_bromley_theta(cp: f64, phi: f64) -> f64 {
    let cp_sin_phi = cp * phi.sin();
    let mut theta = phi;
    for _ in 0..30 {
        let delta = (theta + theta.sin() - cp_sin_phi) / (1.0 + theta.cos());
        theta -= delta;
        if delta.abs() <= EPSILON || !delta.is_finite() {
            break;
        }
    }
    if theta.is_finite() {
        theta / 2.0
    } else {
        phi.signum() * FRAC_PI_2
    }
}

fn mollweide_bromley(cx: f64, cy: f64, cp: f64, lambda: f64, phi: f64) -> (f64, f64) {
    let theta = mollweide_bromley_theta(cp, phi);
    (cx * lambda * theta.cos(), cy * theta.sin())
}

fn mollweide(lambda: f64, phi: f64) -> (f64, f64) {
    mollweide_bromley(SQRT_2 / FRAC_PI_2, SQRT_2, PI, lambda, phi)
}

fn boggs(lambda: f64, phi: f64) -> (f64, f64) {
    const K: f64 = 2.00276;
    const W: f64 = 1.11072;
    let theta = mollweide_bromley_theta(PI, phi);
    (
        K * lambda / (1.0 / phi.cos() + W / theta.cos()),
        (phi + SQRT_2 * theta.sin()) / K,
    )
}

fn eckert4(lambda: f64, phi: f64) -> (f64, f64) {
    let k = (2.0 + FRAC_PI_2) * phi.sin();
    let mut theta = phi / 2.0;
    for _ in 0..10 {
        let cos_theta = theta.cos();
        let delta =
            (theta + theta.sin() * (cos_theta + 2.0) - k) / (2.0 * cos_theta * (1.0 + cos_theta));
        theta -= delta;
        if delta.abs() <= EPSILON {
            break;
        }
    }
    (
        2.0 / (PI * (4.0 + PI)).sqrt() * lambda * (1.0 + theta.cos()),
        2.0 * (PI / (4.0 + PI)).sqrt() * theta.sin(),
    )
}

fn fahey(lambda: f64, phi: f64) -> (f64, f64) {
    let k = 35f64.to_radians().cos();
    let t = (phi / 2.0).tan();
    (lambda * k * (1.0 - t * t).max(0.0).sqrt(), (1.0 + k) * t)
}

fn sinusoidal(lambda: f64, phi: f64) -> (f64, f64) {
    (lambda * phi.cos(), phi)
}

fn homolosine(lambda: f64, phi: f64) -> (f64, f64) {
    if phi.abs() > SINUSOIDAL_MOLLWEIDE_PHI {
        let (x, y) = mollweide(lambda, phi);
        let shift = if phi > 0.0 {
            SINUSOIDAL_MOLLWEIDE_Y
        } else {
            -SINUSOIDAL_MOLLWEIDE_Y
        };
        (x, y - shift)
    } else {
        sinusoidal(lambda, phi)
    }
}

fn natural_earth1(lambda: f64, phi: f64) -> (f64, f64) {
    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;
    (
        lambda
            * (0.8707 - 0.131979 * phi2
                + phi4 * (-0.013791 + phi4 * (0.003971 * phi2 - 0.001529 * phi4))),
        phi * (1.007226
            + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4))),
    )
}

fn patterson(lambda: f64, phi: f64) -> (f64, f64) {
    const K1: f64 = 1.0148;
    const K2: f64 = 0.23185;
    const K3: f64 = -0.14499;
    const K4: f64 = 0.02406;
    let phi2 = phi * phi;
    (lambda, phi * (K1 + phi2 * phi2 * (K2 + phi2 * (K3 + K4 * phi2))))
}

/// Newton iteration with a numeric derivative; `None` if it fails to settle.
fn solve(f: impl Fn(f64) -> f64, target: f64, mut x: f64) -> Option<f64> {
    for _ in 0..100 {
        let f0 = f(x);
        let mut f1 = f(x + EPSILON);
        if f0 == f1 {
            f1 = f0 + EPSILON;
        }
        let delta = -EPSILON * (f0 - target) / (f0 - f1);
        x -= delta;
        if !x.is_finite() {
            return None;
        }
        if delta.abs() <= EPSILON {
            return Some(x);
        }
    }
    None
}

fn hufnagel(params: &HufnagelParams, lambda: f64, phi: f64) -> (f64, f64) {
    let HufnagelParams {
        a,
        b,
        psi_max,
        ratio,
    } = *params;

    let area = |psi: f64| {
        2.0 * psi
            + (1.0 + a - b / 2.0) * (2.0 * psi).sin()
            + ((a + b) / 2.0) * (4.0 * psi).sin()
            + (b / 2.0) * (6.0 * psi).sin()
    };
    let radius = |psi: f64| (1.0 + a * (2.0 * psi).cos() + b * (4.0 * psi).cos()).sqrt();

    let k = (4.0 * PI / area(psi_max)).sqrt();
    let c = (ratio * psi_max.sin() * (radius(psi_max) / (1.0 + a + b).sqrt())).sqrt();
    let mapping = |t: f64| area(t * psi_max) / psi_max;
    let m = mapping(1.0);

    let psi = solve(mapping, m * phi.sin(), phi / PI)
        .map(|t| t * psi_max)
        .filter(|psi| psi.abs() <= psi_max + EPSILON)
        .unwrap_or(psi_max * phi.signum());
    let kr = k * radius(psi);
    (kr * c * lambda / PI * psi.cos(), kr / c * psi.sin())
}
