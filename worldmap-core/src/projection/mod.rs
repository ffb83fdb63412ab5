//! Projections from longitude/latitude to SVG user space.
//!
//! A [`Projection`] rotates a point onto its frame, decides whether it is
//! visible under the clip, picks an interrupted lobe if any, runs the raw
//! formula and finally scales and translates into pixels.

pub mod kind;
pub mod raw;
pub mod rotation;

pub use kind::{Clip, Interruption, Lobe, ProjectionKind};
pub use raw::RawProjection;
pub use rotation::{wrap_longitude, Rotation};

use crate::config::get_config;
use std::f64::consts::{FRAC_PI_2, PI};

/// Inset from lobe edges when tracing the outline, in radians.
const EDGE_EPSILON: f64 = 1e-6;
/// Sampling step for traced edges, in degrees.
const OUTLINE_STEP: f64 = 2.5;

/// A point on the rotated sphere, in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePoint {
    pub lambda: f64,
    pub phi: f64,
}

impl FramePoint {
    pub fn new(lambda: f64, phi: f64) -> Self {
        Self { lambda, phi }
    }

    pub fn to_cartesian(self) -> [f64; 3] {
        let cos_phi = self.phi.cos();
        [
            cos_phi * self.lambda.cos(),
            cos_phi * self.lambda.sin(),
            self.phi.sin(),
        ]
    }

    /// Inverse of [`to_cartesian`](Self::to_cartesian); the vector need not be unit length.
    pub fn from_cartesian([x, y, z]: [f64; 3]) -> Self {
        let norm = (x * x + y * y + z * z).sqrt();
        if norm == 0.0 {
            return Self::new(0.0, 0.0);
        }
        Self::new(y.atan2(x), (z / norm).clamp(-1.0, 1.0).asin())
    }

    /// Great-circle distance in radians.
    pub fn distance(self, other: FramePoint) -> f64 {
        let [ax, ay, az] = self.to_cartesian();
        let [bx, by, bz] = other.to_cartesian();
        let cross = [ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx];
        let sin = (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt();
        let cos = ax * bx + ay * by + az * bz;
        sin.atan2(cos)
    }

    /// Point at fraction `t` along the great circle to `other`.
    pub fn interpolate(self, other: FramePoint, t: f64) -> FramePoint {
        let omega = self.distance(other);
        if omega < 1e-12 {
            return self;
        }
        let sin_omega = omega.sin();
        let (wa, wb) = if sin_omega.abs() < 1e-12 {
            (1.0 - t, t)
        } else {
            (
                ((1.0 - t) * omega).sin() / sin_omega,
                (t * omega).sin() / sin_omega,
            )
        };
        let a = self.to_cartesian();
        let b = other.to_cartesian();
        Self::from_cartesian([
            wa * a[0] + wb * b[0],
            wa * a[1] + wb * b[1],
            wa * a[2] + wb * b[2],
        ])
    }
}

/// The lobe a frame point falls in. Uninterrupted projections have one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub south: bool,
    pub index: usize,
}

impl Segment {
    pub const WHOLE: Segment = Segment {
        south: false,
        index: 0,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    kind: ProjectionKind,
    raw: RawProjection,
    clip: Clip,
    clip_cos: f64,
    interruption: Option<&'static Interruption>,
    scale: f64,
    translate: (f64, f64),
    rotation: Rotation,
}

impl Projection {
    /// Projection with the registry scale, centered at `translate`.
    pub fn new(kind: ProjectionKind, translate: (f64, f64)) -> Self {
        let clip = kind.clip();
        let clip_cos = match clip {
            Clip::Circle { angle } => angle.to_radians().cos(),
            Clip::Antimeridian => -1.0,
        };
        Self {
            kind,
            raw: kind.raw(),
            clip,
            clip_cos,
            interruption: kind.interruption(),
            scale: get_config(kind).scale,
            translate,
            rotation: Rotation::identity(),
        }
    }

    pub fn with_rotation(mut self, degrees: [f64; 3]) -> Self {
        self.rotate(degrees);
        self
    }

    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    pub fn clip(&self) -> Clip {
        self.clip
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> (f64, f64) {
        self.translate
    }

    pub fn rotation(&self) -> [f64; 3] {
        self.rotation.degrees()
    }

    pub fn rotate(&mut self, degrees: [f64; 3]) {
        self.rotation = Rotation::from_degrees(degrees);
    }

    pub fn is_interrupted(&self) -> bool {
        self.interruption.is_some()
    }

    /// Rotate a geographic position in degrees onto the projection frame.
    pub fn to_frame(&self, lon: f64, lat: f64) -> FramePoint {
        let (lambda, phi) = self.rotation.apply(lon.to_radians(), lat.to_radians());
        FramePoint::new(lambda, phi)
    }

    pub fn is_visible(&self, p: FramePoint) -> bool {
        match self.clip {
            Clip::Antimeridian => true,
            Clip::Circle { .. } => p.lambda.cos() * p.phi.cos() > self.clip_cos,
        }
    }

    pub fn segment_of(&self, p: FramePoint) -> Segment {
        let Some(interruption) = self.interruption else {
            return Segment::WHOLE;
        };
        let south = p.phi < 0.0;
        let lobes = interruption.lobes(south);
        let lambda = p.lambda.to_degrees();
        let index = lobes
            .iter()
            .position(|l| lambda <= l.east)
            .unwrap_or(lobes.len() - 1);
        Segment { south, index }
    }

    /// Longitude range of a segment in radians.
    pub fn segment_bounds(&self, segment: Segment) -> (f64, f64) {
        match self.lobe(segment) {
            Some(l) => (l.west.to_radians(), l.east.to_radians()),
            None => (-PI, PI),
        }
    }

    fn lobe(&self, segment: Segment) -> Option<Lobe> {
        self.interruption
            .and_then(|i| i.lobes(segment.south).get(segment.index).copied())
    }

    /// Project a frame point in its own segment. Ignores the clip.
    pub fn project_frame(&self, p: FramePoint) -> (f64, f64) {
        self.project_in_segment(p, self.segment_of(p))
    }

    /// Project a frame point as if it belonged to `segment`, unwrapping its
    /// longitude across the antimeridian when needed.
    pub fn project_in_segment(&self, p: FramePoint, segment: Segment) -> (f64, f64) {
        let (rx, ry) = match self.lobe(segment) {
            None => self.raw.forward(p.lambda, p.phi),
            Some(lobe) => {
                let (west, east) = (lobe.west.to_radians(), lobe.east.to_radians());
                let mut lambda = p.lambda;
                if lambda < west - FRAC_PI_2 {
                    lambda += 2.0 * PI;
                } else if lambda > east + FRAC_PI_2 {
                    lambda -= 2.0 * PI;
                }
                let center = lobe.center.to_radians();
                let (x, y) = self.raw.forward(lambda - center, p.phi);
                (x + self.raw.forward(center, 0.0).0, y)
            }
        };
        self.to_screen(rx, ry)
    }

    fn to_screen(&self, rx: f64, ry: f64) -> (f64, f64) {
        (
            self.translate.0 + self.scale * rx,
            self.translate.1 - self.scale * ry,
        )
    }

    /// Project a position in degrees; `None` when it is clipped away.
    pub fn project(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        let p = self.to_frame(lon, lat);
        self.is_visible(p).then(|| self.project_frame(p))
    }

    /// Move a hidden point onto the clip circle along its bearing from the
    /// frame center. Points already visible are returned as is.
    pub fn clamp_to_clip(&self, p: FramePoint) -> FramePoint {
        let Clip::Circle { angle } = self.clip else {
            return p;
        };
        if self.is_visible(p) {
            return p;
        }
        let [_, y, z] = p.to_cartesian();
        let bearing = z.atan2(y);
        circle_point(angle.to_radians(), bearing)
    }

    /// Sphere outline as a closed ring of pixel coordinates.
    pub fn outline(&self) -> Vec<(f64, f64)> {
        let mut ring = match (self.clip, self.interruption) {
            (Clip::Circle { angle }, _) => {
                let radius = angle.to_radians();
                (0..360)
                    .map(|deg| self.project_frame(circle_point(radius, f64::from(deg).to_radians())))
                    .collect()
            }
            (Clip::Antimeridian, None) => self.rectangle_outline(),
            (Clip::Antimeridian, Some(interruption)) => self.lobe_outline(interruption),
        };
        ring.dedup_by(|a, b| (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9);
        ring
    }

    fn rectangle_outline(&self) -> Vec<(f64, f64)> {
        let mut frame = Vec::new();
        frame.extend(steps(-90.0, 90.0).map(|phi| (180.0, phi)));
        frame.extend(steps(180.0, -180.0).map(|lambda| (lambda, 90.0)));
        frame.extend(steps(90.0, -90.0).map(|phi| (-180.0, phi)));
        frame.extend(steps(-180.0, 180.0).map(|lambda| (lambda, -90.0)));
        frame
            .into_iter()
            .map(|(lambda, phi)| {
                self.project_frame(FramePoint::new(lambda.to_radians(), phi.to_radians()))
            })
            .collect()
    }

    fn lobe_outline(&self, interruption: &Interruption) -> Vec<(f64, f64)> {
        let mut ring = Vec::new();
        for (index, lobe) in interruption.north.iter().enumerate() {
            let segment = Segment {
                south: false,
                index,
            };
            let west = lobe.west.to_radians() + EDGE_EPSILON;
            let east = lobe.east.to_radians() - EDGE_EPSILON;
            for phi in steps(0.0, 90.0) {
                ring.push(self.project_in_segment(FramePoint::new(west, phi.to_radians()), segment));
            }
            for phi in steps(90.0, 0.0) {
                ring.push(self.project_in_segment(FramePoint::new(east, phi.to_radians()), segment));
            }
        }
        for (index, lobe) in interruption.south.iter().enumerate().rev() {
            let segment = Segment { south: true, index };
            let west = lobe.west.to_radians() + EDGE_EPSILON;
            let east = lobe.east.to_radians() - EDGE_EPSILON;
            for phi in steps(0.0, -90.0) {
                ring.push(self.project_in_segment(FramePoint::new(east, phi.to_radians()), segment));
            }
            for phi in steps(-90.0, 0.0) {
                ring.push(self.project_in_segment(FramePoint::new(west, phi.to_radians()), segment));
            }
        }
        ring
    }
}

/// Point at angular distance `radius` from the frame center, at `bearing`
/// measured from east towards north.
fn circle_point(radius: f64, bearing: f64) -> FramePoint {
    let (sin_r, cos_r) = radius.sin_cos();
    FramePoint::from_cartesian([cos_r, sin_r * bearing.cos(), sin_r * bearing.sin()])
}

/// Inclusive sequence from `from` to `to` in outline steps.
fn steps(from: f64, to: f64) -> impl Iterator<Item = f64> {
    let count = ((to - from).abs() / OUTLINE_STEP).round() as usize;
    let step = if count == 0 { 0.0 } else { (to - from) / count as f64 };
    (0..=count).map(move |i| from + step * i as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSLATE: (f64, f64) = (480.0, 250.0);

    #[test]
    fn origin_projects_to_translate() {
        for kind in ProjectionKind::ALL {
            let projection = Projection::new(kind, TRANSLATE);
            let (x, y) = projection.project(0.0, 0.0).unwrap();
            // Interrupted lobes not centered on 0 still map the origin to x = 0
            assert!((x - 480.0).abs() < 1e-6, "{kind:?} x = {x}");
            assert!((y - 250.0).abs() < 1e-6, "{kind:?} y = {y}");
        }
    }

    #[test]
    fn north_is_screen_up() {
        let projection = Projection::new(ProjectionKind::NaturalEarth1, TRANSLATE);
        let (_, y) = projection.project(0.0, 45.0).unwrap();
        assert!(y < 250.0);
    }

    #[test]
    fn orthographic_hides_far_side() {
        let projection = Projection::new(ProjectionKind::Orthographic, TRANSLATE);
        assert!(projection.project(0.0, 0.0).is_some());
        assert!(projection.project(180.0, 0.0).is_none());
        assert!(projection.project(100.0, 0.0).is_none());
        assert!(projection.project(80.0, 0.0).is_some());
    }

    #[test]
    fn rotation_brings_point_to_center() {
        let projection =
            Projection::new(ProjectionKind::Orthographic, TRANSLATE).with_rotation([-90.0, 0.0, 0.0]);
        let (x, y) = projection.project(90.0, 0.0).unwrap();
        assert!((x - 480.0).abs() < 1e-9);
        assert!((y - 250.0).abs() < 1e-9);
        assert_eq!(projection.rotation(), [-90.0, 0.0, 0.0]);
    }

    #[test]
    fn mercator_spans_canvas_width() {
        let projection = Projection::new(ProjectionKind::Mercator, TRANSLATE);
        let (x, _) = projection.project(180.0, 0.0).unwrap();
        assert!((x - 960.5).abs() < 1e-9);
    }

    #[test]
    fn homolosine_lobes_are_picked_by_hemisphere() {
        let projection = Projection::new(ProjectionKind::InterruptedHomolosine, TRANSLATE);
        let north = projection.segment_of(projection.to_frame(-60.0, 10.0));
        let south = projection.segment_of(projection.to_frame(-60.0, -10.0));
        assert_eq!(north, Segment { south: false, index: 0 });
        assert_eq!(south, Segment { south: true, index: 1 });
    }

    #[test]
    fn lobes_meet_at_the_equator() {
        let projection = Projection::new(ProjectionKind::InterruptedHomolosine, TRANSLATE);
        let p = projection.to_frame(-60.0, 0.0);
        let north = projection.project_in_segment(p, Segment { south: false, index: 0 });
        let south = projection.project_in_segment(p, Segment { south: true, index: 1 });
        assert!((north.0 - south.0).abs() < 1e-9);
        assert!((north.1 - south.1).abs() < 1e-9);
    }

    #[test]
    fn clamp_to_clip_lands_on_horizon() {
        let projection = Projection::new(ProjectionKind::Orthographic, TRANSLATE);
        let hidden = projection.to_frame(150.0, 20.0);
        let clamped = projection.clamp_to_clip(hidden);
        let center = FramePoint::new(0.0, 0.0);
        assert!((clamped.distance(center) - FRAC_PI_2).abs() < 1e-9);
        let (x, y) = projection.project_frame(clamped);
        let r = ((x - 480.0).powi(2) + (y - 250.0).powi(2)).sqrt();
        assert!((r - 249.5).abs() < 1e-6);
    }

    #[test]
    fn orthographic_outline_is_a_circle() {
        let projection = Projection::new(ProjectionKind::Orthographic, TRANSLATE);
        let outline = projection.outline();
        assert_eq!(outline.len(), 360);
        for (x, y) in outline {
            let r = ((x - 480.0).powi(2) + (y - 250.0).powi(2)).sqrt();
            assert!((r - 249.5).abs() < 1e-6);
        }
    }

    #[test]
    fn rectangle_outline_encloses_the_origin() {
        let projection = Projection::new(ProjectionKind::Eckert4, TRANSLATE);
        let outline = projection.outline();
        let min_x = outline.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let max_x = outline.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        assert!(min_x < 480.0 && max_x > 480.0);
        assert!((480.0 - min_x - (max_x - 480.0)).abs() < 1e-6);
    }

    #[test]
    fn interpolate_follows_great_circle() {
        let a = FramePoint::new(0.0, 0.0);
        let b = FramePoint::new(FRAC_PI_2, 0.0);
        let mid = a.interpolate(b, 0.5);
        assert!((mid.lambda - PI / 4.0).abs() < 1e-12);
        assert!(mid.phi.abs() < 1e-12);
    }
}
