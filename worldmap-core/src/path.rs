//! SVG path strings for projected geometry.
//!
//! Lines are densified along great circles, rotated onto the projection
//! frame and then cut wherever the projection is discontinuous: at the clip
//! circle, across the antimeridian and between interrupted lobes. Polygon
//! rings that were cut are closed along the cut edge.

use crate::geometry::{Geometry, Position};
use crate::projection::{Clip, FramePoint, Projection, Segment};
use std::f64::consts::PI;

/// Maximum great-circle distance between consecutive samples, in degrees.
pub const SAMPLE_STEP_DEG: f64 = 2.5;
/// Radius of the circle drawn for point geometries, in pixels.
pub const POINT_RADIUS: f64 = 4.5;

const BISECT_STEPS: usize = 40;
const MAX_CROSSINGS: usize = 8;
/// Projected gap below which a crossing is treated as continuous, in pixels.
const JOIN_TOLERANCE: f64 = 1e-3;

/// Where a part was cut: the boundary longitude and latitude on the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SeamPoint {
    lambda: f64,
    phi: f64,
    segment: Segment,
}

#[derive(Clone, Debug, Default)]
struct Part {
    points: Vec<(f64, f64)>,
    start: Option<SeamPoint>,
    end: Option<SeamPoint>,
}

/// Collects projected points into parts, opening a new part after each cut.
#[derive(Debug, Default)]
struct PartSink {
    parts: Vec<Part>,
    open: bool,
}

impl PartSink {
    fn point(&mut self, xy: (f64, f64)) {
        if !self.open {
            self.parts.push(Part::default());
            self.open = true;
        }
        if let Some(part) = self.parts.last_mut() {
            part.points.push(xy);
        }
    }

    fn end(&mut self, seam: Option<SeamPoint>) {
        if self.open {
            if let Some(part) = self.parts.last_mut() {
                part.end = seam;
            }
            self.open = false;
        }
    }

    fn start(&mut self, xy: (f64, f64), seam: Option<SeamPoint>) {
        self.parts.push(Part {
            points: vec![xy],
            start: seam,
            end: None,
        });
        self.open = true;
    }

    fn finish(mut self) -> Vec<Part> {
        self.end(None);
        self.parts
    }
}

/// Renders geometry through one projection.
pub struct PathGenerator<'a> {
    projection: &'a Projection,
    step: f64,
}

impl<'a> PathGenerator<'a> {
    pub fn new(projection: &'a Projection) -> Self {
        Self {
            projection,
            step: SAMPLE_STEP_DEG.to_radians(),
        }
    }

    /// SVG `d` attribute for a geometry. Empty when nothing is visible.
    pub fn path(&self, geometry: &Geometry) -> String {
        let mut d = String::new();
        match geometry {
            Geometry::Point { coordinates } => self.write_point(&mut d, *coordinates),
            Geometry::MultiPoint { coordinates } => {
                for &position in coordinates {
                    self.write_point(&mut d, position);
                }
            }
            Geometry::LineString { coordinates } => {
                write_parts(&mut d, &self.line(coordinates), false);
            }
            Geometry::MultiLineString { coordinates } => {
                for line in coordinates {
                    write_parts(&mut d, &self.line(line), false);
                }
            }
            Geometry::Polygon { coordinates } => self.write_polygon(&mut d, coordinates),
            Geometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    self.write_polygon(&mut d, polygon);
                }
            }
            Geometry::Sphere => {
                let outline = Part {
                    points: self.projection.outline(),
                    ..Part::default()
                };
                write_parts(&mut d, &[outline], true);
            }
        }
        d
    }

    fn write_point(&self, d: &mut String, [lon, lat]: Position) {
        let Some((x, y)) = self.projection.project(lon, lat) else {
            return;
        };
        let r = POINT_RADIUS;
        separate(d);
        d.push('M');
        push_coord(d, (x, y + r));
        d.push_str(&format!(
            " a{r},{r} 0 1,1 0,{} a{r},{r} 0 1,1 0,{} Z",
            format_coordinate(-2.0 * r),
            format_coordinate(2.0 * r)
        ));
    }

    fn write_polygon(&self, d: &mut String, rings: &[Vec<Position>]) {
        for ring in rings {
            write_parts(d, &self.ring(ring), true);
        }
    }

    /// Rotate and densify a coordinate sequence onto the frame.
    fn sample(&self, coordinates: &[Position]) -> Vec<FramePoint> {
        let mut points: Vec<FramePoint> = Vec::with_capacity(coordinates.len());
        for &[lon, lat] in coordinates {
            if !(lon.is_finite() && lat.is_finite()) {
                continue;
            }
            let p = self.projection.to_frame(lon, lat);
            if let Some(&prev) = points.last() {
                let distance = prev.distance(p);
                let count = steps_for(distance, self.step);
                for i in 1..count {
                    points.push(prev.interpolate(p, i as f64 / count as f64));
                }
            }
            points.push(p);
        }
        points
    }

    fn line(&self, coordinates: &[Position]) -> Vec<Part> {
        let points = self.sample(coordinates);
        let mut sink = PartSink::default();
        match self.projection.clip() {
            Clip::Circle { .. } => self.stream_clipped_line(&points, &mut sink),
            Clip::Antimeridian => self.stream_cut_line(&points, &mut sink),
        }
        sink.finish()
    }

    fn ring(&self, coordinates: &[Position]) -> Vec<Part> {
        let points = self.sample(coordinates);
        match self.projection.clip() {
            Clip::Circle { .. } => self.clipped_ring(&points).into_iter().collect(),
            Clip::Antimeridian => {
                let mut sink = PartSink::default();
                self.stream_cut_line(&points, &mut sink);
                let parts = rejoin(sink.finish());
                parts.into_iter().map(|part| self.close_along_seam(part)).collect()
            }
        }
    }

    fn stream_clipped_line(&self, points: &[FramePoint], sink: &mut PartSink) {
        let projection = self.projection;
        let visible = |p: FramePoint| projection.is_visible(p);
        let Some((&first, rest)) = points.split_first() else {
            return;
        };
        let mut prev = first;
        let mut prev_visible = visible(first);
        if prev_visible {
            sink.point(projection.project_frame(first));
        }
        for &p in rest {
            let p_visible = visible(p);
            match (prev_visible, p_visible) {
                (true, true) => sink.point(projection.project_frame(p)),
                (true, false) => {
                    let (edge, _) = bisect(prev, p, visible);
                    sink.point(projection.project_frame(edge));
                    sink.end(None);
                }
                (false, true) => {
                    let (edge, _) = bisect(p, prev, visible);
                    sink.start(projection.project_frame(edge), None);
                    sink.point(projection.project_frame(p));
                }
                (false, false) => {}
            }
            prev = p;
            prev_visible = p_visible;
        }
    }

    /// Hidden parts of a ring are pulled onto the clip circle so the fill
    /// stays closed along the horizon.
    fn clipped_ring(&self, points: &[FramePoint]) -> Option<Part> {
        let projection = self.projection;
        if !points.iter().any(|&p| projection.is_visible(p)) {
            return None;
        }
        let mut part = Part::default();
        let mut prev: Option<FramePoint> = None;
        for &p in points {
            if let Some(prev) = prev {
                let (a, b) = (projection.is_visible(prev), projection.is_visible(p));
                if a != b {
                    let (edge, _) = if a {
                        bisect(prev, p, |q| projection.is_visible(q))
                    } else {
                        bisect(p, prev, |q| projection.is_visible(q))
                    };
                    part.points.push(projection.project_frame(edge));
                }
            }
            part.points
                .push(projection.project_frame(projection.clamp_to_clip(p)));
            prev = Some(p);
        }
        Some(part)
    }

    fn stream_cut_line(&self, points: &[FramePoint], sink: &mut PartSink) {
        let Some((&first, rest)) = points.split_first() else {
            return;
        };
        sink.point(self.projection.project_frame(first));
        let mut prev = first;
        for &p in rest {
            self.cut_between(prev, p, sink);
            sink.point(self.projection.project_frame(p));
            prev = p;
        }
    }

    /// Emit the cuts between two consecutive samples.
    fn cut_between(&self, a: FramePoint, b: FramePoint, sink: &mut PartSink) {
        let projection = self.projection;
        let mut from = a;
        for _ in 0..MAX_CROSSINGS {
            if (b.lambda - from.lambda).abs() > PI {
                let (end, start) = antimeridian_crossing(from, b);
                self.cross(end, start, sink);
                from = start;
                continue;
            }
            let from_segment = projection.segment_of(from);
            if from_segment == projection.segment_of(b) {
                return;
            }
            let (end, start) = bisect(from, b, |q| projection.segment_of(q) == from_segment);
            self.cross(end, start, sink);
            from = start;
        }
    }

    fn cross(&self, end: FramePoint, start: FramePoint, sink: &mut PartSink) {
        let projection = self.projection;
        let end_segment = projection.segment_of(end);
        let start_segment = projection.segment_of(start);
        let end_xy = projection.project_in_segment(end, end_segment);
        let start_xy = projection.project_in_segment(start, start_segment);
        if distance(end_xy, start_xy) <= JOIN_TOLERANCE {
            return;
        }
        sink.point(end_xy);
        sink.end(Some(self.seam_point(end, end_segment)));
        sink.start(start_xy, Some(self.seam_point(start, start_segment)));
    }

    fn seam_point(&self, p: FramePoint, segment: Segment) -> SeamPoint {
        let (west, east) = self.projection.segment_bounds(segment);
        let gap = |edge: f64| (p.lambda - edge).abs();
        let lambda = if gap(west) <= gap(east) { west } else { east };
        SeamPoint {
            lambda,
            phi: p.phi,
            segment,
        }
    }

    /// Trace the cut edge from where the part ends back to where it starts.
    fn close_along_seam(&self, mut part: Part) -> Part {
        let (Some(start), Some(end)) = (part.start, part.end) else {
            return part;
        };
        if start.segment != end.segment || (start.lambda - end.lambda).abs() > 1e-9 {
            return part;
        }
        let span = start.phi - end.phi;
        let count = steps_for(span.abs(), self.step);
        for i in 1..count {
            let phi = end.phi + span * i as f64 / count as f64;
            part.points.push(
                self.projection
                    .project_in_segment(FramePoint::new(end.lambda, phi), end.segment),
            );
        }
        part
    }
}

/// Join the last part of a cut ring onto its first when the ring's own
/// start point lies inside a part rather than on a cut.
fn rejoin(mut parts: Vec<Part>) -> Vec<Part> {
    if parts.len() < 2 || parts[0].start.is_some() {
        return parts;
    }
    let first = parts.remove(0);
    if let Some(last) = parts.last_mut() {
        if last.end.is_none() {
            last.points.extend(first.points.into_iter().skip(1));
            last.end = first.end;
        } else {
            parts.insert(0, first);
        }
    }
    parts
}

/// Binary search along the great circle from `inside` to `outside` for the
/// place where `pred` stops holding. Returns the last point that satisfies
/// it and the first that does not.
fn bisect(
    inside: FramePoint,
    outside: FramePoint,
    pred: impl Fn(FramePoint) -> bool,
) -> (FramePoint, FramePoint) {
    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..BISECT_STEPS {
        let mid = (lo + hi) / 2.0;
        if pred(inside.interpolate(outside, mid)) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (inside.interpolate(outside, lo), inside.interpolate(outside, hi))
}

/// The two sides of an antimeridian crossing between `a` and `b`.
fn antimeridian_crossing(a: FramePoint, b: FramePoint) -> (FramePoint, FramePoint) {
    let [ax, ay, az] = a.to_cartesian();
    let [bx, by, bz] = b.to_cartesian();
    let t = if ay == by { 0.5 } else { ay / (ay - by) };
    let crossing = FramePoint::from_cartesian([
        ax + t * (bx - ax),
        ay + t * (by - ay),
        az + t * (bz - az),
    ]);
    (
        FramePoint::new(PI.copysign(a.lambda), crossing.phi),
        FramePoint::new(PI.copysign(b.lambda), crossing.phi),
    )
}

/// Number of equal steps no longer than `step` covering `span`.
fn steps_for(span: f64, step: f64) -> usize {
    (span / step - 1e-9).ceil().max(1.0) as usize
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

fn separate(d: &mut String) {
    if !d.is_empty() {
        d.push(' ');
    }
}

fn push_coord(d: &mut String, (x, y): (f64, f64)) {
    d.push_str(&format_coordinate(x));
    d.push(',');
    d.push_str(&format_coordinate(y));
}

fn write_parts(d: &mut String, parts: &[Part], closed: bool) {
    let min_len = if closed { 3 } else { 2 };
    for part in parts.iter().filter(|p| p.points.len() >= min_len) {
        separate(d);
        for (i, &xy) in part.points.iter().enumerate() {
            d.push_str(if i == 0 { "M" } else { " L" });
            push_coord(d, xy);
        }
        if closed {
            d.push_str(" Z");
        }
    }
}

/// Round to thousandths and drop trailing zeros; `-0` prints as `0`.
pub fn format_coordinate(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}
