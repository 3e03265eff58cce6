use crate::kicad::model::common::Scalar2D;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Two points closer than this on both axes are considered the same point.
pub const POINT_TOLERANCE: f64 = 1e-4;

/// Point spacing used when polygons embed arc segments.
pub const POLYGON_ARC_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    /// Converts from the footprint's Y-up frame to the output's Y-down frame.
    pub fn flip_y(self) -> Point2D {
        Point2D::new(self.x, flip(self.y))
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn approx_eq(&self, other: &Point2D) -> bool {
        (self.x - other.x).abs() < POINT_TOLERANCE && (self.y - other.y).abs() < POINT_TOLERANCE
    }

    /// Rotates around the origin by `degrees`, counter-clockwise in the footprint frame.
    pub fn rotated(self, degrees: f64) -> Point2D {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point2D::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl From<Scalar2D> for Point2D {
    fn from(value: Scalar2D) -> Self {
        Point2D::new(value.x, value.y)
    }
}

impl From<&Scalar2D> for Point2D {
    fn from(value: &Scalar2D) -> Self {
        Point2D::new(value.x, value.y)
    }
}

/// Negates a Y coordinate. Subtracting from zero keeps an input of 0 at +0 rather than -0,
/// which would serialize as `-0.0`.
pub fn flip(y: f64) -> f64 {
    0.0 - y
}

/// Normalizes an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Whether a rotation puts a rectangle's long side on the other axis.
pub fn is_quarter_turn(degrees: f64) -> bool {
    let normalized = normalize_degrees(degrees);
    (normalized - 90.0).abs() < 1e-9 || (normalized - 270.0).abs() < 1e-9
}

/// Width and height after applying a rotation, for shapes drawn without a rotation field.
pub fn rotated_size(width: f64, height: f64, degrees: f64) -> (f64, f64) {
    if is_quarter_turn(degrees) { (height, width) } else { (width, height) }
}

fn normalize_radians(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Counter-clockwise angular distance from `start` to `target`, in `[0, 2π)`.
fn directed_angle_ccw(start: f64, target: f64) -> f64 {
    let delta = normalize_radians(target) - normalize_radians(start);
    if delta < 0.0 { delta + TAU } else { delta }
}

/// A three-point arc resolved into its circle and signed sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedArc {
    pub center: Point2D,
    pub radius: f64,
    pub start_angle: f64,
    /// Positive for counter-clockwise travel, negative for clockwise.
    pub sweep: f64,
}

impl ResolvedArc {
    /// Resolves `start -> mid -> end`. Returns `None` for collinear or coincident points.
    pub fn from_points(start: Point2D, mid: Point2D, end: Point2D) -> Option<ResolvedArc> {
        let center = arc_center(start, mid, end)?;
        let radius = center.distance(&start);

        let angle_of = |p: Point2D| (p.y - center.y).atan2(p.x - center.x);
        let start_angle = angle_of(start);
        let ccw_to_mid = directed_angle_ccw(start_angle, angle_of(mid));
        let ccw_to_end = directed_angle_ccw(start_angle, angle_of(end));

        // Mid lies past end when walking counter-clockwise, so the arc runs the other way round
        let sweep = if ccw_to_mid > ccw_to_end { ccw_to_end - TAU } else { ccw_to_end };

        Some(ResolvedArc { center, radius, start_angle, sweep })
    }

    pub fn length(&self) -> f64 {
        (self.radius * self.sweep).abs()
    }

    /// Returns `segments + 1` evenly spaced points, both endpoints included.
    pub fn tessellate(&self, segments: usize) -> Vec<Point2D> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| {
                let angle = self.start_angle + (i as f64 / segments as f64) * self.sweep;
                Point2D::new(
                    self.center.x + self.radius * angle.cos(),
                    self.center.y + self.radius * angle.sin(),
                )
            })
            .collect()
    }
}

/// Circle center through three points, from the intersection of the perpendicular bisectors of
/// chords `start-mid` and `mid-end`.
pub fn arc_center(start: Point2D, mid: Point2D, end: Point2D) -> Option<Point2D> {
    // Bisector of a chord p-q: (q - p) . c = (|q|² - |p|²) / 2
    let (a1, b1) = (mid.x - start.x, mid.y - start.y);
    let (a2, b2) = (end.x - mid.x, end.y - mid.y);
    let c1 = (mid.x * mid.x + mid.y * mid.y - start.x * start.x - start.y * start.y) / 2.0;
    let c2 = (end.x * end.x + end.y * end.y - mid.x * mid.x - mid.y * mid.y) / 2.0;

    let determinant = a1 * b2 - a2 * b1;
    if determinant.abs() < 1e-12 || !determinant.is_finite() {
        return None;
    }

    Some(Point2D::new((c1 * b2 - c2 * b1) / determinant, (a1 * c2 - a2 * c1) / determinant))
}

pub fn arc_length(start: Point2D, mid: Point2D, end: Point2D) -> Option<f64> {
    ResolvedArc::from_points(start, mid, end).map(|arc| arc.length())
}

pub fn tessellate_arc(start: Point2D, mid: Point2D, end: Point2D, segments: usize) -> Option<Vec<Point2D>> {
    ResolvedArc::from_points(start, mid, end).map(|arc| arc.tessellate(segments))
}

/// Polyline for a freestanding arc: one segment per unit of length, at least three.
/// Degenerate arcs collapse to their distinct defining points.
pub fn arc_polyline(start: Point2D, mid: Point2D, end: Point2D) -> Vec<Point2D> {
    arc_polyline_with_step(start, mid, end, 1.0)
}

pub fn arc_polyline_with_step(start: Point2D, mid: Point2D, end: Point2D, step: f64) -> Vec<Point2D> {
    match ResolvedArc::from_points(start, mid, end) {
        Some(arc) => arc.tessellate(segment_count(arc.length(), step, 3)),
        None => dedup_points(&[start, mid, end]),
    }
}

/// Closed polyline around a full circle; the first point is repeated at the end.
pub fn circle_polyline(center: Point2D, radius: f64) -> Vec<Point2D> {
    let segments = segment_count(TAU * radius, POLYGON_ARC_STEP, 16).min(360);
    (0..=segments)
        .map(|i| {
            let angle = (i % segments) as f64 / segments as f64 * 2.0 * PI;
            Point2D::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

fn segment_count(length: f64, step: f64, minimum: usize) -> usize {
    let count = (length / step).ceil();
    if count.is_finite() && count > minimum as f64 { count as usize } else { minimum }
}

/// Removes consecutive duplicates (within tolerance).
pub fn dedup_points(points: &[Point2D]) -> Vec<Point2D> {
    let mut result: Vec<Point2D> = Vec::with_capacity(points.len());
    for point in points {
        if result.last().is_none_or(|last| !last.approx_eq(point)) {
            result.push(*point);
        }
    }
    result
}

/// Axis-aligned bounds accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }
}

impl Bounds {
    pub fn include_point(&mut self, point: Point2D) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    pub fn include_rect(&mut self, center: Point2D, width: f64, height: f64) {
        self.include_point(Point2D::new(center.x - width / 2.0, center.y - height / 2.0));
        self.include_point(Point2D::new(center.x + width / 2.0, center.y + height / 2.0));
    }

    pub fn is_empty(&self) -> bool {
        !(self.min_x.is_finite() && self.max_x.is_finite() && self.min_y.is_finite() && self.max_y.is_finite())
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max_x - self.min_x }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max_y - self.min_y }
    }

    pub fn center(&self) -> Point2D {
        if self.is_empty() {
            Point2D::default()
        } else {
            Point2D::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
        }
    }
}
