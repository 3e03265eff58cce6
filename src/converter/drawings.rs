use crate::circuit::elements::{
    CutoutShape, PcbCutout, PcbFabricationNotePath, PcbNoteLine, PcbNotePath, PcbSilkscreenCircle, PcbSilkscreenPath,
    PcbSilkscreenPill, PcbTrace, SmtpadShape,
};
use crate::circuit::ids::IdKind;
use crate::circuit::CircuitElement;
use crate::converter::footprint::FootprintConverter;
use crate::converter::geometry::{
    arc_polyline, arc_polyline_with_step, circle_polyline, dedup_points, Point2D, POINT_TOLERANCE, POLYGON_ARC_STEP,
};
use crate::kicad::model::footprint_library::{
    FootprintArc, FootprintCircle, FootprintLine, FootprintPolygon, PolygonPoint, Stroked,
};
use crate::kicad::model::layer::{LayerKind, LayerRef};
use itertools::Itertools;

/// Below this length a silkscreen line is drawn as a dot.
const MIN_SEGMENT_LENGTH: f64 = 1e-6;

/// Center, width and height of the rectangle when `points` are exactly the four corners of an
/// axis-aligned rectangle.
pub fn axis_aligned_rect(points: &[Point2D]) -> Option<(Point2D, f64, f64)> {
    let mut unique: Vec<Point2D> = Vec::with_capacity(4);
    for point in points {
        if !unique.iter().any(|p| p.approx_eq(point)) {
            unique.push(*point);
        }
    }
    if unique.len() != 4 {
        return None;
    }

    let distinct = |values: Vec<f64>| -> Vec<f64> {
        values.into_iter()
            .sorted_by(f64::total_cmp)
            .dedup_by(|a, b| (a - b).abs() < POINT_TOLERANCE)
            .collect()
    };
    let xs = distinct(unique.iter().map(|p| p.x).collect());
    let ys = distinct(unique.iter().map(|p| p.y).collect());
    let ([min_x, max_x], [min_y, max_y]) = (xs.as_slice(), ys.as_slice()) else {
        return None;
    };

    Some((
        Point2D::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0),
        max_x - min_x,
        max_y - min_y,
    ))
}

/// Vertices of a polygon in footprint coordinates, with embedded arcs tessellated and a repeated
/// closing vertex removed.
pub fn polygon_vertices(polygon: &FootprintPolygon) -> Vec<Point2D> {
    let mut points = Vec::new();
    for point in &polygon.points {
        match point {
            PolygonPoint::Xy { x, y } => points.push(Point2D::new(*x, *y)),
            PolygonPoint::Arc { start, mid, end } => {
                points.extend(arc_polyline_with_step(start.into(), mid.into(), end.into(), POLYGON_ARC_STEP));
            }
        }
    }

    let mut points = dedup_points(&points);
    if points.len() > 1 && points[0].approx_eq(&points[points.len() - 1]) {
        points.pop();
    }
    points
}

fn flipped(points: Vec<Point2D>) -> Vec<Point2D> {
    points.into_iter().map(Point2D::flip_y).collect()
}

impl FootprintConverter<'_> {
    pub(crate) fn emit_drawings(&mut self) {
        let footprint = self.footprint;
        for line in &footprint.lines {
            self.emit_line(line);
        }
        for polygon in &footprint.polygons {
            self.emit_polygon(polygon);
        }
        for circle in &footprint.circles {
            self.emit_circle(circle);
        }
        for arc in &footprint.arcs {
            self.emit_arc(arc);
        }
    }

    fn classify_layer(&mut self, element: &'static str, layer: &str) -> Option<LayerKind> {
        let kind = LayerKind::classify(layer);
        if kind.is_none() {
            self.diagnose(element, Some(layer), format!("Unrecognized layer '{layer}'"));
        }
        kind
    }

    fn unsupported_layer(&mut self, element: &'static str, layer: &str) {
        self.diagnose(element, Some(layer), format!("Layer '{layer}' has no representation for {element}"));
    }

    fn emit_line(&mut self, line: &FootprintLine) {
        let Some(kind) = self.classify_layer("fp_line", &line.layer) else {
            return;
        };
        let start = Point2D::from(line.start).flip_y();
        let end = Point2D::from(line.end).flip_y();
        let stroke_width = line.stroke_width();

        match kind {
            // Consumed by the board outline stage
            LayerKind::BoardEdge => {}
            k if k.is_copper() => self.push_trace(k.side(), vec![start, end], stroke_width),
            k if k.is_silkscreen() => self.push_silkscreen_line(k.side(), start, end, stroke_width),
            k if k.is_fabrication() => self.push_fabrication_path(k.side(), vec![start, end], stroke_width),
            k if k.is_courtyard() => self.extend_courtyard(k.side(), [start, end], stroke_width),
            LayerKind::User => {
                let pcb_note_line_id = self.ids.next(IdKind::PcbNoteLine);
                self.push(CircuitElement::PcbNoteLine(PcbNoteLine {
                    pcb_note_line_id,
                    pcb_component_id: self.pcb_component_id.clone(),
                    x1: start.x,
                    y1: start.y,
                    x2: end.x,
                    y2: end.y,
                    stroke_width,
                }));
            }
            _ => self.unsupported_layer("fp_line", &line.layer),
        }
    }

    /// Thick silkscreen strokes become filled pills so their width survives rendering.
    fn push_silkscreen_line(&mut self, layer: LayerRef, start: Point2D, end: Point2D, stroke_width: Option<f64>) {
        let Some(stroke_width) = stroke_width.filter(|w| w.is_finite() && *w > 0.0) else {
            self.push_silkscreen_path(layer, vec![start, end], stroke_width);
            return;
        };

        let center = start.midpoint(&end);
        let length = start.distance(&end);
        if length < MIN_SEGMENT_LENGTH {
            let pcb_silkscreen_circle_id = self.ids.next(IdKind::PcbSilkscreenCircle);
            self.push(CircuitElement::PcbSilkscreenCircle(PcbSilkscreenCircle {
                pcb_silkscreen_circle_id,
                pcb_component_id: self.pcb_component_id.clone(),
                layer,
                center,
                radius: stroke_width / 2.0,
                stroke_width: None,
            }));
            return;
        }

        let rotation = ((end.y - start.y).atan2(end.x - start.x).to_degrees() + 360.0) % 360.0;
        let pcb_silkscreen_pill_id = self.ids.next(IdKind::PcbSilkscreenPill);
        self.push(CircuitElement::PcbSilkscreenPill(PcbSilkscreenPill {
            pcb_silkscreen_pill_id,
            pcb_component_id: self.pcb_component_id.clone(),
            layer,
            center,
            width: length + stroke_width,
            height: stroke_width,
            rotation,
        }));
    }

    fn emit_polygon(&mut self, polygon: &FootprintPolygon) {
        let Some(kind) = self.classify_layer("fp_poly", &polygon.layer) else {
            return;
        };
        let vertices = polygon_vertices(polygon);
        if vertices.len() < 3 {
            self.diagnose("fp_poly", Some(&polygon.layer), format!("Polygon has only {} usable points", vertices.len()));
            return;
        }
        let stroke_width = polygon.stroke_width();

        match kind {
            LayerKind::BoardEdge => self.push_polygon_cutout(vertices),
            k if k.is_copper() => {
                let route = flipped(vertices);
                match axis_aligned_rect(&route) {
                    Some((center, width, height)) => self.push_unnamed_smtpad(k.side(), SmtpadShape::Rect {
                        x: center.x,
                        y: center.y,
                        width,
                        height,
                        rect_border_radius: None,
                    }),
                    None => self.push_trace(k.side(), route, stroke_width),
                }
            }
            k if k.is_silkscreen() => self.push_silkscreen_path(k.side(), flipped(vertices), stroke_width),
            k if k.is_fabrication() => self.push_fabrication_path(k.side(), flipped(vertices), stroke_width),
            k if k.is_courtyard() => self.extend_courtyard(k.side(), flipped(vertices), stroke_width),
            LayerKind::User => self.push_note_path(flipped(vertices), stroke_width),
            _ => self.unsupported_layer("fp_poly", &polygon.layer),
        }
    }

    fn emit_circle(&mut self, circle: &FootprintCircle) {
        let Some(kind) = self.classify_layer("fp_circle", &circle.layer) else {
            return;
        };
        let center = Point2D::from(circle.center).flip_y();
        let radius = circle.radius();
        let stroke_width = circle.stroke_width();

        match kind {
            k if k.is_silkscreen() => {
                let pcb_silkscreen_circle_id = self.ids.next(IdKind::PcbSilkscreenCircle);
                self.push(CircuitElement::PcbSilkscreenCircle(PcbSilkscreenCircle {
                    pcb_silkscreen_circle_id,
                    pcb_component_id: self.pcb_component_id.clone(),
                    layer: k.side(),
                    center,
                    radius,
                    stroke_width,
                }));
            }
            LayerKind::BoardEdge => {
                let pcb_cutout_id = self.ids.next(IdKind::PcbCutout);
                self.push(CircuitElement::PcbCutout(PcbCutout {
                    pcb_cutout_id,
                    pcb_component_id: self.pcb_component_id.clone(),
                    shape: CutoutShape::Circle { center, radius },
                }));
            }
            k if k.is_copper() && circle.is_filled() => {
                self.push_unnamed_smtpad(k.side(), SmtpadShape::Circle { x: center.x, y: center.y, radius });
            }
            k if k.is_copper() => self.push_trace(k.side(), circle_polyline(center, radius), stroke_width),
            k if k.is_fabrication() => self.push_fabrication_path(k.side(), circle_polyline(center, radius), stroke_width),
            k if k.is_courtyard() => {
                let extremes = [
                    Point2D::new(center.x - radius, center.y - radius),
                    Point2D::new(center.x + radius, center.y + radius),
                ];
                self.extend_courtyard(k.side(), extremes, stroke_width);
            }
            LayerKind::User => self.push_note_path(circle_polyline(center, radius), stroke_width),
            _ => self.unsupported_layer("fp_circle", &circle.layer),
        }
    }

    fn emit_arc(&mut self, arc: &FootprintArc) {
        let Some(kind) = self.classify_layer("fp_arc", &arc.layer) else {
            return;
        };
        if kind == LayerKind::BoardEdge {
            return;
        }
        let route = flipped(arc_polyline(arc.start.into(), arc.mid.into(), arc.end.into()));
        let stroke_width = arc.stroke_width();

        match kind {
            k if k.is_silkscreen() => self.push_silkscreen_path(k.side(), route, stroke_width),
            k if k.is_copper() => self.push_trace(k.side(), route, stroke_width),
            k if k.is_fabrication() => self.push_fabrication_path(k.side(), route, stroke_width),
            k if k.is_courtyard() => self.extend_courtyard(k.side(), route, stroke_width),
            LayerKind::User => self.push_note_path(route, stroke_width),
            _ => self.unsupported_layer("fp_arc", &arc.layer),
        }
    }

    fn push_trace(&mut self, layer: LayerRef, route: Vec<Point2D>, thickness: Option<f64>) {
        let pcb_trace_id = self.ids.next(IdKind::PcbTrace);
        self.push(CircuitElement::PcbTrace(PcbTrace {
            pcb_trace_id,
            pcb_component_id: self.pcb_component_id.clone(),
            layer,
            route,
            thickness,
        }));
    }

    fn push_silkscreen_path(&mut self, layer: LayerRef, route: Vec<Point2D>, stroke_width: Option<f64>) {
        let pcb_silkscreen_path_id = self.ids.next(IdKind::PcbSilkscreenPath);
        self.push(CircuitElement::PcbSilkscreenPath(PcbSilkscreenPath {
            pcb_silkscreen_path_id,
            pcb_component_id: self.pcb_component_id.clone(),
            layer,
            route,
            stroke_width,
        }));
    }

    fn push_fabrication_path(&mut self, layer: LayerRef, route: Vec<Point2D>, stroke_width: Option<f64>) {
        let pcb_fabrication_note_path_id = self.ids.next(IdKind::PcbFabricationNotePath);
        self.push(CircuitElement::PcbFabricationNotePath(PcbFabricationNotePath {
            pcb_fabrication_note_path_id,
            pcb_component_id: self.pcb_component_id.clone(),
            layer,
            route,
            stroke_width,
        }));
    }

    fn push_note_path(&mut self, route: Vec<Point2D>, stroke_width: Option<f64>) {
        let pcb_note_path_id = self.ids.next(IdKind::PcbNotePath);
        self.push(CircuitElement::PcbNotePath(PcbNotePath {
            pcb_note_path_id,
            pcb_component_id: self.pcb_component_id.clone(),
            route,
            stroke_width,
        }));
    }
}
