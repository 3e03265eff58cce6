use crate::circuit::elements::{
    CutoutShape, PcbComponent, PcbCourtyardRect, PcbCutout, PcbPort, SchematicComponent, SchematicPort, Size,
    SourceComponent, SourcePort,
};
use crate::circuit::ids::{IdAllocator, IdKind};
use crate::circuit::{CircuitElement, CircuitJson, Diagnostic};
use crate::converter::errors::ConverterError;
use crate::converter::geometry::{flip, rotated_size, Bounds, Point2D};
use crate::converter::pads::is_copperless_smd;
use crate::converter::polygon::{find_closed_polygons, polygon_to_points, EdgeSegment};
use crate::converter::schematic::SchematicHints;
use crate::converter::style::ConverterOptions;
use crate::kicad::model::footprint_library::{FootprintDocument, NamedFeature, PadType};
use crate::kicad::model::layer::{LayerKind, LayerRef};
use crate::kicad::model::symbol_library::SymbolDocument;
use indexmap::IndexSet;
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// State for converting one footprint. Every record is appended once, in stage order.
pub struct FootprintConverter<'a> {
    pub(crate) footprint: &'a FootprintDocument,
    pub(crate) options: &'a ConverterOptions,
    pub(crate) ids: IdAllocator,
    pub(crate) output: CircuitJson,
    pub(crate) pcb_component_id: String,
    pub(crate) port_ids: HashMap<String, String>,
    pub(crate) courtyards: BTreeMap<LayerRef, CourtyardBounds>,
}

/// Extent of every courtyard primitive seen on one side, in output coordinates.
#[derive(Debug, Default)]
pub(crate) struct CourtyardBounds {
    pub bounds: Bounds,
    pub stroke_width: Option<f64>,
}

impl<'a> FootprintConverter<'a> {
    pub fn new(footprint: &'a FootprintDocument, options: &'a ConverterOptions) -> FootprintConverter<'a> {
        FootprintConverter {
            footprint,
            options,
            ids: IdAllocator::new(),
            output: CircuitJson::default(),
            pcb_component_id: String::new(),
            port_ids: HashMap::new(),
            courtyards: BTreeMap::new(),
        }
    }

    pub fn convert(mut self, symbol: Option<&SymbolDocument>) -> Result<CircuitJson, ConverterError> {
        debug!(footprint = %self.footprint.footprint_name, "converting footprint");

        let hints = symbol.map(SchematicHints::from_symbol_document).unwrap_or_default();
        let (source_component_id, schematic_component_id) = self.emit_component(hints);
        self.emit_ports(&source_component_id, &schematic_component_id);

        let footprint = self.footprint;
        for pad in &footprint.pads {
            self.emit_pad(pad)?;
        }
        for hole in &footprint.holes {
            self.emit_hole(hole)?;
        }

        self.emit_edge_cutouts();
        self.emit_drawings();
        self.emit_courtyards();
        self.emit_texts();

        Ok(self.output)
    }

    pub(crate) fn push(&mut self, element: CircuitElement) {
        self.output.elements.push(element);
    }

    pub(crate) fn diagnose(&mut self, element: &'static str, layer: Option<&str>, message: impl Into<String>) {
        let message = message.into();
        debug!(element, layer, "{message}");
        self.output.diagnostics.push(Diagnostic {
            element,
            layer: layer.map(str::to_string),
            message,
        });
    }

    pub(crate) fn port_hints(name: Option<&str>) -> Vec<String> {
        name.map(|n| vec![n.to_string()]).unwrap_or_default()
    }

    pub(crate) fn pcb_port_id(&self, name: Option<&str>) -> Option<String> {
        name.and_then(|n| self.port_ids.get(n).cloned())
    }

    fn emit_component(&mut self, hints: SchematicHints) -> (String, String) {
        let source_component_id = self.ids.next(IdKind::SourceComponent);
        let schematic_component_id = self.ids.next(IdKind::SchematicComponent);
        self.pcb_component_id = self.ids.next(IdKind::PcbComponent);

        self.push(CircuitElement::SourceComponent(SourceComponent {
            source_component_id: source_component_id.clone(),
            name: self.footprint.footprint_name.clone(),
            supplier_part_numbers: BTreeMap::new(),
        }));

        self.push(CircuitElement::SchematicComponent(SchematicComponent {
            schematic_component_id: schematic_component_id.clone(),
            source_component_id: source_component_id.clone(),
            center: Point2D::default(),
            rotation: 0.0,
            size: Size::default(),
            port_arrangement: hints.port_arrangement,
            port_labels: hints.port_labels,
            symbol_display_value: hints.symbol_display_value,
        }));

        let bounds = self.pad_bounds();
        self.push(CircuitElement::PcbComponent(PcbComponent {
            pcb_component_id: self.pcb_component_id.clone(),
            source_component_id: source_component_id.clone(),
            layer: LayerRef::Top,
            center: Point2D::default(),
            rotation: 0.0,
            width: bounds.width(),
            height: bounds.height(),
        }));

        (source_component_id, schematic_component_id)
    }

    /// Union of the SMD and through-hole pad outlines, rotation-aware.
    fn pad_bounds(&self) -> Bounds {
        let mut bounds = Bounds::default();
        for pad in &self.footprint.pads {
            if !matches!(pad.pad_type, PadType::Smd | PadType::ThruHole) || is_copperless_smd(pad) {
                continue;
            }
            let (width, height) = rotated_size(pad.size.x, pad.size.y, pad.at.rotation());
            bounds.include_rect(Point2D::new(pad.at.x, pad.at.y).flip_y(), width, height);
        }
        bounds
    }

    fn emit_ports(&mut self, source_component_id: &str, schematic_component_id: &str) {
        let footprint = self.footprint;
        let features: Vec<&dyn NamedFeature> = footprint.pads.iter()
            .filter(|p| !is_copperless_smd(p))
            .map(|p| p as &dyn NamedFeature)
            .chain(footprint.holes.iter().map(|h| h as &dyn NamedFeature))
            .collect();

        let names: IndexSet<&str> = features.iter().filter_map(|f| f.port_name()).collect();

        let mut source_port_ids = Vec::with_capacity(names.len());
        for name in &names {
            let source_port_id = self.ids.next(IdKind::SourcePort);
            self.push(CircuitElement::SourcePort(SourcePort {
                source_port_id: source_port_id.clone(),
                source_component_id: source_component_id.to_string(),
                name: name.to_string(),
                port_hints: vec![name.to_string()],
            }));
            let schematic_port_id = self.ids.next(IdKind::SchematicPort);
            self.push(CircuitElement::SchematicPort(SchematicPort {
                schematic_port_id,
                source_port_id: source_port_id.clone(),
                schematic_component_id: schematic_component_id.to_string(),
                center: Point2D::default(),
            }));
            source_port_ids.push(source_port_id);
        }

        for (name, source_port_id) in names.iter().zip(source_port_ids) {
            // Pads come before holes in `features`, so the first match prefers a pad
            let Some(feature) = features.iter().find(|f| f.port_name() == Some(*name)) else {
                continue;
            };
            let at = feature.position();
            let pcb_port_id = self.ids.next(IdKind::PcbPort);
            self.port_ids.insert(name.to_string(), pcb_port_id.clone());
            self.push(CircuitElement::PcbPort(PcbPort {
                pcb_port_id,
                source_port_id,
                pcb_component_id: self.pcb_component_id.clone(),
                x: at.x,
                y: flip(at.y),
                layers: port_layers(feature.layer_names()),
            }));
        }
    }

    fn emit_edge_cutouts(&mut self) {
        let footprint = self.footprint;
        let is_edge = |layer: &str| LayerKind::classify(layer) == Some(LayerKind::BoardEdge);

        let segments = footprint.lines.iter()
            .filter(|l| is_edge(&l.layer))
            .map(|l| EdgeSegment::Line { start: l.start.into(), end: l.end.into() })
            .chain(footprint.arcs.iter()
                .filter(|a| is_edge(&a.layer))
                .map(|a| EdgeSegment::Arc { start: a.start.into(), mid: a.mid.into(), end: a.end.into() }))
            .collect_vec();

        if segments.is_empty() {
            return;
        }

        let polygons = find_closed_polygons(&segments);
        for polygon in &polygons.loops {
            let points = polygon_to_points(polygon);
            if points.len() < 3 {
                self.diagnose("edge_cut", Some("Edge.Cuts"), "Closed board outline has fewer than 3 vertices");
                continue;
            }
            self.push_polygon_cutout(points);
        }

        for index in polygons.unclosed {
            let segment = segments[index];
            let (start, end) = (segment.start(), segment.end());
            self.diagnose(
                "edge_cut",
                Some("Edge.Cuts"),
                format!("Board outline segment ({}, {}) -> ({}, {}) is not part of a closed loop", start.x, start.y, end.x, end.y),
            );
        }
    }

    /// Emits a polygon cutout from footprint-frame points.
    pub(crate) fn push_polygon_cutout(&mut self, points: Vec<Point2D>) {
        let pcb_cutout_id = self.ids.next(IdKind::PcbCutout);
        self.push(CircuitElement::PcbCutout(PcbCutout {
            pcb_cutout_id,
            pcb_component_id: self.pcb_component_id.clone(),
            shape: CutoutShape::Polygon { points: points.into_iter().map(Point2D::flip_y).collect() },
        }));
    }

    /// Grows the courtyard of `side` by output-frame points.
    pub(crate) fn extend_courtyard(&mut self, side: LayerRef, points: impl IntoIterator<Item = Point2D>, stroke_width: Option<f64>) {
        let courtyard = self.courtyards.entry(side).or_default();
        for point in points {
            courtyard.bounds.include_point(point);
        }
        if courtyard.stroke_width.is_none() {
            courtyard.stroke_width = stroke_width;
        }
    }

    fn emit_courtyards(&mut self) {
        let courtyards = std::mem::take(&mut self.courtyards);
        for (side, courtyard) in courtyards {
            if courtyard.bounds.is_empty() {
                continue;
            }
            let pcb_courtyard_rect_id = self.ids.next(IdKind::PcbCourtyardRect);
            self.push(CircuitElement::PcbCourtyardRect(PcbCourtyardRect {
                pcb_courtyard_rect_id,
                pcb_component_id: self.pcb_component_id.clone(),
                layer: side,
                center: courtyard.bounds.center(),
                width: courtyard.bounds.width(),
                height: courtyard.bounds.height(),
                stroke_width: courtyard.stroke_width,
            }));
        }
    }
}

/// Output sides of a pad's layer list, deduplicated in declaration order.
fn port_layers(layers: Option<&[String]>) -> Vec<LayerRef> {
    match layers {
        None => vec![LayerRef::Top, LayerRef::Bottom],
        Some(layers) => layers.iter()
            .filter_map(|l| LayerKind::classify(l))
            .flat_map(|kind| kind.sides().iter().copied())
            .unique()
            .collect(),
    }
}
