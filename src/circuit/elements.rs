use crate::converter::geometry::Point2D;
use crate::kicad::model::layer::LayerRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoStaticStr;

/// One flat output record. The `type` discriminant names the record kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "type", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CircuitElement {
    SourceComponent(SourceComponent),
    SchematicComponent(SchematicComponent),
    PcbComponent(PcbComponent),
    SourcePort(SourcePort),
    SchematicPort(SchematicPort),
    PcbPort(PcbPort),
    PcbSmtpad(PcbSmtpad),
    PcbPlatedHole(PcbPlatedHole),
    PcbHole(PcbHole),
    PcbTrace(PcbTrace),
    PcbSilkscreenPath(PcbSilkscreenPath),
    PcbSilkscreenPill(PcbSilkscreenPill),
    PcbSilkscreenCircle(PcbSilkscreenCircle),
    PcbSilkscreenText(PcbSilkscreenText),
    PcbFabricationNotePath(PcbFabricationNotePath),
    PcbFabricationNoteText(PcbFabricationNoteText),
    PcbNoteLine(PcbNoteLine),
    PcbNotePath(PcbNotePath),
    PcbCutout(PcbCutout),
    PcbCourtyardRect(PcbCourtyardRect),
}

impl CircuitElement {
    pub fn type_name(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceComponent {
    pub source_component_id: String,
    pub name: String,
    pub supplier_part_numbers: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchematicComponent {
    pub schematic_component_id: String,
    pub source_component_id: String,
    pub center: Point2D,
    pub rotation: f64,
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_arrangement: Option<PortArrangement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_display_value: Option<String>,
}

/// How schematic ports are laid out around the symbol box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortArrangement {
    BySides {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        left_side: Option<SideArrangement>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        right_side: Option<SideArrangement>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        top_side: Option<SideArrangement>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bottom_side: Option<SideArrangement>,
    },
    BySize {
        left_size: usize,
        right_size: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideArrangement {
    pub pins: Vec<u32>,
    pub direction: PinDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PinDirection {
    TopToBottom,
    LeftToRight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbComponent {
    pub pcb_component_id: String,
    pub source_component_id: String,
    pub layer: LayerRef,
    pub center: Point2D,
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePort {
    pub source_port_id: String,
    pub source_component_id: String,
    pub name: String,
    pub port_hints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchematicPort {
    pub schematic_port_id: String,
    pub source_port_id: String,
    pub schematic_component_id: String,
    pub center: Point2D,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbPort {
    pub pcb_port_id: String,
    pub source_port_id: String,
    pub pcb_component_id: String,
    pub x: f64,
    pub y: f64,
    pub layers: Vec<LayerRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbSmtpad {
    pub pcb_smtpad_id: String,
    pub pcb_component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pcb_port_id: Option<String>,
    pub port_hints: Vec<String>,
    pub layer: LayerRef,
    #[serde(flatten)]
    pub shape: SmtpadShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SmtpadShape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rect_border_radius: Option<f64>,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbPlatedHole {
    pub pcb_plated_hole_id: String,
    pub pcb_component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pcb_port_id: Option<String>,
    pub port_hints: Vec<String>,
    pub layers: Vec<LayerRef>,
    #[serde(flatten)]
    pub shape: PlatedHoleShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoreShape {
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadOutline {
    Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PlatedHoleShape {
    Circle {
        x: f64,
        y: f64,
        outer_diameter: f64,
        hole_diameter: f64,
    },
    /// `x`/`y` is the pad center; the bore sits at the pad center plus the hole offset.
    CircularHoleWithRectPad {
        x: f64,
        y: f64,
        hole_shape: BoreShape,
        pad_shape: PadOutline,
        hole_diameter: f64,
        rect_pad_width: f64,
        rect_pad_height: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rect_border_radius: Option<f64>,
        hole_offset_x: f64,
        hole_offset_y: f64,
    },
    Pill {
        x: f64,
        y: f64,
        outer_width: f64,
        outer_height: f64,
        hole_width: f64,
        hole_height: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbHole {
    pub pcb_hole_id: String,
    pub pcb_component_id: String,
    #[serde(flatten)]
    pub shape: HoleShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "hole_shape", rename_all = "snake_case")]
pub enum HoleShape {
    Circle { x: f64, y: f64, hole_diameter: f64 },
    Pill { x: f64, y: f64, hole_width: f64, hole_height: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbTrace {
    pub pcb_trace_id: String,
    pub pcb_component_id: String,
    pub layer: LayerRef,
    pub route: Vec<Point2D>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbSilkscreenPath {
    pub pcb_silkscreen_path_id: String,
    pub pcb_component_id: String,
    pub layer: LayerRef,
    pub route: Vec<Point2D>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbSilkscreenPill {
    pub pcb_silkscreen_pill_id: String,
    pub pcb_component_id: String,
    pub layer: LayerRef,
    pub center: Point2D,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbSilkscreenCircle {
    pub pcb_silkscreen_circle_id: String,
    pub pcb_component_id: String,
    pub layer: LayerRef,
    pub center: Point2D,
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorAlignment {
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbSilkscreenText {
    pub pcb_silkscreen_text_id: String,
    pub pcb_component_id: String,
    pub layer: LayerRef,
    pub text: String,
    pub font: String,
    pub font_size: f64,
    pub anchor_position: Point2D,
    pub anchor_alignment: AnchorAlignment,
    pub ccw_rotation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbFabricationNotePath {
    pub pcb_fabrication_note_path_id: String,
    pub pcb_component_id: String,
    pub layer: LayerRef,
    pub route: Vec<Point2D>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbFabricationNoteText {
    pub pcb_fabrication_note_text_id: String,
    pub pcb_component_id: String,
    pub layer: LayerRef,
    pub text: String,
    pub font: String,
    pub font_size: f64,
    pub anchor_position: Point2D,
    pub anchor_alignment: AnchorAlignment,
    pub ccw_rotation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbNoteLine {
    pub pcb_note_line_id: String,
    pub pcb_component_id: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbNotePath {
    pub pcb_note_path_id: String,
    pub pcb_component_id: String,
    pub route: Vec<Point2D>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbCutout {
    pub pcb_cutout_id: String,
    pub pcb_component_id: String,
    #[serde(flatten)]
    pub shape: CutoutShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum CutoutShape {
    Polygon { points: Vec<Point2D> },
    Circle { center: Point2D, radius: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbCourtyardRect {
    pub pcb_courtyard_rect_id: String,
    pub pcb_component_id: String,
    pub layer: LayerRef,
    pub center: Point2D,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}
