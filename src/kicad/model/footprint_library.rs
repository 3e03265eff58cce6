use crate::kicad::model::common::{Position, Scalar2D, StrokeDefinition, TextEffect};
use serde::{Deserialize, Serialize};
use strum::Display;

/// A validated KiCad footprint, as handed over by the upstream parser/validator.
///
/// Coordinates are in millimetres with KiCad's Y-up convention.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FootprintDocument {
    pub footprint_name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub generator: Option<String>,
    pub layer: String,
    #[serde(default, rename = "descr")]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub properties: Vec<FootprintProperty>,
    #[serde(default)]
    pub pads: Vec<FootprintPad>,
    #[serde(default)]
    pub holes: Vec<FootprintHole>,

    #[serde(default, rename = "fp_lines")]
    pub lines: Vec<FootprintLine>,
    #[serde(default, rename = "fp_arcs")]
    pub arcs: Vec<FootprintArc>,
    #[serde(default, rename = "fp_circles")]
    pub circles: Vec<FootprintCircle>,
    #[serde(default, rename = "fp_polys")]
    pub polygons: Vec<FootprintPolygon>,
    #[serde(default, rename = "fp_texts")]
    pub texts: Vec<FootprintText>,
}

impl FootprintDocument {
    pub fn property(&self, key: &str) -> Option<&FootprintProperty> {
        self.properties.iter().find(|p| p.key == key)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FootprintProperty {
    pub key: String,
    #[serde(default, rename = "val")]
    pub value: Option<String>,
    #[serde(default)]
    pub at: Option<Position>,
    #[serde(default)]
    pub layer: Option<String>,
    #[serde(default)]
    pub hide: Option<bool>,
    #[serde(default)]
    pub effects: Option<TextEffect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FootprintTextType {
    Reference,
    Value,
    #[default]
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintText {
    #[serde(default, rename = "fp_text_type")]
    pub text_type: FootprintTextType,
    pub text: String,
    pub at: Position,
    pub layer: String,
    #[serde(default)]
    pub hide: bool,
    #[serde(default)]
    pub effects: Option<TextEffect>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintLine {
    pub start: Scalar2D,
    pub end: Scalar2D,
    pub layer: String,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub stroke: Option<StrokeDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintArc {
    pub start: Scalar2D,
    pub mid: Scalar2D,
    pub end: Scalar2D,
    pub layer: String,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub stroke: Option<StrokeDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintCircle {
    pub center: Scalar2D,
    pub end: Scalar2D,
    pub layer: String,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub stroke: Option<StrokeDefinition>,
    #[serde(default)]
    pub fill: Option<String>,
}

impl FootprintCircle {
    pub fn radius(&self) -> f64 {
        (self.end.x - self.center.x).hypot(self.end.y - self.center.y)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self.fill.as_deref(), Some("solid" | "yes"))
    }
}

/// A polygon vertex: either a plain point or an embedded three-point arc.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PolygonPoint {
    Xy { x: f64, y: f64 },
    Arc { start: Scalar2D, mid: Scalar2D, end: Scalar2D },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintPolygon {
    #[serde(rename = "pts")]
    pub points: Vec<PolygonPoint>,
    pub layer: String,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub stroke: Option<StrokeDefinition>,
    #[serde(default)]
    pub fill: Option<String>,
}

/// Primitives whose stroke is given either as a `stroke` block or, in older files, a bare `width`.
pub trait Stroked {
    fn stroke_definition(&self) -> Option<&StrokeDefinition>;
    fn legacy_width(&self) -> Option<f64>;

    fn stroke_width(&self) -> Option<f64> {
        self.stroke_definition().map(|s| s.width).or(self.legacy_width())
    }
}

macro_rules! impl_stroked {
    ($($ty:ty),*) => {
        $(impl Stroked for $ty {
            fn stroke_definition(&self) -> Option<&StrokeDefinition> {
                self.stroke.as_ref()
            }

            fn legacy_width(&self) -> Option<f64> {
                self.width
            }
        })*
    };
}

impl_stroked!(FootprintLine, FootprintArc, FootprintCircle, FootprintPolygon);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PadType {
    ThruHole,
    Smd,
    Connect,
    NpThruHole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PadShape {
    Circle,
    Rect,
    Oval,
    Trapezoid,
    RoundRect,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DrillDefinition {
    #[serde(default)]
    pub oval: bool,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub offset: Option<Scalar2D>,
}

impl DrillDefinition {
    /// Second drill dimension; round drills carry a single value.
    pub fn slot_height(&self) -> Option<f64> {
        self.height.or(self.width)
    }
}

// https://dev-docs.kicad.org/en/file-formats/sexpr-intro/index.html#_footprint_pad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintPad {
    #[serde(default)]
    pub name: Option<String>,
    pub pad_type: PadType,
    pub pad_shape: PadShape,
    pub at: Position,
    pub size: Scalar2D,
    #[serde(default)]
    pub drill: Option<DrillDefinition>,
    #[serde(default)]
    pub layers: Option<Vec<String>>,
    #[serde(default, rename = "roundrect_rratio")]
    pub round_rect_ratio: Option<f64>,
}

/// A drilled feature declared outside the pad list. The size is optional; when absent the drill
/// diameter stands in for the outer diameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintHole {
    #[serde(default)]
    pub name: Option<String>,
    pub pad_type: PadType,
    pub pad_shape: PadShape,
    pub at: Position,
    #[serde(default)]
    pub size: Option<Scalar2D>,
    #[serde(default)]
    pub drill: Option<DrillDefinition>,
    #[serde(default)]
    pub layers: Option<Vec<String>>,
    #[serde(default, rename = "roundrect_rratio")]
    pub round_rect_ratio: Option<f64>,
}

/// Pads and holes expose the same electrical identity.
pub trait NamedFeature {
    fn raw_name(&self) -> Option<&str>;
    fn position(&self) -> Position;
    fn layer_names(&self) -> Option<&[String]>;

    /// The electrical name, with empty strings treated as absent.
    fn port_name(&self) -> Option<&str> {
        self.raw_name().filter(|n| !n.is_empty())
    }
}

impl NamedFeature for FootprintPad {
    fn raw_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn position(&self) -> Position {
        self.at
    }

    fn layer_names(&self) -> Option<&[String]> {
        self.layers.as_deref()
    }
}

impl NamedFeature for FootprintHole {
    fn raw_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn position(&self) -> Position {
        self.at
    }

    fn layer_names(&self) -> Option<&[String]> {
        self.layers.as_deref()
    }
}
