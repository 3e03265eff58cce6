use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scalar2D {
    pub x: f64,
    pub y: f64,
}

impl Scalar2D {
    pub fn new(x: f64, y: f64) -> Scalar2D {
        Scalar2D { x, y }
    }
}

/// Placement of an item in footprint coordinates (Y-up), with an optional rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl Position {
    pub fn new(x: f64, y: f64, angle: Option<f64>) -> Position {
        Position { x, y, angle }
    }

    pub fn rotation(&self) -> f64 {
        self.angle.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeDefinition {
    pub width: f64,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub stroke_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextEffect {
    #[serde(default)]
    pub font: Option<Font>,
    #[serde(default)]
    pub hide: bool,
}

impl TextEffect {
    /// Text height, which is what KiCad treats as the font size.
    pub fn font_height(&self) -> Option<f64> {
        self.font.as_ref().map(|f| f.size.y)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Font {
    pub size: Scalar2D,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
}
