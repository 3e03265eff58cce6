use crate::circuit::elements::{
    BoreShape, HoleShape, PadOutline, PcbHole, PcbPlatedHole, PcbSmtpad, PlatedHoleShape, SmtpadShape,
};
use crate::circuit::ids::IdKind;
use crate::circuit::CircuitElement;
use crate::converter::errors::{ConverterError, FeatureKind};
use crate::converter::footprint::FootprintConverter;
use crate::converter::geometry::{flip, rotated_size, Point2D};
use crate::kicad::model::footprint_library::{DrillDefinition, FootprintHole, FootprintPad, NamedFeature, PadShape, PadType};
use crate::kicad::model::layer::{LayerKind, LayerRef};

/// What a pad turns into on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadKind {
    SmdPad,
    ThruHoleCircle,
    ThruHoleRect,
    ThruHoleOval,
    NpThruHole,
}

impl PadKind {
    /// `connect` pads are mask-only apertures and have no physical counterpart.
    pub fn classify(pad_type: PadType, pad_shape: PadShape) -> Option<PadKind> {
        match (pad_type, pad_shape) {
            (PadType::Smd, _) => Some(PadKind::SmdPad),
            (PadType::ThruHole, PadShape::Circle) => Some(PadKind::ThruHoleCircle),
            (PadType::ThruHole, PadShape::Oval) => Some(PadKind::ThruHoleOval),
            (PadType::ThruHole, PadShape::Rect | PadShape::RoundRect | PadShape::Trapezoid | PadShape::Custom) => {
                Some(PadKind::ThruHoleRect)
            }
            (PadType::NpThruHole, _) => Some(PadKind::NpThruHole),
            (PadType::Connect, _) => None,
        }
    }
}

/// What a standalone hole turns into on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleKind {
    PlatedCircle,
    PlatedRect,
    PlatedOval,
    Mechanical,
}

impl HoleKind {
    pub fn classify(hole: &FootprintHole) -> HoleKind {
        let on_copper = hole.layers.iter().flatten()
            .filter_map(|l| LayerKind::classify(l))
            .any(LayerKind::is_copper);
        if !on_copper {
            return HoleKind::Mechanical;
        }
        match hole.pad_shape {
            PadShape::Circle => HoleKind::PlatedCircle,
            PadShape::Oval => HoleKind::PlatedOval,
            PadShape::Rect | PadShape::RoundRect | PadShape::Trapezoid | PadShape::Custom => HoleKind::PlatedRect,
        }
    }
}

/// Surface pads that list layers but none of them copper, such as paste or mask apertures
/// drawn as separate pads. Without a layer list a pad defaults to front copper.
pub(crate) fn is_copperless_smd(pad: &FootprintPad) -> bool {
    pad.pad_type == PadType::Smd
        && pad.layers.as_ref().is_some_and(|layers| {
            !layers.iter().filter_map(|l| LayerKind::classify(l)).any(LayerKind::is_copper)
        })
}

/// Corner radius for a rounded rectangle, `None` for sharp corners.
fn border_radius(shape: PadShape, width: f64, height: f64, ratio: Option<f64>) -> Option<f64> {
    match (shape, ratio) {
        (PadShape::RoundRect, Some(ratio)) if ratio > 0.0 => Some(width.min(height) / 2.0 * ratio),
        _ => None,
    }
}

fn drill_width(drill: Option<&DrillDefinition>, element: FeatureKind, name: Option<&str>) -> Result<f64, ConverterError> {
    drill.and_then(|d| d.width).ok_or_else(|| ConverterError::MissingDrill {
        element,
        name: name.unwrap_or_default().to_string(),
    })
}

/// Drill offset rotated into the footprint frame by the feature's rotation.
fn rotated_offset(drill: Option<&DrillDefinition>, rotation: f64) -> Point2D {
    drill.and_then(|d| d.offset)
        .map(|offset| Point2D::from(offset).rotated(rotation))
        .unwrap_or_default()
}

impl FootprintConverter<'_> {
    pub(crate) fn emit_pad(&mut self, pad: &FootprintPad) -> Result<(), ConverterError> {
        if is_copperless_smd(pad) {
            let layer = pad.layers.as_ref().and_then(|l| l.first()).map(String::as_str);
            self.diagnose("pad", layer, format!("Pad '{}' has no copper layer", pad.name.as_deref().unwrap_or_default()));
            return Ok(());
        }

        let Some(kind) = PadKind::classify(pad.pad_type, pad.pad_shape) else {
            let layer = pad.layers.as_ref().and_then(|l| l.first()).map(String::as_str);
            self.diagnose("pad", layer, format!("Pad '{}' of type {} has no board representation", pad.name.as_deref().unwrap_or_default(), pad.pad_type));
            return Ok(());
        };

        let name = pad.port_name();
        let rotation = pad.at.rotation();
        let center = Point2D::new(pad.at.x, pad.at.y).flip_y();

        match kind {
            PadKind::SmdPad => {
                let layer = pad.layers.as_ref()
                    .and_then(|l| l.first())
                    .and_then(|l| LayerKind::classify(l))
                    .map(LayerKind::side)
                    .unwrap_or(LayerRef::Top);
                let (width, height) = rotated_size(pad.size.x, pad.size.y, rotation);
                let rect_border_radius = border_radius(pad.pad_shape, width, height, pad.round_rect_ratio);
                self.push_smtpad(name, layer, SmtpadShape::Rect { x: center.x, y: center.y, width, height, rect_border_radius });
            }
            PadKind::ThruHoleRect => {
                let hole_diameter = drill_width(pad.drill.as_ref(), FeatureKind::Pad, name)?;
                let (width, height) = rotated_size(pad.size.x, pad.size.y, rotation);
                let offset = rotated_offset(pad.drill.as_ref(), rotation);
                self.push_plated_hole(name, PlatedHoleShape::CircularHoleWithRectPad {
                    x: center.x,
                    y: center.y,
                    hole_shape: BoreShape::Circle,
                    pad_shape: PadOutline::Rect,
                    hole_diameter,
                    rect_pad_width: width,
                    rect_pad_height: height,
                    rect_border_radius: border_radius(pad.pad_shape, width, height, pad.round_rect_ratio),
                    hole_offset_x: offset.x,
                    hole_offset_y: flip(offset.y),
                });
            }
            PadKind::ThruHoleCircle => {
                let hole_diameter = drill_width(pad.drill.as_ref(), FeatureKind::Pad, name)?;
                self.push_plated_hole(name, PlatedHoleShape::Circle {
                    x: center.x,
                    y: center.y,
                    outer_diameter: pad.size.x,
                    hole_diameter,
                });
            }
            PadKind::ThruHoleOval => {
                let hole_width = drill_width(pad.drill.as_ref(), FeatureKind::Pad, name)?;
                let hole_height = pad.drill.as_ref().and_then(DrillDefinition::slot_height).unwrap_or(hole_width);
                // Pill bores carry their own width and height, so no rotation swap here
                self.push_plated_hole(name, PlatedHoleShape::Pill {
                    x: center.x,
                    y: center.y,
                    outer_width: pad.size.x,
                    outer_height: pad.size.y,
                    hole_width,
                    hole_height,
                });
            }
            PadKind::NpThruHole => {
                let drill = pad.drill.as_ref();
                let hole_width = drill_width(drill, FeatureKind::Pad, name)?;
                let shape = match drill {
                    Some(drill) if drill.oval => {
                        let (hole_width, hole_height) = rotated_size(hole_width, drill.slot_height().unwrap_or(hole_width), rotation);
                        HoleShape::Pill { x: center.x, y: center.y, hole_width, hole_height }
                    }
                    _ => HoleShape::Circle { x: center.x, y: center.y, hole_diameter: hole_width },
                };
                self.push_hole(shape);
            }
        }
        Ok(())
    }

    pub(crate) fn emit_hole(&mut self, hole: &FootprintHole) -> Result<(), ConverterError> {
        let name = hole.port_name();
        let rotation = hole.at.rotation();
        let drill = hole.drill.as_ref();

        let offset = rotated_offset(drill, rotation);
        let pad_center = Point2D::new(hole.at.x, hole.at.y).flip_y();
        let bore = Point2D::new(hole.at.x + offset.x, hole.at.y + offset.y).flip_y();

        let drill_diameter = drill.and_then(|d| d.width);
        let outer_diameter = hole.size.map(|s| s.x).or(drill_diameter);
        let outer_size = |axis_x: bool| -> Option<f64> {
            hole.size.map(|s| if axis_x { s.x } else { s.y }).or(outer_diameter)
        };

        match HoleKind::classify(hole) {
            HoleKind::Mechanical => {
                let hole_diameter = outer_diameter.ok_or_else(|| ConverterError::MissingHoleDiameter {
                    name: name.unwrap_or_default().to_string(),
                })?;
                self.push_hole(HoleShape::Circle { x: bore.x, y: bore.y, hole_diameter });
            }
            HoleKind::PlatedCircle => {
                let hole_diameter = drill_width(drill, FeatureKind::Hole, name)?;
                self.push_plated_hole(name, PlatedHoleShape::Circle {
                    x: bore.x,
                    y: bore.y,
                    outer_diameter: outer_diameter.unwrap_or(hole_diameter),
                    hole_diameter,
                });
            }
            HoleKind::PlatedRect => {
                let hole_diameter = drill_width(drill, FeatureKind::Hole, name)?;
                let (width, height) = rotated_size(
                    outer_size(true).unwrap_or(hole_diameter),
                    outer_size(false).unwrap_or(hole_diameter),
                    rotation,
                );
                self.push_plated_hole(name, PlatedHoleShape::CircularHoleWithRectPad {
                    x: pad_center.x,
                    y: pad_center.y,
                    hole_shape: BoreShape::Circle,
                    pad_shape: PadOutline::Rect,
                    hole_diameter,
                    rect_pad_width: width,
                    rect_pad_height: height,
                    rect_border_radius: border_radius(hole.pad_shape, width, height, hole.round_rect_ratio),
                    hole_offset_x: offset.x,
                    hole_offset_y: flip(offset.y),
                });
            }
            HoleKind::PlatedOval => {
                let hole_diameter = drill_width(drill, FeatureKind::Hole, name)?;
                let (outer_width, outer_height) = rotated_size(
                    outer_size(true).unwrap_or(hole_diameter),
                    outer_size(false).unwrap_or(hole_diameter),
                    rotation,
                );
                let (hole_width, hole_height) = rotated_size(
                    hole_diameter,
                    drill.and_then(DrillDefinition::slot_height).unwrap_or(hole_diameter),
                    rotation,
                );
                self.push_plated_hole(name, PlatedHoleShape::Pill {
                    x: bore.x,
                    y: bore.y,
                    outer_width,
                    outer_height,
                    hole_width,
                    hole_height,
                });
            }
        }
        Ok(())
    }

    fn push_smtpad(&mut self, name: Option<&str>, layer: LayerRef, shape: SmtpadShape) {
        let pcb_smtpad_id = self.ids.next(IdKind::PcbSmtpad);
        let element = PcbSmtpad {
            pcb_smtpad_id,
            pcb_component_id: self.pcb_component_id.clone(),
            pcb_port_id: self.pcb_port_id(name),
            port_hints: Self::port_hints(name),
            layer,
            shape,
        };
        self.push(CircuitElement::PcbSmtpad(element));
    }

    /// Smtpad drawn from copper artwork rather than a pad; it has no port.
    pub(crate) fn push_unnamed_smtpad(&mut self, layer: LayerRef, shape: SmtpadShape) {
        self.push_smtpad(None, layer, shape);
    }

    fn push_plated_hole(&mut self, name: Option<&str>, shape: PlatedHoleShape) {
        let pcb_plated_hole_id = self.ids.next(IdKind::PcbPlatedHole);
        let element = PcbPlatedHole {
            pcb_plated_hole_id,
            pcb_component_id: self.pcb_component_id.clone(),
            pcb_port_id: self.pcb_port_id(name),
            port_hints: Self::port_hints(name),
            layers: vec![LayerRef::Top, LayerRef::Bottom],
            shape,
        };
        self.push(CircuitElement::PcbPlatedHole(element));
    }

    fn push_hole(&mut self, shape: HoleShape) {
        let pcb_hole_id = self.ids.next(IdKind::PcbHole);
        self.push(CircuitElement::PcbHole(PcbHole {
            pcb_hole_id,
            pcb_component_id: self.pcb_component_id.clone(),
            shape,
        }));
    }
}
