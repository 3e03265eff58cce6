use crate::circuit::elements::{AnchorAlignment, PcbFabricationNoteText, PcbSilkscreenText};
use crate::circuit::ids::IdKind;
use crate::circuit::CircuitElement;
use crate::converter::footprint::FootprintConverter;
use crate::converter::geometry::Point2D;
use crate::kicad::model::common::{Position, TextEffect};
use crate::kicad::model::footprint_library::{FootprintText, FootprintTextType};
use crate::kicad::model::layer::{LayerKind, LayerRef};
use regex::Regex;
use std::sync::LazyLock;

pub const TEXT_FONT: &str = "tscircuit2024";
pub const DEFAULT_FONT_SIZE: f64 = 1.27;

const REFERENCE_PLACEHOLDER: &str = "${REFERENCE}";
const PROPERTY_DEFAULT_LAYER: &str = "F.SilkS";

static DESIGNATOR_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[RCU]\d+").ok());

fn looks_like_designator(text: &str) -> bool {
    DESIGNATOR_REGEX.as_ref().is_some_and(|re| re.is_match(text))
}

fn is_reference_text(text: &FootprintText) -> bool {
    text.text.contains(REFERENCE_PLACEHOLDER) || text.text_type == FootprintTextType::Reference
}

/// Font height of the footprint's reference designator: the front silkscreen one if present,
/// else the front fabrication one.
pub fn silkscreen_font_size_from_texts(texts: &[FootprintText]) -> Option<f64> {
    let on_layer = |text: &FootprintText, kind: LayerKind| LayerKind::classify(&text.layer) == Some(kind);

    let silkscreen_reference = texts.iter().find(|t| {
        on_layer(t, LayerKind::FrontSilk) && (is_reference_text(t) || looks_like_designator(&t.text))
    });
    let target = silkscreen_reference
        .or_else(|| texts.iter().find(|t| on_layer(t, LayerKind::FrontFab) && is_reference_text(t)))?;

    target.effects.as_ref().and_then(TextEffect::font_height)
}

/// A text item ready for placement, regardless of where it was declared.
struct TextItem<'t> {
    text: &'t str,
    at: Position,
    layer: &'t str,
    effects: Option<&'t TextEffect>,
}

impl FootprintConverter<'_> {
    pub(crate) fn emit_texts(&mut self) {
        let footprint = self.footprint;
        let fallback_size = silkscreen_font_size_from_texts(&footprint.texts).unwrap_or(DEFAULT_FONT_SIZE);

        for text in &footprint.texts {
            self.emit_text(TextItem {
                text: &text.text,
                at: text.at,
                layer: &text.layer,
                effects: text.effects.as_ref(),
            }, fallback_size);
        }

        for key in ["Reference", "Value"] {
            let Some(property) = footprint.property(key) else {
                continue;
            };
            let hidden = property.hide.unwrap_or(false) || property.effects.as_ref().is_some_and(|e| e.hide);
            let (Some(value), Some(at)) = (property.value.as_deref(), property.at) else {
                continue;
            };
            if hidden || value.is_empty() {
                continue;
            }
            self.emit_text(TextItem {
                text: value,
                at,
                layer: property.layer.as_deref().unwrap_or(PROPERTY_DEFAULT_LAYER),
                effects: property.effects.as_ref(),
            }, fallback_size);
        }
    }

    fn emit_text(&mut self, item: TextItem, fallback_size: f64) {
        let Some(kind) = LayerKind::classify(item.layer) else {
            self.diagnose("fp_text", Some(item.layer), format!("Unrecognized layer '{}'", item.layer));
            return;
        };

        let own_size = item.effects.and_then(TextEffect::font_height);
        let anchor_position = Point2D::new(item.at.x, item.at.y).flip_y();
        let ccw_rotation = item.at.rotation();

        match kind {
            k if k.is_silkscreen() => {
                let font_size = self.options.silkscreen_font_size().or(own_size).unwrap_or(fallback_size);
                self.push_silkscreen_text(k.side(), item.text, font_size, anchor_position, ccw_rotation);
            }
            k if k.is_fabrication() => {
                let pcb_fabrication_note_text_id = self.ids.next(IdKind::PcbFabricationNoteText);
                self.push(CircuitElement::PcbFabricationNoteText(PcbFabricationNoteText {
                    pcb_fabrication_note_text_id,
                    pcb_component_id: self.pcb_component_id.clone(),
                    layer: k.side(),
                    text: item.text.to_string(),
                    font: TEXT_FONT.to_string(),
                    font_size: own_size.unwrap_or(fallback_size),
                    anchor_position,
                    anchor_alignment: AnchorAlignment::Center,
                    ccw_rotation,
                }));
            }
            _ => self.diagnose("fp_text", Some(item.layer), format!("Text on layer '{}' is not drawn", item.layer)),
        }
    }

    fn push_silkscreen_text(&mut self, layer: LayerRef, text: &str, font_size: f64, anchor_position: Point2D, ccw_rotation: f64) {
        let pcb_silkscreen_text_id = self.ids.next(IdKind::PcbSilkscreenText);
        self.push(CircuitElement::PcbSilkscreenText(PcbSilkscreenText {
            pcb_silkscreen_text_id,
            pcb_component_id: self.pcb_component_id.clone(),
            layer,
            text: text.to_string(),
            font: TEXT_FONT.to_string(),
            font_size,
            anchor_position,
            anchor_alignment: AnchorAlignment::Center,
            ccw_rotation,
        }));
    }
}
