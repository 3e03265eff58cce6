use crate::circuit::elements::{PinDirection, PortArrangement, SideArrangement};
use crate::converter::geometry::normalize_degrees;
use crate::kicad::model::symbol_library::{Symbol, SymbolDocument, SymbolPin};
use std::collections::BTreeMap;
use tracing::debug;

/// Layout hints lifted from a symbol onto the schematic component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchematicHints {
    pub port_arrangement: Option<PortArrangement>,
    pub port_labels: Option<BTreeMap<String, String>>,
    pub symbol_display_value: Option<String>,
}

#[derive(Debug, Default)]
struct PinsBySide<'a> {
    left: Vec<&'a SymbolPin>,
    right: Vec<&'a SymbolPin>,
    top: Vec<&'a SymbolPin>,
    bottom: Vec<&'a SymbolPin>,
}

impl<'a> PinsBySide<'a> {
    /// A pin's angle is the direction it points, so it sits on the opposite side of the body.
    fn categorize(pins: &[&'a SymbolPin]) -> PinsBySide<'a> {
        let mut sides = PinsBySide::default();
        for pin in pins {
            let side = match normalize_degrees(pin.at.rotation()) {
                r if r == 0.0 => &mut sides.left,
                r if r == 90.0 => &mut sides.bottom,
                r if r == 180.0 => &mut sides.right,
                r if r == 270.0 => &mut sides.top,
                _ if pin.at.x < 0.0 => &mut sides.left,
                _ if pin.at.x > 0.0 => &mut sides.right,
                _ if pin.at.y > 0.0 => &mut sides.top,
                _ => &mut sides.bottom,
            };
            side.push(*pin);
        }
        sides
    }

    fn populated_sides(&self) -> usize {
        [&self.left, &self.right, &self.top, &self.bottom].iter().filter(|s| !s.is_empty()).count()
    }
}

fn side_arrangement(pins: &[&SymbolPin], direction: PinDirection) -> Option<SideArrangement> {
    if pins.is_empty() {
        return None;
    }
    let pins = pins.iter()
        .filter_map(|p| leading_pin_number(&p.number))
        .filter(|n| *n > 0)
        .collect();
    Some(SideArrangement { pins, direction })
}

/// Numeric prefix of a pin number, so `12A` reads as 12. Numbers without leading digits give `None`.
fn leading_pin_number(number: &str) -> Option<u32> {
    let number = number.trim_start();
    let end = number.find(|c: char| !c.is_ascii_digit()).unwrap_or(number.len());
    number[..end].parse().ok()
}

/// Picks the symbol that represents the whole part: one without a unit suffix, else the `_0_0`
/// unit, else the first.
pub fn find_main_symbol(symbols: &[Symbol]) -> Option<&Symbol> {
    symbols.iter().find(|s| !s.name.contains('_'))
        .or_else(|| symbols.iter().find(|s| s.name.ends_with("_0_0")))
        .or_else(|| symbols.first())
}

/// Pin number to pin name. KiCad writes `~` for a pin with no name, so those get no label.
pub fn port_labels(pins: &[&SymbolPin]) -> BTreeMap<String, String> {
    pins.iter()
        .filter(|p| !p.number.is_empty() && !p.name.is_empty() && p.name != "~")
        .map(|p| (p.number.clone(), p.name.clone()))
        .collect()
}

pub fn port_arrangement(pins: &[&SymbolPin]) -> PortArrangement {
    let sides = PinsBySide::categorize(pins);
    if sides.populated_sides() > 1 {
        return PortArrangement::BySides {
            left_side: side_arrangement(&sides.left, PinDirection::TopToBottom),
            right_side: side_arrangement(&sides.right, PinDirection::TopToBottom),
            top_side: side_arrangement(&sides.top, PinDirection::LeftToRight),
            bottom_side: side_arrangement(&sides.bottom, PinDirection::LeftToRight),
        };
    }

    let left_size = pins.len().div_ceil(2);
    PortArrangement::BySize { left_size, right_size: pins.len() - left_size }
}

impl SchematicHints {
    pub fn from_symbol_document(document: &SymbolDocument) -> SchematicHints {
        let Some(symbol) = find_main_symbol(&document.symbols) else {
            debug!("symbol document has no symbols");
            return SchematicHints::default();
        };

        let pins = symbol.all_pins();
        if pins.is_empty() {
            debug!(symbol = %symbol.name, "symbol has no pins");
            return SchematicHints::default();
        }

        SchematicHints {
            port_arrangement: Some(port_arrangement(&pins)),
            port_labels: Some(port_labels(&pins)),
            symbol_display_value: symbol.property("Value").map(str::to_string),
        }
    }
}
