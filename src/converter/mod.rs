use crate::circuit::CircuitJson;
use crate::converter::errors::ConverterError;
use crate::converter::footprint::FootprintConverter;
use crate::converter::style::ConverterOptions;
use crate::kicad::model::footprint_library::FootprintDocument;
use crate::kicad::model::symbol_library::SymbolDocument;

pub mod errors;
pub mod footprint;
pub mod geometry;
pub mod pads;
pub mod polygon;
pub mod schematic;
pub mod style;
mod drawings;
mod text;
#[cfg(test)]
mod tests;

pub use drawings::{axis_aligned_rect, polygon_vertices};
pub use text::silkscreen_font_size_from_texts;

/// Converts a validated footprint, plus an optional symbol for schematic hints, into circuit records.
///
/// The work is synchronous; the signature is async so callers can await it alongside file I/O.
pub async fn convert_kicad_json_to_circuit_json(
    footprint: &FootprintDocument,
    symbol: Option<&SymbolDocument>,
    options: &ConverterOptions,
) -> Result<CircuitJson, ConverterError> {
    FootprintConverter::new(footprint, options).convert(symbol)
}
