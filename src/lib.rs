pub mod circuit;
pub mod converter;
pub mod kicad;

pub use circuit::{CircuitElement, CircuitJson, Diagnostic};
pub use converter::convert_kicad_json_to_circuit_json;
pub use converter::errors::ConverterError;
pub use converter::style::{ConverterOptions, ResolvedPcbStyle};
