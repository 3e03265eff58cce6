pub mod common;
pub mod footprint_library;
pub mod layer;
pub mod symbol_library;
