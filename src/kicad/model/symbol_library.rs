use crate::kicad::model::common::Position;
use serde::{Deserialize, Serialize};

/// A validated `.kicad_sym` library. Only the parts that drive schematic layout hints are modelled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolDocument {
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub pins: Vec<SymbolPin>,
    #[serde(default)]
    pub units: Vec<Symbol>,
}

impl Symbol {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.iter().find(|p| p.key == key).map(|p| p.value.as_str())
    }

    /// Pins of this symbol followed by the pins of every nested unit, depth first.
    pub fn all_pins(&self) -> Vec<&SymbolPin> {
        let mut pins: Vec<&SymbolPin> = self.pins.iter().collect();
        for unit in &self.units {
            pins.extend(unit.all_pins());
        }
        pins
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolPin {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: String,
    pub at: Position,
}
