use serde::Serialize;

pub mod elements;
pub mod ids;

pub use elements::CircuitElement;

/// Something the converter skipped or could not represent. Never fatal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub element: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    pub message: String,
}

/// Output of one conversion run.
#[derive(Debug, Clone, Default)]
pub struct CircuitJson {
    pub elements: Vec<CircuitElement>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CircuitJson {
    /// Serializes the element list as the plain record array consumers expect.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(&self.elements)
        } else {
            serde_json::to_string(&self.elements)
        }
    }

    pub fn elements_of<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a CircuitElement> + 'a {
        self.elements.iter().filter(move |e| e.type_name() == type_name)
    }
}
