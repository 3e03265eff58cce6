use std::collections::HashMap;
use strum::Display;

/// Record families that own their own identifier sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum IdKind {
    SourceComponent,
    SchematicComponent,
    PcbComponent,
    SourcePort,
    SchematicPort,
    PcbPort,
    PcbSmtpad,
    PcbPlatedHole,
    PcbHole,
    PcbTrace,
    PcbSilkscreenPath,
    PcbSilkscreenPill,
    PcbSilkscreenCircle,
    PcbSilkscreenText,
    PcbFabricationNotePath,
    PcbFabricationNoteText,
    PcbNoteLine,
    PcbNotePath,
    PcbCutout,
    PcbCourtyardRect,
}

/// Hands out `<kind>_<n>` identifiers, counting from zero separately for each kind.
/// Lives for a single conversion run.
#[derive(Debug, Default)]
pub struct IdAllocator {
    counters: HashMap<IdKind, usize>,
}

impl IdAllocator {
    pub fn new() -> IdAllocator {
        IdAllocator::default()
    }

    pub fn next(&mut self, kind: IdKind) -> String {
        let counter = self.counters.entry(kind).or_insert(0);
        let id = format!("{kind}_{counter}");
        *counter += 1;
        id
    }
}
