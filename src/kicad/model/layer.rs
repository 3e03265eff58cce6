use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use strum::Display;

/// Physical or virtual layer a drawing primitive lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum LayerKind {
    FrontCopper,
    BackCopper,
    InnerCopper,
    AllCopper,
    FrontSilk,
    BackSilk,
    FrontFab,
    BackFab,
    BoardEdge,
    FrontCourtyard,
    BackCourtyard,
    FrontPaste,
    BackPaste,
    FrontMask,
    BackMask,
    User,
}

/// Board side of an output record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LayerRef {
    Top,
    Bottom,
}

static LAYER_TABLE: LazyLock<HashMap<String, LayerKind>> = LazyLock::new(|| {
    let mut table = HashMap::from([
        ("f.cu".to_string(), LayerKind::FrontCopper),
        ("b.cu".to_string(), LayerKind::BackCopper),
        ("*.cu".to_string(), LayerKind::AllCopper),
        ("f.silks".to_string(), LayerKind::FrontSilk),
        ("f.silkscreen".to_string(), LayerKind::FrontSilk),
        ("b.silks".to_string(), LayerKind::BackSilk),
        ("b.silkscreen".to_string(), LayerKind::BackSilk),
        ("f.fab".to_string(), LayerKind::FrontFab),
        ("b.fab".to_string(), LayerKind::BackFab),
        ("edge.cuts".to_string(), LayerKind::BoardEdge),
        ("f.crtyd".to_string(), LayerKind::FrontCourtyard),
        ("f.courtyard".to_string(), LayerKind::FrontCourtyard),
        ("b.crtyd".to_string(), LayerKind::BackCourtyard),
        ("b.courtyard".to_string(), LayerKind::BackCourtyard),
        ("f.paste".to_string(), LayerKind::FrontPaste),
        ("b.paste".to_string(), LayerKind::BackPaste),
        ("f.mask".to_string(), LayerKind::FrontMask),
        ("b.mask".to_string(), LayerKind::BackMask),
        ("dwgs.user".to_string(), LayerKind::User),
        ("cmts.user".to_string(), LayerKind::User),
        ("eco1.user".to_string(), LayerKind::User),
        ("eco2.user".to_string(), LayerKind::User),
    ]);
    for i in 1..=30 {
        table.insert(format!("in{i}.cu"), LayerKind::InnerCopper);
    }
    for i in 1..=9 {
        table.insert(format!("user.{i}"), LayerKind::User);
    }
    table
});

impl LayerKind {
    /// Looks up a KiCad layer name, case-insensitively. Unknown layers yield `None`.
    pub fn classify(layer: &str) -> Option<LayerKind> {
        LAYER_TABLE.get(&layer.to_ascii_lowercase()).copied()
    }

    pub fn is_copper(self) -> bool {
        matches!(self, LayerKind::FrontCopper | LayerKind::BackCopper | LayerKind::InnerCopper | LayerKind::AllCopper)
    }

    pub fn is_silkscreen(self) -> bool {
        matches!(self, LayerKind::FrontSilk | LayerKind::BackSilk)
    }

    pub fn is_fabrication(self) -> bool {
        matches!(self, LayerKind::FrontFab | LayerKind::BackFab)
    }

    pub fn is_courtyard(self) -> bool {
        matches!(self, LayerKind::FrontCourtyard | LayerKind::BackCourtyard)
    }

    /// Output sides for this layer. Inner copper is reported on the top side, since the output
    /// format only distinguishes the two outer faces.
    pub fn sides(self) -> &'static [LayerRef] {
        match self {
            LayerKind::AllCopper => &[LayerRef::Top, LayerRef::Bottom],
            LayerKind::BackCopper
            | LayerKind::BackSilk
            | LayerKind::BackFab
            | LayerKind::BackCourtyard
            | LayerKind::BackPaste
            | LayerKind::BackMask => &[LayerRef::Bottom],
            LayerKind::FrontCopper
            | LayerKind::InnerCopper
            | LayerKind::FrontSilk
            | LayerKind::FrontFab
            | LayerKind::BoardEdge
            | LayerKind::FrontCourtyard
            | LayerKind::FrontPaste
            | LayerKind::FrontMask
            | LayerKind::User => &[LayerRef::Top],
        }
    }

    /// Single output side, `Top` for anything not exclusively on the back.
    pub fn side(self) -> LayerRef {
        self.sides()[0]
    }
}
