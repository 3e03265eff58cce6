use crate::converter::errors::StyleError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Board-level style values resolved by the caller, overriding what the footprint declares.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPcbStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silkscreen_font_size: Option<f64>,
}

impl ResolvedPcbStyle {
    pub async fn from_file(path: &Path) -> Result<ResolvedPcbStyle, StyleError> {
        let data = tokio::fs::read_to_string(path).await.map_err(|source| StyleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| StyleError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fields set on `other` win over fields set on `self`.
    pub fn merged_with(self, other: ResolvedPcbStyle) -> ResolvedPcbStyle {
        ResolvedPcbStyle {
            silkscreen_font_size: other.silkscreen_font_size.or(self.silkscreen_font_size),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConverterOptions {
    #[serde(default)]
    pub resolved_pcb_style: Option<ResolvedPcbStyle>,
}

impl ConverterOptions {
    pub fn with_style(style: ResolvedPcbStyle) -> ConverterOptions {
        ConverterOptions { resolved_pcb_style: Some(style) }
    }

    pub fn silkscreen_font_size(&self) -> Option<f64> {
        self.resolved_pcb_style.and_then(|s| s.silkscreen_font_size)
    }
}
