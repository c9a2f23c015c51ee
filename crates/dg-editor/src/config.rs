//! Editor configuration.

use dg_core::EdgeData;
use serde::Deserialize;

/// Tunables for the interaction controller.
///
/// Deserializable from JSON (camelCase keys); every field is optional and
/// falls back to its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Maximum retained history snapshots. Default: **256**.
    pub max_history: usize,

    /// Offset applied to pasted nodes, in canvas units. Default: **(50, 50)**.
    pub paste_offset: (f32, f32),

    /// Pointer-downs this soon after a popup opens never close it.
    /// Default: **100 ms**.
    pub popup_grace_ms: f64,

    /// Styling given to newly connected edges.
    pub edge_defaults: EdgeData,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: 256,
            paste_offset: (50.0, 50.0),
            popup_grace_ms: 100.0,
            edge_defaults: EdgeData::default(),
        }
    }
}
