//! Style edits issued by the contextual popups.
//!
//! Each entity kind has its own edit enum carrying only the fields that are
//! valid for it, so a node edit can never touch edge data and vice versa.

use crate::color::Color;
use crate::id::{EdgeId, NodeId};
use crate::model::{EdgeData, LineStyle, Node};
use serde::{Deserialize, Serialize};

/// Colors offered by the edge popup.
pub const EDGE_PALETTE: [(&str, Color); 6] = [
    ("Purple", Color::VIOLET),
    ("Blue", Color::rgb(0x3b, 0x82, 0xf6)),
    ("Green", Color::rgb(0x10, 0xb9, 0x81)),
    ("Red", Color::rgb(0xef, 0x44, 0x44)),
    ("Orange", Color::rgb(0xf9, 0x73, 0x16)),
    ("Pink", Color::rgb(0xec, 0x48, 0x99)),
];

/// Colors offered by the node popup, in addition to "default" (unset).
pub const NODE_PALETTE: [(&str, Color); 7] = [
    ("White", Color::WHITE),
    ("Purple", Color::VIOLET),
    ("Blue", Color::rgb(0x3b, 0x82, 0xf6)),
    ("Green", Color::rgb(0x10, 0xb9, 0x81)),
    ("Red", Color::rgb(0xef, 0x44, 0x44)),
    ("Orange", Color::rgb(0xf9, 0x73, 0x16)),
    ("Pink", Color::rgb(0xec, 0x48, 0x99)),
];

/// Stroke width presets offered by the edge popup.
pub const STROKE_WIDTHS: [(&str, f32); 4] = [
    ("Thin", 1.0),
    ("Normal", 2.0),
    ("Thick", 3.0),
    ("Extra Thick", 4.0),
];

/// A single change to a node's appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum NodeStyleEdit {
    /// `None` restores the type's default fill.
    BackgroundColor(Option<Color>),
    /// `None` restores the default text color.
    TextColor(Option<Color>),
    BorderStyle(LineStyle),
    Resize { width: f32, height: f32 },
}

impl NodeStyleEdit {
    pub fn apply(&self, node: &mut Node) {
        match self {
            Self::BackgroundColor(c) => node.background_color = *c,
            Self::TextColor(c) => node.text_color = *c,
            Self::BorderStyle(s) => node.border_style = *s,
            Self::Resize { width, height } => node.set_size(*width, *height),
        }
    }
}

/// A single change to an edge's appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum EdgeStyleEdit {
    StrokeColor(Color),
    StrokeWidth(f32),
    StrokeStyle(LineStyle),
    ToggleArrow,
    ToggleAnimation,
    ToggleBidirectional,
}

impl EdgeStyleEdit {
    pub fn apply(&self, data: &mut EdgeData) {
        match self {
            Self::StrokeColor(c) => data.stroke_color = *c,
            Self::StrokeWidth(w) => data.stroke_width = *w,
            Self::StrokeStyle(s) => data.stroke_style = *s,
            Self::ToggleArrow => data.show_arrow = !data.show_arrow,
            Self::ToggleAnimation => data.animated = !data.animated,
            Self::ToggleBidirectional => data.bidirectional = !data.bidirectional,
        }
    }
}

/// A style edit addressed to one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StyleUpdate {
    Node { id: NodeId, edit: NodeStyleEdit },
    Edge { id: EdgeId, edit: EdgeStyleEdit },
}
