//! Diagram data model.
//!
//! A diagram is two flat collections: nodes (shapes and labels placed on the
//! canvas) and edges (connectors between two nodes). Edges refer to their
//! endpoints by `NodeId` only; they never own nodes. A `GraphSnapshot` is a
//! value copy of both collections and is what history and the clipboard hold.

use crate::color::Color;
use crate::id::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Which sides of a node carry its connection handles.
///
/// Horizontal puts the target on the left and the source on the right;
/// vertical puts the target on top and the source at the bottom. Stored
/// geometry is never affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutOrientation {
    #[default]
    Horizontal,
    Vertical,
}

impl LayoutOrientation {
    pub fn name(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl FromStr for LayoutOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(format!("unknown layout orientation: {other:?}")),
        }
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// The shape a node is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Rectangle,
    Circle,
    Label,
}

impl NodeType {
    /// Size given to freshly placed nodes of this type.
    pub fn default_size(self) -> (f32, f32) {
        match self {
            Self::Label => (80.0, 30.0),
            Self::Circle => (80.0, 80.0),
            Self::Rectangle => (90.0, 60.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Label => "label",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Solid or dashed outline; shared by node borders and edge strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// A shape or label placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    pub node_type: NodeType,
    #[serde(default)]
    pub label: String,
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,
    #[serde(default)]
    pub border_style: LineStyle,
    /// Mirrors selection; recomputed by the store, never authoritative.
    #[serde(default)]
    pub selected: bool,
}

impl Node {
    /// A blank node of `node_type` at `position` with the type's default size.
    pub fn new(id: NodeId, node_type: NodeType, position: Position) -> Self {
        let (width, height) = node_type.default_size();
        Self {
            id,
            position,
            node_type,
            label: String::new(),
            width,
            height,
            background_color: None,
            text_color: None,
            border_style: LineStyle::Solid,
            selected: false,
        }
    }

    /// Resize, keeping circles square.
    pub fn set_size(&mut self, width: f32, height: f32) {
        if self.node_type == NodeType::Circle {
            let side = width.max(height);
            self.width = side;
            self.height = side;
        } else {
            self.width = width;
            self.height = height;
        }
    }
}

// ─── Edges ───────────────────────────────────────────────────────────────

/// Visual styling of a connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeData {
    pub stroke_color: Color,
    pub stroke_width: f32,
    pub stroke_style: LineStyle,
    pub animated: bool,
    pub show_arrow: bool,
    pub bidirectional: bool,
}

impl Default for EdgeData {
    /// Violet, 2 px, dashed, animated, no arrowheads.
    fn default() -> Self {
        Self {
            stroke_color: Color::VIOLET,
            stroke_width: 2.0,
            stroke_style: LineStyle::Dashed,
            animated: true,
            show_arrow: false,
            bidirectional: false,
        }
    }
}

/// A connector from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub data: EdgeData,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, data: EdgeData) -> Self {
        Self {
            id,
            source,
            target,
            data,
        }
    }

    /// Whether either endpoint is `node`.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

// ─── Snapshots ───────────────────────────────────────────────────────────

/// Value copy of the full node and edge collections at one instant.
///
/// Used for history entries and clipboard contents. Cloning is a deep copy;
/// nothing in a snapshot aliases live editor state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Edges whose source or target is missing from `nodes`.
    pub fn dangling_edges(&self) -> Vec<EdgeId> {
        self.edges
            .iter()
            .filter(|e| !self.contains_node(e.source) || !self.contains_node(e.target))
            .map(|e| e.id)
            .collect()
    }
}
