//! Node presentation: bounds, fill/border styling and connection handles.

use dg_core::{Color, LayoutOrientation, LineStyle, Node, NodeId, NodeType};
use kurbo::{Point, Rect, RoundedRect, Shape};
use serde::Serialize;

/// Default label color.
pub const TEXT_COLOR: Color = Color::rgb(0x1f, 0x29, 0x37);
/// Border of a selected node.
pub const SELECTED_BORDER: Color = Color::rgb(0x3b, 0x82, 0xf6);
/// Border of an unselected node.
pub const IDLE_BORDER: Color = Color::rgb(0xe5, 0xe7, 0xeb);
pub const BORDER_WIDTH: f32 = 2.0;
pub const CORNER_RADIUS: f32 = 8.0;
/// Upper bound for the placeholder icon shown on blank nodes.
pub const PLACEHOLDER_MAX: f32 = 32.0;

/// Axis-aligned box in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.x as f64,
            self.y as f64,
            (self.x + self.width) as f64,
            (self.y + self.height) as f64,
        )
    }

    pub fn center(self) -> Point {
        self.to_rect().center()
    }
}

/// Drawn bounds of `node`. Circles occupy a square of their larger side.
pub fn node_bounds(node: &Node) -> Bounds {
    let (width, height) = match node.node_type {
        NodeType::Circle => {
            let side = node.width.max(node.height);
            (side, side)
        }
        _ => (node.width, node.height),
    };
    Bounds {
        x: node.position.x,
        y: node.position.y,
        width,
        height,
    }
}

pub fn corner_radius(node: &Node) -> f32 {
    match node.node_type {
        NodeType::Circle => node_bounds(node).width / 2.0,
        _ => CORNER_RADIUS,
    }
}

/// Whether canvas point `p` lies inside the node's drawn outline.
pub fn contains(node: &Node, p: Point) -> bool {
    let outline = RoundedRect::from_rect(node_bounds(node).to_rect(), corner_radius(node) as f64);
    outline.contains(p)
}

// ─── Handles ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleRole {
    Source,
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// A connection point on a node's border.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Handle {
    pub role: HandleRole,
    pub side: Side,
    pub x: f32,
    pub y: f32,
}

/// Source and target handles for `node` under `orientation`.
///
/// Horizontal flows leave on the right and enter on the left; vertical
/// flows leave at the bottom and enter at the top.
pub fn handles(node: &Node, orientation: LayoutOrientation) -> [Handle; 2] {
    let (source, target) = match orientation {
        LayoutOrientation::Horizontal => (Side::Right, Side::Left),
        LayoutOrientation::Vertical => (Side::Bottom, Side::Top),
    };
    let bounds = node_bounds(node);
    [
        handle_at(bounds, HandleRole::Source, source),
        handle_at(bounds, HandleRole::Target, target),
    ]
}

pub fn source_point(node: &Node, orientation: LayoutOrientation) -> Handle {
    handles(node, orientation)[0]
}

pub fn target_point(node: &Node, orientation: LayoutOrientation) -> Handle {
    handles(node, orientation)[1]
}

fn handle_at(b: Bounds, role: HandleRole, side: Side) -> Handle {
    let (x, y) = match side {
        Side::Left => (b.x, b.y + b.height / 2.0),
        Side::Right => (b.x + b.width, b.y + b.height / 2.0),
        Side::Top => (b.x + b.width / 2.0, b.y),
        Side::Bottom => (b.x + b.width / 2.0, b.y + b.height),
    };
    Handle { role, side, x, y }
}

// ─── View ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Border {
    pub color: Color,
    pub width: f32,
    pub style: LineStyle,
}

/// Everything the host needs to draw one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: NodeId,
    pub node_type: NodeType,
    pub bounds: Bounds,
    pub corner_radius: f32,
    pub fill: Color,
    pub text_color: Color,
    pub border: Option<Border>,
    pub label: String,
    /// Size of the placeholder icon drawn when the label is blank.
    pub placeholder: Option<f32>,
    pub selected: bool,
    pub handles: [Handle; 2],
}

impl NodeView {
    pub fn new(node: &Node, orientation: LayoutOrientation) -> Self {
        let is_label = node.node_type == NodeType::Label;
        let fill = match (node.background_color, is_label) {
            (Some(color), _) => color,
            (None, true) => Color::TRANSPARENT,
            (None, false) => Color::WHITE,
        };
        let border = (!is_label).then(|| Border {
            color: if node.selected {
                SELECTED_BORDER
            } else {
                IDLE_BORDER
            },
            width: BORDER_WIDTH,
            style: node.border_style,
        });
        let placeholder = node.label.trim().is_empty().then(|| {
            (node.width * 0.3)
                .min(node.height * 0.3)
                .min(PLACEHOLDER_MAX)
        });

        Self {
            id: node.id,
            node_type: node.node_type,
            bounds: node_bounds(node),
            corner_radius: corner_radius(node),
            fill,
            text_color: node.text_color.unwrap_or(TEXT_COLOR),
            border,
            label: node.label.clone(),
            placeholder,
            selected: node.selected,
            handles: handles(node, orientation),
        }
    }
}
