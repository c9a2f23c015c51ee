//! Tool modes for canvas interactions.
//!
//! | Tool | Pane click | Drag / connect / select |
//! |------|------------|-------------------------|
//! | **Select** | Close popups, end text edit | Enabled |
//! | **Rectangle / Circle / Label** | Place one shape, revert to Select | Disabled |

use dg_core::{NodeId, NodeType, Position};
use std::fmt;
use std::str::FromStr;

/// The active tool determines what the next pane click does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Circle,
    Label,
}

impl ToolKind {
    /// The node type a placement tool creates; `None` for Select.
    pub fn shape(self) -> Option<NodeType> {
        match self {
            Self::Select => None,
            Self::Rectangle => Some(NodeType::Rectangle),
            Self::Circle => Some(NodeType::Circle),
            Self::Label => Some(NodeType::Label),
        }
    }

    /// Whether dragging, connecting, selecting and panning are enabled.
    pub fn allows_manipulation(self) -> bool {
        self == Self::Select
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Label => "label",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Self::Select),
            "rectangle" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "label" => Ok(Self::Label),
            other => Err(format!("unknown tool: {other:?}")),
        }
    }
}

// ─── Node drag ───────────────────────────────────────────────────────────

/// State of an in-progress node drag.
///
/// Intermediate frames move nodes live without touching history; the
/// gesture is captured once on release, and only if something moved.
#[derive(Debug, Clone)]
pub struct DragGesture {
    /// Node under the pointer.
    pub anchor: NodeId,
    /// Nodes that follow the anchor (the anchor included).
    pub moving: Vec<NodeId>,
    /// Anchor position at the previous frame.
    pub last: Position,
    pub moved: bool,
}

impl DragGesture {
    pub fn new(anchor: NodeId, moving: Vec<NodeId>, start: Position) -> Self {
        Self {
            anchor,
            moving,
            last: start,
            moved: false,
        }
    }

    /// Advance to the anchor's new position; returns the frame delta.
    pub fn advance(&mut self, to: Position) -> (f32, f32) {
        let dx = to.x - self.last.x;
        let dy = to.y - self.last.y;
        self.last = to;
        if dx != 0.0 || dy != 0.0 {
            self.moved = true;
        }
        (dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_by_tool() {
        assert_eq!(ToolKind::Select.shape(), None);
        assert_eq!(ToolKind::Circle.shape(), Some(NodeType::Circle));
        assert!(ToolKind::Select.allows_manipulation());
        assert!(!ToolKind::Label.allows_manipulation());
    }

    #[test]
    fn tool_names_roundtrip() {
        for tool in [
            ToolKind::Select,
            ToolKind::Rectangle,
            ToolKind::Circle,
            ToolKind::Label,
        ] {
            assert_eq!(tool.name().parse::<ToolKind>(), Ok(tool));
        }
        assert!("pen".parse::<ToolKind>().is_err());
    }

    #[test]
    fn drag_tracks_movement() {
        let id = NodeId::intern("drag-a");
        let mut drag = DragGesture::new(id, vec![id], Position::new(10.0, 10.0));
        assert_eq!(drag.advance(Position::new(10.0, 10.0)), (0.0, 0.0));
        assert!(!drag.moved);
        assert_eq!(drag.advance(Position::new(15.0, 7.0)), (5.0, -3.0));
        assert!(drag.moved);
    }
}
