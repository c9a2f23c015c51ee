//! Input abstraction layer.
//!
//! Normalizes the gestures delivered by the host (pointer clicks, drags,
//! connection gestures, keyboard) into a unified `InputEvent` enum consumed
//! by the interaction controller. Hit testing happens before an event is
//! built, so events already name the node or edge they landed on.

use crate::popup::PopupOwner;
use dg_core::{EdgeId, NodeId, Position, StyleUpdate};

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on Linux/Windows, ⌘ on macOS.
    pub const COMMAND: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas.
    Pane,
    Node(NodeId),
    Edge(EdgeId),
    /// Inside the on-screen region of an open popup or editor.
    Popup(PopupOwner),
}

/// A normalized input event.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Click on empty canvas, in client coordinates.
    PaneClick { client_x: f32, client_y: f32 },

    /// Click on a node.
    NodeClick { id: NodeId, time_ms: f64 },

    /// Double click on a node (enter inline text edit).
    NodeDoubleClick { id: NodeId, time_ms: f64 },

    /// Click on an edge, in client coordinates (popup anchor).
    EdgeClick {
        id: EdgeId,
        client_x: f32,
        client_y: f32,
        time_ms: f64,
    },

    /// Raw pointer-down anywhere in the document (click-outside detection).
    PointerDown { target: PointerTarget, time_ms: f64 },

    /// Node drag frame: the dragged node's new canvas position.
    NodeDrag { id: NodeId, position: Position },

    /// Node drag released.
    NodeDragStop { id: NodeId },

    /// Connection gesture completed from a source handle to a target handle.
    Connect { source: NodeId, target: NodeId },

    /// The host's selection changed.
    SelectionChange {
        nodes: Vec<NodeId>,
        edges: Vec<EdgeId>,
    },

    /// Key pressed.
    Key { key: String, modifiers: Modifiers },

    /// Inline text editor draft replaced.
    TextInput { text: String },

    /// Inline text editor lost focus.
    TextBlur,

    /// Style edit issued by a popup.
    Style(StyleUpdate),
}

impl InputEvent {
    pub fn key(key: &str, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.to_string(),
            modifiers,
        }
    }
}
