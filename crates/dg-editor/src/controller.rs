//! Interaction controller.
//!
//! `Editor` is the state machine sitting between host input and the graph
//! store. It owns the store, the popup coordinator, the inline text edit
//! session, the viewport, and any in-progress drag. Every `InputEvent` is
//! handled to completion before the next one; the returned `Outcome` tells
//! the host what needs re-rendering.

use crate::clipboard;
use crate::config::EditorConfig;
use crate::input::{InputEvent, Modifiers, PointerTarget};
use crate::popup::{Dropdown, PopupCoordinator, PopupOwner};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::store::GraphStore;
use crate::text_edit::{TextEditSession, TextKey};
use crate::tools::{DragGesture, ToolKind};
use dg_core::{
    EdgeId, GraphSnapshot, LayoutOrientation, NodeId, Position, ScreenRect, StyleUpdate, Viewport,
};

/// What an event changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Nodes, edges or selection changed.
    pub graph: bool,
    /// Popups, text editing, tool or viewport changed.
    pub ui: bool,
}

impl Outcome {
    pub const NONE: Outcome = Outcome {
        graph: false,
        ui: false,
    };
    pub const UI: Outcome = Outcome {
        graph: false,
        ui: true,
    };
    pub const GRAPH: Outcome = Outcome {
        graph: true,
        ui: true,
    };

    fn graph_if(changed: bool) -> Self {
        if changed { Self::GRAPH } else { Self::NONE }
    }

    fn ui_if(changed: bool) -> Self {
        if changed { Self::UI } else { Self::NONE }
    }

    pub fn merge(self, other: Outcome) -> Outcome {
        Outcome {
            graph: self.graph || other.graph,
            ui: self.ui || other.ui,
        }
    }

    pub fn is_none(&self) -> bool {
        !self.graph && !self.ui
    }
}

pub struct Editor {
    store: GraphStore,
    popups: PopupCoordinator,
    text_edit: Option<TextEditSession>,
    viewport: Viewport,
    screen: ScreenRect,
    drag: Option<DragGesture>,
    config: EditorConfig,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_graph(GraphSnapshot::default(), config)
    }

    /// An editor seeded with `graph`, which becomes the first history entry.
    pub fn with_graph(graph: GraphSnapshot, config: EditorConfig) -> Self {
        Self {
            store: GraphStore::with_graph(graph, config.max_history),
            popups: PopupCoordinator::new(config.popup_grace_ms),
            text_edit: None,
            viewport: Viewport::default(),
            screen: ScreenRect::default(),
            drag: None,
            config,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn popups(&self) -> &PopupCoordinator {
        &self.popups
    }

    pub fn text_edit(&self) -> Option<&TextEditSession> {
        self.text_edit.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // ─── Host-driven state ───────────────────────────────────────────────

    /// Swap in `config`. The diagram and everything around it survive;
    /// history restarts from the current graph.
    pub fn reconfigure(&mut self, config: EditorConfig) {
        self.drag = None;
        self.store.restart_history(config.max_history);
        self.popups.set_grace_ms(config.popup_grace_ms);
        self.config = config;
        log::debug!("editor: reconfigured, history restarted");
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Canvas element rectangle in client coordinates.
    pub fn set_screen(&mut self, screen: ScreenRect) {
        self.screen = screen;
    }

    pub fn set_tool(&mut self, tool: ToolKind) -> Outcome {
        if self.store.tool() == tool {
            return Outcome::NONE;
        }
        // A placement tool disables dragging, so drop any half-finished one.
        if !tool.allows_manipulation() {
            self.finish_drag();
        }
        self.store.set_tool(tool);
        log::debug!("editor: tool -> {tool}");
        Outcome::UI
    }

    pub fn set_layout(&mut self, layout: LayoutOrientation) -> Outcome {
        if self.store.layout() == layout {
            return Outcome::NONE;
        }
        self.store.set_layout(layout);
        Outcome::GRAPH
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    pub fn handle(&mut self, event: InputEvent) -> Outcome {
        match event {
            InputEvent::PaneClick { client_x, client_y } => self.pane_click(client_x, client_y),
            InputEvent::NodeClick { id, time_ms } => self.node_click(id, time_ms),
            InputEvent::NodeDoubleClick { id, time_ms } => self.begin_text_edit(id, time_ms),
            InputEvent::EdgeClick {
                id,
                client_x,
                client_y,
                time_ms,
            } => self.edge_click(id, (client_x, client_y), time_ms),
            InputEvent::PointerDown { target, time_ms } => self.pointer_down(target, time_ms),
            InputEvent::NodeDrag { id, position } => self.drag_node(id, position),
            InputEvent::NodeDragStop { id } => self.drag_stop(id),
            InputEvent::Connect { source, target } => self.connect(source, target),
            InputEvent::SelectionChange { nodes, edges } => self.select(&nodes, &edges),
            InputEvent::Key { key, modifiers } => self.key(&key, modifiers),
            InputEvent::TextInput { text } => self.text_input(text),
            InputEvent::TextBlur => self.commit_text_edit(),
            InputEvent::Style(update) => self.apply_style(&update),
        }
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    fn pane_click(&mut self, client_x: f32, client_y: f32) -> Outcome {
        match self.store.tool().shape() {
            Some(shape) => {
                let position = self.viewport.project(self.screen, client_x, client_y);
                self.store.add_node(shape, position);
                self.store.set_tool(ToolKind::Select);
                Outcome::GRAPH
            }
            None => {
                let committed = self.commit_text_edit();
                let closed = self.popups.close_all().is_some();
                committed.merge(Outcome::ui_if(closed))
            }
        }
    }

    fn node_click(&mut self, id: NodeId, time_ms: f64) -> Outcome {
        if !self.store.tool().allows_manipulation() || self.store.node(id).is_none() {
            return Outcome::NONE;
        }
        // Editing text on this node suspends its style popup.
        if self.text_edit.as_ref().is_some_and(|s| s.node() == id) {
            return Outcome::NONE;
        }
        self.open_popup(PopupOwner::NodeStyle(id), time_ms, None)
    }

    fn edge_click(&mut self, id: EdgeId, anchor: (f32, f32), time_ms: f64) -> Outcome {
        if !self.store.tool().allows_manipulation() || self.store.edge(id).is_none() {
            return Outcome::NONE;
        }
        self.open_popup(PopupOwner::EdgeStyle(id), time_ms, Some(anchor))
    }

    fn pointer_down(&mut self, target: PointerTarget, time_ms: f64) -> Outcome {
        match self.popups.pointer_down(&target, time_ms) {
            Some(PopupOwner::TextEdit(_)) => self.commit_text_edit().merge(Outcome::UI),
            Some(_) => Outcome::UI,
            None => Outcome::NONE,
        }
    }

    fn open_popup(
        &mut self,
        owner: PopupOwner,
        time_ms: f64,
        anchor: Option<(f32, f32)>,
    ) -> Outcome {
        let displaced = self.popups.request_open(owner, time_ms, anchor);
        let committed = match displaced {
            Some(PopupOwner::TextEdit(_)) => self.end_text_edit(true),
            _ => Outcome::NONE,
        };
        committed.merge(Outcome::UI)
    }

    // ─── Drag ────────────────────────────────────────────────────────────

    fn drag_node(&mut self, id: NodeId, position: Position) -> Outcome {
        if !self.store.tool().allows_manipulation() {
            return Outcome::NONE;
        }
        let Some(start) = self.store.node(id).map(|n| n.position) else {
            return Outcome::NONE;
        };

        // A new anchor settles the previous gesture first.
        let settled = self.drag.as_ref().is_some_and(|g| g.anchor != id) && self.finish_drag();

        let gesture = match self.drag.take() {
            Some(gesture) => gesture,
            None => {
                let moving = if self.store.selected_nodes().contains(&id) {
                    self.store.selected_nodes().to_vec()
                } else {
                    vec![id]
                };
                DragGesture::new(id, moving, start)
            }
        };
        let gesture = self.drag.insert(gesture);

        let (dx, dy) = gesture.advance(position);
        if dx == 0.0 && dy == 0.0 {
            return Outcome::graph_if(settled);
        }
        log::trace!("editor: drag {id} by ({dx}, {dy})");
        self.store.move_nodes(&gesture.moving, dx, dy);
        Outcome::GRAPH
    }

    fn drag_stop(&mut self, id: NodeId) -> Outcome {
        if self.drag.as_ref().is_some_and(|g| g.anchor == id) {
            Outcome::graph_if(self.finish_drag())
        } else {
            Outcome::NONE
        }
    }

    /// End the current drag, capturing once if anything moved.
    fn finish_drag(&mut self) -> bool {
        match self.drag.take() {
            Some(gesture) if gesture.moved => {
                self.store.capture();
                log::debug!("editor: drag of {} node(s) settled", gesture.moving.len());
                true
            }
            _ => false,
        }
    }

    // ─── Graph actions ───────────────────────────────────────────────────

    fn connect(&mut self, source: NodeId, target: NodeId) -> Outcome {
        if !self.store.tool().allows_manipulation() {
            return Outcome::NONE;
        }
        let data = self.config.edge_defaults.clone();
        Outcome::graph_if(self.store.connect(source, target, data).is_some())
    }

    fn select(&mut self, nodes: &[NodeId], edges: &[EdgeId]) -> Outcome {
        if !self.store.tool().allows_manipulation() {
            return Outcome::NONE;
        }
        self.store.set_selection(nodes, edges);
        Outcome::GRAPH
    }

    fn apply_style(&mut self, update: &StyleUpdate) -> Outcome {
        let changed = self.store.apply_style(update);
        // Picking a value closes the dropdown it came from.
        self.popups.close_dropdown();
        Outcome::graph_if(changed).merge(Outcome::UI)
    }

    /// Copy the selected nodes and their internal edges.
    pub fn copy(&mut self) -> Outcome {
        let graph = self.store.snapshot();
        if let Some(clip) = clipboard::extract_subgraph(&graph, self.store.selected_nodes()) {
            log::debug!(
                "editor: copied {} node(s), {} edge(s)",
                clip.nodes.len(),
                clip.edges.len()
            );
            self.store.set_clipboard(Some(clip));
        }
        Outcome::NONE
    }

    pub fn paste(&mut self) -> Outcome {
        Outcome::graph_if(self.store.paste(self.config.paste_offset).is_some())
    }

    /// Delete the selection: nodes (with their edges) first, then the
    /// remaining selected edges.
    pub fn delete_selection(&mut self) -> Outcome {
        let nodes = self.store.selected_nodes().to_vec();
        let edges = self.store.selected_edges().to_vec();
        if nodes.is_empty() && edges.is_empty() {
            return Outcome::NONE;
        }
        let removed_nodes = self.store.delete_nodes(&nodes);
        let removed_edges = self.store.delete_edges(&edges);
        self.store.clear_selection();
        self.prune_transient();
        Outcome::graph_if(removed_nodes || removed_edges)
    }

    /// Delete one node from its style popup.
    pub fn delete_node(&mut self, id: NodeId) -> Outcome {
        if !self.store.delete_nodes(&[id]) {
            return Outcome::NONE;
        }
        self.prune_transient();
        Outcome::GRAPH
    }

    /// Delete one edge from its style popup.
    pub fn delete_edge(&mut self, id: EdgeId) -> Outcome {
        if !self.store.delete_edges(&[id]) {
            return Outcome::NONE;
        }
        self.prune_transient();
        Outcome::GRAPH
    }

    pub fn undo(&mut self) -> Outcome {
        self.finish_drag();
        if !self.store.undo() {
            return Outcome::NONE;
        }
        log::debug!("editor: undo to entry {}", self.store.history().cursor());
        self.prune_transient();
        Outcome::GRAPH
    }

    pub fn redo(&mut self) -> Outcome {
        self.finish_drag();
        if !self.store.redo() {
            return Outcome::NONE;
        }
        log::debug!("editor: redo to entry {}", self.store.history().cursor());
        self.prune_transient();
        Outcome::GRAPH
    }

    /// Close popups and text edits whose node or edge no longer exists.
    fn prune_transient(&mut self) {
        let store = &self.store;
        let vanished = |owner: PopupOwner| match owner {
            PopupOwner::NodeStyle(id) | PopupOwner::TextEdit(id) => store.node(id).is_none(),
            PopupOwner::EdgeStyle(id) => store.edge(id).is_none(),
        };
        if let Some(owner) = self.popups.close_if(vanished) {
            log::debug!("editor: closed {owner:?} after its target vanished");
        }
        if self
            .text_edit
            .as_ref()
            .is_some_and(|s| self.store.node(s.node()).is_none())
        {
            self.text_edit = None;
        }
        if self
            .drag
            .as_ref()
            .is_some_and(|d| self.store.node(d.anchor).is_none())
        {
            self.drag = None;
        }
    }

    // ─── Popups ──────────────────────────────────────────────────────────

    /// Close `owner`'s popup (its own close button).
    pub fn close_popup(&mut self, owner: PopupOwner) -> Outcome {
        if let PopupOwner::TextEdit(_) = owner {
            return self.commit_text_edit();
        }
        Outcome::ui_if(self.popups.close(owner))
    }

    pub fn toggle_dropdown(&mut self, dropdown: Dropdown) -> Outcome {
        Outcome::ui_if(self.popups.toggle_dropdown(dropdown))
    }

    // ─── Inline text editing ─────────────────────────────────────────────

    fn begin_text_edit(&mut self, id: NodeId, time_ms: f64) -> Outcome {
        if !self.store.tool().allows_manipulation() {
            return Outcome::NONE;
        }
        let Some(label) = self.store.node(id).map(|n| n.label.clone()) else {
            return Outcome::NONE;
        };
        if self.text_edit.as_ref().is_some_and(|s| s.node() == id) {
            return Outcome::NONE;
        }
        let outcome = self.open_popup(PopupOwner::TextEdit(id), time_ms, None);
        self.text_edit = Some(TextEditSession::begin(id, &label));
        log::debug!("editor: editing label of {id}");
        outcome
    }

    fn text_input(&mut self, text: String) -> Outcome {
        match self.text_edit.as_mut() {
            Some(session) => {
                session.set_draft(text);
                Outcome::UI
            }
            None => Outcome::NONE,
        }
    }

    fn commit_text_edit(&mut self) -> Outcome {
        self.end_text_edit(true)
    }

    fn cancel_text_edit(&mut self) -> Outcome {
        self.end_text_edit(false)
    }

    fn end_text_edit(&mut self, commit: bool) -> Outcome {
        let Some(session) = self.text_edit.take() else {
            return Outcome::NONE;
        };
        self.popups.close(PopupOwner::TextEdit(session.node()));
        if commit
            && session.is_dirty()
            && self.store.set_label(session.node(), session.draft())
        {
            log::debug!("editor: committed label of {}", session.node());
            Outcome::GRAPH
        } else {
            Outcome::UI
        }
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    fn key(&mut self, key: &str, modifiers: Modifiers) -> Outcome {
        // While a text field has focus, shortcuts stay out of its way.
        if self.text_edit.is_some() {
            return match TextKey::classify(key, modifiers.shift) {
                TextKey::Commit => self.commit_text_edit(),
                TextKey::Cancel => self.cancel_text_edit(),
                TextKey::PassThrough => Outcome::NONE,
            };
        }

        let Some(action) = ShortcutMap::resolve(
            key,
            modifiers.ctrl,
            modifiers.shift,
            modifiers.alt,
            modifiers.meta,
        ) else {
            return Outcome::NONE;
        };
        log::trace!("editor: shortcut {action:?}");
        match action {
            ShortcutAction::Copy => self.copy(),
            ShortcutAction::Paste => self.paste(),
            ShortcutAction::Delete => self.delete_selection(),
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::Cancel => Outcome::ui_if(self.popups.close_all().is_some()),
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
