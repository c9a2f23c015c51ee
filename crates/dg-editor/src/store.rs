//! Graph store: the single source of truth for the diagram.
//!
//! Owns the node and edge collections, selection, clipboard, active tool,
//! layout orientation, id generator and history. Collections are always
//! replaced wholesale, never patched element-by-element from outside, so
//! every history snapshot is a plain value copy.
//!
//! Discrete user actions (`add_node`, `connect`, `delete_*`, `paste`,
//! `apply_style`, `set_label`) capture history right after mutating. Live
//! feedback (`move_nodes` during a drag) does not; the caller captures
//! once the gesture settles.

use crate::clipboard::{self, IdSource};
use crate::history::History;
use crate::tools::ToolKind;
use dg_core::{
    Edge, EdgeData, EdgeId, GraphSnapshot, IdGen, LayoutOrientation, Node, NodeId, NodeType,
    Position, StyleUpdate,
};
use smallvec::SmallVec;

pub type NodeSelection = SmallVec<[NodeId; 4]>;
pub type EdgeSelection = SmallVec<[EdgeId; 4]>;

pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    selected_nodes: NodeSelection,
    selected_edges: EdgeSelection,
    /// Single slot; a new copy replaces the previous one.
    clipboard: Option<GraphSnapshot>,
    tool: ToolKind,
    layout: LayoutOrientation,
    history: History,
    ids: IdGen,
}

impl GraphStore {
    /// An empty diagram. The empty state is history entry 0.
    pub fn new(max_history: usize) -> Self {
        Self::with_graph(GraphSnapshot::default(), max_history)
    }

    /// A diagram seeded with `graph`, which becomes history entry 0.
    pub fn with_graph(graph: GraphSnapshot, max_history: usize) -> Self {
        let mut store = Self {
            nodes: graph.nodes,
            edges: Vec::new(),
            selected_nodes: SmallVec::new(),
            selected_edges: SmallVec::new(),
            clipboard: None,
            tool: ToolKind::Select,
            layout: LayoutOrientation::Horizontal,
            history: History::new(max_history),
            ids: IdGen::new(),
        };
        store.set_edges(graph.edges);
        store.sync_selected_flags();
        store.capture();
        store
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Deep copy of the live collections.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::new(self.nodes.clone(), self.edges.clone())
    }

    pub fn selected_nodes(&self) -> &[NodeId] {
        &self.selected_nodes
    }

    pub fn selected_edges(&self) -> &[EdgeId] {
        &self.selected_edges
    }

    pub fn clipboard(&self) -> Option<&GraphSnapshot> {
        self.clipboard.as_ref()
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn layout(&self) -> LayoutOrientation {
        self.layout
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ─── Atomic setters ──────────────────────────────────────────────────

    /// Replace the node collection. Edges left without an endpoint are
    /// dropped, and selection is pruned to surviving ids.
    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
        let nodes = &self.nodes;
        self.selected_nodes.retain(|id| nodes.iter().any(|n| n.id == *id));
        self.sync_selected_flags();
        if self.edges.iter().any(|e| !self.has_endpoints(e)) {
            let edges = self.edges.clone();
            self.set_edges(edges);
        }
    }

    /// Replace the edge collection. Edges naming a missing node are
    /// dropped, and selection is pruned to surviving ids.
    pub fn set_edges(&mut self, mut edges: Vec<Edge>) {
        edges.retain(|e| self.has_endpoints(e));
        self.edges = edges;
        let edges = &self.edges;
        self.selected_edges.retain(|id| edges.iter().any(|e| e.id == *id));
    }

    fn has_endpoints(&self, edge: &Edge) -> bool {
        self.node(edge.source).is_some() && self.node(edge.target).is_some()
    }

    /// Replace both selections wholesale. Unknown ids are dropped.
    pub fn set_selection(&mut self, nodes: &[NodeId], edges: &[EdgeId]) {
        self.selected_nodes = nodes
            .iter()
            .copied()
            .filter(|id| self.node(*id).is_some())
            .collect();
        self.selected_edges = edges
            .iter()
            .copied()
            .filter(|id| self.edge(*id).is_some())
            .collect();
        self.sync_selected_flags();
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(&[], &[]);
    }

    pub fn set_clipboard(&mut self, contents: Option<GraphSnapshot>) {
        self.clipboard = contents;
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn set_layout(&mut self, layout: LayoutOrientation) {
        self.layout = layout;
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Record the current graph as a new history entry.
    ///
    /// Stored snapshots carry no selection; `selected` flags are re-derived
    /// whenever a snapshot is installed.
    pub fn capture(&mut self) {
        let mut snapshot = self.snapshot();
        for node in &mut snapshot.nodes {
            node.selected = false;
        }
        self.history.capture(&snapshot);
    }

    /// Start a fresh timeline, bounded by `max_history`, whose only entry is
    /// the live graph. Ids and clipboard carry over.
    pub fn restart_history(&mut self, max_history: usize) {
        self.history = History::new(max_history);
        self.capture();
    }

    /// Install the previous history entry. Returns false at the start.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.install(snapshot);
                true
            }
            None => false,
        }
    }

    /// Install the next history entry. Returns false at the newest entry.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.install(snapshot);
                true
            }
            None => false,
        }
    }

    fn install(&mut self, snapshot: GraphSnapshot) {
        self.set_nodes(snapshot.nodes);
        self.set_edges(snapshot.edges);
    }

    // ─── Identifiers ─────────────────────────────────────────────────────

    pub fn next_node_id(&mut self) -> NodeId {
        let nodes = &self.nodes;
        self.ids.node_id(|id| nodes.iter().any(|n| n.id == id))
    }

    pub fn next_edge_id(&mut self) -> EdgeId {
        let edges = &self.edges;
        self.ids.edge_id(|id| edges.iter().any(|e| e.id == id))
    }

    // ─── Discrete actions (captured) ─────────────────────────────────────

    /// Place a new node of `node_type` at `position` with its default size.
    pub fn add_node(&mut self, node_type: NodeType, position: Position) -> NodeId {
        let id = self.next_node_id();
        let mut nodes = self.nodes.clone();
        nodes.push(Node::new(id, node_type, position));
        self.set_nodes(nodes);
        self.capture();
        log::debug!("store: added {node_type} {id} at ({}, {})", position.x, position.y);
        id
    }

    /// Connect `source` → `target`. Self loops and parallel edges are allowed.
    pub fn connect(&mut self, source: NodeId, target: NodeId, data: EdgeData) -> Option<EdgeId> {
        if self.node(source).is_none() || self.node(target).is_none() {
            return None;
        }
        let id = self.next_edge_id();
        let mut edges = self.edges.clone();
        edges.push(Edge::new(id, source, target, data));
        self.set_edges(edges);
        self.capture();
        log::debug!("store: connected {source} -> {target} as {id}");
        Some(id)
    }

    /// Remove `ids` and every edge touching them. Returns false (and
    /// captures nothing) when none of the ids exist.
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> bool {
        if !self.nodes.iter().any(|n| ids.contains(&n.id)) {
            return false;
        }
        let nodes = self
            .nodes
            .iter()
            .filter(|n| !ids.contains(&n.id))
            .cloned()
            .collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| !ids.iter().any(|id| e.touches(*id)))
            .cloned()
            .collect();
        self.set_nodes(nodes);
        self.set_edges(edges);
        self.capture();
        log::debug!("store: deleted {} node(s) with their edges", ids.len());
        true
    }

    /// Remove `ids`. Returns false (and captures nothing) when none exist.
    pub fn delete_edges(&mut self, ids: &[EdgeId]) -> bool {
        if !self.edges.iter().any(|e| ids.contains(&e.id)) {
            return false;
        }
        let edges = self
            .edges
            .iter()
            .filter(|e| !ids.contains(&e.id))
            .cloned()
            .collect();
        self.set_edges(edges);
        self.capture();
        log::debug!("store: deleted {} edge(s)", ids.len());
        true
    }

    /// Append a fresh copy of the clipboard shifted by `offset`.
    /// Returns the pasted subgraph, or `None` with an empty clipboard.
    pub fn paste(&mut self, offset: (f32, f32)) -> Option<GraphSnapshot> {
        let clip = self.clipboard.clone()?;
        let pasted = clipboard::instantiate(&clip, offset, self);

        let mut nodes = self.nodes.clone();
        nodes.extend(pasted.nodes.iter().cloned());
        let mut edges = self.edges.clone();
        edges.extend(pasted.edges.iter().cloned());
        self.set_nodes(nodes);
        self.set_edges(edges);
        self.capture();
        log::debug!(
            "store: pasted {} node(s), {} edge(s)",
            pasted.nodes.len(),
            pasted.edges.len()
        );
        Some(pasted)
    }

    /// Apply a popup style edit. Returns false when the target is gone.
    pub fn apply_style(&mut self, update: &StyleUpdate) -> bool {
        match update {
            StyleUpdate::Node { id, edit } => {
                let Some(pos) = self.nodes.iter().position(|n| n.id == *id) else {
                    return false;
                };
                let mut nodes = self.nodes.clone();
                edit.apply(&mut nodes[pos]);
                self.set_nodes(nodes);
            }
            StyleUpdate::Edge { id, edit } => {
                let Some(pos) = self.edges.iter().position(|e| e.id == *id) else {
                    return false;
                };
                let mut edges = self.edges.clone();
                edit.apply(&mut edges[pos].data);
                self.set_edges(edges);
            }
        }
        self.capture();
        true
    }

    /// Commit a node label. Returns false when the node is gone or the
    /// label is unchanged.
    pub fn set_label(&mut self, id: NodeId, label: &str) -> bool {
        let Some(pos) = self.nodes.iter().position(|n| n.id == id) else {
            return false;
        };
        if self.nodes[pos].label == label {
            return false;
        }
        let mut nodes = self.nodes.clone();
        nodes[pos].label = label.to_string();
        self.set_nodes(nodes);
        self.capture();
        true
    }

    // ─── Live feedback (not captured) ────────────────────────────────────

    /// Shift `ids` by `(dx, dy)` without recording history.
    pub fn move_nodes(&mut self, ids: &[NodeId], dx: f32, dy: f32) {
        let nodes = self
            .nodes
            .iter()
            .map(|n| {
                if ids.contains(&n.id) {
                    Node {
                        position: n.position.offset(dx, dy),
                        ..n.clone()
                    }
                } else {
                    n.clone()
                }
            })
            .collect();
        self.set_nodes(nodes);
    }

    fn sync_selected_flags(&mut self) {
        for node in &mut self.nodes {
            node.selected = self.selected_nodes.contains(&node.id);
        }
    }
}

impl IdSource for GraphStore {
    fn next_node_id(&mut self) -> NodeId {
        GraphStore::next_node_id(self)
    }

    fn next_edge_id(&mut self) -> EdgeId {
        GraphStore::next_edge_id(self)
    }
}
