//! Whole-diagram presentation.

use crate::edge::{EdgePathKind, EdgeView};
use crate::node::NodeView;
use dg_core::{EdgeId, GraphSnapshot, LayoutOrientation};
use serde::Serialize;

/// Draw list for one frame: edges first, then nodes in collection order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Scene {
    pub edges: Vec<EdgeView>,
    pub nodes: Vec<NodeView>,
}

pub fn build_scene(
    graph: &GraphSnapshot,
    selected_edges: &[EdgeId],
    orientation: LayoutOrientation,
    kind: EdgePathKind,
) -> Scene {
    let edges = graph
        .edges
        .iter()
        .filter_map(|edge| {
            let view = EdgeView::new(
                edge,
                graph,
                orientation,
                kind,
                selected_edges.contains(&edge.id),
            );
            if view.is_none() {
                log::warn!("scene: skipping edge {} with a missing endpoint", edge.id);
            }
            view
        })
        .collect();
    let nodes = graph
        .nodes
        .iter()
        .map(|node| NodeView::new(node, orientation))
        .collect();
    Scene { edges, nodes }
}
