//! Copy/paste of selected subgraphs.
//!
//! Copy extracts the selected nodes plus only those edges whose *both*
//! endpoints are selected. Paste clones the clipboard with fresh ids,
//! offsets every node, and rewires edges through the old→new id map built
//! during the same paste, so internal connectivity is kept and pasted
//! edges never point at the originals.

use dg_core::{Edge, EdgeId, GraphSnapshot, Node, NodeId};
use std::collections::HashMap;

/// Extract the subgraph induced by `selected` from `graph`.
///
/// Nodes keep selection order. Returns `None` when no selected id names a
/// node in the graph.
pub fn extract_subgraph(graph: &GraphSnapshot, selected: &[NodeId]) -> Option<GraphSnapshot> {
    let nodes: Vec<Node> = selected
        .iter()
        .filter_map(|id| graph.node(*id))
        .cloned()
        .collect();
    if nodes.is_empty() {
        return None;
    }

    let edges = graph
        .edges
        .iter()
        .filter(|e| selected.contains(&e.source) && selected.contains(&e.target))
        .cloned()
        .collect();

    Some(GraphSnapshot::new(nodes, edges))
}

/// Supplier of fresh identifiers for pasted entities.
pub trait IdSource {
    fn next_node_id(&mut self) -> NodeId;
    fn next_edge_id(&mut self) -> EdgeId;
}

/// Clone `clip` with fresh ids, nodes shifted by `offset` and unselected.
pub fn instantiate(
    clip: &GraphSnapshot,
    offset: (f32, f32),
    ids: &mut impl IdSource,
) -> GraphSnapshot {
    let mut id_map: HashMap<NodeId, NodeId> = HashMap::with_capacity(clip.nodes.len());

    let nodes = clip
        .nodes
        .iter()
        .map(|node| {
            let id = ids.next_node_id();
            id_map.insert(node.id, id);
            Node {
                id,
                position: node.position.offset(offset.0, offset.1),
                selected: false,
                ..node.clone()
            }
        })
        .collect();

    let edges = clip
        .edges
        .iter()
        .filter_map(|edge| {
            let source = *id_map.get(&edge.source)?;
            let target = *id_map.get(&edge.target)?;
            Some(Edge::new(ids.next_edge_id(), source, target, edge.data.clone()))
        })
        .collect();

    GraphSnapshot::new(nodes, edges)
}
