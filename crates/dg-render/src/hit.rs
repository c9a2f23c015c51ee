//! Hit testing: canvas point → node or edge.
//!
//! Nodes are tested front-to-back (last painted is topmost) and win over
//! edges, which are drawn underneath. An edge is hit when the point lies
//! within half its invisible hit stroke of the path.

use crate::edge::{EdgePathKind, HIT_WIDTH, edge_geometry};
use crate::node;
use dg_core::{EdgeId, GraphSnapshot, LayoutOrientation, Node, NodeId};
use kurbo::{ParamCurveNearest, Point, Rect};

const ACCURACY: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Node(NodeId),
    Edge(EdgeId),
}

/// Topmost node whose outline contains `(px, py)`.
pub fn hit_node(nodes: &[Node], px: f32, py: f32) -> Option<NodeId> {
    let p = Point::new(px as f64, py as f64);
    nodes
        .iter()
        .rev()
        .find(|n| node::contains(n, p))
        .map(|n| n.id)
}

/// Nearest edge within `tolerance` of `(px, py)`.
pub fn hit_edge(
    graph: &GraphSnapshot,
    orientation: LayoutOrientation,
    kind: EdgePathKind,
    px: f32,
    py: f32,
    tolerance: f32,
) -> Option<EdgeId> {
    let p = Point::new(px as f64, py as f64);
    let limit = (tolerance as f64).powi(2);
    graph
        .edges
        .iter()
        .filter_map(|edge| {
            let (path, _) = edge_geometry(edge, graph, orientation, kind)?;
            let distance_sq = path
                .segments()
                .map(|seg| seg.nearest(p, ACCURACY).distance_sq)
                .fold(f64::INFINITY, f64::min);
            (distance_sq <= limit).then_some((edge.id, distance_sq))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Node first, then edge, using the default hit stroke.
pub fn hit_test(
    graph: &GraphSnapshot,
    orientation: LayoutOrientation,
    kind: EdgePathKind,
    px: f32,
    py: f32,
) -> Option<Hit> {
    if let Some(id) = hit_node(&graph.nodes, px, py) {
        return Some(Hit::Node(id));
    }
    hit_edge(graph, orientation, kind, px, py, HIT_WIDTH / 2.0).map(Hit::Edge)
}

/// Nodes whose bounds intersect the marquee spanned by two corners,
/// given in any order.
pub fn hit_rect(nodes: &[Node], x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<NodeId> {
    let rect = Rect::new(x0 as f64, y0 as f64, x1 as f64, y1 as f64).abs();
    nodes
        .iter()
        .filter(|n| {
            let bounds = node::node_bounds(n).to_rect();
            bounds.intersect(rect).area() > 0.0
        })
        .map(|n| n.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::{Edge, EdgeData, NodeType, Position};

    fn graph() -> GraphSnapshot {
        let a = Node::new(NodeId::intern("ht-a"), NodeType::Rectangle, Position::new(0.0, 0.0));
        // Overlaps the right half of `a`.
        let b = Node::new(NodeId::intern("ht-b"), NodeType::Rectangle, Position::new(50.0, 0.0));
        let c = Node::new(NodeId::intern("ht-c"), NodeType::Circle, Position::new(300.0, 0.0));
        let e = Edge::new(EdgeId::intern("ht-bc"), b.id, c.id, EdgeData::default());
        GraphSnapshot::new(vec![a, b, c], vec![e])
    }

    #[test]
    fn topmost_node_wins() {
        let g = graph();
        assert_eq!(hit_node(&g.nodes, 70.0, 30.0), Some(NodeId::intern("ht-b")));
        assert_eq!(hit_node(&g.nodes, 20.0, 30.0), Some(NodeId::intern("ht-a")));
        assert_eq!(hit_node(&g.nodes, 500.0, 500.0), None);
    }

    #[test]
    fn edge_hit_within_tolerance() {
        let g = graph();
        // b's source handle is (140, 30), c's target handle is (300, 40);
        // the curve passes near the midpoint.
        let hit = hit_test(&g, LayoutOrientation::Horizontal, EdgePathKind::Bezier, 220.0, 38.0);
        assert_eq!(hit, Some(Hit::Edge(EdgeId::intern("ht-bc"))));

        let miss = hit_test(&g, LayoutOrientation::Horizontal, EdgePathKind::Bezier, 220.0, 90.0);
        assert_eq!(miss, None);
    }

    #[test]
    fn node_beats_edge() {
        let g = graph();
        let hit = hit_test(&g, LayoutOrientation::Horizontal, EdgePathKind::Step, 139.0, 30.0);
        assert_eq!(hit, Some(Hit::Node(NodeId::intern("ht-b"))));
    }

    #[test]
    fn marquee_selects_intersecting() {
        let g = graph();
        let ids = hit_rect(&g.nodes, 100.0, 0.0, 320.0, 10.0);
        assert_eq!(ids, vec![NodeId::intern("ht-b"), NodeId::intern("ht-c")]);
        // Dragged up and to the left.
        assert_eq!(hit_rect(&g.nodes, 320.0, 10.0, 100.0, 0.0), ids);
        assert!(hit_rect(&g.nodes, 600.0, 600.0, 700.0, 700.0).is_empty());
    }
}
