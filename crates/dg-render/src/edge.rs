//! Edge presentation: connector geometry, dash pattern, arrow markers.
//!
//! Bezier edges bend their control points out along each handle's side,
//! half the gap when the target lies ahead of the handle, and a
//! square-root curve when it lies behind, so backward edges loop out
//! instead of cutting through their nodes.

use crate::node::{Handle, Side, source_point, target_point};
use dg_core::{Color, Edge, EdgeId, GraphSnapshot, LayoutOrientation, LineStyle, NodeId};
use kurbo::{BezPath, CubicBez, ParamCurve, Point};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const CURVATURE: f64 = 0.25;
/// Stroke dash pattern of dashed edges.
pub const DASH: [f32; 2] = [8.0, 4.0];
/// Width of the invisible stroke that catches clicks.
pub const HIT_WIDTH: f32 = 20.0;
/// Drop-shadow blur radius of a selected edge.
pub const GLOW_BLUR: f32 = 6.0;
/// Marker box size, in multiples of the stroke width.
pub const MARKER_SIZE: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePathKind {
    #[default]
    Bezier,
    /// Orthogonal segments with one bend pair.
    Step,
}

impl FromStr for EdgePathKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bezier" => Ok(Self::Bezier),
            "step" => Ok(Self::Step),
            other => Err(format!("unknown edge path kind: {other:?}")),
        }
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// How far a control point sits from its handle for a signed gap of
/// `distance` along the handle's outward direction.
pub fn control_offset(distance: f64, curvature: f64) -> f64 {
    if distance >= 0.0 {
        0.5 * distance
    } else {
        curvature * 25.0 * (-distance).sqrt()
    }
}

fn control_point(side: Side, p: Point, other: Point) -> Point {
    match side {
        Side::Left => Point::new(p.x - control_offset(p.x - other.x, CURVATURE), p.y),
        Side::Right => Point::new(p.x + control_offset(other.x - p.x, CURVATURE), p.y),
        Side::Top => Point::new(p.x, p.y - control_offset(p.y - other.y, CURVATURE)),
        Side::Bottom => Point::new(p.x, p.y + control_offset(other.y - p.y, CURVATURE)),
    }
}

fn point(h: Handle) -> Point {
    Point::new(h.x as f64, h.y as f64)
}

/// Cubic from `source` to `target`.
pub fn bezier(source: Handle, target: Handle) -> CubicBez {
    let (s, t) = (point(source), point(target));
    CubicBez::new(
        s,
        control_point(source.side, s, t),
        control_point(target.side, t, s),
        t,
    )
}

/// Orthogonal path from `source` to `target`, bending halfway.
pub fn step(source: Handle, target: Handle) -> BezPath {
    let (s, t) = (point(source), point(target));
    let mut path = BezPath::new();
    path.move_to(s);
    if matches!(source.side, Side::Left | Side::Right) {
        let mid_x = (s.x + t.x) / 2.0;
        path.line_to((mid_x, s.y));
        path.line_to((mid_x, t.y));
    } else {
        let mid_y = (s.y + t.y) / 2.0;
        path.line_to((s.x, mid_y));
        path.line_to((t.x, mid_y));
    }
    path.line_to(t);
    path
}

/// Path of `edge` plus its label anchor, or `None` if an endpoint is missing.
pub fn edge_geometry(
    edge: &Edge,
    graph: &GraphSnapshot,
    orientation: LayoutOrientation,
    kind: EdgePathKind,
) -> Option<(BezPath, Point)> {
    let source = source_point(graph.node(edge.source)?, orientation);
    let target = target_point(graph.node(edge.target)?, orientation);
    Some(match kind {
        EdgePathKind::Bezier => {
            let curve = bezier(source, target);
            let mut path = BezPath::new();
            path.move_to(curve.p0);
            path.curve_to(curve.p1, curve.p2, curve.p3);
            (path, curve.eval(0.5))
        }
        EdgePathKind::Step => (step(source, target), point(source).midpoint(point(target))),
    })
}

// ─── View ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerDirection {
    /// Points at the target.
    Forward,
    /// Points back at the source.
    Backward,
}

/// Filled triangular arrowhead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub direction: MarkerDirection,
    pub color: Color,
    pub size: f32,
    /// Triangle in marker units, as SVG polygon points.
    pub points: &'static str,
}

impl Marker {
    fn new(direction: MarkerDirection, color: Color) -> Self {
        let points = match direction {
            MarkerDirection::Forward => "0,0 0,6 9,3",
            MarkerDirection::Backward => "9,0 9,6 0,3",
        };
        Self {
            direction,
            color,
            size: MARKER_SIZE,
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Glow {
    pub color: Color,
    pub blur: f32,
}

/// Everything the host needs to draw one edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeView {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    /// SVG path data.
    pub path: String,
    pub label_x: f32,
    pub label_y: f32,
    pub stroke: Color,
    pub stroke_width: f32,
    pub dash: Option<[f32; 2]>,
    pub animated: bool,
    pub marker_start: Option<Marker>,
    pub marker_end: Option<Marker>,
    pub glow: Option<Glow>,
    pub selected: bool,
    pub hit_width: f32,
}

impl EdgeView {
    pub fn new(
        edge: &Edge,
        graph: &GraphSnapshot,
        orientation: LayoutOrientation,
        kind: EdgePathKind,
        selected: bool,
    ) -> Option<Self> {
        let (path, label) = edge_geometry(edge, graph, orientation, kind)?;
        let data = &edge.data;
        let color = data.stroke_color;

        Some(Self {
            id: edge.id,
            source: edge.source,
            target: edge.target,
            path: path.to_svg(),
            label_x: label.x as f32,
            label_y: label.y as f32,
            stroke: color,
            stroke_width: data.stroke_width,
            dash: (data.stroke_style == LineStyle::Dashed).then_some(DASH),
            animated: data.animated,
            marker_start: (data.show_arrow && data.bidirectional)
                .then(|| Marker::new(MarkerDirection::Backward, color)),
            marker_end: data
                .show_arrow
                .then(|| Marker::new(MarkerDirection::Forward, color)),
            glow: selected.then_some(Glow {
                color,
                blur: GLOW_BLUR,
            }),
            selected,
            hit_width: HIT_WIDTH,
        })
    }
}
