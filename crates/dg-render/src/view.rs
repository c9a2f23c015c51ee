//! Viewport helpers for the zoom buttons and fit-view.

use crate::node::node_bounds;
use dg_core::viewport::{MAX_ZOOM, MIN_ZOOM};
use dg_core::{Node, ScreenRect, Viewport};
use kurbo::Rect;

/// Zoom factor of one zoom-in/zoom-out step.
pub const ZOOM_STEP: f32 = 1.2;
/// Fraction of the canvas left empty around fitted content, per side.
pub const FIT_PADDING: f32 = 0.1;

/// Zoom by `factor` around the canvas centre, clamped to the zoom range.
pub fn zoom_by(viewport: Viewport, screen: ScreenRect, factor: f32) -> Viewport {
    let zoom = (viewport.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    let (cx, cy) = (screen.width / 2.0, screen.height / 2.0);
    let scale = zoom / viewport.zoom;
    Viewport::new(
        cx - (cx - viewport.x) * scale,
        cy - (cy - viewport.y) * scale,
        zoom,
    )
}

pub fn zoom_in(viewport: Viewport, screen: ScreenRect) -> Viewport {
    zoom_by(viewport, screen, ZOOM_STEP)
}

pub fn zoom_out(viewport: Viewport, screen: ScreenRect) -> Viewport {
    zoom_by(viewport, screen, 1.0 / ZOOM_STEP)
}

/// Union of every node's drawn bounds.
pub fn content_bounds(nodes: &[Node]) -> Option<Rect> {
    nodes
        .iter()
        .map(|n| node_bounds(n).to_rect())
        .reduce(|acc, r| acc.union(r))
}

/// Viewport that centres all nodes on the canvas with `padding` margin.
/// An empty diagram resets to the identity viewport.
pub fn fit_view(nodes: &[Node], screen: ScreenRect, padding: f32) -> Viewport {
    let Some(bounds) = content_bounds(nodes) else {
        return Viewport::default();
    };
    let scale = 1.0 + 2.0 * padding as f64;
    let width = (bounds.width() * scale).max(1.0);
    let height = (bounds.height() * scale).max(1.0);
    let zoom = (screen.width as f64 / width)
        .min(screen.height as f64 / height)
        .clamp(MIN_ZOOM as f64, MAX_ZOOM as f64);
    let center = bounds.center();
    Viewport::new(
        (screen.width as f64 / 2.0 - center.x * zoom) as f32,
        (screen.height as f64 / 2.0 - center.y * zoom) as f32,
        zoom as f32,
    )
}
