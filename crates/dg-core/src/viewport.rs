//! Viewport transform between client (screen) space and canvas space.

use crate::model::Position;
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 4.0;

/// The canvas element's rectangle in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Pan offset and zoom of the canvas.
///
/// A canvas point `p` is drawn at `p * zoom + (x, y)` relative to the
/// canvas element's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(x: f32, y: f32, zoom: f32) -> Self {
        Self {
            x,
            y,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// Client coordinates → canvas coordinates.
    pub fn project(&self, screen: ScreenRect, client_x: f32, client_y: f32) -> Position {
        let local_x = client_x - screen.left;
        let local_y = client_y - screen.top;
        Position::new((local_x - self.x) / self.zoom, (local_y - self.y) / self.zoom)
    }

    /// Canvas coordinates → client coordinates.
    pub fn unproject(&self, screen: ScreenRect, p: Position) -> (f32, f32) {
        (
            p.x * self.zoom + self.x + screen.left,
            p.y * self.zoom + self.y + screen.top,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_project_subtracts_origin() {
        let vp = Viewport::default();
        let screen = ScreenRect::new(20.0, 10.0, 800.0, 600.0);
        assert_eq!(vp.project(screen, 120.0, 110.0), Position::new(100.0, 100.0));
    }

    #[test]
    fn project_inverts_unproject() {
        let vp = Viewport::new(35.0, -12.0, 2.0);
        let screen = ScreenRect::new(5.0, 5.0, 640.0, 480.0);
        let p = Position::new(42.0, 17.0);
        let (cx, cy) = vp.unproject(screen, p);
        assert_eq!(vp.project(screen, cx, cy), p);
    }

    #[test]
    fn zoom_is_clamped() {
        assert_eq!(Viewport::new(0.0, 0.0, 100.0).zoom, MAX_ZOOM);
        assert_eq!(Viewport::new(0.0, 0.0, 0.0).zoom, MIN_ZOOM);
    }
}
