//! Viewport state: editor pan/zoom over the canvas frame.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 30.0;
/// Multiplier applied by one keyboard zoom step.
pub const ZOOM_STEP: f64 = 1.2;

/// Per-session view state over the canvas: zoom plus an unbounded pan offset.
///
/// Never persisted with the document; cached locally per document id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
    /// Current pan offset in screen pixels.
    pub scroll: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            scroll: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the zoom level, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Zoom in by one keyboard step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    /// Zoom out by one keyboard step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    /// Pan the viewport by a delta in screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.scroll += delta;
    }

    /// Zoom by `factor`, keeping the given screen point fixed.
    ///
    /// `container` is the on-screen size of the editor surface and `canvas`
    /// the document frame size; both are needed because the canvas is drawn
    /// centered in the container.
    pub fn zoom_at(&mut self, pivot: Point, factor: f64, container: Size, canvas: Size) {
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let transform = crate::transform::ViewTransform::new(container, canvas, *self);
        let canvas_point = transform.screen_to_canvas_point(pivot);

        self.zoom = new_zoom;

        // Adjust scroll so canvas_point stays under the pivot.
        let transform = crate::transform::ViewTransform::new(container, canvas, *self);
        let drifted = transform.canvas_to_screen_point(canvas_point);
        self.scroll += Vec2::new(pivot.x - drifted.x, pivot.y - drifted.y);
    }

    /// Reset zoom and pan to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
