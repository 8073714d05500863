//! Pure mappings between canvas, viewport and screen coordinate spaces.
//!
//! Three spaces are involved: canvas space (element geometry, origin at the
//! top-left of the document frame), viewport space (canvas space scaled by
//! zoom and translated by the pan offset, centered in the editor surface)
//! and screen space (raw pointer-event coordinates). Drag, resize, rotate
//! and the static indicator layer all go through these same functions.

use crate::elements::ElementCommon;
use crate::viewport::Viewport;
use kurbo::{Point, Size, Vec2};

/// Snapshot of everything needed to map between spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// On-screen size of the editor surface containing the canvas.
    pub container: Size,
    /// Document frame size in canvas units.
    pub canvas: Size,
    pub zoom: f64,
    pub scroll: Vec2,
}

impl ViewTransform {
    pub fn new(container: Size, canvas: Size, viewport: Viewport) -> Self {
        Self {
            container,
            canvas,
            zoom: viewport.zoom,
            scroll: viewport.scroll,
        }
    }

    /// Screen position of the canvas frame's top-left corner.
    ///
    /// The canvas is drawn centered in the container, shifted by the pan
    /// offset: `containerCenter + scroll - (canvasSize / 2) * zoom`.
    pub fn frame_origin(&self) -> Point {
        Point::new(
            self.container.width / 2.0 + self.scroll.x - self.canvas.width / 2.0 * self.zoom,
            self.container.height / 2.0 + self.scroll.y - self.canvas.height / 2.0 * self.zoom,
        )
    }

    /// Screen position of a canvas-space point.
    pub fn canvas_to_screen_point(&self, point: Point) -> Point {
        let origin = self.frame_origin();
        Point::new(
            origin.x + point.x * self.zoom,
            origin.y + point.y * self.zoom,
        )
    }

    /// Canvas-space position of a screen point (inverse of the above).
    pub fn screen_to_canvas_point(&self, point: Point) -> Point {
        let origin = self.frame_origin();
        Point::new(
            (point.x - origin.x) / self.zoom,
            (point.y - origin.y) / self.zoom,
        )
    }

    /// Screen position of an element's top-left corner.
    ///
    /// Rotation is applied about the element's own center by the renderer
    /// and never affects this offset.
    pub fn element_origin(&self, common: &ElementCommon) -> Point {
        self.canvas_to_screen_point(Point::new(common.x, common.y))
    }

    /// On-screen size of an element's scaled box.
    pub fn element_size(&self, common: &ElementCommon) -> Size {
        Size::new(
            common.scaled_width() * self.zoom,
            common.scaled_height() * self.zoom,
        )
    }

    /// Screen position of an element's center (used by the rotation handle
    /// when no layout measurement is available).
    pub fn element_center(&self, common: &ElementCommon) -> Point {
        let origin = self.element_origin(common);
        let size = self.element_size(common);
        Point::new(origin.x + size.width / 2.0, origin.y + size.height / 2.0)
    }

    /// Convert a screen-space delta to canvas space.
    ///
    /// Translation cancels out because both pointer samples share the same
    /// screen space, so only the zoom scale applies.
    pub fn screen_to_canvas_delta(&self, delta: Vec2) -> Vec2 {
        screen_to_canvas_delta(delta, self.zoom)
    }

    /// Convert a canvas-space delta to screen space.
    pub fn canvas_to_screen_delta(&self, delta: Vec2) -> Vec2 {
        Vec2::new(delta.x * self.zoom, delta.y * self.zoom)
    }
}

/// Standalone form of the delta mapping, for callers that only track zoom.
pub fn screen_to_canvas_delta(delta: Vec2, zoom: f64) -> Vec2 {
    Vec2::new(delta.x / zoom, delta.y / zoom)
}
