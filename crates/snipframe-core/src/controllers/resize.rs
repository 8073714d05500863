//! Resize controller: eight handles, minimum-size floors, aspect linking.

use crate::document::CANVAS_MIN_SIZE;
use crate::elements::ElementId;
use crate::stores::{DocumentStore, InteractionStore};
use kurbo::Point;

/// The eight resize affordances around a selected element or the canvas
/// frame. Edge handles change one dimension, corner handles change two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub fn moves_left_edge(&self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    pub fn moves_right_edge(&self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    pub fn moves_top_edge(&self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    pub fn moves_bottom_edge(&self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    pub fn affects_horizontal(&self) -> bool {
        self.moves_left_edge() || self.moves_right_edge()
    }

    pub fn affects_vertical(&self) -> bool {
        self.moves_top_edge() || self.moves_bottom_edge()
    }

    pub fn is_corner(&self) -> bool {
        self.affects_horizontal() && self.affects_vertical()
    }
}

/// What a resize session is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeTarget {
    Element(ElementId),
    /// The document frame itself; grows symmetrically from its center.
    Canvas,
}

#[derive(Debug)]
struct ResizeSession {
    target: ResizeTarget,
    handle: ResizeHandle,
    /// Virtual reference sample in screen space. Advanced by exactly the
    /// applied pointer delta each step, so a clamped axis pins it at the
    /// position that produces the floor and motion back past that point
    /// resumes resizing with no catch-up.
    anchor: Point,
    /// Aspect ratio captured at session start, used for linked resizes.
    start_ratio: f64,
}

/// One step's computed geometry, in unscaled units plus applied pointer
/// deltas in canvas units.
struct ResizeStep {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    applied_dx: f64,
    applied_dy: f64,
    resized_w: bool,
    resized_h: bool,
}

/// Stateful handler for resize gestures, one session at a time.
#[derive(Default)]
pub struct ResizeController {
    session: Option<ResizeSession>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Begin a resize session. Element targets must exist and be
    /// interactive; read-only editors never arm.
    pub fn pointer_down(
        &mut self,
        target: ResizeTarget,
        handle: ResizeHandle,
        position: Point,
        document: &DocumentStore,
        interaction: &mut InteractionStore,
        read_only: bool,
    ) -> bool {
        if read_only {
            return false;
        }
        let start_ratio = match target {
            ResizeTarget::Element(id) => {
                let Some(element) = document.state().element(id) else {
                    return false;
                };
                if !element.common().is_interactive() {
                    return false;
                }
                interaction.set_resizing(id, true);
                element.common().aspect_ratio()
            }
            ResizeTarget::Canvas => document.state().width / document.state().height,
        };

        self.session = Some(ResizeSession {
            target,
            handle,
            anchor: position,
            start_ratio,
        });
        true
    }

    /// Apply one pointer sample. Returns true when geometry changed.
    pub fn pointer_move(
        &mut self,
        position: Point,
        zoom: f64,
        document: &mut DocumentStore,
    ) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let dx = (position.x - session.anchor.x) / zoom;
        let dy = (position.y - session.anchor.y) / zoom;
        if !dx.is_finite() || !dy.is_finite() {
            return false;
        }

        let step = match session.target {
            ResizeTarget::Element(id) => {
                let Some(element) = document.state().element(id) else {
                    // Deleted mid-gesture: no-op, keep draining events.
                    return false;
                };
                let common = element.common();
                let step = element_step(
                    common.x,
                    common.y,
                    common.width,
                    common.height,
                    common.scale,
                    element.min_width(),
                    element.min_height(),
                    common.width_height_linked,
                    session.handle,
                    session.start_ratio,
                    dx,
                    dy,
                );
                let linked = common.width_height_linked;
                if let Some(step) = &step {
                    apply_element_step(document, id, step, linked);
                }
                step
            }
            ResizeTarget::Canvas => {
                let doc = document.state();
                let step = canvas_step(
                    doc.width,
                    doc.height,
                    doc.width_height_linked,
                    session.handle,
                    session.start_ratio,
                    dx,
                    dy,
                );
                if let Some(step) = &step {
                    let (width, height) = (step.width, step.height);
                    document.update(|doc| {
                        doc.width = width;
                        doc.height = height;
                    });
                }
                step
            }
        };

        match step {
            Some(step) => {
                session.anchor.x += step.applied_dx * zoom;
                session.anchor.y += step.applied_dy * zoom;
                step.resized_w || step.resized_h
            }
            None => {
                // Rejected linked step: geometry and the affected-axis
                // anchors stay put; unaffected axes still track the pointer.
                if !session.handle.affects_horizontal() {
                    session.anchor.x += dx * zoom;
                }
                if !session.handle.affects_vertical() {
                    session.anchor.y += dy * zoom;
                }
                false
            }
        }
    }

    /// End the session and clear the resizing flag.
    pub fn pointer_up(&mut self, interaction: &mut InteractionStore) -> Option<ResizeTarget> {
        let session = self.session.take()?;
        if let ResizeTarget::Element(id) = session.target {
            interaction.set_resizing(id, false);
        }
        Some(session.target)
    }
}

fn apply_element_step(document: &mut DocumentStore, id: ElementId, step: &ResizeStep, linked: bool) {
    if !step.resized_w && !step.resized_h {
        return;
    }
    document.update_element(id, |element| {
        let common = element.common_mut();
        common.x = step.x;
        common.y = step.y;
        common.width = step.width;
        common.height = step.height;
        // A manual drag on an axis takes that axis out of auto sizing;
        // linked resizes affect both axes, so both flags drop.
        if step.resized_w || linked {
            common.auto_width = false;
        }
        if step.resized_h || linked {
            common.auto_height = false;
        }
    });
}

/// Compute one resize step for an element.
///
/// Works on the scaled box (`width * scale`), then stores back unscaled
/// values, so the dragged edge moves exactly the pointer's canvas delta.
/// Returns None when a linked step would violate the floor on either axis.
#[allow(clippy::too_many_arguments)]
fn element_step(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    scale: f64,
    min_width: f64,
    min_height: f64,
    linked: bool,
    handle: ResizeHandle,
    start_ratio: f64,
    dx: f64,
    dy: f64,
) -> Option<ResizeStep> {
    let sw = width * scale;
    let sh = height * scale;

    // Scaled-size candidates from the dragged edges. By the
    // `start - current` convention a leftward drag on a left-side handle
    // yields a positive growth.
    let cand_sw = if handle.moves_left_edge() {
        sw - dx
    } else if handle.moves_right_edge() {
        sw + dx
    } else {
        sw
    };
    let cand_sh = if handle.moves_top_edge() {
        sh - dy
    } else if handle.moves_bottom_edge() {
        sh + dy
    } else {
        sh
    };

    if linked {
        return element_step_linked(
            x, y, sw, sh, scale, min_width, min_height, handle, start_ratio, cand_sw, cand_sh, dx,
            dy,
        );
    }

    let min_sw = min_width * scale;
    let min_sh = min_height * scale;
    let new_sw = cand_sw.max(min_sw);
    let new_sh = cand_sh.max(min_sh);

    // Position compensation only for the edges whose opposite edge must
    // stay fixed; dragging the far edge leaves the position alone.
    let new_x = if handle.moves_left_edge() {
        x + (sw - new_sw)
    } else {
        x
    };
    let new_y = if handle.moves_top_edge() {
        y + (sh - new_sh)
    } else {
        y
    };

    let applied_dx = if handle.moves_left_edge() {
        sw - new_sw
    } else if handle.moves_right_edge() {
        new_sw - sw
    } else {
        dx
    };
    let applied_dy = if handle.moves_top_edge() {
        sh - new_sh
    } else if handle.moves_bottom_edge() {
        new_sh - sh
    } else {
        dy
    };

    Some(ResizeStep {
        x: new_x,
        y: new_y,
        width: new_sw / scale,
        height: new_sh / scale,
        applied_dx,
        applied_dy,
        resized_w: (new_sw - sw).abs() > f64::EPSILON,
        resized_h: (new_sh - sh).abs() > f64::EPSILON,
    })
}

#[allow(clippy::too_many_arguments)]
fn element_step_linked(
    x: f64,
    y: f64,
    sw: f64,
    sh: f64,
    scale: f64,
    min_width: f64,
    min_height: f64,
    handle: ResizeHandle,
    start_ratio: f64,
    cand_sw: f64,
    cand_sh: f64,
    dx: f64,
    dy: f64,
) -> Option<ResizeStep> {
    let (new_width, new_height) = if handle.is_corner() {
        // The faster-growing axis drives; the other follows the ratio.
        let driven = (cand_sw / scale).max(cand_sh / scale * start_ratio);
        (driven, driven / start_ratio)
    } else if handle.affects_horizontal() {
        let new_width = cand_sw / scale;
        (new_width, new_width / start_ratio)
    } else {
        let new_height = cand_sh / scale;
        (new_height * start_ratio, new_height)
    };

    // Linked resizes cannot clamp one axis without breaking the ratio, so
    // a floor violation on either axis rejects the whole step.
    if new_width < min_width || new_height < min_height {
        return None;
    }

    let new_sw = new_width * scale;
    let new_sh = new_height * scale;

    // Dragged edges stay anchored to their opposite edge; an axis with no
    // dragged edge (edge handle, linked) centers its change instead.
    let new_x = if handle.moves_left_edge() {
        x + (sw - new_sw)
    } else if handle.affects_horizontal() {
        x
    } else {
        x + (sw - new_sw) / 2.0
    };
    let new_y = if handle.moves_top_edge() {
        y + (sh - new_sh)
    } else if handle.affects_vertical() {
        y
    } else {
        y + (sh - new_sh) / 2.0
    };

    let applied_dx = if handle.moves_left_edge() {
        sw - new_sw
    } else if handle.moves_right_edge() {
        new_sw - sw
    } else {
        dx
    };
    let applied_dy = if handle.moves_top_edge() {
        sh - new_sh
    } else if handle.moves_bottom_edge() {
        new_sh - sh
    } else {
        dy
    };

    Some(ResizeStep {
        x: new_x,
        y: new_y,
        width: new_width,
        height: new_height,
        applied_dx,
        applied_dy,
        resized_w: (new_sw - sw).abs() > f64::EPSILON,
        resized_h: (new_sh - sh).abs() > f64::EPSILON,
    })
}

/// Compute one resize step for the canvas frame.
///
/// The frame has no position; corner handles always use the center-anchored
/// variant, growing both sides symmetrically.
fn canvas_step(
    width: f64,
    height: f64,
    linked: bool,
    handle: ResizeHandle,
    start_ratio: f64,
    dx: f64,
    dy: f64,
) -> Option<ResizeStep> {
    let growth_x = if handle.moves_left_edge() {
        -dx
    } else if handle.moves_right_edge() {
        dx
    } else {
        0.0
    };
    let growth_y = if handle.moves_top_edge() {
        -dy
    } else if handle.moves_bottom_edge() {
        dy
    } else {
        0.0
    };

    let side_factor = if handle.is_corner() { 2.0 } else { 1.0 };
    let cand_w = width + growth_x * side_factor;
    let cand_h = height + growth_y * side_factor;

    let (new_w, new_h) = if linked {
        let driven = if handle.is_corner() {
            cand_w.max(cand_h * start_ratio)
        } else if handle.affects_horizontal() {
            cand_w
        } else {
            cand_h * start_ratio
        };
        let (w, h) = (driven, driven / start_ratio);
        if w < CANVAS_MIN_SIZE || h < CANVAS_MIN_SIZE {
            return None;
        }
        (w, h)
    } else {
        (cand_w.max(CANVAS_MIN_SIZE), cand_h.max(CANVAS_MIN_SIZE))
    };

    let applied_growth_x = (new_w - width) / side_factor;
    let applied_growth_y = (new_h - height) / side_factor;
    let applied_dx = if handle.affects_horizontal() {
        if handle.moves_left_edge() {
            -applied_growth_x
        } else {
            applied_growth_x
        }
    } else {
        dx
    };
    let applied_dy = if handle.affects_vertical() {
        if handle.moves_top_edge() {
            -applied_growth_y
        } else {
            applied_growth_y
        }
    } else {
        dy
    };

    Some(ResizeStep {
        x: 0.0,
        y: 0.0,
        width: new_w,
        height: new_h,
        applied_dx,
        applied_dy,
        resized_w: (new_w - width).abs() > f64::EPSILON,
        resized_h: (new_h - height).abs() > f64::EPSILON,
    })
}
