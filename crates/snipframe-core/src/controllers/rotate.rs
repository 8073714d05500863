//! Rotation controller: a single circular handle above the element.

use crate::elements::ElementId;
use crate::stores::{DocumentStore, InteractionStore};
use kurbo::Point;

/// Degrees added so the handle's rest position (directly above the element)
/// reads as the element's current rotation.
pub const HANDLE_ANGLE_OFFSET: f64 = 90.0;

/// Absolute rotation for a pointer position around a center, in degrees.
///
/// Depends only on the current pointer and center, never on the previous
/// rotation value, so repeated samples are deterministic.
pub fn rotation_for_pointer(pointer: Point, center: Point) -> f64 {
    let angle = (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees();
    angle.round() + HANDLE_ANGLE_OFFSET
}

/// Stateful handler for rotation gestures.
#[derive(Default)]
pub struct RotationController {
    session: Option<ElementId>,
}

impl RotationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The element the active session is attached to.
    pub fn target(&self) -> Option<ElementId> {
        self.session
    }

    /// Begin rotating `element`. Same gating as the other controllers.
    pub fn pointer_down(
        &mut self,
        element: ElementId,
        document: &DocumentStore,
        interaction: &mut InteractionStore,
        read_only: bool,
    ) -> bool {
        if read_only {
            return false;
        }
        let Some(target) = document.state().element(element) else {
            return false;
        };
        if !target.common().is_interactive() {
            return false;
        }
        interaction.set_rotating(element, true);
        self.session = Some(element);
        true
    }

    /// Apply one pointer sample.
    ///
    /// `center` is the element's current on-screen bounding-box center as
    /// measured by the host layer, so the math stays correct under any
    /// ancestor transform. Rotation is unbounded; it is normalized only
    /// where display requires a bounded range.
    pub fn pointer_move(
        &mut self,
        pointer: Point,
        center: Point,
        document: &mut DocumentStore,
    ) -> bool {
        let Some(element) = self.session else {
            return false;
        };
        let rotation = rotation_for_pointer(pointer, center);
        if !rotation.is_finite() {
            return false;
        }
        if let Some(current) = document.state().element(element) {
            if (current.common().rotation - rotation).abs() < f64::EPSILON {
                return false;
            }
        }
        document.update_element(element, |element| {
            element.common_mut().rotation = rotation;
        })
    }

    /// End the session and clear the rotating flag.
    pub fn pointer_up(&mut self, interaction: &mut InteractionStore) -> Option<ElementId> {
        let element = self.session.take()?;
        interaction.set_rotating(element, false);
        Some(element)
    }
}
