//! Drag controller: moves an element with the pointer.

use crate::elements::ElementId;
use crate::stores::{DocumentStore, InteractionStore};
use crate::transform::screen_to_canvas_delta;
use kurbo::{Point, Vec2};

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Screen-space distance the pointer must travel before a press becomes a
/// drag. Presses that stay below it are clicks (or double-clicks).
pub const DRAG_THRESHOLD: f64 = 5.0;

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Result of feeding a pointer move into an armed/active drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragUpdate {
    /// No active session, or still below the arming threshold.
    None,
    /// The threshold was just crossed; the session is now dragging.
    Started,
    /// The element position was updated.
    Moved,
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// No active session.
    None,
    /// The press never crossed the threshold: a plain click.
    Clicked(ElementId),
    /// Second below-threshold press within the double-click window.
    DoubleClicked(ElementId),
    /// An active drag ended.
    Ended(ElementId),
}

#[derive(Debug)]
struct DragSession {
    element: ElementId,
    dragging: bool,
    start_pointer: Point,
    last_pointer: Point,
    /// Unrounded accumulated canvas position; the store receives the rounded
    /// value so incremental deltas never drift.
    position: Point,
    /// This press was the second of a double-click pair.
    double: bool,
}

/// State machine per draggable element: idle -> armed -> dragging -> idle.
///
/// The session owns global move/up delivery for its lifetime: once armed,
/// every pointer sample is routed here regardless of what it lands on.
#[derive(Default)]
pub struct DragController {
    session: Option<DragSession>,
    last_press: Option<(Instant, Point)>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Arm a drag session on `element`. Refuses locked or hidden elements,
    /// missing ids, and read-only editors.
    pub fn pointer_down(
        &mut self,
        element: ElementId,
        position: Point,
        document: &DocumentStore,
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

        let double = match self.last_press.take() {
            Some((at, point))
                if at.elapsed().as_millis() < DOUBLE_CLICK_TIME_MS
                    && point.distance(position) < DOUBLE_CLICK_DISTANCE =>
            {
                true
            }
            _ => {
                self.last_press = Some((Instant::now(), position));
                false
            }
        };

        let common = target.common();
        self.session = Some(DragSession {
            element,
            dragging: false,
            start_pointer: position,
            last_pointer: position,
            position: Point::new(common.x, common.y),
            double,
        });
        log::debug!("drag armed on {element}");
        true
    }

    /// Feed a pointer move into the session.
    ///
    /// Deltas are incremental, relative to the previous sample, so the next
    /// delta is computed from wherever the pointer actually is.
    pub fn pointer_move(
        &mut self,
        position: Point,
        zoom: f64,
        document: &mut DocumentStore,
        interaction: &mut InteractionStore,
    ) -> DragUpdate {
        let Some(session) = self.session.as_mut() else {
            return DragUpdate::None;
        };

        let mut started = false;
        if !session.dragging {
            if session.start_pointer.distance(position) < DRAG_THRESHOLD {
                return DragUpdate::None;
            }
            session.dragging = true;
            started = true;
            interaction.set_dragging(session.element, true);
        }

        let screen_delta = Vec2::new(
            position.x - session.last_pointer.x,
            position.y - session.last_pointer.y,
        );
        session.last_pointer = position;
        session.position += screen_to_canvas_delta(screen_delta, zoom);

        let target = session.position;
        document.update_element(session.element, |element| {
            let common = element.common_mut();
            common.x = target.x.round();
            common.y = target.y.round();
        });

        if started {
            DragUpdate::Started
        } else {
            DragUpdate::Moved
        }
    }

    /// End the session on pointer release, anywhere on screen.
    ///
    /// All intermediate positions are already committed, so there is nothing
    /// to revert; the last applied geometry stands.
    pub fn pointer_up(&mut self, interaction: &mut InteractionStore) -> DragOutcome {
        let Some(session) = self.session.take() else {
            return DragOutcome::None;
        };

        if session.dragging {
            interaction.set_dragging(session.element, false);
            log::debug!("drag ended on {}", session.element);
            DragOutcome::Ended(session.element)
        } else if session.double {
            DragOutcome::DoubleClicked(session.element)
        } else {
            DragOutcome::Clicked(session.element)
        }
    }
}
