//! Interaction controllers: stateful drag/resize/rotate session handlers.
//!
//! Each controller owns at most one session at a time. A session begins on
//! `pointer_down` over a handle affordance and, for its lifetime, receives
//! every global `pointer_move`/`pointer_up` sample regardless of where it
//! lands; releasing the pointer anywhere ends the session cleanly. All
//! intermediate geometry is committed to the document store as it happens,
//! so an interrupted gesture simply leaves the last applied state final.

mod drag;
mod resize;
mod rotate;

pub use drag::{DragController, DragOutcome, DragUpdate, DRAG_THRESHOLD};
pub use resize::{ResizeController, ResizeHandle, ResizeTarget};
pub use rotate::{rotation_for_pointer, RotationController, HANDLE_ANGLE_OFFSET};
