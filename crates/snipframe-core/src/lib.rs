//! Snipframe Core Library
//!
//! Geometry and interaction-state engine for the Snipframe snippet editor:
//! the coordinate-space algebra, the drag/resize/rotate controllers, the
//! document/interaction store split and the persistence seam. Rendering,
//! transport and UI chrome live with the host.

pub mod autosize;
pub mod background;
pub mod controllers;
pub mod document;
pub mod elements;
pub mod storage;
pub mod stores;
pub mod transform;
pub mod viewport;

pub use background::{Background, BackgroundColor, ImageFill, SerializableColor};
pub use controllers::{
    DragController, DragOutcome, DragUpdate, ResizeController, ResizeHandle, ResizeTarget,
    RotationController,
};
pub use document::{Alignment, Axis, SnippetDocument};
pub use elements::{Element, ElementCommon, ElementId, ElementKind};
pub use stores::{DocumentStore, InteractionStore, Selection, SubscriptionId};
pub use transform::ViewTransform;
pub use viewport::Viewport;
