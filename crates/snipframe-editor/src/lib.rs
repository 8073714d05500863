//! Snipframe editor shell.
//!
//! Wires the snipframe-core engine into a host UI: pointer/keyboard
//! routing, the element factory seam, debounced persistence and the
//! per-document viewport cache.

pub mod commands;
pub mod editor;
pub mod factory;

pub use commands::{map_key, EditorCommand, Modifiers, Shortcut, ShortcutRegistry};
pub use editor::{CenterProvider, Editor, EditorEvent, PointerTarget};
pub use factory::{DefaultElementFactory, ElementFactory};
