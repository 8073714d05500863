//! Observable container for ephemeral, per-session UI state.

use super::{Listeners, SubscriptionId};
use crate::elements::ElementId;
use crate::viewport::Viewport;
use std::collections::HashMap;

/// What the inspector and indicator layer are focused on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    None,
    /// The document frame/background is selected.
    Canvas,
    /// A single element is selected.
    Element(ElementId),
}

impl Selection {
    pub fn element_id(&self) -> Option<ElementId> {
        match self {
            Selection::Element(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_canvas(&self) -> bool {
        matches!(self, Selection::Canvas)
    }
}

/// Per-element interaction flags.
///
/// Mutually exclusive in normal operation but kept as independent booleans
/// so a stale flag from an interrupted gesture cannot wedge another one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionFlags {
    pub hovering: bool,
    pub dragging: bool,
    pub resizing: bool,
    pub rotating: bool,
}

impl InteractionFlags {
    pub fn is_idle(&self) -> bool {
        !self.hovering && !self.dragging && !self.resizing && !self.rotating
    }
}

/// The full ephemeral state snapshot.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pub selection: Selection,
    pub flags: HashMap<ElementId, InteractionFlags>,
    pub viewport: Viewport,
    pub layers_panel_open: bool,
}

/// Store for interaction state. Recreated per editing session and never
/// persisted, except the viewport which is cached externally by document id.
pub struct InteractionStore {
    state: InteractionState,
    revision: u64,
    listeners: Listeners<InteractionState>,
}

impl Default for InteractionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionStore {
    pub fn new() -> Self {
        Self {
            state: InteractionState::default(),
            revision: 0,
            listeners: Listeners::new(),
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut InteractionState) -> R) -> R {
        let result = mutate(&mut self.state);
        self.revision += 1;
        self.listeners.notify(&self.state);
        result
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&InteractionState) + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn selection(&self) -> Selection {
        self.state.selection
    }

    /// Select an element, the canvas sentinel, or nothing.
    ///
    /// Selecting a hidden or locked element is permitted (for inspection);
    /// interaction handles are suppressed elsewhere.
    pub fn select(&mut self, selection: Selection) {
        if self.state.selection != selection {
            self.update(|state| state.selection = selection);
        }
    }

    /// Flags for an element (default flags when it has none yet).
    pub fn flags(&self, id: ElementId) -> InteractionFlags {
        self.state.flags.get(&id).copied().unwrap_or_default()
    }

    pub fn set_hovering(&mut self, id: ElementId, on: bool) {
        self.set_flag(id, on, |flags| &mut flags.hovering);
    }

    pub fn set_dragging(&mut self, id: ElementId, on: bool) {
        self.set_flag(id, on, |flags| &mut flags.dragging);
    }

    pub fn set_resizing(&mut self, id: ElementId, on: bool) {
        self.set_flag(id, on, |flags| &mut flags.resizing);
    }

    pub fn set_rotating(&mut self, id: ElementId, on: bool) {
        self.set_flag(id, on, |flags| &mut flags.rotating);
    }

    /// The element currently hovered, if any.
    pub fn hovered(&self) -> Option<ElementId> {
        self.state
            .flags
            .iter()
            .find(|(_, flags)| flags.hovering)
            .map(|(id, _)| *id)
    }

    /// Move hover to `id`, clearing it from the previous element.
    pub fn set_hovered(&mut self, id: Option<ElementId>) {
        let previous = self.hovered();
        if previous == id {
            return;
        }
        if let Some(old) = previous {
            self.set_hovering(old, false);
        }
        if let Some(new) = id {
            self.set_hovering(new, true);
        }
    }

    fn set_flag(
        &mut self,
        id: ElementId,
        on: bool,
        field: impl Fn(&mut InteractionFlags) -> &mut bool,
    ) {
        let mut flags = self.flags(id);
        if *field(&mut flags) == on {
            return;
        }
        *field(&mut flags) = on;
        self.update(|state| {
            if flags.is_idle() {
                state.flags.remove(&id);
            } else {
                state.flags.insert(id, flags);
            }
        });
    }

    /// Drop all state for a deleted element.
    pub fn remove(&mut self, id: ElementId) {
        let selected = self.state.selection == Selection::Element(id);
        let flagged = self.state.flags.contains_key(&id);
        if !selected && !flagged {
            return;
        }
        self.update(|state| {
            state.flags.remove(&id);
            if state.selection == Selection::Element(id) {
                state.selection = Selection::None;
            }
        });
    }

    pub fn viewport(&self) -> Viewport {
        self.state.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.state.viewport != viewport {
            self.update(|state| state.viewport = viewport);
        }
    }

    /// Mutate the viewport in place.
    pub fn with_viewport(&mut self, mutate: impl FnOnce(&mut Viewport)) {
        self.update(|state| mutate(&mut state.viewport));
    }

    pub fn set_layers_panel_open(&mut self, open: bool) {
        if self.state.layers_panel_open != open {
            self.update(|state| state.layers_panel_open = open);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_selection_forms() {
        let mut store = InteractionStore::new();
        assert_eq!(store.selection(), Selection::None);

        let id = Uuid::new_v4();
        store.select(Selection::Element(id));
        assert_eq!(store.selection().element_id(), Some(id));

        store.select(Selection::Canvas);
        assert!(store.selection().is_canvas());

        store.select(Selection::None);
        assert_eq!(store.selection(), Selection::None);
    }

    #[test]
    fn test_flags_default_and_cleanup() {
        let mut store = InteractionStore::new();
        let id = Uuid::new_v4();

        assert!(store.flags(id).is_idle());

        store.set_dragging(id, true);
        assert!(store.flags(id).dragging);
        assert!(store.state().flags.contains_key(&id));

        store.set_dragging(id, false);
        // Fully idle entries are dropped from the map.
        assert!(!store.state().flags.contains_key(&id));
    }

    #[test]
    fn test_redundant_flag_writes_do_not_notify() {
        let mut store = InteractionStore::new();
        let id = Uuid::new_v4();

        store.set_hovering(id, true);
        let revision = store.revision();
        store.set_hovering(id, true);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_hover_moves_between_elements() {
        let mut store = InteractionStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        store.set_hovered(Some(a));
        assert_eq!(store.hovered(), Some(a));

        store.set_hovered(Some(b));
        assert_eq!(store.hovered(), Some(b));
        assert!(!store.flags(a).hovering);

        store.set_hovered(None);
        assert_eq!(store.hovered(), None);
    }

    #[test]
    fn test_remove_clears_selection_and_flags() {
        let mut store = InteractionStore::new();
        let id = Uuid::new_v4();

        store.select(Selection::Element(id));
        store.set_resizing(id, true);
        store.remove(id);

        assert_eq!(store.selection(), Selection::None);
        assert!(store.flags(id).is_idle());
    }

    #[test]
    fn test_viewport_updates() {
        let mut store = InteractionStore::new();
        store.with_viewport(|viewport| viewport.set_zoom(2.0));
        assert!((store.viewport().zoom - 2.0).abs() < f64::EPSILON);
    }
}
