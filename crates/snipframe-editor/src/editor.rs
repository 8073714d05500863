//! The top-level editor orchestrator.
//!
//! Owns the two stores and the three interaction controllers, routes
//! pointer and keyboard input into them, and wires the debounced saver and
//! the viewport cache. The host UI is responsible for hit-testing handle
//! affordances; once a session starts, every global pointer sample is fed
//! here regardless of what it lands on.

use crate::commands::{map_key, EditorCommand, Modifiers};
use crate::factory::{DefaultElementFactory, ElementFactory};
use kurbo::{Point, Size};
use snipframe_core::autosize;
use snipframe_core::controllers::{
    DragController, DragOutcome, ResizeController, ResizeHandle, ResizeTarget, RotationController,
};
use snipframe_core::storage::{DebouncedSaver, Storage, ViewportCache};
use snipframe_core::stores::{DocumentStore, InteractionStore, Selection};
use snipframe_core::{Element, ElementId, ElementKind, SnippetDocument, ViewTransform};
use std::sync::Arc;

/// What a pointer press landed on, as hit-tested by the host layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The body of an element (drag affordance).
    Element(ElementId),
    /// One of the eight resize handles on an element or the canvas frame.
    ResizeHandle(ResizeTarget, ResizeHandle),
    /// The rotation knob above an element.
    RotationHandle(ElementId),
    /// The canvas background.
    Canvas,
}

/// Events the editor reports back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// A double-click on an element body: enter inline text editing.
    TextEditRequested(ElementId),
}

/// Callback measuring an element's on-screen bounding-box center, so
/// rotation stays correct under ancestor transforms the engine cannot see.
pub type CenterProvider = Box<dyn Fn(ElementId) -> Option<Point>>;

/// The editor: stores, controllers and persistence wiring for one document.
pub struct Editor<S: Storage> {
    document: DocumentStore,
    interaction: InteractionStore,
    drag: DragController,
    resize: ResizeController,
    rotation: RotationController,
    saver: DebouncedSaver<S>,
    viewport_cache: ViewportCache,
    factory: Box<dyn ElementFactory>,
    center_provider: Option<CenterProvider>,
    container: Size,
    read_only: bool,
}

impl<S: Storage> Editor<S> {
    pub fn new(document_id: impl Into<String>, document: SnippetDocument, storage: Arc<S>) -> Self {
        Self {
            document: DocumentStore::new(document),
            interaction: InteractionStore::new(),
            drag: DragController::new(),
            resize: ResizeController::new(),
            rotation: RotationController::new(),
            saver: DebouncedSaver::new(storage, document_id),
            viewport_cache: ViewportCache::in_memory(),
            factory: Box::new(DefaultElementFactory),
            center_provider: None,
            container: Size::new(1280.0, 800.0),
            read_only: false,
        }
    }

    /// Attach a viewport cache and restore this document's cached view.
    pub fn with_viewport_cache(mut self, cache: ViewportCache) -> Self {
        self.viewport_cache = cache;
        if let Some(viewport) = self.viewport_cache.get(self.saver.document_id()) {
            self.interaction.set_viewport(viewport);
        }
        self
    }

    /// Replace the element factory collaborator.
    pub fn with_factory(mut self, factory: Box<dyn ElementFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Put the editor into read-only mode: no session ever arms and no
    /// keyboard command applies.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// The host reports its on-screen surface size here on layout changes.
    pub fn set_container_size(&mut self, container: Size) {
        self.container = container;
    }

    /// Install the layout-measurement callback for rotation centers.
    pub fn set_center_provider(&mut self, provider: CenterProvider) {
        self.center_provider = Some(provider);
    }

    pub fn document(&self) -> &DocumentStore {
        &self.document
    }

    pub fn interaction(&self) -> &InteractionStore {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut InteractionStore {
        &mut self.interaction
    }

    /// Apply an inspector-style edit to the document, tracking it for the
    /// debounced save like any gesture mutation.
    pub fn update_document<R>(&mut self, mutate: impl FnOnce(&mut SnippetDocument) -> R) -> R {
        let result = self.document.update(mutate);
        self.saver.mark_dirty();
        result
    }

    /// Current mapping between canvas and screen space.
    pub fn view_transform(&self) -> ViewTransform {
        let document = self.document.state();
        ViewTransform::new(
            self.container,
            Size::new(document.width, document.height),
            self.interaction.viewport(),
        )
    }

    /// Route a pointer press that the host hit-tested to `target`.
    pub fn pointer_down(&mut self, target: PointerTarget, position: Point) {
        match target {
            PointerTarget::Element(id) => {
                // Selection is permitted even for locked/hidden elements;
                // the controller refuses to arm on them.
                self.interaction.select(Selection::Element(id));
                self.drag
                    .pointer_down(id, position, &self.document, self.read_only);
            }
            PointerTarget::ResizeHandle(target, handle) => {
                match target {
                    ResizeTarget::Element(id) => self.interaction.select(Selection::Element(id)),
                    ResizeTarget::Canvas => self.interaction.select(Selection::Canvas),
                }
                self.resize.pointer_down(
                    target,
                    handle,
                    position,
                    &self.document,
                    &mut self.interaction,
                    self.read_only,
                );
            }
            PointerTarget::RotationHandle(id) => {
                self.interaction.select(Selection::Element(id));
                self.rotation
                    .pointer_down(id, &self.document, &mut self.interaction, self.read_only);
            }
            PointerTarget::Canvas => {
                self.interaction.select(Selection::Canvas);
            }
        }
    }

    /// Hover feedback from the host's hit testing. Suppressed for elements
    /// that are not interactive and while any session is active.
    pub fn pointer_hover(&mut self, target: Option<ElementId>) {
        if self.drag.is_active() || self.resize.is_active() || self.rotation.is_active() {
            return;
        }
        let target = target.filter(|id| {
            self.document
                .state()
                .element(*id)
                .is_some_and(|element| element.common().is_interactive())
        });
        self.interaction.set_hovered(target);
    }

    /// Feed a global pointer move into whichever session is active.
    pub fn pointer_move(&mut self, position: Point) {
        let before = self.document.revision();
        let zoom = self.interaction.viewport().zoom;

        if self.drag.is_active() {
            self.drag
                .pointer_move(position, zoom, &mut self.document, &mut self.interaction);
        } else if self.resize.is_active() {
            self.resize.pointer_move(position, zoom, &mut self.document);
        } else if let Some(id) = self.rotation.target() {
            if let Some(center) = self.rotation_center(id) {
                self.rotation.pointer_move(position, center, &mut self.document);
            }
        }

        if self.document.revision() != before {
            self.saver.mark_dirty();
        }
    }

    /// End the active session, wherever the pointer is released.
    pub fn pointer_up(&mut self) -> Option<EditorEvent> {
        let mut event = None;
        if let DragOutcome::DoubleClicked(id) = self.drag.pointer_up(&mut self.interaction) {
            event = Some(EditorEvent::TextEditRequested(id));
        }
        self.resize.pointer_up(&mut self.interaction);
        self.rotation.pointer_up(&mut self.interaction);
        event
    }

    /// Handle a raw key press. Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> bool {
        match map_key(key, modifiers) {
            Some(command) => self.apply(command),
            None => false,
        }
    }

    /// Apply an editor command. Returns true when anything changed.
    pub fn apply(&mut self, command: EditorCommand) -> bool {
        if self.read_only {
            return false;
        }
        let before = self.document.revision();
        let applied = self.apply_inner(command);
        if self.document.revision() != before {
            self.saver.mark_dirty();
        }
        applied
    }

    fn apply_inner(&mut self, command: EditorCommand) -> bool {
        match command {
            EditorCommand::ZoomIn => {
                self.interaction.with_viewport(|viewport| viewport.zoom_in());
                true
            }
            EditorCommand::ZoomOut => {
                self.interaction.with_viewport(|viewport| viewport.zoom_out());
                true
            }
            EditorCommand::Nudge { dx, dy } => {
                let Some(id) = self.interaction.selection().element_id() else {
                    return false;
                };
                let interactive = self
                    .document
                    .state()
                    .element(id)
                    .is_some_and(|element| element.common().is_interactive());
                if !interactive {
                    return false;
                }
                self.document.update_element(id, |element| {
                    let common = element.common_mut();
                    common.x += dx;
                    common.y += dy;
                })
            }
            EditorCommand::DeleteSelected => {
                let Some(id) = self.interaction.selection().element_id() else {
                    return false;
                };
                let removed = self.document.update(|doc| doc.remove_element(id).is_some());
                if removed {
                    self.interaction.remove(id);
                }
                removed
            }
            EditorCommand::DuplicateSelected => {
                let Some(id) = self.interaction.selection().element_id() else {
                    return false;
                };
                match self.document.update(|doc| doc.duplicate_element(id)) {
                    Some(new_id) => {
                        self.interaction.select(Selection::Element(new_id));
                        true
                    }
                    None => false,
                }
            }
            EditorCommand::BringForward => self.z_order_move(SnippetDocument::bring_forward),
            EditorCommand::BringToFront => self.z_order_move(SnippetDocument::bring_to_front),
            EditorCommand::SendBackward => self.z_order_move(SnippetDocument::send_backward),
            EditorCommand::SendToBack => self.z_order_move(SnippetDocument::send_to_back),
        }
    }

    fn z_order_move(&mut self, op: fn(&mut SnippetDocument, ElementId) -> bool) -> bool {
        let Some(id) = self.interaction.selection().element_id() else {
            return false;
        };
        if self.document.state().index_of(id).is_none() {
            return false;
        }
        self.document.update(|doc| op(doc, id))
    }

    /// Content-measurement hook (layout observer) for auto-sized elements.
    pub fn on_measured(&mut self, id: ElementId, size: Size) -> bool {
        let changed = autosize::apply_measured(&mut self.document, id, size);
        if changed {
            self.saver.mark_dirty();
        }
        changed
    }

    /// Create an element of `kind` centered on the canvas, add it on top of
    /// the stack and select it.
    pub fn add_element(&mut self, kind: ElementKind) -> Option<ElementId> {
        if self.read_only {
            return None;
        }
        let document = self.document.state();
        let element = self
            .factory
            .create(kind, Size::new(document.width, document.height));
        Some(self.insert_element(element))
    }

    /// Add a pre-built element (host-provided payloads) and select it.
    pub fn insert_element(&mut self, element: Element) -> ElementId {
        let id = self.document.update(|doc| doc.add_element(element));
        self.interaction.select(Selection::Element(id));
        self.saver.mark_dirty();
        id
    }

    /// Save if the debounce window elapsed. Returns true when a save ran.
    pub async fn maybe_flush(&mut self) -> bool {
        match self.saver.maybe_flush(self.document.state()).await {
            Ok(saved) => {
                if saved {
                    self.cache_viewport();
                }
                saved
            }
            Err(error) => {
                // The host surfaces persistence failures; the document
                // stays dirty so the next window retries.
                log::warn!("debounced save failed: {error}");
                false
            }
        }
    }

    /// Flush pending changes and the viewport cache on editor teardown.
    pub async fn teardown(&mut self) {
        if let Err(error) = self.saver.flush(self.document.state()).await {
            log::warn!("teardown save failed: {error}");
        }
        self.cache_viewport();
    }

    fn rotation_center(&self, id: ElementId) -> Option<Point> {
        if let Some(provider) = &self.center_provider {
            if let Some(center) = provider(id) {
                return Some(center);
            }
        }
        let element = self.document.state().element(id)?;
        Some(self.view_transform().element_center(element.common()))
    }

    fn cache_viewport(&mut self) {
        let id = self.saver.document_id().to_string();
        self.viewport_cache.put(id, self.interaction.viewport());
        #[cfg(not(target_arch = "wasm32"))]
        if let Err(error) = self.viewport_cache.persist() {
            log::warn!("viewport cache write failed: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Modifiers;
    use snipframe_core::elements::CodeElement;
    use snipframe_core::storage::MemoryStorage;
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use std::time::Duration;

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {}
            }
        }
    }

    fn editor() -> Editor<MemoryStorage> {
        Editor::new(
            "doc-1",
            SnippetDocument::new(900.0, 600.0),
            Arc::new(MemoryStorage::new()),
        )
    }

    fn editor_with_element() -> (Editor<MemoryStorage>, ElementId) {
        let mut editor = editor();
        let mut element = CodeElement::new(100.0, 100.0);
        element.common.set_auto_width(false);
        element.common.set_auto_height(false);
        let id = editor.insert_element(Element::Code(element));
        (editor, id)
    }

    #[test]
    fn test_click_selects_and_drag_moves() {
        let (mut editor, id) = editor_with_element();

        editor.pointer_down(PointerTarget::Element(id), Point::new(50.0, 50.0));
        assert_eq!(editor.interaction().selection().element_id(), Some(id));

        editor.pointer_move(Point::new(90.0, 80.0));
        assert!(editor.interaction().flags(id).dragging);
        assert!(editor.pointer_up().is_none());
        assert!(!editor.interaction().flags(id).dragging);

        let common = editor.document().state().element(id).unwrap().common().clone();
        assert!((common.x - 140.0).abs() < f64::EPSILON);
        assert!((common.y - 130.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_double_click_requests_text_edit() {
        let (mut editor, id) = editor_with_element();

        editor.pointer_down(PointerTarget::Element(id), Point::new(50.0, 50.0));
        assert!(editor.pointer_up().is_none());
        editor.pointer_down(PointerTarget::Element(id), Point::new(51.0, 50.0));
        assert_eq!(
            editor.pointer_up(),
            Some(EditorEvent::TextEditRequested(id))
        );
    }

    #[test]
    fn test_resize_session_via_editor() {
        let (mut editor, id) = editor_with_element();

        editor.pointer_down(
            PointerTarget::ResizeHandle(ResizeTarget::Element(id), ResizeHandle::Right),
            Point::new(200.0, 0.0),
        );
        assert!(editor.interaction().flags(id).resizing);
        editor.pointer_move(Point::new(240.0, 0.0));
        editor.pointer_up();

        let common = editor.document().state().element(id).unwrap().common().clone();
        assert!((common.width - (CodeElement::DEFAULT_WIDTH + 40.0)).abs() < f64::EPSILON);
        assert!(!editor.interaction().flags(id).resizing);
    }

    #[test]
    fn test_rotation_session_via_editor() {
        let (mut editor, id) = editor_with_element();

        editor.pointer_down(PointerTarget::RotationHandle(id), Point::ZERO);
        assert!(editor.interaction().flags(id).rotating);

        let center = editor
            .view_transform()
            .element_center(editor.document().state().element(id).unwrap().common());
        editor.pointer_move(Point::new(center.x + 100.0, center.y));
        editor.pointer_up();

        let rotation = editor.document().state().element(id).unwrap().common().rotation;
        assert!((rotation - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hover_gating() {
        let (mut editor, id) = editor_with_element();

        editor.pointer_hover(Some(id));
        assert!(editor.interaction().flags(id).hovering);

        // Hover is suppressed mid-gesture.
        editor.pointer_hover(None);
        editor.pointer_down(PointerTarget::Element(id), Point::ZERO);
        editor.pointer_move(Point::new(50.0, 0.0));
        editor.pointer_hover(Some(id));
        assert!(!editor.interaction().flags(id).hovering);
        editor.pointer_up();

        // Locked elements never hover.
        editor.update_document(|doc| {
            doc.element_mut(id).unwrap().common_mut().locked = true;
        });
        editor.pointer_hover(Some(id));
        assert!(!editor.interaction().flags(id).hovering);
    }

    #[test]
    fn test_canvas_click_selects_canvas() {
        let (mut editor, _) = editor_with_element();
        editor.pointer_down(PointerTarget::Canvas, Point::ZERO);
        assert!(editor.interaction().selection().is_canvas());
    }

    #[test]
    fn test_keyboard_nudge_and_zoom() {
        let (mut editor, id) = editor_with_element();

        assert!(editor.handle_key("ArrowRight", Modifiers::NONE));
        assert!(editor.handle_key("ArrowDown", Modifiers::SHIFT));
        let common = editor.document().state().element(id).unwrap().common().clone();
        assert!((common.x - 101.0).abs() < f64::EPSILON);
        assert!((common.y - 110.0).abs() < f64::EPSILON);

        let zoom = editor.interaction().viewport().zoom;
        assert!(editor.handle_key("+", Modifiers::COMMAND));
        assert!(editor.interaction().viewport().zoom > zoom);
    }

    #[test]
    fn test_keyboard_delete_clears_selection() {
        let (mut editor, id) = editor_with_element();

        assert!(editor.handle_key("Backspace", Modifiers::NONE));
        assert!(editor.document().state().element(id).is_none());
        assert_eq!(editor.interaction().selection(), Selection::None);
        // Nothing selected: a second delete is a no-op.
        assert!(!editor.handle_key("Backspace", Modifiers::NONE));
    }

    #[test]
    fn test_keyboard_duplicate_selects_copy() {
        let (mut editor, id) = editor_with_element();

        assert!(editor.handle_key("d", Modifiers::COMMAND));
        let new_id = editor.interaction().selection().element_id().unwrap();
        assert_ne!(new_id, id);

        let source = editor.document().state().element(id).unwrap().common().clone();
        let copy = editor.document().state().element(new_id).unwrap().common().clone();
        assert!((copy.x - (source.x + 10.0)).abs() < f64::EPSILON);
        assert!((copy.y - (source.y + 10.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_keyboard_z_order() {
        let (mut editor, first) = editor_with_element();
        let second = editor.insert_element(Element::Code(CodeElement::new(0.0, 0.0)));

        editor.interaction_mut().select(Selection::Element(first));
        assert!(editor.handle_key("]", Modifiers::COMMAND));
        assert_eq!(editor.document().state().index_of(first), Some(1));

        assert!(editor.handle_key("[", Modifiers::NONE));
        assert_eq!(editor.document().state().index_of(first), Some(0));
        assert_eq!(editor.document().state().index_of(second), Some(1));
    }

    #[test]
    fn test_read_only_blocks_everything() {
        let (mut editor, id) = editor_with_element();
        editor.set_read_only(true);

        editor.pointer_down(PointerTarget::Element(id), Point::ZERO);
        editor.pointer_move(Point::new(100.0, 100.0));
        assert!(!editor.interaction().flags(id).dragging);

        let before = editor.document().state().element(id).unwrap().common().clone();
        assert!(!editor.handle_key("ArrowRight", Modifiers::NONE));
        let after = editor.document().state().element(id).unwrap().common().clone();
        assert_eq!(before, after);
    }

    #[test]
    fn test_add_element_centered_and_selected() {
        let mut editor = editor();
        let id = editor.add_element(ElementKind::Text).unwrap();
        assert_eq!(editor.interaction().selection().element_id(), Some(id));

        let common = editor.document().state().element(id).unwrap().common().clone();
        assert!((common.x - 290.0).abs() < f64::EPSILON);
        assert!((common.y - 276.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_measurement_hook_marks_dirty_and_flushes() {
        let (mut editor, id) = editor_with_element();
        editor.saver.set_delay(Duration::ZERO);
        editor.document.update_element(id, |element| {
            element.common_mut().set_auto_width(true);
        });

        assert!(editor.on_measured(id, Size::new(333.0, 100.0)));
        assert!(block_on(editor.maybe_flush()));

        let stored = block_on(editor.saver.storage().load("doc-1")).unwrap();
        assert!((stored.element(id).unwrap().common().width - 333.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gesture_mutations_are_debounced_not_immediate() {
        let (mut editor, id) = editor_with_element();
        editor.saver.set_delay(Duration::from_secs(60));

        editor.pointer_down(PointerTarget::Element(id), Point::ZERO);
        editor.pointer_move(Point::new(50.0, 0.0));
        editor.pointer_up();

        // Dirty, but the window has not elapsed: no write yet.
        assert!(!block_on(editor.maybe_flush()));
        assert!(!block_on(editor.saver.storage().exists("doc-1")).unwrap());

        // Teardown flushes regardless of the timer.
        block_on(editor.teardown());
        assert!(block_on(editor.saver.storage().exists("doc-1")).unwrap());
    }

    #[test]
    fn test_viewport_cache_roundtrip() {
        let (mut editor, _) = editor_with_element();
        editor.interaction_mut().with_viewport(|viewport| {
            viewport.set_zoom(2.0);
            viewport.pan(kurbo::Vec2::new(30.0, -10.0));
        });
        block_on(editor.teardown());

        let cached = editor.viewport_cache.get("doc-1").unwrap();
        assert!((cached.zoom - 2.0).abs() < f64::EPSILON);
        assert!((cached.scroll.x - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_element_deleted_mid_gesture_is_silent() {
        let (mut editor, id) = editor_with_element();

        editor.pointer_down(PointerTarget::Element(id), Point::ZERO);
        editor.pointer_move(Point::new(40.0, 0.0));

        // Concurrent keyboard delete while the drag session is live.
        editor.document.update(|doc| {
            doc.remove_element(id);
        });
        editor.interaction_mut().remove(id);

        editor.pointer_move(Point::new(80.0, 0.0));
        assert!(editor.pointer_up().is_none());
    }
}
