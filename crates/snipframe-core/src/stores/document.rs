//! Observable container for the persisted snippet document.

use super::{Listeners, SubscriptionId};
use crate::document::SnippetDocument;
use crate::elements::{Element, ElementId};

/// Single source of truth for persisted state.
///
/// Every mutation goes through `update`, which bumps the revision counter
/// and notifies subscribers; readers only ever see the committed state.
pub struct DocumentStore {
    document: SnippetDocument,
    revision: u64,
    listeners: Listeners<SnippetDocument>,
}

impl DocumentStore {
    pub fn new(document: SnippetDocument) -> Self {
        Self {
            document,
            revision: 0,
            listeners: Listeners::new(),
        }
    }

    /// The current committed document.
    pub fn state(&self) -> &SnippetDocument {
        &self.document
    }

    /// Monotonic mutation counter; changes exactly when `update` runs.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply a mutation, bump the revision and notify subscribers.
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut SnippetDocument) -> R) -> R {
        let result = mutate(&mut self.document);
        self.revision += 1;
        self.listeners.notify(&self.document);
        result
    }

    /// Mutate a single element by id. No-ops (without a revision bump or
    /// notification) when the element no longer exists, since it may have
    /// been deleted by another code path during an active gesture.
    pub fn update_element(
        &mut self,
        id: ElementId,
        mutate: impl FnOnce(&mut Element),
    ) -> bool {
        if self.document.element(id).is_none() {
            return false;
        }
        self.update(|doc| {
            if let Some(element) = doc.element_mut(id) {
                mutate(element);
            }
        });
        true
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&SnippetDocument) + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::CodeElement;
    use std::cell::Cell;
    use std::rc::Rc;
    use uuid::Uuid;

    #[test]
    fn test_update_bumps_revision_and_notifies() {
        let mut store = DocumentStore::new(SnippetDocument::new(600.0, 400.0));
        let notified = Rc::new(Cell::new(0usize));

        let notified_clone = notified.clone();
        store.subscribe(move |_| notified_clone.set(notified_clone.get() + 1));

        assert_eq!(store.revision(), 0);
        store.update(|doc| {
            doc.add_element(Element::Code(CodeElement::new(0.0, 0.0)));
        });
        assert_eq!(store.revision(), 1);
        assert_eq!(notified.get(), 1);
        assert_eq!(store.state().len(), 1);
    }

    #[test]
    fn test_update_element_missing_id_is_silent() {
        let mut store = DocumentStore::new(SnippetDocument::new(600.0, 400.0));
        let notified = Rc::new(Cell::new(0usize));

        let notified_clone = notified.clone();
        store.subscribe(move |_| notified_clone.set(notified_clone.get() + 1));

        let applied = store.update_element(Uuid::new_v4(), |element| {
            element.common_mut().x = 999.0;
        });
        assert!(!applied);
        assert_eq!(store.revision(), 0);
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut store = DocumentStore::new(SnippetDocument::new(600.0, 400.0));
        let notified = Rc::new(Cell::new(0usize));

        let notified_clone = notified.clone();
        let id = store.subscribe(move |_| notified_clone.set(notified_clone.get() + 1));
        assert!(store.unsubscribe(id));

        store.update(|_| {});
        assert_eq!(notified.get(), 0);
    }
}
