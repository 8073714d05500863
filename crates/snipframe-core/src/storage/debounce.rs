//! Debounced document persistence.
//!
//! Document mutations arrive at drag-tick frequency; writing each one
//! through the persistence seam would flood the backend. The saver holds a
//! timer that restarts on every mutation and flushes once the document has
//! been quiet for the debounce window. Teardown must flush unconditionally.

use super::{Storage, StorageResult};
use crate::document::SnippetDocument;
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Debounces document saves against a storage backend.
pub struct DebouncedSaver<S: Storage> {
    storage: Arc<S>,
    delay: Duration,
    /// Time of the most recent unsaved mutation (None = clean).
    dirty_since: Option<Instant>,
    document_id: String,
}

impl<S: Storage> DebouncedSaver<S> {
    pub fn new(storage: Arc<S>, document_id: impl Into<String>) -> Self {
        Self {
            storage,
            delay: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            dirty_since: None,
            document_id: document_id.into(),
        }
    }

    /// Set the debounce window.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Record a mutation; restarts the debounce timer.
    pub fn mark_dirty(&mut self) {
        self.dirty_since = Some(Instant::now());
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Whether the document has been quiet long enough to save.
    pub fn should_flush(&self) -> bool {
        self.dirty_since
            .is_some_and(|since| since.elapsed() >= self.delay)
    }

    /// Save if the debounce window has elapsed. Returns true if a save ran.
    pub async fn maybe_flush(&mut self, document: &SnippetDocument) -> StorageResult<bool> {
        if !self.should_flush() {
            return Ok(false);
        }
        self.flush(document).await?;
        Ok(true)
    }

    /// Save immediately if dirty, regardless of the timer (teardown path).
    pub async fn flush(&mut self, document: &SnippetDocument) -> StorageResult<()> {
        if self.dirty_since.is_none() {
            return Ok(());
        }
        self.storage.save(&self.document_id, document).await?;
        self.dirty_since = None;
        Ok(())
    }

    /// Load the document this saver is bound to.
    pub async fn load(&mut self) -> StorageResult<SnippetDocument> {
        let document = self.storage.load(&self.document_id).await?;
        self.dirty_since = None;
        Ok(document)
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests_support::block_on;
    use crate::storage::MemoryStorage;

    fn saver() -> DebouncedSaver<MemoryStorage> {
        DebouncedSaver::new(Arc::new(MemoryStorage::new()), "doc-1")
    }

    #[test]
    fn test_clean_saver_never_flushes() {
        let mut saver = saver();
        saver.set_delay(Duration::ZERO);
        assert!(!saver.is_dirty());
        assert!(!saver.should_flush());

        let doc = SnippetDocument::default();
        assert!(!block_on(saver.maybe_flush(&doc)).unwrap());
    }

    #[test]
    fn test_dirty_waits_for_window() {
        let mut saver = saver();
        saver.set_delay(Duration::from_secs(60));
        saver.mark_dirty();

        assert!(saver.is_dirty());
        // Timer restarted just now; the window has not elapsed.
        assert!(!saver.should_flush());
    }

    #[test]
    fn test_elapsed_window_flushes_and_clears_dirty() {
        let mut saver = saver();
        saver.set_delay(Duration::ZERO);
        saver.mark_dirty();
        assert!(saver.should_flush());

        let doc = SnippetDocument::new(640.0, 480.0);
        assert!(block_on(saver.maybe_flush(&doc)).unwrap());
        assert!(!saver.is_dirty());

        let stored = block_on(saver.storage().load("doc-1")).unwrap();
        assert_eq!(stored, doc);
    }

    #[test]
    fn test_teardown_flush_ignores_timer() {
        let mut saver = saver();
        saver.set_delay(Duration::from_secs(60));
        saver.mark_dirty();

        let doc = SnippetDocument::default();
        block_on(saver.flush(&doc)).unwrap();
        assert!(!saver.is_dirty());
        assert!(block_on(saver.storage().exists("doc-1")).unwrap());
    }

    #[test]
    fn test_flush_when_clean_does_not_write() {
        let mut saver = saver();
        let doc = SnippetDocument::default();
        block_on(saver.flush(&doc)).unwrap();
        assert!(!block_on(saver.storage().exists("doc-1")).unwrap());
    }
}
