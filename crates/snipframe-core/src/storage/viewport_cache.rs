//! Local, per-document viewport cache.
//!
//! Scroll and zoom are ephemeral interaction state, but losing them on
//! every reload is hostile, so they are cached locally keyed by document
//! id. This never syncs to the backend.

use crate::viewport::Viewport;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[cfg(not(target_arch = "wasm32"))]
use super::{StorageError, StorageResult};
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

/// Cached view state for one document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedViewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub zoom: f64,
}

impl From<Viewport> for CachedViewport {
    fn from(viewport: Viewport) -> Self {
        Self {
            scroll_x: viewport.scroll.x,
            scroll_y: viewport.scroll.y,
            zoom: viewport.zoom,
        }
    }
}

impl From<CachedViewport> for Viewport {
    fn from(cached: CachedViewport) -> Self {
        let mut viewport = Viewport {
            zoom: 1.0,
            scroll: Vec2::new(cached.scroll_x, cached.scroll_y),
        };
        // Re-clamp on the way in; the cache file is user-editable.
        viewport.set_zoom(cached.zoom);
        viewport
    }
}

/// In-memory viewport cache with optional file persistence (native only).
#[derive(Debug, Default)]
pub struct ViewportCache {
    entries: HashMap<String, CachedViewport>,
    #[cfg(not(target_arch = "wasm32"))]
    path: Option<PathBuf>,
}

impl ViewportCache {
    /// Cache without persistence (WASM, tests).
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Look up the cached viewport for a document.
    pub fn get(&self, document_id: &str) -> Option<Viewport> {
        self.entries.get(document_id).copied().map(Into::into)
    }

    /// Store the viewport for a document.
    pub fn put(&mut self, document_id: impl Into<String>, viewport: Viewport) {
        self.entries.insert(document_id.into(), viewport.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ViewportCache {
    /// Load the cache file, or start empty when it doesn't exist yet.
    pub fn load(path: PathBuf) -> Self {
        let entries = std::fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self {
            entries,
            path: Some(path),
        }
    }

    /// Load from the default location under the local data directory.
    pub fn load_default() -> Self {
        let path = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .map(|base| base.join("snipframe").join("viewports.json"));
        match path {
            Some(path) => Self::load(path),
            None => Self::in_memory(),
        }
    }

    /// Write the cache back to its file, if it has one.
    pub fn persist(&self) -> StorageResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::Io(format!("Failed to create {}: {}", parent.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}
