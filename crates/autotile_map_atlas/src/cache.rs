//! Shared atlas registry with decode-once semantics

use crate::{AtlasError, SheetSource, TileAtlas};
use autotile_map_core::AtlasKey;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of decoded atlases, keyed by [`AtlasKey`].
///
/// The first `get` for a key loads and decodes its sheet; later calls return
/// the same `Arc` without touching the source. The registry lock is held
/// across the check-decode-insert sequence, so two callers racing on an
/// uncached key resolve to exactly one decode and one shared instance.
/// Entries are never evicted. A failed decode leaves its key uncached, so a
/// later call can retry once the source recovers.
pub struct AtlasCache {
    source: Box<dyn SheetSource>,
    atlases: Mutex<HashMap<AtlasKey, Arc<TileAtlas>>>,
}

impl AtlasCache {
    pub fn new(source: impl SheetSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            atlases: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch the atlas for `key`, decoding its sheet on first access.
    pub fn get(&self, key: &AtlasKey) -> Result<Arc<TileAtlas>, AtlasError> {
        let mut atlases = self.lock();
        if let Some(atlas) = atlases.get(key) {
            return Ok(Arc::clone(atlas));
        }

        let atlas = Arc::new(TileAtlas::load(key.clone(), self.source.as_ref())?);
        tracing::debug!(atlas = %key, frames = atlas.frame_count(), "atlas cached");
        atlases.insert(key.clone(), Arc::clone(&atlas));
        Ok(atlas)
    }

    /// Whether `key` has already been decoded.
    pub fn contains(&self, key: &AtlasKey) -> bool {
        self.lock().contains_key(key)
    }

    /// Number of decoded atlases.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<AtlasKey, Arc<TileAtlas>>> {
        self.atlases.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
