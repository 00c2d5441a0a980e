//! Test support: synthetic sheets and an in-memory sheet source
//!
//! Used by `#[cfg(test)]` modules in this crate and its consumers. Nothing
//! here touches the filesystem.

use crate::{AtlasError, SheetSource};
use autotile_map_core::AtlasKey;
use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Build a vertical-strip sheet of square frames from corner specs.
///
/// Each spec lists the four corner flags in code bit order (top-left,
/// top-right, bottom-left, bottom-right); a flagged corner gets an opaque
/// pixel, everything else stays fully transparent.
pub fn corner_sheet(frames: &[[bool; 4]], tile_size: u32) -> RgbaImage {
    assert!(tile_size >= 2, "corners need at least a 2x2 frame");
    let mut sheet = RgbaImage::from_pixel(
        tile_size,
        tile_size * frames.len() as u32,
        Rgba([0, 0, 0, 0]),
    );
    let last = tile_size - 1;
    for (index, [tl, tr, bl, br]) in frames.iter().enumerate() {
        let top = index as u32 * tile_size;
        let opaque = Rgba([255, 255, 255, 255]);
        if *tl {
            sheet.put_pixel(0, top, opaque);
        }
        if *tr {
            sheet.put_pixel(last, top, opaque);
        }
        if *bl {
            sheet.put_pixel(0, top + last, opaque);
        }
        if *br {
            sheet.put_pixel(last, top + last, opaque);
        }
    }
    sheet
}

/// Shared view of how many loads a [`MemorySource`] has served.
#[derive(Debug, Clone)]
pub struct LoadCounter(Arc<AtomicUsize>);

impl LoadCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// In-memory [`SheetSource`] that counts every load request.
///
/// Keys without a registered sheet fail with [`AtlasError::Load`], which
/// doubles as the missing-resource stub.
#[derive(Debug, Default)]
pub struct MemorySource {
    sheets: HashMap<AtlasKey, RgbaImage>,
    loads: Arc<AtomicUsize>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the sheet served for `key`.
    pub fn insert(&mut self, key: impl Into<AtlasKey>, sheet: RgbaImage) {
        self.sheets.insert(key.into(), sheet);
    }

    /// Handle for asserting on the number of loads served.
    pub fn load_counter(&self) -> LoadCounter {
        LoadCounter(Arc::clone(&self.loads))
    }
}

impl SheetSource for MemorySource {
    fn load_sheet(&self, key: &AtlasKey) -> Result<RgbaImage, AtlasError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.sheets.get(key).cloned().ok_or_else(|| AtlasError::Load {
            name: key.name.clone(),
            reason: format!("no sheet registered for '{key}'"),
        })
    }
}
