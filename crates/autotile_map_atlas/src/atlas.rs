//! Decoded tile atlases with per-code variant buckets

use crate::{decode, AtlasError, SheetSource};
use autotile_map_core::{AdjacencyCode, AtlasKey};
use image::RgbaImage;
use rand::Rng;
use std::collections::HashMap;

/// One square frame of a decoded sheet, classified by corner code.
#[derive(Debug, Clone)]
pub struct TileVariant {
    /// Corner code this frame was classified under.
    pub code: AdjacencyCode,
    /// Position of the frame in the source sheet, top to bottom.
    pub frame_index: usize,
    /// The frame pixels.
    pub image: RgbaImage,
}

/// A decoded sprite sheet: square tile variants grouped by adjacency code.
///
/// Immutable once built. The cache hands atlases out behind `Arc`, so every
/// layer and composer in the process shares one decoded copy.
#[derive(Debug)]
pub struct TileAtlas {
    key: AtlasKey,
    tile_size: u32,
    frame_count: usize,
    buckets: HashMap<AdjacencyCode, Vec<TileVariant>>,
}

impl TileAtlas {
    /// Decode an in-memory sheet into an atlas for `key`.
    pub fn decode(key: AtlasKey, sheet: &RgbaImage) -> Result<Self, AtlasError> {
        let buckets = decode::decode_sheet(&key.name, sheet)?;
        let frame_count = buckets.values().map(Vec::len).sum();
        Ok(Self {
            tile_size: sheet.width(),
            key,
            frame_count,
            buckets,
        })
    }

    /// Load the sheet for `key` from `source` and decode it.
    pub fn load(key: AtlasKey, source: &dyn SheetSource) -> Result<Self, AtlasError> {
        let sheet = source.load_sheet(&key)?;
        Self::decode(key, &sheet)
    }

    pub fn key(&self) -> &AtlasKey {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    /// Frame edge length in pixels (frames are square).
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Total frames decoded from the sheet.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Codes with at least one variant, in unspecified order.
    pub fn codes(&self) -> impl Iterator<Item = AdjacencyCode> + '_ {
        self.buckets.keys().copied()
    }

    /// Whether `code` has at least one variant.
    pub fn supports(&self, code: AdjacencyCode) -> bool {
        self.buckets.contains_key(&code)
    }

    /// Variants for `code` in source frame order; empty if unsupported.
    pub fn variants(&self, code: AdjacencyCode) -> &[TileVariant] {
        self.buckets.get(&code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Variant at `index` within the bucket for `code`.
    pub fn variant(&self, code: AdjacencyCode, index: usize) -> Option<&TileVariant> {
        self.variants(code).get(index)
    }

    /// Pick a variant for `code` uniformly at random.
    ///
    /// Not memoized: repeated calls with the same code may return different
    /// variants, which is what gives repeated tiles visual variety.
    pub fn pick(&self, code: AdjacencyCode) -> Result<&TileVariant, AtlasError> {
        self.pick_with(code, &mut rand::thread_rng())
    }

    /// Pick with a caller-supplied random source, so a seeded rng pins the
    /// selection.
    pub fn pick_with<R: Rng + ?Sized>(
        &self,
        code: AdjacencyCode,
        rng: &mut R,
    ) -> Result<&TileVariant, AtlasError> {
        let index = self.pick_index_with(code, rng)?;
        Ok(&self.variants(code)[index])
    }

    /// Pick a variant index for `code`, for callers that record the choice.
    pub fn pick_index_with<R: Rng + ?Sized>(
        &self,
        code: AdjacencyCode,
        rng: &mut R,
    ) -> Result<usize, AtlasError> {
        let bucket = self
            .buckets
            .get(&code)
            .ok_or_else(|| AtlasError::NoVariantForCode {
                atlas: self.name().to_string(),
                code,
            })?;
        Ok(rng.gen_range(0..bucket.len()))
    }
}
