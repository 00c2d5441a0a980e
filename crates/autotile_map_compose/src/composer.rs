//! The map composer: a fixed layer stack over a shared atlas cache

use crate::ComposeError;
use autotile_map_atlas::{AtlasCache, TileAtlas, TileVariant};
use autotile_map_core::{AdjacencyCode, AtlasKey, GridPos, Layer, TilePlacement};
use image::RgbaImage;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::ops::Range;
use std::sync::Arc;

/// Back-to-front layer names used by the default map session.
pub const DEFAULT_LAYERS: [&str; 6] = [
    "sky",
    "land",
    "land_surface",
    "object",
    "weather",
    "cloud",
];

/// One entry of the render set: a placement resolved against its atlas.
///
/// Instances are drawn at `pos` scaled to one grid unit per tile, with
/// `layer_index` as the depth order (lower drawn first).
#[derive(Debug, Clone)]
pub struct TileInstance {
    /// Draw-order index of the owning layer.
    pub layer_index: usize,
    pub pos: GridPos,
    /// Atlas the variant belongs to.
    pub atlas: Arc<TileAtlas>,
    pub code: AdjacencyCode,
    /// Index into the atlas bucket for `code`.
    pub variant: usize,
}

impl TileInstance {
    /// The resolved variant. Placements are validated against the atlas
    /// when recorded and atlases never change after decode, so the lookup
    /// always succeeds.
    pub fn resolved(&self) -> &TileVariant {
        &self.atlas.variants(self.code)[self.variant]
    }

    /// The resolved variant's pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.resolved().image
    }
}

/// Owns the fixed, ordered layer sequence for one map session and mediates
/// placements through a shared [`AtlasCache`].
///
/// The layer sequence and each layer's index are immutable after
/// construction; only placement contents (and visibility flags) change over
/// the session. Mutation goes through `&mut self`, so a host that edits the
/// map from several threads wraps the composer in its own lock; the cache
/// itself is safe to share.
pub struct MapComposer {
    layers: Vec<Layer>,
    cache: Arc<AtlasCache>,
    rng: SmallRng,
}

impl MapComposer {
    /// Build a composer with the given back-to-front layer names.
    pub fn new(cache: Arc<AtlasCache>, layer_names: &[&str]) -> Self {
        let layers = layer_names
            .iter()
            .enumerate()
            .map(|(index, name)| Layer::new(index, *name))
            .collect();
        Self {
            layers,
            cache,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Build a composer with the canonical six-layer stack.
    pub fn with_default_layers(cache: Arc<AtlasCache>) -> Self {
        Self::new(cache, &DEFAULT_LAYERS)
    }

    /// Pin the variant-selection rng, so tests get reproducible picks.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn cache(&self) -> &Arc<AtlasCache> {
        &self.cache
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layer at `index` in the fixed back-to-front sequence.
    pub fn layer(&self, index: usize) -> Result<&Layer, ComposeError> {
        self.layers.get(index).ok_or(ComposeError::InvalidLayerIndex {
            index,
            count: self.layers.len(),
        })
    }

    /// Layer with the given name, if the session has one.
    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name() == name)
    }

    /// Iterate layers back to front.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Show or hide a layer in the render set.
    pub fn set_layer_visible(&mut self, index: usize, visible: bool) -> Result<(), ComposeError> {
        self.layer_mut(index)?.visible = visible;
        Ok(())
    }

    /// Place a tile, resolving the atlas through the cache and picking a
    /// variant for `code`.
    ///
    /// All-or-nothing: on any error the target layer is left untouched. A
    /// prior placement at `pos` is replaced outright.
    pub fn place_tile(
        &mut self,
        layer_index: usize,
        atlas: impl Into<AtlasKey>,
        pos: impl Into<GridPos>,
        code: AdjacencyCode,
    ) -> Result<(), ComposeError> {
        let key = atlas.into();
        let pos = pos.into();
        // Layer bounds are a precondition; surface them before any decode.
        if layer_index >= self.layers.len() {
            return Err(ComposeError::InvalidLayerIndex {
                index: layer_index,
                count: self.layers.len(),
            });
        }

        let atlas = self.cache.get(&key)?;
        let variant = atlas.pick_index_with(code, &mut self.rng)?;
        self.layers[layer_index].insert(pos, TilePlacement::new(key, code, variant));
        tracing::trace!(layer = layer_index, pos = %pos, code = %code, "tile placed");
        Ok(())
    }

    /// Remove the tile at `pos`; returns whether one existed.
    pub fn remove_tile(
        &mut self,
        layer_index: usize,
        pos: impl Into<GridPos>,
    ) -> Result<bool, ComposeError> {
        Ok(self.layer_mut(layer_index)?.remove(pos))
    }

    /// Fill a rectangular region of one layer with tiles from one atlas.
    pub fn fill_region(
        &mut self,
        layer_index: usize,
        atlas: impl Into<AtlasKey>,
        xs: Range<i32>,
        ys: Range<i32>,
        code: AdjacencyCode,
    ) -> Result<(), ComposeError> {
        let key = atlas.into();
        for x in xs {
            for y in ys.clone() {
                self.place_tile(layer_index, key.clone(), (x, y), code)?;
            }
        }
        Ok(())
    }

    /// Resolve one layer's placements against their atlases. Order within
    /// the layer is unspecified.
    pub fn layer_instances(&self, layer_index: usize) -> Result<Vec<TileInstance>, ComposeError> {
        self.instances_of(self.layer(layer_index)?)
    }

    /// Resolve the full visible instance set, back to front.
    ///
    /// Instances are ordered by ascending layer index; a later layer's
    /// instances never precede an earlier layer's, so drawing them in
    /// sequence gives the correct occlusion. Order within a layer is
    /// unspecified. Hidden layers are skipped.
    pub fn render_set(&self) -> Result<Vec<TileInstance>, ComposeError> {
        let mut instances = Vec::new();
        for layer in &self.layers {
            if !layer.visible {
                continue;
            }
            instances.extend(self.instances_of(layer)?);
        }
        Ok(instances)
    }

    fn instances_of(&self, layer: &Layer) -> Result<Vec<TileInstance>, ComposeError> {
        let mut instances = Vec::with_capacity(layer.len());
        for (pos, placement) in layer.placements() {
            let atlas = self.cache.get(&placement.atlas)?;
            instances.push(TileInstance {
                layer_index: layer.index(),
                pos,
                atlas,
                code: placement.code,
                variant: placement.variant,
            });
        }
        Ok(instances)
    }

    fn layer_mut(&mut self, index: usize) -> Result<&mut Layer, ComposeError> {
        let count = self.layers.len();
        self.layers
            .get_mut(index)
            .ok_or(ComposeError::InvalidLayerIndex { index, count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autotile_map_atlas::testing::{corner_sheet, MemorySource};
    use autotile_map_atlas::AtlasError;

    /// All 16 corner patterns, one frame per code.
    fn full_sheet_specs() -> Vec<[bool; 4]> {
        (0u8..16)
            .map(|bits| {
                [
                    bits & 0b1000 != 0,
                    bits & 0b0100 != 0,
                    bits & 0b0010 != 0,
                    bits & 0b0001 != 0,
                ]
            })
            .collect()
    }

    fn stone_composer() -> MapComposer {
        let mut source = MemorySource::new();
        source.insert("stone", corner_sheet(&full_sheet_specs(), 4));
        // Two interchangeable full-corner variants.
        source.insert(
            "grass",
            corner_sheet(&[[true, true, true, true], [true, true, true, true]], 4),
        );
        let cache = Arc::new(AtlasCache::new(source));
        MapComposer::with_default_layers(cache).with_rng_seed(11)
    }

    fn code(bits: u8) -> AdjacencyCode {
        AdjacencyCode::from_bits(bits).unwrap()
    }

    #[test]
    fn test_default_layer_stack() {
        let composer = stone_composer();
        assert_eq!(composer.layer_count(), 6);
        assert_eq!(composer.layer(0).unwrap().name(), "sky");
        assert_eq!(composer.layer(5).unwrap().name(), "cloud");
        assert_eq!(composer.layer_by_name("land_surface").unwrap().index(), 2);
        assert!(composer.layer_by_name("minimap").is_none());
    }

    #[test]
    fn test_layer_index_out_of_range() {
        let composer = stone_composer();
        assert!(matches!(
            composer.layer(6),
            Err(ComposeError::InvalidLayerIndex { index: 6, count: 6 })
        ));
    }

    #[test]
    fn test_place_then_query_roundtrip() {
        let mut composer = stone_composer();
        composer.place_tile(0, "stone", (0, 0), code(0)).unwrap();

        let placement = composer.layer(0).unwrap().placement_at((0, 0)).unwrap();
        assert_eq!(placement.atlas, AtlasKey::from("stone"));
        assert_eq!(placement.code, code(0));
    }

    #[test]
    fn test_out_of_range_code_fails_before_atlas_lookup() {
        // 16 is not a valid adjacency code; the type boundary rejects it
        // before any atlas bucket is consulted.
        assert!(AdjacencyCode::from_bits(16).is_err());
    }

    #[test]
    fn test_replacement_is_total() {
        let mut composer = stone_composer();
        composer.place_tile(1, "stone", (2, 3), code(0b1010)).unwrap();
        composer.place_tile(1, "stone", (2, 3), code(0b0101)).unwrap();

        let layer = composer.layer(1).unwrap();
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.placement_at((2, 3)).unwrap().code, code(0b0101));
    }

    #[test]
    fn test_unsupported_code_leaves_layer_untouched() {
        let mut source = MemorySource::new();
        // Only the full-corner frame exists.
        source.insert("solid", corner_sheet(&[[true, true, true, true]], 4));
        let mut composer =
            MapComposer::with_default_layers(Arc::new(AtlasCache::new(source)));

        let err = composer
            .place_tile(0, "solid", (1, 1), AdjacencyCode::EMPTY)
            .unwrap_err();
        assert!(matches!(
            err,
            ComposeError::Atlas(AtlasError::NoVariantForCode { .. })
        ));
        assert!(composer.layer(0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_layer_checked_before_decode() {
        let mut composer = stone_composer();
        // "nope" has no sheet; the layer precondition still wins.
        let err = composer
            .place_tile(9, "nope", (0, 0), AdjacencyCode::FULL)
            .unwrap_err();
        assert!(matches!(
            err,
            ComposeError::InvalidLayerIndex { index: 9, count: 6 }
        ));
        assert!(!composer.cache().contains(&AtlasKey::from("nope")));
    }

    #[test]
    fn test_remove_tile() {
        let mut composer = stone_composer();
        assert!(!composer.remove_tile(3, (5, 5)).unwrap());

        composer.place_tile(3, "stone", (5, 5), code(7)).unwrap();
        assert!(composer.remove_tile(3, (5, 5)).unwrap());
        assert!(composer.layer(3).unwrap().placement_at((5, 5)).is_none());
    }

    #[test]
    fn test_render_set_layer_ordering() {
        let mut composer = stone_composer();
        // Deliberately interleave placements across layers.
        composer.place_tile(4, "stone", (0, 0), code(1)).unwrap();
        composer.place_tile(0, "stone", (0, 0), code(2)).unwrap();
        composer.place_tile(2, "stone", (1, 0), code(3)).unwrap();
        composer.place_tile(0, "stone", (1, 0), code(4)).unwrap();
        composer.place_tile(2, "stone", (0, 1), code(5)).unwrap();

        let instances = composer.render_set().unwrap();
        assert_eq!(instances.len(), 5);
        let indices: Vec<_> = instances.iter().map(|i| i.layer_index).collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(indices, sorted, "layers must come out back to front");
    }

    #[test]
    fn test_hidden_layer_contributes_nothing() {
        let mut composer = stone_composer();
        composer.place_tile(1, "stone", (0, 0), code(6)).unwrap();
        composer.place_tile(2, "stone", (0, 0), code(6)).unwrap();

        composer.set_layer_visible(1, false).unwrap();
        let instances = composer.render_set().unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].layer_index, 2);

        // The layer itself still holds its placements.
        assert_eq!(composer.layer(1).unwrap().len(), 1);
        assert_eq!(composer.layer_instances(1).unwrap().len(), 1);
    }

    #[test]
    fn test_fill_region_covers_rectangle() {
        let mut composer = stone_composer();
        composer
            .fill_region(1, "grass", 0..4, 0..3, AdjacencyCode::FULL)
            .unwrap();

        let layer = composer.layer(1).unwrap();
        assert_eq!(layer.len(), 12);
        for x in 0..4 {
            for y in 0..3 {
                assert!(layer.placement_at((x, y)).is_some(), "missing ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_render_is_stable_across_frames() {
        // Variant choice happens at placement time, so two consecutive
        // render sets resolve to identical variants.
        let mut composer = stone_composer();
        composer
            .fill_region(2, "grass", 0..8, 0..8, AdjacencyCode::FULL)
            .unwrap();

        let pick = |instances: &[TileInstance]| {
            let mut picks: Vec<_> = instances
                .iter()
                .map(|i| (i.pos, i.variant))
                .collect();
            picks.sort_unstable();
            picks
        };
        let first = pick(&composer.render_set().unwrap());
        let second = pick(&composer.render_set().unwrap());
        assert_eq!(first, second);
        assert!(first.iter().all(|&(_, variant)| variant < 2));
    }

    #[test]
    fn test_sixteen_frame_sheet_end_to_end() {
        // The "stone" sheet holds 16 frames, one per code; every code is
        // placeable and resolves to a frame of the right classification.
        let mut composer = stone_composer();
        for (i, code) in AdjacencyCode::all().enumerate() {
            composer.place_tile(1, "stone", (i as i32, 0), code).unwrap();
        }

        let atlas = composer.cache().get(&AtlasKey::from("stone")).unwrap();
        assert_eq!(atlas.frame_count(), 16);

        for instance in composer.layer_instances(1).unwrap() {
            let variant = instance.resolved();
            assert_eq!(variant.code, instance.code);
            assert_eq!(instance.image().dimensions(), (4, 4));
        }
    }
}
