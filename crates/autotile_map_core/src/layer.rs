//! A z-indexed plane of tile placements

use crate::{GridPos, TilePlacement};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named layer of tile placements, drawn at a fixed depth.
///
/// The index and name are fixed at construction; a map session builds its
/// layers once, back to front, and never reorders them. Placements mutate
/// freely. At most one placement exists per coordinate; recording a new one
/// at an occupied coordinate replaces the old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    index: usize,
    name: String,
    /// Hidden layers contribute no instances to the render set.
    pub visible: bool,
    placements: HashMap<GridPos, TilePlacement>,
}

impl Layer {
    /// Create an empty layer at the given draw-order index (lower draws first).
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            visible: true,
            placements: HashMap::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record a placement at `pos`, returning the one it replaced.
    pub fn insert(
        &mut self,
        pos: impl Into<GridPos>,
        placement: TilePlacement,
    ) -> Option<TilePlacement> {
        self.placements.insert(pos.into(), placement)
    }

    /// Delete the placement at `pos`; returns whether one existed.
    pub fn remove(&mut self, pos: impl Into<GridPos>) -> bool {
        self.placements.remove(&pos.into()).is_some()
    }

    /// Point query.
    pub fn placement_at(&self, pos: impl Into<GridPos>) -> Option<&TilePlacement> {
        self.placements.get(&pos.into())
    }

    /// Iterate the current placements. Order is unspecified; re-iterating
    /// yields a fresh snapshot of the layer as it stands.
    pub fn placements(&self) -> impl Iterator<Item = (GridPos, &TilePlacement)> {
        self.placements.iter().map(|(pos, placement)| (*pos, placement))
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Remove every placement, keeping index, name and visibility.
    pub fn clear(&mut self) {
        self.placements.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AdjacencyCode;

    fn placement(code: u8) -> TilePlacement {
        TilePlacement::new("stone", AdjacencyCode::from_bits(code).unwrap(), 0)
    }

    #[test]
    fn test_new_layer() {
        let layer = Layer::new(2, "land_surface");
        assert_eq!(layer.index(), 2);
        assert_eq!(layer.name(), "land_surface");
        assert!(layer.visible);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut layer = Layer::new(0, "land");
        assert_eq!(layer.insert((1, 1), placement(3)), None);

        let replaced = layer.insert((1, 1), placement(7));
        assert_eq!(replaced, Some(placement(3)));
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.placement_at((1, 1)), Some(&placement(7)));
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut layer = Layer::new(0, "land");
        assert!(!layer.remove((4, 4)));

        layer.insert((4, 4), placement(0));
        assert!(layer.remove((4, 4)));
        assert_eq!(layer.placement_at((4, 4)), None);
    }

    #[test]
    fn test_placements_snapshot() {
        let mut layer = Layer::new(0, "land");
        layer.insert((0, 0), placement(1));
        layer.insert((1, 0), placement(2));
        layer.insert((0, 1), placement(3));

        assert_eq!(layer.placements().count(), 3);
        // Restartable: a second pass sees the same placements.
        assert_eq!(layer.placements().count(), 3);

        layer.clear();
        assert!(layer.is_empty());
        assert_eq!(layer.placements().count(), 0);
    }
}
