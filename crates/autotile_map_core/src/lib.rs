//! Core data structures for autotile_map
//!
//! This crate provides the fundamental types for representing layered
//! autotile maps:
//! - `AdjacencyCode` - 4-bit corner connectivity code classifying a tile frame
//! - `GridPos` - integer grid coordinate
//! - `AtlasKey` / `VariantSet` - how placements reference a decoded sheet
//! - `TilePlacement` - a recorded tile at one coordinate
//! - `Layer` - a named, z-indexed plane of placements

mod code;
mod coord;
mod layer;
mod placement;

pub use code::{AdjacencyCode, CodeOutOfRange, Corner};
pub use coord::GridPos;
pub use layer::Layer;
pub use placement::{AtlasKey, TilePlacement, VariantSet};
