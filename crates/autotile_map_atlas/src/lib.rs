//! Sprite-sheet decoding and the shared atlas registry
//!
//! An autotile sheet is a vertical strip of square frames. Decoding slices
//! the strip, classifies each frame by the transparency of its four corner
//! pixels, and groups the resulting variants by their 4-bit
//! [`AdjacencyCode`](autotile_map_core::AdjacencyCode). The [`AtlasCache`]
//! guarantees each sheet is decoded at most once per process and hands the
//! decoded [`TileAtlas`] out as a shared, immutable `Arc`.
//!
//! Sheet images come in through the [`SheetSource`] boundary; the shipped
//! [`DirectorySource`] reads `<root>/<name>.png` files, with animated frame
//! strips under `<root>/animated/`.

mod atlas;
mod cache;
mod decode;
mod error;
mod source;
pub mod testing;

pub use atlas::{TileAtlas, TileVariant};
pub use cache::AtlasCache;
pub use decode::ALPHA_THRESHOLD;
pub use error::AtlasError;
pub use source::{DirectorySource, SheetSource};

// Re-export autotile_map_core
pub use autotile_map_core;
