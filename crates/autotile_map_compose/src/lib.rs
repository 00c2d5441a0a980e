//! Layered map composition over shared tile atlases
//!
//! A [`MapComposer`] owns one map session's fixed, ordered layer stack and
//! mediates every placement through a shared
//! [`AtlasCache`](autotile_map_atlas::AtlasCache): placing a tile resolves
//! the atlas (decoding its sheet on first use), verifies the adjacency code
//! is supported, picks a variant, and records the placement on the target
//! layer. The renderer consumes [`MapComposer::render_set`], which yields
//! instances back to front - ascending layer index, so later layers occlude
//! earlier ones.

mod composer;
mod error;

pub use composer::{MapComposer, TileInstance, DEFAULT_LAYERS};
pub use error::ComposeError;

// Re-export the model and atlas crates
pub use autotile_map_atlas;
pub use autotile_map_core;
