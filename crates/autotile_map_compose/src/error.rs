//! Composition errors

use autotile_map_atlas::AtlasError;
use thiserror::Error;

/// Errors raised by [`MapComposer`](crate::MapComposer) operations
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Layer index outside the fixed layer sequence. A precondition
    /// violation on the caller's side; never retried.
    #[error("layer index {index} is out of range ({count} layers)")]
    InvalidLayerIndex { index: usize, count: usize },

    /// Atlas decode or lookup failure.
    #[error(transparent)]
    Atlas(#[from] AtlasError),
}
