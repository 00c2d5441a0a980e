//! Atlas decode and lookup errors

use autotile_map_core::AdjacencyCode;
use thiserror::Error;

/// Errors raised while building or querying tile atlases
#[derive(Debug, Error)]
pub enum AtlasError {
    /// The sheet resource could not be read. Fatal to this atlas, not the
    /// process; the cache stores nothing, so a later call can retry.
    #[error("failed to read sheet for atlas '{name}': {reason}")]
    Load { name: String, reason: String },

    /// The sheet is not a vertical strip of square frames.
    #[error("malformed sheet for atlas '{name}': {width}x{height} is not a vertical strip of square frames")]
    MalformedSheet { name: String, width: u32, height: u32 },

    /// The atlas has no variant bucket for the requested code. Recoverable:
    /// the caller picks a different atlas or code, or skips the placement.
    #[error("atlas '{atlas}' has no variant for adjacency code {code}")]
    NoVariantForCode { atlas: String, code: AdjacencyCode },
}
