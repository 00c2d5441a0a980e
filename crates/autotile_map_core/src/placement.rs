//! Atlas references and recorded tile placements

use crate::AdjacencyCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which sheet directory an atlas is decoded from.
///
/// Static and animated sheets share one directory tree; animated frame
/// strips live under the `animated/` subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantSet {
    #[default]
    Static,
    Animated,
}

impl VariantSet {
    /// Subdirectory this set resolves to, if any.
    pub const fn subdir(self) -> Option<&'static str> {
        match self {
            VariantSet::Static => None,
            VariantSet::Animated => Some("animated"),
        }
    }
}

/// Identifies one decodable atlas: sheet name plus variant set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtlasKey {
    pub name: String,
    #[serde(default)]
    pub set: VariantSet,
}

impl AtlasKey {
    pub fn new(name: impl Into<String>, set: VariantSet) -> Self {
        Self {
            name: name.into(),
            set,
        }
    }

    /// Key for an animated sheet of the given name.
    pub fn animated(name: impl Into<String>) -> Self {
        Self::new(name, VariantSet::Animated)
    }
}

impl From<&str> for AtlasKey {
    fn from(name: &str) -> Self {
        Self::new(name, VariantSet::Static)
    }
}

impl From<String> for AtlasKey {
    fn from(name: String) -> Self {
        Self::new(name, VariantSet::Static)
    }
}

impl fmt::Display for AtlasKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.set.subdir() {
            Some(sub) => write!(f, "{}/{}", sub, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A recorded tile at one grid coordinate on one layer.
///
/// The variant is chosen when the tile is placed and stays fixed, so
/// re-rendering the map is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePlacement {
    /// Atlas the tile is drawn from.
    pub atlas: AtlasKey,
    /// Corner code the variant was selected for.
    pub code: AdjacencyCode,
    /// Index of the chosen variant within the atlas bucket for `code`.
    pub variant: usize,
}

impl TilePlacement {
    pub fn new(atlas: impl Into<AtlasKey>, code: AdjacencyCode, variant: usize) -> Self {
        Self {
            atlas: atlas.into(),
            code,
            variant,
        }
    }
}
