//! Sheet sources - the image-loading boundary
//!
//! The decoder treats one sheet load as an atomic read of an external
//! resource. Retry and failure-caching policy belongs to the source
//! implementation, not to the decoder or the cache.

use crate::AtlasError;
use autotile_map_core::AtlasKey;
use image::RgbaImage;
use std::path::PathBuf;

/// Provides sheet images to the decoder.
pub trait SheetSource: Send + Sync {
    /// Load the sheet image for `key`.
    fn load_sheet(&self, key: &AtlasKey) -> Result<RgbaImage, AtlasError>;
}

/// Loads `<root>/<name>.png` sheets from a directory tree.
///
/// Animated sheets live under the `animated/` subdirectory, selected by the
/// key's [`VariantSet`](autotile_map_core::VariantSet).
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The path a key resolves to.
    pub fn sheet_path(&self, key: &AtlasKey) -> PathBuf {
        let mut path = self.root.clone();
        if let Some(sub) = key.set.subdir() {
            path.push(sub);
        }
        path.push(format!("{}.png", key.name));
        path
    }
}

impl SheetSource for DirectorySource {
    fn load_sheet(&self, key: &AtlasKey) -> Result<RgbaImage, AtlasError> {
        let path = self.sheet_path(key);
        let sheet = image::open(&path).map_err(|err| AtlasError::Load {
            name: key.name.clone(),
            reason: format!("{}: {err}", path.display()),
        })?;
        Ok(sheet.to_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autotile_map_core::VariantSet;

    #[test]
    fn test_sheet_path_layout() {
        let source = DirectorySource::new("static/tile");

        let stone = source.sheet_path(&AtlasKey::from("stone"));
        assert_eq!(stone, PathBuf::from("static/tile/stone.png"));

        let water = source.sheet_path(&AtlasKey::new("water", VariantSet::Animated));
        assert_eq!(water, PathBuf::from("static/tile/animated/water.png"));
    }

    #[test]
    fn test_missing_sheet_is_load_error() {
        let source = DirectorySource::new("/nonexistent");
        let err = source.load_sheet(&AtlasKey::from("stone")).unwrap_err();
        assert!(matches!(err, AtlasError::Load { ref name, .. } if name == "stone"));
    }
}
