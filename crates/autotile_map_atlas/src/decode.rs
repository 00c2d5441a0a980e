//! Sheet slicing and corner-alpha classification

use crate::{AtlasError, TileVariant};
use autotile_map_core::AdjacencyCode;
use image::{imageops, RgbaImage};
use std::collections::HashMap;

/// Alpha values above this count a corner as filled (0-255 scale).
pub const ALPHA_THRESHOLD: u8 = 127;

/// Classify one square frame by its four corner pixels.
pub(crate) fn classify_frame(frame: &RgbaImage) -> AdjacencyCode {
    let (w, h) = frame.dimensions();
    let filled = |x: u32, y: u32| frame.get_pixel(x, y).0[3] > ALPHA_THRESHOLD;
    AdjacencyCode::from_corners(
        filled(0, 0),
        filled(w - 1, 0),
        filled(0, h - 1),
        filled(w - 1, h - 1),
    )
}

/// Slice a vertical-strip sheet into square frames and bucket them by
/// corner code.
///
/// The sheet height must be an exact multiple of its width. Buckets keep
/// the source frame order; codes absent from the sheet get no bucket. The
/// result partitions the frames: every frame lands in exactly one bucket.
pub(crate) fn decode_sheet(
    name: &str,
    sheet: &RgbaImage,
) -> Result<HashMap<AdjacencyCode, Vec<TileVariant>>, AtlasError> {
    let (width, height) = sheet.dimensions();
    if width == 0 || height == 0 || height % width != 0 {
        return Err(AtlasError::MalformedSheet {
            name: name.to_string(),
            width,
            height,
        });
    }

    let frames = height / width;
    let mut buckets: HashMap<AdjacencyCode, Vec<TileVariant>> = HashMap::new();
    for index in 0..frames {
        let frame = imageops::crop_imm(sheet, 0, index * width, width, width).to_image();
        let code = classify_frame(&frame);
        buckets.entry(code).or_default().push(TileVariant {
            code,
            frame_index: index as usize,
            image: frame,
        });
    }

    tracing::debug!(atlas = name, frames, buckets = buckets.len(), "decoded sheet");
    Ok(buckets)
}
