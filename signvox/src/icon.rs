//! Image-to-bitmap conversion for sign icons.

use crate::bitmap::PixelBitmap;
use crate::error::ValidationError;

/// Alpha value at or above which a pixel counts as occupied.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 128;

/// Convert RGBA8 pixel data into an occupancy bitmap, then scale it by
/// `scale_percent`.
pub fn bitmap_from_rgba(
    rgba: &[u8],
    width: usize,
    height: usize,
    scale_percent: u32,
    alpha_threshold: u8,
) -> Result<PixelBitmap, ValidationError> {
    let expected = width * height * 4;
    if rgba.len() != expected {
        return Err(ValidationError::new(
            "icon",
            format!(
                "RGBA data length {} does not match {}x{}x4 = {}",
                rgba.len(),
                width,
                height,
                expected
            ),
        ));
    }
    if scale_percent < 1 {
        return Err(ValidationError::new("icon_scale", "must be at least 1"));
    }

    let bitmap = PixelBitmap {
        width,
        height,
        pixels: rgba.chunks_exact(4).map(|px| px[3] >= alpha_threshold).collect(),
        offset_y: None,
    };
    Ok(bitmap.scaled(scale_percent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_alpha() {
        // 2x1: opaque red, faint blue
        let rgba = [255, 0, 0, 255, 0, 0, 255, 40];
        let bm = bitmap_from_rgba(&rgba, 2, 1, 100, DEFAULT_ALPHA_THRESHOLD).unwrap();
        assert_eq!(bm.pixels, vec![true, false]);
    }

    #[test]
    fn applies_scale() {
        let rgba = [0, 0, 0, 255].repeat(4);
        let bm = bitmap_from_rgba(&rgba, 2, 2, 150, DEFAULT_ALPHA_THRESHOLD).unwrap();
        assert_eq!((bm.width, bm.height), (3, 3));
        assert!(bm.pixels.iter().all(|&p| p));
    }

    #[test]
    fn rejects_wrong_length() {
        let err = bitmap_from_rgba(&[0; 7], 2, 1, 100, DEFAULT_ALPHA_THRESHOLD).unwrap_err();
        assert_eq!(err.field, "icon");
    }
}
