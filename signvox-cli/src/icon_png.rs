//! Icon loading from PNG files.

use anyhow::{Context, Result};
use signvox::bitmap::PixelBitmap;
use signvox::icon;
use std::path::Path;

/// Decode a PNG and convert it to an occupancy bitmap scaled by `scale_percent`.
pub fn load_icon(path: &Path, scale_percent: u32, alpha_threshold: u8) -> Result<PixelBitmap> {
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut decoder = png::Decoder::new(std::io::BufReader::new(file));
    decoder.set_transformations(png::Transformations::normalize_to_color8());

    let mut reader = decoder
        .read_info()
        .with_context(|| format!("reading PNG header of {}", path.display()))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .with_context(|| format!("decoding PNG data of {}", path.display()))?;
    let data = &buf[..info.buffer_size()];

    let rgba = to_rgba(data, info.color_type)
        .with_context(|| format!("unsupported PNG color type in {}", path.display()))?;
    let (width, height) = (info.width as usize, info.height as usize);
    log::debug!("icon {}: {width}x{height}", path.display());

    Ok(icon::bitmap_from_rgba(
        &rgba,
        width,
        height,
        scale_percent,
        alpha_threshold,
    )?)
}

fn to_rgba(data: &[u8], color: png::ColorType) -> Option<Vec<u8>> {
    let rgba = match color {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::Indexed => return None,
    };
    Some(rgba)
}
