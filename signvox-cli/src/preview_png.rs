//! PNG rendering of a sign's front face.

use anyhow::{Context, Result};
use signvox::grid::VoxelGrid;
use signvox::palette::PALETTE;
use std::collections::BTreeMap;
use std::path::Path;

/// Write the sign as seen from the front, `scale` pixels per voxel.
pub fn write_face_png(
    grid: &VoxelGrid,
    width: u32,
    height: u32,
    scale: usize,
    path: &Path,
) -> Result<()> {
    let img = face_image(grid, width as usize, height as usize, scale);
    write_rgba_png(path, &img.pixels, img.width, img.height)
}

struct RgbaImage {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

/// Project the grid onto the face, keeping the voxel nearest the viewer
/// (lowest depth) in each column. Empty columns stay transparent.
fn face_image(grid: &VoxelGrid, width: usize, height: usize, scale: usize) -> RgbaImage {
    let mut front: BTreeMap<(i64, i64), (i64, u8)> = BTreeMap::new();
    for ((x, y, z), index) in grid.iter() {
        front
            .entry((x, y))
            .and_modify(|e| {
                if z < e.0 {
                    *e = (z, index);
                }
            })
            .or_insert((z, index));
    }

    let (img_w, img_h) = (width * scale, height * scale);
    let mut pixels = vec![0u8; img_w * img_h * 4];

    for (&(x, y), &(_, index)) in &front {
        if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
            continue;
        }
        let color = PALETTE[index as usize];
        // Image rows run top-down; logical y runs bottom-up.
        let ox = x as usize * scale;
        let oy = (height - 1 - y as usize) * scale;
        for sy in 0..scale {
            for sx in 0..scale {
                let i = ((oy + sy) * img_w + ox + sx) * 4;
                pixels[i..i + 4].copy_from_slice(&color);
            }
        }
    }

    RgbaImage {
        pixels,
        width: img_w,
        height: img_h,
    }
}

fn write_rgba_png(path: &Path, pixels: &[u8], width: usize, height: usize) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let w = std::io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width as u32, height as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("writing PNG header for {}", path.display()))?;
    writer
        .write_image_data(pixels)
        .with_context(|| format!("writing PNG data for {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use signvox::palette;

    #[test]
    fn nearest_voxel_wins_and_rows_flip() {
        let mut grid = VoxelGrid::new();
        grid.set(1, 0, 16, palette::BACKPLATE);
        grid.set(1, 0, 15, palette::STICKER);
        grid.set(0, 1, 16, palette::BACKPLATE);

        let img = face_image(&grid, 2, 2, 1);
        assert_eq!((img.width, img.height), (2, 2));
        // Logical (1, 0) is the bottom-right image pixel.
        assert_eq!(&img.pixels[12..16], &PALETTE[palette::STICKER as usize]);
        // Logical (0, 1) is the top-left image pixel.
        assert_eq!(&img.pixels[0..4], &PALETTE[palette::BACKPLATE as usize]);
        // Empty columns are transparent.
        assert_eq!(&img.pixels[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn scale_multiplies_dimensions() {
        let img = face_image(&VoxelGrid::new(), 16, 20, 3);
        assert_eq!((img.width, img.height), (48, 60));
        assert_eq!(img.pixels.len(), 48 * 60 * 4);
    }
}
