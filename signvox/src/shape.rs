//! Background geometry: the standard sign's rounded frame ring and the
//! hanging sign's rounded backplate slab.

use std::ops::Range;

use crate::grid::VoxelGrid;
use crate::palette;
use crate::spec::{SignKind, SignSpec, BACKPLATE_START, FACE_PLANE, HANGING_HEIGHT};

/// Corner rounding radius of the hanging sign backplate.
pub const BACKPLATE_CORNER_RADIUS: i64 = 4;

/// Write the sign's background shape into `grid`. Returns the number of
/// voxel writes.
pub fn rasterize(spec: &SignSpec, grid: &mut VoxelGrid) -> usize {
    match &spec.sign {
        SignKind::Standard(s) if s.frame => rasterize_frame(
            grid,
            s.width.into(),
            s.height.into(),
            s.frame_width.into(),
        ),
        SignKind::Standard(_) => 0,
        SignKind::Hanging(h) => {
            rasterize_backplate(grid, h.width.cells().into(), h.thickness.into())
        }
    }
}

/// Frame ring of width `frame_width` with corners rounded at twice that radius.
pub fn rasterize_frame(grid: &mut VoxelGrid, width: i64, height: i64, frame_width: i64) -> usize {
    let radius = frame_width * 2;
    let mut written = 0;
    for y in 0..height {
        for x in 0..width {
            if in_frame_band(x, y, width, height, frame_width)
                && !corner_carved(x, y, width, height, radius)
            {
                grid.set(x, y, FACE_PLANE, palette::FRAME);
                written += 1;
            }
        }
    }
    log::debug!("frame {width}x{height} (frame width {frame_width}): {written} voxels");
    written
}

/// Rounded rectangle cross-section extruded over `thickness` slices.
pub fn rasterize_backplate(grid: &mut VoxelGrid, width: i64, thickness: i64) -> usize {
    let height = i64::from(HANGING_HEIGHT);
    let mut written = 0;
    for z in BACKPLATE_START..BACKPLATE_START + thickness {
        for y in 0..height {
            for x in 0..width {
                if in_backplate(x, y, width, height, BACKPLATE_CORNER_RADIUS) {
                    grid.set(x, y, z, palette::BACKPLATE);
                    written += 1;
                }
            }
        }
    }
    log::debug!("backplate {width}x{height}x{thickness}: {written} voxels");
    written
}

/// True within `band` cells of any edge.
pub fn in_frame_band(x: i64, y: i64, width: i64, height: i64, band: i64) -> bool {
    x < band || x >= width - band || y < band || y >= height - band
}

/// True where a corner square of side `radius` lies outside its rounding circle.
///
/// Unguarded when `radius` exceeds half the sign size: overlapping corner
/// squares then carve whatever the predicate yields.
pub fn corner_carved(x: i64, y: i64, width: i64, height: i64, radius: i64) -> bool {
    corners(width, height, radius).iter().any(|c| {
        c.xs.contains(&x) && c.ys.contains(&y) && dist_sq(x, y, c.cx, c.cy) > square(radius)
    })
}

/// Rounded-rectangle inclusion with corner radius `radius`.
pub fn in_backplate(x: i64, y: i64, width: i64, height: i64, radius: i64) -> bool {
    let in_bands = (x >= radius && x < width - radius) || (y >= radius && y < height - radius);
    in_bands
        || corners(width, height, radius)
            .iter()
            .any(|c| dist_sq(x, y, c.cx, c.cy) <= square(radius))
}

/// A corner's square of side `radius` and the centre its rounding is measured from.
struct Corner {
    xs: Range<i64>,
    ys: Range<i64>,
    cx: i64,
    cy: i64,
}

fn corners(w: i64, h: i64, r: i64) -> [Corner; 4] {
    let (lo, hi) = (i64::MIN, i64::MAX);
    [
        Corner { xs: lo..r, ys: lo..r, cx: r, cy: r },
        Corner { xs: w - r..hi, ys: lo..r, cx: w - 1 - r, cy: r },
        Corner { xs: lo..r, ys: h - r..hi, cx: r, cy: h - 1 - r },
        Corner { xs: w - r..hi, ys: h - r..hi, cx: w - 1 - r, cy: h - 1 - r },
    ]
}

// Radii reach 2^33, so squared distances are taken in i128.
fn square(v: i64) -> i128 {
    i128::from(v) * i128::from(v)
}

fn dist_sq(x: i64, y: i64, cx: i64, cy: i64) -> i128 {
    square(x - cx) + square(y - cy)
}
