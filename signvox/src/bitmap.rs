/// A boolean occupancy bitmap.
///
/// Pixels are stored row-major, top row first. `offset_y` is an optional
/// vertical shift applied when the bitmap is stacked into a larger block
/// (used by text lines).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelBitmap {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<bool>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub offset_y: Option<i32>,
}

impl PixelBitmap {
    /// An all-clear bitmap of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        PixelBitmap {
            width,
            height,
            pixels: vec![false; width * height],
            offset_y: None,
        }
    }

    /// Build a bitmap from rows of `#` (set) and any other character (clear).
    ///
    /// Rows shorter than the longest row are padded with clear pixels.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut bitmap = PixelBitmap::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                bitmap.set(x, y, c == '#');
            }
        }
        bitmap
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.pixels[y * self.width + x] = on;
    }

    /// True when the bitmap has no area or no occupied pixel.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || !self.pixels.iter().any(|&p| p)
    }

    /// Iterate `(x, y)` of every occupied pixel in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.pixels
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p)
            .map(move |(i, _)| (i % width, i / width))
    }

    /// Nearest-neighbour resample by a percentage.
    ///
    /// Output dimensions are rounded; a non-empty source never shrinks below 1x1.
    pub fn scaled(&self, percent: u32) -> PixelBitmap {
        if percent == 100 || self.width == 0 || self.height == 0 {
            return self.clone();
        }
        let dim = |n: usize| ((n as u64 * percent as u64 + 50) / 100).max(1) as usize;
        let (w, h) = (dim(self.width), dim(self.height));
        let mut out = PixelBitmap::new(w, h);
        out.offset_y = self.offset_y;
        for y in 0..h {
            let sy = (y * self.height / h).min(self.height - 1);
            for x in 0..w {
                let sx = (x * self.width / w).min(self.width - 1);
                out.set(x, y, self.get(sx, sy));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_pads_short_rows() {
        let bm = PixelBitmap::from_rows(&["##", "#"]);
        assert_eq!((bm.width, bm.height), (2, 2));
        assert!(bm.get(0, 1));
        assert!(!bm.get(1, 1));
    }

    #[test]
    fn empty_detection() {
        assert!(PixelBitmap::new(0, 5).is_empty());
        assert!(PixelBitmap::new(3, 3).is_empty());
        assert!(!PixelBitmap::from_rows(&["..#"]).is_empty());
    }

    #[test]
    fn occupied_is_row_major() {
        let bm = PixelBitmap::from_rows(&[".#", "#."]);
        let cells: Vec<_> = bm.occupied().collect();
        assert_eq!(cells, vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn scale_doubles_each_pixel() {
        let bm = PixelBitmap::from_rows(&["#.", ".#"]);
        let big = bm.scaled(200);
        assert_eq!((big.width, big.height), (4, 4));
        assert!(big.get(0, 0) && big.get(1, 1));
        assert!(!big.get(2, 0));
        assert!(big.get(3, 3));
    }

    #[test]
    fn scale_down_keeps_at_least_one_pixel() {
        let bm = PixelBitmap::from_rows(&["###"]);
        let small = bm.scaled(1);
        assert_eq!((small.width, small.height), (1, 1));
        assert!(small.get(0, 0));
    }
}
