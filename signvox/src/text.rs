//! Text rasterization.
//!
//! Sign generation treats text rendering as a collaborator behind the
//! [`TextRasterizer`] trait. [`BitmapFont`] is the built-in implementation: a
//! fixed 5x7 pixel font with greedy word wrapping.

use crate::bitmap::PixelBitmap;
use crate::error::RasterError;

/// Vertical gap between stacked lines, in pixels.
pub const LINE_SPACING: usize = 1;

/// Per-line bitmaps for a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterizedText {
    pub lines: Vec<PixelBitmap>,
    /// Sum of line heights plus [`LINE_SPACING`] between consecutive lines.
    pub total_height: usize,
}

impl RasterizedText {
    pub fn from_lines(lines: Vec<PixelBitmap>) -> Self {
        let total_height = lines.iter().map(|l| l.height).sum::<usize>()
            + LINE_SPACING * lines.len().saturating_sub(1);
        RasterizedText {
            lines,
            total_height,
        }
    }
}

/// Turns a string into line bitmaps no wider than `max_width` where possible.
pub trait TextRasterizer {
    fn rasterize(&self, text: &str, max_width: usize) -> Result<RasterizedText, RasterError>;
}

impl<F> TextRasterizer for F
where
    F: Fn(&str, usize) -> Result<RasterizedText, RasterError>,
{
    fn rasterize(&self, text: &str, max_width: usize) -> Result<RasterizedText, RasterError> {
        self(text, max_width)
    }
}

const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;
const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;

/// Built-in monospace 5x7 pixel font.
///
/// Letters are case-folded. Characters without a glyph render as blank cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFont;

impl TextRasterizer for BitmapFont {
    fn rasterize(&self, text: &str, max_width: usize) -> Result<RasterizedText, RasterError> {
        let max_chars = ((max_width + 1) / GLYPH_ADVANCE).max(1);
        let lines = wrap(text, max_chars)
            .iter()
            .map(|line| render_line(line))
            .collect();
        Ok(RasterizedText::from_lines(lines))
    }
}

/// Pixel width of a run of `chars` glyphs.
pub fn line_width(chars: usize) -> usize {
    (chars * GLYPH_ADVANCE).saturating_sub(1)
}

/// Greedy word wrap; explicit newlines always break.
fn wrap(text: &str, max_chars: usize) -> Vec<Vec<char>> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line: Vec<char> = Vec::new();
        for word in paragraph.split_whitespace() {
            let word: Vec<char> = word.chars().collect();
            let needed = if line.is_empty() {
                word.len()
            } else {
                line.len() + 1 + word.len()
            };
            if needed <= max_chars {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.extend(word);
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            // Words longer than a line are broken by character.
            let mut pieces = word.chunks(max_chars).peekable();
            while let Some(piece) = pieces.next() {
                if pieces.peek().is_some() {
                    lines.push(piece.to_vec());
                } else {
                    line = piece.to_vec();
                }
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

fn render_line(chars: &[char]) -> PixelBitmap {
    let mut bitmap = PixelBitmap::new(line_width(chars.len()), GLYPH_HEIGHT);
    for (i, &c) in chars.iter().enumerate() {
        let ox = i * GLYPH_ADVANCE;
        for (y, &row) in glyph(c).iter().enumerate() {
            for x in 0..GLYPH_WIDTH {
                if (row >> (GLYPH_WIDTH - 1 - x)) & 1 != 0 {
                    bitmap.set(ox + x, y, true);
                }
            }
        }
    }
    bitmap
}

/// Row masks, top row first, bit 4 is the leftmost column.
fn glyph(c: char) -> [u8; GLYPH_HEIGHT] {
    match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        ',' => [0, 0, 0, 0, 0b01100, 0b00100, 0b01000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0, 0b00100],
        '-' => [0, 0, 0, 0b11111, 0, 0, 0],
        ':' => [0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0],
        '\'' => [0b00100, 0b00100, 0b01000, 0, 0, 0, 0],
        '/' => [0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '+' => [0, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        _ => [0; GLYPH_HEIGHT],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_dimensions() {
        let text = BitmapFont.rasterize("HI", 44).unwrap();
        assert_eq!(text.lines.len(), 1);
        assert_eq!(text.lines[0].width, 11);
        assert_eq!(text.lines[0].height, 7);
        assert_eq!(text.total_height, 7);
    }

    #[test]
    fn glyph_h_has_crossbar() {
        let text = BitmapFont.rasterize("H", 10).unwrap();
        let line = &text.lines[0];
        for x in 0..5 {
            assert!(line.get(x, 3), "crossbar ({x}, 3)");
        }
        assert!(!line.get(2, 0));
    }

    #[test]
    fn lowercase_matches_uppercase() {
        let lower = BitmapFont.rasterize("path", 60).unwrap();
        let upper = BitmapFont.rasterize("PATH", 60).unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        // 17 pixels fit three glyphs per line.
        let text = BitmapFont.rasterize("ABC DE", 17).unwrap();
        assert_eq!(text.lines.len(), 2);
        assert_eq!(text.lines[0].width, 17);
        assert_eq!(text.lines[1].width, 11);
        assert_eq!(text.total_height, 7 + 1 + 7);
    }

    #[test]
    fn breaks_overlong_words() {
        let lines = wrap("ABCDEFG", 3);
        let strings: Vec<String> = lines.iter().map(|l| l.iter().collect()).collect();
        assert_eq!(strings, vec!["ABC", "DEF", "G"]);
    }

    #[test]
    fn explicit_newline_breaks() {
        let text = BitmapFont.rasterize("A\nB", 100).unwrap();
        assert_eq!(text.lines.len(), 2);
    }

    #[test]
    fn blank_text_has_no_lines() {
        let text = BitmapFont.rasterize("   ", 40).unwrap();
        assert!(text.lines.is_empty());
        assert_eq!(text.total_height, 0);
    }

    #[test]
    fn unknown_characters_are_blank() {
        let text = BitmapFont.rasterize("~", 40).unwrap();
        assert!(text.lines[0].is_empty());
    }
}
