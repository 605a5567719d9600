//! Content layout: arranging the icon and text block on the sign face and
//! painting them into the grid.

use crate::bitmap::PixelBitmap;
use crate::error::RasterError;
use crate::grid::VoxelGrid;
use crate::palette;
use crate::spec::{IconPosition, SignKind, SignSpec, FACE_PLANE};
use crate::text::{RasterizedText, TextRasterizer, LINE_SPACING};

/// Horizontal gap between consecutive content items.
pub const ITEM_SPACING: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Icon,
    Text,
}

/// A bitmap to be placed on the sign face, with its explicit offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub kind: ContentKind,
    pub bitmap: PixelBitmap,
    pub offset_x: i64,
    pub offset_y: i64,
}

impl ContentItem {
    /// Width this item contributes to the centred content row.
    ///
    /// A hanging sign's text block already spans the whole content area, so
    /// when an icon shares the row its width is reduced by the icon width
    /// plus one item gap.
    pub fn effective_width(&self, area: &ContentArea, icon_width: Option<usize>) -> i64 {
        let width = self.bitmap.width as i64;
        match (self.kind, icon_width) {
            (ContentKind::Text, Some(icon)) if area.hanging => width - (icon as i64 + ITEM_SPACING),
            _ => width,
        }
    }
}

/// The sign face region available to content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentArea {
    pub padding: i64,
    pub available_width: i64,
    pub available_height: i64,
    pub sign_height: i64,
    pub hanging: bool,
}

impl ContentArea {
    pub fn for_spec(spec: &SignSpec) -> Self {
        let padding = i64::from(spec.padding());
        ContentArea {
            padding,
            available_width: i64::from(spec.width()) - 2 * padding,
            available_height: i64::from(spec.height()) - 2 * padding,
            sign_height: i64::from(spec.height()),
            hanging: spec.is_hanging(),
        }
    }
}

/// Position of an item's top-left bitmap pixel in face coordinates
/// (rows counted downwards from the top edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
}

/// Build the ordered content items for a sign.
///
/// The rasterizer is only consulted when the text is not blank.
pub fn collect_items(
    spec: &SignSpec,
    area: &ContentArea,
    rasterizer: &dyn TextRasterizer,
) -> Result<Vec<ContentItem>, RasterError> {
    let (icon_offset_x, text_offset_x, icon_position) = match &spec.sign {
        SignKind::Hanging(h) => (
            i64::from(h.icon_offset_x),
            i64::from(h.text_offset_x),
            h.icon_position,
        ),
        SignKind::Standard(_) => (0, 0, IconPosition::Left),
    };

    let mut items = Vec::with_capacity(2);

    if let Some(icon) = spec.icon.as_ref().filter(|i| spec.with_icon && !i.is_empty()) {
        items.push(ContentItem {
            kind: ContentKind::Icon,
            bitmap: icon.clone(),
            offset_x: icon_offset_x,
            offset_y: spec.icon_offset_y.into(),
        });
    }

    if !spec.text.trim().is_empty() {
        let block_width = area.available_width.max(0) as usize;
        let text = rasterizer.rasterize(&spec.text, block_width)?;
        items.push(ContentItem {
            kind: ContentKind::Text,
            bitmap: stack_lines(&text, block_width)?,
            offset_x: text_offset_x,
            offset_y: spec.text_offset_y.into(),
        });
    }

    if area.hanging && icon_position == IconPosition::Right {
        items.reverse();
    }
    Ok(items)
}

/// Stack line bitmaps into one block of `block_width`, centring each line
/// horizontally and separating lines by [`LINE_SPACING`]. Pixels falling
/// outside the block are clipped.
pub fn stack_lines(text: &RasterizedText, block_width: usize) -> Result<PixelBitmap, RasterError> {
    let height = text.lines.iter().map(|l| l.height).sum::<usize>()
        + LINE_SPACING * text.lines.len().saturating_sub(1);
    let mut block = PixelBitmap::new(block_width, height);

    let mut cursor = 0i64;
    for (index, line) in text.lines.iter().enumerate() {
        let expected = line.width * line.height;
        if line.pixels.len() != expected {
            return Err(RasterError::MalformedLine {
                index,
                got: line.pixels.len(),
                expected,
            });
        }

        let x0 = (block_width as i64 - line.width as i64).div_euclid(2);
        let y0 = cursor + i64::from(line.offset_y.unwrap_or(0));
        for (px, py) in line.occupied() {
            let (x, y) = (x0 + px as i64, y0 + py as i64);
            if x >= 0 && y >= 0 && (x as usize) < block.width && (y as usize) < block.height {
                block.set(x as usize, y as usize, true);
            }
        }
        cursor += (line.height + LINE_SPACING) as i64;
    }
    Ok(block)
}

/// Compute the face position of every item, in item order.
pub fn layout(items: &[ContentItem], area: &ContentArea) -> Vec<Placement> {
    let icon_width = items
        .iter()
        .find(|i| i.kind == ContentKind::Icon)
        .map(|i| i.bitmap.width);

    let widths: Vec<i64> = items
        .iter()
        .map(|i| i.effective_width(area, icon_width))
        .collect();
    let mut total: i64 = widths.iter().sum();
    if items.len() > 1 {
        total += ITEM_SPACING * (items.len() as i64 - 1);
    }

    let mut cursor = area.padding + (area.available_width - total).div_euclid(2);
    items
        .iter()
        .zip(&widths)
        .map(|(item, &width)| {
            let base_y = area.padding + (area.available_height - item.bitmap.height as i64).div_euclid(2);
            let placement = Placement {
                x: cursor + item.offset_x,
                y: base_y + item.offset_y,
            };
            log::trace!("{:?} placed at ({}, {}), width {width}", item.kind, placement.x, placement.y);
            cursor += width + ITEM_SPACING;
            placement
        })
        .collect()
}

/// Paint an item's occupied pixels onto the face plane, flipping rows so
/// bitmap row 0 lands at the top of the sign. Returns the number of writes.
pub fn paint(
    grid: &mut VoxelGrid,
    item: &ContentItem,
    at: Placement,
    area: &ContentArea,
    color: u8,
) -> usize {
    let mut written = 0;
    for (px, py) in item.bitmap.occupied() {
        let x = at.x + px as i64;
        let y = area.sign_height - 1 - (py as i64 + at.y);
        grid.set(x, y, FACE_PLANE, color);
        written += 1;
    }
    written
}

/// Palette slot for content on this kind of sign.
pub fn content_color(spec: &SignSpec) -> u8 {
    if spec.is_hanging() {
        palette::STICKER
    } else {
        palette::FRAME
    }
}

/// Collect, lay out and paint all content. Returns the number of writes.
pub fn compose(
    spec: &SignSpec,
    rasterizer: &dyn TextRasterizer,
    grid: &mut VoxelGrid,
) -> Result<usize, RasterError> {
    let area = ContentArea::for_spec(spec);
    let items = collect_items(spec, &area, rasterizer)?;
    let placements = layout(&items, &area);
    let color = content_color(spec);

    let written = items
        .iter()
        .zip(placements)
        .map(|(item, at)| paint(grid, item, at, &area, color))
        .sum();
    log::debug!("content: {} items, {written} voxels", items.len());
    Ok(written)
}
