//! MagicaVoxel `.vox` container encoding and decoding.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! "VOX " version:u32
//! MAIN  content=0 children=N
//!   SIZE  x:u32 y:u32 z:u32
//!   XYZI  count:u32 (x:u8 y:u8 z:u8 index:u8) * count
//!   RGBA  [r g b a] * 256
//! ```
//!
//! The container is z-up, so the logical vertical axis (`y`) and depth axis
//! (`z`) swap places on the way in and out. RGBA entry `k` holds the color
//! referenced by voxel index `k + 1`, so palette slot `i` is written at
//! position `(i + 255) % 256`.

use crate::error::VoxError;
use crate::grid::{Coord, VoxelGrid};

pub const MAGIC: &[u8; 4] = b"VOX ";
pub const VERSION: u32 = 150;

const CHUNK_HEADER_LEN: usize = 12;

/// One XYZI record in container axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelRecord {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub index: u8,
}

/// Contents of a decoded `.vox` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxModel {
    pub version: u32,
    /// Extents in container axis order.
    pub size: [u32; 3],
    pub voxels: Vec<VoxelRecord>,
    /// Palette indexed by voxel index (slot 0 is the empty slot).
    pub palette: [[u8; 4]; 256],
}

/// Container size triple for a logical `width x height x depth` model.
pub fn container_size(width: u32, height: u32, depth: u32) -> [u32; 3] {
    [width, depth, height]
}

/// Map a logical coordinate to container axes.
///
/// Components are truncated to 8 bits without bounds checking.
pub fn to_container((x, y, z): Coord) -> [u8; 3] {
    [x as u8, z as u8, y as u8]
}

/// Encode a grid and palette as a complete `.vox` byte stream.
pub fn encode(grid: &VoxelGrid, size: [u32; 3], palette: &[[u8; 4]; 256]) -> Vec<u8> {
    let mut size_content = Vec::with_capacity(12);
    for extent in size {
        size_content.extend_from_slice(&extent.to_le_bytes());
    }

    let mut xyzi_content = Vec::with_capacity(4 + grid.len() * 4);
    xyzi_content.extend_from_slice(&(grid.len() as u32).to_le_bytes());
    for (coord, index) in grid.iter() {
        let [x, y, z] = to_container(coord);
        xyzi_content.extend_from_slice(&[x, y, z, index]);
    }

    let mut rgba_content = Vec::with_capacity(256 * 4);
    for k in 0..256 {
        rgba_content.extend_from_slice(&palette[(k + 1) % 256]);
    }

    let mut children = Vec::new();
    write_chunk(&mut children, b"SIZE", &size_content, &[]);
    write_chunk(&mut children, b"XYZI", &xyzi_content, &[]);
    write_chunk(&mut children, b"RGBA", &rgba_content, &[]);

    let mut out = Vec::with_capacity(8 + CHUNK_HEADER_LEN + children.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    write_chunk(&mut out, b"MAIN", &[], &children);
    log::debug!(
        "encoded {} voxels, size {:?}: {} bytes",
        grid.len(),
        size,
        out.len()
    );
    out
}

fn write_chunk(out: &mut Vec<u8>, id: &[u8; 4], content: &[u8], children: &[u8]) {
    out.extend_from_slice(id);
    out.extend_from_slice(&(content.len() as u32).to_le_bytes());
    out.extend_from_slice(&(children.len() as u32).to_le_bytes());
    out.extend_from_slice(content);
    out.extend_from_slice(children);
}

/// Decode a `.vox` byte stream. Unknown chunks are skipped.
pub fn decode(data: &[u8]) -> Result<VoxModel, VoxError> {
    let mut reader = Reader { data, pos: 0 };
    let magic: [u8; 4] = reader.array("header")?;
    if &magic != MAGIC {
        return Err(VoxError::BadMagic(magic));
    }
    let version = reader.u32("header")?;

    let main = reader.chunk()?;
    if &main.id != b"MAIN" {
        return Err(VoxError::MissingChunk("MAIN"));
    }

    let mut size = None;
    let mut voxels = None;
    let mut palette = None;

    let mut children = Reader {
        data: main.children,
        pos: 0,
    };
    while !children.at_end() {
        let chunk = children.chunk()?;
        let mut content = Reader {
            data: chunk.content,
            pos: 0,
        };
        match &chunk.id {
            b"SIZE" => {
                size = Some([
                    content.u32("SIZE")?,
                    content.u32("SIZE")?,
                    content.u32("SIZE")?,
                ]);
            }
            b"XYZI" => {
                let declared = content.u32("XYZI")? as usize;
                let actual = content.remaining() / 4;
                if actual < declared {
                    return Err(VoxError::CountMismatch { declared, actual });
                }
                let mut records = Vec::with_capacity(declared);
                for _ in 0..declared {
                    let [x, y, z, index] = content.array("XYZI")?;
                    records.push(VoxelRecord { x, y, z, index });
                }
                voxels = Some(records);
            }
            b"RGBA" => {
                let mut table = [[0u8; 4]; 256];
                for k in 0..256 {
                    table[(k + 1) % 256] = content.array("RGBA")?;
                }
                palette = Some(table);
            }
            other => log::trace!("skipping chunk {:?}", String::from_utf8_lossy(other)),
        }
    }

    Ok(VoxModel {
        version,
        size: size.ok_or(VoxError::MissingChunk("SIZE"))?,
        voxels: voxels.ok_or(VoxError::MissingChunk("XYZI"))?,
        palette: palette.ok_or(VoxError::MissingChunk("RGBA"))?,
    })
}

struct Chunk<'a> {
    id: [u8; 4],
    content: &'a [u8],
    children: &'a [u8],
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn take(&mut self, n: usize, what: &'static str) -> Result<&'a [u8], VoxError> {
        if self.remaining() < n {
            return Err(VoxError::Truncated(what));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self, what: &'static str) -> Result<[u8; N], VoxError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    fn u32(&mut self, what: &'static str) -> Result<u32, VoxError> {
        Ok(u32::from_le_bytes(self.array(what)?))
    }

    fn chunk(&mut self) -> Result<Chunk<'a>, VoxError> {
        let id = self.array("chunk header")?;
        let content_len = self.u32("chunk header")? as usize;
        let children_len = self.u32("chunk header")? as usize;
        let content = self.take(content_len, "chunk content")?;
        let children = self.take(children_len, "chunk children")?;
        Ok(Chunk {
            id,
            content,
            children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{self, PALETTE};

    fn sample_grid() -> VoxelGrid {
        let mut grid = VoxelGrid::new();
        grid.set(1, 2, 3, palette::STICKER);
        grid.set(0, 0, 0, palette::FRAME);
        grid
    }

    #[test]
    fn header_and_chunk_order() {
        let bytes = encode(&sample_grid(), [4, 5, 6], &PALETTE);
        assert_eq!(&bytes[0..4], b"VOX ");
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 150);
        assert_eq!(&bytes[8..12], b"MAIN");
        assert_eq!(u32::from_le_bytes(bytes[12..16].try_into().unwrap()), 0);
        let children = u32::from_le_bytes(bytes[16..20].try_into().unwrap()) as usize;
        assert_eq!(bytes.len(), 20 + children);

        assert_eq!(&bytes[20..24], b"SIZE");
        let xyzi = 20 + CHUNK_HEADER_LEN + 12;
        assert_eq!(&bytes[xyzi..xyzi + 4], b"XYZI");
        let rgba = xyzi + CHUNK_HEADER_LEN + 4 + 2 * 4;
        assert_eq!(&bytes[rgba..rgba + 4], b"RGBA");
        assert_eq!(bytes.len(), rgba + CHUNK_HEADER_LEN + 1024);
    }

    #[test]
    fn axes_swap_vertical_and_depth() {
        assert_eq!(to_container((1, 2, 3)), [1, 3, 2]);
        assert_eq!(container_size(48, 40, 16), [48, 16, 40]);
    }

    #[test]
    fn coordinates_truncate_to_eight_bits() {
        assert_eq!(to_container((256, -1, 300)), [0, 44, 255]);
    }

    #[test]
    fn rgba_is_shifted_by_one_slot() {
        let bytes = encode(&VoxelGrid::new(), [1, 1, 1], &PALETTE);
        let rgba = bytes.len() - 1024;
        // First stored entry is slot 1, last stored entry is slot 0.
        assert_eq!(&bytes[rgba..rgba + 4], &PALETTE[1]);
        assert_eq!(&bytes[rgba + 4..rgba + 8], &PALETTE[2]);
        assert_eq!(&bytes[bytes.len() - 4..], &PALETTE[0]);
    }

    #[test]
    fn decode_reverses_encode() {
        let bytes = encode(&sample_grid(), [4, 5, 6], &PALETTE);
        let model = decode(&bytes).unwrap();
        assert_eq!(model.version, VERSION);
        assert_eq!(model.size, [4, 5, 6]);
        assert_eq!(model.palette, PALETTE);
        assert_eq!(model.voxels.len(), 2);
        assert!(model.voxels.contains(&VoxelRecord {
            x: 1,
            y: 3,
            z: 2,
            index: palette::STICKER
        }));
    }

    #[test]
    fn decode_rejects_bad_magic() {
        let err = decode(b"PNG\x00\x96\x00\x00\x00").unwrap_err();
        assert!(matches!(err, VoxError::BadMagic(_)));
    }

    #[test]
    fn decode_rejects_truncation() {
        let bytes = encode(&sample_grid(), [4, 5, 6], &PALETTE);
        let err = decode(&bytes[..bytes.len() - 10]).unwrap_err();
        assert!(matches!(err, VoxError::Truncated(_)));
    }

    #[test]
    fn decode_reports_count_mismatch() {
        let mut children = Vec::new();
        write_chunk(&mut children, b"SIZE", &[1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0], &[]);
        write_chunk(&mut children, b"XYZI", &[3, 0, 0, 0, 0, 0, 0, 1], &[]);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&VERSION.to_le_bytes());
        write_chunk(&mut bytes, b"MAIN", &[], &children);

        let err = decode(&bytes).unwrap_err();
        assert!(matches!(
            err,
            VoxError::CountMismatch {
                declared: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn decode_requires_palette() {
        let mut children = Vec::new();
        write_chunk(&mut children, b"SIZE", &[0; 12], &[]);
        write_chunk(&mut children, b"XYZI", &[0; 4], &[]);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&VERSION.to_le_bytes());
        write_chunk(&mut bytes, b"MAIN", &[], &children);

        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, VoxError::MissingChunk("RGBA")));
    }
}
