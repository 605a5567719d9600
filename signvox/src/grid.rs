use std::collections::BTreeMap;

use crate::palette;

/// Logical voxel coordinate: `x` across, `y` up, `z` into the sign.
pub type Coord = (i64, i64, i64);

/// Sparse voxel storage keyed by coordinate.
///
/// Every write replaces whatever was stored at that coordinate; there is no
/// blending. Enumeration order is coordinate order, so encoding the same
/// grid always produces the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoxelGrid {
    voxels: BTreeMap<Coord, u8>,
}

impl VoxelGrid {
    pub fn new() -> Self {
        VoxelGrid::default()
    }

    /// Store `index` at `(x, y, z)`, replacing any earlier value.
    ///
    /// `index` must be a non-empty palette slot (1..=255).
    pub fn set(&mut self, x: i64, y: i64, z: i64, index: u8) {
        debug_assert_ne!(index, palette::EMPTY, "voxel ({x}, {y}, {z}) set to empty slot");
        self.voxels.insert((x, y, z), index);
    }

    pub fn get(&self, x: i64, y: i64, z: i64) -> Option<u8> {
        self.voxels.get(&(x, y, z)).copied()
    }

    /// Write the origin marker. Must be the final write to the grid.
    pub fn place_anchor(&mut self) {
        self.set(0, 0, 0, palette::FRAME);
    }

    /// Number of distinct occupied coordinates.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, u8)> + '_ {
        self.voxels.iter().map(|(&c, &i)| (c, i))
    }
}
