/// Fully transparent; also the implicit value of an empty voxel.
pub const EMPTY: u8 = 0;
/// Hanging sign backplate.
pub const BACKPLATE: u8 = 1;
/// Anchor voxel, standard sign frame and standard sign content.
pub const FRAME: u8 = 2;
/// Hanging sign content (sticker).
pub const STICKER: u8 = 3;

/// The fixed 256-entry RGBA color table. Slots 4..=255 are unused.
pub const PALETTE: [[u8; 4]; 256] = {
    let mut table = [[0u8; 4]; 256];
    table[BACKPLATE as usize] = [0x6b, 0x4a, 0x2f, 0xff];
    table[FRAME as usize] = [0x2b, 0x2b, 0x2b, 0xff];
    table[STICKER as usize] = [0xf2, 0xc1, 0x4e, 0xff];
    table
};
