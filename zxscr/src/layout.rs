//! Screen memory addressing.
//!
//! Bitmap byte offsets are built from the bits of the scanline `y` and the character column `x`:
//!
//! ```plain
//! .- bitmap offset -------------------------------.
//! | 12 11 | 10  9  8 |  7  6  5 |  4  3  2  1  0  |
//! |-------+----------+----------+-----------------|
//! | Y7 Y6 | Y2 Y1 Y0 | Y5 Y4 Y3 | X4 X3 X2 X1 X0  |
//! `-----------------------------------------------`
//! ```
//!
//! i.e. `third * 2048 + line * 256 + row_in_third * 32 + x`.

use crate::consts::{BITMAP_LEN, CELL_COLUMNS};

/// Offset of the bitmap byte holding scanline `y` (0..192) of character column `cell_col`
/// (0..32).
#[inline]
pub const fn bitmap_offset(y: u8, cell_col: u8) -> usize {
    let y = y as usize;
    let third = y / 64;
    let line = y % 8;
    let row_in_third = (y % 64) / 8;

    third * 2048 + line * 256 + row_in_third * 32 + cell_col as usize
}

/// Inverse of [`bitmap_offset`], returns `(y, cell_col)`.
///
/// `offset` needs to be inside the bitmap region (`0..6144`).
#[inline]
pub const fn bitmap_position(offset: usize) -> (u8, u8) {
    debug_assert!(offset < BITMAP_LEN);

    let third = offset / 2048;
    let line = (offset / 256) % 8;
    let row_in_third = (offset / 32) % 8;
    let cell_col = offset % 32;

    ((third * 64 + row_in_third * 8 + line) as u8, cell_col as u8)
}

/// Absolute offset of the attribute byte of a cell, within the complete `.scr` image.
#[inline]
pub const fn attribute_offset(cell_row: u8, cell_col: u8) -> usize {
    BITMAP_LEN + cell_row as usize * CELL_COLUMNS as usize + cell_col as usize
}
