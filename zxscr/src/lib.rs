//! Encoder and decoder for the ZX Spectrum `SCREEN$` (`.scr`) image format.
//!
//! A `.scr` file is a raw dump of the Spectrum's display memory: a 256x192 1-bit bitmap followed
//! by one attribute byte per 8x8 character cell. Each cell can only show two colors (ink and
//! paper) out of the 15-color hardware palette, and the bright bank applies to the whole cell.
//!
//! # File layout
//!
//! ```plain
//! .- SCREEN$ -------------------------------------.
//! | 0x0000 .. 0x1800 | bitmap, 6144 bytes         |
//! | 0x1800 .. 0x1B00 | attributes, 768 bytes      |
//! `-----------------------------------------------`
//! ```
//!
//! The bitmap is not linear. The screen is split into three 64-line thirds, and within a third
//! the first scanline of every character row comes first, then the second scanline of every row,
//! and so on. See [`layout`] for the exact mapping.
//!
//! Attributes are stored row-major, one byte per cell, see [`consts::ATTR_BRIGHT`] for the bit
//! layout.
//!
//! # Encoding
//!
//! Every opaque source pixel is mapped to its nearest [palette](palette::PALETTE) entry. Each cell
//! then keeps its two most frequent entries as ink and paper, and every pixel of the cell is
//! reassigned to whichever of the two is closer. Transparent pixels don't take part in the color
//! statistics and end up as paper.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod cell;
pub mod decode;
pub mod encode;
pub mod layout;
pub mod palette;
pub mod utils;

pub use decode::{ColorFormat, Rgb565, Rgb888, Rgba8888};
pub use encode::ScrEncodeContext;
pub use palette::{nearest_palette_index, PALETTE};

pub mod consts {
    /// Screen width in pixels.
    pub const SCREEN_WIDTH: u16 = 256;
    /// Screen height in pixels.
    pub const SCREEN_HEIGHT: u16 = 192;
    /// Number of pixels of a full screen.
    pub const PIXEL_COUNT: usize = SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize;

    /// Character cells per row.
    pub const CELL_COLUMNS: u8 = 32;
    /// Character cell rows.
    pub const CELL_ROWS: u8 = 24;
    /// Width and height of a character cell, in pixels.
    pub const CELL_SIZE: u8 = 8;

    /// Size of the bitmap region.
    pub const BITMAP_LEN: usize = 6144;
    /// Size of the attribute region.
    pub const ATTR_LEN: usize = 768;
    /// Size of a complete `.scr` image.
    pub const SCR_LEN: usize = BITMAP_LEN + ATTR_LEN;

    /// Flashing cell. Never set by the encoder, ignored by the decoder.
    ///
    /// ```plain
    /// .- attribute -------------.
    /// |  7  6  5  4  3  2  1  0 |
    /// |--+--+--------+----------|
    /// |  F  B | paper  |   ink  |
    /// `-------------------------`
    /// ```
    pub const ATTR_FLASH: u8 = 0b1000_0000;

    /// Both ink and paper use the bright palette bank.
    ///
    /// - bit 7: flash, see [`ATTR_FLASH`]
    /// - bit 6: bright
    /// - bits 5-3: paper base color 0..7
    /// - bits 2-0: ink base color 0..7
    pub const ATTR_BRIGHT: u8 = 0b0100_0000;

    /// Mask of a 3-bit base color. Paper needs to be shifted by [`ATTR_PAPER_SHIFT`] first.
    pub const ATTR_COLOR_MASK: u8 = 0b0000_0111;
    pub const ATTR_PAPER_SHIFT: u8 = 3;
}
