//! Two-color reduction of a single 8x8 character cell.

use crate::{
    consts::{ATTR_BRIGHT, ATTR_COLOR_MASK, ATTR_PAPER_SHIFT, CELL_SIZE},
    palette::{BRIGHT_BANK, PALETTE},
    utils::distance_squared,
};
use core::cmp::Ordering;

/// Palette indices of the 64 pixels of a cell, row-major. `None` marks a transparent pixel.
pub type CellPixels = [Option<u8>; 64];

/// Decoded attribute byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAttribute {
    /// Ink base color, 0..8.
    pub ink: u8,
    /// Paper base color, 0..8.
    pub paper: u8,
    pub bright: bool,
}

impl CellAttribute {
    /// Builds the attribute for a pair of palette indices (0..15).
    ///
    /// The cell is bright if either color comes from the bright bank. Both colors are then reduced
    /// to their base color.
    pub const fn from_indices(ink: u8, paper: u8) -> Self {
        Self {
            ink: ink % 8,
            paper: paper % 8,
            bright: ink >= BRIGHT_BANK || paper >= BRIGHT_BANK,
        }
    }

    pub const fn from_byte(byte: u8) -> Self {
        Self {
            ink: byte & ATTR_COLOR_MASK,
            paper: (byte >> ATTR_PAPER_SHIFT) & ATTR_COLOR_MASK,
            bright: byte & ATTR_BRIGHT != 0,
        }
    }

    /// Packs the attribute, flash is always off.
    pub const fn to_byte(self) -> u8 {
        let bright = if self.bright { ATTR_BRIGHT } else { 0 };
        bright
            | (self.paper & ATTR_COLOR_MASK) << ATTR_PAPER_SHIFT
            | (self.ink & ATTR_COLOR_MASK)
    }

    /// Palette index of the ink color.
    pub const fn ink_index(self) -> u8 {
        expand_base(self.ink, self.bright)
    }

    /// Palette index of the paper color.
    pub const fn paper_index(self) -> u8 {
        expand_base(self.paper, self.bright)
    }
}

/// White has no bright entry of its own in the palette, so it stays at index 7 even in bright
/// cells.
const fn expand_base(base: u8, bright: bool) -> u8 {
    let base = base & ATTR_COLOR_MASK;
    if bright && base != 7 {
        base + BRIGHT_BANK
    } else {
        base
    }
}

/// A cell ready to be written: its attribute byte and one bitmap byte per scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizedCell {
    pub attribute: CellAttribute,
    /// Bit 7 is the leftmost pixel. Set bits are ink.
    pub rows: [u8; 8],
}

/// Ranks `(index, count)` pairs: higher counts first, then lower palette indices.
#[inline]
pub fn by_frequency((a_index, a_count): (u8, u8), (b_index, b_count): (u8, u8)) -> Ordering {
    b_count.cmp(&a_count).then_with(|| a_index.cmp(&b_index))
}

/// Picks the palette indices used as ink and paper for a cell.
///
/// Ink is the most frequent color, paper the second most frequent one. Transparent pixels aren't
/// counted. If the cell has fewer than two colors, paper becomes white for black ink and black
/// otherwise, so the two always differ.
///
/// All present indices must be valid palette indices (0..15).
pub fn select_ink_paper(pixels: &CellPixels) -> (u8, u8) {
    let mut counts = [0u8; PALETTE.len()];
    for &index in pixels.iter().flatten() {
        counts[usize::from(index)] += 1;
    }

    let most_frequent = |excluded: Option<u8>| {
        (0..PALETTE.len() as u8)
            .filter(|&i| counts[usize::from(i)] > 0 && Some(i) != excluded)
            .min_by(|&a, &b| {
                by_frequency((a, counts[usize::from(a)]), (b, counts[usize::from(b)]))
            })
    };

    let ink = most_frequent(None).unwrap_or(0);
    let paper = most_frequent(Some(ink)).unwrap_or(ink);

    if ink == paper {
        (ink, if ink == 0 { 7 } else { 0 })
    } else {
        (ink, paper)
    }
}

/// Reduces a cell to two colors.
///
/// Every pixel is assigned to whichever of ink and paper is closer to its own palette color,
/// preferring ink on ties. Transparent pixels become paper.
pub fn quantize_cell(pixels: &CellPixels) -> QuantizedCell {
    let (ink, paper) = select_ink_paper(pixels);
    let ink_rgb = PALETTE[usize::from(ink)];
    let paper_rgb = PALETTE[usize::from(paper)];

    let mut rows = [0u8; 8];
    for (row, line) in rows
        .iter_mut()
        .zip(pixels.chunks_exact(usize::from(CELL_SIZE)))
    {
        for (px, pixel) in line.iter().enumerate() {
            let Some(index) = *pixel else {
                continue;
            };

            let rgb = PALETTE[usize::from(index)];
            if distance_squared(rgb, ink_rgb) <= distance_squared(rgb, paper_rgb) {
                *row |= 0b1000_0000 >> px;
            }
        }
    }

    QuantizedCell {
        attribute: CellAttribute::from_indices(ink, paper),
        rows,
    }
}
