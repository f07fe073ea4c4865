//! The fixed Spectrum palette and nearest-color matching.

use crate::utils::{distance_squared, hash};

/// The 15 colors the Spectrum can display.
///
/// Indices 0..8 are the normal bank, 8..15 the bright bank. Bright black is the same as black and
/// is therefore missing, which shifts the bright bank by one: index 8 is bright *blue*.
pub const PALETTE: [[u8; 3]; 15] = [
    [0x00, 0x00, 0x00], // black
    [0x00, 0x00, 0xD7], // blue
    [0xD7, 0x00, 0x00], // red
    [0xD7, 0x00, 0xD7], // magenta
    [0x00, 0xD7, 0x00], // green
    [0x00, 0xD7, 0xD7], // cyan
    [0xD7, 0xD7, 0x00], // yellow
    [0xD7, 0xD7, 0xD7], // white
    [0x00, 0x00, 0xFF], // bright blue
    [0xFF, 0x00, 0x00], // bright red
    [0xFF, 0x00, 0xFF], // bright magenta
    [0x00, 0xFF, 0x00], // bright green
    [0x00, 0xFF, 0xFF], // bright cyan
    [0xFF, 0xFF, 0x00], // bright yellow
    [0xFF, 0xFF, 0xFF], // bright white
];

/// First index of the bright bank.
pub const BRIGHT_BANK: u8 = 8;

/// Returns the index of the palette entry closest to `rgb`.
///
/// Distance is the squared euclidean distance in RGB space. On ties, the lower index wins.
pub fn nearest_palette_index(rgb: [u8; 3]) -> u8 {
    let mut best = 0;
    let mut best_distance = u32::MAX;

    for (i, &color) in PALETTE.iter().enumerate() {
        let distance = distance_squared(rgb, color);
        if distance < best_distance {
            best_distance = distance;
            best = i as u8;
        }
    }

    best
}

/// Never a valid key, since keys only use the lower 24 bits.
const EMPTY_SLOT: u32 = u32::MAX;

/// Memoizes [`nearest_palette_index`].
///
/// Direct-mapped with 64 slots, selected by the same byte-sum hash for every color. A new color
/// landing on an occupied slot evicts the previous one. Results are identical to calling
/// [`nearest_palette_index`] directly.
#[derive(Debug, Clone, Copy)]
pub struct PaletteCache {
    keys: [u32; 64],
    indices: [u8; 64],
}

impl PaletteCache {
    pub const fn new() -> Self {
        Self {
            keys: [EMPTY_SLOT; 64],
            indices: [0; 64],
        }
    }

    #[inline]
    pub fn nearest(&mut self, rgb: [u8; 3]) -> u8 {
        let [r, g, b] = rgb;
        let key = u32::from_be_bytes([0, r, g, b]);
        let slot = usize::from(hash(rgb));

        if self.keys[slot] == key {
            return self.indices[slot];
        }

        let index = nearest_palette_index(rgb);
        self.keys[slot] = key;
        self.indices[slot] = index;
        index
    }

    /// Quantizes an RGBA8888 pixel, `None` if it is fully transparent.
    #[inline]
    pub fn nearest_rgba(&mut self, [r, g, b, a]: [u8; 4]) -> Option<u8> {
        (a != 0).then(|| self.nearest([r, g, b]))
    }

    /// Replaces the color of every opaque pixel with its nearest palette color, in place.
    ///
    /// Alpha is kept as is and transparent pixels are left untouched. Works for any raster size,
    /// no cell constraints are applied.
    pub fn quantize_pixels(&mut self, pixels: &mut [[u8; 4]]) {
        for pixel in pixels.iter_mut() {
            if let Some(index) = self.nearest_rgba(*pixel) {
                let [r, g, b] = PALETTE[usize::from(index)];
                *pixel = [r, g, b, pixel[3]];
            }
        }
    }
}

impl Default for PaletteCache {
    fn default() -> Self {
        Self::new()
    }
}
