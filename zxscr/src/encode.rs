use crate::{
    cell::{quantize_cell, CellPixels},
    consts::*,
    layout::{attribute_offset, bitmap_offset},
    palette::PaletteCache,
};
use itertools::iproduct;
use snafu::{ensure, Snafu};

#[cfg(feature = "std")]
mod std_api;
#[cfg(feature = "std")]
pub use std_api::*;

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum EncodeSliceError {
    #[snafu(display(
        "Only {SCREEN_WIDTH}x{SCREEN_HEIGHT} images can be encoded, got {width}x{height} with {pixel_count} pixels"
    ))]
    InvalidDimensions {
        width: u16,
        height: u16,
        pixel_count: usize,
    },
}

/// Encoder state. Holds the palette lookup cache, which can be reused across images.
#[derive(Debug, Clone, Copy)]
pub struct ScrEncodeContext {
    pub cache: PaletteCache,
}

impl ScrEncodeContext {
    pub const fn new() -> Self {
        Self {
            cache: PaletteCache::new(),
        }
    }
}

impl Default for ScrEncodeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrEncodeContext {
    /// Encodes a 256x192 RGBA8888 image into `output`.
    ///
    /// Fully transparent pixels are ignored when picking cell colors, and are drawn as paper.
    /// `output` is only touched if the dimensions are valid.
    pub fn encode_to_slice(
        &mut self,
        width: u16,
        height: u16,
        pixels: &[[u8; 4]],
        output: &mut [u8; SCR_LEN],
    ) -> Result<(), EncodeSliceError> {
        check_dimensions(width, height, pixels.len())?;

        for (cell_row, cell_col) in iproduct!(0..CELL_ROWS, 0..CELL_COLUMNS) {
            let cell = quantize_cell(&self.cell_pixels(pixels, cell_row, cell_col));

            output[attribute_offset(cell_row, cell_col)] = cell.attribute.to_byte();
            for (py, &row) in (0..CELL_SIZE).zip(cell.rows.iter()) {
                output[bitmap_offset(cell_row * CELL_SIZE + py, cell_col)] = row;
            }
        }

        Ok(())
    }

    /// Appends the encoded image to `w`.
    #[cfg(feature = "alloc")]
    pub fn encode_to_vec(
        &mut self,
        width: u16,
        height: u16,
        pixels: &[[u8; 4]],
        w: &mut alloc::vec::Vec<u8>,
    ) -> Result<(), EncodeSliceError> {
        let mut output = [0; SCR_LEN];
        self.encode_to_slice(width, height, pixels, &mut output)?;
        w.extend_from_slice(&output);

        Ok(())
    }

    /// Maps every pixel of a 256x192 RGBA8888 image to its palette index, row-major. Transparent
    /// pixels map to `None`.
    #[cfg(feature = "alloc")]
    pub fn quantize_raster(
        &mut self,
        width: u16,
        height: u16,
        pixels: &[[u8; 4]],
    ) -> Result<alloc::vec::Vec<Option<u8>>, EncodeSliceError> {
        check_dimensions(width, height, pixels.len())?;

        Ok(pixels.iter().map(|&p| self.cache.nearest_rgba(p)).collect())
    }

    fn cell_pixels(&mut self, pixels: &[[u8; 4]], cell_row: u8, cell_col: u8) -> CellPixels {
        let size = usize::from(CELL_SIZE);
        let width = usize::from(SCREEN_WIDTH);
        let top_left = usize::from(cell_row) * size * width + usize::from(cell_col) * size;

        let mut cell = [None; 64];
        for (line, out) in cell.chunks_exact_mut(size).enumerate() {
            let start = top_left + line * width;
            for (out, &pixel) in out.iter_mut().zip(&pixels[start..start + size]) {
                *out = self.cache.nearest_rgba(pixel);
            }
        }
        cell
    }
}

pub(crate) fn check_dimensions(
    width: u16,
    height: u16,
    pixel_count: usize,
) -> Result<(), EncodeSliceError> {
    ensure!(
        width == SCREEN_WIDTH && height == SCREEN_HEIGHT && pixel_count == PIXEL_COUNT,
        encode_slice_error::InvalidDimensionsSnafu {
            width,
            height,
            pixel_count
        }
    );

    Ok(())
}
