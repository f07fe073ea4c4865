use crate::{
    cell::CellAttribute,
    consts::*,
    layout::{attribute_offset, bitmap_offset},
    palette::PALETTE,
    utils::{encode_rgb565_unchecked, rgb888_to_rgb565, ByteOrder, NativeEndian},
};
use itertools::iproduct;
use snafu::{ensure, Snafu};

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum DecodeError {
    #[snafu(display("SCREEN$ images are exactly {SCR_LEN} bytes long, got {len} bytes"))]
    InvalidLength { len: usize },
    #[snafu(display("Output buffer has room for {len} pixels, {PIXEL_COUNT} are needed"))]
    OutputTooSmall { len: usize },
}

/// Pixel format of the decoded image.
pub trait ColorFormat {
    type OutputElement: Copy;

    fn to_output<B: ByteOrder>(rgb: [u8; 3]) -> Self::OutputElement;
}

/// `[r, g, b, a]`, always opaque.
pub struct Rgba8888;
/// `[r, g, b]`.
pub struct Rgb888;
/// RGB565 `u16`, stored in the byte order `B` passed to the decoder.
pub struct Rgb565;

impl ColorFormat for Rgba8888 {
    type OutputElement = [u8; 4];

    #[inline]
    fn to_output<B: ByteOrder>([r, g, b]: [u8; 3]) -> Self::OutputElement {
        [r, g, b, 0xFF]
    }
}

impl ColorFormat for Rgb888 {
    type OutputElement = [u8; 3];

    #[inline]
    fn to_output<B: ByteOrder>(rgb: [u8; 3]) -> Self::OutputElement {
        rgb
    }
}

impl ColorFormat for Rgb565 {
    type OutputElement = u16;

    #[inline]
    fn to_output<B: ByteOrder>(rgb: [u8; 3]) -> Self::OutputElement {
        let pixel = encode_rgb565_unchecked(rgb888_to_rgb565(rgb));

        let mut buf = [0u8; 2];
        B::write_u16(&mut buf, pixel);
        NativeEndian::read_u16(&buf)
    }
}

/// Decodes a `.scr` image into `output`, row-major, 256 pixels per row.
///
/// Any 6912 bytes decode successfully: the attribute bytes aren't validated and the flash bit is
/// ignored. Only the first 49152 elements of `output` are written.
pub fn decode<C: ColorFormat, B: ByteOrder>(
    data: &[u8],
    output: &mut [C::OutputElement],
) -> Result<(), DecodeError> {
    ensure!(
        data.len() == SCR_LEN,
        decode_error::InvalidLengthSnafu { len: data.len() }
    );
    ensure!(
        output.len() >= PIXEL_COUNT,
        decode_error::OutputTooSmallSnafu { len: output.len() }
    );

    let width = usize::from(SCREEN_WIDTH);
    let size = usize::from(CELL_SIZE);

    for (cell_row, cell_col) in iproduct!(0..CELL_ROWS, 0..CELL_COLUMNS) {
        let attribute = CellAttribute::from_byte(data[attribute_offset(cell_row, cell_col)]);
        let ink = C::to_output::<B>(PALETTE[usize::from(attribute.ink_index())]);
        let paper = C::to_output::<B>(PALETTE[usize::from(attribute.paper_index())]);

        for y in cell_row * CELL_SIZE..(cell_row + 1) * CELL_SIZE {
            let bits = data[bitmap_offset(y, cell_col)];
            let start = usize::from(y) * width + usize::from(cell_col) * size;

            for (px, out) in output[start..start + size].iter_mut().enumerate() {
                *out = if bits & (0b1000_0000 >> px) != 0 {
                    ink
                } else {
                    paper
                };
            }
        }
    }

    Ok(())
}

/// Decodes a `.scr` image into RGBA8888 pixels.
#[cfg(feature = "alloc")]
pub fn decode_to_vec(data: &[u8]) -> Result<alloc::vec::Vec<[u8; 4]>, DecodeError> {
    let mut output = alloc::vec![[0; 4]; PIXEL_COUNT];
    decode::<Rgba8888, NativeEndian>(data, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{BigEndian, LittleEndian};

    #[test]
    fn rejects_wrong_length() {
        let mut output = vec![[0; 4]; PIXEL_COUNT];

        for len in [0, 6144, SCR_LEN - 1, SCR_LEN + 1] {
            let data = vec![0; len];
            assert!(matches!(
                decode::<Rgba8888, NativeEndian>(&data, &mut output),
                Err(DecodeError::InvalidLength { len: l }) if l == len
            ));
        }
    }

    #[test]
    fn rejects_small_output() {
        let data = [0; SCR_LEN];
        let mut output = vec![[0; 3]; PIXEL_COUNT - 1];
        assert!(matches!(
            decode::<Rgb888, NativeEndian>(&data, &mut output),
            Err(DecodeError::OutputTooSmall { .. })
        ));
    }

    #[test]
    fn single_cell() {
        let mut data = [0; SCR_LEN];
        // bright, paper base 2, ink base 1, flash set too
        data[attribute_offset(1, 2)] = ATTR_FLASH | ATTR_BRIGHT | 2 << 3 | 1;
        // left half of the third scanline is ink
        data[bitmap_offset(8 + 2, 2)] = 0b1111_0000;

        let mut output = vec![[0; 3]; PIXEL_COUNT];
        decode::<Rgb888, NativeEndian>(&data, &mut output).unwrap();

        let pixel = |x: usize, y: usize| output[y * 256 + x];
        assert_eq!(pixel(16, 10), PALETTE[9]);
        assert_eq!(pixel(19, 10), PALETTE[9]);
        assert_eq!(pixel(20, 10), PALETTE[10]);
        assert_eq!(pixel(16, 8), PALETTE[10]);
        assert_eq!(pixel(23, 15), PALETTE[10]);
        // neighbouring cells: attribute 0, everything black
        assert_eq!(pixel(15, 10), PALETTE[0]);
        assert_eq!(pixel(24, 10), PALETTE[0]);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn arbitrary_bytes_decode() {
        let data = [0xFF; SCR_LEN];
        let pixels = decode_to_vec(&data).unwrap();

        // bright white ink stays at the normal white entry
        let [r, g, b] = PALETTE[7];
        assert!(pixels.iter().all(|&p| p == [r, g, b, 0xFF]));
    }

    #[test]
    fn rgb565_byte_order() {
        let mut data = [0; SCR_LEN];
        data[attribute_offset(0, 0)] = ATTR_BRIGHT | 1 << 3;

        let mut le = vec![0u16; PIXEL_COUNT];
        let mut be = vec![0u16; PIXEL_COUNT];
        decode::<Rgb565, LittleEndian>(&data, &mut le).unwrap();
        decode::<Rgb565, BigEndian>(&data, &mut be).unwrap();

        // paper is bright red
        assert_eq!(le[0].to_ne_bytes(), 0xF800u16.to_le_bytes());
        assert_eq!(be[0].to_ne_bytes(), 0xF800u16.to_be_bytes());
    }
}
