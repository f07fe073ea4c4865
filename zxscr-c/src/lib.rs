#![no_std]

use zxscr::{
    consts::{PIXEL_COUNT, SCR_LEN},
    utils::{BigEndian, ByteOrder, LittleEndian},
    Rgb565, Rgba8888, ScrEncodeContext,
};

#[panic_handler]
fn panic_handler(_info: &core::panic::PanicInfo) -> ! {
    unsafe { core::hint::unreachable_unchecked() }
}

/// Encodes a 256x192 RGBA8888 image into a SCREEN$ image.
///
/// - `input`: Pointer to the input pixels, 4 bytes per pixel, row-major
/// - `input_len`: Length of the input buffer, in bytes
/// - `width`, `height`: Image dimensions, must be 256 and 192
/// - `output`: Pointer to the output buffer
/// - `output_len`: Length of the output buffer, in bytes. At least 6912.
///
/// Returns the number of bytes written to the output buffer (6912), if successful, or -1
/// otherwise. Fully transparent pixels are ignored when choosing cell colors.
///
/// # Safety
///
/// `input` and `output` must be valid for `input_len` and `output_len` bytes respectively.
#[no_mangle]
pub unsafe extern "C" fn zxscr_encode_rgba(
    input: *const u8,
    input_len: usize,
    width: u16,
    height: u16,
    output: *mut u8,
    output_len: usize,
) -> isize {
    if input_len % 4 != 0 || output_len < SCR_LEN {
        return -1;
    }

    let input = unsafe { core::slice::from_raw_parts(input.cast::<[u8; 4]>(), input_len / 4) };
    let output = unsafe { &mut *output.cast::<[u8; SCR_LEN]>() };

    match ScrEncodeContext::new().encode_to_slice(width, height, input, output) {
        Ok(()) => SCR_LEN as isize,
        Err(_) => -1,
    }
}

/// Decodes a SCREEN$ image into an RGBA8888 buffer.
///
/// - `input`: Pointer to the input buffer
/// - `input_len`: Length of the input buffer, in bytes. Must be 6912.
/// - `output`: Pointer to the output buffer
/// - `output_len`: Length of the output buffer, in bytes. At least 196608 (256 * 192 * 4).
///
/// Returns the number of pixels written to the output buffer, if successful, or -1 otherwise.
///
/// # Safety
///
/// `input` and `output` must be valid for `input_len` and `output_len` bytes respectively.
#[no_mangle]
pub unsafe extern "C" fn zxscr_decode_rgba(
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
) -> isize {
    let input = unsafe { core::slice::from_raw_parts(input, input_len) };
    let output =
        unsafe { core::slice::from_raw_parts_mut(output.cast::<[u8; 4]>(), output_len / 4) };

    match zxscr::decode::decode::<Rgba8888, LittleEndian>(input, output) {
        Ok(()) => PIXEL_COUNT as isize,
        Err(_) => -1,
    }
}

unsafe fn decode_rgb565<B: ByteOrder>(
    input: *const u8,
    input_len: usize,
    output: *mut u16,
    output_len: usize,
) -> isize {
    let input = unsafe { core::slice::from_raw_parts(input, input_len) };
    let output = unsafe { core::slice::from_raw_parts_mut(output, output_len) };

    match zxscr::decode::decode::<Rgb565, B>(input, output) {
        Ok(()) => PIXEL_COUNT as isize,
        Err(_) => -1,
    }
}

/// Decodes a SCREEN$ image into an RGB565 (little-endian) buffer.
///
/// - `input`: Pointer to the input buffer
/// - `input_len`: Length of the input buffer, in bytes. Must be 6912.
/// - `output`: Pointer to the output buffer
/// - `output_len`: Length of the output buffer, in 16-bit words. At least 49152.
///
/// Returns the number of pixels written to the output buffer, if successful, or -1 otherwise.
///
/// # Safety
///
/// `input` must be valid for `input_len` bytes, `output` for `output_len` 16-bit words.
#[no_mangle]
pub unsafe extern "C" fn zxscr_decode_rgb565_le(
    input: *const u8,
    input_len: usize,
    output: *mut u16,
    output_len: usize,
) -> isize {
    unsafe { decode_rgb565::<LittleEndian>(input, input_len, output, output_len) }
}

/// Decodes a SCREEN$ image into an RGB565 (big-endian) buffer.
///
/// Same as [`zxscr_decode_rgb565_le`], apart from the byte order of the output.
///
/// # Safety
///
/// `input` must be valid for `input_len` bytes, `output` for `output_len` 16-bit words.
#[no_mangle]
pub unsafe extern "C" fn zxscr_decode_rgb565_be(
    input: *const u8,
    input_len: usize,
    output: *mut u16,
    output_len: usize,
) -> isize {
    unsafe { decode_rgb565::<BigEndian>(input, input_len, output, output_len) }
}

/// Returns the index (0..15) of the Spectrum palette color closest to the given color.
#[no_mangle]
pub extern "C" fn zxscr_nearest_palette_index(r: u8, g: u8, b: u8) -> u8 {
    zxscr::nearest_palette_index([r, g, b])
}
