use image::{Rgba, RgbaImage};
use std::io::{self, Write};
use zxscr::{
    consts::{BITMAP_LEN, SCR_LEN},
    decode::{decode, decode_to_vec, DecodeError},
    encode::{EncodeError, EncodeSliceError},
    layout::bitmap_offset,
    utils::LittleEndian,
    Rgba8888, ScrEncodeContext,
};

fn encode_image(image: &RgbaImage) -> Vec<u8> {
    let pixels = image.pixels().map(|p| p.0).collect::<Vec<_>>();
    let mut encoded = Vec::new();
    ScrEncodeContext::new()
        .encode_to_vec(256, 192, &pixels, &mut encoded)
        .unwrap();
    encoded
}

#[test]
fn all_black() {
    let encoded = encode_image(&RgbaImage::from_pixel(256, 192, Rgba([0, 0, 0, 0xFF])));

    assert_eq!(encoded.len(), SCR_LEN);
    // black ink on forced white paper, every pixel is ink
    assert!(encoded[..BITMAP_LEN].iter().all(|&b| b == 0xFF));
    assert!(encoded[BITMAP_LEN..].iter().all(|&b| b == 0x38));

    let decoded = decode_to_vec(&encoded).unwrap();
    assert!(decoded.iter().all(|&p| p == [0, 0, 0, 0xFF]));
}

#[test]
fn checkerboard() {
    let white = Rgba([0xD7, 0xD7, 0xD7, 0xFF]);
    let black = Rgba([0, 0, 0, 0xFF]);
    let encoded = encode_image(&RgbaImage::from_fn(256, 192, |x, y| {
        if (x + y) % 2 == 0 {
            black
        } else {
            white
        }
    }));

    assert!(encoded[BITMAP_LEN..].iter().all(|&b| b == 0b0011_1000));
    for y in 0..192u8 {
        let expected = if y % 2 == 0 { 0b1010_1010 } else { 0b0101_0101 };
        for x in 0..32 {
            assert_eq!(encoded[bitmap_offset(y, x)], expected, "y={y} x={x}");
        }
    }
}

#[test]
fn bright_cells() {
    // bright yellow on bright blue, left half / right half of every cell
    let encoded = encode_image(&RgbaImage::from_fn(256, 192, |x, _| {
        if x % 8 < 4 {
            Rgba([0xFF, 0xFF, 0x00, 0xFF])
        } else {
            Rgba([0x00, 0x00, 0xFF, 0xFF])
        }
    }));

    // tie, so the lower index (8, bright blue) is ink: base 0, paper 13 % 8 = 5
    assert!(encoded[BITMAP_LEN..]
        .iter()
        .all(|&b| b == 0b0100_0000 | 5 << 3));
    assert!(encoded[..BITMAP_LEN].iter().all(|&b| b == 0b0000_1111));

    let decoded = decode_to_vec(&encoded).unwrap();
    assert_eq!(decoded[0], [0xFF, 0xFF, 0x00, 0xFF]);
    assert_eq!(decoded[4], [0x00, 0x00, 0xFF, 0xFF]);
}

#[test]
fn transparent_image() {
    let encoded = encode_image(&RgbaImage::from_pixel(256, 192, Rgba([0xFF, 0, 0, 0])));

    assert!(encoded[..BITMAP_LEN].iter().all(|&b| b == 0));
    assert!(encoded[BITMAP_LEN..].iter().all(|&b| b == 0x38));
}

#[test]
fn transparent_pixels_dont_vote() {
    // a single opaque red pixel per cell, the rest is transparent black
    let encoded = encode_image(&RgbaImage::from_fn(256, 192, |x, y| {
        if x % 8 == 0 && y % 8 == 0 {
            Rgba([0xD7, 0, 0, 0xFF])
        } else {
            Rgba([0, 0, 0, 0])
        }
    }));

    // red ink, black paper through the fallback
    assert!(encoded[BITMAP_LEN..].iter().all(|&b| b == 0x02));
    assert_eq!(encoded[bitmap_offset(0, 0)], 0b1000_0000);
    assert_eq!(encoded[bitmap_offset(1, 0)], 0);
}

#[test]
fn invalid_dimensions() {
    let pixels = vec![[0, 0, 0, 0xFF]; 320 * 200];
    let mut output = Vec::new();

    assert!(matches!(
        ScrEncodeContext::new().encode_to_vec(320, 200, &pixels, &mut output),
        Err(EncodeSliceError::InvalidDimensions {
            width: 320,
            height: 200,
            ..
        })
    ));
    assert!(output.is_empty());

    assert!(matches!(
        ScrEncodeContext::encode(320, 200, &pixels, &mut output),
        Err(EncodeError::InvalidDimensions { .. })
    ));
    assert!(output.is_empty());
}

#[test]
fn invalid_length() {
    for len in [0, 6911, 6913, 49152] {
        assert!(matches!(
            decode_to_vec(&vec![0; len]),
            Err(DecodeError::InvalidLength { .. })
        ));
    }

    let mut output = vec![[0; 4]; 256 * 192];
    assert!(decode::<Rgba8888, LittleEndian>(&[0; SCR_LEN], &mut output).is_ok());
}

#[test]
fn source_unavailable() {
    let mut ctx = ScrEncodeContext::new();
    let mut output = Vec::new();

    // half an image
    let short = vec![0u8; 256 * 96 * 4];
    assert!(matches!(
        ctx.encode_from_reader(256, 192, &short[..], &mut output),
        Err(EncodeError::SourceUnavailable { .. })
    ));
    assert!(output.is_empty());

    let full = vec![[0u8, 0, 0, 0xFF]; 256 * 192].concat();
    ctx.encode_from_reader(256, 192, &full[..], &mut output).unwrap();
    assert_eq!(output.len(), SCR_LEN);
    assert!(output[BITMAP_LEN..].iter().all(|&b| b == 0x38));
}

struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_errors_are_reported() {
    let pixels = vec![[0, 0, 0, 0xFF]; 256 * 192];
    assert!(matches!(
        ScrEncodeContext::encode(256, 192, &pixels, FailingWriter),
        Err(EncodeError::WriteIo { .. })
    ));
}
