use crate::{
    consts::{PIXEL_COUNT, SCR_LEN},
    encode::{check_dimensions, EncodeSliceError, ScrEncodeContext},
};
use snafu::{ResultExt, Snafu};
use std::io::{Read, Write};

#[derive(Debug, Snafu)]
pub enum EncodeError {
    #[snafu(context(false), display("{source}"))]
    InvalidDimensions { source: EncodeSliceError },
    #[snafu(display("Failed to read the source pixels"))]
    SourceUnavailable { source: std::io::Error },
    WriteIo { source: std::io::Error },
}

impl ScrEncodeContext {
    pub fn encode<W: Write>(
        width: u16,
        height: u16,
        pixels: &[[u8; 4]],
        w: W,
    ) -> Result<(), EncodeError> {
        let mut ctx = ScrEncodeContext::new();
        ctx.encode_with_state(width, height, pixels, w)
    }

    pub fn encode_with_state<W: Write>(
        &mut self,
        width: u16,
        height: u16,
        pixels: &[[u8; 4]],
        mut w: W,
    ) -> Result<(), EncodeError> {
        let mut output = [0; SCR_LEN];
        self.encode_to_slice(width, height, pixels, &mut output)?;

        w.write_all(&output).context(WriteIoSnafu)
    }

    /// Reads a raw RGBA8888 image from `r` and writes the encoded image to `w`.
    ///
    /// The dimensions are checked before anything is read.
    pub fn encode_from_reader<R: Read, W: Write>(
        &mut self,
        width: u16,
        height: u16,
        mut r: R,
        w: W,
    ) -> Result<(), EncodeError> {
        check_dimensions(width, height, PIXEL_COUNT)?;

        let mut raw = vec![0; PIXEL_COUNT * 4];
        r.read_exact(&mut raw).context(SourceUnavailableSnafu)?;

        let pixels = raw
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
            .collect::<Vec<_>>();

        self.encode_with_state(width, height, &pixels, w)
    }
}
