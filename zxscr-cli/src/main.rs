use argh::FromArgs;
use image::{imageops::FilterType, DynamicImage, ImageFormat, RgbaImage};
use std::{fs::File, io::BufReader, str::FromStr};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zxscr::{
    consts::{SCREEN_HEIGHT, SCREEN_WIDTH, SCR_LEN},
    palette::PaletteCache,
    ScrEncodeContext,
};

/// ZX Spectrum SCREEN$ encoder and decoder.
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Encode(Encode),
    Decode(Decode),
    Quantize(Quantize),
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Png,
    Jpg,
    Bmp,
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[rustfmt::skip]
        let Some(format) = s.eq_ignore_ascii_case("png").then_some(Format::Png)
               .or_else(|| s.eq_ignore_ascii_case("jpg").then_some(Format::Jpg))
               .or_else(|| s.eq_ignore_ascii_case("bmp").then_some(Format::Bmp))
        else { return Err("invalid string"); };

        Ok(format)
    }
}

impl From<Format> for ImageFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Png => ImageFormat::Png,
            Format::Jpg => ImageFormat::Jpeg,
            Format::Bmp => ImageFormat::Bmp,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zxscr=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let Cli { command } = argh::from_env();

    match command {
        Command::Encode(options) => encode(options),
        Command::Decode(options) => decode(options),
        Command::Quantize(options) => quantize(options),
    }
}

/// Encodes an image as a SCREEN$ file.
#[derive(FromArgs)]
#[argh(subcommand, name = "encode")]
struct Encode {
    /// input format, optional (png, jpg, bmp)
    #[argh(option)]
    format: Option<Format>,

    /// fail on images that aren't 256x192 instead of stretching them
    #[argh(switch)]
    no_resize: bool,

    /// also write a PNG preview of the encoded image to this path
    #[argh(option)]
    preview: Option<String>,

    /// the input file. May be a PNG, JPG, or BMP.
    #[argh(positional)]
    input: String,
    /// the output .scr file
    #[argh(positional)]
    output: String,
}

fn encode(options: Encode) -> Result<(), Box<dyn std::error::Error>> {
    let Encode {
        format,
        no_resize,
        preview,
        input,
        output,
    } = options;

    let image = screen_sized(load_image(&input, format)?, no_resize)?;
    let pixels = image.pixels().map(|p| p.0).collect::<Vec<_>>();

    info!("Encoding `{input}`");

    let mut scr = Vec::with_capacity(SCR_LEN);
    ScrEncodeContext::encode(SCREEN_WIDTH, SCREEN_HEIGHT, &pixels, &mut scr)?;

    std::fs::write(&output, &scr)?;
    info!("Written {} bytes to `{output}`", scr.len());

    if let Some(preview) = preview {
        save_rgba(zxscr::decode::decode_to_vec(&scr)?, &preview, Format::Png)?;
        info!("Written preview to `{preview}`");
    }

    Ok(())
}

/// Decodes a SCREEN$ file.
#[derive(FromArgs)]
#[argh(subcommand, name = "decode")]
struct Decode {
    /// output format (png, jpg, bmp)
    #[argh(option)]
    format: Format,

    /// the input .scr file
    #[argh(positional)]
    input: String,
    /// the output file
    #[argh(positional)]
    output: String,
}

fn decode(options: Decode) -> Result<(), Box<dyn std::error::Error>> {
    let Decode {
        format,
        input,
        output,
    } = options;

    let scr = std::fs::read(&input)?;

    info!("Decoding `{input}`");

    save_rgba(zxscr::decode::decode_to_vec(&scr)?, &output, format)?;

    info!("Written {SCREEN_WIDTH}x{SCREEN_HEIGHT} image to `{output}`");

    Ok(())
}

/// Reduces an image to the Spectrum palette, without the two colors per cell limit.
#[derive(FromArgs)]
#[argh(subcommand, name = "quantize")]
struct Quantize {
    /// input format, optional (png, jpg, bmp)
    #[argh(option)]
    format: Option<Format>,

    /// keep the original size instead of stretching to 256x192
    #[argh(switch)]
    no_resize: bool,

    /// the input file. May be a PNG, JPG, or BMP.
    #[argh(positional)]
    input: String,
    /// the output PNG file
    #[argh(positional)]
    output: String,
}

fn quantize(options: Quantize) -> Result<(), Box<dyn std::error::Error>> {
    let Quantize {
        format,
        no_resize,
        input,
        output,
    } = options;

    let image = load_image(&input, format)?;
    let image = if no_resize {
        image.into_rgba8()
    } else {
        screen_sized(image, false)?
    };

    let (width, height) = image.dimensions();
    let mut pixels = image.pixels().map(|p| p.0).collect::<Vec<_>>();

    info!("Quantizing {width}x{height} image");

    PaletteCache::new().quantize_pixels(&mut pixels);

    RgbaImage::from_vec(width, height, pixels.concat())
        .ok_or("failed to create image")?
        .save_with_format(&output, ImageFormat::Png)?;

    info!("Written `{output}`");

    Ok(())
}

fn load_image(
    input: &str,
    format: Option<Format>,
) -> Result<DynamicImage, Box<dyn std::error::Error>> {
    let image = match format {
        Some(format) => {
            image::io::Reader::with_format(BufReader::new(File::open(input)?), format.into())
                .decode()?
        }
        None => image::io::Reader::open(input)?
            .with_guessed_format()?
            .decode()?,
    };

    debug!(
        width = image.width(),
        height = image.height(),
        "Loaded `{input}`"
    );

    Ok(image)
}

/// Stretches an image to the screen size, without smoothing.
fn screen_sized(
    image: DynamicImage,
    no_resize: bool,
) -> Result<RgbaImage, Box<dyn std::error::Error>> {
    let (width, height) = (u32::from(SCREEN_WIDTH), u32::from(SCREEN_HEIGHT));

    if image.width() == width && image.height() == height {
        return Ok(image.into_rgba8());
    }

    if no_resize {
        return Err(format!(
            "image is {}x{}, expected {width}x{height}",
            image.width(),
            image.height()
        )
        .into());
    }

    info!(
        "Stretching {}x{} image to {width}x{height}",
        image.width(),
        image.height()
    );

    Ok(image
        .resize_exact(width, height, FilterType::Nearest)
        .into_rgba8())
}

fn save_rgba(
    pixels: Vec<[u8; 4]>,
    output: &str,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let image = RgbaImage::from_vec(
        u32::from(SCREEN_WIDTH),
        u32::from(SCREEN_HEIGHT),
        pixels.concat(),
    )
    .ok_or("failed to create image")?;

    // JPEG has no alpha channel
    let image = match format {
        Format::Jpg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image).into_rgb8()),
        _ => DynamicImage::ImageRgba8(image),
    };

    image.save_with_format(output, format.into())?;

    Ok(())
}
