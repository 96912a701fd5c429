//! Output encoding policy and in-memory encoding.
//!
//! | Format | Quality                        | Compression               |
//! |--------|--------------------------------|---------------------------|
//! | jpeg   | clamped into 1..=100           | lossy                     |
//! | png    | ignored                        | strongest, adaptive filter|
//! | bmp    | ignored                        | none                      |
//! | gif    | ignored                        | palette                   |

use crate::{OutputFormat, Result};
use image::codecs::bmp::BmpEncoder;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::{ColorType, DynamicImage, ImageEncoder};
use serde::Serialize;

/// Lowest JPEG quality handed to the encoder.
pub const MIN_JPEG_QUALITY: u8 = 1;
/// Highest JPEG quality handed to the encoder.
pub const MAX_JPEG_QUALITY: u8 = 100;

/// How a format compresses its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Compression {
    /// Lossy with the given quality level
    Lossy {
        /// Effective quality after clamping
        quality: u8,
    },
    /// Lossless at the strongest level the encoder offers
    Best,
    /// Raw pixel data
    Uncompressed,
    /// Quantized to a palette
    Palette,
}

/// Encoder settings derived from an output format and a quality argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodePolicy {
    /// Target format
    pub format: OutputFormat,
    /// Compression applied
    pub compression: Compression,
}

impl EncodePolicy {
    /// Build the policy for a format. `quality` only matters for JPEG.
    pub fn new(format: OutputFormat, quality: i64) -> Self {
        let compression = match format {
            OutputFormat::Jpeg => Compression::Lossy {
                quality: clamp_quality(quality),
            },
            OutputFormat::Png => Compression::Best,
            OutputFormat::Bmp => Compression::Uncompressed,
            OutputFormat::Gif => Compression::Palette,
        };

        Self { format, compression }
    }

    /// Resolve an identifier such as `"jpg"` and build its policy.
    pub fn for_identifier(identifier: &str, quality: i64) -> Result<Self> {
        Ok(Self::new(OutputFormat::from_identifier(identifier)?, quality))
    }
}

/// Clamp a user quality value into the range the JPEG encoder accepts.
pub fn clamp_quality(quality: i64) -> u8 {
    let clamped = quality.clamp(i64::from(MIN_JPEG_QUALITY), i64::from(MAX_JPEG_QUALITY));
    if clamped != quality {
        tracing::warn!(requested = quality, effective = clamped, "JPEG quality out of range, clamping");
    }
    clamped as u8
}

/// Encode an image to bytes according to `policy`.
///
/// Nothing touches the filesystem here, so a failure never leaves a partial file.
pub fn encode_image(img: &DynamicImage, policy: &EncodePolicy) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let (width, height) = (img.width(), img.height());

    match policy.compression {
        Compression::Lossy { quality } => {
            // JPEG has no alpha channel
            let rgb = img.to_rgb8();
            JpegEncoder::new_with_quality(&mut buffer, quality).write_image(
                rgb.as_raw(),
                width,
                height,
                ColorType::Rgb8,
            )?;
        }
        Compression::Best => {
            let img = png_compatible(img);
            PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, PngFilterType::Adaptive)
                .write_image(img.as_bytes(), width, height, img.color())?;
        }
        Compression::Uncompressed => {
            let img = eight_bit(img);
            BmpEncoder::new(&mut buffer).write_image(img.as_bytes(), width, height, img.color())?;
        }
        Compression::Palette => {
            let rgba = img.to_rgba8();
            // The GIF trailer is written when the encoder drops
            let mut encoder = GifEncoder::new(&mut buffer);
            encoder.encode(rgba.as_raw(), width, height, ColorType::Rgba8)?;
        }
    }

    tracing::debug!(
        format = ?policy.format,
        bytes = buffer.len(),
        "Encoded image"
    );

    Ok(buffer)
}

/// Keep 8 and 16 bit rasters as they are, convert anything else.
fn png_compatible(img: &DynamicImage) -> std::borrow::Cow<'_, DynamicImage> {
    use std::borrow::Cow;

    match img.color() {
        ColorType::L8
        | ColorType::La8
        | ColorType::Rgb8
        | ColorType::Rgba8
        | ColorType::L16
        | ColorType::La16
        | ColorType::Rgb16
        | ColorType::Rgba16 => Cow::Borrowed(img),
        _ => Cow::Owned(DynamicImage::ImageRgba8(img.to_rgba8())),
    }
}

fn eight_bit(img: &DynamicImage) -> std::borrow::Cow<'_, DynamicImage> {
    use std::borrow::Cow;

    match img.color() {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => Cow::Borrowed(img),
        color if color.has_alpha() => Cow::Owned(DynamicImage::ImageRgba8(img.to_rgba8())),
        _ => Cow::Owned(DynamicImage::ImageRgb8(img.to_rgb8())),
    }
}
