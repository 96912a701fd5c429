//! Image loading and width-driven resizing with the image crate.

use crate::{ImageError, Result};
use image::imageops::FilterType;
use image::DynamicImage;
use imgbatch_core::config::ResizeFilter;
use std::path::Path;

/// Target dimensions for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSpec {
    /// Target width, as requested
    pub width: u32,
    /// Height derived from the original aspect ratio
    pub height: u32,
}

impl ResizeSpec {
    /// Derive the target dimensions for an original image and a requested width.
    ///
    /// Fails with [`ImageError::InvalidDimension`] when either dimension would
    /// be zero, negative, or larger than `u32::MAX`.
    ///
    /// # Example
    /// ```
    /// use imgbatch_image::ResizeSpec;
    ///
    /// let spec = ResizeSpec::for_width(2000, 1000, 500).unwrap();
    /// assert_eq!((spec.width, spec.height), (500, 250));
    /// assert!(ResizeSpec::for_width(2000, 1000, 0).is_err());
    /// ```
    pub fn for_width(original_width: u32, original_height: u32, target_width: i64) -> Result<Self> {
        let height = target_height(original_width, original_height, target_width);

        let invalid = || ImageError::InvalidDimension {
            width: target_width,
            height,
        };

        if original_width == 0 || original_height == 0 || target_width <= 0 || height <= 0 {
            return Err(invalid());
        }

        Ok(Self {
            width: u32::try_from(target_width).map_err(|_| invalid())?,
            height: u32::try_from(height).map_err(|_| invalid())?,
        })
    }
}

/// Height proportional to `target_width`, truncated toward zero.
///
/// The ratio is taken first and multiplied afterwards, in `f64`, so the result
/// matches a plain cast of `target_width * (height / width)` to an integer.
/// Returns 0 for a zero-width original.
pub fn target_height(original_width: u32, original_height: u32, target_width: i64) -> i64 {
    if original_width == 0 {
        return 0;
    }
    let aspect_ratio = f64::from(original_height) / f64::from(original_width);
    (target_width as f64 * aspect_ratio) as i64
}

/// Map a configured filter onto the image crate's filter type.
pub fn filter_type(filter: ResizeFilter) -> FilterType {
    match filter {
        ResizeFilter::Nearest => FilterType::Nearest,
        ResizeFilter::Triangle => FilterType::Triangle,
        ResizeFilter::CatmullRom => FilterType::CatmullRom,
        ResizeFilter::Gaussian => FilterType::Gaussian,
        ResizeFilter::Lanczos3 => FilterType::Lanczos3,
    }
}

/// Load and decode an image, sniffing the content rather than trusting the extension.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let decode_error = |source| ImageError::Decode {
        path: path.to_path_buf(),
        source,
    };

    image::io::Reader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_error(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_error)
}

/// Resize an image to `target_width`, preserving its aspect ratio.
///
/// The original raster is consumed; the returned image is exactly
/// `target_width` × [`target_height`].
pub fn resize_to_width(image: DynamicImage, target_width: i64, filter: ResizeFilter) -> Result<DynamicImage> {
    let spec = ResizeSpec::for_width(image.width(), image.height(), target_width)?;

    tracing::debug!(
        from_width = image.width(),
        from_height = image.height(),
        to_width = spec.width,
        to_height = spec.height,
        filter = %filter,
        "Resizing"
    );

    Ok(image.resize_exact(spec.width, spec.height, filter_type(filter)))
}
