//! Input extension allow-list and output format table.

use crate::{ImageError, Result};

/// Extensions (lower-case, no dot) accepted as batch input.
///
/// GIF is an output format only and is deliberately absent here.
pub const INPUT_EXTENSIONS: &[&str] = &["jpg", "png", "jpeg", "bmp"];

/// Output format identifiers and the encoder each selects.
const OUTPUT_FORMATS: &[(&str, OutputFormat)] = &[
    ("jpg", OutputFormat::Jpeg),
    ("jpeg", OutputFormat::Jpeg),
    ("png", OutputFormat::Png),
    ("bmp", OutputFormat::Bmp),
    ("gif", OutputFormat::Gif),
];

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// BMP image
    Bmp,
    /// GIF image
    Gif,
}

impl OutputFormat {
    /// Look up an identifier (case-insensitive exact match).
    ///
    /// # Example
    /// ```
    /// use imgbatch_image::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_identifier("JPG").unwrap(), OutputFormat::Jpeg);
    /// assert!(OutputFormat::from_identifier("webp").is_err());
    /// ```
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        OUTPUT_FORMATS
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(identifier))
            .map(|(_, format)| *format)
            .ok_or_else(|| ImageError::UnsupportedFormat(identifier.to_string()))
    }
}
