//! Destination paths and writing encoded results.

use crate::{ImageError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default name of the subdirectory results are written into.
pub const DEFAULT_OUTPUT_DIR: &str = "resized";

/// Derive `<parent>/<dir_name>/<stem>.<identifier>` for a source file.
///
/// The identifier is used verbatim as the extension, so `"jpeg"` gives
/// `.jpeg` and `"jpg"` gives `.jpg`.
///
/// # Example
/// ```
/// use imgbatch_image::destination_path;
/// use std::path::Path;
///
/// let dest = destination_path(Path::new("photos/cat.JPG"), "png", "resized").unwrap();
/// assert_eq!(dest, Path::new("photos/resized/cat.png"));
/// ```
pub fn destination_path(source: &Path, identifier: &str, dir_name: &str) -> Result<PathBuf> {
    let stem = source
        .file_stem()
        .ok_or_else(|| ImageError::InvalidPath(source.to_path_buf()))?;

    let mut file_name = stem.to_os_string();
    file_name.push(".");
    file_name.push(identifier);

    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(dir_name).join(file_name))
}

/// Write encoded bytes, creating the parent directory if needed.
///
/// An existing file at `destination` is overwritten.
pub fn write_output(destination: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(dir) = destination.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    fs::write(destination, bytes)?;
    tracing::info!(path = %destination.display(), bytes = bytes.len(), "Image resized and saved");
    Ok(())
}
