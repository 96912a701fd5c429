//! Candidate selection for a batch directory.

use crate::format::INPUT_EXTENSIONS;
use crate::{ImageError, Result};
use imgbatch_core::file_scanner::FileScanner;
use std::path::{Path, PathBuf};

/// Scanner over the top level of `directory` for supported input images.
pub fn image_scanner(directory: &Path) -> FileScanner {
    FileScanner::new(directory).with_extensions(INPUT_EXTENSIONS)
}

/// Lazily yield the candidate images of `scanner`, sorted by name.
pub fn candidates(scanner: &FileScanner) -> Result<impl Iterator<Item = PathBuf> + '_> {
    scanner
        .iter()
        .map_err(|_| ImageError::DirectoryNotFound(scanner.root().to_path_buf()))
}
