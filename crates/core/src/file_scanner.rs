//! File scanning utilities
//!
//! Lists the regular files directly inside a directory, optionally filtered by
//! extension. Subdirectories are never entered.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Non-recursive file scanner with an extension filter
#[derive(Debug, Clone)]
pub struct FileScanner {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FileScanner {
    /// Create a new file scanner rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: Vec::new(),
        }
    }

    /// Filter by file extensions without the leading dot (e.g. "jpg", "png").
    ///
    /// Matching is ASCII case-insensitive.
    pub fn with_extensions(mut self, extensions: &[&str]) -> Self {
        self.extensions = extensions.iter().map(|s| s.to_ascii_lowercase()).collect();
        self
    }

    /// Directory being scanned
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily iterate over matching files, sorted by file name.
    ///
    /// Fails up front if the root is not an existing directory. Entries that
    /// cannot be read while iterating are skipped.
    pub fn iter(&self) -> Result<impl Iterator<Item = PathBuf> + '_> {
        if !self.root.is_dir() {
            return Err(Error::directory_not_found(&self.root));
        }

        let files = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|path| path.is_file())
            .filter(move |path| self.matches_extension(path));

        Ok(files)
    }

    /// Whether a path passes the extension filter
    pub fn matches_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    fn scan(scanner: &FileScanner) -> Result<Vec<PathBuf>> {
        Ok(scanner.iter()?.collect())
    }

    #[test]
    fn test_file_scanner_with_extensions() {
        let scanner = FileScanner::new("/tmp").with_extensions(&["JPG", "png"]);
        assert_eq!(scanner.extensions, vec!["jpg", "png"]);
    }

    #[test]
    fn test_matches_extension_case_insensitive() {
        let scanner = FileScanner::new("/tmp").with_extensions(&["jpg"]);
        assert!(scanner.matches_extension(Path::new("a.JPG")));
        assert!(scanner.matches_extension(Path::new("a.jpg")));
        assert!(!scanner.matches_extension(Path::new("a.jpgx")));
        assert!(!scanner.matches_extension(Path::new("jpg")));
        assert!(!scanner.matches_extension(Path::new(".jpg")));
        assert!(scanner.matches_extension(Path::new(".cover.jpg")));
    }

    #[test]
    fn test_scan_is_non_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.png");
        touch(dir.path(), "a.JPG");
        touch(dir.path(), "notes.txt");
        fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "c.png");

        let files = scan(&FileScanner::new(dir.path()).with_extensions(&["jpg", "png"])).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.png"]);
    }

    #[test]
    fn test_directory_named_like_image_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("folder.png")).unwrap();

        let files = scan(&FileScanner::new(dir.path()).with_extensions(&["png"])).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let err = scan(&FileScanner::new("/no/such/dir/anywhere")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DirectoryNotFound);
    }
}
