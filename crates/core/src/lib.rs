//! Core utilities for the imgbatch tools
//!
//! This crate provides the functionality shared by the image library and the
//! command-line program:
//!
//! - **Error handling**: coded errors with context, recovery suggestions and exit codes
//! - **Configuration**: optional TOML configuration with validation
//! - **File scanning**: non-recursive file discovery with extension filtering
//!
//! # Example
//!
//! ```rust,no_run
//! use imgbatch_core::file_scanner::FileScanner;
//!
//! let scanner = FileScanner::new("photos").with_extensions(&["jpg", "png"]);
//! for path in scanner.iter()? {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), imgbatch_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod file_scanner;

pub use error::{Error, ErrorCode, Result, ResultExt};

