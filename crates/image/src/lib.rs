//! Batch image resizing for imgbatch.
//!
//! This crate provides:
//! - Selection of input images in a directory (non-recursive, by extension)
//! - Width-driven resizing that preserves aspect ratio
//! - Output format policy and in-memory encoding (JPEG, PNG, BMP, GIF)
//! - Output path derivation and writing
//! - A sequential batch runner with per-file results
//!
//! # Example
//!
//! ```rust,no_run
//! use imgbatch_image::{run_batch, BatchJob, NoopObserver};
//!
//! let job = BatchJob::new("photos", 800, "jpg", 85);
//! let report = run_batch(&job, &mut NoopObserver)?;
//! println!("{} written, {} failed", report.succeeded, report.failed);
//! # Ok::<(), imgbatch_image::ImageError>(())
//! ```

#![warn(missing_docs)]

mod batch;
mod encode;
mod error;
mod format;
mod output;
mod resize;
mod select;

pub use batch::{process_file, run_batch, BatchJob, BatchOptions, BatchReport, JobObserver, JobResult, NoopObserver};
pub use encode::{clamp_quality, encode_image, Compression, EncodePolicy, MAX_JPEG_QUALITY, MIN_JPEG_QUALITY};
pub use error::{ErrorKind, ImageError, Result};
pub use format::{OutputFormat, INPUT_EXTENSIONS};
pub use output::{destination_path, write_output, DEFAULT_OUTPUT_DIR};
pub use resize::{filter_type, load_image, resize_to_width, target_height, ResizeSpec};
pub use select::{candidates, image_scanner};
