//! Sequential batch runner: select, resize, encode, write.
//!
//! Each candidate is processed to completion before the next one starts, and
//! its decoded raster is dropped before moving on. Failures are recorded per
//! file and the batch continues unless [`BatchOptions::fail_fast`] is set.

use crate::encode::{encode_image, EncodePolicy};
use crate::error::ErrorKind;
use crate::output::{destination_path, write_output, DEFAULT_OUTPUT_DIR};
use crate::resize::{load_image, resize_to_width};
use crate::select::{candidates, image_scanner};
use crate::Result;
use imgbatch_core::config::{ConfigSchema, ResizeFilter};
use imgbatch_telemetry::Timer;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Tunables that do not come from the positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Interpolation filter
    pub filter: ResizeFilter,
    /// Output subdirectory name
    pub output_dir_name: String,
    /// Stop at the first failing file
    pub fail_fast: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            filter: ResizeFilter::default(),
            output_dir_name: DEFAULT_OUTPUT_DIR.to_string(),
            fail_fast: false,
        }
    }
}

impl From<&ConfigSchema> for BatchOptions {
    fn from(schema: &ConfigSchema) -> Self {
        Self {
            filter: schema.resize.filter,
            output_dir_name: schema.output.dir_name.clone(),
            fail_fast: schema.output.fail_fast,
        }
    }
}

/// One invocation of the batch.
#[derive(Debug, Clone)]
pub struct BatchJob {
    /// Directory to scan
    pub directory: PathBuf,
    /// Requested width; validated per file at resize time
    pub target_width: i64,
    /// Lower-cased output format identifier; validated per file at encode time
    pub format: String,
    /// Quality argument
    pub quality: i64,
    /// Remaining options
    pub options: BatchOptions,
}

impl BatchJob {
    /// Create a job with default options. The format identifier is lower-cased.
    pub fn new(directory: impl Into<PathBuf>, target_width: i64, format: &str, quality: i64) -> Self {
        Self {
            directory: directory.into(),
            target_width,
            format: format.to_lowercase(),
            quality,
            options: BatchOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }
}

/// Outcome for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobResult {
    /// Encoded output was written
    Written {
        /// Input file
        source: PathBuf,
        /// Output file
        destination: PathBuf,
        /// Output width
        width: u32,
        /// Output height
        height: u32,
        /// Encoded size
        bytes: u64,
        /// Time spent on this file
        duration_ms: u64,
    },
    /// Processing failed; nothing was written for this file
    Failed {
        /// Input file
        source: PathBuf,
        /// Failure class
        kind: ErrorKind,
        /// Human-readable error
        message: String,
    },
}

impl JobResult {
    /// Input file this result is about.
    pub fn source(&self) -> &Path {
        match self {
            JobResult::Written { source, .. } | JobResult::Failed { source, .. } => source,
        }
    }

    /// Whether output was written.
    pub fn is_success(&self) -> bool {
        matches!(self, JobResult::Written { .. })
    }
}

/// Results of a whole batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Scanned directory
    pub directory: PathBuf,
    /// Files attempted
    pub processed: usize,
    /// Files written
    pub succeeded: usize,
    /// Files failed
    pub failed: usize,
    /// Set when the batch stopped early because of `fail_fast`
    pub aborted: bool,
    /// Per-file results in processing order
    pub results: Vec<JobResult>,
}

impl BatchReport {
    fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            ..Self::default()
        }
    }

    fn push(&mut self, result: JobResult) {
        self.processed += 1;
        if result.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    /// True when no file failed (an empty batch is a success).
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Total bytes written.
    pub fn bytes_written(&self) -> u64 {
        self.results
            .iter()
            .map(|r| match r {
                JobResult::Written { bytes, .. } => *bytes,
                JobResult::Failed { .. } => 0,
            })
            .sum()
    }
}

/// Progress callbacks from [`run_batch`].
pub trait JobObserver {
    /// Called once with the number of candidates before processing starts.
    fn on_batch_start(&mut self, _total: usize) {}

    /// Called before a file is processed.
    fn on_file_start(&mut self, _source: &Path) {}

    /// Called with the outcome of each file.
    fn on_result(&mut self, _result: &JobResult) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl JobObserver for NoopObserver {}

/// Run the full pipeline for one file: load, resize, encode, write.
pub fn process_file(source: &Path, job: &BatchJob) -> Result<JobResult> {
    let timer = Timer::start(format!("resize {}", source.display()));

    let image = load_image(source)?;
    let resized = resize_to_width(image, job.target_width, job.options.filter)?;

    let policy = EncodePolicy::for_identifier(&job.format, job.quality)?;
    let bytes = encode_image(&resized, &policy)?;
    let (width, height) = (resized.width(), resized.height());
    drop(resized);

    let destination = destination_path(source, &job.format, &job.options.output_dir_name)?;
    write_output(&destination, &bytes)?;
    let elapsed = timer.stop();

    Ok(JobResult::Written {
        source: source.to_path_buf(),
        destination,
        width,
        height,
        bytes: bytes.len() as u64,
        duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
    })
}

/// Process every candidate image in `job.directory`.
///
/// Only a missing directory fails the call itself; per-file errors are
/// reported as [`JobResult::Failed`] entries.
pub fn run_batch(job: &BatchJob, observer: &mut dyn JobObserver) -> Result<BatchReport> {
    let scanner = image_scanner(&job.directory);
    let total = candidates(&scanner)?.count();
    let mut report = BatchReport::new(&job.directory);

    tracing::debug!(
        directory = %job.directory.display(),
        candidates = total,
        width = job.target_width,
        format = %job.format,
        quality = job.quality,
        "Starting batch"
    );
    observer.on_batch_start(total);

    for source in candidates(&scanner)? {
        observer.on_file_start(&source);

        let result = process_file(&source, job).unwrap_or_else(|err| {
            tracing::warn!(file = %source.display(), error = %err, "Failed to process image");
            JobResult::Failed {
                kind: err.kind(),
                message: err.to_string(),
                source,
            }
        });

        observer.on_result(&result);
        let failed = !result.is_success();
        report.push(result);

        if failed && job.options.fail_fast {
            report.aborted = true;
            break;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageError;
    use image::{GenericImageView, ImageFormat, RgbImage};
    use std::fs;
    use tempfile::TempDir;

    fn write_fixture(dir: &Path, name: &str, width: u32, height: u32, format: ImageFormat) {
        RgbImage::from_fn(width, height, |x, y| image::Rgb([(x % 256) as u8, (y % 256) as u8, 90]))
            .save_with_format(dir.join(name), format)
            .unwrap();
    }

    fn dimensions(path: &Path) -> (u32, u32) {
        image::open(path).unwrap().dimensions()
    }

    #[derive(Default)]
    struct Recorder {
        total: Option<usize>,
        started: Vec<PathBuf>,
        results: Vec<JobResult>,
    }

    impl JobObserver for Recorder {
        fn on_batch_start(&mut self, total: usize) {
            self.total = Some(total);
        }

        fn on_file_start(&mut self, source: &Path) {
            self.started.push(source.to_path_buf());
        }

        fn on_result(&mut self, result: &JobResult) {
            self.results.push(result.clone());
        }
    }

    #[test]
    fn test_mixed_directory_to_png() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), "photo.JPG", 2000, 1000, ImageFormat::Jpeg);
        write_fixture(dir.path(), "logo.png", 400, 300, ImageFormat::Png);

        let job = BatchJob::new(dir.path(), 500, "png", 80);
        let report = run_batch(&job, &mut NoopObserver).unwrap();

        assert_eq!(report.processed, 2);
        assert!(report.is_success());
        let resized = dir.path().join("resized");
        assert_eq!(dimensions(&resized.join("photo.png")), (500, 250));
        assert_eq!(dimensions(&resized.join("logo.png")), (500, 375));
    }

    #[test]
    fn test_empty_directory_creates_nothing() {
        let dir = TempDir::new().unwrap();

        let report = run_batch(&BatchJob::new(dir.path(), 500, "png", 80), &mut NoopObserver).unwrap();

        assert_eq!(report.processed, 0);
        assert!(report.is_success());
        assert!(!dir.path().join("resized").exists());
    }

    #[test]
    fn test_invalid_format_without_candidates_is_silent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), b"hello").unwrap();

        let report = run_batch(&BatchJob::new(dir.path(), 500, "tiff", 80), &mut NoopObserver).unwrap();
        assert!(report.is_success());
    }

    #[test]
    fn test_unsupported_format_writes_nothing() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), "a.png", 40, 20, ImageFormat::Png);

        let report = run_batch(&BatchJob::new(dir.path(), 10, "TIFF", 80), &mut NoopObserver).unwrap();

        assert_eq!(report.failed, 1);
        assert!(matches!(
            &report.results[0],
            JobResult::Failed { kind: ErrorKind::UnsupportedFormat, message, .. } if message.contains("tiff")
        ));
        assert!(!dir.path().join("resized").exists());
    }

    #[test]
    fn test_failures_are_isolated() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a_broken.jpg"), b"garbage").unwrap();
        write_fixture(dir.path(), "b_good.bmp", 30, 10, ImageFormat::Bmp);

        let mut recorder = Recorder::default();
        let report = run_batch(&BatchJob::new(dir.path(), 15, "bmp", 0), &mut recorder).unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.succeeded, 1);
        assert!(!report.aborted);
        assert!(matches!(report.results[0], JobResult::Failed { kind: ErrorKind::Decode, .. }));
        assert_eq!(dimensions(&dir.path().join("resized").join("b_good.bmp")), (15, 5));

        assert_eq!(recorder.total, Some(2));
        assert_eq!(recorder.started.len(), 2);
        assert_eq!(recorder.results, report.results);
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a_broken.png"), b"garbage").unwrap();
        write_fixture(dir.path(), "b_good.png", 30, 10, ImageFormat::Png);

        let job = BatchJob::new(dir.path(), 15, "png", 0).with_options(BatchOptions {
            fail_fast: true,
            ..BatchOptions::default()
        });
        let report = run_batch(&job, &mut NoopObserver).unwrap();

        assert!(report.aborted);
        assert_eq!(report.processed, 1);
        assert!(!dir.path().join("resized").join("b_good.png").exists());
    }

    #[test]
    fn test_non_positive_width_fails_each_file() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), "a.png", 40, 20, ImageFormat::Png);

        let report = run_batch(&BatchJob::new(dir.path(), -5, "png", 80), &mut NoopObserver).unwrap();
        assert!(matches!(
            report.results[0],
            JobResult::Failed { kind: ErrorKind::InvalidDimension, .. }
        ));
    }

    #[test]
    fn test_rerun_is_byte_identical_for_lossless() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), "a.png", 64, 48, ImageFormat::Png);
        let job = BatchJob::new(dir.path(), 32, "png", 80);
        let out = dir.path().join("resized").join("a.png");

        run_batch(&job, &mut NoopObserver).unwrap();
        let first = fs::read(&out).unwrap();
        let report = run_batch(&job, &mut NoopObserver).unwrap();
        let second = fs::read(&out).unwrap();

        assert!(report.is_success());
        assert_eq!(first, second);
    }

    #[test]
    fn test_jpeg_identifier_keeps_extension() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), "pic.bmp", 20, 20, ImageFormat::Bmp);

        run_batch(&BatchJob::new(dir.path(), 10, "JPEG", 150), &mut NoopObserver).unwrap();
        run_batch(&BatchJob::new(dir.path(), 10, "jpg", 150), &mut NoopObserver).unwrap();

        let resized = dir.path().join("resized");
        assert!(resized.join("pic.jpeg").is_file());
        assert!(resized.join("pic.jpg").is_file());
    }

    #[test]
    fn test_custom_output_dir() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), "a.png", 40, 20, ImageFormat::Png);

        let job = BatchJob::new(dir.path(), 20, "gif", 80).with_options(BatchOptions {
            output_dir_name: "thumbs".to_string(),
            filter: ResizeFilter::Lanczos3,
            fail_fast: false,
        });
        run_batch(&job, &mut NoopObserver).unwrap();

        assert_eq!(dimensions(&dir.path().join("thumbs").join("a.gif")), (20, 10));
    }

    #[test]
    fn test_missing_directory() {
        let err = run_batch(&BatchJob::new("/no/such/dir", 10, "png", 80), &mut NoopObserver).unwrap_err();
        assert!(matches!(err, ImageError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_report_serializes_results() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), "a.png", 40, 20, ImageFormat::Png);

        let report = run_batch(&BatchJob::new(dir.path(), 20, "png", 80), &mut NoopObserver).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["succeeded"], 1);
        assert_eq!(json["results"][0]["status"], "written");
        assert_eq!(json["results"][0]["height"], 10);
        assert!(report.bytes_written() > 0);
    }
}
