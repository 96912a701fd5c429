//! imgbatch: resize every image in a directory to a target width.

use anyhow::Result;
use clap::Parser;
use imgbatch_cli::output::{batch_summary, Status};
use imgbatch_cli::progress::{file_progress, finish_error, finish_success};
use imgbatch_core::config::{Config, ResizeFilter};
use imgbatch_core::error::exit_codes;
use imgbatch_image::{run_batch, BatchJob, BatchOptions, BatchReport, JobObserver, JobResult};
use imgbatch_telemetry::{TelemetryConfig, Timer};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "imgbatch")]
#[command(about = "Resize every image in a directory to a target width")]
#[command(version)]
struct Cli {
    /// Directory containing the images (not searched recursively)
    directory: PathBuf,

    /// Target width in pixels; the height follows the aspect ratio
    #[arg(value_parser = parse_width, allow_negative_numbers = true)]
    target_width: i64,

    /// Output format: jpg, jpeg, png, bmp or gif
    output_format: String,

    /// Output quality (JPEG only, clamped to 1-100)
    #[arg(value_parser = parse_quality, allow_negative_numbers = true)]
    quality: i64,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Resize filter (nearest, triangle, catmull-rom, gaussian, lanczos3)
    #[arg(long)]
    filter: Option<ResizeFilter>,

    /// Stop at the first image that fails
    #[arg(long)]
    fail_fast: bool,

    /// Print the batch report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_width(value: &str) -> imgbatch_core::Result<i64> {
    value.trim().parse().map_err(|_| imgbatch_core::Error::invalid_width())
}

fn parse_quality(value: &str) -> imgbatch_core::Result<i64> {
    value.trim().parse().map_err(|_| imgbatch_core::Error::invalid_quality())
}

/// Exit code for a rejected command line; coded argument errors pick their own.
fn usage_exit_code(err: &clap::Error) -> i32 {
    std::error::Error::source(err)
        .and_then(|source| source.downcast_ref::<imgbatch_core::Error>())
        .map(imgbatch_core::Error::exit_code)
        .unwrap_or_else(|| err.exit_code())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = usage_exit_code(&err);
            let _ = err.print();
            return ExitCode::from(u8::try_from(code).unwrap_or(1));
        }
    };
    let json = cli.json;

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => match err.downcast_ref::<imgbatch_core::Error>() {
            Some(core) => {
                if json {
                    match serde_json::to_string_pretty(&core.to_report()) {
                        Ok(report) => println!("{}", report),
                        Err(_) => Status::error(&core.to_string()),
                    }
                } else {
                    Status::error(&core.to_string());
                }
                core.exit_code()
            }
            None => {
                Status::error(&format!("{:#}", err));
                exit_codes::FAILURE
            }
        },
    };

    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn run(cli: Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref())?;

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    if let Err(e) = imgbatch_telemetry::init_with_config(TelemetryConfig::for_level(level, cli.verbose)) {
        Status::warning(&format!("Logging disabled: {}", e));
    }

    let mut options = BatchOptions::from(&config.schema);
    if let Some(filter) = cli.filter {
        options.filter = filter;
    }
    options.fail_fast |= cli.fail_fast;

    let job = BatchJob::new(&cli.directory, cli.target_width, &cli.output_format, cli.quality)
        .with_options(options);

    let timer = Timer::start("batch");
    let mut reporter = ConsoleReporter::new(!cli.json);
    let report = run_batch(&job, &mut reporter).map_err(imgbatch_core::Error::from)?;
    let elapsed = timer.stop();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        reporter.finish(&report, elapsed);
    }

    Ok(if report.is_success() {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILURE
    })
}

/// Prints one line per file and drives the progress bar.
struct ConsoleReporter {
    enabled: bool,
    progress: ProgressBar,
}

impl ConsoleReporter {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            progress: ProgressBar::hidden(),
        }
    }

    fn finish(&self, report: &BatchReport, elapsed: Duration) {
        let summary = batch_summary(report.succeeded, report.failed, report.bytes_written(), elapsed);
        if report.is_success() {
            finish_success(&self.progress, &summary);
        } else {
            finish_error(&self.progress, &summary);
        }

        if report.processed == 0 {
            Status::info(&format!("No images found in {}", report.directory.display()));
            return;
        }
        if report.aborted {
            Status::warning("Stopped after the first failure (--fail-fast)");
        }
        Status::info(&summary);
    }
}

impl JobObserver for ConsoleReporter {
    fn on_batch_start(&mut self, total: usize) {
        self.progress = file_progress(total as u64, self.enabled);
    }

    fn on_file_start(&mut self, source: &Path) {
        if let Some(name) = source.file_name() {
            self.progress.set_message(name.to_string_lossy().into_owned());
        }
    }

    fn on_result(&mut self, result: &JobResult) {
        if self.enabled {
            self.progress.suspend(|| match result {
                JobResult::Written { destination, .. } => Status::saved(destination),
                JobResult::Failed { source, message, .. } => Status::failed(source, message),
            });
        }
        self.progress.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use imgbatch_core::ErrorCode;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_positionals() {
        let cli = Cli::try_parse_from(["imgbatch", "photos", "500", "PNG", "80"]).unwrap();
        assert_eq!(cli.directory, PathBuf::from("photos"));
        assert_eq!(cli.target_width, 500);
        assert_eq!(cli.output_format, "PNG");
        assert_eq!(cli.quality, 80);
        assert!(cli.filter.is_none());
    }

    #[test]
    fn test_negative_numbers_are_values() {
        let cli = Cli::try_parse_from(["imgbatch", "photos", "-5", "jpg", "-1"]).unwrap();
        assert_eq!(cli.target_width, -5);
        assert_eq!(cli.quality, -1);
    }

    fn argument_error(err: &clap::Error) -> Option<&imgbatch_core::Error> {
        std::error::Error::source(err).and_then(|s| s.downcast_ref::<imgbatch_core::Error>())
    }

    #[test]
    fn test_invalid_width_rejected() {
        let err = Cli::try_parse_from(["imgbatch", "photos", "abc", "png", "80"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("Please specify a valid width."));
        assert_eq!(argument_error(&err).unwrap().code, ErrorCode::InvalidWidth);
        assert_eq!(usage_exit_code(&err), exit_codes::VALIDATION_ERROR);
    }

    #[test]
    fn test_invalid_quality_rejected() {
        let err = Cli::try_parse_from(["imgbatch", "photos", "10", "png", "high"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("Please specify a valid quality."));
        assert_eq!(argument_error(&err).unwrap().code, ErrorCode::InvalidQuality);
        assert_eq!(usage_exit_code(&err), exit_codes::VALIDATION_ERROR);
    }

    #[test]
    fn test_missing_arguments_rejected() {
        let err = Cli::try_parse_from(["imgbatch", "photos", "500", "png"]).err().unwrap();
        assert!(argument_error(&err).is_none());
        assert_eq!(usage_exit_code(&err), exit_codes::VALIDATION_ERROR);
    }

    #[test]
    fn test_filter_option() {
        let cli = Cli::try_parse_from(["imgbatch", "--filter", "lanczos3", "d", "1", "png", "1"]).unwrap();
        assert_eq!(cli.filter, Some(ResizeFilter::Lanczos3));
    }
}
