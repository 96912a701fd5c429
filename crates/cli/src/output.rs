//! Terminal output utilities
//!
//! Consistent status lines and human-readable formatting for the CLI.

use owo_colors::OwoColorize;
use std::path::Path;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Confirm that one output file was written
    pub fn saved(destination: &Path) {
        Self::success(&format!("Image resized and saved to {}", destination.display()));
    }

    /// Report that one input file failed
    pub fn failed(source: &Path, reason: &str) {
        Self::error(&format!("{}: {}", source.display(), reason.dimmed()));
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// One-line batch summary, e.g. `3 images resized, 1 failed (1.20 MB in 2.1s)`
pub fn batch_summary(succeeded: usize, failed: usize, bytes: u64, elapsed: std::time::Duration) -> String {
    let mut line = format!("{} resized", format_count(succeeded, "image", "images"));
    if failed > 0 {
        line.push_str(&format!(", {} failed", failed));
    }
    line.push_str(&format!(" ({} in {})", format_size(bytes), format_duration(elapsed)));
    line
}
