//! Progress indicators
//!
//! A per-file progress bar for batch runs, drawn on stderr only when it is a terminal.

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a progress bar over `total` files.
///
/// Returns a hidden bar when `enabled` is false or stderr is not a terminal,
/// so callers can drive it unconditionally.
pub fn file_progress(total: u64, enabled: bool) -> ProgressBar {
    if !enabled || !Term::stderr().is_term() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta}) {msg}",
    )
    .map(|s| s.progress_chars("█▓░"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Finish a progress bar with a success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {}", message));
}

/// Finish a progress bar with an error message
pub fn finish_error(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✗ {}", message));
}
