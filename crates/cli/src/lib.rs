//! CLI utilities for the imgbatch tools
//!
//! Provides shared CLI functionality:
//! - Status lines and summary formatting
//! - Progress indicators

#![warn(missing_docs)]

pub mod output;
pub mod progress;
