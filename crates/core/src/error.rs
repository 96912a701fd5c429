//! Structured application errors with codes and recovery suggestions
//!
//! Library crates report their own `thiserror` enums; at the program boundary
//! they are folded into [`Error`], which carries:
//! - An error code for programmatic handling
//! - Optional context and a recovery suggestion
//! - The process exit code the CLI should terminate with

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // IO errors (2xxx)
    /// Generic filesystem failure
    IoError = 2000,
    /// A file vanished or never existed
    FileNotFound = 2001,
    /// Insufficient permissions
    PermissionDenied = 2002,
    /// Path cannot be turned into an output name
    InvalidPath = 2003,
    /// Input directory is missing
    DirectoryNotFound = 2004,

    // Configuration errors (3xxx)
    /// Config file unreadable
    ConfigError = 3000,
    /// `--config` path does not exist
    ConfigNotFound = 3001,
    /// Malformed TOML or unknown keys
    ConfigParseError = 3002,
    /// Well-formed but semantically invalid config
    ConfigValidationError = 3003,

    // Argument errors (4xxx)
    /// Target width is not an integer
    InvalidWidth = 4001,
    /// Quality is not an integer
    InvalidQuality = 4002,

    // Image errors (5xxx)
    /// Input could not be decoded
    DecodeFailed = 5001,
    /// Encoder rejected the raster
    EncodeFailed = 5002,
    /// Output format identifier not recognised
    UnsupportedFormat = 5003,
    /// Target dimensions are not positive
    InvalidDimension = 5004,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            2 => "IO",
            3 => "Configuration",
            4 => "Argument",
            5 => "Image",
            _ => "Unknown",
        }
    }

    /// Process exit code for errors of this kind
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCode::DirectoryNotFound => exit_codes::DIRECTORY_NOT_FOUND,
            ErrorCode::InvalidWidth | ErrorCode::InvalidQuality => exit_codes::VALIDATION_ERROR,
            ErrorCode::ConfigError
            | ErrorCode::ConfigNotFound
            | ErrorCode::ConfigParseError
            | ErrorCode::ConfigValidationError => exit_codes::CONFIG_ERROR,
            _ => exit_codes::FAILURE,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Exit code the process should terminate with
    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    // Convenience constructors

    /// Input directory is missing or not a directory
    pub fn directory_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::DirectoryNotFound,
            format!("The specified directory does not exist: {}", path.as_ref().display()),
        )
        .with_suggestion("Pass the path of an existing directory containing images")
    }

    /// Config file could not be read
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Explicit config path does not exist
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Check the path given to --config")
    }

    /// Config parsed but holds an invalid value
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigValidationError, message)
    }

    /// Target width argument is not an integer
    pub fn invalid_width() -> Self {
        Self::new(ErrorCode::InvalidWidth, "Please specify a valid width.")
    }

    /// Quality argument is not an integer
    pub fn invalid_quality() -> Self {
        Self::new(ErrorCode::InvalidQuality, "Please specify a valid quality.")
    }

    /// Output format identifier is not in the format table
    pub fn unsupported_format(format: &str) -> Self {
        Self::new(
            ErrorCode::UnsupportedFormat,
            format!("Unsupported format: {}", format),
        )
        .with_suggestion("Use one of: jpg, jpeg, png, bmp, gif")
    }
}

/// Serializable error report for logging and JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error code
    pub code: ErrorCode,
    /// Code rendered as `E####`
    pub code_str: String,
    /// Category name
    pub category: String,
    /// Human-readable message
    pub message: String,
    /// Additional context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Recovery suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Source error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for the CLI
pub mod exit_codes {
    /// Every selected file was written
    pub const SUCCESS: i32 = 0;
    /// At least one file in the batch failed
    pub const FAILURE: i32 = 1;
    /// Arguments missing or malformed
    pub const VALIDATION_ERROR: i32 = 2;
    /// Config file missing or invalid
    pub const CONFIG_ERROR: i32 = 3;
    /// Input directory missing
    pub const DIRECTORY_NOT_FOUND: i32 = 4;
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error, if any
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
