//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigSchema {
    /// `[resize]` table
    #[serde(default)]
    pub resize: ResizeConfig,

    /// `[output]` table
    #[serde(default)]
    pub output: OutputConfig,

    /// `[logging]` table
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Resize engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ResizeConfig {
    /// Interpolation filter used when scaling
    #[serde(default)]
    pub filter: ResizeFilter,
}

/// Interpolation filters understood by the resize engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    /// Nearest neighbour
    Nearest,
    /// Bilinear
    #[default]
    Triangle,
    /// Catmull-Rom cubic
    CatmullRom,
    /// Gaussian
    Gaussian,
    /// Lanczos with window 3
    Lanczos3,
}

impl ResizeFilter {
    /// Name as written in configuration files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            ResizeFilter::Nearest => "nearest",
            ResizeFilter::Triangle => "triangle",
            ResizeFilter::CatmullRom => "catmull-rom",
            ResizeFilter::Gaussian => "gaussian",
            ResizeFilter::Lanczos3 => "lanczos3",
        }
    }
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResizeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(ResizeFilter::Nearest),
            "triangle" | "bilinear" => Ok(ResizeFilter::Triangle),
            "catmull-rom" | "catmullrom" => Ok(ResizeFilter::CatmullRom),
            "gaussian" => Ok(ResizeFilter::Gaussian),
            "lanczos3" => Ok(ResizeFilter::Lanczos3),
            other => Err(format!(
                "unknown filter '{}' (expected nearest, triangle, catmull-rom, gaussian or lanczos3)",
                other
            )),
        }
    }
}

/// Output writer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Name of the subdirectory results are written into
    #[serde(default = "default_dir_name")]
    pub dir_name: String,

    /// Stop the batch at the first failing file
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir_name: default_dir_name(),
            fail_fast: false,
        }
    }
}

fn default_dir_name() -> String {
    "resized".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "error".to_string()
}
