//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Component, Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit file path, or use defaults.
    ///
    /// There is no discovery: without a path the defaults are returned.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.is_file() {
            return Err(Error::config_not_found(path));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {}", path.display(), e))
                .with_source(e)
        })?;

        let schema = Self::parse(&content)
            .context(format!("Failed to load config file {}", path.display()))?;

        Ok(Self {
            schema,
            path: Some(path.to_path_buf()),
        })
    }

    /// Parse and validate TOML configuration text
    pub fn parse(content: &str) -> Result<ConfigSchema> {
        let schema: ConfigSchema = toml::from_str(content)?;
        validate(&schema)?;
        Ok(schema)
    }
}

fn validate(schema: &ConfigSchema) -> Result<()> {
    let dir_name = schema.output.dir_name.as_str();
    let mut components = Path::new(dir_name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if dir_name.is_empty() || !single_normal {
        return Err(Error::config_validation(format!(
            "output.dir_name must be a single directory name, got '{}'",
            dir_name
        ))
        .with_suggestion("Use a plain name such as \"resized\""));
    }

    Ok(())
}
