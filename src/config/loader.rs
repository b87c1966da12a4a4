//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::DashboardConfig;
use crate::config::validation::lint_config;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The source could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source was read but is not a well-formed document.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl ConfigError {
    /// Path of the document the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Toml,
    Json,
}

impl Format {
    /// Pick a format from the file extension. Unknown extensions are YAML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => Format::Toml,
            Some("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Load, parse and lint the configuration at `path`.
pub fn load_config(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&bytes, Format::from_path(path), path)?;

    for warning in lint_config(&config) {
        tracing::warn!(path = %path.display(), "{}", warning);
    }

    Ok(config)
}

/// Parse a document already in memory. `origin` is only used for error context.
pub fn parse_config(
    bytes: &[u8],
    format: Format,
    origin: &Path,
) -> Result<DashboardConfig, ConfigError> {
    let parse_error = |message: String| ConfigError::Parse {
        path: origin.to_path_buf(),
        message,
    };

    let text = std::str::from_utf8(bytes).map_err(|e| parse_error(e.to_string()))?;
    if text.trim().is_empty() {
        return Err(parse_error("document is empty".to_string()));
    }

    // A document with no content node (only comments, a bare `---`, `null`)
    // would otherwise deserialize into an all-default config.
    let no_content = || parse_error("document has no content".to_string());

    match format {
        Format::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
            if value.is_null() {
                return Err(no_content());
            }
            serde_yaml::from_value(value).map_err(|e| parse_error(e.to_string()))
        }
        Format::Toml => {
            let table: toml::Table = toml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
            if table.is_empty() {
                return Err(no_content());
            }
            toml::Value::Table(table)
                .try_into()
                .map_err(|e| parse_error(e.to_string()))
        }
        Format::Json => {
            let value: serde_json::Value =
                serde_json::from_str(text).map_err(|e| parse_error(e.to_string()))?;
            if value.is_null() {
                return Err(no_content());
            }
            serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))
        }
    }
}
