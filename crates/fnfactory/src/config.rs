//! Driver configuration, loaded from TOML.
//!
//! ```toml
//! point = 1.0        # where every variant is evaluated
//! format = "text"    # "text" or "binary"
//! log = "info"       # tracing filter directive
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Encoding of a record stream.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum StreamFormat {
    /// Whitespace-separated tokens.
    #[default]
    Text,
    /// Big-endian `i32` tags and `f64` fields.
    Binary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    pub point: f64,
    pub format: StreamFormat,
    pub log: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            point: 1.0,
            format: StreamFormat::Text,
            log: "info".to_owned(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl DriverConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
