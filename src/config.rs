use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgba;
use crate::hex::{normalize_hex, HexError};
use crate::picker::YAxis;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}: {}", .path.display(), .source)]
    Io { path: PathBuf, source: io::Error },
    #[error("parsing {}: {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("initial_color: {0}")]
    InvalidColor(#[from] HexError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub y_axis: YAxis,
    /// Hex text, same rules as the hex field. `None` starts from a random color.
    pub initial_color: Option<String>,
    pub copied_indicator_ms: u64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            y_axis: YAxis::default(),
            initial_color: None,
            copied_indicator_ms: 1500,
        }
    }
}

impl PickerConfig {
    pub fn from_json(data: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(data).map_err(|source| ConfigError::Json {
            path: path.to_owned(),
            source,
        })
    }

    /// The configured starting color, opaque unless the text carries alpha.
    pub fn initial_color(&self) -> Result<Option<Rgba>, ConfigError> {
        let Some(text) = &self.initial_color else {
            return Ok(None);
        };
        let hex = normalize_hex(text)?;
        Ok(Some(hex.rgb.with_alpha(hex.alpha.unwrap_or(0xff))))
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(dir).join("color-picker").join("config.json");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join("color-picker")
            .join("config.json");
    }
    PathBuf::from("config.json")
}

/// Reads the config at `path`. A missing file means defaults.
pub fn load_config(path: &Path) -> Result<PickerConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(data) => PickerConfig::from_json(&data, path),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(PickerConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_owned(),
            source,
        }),
    }
}
