use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Bundled defaults, validated by `build.rs`.
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub render: Settings,
    pub export: ExportConfig,
}

/// List formatting policy for one conversion.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Drop the bullet glyph from bullet list items.
    pub ignore_bullets: bool,
    pub ordered_list_style: OrderedListStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ignore_bullets: true,
            ordered_list_style: OrderedListStyle::Text,
        }
    }
}

/// How ordered list items are numbered.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderedListStyle {
    /// Literal "N. " prefix.
    #[default]
    Text,
    /// Native numbered-list paragraph style, manual prefix if missing.
    List,
    /// No marker.
    None,
}

impl std::str::FromStr for OrderedListStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "list" => Ok(Self::List),
            "none" => Ok(Self::None),
            other => Err(Error::Config(format!(
                "unknown ordered list style '{other}', expected text, list or none"
            ))),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Reference document supplying paragraph and character styles.
    pub template: Option<PathBuf>,
}

impl Config {
    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::compiled_default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Defaults bundled into the binary.
    pub fn compiled_default() -> Self {
        Self::parse(DEFAULT_CONFIG).unwrap_or_default()
    }
}
