//! Application configuration
//!
//! Settings come from the environment (`LIBAPP_DATA_FILE`, `LIBAPP_AUTOSAVE`)
//! and may be overridden by a JSON file supplied on the command line.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the catalog file
pub const DATA_FILE_ENV: &str = "LIBAPP_DATA_FILE";

/// Environment variable toggling autosave
pub const AUTOSAVE_ENV: &str = "LIBAPP_AUTOSAVE";

const DEFAULT_FILE_NAME: &str = ".simple_library.json";

/// Configuration for the catalog service
///
/// With `autosave` disabled, mutations stay in memory until the catalog is
/// flushed or replaced; a crash loses everything since the last write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub autosave: bool,
}

impl Default for AppConfig {
    /// `~/.simple_library.json` with autosave on
    fn default() -> Self {
        Self {
            data_file: home_dir().join(DEFAULT_FILE_NAME),
            autosave: true,
        }
    }
}

impl AppConfig {
    pub fn new(data_file: impl Into<PathBuf>, autosave: bool) -> Self {
        Self {
            data_file: data_file.into(),
            autosave,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_file = match lookup(DATA_FILE_ENV) {
            Some(path) if !path.is_empty() => expand_home(&path),
            _ => Self::default().data_file,
        };
        let autosave = lookup(AUTOSAVE_ENV).map_or(true, |flag| parse_flag(&flag));
        Self {
            data_file,
            autosave,
        }
    }

    /// Layer file-supplied overrides on top of this configuration
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(data_file) = overrides.data_file {
            self.data_file = data_file;
        }
        if let Some(autosave) = overrides.autosave {
            self.autosave = autosave.enabled();
        }
        self
    }
}

/// Optional overrides read from a JSON configuration file
#[derive(Debug, Default, Deserialize)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    #[serde(default, deserialize_with = "present")]
    pub autosave: Option<AutosaveFlag>,
}

/// Autosave value as written in an override file
///
/// Accepts booleans, truthy strings and numbers; an explicit `null` disables it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AutosaveFlag {
    Bool(bool),
    Text(String),
    Number(f64),
    Null,
}

impl AutosaveFlag {
    pub fn enabled(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Text(value) => parse_flag(value),
            Self::Number(value) => *value != 0.0,
            Self::Null => false,
        }
    }
}

/// Keep `"autosave": null` distinguishable from a missing key
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<AutosaveFlag>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    AutosaveFlag::deserialize(deserializer).map(Some)
}

impl ConfigOverrides {
    /// Read overrides from a JSON file
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

/// Truthy strings are `1`, `true`, `yes` and `on`, case-insensitive
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Strict boolean parsing for request parameters
///
/// Truthy as in [`parse_flag`]; falsy are `0`, `false`, `no` and `off`.
/// Anything else is `None`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some("") => home_dir(),
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => {
            home_dir().join(&rest[1..])
        }
        _ => PathBuf::from(path),
    }
}
