//! AnvilGUI Configuration
//!
//! Loads plugin settings from `anvilgui.txt`: one `key = value` per line,
//! `#` and `//` comments, unknown keys skipped with a warning. Every key is
//! optional.

use anvilgui_core::Component;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "anvilgui.txt";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value {value:?} for `{key}` on line {line}")]
    InvalidValue {
        key: String,
        value: String,
        line: usize,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Plugin configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnvilConfig {
    /// Version string used instead of the host's (from "versionoverride" option)
    pub version_override: Option<String>,
    /// Literal default title, empty for the translated "Repair" (from "defaulttitle" option)
    pub default_title: String,
    /// Builder default for prevent-close (from "preventclose" option)
    pub prevent_close: bool,
    /// Log filter directive (from "loglevel" option, default: info)
    pub log_level: String,
}

impl Default for AnvilConfig {
    fn default() -> Self {
        Self {
            version_override: None,
            default_title: String::new(),
            prevent_close: false,
            log_level: "info".to_string(),
        }
    }
}

impl AnvilConfig {
    /// Load configuration from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parse config file content
    pub fn parse(content: &str) -> Result<Self> {
        let mut config = Self::default();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!("Ignoring config line {} without '=': {:?}", index + 1, line);
                continue;
            };
            config.parse_option(key.trim(), value.trim(), index + 1)?;
        }

        Ok(config)
    }

    fn parse_option(&mut self, key: &str, value: &str, line: usize) -> Result<()> {
        match key.to_ascii_lowercase().as_str() {
            "versionoverride" => {
                self.version_override = (!value.is_empty()).then(|| value.to_string());
            }
            "defaulttitle" => self.default_title = value.into(),
            "preventclose" => {
                self.prevent_close = parse_bool(value).ok_or_else(|| ConfigError::InvalidValue {
                    key: key.into(),
                    value: value.into(),
                    line,
                })?;
            }
            "loglevel" => {
                if !value.is_empty() {
                    self.log_level = value.into();
                }
            }
            _ => tracing::warn!("Ignoring unknown config key `{}` on line {}", key, line),
        }
        Ok(())
    }

    /// Title for GUIs that do not set one
    pub fn default_title(&self) -> Component {
        if self.default_title.is_empty() {
            Component::repair()
        } else {
            Component::text(self.default_title.clone())
        }
    }

    /// Display configuration summary
    pub fn display(&self) {
        tracing::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        tracing::info!("AnvilGUI Configuration:");
        tracing::info!(
            "    Version Override: {}",
            self.version_override.as_deref().unwrap_or("(none - ask the server)")
        );
        tracing::info!("    Default Title: {}", self.default_title().to_plain());
        tracing::info!("    Prevent Close: {}", self.prevent_close);
        tracing::info!("    Log Level: {}", self.log_level);
        tracing::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
