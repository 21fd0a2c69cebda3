//! Configuration for the dropdown host
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/tui-dropdown/config.toml, or `--config <path>`)
//! 3. Built-in defaults (lowest priority)

use crate::dropdown::{ButtonConfig, ButtonType, DropdownProps, Item, RawDropdownProps};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Env var overriding the theme name
pub const THEME_ENV: &str = "TUI_DROPDOWN_THEME";

/// Env var overriding the log level
pub const LOG_LEVEL_ENV: &str = "TUI_DROPDOWN_LOG_LEVEL";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Theme name: "auto", "dracula", "nord", "gruvbox"
    pub theme: String,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// The dropdown the host displays
    pub dropdown: DropdownProps,

    /// File the config was read from (None = built-in defaults)
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "auto".to_string(),
            logging: LoggingConfig::default(),
            dropdown: Self::sample_dropdown(),
            source: None,
        }
    }
}

impl Config {
    /// Dropdown shown when the config file has no [dropdown] section
    pub fn sample_dropdown() -> DropdownProps {
        DropdownProps::new(
            "Fruit",
            vec![
                Item::header("Fresh"),
                Item::new("Apple").with_icon("star"),
                Item::new("Banana"),
                Item::separator(),
                Item::new("Grape"),
                Item::new("Durian").disabled(),
                Item::group(
                    "Citrus",
                    vec![Item::checkbox("Lemon", false), Item::checkbox("Lime", true)],
                ),
                Item::radio_group(
                    "size",
                    vec![Item::radio("Small", "s"), Item::radio("Large", "l")],
                ),
            ],
        )
        .searchable(true)
        .with_help_text("Pick a fruit")
        .with_caption("Showing seasonal fruit")
        .with_button(ButtonConfig::new("Apply").with_kind(ButtonType::Submit))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,

    /// Optional [dropdown] section
    pub dropdown: Option<RawDropdownProps>,
}

/// Values taken from the environment
#[derive(Debug, Default)]
pub(crate) struct EnvOverrides {
    pub theme: Option<String>,
    pub log_level: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            theme: std::env::var(THEME_ENV).ok(),
            log_level: std::env::var(LOG_LEVEL_ENV).ok(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/tui-dropdown/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("tui-dropdown").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Create parent directory
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Use Config::default().to_toml() as single source of truth
        let template = Self::default().to_toml();

        // Write config (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Read and parse a config file; a missing file yields `None`
    ///
    /// A file that exists but cannot be read or parsed is an error: a broken
    /// config should fail fast rather than silently fall back to defaults.
    fn load_file_config(path: &Path) -> Result<Option<FileConfig>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Cannot read config file {}", path.display()))
            }
        };

        let file = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(Some(file))
    }

    /// Load configuration: env vars > file > defaults
    ///
    /// `path` overrides the default config location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(Self::config_path);

        let (file, source) = match &path {
            Some(path) => match Self::load_file_config(path)? {
                Some(file) => (file, Some(path.clone())),
                None => (FileConfig::default(), None),
            },
            None => (FileConfig::default(), None),
        };

        let mut config = Self::resolve(file, EnvOverrides::from_env())?;
        config.source = source;
        Ok(config)
    }

    /// Merge file values and env overrides over the defaults
    pub(crate) fn resolve(file: FileConfig, env: EnvOverrides) -> Result<Self> {
        // Theme: env > file > default
        let theme = env
            .theme
            .or(file.theme)
            .unwrap_or_else(|| "auto".to_string());

        // Logging: file > default, then the level env override
        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) = env.log_level {
            logging.level = level;
        }

        // Dropdown: file > sample
        let dropdown = match file.dropdown {
            Some(raw) => DropdownProps::try_from(raw).context("Invalid [dropdown] section")?,
            None => Self::sample_dropdown(),
        };

        Ok(Self {
            theme,
            logging,
            dropdown,
            source: None,
        })
    }
}
