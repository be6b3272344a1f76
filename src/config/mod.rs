//! Configuration management for typeahead
//!
//! This module handles loading, parsing, and managing configuration from:
//! - Configuration files (TOML format)
//! - Command-line arguments (applied by the CLI on top of the file)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values
//!
//! [`EngineConfig`] is the per-instance snapshot consumed by the autocomplete
//! engine; the remaining sections only concern the terminal host.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::error::{ConfigError, Result, TypeaheadError};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Autocomplete engine configuration
    #[serde(default)]
    pub autocomplete: EngineConfig,

    /// Terminal display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Engine options, fixed for the lifetime of one engine instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Minimum query length (in characters) before suggestions are requested
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Debounce interval in milliseconds
    #[serde(default)]
    pub delay_ms: u64,

    /// Disable the per-instance result cache
    #[serde(default)]
    pub no_cache: bool,

    /// Expose require-match validity to the host
    #[serde(default)]
    pub require_match: bool,

    /// Auto-commit a single exact match
    #[serde(default)]
    pub select_on_match: bool,

    /// Compare exact matches case-insensitively
    #[serde(default)]
    pub match_case_insensitive: bool,

    /// Highlight the first entry whenever a new result set opens
    #[serde(default)]
    pub autoselect: bool,

    /// Maximum number of entries delivered to the list
    #[serde(default)]
    pub dropdown_items: Option<usize>,

    /// Escape key behavior: any of `blur`, `clear`, or `none`
    #[serde(default = "default_escape_options")]
    pub escape_options: String,

    /// Trim surrounding whitespace from the query
    #[serde(default = "default_trim")]
    pub trim: bool,

    /// A "no matches" indicator is available to the renderer
    #[serde(default)]
    pub not_found: bool,

    /// Also show the "no matches" indicator next to partial matches
    #[serde(default)]
    pub show_not_complete: bool,
}

/// Terminal display configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Enable colored output
    #[serde(default = "default_color_output")]
    pub color_output: bool,

    /// Rows of the dropdown drawn at once
    #[serde(default = "default_visible_rows")]
    pub visible_rows: usize,

    /// Prompt printed in front of the input
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Text shown when the not-found indicator is visible
    #[serde(default = "default_not_found_text")]
    pub not_found_text: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Path to log file (None for stderr)
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parsed escape key behavior.
///
/// `blur` removes focus and closes the dropdown, `clear` empties the query and
/// the selected item. Both may apply; `none` disables the key entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeOptions {
    pub blur: bool,
    pub clear: bool,
}

// Default value functions
fn default_min_length() -> usize {
    1
}

fn default_escape_options() -> String {
    "blur clear".to_string()
}

fn default_trim() -> bool {
    true
}

fn default_color_output() -> bool {
    true
}

fn default_visible_rows() -> usize {
    8
}

fn default_prompt() -> String {
    "> ".to_string()
}

fn default_not_found_text() -> String {
    "No matches found.".to_string()
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            delay_ms: 0,
            no_cache: false,
            require_match: false,
            select_on_match: false,
            match_case_insensitive: false,
            autoselect: false,
            dropdown_items: None,
            escape_options: default_escape_options(),
            trim: default_trim(),
            not_found: false,
            show_not_complete: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: default_color_output(),
            visible_rows: default_visible_rows(),
            prompt: default_prompt(),
            not_found_text: default_not_found_text(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: None,
            timestamps: default_log_timestamps(),
        }
    }
}

impl Default for EscapeOptions {
    fn default() -> Self {
        Self {
            blur: true,
            clear: true,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    ///
    /// When `path` is `None` the default location is tried and a missing file
    /// yields the default configuration. An explicit path must exist.
    ///
    /// # Arguments
    /// * `path` - Optional path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::FileNotFound(path.display().to_string()).into());
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| TypeaheadError::Generic(format!("Failed to serialize config: {e}")))
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - `~/.typeahead/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".typeahead")
            .join("config.toml")
    }

    /// Validate the configuration
    ///
    /// The engine tolerates every value reported here by falling back to its
    /// defaults; validation exists so the CLI can warn about it up front.
    pub fn validate(&self) -> Result<()> {
        self.autocomplete.validate()?;

        if self.display.visible_rows == 0 {
            return Err(ConfigError::InvalidValue {
                field: "display.visible_rows".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl EngineConfig {
    /// Debounce interval as Duration
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Check option values without altering them
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        EscapeOptions::parse(&self.escape_options)?;

        if self.dropdown_items == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "autocomplete.dropdown_items".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(())
    }

    /// Escape behavior, falling back to `blur clear` on unknown input
    pub fn escape(&self) -> EscapeOptions {
        match EscapeOptions::parse(&self.escape_options) {
            Ok(options) => options,
            Err(e) => {
                warn!("{}; using default escape options", e);
                EscapeOptions::default()
            }
        }
    }

    /// Effective list limit; a zero limit is ignored
    pub fn item_limit(&self) -> Option<usize> {
        match self.dropdown_items {
            Some(0) => {
                warn!("dropdown_items = 0 ignored; showing all matches");
                None
            }
            other => other,
        }
    }
}

impl EscapeOptions {
    /// Escape key does nothing
    pub const NONE: EscapeOptions = EscapeOptions {
        blur: false,
        clear: false,
    };

    /// Parse a whitespace separated option list such as `"blur clear"`
    ///
    /// An empty list means the default. `none` wins over anything it is
    /// combined with.
    pub fn parse(value: &str) -> std::result::Result<Self, ConfigError> {
        let mut options = EscapeOptions::NONE;
        let mut saw_none = false;
        let mut saw_any = false;

        for token in value.split_whitespace() {
            saw_any = true;
            match token.to_ascii_lowercase().as_str() {
                "blur" => options.blur = true,
                "clear" => options.clear = true,
                "none" => saw_none = true,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "autocomplete.escape_options".to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }

        if !saw_any {
            return Ok(Self::default());
        }
        if saw_none {
            return Ok(Self::NONE);
        }
        Ok(options)
    }

    /// Whether the escape key is handled at all
    pub fn is_none(&self) -> bool {
        !self.blur && !self.clear
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.autocomplete.min_length, 1);
        assert_eq!(config.autocomplete.delay_ms, 0);
        assert_eq!(config.autocomplete.escape_options, "blur clear");
        assert!(config.autocomplete.trim);
        assert!(!config.autocomplete.no_cache);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            [autocomplete]
            delay_ms = 150
            select_on_match = true
            dropdown_items = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.autocomplete.delay(), Duration::from_millis(150));
        assert!(config.autocomplete.select_on_match);
        assert_eq!(config.autocomplete.item_limit(), Some(5));
        assert_eq!(config.autocomplete.min_length, 1);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let config = Config::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_escape_options_parse() {
        assert_eq!(
            EscapeOptions::parse("blur clear").unwrap(),
            EscapeOptions::default()
        );
        assert_eq!(
            EscapeOptions::parse("clear").unwrap(),
            EscapeOptions {
                blur: false,
                clear: true
            }
        );
        assert_eq!(
            EscapeOptions::parse("BLUR").unwrap(),
            EscapeOptions {
                blur: true,
                clear: false
            }
        );
        assert!(EscapeOptions::parse("none").unwrap().is_none());
        assert!(EscapeOptions::parse("none blur").unwrap().is_none());
        assert_eq!(EscapeOptions::parse("  ").unwrap(), EscapeOptions::default());
    }

    #[test]
    fn test_invalid_escape_options_fall_back() {
        let config = EngineConfig {
            escape_options: "blur explode".to_string(),
            ..EngineConfig::default()
        };

        assert!(config.validate().is_err());
        assert_eq!(config.escape(), EscapeOptions::default());
    }

    #[test]
    fn test_zero_dropdown_items_ignored() {
        let config = EngineConfig {
            dropdown_items: Some(0),
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.item_limit(), None);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = Config::load_from_file(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(
            result,
            Err(TypeaheadError::Config(ConfigError::FileNotFound(_)))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_rows() {
        let mut config = Config::default();
        config.display.visible_rows = 0;
        assert!(config.validate().is_err());
    }
}
