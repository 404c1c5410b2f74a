//! Configuration management for Chatdeck
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    CONFIG_GENERATED, DEFAULT_COMMAND_PREFIX, DEFAULT_HEADER_AUTO_HIDE_PER_CHAR_MS, DEFAULT_MAX_MESSAGES,
    DEFAULT_MESSAGE_FORMAT, DEFAULT_THEME, DEFAULT_THEMES_DIR, DEFAULT_TICK_RATE_MS, DEFAULT_TITLE,
    MAX_HEADER_AUTO_HIDE_PER_CHAR_MS, MAX_MESSAGES_LIMIT, TICK_RATE_RANGE_MS,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub screen: ScreenConfig,
    pub theme: ThemeConfig,
    pub logging: LoggingConfig,
}

/// UI configuration, handed to the UI manager
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Base window title
    pub title: String,
    /// Prefix that marks composer input as a command
    pub command_prefix: String,
    /// Maximum number of lines kept in the message log
    pub max_messages: usize,
    /// Header auto-hide delay per displayed character, in milliseconds
    pub header_auto_hide_per_char_ms: u64,
    /// Message line format; `{sender}` and `{message}` are substituted
    pub message_format: String,
    /// Enable mouse support (hover colors, clicking channels)
    pub mouse_enabled: bool,
    /// Words highlighted wherever they appear in a user message
    pub word_pins: Vec<String>,
}

/// Render surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// How long the event loop waits for input before checking for redraws
    pub tick_rate_ms: u64,
}

/// Theme selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Theme to load on startup ("default" is built in)
    pub name: String,
    /// Directory holding `<name>.json` theme files
    pub directory: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// One of off, error, warn, info, debug, trace
    pub level: String,
    /// Log file; defaults to the data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
            max_messages: DEFAULT_MAX_MESSAGES,
            header_auto_hide_per_char_ms: DEFAULT_HEADER_AUTO_HIDE_PER_CHAR_MS,
            message_format: DEFAULT_MESSAGE_FORMAT.to_string(),
            mouse_enabled: true,
            word_pins: Vec::new(),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_THEME.to_string(),
            directory: PathBuf::from(DEFAULT_THEMES_DIR),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parse the configured level
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid log level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file();

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("chatdeck.toml");
        if current_dir_config.exists() {
            return Some(current_dir_config);
        }

        // 2. Check XDG config directory
        let xdg_config = Self::get_default_config_path().ok()?;
        xdg_config.exists().then_some(xdg_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let ui = &self.ui;

        if ui.title.trim().is_empty() {
            anyhow::bail!("title cannot be empty");
        }

        if ui.command_prefix.is_empty() {
            anyhow::bail!("command_prefix cannot be empty");
        }
        if ui.command_prefix.chars().any(char::is_whitespace) {
            anyhow::bail!("command_prefix cannot contain whitespace, got '{}'", ui.command_prefix);
        }

        if ui.max_messages == 0 || ui.max_messages > MAX_MESSAGES_LIMIT {
            anyhow::bail!(
                "max_messages must be between 1 and {}, got {}",
                MAX_MESSAGES_LIMIT,
                ui.max_messages
            );
        }

        if ui.header_auto_hide_per_char_ms > MAX_HEADER_AUTO_HIDE_PER_CHAR_MS {
            anyhow::bail!(
                "header_auto_hide_per_char_ms cannot exceed {}",
                MAX_HEADER_AUTO_HIDE_PER_CHAR_MS
            );
        }

        if !ui.message_format.contains("{message}") {
            anyhow::bail!("message_format must contain '{{message}}'");
        }

        if let Some(pin) = ui.word_pins.iter().find(|pin| pin.is_empty() || pin.contains(char::is_whitespace)) {
            anyhow::bail!("word_pins entries must be single words, got '{}'", pin);
        }

        if !TICK_RATE_RANGE_MS.contains(&self.screen.tick_rate_ms) {
            anyhow::bail!(
                "tick_rate_ms must be between {} and {}, got {}",
                TICK_RATE_RANGE_MS.start(),
                TICK_RATE_RANGE_MS.end(),
                self.screen.tick_rate_ms
            );
        }

        if self.theme.name.trim().is_empty() {
            anyhow::bail!("theme name cannot be empty");
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# Chatdeck Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("chatdeck"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
