//! Configuration management for chostty
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/chostty/config.toml

use crate::session::{FONT_SCALE_DEFAULT, FONT_SCALE_MAX, FONT_SCALE_MIN};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Main configuration structure
///
/// The front end itself is fixed when the binary is built; only its
/// options live here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeName,
    pub terminal: TerminalOptions,
    pub graphics: GraphicsOptions,
    pub logging: LoggingOptions,
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("chostty");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, or defaults if there is none
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load config from `path`, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Parse and normalise a TOML document
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.graphics.normalize();
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }
}

/// Available terminal theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Gruvbox,
    Nord,
    Transparent,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Gruvbox => "Gruvbox",
            ThemeName::Nord => "Nord",
            ThemeName::Transparent => "Transparent",
        }
    }
}

/// Terminal front end options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalOptions {
    /// How long one event poll may block
    pub poll_interval_ms: u64,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
        }
    }
}

/// Graphics front end options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsOptions {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub vsync: bool,
    pub font_scale: f32,
    pub clear_color: [f32; 4],
}

impl Default for GraphicsOptions {
    fn default() -> Self {
        Self {
            title: "chostty".into(),
            width: 1280.0,
            height: 720.0,
            vsync: true,
            font_scale: FONT_SCALE_DEFAULT,
            clear_color: [0.1, 0.1, 0.1, 1.0],
        }
    }
}

impl GraphicsOptions {
    /// Clamp values a hand-edited file may have pushed out of range
    fn normalize(&mut self) {
        let font_scale = if self.font_scale.is_finite() {
            self.font_scale.clamp(FONT_SCALE_MIN, FONT_SCALE_MAX)
        } else {
            FONT_SCALE_DEFAULT
        };
        if font_scale != self.font_scale {
            warn!(configured = self.font_scale, used = font_scale, "font_scale out of range");
            self.font_scale = font_scale;
        }

        let defaults = GraphicsOptions::default();
        if !(self.width.is_finite() && self.width > 0.0) {
            warn!(configured = self.width, "invalid window width, using default");
            self.width = defaults.width;
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            warn!(configured = self.height, "invalid window height, using default");
            self.height = defaults.height;
        }
        for channel in &mut self.clear_color {
            *channel = if channel.is_finite() { channel.clamp(0.0, 1.0) } else { 0.0 };
        }
    }
}

/// Logging options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Level filter, e.g. "info" or "chostty=debug"
    pub level: String,
    /// Log file; when unset the terminal front end discards logs
    pub file: Option<PathBuf>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".into(),
            file: None,
        }
    }
}
