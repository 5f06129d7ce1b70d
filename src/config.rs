use crate::errors::{DialogQueueError, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default delay between a close request and removal from the store
pub const DEFAULT_CLOSE_GRACE_MS: u64 = 1000;

/// Application configuration loaded from file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DialogQueueConfig {
    /// Dialog behaviour and layout
    #[serde(default)]
    pub dialogs: DialogConfig,
}

/// Dialog-specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogConfig {
    /// Milliseconds a closing dialog stays in the queue so its close
    /// animation can finish
    #[serde(default = "default_close_grace_ms")]
    pub close_grace_ms: u64,

    /// Dialog width as a percentage of the terminal
    #[serde(default = "default_width_percent")]
    pub width_percent: u16,

    /// Dialog height as a percentage of the terminal
    #[serde(default = "default_height_percent")]
    pub height_percent: u16,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            close_grace_ms: default_close_grace_ms(),
            width_percent: default_width_percent(),
            height_percent: default_height_percent(),
        }
    }
}

impl DialogConfig {
    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.close_grace_ms)
    }
}

fn default_close_grace_ms() -> u64 {
    DEFAULT_CLOSE_GRACE_MS
}

fn default_width_percent() -> u16 {
    50
}

fn default_height_percent() -> u16 {
    30
}

impl DialogQueueConfig {
    /// Load configuration from default path (~/.config/dialog-queue/config.toml)
    pub fn load() -> Self {
        Self::load_from_path(Self::default_path())
    }

    /// Get the default configuration path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new().map_or_else(
            || PathBuf::from("~/.config/dialog-queue/config.toml"),
            |dirs| dirs.config_dir().join("dialog-queue").join("config.toml"),
        )
    }

    /// Load configuration from a specific path, falling back to defaults
    pub fn load_from_path(path: PathBuf) -> Self {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::try_load_from_path(&path) {
            Ok(config) => {
                tracing::info!("Loaded configuration from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific path, surfacing read and parse errors
    pub fn try_load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self =
            toml::from_str(&content).map_err(|source| DialogQueueError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.dialogs.width_percent = config.dialogs.width_percent.clamp(10, 100);
        config.dialogs.height_percent = config.dialogs.height_percent.clamp(10, 100);
        Ok(config)
    }

    /// Save configuration to a specific path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Generate example configuration file content
    pub fn example() -> String {
        r#"# dialog-queue configuration
# Place this file at ~/.config/dialog-queue/config.toml

[dialogs]
# How long a closing dialog stays on screen (milliseconds) before it is
# removed from the queue
close_grace_ms = 1000

# Dialog size as a percentage of the terminal (10-100)
width_percent = 50
height_percent = 30
"#
        .to_string()
    }
}

/// Tokyo Night color palette
pub mod colors {
    use super::Color;

    pub const BG: Color = Color::Rgb(26, 27, 38); // #1a1b26
    pub const FG: Color = Color::Rgb(192, 202, 245); // #c0caf5
    pub const ACCEPT: Color = Color::Rgb(158, 206, 106); // #9ece6a green
    pub const DECLINE: Color = Color::Rgb(247, 118, 142); // #f7768e red
    pub const DIM: Color = Color::Rgb(86, 95, 137); // #565f89 gray
    pub const BORDER: Color = Color::Rgb(59, 66, 97); // #3b4261
    pub const HIGHLIGHT: Color = Color::Rgb(187, 154, 247); // #bb9af7 purple
    pub const INFO: Color = Color::Rgb(122, 162, 247); // #7aa2f7 blue
}
