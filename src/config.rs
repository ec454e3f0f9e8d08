use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ViewError};
use crate::tui::ViewMode;

/// RGB color values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Theme color palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Secondary text, borders of unfocused panels, help descriptions
    pub muted: Rgb,
    /// Done tasks, progress counts
    pub success: Rgb,
    /// In-progress tasks, medium priority
    pub warning: Rgb,
    /// Overdue dates, high priority, validation errors
    pub error: Rgb,
    /// Headers and focused borders
    pub info: Rgb,
    /// Todo tasks
    pub pending: Rgb,
    /// Selection highlight background
    pub highlight: Rgb,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            muted: Rgb::new(140, 140, 140),
            success: Rgb::new(134, 239, 172),
            warning: Rgb::new(253, 224, 71),
            error: Rgb::new(252, 129, 129),
            info: Rgb::new(147, 197, 253),
            pending: Rgb::new(216, 180, 254),
            highlight: Rgb::new(50, 50, 70),
        }
    }
}

impl ThemeColors {
    /// Catppuccin Mocha palette
    pub fn catppuccin_mocha() -> Self {
        Self {
            muted: Rgb::new(166, 173, 200),
            success: Rgb::new(166, 227, 161),
            warning: Rgb::new(249, 226, 175),
            error: Rgb::new(243, 139, 168),
            info: Rgb::new(137, 180, 250),
            pending: Rgb::new(203, 166, 247),
            highlight: Rgb::new(69, 71, 90),
        }
    }

    /// High contrast palette for accessibility
    pub fn high_contrast() -> Self {
        Self {
            muted: Rgb::new(200, 200, 200),
            success: Rgb::new(0, 255, 0),
            warning: Rgb::new(255, 255, 0),
            error: Rgb::new(255, 0, 0),
            info: Rgb::new(0, 255, 255),
            pending: Rgb::new(255, 0, 255),
            highlight: Rgb::new(0, 0, 160),
        }
    }

    /// Look up a preset; separators and case are ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "default" => Some(Self::default()),
            "catppuccinmocha" => Some(Self::catppuccin_mocha()),
            "highcontrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }
}

/// Theme configuration - either a preset name or custom colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeConfig {
    Preset(String),
    Custom(ThemeColors),
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig::Preset("default".to_string())
    }
}

impl ThemeConfig {
    pub fn resolve(&self) -> ThemeColors {
        match self {
            ThemeConfig::Preset(name) => ThemeColors::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme = %name, "unknown theme preset, using default");
                ThemeColors::default()
            }),
            ThemeConfig::Custom(colors) => colors.clone(),
        }
    }
}

/// Display settings for the view layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default = "default_true")]
    pub display_complete_tasks: bool,

    #[serde(default = "default_true")]
    pub display_progress_overview: bool,

    #[serde(default = "default_true")]
    pub show_subtasks: bool,

    #[serde(default)]
    pub default_view: ViewMode,

    #[serde(default = "default_min_width")]
    pub min_width: u16,

    #[serde(default = "default_min_height")]
    pub min_height: u16,
}

fn default_true() -> bool {
    true
}

fn default_min_width() -> u16 {
    60
}

fn default_min_height() -> u16 {
    12
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeConfig::default(),
            display_complete_tasks: true,
            display_progress_overview: true,
            show_subtasks: true,
            default_view: ViewMode::default(),
            min_width: default_min_width(),
            min_height: default_min_height(),
        }
    }
}

impl Config {
    /// Get the config file path (~/.taskview.json)
    pub fn config_file_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".taskview.json"))
            .ok_or(ViewError::NoHomeDirectory)
    }

    /// Load configuration from a file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration, falling back to defaults with a warning on failure.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let loaded = match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        };
        match loaded {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load config, using defaults");
                Self::default()
            }
        }
    }
}
