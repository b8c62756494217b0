//! Configuration schema
//!
//! Defines the structure of the configuration file.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub window: WindowConfig,
}

/// General launcher settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// UI language
    #[serde(default = "default_language")]
    pub language: String,

    /// Check for updates on startup
    #[serde(default = "default_true")]
    pub check_updates: bool,

    /// Close launcher after game starts
    #[serde(default)]
    pub close_on_launch: bool,

    /// Show snapshot versions in the add-instance form
    #[serde(default)]
    pub show_snapshots: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            check_updates: true,
            close_on_launch: false,
            show_snapshots: false,
        }
    }
}

/// Launcher window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: f32,

    #[serde(default = "default_height")]
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

// Default value functions for serde
fn default_language() -> String {
    "en".to_string()
}
fn default_true() -> bool {
    true
}
fn default_width() -> f32 {
    1024.0
}
fn default_height() -> f32 {
    768.0
}
