//! Controller configuration
//!
//! Everything has a default matching the stock hybrid shell, so an empty
//! file (or no file at all) is a valid configuration:
//!
//! ```toml
//! [chrome]
//! theme_color = 0xFF141414
//! layout_no_limits = true
//! manual_inset_min_sdk = 35
//! fallback_status_bar_dp = 24.0
//!
//! [bridge]
//! name = "AndroidFullscreen"
//!
//! [back]
//! app_global = "vueApp"
//! detail_flag = "showDetail"
//! player_field = "dp"
//! close_method = "closeDetail"
//! query_timeout_ms = 1500
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use veil_platform::Argb;

use crate::error::{Result, VeilError};

/// Status bar color restored on every exit from fullscreen
pub const DEFAULT_THEME_COLOR: Argb = 0xFF14_1414;

/// Name under which the command bridge is exposed to hosted content
pub const DEFAULT_BRIDGE_NAME: &str = "AndroidFullscreen";

/// Top-level controller configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct VeilConfig {
    #[serde(default)]
    pub chrome: ChromeConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub back: BackConfig,
}

/// Native chrome settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ChromeConfig {
    /// Status bar background color (ARGB)
    #[serde(default = "default_theme_color")]
    pub theme_color: Argb,
    /// Also set `LAYOUT_NO_LIMITS` on the window while fullscreen
    #[serde(default = "default_layout_no_limits")]
    pub layout_no_limits: bool,
    /// First API level where the content container must be padded by hand
    #[serde(default = "default_manual_inset_min_sdk")]
    pub manual_inset_min_sdk: i32,
    /// Status bar height in dp used when the platform reports none
    #[serde(default = "default_fallback_status_bar_dp")]
    pub fallback_status_bar_dp: f32,
}

fn default_theme_color() -> Argb {
    DEFAULT_THEME_COLOR
}

fn default_layout_no_limits() -> bool {
    true
}

fn default_manual_inset_min_sdk() -> i32 {
    35
}

fn default_fallback_status_bar_dp() -> f32 {
    crate::inset::DEFAULT_STATUS_BAR_DP
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            theme_color: default_theme_color(),
            layout_no_limits: default_layout_no_limits(),
            manual_inset_min_sdk: default_manual_inset_min_sdk(),
            fallback_status_bar_dp: default_fallback_status_bar_dp(),
        }
    }
}

/// Command bridge settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BridgeConfig {
    /// Global name of the bridge object in hosted content
    #[serde(default = "default_bridge_name")]
    pub name: String,
}

fn default_bridge_name() -> String {
    DEFAULT_BRIDGE_NAME.to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            name: default_bridge_name(),
        }
    }
}

/// Back-navigation delegate settings
///
/// Describes the in-page application contract: a global app object with a
/// flag telling whether the detail view is open, an optional player with a
/// `fullScreen.cancel('web')` method, and a method closing the detail view.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BackConfig {
    #[serde(default = "default_app_global")]
    pub app_global: String,
    #[serde(default = "default_detail_flag")]
    pub detail_flag: String,
    #[serde(default = "default_player_field")]
    pub player_field: String,
    #[serde(default = "default_close_method")]
    pub close_method: String,
    /// How long to wait for the in-page answer before falling back
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

fn default_app_global() -> String {
    "vueApp".to_string()
}

fn default_detail_flag() -> String {
    "showDetail".to_string()
}

fn default_player_field() -> String {
    "dp".to_string()
}

fn default_close_method() -> String {
    "closeDetail".to_string()
}

fn default_query_timeout_ms() -> u64 {
    1500
}

impl Default for BackConfig {
    fn default() -> Self {
        Self {
            app_global: default_app_global(),
            detail_flag: default_detail_flag(),
            player_field: default_player_field(),
            close_method: default_close_method(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

impl BackConfig {
    /// Query timeout as a duration
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl VeilConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| VeilError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration, falling back to defaults on malformed input
    pub fn from_toml_or_default(content: Option<&str>) -> Self {
        match content {
            Some(content) if !content.trim().is_empty() => {
                Self::from_toml_str(content).unwrap_or_else(|e| {
                    tracing::warn!("Ignoring malformed config, using defaults: {}", e);
                    Self::default()
                })
            }
            _ => Self::default(),
        }
    }
}
