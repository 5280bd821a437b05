//! Chrome state store

use veil_platform::DisplayMetrics;

use crate::config::ChromeConfig;
use crate::inset::{compute_status_bar_height, needs_manual_inset};

/// Fullscreen mode of the native chrome
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FullscreenMode {
    /// System bars visible, orientation unlocked
    #[default]
    Windowed,
    /// Immersive chrome, landscape lock
    Fullscreen,
}

/// Current chrome state, owned by the controller
///
/// `needs_manual_inset` and `status_bar_height_px` are fixed at construction;
/// only the mode changes afterwards, and only through the transition engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChromeState {
    mode: FullscreenMode,
    status_bar_height_px: i32,
    needs_manual_inset: bool,
}

impl ChromeState {
    /// Create a windowed state
    ///
    /// Negative heights are clamped to zero.
    pub fn new(needs_manual_inset: bool, status_bar_height_px: i32) -> Self {
        Self {
            mode: FullscreenMode::Windowed,
            status_bar_height_px: status_bar_height_px.max(0),
            needs_manual_inset,
        }
    }

    /// Derive the initial state from platform metrics
    ///
    /// The status bar height is only measured when manual inset is needed;
    /// otherwise the platform handles the inset and the cached height is 0.
    pub fn from_metrics<M>(metrics: &M, config: &ChromeConfig) -> Self
    where
        M: DisplayMetrics + ?Sized,
    {
        let manual = needs_manual_inset(metrics.sdk_int(), config.manual_inset_min_sdk);
        let height = if manual {
            let height = compute_status_bar_height(metrics, config.fallback_status_bar_dp);
            tracing::debug!(
                "API {} needs manual inset, status bar height: {}",
                metrics.sdk_int(),
                height
            );
            height
        } else {
            0
        };
        Self::new(manual, height)
    }

    /// Current mode
    pub fn mode(&self) -> FullscreenMode {
        self.mode
    }

    /// Whether the chrome is in fullscreen mode
    pub fn is_fullscreen(&self) -> bool {
        self.mode == FullscreenMode::Fullscreen
    }

    /// Cached status bar height in pixels
    pub fn status_bar_height_px(&self) -> i32 {
        self.status_bar_height_px
    }

    /// Whether the content container is padded by hand
    pub fn needs_manual_inset(&self) -> bool {
        self.needs_manual_inset
    }

    pub(crate) fn set_mode(&mut self, mode: FullscreenMode) {
        self.mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_platform::StaticMetrics;

    #[test]
    fn test_new_state_is_windowed() {
        let state = ChromeState::new(true, 63);
        assert_eq!(state.mode(), FullscreenMode::Windowed);
        assert!(!state.is_fullscreen());
        assert_eq!(state.status_bar_height_px(), 63);
        assert!(state.needs_manual_inset());
    }

    #[test]
    fn test_negative_height_clamped() {
        assert_eq!(ChromeState::new(true, -10).status_bar_height_px(), 0);
    }

    #[test]
    fn test_from_metrics() {
        let config = ChromeConfig::default();

        let modern = StaticMetrics {
            status_bar_px: Some(0),
            density: 2.0,
            sdk_int: 35,
        };
        let state = ChromeState::from_metrics(&modern, &config);
        assert!(state.needs_manual_inset());
        assert_eq!(state.status_bar_height_px(), 48);

        let legacy = StaticMetrics {
            status_bar_px: Some(72),
            density: 3.0,
            sdk_int: 34,
        };
        let state = ChromeState::from_metrics(&legacy, &config);
        assert!(!state.needs_manual_inset());
        assert_eq!(state.status_bar_height_px(), 0);
    }
}
