//! Display metrics queried once at startup

/// Display metrics capability
///
/// Implementations return safe defaults when the platform cannot answer.
pub trait DisplayMetrics {
    /// Status bar height in pixels as reported by the platform, if available
    fn status_bar_dimension(&self) -> Option<i32>;

    /// Display density (pixels per density-independent unit)
    fn density(&self) -> f32;

    /// Platform API level
    fn sdk_int(&self) -> i32;
}

/// Fixed metrics, for hosts that resolve their values up front
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticMetrics {
    /// Reported status bar height, `None` when the platform has no value
    pub status_bar_px: Option<i32>,
    /// Display density
    pub density: f32,
    /// Platform API level
    pub sdk_int: i32,
}

impl Default for StaticMetrics {
    fn default() -> Self {
        Self {
            status_bar_px: None,
            density: 1.0,
            sdk_int: 0,
        }
    }
}

impl DisplayMetrics for StaticMetrics {
    fn status_bar_dimension(&self) -> Option<i32> {
        self.status_bar_px
    }

    fn density(&self) -> f32 {
        self.density
    }

    fn sdk_int(&self) -> i32 {
        self.sdk_int
    }
}
