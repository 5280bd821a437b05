//! Status bar inset calculation

use veil_platform::DisplayMetrics;

/// Logical status bar height used when the platform reports none
pub const DEFAULT_STATUS_BAR_DP: f32 = 24.0;

/// Compute the status bar height in pixels
///
/// Uses the platform-reported dimension when it is positive, otherwise
/// `round(fallback_dp * density)`. Never fails.
pub fn compute_status_bar_height<M>(metrics: &M, fallback_dp: f32) -> i32
where
    M: DisplayMetrics + ?Sized,
{
    match metrics.status_bar_dimension() {
        Some(px) if px > 0 => px,
        _ => {
            let density = metrics.density();
            let density = if density.is_finite() && density > 0.0 {
                density
            } else {
                1.0
            };
            (fallback_dp * density).round().max(0.0) as i32
        }
    }
}

/// Whether the host must pad the content container below the status bar itself
///
/// Newer platform releases draw apps edge-to-edge by default, so the web
/// content would otherwise sit under the status bar.
pub fn needs_manual_inset(sdk_int: i32, min_sdk: i32) -> bool {
    sdk_int >= min_sdk
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_platform::StaticMetrics;

    #[test]
    fn test_reported_height_wins() {
        let metrics = StaticMetrics {
            status_bar_px: Some(48),
            density: 3.0,
            sdk_int: 35,
        };
        assert_eq!(compute_status_bar_height(&metrics, DEFAULT_STATUS_BAR_DP), 48);
    }

    #[test]
    fn test_zero_height_falls_back_to_density() {
        let metrics = StaticMetrics {
            status_bar_px: Some(0),
            density: 2.75,
            sdk_int: 35,
        };
        // round(24 * 2.75) = 66
        assert_eq!(compute_status_bar_height(&metrics, DEFAULT_STATUS_BAR_DP), 66);
    }

    #[test]
    fn test_missing_height_falls_back() {
        let metrics = StaticMetrics {
            status_bar_px: None,
            density: 1.5,
            sdk_int: 35,
        };
        assert_eq!(compute_status_bar_height(&metrics, DEFAULT_STATUS_BAR_DP), 36);

        let negative = StaticMetrics {
            status_bar_px: Some(-4),
            ..metrics
        };
        assert_eq!(compute_status_bar_height(&negative, DEFAULT_STATUS_BAR_DP), 36);
    }

    #[test]
    fn test_bad_density() {
        let metrics = StaticMetrics {
            status_bar_px: None,
            density: 0.0,
            sdk_int: 35,
        };
        assert_eq!(compute_status_bar_height(&metrics, DEFAULT_STATUS_BAR_DP), 24);
    }

    #[test]
    fn test_needs_manual_inset() {
        assert!(needs_manual_inset(35, 35));
        assert!(needs_manual_inset(36, 35));
        assert!(!needs_manual_inset(34, 35));
    }
}
