//! Logging setup
//!
//! On device, `tracing` events are forwarded through `log` to logcat under
//! the `Veil` tag. Host builds install a `tracing-subscriber` formatter
//! filtered by `RUST_LOG`.

/// Logcat tag
pub const LOG_TAG: &str = "Veil";

/// Default filter when `RUST_LOG` is unset on host builds
pub const DEFAULT_FILTER: &str = "veil_core=debug,veil_platform_android=debug";

/// Initialize logging once; later calls are no-ops
#[cfg(target_os = "android")]
pub fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag(LOG_TAG),
    );
}

/// Initialize logging once; later calls are no-ops
#[cfg(not(target_os = "android"))]
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Fails if a global subscriber is already set
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_logging();
        init_logging();
        tracing::debug!("logging initialized twice");
    }
}
