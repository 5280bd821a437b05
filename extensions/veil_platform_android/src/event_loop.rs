//! UI thread wake-up
//!
//! Events posted to the controller from WebView or JavaScript threads are
//! queued in Rust; the wake proxy asks the Kotlin side to schedule
//! `nativeDrain` on the main looper.
//!
//! ```kotlin
//! @JvmStatic
//! fun scheduleDrain(h: Long) {
//!     mainHandler.post { if (h == handle) nativeDrain(h) }
//! }
//! ```
//!
//! `scheduleDrain` must always post, even when called on the main thread, so
//! a drain never runs inside another native call.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use veil_platform::UiWaker;

#[cfg(target_os = "android")]
use jni::{
    objects::{GlobalRef, JValue},
    JavaVM,
};

#[cfg(target_os = "android")]
use crate::jni_utils::with_env;

/// Wakes the Android main looper to drain the controller queue
#[cfg(target_os = "android")]
pub struct AndroidWakeProxy {
    vm: Arc<JavaVM>,
    bridge_class: GlobalRef,
    /// Native handle, 0 until initialized and after destroy
    handle: Arc<AtomicI64>,
}

#[cfg(target_os = "android")]
impl AndroidWakeProxy {
    /// Create a wake proxy calling `scheduleDrain` on the bridge class
    pub fn new(vm: Arc<JavaVM>, bridge_class: GlobalRef, handle: Arc<AtomicI64>) -> Self {
        Self {
            vm,
            bridge_class,
            handle,
        }
    }
}

#[cfg(target_os = "android")]
impl UiWaker for AndroidWakeProxy {
    fn wake(&self) {
        let handle = self.handle.load(Ordering::Acquire);
        if handle == 0 {
            // Not initialized yet or already destroyed; nothing to drain into
            return;
        }

        let bridge_class = &self.bridge_class;
        let result = with_env(&self.vm, |env| {
            env.call_static_method(
                bridge_class,
                "scheduleDrain",
                "(J)V",
                &[JValue::Long(handle)],
            )?;
            Ok(())
        });

        if let Err(e) = result {
            tracing::warn!("Failed to schedule drain on the UI thread: {}", e);
        }
    }
}

/// Placeholder for non-Android builds
///
/// Counts wake requests so host code can poll for them.
#[cfg(not(target_os = "android"))]
#[derive(Default)]
pub struct AndroidWakeProxy {
    handle: Arc<AtomicI64>,
    requests: AtomicI64,
}

#[cfg(not(target_os = "android"))]
impl AndroidWakeProxy {
    /// Create a placeholder wake proxy
    pub fn new(handle: Arc<AtomicI64>) -> Self {
        Self {
            handle,
            requests: AtomicI64::new(0),
        }
    }

    /// Check if a wake was requested and clear the count
    pub fn take_wake_request(&self) -> bool {
        self.requests.swap(0, Ordering::SeqCst) > 0
    }
}

#[cfg(not(target_os = "android"))]
impl UiWaker for AndroidWakeProxy {
    fn wake(&self) {
        if self.handle.load(Ordering::Acquire) != 0 {
            self.requests.fetch_add(1, Ordering::SeqCst);
        }
    }
}
