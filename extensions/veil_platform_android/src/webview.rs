//! WebView content engine
//!
//! `WebView.evaluateJavascript` only accepts a Java `ValueCallback`, so script
//! evaluation round-trips through the Kotlin bridge:
//!
//! ```text
//! AndroidWebView::evaluate_script(script, callback)
//!              │  registers callback under request id N
//!              ▼ (JNI)
//! Kotlin: VeilBridge.evaluate(webView, script, handle, N)
//!              │  webView.evaluateJavascript(script) { result -> ... }
//!              ▼ (JNI)
//! VeilBridge.nativeOnScriptResult(handle, N, result)
//!              │
//!              ▼
//! ScriptRegistry::complete(N, result) ─▶ callback(result)
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use veil_platform::{ContentEngine, Result, ScriptCallback};

#[cfg(not(target_os = "android"))]
use veil_platform::PlatformError;

#[cfg(target_os = "android")]
use jni::{
    objects::{GlobalRef, JValue},
    JavaVM,
};
#[cfg(target_os = "android")]
use std::sync::Arc;

#[cfg(target_os = "android")]
use crate::jni_utils::with_env;

/// Script callbacks waiting for their result from the Java side
#[derive(Default)]
pub struct ScriptRegistry {
    next_id: AtomicI64,
    pending: Mutex<HashMap<i64, ScriptCallback>>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a callback and return its request id
    pub fn register(&self, callback: ScriptCallback) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.lock().insert(id, callback);
        id
    }

    /// Deliver a result to the callback registered under `id`
    ///
    /// Returns `false` for an unknown or already completed id. The callback
    /// runs outside the registry lock.
    pub fn complete(&self, id: i64, result: Option<String>) -> bool {
        let callback = self.lock().remove(&id);
        match callback {
            Some(callback) => {
                callback(result);
                true
            }
            None => {
                tracing::warn!("Script result for unknown request {}", id);
                false
            }
        }
    }

    /// Drop a callback without invoking it
    pub fn cancel(&self, id: i64) -> bool {
        self.lock().remove(&id).is_some()
    }

    /// Number of evaluations still waiting
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<i64, ScriptCallback>> {
        // A panicking callback never runs under the lock, so poisoning is benign
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Content engine backed by an `android.webkit.WebView`
#[cfg(target_os = "android")]
pub struct AndroidWebView {
    vm: Arc<JavaVM>,
    web_view: GlobalRef,
    bridge_class: GlobalRef,
    handle: Arc<AtomicI64>,
    scripts: Arc<ScriptRegistry>,
}

#[cfg(target_os = "android")]
impl AndroidWebView {
    /// Wrap a WebView
    ///
    /// `handle` is filled in once the native handle exists; it is passed back
    /// to `nativeOnScriptResult` by the Kotlin side.
    pub fn new(
        vm: Arc<JavaVM>,
        web_view: GlobalRef,
        bridge_class: GlobalRef,
        handle: Arc<AtomicI64>,
        scripts: Arc<ScriptRegistry>,
    ) -> Self {
        Self {
            vm,
            web_view,
            bridge_class,
            handle,
            scripts,
        }
    }
}

#[cfg(target_os = "android")]
impl ContentEngine for AndroidWebView {
    fn evaluate_script(&self, script: &str, callback: ScriptCallback) -> Result<()> {
        let request_id = self.scripts.register(callback);
        let handle = self.handle.load(Ordering::Acquire);
        let web_view = self.web_view.as_obj();
        let bridge_class = &self.bridge_class;

        let result = with_env(&self.vm, |env| {
            let script = env.new_string(script)?;
            // VeilBridge.evaluate(webView, script, handle, requestId)
            env.call_static_method(
                bridge_class,
                "evaluate",
                "(Landroid/webkit/WebView;Ljava/lang/String;JJ)V",
                &[
                    JValue::Object(web_view),
                    JValue::Object(&script),
                    JValue::Long(handle),
                    JValue::Long(request_id),
                ],
            )?;
            Ok(())
        });

        if result.is_err() {
            self.scripts.cancel(request_id);
        }
        result
    }

    fn can_go_back(&self) -> Result<bool> {
        let web_view = self.web_view.as_obj();
        with_env(&self.vm, |env| {
            env.call_method(web_view, "canGoBack", "()Z", &[])?.z()
        })
    }

    fn go_back(&self) -> Result<()> {
        let web_view = self.web_view.as_obj();
        with_env(&self.vm, |env| {
            env.call_method(web_view, "goBack", "()V", &[])?;
            Ok(())
        })
    }
}

/// Placeholder for non-Android builds
#[cfg(not(target_os = "android"))]
pub struct AndroidWebView {
    _private: (),
}

#[cfg(not(target_os = "android"))]
impl AndroidWebView {
    /// Create a placeholder WebView
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(not(target_os = "android"))]
impl Default for AndroidWebView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "android"))]
impl ContentEngine for AndroidWebView {
    fn evaluate_script(&self, _script: &str, _callback: ScriptCallback) -> Result<()> {
        Err(PlatformError::Unsupported(
            "WebView only available on Android".to_string(),
        ))
    }

    fn can_go_back(&self) -> Result<bool> {
        Ok(false)
    }

    fn go_back(&self) -> Result<()> {
        Err(PlatformError::Unsupported(
            "WebView only available on Android".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn capturing() -> (ScriptCallback, mpsc::Receiver<Option<String>>) {
        let (tx, rx) = mpsc::channel();
        let callback: ScriptCallback = Box::new(move |result| {
            let _ = tx.send(result);
        });
        (callback, rx)
    }

    #[test]
    fn test_complete_invokes_callback_once() {
        let scripts = ScriptRegistry::new();
        let (callback, rx) = capturing();
        let id = scripts.register(callback);
        assert_eq!(scripts.pending(), 1);

        assert!(scripts.complete(id, Some("\"closed\"".to_string())));
        assert_eq!(rx.try_recv().unwrap(), Some("\"closed\"".to_string()));

        // A duplicate delivery finds nothing
        assert!(!scripts.complete(id, None));
        assert_eq!(scripts.pending(), 0);
    }

    #[test]
    fn test_ids_are_distinct() {
        let scripts = ScriptRegistry::new();
        let (a, _rx_a) = capturing();
        let (b, rx_b) = capturing();
        let id_a = scripts.register(a);
        let id_b = scripts.register(b);
        assert_ne!(id_a, id_b);
        assert_ne!(id_a, 0);

        assert!(scripts.complete(id_b, None));
        assert_eq!(rx_b.try_recv().unwrap(), None);
        assert_eq!(scripts.pending(), 1);
    }

    #[test]
    fn test_cancel_drops_without_invoking() {
        let scripts = ScriptRegistry::new();
        let (callback, rx) = capturing();
        let id = scripts.register(callback);

        assert!(scripts.cancel(id));
        assert!(!scripts.cancel(id));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_unknown_id() {
        let scripts = ScriptRegistry::new();
        assert!(!scripts.complete(42, Some("\"none\"".to_string())));
    }
}
