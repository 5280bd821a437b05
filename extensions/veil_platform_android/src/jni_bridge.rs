//! Kotlin JNI Bridge for Veil
//!
//! JNI entry points the host activity calls to hand its WebView, WebView
//! callbacks, and lifecycle events to a [`FullscreenController`].
//!
//! # Usage from Kotlin
//!
//! ```kotlin
//! package com.veil
//!
//! object VeilBridge {
//!     init {
//!         System.loadLibrary("veil_platform_android")
//!     }
//!
//!     private val mainHandler = Handler(Looper.getMainLooper())
//!
//!     /// Live native handle, 0 when none; posted work checks it before calling in
//!     @Volatile var handle: Long = 0
//!         private set
//!
//!     fun init(activity: Activity, webView: WebView?, configToml: String?): Long {
//!         handle = nativeInit(activity, webView, configToml)
//!         return handle
//!     }
//!
//!     fun destroy() {
//!         val h = handle
//!         handle = 0
//!         if (h != 0L) nativeDestroy(h)
//!     }
//!
//!     external fun nativeInit(activity: Activity, webView: WebView?, configToml: String?): Long
//!     external fun nativeBridgeName(handle: Long): String
//!     external fun nativeOnShowCustomView(handle: Long, view: View, callback: WebChromeClient.CustomViewCallback)
//!     external fun nativeOnHideCustomView(handle: Long)
//!     external fun nativeRequestEnter(handle: Long)
//!     external fun nativeRequestExit(handle: Long)
//!     external fun nativeBridgeCall(handle: Long, method: String): Boolean
//!     external fun nativeOnResume(handle: Long)
//!     external fun nativeOnWindowFocusChanged(handle: Long, hasFocus: Boolean)
//!     external fun nativeOnBackPressed(handle: Long): Long
//!     external fun nativeOnScriptResult(handle: Long, requestId: Long, result: String?)
//!     external fun nativeDrain(handle: Long): Long
//!     external fun nativeDestroy(handle: Long)
//!
//!     @JvmStatic
//!     fun scheduleDrain(h: Long) {
//!         mainHandler.post { if (h == handle) schedule(h, nativeDrain(h)) }
//!     }
//!
//!     @JvmStatic
//!     fun evaluate(webView: WebView, script: String, h: Long, requestId: Long) {
//!         mainHandler.post {
//!             webView.evaluateJavascript(script) { result ->
//!                 if (h == handle) nativeOnScriptResult(h, requestId, result)
//!             }
//!         }
//!     }
//!
//!     /// Drain again after `delayMs` when a back query may time out
//!     fun schedule(h: Long, delayMs: Long) {
//!         if (delayMs >= 0) {
//!             mainHandler.postDelayed({ if (h == handle) schedule(h, nativeDrain(h)) }, delayMs)
//!         }
//!     }
//! }
//! ```
//!
//! # Example Usage
//!
//! ```kotlin
//! class MainActivity : AppCompatActivity() {
//!     private var veil: Long = 0
//!
//!     override fun onStart() {
//!         super.onStart()
//!         if (veil != 0L) return
//!         veil = VeilBridge.init(this, webView, assets.open("veil.toml").bufferedReader().readText())
//!
//!         webView.webChromeClient = object : WebChromeClient() {
//!             override fun onShowCustomView(view: View, callback: CustomViewCallback) =
//!                 VeilBridge.nativeOnShowCustomView(veil, view, callback)
//!             override fun onHideCustomView() = VeilBridge.nativeOnHideCustomView(veil)
//!         }
//!         // Runs on the JavaScript thread: read the volatile handle, never `veil`
//!         webView.addJavascriptInterface(object {
//!             @JavascriptInterface fun enter() = VeilBridge.nativeRequestEnter(VeilBridge.handle)
//!             @JavascriptInterface fun exit() = VeilBridge.nativeRequestExit(VeilBridge.handle)
//!         }, VeilBridge.nativeBridgeName(veil))
//!     }
//!
//!     override fun onResume() {
//!         super.onResume()
//!         VeilBridge.nativeOnResume(veil)
//!     }
//!
//!     override fun onWindowFocusChanged(hasFocus: Boolean) {
//!         super.onWindowFocusChanged(hasFocus)
//!         VeilBridge.nativeOnWindowFocusChanged(veil, hasFocus)
//!     }
//!
//!     override fun onBackPressed() {
//!         if (veil == 0L) {
//!             super.onBackPressed()
//!             return
//!         }
//!         VeilBridge.schedule(veil, VeilBridge.nativeOnBackPressed(veil))
//!     }
//!
//!     fun veilDefaultBack() = super.onBackPressed()
//!
//!     override fun onDestroy() {
//!         VeilBridge.destroy()
//!         veil = 0
//!         super.onDestroy()
//!     }
//! }
//! ```
//!
//! All entry points except the bridge commands (`nativeRequestEnter`,
//! `nativeRequestExit`, `nativeBridgeCall`) must be called on the UI thread.
//! Bridge commands arrive on the WebView's JavaScript thread and are queued.
//!
//! Handles are ids into a [`HandleRegistry`], not pointers. A bridge command
//! racing `nativeDestroy` either completes against a live controller or
//! finds no handle and is dropped.

#[cfg(target_os = "android")]
use jni::objects::{GlobalRef, JClass, JObject, JString};
#[cfg(target_os = "android")]
use jni::sys::{jboolean, jlong, jstring, JNI_FALSE, JNI_TRUE};
#[cfg(target_os = "android")]
use jni::{JNIEnv, JavaVM};

#[cfg(target_os = "android")]
use std::panic::{self, AssertUnwindSafe};
#[cfg(target_os = "android")]
use std::sync::atomic::{AtomicI64, Ordering};
#[cfg(target_os = "android")]
use std::sync::{Arc, Mutex, OnceLock, PoisonError, TryLockError};
#[cfg(target_os = "android")]
use std::time::Instant;

#[cfg(target_os = "android")]
use tracing::{debug, error, info, warn};

#[cfg(target_os = "android")]
use veil_core::{
    CompletionToken, ControllerEvent, FullscreenBridge, FullscreenController, UiSender,
    VeilConfig,
};
#[cfg(target_os = "android")]
use veil_platform::{Event, LifecycleEvent, WindowEvent};

#[cfg(target_os = "android")]
use crate::{
    handles::HandleRegistry,
    init_logging,
    jni_utils::{clear_exception, query_display_metrics, with_env},
    AndroidContainer, AndroidPlatform, AndroidSurface, AndroidWakeProxy, AndroidWebView,
    AndroidWindow, ScriptRegistry,
};

/// Value returned to Kotlin when no follow-up drain is needed
pub const NO_FOLLOW_UP: i64 = -1;

/// Milliseconds until a follow-up drain is due, or [`NO_FOLLOW_UP`]
pub fn follow_up_delay_ms(deadline: Option<std::time::Instant>, now: std::time::Instant) -> i64 {
    match deadline {
        Some(deadline) => {
            // Round up so the drain never lands just before the deadline
            let remaining = deadline.saturating_duration_since(now);
            let ms = remaining.as_millis() + u128::from(remaining.subsec_nanos() % 1_000_000 != 0);
            i64::try_from(ms).unwrap_or(i64::MAX)
        }
        None => NO_FOLLOW_UP,
    }
}

/// A controller and its channels, registered under the handle Kotlin holds
#[cfg(target_os = "android")]
struct VeilHandle {
    controller: Mutex<FullscreenController<AndroidPlatform>>,
    sender: UiSender<AndroidSurface>,
    bridge: FullscreenBridge<AndroidSurface>,
    scripts: Arc<ScriptRegistry>,
    /// Shared with the wake proxy and WebView; cleared on destroy
    handle_cell: Arc<AtomicI64>,
    vm: Arc<JavaVM>,
}

#[cfg(target_os = "android")]
impl VeilHandle {
    /// Queue an event and apply it right away if the controller is free
    fn dispatch(&self, event: ControllerEvent<AndroidSurface>) -> jlong {
        if !self.sender.send(event) {
            warn!("Controller queue closed, event dropped");
            return NO_FOLLOW_UP;
        }
        self.drain()
    }

    /// Apply queued events; returns the follow-up delay for Kotlin
    ///
    /// A drain requested while the controller is busy further up the UI
    /// thread's stack is skipped; the wake proxy has already posted another.
    fn drain(&self) -> jlong {
        let mut controller = match self.controller.try_lock() {
            Ok(controller) => controller,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                debug!("Controller busy, drain deferred");
                return NO_FOLLOW_UP;
            }
        };

        let now = Instant::now();
        let handled = controller.process_pending(now);
        if handled > 0 {
            debug!("Drained {} controller events", handled);
        }
        follow_up_delay_ms(controller.next_deadline(), now)
    }
}

/// Live controllers, keyed by the handle passed to Kotlin
#[cfg(target_os = "android")]
static HANDLES: OnceLock<HandleRegistry<VeilHandle>> = OnceLock::new();

#[cfg(target_os = "android")]
fn handles() -> &'static HandleRegistry<VeilHandle> {
    HANDLES.get_or_init(HandleRegistry::new)
}

/// Look up a handle passed from Kotlin
#[cfg(target_os = "android")]
fn handle_ref(handle: jlong, caller: &str) -> Option<Arc<VeilHandle>> {
    if handle == 0 {
        warn!("{} called with null handle", caller);
        return None;
    }
    let veil = handles().get(handle);
    if veil.is_none() {
        warn!("{} called with stale handle {}", caller, handle);
    }
    veil
}

/// Run `f`, logging instead of unwinding into the JVM
#[cfg(target_os = "android")]
fn guarded<R>(caller: &str, fallback: R, f: impl FnOnce() -> R) -> R {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(_) => {
            error!("Panic in {}", caller);
            fallback
        }
    }
}

/// Initialize Veil for an activity and its WebView
///
/// # Arguments
/// * `activity` - Host activity; must implement `veilDefaultBack()`
/// * `web_view` - The app's WebView, may be null
/// * `config` - TOML configuration, may be null for defaults
///
/// # Returns
/// * Opaque handle (Long), or 0 on failure
///
/// # JNI Signature
/// `(Landroid/app/Activity;Landroid/webkit/WebView;Ljava/lang/String;)J`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_veil_VeilBridge_nativeInit(
    mut env: JNIEnv,
    class: JClass,
    activity: JObject,
    web_view: JObject,
    config: JString,
) -> jlong {
    init_logging();
    info!("VeilBridge.nativeInit called");

    guarded("nativeInit", 0, || {
        match init(&mut env, &class, &activity, &web_view, &config) {
            Ok(handle) => handle,
            Err(e) => {
                // Kotlin must see 0, not a rethrown exception
                clear_exception(&mut env);
                error!("Failed to initialize Veil: {}", e);
                0
            }
        }
    })
}

#[cfg(target_os = "android")]
fn init(
    env: &mut JNIEnv,
    class: &JClass,
    activity: &JObject,
    web_view: &JObject,
    config: &JString,
) -> Result<jlong, jni::errors::Error> {
    if activity.is_null() {
        return Err(jni::errors::Error::NullPtr("activity"));
    }

    let vm = Arc::new(env.get_java_vm()?);
    let bridge_class = env.new_global_ref(class)?;
    let activity_ref = env.new_global_ref(activity)?;

    let config = read_config(env, config);
    let metrics = query_display_metrics(env, activity);

    let handle_cell = Arc::new(AtomicI64::new(0));
    let scripts = Arc::new(ScriptRegistry::new());
    let waker = Arc::new(AndroidWakeProxy::new(
        vm.clone(),
        bridge_class.clone(),
        handle_cell.clone(),
    ));

    let mut controller = FullscreenController::<AndroidPlatform>::new(
        config,
        AndroidWindow::new(vm.clone(), activity_ref),
        &metrics,
        waker,
    );

    if web_view.is_null() {
        error!("WebView is null, fullscreen video and back interception disabled");
    } else {
        let web_view_ref = env.new_global_ref(web_view)?;
        let engine = AndroidWebView::new(
            vm.clone(),
            web_view_ref.clone(),
            bridge_class,
            handle_cell.clone(),
            scripts.clone(),
        );

        match resolve_parent(env, web_view) {
            Ok(Some(parent)) => controller.resolve_content(
                AndroidContainer::new(vm.clone(), parent, web_view_ref),
                Some(engine),
            ),
            Ok(None) => {
                warn!("WebView parent is not a ViewGroup, video surfaces cannot be attached");
                controller.set_content(Some(engine));
            }
            Err(e) => {
                clear_exception(env);
                warn!("Failed to resolve WebView parent: {}, video surfaces cannot be attached", e);
                controller.set_content(Some(engine));
            }
        }
    }

    let sender = controller.sender();
    let bridge = controller.bridge();
    let handle = handles().insert(VeilHandle {
        controller: Mutex::new(controller),
        sender,
        bridge,
        scripts,
        handle_cell: handle_cell.clone(),
        vm,
    });

    handle_cell.store(handle, Ordering::Release);
    info!("Created VeilHandle {}", handle);

    Ok(handle)
}

#[cfg(target_os = "android")]
fn read_config(env: &mut JNIEnv, config: &JString) -> VeilConfig {
    if config.is_null() {
        return VeilConfig::default();
    }

    match env.get_string(config) {
        Ok(content) => {
            let content: String = content.into();
            VeilConfig::from_toml_or_default(Some(&content))
        }
        Err(e) => {
            clear_exception(env);
            warn!("Failed to read config string: {}, using defaults", e);
            VeilConfig::default()
        }
    }
}

/// webView.getParent(), if it is a ViewGroup
#[cfg(target_os = "android")]
fn resolve_parent(
    env: &mut JNIEnv,
    web_view: &JObject,
) -> Result<Option<GlobalRef>, jni::errors::Error> {
    let parent = env
        .call_method(web_view, "getParent", "()Landroid/view/ViewParent;", &[])?
        .l()?;

    if parent.is_null() || !env.is_instance_of(&parent, "android/view/ViewGroup")? {
        return Ok(None);
    }
    Ok(Some(env.new_global_ref(&parent)?))
}

/// Token invoking `CustomViewCallback.onCustomViewHidden()` on release
#[cfg(target_os = "android")]
fn completion_token(env: &mut JNIEnv, vm: &Arc<JavaVM>, callback: &JObject) -> CompletionToken {
    if callback.is_null() {
        return CompletionToken::noop();
    }

    let callback = match env.new_global_ref(callback) {
        Ok(callback) => callback,
        Err(e) => {
            clear_exception(env);
            warn!("Failed to pin custom view callback: {}", e);
            return CompletionToken::noop();
        }
    };

    let vm = vm.clone();
    CompletionToken::new(move || {
        let result = with_env(&vm, |env| {
            env.call_method(&callback, "onCustomViewHidden", "()V", &[])?;
            Ok(())
        });
        if let Err(e) = result {
            warn!("Failed to release custom view callback: {}", e);
        }
    })
}

/// Name under which the command bridge is registered with the WebView
///
/// # JNI Signature
/// `(J)Ljava/lang/String;`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_veil_VeilBridge_nativeBridgeName(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
) -> jstring {
    let name = match handle_ref(handle, "nativeBridgeName") {
        Some(veil) => veil.bridge.name().to_string(),
        None => veil_core::config::DEFAULT_BRIDGE_NAME.to_string(),
    };

    match env.new_string(name) {
        Ok(name) => name.into_raw(),
        Err(e) => {
            clear_exception(&mut env);
            error!("Failed to create bridge name string: {}", e);
            std::ptr::null_mut()
        }
    }
}

/// `WebChromeClient.onShowCustomView`
///
/// # JNI Signature
/// `(JLandroid/view/View;Landroid/webkit/WebChromeClient$CustomViewCallback;)V`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_veil_VeilBridge_nativeOnShowCustomView(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
    view: JObject,
    callback: JObject,
) {
    let Some(veil) = handle_ref(handle, "nativeOnShowCustomView") else {
        return;
    };

    guarded("nativeOnShowCustomView", (), || {
        let token = completion_token(&mut env, &veil.vm, &callback);
        if view.is_null() {
            warn!("onShowCustomView without a view");
            // Dropping the token tells the WebView the episode is over
            return;
        }

        match env.new_global_ref(&view) {
            Ok(surface) => {
                veil.dispatch(ControllerEvent::VideoEnter {
                    surface: AndroidSurface(surface),
                    token,
                });
            }
            Err(e) => {
                clear_exception(&mut env);
                error!("Failed to pin custom view: {}", e);
            }
        }
    })
}

/// `WebChromeClient.onHideCustomView`
///
/// # JNI Signature
/// `(J)V`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_veil_VeilBridge_nativeOnHideCustomView(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    let Some(veil) = handle_ref(handle, "nativeOnHideCustomView") else {
        return;
    };

    guarded("nativeOnHideCustomView", (), || {
        veil.dispatch(ControllerEvent::VideoExit);
    })
}

/// Command from hosted content, e.g. `AndroidFullscreen.enter()`
///
/// Safe to call from any thread, including after `nativeDestroy`.
///
/// # Returns
/// * true if the method was recognized and queued
///
/// # JNI Signature
/// `(JLjava/lang/String;)Z`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_veil_VeilBridge_nativeBridgeCall(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
    method: JString,
) -> jboolean {
    let Some(veil) = handle_ref(handle, "nativeBridgeCall") else {
        return JNI_FALSE;
    };

    guarded("nativeBridgeCall", JNI_FALSE, || {
        let method: String = match env.get_string(&method) {
            Ok(method) => method.into(),
            Err(e) => {
                clear_exception(&mut env);
                warn!("Failed to read bridge method name: {}", e);
                return JNI_FALSE;
            }
        };

        if veil.bridge.call(&method) {
            JNI_TRUE
        } else {
            JNI_FALSE
        }
    })
}

/// `AndroidFullscreen.enter()` from hosted content
///
/// Safe to call from any thread, including after `nativeDestroy`.
///
/// # JNI Signature
/// `(J)V`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_veil_VeilBridge_nativeRequestEnter(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    if let Some(veil) = handle_ref(handle, "nativeRequestEnter") {
        guarded("nativeRequestEnter", (), || {
            veil.bridge.request_enter();
        });
    }
}

/// `AndroidFullscreen.exit()` from hosted content
///
/// Safe to call from any thread, including after `nativeDestroy`.
///
/// # JNI Signature
/// `(J)V`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_veil_VeilBridge_nativeRequestExit(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    if let Some(veil) = handle_ref(handle, "nativeRequestExit") {
        guarded("nativeRequestExit", (), || {
            veil.bridge.request_exit();
        });
    }
}

/// `Activity.onResume`
///
/// # JNI Signature
/// `(J)V`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_veil_VeilBridge_nativeOnResume(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    let Some(veil) = handle_ref(handle, "nativeOnResume") else {
        return;
    };

    guarded("nativeOnResume", (), || {
        veil.dispatch(ControllerEvent::Platform(Event::Lifecycle(
            LifecycleEvent::Resumed,
        )));
    })
}

/// `Activity.onWindowFocusChanged`
///
/// # JNI Signature
/// `(JZ)V`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_veil_VeilBridge_nativeOnWindowFocusChanged(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
    has_focus: jboolean,
) {
    let Some(veil) = handle_ref(handle, "nativeOnWindowFocusChanged") else {
        return;
    };

    guarded("nativeOnWindowFocusChanged", (), || {
        veil.dispatch(ControllerEvent::Platform(Event::Window(
            WindowEvent::Focused(has_focus != JNI_FALSE),
        )));
    })
}

/// `Activity.onBackPressed`
///
/// # Returns
/// * Milliseconds after which `nativeDrain` must run to time out the
///   in-page query, or -1
///
/// # JNI Signature
/// `(J)J`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_veil_VeilBridge_nativeOnBackPressed(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) -> jlong {
    let Some(veil) = handle_ref(handle, "nativeOnBackPressed") else {
        return NO_FOLLOW_UP;
    };

    guarded("nativeOnBackPressed", NO_FOLLOW_UP, || {
        veil.dispatch(ControllerEvent::BackPressed)
    })
}

/// Result of a script started by `VeilBridge.evaluate`
///
/// # Arguments
/// * `request_id` - Id passed to `evaluate`
/// * `result` - JSON-encoded script value, may be null
///
/// # JNI Signature
/// `(JJLjava/lang/String;)V`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_veil_VeilBridge_nativeOnScriptResult(
    mut env: JNIEnv,
    _class: JClass,
    handle: jlong,
    request_id: jlong,
    result: JString,
) {
    let Some(veil) = handle_ref(handle, "nativeOnScriptResult") else {
        return;
    };

    guarded("nativeOnScriptResult", (), || {
        let result: Option<String> = if result.is_null() {
            None
        } else {
            match env.get_string(&result) {
                Ok(result) => Some(result.into()),
                Err(e) => {
                    clear_exception(&mut env);
                    warn!("Failed to read script result: {}", e);
                    None
                }
            }
        };

        if veil.scripts.complete(request_id, result) {
            veil.drain();
        }
    })
}

/// Apply queued events
///
/// # Returns
/// * Milliseconds until the next drain is due, or -1
///
/// # JNI Signature
/// `(J)J`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_veil_VeilBridge_nativeDrain(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) -> jlong {
    let Some(veil) = handle_ref(handle, "nativeDrain") else {
        return NO_FOLLOW_UP;
    };

    guarded("nativeDrain", NO_FOLLOW_UP, || veil.drain())
}

/// Unregister the controller and release its resources
///
/// Closes an open video episode on the UI thread and drops pending script
/// callbacks. A bridge command still running on the JavaScript thread keeps
/// the handle alive until it returns; later lookups fail.
///
/// # JNI Signature
/// `(J)V`
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "system" fn Java_com_veil_VeilBridge_nativeDestroy(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    if handle == 0 {
        warn!("nativeDestroy called with null handle");
        return;
    }

    let Some(veil) = handles().remove(handle) else {
        warn!("nativeDestroy called with stale handle {}", handle);
        return;
    };
    veil.handle_cell.store(0, Ordering::Release);
    info!("Destroying VeilHandle {}", handle);

    guarded("nativeDestroy", (), move || {
        {
            let mut controller = veil.controller.lock().unwrap_or_else(PoisonError::into_inner);
            if controller.in_episode() {
                controller.handle(ControllerEvent::VideoExit, Instant::now());
            }
        }

        let dropped = veil.scripts.pending();
        if dropped > 0 {
            debug!("Dropping {} pending script callbacks", dropped);
        }
        if Arc::strong_count(&veil) > 1 {
            debug!("VeilHandle {} still in use on another thread", handle);
        }
        drop(veil);
    });

    info!("VeilHandle destroyed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_follow_up_delay() {
        let now = Instant::now();
        assert_eq!(follow_up_delay_ms(None, now), NO_FOLLOW_UP);
        assert_eq!(
            follow_up_delay_ms(Some(now + Duration::from_millis(1500)), now),
            1500
        );
        assert_eq!(
            follow_up_delay_ms(Some(now + Duration::from_micros(1500)), now),
            2
        );
    }

    #[test]
    fn test_follow_up_delay_past_deadline() {
        let now = Instant::now();
        let deadline = now;
        assert_eq!(
            follow_up_delay_ms(Some(deadline), now + Duration::from_secs(1)),
            0
        );
    }
}
