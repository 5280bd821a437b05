//! JNI utilities for Android platform
//!
//! Provides helper functions for accessing Android APIs via JNI.

#[cfg(target_os = "android")]
use jni::{
    objects::{JObject, JValue},
    JNIEnv, JavaVM,
};

#[cfg(target_os = "android")]
use veil_platform::{PlatformError, StaticMetrics};

#[cfg(target_os = "android")]
use tracing::debug;

/// `View.VISIBLE`
pub const VIEW_VISIBLE: i32 = 0;

/// `View.GONE`
pub const VIEW_GONE: i32 = 8;

/// Map content visibility to the `View.setVisibility` argument
///
/// Hidden views use `GONE` so the content view takes no layout space while a
/// playback surface is shown in its place.
pub fn view_visibility(visible: bool) -> i32 {
    if visible {
        VIEW_VISIBLE
    } else {
        VIEW_GONE
    }
}

/// Convert a JNI error into a platform error
#[cfg(target_os = "android")]
pub fn jni_err(e: jni::errors::Error) -> PlatformError {
    PlatformError::Jni(e.to_string())
}

/// Run `f` with the current thread attached, inside its own local frame
///
/// A Java exception raised by `f` is logged and cleared so later calls on
/// this thread are not poisoned.
#[cfg(target_os = "android")]
pub fn with_env<T>(
    vm: &JavaVM,
    f: impl FnOnce(&mut JNIEnv) -> Result<T, jni::errors::Error>,
) -> Result<T, PlatformError> {
    let mut env = vm.attach_current_thread().map_err(jni_err)?;
    let result = env.with_local_frame(16, f);

    if result.is_err() {
        clear_exception(&mut env);
    }
    result.map_err(jni_err)
}

/// Log and clear a pending Java exception, if any
///
/// Must run after a failed call before the next JNI call on `env`.
#[cfg(target_os = "android")]
pub fn clear_exception(env: &mut JNIEnv) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
}

/// Take the value of a fallible step, or log the failure and use `fallback`
///
/// `clear` runs only on failure, before anything else touches the VM.
pub fn step_or<T, E: std::fmt::Debug>(
    step: &str,
    result: Result<T, E>,
    fallback: T,
    clear: impl FnOnce(),
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            clear();
            tracing::warn!("Failed to {}: {:?}", step, e);
            fallback
        }
    }
}

/// Query display metrics from the activity
///
/// Each value falls back independently: density to 1.0, the status bar
/// dimension to `None`, the API level to 0.
#[cfg(target_os = "android")]
pub fn query_display_metrics(env: &mut JNIEnv, activity: &JObject) -> StaticMetrics {
    let density = get_density(env, activity);
    let density = step_or("get density", density, 1.0, || clear_exception(env));

    let status_bar_px = get_status_bar_dimension(env, activity);
    let status_bar_px = step_or("get status bar height", status_bar_px, None, || {
        clear_exception(env)
    });

    let sdk_int = get_sdk_int(env);
    let sdk_int = step_or("get SDK level", sdk_int, 0, || clear_exception(env));

    debug!(
        "Display metrics: density {}, status bar {:?}, API {}",
        density, status_bar_px, sdk_int
    );

    StaticMetrics {
        status_bar_px,
        density,
        sdk_int,
    }
}

/// Get resources: activity.getResources()
#[cfg(target_os = "android")]
fn get_resources<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject,
) -> Result<JObject<'local>, jni::errors::Error> {
    env.call_method(
        activity,
        "getResources",
        "()Landroid/content/res/Resources;",
        &[],
    )?
    .l()
}

/// activity.getResources().getDisplayMetrics().density
#[cfg(target_os = "android")]
fn get_density(env: &mut JNIEnv, activity: &JObject) -> Result<f32, jni::errors::Error> {
    let resources = get_resources(env, activity)?;

    let display_metrics = env
        .call_method(
            &resources,
            "getDisplayMetrics",
            "()Landroid/util/DisplayMetrics;",
            &[],
        )?
        .l()?;

    env.get_field(&display_metrics, "density", "F")?.f()
}

/// Look up the framework's `status_bar_height` dimension
///
/// Returns `None` when the resource does not exist.
#[cfg(target_os = "android")]
fn get_status_bar_dimension(
    env: &mut JNIEnv,
    activity: &JObject,
) -> Result<Option<i32>, jni::errors::Error> {
    let resources = get_resources(env, activity)?;

    let name = env.new_string("status_bar_height")?;
    let def_type = env.new_string("dimen")?;
    let def_package = env.new_string("android")?;

    // resources.getIdentifier("status_bar_height", "dimen", "android")
    let resource_id = env
        .call_method(
            &resources,
            "getIdentifier",
            "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)I",
            &[
                JValue::Object(&name),
                JValue::Object(&def_type),
                JValue::Object(&def_package),
            ],
        )?
        .i()?;

    if resource_id <= 0 {
        return Ok(None);
    }

    let px = env
        .call_method(
            &resources,
            "getDimensionPixelSize",
            "(I)I",
            &[JValue::Int(resource_id)],
        )?
        .i()?;

    Ok(Some(px))
}

/// Build.VERSION.SDK_INT
#[cfg(target_os = "android")]
fn get_sdk_int(env: &mut JNIEnv) -> Result<i32, jni::errors::Error> {
    env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?
        .i()
}
