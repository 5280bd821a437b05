//! Android window chrome
//!
//! Drives the activity's `Window` and decor view through JNI to implement the
//! veil_platform `SystemChrome` trait.

use veil_platform::{Argb, Orientation, Result, SystemChrome, SystemUiVisibility, WindowFlags};

#[cfg(not(target_os = "android"))]
use veil_platform::PlatformError;

#[cfg(target_os = "android")]
use jni::{
    objects::{GlobalRef, JObject, JValue},
    JNIEnv, JavaVM,
};
#[cfg(target_os = "android")]
use std::sync::Arc;

#[cfg(target_os = "android")]
use crate::jni_utils::with_env;

/// Name of the host activity method performing the platform back action
///
/// The activity implements it as `super.onBackPressed()`; the override of
/// `onBackPressed` itself routes into Veil.
pub const DEFAULT_BACK_METHOD: &str = "veilDefaultBack";

/// System chrome of an Android activity window
#[cfg(target_os = "android")]
pub struct AndroidWindow {
    vm: Arc<JavaVM>,
    activity: GlobalRef,
}

#[cfg(target_os = "android")]
impl AndroidWindow {
    /// Wrap the host activity
    pub fn new(vm: Arc<JavaVM>, activity: GlobalRef) -> Self {
        Self { vm, activity }
    }

    fn window<'local>(
        env: &mut JNIEnv<'local>,
        activity: &JObject,
    ) -> std::result::Result<JObject<'local>, jni::errors::Error> {
        env.call_method(activity, "getWindow", "()Landroid/view/Window;", &[])?
            .l()
    }

    fn decor_view<'local>(
        env: &mut JNIEnv<'local>,
        activity: &JObject,
    ) -> std::result::Result<JObject<'local>, jni::errors::Error> {
        let window = Self::window(env, activity)?;
        env.call_method(&window, "getDecorView", "()Landroid/view/View;", &[])?
            .l()
    }
}

#[cfg(target_os = "android")]
impl SystemChrome for AndroidWindow {
    fn set_status_bar_color(&self, color: Argb) -> Result<()> {
        let activity = self.activity.as_obj();
        with_env(&self.vm, |env| {
            let window = Self::window(env, activity)?;
            env.call_method(
                &window,
                "setStatusBarColor",
                "(I)V",
                &[JValue::Int(color as i32)],
            )?;
            Ok(())
        })
    }

    fn set_window_flags(&self, flags: WindowFlags, mask: WindowFlags) -> Result<()> {
        let activity = self.activity.as_obj();
        with_env(&self.vm, |env| {
            let window = Self::window(env, activity)?;
            env.call_method(
                &window,
                "setFlags",
                "(II)V",
                &[
                    JValue::Int(flags.bits() as i32),
                    JValue::Int(mask.bits() as i32),
                ],
            )?;
            Ok(())
        })
    }

    fn system_ui_visibility(&self) -> Result<SystemUiVisibility> {
        let activity = self.activity.as_obj();
        let bits = with_env(&self.vm, |env| {
            let decor = Self::decor_view(env, activity)?;
            env.call_method(&decor, "getSystemUiVisibility", "()I", &[])?
                .i()
        })?;
        Ok(SystemUiVisibility::from_bits_retain(bits as u32))
    }

    fn set_system_ui_visibility(&self, flags: SystemUiVisibility) -> Result<()> {
        let activity = self.activity.as_obj();
        with_env(&self.vm, |env| {
            let decor = Self::decor_view(env, activity)?;
            env.call_method(
                &decor,
                "setSystemUiVisibility",
                "(I)V",
                &[JValue::Int(flags.bits() as i32)],
            )?;
            Ok(())
        })
    }

    fn set_requested_orientation(&self, orientation: Orientation) -> Result<()> {
        let activity = self.activity.as_obj();
        with_env(&self.vm, |env| {
            env.call_method(
                activity,
                "setRequestedOrientation",
                "(I)V",
                &[JValue::Int(orientation.to_android())],
            )?;
            Ok(())
        })
    }

    fn default_back(&self) -> Result<()> {
        let activity = self.activity.as_obj();
        with_env(&self.vm, |env| {
            env.call_method(activity, DEFAULT_BACK_METHOD, "()V", &[])?;
            Ok(())
        })
    }
}

/// Placeholder for non-Android builds
#[cfg(not(target_os = "android"))]
pub struct AndroidWindow {
    _private: (),
}

#[cfg(not(target_os = "android"))]
impl AndroidWindow {
    /// Create a placeholder window
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(not(target_os = "android"))]
impl Default for AndroidWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "android"))]
fn unsupported<T>() -> Result<T> {
    Err(PlatformError::Unsupported(
        "Android window only available on Android".to_string(),
    ))
}

#[cfg(not(target_os = "android"))]
impl SystemChrome for AndroidWindow {
    fn set_status_bar_color(&self, _color: Argb) -> Result<()> {
        unsupported()
    }

    fn set_window_flags(&self, _flags: WindowFlags, _mask: WindowFlags) -> Result<()> {
        unsupported()
    }

    fn system_ui_visibility(&self) -> Result<SystemUiVisibility> {
        unsupported()
    }

    fn set_system_ui_visibility(&self, _flags: SystemUiVisibility) -> Result<()> {
        unsupported()
    }

    fn set_requested_orientation(&self, _orientation: Orientation) -> Result<()> {
        unsupported()
    }

    fn default_back(&self) -> Result<()> {
        unsupported()
    }
}
