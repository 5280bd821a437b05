//! Android view tree
//!
//! The content container is the `ViewGroup` that parents the WebView. Playback
//! surfaces handed over by `WebChromeClient.onShowCustomView` are added to it
//! while the WebView itself is hidden.

use veil_platform::{Argb, ContentContainer, Result};

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
use crate::jni_utils::{view_visibility, with_env};

/// A playback surface (`android.view.View`) pinned with a global reference
#[cfg(target_os = "android")]
#[derive(Clone)]
pub struct AndroidSurface(pub GlobalRef);

/// Placeholder for non-Android builds
#[cfg(not(target_os = "android"))]
#[derive(Clone, Debug)]
pub struct AndroidSurface;

/// The WebView's parent `ViewGroup`
#[cfg(target_os = "android")]
pub struct AndroidContainer {
    vm: Arc<JavaVM>,
    parent: GlobalRef,
    content_view: GlobalRef,
}

#[cfg(target_os = "android")]
impl AndroidContainer {
    /// Wrap the parent and the content view it holds
    pub fn new(vm: Arc<JavaVM>, parent: GlobalRef, content_view: GlobalRef) -> Self {
        Self {
            vm,
            parent,
            content_view,
        }
    }
}

#[cfg(target_os = "android")]
impl ContentContainer for AndroidContainer {
    type Surface = AndroidSurface;

    fn set_top_padding(&self, px: i32) -> Result<()> {
        let parent = self.parent.as_obj();
        with_env(&self.vm, |env| {
            // Only the top edge is managed
            let left = env.call_method(parent, "getPaddingLeft", "()I", &[])?.i()?;
            let right = env.call_method(parent, "getPaddingRight", "()I", &[])?.i()?;
            let bottom = env.call_method(parent, "getPaddingBottom", "()I", &[])?.i()?;

            env.call_method(
                parent,
                "setPadding",
                "(IIII)V",
                &[
                    JValue::Int(left),
                    JValue::Int(px),
                    JValue::Int(right),
                    JValue::Int(bottom),
                ],
            )?;
            Ok(())
        })
    }

    fn set_background_color(&self, color: Argb) -> Result<()> {
        let parent = self.parent.as_obj();
        with_env(&self.vm, |env| {
            env.call_method(
                parent,
                "setBackgroundColor",
                "(I)V",
                &[JValue::Int(color as i32)],
            )?;
            Ok(())
        })
    }

    fn add_surface(&self, surface: &AndroidSurface) -> Result<()> {
        let parent = self.parent.as_obj();
        let view = surface.0.as_obj();
        with_env(&self.vm, |env| {
            env.call_method(
                parent,
                "addView",
                "(Landroid/view/View;)V",
                &[JValue::Object(view)],
            )?;
            Ok(())
        })
    }

    fn remove_surface(&self, surface: &AndroidSurface) -> Result<()> {
        let parent = self.parent.as_obj();
        let view = surface.0.as_obj();
        with_env(&self.vm, |env| {
            env.call_method(
                parent,
                "removeView",
                "(Landroid/view/View;)V",
                &[JValue::Object(view)],
            )?;
            Ok(())
        })
    }

    fn set_content_visible(&self, visible: bool) -> Result<()> {
        let content_view = self.content_view.as_obj();
        with_env(&self.vm, |env| {
            env.call_method(
                content_view,
                "setVisibility",
                "(I)V",
                &[JValue::Int(view_visibility(visible))],
            )?;
            Ok(())
        })
    }
}

/// Placeholder for non-Android builds
#[cfg(not(target_os = "android"))]
pub struct AndroidContainer {
    _private: (),
}

#[cfg(not(target_os = "android"))]
impl AndroidContainer {
    /// Create a placeholder container
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(not(target_os = "android"))]
impl Default for AndroidContainer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "android"))]
fn unsupported() -> Result<()> {
    Err(PlatformError::Unsupported(
        "Android view tree only available on Android".to_string(),
    ))
}

#[cfg(not(target_os = "android"))]
impl ContentContainer for AndroidContainer {
    type Surface = AndroidSurface;

    fn set_top_padding(&self, _px: i32) -> Result<()> {
        unsupported()
    }

    fn set_background_color(&self, _color: Argb) -> Result<()> {
        unsupported()
    }

    fn add_surface(&self, _surface: &AndroidSurface) -> Result<()> {
        unsupported()
    }

    fn remove_surface(&self, _surface: &AndroidSurface) -> Result<()> {
        unsupported()
    }

    fn set_content_visible(&self, _visible: bool) -> Result<()> {
        unsupported()
    }
}
