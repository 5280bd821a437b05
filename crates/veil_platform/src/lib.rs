//! Veil Platform Abstraction Layer
//!
//! This crate provides platform-agnostic traits and types for the native
//! capabilities a fullscreen controller needs around an embedded content
//! engine: system chrome, the content container's view tree, the content
//! engine itself, and display metrics.
//!
//! # Architecture
//!
//! - [`Platform`] - Names the concrete capability types of a backend
//! - [`SystemChrome`] - Status bar color, system UI flags, orientation
//! - [`ContentContainer`] - Padding, visibility, playback surface insertion
//! - [`ContentEngine`] - Script evaluation and history navigation
//! - [`DisplayMetrics`] - Status bar dimension, density, API level
//!
//! # Platform Implementations
//!
//! - `veil_platform_android` - Android using JNI against the host Activity and WebView

mod content;
mod display;
mod error;
mod event;
mod platform;
mod view;
mod window;

// Re-export all public types
pub use content::{ContentEngine, ScriptCallback};
pub use display::{DisplayMetrics, StaticMetrics};
pub use error::{PlatformError, Result};
pub use event::{Event, LifecycleEvent, WindowEvent};
pub use platform::{NoopWaker, Platform, UiWaker};
pub use view::ContentContainer;
pub use window::{Argb, Orientation, SystemChrome, SystemUiVisibility, WindowFlags};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::content::{ContentEngine, ScriptCallback};
    pub use crate::display::DisplayMetrics;
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{Event, LifecycleEvent, WindowEvent};
    pub use crate::platform::{Platform, UiWaker};
    pub use crate::view::ContentContainer;
    pub use crate::window::{Orientation, SystemChrome, SystemUiVisibility, WindowFlags};
}
