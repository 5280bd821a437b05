//! Platform trait and abstraction

use crate::content::ContentEngine;
use crate::view::ContentContainer;
use crate::window::SystemChrome;

/// Platform abstraction trait
///
/// Implemented by each platform backend to name the concrete capability
/// types the fullscreen controller drives.
pub trait Platform {
    /// Native chrome of the host window
    type Chrome: SystemChrome;
    /// View group hosting the content view and playback surfaces
    type Container: ContentContainer;
    /// Embedded content engine
    type Content: ContentEngine;

    /// Get the platform name
    ///
    /// Returns a string like "android".
    fn name() -> &'static str;
}

/// Wakes the UI-affinity context so it drains pending work
///
/// Called from arbitrary threads after an event has been queued.
pub trait UiWaker: Send + Sync {
    /// Schedule a drain of the UI queue on the UI-affinity context
    fn wake(&self);
}

/// Waker for hosts that drain on their own schedule
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopWaker;

impl UiWaker for NoopWaker {
    fn wake(&self) {}
}
