//! Platform events observed by the fullscreen controller

/// Platform events
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Window-related event
    Window(WindowEvent),
    /// Application lifecycle event
    Lifecycle(LifecycleEvent),
}

/// Window events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowEvent {
    /// Window gained or lost input focus
    Focused(bool),
}

/// Application lifecycle events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Application resumed (came to foreground)
    Resumed,
    /// Application suspended (went to background)
    Suspended,
}

impl Event {
    /// Whether this event means the host regained foreground or input focus
    ///
    /// Native chrome flags may have been reverted by the platform while the
    /// app was in the background, so these are the points where fullscreen
    /// state has to be asserted again.
    pub fn is_foreground_regain(&self) -> bool {
        matches!(
            self,
            Event::Lifecycle(LifecycleEvent::Resumed) | Event::Window(WindowEvent::Focused(true))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreground_regain() {
        assert!(Event::Lifecycle(LifecycleEvent::Resumed).is_foreground_regain());
        assert!(Event::Window(WindowEvent::Focused(true)).is_foreground_regain());
        assert!(!Event::Window(WindowEvent::Focused(false)).is_foreground_regain());
        assert!(!Event::Lifecycle(LifecycleEvent::Suspended).is_foreground_regain());
    }
}
