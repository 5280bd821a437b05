//! Command bridge exposed to hosted content
//!
//! Hosted content calls `requestEnter()` / `requestExit()` on a named
//! bridge object. Those calls land on the engine's bridge thread, so the
//! bridge only queues the request; the controller applies it on the UI
//! thread.

use crate::queue::{ControllerEvent, UiSender};

/// Bridge commands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BridgeCommand {
    /// `requestEnter()`
    Enter,
    /// `requestExit()`
    Exit,
}

impl BridgeCommand {
    /// Parse a bridge method name
    ///
    /// Accepts both `requestEnter`/`requestExit` and the short
    /// `enter`/`exit` names older pages use.
    pub fn from_method(method: &str) -> Option<Self> {
        match method {
            "requestEnter" | "enter" => Some(BridgeCommand::Enter),
            "requestExit" | "exit" => Some(BridgeCommand::Exit),
            _ => None,
        }
    }
}

/// Named fullscreen command bridge
pub struct FullscreenBridge<S> {
    name: String,
    sender: UiSender<S>,
}

impl<S> Clone for FullscreenBridge<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            sender: self.sender.clone(),
        }
    }
}

impl<S> FullscreenBridge<S> {
    /// Create a bridge posting to the controller's queue
    pub fn new(name: impl Into<String>, sender: UiSender<S>) -> Self {
        Self {
            name: name.into(),
            sender,
        }
    }

    /// Global name of the bridge object in hosted content
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hosted content requested fullscreen
    pub fn request_enter(&self) -> bool {
        tracing::debug!("{}.requestEnter()", self.name);
        self.sender.send(ControllerEvent::EnterRequested)
    }

    /// Hosted content requested leaving fullscreen
    pub fn request_exit(&self) -> bool {
        tracing::debug!("{}.requestExit()", self.name);
        self.sender.send(ControllerEvent::ExitRequested)
    }

    /// Dispatch a call by method name
    ///
    /// Returns `false` for unknown methods.
    pub fn call(&self, method: &str) -> bool {
        match BridgeCommand::from_method(method) {
            Some(BridgeCommand::Enter) => self.request_enter(),
            Some(BridgeCommand::Exit) => self.request_exit(),
            None => {
                tracing::warn!("Unknown bridge method {}.{}", self.name, method);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::UiQueue;
    use std::sync::Arc;
    use veil_platform::NoopWaker;

    #[test]
    fn test_from_method() {
        assert_eq!(BridgeCommand::from_method("requestEnter"), Some(BridgeCommand::Enter));
        assert_eq!(BridgeCommand::from_method("enter"), Some(BridgeCommand::Enter));
        assert_eq!(BridgeCommand::from_method("requestExit"), Some(BridgeCommand::Exit));
        assert_eq!(BridgeCommand::from_method("exit"), Some(BridgeCommand::Exit));
        assert_eq!(BridgeCommand::from_method("toggle"), None);
    }

    #[test]
    fn test_bridge_queues_requests() {
        let queue: UiQueue<u32> = UiQueue::new(Arc::new(NoopWaker));
        let bridge = FullscreenBridge::new("AndroidFullscreen", queue.sender());

        assert_eq!(bridge.name(), "AndroidFullscreen");
        assert!(bridge.request_enter());
        assert!(bridge.call("requestExit"));
        assert!(!bridge.call("toggle"));

        let events = queue.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ControllerEvent::EnterRequested));
        assert!(matches!(events[1], ControllerEvent::ExitRequested));
    }
}
