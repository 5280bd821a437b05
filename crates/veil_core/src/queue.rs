//! UI-affinity message queue
//!
//! Fullscreen signals from the content engine and bridge calls from hosted
//! content arrive on engine-internal threads, but every chrome and view
//! mutation has to happen on the UI thread. Producers post
//! [`ControllerEvent`]s through a cloneable [`UiSender`]; each post wakes the
//! UI context through the platform's [`UiWaker`], which then drains the
//! [`UiQueue`] and applies events in order.
//!
//! ```text
//! engine thread ──┐
//! bridge thread ──┼──▶ UiSender ──▶ mpsc ──▶ UiQueue::drain (UI thread)
//! UI thread ──────┘        │
//!                          └──▶ UiWaker::wake
//! ```

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use veil_platform::{Event, UiWaker};

use crate::token::CompletionToken;

/// Events consumed by the fullscreen controller
#[derive(Debug)]
pub enum ControllerEvent<S> {
    /// The content engine went fullscreen for embedded video
    VideoEnter {
        /// Playback surface to show in place of the content view
        surface: S,
        /// Signals the engine once the episode is torn down
        token: CompletionToken,
    },
    /// The content engine left embedded video fullscreen
    VideoExit,
    /// Hosted content asked for fullscreen through the command bridge
    EnterRequested,
    /// Hosted content asked to leave fullscreen through the command bridge
    ExitRequested,
    /// Lifecycle or window event from the platform
    Platform(Event),
    /// Hardware back button or back gesture
    BackPressed,
    /// Answer of the in-page back query
    BackQueryResult {
        /// Query this answer belongs to
        query_id: u64,
        /// Raw engine result, `None` if the engine returned null
        result: Option<String>,
    },
}

/// Sending half of the UI queue
///
/// Cheap to clone and safe to use from any thread.
pub struct UiSender<S> {
    tx: Sender<ControllerEvent<S>>,
    waker: Arc<dyn UiWaker>,
}

impl<S> Clone for UiSender<S> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            waker: Arc::clone(&self.waker),
        }
    }
}

impl<S> UiSender<S> {
    /// Queue an event and wake the UI context
    ///
    /// Returns `false` if the controller is gone; the event is dropped.
    pub fn send(&self, event: ControllerEvent<S>) -> bool {
        if self.tx.send(event).is_err() {
            tracing::warn!("UI queue closed, dropping event");
            return false;
        }
        self.waker.wake();
        true
    }
}

/// Receiving half of the UI queue, owned by the controller
pub struct UiQueue<S> {
    rx: Receiver<ControllerEvent<S>>,
    sender: UiSender<S>,
}

impl<S> UiQueue<S> {
    /// Create a queue that wakes the UI context through `waker`
    pub fn new(waker: Arc<dyn UiWaker>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            rx,
            sender: UiSender { tx, waker },
        }
    }

    /// A new sender for this queue
    pub fn sender(&self) -> UiSender<S> {
        self.sender.clone()
    }

    /// Take every event queued so far, in order
    pub fn drain(&self) -> Vec<ControllerEvent<S>> {
        self.rx.try_iter().collect()
    }
}
