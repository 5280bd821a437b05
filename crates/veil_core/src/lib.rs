//! Veil Core
//!
//! Keeps native chrome (status bar, navigation bar, orientation) in step
//! with fullscreen video playback inside an embedded content engine.
//!
//! # Components
//!
//! - [`ChromeState`] - Current mode, cached status bar height, manual inset flag
//! - [`inset`] - Status bar height with a density-based fallback
//! - [`ViewReparenter`] - Swaps the playback surface in for the content view
//! - [`TransitionEngine`] - The `Windowed` / `Fullscreen` state machine
//! - [`ReassertionHook`] - Re-applies fullscreen chrome on resume and focus
//! - [`BackDelegate`] - Lets hosted content intercept the back button
//! - [`UiQueue`] - Carries events from engine threads onto the UI thread
//! - [`FullscreenController`] - Owns all of the above for one host window
//!
//! # Data Flow
//!
//! ```text
//! engine / bridge threads          UI thread
//! ───────────────────────          ─────────────────────────────────────
//! VideoEnter/VideoExit ──┐
//! requestEnter/Exit ─────┼─▶ UiQueue ─▶ FullscreenController
//! BackQueryResult ───────┘                 ├─▶ TransitionEngine ─▶ SystemChrome
//!                                          ├─▶ ViewReparenter ──▶ ContentContainer
//! resume / focus ─────────────────────────▶├─▶ ReassertionHook
//! back press ─────────────────────────────▶└─▶ BackDelegate ────▶ ContentEngine
//! ```

pub mod back;
pub mod bridge;
pub mod config;
pub mod controller;
pub mod error;
pub mod inset;
pub mod lifecycle;
pub mod queue;
pub mod reparent;
pub mod state;
pub mod token;
pub mod transition;

#[cfg(test)]
pub(crate) mod testing;


pub use back::{BackDelegate, BackOutcome, DetailViewStatus};
pub use bridge::{BridgeCommand, FullscreenBridge};
pub use config::{BackConfig, BridgeConfig, ChromeConfig, VeilConfig};
pub use controller::{EventOutcome, FullscreenController, SurfaceOf};
pub use error::{Result, VeilError};
pub use lifecycle::ReassertionHook;
pub use queue::{ControllerEvent, UiQueue, UiSender};
pub use reparent::ViewReparenter;
pub use state::{ChromeState, FullscreenMode};
pub use token::CompletionToken;
pub use transition::{FullscreenRequest, TransitionEngine, TransitionOutcome};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::back::BackOutcome;
    pub use crate::config::VeilConfig;
    pub use crate::controller::{EventOutcome, FullscreenController};
    pub use crate::queue::{ControllerEvent, UiSender};
    pub use crate::token::CompletionToken;
    pub use crate::transition::TransitionOutcome;
}
