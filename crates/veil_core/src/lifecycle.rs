//! Re-assertion of fullscreen chrome after the app regains the foreground
//!
//! The platform does not guarantee that system UI flags survive
//! backgrounding, so whenever the process resumes or the window regains
//! focus while fullscreen, the enter effects are applied again. This is a
//! pure re-apply: the mode is already `Fullscreen` and stays so.

use veil_platform::{ContentContainer, Event, SystemChrome};

use crate::state::ChromeState;
use crate::transition::TransitionEngine;

/// Lifecycle hook re-applying fullscreen chrome
#[derive(Clone, Debug, Default)]
pub struct ReassertionHook {
    reasserted: u64,
}

impl ReassertionHook {
    /// Create a new hook
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times fullscreen chrome has been re-applied
    pub fn reasserted(&self) -> u64 {
        self.reasserted
    }

    /// Handle a platform event
    ///
    /// Returns `true` when the enter effects were re-applied.
    pub fn on_event<C, V>(
        &mut self,
        event: &Event,
        engine: &TransitionEngine,
        state: &ChromeState,
        chrome: &C,
        container: Option<&V>,
    ) -> bool
    where
        C: SystemChrome + ?Sized,
        V: ContentContainer,
    {
        tracing::debug!("{:?}, is_fullscreen: {}", event, state.is_fullscreen());

        if !event.is_foreground_regain() || !state.is_fullscreen() {
            return false;
        }

        engine.apply_enter_effects(state, chrome, container);
        self.reasserted += 1;
        tracing::debug!("Fullscreen chrome re-applied");
        true
    }
}
