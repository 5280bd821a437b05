//! Fullscreen transition engine
//!
//! Two states, `Windowed` and `Fullscreen`. Entering applies immersive
//! chrome, drops the manual top inset, and locks landscape; exiting reverts
//! all of it and resets the status bar color. Both directions are
//! idempotent: applying a transition again re-applies the same effects and
//! leaves the state unchanged, which is what the re-assertion hook relies on.
//!
//! Each native call is attempted even if an earlier one failed. Failures are
//! logged and never propagate.

use veil_platform::{
    ContentContainer, Orientation, PlatformError, Result as PlatformResult, SystemChrome,
    SystemUiVisibility, WindowFlags,
};

use crate::config::ChromeConfig;
use crate::state::{ChromeState, FullscreenMode};

/// Requests driving the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FullscreenRequest {
    /// Enter fullscreen (or re-assert it)
    Enter,
    /// Leave fullscreen
    Exit,
}

/// What a transition did
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionOutcome {
    /// Windowed -> Fullscreen
    Entered,
    /// Already fullscreen; enter effects re-applied
    Reasserted,
    /// Fullscreen -> Windowed
    Exited,
    /// Already windowed; exit effects re-applied
    AlreadyWindowed,
}

/// Applies chrome effects and updates [`ChromeState`]
#[derive(Clone, Debug, Default)]
pub struct TransitionEngine {
    config: ChromeConfig,
}

impl TransitionEngine {
    /// Create an engine with the given chrome settings
    pub fn new(config: ChromeConfig) -> Self {
        Self { config }
    }

    /// Run a request against the state machine
    pub fn apply<C, V>(
        &self,
        request: FullscreenRequest,
        state: &mut ChromeState,
        chrome: &C,
        container: Option<&V>,
    ) -> TransitionOutcome
    where
        C: SystemChrome + ?Sized,
        V: ContentContainer,
    {
        match request {
            FullscreenRequest::Enter => self.enter(state, chrome, container),
            FullscreenRequest::Exit => self.exit(state, chrome, container),
        }
    }

    /// Windowed -> Fullscreen
    pub fn enter<C, V>(
        &self,
        state: &mut ChromeState,
        chrome: &C,
        container: Option<&V>,
    ) -> TransitionOutcome
    where
        C: SystemChrome + ?Sized,
        V: ContentContainer,
    {
        tracing::debug!("Enter fullscreen, is_fullscreen: {}", state.is_fullscreen());
        let was_fullscreen = state.is_fullscreen();

        self.apply_enter_effects(state, chrome, container);
        state.set_mode(FullscreenMode::Fullscreen);

        tracing::info!("Fullscreen mode enabled");
        if was_fullscreen {
            TransitionOutcome::Reasserted
        } else {
            TransitionOutcome::Entered
        }
    }

    /// Fullscreen -> Windowed
    pub fn exit<C, V>(
        &self,
        state: &mut ChromeState,
        chrome: &C,
        container: Option<&V>,
    ) -> TransitionOutcome
    where
        C: SystemChrome + ?Sized,
        V: ContentContainer,
    {
        tracing::debug!("Exit fullscreen, is_fullscreen: {}", state.is_fullscreen());
        let was_fullscreen = state.is_fullscreen();

        self.apply_exit_effects(state, chrome, container);
        state.set_mode(FullscreenMode::Windowed);

        tracing::info!("Fullscreen mode disabled");
        if was_fullscreen {
            TransitionOutcome::Exited
        } else {
            TransitionOutcome::AlreadyWindowed
        }
    }

    /// Apply the fullscreen chrome effects without touching the mode
    pub fn apply_enter_effects<C, V>(&self, state: &ChromeState, chrome: &C, container: Option<&V>)
    where
        C: SystemChrome + ?Sized,
        V: ContentContainer,
    {
        if state.needs_manual_inset() {
            attempt(
                "clear top inset",
                require(container).and_then(|container| container.set_top_padding(0)),
            );
        }

        let mask = self.window_mask();
        attempt("set window flags", chrome.set_window_flags(mask, mask));
        attempt(
            "hide system bars",
            chrome.set_system_ui_visibility(SystemUiVisibility::IMMERSIVE_CHROME),
        );
        attempt(
            "lock landscape",
            chrome.set_requested_orientation(Orientation::SensorLandscape),
        );
    }

    /// Apply the windowed chrome effects without touching the mode
    pub fn apply_exit_effects<C, V>(&self, state: &ChromeState, chrome: &C, container: Option<&V>)
    where
        C: SystemChrome + ?Sized,
        V: ContentContainer,
    {
        if state.needs_manual_inset() {
            attempt(
                "restore top inset",
                require(container)
                    .and_then(|container| container.set_top_padding(state.status_bar_height_px())),
            );
        }

        attempt(
            "clear window flags",
            chrome.set_window_flags(WindowFlags::empty(), self.window_mask()),
        );
        attempt(
            "show system bars",
            chrome.set_system_ui_visibility(SystemUiVisibility::VISIBLE),
        );
        attempt(
            "unlock orientation",
            chrome.set_requested_orientation(Orientation::Unspecified),
        );
        // The platform may reset the status bar color during the transition
        attempt(
            "reset status bar color",
            chrome.set_status_bar_color(self.config.theme_color),
        );
    }

    fn window_mask(&self) -> WindowFlags {
        if self.config.layout_no_limits {
            WindowFlags::FULLSCREEN | WindowFlags::LAYOUT_NO_LIMITS
        } else {
            WindowFlags::FULLSCREEN
        }
    }
}

fn require<V>(container: Option<&V>) -> PlatformResult<&V> {
    container.ok_or_else(|| PlatformError::unresolved("content container"))
}

fn attempt(step: &str, result: PlatformResult<()>) {
    if let Err(e) = result {
        tracing::warn!("Failed to {}: {}", step, e);
    }
}
