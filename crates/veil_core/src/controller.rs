//! Fullscreen controller
//!
//! The single owner of chrome state for a host window. Platform glue creates
//! one controller per window, hands out [`UiSender`]s / [`FullscreenBridge`]s
//! to the threads that produce events, and calls
//! [`FullscreenController::process_pending`] on the UI thread whenever the
//! waker fires.
//!
//! # Example
//!
//! ```ignore
//! let mut controller = FullscreenController::<AndroidPlatform>::new(
//!     VeilConfig::default(),
//!     chrome,
//!     &metrics,
//!     waker,
//! );
//! controller.resolve_content(container, Some(web_view));
//!
//! // From the engine thread:
//! sender.send(ControllerEvent::VideoEnter { surface, token });
//!
//! // On the UI thread, when woken:
//! controller.process_pending(Instant::now());
//! ```

use std::sync::Arc;
use std::time::Instant;

use veil_platform::{
    ContentContainer, DisplayMetrics, Platform, SystemChrome, SystemUiVisibility, UiWaker,
};

use crate::back::{BackDelegate, BackOutcome};
use crate::bridge::FullscreenBridge;
use crate::config::VeilConfig;
use crate::lifecycle::ReassertionHook;
use crate::queue::{ControllerEvent, UiQueue, UiSender};
use crate::reparent::ViewReparenter;
use crate::state::ChromeState;
use crate::token::CompletionToken;
use crate::transition::{TransitionEngine, TransitionOutcome};

/// Playback surface type of a platform
pub type SurfaceOf<P> = <<P as Platform>::Container as ContentContainer>::Surface;

/// Result of handling one event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventOutcome {
    /// A fullscreen transition ran
    Transition(TransitionOutcome),
    /// A platform event was observed; `true` if chrome was re-applied
    Lifecycle(bool),
    /// A back press or back query answer was handled
    Back(BackOutcome),
}

/// Fullscreen orchestration controller
pub struct FullscreenController<P: Platform> {
    config: VeilConfig,
    state: ChromeState,
    engine: TransitionEngine,
    hook: ReassertionHook,
    chrome: P::Chrome,
    reparenter: ViewReparenter<P::Container>,
    content: Option<P::Content>,
    back: BackDelegate,
    episode: Option<CompletionToken>,
    queue: UiQueue<SurfaceOf<P>>,
}

impl<P: Platform> FullscreenController<P> {
    /// Create the controller and apply the initial chrome
    ///
    /// Sets the status bar to the theme color with light icons. Must run on
    /// the UI thread.
    pub fn new<M>(config: VeilConfig, chrome: P::Chrome, metrics: &M, waker: Arc<dyn UiWaker>) -> Self
    where
        M: DisplayMetrics + ?Sized,
    {
        let state = ChromeState::from_metrics(metrics, &config.chrome);
        let engine = TransitionEngine::new(config.chrome.clone());
        let back = BackDelegate::new(config.back.clone());

        let controller = Self {
            state,
            engine,
            hook: ReassertionHook::new(),
            chrome,
            reparenter: ViewReparenter::new(),
            content: None,
            back,
            episode: None,
            queue: UiQueue::new(waker),
            config,
        };
        controller.init_chrome();

        tracing::info!(
            "Fullscreen controller initialized on {} (manual inset: {}, status bar: {}px)",
            P::name(),
            controller.state.needs_manual_inset(),
            controller.state.status_bar_height_px()
        );
        controller
    }

    fn init_chrome(&self) {
        if let Err(e) = self.chrome.set_status_bar_color(self.config.chrome.theme_color) {
            tracing::warn!("Failed to set status bar color: {}", e);
        }

        // Light status bar icons on the dark theme color
        match self.chrome.system_ui_visibility() {
            Ok(flags) => {
                let flags = flags - SystemUiVisibility::LIGHT_STATUS_BAR;
                if let Err(e) = self.chrome.set_system_ui_visibility(flags) {
                    tracing::warn!("Failed to set status bar icon style: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to read system UI flags: {}", e),
        }
    }

    /// Provide the content container and engine once the host view is realized
    ///
    /// With manual inset the container is padded below the status bar and
    /// painted in the theme color.
    pub fn resolve_content(&mut self, container: P::Container, content: Option<P::Content>) {
        if self.state.needs_manual_inset() {
            let top = if self.state.is_fullscreen() {
                0
            } else {
                self.state.status_bar_height_px()
            };
            if let Err(e) = container.set_top_padding(top) {
                tracing::warn!("Failed to set container top inset: {}", e);
            }
            if let Err(e) = container.set_background_color(self.config.chrome.theme_color) {
                tracing::warn!("Failed to set container background: {}", e);
            }
        }

        self.reparenter.resolve(container);
        self.set_content(content);
        tracing::debug!("Content container resolved");
    }

    /// Provide the content engine without a container
    ///
    /// Back navigation works; fullscreen video keeps chrome transitions but
    /// no surface is swapped in.
    pub fn set_content(&mut self, content: Option<P::Content>) {
        if content.is_none() {
            tracing::warn!("Content engine unavailable, back presses use the default action");
        }
        self.content = content;
    }

    /// Configuration in use
    pub fn config(&self) -> &VeilConfig {
        &self.config
    }

    /// Current chrome state
    pub fn state(&self) -> &ChromeState {
        &self.state
    }

    /// Native chrome
    pub fn chrome(&self) -> &P::Chrome {
        &self.chrome
    }

    /// Resolved content container, if any
    pub fn container(&self) -> Option<&P::Container> {
        self.reparenter.container()
    }

    /// Content engine, if any
    pub fn content(&self) -> Option<&P::Content> {
        self.content.as_ref()
    }

    /// Whether a playback surface is attached
    pub fn is_surface_attached(&self) -> bool {
        self.reparenter.is_attached()
    }

    /// Whether an embedded video episode is open
    pub fn in_episode(&self) -> bool {
        self.episode.is_some()
    }

    /// Number of times chrome was re-applied after a foreground regain
    pub fn reasserted(&self) -> u64 {
        self.hook.reasserted()
    }

    /// When [`Self::process_pending`] must next run to time out a back query
    pub fn next_deadline(&self) -> Option<Instant> {
        self.back.deadline()
    }

    /// A sender posting events to this controller
    pub fn sender(&self) -> UiSender<SurfaceOf<P>> {
        self.queue.sender()
    }

    /// The command bridge for hosted content
    pub fn bridge(&self) -> FullscreenBridge<SurfaceOf<P>> {
        FullscreenBridge::new(self.config.bridge.name.clone(), self.queue.sender())
    }

    /// Apply every queued event, then resolve an expired back query
    ///
    /// Returns the number of events handled. Must run on the UI thread.
    pub fn process_pending(&mut self, now: Instant) -> usize {
        let events = self.queue.drain();
        let count = events.len();
        for event in events {
            self.handle(event, now);
        }

        if let Some(outcome) =
            self.back
                .poll_timeout(now, self.content.as_ref(), &self.chrome)
        {
            tracing::debug!("Back query resolved by timeout: {:?}", outcome);
        }
        count
    }

    /// Apply one event
    ///
    /// Must run on the UI thread; other threads go through [`Self::sender`].
    pub fn handle(&mut self, event: ControllerEvent<SurfaceOf<P>>, now: Instant) -> EventOutcome {
        match event {
            ControllerEvent::VideoEnter { surface, token } => {
                tracing::debug!("Embedded video entered fullscreen");
                EventOutcome::Transition(self.video_enter(surface, token))
            }
            ControllerEvent::VideoExit => {
                tracing::debug!("Embedded video exited fullscreen");
                EventOutcome::Transition(self.video_exit())
            }
            ControllerEvent::EnterRequested => EventOutcome::Transition(self.engine.enter(
                &mut self.state,
                &self.chrome,
                self.reparenter.container(),
            )),
            ControllerEvent::ExitRequested => EventOutcome::Transition(self.engine.exit(
                &mut self.state,
                &self.chrome,
                self.reparenter.container(),
            )),
            ControllerEvent::Platform(event) => EventOutcome::Lifecycle(self.hook.on_event(
                &event,
                &self.engine,
                &self.state,
                &self.chrome,
                self.reparenter.container(),
            )),
            ControllerEvent::BackPressed => {
                let sender = self.queue.sender();
                EventOutcome::Back(self.back.on_back_pressed(
                    self.content.as_ref(),
                    &self.chrome,
                    &sender,
                    now,
                ))
            }
            ControllerEvent::BackQueryResult { query_id, result } => {
                EventOutcome::Back(self.back.on_query_result(
                    query_id,
                    result.as_deref(),
                    self.content.as_ref(),
                    &self.chrome,
                ))
            }
        }
    }

    fn video_enter(&mut self, surface: SurfaceOf<P>, token: CompletionToken) -> TransitionOutcome {
        if let Some(mut previous) = self.episode.replace(token) {
            tracing::warn!("New video episode before the previous one ended, releasing it");
            previous.release();
        }

        self.reparenter.attach(surface);
        self.engine
            .enter(&mut self.state, &self.chrome, self.reparenter.container())
    }

    fn video_exit(&mut self) -> TransitionOutcome {
        match self.episode.take() {
            Some(mut token) => {
                token.release();
            }
            None => tracing::debug!("Video exit without an open episode"),
        }

        self.reparenter.detach();
        self.engine
            .exit(&mut self.state, &self.chrome, self.reparenter.container())
    }
}
