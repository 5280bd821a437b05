//! View reparenting for embedded video fullscreen
//!
//! When the content engine goes fullscreen for video it hands out a separate
//! playback surface. Merely resizing the content view leaves that surface
//! rendering onto a black or stale buffer, so the surface is inserted into
//! the content container and the content view is hidden (but kept attached,
//! for a fast restore) until the episode ends.

use veil_platform::{ContentContainer, PlatformError, Result};

/// Holds the content container and the playback surface of the current episode
pub struct ViewReparenter<V: ContentContainer> {
    container: Option<V>,
    attached: Option<V::Surface>,
}

impl<V: ContentContainer> ViewReparenter<V> {
    /// Create a reparenter with no container resolved yet
    pub fn new() -> Self {
        Self {
            container: None,
            attached: None,
        }
    }

    /// Provide the content container once the host view is realized
    pub fn resolve(&mut self, container: V) {
        if self.attached.is_some() {
            tracing::warn!("Container replaced while a surface is attached, detaching first");
            self.detach();
        }
        self.container = Some(container);
    }

    /// The resolved container, if any
    pub fn container(&self) -> Option<&V> {
        self.container.as_ref()
    }

    /// The resolved container, or [`PlatformError::Unresolved`]
    pub fn require_container(&self) -> Result<&V> {
        self.container
            .as_ref()
            .ok_or_else(|| PlatformError::unresolved("content container"))
    }

    /// Whether a playback surface is currently attached
    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    /// Insert `surface` into the container and hide the content view
    ///
    /// Returns `false` (and drops the surface) when the container has not
    /// been resolved. A surface from a previous episode is detached first.
    pub fn attach(&mut self, surface: V::Surface) -> bool {
        if let Err(e) = self.require_container() {
            tracing::warn!("{}, skipping surface reparenting", e);
            return false;
        }

        if self.attached.is_some() {
            tracing::debug!("Replacing previously attached surface");
            self.detach();
        }

        let Ok(container) = self.require_container() else {
            return false;
        };

        if let Err(e) = container.add_surface(&surface) {
            tracing::warn!("Failed to add playback surface: {}", e);
            return false;
        }
        if let Err(e) = container.set_content_visible(false) {
            tracing::warn!("Failed to hide content view: {}", e);
        }

        self.attached = Some(surface);
        tracing::debug!("Playback surface attached");
        true
    }

    /// Remove the attached surface and show the content view again
    ///
    /// Returns `false` when nothing was attached; that case is a no-op.
    pub fn detach(&mut self) -> bool {
        let Some(surface) = self.attached.take() else {
            return false;
        };

        if let Some(container) = self.container.as_ref() {
            if let Err(e) = container.remove_surface(&surface) {
                tracing::warn!("Failed to remove playback surface: {}", e);
            }
            if let Err(e) = container.set_content_visible(true) {
                tracing::warn!("Failed to show content view: {}", e);
            }
        }

        tracing::debug!("Playback surface detached");
        true
    }
}

impl<V: ContentContainer> Default for ViewReparenter<V> {
    fn default() -> Self {
        Self::new()
    }
}
