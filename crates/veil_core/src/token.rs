//! Completion token for an embedded fullscreen episode
//!
//! The content engine hands out a completion callback together with the
//! playback surface and expects exactly one call when native teardown is
//! done. Calling it twice can crash the engine, and never calling it leaves
//! the engine stuck in fullscreen, so the token releases at most once and
//! releases itself on drop if nobody did.

use std::fmt;

type ReleaseFn = Box<dyn FnOnce() + Send + 'static>;

/// Single-use completion token
pub struct CompletionToken {
    release: Option<ReleaseFn>,
}

impl CompletionToken {
    /// Wrap a completion callback
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A token with nothing to signal
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// Signal completion
    ///
    /// Returns `true` if this call ran the callback, `false` if the token had
    /// already been released.
    pub fn release(&mut self) -> bool {
        match self.release.take() {
            Some(release) => {
                release();
                true
            }
            None => {
                tracing::debug!("Completion token already released, ignoring");
                false
            }
        }
    }

    /// Whether the callback has already run (or there never was one)
    pub fn is_released(&self) -> bool {
        self.release.is_none()
    }
}

impl Drop for CompletionToken {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            tracing::warn!("Completion token dropped without release, releasing now");
            release();
        }
    }
}

impl fmt::Debug for CompletionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionToken")
            .field("released", &self.is_released())
            .finish()
    }
}
