//! Content container abstraction
//!
//! The content container is the view group that hosts the embedded content
//! view. During embedded video fullscreen the playback surface handed out by
//! the content engine is inserted here, next to the (hidden) content view.

use crate::error::Result;
use crate::window::Argb;

/// Content container capability
///
/// All methods must be called from the UI-affinity context.
pub trait ContentContainer {
    /// Opaque handle to an externally rendered playback surface
    type Surface: Send + 'static;

    /// Set the container's top padding, keeping the other edges unchanged
    fn set_top_padding(&self, px: i32) -> Result<()>;

    /// Set the container's background color
    fn set_background_color(&self, color: Argb) -> Result<()>;

    /// Insert a playback surface into the container
    fn add_surface(&self, surface: &Self::Surface) -> Result<()>;

    /// Remove a previously inserted playback surface
    fn remove_surface(&self, surface: &Self::Surface) -> Result<()>;

    /// Show or hide the normal content view without detaching it
    fn set_content_visible(&self, visible: bool) -> Result<()>;
}
