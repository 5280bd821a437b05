//! Native window chrome: system bars, window flags, and orientation

use bitflags::bitflags;

use crate::error::Result;

/// ARGB color used for the status bar background
pub type Argb = u32;

bitflags! {
    /// System UI visibility flags applied to the window's decor view
    ///
    /// Bit values match `android.view.View.SYSTEM_UI_FLAG_*`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SystemUiVisibility: u32 {
        const VISIBLE = 0;
        const LOW_PROFILE = 0x0000_0001;
        const HIDE_NAVIGATION = 0x0000_0002;
        const FULLSCREEN = 0x0000_0004;
        const LAYOUT_STABLE = 0x0000_0100;
        const LAYOUT_HIDE_NAVIGATION = 0x0000_0200;
        const LAYOUT_FULLSCREEN = 0x0000_0400;
        const IMMERSIVE = 0x0000_0800;
        const IMMERSIVE_STICKY = 0x0000_1000;
        const LIGHT_STATUS_BAR = 0x0000_2000;

        /// Hide both bars, re-hide after a swipe, and lay content out under them
        const IMMERSIVE_CHROME = Self::IMMERSIVE_STICKY.bits()
            | Self::FULLSCREEN.bits()
            | Self::HIDE_NAVIGATION.bits()
            | Self::LAYOUT_STABLE.bits()
            | Self::LAYOUT_HIDE_NAVIGATION.bits()
            | Self::LAYOUT_FULLSCREEN.bits();
    }
}

bitflags! {
    /// Window layout flags
    ///
    /// Bit values match `android.view.WindowManager.LayoutParams.FLAG_*`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct WindowFlags: u32 {
        const LAYOUT_NO_LIMITS = 0x0000_0200;
        const FULLSCREEN = 0x0000_0400;
    }
}

/// Requested screen orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Platform default, rotation unlocked
    #[default]
    Unspecified,
    /// Either landscape rotation, chosen by the sensor
    SensorLandscape,
}

impl Orientation {
    /// Value of the matching `ActivityInfo.SCREEN_ORIENTATION_*` constant
    pub fn to_android(self) -> i32 {
        match self {
            Orientation::Unspecified => -1,
            Orientation::SensorLandscape => 6,
        }
    }
}

/// Native chrome capability
///
/// Implemented by platform backends on top of the host window. All methods
/// must be called from the UI-affinity context.
pub trait SystemChrome {
    /// Set the status bar background color
    fn set_status_bar_color(&self, color: Argb) -> Result<()>;

    /// Set window flags, only touching the bits in `mask`
    ///
    /// Passing an empty `flags` with a non-empty `mask` clears those bits.
    fn set_window_flags(&self, flags: WindowFlags, mask: WindowFlags) -> Result<()>;

    /// Read the current system UI visibility flags
    fn system_ui_visibility(&self) -> Result<SystemUiVisibility>;

    /// Replace the system UI visibility flags
    fn set_system_ui_visibility(&self, flags: SystemUiVisibility) -> Result<()>;

    /// Request a screen orientation
    fn set_requested_orientation(&self, orientation: Orientation) -> Result<()>;

    /// Run the host's default back action (usually finishing or backgrounding the app)
    fn default_back(&self) -> Result<()>;
}
