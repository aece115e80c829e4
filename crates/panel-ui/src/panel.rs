//! Panel driver wrapper for the 480x480 RGB board
//!
//! Provides the display interface the bridge and main loop talk to. This
//! keeps the firmware decoupled from specific driver implementations.

use embedded_graphics::pixelcolor::Rgb565;

/// Display operations the UI side needs from a panel
///
/// Implemented by the esp_lcd RGB panel on target, by the SDL simulator and
/// by [`TestPanel`](crate::test_display::TestPanel).
pub trait PanelDriver {
    type Error: core::fmt::Debug;

    /// Bring the panel up. Callers log a failure and keep running.
    fn begin(&mut self) -> Result<(), Self::Error>;

    fn width(&self) -> u16;

    fn height(&self) -> u16;

    fn rotation(&self) -> Rotation;

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), Self::Error>;

    /// Copy a `w x h` block of RGB565 pixels to `(x, y)`
    fn blit(&mut self, x: u16, y: u16, pixels: &[u16], w: u16, h: u16) -> Result<(), Self::Error>;

    /// Make a complete frame visible
    ///
    /// When `frame` is the panel's own mapped framebuffer this only has to
    /// publish it to the scan-out DMA.
    fn push_full_frame(&mut self, frame: &[u16]) -> Result<(), Self::Error>;
}

/// Panel controller handle
pub type PanelDisplay<Interface> = st7701::Display<Interface>;

/// Panel init bus handle
pub type PanelInterface<CS, SCK, SDA> = st7701::Interface<CS, SCK, SDA>;

/// Display configuration builder
pub use st7701::Builder;

/// Display dimensions
pub use st7701::Dimensions;

/// Display interface trait
pub use st7701::DisplayInterface;
/// Display rotation
pub use st7701::Rotation;
/// RGB bus description
pub use st7701::{PanelTiming, Polarity, RgbPins, SyncTiming};

/// Full-frame RGB565 storage
pub use st7701::Framebuffer;

/// Re-export st7701 errors
pub use st7701::Error as PanelError;

/// Re-export the driver crate (only for advanced usage)
pub use st7701;
