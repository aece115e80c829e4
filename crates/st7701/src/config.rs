//! Display configuration types and builder

use crate::command::{COLMOD_RGB565, MADCTL_BGR};
pub use crate::error::{BuilderError, MAX_LINES, MAX_SOURCE_OUTPUTS};
use crate::init::{InitOp, TYPE5_INIT_OPERATIONS};
use crate::timing::{PanelTiming, Polarity, SyncTiming};

/// Display dimensions in native orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Visible pixels per line (source outputs)
    pub width: u16,
    /// Visible lines
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either side is zero,
    /// `width > MAX_SOURCE_OUTPUTS` or `height > MAX_LINES`.
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_SOURCE_OUTPUTS || height == 0 || height > MAX_LINES {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of pixels in one full frame
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Display rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate 90 degrees clockwise
    Rotate90,
    /// Rotate 180 degrees
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

impl Rotation {
    /// Whether width and height swap under this rotation
    pub fn is_transposed(self) -> bool {
        matches!(self, Rotation::Rotate90 | Rotation::Rotate270)
    }
}

/// Display configuration
///
/// Use [`Builder`] to create one.
#[derive(Clone, Debug)]
pub struct Config {
    /// Native dimensions
    pub dimensions: Dimensions,
    /// Rotation reported to the UI and the touch mapping
    pub rotation: Rotation,
    /// Vendor init table sent after software reset
    pub init_operations: &'static [InitOp],
    /// RGB bus timing for the host LCD peripheral
    pub timing: PanelTiming,
    /// MADCTL byte sent after the init table
    pub madctl: u8,
    /// COLMOD byte sent after the init table
    pub colmod: u8,
    /// Enable display inversion
    pub invert_colors: bool,
}

impl Config {
    /// Get the rotated dimensions based on rotation setting
    pub fn rotated_dimensions(&self) -> Dimensions {
        if self.rotation.is_transposed() {
            Dimensions {
                width: self.dimensions.height,
                height: self.dimensions.width,
            }
        } else {
            self.dimensions
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use st7701::{Builder, Dimensions, Rotation};
///
/// let config = Builder::new()
///     .dimensions(Dimensions::new(480, 480).unwrap())
///     .rotation(Rotation::Rotate0)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.timing.pclk_hz, 12_000_000);
/// ```
pub struct Builder {
    dimensions: Option<Dimensions>,
    rotation: Rotation,
    init_operations: &'static [InitOp],
    timing: PanelTiming,
    madctl: u8,
    colmod: u8,
    invert_colors: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            dimensions: None,
            rotation: Rotation::Rotate0,
            init_operations: TYPE5_INIT_OPERATIONS,
            timing: PanelTiming {
                pclk_hz: 12_000_000,
                hsync: SyncTiming::new(Polarity::IdleHigh, 10, 8, 50),
                vsync: SyncTiming::new(Polarity::IdleHigh, 10, 8, 20),
                pclk_active_neg: false,
                de_idle_high: false,
            },
            // Panel glass is wired BGR
            madctl: MADCTL_BGR,
            colmod: COLMOD_RGB565,
            invert_colors: false,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replace the vendor init table
    pub fn init_operations(mut self, operations: &'static [InitOp]) -> Self {
        self.init_operations = operations;
        self
    }

    /// Set RGB bus timing
    pub fn timing(mut self, timing: PanelTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Set memory access control byte
    pub fn madctl(mut self, value: u8) -> Self {
        self.madctl = value;
        self
    }

    /// Set pixel format byte
    pub fn colmod(mut self, value: u8) -> Self {
        self.colmod = value;
        self
    }

    /// Enable or disable display inversion
    pub fn invert_colors(mut self, invert: bool) -> Self {
        self.invert_colors = invert;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set and
    /// `BuilderError::InvalidPixelClock` for a zero pixel clock.
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.timing.pclk_hz == 0 {
            return Err(BuilderError::InvalidPixelClock);
        }
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            rotation: self.rotation,
            init_operations: self.init_operations,
            timing: self.timing,
            madctl: self.madctl,
            colmod: self.colmod,
            invert_colors: self.invert_colors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_are_validated() {
        assert!(Dimensions::new(480, 480).is_ok());
        assert_eq!(
            Dimensions::new(0, 480),
            Err(BuilderError::InvalidDimensions {
                width: 0,
                height: 480
            })
        );
        assert!(Dimensions::new(480, 865).is_err());
    }

    #[test]
    fn rotated_dimensions_swap_for_quarter_turns() {
        let config = Builder::new()
            .dimensions(Dimensions::new(480, 320).unwrap())
            .rotation(Rotation::Rotate90)
            .build()
            .unwrap();
        assert_eq!(config.rotated_dimensions(), Dimensions::new(320, 480).unwrap());
    }

    #[test]
    fn zero_pixel_clock_is_rejected() {
        let mut timing = Builder::new().timing;
        timing.pclk_hz = 0;
        let result = Builder::new()
            .dimensions(Dimensions::new(480, 480).unwrap())
            .timing(timing)
            .build();
        assert!(matches!(result, Err(BuilderError::InvalidPixelClock)));
    }

    #[test]
    fn default_timing_matches_vendor_flags() {
        let timing = Builder::new().timing;
        assert_eq!(timing.hsync.polarity, Polarity::from_flag(1));
        assert_eq!(timing.vsync.polarity, Polarity::from_flag(1));
        assert_eq!(timing.hsync, SyncTiming::new(Polarity::from_flag(1), 10, 8, 50));
        assert!(!timing.pclk_active_neg);
    }
}
