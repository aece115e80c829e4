//! Error types for the driver
//!
//! - [`BuilderError`] - errors while building a [`Config`](crate::config::Config)
//! - [`Error`] - runtime errors from [`Display`](crate::display::Display) operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - pin level errors on the init bus
//!
//! ## Example
//!
//! ```
//! use st7701::{Builder, BuilderError, Dimensions};
//!
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! assert!(Dimensions::new(481, 480).is_err());
//! ```

use crate::interface::DisplayInterface;

/// Maximum source outputs (columns) supported by the ST7701S
pub const MAX_SOURCE_OUTPUTS: u16 = 480;

/// Maximum display lines (rows) supported by the ST7701S
pub const MAX_LINES: u16 = 864;

/// Errors that can occur when talking to the controller
///
/// Generic over the interface so callers can match on the underlying pin error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Init bus error (GPIO)
    Interface(I::Error),
    /// An init table entry carried more parameter bytes than the controller accepts
    InitOperationTooLong {
        /// Command the parameters belong to
        command: u8,
        /// Number of parameter bytes supplied
        len: usize,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "Interface error: {e:?}"),
            Error::InitOperationTooLong { command, len } => {
                write!(f, "Init operation 0x{command:02X} has {len} parameter bytes")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) was never called
    MissingDimensions,
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints
    InvalidDimensions {
        /// Requested width in pixels
        width: u16,
        /// Requested height in pixels
        height: u16,
    },
    /// Pixel clock of zero
    InvalidPixelClock,
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::MissingDimensions => write!(f, "Dimensions must be specified"),
            BuilderError::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_SOURCE_OUTPUTS}x{MAX_LINES})"
            ),
            BuilderError::InvalidPixelClock => write!(f, "Pixel clock must be non-zero"),
        }
    }
}

impl core::error::Error for BuilderError {}
