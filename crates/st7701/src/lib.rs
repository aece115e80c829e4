//! Driver for the ST7701S RGB panel controller.
//!
//! The ST7701S receives pixels over a parallel RGB bus (DE/VSYNC/HSYNC/PCLK
//! plus 16 data lines) driven by the host's LCD peripheral. Before that bus
//! carries anything visible, the controller must be configured over a
//! separate 3-wire serial bus (CS, SCK, SDA, 9-bit words, no DC line).
//!
//! This crate covers the parts a host needs on its side:
//!
//! - [`Interface`] bit-bangs the 3-wire bus over embedded-hal output pins
//! - [`Display`] runs the reset / init-table / sleep-out / display-on sequence
//! - [`PanelTiming`] and [`RgbPins`] describe the RGB bus (pure data)
//! - [`Framebuffer`] is an RGB565 frame with rectangle blits (`graphics`
//!   feature adds an embedded-graphics `DrawTarget`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use st7701::{Builder, Dimensions, Display, Interface};
//!
//! let config = Builder::new()
//!     .dimensions(Dimensions::new(480, 480)?)
//!     .build()?;
//! let mut display = Display::new(Interface::new(cs, sck, sda), config);
//! display.begin(&mut delay)?;
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod init;
pub mod interface;
pub mod timing;

pub use config::{Builder, Config, Dimensions, Rotation};
pub use display::Display;
pub use error::{BuilderError, Error, MAX_LINES, MAX_SOURCE_OUTPUTS};
pub use framebuffer::Framebuffer;
pub use init::{InitOp, TYPE5_INIT_OPERATIONS};
pub use interface::{DisplayInterface, Interface, InterfaceError};
pub use timing::{PanelTiming, Polarity, RgbPins, SyncTiming};
