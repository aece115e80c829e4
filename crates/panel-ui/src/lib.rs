//! Board-independent core of the 480x480 RGB panel firmware.
//! Runs on ESP32-S3 and on the desktop (simulator, scenario tests).

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

extern crate alloc;

pub mod bridge;
pub mod buffer;
pub mod clock;
pub mod config;
pub mod gt911;
pub mod input;
pub mod main_loop;
pub mod mock_touch;
pub mod panel;
pub mod test_display;
pub mod ui;

/// Panel width in pixels
pub const DISPLAY_WIDTH: u16 = 480;
/// Panel height in pixels
pub const DISPLAY_HEIGHT: u16 = 480;

/// Crate version shown on the home screen and in the boot banner
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
