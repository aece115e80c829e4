// ST7701S command definitions

// System function commands (any page)
pub const SOFT_RESET: u8 = 0x01; // Software reset
pub const SLEEP_IN: u8 = 0x10; // Enter sleep mode
pub const SLEEP_OUT: u8 = 0x11; // Exit sleep mode
pub const INVERSION_OFF: u8 = 0x20; // Display inversion off
pub const INVERSION_ON: u8 = 0x21; // Display inversion on
pub const DISPLAY_OFF: u8 = 0x28; // Display off
pub const DISPLAY_ON: u8 = 0x29; // Display on
pub const MADCTL: u8 = 0x36; // Memory data access control (scan direction, BGR)
pub const COLMOD: u8 = 0x3A; // Interface pixel format

// Command2 page select: 0x77 0x01 0x00 0x00 <page>
pub const CMD2_PAGE_SELECT: u8 = 0xFF;
pub const CMD2_PAGE_NONE: u8 = 0x00; // Back to Command1 (system) page
pub const CMD2_PAGE_BK0: u8 = 0x10; // Display control page
pub const CMD2_PAGE_BK1: u8 = 0x11; // Power control page
pub const CMD2_PAGE_BK3: u8 = 0x13; // Undocumented vendor page

// Pixel formats for COLMOD on the RGB interface
pub const COLMOD_RGB565: u8 = 0x50;
pub const COLMOD_RGB666: u8 = 0x60;
pub const COLMOD_RGB888: u8 = 0x70;

// MADCTL bits
pub const MADCTL_BGR: u8 = 0x08;
pub const MADCTL_ML: u8 = 0x10; // Reverse gate scan

// Delays required by the datasheet
pub const RESET_DELAY_MS: u32 = 120;
pub const SLEEP_OUT_DELAY_MS: u32 = 120;
pub const DISPLAY_ON_DELAY_MS: u32 = 20;
