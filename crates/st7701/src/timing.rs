//! RGB bus timing and pin mapping
//!
//! Pure data consumed by the host's LCD peripheral driver. The controller
//! itself never sees these values; they describe how the host must clock
//! pixels into it.

/// Idle level of a sync signal between pulses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Polarity {
    /// Signal idles low, pulses high
    IdleLow,
    /// Signal idles high, pulses low
    #[default]
    IdleHigh,
}

impl Polarity {
    /// Decode the 0/1 polarity flag used in panel datasheets and vendor tables
    /// (`0` = idle low, anything else = idle high)
    pub const fn from_flag(flag: u8) -> Self {
        if flag == 0 {
            Polarity::IdleLow
        } else {
            Polarity::IdleHigh
        }
    }

    pub const fn idles_low(self) -> bool {
        matches!(self, Polarity::IdleLow)
    }
}

/// Porch and pulse widths of one sync axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncTiming {
    pub polarity: Polarity,
    pub front_porch: u16,
    pub pulse_width: u16,
    pub back_porch: u16,
}

impl SyncTiming {
    pub const fn new(polarity: Polarity, front_porch: u16, pulse_width: u16, back_porch: u16) -> Self {
        Self {
            polarity,
            front_porch,
            pulse_width,
            back_porch,
        }
    }

    /// Blanking period in clocks (horizontal) or lines (vertical)
    pub const fn blanking(&self) -> u32 {
        self.front_porch as u32 + self.pulse_width as u32 + self.back_porch as u32
    }

    /// Total period including `active` visible clocks or lines
    pub const fn total(&self, active: u16) -> u32 {
        active as u32 + self.blanking()
    }
}

/// Complete RGB bus timing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelTiming {
    /// Pixel clock frequency
    pub pclk_hz: u32,
    pub hsync: SyncTiming,
    pub vsync: SyncTiming,
    /// Sample data on the falling PCLK edge
    pub pclk_active_neg: bool,
    /// DE idles high
    pub de_idle_high: bool,
}

impl PanelTiming {
    /// Refresh rate that results from this timing at the given resolution
    pub fn frame_rate_hz(&self, width: u16, height: u16) -> u32 {
        let clocks_per_frame = self.hsync.total(width) * self.vsync.total(height);
        if clocks_per_frame == 0 {
            return 0;
        }
        self.pclk_hz / clocks_per_frame
    }
}

/// GPIO numbers of the RGB bus
///
/// `-1` marks an unconnected signal, following the ESP-IDF convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RgbPins {
    pub de: i32,
    pub vsync: i32,
    pub hsync: i32,
    pub pclk: i32,
    /// R0..R4
    pub red: [i32; 5],
    /// G0..G5
    pub green: [i32; 6],
    /// B0..B4
    pub blue: [i32; 5],
}

impl RgbPins {
    /// Data lines in RGB565 bus order: D0..D4 = B0..B4, D5..D10 = G0..G5,
    /// D11..D15 = R0..R4
    pub fn data_pins(&self) -> [i32; 16] {
        let mut pins = [-1; 16];
        pins[..5].copy_from_slice(&self.blue);
        pins[5..11].copy_from_slice(&self.green);
        pins[11..].copy_from_slice(&self.red);
        pins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_timing() -> PanelTiming {
        PanelTiming {
            pclk_hz: 12_000_000,
            hsync: SyncTiming::new(Polarity::from_flag(1), 10, 8, 50),
            vsync: SyncTiming::new(Polarity::from_flag(1), 10, 8, 20),
            pclk_active_neg: false,
            de_idle_high: false,
        }
    }

    #[test]
    fn polarity_flag_decoding() {
        assert_eq!(Polarity::from_flag(0), Polarity::IdleLow);
        assert_eq!(Polarity::from_flag(1), Polarity::IdleHigh);
        assert!(!Polarity::from_flag(1).idles_low());
    }

    #[test]
    fn totals_include_blanking() {
        let timing = board_timing();
        assert_eq!(timing.hsync.total(480), 548);
        assert_eq!(timing.vsync.total(480), 518);
        assert_eq!(timing.frame_rate_hz(480, 480), 42);
    }

    #[test]
    fn data_pins_are_bgr_ordered() {
        let pins = RgbPins {
            de: 2,
            vsync: 42,
            hsync: 3,
            pclk: 45,
            red: [4, 41, 5, 40, 6],
            green: [39, 7, 47, 8, 48, 9],
            blue: [11, 15, 12, 16, 21],
        };
        assert_eq!(
            pins.data_pins(),
            [11, 15, 12, 16, 21, 39, 7, 47, 8, 48, 9, 4, 41, 5, 40, 6]
        );
    }
}
