//! Core display operations

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::command::*;
use crate::config::{Config, Dimensions, Rotation};
use crate::error::Error;
use crate::init::{InitOp, MAX_PARAMETERS};
use crate::interface::DisplayInterface;

/// Core display driver for ST7701S
///
/// Owns the configuration bus only. Pixels travel over the RGB bus, which the
/// host LCD peripheral drives using [`Config::timing`].
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Whether the controller is out of sleep with output enabled
    is_display_on: bool,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            is_display_on: false,
        }
    }

    /// Software reset, vendor init table, pixel format, sleep out, display on
    ///
    /// The board has no reset line, so software reset is the only way to put
    /// the controller in a known state.
    pub fn begin<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        debug!("ST7701S: software reset");
        self.send_command(SOFT_RESET)?;
        delay.delay_ms(RESET_DELAY_MS);

        debug!(
            "ST7701S: sending {} init operations",
            self.config.init_operations.len()
        );
        self.run_init_operations(delay)?;

        self.send_command(MADCTL)?;
        self.send_data(&[self.config.madctl])?;
        self.send_command(COLMOD)?;
        self.send_data(&[self.config.colmod])?;
        self.send_command(if self.config.invert_colors {
            INVERSION_ON
        } else {
            INVERSION_OFF
        })?;

        self.send_command(SLEEP_OUT)?;
        delay.delay_ms(SLEEP_OUT_DELAY_MS);
        debug!("ST7701S: sleep out, enabling display");

        self.display_on(delay)
    }

    fn run_init_operations<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        for op in self.config.init_operations {
            match *op {
                InitOp::Command(command, params) => {
                    if params.len() > MAX_PARAMETERS {
                        return Err(Error::InitOperationTooLong {
                            command,
                            len: params.len(),
                        });
                    }
                    self.send_command(command)?;
                    self.send_data(params)?;
                }
                InitOp::Delay(ms) => delay.delay_ms(u32::from(ms)),
            }
        }
        Ok(())
    }

    /// Enable panel output
    pub fn display_on<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        self.send_command(DISPLAY_ON)?;
        delay.delay_ms(DISPLAY_ON_DELAY_MS);
        self.is_display_on = true;
        Ok(())
    }

    /// Blank panel output; the RGB bus may keep running
    pub fn display_off(&mut self) -> Result<(), Error<I>> {
        self.send_command(DISPLAY_OFF)?;
        self.is_display_on = false;
        Ok(())
    }

    /// Display off then sleep in
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        if self.is_display_on {
            self.display_off()?;
        }
        self.send_command(SLEEP_IN)?;
        delay.delay_ms(SLEEP_OUT_DELAY_MS);
        Ok(())
    }

    /// Whether [`Self::begin`] or [`Self::display_on`] last enabled the output
    pub fn is_display_on(&self) -> bool {
        self.is_display_on
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> Result<(), Error<I>> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> Result<(), Error<I>> {
        self.interface.send_data(data).map_err(Error::Interface)
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Get display rotation
    pub fn rotation(&self) -> Rotation {
        self.config.rotation
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Release the interface
    pub fn release(self) -> I {
        self.interface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use core::convert::Infallible;

    #[derive(Debug, Clone, PartialEq)]
    enum Sent {
        Command(u8),
        Data(Vec<u8>),
    }

    #[derive(Debug, Default)]
    struct RecordingInterface {
        sent: Vec<Sent>,
    }

    impl DisplayInterface for RecordingInterface {
        type Error = Infallible;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            self.sent.push(Sent::Command(command));
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.sent.push(Sent::Data(data.to_vec()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_ms: u32,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += ns / 1_000_000;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += ms;
        }
    }

    fn display_with(ops: &'static [InitOp]) -> Display<RecordingInterface> {
        let config = Builder::new()
            .dimensions(Dimensions::new(480, 480).unwrap())
            .init_operations(ops)
            .build()
            .unwrap();
        Display::new(RecordingInterface::default(), config)
    }

    fn commands(display: Display<RecordingInterface>) -> Vec<u8> {
        display
            .release()
            .sent
            .into_iter()
            .filter_map(|s| match s {
                Sent::Command(c) => Some(c),
                Sent::Data(_) => None,
            })
            .collect()
    }

    #[test]
    fn begin_runs_reset_table_then_sleep_out_and_display_on() {
        static OPS: &[InitOp] = &[InitOp::Command(0xC0, &[0x3B, 0x00]), InitOp::Delay(5)];
        let mut display = display_with(OPS);
        let mut delay = CountingDelay::default();

        display.begin(&mut delay).unwrap();

        assert!(display.is_display_on());
        assert_eq!(delay.total_ms, 120 + 5 + 120 + 20);
        assert_eq!(
            commands(display),
            vec![SOFT_RESET, 0xC0, MADCTL, COLMOD, INVERSION_OFF, SLEEP_OUT, DISPLAY_ON]
        );
    }

    #[test]
    fn pixel_format_is_rgb565() {
        let mut display = display_with(&[]);
        display.begin(&mut CountingDelay::default()).unwrap();
        let sent = display.release().sent;
        let colmod_at = sent
            .iter()
            .position(|s| *s == Sent::Command(COLMOD))
            .unwrap();
        assert_eq!(sent[colmod_at + 1], Sent::Data(vec![COLMOD_RGB565]));
    }

    #[test]
    fn oversized_init_operation_is_rejected_before_sending_it() {
        static LONG: [u8; MAX_PARAMETERS + 1] = [0; MAX_PARAMETERS + 1];
        static OPS: &[InitOp] = &[InitOp::Command(0xE5, &LONG)];
        let mut display = display_with(OPS);

        let result = display.begin(&mut CountingDelay::default());

        assert!(matches!(
            result,
            Err(Error::InitOperationTooLong {
                command: 0xE5,
                len: 17
            })
        ));
        assert!(!display.is_display_on());
        assert_eq!(commands(display), vec![SOFT_RESET]);
    }

    #[test]
    fn sleep_turns_output_off_first() {
        let mut display = display_with(&[]);
        let mut delay = CountingDelay::default();
        display.begin(&mut delay).unwrap();
        display.sleep(&mut delay).unwrap();

        assert!(!display.is_display_on());
        let cmds = commands(display);
        assert_eq!(&cmds[cmds.len() - 2..], &[DISPLAY_OFF, SLEEP_IN]);
    }
}
