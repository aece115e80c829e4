//! Init bus abstraction
//!
//! The ST7701S configuration port is a 3-wire serial bus: CS, SCK and SDA.
//! Each word is 9 bits: a D/C bit (0 = command, 1 = parameter) followed by
//! the byte MSB first. SCK idles low and the controller samples SDA on the
//! rising edge.
//!
//! [`Interface`] bit-bangs that protocol over three embedded-hal output pins.
//! Boards that route the bus through an IO expander can implement
//! [`DisplayInterface`] themselves.

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;

/// Trait for the configuration bus of the controller
pub trait DisplayInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Send a command byte (D/C bit = 0)
    ///
    /// # Errors
    ///
    /// Returns an error if a pin cannot be driven.
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send parameter bytes (D/C bit = 1 for each)
    ///
    /// # Errors
    ///
    /// Returns an error if a pin cannot be driven.
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// Errors that can occur at the interface level
#[derive(Debug)]
pub enum InterfaceError<PinErr> {
    /// GPIO pin error
    Pin(PinErr),
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterfaceError::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// Bit-banged 3-wire 9-bit interface
///
/// ## Type Parameters
///
/// * `CS` - chip select, active low
/// * `SCK` - serial clock
/// * `SDA` - serial data (write only)
pub struct Interface<CS, SCK, SDA> {
    cs: CS,
    sck: SCK,
    sda: SDA,
}

impl<CS, SCK, SDA, PinErr> Interface<CS, SCK, SDA>
where
    CS: OutputPin<Error = PinErr>,
    SCK: OutputPin<Error = PinErr>,
    SDA: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    /// Create a new Interface
    ///
    /// Pins are not touched until the first transfer; call [`Self::idle`] to
    /// park the bus (CS high, SCK low) before any other code runs.
    pub fn new(cs: CS, sck: SCK, sda: SDA) -> Self {
        Self { cs, sck, sda }
    }

    /// Drive the bus to its idle levels
    pub fn idle(&mut self) -> Result<(), InterfaceError<PinErr>> {
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        self.sck.set_low().map_err(InterfaceError::Pin)?;
        Ok(())
    }

    /// Release the pins
    pub fn release(self) -> (CS, SCK, SDA) {
        (self.cs, self.sck, self.sda)
    }

    fn write_bit(&mut self, bit: bool) -> Result<(), InterfaceError<PinErr>> {
        if bit {
            self.sda.set_high().map_err(InterfaceError::Pin)?;
        } else {
            self.sda.set_low().map_err(InterfaceError::Pin)?;
        }
        self.sck.set_high().map_err(InterfaceError::Pin)?;
        self.sck.set_low().map_err(InterfaceError::Pin)?;
        Ok(())
    }

    fn write_word(&mut self, is_data: bool, byte: u8) -> Result<(), InterfaceError<PinErr>> {
        self.write_bit(is_data)?;
        for shift in (0..8).rev() {
            self.write_bit((byte >> shift) & 0x01 != 0)?;
        }
        Ok(())
    }

    fn transfer(&mut self, is_data: bool, bytes: &[u8]) -> Result<(), InterfaceError<PinErr>> {
        self.sck.set_low().map_err(InterfaceError::Pin)?;
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        let result = bytes
            .iter()
            .try_for_each(|&byte| self.write_word(is_data, byte));
        // Release CS even when a bit failed so the next transfer starts clean
        let released = self.cs.set_high().map_err(InterfaceError::Pin);
        result.and(released)
    }
}

impl<CS, SCK, SDA, PinErr> DisplayInterface for Interface<CS, SCK, SDA>
where
    CS: OutputPin<Error = PinErr>,
    SCK: OutputPin<Error = PinErr>,
    SDA: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.transfer(false, &[command])
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }
        self.transfer(true, data)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Debug, PartialEq)]
    pub enum Line {
        Cs,
        Sck,
        Sda,
    }

    /// Shared record of pin transitions
    #[derive(Default)]
    pub struct Bus {
        pub cs: bool,
        pub sck: bool,
        pub sda: bool,
        /// Decoded 9-bit words: (is_data, byte)
        pub words: Vec<(bool, u8)>,
        bits: Vec<bool>,
    }

    impl Bus {
        fn drive(&mut self, line: Line, high: bool) {
            match line {
                Line::Cs => {
                    self.cs = high;
                    if high {
                        self.bits.clear();
                    }
                }
                Line::Sda => self.sda = high,
                Line::Sck => {
                    let rising = !self.sck && high;
                    self.sck = high;
                    if rising && !self.cs {
                        self.bits.push(self.sda);
                        if self.bits.len() == 9 {
                            let byte = self.bits[1..]
                                .iter()
                                .fold(0u8, |acc, &b| (acc << 1) | b as u8);
                            self.words.push((self.bits[0], byte));
                            self.bits.clear();
                        }
                    }
                }
            }
        }
    }

    pub struct MockPin {
        line: Line,
        bus: Rc<RefCell<Bus>>,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.bus.borrow_mut().drive(self.line, false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.bus.borrow_mut().drive(self.line, true);
            Ok(())
        }
    }

    pub fn mock_interface() -> (Interface<MockPin, MockPin, MockPin>, Rc<RefCell<Bus>>) {
        let bus = Rc::new(RefCell::new(Bus {
            cs: true,
            ..Bus::default()
        }));
        let pin = |line| MockPin {
            line,
            bus: bus.clone(),
        };
        (
            Interface::new(pin(Line::Cs), pin(Line::Sck), pin(Line::Sda)),
            bus,
        )
    }

    #[test]
    fn command_is_sent_as_nine_bit_word_with_dc_low() {
        let (mut interface, bus) = mock_interface();
        interface.send_command(0x11).unwrap();
        assert_eq!(bus.borrow().words, vec![(false, 0x11)]);
        assert!(bus.borrow().cs, "CS must be released after the transfer");
    }

    #[test]
    fn data_bytes_carry_dc_high() {
        let (mut interface, bus) = mock_interface();
        interface.send_command(0xFF).unwrap();
        interface.send_data(&[0x77, 0x01, 0x80]).unwrap();
        assert_eq!(
            bus.borrow().words,
            vec![(false, 0xFF), (true, 0x77), (true, 0x01), (true, 0x80)]
        );
    }

    #[test]
    fn empty_data_does_not_toggle_the_bus() {
        let (mut interface, bus) = mock_interface();
        interface.send_data(&[]).unwrap();
        assert!(bus.borrow().words.is_empty());
    }

    #[test]
    fn idle_parks_clock_low_and_cs_high() {
        let (mut interface, bus) = mock_interface();
        interface.idle().unwrap();
        let bus = bus.borrow();
        assert!(bus.cs);
        assert!(!bus.sck);
    }
}
