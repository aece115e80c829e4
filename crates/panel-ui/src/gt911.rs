//! GT911 capacitive touch controller over I2C.
//!
//! Registers are addressed with 16-bit big-endian offsets. One poll reads the
//! status byte; when the buffer-ready bit is set it reads the first point and
//! acknowledges by writing zero back to the status register.

use embedded_hal::i2c::I2c;
use log::{debug, info};

use crate::input::TouchController;
use crate::panel::Rotation;

/// Default 7-bit address (INT held low during reset)
pub const GT911_ADDRESS: u8 = 0x5D;
/// Alternate address (INT held high during reset)
pub const GT911_ADDRESS_ALT: u8 = 0x14;

const REG_PRODUCT_ID: u16 = 0x8140;
const REG_STATUS: u16 = 0x814E;
const REG_POINT1: u16 = 0x8150;

const STATUS_READY: u8 = 0x80;
const STATUS_COUNT_MASK: u8 = 0x0F;

/// GT911 errors
#[derive(Debug)]
pub enum Gt911Error<E> {
    /// I2C bus error
    I2c(E),
    /// Screen size of zero
    InvalidSize,
}

impl<E: core::fmt::Debug> core::fmt::Display for Gt911Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Gt911Error::I2c(e) => write!(f, "I2C error: {e:?}"),
            Gt911Error::InvalidSize => write!(f, "touch screen size must be non-zero"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Gt911Error<E> {}

/// What the last poll learned about the contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contact {
    Down,
    Up,
    /// Status answered but the point could not be read
    Unknown,
}

pub struct Gt911<I2C> {
    i2c: I2C,
    address: u8,
    width: u16,
    height: u16,
    rotation: Rotation,
    contact: Contact,
    point: (u16, u16),
}

impl<I2C: I2c> Gt911<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, GT911_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            width: 0,
            height: 0,
            rotation: Rotation::Rotate0,
            contact: Contact::Up,
            point: (0, 0),
        }
    }

    /// Four ASCII product id bytes, `b"911\0"` on a genuine part
    pub fn product_id(&mut self) -> Result<[u8; 4], Gt911Error<I2C::Error>> {
        let mut id = [0u8; 4];
        self.read_register(REG_PRODUCT_ID, &mut id)?;
        Ok(id)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_register(&mut self, reg: u16, buf: &mut [u8]) -> Result<(), Gt911Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &reg.to_be_bytes(), buf)
            .map_err(Gt911Error::I2c)
    }

    fn write_register(&mut self, reg: u16, value: u8) -> Result<(), Gt911Error<I2C::Error>> {
        let [hi, lo] = reg.to_be_bytes();
        self.i2c
            .write(self.address, &[hi, lo, value])
            .map_err(Gt911Error::I2c)
    }

    fn read_point(&mut self) -> Result<(u16, u16), Gt911Error<I2C::Error>> {
        let mut raw = [0u8; 4];
        self.read_register(REG_POINT1, &mut raw)?;
        let x = u16::from_le_bytes([raw[0], raw[1]]);
        let y = u16::from_le_bytes([raw[2], raw[3]]);
        Ok((x, y))
    }

    /// Map a raw panel coordinate to screen space
    fn map_point(&self, raw_x: u16, raw_y: u16) -> (u16, u16) {
        let (native_w, native_h) = if self.rotation.is_transposed() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        };
        let max_x = native_w.saturating_sub(1);
        let max_y = native_h.saturating_sub(1);
        let x = raw_x.min(max_x);
        let y = raw_y.min(max_y);
        let (sx, sy) = match self.rotation {
            Rotation::Rotate0 => (x, y),
            Rotation::Rotate90 => (max_y - y, x),
            Rotation::Rotate180 => (max_x - x, max_y - y),
            Rotation::Rotate270 => (y, max_x - x),
        };
        (
            sx.min(self.width.saturating_sub(1)),
            sy.min(self.height.saturating_sub(1)),
        )
    }
}

impl<I2C: I2c> TouchController for Gt911<I2C> {
    type Error = Gt911Error<I2C::Error>;

    fn init(&mut self, width: u16, height: u16, rotation: Rotation) -> Result<(), Self::Error> {
        if width == 0 || height == 0 {
            return Err(Gt911Error::InvalidSize);
        }
        self.width = width;
        self.height = height;
        self.rotation = rotation;

        let id = self.product_id()?;
        info!(
            "GT911 product id {:?}, mapping to {}x{} {:?}",
            core::str::from_utf8(&id[..3]).unwrap_or("???"),
            width,
            height,
            rotation
        );
        self.write_register(REG_STATUS, 0)
    }

    fn has_signal(&mut self) -> bool {
        let mut status = [0u8; 1];
        if self.read_register(REG_STATUS, &mut status).is_err() {
            return false;
        }
        let status = status[0];
        if status & STATUS_READY == 0 {
            // No new frame yet; keep the previous contact state
            return true;
        }

        self.contact = if status & STATUS_COUNT_MASK == 0 {
            Contact::Up
        } else {
            match self.read_point() {
                Ok((x, y)) => {
                    self.point = self.map_point(x, y);
                    Contact::Down
                }
                Err(_) => Contact::Unknown,
            }
        };

        if let Err(e) = self.write_register(REG_STATUS, 0) {
            debug!("GT911 status clear failed: {}", e);
        }
        true
    }

    fn touched(&mut self) -> bool {
        self.contact == Contact::Down
    }

    fn released(&mut self) -> bool {
        self.contact == Contact::Up
    }

    fn last_point(&self) -> (u16, u16) {
        self.point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    use std::collections::BTreeMap;

    #[derive(Debug)]
    struct BusError;

    impl embedded_hal::i2c::Error for BusError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Register file behind a 16-bit address pointer
    #[derive(Default)]
    struct MockGt911 {
        regs: BTreeMap<u16, u8>,
        pointer: u16,
        offline: bool,
        /// Fail reads of this register
        fail_read_at: Option<u16>,
        writes: Vec<(u16, u8)>,
    }

    impl MockGt911 {
        fn new() -> Self {
            let mut mock = Self::default();
            for (i, b) in b"911\0".iter().enumerate() {
                mock.regs.insert(REG_PRODUCT_ID + i as u16, *b);
            }
            mock
        }

        fn touch(&mut self, x: u16, y: u16) {
            self.regs.insert(REG_STATUS, STATUS_READY | 1);
            let [xl, xh] = x.to_le_bytes();
            let [yl, yh] = y.to_le_bytes();
            for (i, b) in [xl, xh, yl, yh].into_iter().enumerate() {
                self.regs.insert(REG_POINT1 + i as u16, b);
            }
        }

        fn lift(&mut self) {
            self.regs.insert(REG_STATUS, STATUS_READY);
        }
    }

    impl ErrorType for MockGt911 {
        type Error = BusError;
    }

    impl I2c for MockGt911 {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.offline || address != GT911_ADDRESS {
                return Err(BusError);
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        self.pointer = u16::from_be_bytes([bytes[0], bytes[1]]);
                        for (i, b) in bytes[2..].iter().enumerate() {
                            let reg = self.pointer + i as u16;
                            self.regs.insert(reg, *b);
                            self.writes.push((reg, *b));
                        }
                    }
                    Operation::Read(buf) => {
                        if self.fail_read_at == Some(self.pointer) {
                            return Err(BusError);
                        }
                        for (i, b) in buf.iter_mut().enumerate() {
                            *b = *self.regs.get(&(self.pointer + i as u16)).unwrap_or(&0);
                        }
                    }
                }
            }
            Ok(())
        }
    }

    fn started(rotation: Rotation) -> Gt911<MockGt911> {
        let mut touch = Gt911::new(MockGt911::new());
        touch.init(480, 480, rotation).unwrap();
        touch
    }

    #[test]
    fn init_reads_product_id_and_clears_status() {
        let touch = started(Rotation::Rotate0);
        let bus = touch.release();
        assert_eq!(bus.writes, vec![(REG_STATUS, 0)]);
    }

    #[test]
    fn zero_size_is_rejected() {
        let mut touch = Gt911::new(MockGt911::new());
        assert!(matches!(
            touch.init(0, 480, Rotation::Rotate0),
            Err(Gt911Error::InvalidSize)
        ));
    }

    #[test]
    fn touch_reports_point_and_acknowledges() {
        let mut touch = started(Rotation::Rotate0);
        touch.i2c.touch(120, 80);

        assert!(touch.has_signal());
        assert!(touch.touched());
        assert!(!touch.released());
        assert_eq!(touch.last_point(), (120, 80));
        assert_eq!(touch.i2c.regs[&REG_STATUS], 0);
    }

    #[test]
    fn contact_holds_until_next_ready_frame() {
        let mut touch = started(Rotation::Rotate0);
        touch.i2c.touch(10, 20);
        touch.has_signal();

        // Status was cleared; no new frame yet
        assert!(touch.has_signal());
        assert!(touch.touched());

        touch.i2c.lift();
        assert!(touch.has_signal());
        assert!(touch.released());
        assert!(!touch.touched());
    }

    #[test]
    fn missing_controller_has_no_signal() {
        let mut touch = started(Rotation::Rotate0);
        touch.i2c.offline = true;
        assert!(!touch.has_signal());
    }

    #[test]
    fn unreadable_point_is_neither_touched_nor_released() {
        let mut touch = started(Rotation::Rotate0);
        touch.i2c.touch(10, 20);
        touch.i2c.fail_read_at = Some(REG_POINT1);

        assert!(touch.has_signal());
        assert!(!touch.touched());
        assert!(!touch.released());
    }

    #[test]
    fn rotation_maps_and_clamps_points() {
        let mut touch = started(Rotation::Rotate90);
        touch.i2c.touch(10, 20);
        touch.has_signal();
        assert_eq!(touch.last_point(), (459, 10));

        let mut touch = started(Rotation::Rotate180);
        touch.i2c.touch(10, 20);
        touch.has_signal();
        assert_eq!(touch.last_point(), (469, 459));

        let mut touch = started(Rotation::Rotate270);
        touch.i2c.touch(10, 20);
        touch.has_signal();
        assert_eq!(touch.last_point(), (20, 469));

        let mut touch = started(Rotation::Rotate0);
        touch.i2c.touch(900, 700);
        touch.has_signal();
        assert_eq!(touch.last_point(), (479, 479));
    }
}
