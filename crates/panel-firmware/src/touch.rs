//! GT911 on I2C0 (SDA 17, SCL 18).

use esp_idf_svc::hal::gpio::{InputPin, OutputPin};
use esp_idf_svc::hal::i2c::{I2c, I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::EspError;

use panel_ui::gt911::Gt911;

const TOUCH_I2C_HZ: u32 = 400_000;

pub type BoardTouch = Gt911<I2cDriver<'static>>;

pub fn board_touch<I2C: I2c>(
    i2c: impl Peripheral<P = I2C> + 'static,
    sda: impl Peripheral<P = impl InputPin + OutputPin> + 'static,
    scl: impl Peripheral<P = impl InputPin + OutputPin> + 'static,
) -> Result<BoardTouch, EspError> {
    let config = I2cConfig::new().baudrate(Hertz(TOUCH_I2C_HZ));
    let driver = I2cDriver::new(i2c, sda, scl, &config)?;
    Ok(Gt911::new(driver))
}
