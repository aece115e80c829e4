//! Home screen: greeting label and touch read-out.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};

use super::area::Area;
use super::label::Label;
use crate::input::TouchSample;

const LABEL_HEIGHT: u32 = 40;
const READOUT_BOTTOM_MARGIN: i32 = 60;

pub const BACKGROUND: Rgb565 = Rgb565::BLACK;
pub const FOREGROUND: Rgb565 = Rgb565::WHITE;
pub const READOUT_HINT: &str = "Touch the screen";

/// Greeting shown in the middle of the screen
pub fn greeting() -> String {
    format!("Hello ESP32, I'm panel-ui!(V{})", crate::VERSION)
}

/// Text of the touch read-out for a pressed sample
pub fn readout_text(sample: &TouchSample) -> String {
    format!("x={} y={}", sample.x, sample.y)
}

pub struct HomeScreen {
    size: Size,
    greeting: Label,
    readout: Label,
}

impl HomeScreen {
    pub fn new(width: u16, height: u16) -> Self {
        let size = Size::new(u32::from(width), u32::from(height));
        let centre_y = i32::from(height) / 2 - LABEL_HEIGHT as i32 / 2;
        let readout_y = (i32::from(height) - READOUT_BOTTOM_MARGIN).max(0);

        Self {
            size,
            greeting: Label::new(
                &greeting(),
                Rectangle::new(Point::new(0, centre_y), Size::new(size.width, LABEL_HEIGHT)),
                FOREGROUND,
            ),
            readout: Label::new(
                READOUT_HINT,
                Rectangle::new(Point::new(0, readout_y), Size::new(size.width, LABEL_HEIGHT)),
                FOREGROUND,
            ),
        }
    }

    pub fn greeting_label(&self) -> &Label {
        &self.greeting
    }

    pub fn readout_label(&self) -> &Label {
        &self.readout
    }

    /// Apply an input sample; returns the area that needs repainting
    pub fn on_touch(&mut self, sample: &TouchSample) -> Option<Area> {
        if !sample.is_pressed() {
            return None;
        }
        if self.readout.set_text(&readout_text(sample)) {
            self.readout.area()
        } else {
            None
        }
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        Rectangle::new(Point::zero(), self.size)
            .into_styled(PrimitiveStyle::with_fill(BACKGROUND))
            .draw(display)?;
        self.greeting.draw(display)?;
        self.readout.draw(display)
    }
}
