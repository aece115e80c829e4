use embedded_graphics::{
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::*,
    primitives::Rectangle,
};
use embedded_graphics_simulator::SimulatorDisplay;
use panel_ui::input::TouchController;
use panel_ui::panel::{PanelDriver, Rotation};

#[derive(Debug)]
pub enum SimPanelError {
    ShortBuffer { needed: usize, got: usize },
}

impl core::fmt::Display for SimPanelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SimPanelError::ShortBuffer { needed, got } => {
                write!(f, "blit needs {} pixels, got {}", needed, got)
            }
        }
    }
}

impl std::error::Error for SimPanelError {}

/// SDL framebuffer behind the panel driver interface
pub struct SimPanel {
    display: SimulatorDisplay<Rgb565>,
    width: u16,
    height: u16,
}

impl SimPanel {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            display: SimulatorDisplay::new(Size::new(u32::from(width), u32::from(height))),
            width,
            height,
        }
    }

    pub fn surface(&self) -> &SimulatorDisplay<Rgb565> {
        &self.display
    }
}

impl PanelDriver for SimPanel {
    type Error = SimPanelError;

    fn begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn rotation(&self) -> Rotation {
        Rotation::Rotate0
    }

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.display.clear(color).unwrap_or_else(|never| match never {});
        Ok(())
    }

    fn blit(&mut self, x: u16, y: u16, pixels: &[u16], w: u16, h: u16) -> Result<(), Self::Error> {
        let needed = usize::from(w) * usize::from(h);
        let Some(pixels) = pixels.get(..needed) else {
            return Err(SimPanelError::ShortBuffer {
                needed,
                got: pixels.len(),
            });
        };
        let area = Rectangle::new(
            Point::new(i32::from(x), i32::from(y)),
            Size::new(u32::from(w), u32::from(h)),
        );
        let colors = pixels.iter().map(|&raw| Rgb565::from(RawU16::new(raw)));
        self.display
            .fill_contiguous(&area, colors)
            .unwrap_or_else(|never| match never {});
        Ok(())
    }

    fn push_full_frame(&mut self, frame: &[u16]) -> Result<(), Self::Error> {
        self.blit(0, 0, frame, self.width, self.height)
    }
}

/// Left mouse button as a single-contact touch controller
#[derive(Debug, Default)]
pub struct MouseTouch {
    width: u16,
    height: u16,
    down: bool,
    point: (u16, u16),
}

impl MouseTouch {
    fn clamp(&self, point: Point) -> (u16, u16) {
        let clamp_axis = |v: i32, size: u16| {
            let max = i32::from(size.saturating_sub(1));
            u16::try_from(v.clamp(0, max)).unwrap_or(0)
        };
        (clamp_axis(point.x, self.width), clamp_axis(point.y, self.height))
    }

    pub fn press(&mut self, point: Point) {
        self.down = true;
        self.point = self.clamp(point);
    }

    pub fn drag(&mut self, point: Point) {
        if self.down {
            self.point = self.clamp(point);
        }
    }

    pub fn lift(&mut self, point: Point) {
        self.down = false;
        self.point = self.clamp(point);
    }
}

impl TouchController for MouseTouch {
    type Error = core::convert::Infallible;

    fn init(&mut self, width: u16, height: u16, _rotation: Rotation) -> Result<(), Self::Error> {
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn has_signal(&mut self) -> bool {
        true
    }

    fn touched(&mut self) -> bool {
        self.down
    }

    fn released(&mut self) -> bool {
        !self.down
    }

    fn last_point(&self) -> (u16, u16) {
        self.point
    }
}
