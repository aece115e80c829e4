//! In-memory panel for host tests.
//!
//! Blits and drawing go through an [`st7701::Framebuffer`] view so they
//! land in real pixel memory with the same clipping as on target. The panel records
//! every driver call so tests can assert on flush and push traffic.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::*,
};

use crate::panel::{Framebuffer, PanelDriver, Rotation};

/// One recorded `blit` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlitRecord {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// Panel double that allows overdraw and counts calls
pub struct TestPanel {
    pixels: Vec<u16>,
    width: u16,
    height: u16,
    rotation: Rotation,
    begin_ok: bool,
    begin_calls: usize,
    blits: Vec<BlitRecord>,
    pushes: usize,
}

/// `begin` was scripted to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeginFailed;

impl TestPanel {
    /// Create a new test panel with the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            pixels: vec![0u16; width as usize * height as usize],
            width,
            height,
            rotation: Rotation::Rotate0,
            begin_ok: true,
            begin_calls: 0,
            blits: Vec::new(),
            pushes: 0,
        }
    }

    /// Create a panel matching the board (480x480).
    pub fn default_size() -> Self {
        Self::new(crate::DISPLAY_WIDTH, crate::DISPLAY_HEIGHT)
    }

    /// Make the next `begin` calls fail
    pub fn failing_begin(mut self) -> Self {
        self.begin_ok = false;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn begin_calls(&self) -> usize {
        self.begin_calls
    }

    pub fn blits(&self) -> &[BlitRecord] {
        &self.blits
    }

    pub fn pushes(&self) -> usize {
        self.pushes
    }

    pub fn clear_records(&mut self) {
        self.blits.clear();
        self.pushes = 0;
    }

    /// Framebuffer view over the panel memory
    fn frame(&mut self) -> Option<Framebuffer<&mut [u16]>> {
        Framebuffer::new(self.pixels.as_mut_slice(), self.width, self.height)
    }

    fn copy_in(&mut self, x: u16, y: u16, pixels: &[u16], w: u16, h: u16) {
        if let Some(mut frame) = self.frame() {
            frame.blit(x, y, pixels, w, h);
        }
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb565> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let raw = self.pixels[y as usize * self.width as usize + x as usize];
        Some(Rgb565::from(RawU16::new(raw)))
    }

    /// Points whose pixel is not black
    pub fn lit_pixels(&self) -> Vec<Point> {
        let width = self.width as usize;
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, p)| **p != 0)
            .map(|(i, _)| Point::new((i % width) as i32, (i / width) as i32))
            .collect()
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }
}

impl PanelDriver for TestPanel {
    type Error = BeginFailed;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.begin_calls += 1;
        if self.begin_ok {
            Ok(())
        } else {
            Err(BeginFailed)
        }
    }

    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn rotation(&self) -> Rotation {
        self.rotation
    }

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.pixels.fill(RawU16::from(color).into_inner());
        Ok(())
    }

    fn blit(&mut self, x: u16, y: u16, pixels: &[u16], w: u16, h: u16) -> Result<(), Self::Error> {
        self.blits.push(BlitRecord { x, y, w, h });
        self.copy_in(x, y, pixels, w, h);
        Ok(())
    }

    fn push_full_frame(&mut self, frame: &[u16]) -> Result<(), Self::Error> {
        self.pushes += 1;
        self.copy_in(0, 0, frame, self.width, self.height);
        Ok(())
    }
}

impl DrawTarget for TestPanel {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        if let Some(mut frame) = self.frame() {
            frame.draw_iter(pixels).unwrap_or_else(|never| match never {});
        }
        Ok(())
    }
}

impl OriginDimensions for TestPanel {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn test_panel_allows_overdraw() {
        let mut panel = TestPanel::new(10, 10);

        Rectangle::new(Point::new(0, 0), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK))
            .draw(&mut panel)
            .unwrap();

        // Draw on top - should not panic
        Rectangle::new(Point::new(2, 2), Size::new(5, 5))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
            .draw(&mut panel)
            .unwrap();

        assert_eq!(panel.pixel(3, 3), Some(Rgb565::WHITE));
        assert_eq!(panel.lit_pixels().len(), 25);
    }

    #[test]
    fn drawing_off_panel_is_clipped() {
        let mut panel = TestPanel::new(4, 4);

        Rectangle::new(Point::new(-2, 2), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
            .draw(&mut panel)
            .unwrap();

        assert_eq!(panel.lit_pixels().len(), 8);
        assert_eq!(panel.pixel(0, 3), Some(Rgb565::WHITE));
        assert_eq!(panel.pixel(0, 1), Some(Rgb565::BLACK));
    }

    #[test]
    fn blit_and_push_are_recorded() {
        let mut panel = TestPanel::new(4, 4);
        panel.blit(1, 1, &[0xF800; 4], 2, 2).unwrap();
        panel.push_full_frame(&[0x001F; 16]).unwrap();

        assert_eq!(panel.blits(), &[BlitRecord { x: 1, y: 1, w: 2, h: 2 }]);
        assert_eq!(panel.pushes(), 1);
        assert_eq!(panel.pixel(0, 0), Some(Rgb565::BLUE));
    }

    #[test]
    fn failing_begin_is_reported() {
        let mut panel = TestPanel::new(4, 4).failing_begin();
        assert_eq!(panel.begin(), Err(BeginFailed));
        assert_eq!(panel.begin_calls(), 1);
    }
}
