//! Clipped draw target over a window of the draw buffer.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::*,
    primitives::Rectangle,
};

use super::area::Area;

/// Draw target that writes screen-space pixels into a buffer window
///
/// The buffer holds `stride`-wide rows starting at screen point `origin`.
/// Only pixels inside `clip` are written. Partial rendering uses the chunk
/// itself as window; direct rendering uses the whole frame with origin zero.
pub struct Canvas<'a> {
    buffer: &'a mut [u16],
    origin: Point,
    stride: usize,
    clip: Area,
    screen: Size,
}

impl<'a> Canvas<'a> {
    pub fn new(buffer: &'a mut [u16], origin: Point, stride: usize, clip: Area, screen: Size) -> Self {
        Self {
            buffer,
            origin,
            stride,
            clip,
            screen,
        }
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.clip.contains_point(p) {
            return None;
        }
        let col = usize::try_from(p.x - self.origin.x).ok()?;
        let row = usize::try_from(p.y - self.origin.y).ok()?;
        let idx = row * self.stride + col;
        (col < self.stride && idx < self.buffer.len()).then_some(idx)
    }
}

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        self.screen
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(idx) = self.index(point) {
                self.buffer[idx] = RawU16::from(color).into_inner();
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let Some(target) = Area::from_rectangle(area).and_then(|a| a.intersect(&self.clip)) else {
            return Ok(());
        };
        let raw = RawU16::from(color).into_inner();
        for y in target.y1..=target.y2 {
            let (Some(start), Some(end)) = (
                self.index(Point::new(target.x1, y)),
                self.index(Point::new(target.x2, y)),
            ) else {
                continue;
            };
            self.buffer[start..=end].fill(raw);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    fn raw(color: Rgb565) -> u16 {
        RawU16::from(color).into_inner()
    }

    #[test]
    fn window_translates_screen_coordinates() {
        // 4x2 chunk of a 10x10 screen at (3, 5)
        let mut buf = [0u16; 8];
        let clip = Area::new(3, 5, 6, 6);
        let mut canvas = Canvas::new(&mut buf, Point::new(3, 5), 4, clip, Size::new(10, 10));
        Pixel(Point::new(4, 6), Rgb565::RED).draw(&mut canvas).unwrap();
        Pixel(Point::new(0, 0), Rgb565::RED).draw(&mut canvas).unwrap();
        assert_eq!(buf[5], raw(Rgb565::RED));
        assert_eq!(buf.iter().filter(|&&p| p != 0).count(), 1);
    }

    #[test]
    fn fill_is_clipped() {
        let mut buf = [0u16; 100];
        let clip = Area::new(2, 2, 4, 4);
        let mut canvas = Canvas::new(&mut buf, Point::zero(), 10, clip, Size::new(10, 10));
        Rectangle::new(Point::zero(), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
            .draw(&mut canvas)
            .unwrap();
        assert_eq!(buf.iter().filter(|&&p| p != 0).count(), 9);
        assert_eq!(buf[2 * 10 + 2], raw(Rgb565::WHITE));
        assert_eq!(buf[5 * 10 + 5], 0);
    }
}
