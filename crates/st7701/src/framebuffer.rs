//! RGB565 frame storage
//!
//! The RGB peripheral scans a full frame out of memory continuously, so the
//! host keeps one `width * height` buffer of native-endian RGB565 words.
//! [`Framebuffer`] wraps any such buffer and copies rectangles into it.

/// Full frame of RGB565 pixels in row-major order
///
/// ## Type Parameters
///
/// * `B` - storage implementing `AsRef<[u16]>` and `AsMut<[u16]>`, e.g. a
///   `Vec<u16>` on the host or the peripheral-mapped slice on target
pub struct Framebuffer<B> {
    buffer: B,
    width: u16,
    height: u16,
}

impl<B> Framebuffer<B>
where
    B: AsRef<[u16]> + AsMut<[u16]>,
{
    /// Wrap `buffer` as a `width x height` frame
    ///
    /// Returns `None` if the buffer holds fewer than `width * height` pixels.
    pub fn new(buffer: B, width: u16, height: u16) -> Option<Self> {
        if buffer.as_ref().len() < width as usize * height as usize {
            return None;
        }
        Some(Self {
            buffer,
            width,
            height,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pixels of the visible frame
    pub fn pixels(&self) -> &[u16] {
        let len = self.len();
        &self.buffer.as_ref()[..len]
    }

    pub fn pixels_mut(&mut self) -> &mut [u16] {
        let len = self.len();
        &mut self.buffer.as_mut()[..len]
    }

    fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Fill the whole frame with one raw color
    pub fn fill(&mut self, raw: u16) {
        self.pixels_mut().fill(raw);
    }

    /// Copy a `w x h` block of row-major pixels to `(x, y)`
    ///
    /// The block is clipped to the frame. Returns the number of pixels
    /// written; `0` when the block lies entirely outside or `pixels` is
    /// shorter than `w * h`.
    pub fn blit(&mut self, x: u16, y: u16, pixels: &[u16], w: u16, h: u16) -> usize {
        if pixels.len() < w as usize * h as usize || x >= self.width || y >= self.height {
            return 0;
        }
        let copy_w = w.min(self.width - x) as usize;
        let copy_h = h.min(self.height - y) as usize;
        let stride = self.width as usize;
        let frame = self.pixels_mut();
        for row in 0..copy_h {
            let src = row * w as usize;
            let dst = (y as usize + row) * stride + x as usize;
            frame[dst..dst + copy_w].copy_from_slice(&pixels[src..src + copy_w]);
        }
        copy_w * copy_h
    }

    /// Raw pixel at `(x, y)`, `None` outside the frame
    pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels()[y as usize * self.width as usize + x as usize])
    }

    /// Release the buffer
    pub fn into_inner(self) -> B {
        self.buffer
    }
}

#[cfg(feature = "graphics")]
mod graphics {
    use core::convert::Infallible;
    use embedded_graphics_core::{
        Pixel,
        draw_target::DrawTarget,
        geometry::{OriginDimensions, Size},
        pixelcolor::{IntoStorage, Rgb565},
    };

    use super::Framebuffer;

    impl<B> OriginDimensions for Framebuffer<B>
    where
        B: AsRef<[u16]> + AsMut<[u16]>,
    {
        fn size(&self) -> Size {
            Size::new(u32::from(self.width), u32::from(self.height))
        }
    }

    impl<B> DrawTarget for Framebuffer<B>
    where
        B: AsRef<[u16]> + AsMut<[u16]>,
    {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            let width = i32::from(self.width);
            let height = i32::from(self.height);
            let frame = self.pixels_mut();
            for Pixel(point, color) in pixels {
                if point.x < 0 || point.y < 0 || point.x >= width || point.y >= height {
                    continue;
                }
                frame[(point.y * width + point.x) as usize] = color.into_storage();
            }
            Ok(())
        }

        fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
            self.fill(color.into_storage());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_buffer_is_rejected() {
        assert!(Framebuffer::new(vec![0u16; 99], 10, 10).is_none());
        assert!(Framebuffer::new(vec![0u16; 100], 10, 10).is_some());
    }

    #[test]
    fn blit_copies_rows_at_offset() {
        let mut fb = Framebuffer::new(vec![0u16; 16], 4, 4).unwrap();
        let written = fb.blit(1, 2, &[1, 2, 3, 4], 2, 2);
        assert_eq!(written, 4);
        assert_eq!(fb.pixel(1, 2), Some(1));
        assert_eq!(fb.pixel(2, 2), Some(2));
        assert_eq!(fb.pixel(1, 3), Some(3));
        assert_eq!(fb.pixel(2, 3), Some(4));
        assert_eq!(fb.pixel(0, 2), Some(0));
    }

    #[test]
    fn blit_clips_at_right_and_bottom_edges() {
        let mut fb = Framebuffer::new(vec![0u16; 16], 4, 4).unwrap();
        let block = [7u16; 9];
        assert_eq!(fb.blit(2, 3, &block, 3, 3), 2);
        assert_eq!(fb.pixel(3, 3), Some(7));
        assert_eq!(fb.pixel(2, 2), Some(0));
        assert_eq!(fb.blit(4, 0, &block, 3, 3), 0);
    }

    #[test]
    fn blit_rejects_short_source() {
        let mut fb = Framebuffer::new(vec![0u16; 16], 4, 4).unwrap();
        assert_eq!(fb.blit(0, 0, &[1, 2, 3], 2, 2), 0);
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn draw_target_writes_rgb565_storage() {
        use embedded_graphics_core::{
            Pixel,
            draw_target::DrawTarget,
            geometry::Point,
            pixelcolor::{IntoStorage, Rgb565, RgbColor},
        };

        let mut fb = Framebuffer::new(vec![0u16; 16], 4, 4).unwrap();
        fb.clear(Rgb565::BLUE).unwrap();
        fb.draw_iter([
            Pixel(Point::new(0, 0), Rgb565::RED),
            Pixel(Point::new(-1, 0), Rgb565::GREEN),
            Pixel(Point::new(4, 4), Rgb565::GREEN),
        ])
        .unwrap();
        assert_eq!(fb.pixel(0, 0), Some(Rgb565::RED.into_storage()));
        assert_eq!(fb.pixel(3, 3), Some(Rgb565::BLUE.into_storage()));
    }
}
