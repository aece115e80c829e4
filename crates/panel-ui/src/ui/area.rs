//! Inclusive screen rectangles.

use embedded_graphics::{geometry::Point, geometry::Size, primitives::Rectangle};

/// Rectangle covering `x1..=x2`, `y1..=y2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Area {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Area of `width x height` pixels at the origin
    pub fn screen(width: u16, height: u16) -> Self {
        Self::new(0, 0, i32::from(width) - 1, i32::from(height) - 1)
    }

    /// `None` for an empty rectangle
    pub fn from_rectangle(rect: &Rectangle) -> Option<Self> {
        let br = rect.bottom_right()?;
        Some(Self::new(rect.top_left.x, rect.top_left.y, br.x, br.y))
    }

    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.x1, self.y1),
            Size::new(self.width(), self.height()),
        )
    }

    pub fn width(&self) -> u32 {
        (self.x2 - self.x1 + 1).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y2 - self.y1 + 1).max(0) as u32
    }

    /// Pixel count
    pub fn size(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    /// Whether `other` lies completely inside `self`
    pub fn contains(&self, other: &Area) -> bool {
        other.x1 >= self.x1 && other.x2 <= self.x2 && other.y1 >= self.y1 && other.y2 <= self.y2
    }

    pub fn intersect(&self, other: &Area) -> Option<Area> {
        let area = Area::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        );
        (area.x1 <= area.x2 && area.y1 <= area.y2).then_some(area)
    }

    /// Smallest area covering both
    pub fn join(&self, other: &Area) -> Area {
        Area::new(
            self.x1.min(other.x1),
            self.y1.min(other.y1),
            self.x2.max(other.x2),
            self.y2.max(other.y2),
        )
    }
}
