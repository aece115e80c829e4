//! Single-line text widget with fixed bounds.

extern crate alloc;

use alloc::string::String;

use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
};
use embedded_text::{
    alignment::{HorizontalAlignment, VerticalAlignment},
    style::TextBoxStyleBuilder,
    TextBox,
};

use super::area::Area;

pub struct Label {
    text: String,
    bounds: Rectangle,
    color: Rgb565,
}

impl Label {
    pub fn new(text: &str, bounds: Rectangle, color: Rgb565) -> Self {
        Self {
            text: String::from(text),
            bounds,
            color,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Area to invalidate when the label changes
    pub fn area(&self) -> Option<Area> {
        Area::from_rectangle(&self.bounds)
    }

    /// Replace the text; returns whether it changed
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text.clear();
        self.text.push_str(text);
        true
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let character_style = MonoTextStyle::new(&FONT_10X20, self.color);
        let textbox_style = TextBoxStyleBuilder::new()
            .alignment(HorizontalAlignment::Center)
            .vertical_alignment(VerticalAlignment::Middle)
            .build();

        TextBox::with_textbox_style(&self.text, self.bounds, character_style, textbox_style)
            .draw(display)
            .map(|_| ())
    }
}
