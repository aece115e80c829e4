//! Retained UI runtime: invalidation, rendering and the flush handshake.
//!
//! One [`Runtime::process`] call is one work cycle: read input once, let the
//! screen react, then render every dirty area and hand the pixels to the
//! flush port. In partial mode an area is rendered in horizontal chunks that
//! fit the stripe buffer, with buffer-relative pixel layout. In direct mode
//! the buffer is the full frame and areas are rendered in place.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;

use embedded_graphics::prelude::*;
use log::{trace, warn};

use super::area::Area;
use super::canvas::Canvas;
use super::screen::HomeScreen;
use crate::config::RenderMode;
use crate::input::TouchSample;

/// Pending areas kept before collapsing to a full-screen refresh
pub const MAX_INVALID_AREAS: usize = 32;

/// Completion token handed to every flush
#[derive(Debug, Default)]
pub struct FlushReady {
    done: Cell<bool>,
}

impl FlushReady {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tell the runtime the pixels may be overwritten
    pub fn signal(&self) {
        self.done.set(true);
    }

    pub fn is_signalled(&self) -> bool {
        self.done.get()
    }
}

/// Receives rendered pixels
pub trait FlushPort {
    /// `pixels` holds `area.width() * area.height()` pixels row-major in
    /// partial mode, and the whole frame in direct mode.
    fn flush(&mut self, area: &Area, pixels: &[u16], ready: &FlushReady);
}

/// Supplies pointer input
pub trait InputPort {
    fn read(&mut self) -> TouchSample;
}

/// What one work cycle did
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessReport {
    pub input_reads: u32,
    pub flushes: u32,
    /// A flush was not signalled and rendering stopped
    pub stalled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    EmptyScreen,
    BufferTooSmall { required: usize, provided: usize },
}

impl core::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RuntimeError::EmptyScreen => write!(f, "screen size must be non-zero"),
            RuntimeError::BufferTooSmall { required, provided } => write!(
                f,
                "draw buffer too small: need {} pixels, have {}",
                required, provided
            ),
        }
    }
}

impl core::error::Error for RuntimeError {}

pub struct Runtime<B> {
    width: u16,
    height: u16,
    mode: RenderMode,
    buffer: B,
    invalid: Vec<Area>,
    screen: HomeScreen,
    tick_ms: u64,
    last_activity_ms: u64,
    last_input: TouchSample,
}

impl<B> Runtime<B>
where
    B: AsRef<[u16]> + AsMut<[u16]>,
{
    /// Register a `width x height` display with its draw buffer
    ///
    /// Direct mode needs a full frame; partial mode needs at least one row.
    /// The whole screen starts invalid.
    pub fn new(width: u16, height: u16, buffer: B, mode: RenderMode) -> Result<Self, RuntimeError> {
        if width == 0 || height == 0 {
            return Err(RuntimeError::EmptyScreen);
        }
        let required = match mode {
            RenderMode::Direct => width as usize * height as usize,
            RenderMode::Partial => width as usize,
        };
        let provided = buffer.as_ref().len();
        if provided < required {
            return Err(RuntimeError::BufferTooSmall { required, provided });
        }

        Ok(Self {
            width,
            height,
            mode,
            buffer,
            invalid: vec![Area::screen(width, height)],
            screen: HomeScreen::new(width, height),
            tick_ms: 0,
            last_activity_ms: 0,
            last_input: TouchSample::default(),
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn draw_buffer_pixels(&self) -> usize {
        self.buffer.as_ref().len()
    }

    /// Registered draw buffer size in bytes
    pub fn draw_buffer_bytes(&self) -> usize {
        self.draw_buffer_pixels() * 2
    }

    /// Draw buffer contents; the full frame in direct mode
    pub fn frame(&self) -> &[u16] {
        self.buffer.as_ref()
    }

    pub fn screen(&self) -> &HomeScreen {
        &self.screen
    }

    pub fn invalid_areas(&self) -> &[Area] {
        &self.invalid
    }

    /// Tick of the most recent `process` call
    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    /// Tick of the most recent press
    pub fn last_activity_ms(&self) -> u64 {
        self.last_activity_ms
    }

    pub fn last_input(&self) -> TouchSample {
        self.last_input
    }

    /// Mark `area` for repaint
    pub fn invalidate(&mut self, area: Area) {
        let screen = Area::screen(self.width, self.height);
        let Some(area) = area.intersect(&screen) else {
            return;
        };
        if self.invalid.iter().any(|a| a.contains(&area)) {
            return;
        }
        self.invalid.retain(|a| !area.contains(a));

        if let Some(existing) = self
            .invalid
            .iter_mut()
            .find(|a| a.join(&area).size() < a.size() + area.size())
        {
            *existing = existing.join(&area);
            return;
        }

        if self.invalid.len() >= MAX_INVALID_AREAS {
            self.invalid.clear();
            self.invalid.push(screen);
            return;
        }
        self.invalid.push(area);
    }

    /// Run one work cycle
    pub fn process(
        &mut self,
        now_ms: u64,
        flush: &mut dyn FlushPort,
        input: &mut dyn InputPort,
    ) -> ProcessReport {
        self.tick_ms = now_ms;
        let mut report = ProcessReport::default();

        let sample = input.read();
        report.input_reads += 1;
        self.last_input = sample;
        if sample.is_pressed() {
            self.last_activity_ms = now_ms;
        }
        if let Some(area) = self.screen.on_touch(&sample) {
            self.invalidate(area);
        }

        let areas = core::mem::take(&mut self.invalid);
        for (i, area) in areas.iter().enumerate() {
            let flushed = match self.mode {
                RenderMode::Partial => self.render_partial(area, flush, &mut report),
                RenderMode::Direct => self.render_direct(area, flush, &mut report),
            };
            if !flushed {
                warn!(
                    "Flush of {:?} was not signalled, {} area(s) left pending",
                    area,
                    areas.len() - i
                );
                report.stalled = true;
                self.invalid.extend_from_slice(&areas[i..]);
                break;
            }
        }
        report
    }

    fn render_partial(
        &mut self,
        area: &Area,
        flush: &mut dyn FlushPort,
        report: &mut ProcessReport,
    ) -> bool {
        let screen_size = Size::new(u32::from(self.width), u32::from(self.height));
        let stride = area.width() as usize;
        let rows_per_chunk = (self.buffer.as_ref().len() / stride).max(1) as i32;

        let mut y = area.y1;
        while y <= area.y2 {
            let chunk = Area::new(area.x1, y, area.x2, (y + rows_per_chunk - 1).min(area.y2));
            let pixels = chunk.size();
            {
                let window = &mut self.buffer.as_mut()[..pixels];
                let mut canvas =
                    Canvas::new(window, Point::new(chunk.x1, chunk.y1), stride, chunk, screen_size);
                self.screen
                    .draw(&mut canvas)
                    .unwrap_or_else(|never| match never {});
            }

            trace!("flush {:?}", chunk);
            let ready = FlushReady::new();
            flush.flush(&chunk, &self.buffer.as_ref()[..pixels], &ready);
            report.flushes += 1;
            if !ready.is_signalled() {
                return false;
            }
            y = chunk.y2 + 1;
        }
        true
    }

    fn render_direct(
        &mut self,
        area: &Area,
        flush: &mut dyn FlushPort,
        report: &mut ProcessReport,
    ) -> bool {
        let screen_size = Size::new(u32::from(self.width), u32::from(self.height));
        let frame_len = self.width as usize * self.height as usize;
        {
            let frame = &mut self.buffer.as_mut()[..frame_len];
            let mut canvas = Canvas::new(frame, Point::zero(), self.width as usize, *area, screen_size);
            self.screen
                .draw(&mut canvas)
                .unwrap_or_else(|never| match never {});
        }

        trace!("flush {:?}", area);
        let ready = FlushReady::new();
        flush.flush(area, &self.buffer.as_ref()[..frame_len], &ready);
        report.flushes += 1;
        ready.is_signalled()
    }
}
