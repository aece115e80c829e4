//! Scripted touch controller for host tests and the scenario harness.

use core::convert::Infallible;

use crate::input::TouchController;
use crate::panel::Rotation;

/// Touch controller whose answers are set by the test
///
/// State persists across polls until changed, so a held finger is one
/// [`ScriptedTouch::press`] followed by any number of polls.
#[derive(Debug, Default)]
pub struct ScriptedTouch {
    signal: bool,
    touched: bool,
    released: bool,
    point: (u16, u16),
    has_signal_calls: usize,
    released_calls: usize,
    init_args: Option<(u16, u16, Rotation)>,
}

impl ScriptedTouch {
    /// Controller present, nothing touching it
    pub fn new() -> Self {
        Self {
            signal: true,
            ..Self::default()
        }
    }

    /// Set every answer at once
    pub fn set_state(&mut self, signal: bool, touched: bool, released: bool, point: (u16, u16)) {
        self.signal = signal;
        self.touched = touched;
        self.released = released;
        self.point = point;
    }

    pub fn press(&mut self, x: u16, y: u16) {
        self.set_state(true, true, false, (x, y));
    }

    pub fn release(&mut self) {
        self.set_state(true, false, true, self.point);
    }

    /// Controller stops answering, as with a loose cable
    pub fn lose_signal(&mut self) {
        self.signal = false;
    }

    /// Number of polls seen so far
    pub fn has_signal_calls(&self) -> usize {
        self.has_signal_calls
    }

    /// Number of `released` queries seen so far
    pub fn released_calls(&self) -> usize {
        self.released_calls
    }

    /// Arguments of the `init` call, if any
    pub fn init_args(&self) -> Option<(u16, u16, Rotation)> {
        self.init_args
    }
}

impl TouchController for ScriptedTouch {
    type Error = Infallible;

    fn init(&mut self, width: u16, height: u16, rotation: Rotation) -> Result<(), Self::Error> {
        self.init_args = Some((width, height, rotation));
        Ok(())
    }

    fn has_signal(&mut self) -> bool {
        self.has_signal_calls += 1;
        self.signal
    }

    fn touched(&mut self) -> bool {
        self.touched
    }

    fn released(&mut self) -> bool {
        self.released_calls += 1;
        self.released
    }

    fn last_point(&self) -> (u16, u16) {
        self.point
    }
}
