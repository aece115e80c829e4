//! Touch input abstraction.

use log::trace;

use crate::panel::Rotation;

/// Pointer state reported to the UI runtime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TouchState {
    Pressed,
    #[default]
    Released,
}

/// Last known pointer sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchSample {
    pub x: u16,
    pub y: u16,
    pub state: TouchState,
}

impl TouchSample {
    pub const fn pressed(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            state: TouchState::Pressed,
        }
    }

    pub const fn released(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            state: TouchState::Released,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.state == TouchState::Pressed
    }
}

/// Touch controller as seen by the poll policy
///
/// `has_signal` is called first on every poll and is the only call allowed
/// to talk to the bus; `touched`, `released` and `last_point` answer from
/// what it fetched.
pub trait TouchController {
    type Error: core::fmt::Debug;

    /// Configure the coordinate mapping for a `width x height` screen
    fn init(&mut self, width: u16, height: u16, rotation: Rotation) -> Result<(), Self::Error>;

    /// Whether the controller answered
    fn has_signal(&mut self) -> bool;

    /// A contact is down
    fn touched(&mut self) -> bool;

    /// The last contact was lifted
    fn released(&mut self) -> bool;

    /// Screen coordinates of the most recent contact
    fn last_point(&self) -> (u16, u16);
}

/// Poll `touch` once and fold the result into `last`
///
/// No signal reports released. With a signal, a touch reports pressed at the
/// controller's point and a release reports released. A controller that
/// reports neither keeps the last point and is never reported pressed.
pub fn poll_touch<T: TouchController + ?Sized>(touch: &mut T, last: &mut TouchSample) -> TouchSample {
    let sample = if !touch.has_signal() {
        TouchSample::released(last.x, last.y)
    } else if touch.touched() {
        let (x, y) = touch.last_point();
        TouchSample::pressed(x, y)
    } else if touch.released() {
        TouchSample::released(last.x, last.y)
    } else {
        trace!("Touch signal with neither contact nor release");
        TouchSample::released(last.x, last.y)
    };
    *last = sample;
    sample
}
