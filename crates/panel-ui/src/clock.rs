//! Millisecond tick source for the UI runtime.

use core::cell::Cell;

pub trait Clock {
    /// Milliseconds since boot
    fn now_ms(&self) -> u64;
}

/// Clock advanced by hand, for tests and the scenario harness
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
