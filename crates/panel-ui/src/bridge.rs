//! Glue between the UI runtime and the board drivers.
//!
//! [`UiBridge`] owns the runtime once a draw buffer exists. Each work cycle
//! it wraps the panel in a flush port and the touch controller in an input
//! port and hands both to the runtime.

use log::{info, warn};

use crate::config::RenderMode;
use crate::input::{poll_touch, TouchController, TouchSample};
use crate::panel::PanelDriver;
use crate::ui::{Area, FlushPort, FlushReady, InputPort, ProcessReport, Runtime, RuntimeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Uninitialized,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    AlreadyRunning,
    Runtime(RuntimeError),
}

impl core::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BridgeError::AlreadyRunning => write!(f, "UI already started"),
            BridgeError::Runtime(e) => write!(f, "UI start failed: {}", e),
        }
    }
}

impl core::error::Error for BridgeError {}

impl From<RuntimeError> for BridgeError {
    fn from(e: RuntimeError) -> Self {
        BridgeError::Runtime(e)
    }
}

/// Flush port over a panel
///
/// Partial mode copies each chunk to the panel; direct mode leaves the frame
/// for the main loop to push. The flush is always signalled.
pub struct DisplayFlush<'a, P: PanelDriver> {
    panel: &'a mut P,
    mode: RenderMode,
}

impl<'a, P: PanelDriver> DisplayFlush<'a, P> {
    pub fn new(panel: &'a mut P, mode: RenderMode) -> Self {
        Self { panel, mode }
    }
}

impl<P: PanelDriver> FlushPort for DisplayFlush<'_, P> {
    fn flush(&mut self, area: &Area, pixels: &[u16], ready: &FlushReady) {
        if self.mode == RenderMode::Partial {
            let (Ok(x), Ok(y), Ok(w), Ok(h)) = (
                u16::try_from(area.x1),
                u16::try_from(area.y1),
                u16::try_from(area.width()),
                u16::try_from(area.height()),
            ) else {
                warn!("Flush area {:?} outside panel range", area);
                ready.signal();
                return;
            };
            if let Err(e) = self.panel.blit(x, y, pixels, w, h) {
                warn!("Panel blit failed: {:?}", e);
            }
        }
        ready.signal();
    }
}

/// Input port over a touch controller
pub struct TouchPoll<'a, T: TouchController> {
    touch: &'a mut T,
    last: &'a mut TouchSample,
}

impl<'a, T: TouchController> TouchPoll<'a, T> {
    pub fn new(touch: &'a mut T, last: &'a mut TouchSample) -> Self {
        Self { touch, last }
    }
}

impl<T: TouchController> InputPort for TouchPoll<'_, T> {
    fn read(&mut self) -> TouchSample {
        poll_touch(&mut *self.touch, &mut *self.last)
    }
}

pub struct UiBridge<B> {
    runtime: Option<Runtime<B>>,
    last_touch: TouchSample,
}

impl<B> Default for UiBridge<B> {
    fn default() -> Self {
        Self {
            runtime: None,
            last_touch: TouchSample::default(),
        }
    }
}

impl<B> UiBridge<B>
where
    B: AsRef<[u16]> + AsMut<[u16]>,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BridgeState {
        if self.runtime.is_some() {
            BridgeState::Running
        } else {
            BridgeState::Uninitialized
        }
    }

    /// Create the runtime around `buffer`; the only way into `Running`
    pub fn start(
        &mut self,
        width: u16,
        height: u16,
        buffer: B,
        mode: RenderMode,
    ) -> Result<(), BridgeError> {
        if self.runtime.is_some() {
            return Err(BridgeError::AlreadyRunning);
        }
        let runtime = Runtime::new(width, height, buffer, mode)?;
        info!(
            "UI started: {}x{} {:?}, draw buffer {} bytes",
            width,
            height,
            mode,
            runtime.draw_buffer_bytes()
        );
        self.runtime = Some(runtime);
        Ok(())
    }

    /// One work cycle; `None` while uninitialized, when neither driver is touched
    pub fn process<P, T>(&mut self, now_ms: u64, panel: &mut P, touch: &mut T) -> Option<ProcessReport>
    where
        P: PanelDriver,
        T: TouchController,
    {
        let runtime = self.runtime.as_mut()?;
        let mut flush = DisplayFlush::new(panel, runtime.mode());
        let mut input = TouchPoll::new(touch, &mut self.last_touch);
        Some(runtime.process(now_ms, &mut flush, &mut input))
    }

    pub fn runtime(&self) -> Option<&Runtime<B>> {
        self.runtime.as_ref()
    }

    /// Current frame while running
    pub fn frame(&self) -> Option<&[u16]> {
        self.runtime.as_ref().map(Runtime::frame)
    }

    pub fn last_touch(&self) -> TouchSample {
        self.last_touch
    }
}
