//! Setup sequence and the cooperative render loop.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_hal::delay::DelayNs;
use log::{error, info, warn};

use crate::bridge::{BridgeState, UiBridge};
use crate::buffer::AllocError;
use crate::clock::Clock;
use crate::config::{BoardConfig, FramePush};
use crate::input::TouchController;
use crate::panel::PanelDriver;
use crate::ui::ProcessReport;

/// The board's display and touch handles, created once at startup
pub struct Board<P, T> {
    pub display: P,
    pub touch: T,
}

/// What one loop iteration did
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IterationReport {
    /// `None` while the UI is not running
    pub ui: Option<ProcessReport>,
    pub frame_pushed: bool,
}

pub struct MainLoop<P, T, B, C> {
    config: BoardConfig,
    bridge: UiBridge<B>,
    board: Board<P, T>,
    clock: C,
    iterations: u64,
}

impl<P, T, B, C> MainLoop<P, T, B, C>
where
    P: PanelDriver,
    T: TouchController,
    B: AsRef<[u16]> + AsMut<[u16]>,
    C: Clock,
{
    pub fn new(config: BoardConfig, board: Board<P, T>, clock: C) -> Self {
        Self {
            config,
            bridge: UiBridge::new(),
            board,
            clock,
            iterations: 0,
        }
    }

    /// Panel begin, black fill, touch init
    ///
    /// Nothing here is fatal: a failed panel leaves the loop running with no
    /// visible output and a failed touch init leaves input released. Boards
    /// with a backlight call [`init_panel`](Self::init_panel) and
    /// [`init_touch`](Self::init_touch) with the backlight switched between.
    pub fn init_hardware(&mut self) {
        self.init_panel();
        self.init_touch();
    }

    /// Panel begin, then a black fill if it came up
    pub fn init_panel(&mut self) {
        match self.board.display.begin() {
            Ok(()) => {
                if let Err(e) = self.board.display.fill_screen(Rgb565::BLACK) {
                    warn!("Panel fill failed: {:?}", e);
                }
            }
            Err(e) => error!("Panel begin failed: {:?}", e),
        }
    }

    /// Size the touch mapping to the panel
    pub fn init_touch(&mut self) {
        let (width, height) = (self.board.display.width(), self.board.display.height());
        let rotation = self.board.display.rotation();
        if let Err(e) = self.board.touch.init(width, height, rotation) {
            warn!("Touch init failed: {:?}", e);
        }
    }

    /// Draw buffer size this board needs, in pixels
    pub fn buffer_pixels(&self) -> usize {
        self.config
            .buffer_pixels(self.board.display.width(), self.board.display.height())
    }

    /// Hand the draw buffer to the UI, or log why there is none
    ///
    /// Returns whether the UI is running afterwards.
    pub fn start_ui(&mut self, buffer: Result<B, AllocError>) -> bool {
        let buffer = match buffer {
            Ok(buffer) => buffer,
            Err(e) => {
                error!("Draw buffer unavailable, UI not started: {}", e);
                return false;
            }
        };
        let (width, height) = (self.board.display.width(), self.board.display.height());
        if let Err(e) = self
            .bridge
            .start(width, height, buffer, self.config.render_mode)
        {
            error!("{}", e);
        }
        self.is_running()
    }

    pub fn is_running(&self) -> bool {
        self.bridge.state() == BridgeState::Running
    }

    /// UI work, then the direct-mode frame push
    pub fn iterate(&mut self) -> IterationReport {
        self.iterations += 1;
        let now = self.clock.now_ms();
        let ui = self
            .bridge
            .process(now, &mut self.board.display, &mut self.board.touch);

        let mut frame_pushed = false;
        if self.config.is_direct() {
            if let Some(frame) = self.bridge.frame() {
                let display = &mut self.board.display;
                let result = match self.config.frame_push {
                    FramePush::Panel => display.push_full_frame(frame),
                    FramePush::Blit => {
                        let (w, h) = (display.width(), display.height());
                        display.blit(0, 0, frame, w, h)
                    }
                };
                match result {
                    Ok(()) => frame_pushed = true,
                    Err(e) => warn!("Frame push failed: {:?}", e),
                }
            }
        }

        IterationReport { ui, frame_pushed }
    }

    /// Loop forever, pausing `loop_delay_ms` between iterations
    pub fn run<D: DelayNs>(mut self, delay: &mut D) -> ! {
        info!("Entering main loop");
        loop {
            self.iterate();
            delay.delay_ms(self.config.loop_delay_ms);
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn bridge(&self) -> &UiBridge<B> {
        &self.bridge
    }

    pub fn board(&self) -> &Board<P, T> {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board<P, T> {
        &mut self.board
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}
