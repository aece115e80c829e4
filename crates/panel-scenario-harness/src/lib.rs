//! Host-side scenario test harness for scripted boot and touch flows.
//!
//! Drives the firmware main loop against [`TestPanel`], [`ScriptedTouch`],
//! a budgeted [`HeapAllocator`] and a [`ManualClock`], so whole boots can be
//! replayed and asserted on without hardware.

pub mod log_capture;

use std::path::Path;

use embedded_graphics::pixelcolor::{raw::RawU16, Rgb565, RgbColor};
use panel_ui::buffer::{allocate, HeapAllocator, MemoryRegion};
use panel_ui::clock::ManualClock;
use panel_ui::config::BoardConfig;
use panel_ui::main_loop::{Board, IterationReport, MainLoop};
use panel_ui::mock_touch::ScriptedTouch;
use panel_ui::panel::PanelDriver;
use panel_ui::test_display::TestPanel;
use panel_ui::ui::Runtime;

pub type HarnessLoop = MainLoop<TestPanel, ScriptedTouch, Vec<u16>, ManualClock>;

/// Couples the main loop with its scripted board for scenario tests.
pub struct ScenarioHarness {
    main_loop: HarnessLoop,
    region: Option<MemoryRegion>,
}

impl ScenarioHarness {
    /// Boot a default-size panel with the given config and heap budgets.
    pub fn boot(config: BoardConfig, heap: HeapAllocator) -> Self {
        Self::boot_with(config, TestPanel::default_size(), ScriptedTouch::new(), heap)
    }

    /// Boot with caller-provided board doubles.
    ///
    /// Runs the same setup the firmware does: hardware init, draw buffer
    /// allocation with fallback, UI start.
    pub fn boot_with(
        config: BoardConfig,
        panel: TestPanel,
        touch: ScriptedTouch,
        mut heap: HeapAllocator,
    ) -> Self {
        let board = Board {
            display: panel,
            touch,
        };
        let mut main_loop = MainLoop::new(config, board, ManualClock::new(0));
        main_loop.init_hardware();

        let allocation = allocate(&mut heap, main_loop.buffer_pixels());
        let region = allocation.as_ref().ok().map(|a| a.region);
        main_loop.start_ui(allocation.map(|a| a.buffer));

        Self { main_loop, region }
    }

    /// One loop iteration, then advance the clock by the loop delay.
    pub fn step(&mut self) -> IterationReport {
        let report = self.main_loop.iterate();
        let delay = u64::from(self.main_loop.config().loop_delay_ms);
        self.main_loop.clock().advance(delay);
        report
    }

    /// Run `iterations` steps and return their reports.
    pub fn run(&mut self, iterations: usize) -> Vec<IterationReport> {
        (0..iterations).map(|_| self.step()).collect()
    }

    /// Put a finger down; it stays down until [`release`](Self::release).
    pub fn press(&mut self, x: u16, y: u16) {
        self.touch_mut().press(x, y);
    }

    pub fn release(&mut self) {
        self.touch_mut().release();
    }

    /// Make the controller stop answering.
    pub fn lose_signal(&mut self) {
        self.touch_mut().lose_signal();
    }

    pub fn is_running(&self) -> bool {
        self.main_loop.is_running()
    }

    /// Region the draw buffer came from, `None` if allocation failed.
    pub fn region(&self) -> Option<MemoryRegion> {
        self.region
    }

    pub fn runtime(&self) -> Option<&Runtime<Vec<u16>>> {
        self.main_loop.bridge().runtime()
    }

    /// Text currently shown by the touch read-out label.
    pub fn readout(&self) -> Option<&str> {
        self.runtime()
            .map(|runtime| runtime.screen().readout_label().text())
    }

    pub fn panel(&self) -> &TestPanel {
        &self.main_loop.board().display
    }

    pub fn panel_mut(&mut self) -> &mut TestPanel {
        &mut self.main_loop.board_mut().display
    }

    pub fn touch(&self) -> &ScriptedTouch {
        &self.main_loop.board().touch
    }

    pub fn touch_mut(&mut self) -> &mut ScriptedTouch {
        &mut self.main_loop.board_mut().touch
    }

    pub fn main_loop(&self) -> &HarnessLoop {
        &self.main_loop
    }

    /// Save the panel contents to an RGB PNG.
    pub fn save_screenshot_png(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let panel = self.panel();
        let (width, height) = (u32::from(panel.width()), u32::from(panel.height()));
        let mut data = Vec::with_capacity(panel.pixels().len() * 3);
        for &raw in panel.pixels() {
            let color = Rgb565::from(RawU16::new(raw));
            // Scale 5/6-bit channels to 8 bits
            data.push((color.r() << 3) | (color.r() >> 2));
            data.push((color.g() << 2) | (color.g() >> 4));
            data.push((color.b() << 3) | (color.b() >> 2));
        }

        let image = image::RgbImage::from_raw(width, height, data)
            .ok_or_else(|| "pixel count does not match panel size".to_string())?;
        image.save(path).map_err(|e| e.to_string())
    }
}
