//! Desktop SDL simulator for the 480x480 panel board.
//!
//! Runs the firmware's main loop against an SDL window; the left mouse
//! button stands in for the touch controller.

mod board;

use std::time::{Duration, Instant};

use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorEvent, Window,
};
use env_logger::Env;
use panel_ui::buffer::{allocate, HeapAllocator};
use panel_ui::clock::Clock;
use panel_ui::config::{BoardConfig, FramePush, RenderMode};
use panel_ui::main_loop::{Board, MainLoop};
use panel_ui::{DISPLAY_HEIGHT, DISPLAY_WIDTH, VERSION};

use board::{MouseTouch, SimPanel};

struct WallClock(Instant);

impl Clock for WallClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.0.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = if std::env::args().any(|arg| arg == "--direct") {
        BoardConfig::default()
            .with_render_mode(RenderMode::Direct)
            .with_frame_push(FramePush::Blit)
    } else {
        BoardConfig::default()
    };
    log::info!("panel-ui v{} simulator, {:?}", VERSION, config.render_mode);

    let board = Board {
        display: SimPanel::new(DISPLAY_WIDTH, DISPLAY_HEIGHT),
        touch: MouseTouch::default(),
    };
    let mut main_loop = MainLoop::new(config, board, WallClock(Instant::now()));
    main_loop.init_hardware();
    let buffer = allocate(&mut HeapAllocator::new(), main_loop.buffer_pixels()).map(|a| a.buffer);
    main_loop.start_ui(buffer);

    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut window = Window::new("panel-ui 480x480", &output_settings);

    println!("Panel Simulator");
    println!("Controls:");
    println!("  Left mouse button - Touch");
    println!("  Drag              - Move touch point");
    println!("  Escape / close    - Quit");
    println!("Run with --direct for full-frame rendering");

    let delay = Duration::from_millis(u64::from(main_loop.config().loop_delay_ms));
    loop {
        main_loop.iterate();
        window.update(main_loop.board().display.surface());

        let events = window.events().collect::<Vec<_>>();
        let touch = &mut main_loop.board_mut().touch;
        for event in events {
            match event {
                SimulatorEvent::Quit => return Ok(()),
                SimulatorEvent::KeyDown {
                    keycode: Keycode::Escape,
                    ..
                } => return Ok(()),
                SimulatorEvent::MouseButtonDown { point, .. } => touch.press(point),
                SimulatorEvent::MouseMove { point } => touch.drag(point),
                SimulatorEvent::MouseButtonUp { point, .. } => touch.lift(point),
                _ => {}
            }
        }

        std::thread::sleep(delay);
    }
}
