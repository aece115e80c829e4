mod heap;
mod rgb_panel;
mod runtime_diagnostics;
mod touch;

use esp_idf_svc::hal::{delay::FreeRtos, gpio::PinDriver, peripherals::Peripherals};

use panel_ui::buffer::{allocate, AllocError};
use panel_ui::config::{BoardConfig, FramePush, RenderMode};
use panel_ui::main_loop::{Board, MainLoop};
use panel_ui::panel::{
    Builder, Dimensions, PanelDisplay, PanelInterface, PanelTiming, Polarity, RgbPins, Rotation,
    SyncTiming,
};
use panel_ui::{DISPLAY_HEIGHT, DISPLAY_WIDTH, VERSION};

use heap::{CapsAllocator, FirmwareBuffer};
use rgb_panel::RgbPanel;
use runtime_diagnostics::{log_heap, EspClock};

const RGB_PINS: RgbPins = RgbPins {
    de: 2,
    vsync: 42,
    hsync: 3,
    pclk: 45,
    red: [4, 41, 5, 40, 6],
    green: [39, 7, 47, 8, 48, 9],
    blue: [11, 15, 12, 16, 21],
};

// Sync polarity flags as listed in the panel vendor table
const HSYNC_POLARITY: u8 = 1;
const VSYNC_POLARITY: u8 = 1;

const BOARD_TIMING: PanelTiming = PanelTiming {
    pclk_hz: 12_000_000,
    hsync: SyncTiming::new(Polarity::from_flag(HSYNC_POLARITY), 10, 8, 50),
    vsync: SyncTiming::new(Polarity::from_flag(VSYNC_POLARITY), 10, 8, 20),
    pclk_active_neg: false,
    de_idle_high: false,
};

fn board_config() -> BoardConfig {
    let render_mode = if cfg!(feature = "direct-mode") {
        RenderMode::Direct
    } else {
        RenderMode::Partial
    };
    let frame_push = if cfg!(feature = "rgb-panel") {
        FramePush::Panel
    } else {
        FramePush::Blit
    };
    BoardConfig::default()
        .with_render_mode(render_mode)
        .with_frame_push(frame_push)
        .with_backlight(cfg!(feature = "backlight"))
}

fn main() {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    log::info!(
        "panel-firmware v{}: ST7701S {}x{} RGB + GT911",
        VERSION,
        DISPLAY_WIDTH,
        DISPLAY_HEIGHT
    );
    log_heap("startup");

    const REQUIRED_STACK_SIZE: u32 = 16 * 1024;
    let configured_stack = esp_idf_svc::sys::CONFIG_ESP_MAIN_TASK_STACK_SIZE;
    if configured_stack < REQUIRED_STACK_SIZE {
        log::warn!(
            "Stack size too small: {} bytes (need >= {}). Check sdkconfig.defaults",
            configured_stack,
            REQUIRED_STACK_SIZE
        );
    }

    if let Err(e) = run() {
        log::error!("Setup aborted: {}", e);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;
    let config = board_config();
    log::info!("Board config: {:?}", config);

    // 3-wire init bus: CS 1, SCK 46, SDA 0
    let mut interface = PanelInterface::new(
        PinDriver::output(pins.gpio1)?,
        PinDriver::output(pins.gpio46)?,
        PinDriver::output(pins.gpio0)?,
    );
    interface.idle()?;

    let panel_config = Builder::new()
        .dimensions(Dimensions::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)?)
        .rotation(Rotation::Rotate0)
        .timing(BOARD_TIMING)
        .build()?;
    let display = RgbPanel::new(PanelDisplay::new(interface, panel_config), RGB_PINS);
    let touch = touch::board_touch(peripherals.i2c0, pins.gpio17, pins.gpio18)?;

    let mut main_loop = MainLoop::new(config, Board { display, touch }, EspClock);
    main_loop.init_panel();

    // Held for the life of the loop; dropping the driver releases the pin
    let _backlight = if config.backlight {
        let mut pin = PinDriver::output(pins.gpio38)?;
        pin.set_high()?;
        log::info!("Backlight on");
        Some(pin)
    } else {
        None
    };

    main_loop.init_touch();

    let buffer = if config.uses_panel_framebuffer() {
        main_loop
            .board_mut()
            .display
            .take_framebuffer()
            .map(FirmwareBuffer::Mapped)
            .ok_or(AllocError::NoPanelFramebuffer)
    } else {
        allocate(&mut CapsAllocator, main_loop.buffer_pixels()).map(|allocation| {
            log::info!(
                "Draw buffer: {} bytes in {:?} RAM",
                allocation.bytes(),
                allocation.region
            );
            FirmwareBuffer::Caps(allocation.buffer)
        })
    };
    main_loop.start_ui(buffer);

    log::info!("Setup done");
    log_heap("setup");

    main_loop.run(&mut FreeRtos)
}
