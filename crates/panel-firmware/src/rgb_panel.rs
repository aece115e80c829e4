//! ST7701S panel on the ESP32-S3 LCD peripheral.
//!
//! `begin` configures the controller over the bit-banged 3-wire bus, then
//! creates an `esp_lcd` RGB panel whose framebuffer lives in PSRAM and is
//! scanned out by DMA. Pixel writes go through `esp_lcd_panel_draw_bitmap`,
//! which copies into that framebuffer, or only writes back the cache when the
//! source already is the framebuffer.

use core::ffi::c_void;
use core::ptr;

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::sys::{self, esp, EspError};
use embedded_graphics::pixelcolor::{raw::RawU16, Rgb565};
use log::{debug, info};

use panel_ui::panel::{DisplayInterface, PanelDisplay, PanelDriver, RgbPins, Rotation};

#[derive(Debug)]
pub enum RgbPanelError {
    /// Drawing was attempted before a successful `begin`
    NotStarted,
    /// Controller init over the 3-wire bus failed
    Controller(String),
    Esp(EspError),
    /// Fewer pixels than `w * h` were supplied
    ShortBuffer { needed: usize, got: usize },
}

impl core::fmt::Display for RgbPanelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RgbPanelError::NotStarted => write!(f, "RGB panel not started"),
            RgbPanelError::Controller(e) => write!(f, "ST7701S init failed: {}", e),
            RgbPanelError::Esp(e) => write!(f, "esp_lcd error: {}", e),
            RgbPanelError::ShortBuffer { needed, got } => {
                write!(f, "bitmap needs {} pixels, got {}", needed, got)
            }
        }
    }
}

impl std::error::Error for RgbPanelError {}

impl From<EspError> for RgbPanelError {
    fn from(e: EspError) -> Self {
        RgbPanelError::Esp(e)
    }
}

pub struct RgbPanel<I: DisplayInterface> {
    controller: PanelDisplay<I>,
    pins: RgbPins,
    handle: sys::esp_lcd_panel_handle_t,
    /// The mapped framebuffer was lent out as `&'static mut`
    framebuffer_taken: bool,
}

impl<I: DisplayInterface> RgbPanel<I> {
    pub fn new(controller: PanelDisplay<I>, pins: RgbPins) -> Self {
        Self {
            controller,
            pins,
            handle: ptr::null_mut(),
            framebuffer_taken: false,
        }
    }

    fn handle(&self) -> Result<sys::esp_lcd_panel_handle_t, RgbPanelError> {
        if self.handle.is_null() {
            Err(RgbPanelError::NotStarted)
        } else {
            Ok(self.handle)
        }
    }

    fn rgb_config(&self) -> sys::esp_lcd_rgb_panel_config_t {
        let dims = self.controller.dimensions();
        let timing = &self.controller.config().timing;

        let mut config = sys::esp_lcd_rgb_panel_config_t::default();
        config.clk_src = sys::soc_periph_lcd_clk_src_t_LCD_CLK_SRC_DEFAULT;

        config.timings.pclk_hz = timing.pclk_hz;
        config.timings.h_res = u32::from(dims.width);
        config.timings.v_res = u32::from(dims.height);
        config.timings.hsync_front_porch = u32::from(timing.hsync.front_porch);
        config.timings.hsync_pulse_width = u32::from(timing.hsync.pulse_width);
        config.timings.hsync_back_porch = u32::from(timing.hsync.back_porch);
        config.timings.vsync_front_porch = u32::from(timing.vsync.front_porch);
        config.timings.vsync_pulse_width = u32::from(timing.vsync.pulse_width);
        config.timings.vsync_back_porch = u32::from(timing.vsync.back_porch);
        config
            .timings
            .flags
            .set_hsync_idle_low(u32::from(timing.hsync.polarity.idles_low()));
        config
            .timings
            .flags
            .set_vsync_idle_low(u32::from(timing.vsync.polarity.idles_low()));
        config.timings.flags.set_de_idle_high(u32::from(timing.de_idle_high));
        config
            .timings
            .flags
            .set_pclk_active_neg(u32::from(timing.pclk_active_neg));

        config.data_width = 16;
        config.bits_per_pixel = 16;
        config.num_fbs = 1;
        config.de_gpio_num = self.pins.de;
        config.vsync_gpio_num = self.pins.vsync;
        config.hsync_gpio_num = self.pins.hsync;
        config.pclk_gpio_num = self.pins.pclk;
        config.disp_gpio_num = -1;
        config.data_gpio_nums = self.pins.data_pins();
        config.flags.set_fb_in_psram(1);
        config
    }

    /// Lend out the panel's own framebuffer for direct rendering
    ///
    /// Returns `None` before `begin` succeeded or on a second call.
    pub fn take_framebuffer(&mut self) -> Option<&'static mut [u16]> {
        if self.handle.is_null() || self.framebuffer_taken {
            return None;
        }
        let mut fb: *mut c_void = ptr::null_mut();
        let res = unsafe { sys::esp_lcd_rgb_panel_get_frame_buffer(self.handle, 1, &mut fb) };
        if res != sys::ESP_OK || fb.is_null() {
            return None;
        }
        self.framebuffer_taken = true;
        let pixels = self.controller.dimensions().pixel_count();
        // The panel is never deleted once this is taken (see Drop)
        Some(unsafe { core::slice::from_raw_parts_mut(fb.cast::<u16>(), pixels) })
    }

    fn draw(&mut self, x: u16, y: u16, pixels: &[u16], w: u16, h: u16) -> Result<(), RgbPanelError> {
        let handle = self.handle()?;
        let needed = usize::from(w) * usize::from(h);
        if pixels.len() < needed {
            return Err(RgbPanelError::ShortBuffer {
                needed,
                got: pixels.len(),
            });
        }
        if needed == 0 {
            return Ok(());
        }
        let (x, y) = (i32::from(x), i32::from(y));
        esp!(unsafe {
            sys::esp_lcd_panel_draw_bitmap(
                handle,
                x,
                y,
                x + i32::from(w),
                y + i32::from(h),
                pixels.as_ptr().cast::<c_void>(),
            )
        })?;
        Ok(())
    }
}

impl<I: DisplayInterface> PanelDriver for RgbPanel<I> {
    type Error = RgbPanelError;

    fn begin(&mut self) -> Result<(), Self::Error> {
        if !self.handle.is_null() {
            return Ok(());
        }

        self.controller
            .begin(&mut FreeRtos)
            .map_err(|e| RgbPanelError::Controller(e.to_string()))?;
        debug!("ST7701S configured, creating RGB panel");

        let config = self.rgb_config();
        let mut handle: sys::esp_lcd_panel_handle_t = ptr::null_mut();
        esp!(unsafe { sys::esp_lcd_new_rgb_panel(&config, &mut handle) })?;

        let started = esp!(unsafe { sys::esp_lcd_panel_reset(handle) })
            .and_then(|()| esp!(unsafe { sys::esp_lcd_panel_init(handle) }));
        if let Err(e) = started {
            unsafe {
                sys::esp_lcd_panel_del(handle);
            }
            return Err(e.into());
        }
        self.handle = handle;

        let dims = self.controller.dimensions();
        info!(
            "RGB panel {}x{} at {} Hz pixel clock ({} fps)",
            dims.width,
            dims.height,
            config.timings.pclk_hz,
            self.controller
                .config()
                .timing
                .frame_rate_hz(dims.width, dims.height)
        );
        Ok(())
    }

    fn width(&self) -> u16 {
        self.controller.config().rotated_dimensions().width
    }

    fn height(&self) -> u16 {
        self.controller.config().rotated_dimensions().height
    }

    fn rotation(&self) -> Rotation {
        self.controller.rotation()
    }

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        let dims = *self.controller.dimensions();
        let row = vec![RawU16::from(color).into_inner(); usize::from(dims.width)];
        for y in 0..dims.height {
            self.draw(0, y, &row, dims.width, 1)?;
        }
        Ok(())
    }

    fn blit(&mut self, x: u16, y: u16, pixels: &[u16], w: u16, h: u16) -> Result<(), Self::Error> {
        self.draw(x, y, pixels, w, h)
    }

    fn push_full_frame(&mut self, frame: &[u16]) -> Result<(), Self::Error> {
        let dims = *self.controller.dimensions();
        self.draw(0, 0, frame, dims.width, dims.height)
    }
}

impl<I: DisplayInterface> Drop for RgbPanel<I> {
    fn drop(&mut self) {
        if !self.handle.is_null() && !self.framebuffer_taken {
            unsafe {
                sys::esp_lcd_panel_del(self.handle);
            }
        }
    }
}
