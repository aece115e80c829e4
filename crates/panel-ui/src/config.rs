//! Build-time board options resolved into one value.

/// How the UI runtime owns its draw buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Full-frame buffer, drawn at absolute coordinates, pushed every loop
    Direct,
    /// Stripe buffer, each rendered chunk copied to the panel
    #[default]
    Partial,
}

/// How a direct-mode frame reaches the glass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FramePush {
    /// The frame is the panel's mapped framebuffer; publish it
    #[default]
    Panel,
    /// Copy the frame with a full-screen blit
    Blit,
}

/// Rows in a partial-mode stripe buffer
pub const STRIPE_ROWS: u16 = 40;

/// Main loop pause between iterations
pub const LOOP_DELAY_MS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub render_mode: RenderMode,
    pub frame_push: FramePush,
    pub stripe_rows: u16,
    pub loop_delay_ms: u32,
    /// Drive the backlight pin high at startup
    pub backlight: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Partial,
            frame_push: FramePush::Panel,
            stripe_rows: STRIPE_ROWS,
            loop_delay_ms: LOOP_DELAY_MS,
            backlight: false,
        }
    }
}

impl BoardConfig {
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    pub fn with_frame_push(mut self, push: FramePush) -> Self {
        self.frame_push = push;
        self
    }

    pub fn with_backlight(mut self, on: bool) -> Self {
        self.backlight = on;
        self
    }

    pub fn is_direct(&self) -> bool {
        self.render_mode == RenderMode::Direct
    }

    /// Draw buffer size in pixels for a `width x height` screen
    pub fn buffer_pixels(&self, width: u16, height: u16) -> usize {
        match self.render_mode {
            RenderMode::Direct => width as usize * height as usize,
            RenderMode::Partial => width as usize * self.stripe_rows.min(height) as usize,
        }
    }

    /// Draw buffer size in bytes (RGB565)
    pub fn buffer_bytes(&self, width: u16, height: u16) -> usize {
        self.buffer_pixels(width, height) * 2
    }

    /// Whether the direct-mode frame comes from the panel instead of the heap
    pub fn uses_panel_framebuffer(&self) -> bool {
        self.is_direct() && self.frame_push == FramePush::Panel
    }
}
