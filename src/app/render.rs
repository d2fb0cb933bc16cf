//! Status Screen Rendering
//!
//! Paints the shared state as centered text lines. The frame is only drawn
//! if the state lock can be taken within [`RENDER_LOCK_TIMEOUT_MS`];
//! otherwise the frame is dropped and the previous one stays on screen.

use core::fmt::Write;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embedded_hal_async::delay::DelayNs;
use heapless::String;

use crate::app::state::AppState;
use crate::config::{
    pins, DISPLAY_WIDTH, LOCK_POLL_INTERVAL_MS, RENDER_LOCK_TIMEOUT_MS, TEXT_BUFFER_SIZE,
};
use crate::drivers::display::Canvas;
use crate::types::RadioStatus;

/// Horizontal center of the screen
const CENTER_X: i32 = (DISPLAY_WIDTH / 2) as i32;

/// Baselines of the four text rows
const ROWS: [i32; 4] = [20, 30, 40, 50];

/// What happened to a frame request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum FrameOutcome {
    /// Frame painted
    Drawn,
    /// State lock busy; nothing painted
    Skipped,
}

/// Status screen renderer
pub struct Renderer {
    /// Scratch buffer for formatted lines
    line: String<TEXT_BUFFER_SIZE>,
}

impl Renderer {
    /// Create a renderer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            line: String::new(),
        }
    }

    /// Paint `state` onto `canvas`
    pub fn draw<C: Canvas>(&mut self, state: &AppState, canvas: &mut C) {
        canvas.clear();

        let Some(address) = state.address() else {
            self.draw_wiring_hint(canvas);
            return;
        };

        canvas.draw_text_centered(CENTER_X, ROWS[0], "FOUND I2C DEVICE");

        self.line.clear();
        let _ = write!(self.line, "Address 0x{:02x}", address.addr());
        canvas.draw_text_centered(CENTER_X, ROWS[1], &self.line);

        if state.status() != RadioStatus::NotFound {
            canvas.draw_text_centered(CENTER_X, ROWS[2], state.status().label());
        }

        self.line.clear();
        let _ = self.line.push_str("registers: ");
        for byte in state.registers().as_bytes() {
            let _ = write!(self.line, "{byte:02X}");
        }
        canvas.draw_text_centered(CENTER_X, ROWS[3], &self.line);
    }

    fn draw_wiring_hint<C: Canvas>(&mut self, canvas: &mut C) {
        canvas.draw_text_centered(CENTER_X, ROWS[0], "I2C NOT FOUND");

        self.line.clear();
        let _ = write!(
            self.line,
            "pin{}=SDA. pin{}=SCL",
            pins::HEADER_SDA,
            pins::HEADER_SCL
        );
        canvas.draw_text_centered(CENTER_X, ROWS[1], &self.line);

        self.line.clear();
        let _ = write!(
            self.line,
            "pin{}=VCC. pin{}=GND",
            pins::HEADER_VCC,
            pins::HEADER_GND
        );
        canvas.draw_text_centered(CENTER_X, ROWS[2], &self.line);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Try to lock `mutex`, giving up after `timeout_ms`
pub async fn acquire_within<'a, M, T, D>(
    mutex: &'a Mutex<M, T>,
    timeout_ms: u32,
    delay: &mut D,
) -> Option<MutexGuard<'a, M, T>>
where
    M: RawMutex,
    D: DelayNs,
{
    let mut waited = 0;
    loop {
        if let Ok(guard) = mutex.try_lock() {
            return Some(guard);
        }
        if waited >= timeout_ms {
            return None;
        }
        delay.delay_ms(LOCK_POLL_INTERVAL_MS).await;
        waited += LOCK_POLL_INTERVAL_MS;
    }
}

/// Render one frame of the shared state, or skip it if the lock stays busy
pub async fn render_frame<M, C, D>(
    shared: &Mutex<M, AppState>,
    renderer: &mut Renderer,
    canvas: &mut C,
    delay: &mut D,
) -> FrameOutcome
where
    M: RawMutex,
    C: Canvas,
    D: DelayNs,
{
    let Some(state) = acquire_within(shared, RENDER_LOCK_TIMEOUT_MS, delay).await else {
        return FrameOutcome::Skipped;
    };

    renderer.draw(&state, canvas);
    FrameOutcome::Drawn
}
