//! Embassy Tasks
//!
//! Static channels shared between tasks, plus the producer and display
//! tasks. The main loop itself runs in the firmware's `main`.

use defmt::{info, trace, warn};
use embassy_futures::select::{select, select3, Either, Either3};
use embassy_stm32::i2c::I2c;
use embassy_stm32::mode::Async;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Duration, Instant, Ticker, Timer};

use crate::app::event_loop::{post_input_until, post_tick, AppEvent, DisplayCommand, EventQueue};
use crate::app::input::{InputEvent, InputKey, PressClassifier, ReleaseEvents};
use crate::app::render::{render_frame, FrameOutcome, Renderer};
use crate::app::state::AppState;
use crate::config::{EVENT_QUEUE_DEPTH, TICK_INTERVAL_MS};
use crate::drivers::display::Display;
use crate::hal::gpio::{BackButton, ButtonState};

/// Events from the tick and button tasks to the main loop
pub static EVENT_QUEUE: EventQueue<CriticalSectionRawMutex> = EventQueue::new();

/// Shared tuner status
pub static APP_STATE: Mutex<CriticalSectionRawMutex, AppState> = Mutex::new(AppState::new());

/// Redraw and shutdown requests for the display task
pub static DISPLAY_CMD: Signal<CriticalSectionRawMutex, DisplayCommand> = Signal::new();

/// Stops the tick task
pub static TICK_STOP: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Stops the button task
pub static BUTTON_STOP: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Tick task - queues a status refresh every second
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let sender = EVENT_QUEUE.sender();
    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        match select(ticker.next(), TICK_STOP.wait()).await {
            Either::First(()) => {
                if !post_tick(&sender) {
                    trace!("Event queue full, tick dropped");
                }
            }
            Either::Second(()) => {
                info!("Tick task stopped");
                return;
            }
        }
    }
}

/// Button task - classifies back button edges and queues key events
#[embassy_executor::task]
pub async fn button_task(mut button: BackButton<'static>) {
    info!("Button task started");

    let sender = EVENT_QUEUE.sender();
    let mut classifier = PressClassifier::new(InputKey::Back);

    loop {
        let deadline = classifier
            .deadline()
            .map_or(Instant::MAX, Instant::from_millis);

        let now = || Instant::now().as_millis();
        let events: ReleaseEvents = match select3(
            button.wait_for_change(),
            Timer::at(deadline),
            BUTTON_STOP.wait(),
        )
        .await
        {
            Either3::First(ButtonState::Pressed) => classifier.press(now()).into_iter().collect(),
            Either3::First(ButtonState::Released) => classifier.release(now()),
            Either3::Second(()) => classifier.poll(now()).into_iter().collect(),
            Either3::Third(()) => {
                info!("Button task stopped");
                return;
            }
        };

        for event in events {
            if !post_key(&sender, event).await {
                info!("Button task stopped");
                return;
            }
        }
    }
}

/// Queue one key event unless the button task is being stopped
async fn post_key(
    sender: &Sender<'static, CriticalSectionRawMutex, AppEvent, EVENT_QUEUE_DEPTH>,
    event: InputEvent,
) -> bool {
    trace!("Key event: {}", event);
    post_input_until(sender, event, &BUTTON_STOP).await
}

/// Display task - paints the status screen whenever the main loop asks
#[embassy_executor::task]
pub async fn display_task(mut display: Display<I2c<'static, Async>>) {
    info!("Display task started");

    if let Err(e) = display.init().await {
        warn!("Display init failed: {}", e);
    }

    let mut renderer = Renderer::new();
    let mut delay = Delay;

    loop {
        match DISPLAY_CMD.wait().await {
            DisplayCommand::Redraw => {
                match render_frame(&APP_STATE, &mut renderer, display.buffer_mut(), &mut delay).await
                {
                    FrameOutcome::Drawn => {
                        if let Err(e) = display.flush().await {
                            warn!("Display flush failed: {}", e);
                        }
                    }
                    FrameOutcome::Skipped => trace!("State busy, frame skipped"),
                }
            }
            DisplayCommand::Shutdown => {
                display.clear();
                if let Err(e) = display.flush().await {
                    warn!("Display flush failed: {}", e);
                }
                if let Err(e) = display.power_off().await {
                    warn!("Display power off failed: {}", e);
                }
                info!("Display task stopped");
                return;
            }
        }
    }
}
