//! Main Event Loop
//!
//! Single consumer of the event queue. Ticks run the status updater under
//! the state lock; a short press of back stops the loop. Every event ends
//! with a redraw request so the screen follows the state.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use crate::app::input::InputEvent;
use crate::app::state::AppState;
use crate::app::status::{update_status, UpdateOutcome};
use crate::config::EVENT_QUEUE_DEPTH;
use crate::drivers::tuner::Tuner;
use crate::types::Frequency;

/// Event delivered to the main loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum AppEvent {
    /// Periodic status refresh
    Tick,
    /// Key event from the input task
    Key(InputEvent),
}

/// Event queue shared by the producers and the main loop
pub type EventQueue<M> = Channel<M, AppEvent, EVENT_QUEUE_DEPTH>;

/// Request for the display task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum DisplayCommand {
    /// Paint a fresh frame
    Redraw,
    /// Blank and power the panel off
    Shutdown,
}

/// Main loop state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum LoopState {
    /// Processing events
    Running,
    /// Back key pressed; loop finished
    Stopped,
}

/// How one event was handled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub struct Dispatch {
    /// Loop state after the event
    pub state: LoopState,
    /// Status cycle result for ticks
    pub update: Option<UpdateOutcome>,
}

/// Graceful exit of the main loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub struct AppExit;

impl AppExit {
    /// Process exit code
    #[must_use]
    pub const fn code(self) -> i32 {
        0
    }
}

/// Queue a tick without waiting; returns false if the queue was full
pub fn post_tick<M: RawMutex, const N: usize>(sender: &Sender<'_, M, AppEvent, N>) -> bool {
    sender.try_send(AppEvent::Tick).is_ok()
}

/// Queue a key event, waiting for space
pub async fn post_input<M: RawMutex, const N: usize>(
    sender: &Sender<'_, M, AppEvent, N>,
    event: InputEvent,
) {
    sender.send(AppEvent::Key(event)).await;
}

/// Queue a key event, waiting for space until `stop` fires
///
/// Returns false if `stop` fired first; the event is then dropped.
pub async fn post_input_until<M: RawMutex, R: RawMutex, const N: usize>(
    sender: &Sender<'_, M, AppEvent, N>,
    event: InputEvent,
    stop: &Signal<R, ()>,
) -> bool {
    matches!(
        select(post_input(sender, event), stop.wait()).await,
        Either::First(())
    )
}

/// Loop state after `event`
#[must_use]
pub const fn next_state(event: &AppEvent) -> LoopState {
    match event {
        AppEvent::Key(input) if input.is_back_short() => LoopState::Stopped,
        _ => LoopState::Running,
    }
}

/// Handle one event
pub async fn dispatch<S: RawMutex, T: Tuner>(
    event: &AppEvent,
    shared: &Mutex<S, AppState>,
    tuner: &mut T,
    station: Frequency,
) -> Dispatch {
    let update = match event {
        AppEvent::Tick => {
            let mut state = shared.lock().await;
            Some(update_status(&mut state, tuner, station).await)
        }
        AppEvent::Key(_) => None,
    };

    Dispatch {
        state: next_state(event),
        update,
    }
}

/// Run until back is short-pressed
///
/// `on_dispatch` sees every event and how it was handled, before the redraw
/// request goes out.
pub async fn run<M, S, R, T, F, const N: usize>(
    events: Receiver<'_, M, AppEvent, N>,
    shared: &Mutex<S, AppState>,
    tuner: &mut T,
    station: Frequency,
    redraw: &Signal<R, DisplayCommand>,
    mut on_dispatch: F,
) -> AppExit
where
    M: RawMutex,
    S: RawMutex,
    R: RawMutex,
    T: Tuner,
    F: FnMut(&AppEvent, &Dispatch),
{
    loop {
        let event = events.receive().await;
        let handled = dispatch(&event, shared, tuner, station).await;
        on_dispatch(&event, &handled);
        redraw.signal(DisplayCommand::Redraw);

        if handled.state == LoopState::Stopped {
            return AppExit;
        }
    }
}
