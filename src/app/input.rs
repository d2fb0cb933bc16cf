//! Input Events
//!
//! Key events as the main loop sees them, and the classifier that turns
//! debounced button edges into press, release, short, long and repeat
//! events.

use crate::config::{LONG_PRESS_MS, REPEAT_INTERVAL_MS};

/// Physical key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum InputKey {
    /// Up
    Up,
    /// Down
    Down,
    /// Left
    Left,
    /// Right
    Right,
    /// Center/OK
    Ok,
    /// Back
    Back,
}

/// Kind of key event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum InputType {
    /// Key went down
    Press,
    /// Key went up
    Release,
    /// Key released before the long-press threshold
    Short,
    /// Key held past the long-press threshold
    Long,
    /// Key still held after a long press
    Repeat,
}

/// Key event payload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub struct InputEvent {
    /// Which key
    pub key: InputKey,
    /// What happened
    pub kind: InputType,
    /// Press counter; every event of one press carries the same value
    pub sequence: u32,
}

impl InputEvent {
    /// Whether this is a short press of the back key
    #[must_use]
    pub const fn is_back_short(&self) -> bool {
        matches!(
            (self.key, self.kind),
            (InputKey::Back, InputType::Short)
        )
    }
}

/// Events emitted on release: a late long, the release, then short for a tap
pub type ReleaseEvents = heapless::Vec<InputEvent, 2>;

/// Press classifier for a single key
///
/// Timestamps are milliseconds from any monotonic clock.
#[derive(Clone, Copy, Debug)]
pub struct PressClassifier {
    key: InputKey,
    pressed_at: Option<u64>,
    long_sent: bool,
    deadline: Option<u64>,
    sequence: u32,
}

impl PressClassifier {
    /// Create a classifier for `key`, initially released
    #[must_use]
    pub const fn new(key: InputKey) -> Self {
        Self {
            key,
            pressed_at: None,
            long_sent: false,
            deadline: None,
            sequence: 0,
        }
    }

    const fn event(&self, kind: InputType) -> InputEvent {
        InputEvent {
            key: self.key,
            kind,
            sequence: self.sequence,
        }
    }

    /// Whether the key is currently held
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Next instant at which [`PressClassifier::poll`] has something to emit
    #[must_use]
    pub const fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Key went down; ignored while already held
    pub fn press(&mut self, now_ms: u64) -> Option<InputEvent> {
        if self.is_pressed() {
            return None;
        }

        self.sequence = self.sequence.wrapping_add(1);
        self.pressed_at = Some(now_ms);
        self.long_sent = false;
        self.deadline = Some(now_ms + LONG_PRESS_MS);
        Some(self.event(InputType::Press))
    }

    /// Key went up; ignored while already released
    ///
    /// A hold that passed the long-press threshold without a [`poll`] still
    /// reports `Long` ahead of the release.
    ///
    /// [`poll`]: PressClassifier::poll
    pub fn release(&mut self, now_ms: u64) -> ReleaseEvents {
        let mut events = ReleaseEvents::new();
        let Some(pressed_at) = self.pressed_at.take() else {
            return events;
        };
        self.deadline = None;

        let held = now_ms.saturating_sub(pressed_at);
        let long_missed = !self.long_sent && held >= LONG_PRESS_MS;
        if long_missed {
            let _ = events.push(self.event(InputType::Long));
        }
        let _ = events.push(self.event(InputType::Release));
        if !self.long_sent && !long_missed {
            let _ = events.push(self.event(InputType::Short));
        }
        events
    }

    /// Emit a long or repeat event once the deadline has passed
    pub fn poll(&mut self, now_ms: u64) -> Option<InputEvent> {
        let deadline = self.deadline?;
        if now_ms < deadline {
            return None;
        }

        self.deadline = Some(now_ms + REPEAT_INTERVAL_MS);
        if self.long_sent {
            Some(self.event(InputType::Repeat))
        } else {
            self.long_sent = true;
            Some(self.event(InputType::Long))
        }
    }
}
