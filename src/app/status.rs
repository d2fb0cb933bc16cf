//! Status Updater
//!
//! One probe → init → tune → read-back cycle against the tuner. Each step
//! only runs if the previous one succeeded, and the status is left at the
//! last step that worked. The cycle starts from scratch on every call, so
//! the status always describes the most recent attempt.

use crate::app::state::AppState;
use crate::drivers::tuner::Tuner;
use crate::types::{Frequency, RadioStatus};

/// Step of the cycle that stopped progress
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub enum Step {
    /// Device did not answer the bus probe
    Probe,
    /// Register initialization write failed
    Init,
    /// Frequency write failed
    SetFrequency,
    /// Frequency read-back failed
    GetFrequency,
}

/// Result of one update cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "embedded", derive(defmt::Format))]
pub struct UpdateOutcome {
    /// Status reached
    pub status: RadioStatus,
    /// First step that failed, if any
    pub failed: Option<Step>,
}

impl UpdateOutcome {
    const fn stopped_at(status: RadioStatus, step: Step) -> Self {
        Self {
            status,
            failed: Some(step),
        }
    }

    /// Whether every step succeeded
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failed.is_none()
    }
}

/// Run one cycle and record its progress in `state`
///
/// The caller must hold the state lock for the whole cycle.
pub async fn update_status<T: Tuner>(
    state: &mut AppState,
    tuner: &mut T,
    station: Frequency,
) -> UpdateOutcome {
    state.set_address(None);
    state.set_status(RadioStatus::NotFound);

    if !tuner.is_device_ready().await {
        return UpdateOutcome::stopped_at(RadioStatus::NotFound, Step::Probe);
    }
    state.set_address(Some(T::ADDRESS));
    state.set_status(RadioStatus::Found);

    if tuner.init(state.registers_mut()).await.is_err() {
        return UpdateOutcome::stopped_at(RadioStatus::Found, Step::Init);
    }
    state.set_status(RadioStatus::WriteSuccess);

    if tuner
        .set_frequency(state.registers_mut(), station)
        .await
        .is_err()
    {
        return UpdateOutcome::stopped_at(RadioStatus::WriteSuccess, Step::SetFrequency);
    }
    state.set_status(RadioStatus::WriteSuccess);
    state.set_tuned(None);

    match tuner.get_frequency(state.registers_mut()).await {
        Ok(freq) => {
            state.set_tuned(Some(freq));
            state.set_status(RadioStatus::ReadSuccess);
            UpdateOutcome {
                status: RadioStatus::ReadSuccess,
                failed: None,
            }
        }
        Err(_) => UpdateOutcome::stopped_at(RadioStatus::WriteSuccess, Step::GetFrequency),
    }
}
