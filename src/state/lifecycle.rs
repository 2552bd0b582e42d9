//! Countdown lifecycle and the controls derived from it

use serde::{Deserialize, Serialize};

/// Lifecycle of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// Waiting for the user to set fields and press play
    #[default]
    Idle,
    /// Ticking once per second
    Running,
    /// Ticking suspended, remaining time retained
    Paused,
    /// Reached zero on its own; presented exactly like `Idle`
    Finished,
}

impl LifecycleState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn controls(&self) -> Controls {
        Controls::for_state(*self)
    }
}

/// Which controls are visible and whether fields accept edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub play_visible: bool,
    pub pause_visible: bool,
    pub stop_visible: bool,
    pub editable: bool,
}

impl Controls {
    pub fn for_state(state: LifecycleState) -> Self {
        match state {
            LifecycleState::Idle | LifecycleState::Finished => Self {
                play_visible: true,
                pause_visible: false,
                stop_visible: false,
                editable: true,
            },
            LifecycleState::Running => Self {
                play_visible: false,
                pause_visible: true,
                stop_visible: true,
                editable: false,
            },
            LifecycleState::Paused => Self {
                play_visible: true,
                pause_visible: false,
                stop_visible: true,
                editable: true,
            },
        }
    }
}
