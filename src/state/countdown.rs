//! Countdown state machine
//!
//! The engine is synchronous and owns no timer. Whoever drives it calls
//! [`Countdown::tick`] once per [`TICK_INTERVAL`](super::time::TICK_INTERVAL)
//! while it reports [`LifecycleState::Running`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    fields::{DisplayFields, Field},
    lifecycle::{Controls, LifecycleState},
    time::TICK_MILLIS,
};

/// Lifecycle transitions, published to anyone interested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum CountdownEvent {
    Started { remaining_millis: u64 },
    Resumed { remaining_millis: u64 },
    Paused { remaining_millis: u64 },
    Stopped,
    Finished,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Ignored,
    /// Still running with this much time left
    Counting { remaining_millis: u64 },
    /// Reached zero and reset
    Finished,
}

/// Everything a presentation layer needs to render the countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownView {
    pub state: LifecycleState,
    pub remaining_millis: u64,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    #[serde(flatten)]
    pub controls: Controls,
}

/// The countdown engine
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    state: LifecycleState,
    remaining_millis: u64,
    fields: DisplayFields,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn remaining_millis(&self) -> u64 {
        self.remaining_millis
    }

    pub fn fields(&self) -> &DisplayFields {
        &self.fields
    }

    pub fn is_editable(&self) -> bool {
        self.state.controls().editable
    }

    pub fn view(&self) -> CountdownView {
        CountdownView {
            state: self.state,
            remaining_millis: self.remaining_millis,
            hours: self.fields.hours.clone(),
            minutes: self.fields.minutes.clone(),
            seconds: self.fields.seconds.clone(),
            controls: self.state.controls(),
        }
    }

    /// Start from the fields, or resume from the retained remaining time
    pub fn play(&mut self) -> Option<CountdownEvent> {
        match self.state {
            LifecycleState::Idle | LifecycleState::Finished => {
                self.remaining_millis = self.fields.to_hms().to_millis();
                self.fields = DisplayFields::from_millis(self.remaining_millis);
                self.state = LifecycleState::Running;
                Some(CountdownEvent::Started {
                    remaining_millis: self.remaining_millis,
                })
            }
            LifecycleState::Paused => {
                // Running owns the fields again; drop whatever was typed while paused.
                self.fields = DisplayFields::from_millis(self.remaining_millis);
                self.state = LifecycleState::Running;
                Some(CountdownEvent::Resumed {
                    remaining_millis: self.remaining_millis,
                })
            }
            LifecycleState::Running => None,
        }
    }

    pub fn pause(&mut self) -> Option<CountdownEvent> {
        if !self.state.is_running() {
            return None;
        }
        self.state = LifecycleState::Paused;
        Some(CountdownEvent::Paused {
            remaining_millis: self.remaining_millis,
        })
    }

    pub fn stop(&mut self) -> Option<CountdownEvent> {
        match self.state {
            LifecycleState::Running | LifecycleState::Paused => {
                self.reset(LifecycleState::Idle);
                Some(CountdownEvent::Stopped)
            }
            LifecycleState::Idle | LifecycleState::Finished => None,
        }
    }

    /// Advance a running countdown by one tick
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Ignored;
        }

        self.remaining_millis = self.remaining_millis.saturating_sub(TICK_MILLIS);
        if self.remaining_millis == 0 {
            self.reset(LifecycleState::Finished);
            return TickOutcome::Finished;
        }

        self.fields = DisplayFields::from_millis(self.remaining_millis);
        debug!(
            "Tick: {}:{}:{} left",
            self.fields.hours, self.fields.minutes, self.fields.seconds
        );
        TickOutcome::Counting {
            remaining_millis: self.remaining_millis,
        }
    }

    /// Clear a field when it gains focus
    pub fn focus_field(&mut self, field: Field) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.fields.clear(field);
        true
    }

    pub fn change_field(&mut self, field: Field, raw: &str) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.fields.set_raw(field, raw);
        true
    }

    /// Reformat fields once editing ends (focus lost or entry confirmed)
    pub fn edit_done(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.fields.finish_edit();
        true
    }

    fn reset(&mut self, state: LifecycleState) {
        self.state = state;
        self.remaining_millis = 0;
        self.fields.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn countdown_with(hours: &str, minutes: &str, seconds: &str) -> Countdown {
        let mut countdown = Countdown::new();
        countdown.change_field(Field::Hours, hours);
        countdown.change_field(Field::Minutes, minutes);
        countdown.change_field(Field::Seconds, seconds);
        countdown.edit_done();
        countdown
    }

    #[test]
    fn starts_idle_with_placeholders() {
        let view = Countdown::new().view();
        assert_eq!(view.state, LifecycleState::Idle);
        assert_eq!(view.remaining_millis, 0);
        assert_eq!(
            (view.hours.as_str(), view.minutes.as_str(), view.seconds.as_str()),
            ("00", "00", "00")
        );
        assert!(view.controls.play_visible);
        assert!(!view.controls.pause_visible);
        assert!(!view.controls.stop_visible);
    }

    #[test]
    fn play_computes_remaining_from_fields() {
        let mut countdown = countdown_with("1", "2", "3");
        let event = countdown.play();

        assert_eq!(
            event,
            Some(CountdownEvent::Started {
                remaining_millis: 3_723_000
            })
        );
        assert_eq!(countdown.state(), LifecycleState::Running);
        assert!(!countdown.is_editable());
    }

    #[test]
    fn play_treats_cleared_fields_as_zero() {
        let mut countdown = Countdown::new();
        countdown.change_field(Field::Seconds, "5");
        countdown.focus_field(Field::Minutes);
        countdown.play();

        assert_eq!(countdown.remaining_millis(), 5_000);
        assert_eq!(countdown.fields().seconds, "05");
        assert_eq!(countdown.fields().minutes, "00");
    }

    #[test]
    fn tick_decrements_and_reprojects() {
        let mut countdown = countdown_with("0", "1", "0");
        countdown.play();

        assert_eq!(
            countdown.tick(),
            TickOutcome::Counting {
                remaining_millis: 59_000
            }
        );
        assert_eq!(countdown.fields().minutes, "00");
        assert_eq!(countdown.fields().seconds, "59");
    }

    #[test]
    fn zero_duration_finishes_on_first_tick() {
        let mut countdown = Countdown::new();
        countdown.play();
        assert_eq!(countdown.state(), LifecycleState::Running);

        assert_eq!(countdown.tick(), TickOutcome::Finished);
        assert_eq!(countdown.state(), LifecycleState::Finished);
        assert_eq!(countdown.remaining_millis(), 0);
    }

    #[test]
    fn finishing_resets_fields_and_shows_play() {
        let mut countdown = countdown_with("0", "0", "2");
        countdown.play();
        countdown.tick();
        assert_eq!(countdown.tick(), TickOutcome::Finished);

        let view = countdown.view();
        assert_eq!(view.hours, "00");
        assert_eq!(view.minutes, "00");
        assert_eq!(view.seconds, "00");
        assert_eq!(view.controls, LifecycleState::Idle.controls());
        assert_eq!(countdown.tick(), TickOutcome::Ignored);
    }

    #[test]
    fn pause_then_play_resumes_exactly() {
        let mut countdown = countdown_with("0", "0", "10");
        countdown.play();
        countdown.tick();
        countdown.tick();

        assert_eq!(
            countdown.pause(),
            Some(CountdownEvent::Paused {
                remaining_millis: 8_000
            })
        );
        assert_eq!(countdown.tick(), TickOutcome::Ignored);
        assert_eq!(countdown.fields().seconds, "08");

        assert_eq!(
            countdown.play(),
            Some(CountdownEvent::Resumed {
                remaining_millis: 8_000
            })
        );
        assert_eq!(
            countdown.tick(),
            TickOutcome::Counting {
                remaining_millis: 7_000
            }
        );
    }

    #[test]
    fn edits_while_paused_do_not_change_remaining_time() {
        let mut countdown = countdown_with("0", "0", "10");
        countdown.play();
        countdown.pause();

        assert!(countdown.change_field(Field::Hours, "5"));
        countdown.play();

        assert_eq!(countdown.remaining_millis(), 10_000);
        assert_eq!(countdown.fields().hours, "00");
    }

    #[test]
    fn stop_resets_from_running_and_paused() {
        for pause_first in [false, true] {
            let mut countdown = countdown_with("1", "0", "0");
            countdown.play();
            countdown.tick();
            if pause_first {
                countdown.pause();
            }

            assert_eq!(countdown.stop(), Some(CountdownEvent::Stopped));
            let view = countdown.view();
            assert_eq!(view.state, LifecycleState::Idle);
            assert_eq!(view.remaining_millis, 0);
            assert_eq!(view.hours, "00");
            assert_eq!(view.controls, LifecycleState::Idle.controls());
        }
    }

    #[test]
    fn inapplicable_intents_are_ignored() {
        let mut countdown = Countdown::new();
        assert_eq!(countdown.pause(), None);
        assert_eq!(countdown.stop(), None);

        countdown.play();
        assert_eq!(countdown.play(), None);
        assert!(!countdown.focus_field(Field::Hours));
        assert!(!countdown.change_field(Field::Hours, "3"));
        assert!(!countdown.edit_done());
    }

    #[test]
    fn focus_clears_and_edit_done_restores() {
        let mut countdown = Countdown::new();
        countdown.focus_field(Field::Minutes);
        assert_eq!(countdown.fields().minutes, "");

        countdown.edit_done();
        assert_eq!(countdown.fields().minutes, "00");
    }

    #[test]
    fn can_play_again_after_finish() {
        let mut countdown = Countdown::new();
        countdown.play();
        countdown.tick();

        countdown.change_field(Field::Seconds, "3");
        countdown.edit_done();
        assert_eq!(
            countdown.play(),
            Some(CountdownEvent::Started {
                remaining_millis: 3_000
            })
        );
    }

    #[test]
    fn view_serializes_flat() {
        let json = serde_json::to_value(Countdown::new().view()).unwrap();
        assert_eq!(json["state"], "idle");
        assert_eq!(json["play_visible"], true);
        assert_eq!(json["editable"], true);
    }
}
