//! State management module
//!
//! This module contains the countdown engine, its time and field models,
//! and the shared session that drives it.

pub mod app_state;
pub mod countdown;
pub mod fields;
pub mod lifecycle;
pub mod time;

// Re-export main types
pub use app_state::{AppState, IntentResult, StateError};
pub use countdown::{Countdown, CountdownEvent, CountdownView, TickOutcome};
pub use fields::{DisplayFields, Field, PLACEHOLDER};
pub use lifecycle::{Controls, LifecycleState};
