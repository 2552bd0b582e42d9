//! Countdown - A countdown timer engine driven over HTTP
//!
//! This library provides the countdown state machine, its time and field
//! models, cancellable tick scheduling, and an HTTP API that forwards
//! play/pause/stop and field-editing intents to the engine.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Countdown, CountdownView, LifecycleState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
