//! Background tasks module
//!
//! This module contains the tick scheduling that drives a running countdown
//! and the tasks that react to countdown events.

pub mod finish_hook;
pub mod ticker;

// Re-export main items
pub use finish_hook::finish_hook_task;
pub use ticker::{ManualTickScheduler, TickFlow, TickHandle, TickScheduler, TokioTickScheduler};
