//! External command module
//!
//! This module contains the operations that reach outside the process.

pub mod command;

// Re-export main functions
pub use command::run_finish_command;
