//! Subprocess execution for external tools.

pub mod command;

pub use command::{block_on, capture, execute, run, CommandResult, CommandSpec};
