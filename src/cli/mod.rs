//! Handles the interactive command line.
//!
//! Includes parsing entered lines into commands, the line-input front ends,
//! terminal output helpers, and the `App` session that dispatches commands to their handlers.

mod app;
mod commands;
mod output;
mod prompt;

pub use app::*;
pub use commands::*;
pub use prompt::*;
