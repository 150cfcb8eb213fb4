//! Application layer: command parsing and the split session
//!
//! This layer turns edit events into allocation engine calls.

pub mod command;
pub mod error;
pub mod services;

pub use command::{SplitCommand, COMMAND_HELP};
pub use error::{ApplicationError, ApplicationResult};
