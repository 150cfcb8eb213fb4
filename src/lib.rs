//! billsplit: split a bill into percentage shares
//!
//! Layers (inner to outer):
//! - `domain`: allocation engine and currency formatting (no I/O)
//! - `application`: command parsing and the split session
//! - `infrastructure`: filesystem boundary and service wiring
//! - `cli`: argument parsing, dispatch and terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
