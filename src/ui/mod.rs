//! # User Interface
//!
//! Colored terminal logging with verbose and quiet switches.

pub mod log;

pub use log::{banner, debug, error, header, info, success, warn, Log};
