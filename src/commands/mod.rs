//! # Command Implementations
//!
//! Each submodule handles one CLI command (hash, distance, check).

pub mod check;
pub mod distance;
pub mod hash;
