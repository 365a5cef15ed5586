//! # tlsh-cli Library
//!
//! TLSH fuzzy hashing: file digests, pairwise distance, and nearest-match
//! lookup against a CSV dataset of known hashes.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod output;
pub mod search;
pub mod storage;
pub mod ui;
