//! Unified logging system
//!
//! Everything here writes to stderr; stdout is reserved for command results
//! so that `--quiet` and `--csv` output can be piped.

use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}

	pub fn set_quiet(enabled: bool) {
		QUIET.store(enabled, Ordering::Relaxed);
	}

	pub fn is_quiet() -> bool {
		QUIET.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	if !Log::is_quiet() {
		eprintln!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
	}
}

pub fn success(msg: &str) {
	if !Log::is_quiet() {
		eprintln!("{} {}", "✓".bright_green().bold(), msg.bright_white());
	}
}

pub fn warn(msg: &str) {
	if !Log::is_quiet() {
		eprintln!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
	}
}

/// Errors are printed even in quiet mode
pub fn error(msg: &str) {
	eprintln!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() && !Log::is_quiet() {
		eprintln!("{} {}", "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	if !Log::is_quiet() {
		eprintln!("\n{}", text.bright_blue().bold());
	}
}

/// Tool banner, only shown in verbose mode
pub fn banner() {
	if Log::is_verbose() && !Log::is_quiet() {
		eprintln!(
			"{}",
			format!("─── tlsh-cli v{} ───", env!("CARGO_PKG_VERSION"))
				.bright_blue()
				.bold()
		);
	}
}
