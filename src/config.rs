//! Application configuration and constants

use std::path::PathBuf;
use std::sync::OnceLock;

static CUSTOM_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

// === Dataset ===
pub const DEFAULT_DB_PATH: &str = "tlsh_hashes.csv";
pub const DB_ENV_VAR: &str = "TLSH_CLI_DB";
pub const EXPECTED_COLUMNS: usize = 8;
pub const NOT_APPLICABLE: &str = "N/A";

// Column positions within a dataset row
pub const COL_TOOL: usize = 0;
pub const COL_FILE: usize = 1;
pub const COL_VERSION: usize = 2;
pub const COL_FUZZY_HASH: usize = 3;
pub const COL_CONTENT_HASH: usize = 4;
pub const COL_IMPHASH: usize = 5;
pub const COL_DATE_ADDED: usize = 6;
pub const COL_INTEL: usize = 7;

// === Hashing ===
pub const MIN_INPUT_LEN: usize = 50;
pub const READ_BUFFER_SIZE: usize = 65536; // 64KB

// === Check Defaults ===
pub const DEFAULT_LIMIT: usize = 1;

pub fn set_db_path(path: PathBuf) {
	let _ = CUSTOM_DB_PATH.set(path);
}

/// Dataset location (--db flag, then TLSH_CLI_DB env var, then the default)
pub fn db_path() -> PathBuf {
	if let Some(custom) = CUSTOM_DB_PATH.get() {
		crate::ui::debug(&format!("Using dataset from --db: {}", custom.display()));
		return custom.clone();
	}

	if let Ok(env_path) = std::env::var(DB_ENV_VAR) {
		if !env_path.trim().is_empty() {
			crate::ui::debug(&format!("Using {}: {}", DB_ENV_VAR, env_path));
			return PathBuf::from(env_path);
		}
	}

	PathBuf::from(DEFAULT_DB_PATH)
}
