//! Check command - closest known file for a hash

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use crate::config;
use crate::core::{ContentHash, FuzzyHash, Tlsh};
use crate::output::{self, OutputFormat};
use crate::search;
use crate::storage::{self, RecordStore};
use crate::ui;

pub fn run(hash: Option<&str>, file: Option<&Path>, limit: usize, format: OutputFormat) -> Result<()> {
	let db = config::db_path();
	let out = check(hash, file, &db, limit, format)?;

	let mut stdout = std::io::stdout().lock();
	stdout.write_all(out.as_bytes())?;
	stdout.flush()?;

	Ok(())
}

/// Run a lookup and return the rendered output
pub fn check(
	hash: Option<&str>,
	file: Option<&Path>,
	db: &Path,
	limit: usize,
	format: OutputFormat,
) -> Result<String> {
	if !db.exists() {
		bail!(
			"database file {} does not exist; pass --db <path> or set {}",
			db.display(),
			config::DB_ENV_VAR
		);
	}

	let (query, file_hash) = match (hash, file) {
		(Some(text), _) => (Tlsh::decode(text).context("error parsing input hash")?, None),
		(None, Some(path)) => {
			let query = Tlsh::from_file(path)
				.with_context(|| format!("failed to calculate TLSH hash of {}", path.display()))?;
			let content = ContentHash::compute(path)
				.with_context(|| format!("failed to read {}", path.display()))?;
			ui::info(&format!("TLSH of {}: {}", path.display(), query));
			(query, Some(content))
		}
		(None, None) => bail!("no TLSH hash provided for checking against the database"),
	};

	let store: RecordStore<Tlsh> =
		storage::open(db).context("failed to check TLSH against database")?;

	let undecodable = store.report().undecodable;
	if undecodable > 0 {
		ui::warn(&format!("Skipped {} dataset rows with malformed TLSH hashes", undecodable));
	}

	let start = Instant::now();
	let matches = search::rank(&store, &query, limit);
	ui::debug(&format!(
		"Scored {} records in {}ms",
		store.len(),
		start.elapsed().as_millis()
	));

	if matches.is_empty() {
		ui::debug("No decodable records to compare against");
		// --quiet silences the no-match notice whatever the format
		if ui::Log::is_quiet() {
			return Ok(String::new());
		}
	}

	output::render(format, &matches, file_hash.as_ref())
}
