//! CSV dataset reading

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::core::FuzzyHash;
use crate::storage::store::{LoadError, RecordStore};
use crate::ui;

/// Load a dataset file from disk
pub fn open<H: FuzzyHash>(path: &Path) -> Result<RecordStore<H>, LoadError> {
	let file = File::open(path).map_err(|source| LoadError::Io {
		path: path.to_path_buf(),
		source,
	})?;

	let store = read(file)?;
	let report = store.report();

	ui::debug(&format!(
		"Loaded {} records from {} ({} skipped: {} short, {} without hash, {} undecodable)",
		report.loaded,
		path.display(),
		report.skipped(),
		report.short_rows,
		report.missing_hash,
		report.undecodable
	));

	Ok(store)
}

/// Parse CSV from any reader. Rows may have differing field counts; the
/// store decides what to keep.
pub fn read<H: FuzzyHash, R: Read>(reader: R) -> Result<RecordStore<H>, LoadError> {
	let mut csv = csv::ReaderBuilder::new()
		.has_headers(false)
		.flexible(true)
		.from_reader(reader);

	let mut rows = Vec::new();
	for (index, record) in csv.records().enumerate() {
		let record = record?;
		// Line the record starts on; quoted newlines make this differ from the index
		let line = record.position().map_or(index as u64 + 1, |p| p.line());
		rows.push((line, record.iter().map(str::to_string).collect::<Vec<_>>()));
	}

	RecordStore::load_lines(rows)
}
