//! In-memory record store built from dataset rows

use std::path::PathBuf;
use thiserror::Error;

use crate::config::{
	COL_CONTENT_HASH, COL_DATE_ADDED, COL_FILE, COL_FUZZY_HASH, COL_IMPHASH, COL_INTEL, COL_TOOL,
	COL_VERSION, EXPECTED_COLUMNS,
};
use crate::core::{DecodeError, FuzzyHash, HashRecord, Tlsh};
use crate::ui;

#[derive(Debug, Error)]
pub enum LoadError {
	#[error("dataset is empty (no header row)")]
	MissingHeader,

	#[error("dataset header has fewer columns than expected: got {found}, want at least {expected}")]
	ShortHeader { found: usize, expected: usize },

	#[error("failed to open dataset {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("malformed dataset row: {0}")]
	Csv(#[from] csv::Error),
}

/// Rows dropped while loading, by reason
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
	pub loaded: usize,
	/// Fewer than the expected number of fields
	pub short_rows: usize,
	/// Empty or not-applicable fuzzy hash
	pub missing_hash: usize,
	/// Fuzzy hash present but not decodable
	pub undecodable: usize,
	/// Source lines of the short and undecodable rows
	pub bad_lines: Vec<u64>,
}

impl LoadReport {
	pub fn skipped(&self) -> usize {
		self.short_rows + self.missing_hash + self.undecodable
	}
}

/// Decoded dataset records in row order
#[derive(Debug, Clone)]
pub struct RecordStore<H = Tlsh> {
	records: Vec<HashRecord<H>>,
	report: LoadReport,
}

impl<H: FuzzyHash> RecordStore<H> {
	/// Build a store from raw rows, the first of which is the header.
	///
	/// Only a missing or short header fails the load. Data rows that are too
	/// short or whose fuzzy hash is absent or malformed are skipped.
	pub fn load<I, R, S>(rows: I) -> Result<Self, LoadError>
	where
		I: IntoIterator<Item = R>,
		R: AsRef<[S]>,
		S: AsRef<str>,
	{
		Self::load_lines((1..).zip(rows))
	}

	/// Same as [`load`](Self::load), with each row tagged by the source line
	/// it starts on (quoted fields may span several lines).
	pub fn load_lines<I, R, S>(rows: I) -> Result<Self, LoadError>
	where
		I: IntoIterator<Item = (u64, R)>,
		R: AsRef<[S]>,
		S: AsRef<str>,
	{
		let mut rows = rows.into_iter();

		let (_, header) = rows.next().ok_or(LoadError::MissingHeader)?;
		let columns = header.as_ref().len();
		if columns < EXPECTED_COLUMNS {
			return Err(LoadError::ShortHeader {
				found: columns,
				expected: EXPECTED_COLUMNS,
			});
		}

		let mut records = Vec::new();
		let mut report = LoadReport::default();

		for (line, row) in rows {
			let fields = row.as_ref();

			if fields.len() < EXPECTED_COLUMNS {
				ui::debug(&format!(
					"Skipping line {}: {} fields, want {}",
					line,
					fields.len(),
					EXPECTED_COLUMNS
				));
				report.short_rows += 1;
				report.bad_lines.push(line);
				continue;
			}

			let field = |i: usize| fields[i].as_ref().to_string();

			let fuzzy_hash = match H::decode(fields[COL_FUZZY_HASH].as_ref()) {
				Ok(hash) => hash,
				Err(DecodeError::Empty | DecodeError::NotApplicable) => {
					report.missing_hash += 1;
					continue;
				}
				Err(e) => {
					ui::debug(&format!("Skipping line {}: {}", line, e));
					report.undecodable += 1;
					report.bad_lines.push(line);
					continue;
				}
			};

			records.push(HashRecord {
				tool: field(COL_TOOL),
				file: field(COL_FILE),
				version: field(COL_VERSION),
				fuzzy_hash,
				content_hash: field(COL_CONTENT_HASH),
				imphash: field(COL_IMPHASH),
				date_added: field(COL_DATE_ADDED),
				intel: field(COL_INTEL),
			});
		}

		report.loaded = records.len();

		Ok(Self { records, report })
	}
}

impl<H> RecordStore<H> {
	pub fn records(&self) -> &[HashRecord<H>] {
		&self.records
	}

	pub fn report(&self) -> &LoadReport {
		&self.report
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, HashRecord<H>> {
		self.records.iter()
	}
}
