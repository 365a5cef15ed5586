//! Result rendering for the `check` command
//!
//! The CSV form is a fixed five-field line per match:
//! `tool,file,version,content_hash,distance`.

use anyhow::Result;
use colored::*;
use serde::Serialize;

use crate::core::{ContentHash, ScoredRecord};

pub const NO_MATCH_MESSAGE: &str = "No matches found in the database";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
	Plain,
	/// Content hash of each match, one per line
	Quiet,
	Csv,
	Json,
}

impl OutputFormat {
	/// CSV wins over JSON, JSON over quiet
	pub fn from_flags(quiet: bool, csv: bool, json: bool) -> Self {
		if csv {
			Self::Csv
		} else if json {
			Self::Json
		} else if quiet {
			Self::Quiet
		} else {
			Self::Plain
		}
	}
}

/// Render matches for stdout. Quiet output is empty when nothing matched.
pub fn render<H: Serialize>(
	format: OutputFormat,
	matches: &[ScoredRecord<'_, H>],
	file_hash: Option<&ContentHash>,
) -> Result<String> {
	match format {
		OutputFormat::Plain => Ok(plain(matches, file_hash)),
		OutputFormat::Quiet => Ok(matches
			.iter()
			.map(|m| format!("{}\n", m.record.content_hash))
			.collect()),
		OutputFormat::Csv if matches.is_empty() => Ok(format!("{}\n", NO_MATCH_MESSAGE)),
		OutputFormat::Csv => matches.iter().map(csv_line).collect(),
		OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(matches)?)),
	}
}

/// One CSV record, newline-terminated, quoted only where needed
pub fn csv_line<H>(m: &ScoredRecord<'_, H>) -> Result<String> {
	let record = m.record;
	let distance = m.distance.to_string();

	let mut writer = csv::WriterBuilder::new()
		.has_headers(false)
		.terminator(csv::Terminator::Any(b'\n'))
		.from_writer(Vec::new());

	writer.write_record([
		record.tool.as_str(),
		record.file.as_str(),
		record.version.as_str(),
		record.content_hash.as_str(),
		distance.as_str(),
	])?;

	let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{}", e))?;
	Ok(String::from_utf8(bytes)?)
}

fn plain<H>(matches: &[ScoredRecord<'_, H>], file_hash: Option<&ContentHash>) -> String {
	let mut out = String::new();

	match matches.len() {
		0 => {
			out.push_str(NO_MATCH_MESSAGE);
			out.push('\n');
			return out;
		}
		1 => out.push_str(&format!("{}\n", "Best match found:".bright_blue().bold())),
		n => out.push_str(&format!("{}\n", format!("Closest {} matches:", n).bright_blue().bold())),
	}

	for (i, m) in matches.iter().enumerate() {
		let record = m.record;

		if matches.len() > 1 {
			out.push_str(&format!("  {}\n", format!("#{}", i + 1).bright_blue().bold()));
		}

		let fields = [
			("Tool", record.tool.as_str()),
			("File", record.file.as_str()),
			("Version", record.version.as_str()),
			("SHA256", record.content_hash.as_str()),
			("Imphash", record.imphash.as_str()),
			("Added", record.date_added.as_str()),
			("Intel", record.intel.as_str()),
		];

		for (label, value) in fields {
			if !value.is_empty() {
				out.push_str(&format!("  {} {}\n", format!("{}:", label).dimmed(), value));
			}
		}

		let distance = if m.is_exact() {
			format!("{} {}", m.distance, "(identical digest)".bright_green())
		} else {
			m.distance.to_string()
		};
		out.push_str(&format!("  {} {}\n", "Distance:".dimmed(), distance));

		if file_hash.is_some_and(|h| h.matches(&record.content_hash)) {
			out.push_str(&format!("  {}\n", "Exact file match (SHA-256)".bright_green().bold()));
		}
	}

	out
}
