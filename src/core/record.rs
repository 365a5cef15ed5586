//! Dataset records and per-query scores

use serde::Serialize;

use crate::core::tlsh::Tlsh;

/// One known file from the hash dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashRecord<H = Tlsh> {
	/// Tool or repository the file belongs to
	pub tool: String,
	pub file: String,
	pub version: String,
	pub fuzzy_hash: H,
	/// Strong digest (SHA-256) for exact identification
	pub content_hash: String,
	pub imphash: String,
	pub date_added: String,
	/// Free-form intelligence note
	pub intel: String,
}

/// A record scored against one query hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredRecord<'a, H = Tlsh> {
	#[serde(flatten)]
	pub record: &'a HashRecord<H>,
	pub distance: u32,
}

impl<'a, H> ScoredRecord<'a, H> {
	pub fn new(record: &'a HashRecord<H>, distance: u32) -> Self {
		Self { record, distance }
	}

	pub fn is_exact(&self) -> bool {
		self.distance == 0
	}
}
