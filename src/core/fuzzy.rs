//! Fuzzy hash abstraction
//!
//! Everything above the codec (record store, search) is generic over
//! [`FuzzyHash`], so the similarity scheme can be replaced without touching
//! the dataset or lookup code.

use thiserror::Error;

/// A similarity-preserving digest with a textual form and a distance metric.
///
/// Implementations must guarantee:
/// - `decode(&h.encode()) == Ok(h)`
/// - `a.distance(a) == 0`
/// - `a.distance(b) == b.distance(a)`
/// - the same inputs always give the same distance
///
/// Callers treat the distance purely as an ordering key and never assume an
/// upper bound.
pub trait FuzzyHash: Sized {
	/// Parse the textual encoding. Malformed text is an error, never a zero hash.
	fn decode(text: &str) -> Result<Self, DecodeError>;

	/// Canonical textual encoding
	fn encode(&self) -> String;

	/// Dissimilarity score, 0 for identical digests
	fn distance(&self, other: &Self) -> u32;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
	#[error("hash is empty")]
	Empty,

	#[error("hash is marked as not applicable")]
	NotApplicable,

	#[error("hash must start with '{expected}'")]
	BadHeader { expected: &'static str },

	#[error("hash must be {expected} characters long, got {found}")]
	BadLength { expected: usize, found: usize },

	#[error("invalid hex character '{character}' at position {position}")]
	BadHex { character: char, position: usize },

	#[error("hash is not a valid TLSH digest")]
	Malformed,
}
