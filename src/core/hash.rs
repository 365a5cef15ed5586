//! Content-based file hashing (exact match identity)

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::READ_BUFFER_SIZE;

/// Lowercase hex SHA-256, the format dataset rows carry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
	/// Hash a file's full contents
	pub fn compute(path: &Path) -> std::io::Result<Self> {
		let mut file = File::open(path)?;
		let mut hasher = Sha256::new();
		let mut buffer = vec![0u8; READ_BUFFER_SIZE];

		loop {
			let n = file.read(&mut buffer)?;
			if n == 0 {
				break;
			}
			hasher.update(&buffer[..n]);
		}

		Ok(Self(hex::encode(hasher.finalize())))
	}

	pub fn from_bytes(data: &[u8]) -> Self {
		Self(hex::encode(Sha256::digest(data)))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Case-insensitive comparison against a dataset value
	pub fn matches(&self, other: &str) -> bool {
		self.0.eq_ignore_ascii_case(other.trim())
	}
}

impl std::fmt::Display for ContentHash {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}
