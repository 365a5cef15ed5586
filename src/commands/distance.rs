//! Distance command - compare two hashes

use anyhow::{Context, Result};

use crate::core::{FuzzyHash, Tlsh};

pub fn run(hash1: &str, hash2: &str, quiet: bool) -> Result<()> {
	let distance = compare(hash1, hash2).context("failed to calculate TLSH distance")?;

	if quiet {
		println!("{}", distance);
	} else {
		println!("Distance between hashes: {}", distance);
	}

	Ok(())
}

/// Decode both hashes and score them
pub fn compare(hash1: &str, hash2: &str) -> Result<u32> {
	let a = Tlsh::decode(hash1).context("error parsing first hash")?;
	let b = Tlsh::decode(hash2).context("error parsing second hash")?;
	Ok(a.distance(&b))
}

#[cfg(test)]
mod tests {
	use super::*;

	const H1: &str = "T1A152340123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF";
	const H2: &str = "T1A252340123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF";

	#[test]
	fn compares_valid_hashes() {
		assert_eq!(compare(H1, H1).unwrap(), 0);
		assert_eq!(compare(H1, H2).unwrap(), 1);
		assert_eq!(compare(H2, H1).unwrap(), 1);
	}

	#[test]
	fn names_the_bad_operand() {
		let err = compare(H1, "N/A").unwrap_err();
		assert!(format!("{:#}", err).contains("second hash"));

		let err = compare("T1", H2).unwrap_err();
		assert!(format!("{:#}", err).contains("first hash"));
	}
}
