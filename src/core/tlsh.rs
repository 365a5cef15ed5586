//! TLSH digests: text codec, distance and construction
//!
//! Text layout (128 buckets, 1 byte checksum):
//!
//! ```text
//! T1 CC LL QQ BBBB...BBBB
//!    |  |  |  └ 32 body bytes, four 2-bit bucket codes each
//!    |  |  └ Q1 ratio (high nibble), Q2 ratio (low nibble)
//!    |  └ length value, nibble-swapped
//!    └ checksum, nibble-swapped
//! ```
//!
//! Building, parsing and diffing digests is done by `tlsh2`; this module adds
//! typed decode errors, streaming input and the crate's trait impls.

use serde::{Serialize, Serializer};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tlsh2::{TlshDefault, TlshDefaultBuilder};

use crate::config::{MIN_INPUT_LEN, NOT_APPLICABLE, READ_BUFFER_SIZE};
use crate::core::fuzzy::{DecodeError, FuzzyHash};

pub const HEADER: &str = "T1";
pub const ENCODED_LEN: usize = 72;

#[derive(Debug, Error)]
pub enum HashError {
	#[error("failed to read input: {0}")]
	Io(#[from] io::Error),

	#[error("input is {len} bytes, TLSH needs at least {min}")]
	TooShort { len: usize, min: usize },

	#[error("input does not have enough variation to produce a TLSH digest")]
	Degenerate,
}

/// A decoded TLSH digest (128 buckets, 1 byte checksum)
pub struct Tlsh {
	inner: TlshDefault,
}

impl Tlsh {
	/// Digest of an in-memory buffer
	pub fn from_bytes(data: &[u8]) -> Result<Self, HashError> {
		Self::from_reader(data)
	}

	/// Digest of a file's full contents
	pub fn from_file(path: &Path) -> Result<Self, HashError> {
		Self::from_reader(File::open(path)?)
	}

	/// Stream a reader through the TLSH builder
	pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, HashError> {
		let mut builder = TlshDefaultBuilder::new();
		let mut buffer = vec![0u8; READ_BUFFER_SIZE];
		let mut total = 0usize;

		loop {
			let n = match reader.read(&mut buffer) {
				Ok(0) => break,
				Ok(n) => n,
				Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
				Err(e) => return Err(e.into()),
			};
			builder.update(&buffer[..n]);
			total += n;
		}

		if total < MIN_INPUT_LEN {
			return Err(HashError::TooShort { len: total, min: MIN_INPUT_LEN });
		}

		let inner = builder.build().ok_or(HashError::Degenerate)?;
		Ok(Self { inner })
	}

	/// Canonical text as raw ASCII bytes
	fn digest(&self) -> [u8; ENCODED_LEN] {
		self.inner.hash()
	}
}

impl FuzzyHash for Tlsh {
	fn decode(text: &str) -> Result<Self, DecodeError> {
		let text = text.trim();

		if text.is_empty() {
			return Err(DecodeError::Empty);
		}
		if text.eq_ignore_ascii_case(NOT_APPLICABLE) {
			return Err(DecodeError::NotApplicable);
		}

		let Some(payload) = text.strip_prefix(HEADER) else {
			return Err(DecodeError::BadHeader { expected: HEADER });
		};

		// Counted in characters so a stray multi-byte character is reported as
		// bad hex rather than as a length mismatch
		let found = text.chars().count();
		if found != ENCODED_LEN {
			return Err(DecodeError::BadLength { expected: ENCODED_LEN, found });
		}

		if let Some((index, character)) = payload.chars().enumerate().find(|(_, c)| !c.is_ascii_hexdigit()) {
			return Err(DecodeError::BadHex {
				character,
				position: HEADER.len() + index,
			});
		}

		let inner = text.parse::<TlshDefault>().map_err(|_| DecodeError::Malformed)?;
		Ok(Self { inner })
	}

	fn encode(&self) -> String {
		// hash() only ever emits "T1" and uppercase hex digits
		String::from_utf8_lossy(&self.digest()).into_owned()
	}

	fn distance(&self, other: &Self) -> u32 {
		// Length difference is part of the score
		self.inner.diff(&other.inner, true).unsigned_abs()
	}
}

impl PartialEq for Tlsh {
	fn eq(&self, other: &Self) -> bool {
		self.digest() == other.digest()
	}
}

impl Eq for Tlsh {}

impl fmt::Debug for Tlsh {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Tlsh").field(&self.encode()).finish()
	}
}

impl FromStr for Tlsh {
	type Err = DecodeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::decode(s)
	}
}

impl fmt::Display for Tlsh {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.encode())
	}
}

impl Serialize for Tlsh {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.encode())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const BODY: &str = "0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF";

	fn digest(header: &str, body: &str) -> String {
		format!("T1{}{}", header, body)
	}

	fn parse(s: &str) -> Tlsh {
		Tlsh::decode(s).expect("valid digest")
	}

	fn base() -> Tlsh {
		parse(&digest("A15234", BODY))
	}

	fn noisy_bytes(len: usize, seed: u64) -> Vec<u8> {
		let mut state = seed;
		(0..len)
			.map(|_| {
				state ^= state << 13;
				state ^= state >> 7;
				state ^= state << 17;
				(state >> 24) as u8
			})
			.collect()
	}

	// ==================== Codec ====================

	#[test]
	fn decode_keeps_text_form() {
		let text = digest("A15234", BODY);
		assert_eq!(base().encode(), text);
		assert_eq!(format!("{:?}", base()), format!("Tlsh({:?})", text));
	}

	#[test]
	fn encode_is_canonical_uppercase() {
		let lower = digest("a15234", &BODY.to_lowercase());
		let h = parse(&lower);
		assert_eq!(h.encode(), lower.to_uppercase());
		assert_eq!(h, base());
	}

	#[test]
	fn round_trip_keeps_value() {
		let h = base();
		assert_eq!(parse(&h.encode()), h);
		assert_eq!(h.to_string(), digest("A15234", BODY));
	}

	#[test]
	fn decode_trims_whitespace() {
		let padded = format!("  {}\n", digest("A15234", BODY));
		assert_eq!(parse(&padded), base());
	}

	#[test]
	fn decode_rejects_empty_and_not_applicable() {
		assert_eq!(Tlsh::decode(""), Err(DecodeError::Empty));
		assert_eq!(Tlsh::decode("   "), Err(DecodeError::Empty));
		assert_eq!(Tlsh::decode("N/A"), Err(DecodeError::NotApplicable));
	}

	#[test]
	fn decode_rejects_wrong_header() {
		let wrong = format!("T2A15234{}", BODY);
		assert_eq!(Tlsh::decode(&wrong), Err(DecodeError::BadHeader { expected: "T1" }));
		// Bare legacy digest without the version token
		let bare = format!("A15234{}XX", BODY);
		assert!(matches!(Tlsh::decode(&bare), Err(DecodeError::BadHeader { .. })));
	}

	#[test]
	fn decode_rejects_truncated_and_overlong() {
		let full = digest("A15234", BODY);
		assert_eq!(
			Tlsh::decode(&full[..70]),
			Err(DecodeError::BadLength { expected: 72, found: 70 })
		);
		let long = format!("{}00", full);
		assert_eq!(
			Tlsh::decode(&long),
			Err(DecodeError::BadLength { expected: 72, found: 74 })
		);
	}

	#[test]
	fn multibyte_character_is_bad_hex_not_bad_length() {
		// 72 characters but 73 bytes
		let mut text = digest("A15234", BODY);
		text.replace_range(10..11, "é");
		assert_eq!(text.chars().count(), 72);
		assert_eq!(
			Tlsh::decode(&text),
			Err(DecodeError::BadHex { character: 'é', position: 10 })
		);

		// Length errors count characters too
		let short = format!("{}é", &digest("A15234", BODY)[..70]);
		assert_eq!(
			Tlsh::decode(&short),
			Err(DecodeError::BadLength { expected: 72, found: 71 })
		);
	}

	#[test]
	fn decode_rejects_non_hex_payload() {
		let bad = digest("A152Z4", BODY);
		assert_eq!(
			Tlsh::decode(&bad),
			Err(DecodeError::BadHex { character: 'Z', position: 6 })
		);
	}

	#[test]
	fn from_str_matches_decode() {
		let h: Tlsh = digest("A15234", BODY).parse().unwrap();
		assert_eq!(h, base());
	}

	#[test]
	fn serializes_as_text() {
		let json = serde_json::to_string(&base()).unwrap();
		assert_eq!(json, format!("\"{}\"", digest("A15234", BODY)));
	}

	// ==================== Distance ====================

	#[test]
	fn identical_digests_have_zero_distance() {
		let h = base();
		assert_eq!(h.distance(&h), 0);
		assert_eq!(h.distance(&base()), 0);
	}

	#[test]
	fn single_bucket_step_costs_one() {
		let mut body = BODY.to_string();
		body.replace_range(63..64, "E");
		let other = parse(&digest("A15234", &body));
		assert_eq!(base().distance(&other), 1);
	}

	#[test]
	fn full_bucket_swing_costs_six() {
		// 0x01 -> 0xC1 flips the top bucket from 0 to 3
		let mut body = BODY.to_string();
		body.replace_range(0..2, "C1");
		let other = parse(&digest("A15234", &body));
		assert_eq!(base().distance(&other), 6);
	}

	#[test]
	fn checksum_mismatch_costs_one() {
		let other = parse(&digest("A25234", BODY));
		assert_eq!(base().distance(&other), 1);
	}

	#[test]
	fn length_difference_is_scaled() {
		let near = parse(&digest("A16234", BODY));
		assert_eq!(base().distance(&near), 1);

		let far = parse(&digest("A17234", BODY));
		assert_eq!(base().distance(&far), 24);
	}

	#[test]
	fn length_difference_wraps_around() {
		let low = parse(&digest("A10034", BODY));
		let high = parse(&digest("A1FF34", BODY));
		assert_eq!(low.distance(&high), 1);
	}

	#[test]
	fn q_ratio_differences_are_scaled() {
		let q1_far = parse(&digest("A15254", BODY));
		assert_eq!(base().distance(&q1_far), 12);

		let q2_near = parse(&digest("A15235", BODY));
		assert_eq!(base().distance(&q2_near), 1);

		let q1_wrap_a = parse(&digest("A15204", BODY));
		let q1_wrap_b = parse(&digest("A152F4", BODY));
		assert_eq!(q1_wrap_a.distance(&q1_wrap_b), 1);
	}

	#[test]
	fn components_add_up() {
		// checksum (1) + length step of 2 (24) + q2 step (1)
		let other = parse(&digest("A27235", BODY));
		assert_eq!(base().distance(&other), 26);
	}

	#[test]
	fn distance_is_symmetric_and_deterministic() {
		let samples = [
			digest("A15234", BODY),
			digest("0F00FF", BODY),
			digest("3C9A11", &BODY.chars().rev().collect::<String>()),
			digest("FFFFFF", &"F".repeat(64)),
			digest("000000", &"0".repeat(64)),
		];
		let hashes: Vec<Tlsh> = samples.iter().map(|s| parse(s)).collect();

		for a in &hashes {
			for b in &hashes {
				let d = a.distance(b);
				assert_eq!(d, b.distance(a));
				assert_eq!(d, a.distance(b));
			}
		}
	}

	// ==================== Construction ====================

	#[test]
	fn short_input_is_rejected() {
		let err = Tlsh::from_bytes(b"tiny").unwrap_err();
		assert!(matches!(err, HashError::TooShort { len: 4, min: 50 }));
	}

	#[test]
	fn distance_matches_tlsh2_diff() {
		let samples: Vec<Vec<u8>> = (1..=6).map(|seed| noisy_bytes(2048 * seed as usize, seed)).collect();
		let ours: Vec<Tlsh> = samples.iter().map(|d| Tlsh::from_bytes(d).unwrap()).collect();
		let theirs: Vec<TlshDefault> = samples
			.iter()
			.map(|d| TlshDefaultBuilder::build_from(d).unwrap())
			.collect();

		for (i, a) in ours.iter().enumerate() {
			for (j, b) in ours.iter().enumerate() {
				let expected = theirs[i].diff(&theirs[j], true);
				assert_eq!(a.distance(b) as i32, expected);
				assert_eq!(Tlsh::decode(&a.encode()).unwrap().distance(b) as i32, expected);
			}
		}
	}

	#[test]
	fn builds_decodable_digest() {
		let data = noisy_bytes(8192, 0x9E37_79B9_7F4A_7C15);
		let h = Tlsh::from_bytes(&data).unwrap();
		let text = h.encode();
		assert_eq!(text.len(), ENCODED_LEN);
		assert!(text.starts_with("T1"));
		assert_eq!(parse(&text), h);
	}

	#[test]
	fn construction_is_deterministic() {
		let data = noisy_bytes(4096, 42);
		let a = Tlsh::from_bytes(&data).unwrap();
		let b = Tlsh::from_reader(io::Cursor::new(data)).unwrap();
		assert_eq!(a, b);
		assert_eq!(a.distance(&b), 0);
	}

	#[test]
	fn small_edit_stays_close() {
		let original = noisy_bytes(16384, 7);
		let mut edited = original.clone();
		for b in edited.iter_mut().take(64) {
			*b = b.wrapping_add(1);
		}

		let a = Tlsh::from_bytes(&original).unwrap();
		let b = Tlsh::from_bytes(&edited).unwrap();
		let unrelated = Tlsh::from_bytes(&noisy_bytes(16384, 99_991)).unwrap();

		assert!(a.distance(&b) <= a.distance(&unrelated));
	}
}
