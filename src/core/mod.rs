//! Core domain types

pub mod fuzzy;
pub mod hash;
pub mod record;
pub mod tlsh;

pub use fuzzy::{DecodeError, FuzzyHash};
pub use hash::ContentHash;
pub use record::{HashRecord, ScoredRecord};
pub use tlsh::{HashError, Tlsh};
