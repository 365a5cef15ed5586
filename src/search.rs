// Search - Find the dataset records closest to a query hash
//
// Every record is scored (no early exit, no index) and the scores are
// stable-sorted, so equal distances keep dataset order.

use crate::core::{FuzzyHash, ScoredRecord};
use crate::storage::RecordStore;

/// All records scored against `query`, closest first, truncated to `limit`.
pub fn rank<'a, H: FuzzyHash>(
	store: &'a RecordStore<H>,
	query: &H,
	limit: usize,
) -> Vec<ScoredRecord<'a, H>> {
	let mut scored: Vec<ScoredRecord<'a, H>> = store
		.iter()
		.map(|record| ScoredRecord::new(record, query.distance(&record.fuzzy_hash)))
		.collect();

	// sort_by_key is stable: ties go to the earlier row
	scored.sort_by_key(|s| s.distance);
	scored.truncate(limit);
	scored
}

/// The single closest record, or `None` when the store has no records.
pub fn find_best<'a, H: FuzzyHash>(store: &'a RecordStore<H>, query: &H) -> Option<ScoredRecord<'a, H>> {
	rank(store, query, 1).into_iter().next()
}
