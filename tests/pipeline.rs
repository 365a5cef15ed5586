// Library-level lookup flow: hash bytes, load a dataset, find the closest record

use tlsh_cli::core::{FuzzyHash, Tlsh};
use tlsh_cli::search::{find_best, rank};
use tlsh_cli::storage::{self, RecordStore};

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

fn dataset(rows: &[(&str, &str, &str)]) -> String {
	let mut csv = String::from("repo_name,file_name,version,tlsh,sha256,imphash,date_added,intel\n");
	for (tool, hash, content) in rows {
		csv.push_str(&format!("{},{}.exe,1.0,{},{},,2024-01-01,\n", tool, tool, hash, content));
	}
	csv
}

#[test]
fn query_present_in_store_is_best_at_zero() {
	let h1 = Tlsh::from_bytes(&noisy_bytes(8192, 1)).unwrap().encode();
	let h2 = Tlsh::from_bytes(&noisy_bytes(8192, 2)).unwrap().encode();

	let csv = dataset(&[("X", h1.as_str(), "abc123"), ("Y", h2.as_str(), "def456")]);
	let store: RecordStore = storage::read(csv.as_bytes()).unwrap();
	let query = Tlsh::decode(&h1).unwrap();

	let best = find_best(&store, &query).unwrap();
	assert_eq!(best.record.tool, "X");
	assert_eq!(best.record.content_hash, "abc123");
	assert_eq!(best.distance, 0);

	let other = query.distance(&store.records()[1].fuzzy_hash);
	assert_eq!(other, store.records()[1].fuzzy_hash.distance(&query));
}

#[test]
fn edited_file_finds_its_original() {
	let original = noisy_bytes(16384, 10);
	let mut edited = original.clone();
	for b in edited.iter_mut().skip(1000).take(32) {
		*b ^= 0xFF;
	}

	let known = Tlsh::from_bytes(&original).unwrap().encode();
	let unrelated = Tlsh::from_bytes(&noisy_bytes(16384, 20)).unwrap().encode();
	let csv = dataset(&[("unrelated", unrelated.as_str(), "000"), ("original", known.as_str(), "111")]);
	let store: RecordStore = storage::read(csv.as_bytes()).unwrap();

	let query = Tlsh::from_bytes(&edited).unwrap();
	let ranked = rank(&store, &query, 2);

	assert_eq!(ranked.len(), 2);
	assert_eq!(ranked[0].record.tool, "original");
	assert!(ranked[0].distance <= ranked[1].distance);
}

#[test]
fn rows_without_hashes_never_match() {
	let valid = Tlsh::from_bytes(&noisy_bytes(4096, 3)).unwrap().encode();
	let csv = dataset(&[("blank", "", "0"), ("na", "N/A", "1"), ("valid", valid.as_str(), "2")]);
	let store: RecordStore = storage::read(csv.as_bytes()).unwrap();

	assert_eq!(store.len(), 1);
	assert_eq!(store.report().missing_hash, 2);

	let query = Tlsh::from_bytes(&noisy_bytes(4096, 4)).unwrap();
	assert_eq!(find_best(&store, &query).unwrap().record.tool, "valid");
}
