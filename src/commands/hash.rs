//! Hash command - TLSH of files

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

use crate::core::{ContentHash, Tlsh};
use crate::ui;

/// Digests of one file
pub struct FileDigest {
	pub tlsh: Tlsh,
	pub sha256: Option<ContentHash>,
}

pub fn run(paths: &[PathBuf], recursive: bool, sha256: bool, quiet: bool) -> Result<()> {
	let start = Instant::now();
	let files = collect_files(paths, recursive)?;

	if files.is_empty() {
		bail!("no files to hash");
	}

	// A lone file fails loudly; batches log and keep going
	if let [path] = files.as_slice() {
		let digest = hash_file(path, sha256)
			.with_context(|| format!("failed to calculate TLSH hash of {}", path.display()))?;
		print_digest(path, &digest, quiet, false);
		return Ok(());
	}

	ui::header(&format!("Hashing {} files", files.len()));

	let mut hashed = 0;
	let mut errors = 0;

	for path in &files {
		match hash_file(path, sha256) {
			Ok(digest) => {
				print_digest(path, &digest, quiet, true);
				hashed += 1;
			}
			Err(e) => {
				ui::error(&format!("{}: {:#}", path.display(), e));
				errors += 1;
			}
		}
	}

	ui::success(&format!(
		"Hashed {} files in {:.2}s",
		hashed,
		start.elapsed().as_secs_f32()
	));

	if errors > 0 {
		bail!("{} of {} files could not be hashed", errors, files.len());
	}

	Ok(())
}

/// TLSH (and optionally SHA-256) of a single file
pub fn hash_file(path: &Path, sha256: bool) -> Result<FileDigest> {
	let tlsh = Tlsh::from_file(path)?;
	let sha256 = if sha256 {
		Some(ContentHash::compute(path).context("error reading file")?)
	} else {
		None
	};
	Ok(FileDigest { tlsh, sha256 })
}

/// Expand directories (when recursive) into their files, sorted by name
pub fn collect_files(paths: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for path in paths {
		if !path.is_dir() {
			files.push(path.clone());
			continue;
		}

		if !recursive {
			bail!("{} is a directory; pass --recursive to hash its files", path.display());
		}

		for entry in WalkDir::new(path).sort_by_file_name() {
			let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
			if entry.file_type().is_file() {
				files.push(entry.into_path());
			} else {
				ui::debug(&format!("Skipping {}", entry.path().display()));
			}
		}
	}

	Ok(files)
}

fn print_digest(path: &Path, digest: &FileDigest, quiet: bool, batch: bool) {
	if quiet {
		let mut line = digest.tlsh.to_string();
		if let Some(sha) = &digest.sha256 {
			line.push(' ');
			line.push_str(sha.as_str());
		}
		if batch {
			line.push_str("  ");
			line.push_str(&path.display().to_string());
		}
		println!("{}", line);
		return;
	}

	println!("TLSH hash of {}: {}", path.display(), digest.tlsh);
	if let Some(sha) = &digest.sha256 {
		println!("SHA256 of {}: {}", path.display(), sha);
	}
}
