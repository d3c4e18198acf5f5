use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::Context;

/// Create all the directories leading up to a path
pub fn create_leading_dirs(path: &Path) -> std::io::Result<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}

	Ok(())
}

/// Copy a single file to a new path, overwriting it if it exists
pub fn copy_file(src: &Path, dest: &Path) -> anyhow::Result<()> {
	let mut src_file = BufReader::new(
		File::open(src).with_context(|| format!("Failed to open source file {}", src.display()))?,
	);
	let mut dest_file = BufWriter::new(
		File::create(dest)
			.with_context(|| format!("Failed to create destination file {}", dest.display()))?,
	);

	std::io::copy(&mut src_file, &mut dest_file)
		.with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;

	Ok(())
}

/// Recursively search a directory tree for the first file whose path ends
/// with the given relative path. Traversal is depth-first in directory entry
/// order, which is platform-dependent; the first match wins
pub fn find_file_by_suffix(root: &Path, suffix: &Path) -> std::io::Result<Option<std::path::PathBuf>> {
	for entry in fs::read_dir(root)? {
		let entry = entry?;
		let path = entry.path();
		if path.is_dir() {
			if let Some(found) = find_file_by_suffix(&path, suffix)? {
				return Ok(Some(found));
			}
		} else if path.ends_with(suffix) {
			return Ok(Some(path));
		}
	}

	Ok(None)
}

#[cfg(test)]
mod tests {
	use super::*;

	use std::path::Path;

	#[test]
	fn test_find_file_by_suffix() {
		let dir = tempfile::tempdir().expect("Failed to create temp dir");
		let nested = dir
			.path()
			.join("libraries/com/example/foo/1.0");
		fs::create_dir_all(&nested).expect("Failed to create dirs");
		fs::write(nested.join("foo-1.0-client.zip"), b"data").expect("Failed to write file");

		let found = find_file_by_suffix(
			dir.path(),
			Path::new("com/example/foo/1.0/foo-1.0-client.zip"),
		)
		.expect("Search should not fail");
		assert_eq!(found, Some(nested.join("foo-1.0-client.zip")));

		let missing = find_file_by_suffix(dir.path(), Path::new("com/example/bar-1.0.jar"))
			.expect("Search should not fail");
		assert_eq!(missing, None);
	}
}
