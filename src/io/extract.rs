use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use zip::ZipArchive;

/// Extracts a single named member of a zip archive into a directory,
/// returning the path of the written file
pub fn extract_zip_member(
	archive_path: &Path,
	member_name: &str,
	out_dir: &Path,
) -> anyhow::Result<PathBuf> {
	let file = File::open(archive_path)
		.with_context(|| format!("Failed to open archive {}", archive_path.display()))?;
	let reader = BufReader::new(file);

	extract_member(reader, member_name, out_dir).with_context(|| {
		format!(
			"Failed to extract {member_name} from {}",
			archive_path.display()
		)
	})
}

fn extract_member<R: Read + Seek>(
	reader: R,
	member_name: &str,
	out_dir: &Path,
) -> anyhow::Result<PathBuf> {
	let mut archive = ZipArchive::new(reader).context("Failed to open zip archive")?;

	let Ok(mut member) = archive.by_name(member_name) else {
		bail!("Missing archive member");
	};

	let out_path = out_dir.join(member_name);
	let mut out_file = BufWriter::new(
		File::create(&out_path)
			.with_context(|| format!("Failed to create output file {}", out_path.display()))?,
	);
	std::io::copy(&mut member, &mut out_file).context("Failed to write member contents")?;

	Ok(out_path)
}

#[cfg(test)]
mod tests {
	use super::*;

	use std::io::{Cursor, Write};

	use zip::write::SimpleFileOptions;
	use zip::ZipWriter;

	fn make_archive() -> Vec<u8> {
		let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
		writer
			.start_file("version.json", SimpleFileOptions::default())
			.expect("Failed to start file");
		writer
			.write_all(b"{\"id\":\"neoforge-21.1.77\"}")
			.expect("Failed to write member");
		writer
			.finish()
			.expect("Failed to finish archive")
			.into_inner()
	}

	#[test]
	fn test_extract_member() {
		let dir = tempfile::tempdir().expect("Failed to create temp dir");
		let archive = make_archive();

		let path = extract_member(Cursor::new(&archive), "version.json", dir.path())
			.expect("Extraction should succeed");
		let contents = std::fs::read_to_string(path).expect("Failed to read extracted file");
		assert_eq!(contents, "{\"id\":\"neoforge-21.1.77\"}");
	}

	#[test]
	fn test_missing_member() {
		let dir = tempfile::tempdir().expect("Failed to create temp dir");
		let archive = make_archive();

		assert!(extract_member(Cursor::new(&archive), "install_profile.json", dir.path()).is_err());
	}
}
