use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::json;

use crate::io::files;
use crate::io::json_to_file_pretty;
use crate::output::{MessageContents, MessageLevel, NeobuildOutput};

/// The per-build directory owning every file produced for one loader
/// version. A workspace is exclusive to a single build; concurrent
/// invocations targeting the same loader version would race on its files
#[derive(Debug, Clone)]
pub struct Workspace {
	dir: PathBuf,
	loader_version: String,
}

impl Workspace {
	/// Create the workspace directory for a loader version under the build
	/// root, along with the launcher profile skeleton the installer expects
	pub fn create(build_root: &Path, loader_version: &str) -> anyhow::Result<Self> {
		let dir = build_root.join(loader_version);
		fs::create_dir_all(&dir)
			.with_context(|| format!("Failed to create build directory {}", dir.display()))?;

		let out = Self {
			dir,
			loader_version: loader_version.to_owned(),
		};
		out.ensure_launcher_profile()
			.context("Failed to create launcher_profiles.json")?;

		Ok(out)
	}

	/// Get the workspace directory
	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// Get the loader version this workspace belongs to
	pub fn loader_version(&self) -> &str {
		&self.loader_version
	}

	/// Get the path of a direct child of the workspace
	pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
		self.dir.join(name)
	}

	/// Get the filename of the final client jar
	pub fn client_jar_name(&self) -> String {
		format!("neoforge-{}-client.jar", self.loader_version)
	}

	/// Get the path of the final client jar at the workspace root
	pub fn client_jar_path(&self) -> PathBuf {
		self.dir.join(self.client_jar_name())
	}

	/// Get the path where the external installer materializes the client jar
	pub fn installed_client_jar_path(&self) -> PathBuf {
		self.dir
			.join("libraries/net/neoforged/neoforge")
			.join(&self.loader_version)
			.join(self.client_jar_name())
	}

	/// Search the workspace tree for the first file whose path ends with the
	/// given relative path
	pub fn find_file(&self, suffix: &Path) -> anyhow::Result<Option<PathBuf>> {
		files::find_file_by_suffix(&self.dir, suffix)
			.context("Failed to search the workspace tree")
	}

	/// Write the empty launcher profile skeleton if it is not already
	/// present. An existing file is never overwritten
	fn ensure_launcher_profile(&self) -> anyhow::Result<()> {
		let path = self.dir.join("launcher_profiles.json");
		if path.exists() {
			return Ok(());
		}

		let profile = json!({
			"profiles": {},
			"selectedProfile": "",
			"clientToken": "",
			"authenticationDatabase": {},
			"settings": {}
		});
		json_to_file_pretty(path, &profile)
	}

	/// Delete every direct child of the workspace root whose name is not in
	/// the retained set. Deletion failures are warnings; the build result is
	/// unaffected
	pub fn clean(&self, retained: &HashSet<String>, o: &mut impl NeobuildOutput) {
		let entries = match fs::read_dir(&self.dir) {
			Ok(entries) => entries,
			Err(err) => {
				o.display(
					MessageContents::Warning(format!("Failed to read the workspace: {err}")),
					MessageLevel::Important,
				);
				return;
			}
		};

		for entry in entries.flatten() {
			let name = entry.file_name().to_string_lossy().to_string();
			if retained.contains(&name) {
				continue;
			}

			let path = entry.path();
			let result = if path.is_dir() {
				fs::remove_dir_all(&path)
			} else {
				fs::remove_file(&path)
			};
			match result {
				Ok(()) => o.display(
					MessageContents::Property(
						"Removed".into(),
						Box::new(MessageContents::Simple(path.display().to_string())),
					),
					MessageLevel::Debug,
				),
				Err(err) => o.display(
					MessageContents::Warning(format!(
						"Failed to remove {}: {err}",
						path.display()
					)),
					MessageLevel::Important,
				),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use crate::output::NoOp;

	#[test]
	fn test_create_and_profile_skeleton() {
		let root = tempfile::tempdir().expect("Failed to create temp dir");
		let workspace =
			Workspace::create(root.path(), "21.1.77").expect("Workspace creation should succeed");

		assert!(workspace.dir().ends_with("21.1.77"));
		assert_eq!(workspace.client_jar_name(), "neoforge-21.1.77-client.jar");

		let profile_path = workspace.join("launcher_profiles.json");
		assert!(profile_path.exists());

		// A second creation must not overwrite the profile
		fs::write(&profile_path, "{\"profiles\":{\"keep\":{}}}").expect("Failed to write profile");
		let _ = Workspace::create(root.path(), "21.1.77").expect("Recreation should succeed");
		let contents = fs::read_to_string(&profile_path).expect("Failed to read profile");
		assert!(contents.contains("keep"));
	}

	#[test]
	fn test_clean_retains_only_listed_files() {
		let root = tempfile::tempdir().expect("Failed to create temp dir");
		let workspace =
			Workspace::create(root.path(), "21.1.77").expect("Workspace creation should succeed");

		fs::write(workspace.client_jar_path(), b"jar").expect("Failed to write client jar");
		fs::write(workspace.join("client-extra.jar"), b"extra").expect("Failed to write extra");
		fs::write(workspace.join("version.json"), b"{}").expect("Failed to write manifest");
		fs::create_dir_all(workspace.join("libraries/net")).expect("Failed to create libraries");

		let retained = HashSet::from([
			workspace.client_jar_name(),
			"client-extra.jar".to_string(),
		]);
		workspace.clean(&retained, &mut NoOp);

		let mut names: Vec<String> = fs::read_dir(workspace.dir())
			.expect("Failed to list workspace")
			.flatten()
			.map(|entry| entry.file_name().to_string_lossy().to_string())
			.collect();
		names.sort();
		assert_eq!(
			names,
			vec![
				"client-extra.jar".to_string(),
				"neoforge-21.1.77-client.jar".to_string()
			]
		);
	}

	#[test]
	fn test_installed_client_jar_path() {
		let root = tempfile::tempdir().expect("Failed to create temp dir");
		let workspace =
			Workspace::create(root.path(), "21.1.77").expect("Workspace creation should succeed");

		assert!(workspace.installed_client_jar_path().ends_with(
			"21.1.77/libraries/net/neoforged/neoforge/21.1.77/neoforge-21.1.77-client.jar"
		));
	}
}
