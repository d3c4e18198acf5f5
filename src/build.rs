use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use reqwest::Client;
use serde_json::Value;

use crate::installer::run_installer;
use crate::io::extract::extract_zip_member;
use crate::io::{files, json_from_file};
use crate::manifest::{self, INSTALL_PROFILE, VERSION_DESCRIPTOR};
use crate::net::download;
use crate::net::meta::ApiEndpoints;
use crate::output::{MessageContents, MessageLevel, NeobuildOutput};
use crate::resolve::VersionSpec;
use crate::workspace::Workspace;

/// The default build root directory
pub static DEFAULT_BUILD_DIR: &str = "build";
/// The default artifacts record file
pub static ARTIFACTS_FILE: &str = "artifacts.txt";

/// Build the NeoForge client for a resolved version. Downloads the
/// installer, runs it, and assembles the workspace into the final layout.
/// Returns the path of the client jar.
///
/// If the client jar already exists in the workspace, the build is a no-op
/// that returns the existing path without network or subprocess activity
pub async fn build_client(
	spec: &VersionSpec,
	build_root: &Path,
	endpoints: &ApiEndpoints,
	client: &Client,
	o: &mut impl NeobuildOutput,
) -> anyhow::Result<PathBuf> {
	o.display(
		MessageContents::Header(format!(
			"Building NeoForge {} for Minecraft {}",
			spec.loader_version, spec.mc_version
		)),
		MessageLevel::Important,
	);

	let workspace = Workspace::create(build_root, &spec.loader_version)
		.context("Failed to create the build workspace")?;

	let client_jar = workspace.client_jar_path();
	if client_jar.exists() {
		o.display(
			MessageContents::Simple(format!(
				"Already built: {}, skipping",
				client_jar.display()
			)),
			MessageLevel::Important,
		);
		return Ok(client_jar);
	}

	fetch_installer(spec, &workspace, endpoints, client, o)
		.await
		.context("Failed to download the installer")?;

	run_installer(&workspace, spec.installer_file_name(), o)
		.context("Failed to run the installer")?;

	assemble(&workspace, spec.installer_file_name(), o)
}

/// Download the installer jar into the workspace, trying each configured
/// mirror in order. The last error is surfaced if every mirror fails
async fn fetch_installer(
	spec: &VersionSpec,
	workspace: &Workspace,
	endpoints: &ApiEndpoints,
	client: &Client,
	o: &mut impl NeobuildOutput,
) -> anyhow::Result<()> {
	let dest = workspace.join(spec.installer_file_name());

	let mut last_error = None;
	for mirror in &endpoints.installer_mirrors {
		let url = format!("{mirror}{}", spec.installer_path);
		o.display(
			MessageContents::StartProcess(format!("Downloading {url}")),
			MessageLevel::Important,
		);

		match download::file(&url, &dest, client).await {
			Ok(()) => {
				o.display(
					MessageContents::Success(format!(
						"Downloaded installer to {}",
						dest.display()
					)),
					MessageLevel::Important,
				);
				return Ok(());
			}
			Err(err) => {
				o.display(
					MessageContents::Warning(format!("Download from {url} failed: {err:#}")),
					MessageLevel::Important,
				);
				last_error = Some(err);
			}
		}
	}

	match last_error {
		Some(err) => Err(err.context("All download sources failed")),
		None => anyhow::bail!("No download sources are configured"),
	}
}

/// Assemble the installer's output into the final workspace layout. Copying
/// the client jar out of the nested library tree is mandatory; every later
/// sub-step is advisory and only reports warnings
fn assemble(
	workspace: &Workspace,
	installer_file_name: &str,
	o: &mut impl NeobuildOutput,
) -> anyhow::Result<PathBuf> {
	let source = workspace.installed_client_jar_path();
	let client_jar = workspace.client_jar_path();
	files::copy_file(&source, &client_jar)
		.context("Failed to copy the client jar out of the installer output")?;
	o.display(
		MessageContents::Property(
			"Copied client jar".into(),
			Box::new(MessageContents::Simple(client_jar.display().to_string())),
		),
		MessageLevel::Important,
	);

	let installer_path = workspace.join(installer_file_name);
	for member in [VERSION_DESCRIPTOR, INSTALL_PROFILE] {
		match extract_zip_member(&installer_path, member, workspace.dir()) {
			Ok(path) => o.display(
				MessageContents::Property(
					format!("Extracted {member}"),
					Box::new(MessageContents::Simple(path.display().to_string())),
				),
				MessageLevel::Extra,
			),
			Err(err) => o.display(
				MessageContents::Warning(format!("{err:#}")),
				MessageLevel::Important,
			),
		}
	}

	match manifest::patch_version_descriptor(workspace.dir()) {
		Ok(count) => o.display(
			MessageContents::Success(format!(
				"Appended {count} universal libraries to the version descriptor"
			)),
			MessageLevel::Important,
		),
		Err(err) => o.display(
			MessageContents::Warning(format!("Failed to patch the version descriptor: {err:#}")),
			MessageLevel::Important,
		),
	}

	let mut retained = HashSet::from([workspace.client_jar_name()]);
	match copy_auxiliary_files(workspace, o) {
		Ok(copied) => retained.extend(copied),
		Err(err) => o.display(
			MessageContents::Warning(format!("Failed to copy auxiliary files: {err:#}")),
			MessageLevel::Important,
		),
	}

	workspace.clean(&retained, o);

	Ok(client_jar)
}

/// Copy every auxiliary data file referenced by the install profile's data
/// map into the workspace root, returning the names of the copies for
/// retention during cleanup. Unresolvable references are reported and
/// skipped
fn copy_auxiliary_files(
	workspace: &Workspace,
	o: &mut impl NeobuildOutput,
) -> anyhow::Result<Vec<String>> {
	let profile: Value = json_from_file(workspace.join(INSTALL_PROFILE))
		.context("Failed to read the install profile")?;

	let mut copied = Vec::new();
	for coord in manifest::client_data_references(&profile) {
		let relative = coord.relative_path();
		let Some(found) = workspace.find_file(&relative)? else {
			o.display(
				MessageContents::Warning(format!(
					"No file matching {} was produced",
					relative.display()
				)),
				MessageLevel::Important,
			);
			continue;
		};

		let name = coord.file_name();
		match files::copy_file(&found, &workspace.join(&name)) {
			Ok(()) => {
				o.display(
					MessageContents::Property(
						"Copied auxiliary file".into(),
						Box::new(MessageContents::Simple(name.clone())),
					),
					MessageLevel::Extra,
				);
				copied.push(name);
			}
			Err(err) => o.display(
				MessageContents::Warning(format!("Failed to copy {name}: {err:#}")),
				MessageLevel::Important,
			),
		}
	}

	Ok(copied)
}

/// Write the record line for a built client to the artifacts file. The file
/// is truncated on each run, so only the most recent build's line survives
pub fn record_artifact(
	artifacts_path: &Path,
	client_jar: &Path,
	spec: &VersionSpec,
) -> anyhow::Result<()> {
	let line = format!(
		"{} {} {}\n",
		client_jar.display(),
		spec.mc_version,
		spec.loader_version
	);
	std::fs::write(artifacts_path, line).context("Failed to write the artifacts file")?;

	Ok(())
}
