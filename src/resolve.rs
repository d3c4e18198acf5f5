use anyhow::Context;
use reqwest::Client;
use thiserror::Error;

use crate::net::meta::{self, ApiEndpoints, CompatManifest};
use crate::output::{MessageContents, MessageLevel, NeobuildOutput};

/// A concrete build target produced by version resolution. Immutable once
/// created; consumed by the fetcher, invoker, and assembler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
	/// The Minecraft version this build targets
	pub mc_version: String,
	/// The NeoForge version to build
	pub loader_version: String,
	/// The path of the installer jar on the download repository
	pub installer_path: String,
	/// The raw version string, usually prefixed with the loader name
	pub raw_version: String,
}

impl VersionSpec {
	/// Construct a spec from an explicit Minecraft / NeoForge version pair.
	/// The installer path follows the repository's fixed layout
	pub fn from_pair(mc_version: &str, loader_version: &str) -> Self {
		Self {
			mc_version: mc_version.to_owned(),
			loader_version: loader_version.to_owned(),
			installer_path: format!(
				"/net/neoforged/neoforge/{loader_version}/neoforge-{loader_version}-installer.jar"
			),
			raw_version: format!("neoforge-{loader_version}"),
		}
	}

	/// Get the filename of the installer jar
	pub fn installer_file_name(&self) -> &str {
		self.installer_path
			.rsplit('/')
			.next()
			.unwrap_or(&self.installer_path)
	}
}

/// Error from resolving a version
#[derive(Debug, Error)]
pub enum ResolveError {
	/// No loader version exists for the requested game version
	#[error("No NeoForge version was found for Minecraft {0}")]
	NoLoaderVersion(String),
	/// The loader list for the requested game version is empty
	#[error("No NeoForge versions are available for Minecraft {0}")]
	EmptyLoaderList(String),
}

/// Resolve the most recent compatible Minecraft / NeoForge pairing by
/// combining the game version manifest with the compatibility manifest.
/// Fails with [`ResolveError::NoLoaderVersion`] before any download happens
/// if the compatibility manifest has no entry for the current release
pub async fn resolve_latest(
	endpoints: &ApiEndpoints,
	client: &Client,
	o: &mut impl NeobuildOutput,
) -> anyhow::Result<VersionSpec> {
	let manifest = meta::get_version_manifest(endpoints, client)
		.await
		.context("Failed to get the version manifest")?;
	let release = manifest.latest.release;
	o.display(
		MessageContents::Property(
			"Latest Minecraft release".into(),
			Box::new(MessageContents::Simple(release.clone())),
		),
		MessageLevel::Important,
	);

	let compat = meta::get_compat_manifest(endpoints, client)
		.await
		.context("Failed to get the compatibility manifest")?;
	let loader_version = find_loader_version(&compat, &release)
		.ok_or(ResolveError::NoLoaderVersion(release.clone()))?;
	o.display(
		MessageContents::Property(
			format!("Latest NeoForge version for Minecraft {release}"),
			Box::new(MessageContents::Simple(loader_version.clone())),
		),
		MessageLevel::Important,
	);

	Ok(VersionSpec::from_pair(&release, &loader_version))
}

/// Resolve the newest NeoForge version available for a Minecraft version
/// using the loader list endpoint
pub async fn resolve_for_minecraft(
	mc_version: &str,
	endpoints: &ApiEndpoints,
	client: &Client,
	o: &mut impl NeobuildOutput,
) -> anyhow::Result<VersionSpec> {
	let list = meta::get_loader_list(mc_version, endpoints, client)
		.await
		.context("Failed to get the loader list")?;

	// The endpoint does not document its ordering. The list has been observed
	// to be ascending, so the last entry is taken as the newest; this is an
	// unverified assumption
	let entry = list
		.last()
		.ok_or(ResolveError::EmptyLoaderList(mc_version.to_owned()))?;

	o.display(
		MessageContents::Property(
			format!("Newest NeoForge version for Minecraft {mc_version}"),
			Box::new(MessageContents::Simple(entry.version.clone())),
		),
		MessageLevel::Important,
	);

	Ok(VersionSpec {
		mc_version: entry.mcversion.clone(),
		loader_version: entry.version.clone(),
		installer_path: normalize_installer_path(&entry.installer_path),
		raw_version: entry.raw_version.clone(),
	})
}

/// Get the latest loader version from the Maven metadata document
pub async fn latest_loader_version(
	endpoints: &ApiEndpoints,
	client: &Client,
) -> anyhow::Result<String> {
	let meta = meta::get_maven_metadata(endpoints, client)
		.await
		.context("Failed to get Maven metadata")?;

	Ok(meta.versioning.latest)
}

/// Find the first loader version for a game version in the compatibility
/// manifest
fn find_loader_version(manifest: &CompatManifest, game_version: &str) -> Option<String> {
	manifest
		.game_versions
		.iter()
		.find(|entry| entry.id == game_version)
		.and_then(|entry| entry.loaders.first())
		.map(|loader| loader.id.clone())
}

/// Strip the mirror's `/maven` path component from an installer path so it
/// can be joined with a repository base URL
pub fn normalize_installer_path(path: &str) -> String {
	path.replacen("/maven", "", 1)
}

#[cfg(test)]
mod tests {
	use super::*;

	use crate::net::meta::{CompatGameVersion, CompatLoader};

	#[test]
	fn test_spec_from_pair() {
		let spec = VersionSpec::from_pair("1.21.1", "21.1.77");
		assert_eq!(
			spec.installer_path,
			"/net/neoforged/neoforge/21.1.77/neoforge-21.1.77-installer.jar"
		);
		assert_eq!(spec.raw_version, "neoforge-21.1.77");
		assert_eq!(spec.installer_file_name(), "neoforge-21.1.77-installer.jar");
	}

	#[test]
	fn test_normalize_installer_path() {
		assert_eq!(
			normalize_installer_path("/maven/net/x/1.0/foo.jar"),
			"/net/x/1.0/foo.jar"
		);
		assert_eq!(
			normalize_installer_path("/net/x/1.0/foo.jar"),
			"/net/x/1.0/foo.jar"
		);
	}

	#[test]
	fn test_find_loader_version() {
		let manifest = CompatManifest {
			game_versions: vec![
				CompatGameVersion {
					id: "1.21.1".into(),
					loaders: vec![CompatLoader {
						id: "21.1.77".into(),
						url: "https://example.com/21.1.77.json".into(),
					}],
				},
				CompatGameVersion {
					id: "1.21.3".into(),
					loaders: Vec::new(),
				},
			],
		};

		assert_eq!(
			find_loader_version(&manifest, "1.21.1"),
			Some("21.1.77".into())
		);
		assert_eq!(find_loader_version(&manifest, "1.21.3"), None);
		assert_eq!(find_loader_version(&manifest, "1.20.4"), None);
	}
}
