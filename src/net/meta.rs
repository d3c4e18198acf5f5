use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::net::download;

/// Remote endpoints consumed during version resolution and installer
/// download. Passed explicitly into the resolver and fetcher so that tests
/// can substitute their own sources
#[derive(Debug, Clone)]
pub struct ApiEndpoints {
	/// Base URL for the NeoForge loader list, scoped by appending a
	/// Minecraft version
	pub loader_list: String,
	/// URL of the Maven metadata document for the loader
	pub maven_metadata: String,
	/// URL of the Minecraft version manifest
	pub version_manifest: String,
	/// URL of the loader compatibility manifest
	pub compat_manifest: String,
	/// Static-file repositories for installer downloads, tried in order
	pub installer_mirrors: Vec<String>,
}

impl Default for ApiEndpoints {
	fn default() -> Self {
		Self {
			loader_list: "https://bmclapi2.bangbang93.com/neoforge/list".into(),
			maven_metadata:
				"https://maven.neoforged.net/net/neoforged/neoforge/maven-metadata.xml".into(),
			version_manifest: "https://launchermeta.mojang.com/mc/game/version_manifest.json"
				.into(),
			compat_manifest: "https://launcher-meta.modrinth.com/neo/v0/manifest.json".into(),
			installer_mirrors: vec!["https://maven.neoforged.net/releases".into()],
		}
	}
}

/// An available NeoForge version in the loader list
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoaderListEntry {
	/// The NeoForge version
	pub version: String,
	/// The path of the installer jar on the download repository
	#[serde(rename = "installerPath")]
	pub installer_path: String,
	/// The Minecraft version this loader version targets
	pub mcversion: String,
	/// The raw version string, usually prefixed with the loader name
	#[serde(rename = "rawVersion")]
	pub raw_version: String,
}

/// JSON format for the version manifest that contains all available
/// Minecraft versions
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct VersionManifest {
	/// The latest available versions
	pub latest: LatestVersions,
}

/// Latest available Minecraft versions in the version manifest
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LatestVersions {
	/// The latest release version
	pub release: String,
	/// The latest snapshot version
	pub snapshot: String,
}

/// JSON format for the loader compatibility manifest
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CompatManifest {
	/// Entries for each supported game version
	#[serde(rename = "gameVersions")]
	pub game_versions: Vec<CompatGameVersion>,
}

/// A game version entry in the compatibility manifest
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CompatGameVersion {
	/// The Minecraft version
	pub id: String,
	/// The loader versions available for this game version
	pub loaders: Vec<CompatLoader>,
}

/// A loader entry in the compatibility manifest
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CompatLoader {
	/// The loader version
	pub id: String,
	/// The URL to this loader version's metadata
	pub url: String,
}

/// XML format of a Maven metadata document
#[derive(Deserialize, Debug, Clone)]
pub struct MavenMetadata {
	/// The versioning section of the document
	pub versioning: MavenVersioning,
}

/// The versioning section of a Maven metadata document
#[derive(Deserialize, Debug, Clone)]
pub struct MavenVersioning {
	/// The latest available version
	pub latest: String,
}

/// Get the list of NeoForge versions for a Minecraft version
pub async fn get_loader_list(
	mc_version: &str,
	endpoints: &ApiEndpoints,
	client: &Client,
) -> anyhow::Result<Vec<LoaderListEntry>> {
	let url = format!("{}/{mc_version}", endpoints.loader_list);
	download::json(&url, client)
		.await
		.context("Failed to download the loader list")
}

/// Get the Minecraft version manifest
pub async fn get_version_manifest(
	endpoints: &ApiEndpoints,
	client: &Client,
) -> anyhow::Result<VersionManifest> {
	download::json(&endpoints.version_manifest, client)
		.await
		.context("Failed to download the version manifest")
}

/// Get the loader compatibility manifest
pub async fn get_compat_manifest(
	endpoints: &ApiEndpoints,
	client: &Client,
) -> anyhow::Result<CompatManifest> {
	download::json(&endpoints.compat_manifest, client)
		.await
		.context("Failed to download the compatibility manifest")
}

/// Get the Maven metadata document for the loader
pub async fn get_maven_metadata(
	endpoints: &ApiEndpoints,
	client: &Client,
) -> anyhow::Result<MavenMetadata> {
	let text = download::text(&endpoints.maven_metadata, client)
		.await
		.context("Failed to download Maven metadata")?;
	quick_xml::de::from_str(&text).context("Failed to parse Maven metadata")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_loader_list_format() {
		let text = r#"[
			{
				"version": "21.1.77",
				"installerPath": "/maven/net/neoforged/neoforge/21.1.77/neoforge-21.1.77-installer.jar",
				"mcversion": "1.21.1",
				"rawVersion": "neoforge-21.1.77"
			}
		]"#;
		let list: Vec<LoaderListEntry> =
			serde_json::from_str(text).expect("List should deserialize");
		assert_eq!(list.len(), 1);
		assert_eq!(list[0].version, "21.1.77");
		assert!(list[0].installer_path.starts_with("/maven"));
	}

	#[test]
	fn test_maven_metadata_format() {
		let text = r#"<metadata>
			<groupId>net.neoforged</groupId>
			<artifactId>neoforge</artifactId>
			<versioning>
				<latest>21.1.77</latest>
				<release>21.1.77</release>
			</versioning>
		</metadata>"#;
		let meta: MavenMetadata = quick_xml::de::from_str(text).expect("XML should deserialize");
		assert_eq!(meta.versioning.latest, "21.1.77");
	}
}
