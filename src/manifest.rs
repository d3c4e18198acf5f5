use std::path::Path;

use anyhow::{bail, Context};
use serde_json::Value;

use crate::io::{json_from_file, json_to_file_pretty};
use crate::maven::ArtifactCoordinate;

/// Filename of the version descriptor inside the installer jar
pub static VERSION_DESCRIPTOR: &str = "version.json";
/// Filename of the install profile inside the installer jar
pub static INSTALL_PROFILE: &str = "install_profile.json";

/// Name prefix of the loader's own library entries
static UNIVERSAL_PREFIX: &str = "net.neoforged:neoforge:";
/// Name suffix of the platform-independent loader build
static UNIVERSAL_SUFFIX: &str = ":universal";

/// Select every library entry in the install profile naming a universal
/// loader build. Entries are returned verbatim so unknown fields pass
/// through unchanged
pub fn select_universal_libraries(profile: &Value) -> Vec<Value> {
	let mut out = Vec::new();
	let Some(libraries) = profile.get("libraries").and_then(Value::as_array) else {
		return out;
	};

	for library in libraries {
		let Some(name) = library.get("name").and_then(Value::as_str) else {
			continue;
		};
		if name.starts_with(UNIVERSAL_PREFIX) && name.ends_with(UNIVERSAL_SUFFIX) {
			out.push(library.clone());
		}
	}

	out
}

/// Append library entries to a version descriptor's library list, creating
/// the list if it is absent. Entries are not deduplicated, so a descriptor
/// must not be patched twice without restoring it first
pub fn append_libraries(descriptor: &mut Value, libraries: Vec<Value>) -> anyhow::Result<()> {
	let Some(object) = descriptor.as_object_mut() else {
		bail!("The version descriptor is not a JSON object");
	};

	let entry = object
		.entry("libraries")
		.or_insert_with(|| Value::Array(Vec::new()));
	let Some(list) = entry.as_array_mut() else {
		bail!("The libraries field of the version descriptor is not an array");
	};
	list.extend(libraries);

	Ok(())
}

/// Patch the version descriptor in a directory by appending every universal
/// library from the install profile next to it. The descriptor is rewritten
/// whole with pretty formatting. Returns the number of appended entries
pub fn patch_version_descriptor(dir: &Path) -> anyhow::Result<usize> {
	let profile: Value = json_from_file(dir.join(INSTALL_PROFILE))
		.context("Failed to read the install profile")?;
	let libraries = select_universal_libraries(&profile);
	if libraries.is_empty() {
		bail!("No universal library entries were found in the install profile");
	}

	let descriptor_path = dir.join(VERSION_DESCRIPTOR);
	let mut descriptor: Value =
		json_from_file(&descriptor_path).context("Failed to read the version descriptor")?;
	let count = libraries.len();
	append_libraries(&mut descriptor, libraries)?;
	json_to_file_pretty(&descriptor_path, &descriptor)
		.context("Failed to write back the version descriptor")?;

	Ok(count)
}

/// Get the artifact coordinates referenced by the client side of the
/// install profile's data map. Entries whose client field is not a
/// bracketed coordinate are skipped
pub fn client_data_references(profile: &Value) -> Vec<ArtifactCoordinate> {
	let mut out = Vec::new();
	let Some(data) = profile.get("data").and_then(Value::as_object) else {
		return out;
	};

	for entry in data.values() {
		let Some(client) = entry.get("client").and_then(Value::as_str) else {
			continue;
		};
		if let Some(coord) = ArtifactCoordinate::parse_bracketed(client) {
			out.push(coord);
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	use serde_json::json;

	fn profile_fixture() -> Value {
		json!({
			"spec": 1,
			"libraries": [
				{"name": "net.neoforged:neoforge:21.1.77:universal", "downloads": {}},
				{"name": "net.neoforged:neoforge:21.1.77:client", "downloads": {}},
				{"name": "org.ow2.asm:asm:9.7", "downloads": {}},
				{"name": "net.neoforged:neoforge:21.1.77-beta:universal"}
			],
			"data": {
				"MOJMAPS": {
					"client": "[net.minecraft:client:1.21.1:mappings@txt]",
					"server": "[net.minecraft:server:1.21.1:mappings@txt]"
				},
				"BINPATCH": {
					"client": "/data/client.lzma",
					"server": "/data/server.lzma"
				}
			}
		})
	}

	#[test]
	fn test_universal_selection() {
		let selected = select_universal_libraries(&profile_fixture());
		assert_eq!(selected.len(), 2);
		for library in &selected {
			let name = library.get("name").and_then(Value::as_str).unwrap();
			assert!(name.ends_with(":universal"));
		}
	}

	#[test]
	fn test_append_preserves_existing_entries() {
		let mut descriptor = json!({
			"id": "neoforge-21.1.77",
			"libraries": [
				{"name": "com.mojang:logging:1.2.7"}
			]
		});
		let selected = select_universal_libraries(&profile_fixture());
		append_libraries(&mut descriptor, selected).expect("Append should succeed");

		let libraries = descriptor["libraries"].as_array().unwrap();
		assert_eq!(libraries.len(), 3);
		assert_eq!(libraries[0]["name"], "com.mojang:logging:1.2.7");
	}

	#[test]
	fn test_append_creates_missing_list() {
		let mut descriptor = json!({"id": "neoforge-21.1.77"});
		let selected = select_universal_libraries(&profile_fixture());
		append_libraries(&mut descriptor, selected).expect("Append should succeed");

		assert_eq!(descriptor["libraries"].as_array().unwrap().len(), 2);
	}

	#[test]
	fn test_client_data_references() {
		let refs = client_data_references(&profile_fixture());
		// The literal-path entry is not a coordinate and must be skipped
		assert_eq!(refs.len(), 1);
		assert_eq!(refs[0].artifact, "client");
		assert_eq!(refs[0].extension, "txt");
	}

	#[test]
	fn test_patch_round_trip() {
		let dir = tempfile::tempdir().expect("Failed to create temp dir");
		crate::io::json_to_file_pretty(dir.path().join(INSTALL_PROFILE), &profile_fixture())
			.expect("Failed to write profile");
		crate::io::json_to_file_pretty(
			dir.path().join(VERSION_DESCRIPTOR),
			&json!({"id": "neoforge-21.1.77"}),
		)
		.expect("Failed to write descriptor");

		let count = patch_version_descriptor(dir.path()).expect("Patch should succeed");
		assert_eq!(count, 2);

		let descriptor: Value = json_from_file(dir.path().join(VERSION_DESCRIPTOR))
			.expect("Failed to read descriptor back");
		assert_eq!(descriptor["libraries"].as_array().unwrap().len(), 2);
	}

	#[test]
	fn test_patch_fails_without_profile() {
		let dir = tempfile::tempdir().expect("Failed to create temp dir");
		assert!(patch_version_descriptor(dir.path()).is_err());
	}
}
