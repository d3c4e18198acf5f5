use std::path::PathBuf;

/// Sections of a Maven coordinate string with a classifier, as used by the
/// install profile's data map
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ArtifactCoordinate {
	/// The group / organization of the artifact
	pub group: String,
	/// The artifact name
	pub artifact: String,
	/// The version of the artifact
	pub version: String,
	/// The classifier, such as `client` or `universal`
	pub classifier: String,
	/// The file extension, `jar` unless overridden with an `@` suffix
	pub extension: String,
}

impl ArtifactCoordinate {
	/// Extract the parts of a coordinate string
	///
	/// ```
	/// use neobuild::maven::ArtifactCoordinate;
	///
	/// let coord = ArtifactCoordinate::parse("com.example:foo:1.0:client@zip").unwrap();
	/// assert_eq!(coord.group, "com.example".to_string());
	/// assert_eq!(coord.classifier, "client".to_string());
	/// assert_eq!(coord.extension, "zip".to_string());
	/// ```
	pub fn parse(string: &str) -> Option<Self> {
		let mut parts = string.split(':');
		let group = parts.next()?.to_owned();
		let artifact = parts.next()?.to_owned();
		let version = parts.next()?.to_owned();
		let classifier = parts.next()?;
		let (classifier, extension) = match classifier.split_once('@') {
			Some((classifier, extension)) => (classifier.to_owned(), extension.to_owned()),
			None => (classifier.to_owned(), "jar".to_owned()),
		};

		Some(Self {
			group,
			artifact,
			version,
			classifier,
			extension,
		})
	}

	/// Extract the parts of a bracketed coordinate reference like
	/// `[com.example:foo:1.0:client]`. Returns None for strings that are not
	/// bracketed references
	pub fn parse_bracketed(string: &str) -> Option<Self> {
		let inner = string.strip_prefix('[')?.strip_suffix(']')?;
		Self::parse(inner)
	}

	/// Get the relative path of this artifact under a Maven repository layout
	pub fn relative_path(&self) -> PathBuf {
		let mut path = PathBuf::new();
		for org in self.group.split('.') {
			path.push(org);
		}
		path.push(&self.artifact);
		path.push(&self.version);
		path.push(self.file_name());

		path
	}

	/// Get the filename of this artifact
	pub fn file_name(&self) -> String {
		format!(
			"{}-{}-{}.{}",
			self.artifact, self.version, self.classifier, self.extension
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use std::path::Path;

	#[test]
	fn test_coordinate_parse() {
		let coord = ArtifactCoordinate::parse_bracketed("[com.example:foo:1.0:client@zip]")
			.expect("Coordinate should parse");
		assert_eq!(
			coord.relative_path(),
			Path::new("com/example/foo/1.0/foo-1.0-client.zip")
		);
	}

	#[test]
	fn test_default_extension() {
		let coord = ArtifactCoordinate::parse_bracketed("[net.neoforged:neoforge:21.1.77:mappings]")
			.expect("Coordinate should parse");
		assert_eq!(coord.extension, "jar");
		assert_eq!(coord.file_name(), "neoforge-21.1.77-mappings.jar");
	}

	#[test]
	fn test_rejects_unbracketed() {
		assert!(ArtifactCoordinate::parse_bracketed("com.example:foo:1.0:client").is_none());
		assert!(ArtifactCoordinate::parse_bracketed("[/some/literal/path]").is_none());
	}

	#[test]
	fn test_rejects_short_coordinates() {
		assert!(ArtifactCoordinate::parse("com.example:foo:1.0").is_none());
	}
}
