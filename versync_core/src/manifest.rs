use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::VersyncError;
use crate::VersyncResult;

/// Default location of the version inside a poetry managed `pyproject.toml`.
pub const DEFAULT_VERSION_KEY: &str = "tool.poetry.version";

/// Dotted path of table keys leading to the version string in a manifest.
///
/// Segments are split on `.` with no support for quoted keys, so
/// `tool.poetry.version` walks `[tool]` → `[tool.poetry]` → `version`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct VersionKey(Vec<String>);

impl VersionKey {
	pub fn segments(&self) -> &[String] {
		&self.0
	}
}

impl Default for VersionKey {
	fn default() -> Self {
		Self(
			DEFAULT_VERSION_KEY
				.split('.')
				.map(ToString::to_string)
				.collect(),
		)
	}
}

impl FromStr for VersionKey {
	type Err = VersyncError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let segments: Vec<String> = value.split('.').map(String::from).collect();

		if segments
			.iter()
			.any(|segment| segment.is_empty() || segment.contains(char::is_whitespace))
		{
			return Err(VersyncError::InvalidVersionKey(value.to_string()));
		}

		Ok(Self(segments))
	}
}

impl TryFrom<String> for VersionKey {
	type Error = VersyncError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl fmt::Display for VersionKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.join("."))
	}
}

/// Read the version string stored at `key` in the manifest at `path`.
///
/// Returns `Ok(None)` when the manifest cannot be read at all. A manifest
/// that exists but is not valid TOML, lacks the key, or stores something other
/// than a string there is an error.
pub fn read_manifest_version(path: &Path, key: &VersionKey) -> VersyncResult<Option<String>> {
	let bytes = match std::fs::read(path) {
		Ok(bytes) => bytes,
		Err(error) => {
			tracing::warn!(path = %path.display(), %error, "manifest could not be read");
			return Ok(None);
		}
	};

	let path_display = path.display().to_string();
	let content = std::str::from_utf8(&bytes).map_err(|e| VersyncError::ManifestParse {
		path: path_display.clone(),
		reason: e.to_string(),
	})?;
	let table: toml::Table = toml::from_str(content).map_err(|e| VersyncError::ManifestParse {
		path: path_display.clone(),
		reason: e.to_string(),
	})?;

	let version = lookup_version(&table, key, &path_display)?;
	tracing::debug!(path = %path_display, %key, %version, "read manifest version");

	Ok(Some(version))
}

/// Walk `key` through an already parsed manifest table.
pub fn lookup_version(
	table: &toml::Table,
	key: &VersionKey,
	path_display: &str,
) -> VersyncResult<String> {
	let missing = || VersyncError::MissingVersionKey {
		path: path_display.to_string(),
		key: key.to_string(),
	};

	let Some((last, parents)) = key.segments().split_last() else {
		return Err(missing());
	};

	let mut current = table;
	for segment in parents {
		current = current
			.get(segment)
			.and_then(toml::Value::as_table)
			.ok_or_else(missing)?;
	}

	match current.get(last) {
		Some(toml::Value::String(version)) => Ok(version.clone()),
		Some(other) => Err(VersyncError::VersionNotString {
			path: path_display.to_string(),
			key: key.to_string(),
			found: other.type_str(),
		}),
		None => Err(missing()),
	}
}
