use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::VersionKey;
use crate::VersyncError;
use crate::VersyncResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["versync.toml", ".versync.toml", ".config/versync.toml"];

/// Default manifest path, relative to the project root.
pub const DEFAULT_MANIFEST: &str = "pyproject.toml";
/// Default generated header path, relative to the project root.
pub const DEFAULT_HEADER: &str = "Inc/version.h";
/// Default generated source path, relative to the project root.
pub const DEFAULT_SOURCE: &str = "Src/version.c";

/// Configuration loaded from a `versync.toml` file.
///
/// Every field is optional. A missing file is equivalent to an empty one.
///
/// ```toml
/// manifest = "docs/pyproject.toml"
/// version_key = "tool.poetry.version"
///
/// [output]
/// header = "Inc/version.h"
/// source = "Src/version.c"
/// lint_suppression = "NOLINT(modernize-macro-to-enum)"
///
/// [templates]
/// header = "templates/version.h.j2"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersyncConfig {
	/// Manifest holding the version, relative to the project root.
	#[serde(default = "default_manifest")]
	pub manifest: PathBuf,
	/// Dotted path to the version string inside the manifest.
	#[serde(default)]
	pub version_key: VersionKey,
	/// Where the generated files are written.
	#[serde(default)]
	pub output: OutputConfig,
	/// Optional template overrides.
	#[serde(default)]
	pub templates: TemplatesConfig,
}

impl Default for VersyncConfig {
	fn default() -> Self {
		Self {
			manifest: default_manifest(),
			version_key: VersionKey::default(),
			output: OutputConfig::default(),
			templates: TemplatesConfig::default(),
		}
	}
}

/// Output locations for the generated header/source pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
	#[serde(default = "default_header")]
	pub header: PathBuf,
	#[serde(default = "default_source")]
	pub source: PathBuf,
	/// Trailing comment appended to the integer macros, e.g.
	/// `NOLINT(modernize-macro-to-enum)` for clang-tidy.
	#[serde(default)]
	pub lint_suppression: Option<String>,
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self {
			header: default_header(),
			source: default_source(),
			lint_suppression: None,
		}
	}
}

/// Paths to custom minijinja templates, relative to the project root.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
	#[serde(default)]
	pub header: Option<PathBuf>,
	#[serde(default)]
	pub source: Option<PathBuf>,
}

fn default_manifest() -> PathBuf {
	PathBuf::from(DEFAULT_MANIFEST)
}

fn default_header() -> PathBuf {
	PathBuf::from(DEFAULT_HEADER)
}

fn default_source() -> PathBuf {
	PathBuf::from(DEFAULT_SOURCE)
}

impl VersyncConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> VersyncResult<Option<VersyncConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Load the discovered config, falling back to defaults when absent.
	pub fn load_or_default(root: &Path) -> VersyncResult<VersyncConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	/// Parse config file content.
	pub fn parse(content: &str) -> VersyncResult<VersyncConfig> {
		toml::from_str(content).map_err(|e| VersyncError::ConfigParse(e.to_string()))
	}

	pub fn manifest_path(&self, root: &Path) -> PathBuf {
		root.join(&self.manifest)
	}

	pub fn header_path(&self, root: &Path) -> PathBuf {
		root.join(&self.output.header)
	}

	pub fn source_path(&self, root: &Path) -> PathBuf {
		root.join(&self.output.source)
	}
}
