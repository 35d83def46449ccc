use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::GeneratedFile;
use crate::Version;
use crate::VersyncError;
use crate::VersyncResult;
use crate::config::VersyncConfig;
use crate::manifest::read_manifest_version;
use crate::render_files;

/// A generated file whose on-disk content differs from what would be
/// rendered now.
#[derive(Debug)]
pub struct StaleFile {
	pub path: PathBuf,
	/// `None` when the file does not exist yet.
	pub current_content: Option<String>,
	pub expected_content: String,
}

/// Result of checking the generated files against the manifest.
#[derive(Debug)]
pub struct CheckResult {
	pub version: Version,
	pub stale: Vec<StaleFile>,
}

impl CheckResult {
	/// Returns true if every generated file is up to date.
	pub fn is_ok(&self) -> bool {
		self.stale.is_empty()
	}
}

/// Everything a run would use, resolved but not rendered.
#[derive(Debug, Serialize)]
pub struct ProjectSummary {
	pub config_path: Option<PathBuf>,
	pub manifest_path: PathBuf,
	pub version_key: String,
	pub version_string: String,
	pub version: Version,
	pub header_path: PathBuf,
	pub source_path: PathBuf,
}

/// Propagate the manifest version of the current directory into its
/// generated header/source pair, reporting on stdout.
///
/// This is the entry point for build and release tooling. The config is
/// discovered in the current directory and defaults apply when none exists.
pub fn generate_source_files() -> VersyncResult<Version> {
	let root = std::env::current_dir()?;
	let config = VersyncConfig::load_or_default(&root)?;
	let stdout = std::io::stdout();
	let mut out = stdout.lock();

	generate(&root, &config, &mut out)
}

/// Read the manifest version, render both files and write them.
///
/// Nothing is written unless the version parsed and both templates rendered.
/// A failure writing the source file leaves the already written header in
/// place.
pub fn generate<W: Write>(
	root: &Path,
	config: &VersyncConfig,
	out: &mut W,
) -> VersyncResult<Version> {
	let version = resolve_version(root, config)?;
	let files = render_files(&version, config, root)?;
	write_generated_files(&files, &version, root, out)?;

	Ok(version)
}

/// Read and parse the version configured for `root`.
pub fn resolve_version(root: &Path, config: &VersyncConfig) -> VersyncResult<Version> {
	let version_string = required_version_string(root, config)?;
	version_string.parse()
}

fn required_version_string(root: &Path, config: &VersyncConfig) -> VersyncResult<String> {
	let manifest_path = config.manifest_path(root);
	read_manifest_version(&manifest_path, &config.version_key)?.ok_or_else(|| {
		VersyncError::VersionNotFound {
			path: make_relative(&manifest_path, root),
		}
	})
}

/// Write each file in order, announcing it on `out` once it has been opened.
pub fn write_generated_files<W: Write>(
	files: &[GeneratedFile],
	version: &Version,
	root: &Path,
	out: &mut W,
) -> VersyncResult<()> {
	for file in files {
		let rel = make_relative(&file.path, root);
		let write_error = |e: std::io::Error| {
			VersyncError::WriteFile {
				path: rel.clone(),
				reason: e.to_string(),
			}
		};

		let mut handle = std::fs::File::create(&file.path).map_err(write_error)?;
		writeln!(out, "writing version {version} to {rel}")?;
		handle
			.write_all(file.content.as_bytes())
			.map_err(write_error)?;
		tracing::debug!(path = %rel, bytes = file.content.len(), "wrote generated file");
	}

	Ok(())
}

/// Compare the generated files on disk with what would be rendered now.
pub fn check_generated_files(root: &Path, config: &VersyncConfig) -> VersyncResult<CheckResult> {
	let version = resolve_version(root, config)?;
	let files = render_files(&version, config, root)?;
	let mut stale = Vec::new();

	for file in files {
		let current_bytes = match std::fs::read(&file.path) {
			Ok(bytes) => Some(bytes),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
			Err(e) => return Err(e.into()),
		};

		if current_bytes.as_deref() != Some(file.content.as_bytes()) {
			// Non UTF-8 content is still reported as stale.
			let current_content =
				current_bytes.map(|bytes| String::from_utf8_lossy(&bytes).into_owned());
			stale.push(StaleFile {
				path: file.path,
				current_content,
				expected_content: file.content,
			});
		}
	}

	Ok(CheckResult { version, stale })
}

/// Resolve config, manifest and version for display.
pub fn describe(root: &Path) -> VersyncResult<ProjectSummary> {
	let config_path = VersyncConfig::resolve_path(root);
	let config = VersyncConfig::load_or_default(root)?;
	let version_string = required_version_string(root, &config)?;
	let version = version_string.parse()?;

	Ok(ProjectSummary {
		config_path,
		manifest_path: config.manifest_path(root),
		version_key: config.version_key.to_string(),
		version_string,
		version,
		header_path: config.header_path(root),
		source_path: config.source_path(root),
	})
}

/// Make a path relative to root for display purposes.
pub fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
