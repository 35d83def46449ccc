use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum VersyncError {
	#[error(transparent)]
	#[diagnostic(code(versync::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(versync::config_parse),
		help("check that versync.toml is valid TOML with `manifest`, `version_key`, [output] and/or [templates]")
	)]
	ConfigParse(String),

	#[error("invalid version key: `{0}`")]
	#[diagnostic(
		code(versync::invalid_version_key),
		help("use a dotted path of non-empty table keys without whitespace, e.g. `tool.poetry.version`")
	)]
	InvalidVersionKey(String),

	#[error("failed to parse manifest `{path}`: {reason}")]
	#[diagnostic(code(versync::manifest_parse))]
	ManifestParse { path: String, reason: String },

	#[error("no version available: manifest `{path}` could not be read")]
	#[diagnostic(
		code(versync::version_not_found),
		help("create the manifest or point `manifest` in versync.toml at the right file")
	)]
	VersionNotFound { path: String },

	#[error("manifest `{path}` has no `{key}` entry")]
	#[diagnostic(
		code(versync::missing_version_key),
		help("add the version to the manifest or set `version_key` in versync.toml")
	)]
	MissingVersionKey { path: String, key: String },

	#[error("`{key}` in manifest `{path}` is a {found}, expected a string")]
	#[diagnostic(code(versync::version_not_string))]
	VersionNotString {
		path: String,
		key: String,
		found: &'static str,
	},

	#[error("invalid version `{version}`: {reason}")]
	#[diagnostic(
		code(versync::invalid_version),
		help("versions must be exactly `major.minor.patch` with non-negative integers")
	)]
	InvalidVersion { version: String, reason: String },

	#[error("failed to read template `{path}`: {reason}")]
	#[diagnostic(code(versync::template_read))]
	TemplateRead { path: String, reason: String },

	#[error("template rendering failed: {0}")]
	#[diagnostic(code(versync::template_render))]
	TemplateRender(String),

	#[error("failed to write `{path}`: {reason}")]
	#[diagnostic(
		code(versync::write_file),
		help("the output directory must exist and be writable")
	)]
	WriteFile { path: String, reason: String },
}

pub type VersyncResult<T> = Result<T, VersyncError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
