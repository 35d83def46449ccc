use std::path::Path;

use tempfile::TempDir;

pub(crate) const DEFAULT_HEADER_2_4_10: &str = r#"/** \file version.h
 * Auto generated file created by "versync generate".
 * See also "tool.poetry.version" in pyproject.toml.
 *
 * example:
 * \code{.sh}
 * versync generate
 * \endcode
 **/

#pragma once

#define VERSION "2.4.10"
#define VERSION_MAJOR 2
#define VERSION_MINOR 4
#define VERSION_PATCH 10
"#;

pub(crate) fn pyproject(version: &str) -> String {
	format!(
		"[tool.poetry]\nname = \"3dpaxxel\"\nversion = \"{version}\"\ndescription = \"ADXL345 \
		 sampling firmware\"\n\n[tool.poetry.scripts]\nversionbump = \"docs.version:main\"\n"
	)
}

/// A project with a manifest at the default location and both default output
/// directories in place.
pub(crate) fn project_with_manifest(manifest: &str) -> TempDir {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	write(tmp.path(), "pyproject.toml", manifest);
	std::fs::create_dir_all(tmp.path().join("Inc")).unwrap_or_else(|e| panic!("mkdir: {e}"));
	std::fs::create_dir_all(tmp.path().join("Src")).unwrap_or_else(|e| panic!("mkdir: {e}"));
	tmp
}

pub(crate) fn project_with_version(version: &str) -> TempDir {
	project_with_manifest(&pyproject(version))
}

pub(crate) fn write(root: &Path, rel_path: &str, content: &str) {
	let path = root.join(rel_path);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("mkdir: {e}"));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {rel_path}: {e}"));
}

pub(crate) fn read(root: &Path, rel_path: &str) -> String {
	std::fs::read_to_string(root.join(rel_path)).unwrap_or_else(|e| panic!("read {rel_path}: {e}"))
}

/// Pull `(major, minor, patch)` back out of a rendered header.
pub(crate) fn parse_macros(header: &str) -> (u64, u64, u64) {
	let value = |name: &str| -> u64 {
		header
			.lines()
			.find_map(|line| line.strip_prefix(&format!("#define {name} ")))
			.and_then(|rest| rest.split_whitespace().next())
			.and_then(|number| number.parse().ok())
			.unwrap_or_else(|| panic!("missing macro {name}"))
	};

	(
		value("VERSION_MAJOR"),
		value("VERSION_MINOR"),
		value("VERSION_PATCH"),
	)
}
