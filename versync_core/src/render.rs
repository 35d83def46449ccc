use std::path::Path;
use std::path::PathBuf;

use minijinja::Environment;
use minijinja::UndefinedBehavior;
use minijinja::context;

use crate::Version;
use crate::VersyncError;
use crate::VersyncResult;
use crate::config::VersyncConfig;

const DOC_TEMPLATE_NAME: &str = "doc";
const HEADER_TEMPLATE_NAME: &str = "header";
const SOURCE_TEMPLATE_NAME: &str = "source";

/// Generated-file comment block shared by the header and the source file.
/// Custom templates can pull it in with `{% include "doc" %}`.
pub const DOC_TEMPLATE: &str = r#"/** \file {{ file }}
 * Auto generated file created by "versync generate".
 * See also "{{ version_key }}" in {{ manifest }}.
 *
 * example:
 * \code{.sh}
 * versync generate
 * \endcode
 **/"#;

pub const HEADER_TEMPLATE: &str = r#"{% include "doc" %}

#pragma once

#define VERSION "{{ version }}"
#define VERSION_MAJOR {{ major }}{% if lint_suppression %} // {{ lint_suppression }}{% endif %}
#define VERSION_MINOR {{ minor }}{% if lint_suppression %} // {{ lint_suppression }}{% endif %}
#define VERSION_PATCH {{ patch }}{% if lint_suppression %} // {{ lint_suppression }}{% endif %}
"#;

pub const SOURCE_TEMPLATE: &str = r#"{% include "doc" %}

#include "{{ header }}"
"#;

/// A rendered output file that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
	/// Absolute (root joined) destination path.
	pub path: PathBuf,
	pub content: String,
}

/// Render the header and source file for `version`, header first.
pub fn render_files(
	version: &Version,
	config: &VersyncConfig,
	root: &Path,
) -> VersyncResult<Vec<GeneratedFile>> {
	let header_source = load_template(root, config.templates.header.as_deref(), HEADER_TEMPLATE)?;
	let source_source = load_template(root, config.templates.source.as_deref(), SOURCE_TEMPLATE)?;

	let mut env = Environment::new();
	env.set_keep_trailing_newline(true);
	env.set_undefined_behavior(UndefinedBehavior::Strict);
	env.add_template(DOC_TEMPLATE_NAME, DOC_TEMPLATE)
		.map_err(render_error)?;
	env.add_template(HEADER_TEMPLATE_NAME, &header_source)
		.map_err(render_error)?;
	env.add_template(SOURCE_TEMPLATE_NAME, &source_source)
		.map_err(render_error)?;

	let header_path = config.header_path(root);
	let source_path = config.source_path(root);
	let header_name = file_name(&config.output.header);

	let mut files = Vec::with_capacity(2);
	for (template_name, path) in [
		(HEADER_TEMPLATE_NAME, header_path),
		(SOURCE_TEMPLATE_NAME, source_path),
	] {
		let ctx = context! {
			version => version.to_string(),
			major => version.major,
			minor => version.minor,
			patch => version.patch,
			file => file_name(&path),
			header => header_name.clone(),
			manifest => normalize_path(&config.manifest),
			version_key => config.version_key.to_string(),
			lint_suppression => config.output.lint_suppression.clone(),
		};
		let content = env
			.get_template(template_name)
			.and_then(|template| template.render(ctx))
			.map_err(render_error)?;

		files.push(GeneratedFile { path, content });
	}

	Ok(files)
}

/// Render only the header for `version` using the default config.
pub fn render_header(version: &Version) -> VersyncResult<String> {
	render_default(version, 0)
}

/// Render only the source file for `version` using the default config.
pub fn render_source(version: &Version) -> VersyncResult<String> {
	render_default(version, 1)
}

fn render_default(version: &Version, index: usize) -> VersyncResult<String> {
	let mut files = render_files(version, &VersyncConfig::default(), Path::new(""))?;
	Ok(files.swap_remove(index).content)
}

fn load_template(root: &Path, custom: Option<&Path>, builtin: &str) -> VersyncResult<String> {
	let Some(rel_path) = custom else {
		return Ok(builtin.to_string());
	};

	std::fs::read_to_string(root.join(rel_path)).map_err(|e| VersyncError::TemplateRead {
		path: rel_path.display().to_string(),
		reason: e.to_string(),
	})
}

fn file_name(path: &Path) -> String {
	path.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_default()
}

/// Forward slashes keep the rendered output identical across platforms.
fn normalize_path(path: &Path) -> String {
	path.to_string_lossy().replace('\\', "/")
}

fn render_error(error: minijinja::Error) -> VersyncError {
	VersyncError::TemplateRender(error.to_string())
}
