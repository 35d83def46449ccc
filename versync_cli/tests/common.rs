use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn versync_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("versync"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// Write a poetry manifest and create the default output directories.
pub fn poetry_project(root: &Path, version: &str) -> std::io::Result<()> {
	std::fs::write(
		root.join("pyproject.toml"),
		format!("[tool.poetry]\nname = \"3dpaxxel\"\nversion = \"{version}\"\n"),
	)?;
	std::fs::create_dir_all(root.join("Inc"))?;
	std::fs::create_dir_all(root.join("Src"))?;
	Ok(())
}
