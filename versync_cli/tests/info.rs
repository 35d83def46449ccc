mod common;

use serde_json::Value;
use versync_core::AnyEmptyResult;

#[test]
fn info_prints_version_and_paths() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::poetry_project(tmp.path(), "0.1.8")?;

	common::versync_cmd()
		.arg("info")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("(none, using defaults)"))
		.stdout(predicates::str::contains("tool.poetry.version"))
		.stdout(predicates::str::contains("0.1.8"))
		.stdout(predicates::str::contains("Inc/version.h"))
		.stdout(predicates::str::contains("Src/version.c"));

	Ok(())
}

#[test]
fn info_resolves_dot_versync_toml() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::poetry_project(tmp.path(), "0.1.8")?;
	std::fs::write(tmp.path().join(".versync.toml"), "")?;

	let expected_path = tmp.path().join(".versync.toml").display().to_string();

	common::versync_cmd()
		.arg("info")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Resolved config"))
		.stdout(predicates::str::contains(expected_path));

	Ok(())
}

#[test]
fn info_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::poetry_project(tmp.path(), "2.4.10")?;

	let output = common::versync_cmd()
		.arg("info")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let json: Value = serde_json::from_slice(&output)?;
	assert_eq!(json["config_path"], Value::Null);
	assert_eq!(json["version_key"], "tool.poetry.version");
	assert_eq!(json["version_string"], "2.4.10");
	assert_eq!(json["version"]["major"], 2);
	assert_eq!(json["version"]["minor"], 4);
	assert_eq!(json["version"]["patch"], 10);

	Ok(())
}

#[test]
fn info_reports_non_string_version() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("pyproject.toml"),
		"[tool.poetry.version]\nmajor = 1\n",
	)?;

	common::versync_cmd()
		.arg("info")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("versync::version_not_string"));

	Ok(())
}
