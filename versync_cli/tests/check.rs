mod common;

use serde_json::Value;
use versync_cli::Commands;
use versync_cli::OutputFormat;
use versync_cli::VersyncCli;
use versync_core::AnyEmptyResult;

#[test]
fn check_passes_after_generate() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::poetry_project(tmp.path(), "2.4.10")?;

	common::versync_cmd()
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::versync_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"generated files match version 2.4.10",
		));

	Ok(())
}

#[test]
fn check_fails_when_files_are_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::poetry_project(tmp.path(), "2.4.10")?;

	common::versync_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("Inc/version.h is missing"))
		.stderr(predicates::str::contains("Src/version.c is missing"))
		.stderr(predicates::str::contains("Run `versync generate` to fix."));

	assert!(!tmp.path().join("Inc/version.h").exists());

	Ok(())
}

#[test]
fn check_diff_shows_version_change() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::poetry_project(tmp.path(), "1.0.0")?;

	common::versync_cmd()
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();
	common::poetry_project(tmp.path(), "1.1.0")?;

	common::versync_cmd()
		.arg("check")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("Inc/version.h is out of date"))
		.stderr(predicates::str::contains("-#define VERSION \"1.0.0\""))
		.stderr(predicates::str::contains("+#define VERSION \"1.1.0\""))
		.stderr(predicates::str::contains("+#define VERSION_MINOR 1"));

	Ok(())
}

#[test]
fn check_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::poetry_project(tmp.path(), "3.2.1")?;
	std::fs::write(tmp.path().join("Inc/version.h"), "stale\n")?;

	let output = common::versync_cmd()
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.get_output()
		.stdout
		.clone();

	let json: Value = serde_json::from_slice(&output)?;
	assert_eq!(json["ok"], false);
	assert_eq!(json["version"], "3.2.1");
	assert_eq!(json["stale"][0]["file"], "Inc/version.h");
	assert_eq!(json["stale"][0]["status"], "stale");
	assert_eq!(json["stale"][1]["file"], "Src/version.c");
	assert_eq!(json["stale"][1]["status"], "missing");

	Ok(())
}

#[test]
fn check_command_is_accepted_by_cli_parser() {
	use clap::Parser;

	let cli = VersyncCli::parse_from(["versync", "check"]);
	match cli.command {
		Some(Commands::Check { diff, format }) => {
			assert!(!diff);
			assert!(matches!(format, OutputFormat::Text));
		}
		_ => panic!("expected Check command"),
	}

	let cli = VersyncCli::parse_from(["versync", "check", "--diff", "--format", "json"]);
	match cli.command {
		Some(Commands::Check { diff, format }) => {
			assert!(diff);
			assert!(matches!(format, OutputFormat::Json));
		}
		_ => panic!("expected Check command"),
	}

	let cli = VersyncCli::parse_from(["versync"]);
	assert!(cli.command.is_none());
}
