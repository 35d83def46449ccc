use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;
use versync_cli::Commands;
use versync_cli::OutputFormat;
use versync_cli::VersyncCli;
use versync_core::CheckResult;
use versync_core::VersyncConfig;
use versync_core::check_generated_files;
use versync_core::describe;
use versync_core::generate;
use versync_core::generate_source_files;
use versync_core::make_relative;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

const SAMPLE_CONFIG: &str = "# versync configuration\n#\n# Every setting is optional; the \
                             values below are the defaults.\n\n# Manifest holding the version, \
                             relative to this directory.\n# manifest = \"pyproject.toml\"\n\n# \
                             Dotted path to the version string inside the manifest.\n# \
                             version_key = \"tool.poetry.version\"\n\n# [output]\n# header = \
                             \"Inc/version.h\"\n# source = \"Src/version.c\"\n# lint_suppression \
                             = \"NOLINT(modernize-macro-to-enum)\"\n\n# Custom minijinja templates. \
                             Use {% include \"doc\" %} for the generated-file comment.\n# \
                             [templates]\n# header = \"templates/version.h.j2\"\n# source = \
                             \"templates/version.c.j2\"\n";

fn main() {
	let args = VersyncCli::parse();

	// Respect NO_COLOR env var, --no-color flag and terminals without color.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stderr).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match args.command {
		Some(Commands::Init) => run_init(&args),
		None | Some(Commands::Generate) => run_generate(&args),
		Some(Commands::Check { diff, format }) => run_check(&args, diff, format),
		Some(Commands::Info { format }) => run_info(&args, format),
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<versync_core::VersyncError>() {
			Ok(versync_err) => {
				let report: miette::Report = (*versync_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr so stdout only carries the status lines.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose {
		"versync_core=debug"
	} else {
		"warn"
	};
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.with_ansi(use_color)
		.init();
}

fn resolve_root(args: &VersyncCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn print_section(title: &str) {
	println!();
	println!("{}", colored!(title, bold));
}

fn print_field(label: &str, value: impl std::fmt::Display) {
	println!("{label:<20} {value}");
}

fn run_init(args: &VersyncCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = VersyncConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join("versync.toml");
	std::fs::write(&config_path, SAMPLE_CONFIG)?;
	println!("Created {}", config_path.display());
	println!();
	println!("Next steps:");
	println!("  1. Point `manifest` and `version_key` at your project version");
	println!("  2. Run `versync generate` to write the version header and source");
	println!("  3. Run `versync check` in CI to catch stale generated files");

	Ok(())
}

fn run_generate(args: &VersyncCli) -> Result<(), Box<dyn std::error::Error>> {
	let Some(root) = &args.path else {
		generate_source_files()?;
		return Ok(());
	};

	let config = VersyncConfig::load_or_default(root)?;
	let stdout = std::io::stdout();
	let mut out = stdout.lock();
	generate(root, &config, &mut out)?;

	Ok(())
}

fn run_check(
	args: &VersyncCli,
	show_diff: bool,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = VersyncConfig::load_or_default(&root)?;
	let result = check_generated_files(&root, &config)?;

	match format {
		OutputFormat::Json => print_check_json(&result, &root),
		OutputFormat::Text => print_check_text(&result, &root, show_diff),
	}

	if !result.is_ok() {
		process::exit(1);
	}

	Ok(())
}

fn print_check_json(result: &CheckResult, root: &Path) {
	let stale_entries: Vec<serde_json::Value> = result
		.stale
		.iter()
		.map(|file| {
			let status = if file.current_content.is_some() {
				"stale"
			} else {
				"missing"
			};
			serde_json::json!({
				"file": make_relative(&file.path, root),
				"status": status,
			})
		})
		.collect();
	let output = serde_json::json!({
		"ok": result.is_ok(),
		"version": result.version.to_string(),
		"stale": stale_entries,
	});
	println!("{output}");
}

fn print_check_text(result: &CheckResult, root: &Path, show_diff: bool) {
	if result.is_ok() {
		println!(
			"Check passed: generated files match version {}.",
			result.version
		);
		return;
	}

	eprintln!("Check failed for version {}.", result.version);
	for file in &result.stale {
		let rel = make_relative(&file.path, root);
		match &file.current_content {
			Some(current) => {
				eprintln!("  {rel} is out of date");
				if show_diff {
					print_diff(current, &file.expected_content);
				}
			}
			None => eprintln!("  {rel} is missing"),
		}
	}

	eprintln!();
	eprintln!(
		"{} generated file(s) are out of date. Run `versync generate` to fix.",
		result.stale.len()
	);
}

fn run_info(args: &VersyncCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let summary = describe(&root)?;

	if matches!(format, OutputFormat::Json) {
		println!("{}", serde_json::to_string_pretty(&summary)?);
		return Ok(());
	}

	print_section("Config");
	match &summary.config_path {
		Some(path) => print_field("Resolved config", path.display()),
		None => print_field("Resolved config", "(none, using defaults)"),
	}

	print_section("Version");
	print_field("Manifest", make_relative(&summary.manifest_path, &root));
	print_field("Version key", &summary.version_key);
	print_field("Version", colored!(summary.version.to_string(), green));
	print_field("Major", summary.version.major);
	print_field("Minor", summary.version.minor);
	print_field("Patch", summary.version.patch);

	print_section("Outputs");
	print_field("Header", make_relative(&summary.header_path, &root));
	print_field("Source", make_relative(&summary.source_path, &root));

	Ok(())
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}
