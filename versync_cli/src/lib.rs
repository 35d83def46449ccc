use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Propagate a manifest version into generated C header/source files.",
	long_about = "versync reads the version from your project manifest (by default \
	              `tool.poetry.version` in `pyproject.toml`) and writes it into a generated C \
	              header and source file as `VERSION`, `VERSION_MAJOR`, `VERSION_MINOR` and \
	              `VERSION_PATCH`.\n\nRunning `versync` without a subcommand is the same as \
	              `versync generate`.\n\nQuick start:\n  versync init      Create a versync.toml\n  \
	              versync generate  Write the header and source file\n  versync check     Verify \
	              the generated files are up to date\n  versync info      Show the resolved \
	              version and paths"
)]
pub struct VersyncCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize versync in a project by creating a sample `versync.toml`.
	///
	/// If a config file already exists, this command is a no-op and exits
	/// successfully.
	Init,
	/// Write the generated header and source file.
	///
	/// Reads the version from the manifest, renders both templates and
	/// overwrites the output files. Prints one line per written file.
	Generate,
	/// Check that the generated files match the manifest version.
	///
	/// Renders the expected files without writing them and compares against
	/// what is on disk. Exits with a non-zero status code if any file is
	/// missing or out of date. Ideal for CI pipelines.
	Check {
		/// Show a unified diff for each stale file.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for check results. Use `text` for human-readable
		/// output or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Print the resolved config, manifest, version and output paths.
	Info {
		/// Output format for info results. Use `text` for human-readable
		/// output or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
