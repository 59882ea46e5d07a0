//! CLI schema for the piccolo binary.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "piccolo")]
#[command(about = "An interactive command console")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to <config dir>/piccolo/config.toml)
	#[arg(long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Run a script file before any `-c` lines, then exit; `:quit` in it skips them
	#[arg(long, value_name = "FILE")]
	pub script: Option<PathBuf>,

	/// Run a console line and exit; may be repeated
	#[arg(short = 'c', long = "command", value_name = "LINE")]
	pub commands: Vec<String>,

	/// Register the demo commands
	#[arg(long)]
	pub demo: bool,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

impl Cli {
	/// True when there is work to run without starting the interactive loop.
	pub fn is_batch(&self) -> bool {
		self.script.is_some() || !self.commands.is_empty()
	}
}

#[cfg(test)]
mod tests;
