//! Interactive read-dispatch loop.
//!
//! # Role
//!
//! The loop owns nothing but the line source. It prints the banner, then
//! reads a line, hands it to the dispatcher and reports the outcome, until
//! the dispatcher raises its exit signal or input ends.
//!
//! # Invariants
//!
//! - A failing command never ends the loop; its diagnostic is printed as
//!   `error: <message>`.
//! - Blank lines are not dispatched, recorded in history or followed by a
//!   separator.
//! - Ctrl-C discards the current line and prompts again.

mod complete;
mod editor;

use std::io;

use piccolo_core::Dispatcher;
use rustyline::error::ReadlineError;
use thiserror::Error;
use tracing::debug;

pub use complete::CommandCompleter;
pub use editor::EditorSource;

use crate::config::Config;

/// What a [`LineSource`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
	Line(String),
	/// The user pressed Ctrl-C.
	Interrupted,
	/// End of input.
	Eof,
}

/// Errors that end the interactive loop.
#[derive(Debug, Error)]
pub enum ReplError {
	#[error("failed to read input: {0}")]
	Readline(#[from] ReadlineError),
	#[error("failed to write output: {0}")]
	Io(#[from] io::Error),
}

/// Where the loop gets its lines from.
pub trait LineSource {
	fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ReplError>;

	/// Records a line that was dispatched.
	fn add_history(&mut self, _line: &str) {}
}

/// Runs the loop until exit or end of input.
pub fn run(dispatcher: &Dispatcher, config: &Config, source: &mut impl LineSource) -> Result<(), ReplError> {
	let out = dispatcher.output();
	if !config.banner.is_empty() {
		write!(out, "{}", config.banner)?;
		if !config.banner.ends_with('\n') {
			writeln!(out)?;
		}
	}
	out.flush()?;

	dispatcher.clear_exit();
	while !dispatcher.exit_requested() {
		let line = match source.read_line(&config.prompt)? {
			ReadOutcome::Line(line) => line,
			ReadOutcome::Interrupted => continue,
			ReadOutcome::Eof => {
				debug!("end of input");
				break;
			}
		};
		if line.trim().is_empty() {
			continue;
		}

		source.add_history(&line);
		if let Err(e) = dispatcher.run(&line) {
			writeln!(out, "error: {e}")?;
		}
		if config.separator {
			writeln!(out)?;
		}
		out.flush()?;
	}
	Ok(())
}
