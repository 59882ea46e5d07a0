//! Runs a file of console lines through a dispatcher.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::dispatch::Dispatcher;
use crate::error::DispatchError;

/// Failure while running a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
	#[error("failed to read script {}: {error}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		error: io::Error,
	},
	/// A line failed; the lines after it were not run.
	#[error("{}:{line}: {source}", path.display())]
	Line {
		path: PathBuf,
		/// 1-based line number.
		line: usize,
		source: Box<DispatchError>,
	},
}

/// How a script run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOutcome {
	/// Every line ran.
	Completed,
	/// A line raised the exit signal; the lines after it were not run.
	ExitRequested,
}

/// Runs every non-empty line of the file at `path`.
///
/// The exit signal is cleared before the first line and again at the end,
/// so a `:quit` inside the script ends the script but not the caller. The
/// returned outcome tells the caller whether that happened. The first
/// failing line aborts the run.
pub fn run_script(dispatcher: &Dispatcher, path: &Path) -> Result<ScriptOutcome, ScriptError> {
	let file = File::open(path).map_err(|error| ScriptError::Io {
		path: path.to_path_buf(),
		error,
	})?;

	debug!(path = %path.display(), "running script");
	dispatcher.clear_exit();
	let result = run_lines(dispatcher, path, BufReader::new(file));
	let outcome = if dispatcher.exit_requested() {
		ScriptOutcome::ExitRequested
	} else {
		ScriptOutcome::Completed
	};
	dispatcher.clear_exit();
	result.map(|()| outcome)
}

fn run_lines(dispatcher: &Dispatcher, path: &Path, reader: impl BufRead) -> Result<(), ScriptError> {
	for (n, line) in reader.lines().enumerate() {
		let line = line.map_err(|error| ScriptError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		if line.is_empty() {
			continue;
		}

		dispatcher.run(&line).map_err(|e| ScriptError::Line {
			path: path.to_path_buf(),
			line: n + 1,
			source: Box::new(e),
		})?;
		if dispatcher.exit_requested() {
			debug!(path = %path.display(), line = n + 1, "script stopped by exit request");
			break;
		}
	}
	Ok(())
}
