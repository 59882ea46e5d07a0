//! Non-interactive runs: `--script` and `-c`.

use std::path::Path;

use anyhow::Context as _;
use piccolo_core::{Dispatcher, ScriptOutcome, run_script};
use tracing::debug;

/// Runs `script` (if any), then each of `commands`, stopping at the first
/// failure or when the script or a command raises the exit signal.
pub fn run(dispatcher: &Dispatcher, script: Option<&Path>, commands: &[String]) -> anyhow::Result<()> {
	dispatcher.clear_exit();
	if let Some(path) = script
		&& run_script(dispatcher, path)? == ScriptOutcome::ExitRequested
	{
		debug!(skipped = commands.len(), "script requested exit; skipping commands");
		dispatcher.request_exit();
	}

	for (i, line) in commands.iter().enumerate() {
		if dispatcher.exit_requested() {
			debug!(skipped = commands.len() - i, "exit requested; skipping remaining commands");
			break;
		}
		dispatcher
			.run(line)
			.with_context(|| format!("command {} (`{line}`) failed", i + 1))?;
	}
	dispatcher.output().flush()?;
	Ok(())
}
