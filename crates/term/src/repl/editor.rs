use std::path::PathBuf;

use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing::{debug, warn};

use super::{CommandCompleter, LineSource, ReadOutcome, ReplError};

/// Terminal line editor with history and command completion.
pub struct EditorSource {
	editor: Editor<CommandCompleter, DefaultHistory>,
	history: Option<PathBuf>,
}

impl EditorSource {
	/// Creates the editor and loads `history` if it exists.
	pub fn new(completer: CommandCompleter, history: Option<PathBuf>) -> Result<Self, ReplError> {
		let mut editor = Editor::new()?;
		editor.set_helper(Some(completer));

		if let Some(path) = &history
			&& path.exists()
			&& let Err(e) = editor.load_history(path)
		{
			warn!(path = %path.display(), error = %e, "failed to load history");
		}

		Ok(Self { editor, history })
	}

	/// Writes the history file, creating its directory if needed.
	pub fn save_history(&mut self) {
		let Some(path) = &self.history else {
			return;
		};
		if let Some(parent) = path.parent()
			&& let Err(e) = std::fs::create_dir_all(parent)
		{
			warn!(path = %parent.display(), error = %e, "failed to create history directory");
			return;
		}
		match self.editor.save_history(path) {
			Ok(()) => debug!(path = %path.display(), "history saved"),
			Err(e) => warn!(path = %path.display(), error = %e, "failed to save history"),
		}
	}
}

impl LineSource for EditorSource {
	fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ReplError> {
		match self.editor.readline(prompt) {
			Ok(line) => Ok(ReadOutcome::Line(line)),
			Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
			Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
			Err(e) => Err(e.into()),
		}
	}

	fn add_history(&mut self, line: &str) {
		if let Err(e) = self.editor.add_history_entry(line) {
			debug!(error = %e, "failed to record history entry");
		}
	}
}
