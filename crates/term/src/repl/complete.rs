use piccolo_core::{Builtins, CommandDescriptor, CommandRegistry, Handler};
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// What the word after a command name completes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgHint {
	Nothing,
	CommandName,
	Path,
}

impl ArgHint {
	fn of(desc: &CommandDescriptor) -> Self {
		if desc.handler_name() != Builtins.name() {
			return Self::Nothing;
		}
		match desc.operation() {
			"help" | "describe_type" => Self::CommandName,
			"source" => Self::Path,
			_ => Self::Nothing,
		}
	}
}

/// Result of classifying the word under the cursor.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Candidates {
	Words { start: usize, words: Vec<String> },
	Path,
}

/// Tab completion over a snapshot of the registry's keys.
///
/// The registry cannot change while the interactive loop runs, so the
/// snapshot taken at startup stays accurate.
pub struct CommandCompleter {
	keys: Vec<(String, ArgHint)>,
	files: FilenameCompleter,
}

impl CommandCompleter {
	pub fn from_registry(registry: &CommandRegistry) -> Self {
		let mut names: Vec<&str> = registry.descriptors().flat_map(CommandDescriptor::keys).collect();
		names.sort_unstable();
		names.dedup();

		let keys = names
			.into_iter()
			.filter_map(|name| Some((name.to_string(), ArgHint::of(registry.resolve(name)?))))
			.collect();
		Self {
			keys,
			files: FilenameCompleter::new(),
		}
	}

	pub(crate) fn candidates(&self, line: &str, pos: usize) -> Candidates {
		let head = &line[..pos];
		let start = head.rfind(' ').map_or(0, |i| i + 1);
		let word = &head[start..];
		let mut before = head[..start].split(' ').filter(|f| !f.is_empty());

		let hint = match (before.next(), before.next()) {
			(None, _) => ArgHint::CommandName,
			(Some(cmd), None) => self.hint_for(cmd),
			(Some(_), Some(_)) => ArgHint::Nothing,
		};

		match hint {
			ArgHint::Path => Candidates::Path,
			ArgHint::CommandName => Candidates::Words {
				start,
				words: self
					.keys
					.iter()
					.filter(|(key, _)| key.starts_with(word))
					.map(|(key, _)| key.clone())
					.collect(),
			},
			ArgHint::Nothing => Candidates::Words {
				start,
				words: Vec::new(),
			},
		}
	}

	fn hint_for(&self, cmd: &str) -> ArgHint {
		self.keys
			.iter()
			.find(|(key, _)| key == cmd)
			.map_or(ArgHint::Nothing, |(_, hint)| *hint)
	}
}

impl Completer for CommandCompleter {
	type Candidate = Pair;

	fn complete(&self, line: &str, pos: usize, ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
		match self.candidates(line, pos) {
			Candidates::Path => self.files.complete(line, pos, ctx),
			Candidates::Words { start, words } => {
				let pairs = words
					.into_iter()
					.map(|word| Pair {
						display: word.clone(),
						replacement: word,
					})
					.collect();
				Ok((start, pairs))
			}
		}
	}
}

impl Helper for CommandCompleter {}

impl Highlighter for CommandCompleter {}

impl Hinter for CommandCompleter {
	type Hint = String;
}

impl Validator for CommandCompleter {}

#[cfg(test)]
mod tests;
