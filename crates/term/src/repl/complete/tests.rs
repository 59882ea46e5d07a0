use pretty_assertions::assert_eq;

use super::*;

fn completer() -> CommandCompleter {
	CommandCompleter::from_registry(&CommandRegistry::new())
}

fn words(candidates: Candidates) -> (usize, Vec<String>) {
	match candidates {
		Candidates::Words { start, words } => (start, words),
		Candidates::Path => panic!("expected words, got a path completion"),
	}
}

#[test]
fn first_word_completes_command_keys() {
	let (start, found) = words(completer().candidates(":h", 2));
	assert_eq!(start, 0);
	assert_eq!(found, [":h", ":help"]);
}

#[test]
fn empty_line_offers_every_key() {
	let c = completer();
	let (_, found) = words(c.candidates("", 0));
	assert_eq!(found.len(), c.keys.len());
	assert!(found.contains(&":quit".to_string()));
}

#[test]
fn help_argument_completes_command_keys() {
	let (start, found) = words(completer().candidates(":help :qu", 9));
	assert_eq!(start, 6);
	assert_eq!(found, [":quit"]);
}

#[test]
fn source_argument_completes_paths() {
	assert_eq!(completer().candidates(":s ./scr", 8), Candidates::Path);
	assert_eq!(completer().candidates(":source ", 8), Candidates::Path);
}

#[test]
fn other_arguments_complete_nothing() {
	let (start, found) = words(completer().candidates(":print hel", 10));
	assert_eq!(start, 7);
	assert!(found.is_empty());

	let (_, found) = words(completer().candidates(":help :q :", 10));
	assert!(found.is_empty());
}

#[test]
fn repeated_spaces_are_skipped() {
	let (start, found) = words(completer().candidates(":type   :ty", 11));
	assert_eq!(start, 8);
	assert_eq!(found, [":type"]);
}
