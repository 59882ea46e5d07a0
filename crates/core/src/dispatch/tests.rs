use std::rc::Rc;

use piccolo_invocation::{CoerceError, ParamKind, Value};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_fixtures::{Recorder, dispatcher_with};
use crate::{Args, CommandResult, CommandSpec, Handler};

#[test]
fn blank_and_comment_lines_do_nothing() {
	let handler = Rc::new(Recorder::default());
	let (dispatcher, capture) = dispatcher_with(&handler);

	dispatcher.run("").unwrap();
	dispatcher.run("# comment").unwrap();
	dispatcher.run("   ").unwrap();

	assert!(handler.recorded().is_empty());
	assert_eq!(capture.contents(), "");
}

#[test]
fn fixed_typed_command_receives_coerced_values() {
	let handler = Rc::new(Recorder::default());
	let (dispatcher, _) = dispatcher_with(&handler);

	dispatcher.run(":a 5").unwrap();
	dispatcher.run(":b -7").unwrap();
	assert_eq!(handler.recorded(), vec![("op1", vec![Value::I32(5)]), ("op1", vec![Value::I32(-7)])]);
}

#[test]
fn mixed_signature_is_coerced_positionally() {
	let handler = Rc::new(Recorder::default());
	let (dispatcher, _) = dispatcher_with(&handler);

	dispatcher.run("mixed TRUE 2.5 word").unwrap();
	assert_eq!(
		handler.recorded(),
		vec![("mixed", vec![Value::Bool(true), Value::F64(2.5), Value::Str("word".into())])]
	);
}

#[test]
fn parse_failure_reports_first_position_and_does_not_invoke() {
	let handler = Rc::new(Recorder::default());
	let (dispatcher, capture) = dispatcher_with(&handler);

	let err = dispatcher.run(":a five").unwrap_err();
	match &err {
		DispatchError::ArgumentParseError {
			command,
			position,
			raw_value,
			expected_kind,
			source,
		} => {
			assert_eq!(command, ":a");
			assert_eq!(*position, 0);
			assert_eq!(raw_value, "five");
			assert_eq!(*expected_kind, ParamKind::I32);
			assert!(matches!(source, CoerceError::InvalidInt { .. }));
		}
		other => panic!("unexpected error: {other:?}"),
	}
	assert!(err.is_pre_invocation());
	assert!(handler.recorded().is_empty());
	assert_eq!(capture.contents(), "command <:a> takes <i32> parameter\n");
}

#[test]
fn later_parse_failure_still_prevents_invocation() {
	let handler = Rc::new(Recorder::default());
	let (dispatcher, capture) = dispatcher_with(&handler);

	let err = dispatcher.run("mixed true nope word").unwrap_err();
	assert!(matches!(err, DispatchError::ArgumentParseError { position: 1, expected_kind: ParamKind::F64, .. }));
	assert!(handler.recorded().is_empty());
	assert_eq!(capture.contents(), "command <mixed> takes <bool, f64, String> parameters\n");
}

#[test]
fn niladic_command_rejects_arguments() {
	let handler = Rc::new(Recorder::default());
	let (dispatcher, capture) = dispatcher_with(&handler);

	dispatcher.run("op2").unwrap();
	let err = dispatcher.run("op2 x").unwrap_err();
	assert!(matches!(
		err,
		DispatchError::ArgumentCountMismatch {
			required: 0,
			supplied: 1,
			..
		}
	));
	assert_eq!(handler.recorded(), vec![("op2", vec![])]);
	assert_eq!(capture.contents(), "command <op2> takes no parameters\n");
}

#[test]
fn fixed_arity_mismatch_does_not_invoke() {
	let handler = Rc::new(Recorder::default());
	let (dispatcher, _) = dispatcher_with(&handler);

	let err = dispatcher.run(":a").unwrap_err();
	assert!(matches!(
		err,
		DispatchError::ArgumentCountMismatch {
			required: 1,
			supplied: 0,
			..
		}
	));
	let err = dispatcher.run(":a 1 2").unwrap_err();
	assert!(matches!(
		err,
		DispatchError::ArgumentCountMismatch {
			required: 1,
			supplied: 2,
			..
		}
	));
	assert!(handler.recorded().is_empty());
}

#[test]
fn variadic_command_receives_words_verbatim() {
	let handler = Rc::new(Recorder::default());
	let (dispatcher, _) = dispatcher_with(&handler);

	dispatcher.run("cmd").unwrap();
	dispatcher.run("cmd a").unwrap();
	dispatcher.run("cmd a b c").unwrap();

	let words = |w: &[&str]| vec![Value::StrList(w.iter().map(|s| s.to_string()).collect())];
	assert_eq!(
		handler.recorded(),
		vec![("cmd", words(&[])), ("cmd", words(&["a"])), ("cmd", words(&["a", "b", "c"]))]
	);
}

#[test]
fn unknown_command_is_not_found() {
	let handler = Rc::new(Recorder::default());
	let (dispatcher, _) = dispatcher_with(&handler);

	let err = dispatcher.run("nope").unwrap_err();
	assert!(matches!(&err, DispatchError::CommandNotFound { name } if name == "nope"));
	assert_eq!(err.to_string(), "unknown command <nope>");
}

#[test]
fn disabled_command_is_not_found() {
	let handler = Rc::new(Recorder::default());
	let (dispatcher, _) = dispatcher_with(&handler);
	assert!(matches!(dispatcher.run("off"), Err(DispatchError::CommandNotFound { .. })));
}

#[test]
fn handler_failure_is_wrapped() {
	let handler = Rc::new(Recorder::default());
	let (dispatcher, _) = dispatcher_with(&handler);

	let err = dispatcher.run("boom").unwrap_err();
	assert!(!err.is_pre_invocation());
	match err {
		DispatchError::HandlerExecution { command, cause } => {
			assert_eq!(command, "boom");
			assert_eq!(cause.to_string(), "boom");
		}
		other => panic!("unexpected error: {other:?}"),
	}
}

#[test]
fn dropped_handler_fails_at_invocation() {
	let handler = Rc::new(Recorder::default());
	let (dispatcher, _) = dispatcher_with(&handler);
	drop(handler);

	let err = dispatcher.run("op2").unwrap_err();
	assert!(!err.is_pre_invocation());
	assert!(matches!(
		err,
		DispatchError::HandlerExecution {
			cause: CommandError::HandlerDropped("recorder"),
			..
		}
	));

	// Matching still happens first.
	assert!(dispatcher.run("op2 x").unwrap_err().is_pre_invocation());
}

#[test]
fn exit_signal_round_trip() {
	let (dispatcher, _) = dispatcher_with(&Rc::new(Recorder::default()));
	assert!(!dispatcher.exit_requested());
	dispatcher.run(":q").unwrap();
	assert!(dispatcher.exit_requested());
	dispatcher.clear_exit();
	assert!(!dispatcher.exit_requested());
}

#[test]
fn registry_can_change_between_commands() {
	let handler = Rc::new(Recorder::default());
	let (mut dispatcher, _) = dispatcher_with(&handler);
	let id = crate::HandlerId::of(&handler);

	dispatcher.run("op2").unwrap();
	assert!(dispatcher.registry_mut().remove_handler(id));
	assert!(matches!(dispatcher.run("op2"), Err(DispatchError::CommandNotFound { .. })));
}

/// Re-runs its own alias forever.
struct Recursive;

impl Recursive {
	fn again(&self, ctx: &CommandContext<'_>, _args: &Args) -> CommandResult {
		ctx.run("again")?;
		Ok(())
	}
}

impl Handler for Recursive {
	fn manifest() -> Vec<CommandSpec<Self>> {
		vec![CommandSpec::new("again", Self::again)]
	}
}

#[test]
fn runaway_nesting_is_cut_off() {
	let handler = Rc::new(Recursive);
	let (dispatcher, _) = dispatcher_with(&handler);

	let mut err = dispatcher.run("again").unwrap_err();
	let mut depth = 1;
	loop {
		match err {
			DispatchError::HandlerExecution {
				cause: CommandError::Dispatch(inner),
				..
			} => {
				err = *inner;
				depth += 1;
			}
			DispatchError::HandlerExecution {
				cause: CommandError::NestingTooDeep(limit),
				..
			} => {
				assert_eq!(limit, MAX_NESTING);
				break;
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}
	assert_eq!(depth, MAX_NESTING + 1);

	// The depth counter unwinds fully.
	assert!(matches!(
		dispatcher.run("again"),
		Err(DispatchError::HandlerExecution { .. })
	));
}
