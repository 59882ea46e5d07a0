//! Error types for registration, matching and execution.
//!
//! Failures fall into two classes. Everything a [`DispatchError`] reports
//! except [`DispatchError::HandlerExecution`] is detected before the
//! operation is called, so no handler code has run. Registration problems are
//! reported by [`RegistryError`] when a handler is added, never at call time.

use piccolo_invocation::{ArgError, CoerceError, ParamKind};

use crate::handler::HandlerId;
use crate::script::ScriptError;

/// Failure raised by an operation body.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
	/// Operation failed with a message.
	#[error("{0}")]
	Failed(String),
	/// An argument was read with the wrong type.
	#[error(transparent)]
	Arg(#[from] ArgError),
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
	/// A nested command run through the dispatcher failed.
	#[error(transparent)]
	Dispatch(Box<DispatchError>),
	#[error(transparent)]
	Script(#[from] ScriptError),
	/// The handler owning the operation is no longer alive.
	#[error("handler `{0}` has been dropped")]
	HandlerDropped(&'static str),
	#[error("commands nested deeper than {0} levels")]
	NestingTooDeep(usize),
}

impl CommandError {
	pub fn failed(msg: impl Into<String>) -> Self {
		Self::Failed(msg.into())
	}
}

impl From<DispatchError> for CommandError {
	fn from(e: DispatchError) -> Self {
		Self::Dispatch(Box::new(e))
	}
}

/// Result type for operation bodies.
pub type CommandResult = Result<(), CommandError>;

/// Failure of [`crate::Dispatcher::run`].
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
	/// No alias resolves to a command.
	#[error("unknown command <{name}>")]
	CommandNotFound { name: String },
	/// Number of supplied arguments does not match the signature.
	#[error("command <{command}> requires {required} parameter(s) ({supplied} supplied)")]
	ArgumentCountMismatch {
		command: String,
		required: usize,
		supplied: usize,
	},
	/// First argument that could not be coerced into its declared kind.
	#[error("unable to parse parameter {position} of <{command}> as {expected_kind}: {source}")]
	ArgumentParseError {
		command: String,
		position: usize,
		raw_value: String,
		expected_kind: ParamKind,
		source: CoerceError,
	},
	/// The operation was invoked and failed.
	#[error("command <{command}> failed: {cause}")]
	HandlerExecution {
		command: String,
		#[source]
		cause: CommandError,
	},
}

impl DispatchError {
	/// Returns true when the failure happened before any handler code ran.
	pub fn is_pre_invocation(&self) -> bool {
		!matches!(self, Self::HandlerExecution { .. })
	}
}

/// A command rejected while a handler was being registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	#[error("command <{command}> declares unsupported parameter kind <{kind}>")]
	UnsupportedParameterKind { command: String, kind: String },
}

/// Returned by [`crate::CommandRegistry::add_handler`] when some commands
/// were rejected.
///
/// The handler stays registered under `id` with its remaining commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} command(s) of `{handler}` rejected: {}", errors.len(), join_errors(errors))]
pub struct RegistrationError {
	pub id: HandlerId,
	pub handler: &'static str,
	pub errors: Vec<RegistryError>,
}

fn join_errors(errors: &[RegistryError]) -> String {
	errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
