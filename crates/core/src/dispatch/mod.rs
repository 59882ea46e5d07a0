//! Turns a console line into a call of a registered operation.
//!
//! Matching happens entirely before the call. An unknown name, a wrong
//! number of arguments or an argument that does not coerce all fail without
//! running any handler code; only [`DispatchError::HandlerExecution`] means
//! the operation was entered.

use std::cell::Cell;

use piccolo_invocation::{Args, CommandLine, coerce};
use tracing::debug;

use crate::context::CommandContext;
use crate::descriptor::{CommandDescriptor, InvocationMode};
use crate::error::{CommandError, DispatchError};
use crate::output::Output;
use crate::registry::CommandRegistry;

/// Maximum depth of commands run from inside other commands.
pub const MAX_NESTING: usize = 64;

/// Resolves, matches and invokes commands against an owned registry.
///
/// Operations only ever see `&Dispatcher`, so the registry cannot change
/// while a command runs. Mutate it between commands through
/// [`Dispatcher::registry_mut`].
pub struct Dispatcher {
	registry: CommandRegistry,
	out: Output,
	exit: Cell<bool>,
	depth: Cell<usize>,
}

impl Dispatcher {
	pub fn new(registry: CommandRegistry, out: Output) -> Self {
		Self {
			registry,
			out,
			exit: Cell::new(false),
			depth: Cell::new(0),
		}
	}

	pub fn registry(&self) -> &CommandRegistry {
		&self.registry
	}

	pub fn registry_mut(&mut self) -> &mut CommandRegistry {
		&mut self.registry
	}

	pub fn output(&self) -> &Output {
		&self.out
	}

	/// Raises the exit signal checked by driving loops.
	pub fn request_exit(&self) {
		self.exit.set(true);
	}

	pub fn exit_requested(&self) -> bool {
		self.exit.get()
	}

	pub fn clear_exit(&self) {
		self.exit.set(false);
	}

	/// Runs one console line.
	///
	/// Empty lines and lines starting with `#` succeed without doing anything.
	pub fn run(&self, line: &str) -> Result<(), DispatchError> {
		let Some(cmd) = CommandLine::parse(line) else {
			return Ok(());
		};

		let descriptor = self.registry.resolve(cmd.name).ok_or_else(|| DispatchError::CommandNotFound {
			name: cmd.name.to_string(),
		})?;

		let args = self.match_args(descriptor, &cmd)?;
		self.invoke(descriptor, cmd.name, &args)
	}

	/// Checks arity and coerces every argument, or fails on the first problem.
	fn match_args(&self, descriptor: &CommandDescriptor, cmd: &CommandLine<'_>) -> Result<Args, DispatchError> {
		match descriptor.mode() {
			InvocationMode::VariadicPassthrough => Ok(Args::passthrough(cmd.args.iter().copied())),
			InvocationMode::Niladic | InvocationMode::FixedTyped => {
				let signature = descriptor.signature();
				if cmd.args.len() != signature.len() {
					self.emit_usage(descriptor, cmd.name);
					return Err(DispatchError::ArgumentCountMismatch {
						command: cmd.name.to_string(),
						required: signature.len(),
						supplied: cmd.args.len(),
					});
				}

				let mut values = Vec::with_capacity(signature.len());
				for (position, (&kind, &raw)) in signature.iter().zip(&cmd.args).enumerate() {
					match coerce(kind, raw) {
						Ok(value) => values.push(value),
						Err(source) => {
							self.emit_usage(descriptor, cmd.name);
							return Err(DispatchError::ArgumentParseError {
								command: cmd.name.to_string(),
								position,
								raw_value: raw.to_string(),
								expected_kind: kind,
								source,
							});
						}
					}
				}
				Ok(Args::new(values))
			}
		}
	}

	fn invoke(&self, descriptor: &CommandDescriptor, alias: &str, args: &Args) -> Result<(), DispatchError> {
		let Some(_guard) = DepthGuard::enter(&self.depth) else {
			return Err(DispatchError::HandlerExecution {
				command: alias.to_string(),
				cause: CommandError::NestingTooDeep(MAX_NESTING),
			});
		};

		debug!(alias, operation = descriptor.operation(), mode = ?descriptor.mode(), args = args.len(), "invoke");
		let ctx = CommandContext::new(self, descriptor, alias);
		descriptor.call(&ctx, args).map_err(|cause| {
			debug!(alias, error = %cause, "command failed");
			DispatchError::HandlerExecution {
				command: alias.to_string(),
				cause,
			}
		})
	}

	fn emit_usage(&self, descriptor: &CommandDescriptor, alias: &str) {
		if let Err(e) = writeln!(self.out, "{}", descriptor.usage(alias)) {
			debug!(error = %e, "failed to write usage line");
		}
	}
}

/// Tracks nesting depth for the duration of one invocation.
struct DepthGuard<'a>(&'a Cell<usize>);

impl<'a> DepthGuard<'a> {
	fn enter(depth: &'a Cell<usize>) -> Option<Self> {
		let current = depth.get();
		if current >= MAX_NESTING {
			return None;
		}
		depth.set(current + 1);
		Some(Self(depth))
	}
}

impl Drop for DepthGuard<'_> {
	fn drop(&mut self) {
		self.0.set(self.0.get() - 1);
	}
}

#[cfg(test)]
mod tests;
