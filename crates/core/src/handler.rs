//! The contract between the registry and the objects that expose commands.
//!
//! A handler type lists its commands in an explicit manifest. The registry
//! reads the manifest once, when the handler is added, and turns each enabled
//! entry into a [`crate::CommandDescriptor`].
//!
//! ```ignore
//! struct Greeter;
//!
//! impl Handler for Greeter {
//!     fn manifest() -> Vec<CommandSpec<Self>> {
//!         vec![
//!             CommandSpec::new("greet", Greeter::greet)
//!                 .aliases(&[":greet", ":g"])
//!                 .description("greet someone")
//!                 .param(ParamKind::Str),
//!         ]
//!     }
//! }
//! ```

use std::rc::Rc;

use piccolo_invocation::{Args, ParamDecl, ParamKind};

use crate::context::CommandContext;
use crate::error::CommandResult;

/// Description shown for commands that do not declare one.
pub const DEFAULT_DESCRIPTION: &str = "n/a";

/// Function signature of a command operation.
///
/// Operations borrow their handler shared; handlers keep mutable state behind
/// `Cell`/`RefCell` so that a running command may dispatch further commands.
pub type Operation<H> = fn(&H, &CommandContext<'_>, &Args) -> CommandResult;

/// An object exposing zero or more commands.
///
/// Handlers are registered as `Rc<Self>` and the registry only keeps a weak
/// reference, so the caller decides how long a handler lives.
pub trait Handler: 'static {
	/// Builds the command table for this handler type.
	fn manifest() -> Vec<CommandSpec<Self>>
	where
		Self: Sized;

	/// Name used in diagnostics.
	fn name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}

/// Identity of a registered handler instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(usize);

impl HandlerId {
	pub fn of<H: ?Sized>(handler: &Rc<H>) -> Self {
		Self(Rc::as_ptr(handler).cast::<()>() as usize)
	}
}

/// One manifest entry: command metadata plus the operation it wraps.
pub struct CommandSpec<H> {
	pub(crate) operation: &'static str,
	pub(crate) aliases: Vec<&'static str>,
	pub(crate) description: &'static str,
	pub(crate) help: Vec<&'static str>,
	pub(crate) enabled: bool,
	pub(crate) visible: bool,
	pub(crate) params: Vec<ParamDecl>,
	pub(crate) op: Operation<H>,
}

impl<H> CommandSpec<H> {
	/// Creates an enabled, visible, niladic command named after `operation`.
	pub fn new(operation: &'static str, op: Operation<H>) -> Self {
		Self {
			operation,
			aliases: Vec::new(),
			description: DEFAULT_DESCRIPTION,
			help: Vec::new(),
			enabled: true,
			visible: true,
			params: Vec::new(),
			op,
		}
	}

	/// Aliases in declaration order; the first one becomes the canonical name.
	pub fn aliases(mut self, aliases: &[&'static str]) -> Self {
		self.aliases = aliases.to_vec();
		self
	}

	pub fn description(mut self, description: &'static str) -> Self {
		self.description = description;
		self
	}

	/// Free-text lines printed by `:help` after the description.
	pub fn help(mut self, lines: &[&'static str]) -> Self {
		self.help = lines.to_vec();
		self
	}

	pub fn param(mut self, decl: impl Into<ParamDecl>) -> Self {
		self.params.push(decl.into());
		self
	}

	/// Declares a single pass-through parameter receiving every argument.
	pub fn variadic(self) -> Self {
		self.param(ParamKind::StrList)
	}

	pub fn enabled(mut self, enabled: bool) -> Self {
		self.enabled = enabled;
		self
	}

	pub fn visible(mut self, visible: bool) -> Self {
		self.visible = visible;
		self
	}

	pub fn operation(&self) -> &'static str {
		self.operation
	}
}
