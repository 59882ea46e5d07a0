use std::fmt;
use std::rc::{Rc, Weak};

use piccolo_invocation::{Args, ParamKind};

use crate::context::CommandContext;
use crate::error::{CommandError, CommandResult, RegistryError};
use crate::handler::{CommandSpec, Handler, HandlerId};

/// Type-erased operation bound to its handler.
pub(crate) type Callable = Rc<dyn Fn(&CommandContext<'_>, &Args) -> CommandResult>;

/// How arguments are matched against a command's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
	/// No parameters; any argument is an arity error.
	Niladic,
	/// One coerced value per declared parameter.
	FixedTyped,
	/// A single `Vec<String>` receiving all arguments verbatim.
	VariadicPassthrough,
}

impl InvocationMode {
	pub fn from_signature(signature: &[ParamKind]) -> Self {
		match signature {
			[] => Self::Niladic,
			[ParamKind::StrList] => Self::VariadicPassthrough,
			_ => Self::FixedTyped,
		}
	}
}

/// Registry record describing one invokable command.
///
/// Built once per manifest entry when its handler is registered and never
/// mutated afterwards.
pub struct CommandDescriptor {
	name: &'static str,
	operation: &'static str,
	aliases: Vec<&'static str>,
	description: &'static str,
	help: Vec<&'static str>,
	visible: bool,
	signature: Vec<ParamKind>,
	mode: InvocationMode,
	handler: HandlerId,
	handler_name: &'static str,
	callable: Callable,
}

impl CommandDescriptor {
	/// Validates `spec` and binds its operation to `handler`.
	///
	/// The descriptor keeps only a weak reference to the handler.
	pub(crate) fn build<H: Handler>(spec: &CommandSpec<H>, handler: &Rc<H>) -> Result<Self, RegistryError> {
		let signature = resolve_signature(spec)?;
		let handler_name = handler.name();
		let weak: Weak<H> = Rc::downgrade(handler);
		let op = spec.op;
		let callable: Callable = Rc::new(move |ctx: &CommandContext<'_>, args: &Args| {
			let handler = weak.upgrade().ok_or(CommandError::HandlerDropped(handler_name))?;
			op(&handler, ctx, args)
		});

		Ok(Self {
			name: spec.aliases.first().copied().unwrap_or(spec.operation),
			operation: spec.operation,
			aliases: spec.aliases.clone(),
			description: spec.description,
			help: spec.help.clone(),
			visible: spec.visible,
			mode: InvocationMode::from_signature(&signature),
			signature,
			handler: HandlerId::of(handler),
			handler_name,
			callable,
		})
	}

	/// Canonical name: the first alias, or the operation name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn operation(&self) -> &'static str {
		self.operation
	}

	/// Declared aliases; empty when the command is known by its operation name.
	pub fn aliases(&self) -> &[&'static str] {
		&self.aliases
	}

	/// Every key this command is indexed under.
	pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
		let bare = self.aliases.is_empty().then_some(self.operation);
		bare.into_iter().chain(self.aliases.iter().copied())
	}

	pub fn description(&self) -> &'static str {
		self.description
	}

	pub fn help(&self) -> &[&'static str] {
		&self.help
	}

	pub fn is_visible(&self) -> bool {
		self.visible
	}

	pub fn signature(&self) -> &[ParamKind] {
		&self.signature
	}

	pub fn mode(&self) -> InvocationMode {
		self.mode
	}

	pub fn handler(&self) -> HandlerId {
		self.handler
	}

	pub fn handler_name(&self) -> &'static str {
		self.handler_name
	}

	pub(crate) fn call(&self, ctx: &CommandContext<'_>, args: &Args) -> CommandResult {
		(self.callable)(ctx, args)
	}

	/// Parameter summary: `no parameters`, `arbitrary parameters`, or the
	/// comma-joined kind names.
	pub fn signature_text(&self) -> String {
		match self.mode {
			InvocationMode::Niladic => "no parameters".to_string(),
			InvocationMode::VariadicPassthrough => "arbitrary parameters".to_string(),
			InvocationMode::FixedTyped => join_kinds(&self.signature),
		}
	}

	/// Usage line for this command as invoked through `alias`.
	pub fn usage(&self, alias: &str) -> String {
		match self.mode {
			InvocationMode::Niladic => format!("command <{alias}> takes no parameters"),
			InvocationMode::VariadicPassthrough => format!("command <{alias}> takes arbitrary parameters"),
			InvocationMode::FixedTyped if self.signature.len() == 1 => {
				format!("command <{alias}> takes <{}> parameter", self.signature[0])
			}
			InvocationMode::FixedTyped => {
				format!("command <{alias}> takes <{}> parameters", join_kinds(&self.signature))
			}
		}
	}

	/// Usage line under the canonical name.
	pub fn describe_usage(&self) -> String {
		self.usage(self.name)
	}
}

impl fmt::Debug for CommandDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandDescriptor")
			.field("name", &self.name)
			.field("operation", &self.operation)
			.field("aliases", &self.aliases)
			.field("visible", &self.visible)
			.field("signature", &self.signature)
			.field("mode", &self.mode)
			.field("handler", &self.handler_name)
			.finish_non_exhaustive()
	}
}

fn join_kinds(kinds: &[ParamKind]) -> String {
	kinds.iter().map(|k| k.name()).collect::<Vec<_>>().join(", ")
}

fn resolve_signature<H>(spec: &CommandSpec<H>) -> Result<Vec<ParamKind>, RegistryError> {
	let command = spec.aliases.first().copied().unwrap_or(spec.operation);
	let mut signature = Vec::with_capacity(spec.params.len());
	for decl in &spec.params {
		let kind = decl.resolve().map_err(|_| RegistryError::UnsupportedParameterKind {
			command: command.to_string(),
			kind: decl.spelling().to_string(),
		})?;
		signature.push(kind);
	}

	// A sequence parameter only works as the sole parameter.
	if signature.len() > 1 && signature.contains(&ParamKind::StrList) {
		return Err(RegistryError::UnsupportedParameterKind {
			command: command.to_string(),
			kind: ParamKind::StrList.name().to_string(),
		});
	}
	Ok(signature)
}
