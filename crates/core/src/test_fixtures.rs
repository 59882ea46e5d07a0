use std::cell::RefCell;
use std::rc::Rc;

use piccolo_invocation::{Args, ParamKind, Value};

use crate::{Capture, CommandContext, CommandError, CommandRegistry, CommandResult, CommandSpec, Dispatcher, Handler, Output};

/// Handler recording every call it receives.
#[derive(Default)]
pub(crate) struct Recorder {
	pub calls: RefCell<Vec<(&'static str, Vec<Value>)>>,
}

impl Recorder {
	fn record(&self, ctx: &CommandContext<'_>, args: &Args) -> CommandResult {
		self.calls.borrow_mut().push((ctx.descriptor().operation(), args.values().to_vec()));
		Ok(())
	}

	fn boom(&self, _ctx: &CommandContext<'_>, _args: &Args) -> CommandResult {
		Err(CommandError::failed("boom"))
	}

	pub fn recorded(&self) -> Vec<(&'static str, Vec<Value>)> {
		self.calls.borrow().clone()
	}
}

impl Handler for Recorder {
	fn manifest() -> Vec<CommandSpec<Self>> {
		vec![
			CommandSpec::new("op1", Self::record)
				.aliases(&[":a", ":b"])
				.description("takes an int")
				.param(ParamKind::I32),
			CommandSpec::new("op2", Self::record),
			CommandSpec::new("cmd", Self::record).variadic(),
			CommandSpec::new("mixed", Self::record)
				.param(ParamKind::Bool)
				.param(ParamKind::F64)
				.param("String"),
			CommandSpec::new("hidden", Self::record).visible(false),
			CommandSpec::new("off", Self::record).enabled(false),
			CommandSpec::new("boom", Self::boom),
		]
	}

	fn name(&self) -> &'static str {
		"recorder"
	}
}

pub(crate) fn dispatcher_with<H: Handler>(handler: &Rc<H>) -> (Dispatcher, Capture) {
	let mut registry = CommandRegistry::new();
	registry.add_handler(handler).expect("fixture handler registers cleanly");
	let (out, capture) = Output::capture();
	(Dispatcher::new(registry, out), capture)
}
