use crate::descriptor::CommandDescriptor;
use crate::dispatch::Dispatcher;
use crate::error::DispatchError;
use crate::output::Output;
use crate::registry::CommandRegistry;

/// What an operation can reach while it runs.
///
/// The registry is read-only here: handlers cannot be added or removed from
/// inside a command.
pub struct CommandContext<'a> {
	dispatcher: &'a Dispatcher,
	descriptor: &'a CommandDescriptor,
	alias: &'a str,
}

impl<'a> CommandContext<'a> {
	pub(crate) fn new(dispatcher: &'a Dispatcher, descriptor: &'a CommandDescriptor, alias: &'a str) -> Self {
		Self {
			dispatcher,
			descriptor,
			alias,
		}
	}

	/// The alias the user typed.
	pub fn alias(&self) -> &'a str {
		self.alias
	}

	pub fn descriptor(&self) -> &'a CommandDescriptor {
		self.descriptor
	}

	pub fn dispatcher(&self) -> &'a Dispatcher {
		self.dispatcher
	}

	pub fn registry(&self) -> &'a CommandRegistry {
		self.dispatcher.registry()
	}

	pub fn out(&self) -> &'a Output {
		self.dispatcher.output()
	}

	/// Runs another command line through the same dispatcher.
	pub fn run(&self, line: &str) -> Result<(), DispatchError> {
		self.dispatcher.run(line)
	}

	/// Asks the driving loop to stop after this command.
	pub fn request_exit(&self) {
		self.dispatcher.request_exit();
	}
}
