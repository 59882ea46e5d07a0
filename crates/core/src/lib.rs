//! Command registry and dispatcher for the piccolo console.
//!
//! Handlers expose commands through an explicit manifest
//! ([`Handler::manifest`]). The [`CommandRegistry`] indexes those commands by
//! alias, and the [`Dispatcher`] turns a line of text into a call:
//!
//! ```ignore
//! let handler = Rc::new(MyHandler::default());
//! let mut registry = CommandRegistry::new();
//! registry.add_handler(&handler)?;
//! let dispatcher = Dispatcher::new(registry, Output::stdout());
//! dispatcher.run(":help :list")?;
//! ```
//!
//! Interactive loops, script runners and other drivers only feed lines into
//! [`Dispatcher::run`] and report the errors it returns.

mod builtins;
mod context;
mod descriptor;
mod dispatch;
mod error;
mod handler;
mod output;
mod registry;
mod script;
#[cfg(test)]
mod test_fixtures;

pub use builtins::Builtins;
pub use context::CommandContext;
pub use descriptor::{CommandDescriptor, InvocationMode};
pub use dispatch::{Dispatcher, MAX_NESTING};
pub use error::{CommandError, CommandResult, DispatchError, RegistrationError, RegistryError};
pub use handler::{CommandSpec, DEFAULT_DESCRIPTION, Handler, HandlerId, Operation};
pub use output::{Capture, Output};
pub use piccolo_invocation::{Args, ParamDecl, ParamKind, Value};
pub use registry::{CommandListing, CommandRegistry};
pub use script::{ScriptError, ScriptOutcome, run_script};
