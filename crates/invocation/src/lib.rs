//! Invocation primitives shared by the registry and the dispatcher.
//!
//! A console line goes through three steps before it reaches an operation:
//!
//! 1. [`CommandLine::parse`] splits it into a command name and raw arguments.
//! 2. Each raw argument is converted by [`coerce`] into a [`Value`] of the
//!    [`ParamKind`] declared at that position.
//! 3. The values are wrapped in [`Args`] and handed to the operation, which
//!    reads them back with typed accessors.
//!
//! The parameter-kind set is closed. Handlers declare parameters through
//! [`ParamDecl`], which is resolved against that set once, at registration.

mod coerce;
mod kind;
mod line;
mod value;

pub use coerce::{CoerceError, CoerceFn, coerce};
pub use kind::{ParamDecl, ParamKind, UnknownParamKind};
pub use line::{COMMENT_MARKER, CommandLine};
pub use value::{ArgError, Args, FromValue, Value};
