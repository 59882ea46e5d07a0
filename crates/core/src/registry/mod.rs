//! Alias index over the commands exposed by registered handlers.
//!
//! # Role
//!
//! The registry tracks the registered handler set and derives two things from it: the
//! list of descriptors and the alias index. Both are derived state. Any
//! change to the handler set clears them and rebuilds them from the cached
//! manifests, so registering the same handler twice can never leave
//! duplicate or stale entries behind.
//!
//! # Invariants
//!
//! - Every index key is the operation name of a command without aliases, or
//!   one of its declared aliases.
//! - Disabled commands never enter the index.
//! - On key collisions the later binding wins. The built-in handler is
//!   scanned first, then handlers in registration order.

use std::any::Any;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, warn};

use crate::builtins::Builtins;
use crate::descriptor::CommandDescriptor;
use crate::error::{RegistrationError, RegistryError};
use crate::handler::{Handler, HandlerId};

/// One row of a command listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandListing<'a> {
	pub name: &'static str,
	pub aliases: &'a [&'static str],
	pub description: &'static str,
}

/// A handler's cached manifest.
struct HandlerSlot {
	name: &'static str,
	/// Non-owning. Also pins the allocation, so the slot's [`HandlerId`]
	/// cannot be reused by another handler while the slot exists.
	handler: Weak<dyn Any>,
	descriptors: Vec<Rc<CommandDescriptor>>,
}

impl HandlerSlot {
	fn build<H: Handler>(handler: &Rc<H>) -> (Self, Vec<RegistryError>) {
		let name = handler.name();
		let mut descriptors: Vec<Rc<CommandDescriptor>> = Vec::new();
		let mut errors = Vec::new();
		let mut disabled = 0usize;

		for spec in H::manifest() {
			if !spec.enabled {
				disabled += 1;
				continue;
			}
			match CommandDescriptor::build(&spec, handler) {
				Ok(desc) => {
					if let Some(pos) = descriptors.iter().position(|d| d.operation() == desc.operation()) {
						warn!(handler = name, operation = desc.operation(), "operation declared twice; keeping the last");
						descriptors.remove(pos);
					}
					descriptors.push(Rc::new(desc));
				}
				Err(e) => errors.push(e),
			}
		}

		debug!(handler = name, commands = descriptors.len(), disabled, rejected = errors.len(), "built manifest");
		let weak: Weak<H> = Rc::downgrade(handler);
		let slot = Self {
			name,
			handler: weak,
			descriptors,
		};
		(slot, errors)
	}

	fn is_alive(&self) -> bool {
		self.handler.strong_count() > 0
	}
}

/// Registry of commands, indexed by alias.
///
/// Handlers are not owned: whoever registers a handler keeps it alive. A
/// command whose handler has been dropped stays indexed and fails when
/// invoked, until [`CommandRegistry::remove_dropped`] or
/// [`CommandRegistry::remove_handler`] takes it out.
pub struct CommandRegistry {
	/// The built-in handler is the one handler the registry owns.
	_builtins_handler: Rc<Builtins>,
	builtins: HandlerSlot,
	handlers: IndexMap<HandlerId, HandlerSlot>,
	descriptors: Vec<Rc<CommandDescriptor>>,
	index: HashMap<&'static str, usize>,
}

impl CommandRegistry {
	/// Creates a registry holding only the built-in commands.
	pub fn new() -> Self {
		let handler = Rc::new(Builtins);
		let (builtins, errors) = HandlerSlot::build(&handler);
		debug_assert!(errors.is_empty(), "built-in manifest rejected: {errors:?}");

		let mut registry = Self {
			_builtins_handler: handler,
			builtins,
			handlers: IndexMap::new(),
			descriptors: Vec::new(),
			index: HashMap::default(),
		};
		registry.rescan();
		registry
	}

	/// Adds `handler` and rebuilds the index.
	///
	/// Adding an instance that is already registered changes nothing. When
	/// some commands declare unsupported parameter kinds, the handler is
	/// still registered with its other commands and the rejections are
	/// returned as an error.
	pub fn add_handler<H: Handler>(&mut self, handler: &Rc<H>) -> Result<HandlerId, RegistrationError> {
		let id = HandlerId::of(handler);
		let mut errors = Vec::new();

		if self.handlers.contains_key(&id) {
			debug!(handler = handler.name(), "handler already registered");
		} else {
			let (slot, rejected) = HandlerSlot::build(handler);
			for e in &rejected {
				warn!(handler = slot.name, error = %e, "command rejected");
			}
			errors = rejected;
			self.handlers.insert(id, slot);
		}
		self.rescan();

		if errors.is_empty() {
			Ok(id)
		} else {
			Err(RegistrationError {
				id,
				handler: handler.name(),
				errors,
			})
		}
	}

	/// Removes a handler and rebuilds the index.
	///
	/// Returns false if `id` was not registered.
	pub fn remove_handler(&mut self, id: HandlerId) -> bool {
		let Some(slot) = self.handlers.shift_remove(&id) else {
			return false;
		};
		debug!(handler = slot.name, "handler removed");
		self.rescan();
		true
	}

	/// Removes every handler that has been dropped by its owner.
	///
	/// Returns how many were removed.
	pub fn remove_dropped(&mut self) -> usize {
		let before = self.handlers.len();
		self.handlers.retain(|_, slot| {
			let alive = slot.is_alive();
			if !alive {
				debug!(handler = slot.name, "dropped handler removed");
			}
			alive
		});
		let removed = before - self.handlers.len();
		if removed > 0 {
			self.rescan();
		}
		removed
	}

	pub fn contains(&self, id: HandlerId) -> bool {
		self.handlers.contains_key(&id)
	}

	/// Number of registered handlers, not counting the built-ins.
	pub fn handler_count(&self) -> usize {
		self.handlers.len()
	}

	/// Clears and rebuilds the descriptor list and the alias index.
	fn rescan(&mut self) {
		self.descriptors.clear();
		self.index.clear();

		let slots = std::iter::once(&self.builtins).chain(self.handlers.values());
		for slot in slots {
			for desc in &slot.descriptors {
				let dense = self.descriptors.len();
				for key in desc.keys() {
					if let Some(prev) = self.index.insert(key, dense) {
						debug!(
							key,
							previous = self.descriptors[prev].operation(),
							replacement = desc.operation(),
							"alias rebound"
						);
					}
				}
				self.descriptors.push(desc.clone());
			}
		}

		debug!(commands = self.descriptors.len(), keys = self.index.len(), "registry rescanned");
	}

	/// Looks up a command by any of its keys.
	pub fn resolve(&self, alias: &str) -> Option<&CommandDescriptor> {
		self.index.get(alias).map(|&i| self.descriptors[i].as_ref())
	}

	/// Every indexed descriptor, in scan order.
	pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
		self.descriptors.iter().map(AsRef::as_ref)
	}

	/// Number of indexed descriptors.
	pub fn len(&self) -> usize {
		self.descriptors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.descriptors.is_empty()
	}

	/// Commands sorted by canonical name.
	///
	/// A command whose canonical name has been rebound to another command is
	/// left out, so each name appears once.
	pub fn list(&self, include_invisible: bool) -> Vec<CommandListing<'_>> {
		let mut rows: Vec<_> = self
			.descriptors
			.iter()
			.enumerate()
			.filter(|(i, d)| self.index.get(d.name()) == Some(i))
			.filter(|(_, d)| include_invisible || d.is_visible())
			.map(|(_, d)| CommandListing {
				name: d.name(),
				aliases: d.aliases(),
				description: d.description(),
			})
			.collect();
		rows.sort_by(|a, b| a.name.cmp(b.name));
		rows
	}

	/// Visible commands with more than one alias, with the aliases after the
	/// canonical name.
	pub fn alias_table(&self) -> Vec<(&'static str, &[&'static str])> {
		self.list(false)
			.into_iter()
			.filter(|row| row.aliases.len() > 1)
			.map(|row| (row.name, &row.aliases[1..]))
			.collect()
	}
}

impl Default for CommandRegistry {
	fn default() -> Self {
		Self::new()
	}
}
