mod batch;
mod cli;
mod config;
mod demo;
mod repl;

use std::rc::Rc;

use clap::Parser;
use cli::Cli;
use config::Config;
use demo::Demo;
use piccolo_core::{CommandRegistry, Dispatcher, Output};
use repl::{CommandCompleter, EditorSource};
use tracing::info;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = Config::load(cli.config.as_deref())?;

	// Registered handlers must outlive the dispatcher.
	let demo = Rc::new(Demo);
	let mut registry = CommandRegistry::new();
	if cli.demo {
		registry.add_handler(&demo)?;
	}
	info!(commands = registry.len(), handlers = registry.handler_count(), "registry ready");

	let dispatcher = Dispatcher::new(registry, Output::stdout());
	if cli.is_batch() {
		return batch::run(&dispatcher, cli.script.as_deref(), &cli.commands);
	}

	let completer = CommandCompleter::from_registry(dispatcher.registry());
	let mut source = EditorSource::new(completer, config.history_file.clone())?;
	let result = repl::run(&dispatcher, &config, &mut source);
	source.save_history();
	result?;
	Ok(())
}

/// Logs to stderr. `PICCOLO_LOG` takes an `EnvFilter` directive and
/// overrides `-v`.
fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("PICCOLO_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("debug")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();
}
