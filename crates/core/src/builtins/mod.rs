//! Commands every console has, whatever handlers are registered.

use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::Instant;

use piccolo_invocation::{Args, ParamKind};
use tracing::debug;

use crate::context::CommandContext;
use crate::error::{CommandError, CommandResult};
use crate::handler::{CommandSpec, Handler};
use crate::output::Output;
use crate::script::run_script;

/// The console's own handler. Always scanned first by the registry.
pub struct Builtins;

impl Handler for Builtins {
	fn manifest() -> Vec<CommandSpec<Self>> {
		vec![
			CommandSpec::new("list", Self::list)
				.aliases(&[":list", ":l"])
				.description("lists available commands"),
			CommandSpec::new("aliases", Self::aliases)
				.aliases(&[":aliases", ":a"])
				.description("list command aliases"),
			CommandSpec::new("describe_type", Self::describe_type)
				.aliases(&[":type"])
				.description("print type information for a given command")
				.param(ParamKind::Str),
			CommandSpec::new("help", Self::help)
				.aliases(&[":help", ":h"])
				.description("print help text of a command")
				.help(&["Usage:", "  :help <command>"])
				.param(ParamKind::Str),
			CommandSpec::new("shell", Self::shell)
				.aliases(&[":shell", ":!"])
				.description("run shell command")
				.help(&["Usage:", "  :shell <program> [args...]"])
				.variadic(),
			CommandSpec::new("source", Self::source)
				.aliases(&[":source", ":s"])
				.description("run script file")
				.param(ParamKind::Str),
			CommandSpec::new("quit", Self::quit)
				.aliases(&[":quit", ":q"])
				.description("exit program"),
			CommandSpec::new("time", Self::time)
				.aliases(&[":time", ":t"])
				.description("time the execution of a command")
				.variadic(),
			CommandSpec::new("print", Self::print)
				.aliases(&[":print", ":p"])
				.description("print a text to the console")
				.variadic(),
		]
	}

	fn name(&self) -> &'static str {
		"builtins"
	}
}

impl Builtins {
	fn list(&self, ctx: &CommandContext<'_>, _args: &Args) -> CommandResult {
		let out = ctx.out();
		writeln!(out, "Available commands:")?;
		for row in ctx.registry().list(false) {
			writeln!(out, "{:<20} : {}", row.name, row.description)?;
		}
		Ok(())
	}

	fn aliases(&self, ctx: &CommandContext<'_>, _args: &Args) -> CommandResult {
		let out = ctx.out();
		writeln!(out, "Available command aliases:")?;
		for (name, others) in ctx.registry().alias_table() {
			writeln!(out, "{:<20} : {}", name, others.join(", "))?;
		}
		Ok(())
	}

	fn describe_type(&self, ctx: &CommandContext<'_>, args: &Args) -> CommandResult {
		let name: String = args.get(0)?;
		match ctx.registry().resolve(&name) {
			Some(desc) => writeln!(ctx.out(), "{name} : {}", desc.signature_text())?,
			None => writeln!(ctx.out(), "command <{name}> does not exist")?,
		}
		Ok(())
	}

	fn help(&self, ctx: &CommandContext<'_>, args: &Args) -> CommandResult {
		let name: String = args.get(0)?;
		let out = ctx.out();
		let Some(desc) = ctx.registry().resolve(&name) else {
			writeln!(out, "Unrecognized command")?;
			return Ok(());
		};

		writeln!(out, "{name} : {}", desc.description())?;
		writeln!(out)?;
		for line in desc.help() {
			writeln!(out, "{line}")?;
		}
		Ok(())
	}

	fn shell(&self, ctx: &CommandContext<'_>, args: &Args) -> CommandResult {
		let Some((program, rest)) = args.rest().split_first() else {
			return Err(CommandError::failed("no program given"));
		};
		run_program(ctx.out(), program, rest)
	}

	fn source(&self, ctx: &CommandContext<'_>, args: &Args) -> CommandResult {
		let path: String = args.get(0)?;
		run_script(ctx.dispatcher(), Path::new(&path))?;
		Ok(())
	}

	fn quit(&self, ctx: &CommandContext<'_>, _args: &Args) -> CommandResult {
		ctx.request_exit();
		Ok(())
	}

	fn time(&self, ctx: &CommandContext<'_>, args: &Args) -> CommandResult {
		let line = args.rest().join(" ");
		let start = Instant::now();
		ctx.run(&line)?;
		let elapsed = start.elapsed().as_secs_f64();
		writeln!(ctx.out(), "Completed execution in {elapsed:.6} seconds")?;
		Ok(())
	}

	fn print(&self, ctx: &CommandContext<'_>, args: &Args) -> CommandResult {
		writeln!(ctx.out(), "{}", args.rest().join(" "))?;
		Ok(())
	}
}

/// Spawns `program` directly (no shell) and copies its stdout, then its
/// stderr, to `out` line by line. Output that is not UTF-8 is decoded
/// lossily. The child is always waited on, even when copying fails.
fn run_program(out: &Output, program: &str, args: &[String]) -> CommandResult {
	let mut child = Command::new(program)
		.args(args)
		.stdin(Stdio::null())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.map_err(|e| CommandError::failed(format!("failed to run `{program}`: {e}")))?;

	let copied = copy_output(out, &mut child);
	let status = child.wait()?;
	debug!(program, %status, "process exited");
	copied?;
	Ok(())
}

fn copy_output(out: &Output, child: &mut Child) -> io::Result<()> {
	let stdout = child.stdout.take();
	let stderr = child.stderr.take();

	// Drain stderr on a scoped thread so a chatty child cannot block on a
	// full pipe while stdout is being streamed.
	let errors = std::thread::scope(|scope| -> io::Result<Vec<u8>> {
		let drain = scope.spawn(move || -> io::Result<Vec<u8>> {
			let mut buf = Vec::new();
			if let Some(mut stderr) = stderr {
				stderr.read_to_end(&mut buf)?;
			}
			Ok(buf)
		});

		let streamed = match stdout {
			Some(stdout) => copy_lines(out, BufReader::new(stdout)),
			None => Ok(()),
		};
		if streamed.is_err()
			&& let Err(error) = child.kill()
		{
			debug!(%error, "failed to kill child after output error");
		}

		let errors = drain
			.join()
			.unwrap_or_else(|_| Err(io::Error::other("stderr reader panicked")));
		streamed?;
		errors
	})?;

	copy_lines(out, errors.as_slice())
}

fn copy_lines(out: &Output, mut reader: impl BufRead) -> io::Result<()> {
	let mut buf = Vec::new();
	loop {
		buf.clear();
		if reader.read_until(b'\n', &mut buf)? == 0 {
			return Ok(());
		}
		let line = buf.strip_suffix(b"\n").unwrap_or(&buf);
		let line = line.strip_suffix(b"\r").unwrap_or(line);
		writeln!(out, "{}", String::from_utf8_lossy(line))?;
	}
}
