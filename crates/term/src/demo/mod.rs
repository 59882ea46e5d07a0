//! Sample commands registered with `--demo`.

use piccolo_core::{Args, CommandContext, CommandError, CommandResult, CommandSpec, Handler, ParamKind};

pub struct Demo;

impl Handler for Demo {
	fn manifest() -> Vec<CommandSpec<Self>> {
		vec![
			CommandSpec::new("cal", Self::cal)
				.description("performs impressive arithmetic")
				.variadic(),
			CommandSpec::new("hello", Self::hello)
				.description("prints Hello!")
				.variadic(),
			CommandSpec::new("count", Self::count)
				.description("counts from 1 to 10")
				.variadic(),
			CommandSpec::new("fail", Self::fail)
				.description("always fails")
				.variadic(),
			CommandSpec::new("add", Self::add)
				.description("adds two integers")
				.help(&["Usage:", "  add <a> <b>"])
				.param(ParamKind::I32)
				.param(ParamKind::I32),
		]
	}

	fn name(&self) -> &'static str {
		"demo"
	}
}

impl Demo {
	fn cal(&self, ctx: &CommandContext<'_>, _args: &Args) -> CommandResult {
		writeln!(ctx.out(), "3 x 5 = 15")?;
		Ok(())
	}

	fn hello(&self, ctx: &CommandContext<'_>, _args: &Args) -> CommandResult {
		writeln!(ctx.out(), "Hello!")?;
		Ok(())
	}

	fn count(&self, ctx: &CommandContext<'_>, _args: &Args) -> CommandResult {
		for i in 1..=10 {
			writeln!(ctx.out(), "{i} out of 10 ...")?;
		}
		Ok(())
	}

	fn fail(&self, ctx: &CommandContext<'_>, _args: &Args) -> CommandResult {
		let divisor = 0i32;
		let result = 1i32
			.checked_div(divisor)
			.ok_or_else(|| CommandError::failed("attempt to divide by zero"))?;
		writeln!(ctx.out(), "result = {result}")?;
		Ok(())
	}

	fn add(&self, ctx: &CommandContext<'_>, args: &Args) -> CommandResult {
		let a: i32 = args.get(0)?;
		let b: i32 = args.get(1)?;
		let sum = a
			.checked_add(b)
			.ok_or_else(|| CommandError::failed(format!("{a} + {b} overflows i32")))?;
		writeln!(ctx.out(), "{a} + {b} = {sum}")?;
		Ok(())
	}
}
