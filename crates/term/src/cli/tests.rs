use clap::CommandFactory;

use super::*;

#[test]
fn no_arguments_is_interactive() {
	let cli = Cli::try_parse_from(["piccolo"]).unwrap();
	assert!(!cli.is_batch());
	assert!(!cli.demo);
	assert!(!cli.verbose);
	assert_eq!(cli.config, None);
}

#[test]
fn commands_are_repeatable_and_keep_order() {
	let cli = Cli::try_parse_from(["piccolo", "-c", ":print a", "--command", ":quit"]).unwrap();
	assert_eq!(cli.commands, [":print a", ":quit"]);
	assert!(cli.is_batch());
}

#[test]
fn script_alone_is_batch() {
	let cli = Cli::try_parse_from(["piccolo", "--script", "setup.pic", "--demo", "-v"]).unwrap();
	assert_eq!(cli.script, Some(PathBuf::from("setup.pic")));
	assert!(cli.demo);
	assert!(cli.verbose);
	assert!(cli.is_batch());
}

#[test]
fn config_path_is_taken_verbatim() {
	let cli = Cli::try_parse_from(["piccolo", "--config", "/tmp/p.toml"]).unwrap();
	assert_eq!(cli.config, Some(PathBuf::from("/tmp/p.toml")));
}

#[test]
fn unknown_flag_is_rejected() {
	assert!(Cli::try_parse_from(["piccolo", "--nope"]).is_err());
}

#[test]
fn schema_is_consistent() {
	Cli::command().debug_assert();
}
