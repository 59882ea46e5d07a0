//! Console configuration loaded from a TOML file.
//!
//! Every key is optional. A missing file is the same as an empty one.
//!
//! ```toml
//! prompt = "piccolo> "
//! banner = "welcome\n"
//! history_file = "/home/me/.local/state/piccolo/history"
//! separator = false
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Banner printed when the interactive loop starts.
pub const DEFAULT_BANNER: &str = include_str!("banner.txt");

/// Prompt shown before each line.
pub const DEFAULT_PROMPT: &str = ">> ";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading the configuration file.
	#[error("I/O error reading {}: {error}", path.display())]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: io::Error,
	},

	/// The file is not valid TOML or has unexpected keys.
	#[error("invalid config {}: {source}", path.display())]
	Parse {
		path: PathBuf,
		source: toml::de::Error,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub prompt: String,
	pub banner: String,
	/// Line editor history; no history is kept when unset.
	pub history_file: Option<PathBuf>,
	/// Print a blank line after each command.
	pub separator: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			prompt: DEFAULT_PROMPT.to_string(),
			banner: DEFAULT_BANNER.to_string(),
			history_file: None,
			separator: true,
		}
	}
}

impl Config {
	/// `<config dir>/piccolo/config.toml`, if the platform has a config dir.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("piccolo").join("config.toml"))
	}

	/// Loads `path`, or the default location when `path` is `None`.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let path = match path {
			Some(path) => path.to_path_buf(),
			None => match Self::default_path() {
				Some(path) => path,
				None => return Ok(Self::default()),
			},
		};

		let text = match std::fs::read_to_string(&path) {
			Ok(text) => text,
			Err(error) if error.kind() == io::ErrorKind::NotFound => {
				debug!(path = %path.display(), "no config file; using defaults");
				return Ok(Self::default());
			}
			Err(error) => return Err(ConfigError::Io { path, error }),
		};

		let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
			path: path.clone(),
			source,
		})?;
		debug!(path = %path.display(), "loaded config");
		Ok(config)
	}

	pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
		toml::from_str(text)
	}
}
