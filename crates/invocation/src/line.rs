/// Lines whose first field starts with this marker are ignored.
pub const COMMENT_MARKER: char = '#';

/// A console line split into a command name and its raw arguments.
///
/// Fields are separated by single ASCII spaces. There is no quoting or
/// escaping: a space inside an argument always splits it. Empty fields left
/// by repeated spaces are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
	pub name: &'a str,
	pub args: Vec<&'a str>,
}

impl<'a> CommandLine<'a> {
	/// Splits `line`, returning `None` for blank lines and comments.
	pub fn parse(line: &'a str) -> Option<Self> {
		let mut fields = line.split(' ').filter(|f| !f.is_empty());
		let name = fields.next()?;
		if name.starts_with(COMMENT_MARKER) {
			return None;
		}
		Some(Self {
			name,
			args: fields.collect(),
		})
	}
}
