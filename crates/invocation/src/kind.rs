use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The closed set of parameter kinds an operation may declare.
///
/// Display names are the Rust type names and appear verbatim in usage text.
/// The other spellings are accepted when a manifest names a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum ParamKind {
	#[strum(to_string = "bool", serialize = "boolean")]
	Bool,
	#[strum(to_string = "i8", serialize = "byte")]
	I8,
	#[strum(to_string = "i16", serialize = "short")]
	I16,
	#[strum(to_string = "i32", serialize = "int", serialize = "integer")]
	I32,
	#[strum(to_string = "i64", serialize = "long")]
	I64,
	#[strum(to_string = "f32", serialize = "float")]
	F32,
	#[strum(to_string = "f64", serialize = "double")]
	F64,
	#[strum(to_string = "String", serialize = "str")]
	Str,
	/// Consumed whole by variadic pass-through commands, never per element.
	#[strum(to_string = "Vec<String>", serialize = "string[]", serialize = "[String]")]
	StrList,
}

impl ParamKind {
	/// Type name used in usage text and diagnostics.
	pub fn name(self) -> &'static str {
		self.into()
	}

	/// Every supported kind, in declaration order.
	pub fn all() -> impl Iterator<Item = ParamKind> {
		<Self as strum::IntoEnumIterator>::iter()
	}

	/// Returns true for kinds that are coerced one argument at a time.
	pub const fn is_scalar(self) -> bool {
		!matches!(self, Self::StrList)
	}
}

/// Error for a textual parameter kind outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parameter kind `{0}`")]
pub struct UnknownParamKind(pub String);

/// A parameter as declared by a handler manifest.
///
/// Declarations by name are resolved when the handler is registered, so a
/// typo in a manifest rejects the command up front instead of failing later
/// at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDecl {
	Kind(ParamKind),
	Named(&'static str),
}

impl ParamDecl {
	/// Resolves the declaration against the closed kind set.
	pub fn resolve(self) -> Result<ParamKind, UnknownParamKind> {
		match self {
			Self::Kind(kind) => Ok(kind),
			Self::Named(name) => ParamKind::from_str(name.trim()).map_err(|_| UnknownParamKind(name.to_string())),
		}
	}

	/// The declared spelling, for diagnostics.
	pub fn spelling(self) -> &'static str {
		match self {
			Self::Kind(kind) => kind.name(),
			Self::Named(name) => name,
		}
	}
}

impl From<ParamKind> for ParamDecl {
	fn from(kind: ParamKind) -> Self {
		Self::Kind(kind)
	}
}

impl From<&'static str> for ParamDecl {
	fn from(name: &'static str) -> Self {
		Self::Named(name)
	}
}
