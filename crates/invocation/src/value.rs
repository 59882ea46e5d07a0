use crate::ParamKind;

/// A coerced argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Bool(bool),
	I8(i8),
	I16(i16),
	I32(i32),
	I64(i64),
	F32(f32),
	F64(f64),
	Str(String),
	StrList(Vec<String>),
}

impl Value {
	pub fn kind(&self) -> ParamKind {
		match self {
			Self::Bool(_) => ParamKind::Bool,
			Self::I8(_) => ParamKind::I8,
			Self::I16(_) => ParamKind::I16,
			Self::I32(_) => ParamKind::I32,
			Self::I64(_) => ParamKind::I64,
			Self::F32(_) => ParamKind::F32,
			Self::F64(_) => ParamKind::F64,
			Self::Str(_) => ParamKind::Str,
			Self::StrList(_) => ParamKind::StrList,
		}
	}
}

/// Conversion from a [`Value`] back into a Rust type.
pub trait FromValue: Sized {
	const KIND: ParamKind;

	fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! from_value {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl FromValue for $ty {
				const KIND: ParamKind = ParamKind::$variant;

				fn from_value(value: &Value) -> Option<Self> {
					match value {
						Value::$variant(v) => Some(v.clone()),
						_ => None,
					}
				}
			}
		)*
	};
}

from_value! {
	bool => Bool,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	f32 => F32,
	f64 => F64,
	String => Str,
	Vec<String> => StrList,
}

/// Error reading a positional argument with the wrong type or index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgError {
	#[error("argument {index} is missing")]
	Missing { index: usize },
	#[error("argument {index} is {actual}, not {expected}")]
	WrongKind {
		index: usize,
		expected: ParamKind,
		actual: ParamKind,
	},
}

/// Positional values handed to an operation.
///
/// Fixed-typed commands receive one value per declared parameter. Variadic
/// pass-through commands receive a single [`Value::StrList`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
	values: Vec<Value>,
}

impl Args {
	pub fn new(values: Vec<Value>) -> Self {
		Self { values }
	}

	/// Wraps raw words for a pass-through command.
	pub fn passthrough<S: Into<String>>(words: impl IntoIterator<Item = S>) -> Self {
		Self::new(vec![Value::StrList(words.into_iter().map(Into::into).collect())])
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn values(&self) -> &[Value] {
		&self.values
	}

	/// Reads argument `index` as `T`.
	pub fn get<T: FromValue>(&self, index: usize) -> Result<T, ArgError> {
		let value = self.values.get(index).ok_or(ArgError::Missing { index })?;
		T::from_value(value).ok_or(ArgError::WrongKind {
			index,
			expected: T::KIND,
			actual: value.kind(),
		})
	}

	/// The pass-through words, or an empty slice for any other shape.
	pub fn rest(&self) -> &[String] {
		match self.values.as_slice() {
			[Value::StrList(words)] => words,
			_ => &[],
		}
	}
}

#[cfg(test)]
mod tests;
