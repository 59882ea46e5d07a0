use std::num::IntErrorKind;
use std::str::FromStr;

use crate::{ParamKind, Value};

/// Converts one raw argument into a value of a fixed kind.
pub type CoerceFn = fn(&str) -> Result<Value, CoerceError>;

/// Failure converting a raw argument into its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoerceError {
	#[error("expected `true` or `false`, got {raw:?}")]
	InvalidBool { raw: String },
	#[error("{raw:?} is not a valid {kind}")]
	InvalidInt { kind: ParamKind, raw: String },
	#[error("{raw:?} is out of range for {kind}")]
	OutOfRange { kind: ParamKind, raw: String },
	#[error("{raw:?} is not a valid {kind}")]
	InvalidFloat { kind: ParamKind, raw: String },
	#[error("{kind} arguments are not coerced individually")]
	NotCoercible { kind: ParamKind },
}

impl ParamKind {
	/// Coercion function for scalar kinds; `None` for [`ParamKind::StrList`].
	pub fn coercer(self) -> Option<CoerceFn> {
		let f: CoerceFn = match self {
			Self::Bool => coerce_bool,
			Self::I8 => |raw: &str| coerce_int::<i8>(ParamKind::I8, raw).map(Value::I8),
			Self::I16 => |raw: &str| coerce_int::<i16>(ParamKind::I16, raw).map(Value::I16),
			Self::I32 => |raw: &str| coerce_int::<i32>(ParamKind::I32, raw).map(Value::I32),
			Self::I64 => |raw: &str| coerce_int::<i64>(ParamKind::I64, raw).map(Value::I64),
			Self::F32 => |raw: &str| coerce_float::<f32>(ParamKind::F32, raw).map(Value::F32),
			Self::F64 => |raw: &str| coerce_float::<f64>(ParamKind::F64, raw).map(Value::F64),
			Self::Str => |raw: &str| Ok(Value::Str(raw.to_string())),
			Self::StrList => return None,
		};
		Some(f)
	}
}

/// Coerces `raw` into a value of `kind`.
pub fn coerce(kind: ParamKind, raw: &str) -> Result<Value, CoerceError> {
	let f = kind.coercer().ok_or(CoerceError::NotCoercible { kind })?;
	f(raw)
}

fn coerce_bool(raw: &str) -> Result<Value, CoerceError> {
	if raw.eq_ignore_ascii_case("true") {
		Ok(Value::Bool(true))
	} else if raw.eq_ignore_ascii_case("false") {
		Ok(Value::Bool(false))
	} else {
		Err(CoerceError::InvalidBool { raw: raw.to_string() })
	}
}

fn coerce_int<T>(kind: ParamKind, raw: &str) -> Result<T, CoerceError>
where
	T: FromStr<Err = std::num::ParseIntError>,
{
	raw.parse::<T>().map_err(|e| match e.kind() {
		IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CoerceError::OutOfRange {
			kind,
			raw: raw.to_string(),
		},
		_ => CoerceError::InvalidInt {
			kind,
			raw: raw.to_string(),
		},
	})
}

fn coerce_float<T>(kind: ParamKind, raw: &str) -> Result<T, CoerceError>
where
	T: FromStr<Err = std::num::ParseFloatError>,
{
	raw.parse::<T>().map_err(|_| CoerceError::InvalidFloat {
		kind,
		raw: raw.to_string(),
	})
}
