use super::*;

#[test]
fn get_returns_typed_value() {
	let args = Args::new(vec![Value::I32(5), Value::Str("x".into())]);
	assert_eq!(args.get::<i32>(0), Ok(5));
	assert_eq!(args.get::<String>(1), Ok("x".to_string()));
}

#[test]
fn get_wrong_kind_is_an_error() {
	let args = Args::new(vec![Value::I32(5)]);
	assert_eq!(
		args.get::<bool>(0),
		Err(ArgError::WrongKind {
			index: 0,
			expected: ParamKind::Bool,
			actual: ParamKind::I32,
		})
	);
}

#[test]
fn get_past_end_is_missing() {
	let args = Args::default();
	assert_eq!(args.get::<i64>(2), Err(ArgError::Missing { index: 2 }));
}

#[test]
fn rest_exposes_passthrough_words() {
	let args = Args::passthrough(["a", "b", "c"]);
	assert_eq!(args.rest(), ["a", "b", "c"]);
	assert_eq!(args.len(), 1);

	let empty = Args::passthrough(Vec::<String>::new());
	assert!(empty.rest().is_empty());
	assert_eq!(empty.len(), 1);
}

#[test]
fn rest_is_empty_for_fixed_arguments() {
	let args = Args::new(vec![Value::Str("a".into())]);
	assert!(args.rest().is_empty());
}
