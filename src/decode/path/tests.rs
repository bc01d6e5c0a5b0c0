use super::{PathStep, SchemaPath};

#[test]
fn nested_element_path_parses() {
	let path = SchemaPath::parse("owners[].lives_in").expect("path parses");
	assert_eq!(
		path.steps,
		vec![
			PathStep::Field("owners".to_owned()),
			PathStep::Element,
			PathStep::Field("lives_in".to_owned()),
		]
	);
	assert_eq!(path.to_string(), "owners[].lives_in");
}

#[test]
fn empty_input_is_root() {
	let path = SchemaPath::parse("").expect("root parses");
	assert!(path.is_root());
	assert_eq!(path.label(), "<root>");
}

#[test]
fn leading_element_marker_is_accepted() {
	let path = SchemaPath::parse("[].pets[][]").expect("path parses");
	assert_eq!(
		path.steps,
		vec![
			PathStep::Element,
			PathStep::Field("pets".to_owned()),
			PathStep::Element,
			PathStep::Element,
		]
	);
	assert_eq!(path.to_string(), "[].pets[][]");
}

#[test]
fn field_names_are_normalized_to_snake_case() {
	let path = SchemaPath::parse("owners[].livesIn").expect("path parses");
	assert_eq!(path, SchemaPath::parse("owners[].lives_in").expect("path parses"));
	assert_eq!(path.to_string(), "owners[].lives_in");
}

#[test]
fn malformed_paths_are_rejected() {
	for input in ["owners.", ".owners", "owners[0]", "owners[", "a..b", "a.[]", "a-b"] {
		assert!(SchemaPath::parse(input).is_err(), "{input} should be rejected");
	}
}

#[test]
fn push_and_pop_track_position() {
	let mut path = SchemaPath::root();
	path.push_field("owners");
	path.push_element();
	path.push_field("pets");
	assert_eq!(path, SchemaPath::parse("owners[].pets").expect("path parses"));
	path.pop();
	path.pop();
	assert_eq!(path.to_string(), "owners");
}
