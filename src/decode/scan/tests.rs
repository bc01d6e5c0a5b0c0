use super::{PathKind, scan_paths};
use crate::decode::{DecodeError, DecodeOptions, SchemaPath, Value};

fn tree() -> Value {
	Value::parse(
		br#"{
			"kind": "Record",
			"Name": "root",
			"Children": [
				{"kind": "SubRecord", "Value": 1},
				{"kind": "SubRecord2", "Value": null},
				{"Value": 2}
			]
		}"#,
	)
	.expect("fixture parses")
}

#[test]
fn paths_aggregate_across_elements() {
	let paths = scan_paths(&tree(), Some("kind"), &DecodeOptions::default()).expect("scan succeeds");
	let rendered: Vec<String> = paths.keys().map(ToString::to_string).collect();
	assert_eq!(rendered, ["", "children", "children[]", "children[].value", "name"]);

	let elements = &paths[&SchemaPath::parse("children[]").expect("valid path")];
	assert_eq!(elements.count, 3);
	assert_eq!(elements.variants.iter().map(String::as_str).collect::<Vec<_>>(), ["SubRecord", "SubRecord2"]);
	assert_eq!(elements.untagged, 1);

	let values = &paths[&SchemaPath::parse("children[].value").expect("valid path")];
	assert!(values.node_kinds.contains(&PathKind::Null));
	assert!(values.node_kinds.contains(&PathKind::Scalar));
}

#[test]
fn without_discriminator_the_key_is_a_path() {
	let paths = scan_paths(&tree(), None, &DecodeOptions::default()).expect("scan succeeds");
	assert!(paths.contains_key(&SchemaPath::parse("kind").expect("valid path")));
	assert!(paths.values().all(|summary| summary.variants.is_empty()));
}

#[test]
fn depth_limit_applies() {
	let options = DecodeOptions {
		max_depth: 1,
		..DecodeOptions::default()
	};
	let err = scan_paths(&tree(), Some("kind"), &options).expect_err("children array is too deep");
	assert!(matches!(err, DecodeError::DepthExceeded { max_depth: 1, .. }), "unexpected error: {err}");
}
