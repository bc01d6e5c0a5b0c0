use super::{Candidate, OneOf, ResolveError, Resolver, SchemaPaths};
use crate::decode::{MapValue, SchemaPath, Value};

#[derive(Debug, Default)]
struct House {
	street: String,
}

#[derive(Debug, Default)]
struct Boat {
	name: String,
	berth: Option<String>,
}

crate::record! {
	House {
		street,
	}
}

crate::record! {
	Boat {
		name,
		berth,
	}
}

fn map(entries: Vec<(&str, Value)>) -> MapValue {
	entries.into_iter().collect()
}

fn by_required() -> OneOf {
	OneOf::new()
		.candidate(Candidate::of::<House>().require("street"))
		.candidate(Candidate::of::<Boat>().require("name"))
}

#[test]
fn required_properties_select_one_candidate() {
	let resolved = by_required().resolve(&map(vec![("Street", Value::from("Main"))])).expect("house matches");
	assert_eq!(resolved.kind(), "House");
}

#[test]
fn no_candidate_reports_names_and_keys() {
	let err = by_required().resolve(&map(vec![("Wheels", Value::I64(4))])).expect_err("nothing matches");
	match err {
		ResolveError::NoMatch { reason } => {
			assert!(reason.contains("House"), "reason should list candidates: {reason}");
			assert!(reason.contains("Wheels"), "reason should list keys: {reason}");
		}
		other => panic!("unexpected error: {other:?}"),
	}
}

#[test]
fn overlapping_candidates_are_ambiguous() {
	let err = by_required()
		.resolve(&map(vec![("street", Value::from("Main")), ("name", Value::from("Ark"))]))
		.expect_err("both match");
	assert_eq!(
		err,
		ResolveError::Ambiguous {
			candidates: vec!["House".to_owned(), "Boat".to_owned()],
		}
	);
}

#[test]
fn tags_must_match_string_value() {
	let resolver = OneOf::new().tagged::<House>("type").tagged::<Boat>("type");
	let boat = resolver.resolve(&map(vec![("Type", Value::from("Boat"))])).expect("tag selects boat");
	assert_eq!(boat.kind(), "Boat");
	assert!(resolver.resolve(&map(vec![("type", Value::I64(1))])).is_err(), "non-string tag never matches");
}

#[test]
fn schema_paths_register_parsed_paths() {
	let table = SchemaPaths::new().with("owners[].lives_in", by_required()).expect("valid path");
	assert_eq!(table.len(), 1);
	let path = SchemaPath::parse("owners[].lives_in").expect("valid path");
	assert!(table.get(&path).is_some());
	assert!(table.get(&SchemaPath::root()).is_none());
	assert!(SchemaPaths::new().with("owners[0]", by_required()).is_err());
}

#[test]
fn closures_act_as_resolvers() {
	let table = SchemaPaths::new()
		.with("home", |_: &MapValue| -> Result<Box<dyn crate::decode::Variant>, ResolveError> { Ok(Box::new(House::default())) })
		.expect("valid path");
	assert!(format!("{table:?}").contains("home"));
}
