#![allow(missing_docs)]

use polydecode::decode::{Candidate, DecodeError, OneOf, SchemaPaths, Value, Variant, decode_bytes_into, decode_into};
use polydecode_testkit::fixture_bytes;

#[derive(Debug, Default, PartialEq)]
struct Envelope {
	owners: Vec<PetOwner>,
}

#[derive(Debug, Default, PartialEq)]
struct PetOwner {
	name: String,
	lives_in: Option<Box<dyn Variant>>,
	owns: Vec<Box<dyn Variant>>,
	pets: Vec<Box<dyn Variant>>,
}

#[derive(Debug, Default, PartialEq)]
struct House {
	rooms: Option<u32>,
}

#[derive(Debug, Default, PartialEq)]
struct Palace {
	rooms: Option<u32>,
	towers: Option<u32>,
}

#[derive(Debug, Default, PartialEq)]
struct Dog {
	name: String,
	breed: String,
	age: Option<u8>,
	lost: bool,
}

#[derive(Debug, Default, PartialEq)]
struct Cat {
	name: String,
	lives: u8,
}

polydecode::record! { Envelope { owners } }
polydecode::record! { PetOwner { name, lives_in, owns, pets } }
polydecode::record! { House { rooms } }
polydecode::record! { Palace { rooms, towers } }
polydecode::record! { Dog { name, breed, age, lost } }
polydecode::record! { Cat { name, lives } }

fn dwellings() -> OneOf {
	OneOf::new().tagged::<House>("type").tagged::<Palace>("type")
}

fn pets() -> OneOf {
	OneOf::new()
		.candidate(Candidate::of::<Dog>().require("breed"))
		.candidate(Candidate::of::<Cat>().require("lives"))
}

fn owner_paths() -> SchemaPaths {
	SchemaPaths::new()
		.with("lives_in", dwellings())
		.and_then(|paths| paths.with("owns[]", dwellings()))
		.and_then(|paths| paths.with("pets[]", pets()))
		.expect("owner schema paths are valid")
}

fn envelope_paths() -> SchemaPaths {
	SchemaPaths::new()
		.with("owners[].lives_in", dwellings())
		.and_then(|paths| paths.with("owners[].owns[]", dwellings()))
		.and_then(|paths| paths.with("owners[].pets[]", pets()))
		.expect("envelope schema paths are valid")
}

fn owner(json: &str) -> Result<PetOwner, DecodeError> {
	let mut target = PetOwner::default();
	decode_bytes_into(json.as_bytes(), &mut target, Some(&owner_paths()))?;
	Ok(target)
}

#[test]
fn pets_fixture_resolves_every_oneof_field() {
	let mut envelope = Envelope::default();
	decode_bytes_into(&fixture_bytes("pets1.json"), &mut envelope, Some(&envelope_paths())).expect("pets1 decodes");
	assert_eq!(envelope.owners.len(), 2);

	let john = &envelope.owners[0];
	assert_eq!(john.name, "john");
	assert_eq!(
		john.lives_in.as_deref().and_then(|home| home.downcast_ref::<House>()),
		Some(&House { rooms: Some(4) })
	);
	let owned: Vec<&str> = john.owns.iter().map(|item| item.kind()).collect();
	assert_eq!(owned, ["House", "Palace"]);
	assert_eq!(
		john.pets[0].downcast_ref::<Dog>(),
		Some(&Dog {
			name: "spot".to_owned(),
			breed: "beagle".to_owned(),
			age: Some(7),
			lost: false,
		})
	);
	assert!(john.pets[1].is::<Cat>());

	let mary = &envelope.owners[1];
	assert!(mary.lives_in.as_deref().is_some_and(|home| home.is::<Palace>()));
	assert!(mary.owns.is_empty());
	assert!(mary.pets[0].downcast_ref::<Dog>().is_some_and(|dog| dog.lost));
}

#[test]
fn sequence_of_tagged_objects_decodes() {
	let decoded = owner(r#"{ "name": "john", "owns": [{ "type": "Palace"}, {"type": "House"}]}"#).expect("owns decodes");
	let kinds: Vec<&str> = decoded.owns.iter().map(|item| item.kind()).collect();
	assert_eq!(kinds, ["Palace", "House"]);
}

#[test]
fn untagged_sequence_element_has_no_matching_schema() {
	let err = owner(r#"{ "name": "john", "owns": [{ "class": "Palace"}, {"class": 12}]}"#).expect_err("no type tag");
	match err {
		DecodeError::NoMatchingSchema { path, .. } => assert_eq!(path, "owns[]"),
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn bad_property_type_inside_selected_shape_fails() {
	let err = owner(r#"{ "name": "john", "owns": [{ "type": "House", "rooms": "string"}]}"#).expect_err("rooms is a string");
	match err {
		DecodeError::TypeMismatch { path, .. } => assert_eq!(path, "owns[].rooms"),
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn wrong_tag_property_or_value_fails() {
	let err = owner(r#"{ "name": "john", "livesIn": { "class": "Palace"}}"#).expect_err("class is not the tag");
	assert!(matches!(err, DecodeError::NoMatchingSchema { .. }), "unexpected error: {err}");
	let err = owner(r#"{ "name": "john", "livesIn": {"type": "car"} }"#).expect_err("car is not a dwelling");
	assert!(matches!(err, DecodeError::NoMatchingSchema { .. }), "unexpected error: {err}");
}

#[test]
fn sequence_in_place_of_oneof_object_fails() {
	let err = owner(r#"{ "name": "john", "livesIn": [] }"#).expect_err("array is not an object");
	assert!(matches!(err, DecodeError::TypeMismatch { .. }), "unexpected error: {err}");
}

#[test]
fn ambiguous_candidates_are_reported() {
	let err = owner(r#"{ "name": "john", "pets": [{ "name": "odd", "breed": "x", "lives": 2 }] }"#).expect_err("both dog and cat match");
	match err {
		DecodeError::AmbiguousSchema { path, candidates } => {
			assert_eq!(path, "pets[]");
			assert_eq!(candidates, ["Dog", "Cat"]);
		}
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn polymorphic_field_without_table_entry_fails() {
	let mut target = PetOwner::default();
	let tree = Value::parse(br#"{ "livesIn": { "type": "House" } }"#).expect("json parses");
	let err = decode_into(&tree, &mut target, None).expect_err("no schema table");
	assert!(matches!(err, DecodeError::NoMatchingSchema { .. }), "unexpected error: {err}");
}

#[test]
fn container_where_scalar_expected_fails() {
	let err = owner(r#"{ "name": [{ "kind": "sub_record", "name": "1" }] }"#).expect_err("name is an array");
	assert!(matches!(err, DecodeError::TypeMismatch { .. }), "unexpected error: {err}");
	let err = owner(r#"{ "name": { "type": "Palace"}}"#).expect_err("name is an object");
	assert!(matches!(err, DecodeError::TypeMismatch { .. }), "unexpected error: {err}");
}

#[test]
fn truncated_json_is_a_parse_error() {
	let err = owner(r#"{ "name": "#).expect_err("truncated");
	assert!(matches!(err, DecodeError::Parse(_)), "unexpected error: {err}");
}

#[test]
fn non_object_root_is_an_invalid_target() {
	let mut target = PetOwner::default();
	let err = decode_bytes_into(b"[1, 2]", &mut target, None).expect_err("array root");
	match err {
		DecodeError::InvalidTarget { target, .. } => assert_eq!(target, "PetOwner"),
		other => panic!("unexpected error: {other}"),
	}
	let err = decode_bytes_into(b"\"john\"", &mut target, None).expect_err("string root");
	assert!(matches!(err, DecodeError::InvalidTarget { .. }), "unexpected error: {err}");
}

#[test]
fn schema_paths_accept_document_key_spelling() {
	let paths = SchemaPaths::new()
		.with("livesIn", dwellings())
		.expect("camelCase path is valid");
	let mut target = PetOwner::default();
	let tree = Value::parse(br#"{ "livesIn": { "type": "House" } }"#).expect("json parses");
	decode_into(&tree, &mut target, Some(&paths)).expect("camelCase registration resolves");
	assert!(target.lives_in.as_deref().is_some_and(|home| home.is::<House>()));
}
