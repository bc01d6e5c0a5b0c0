#![allow(missing_docs)]

use polydecode::decode::{DecodeError, DecodeOptions, Decoder, Timestamp, Value, apply_defaults, decode_with_defaults};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Default)]
struct StructWithDefaults {
	val: String,
	ptr: Option<String>,
	int: i64,
	uint: u64,
	time: Timestamp,
	ptime: Option<OffsetDateTime>,
	int8: i8,
	uint8: u8,
	int16: i16,
	uint16: u16,
	int32: i32,
	uint32: u32,
	int64: i64,
	uint64: u64,
	float32: f32,
	float64: f64,
	bool: bool,
	sr: SubRecord,
}

#[derive(Debug, Default, PartialEq)]
struct SubRecord {
	name: Option<String>,
}

polydecode::record! {
	StructWithDefaults {
		val = "STRING_VAL",
		ptr = "STRING_PTR",
		int = "-7",
		uint = "12",
		time = "2019-10-28T12:35:56Z",
		ptime = "2019-10-28T23:45:10Z",
		int8 = "127",
		uint8 = "127",
		int16 = "32767",
		uint16 = "65535",
		int32 = "2147483647",
		uint32 = "4294967295",
		int64 = "32767",
		uint64 = "65535",
		float32 = "1.0",
		float64 = "1.0",
		bool = "true",
		sr,
	}
}

polydecode::record! {
	SubRecord {
		name = "James",
	}
}

#[derive(Debug, Default)]
struct BadIntStr {
	bad_int_str: i64,
}

#[derive(Debug, Default)]
struct BadBool {
	bad_bool: bool,
}

#[derive(Debug, Default)]
struct BadFloat32 {
	bad_float32: f32,
}

#[derive(Debug, Default)]
struct BadTime {
	time: Option<OffsetDateTime>,
}

polydecode::record! { BadIntStr { bad_int_str = "aaaa" } }
polydecode::record! { BadBool { bad_bool = "text" } }
polydecode::record! { BadFloat32 { bad_float32 = "1E1234567" } }
polydecode::record! { BadTime { time = "--123" } }

fn rfc3339(text: &str) -> OffsetDateTime {
	OffsetDateTime::parse(text, &Rfc3339).expect("test timestamp parses")
}

fn tree(json: &str) -> Value {
	Value::parse(json.as_bytes()).expect("test json parses")
}

#[test]
fn empty_input_receives_every_default() {
	let mut swd = StructWithDefaults::default();
	decode_with_defaults(&tree("{}"), &mut swd, None, true).expect("defaults apply");

	assert_eq!(swd.val, "STRING_VAL");
	assert_eq!(swd.ptr.as_deref(), Some("STRING_PTR"));
	assert_eq!(swd.int, -7);
	assert_eq!(swd.uint, 12);
	assert_eq!(swd.time, Timestamp(rfc3339("2019-10-28T12:35:56Z")));
	assert_eq!(swd.ptime, Some(rfc3339("2019-10-28T23:45:10Z")));
	assert_eq!(swd.int8, 127);
	assert_eq!(swd.uint8, 127);
	assert_eq!(swd.int16, 32767);
	assert_eq!(swd.uint16, 65535);
	assert_eq!(swd.int32, 2147483647);
	assert_eq!(swd.uint32, 4294967295);
	assert_eq!(swd.int64, 32767);
	assert_eq!(swd.uint64, 65535);
	assert_eq!(swd.float32, 1.0);
	assert_eq!(swd.float64, 1.0);
	assert!(swd.bool);
	assert_eq!(swd.sr.name, None, "absent nested record keeps its zero value");
}

#[test]
fn present_nested_record_receives_its_defaults() {
	let mut swd = StructWithDefaults::default();
	decode_with_defaults(&tree(r#"{"SR": {}}"#), &mut swd, None, true).expect("defaults apply");
	assert_eq!(swd.sr.name.as_deref(), Some("James"));
}

#[test]
fn supplied_values_win_over_defaults() {
	let mut swd = StructWithDefaults::default();
	decode_with_defaults(&tree(r#"{"Val": "given", "Int": 3, "SR": {"Name": "Ann"}}"#), &mut swd, None, true).expect("decode succeeds");
	assert_eq!(swd.val, "given");
	assert_eq!(swd.int, 3);
	assert_eq!(swd.sr.name.as_deref(), Some("Ann"));
	assert_eq!(swd.uint, 12);
}

#[test]
fn defaults_are_skipped_unless_requested() {
	let mut swd = StructWithDefaults::default();
	decode_with_defaults(&tree(r#"{"SR": {}}"#), &mut swd, None, false).expect("decode succeeds");
	assert_eq!(swd.val, "");
	assert_eq!(swd.sr.name, None);
}

#[test]
fn config_preset_applies_defaults() {
	let decoder = Decoder::new(DecodeOptions::for_config());
	let swd: StructWithDefaults = decoder.decode_new(&tree("{}"), None).expect("defaults apply");
	assert_eq!(swd.val, "STRING_VAL");
}

#[test]
fn zero_supplied_value_is_indistinguishable_from_absent() {
	let mut swd = StructWithDefaults::default();
	decode_with_defaults(&tree(r#"{"Int": 0}"#), &mut swd, None, true).expect("decode succeeds");
	assert_eq!(swd.int, -7);
}

#[test]
fn bad_default_specs_fail() {
	let input = tree(r#"{"SR": {}}"#);
	let errors = [
		decode_with_defaults(&input, &mut BadIntStr::default(), None, true),
		decode_with_defaults(&input, &mut BadBool::default(), None, true),
		decode_with_defaults(&input, &mut BadFloat32::default(), None, true),
		decode_with_defaults(&input, &mut BadTime::default(), None, true),
	];
	for result in errors {
		let err = result.expect_err("malformed default must fail");
		assert!(matches!(err, DecodeError::InvalidDefault { .. }), "unexpected error: {err}");
	}
}

#[test]
fn standalone_pass_reports_qualified_field() {
	let err = apply_defaults(&mut BadTime::default(), false).expect_err("--123 is not a timestamp");
	match err {
		DecodeError::InvalidDefault { field, spec, .. } => {
			assert_eq!(field, "BadTime.time");
			assert_eq!(spec, "--123");
		}
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn standalone_nested_pass_fills_record_fields() {
	let mut swd = StructWithDefaults::default();
	apply_defaults(&mut swd, true).expect("defaults apply");
	assert_eq!(swd.sr.name.as_deref(), Some("James"));
	assert_eq!(swd.int, -7);
}
