use std::path::Path;

use polydecode::decode::{Result, Value};

/// Read and parse a JSON document from disk.
pub(crate) fn read_tree(path: &Path) -> Result<Value> {
	let bytes = std::fs::read(path)?;
	Value::parse(&bytes)
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload)?;
	println!("{text}");
	Ok(())
}

/// Cut `input` to `max_len` Unicode scalar values, marking the cut.
pub(crate) fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
