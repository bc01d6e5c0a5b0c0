use std::fmt;

use heck::ToSnakeCase;

use crate::decode::{DecodeError, Result};

/// One step of a structural path from the document root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathStep {
	/// Enter a named field (normalized snake_case identifier).
	Field(String),
	/// Enter any element of a sequence.
	Element,
}

/// Location of a value relative to the decode root, independent of array indices.
///
/// Rendered as dotted field names with `[]` marking sequence elements, e.g.
/// `owners[].lives_in`. The root renders as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl SchemaPath {
	/// Path of the document root.
	pub fn root() -> Self {
		Self::default()
	}

	/// Parse dotted field syntax with optional `[]` element markers.
	///
	/// Field names are normalized to snake_case like input keys, so `livesIn` and `lives_in`
	/// name the same step.
	pub fn parse(input: &str) -> Result<Self> {
		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			let start = idx;
			while idx < bytes.len() {
				let byte = bytes[idx];
				if byte.is_ascii_alphanumeric() || byte == b'_' {
					idx += 1;
				} else {
					break;
				}
			}

			if idx > start {
				steps.push(PathStep::Field(input[start..idx].to_snake_case()));
			} else if !(steps.is_empty() && bytes[idx] == b'[') {
				return Err(DecodeError::InvalidSchemaPath { path: input.to_owned() });
			}

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				if idx >= bytes.len() || bytes[idx] != b']' {
					return Err(DecodeError::InvalidSchemaPath { path: input.to_owned() });
				}
				steps.push(PathStep::Element);
				idx += 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' {
					return Err(DecodeError::InvalidSchemaPath { path: input.to_owned() });
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(DecodeError::InvalidSchemaPath { path: input.to_owned() });
				}
			}
		}

		Ok(Self { steps })
	}

	/// Whether this is the root path.
	pub fn is_root(&self) -> bool {
		self.steps.is_empty()
	}

	/// Descend into a named field.
	pub fn push_field(&mut self, name: &str) {
		self.steps.push(PathStep::Field(name.to_owned()));
	}

	/// Descend into a sequence element.
	pub fn push_element(&mut self) {
		self.steps.push(PathStep::Element);
	}

	/// Return to the parent path.
	pub fn pop(&mut self) {
		self.steps.pop();
	}

	/// Render for diagnostics, naming the root explicitly.
	pub fn label(&self) -> String {
		if self.is_root() { "<root>".to_owned() } else { self.to_string() }
	}
}

impl fmt::Display for SchemaPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut first = true;
		for step in &self.steps {
			match step {
				PathStep::Field(name) => {
					if !first {
						f.write_str(".")?;
					}
					f.write_str(name)?;
				}
				PathStep::Element => f.write_str("[]")?,
			}
			first = false;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
