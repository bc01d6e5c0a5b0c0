use std::collections::{BTreeMap, BTreeSet};

use heck::ToSnakeCase;

use crate::decode::{DecodeError, DecodeOptions, Result, SchemaPath, Value};

/// Node kind observed at a schema path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathKind {
	/// `null`.
	Null,
	/// Boolean, number, or string.
	Scalar,
	/// Sequence.
	Array,
	/// Object.
	Object,
}

impl PathKind {
	fn of(value: &Value) -> Self {
		match value {
			Value::Null => PathKind::Null,
			Value::Array(_) => PathKind::Array,
			Value::Map(_) => PathKind::Object,
			_ => PathKind::Scalar,
		}
	}

	/// Lowercase label used in reports.
	pub fn as_str(self) -> &'static str {
		match self {
			PathKind::Null => "null",
			PathKind::Scalar => "scalar",
			PathKind::Array => "array",
			PathKind::Object => "object",
		}
	}
}

/// Aggregated observations for one schema path.
#[derive(Debug, Clone, Default)]
pub struct PathSummary {
	/// Number of nodes found at this path.
	pub count: usize,
	/// Node kinds found at this path.
	pub node_kinds: BTreeSet<PathKind>,
	/// Discriminator values seen on objects at this path.
	pub variants: BTreeSet<String>,
	/// Objects at this path that lack a string discriminator.
	pub untagged: usize,
}

/// Walk a tree and summarize every schema path it contains.
///
/// Keys are normalized the same way the decoder normalizes them. With a discriminator, each
/// object's variant is recorded and the discriminator key itself is not reported as a path.
/// Objects without one are the places a [`SchemaPaths`](crate::decode::SchemaPaths) resolver
/// would be consulted.
pub fn scan_paths(tree: &Value, discriminator: Option<&str>, options: &DecodeOptions) -> Result<BTreeMap<SchemaPath, PathSummary>> {
	let mut scanner = PathScanner {
		discriminator,
		max_depth: options.max_depth,
		path: SchemaPath::root(),
		out: BTreeMap::new(),
	};
	scanner.visit(tree, 0)?;
	Ok(scanner.out)
}

struct PathScanner<'a> {
	discriminator: Option<&'a str>,
	max_depth: u32,
	path: SchemaPath,
	out: BTreeMap<SchemaPath, PathSummary>,
}

impl PathScanner<'_> {
	fn visit(&mut self, value: &Value, depth: u32) -> Result<()> {
		let summary = self.out.entry(self.path.clone()).or_default();
		summary.count += 1;
		summary.node_kinds.insert(PathKind::of(value));

		let nested = matches!(value, Value::Array(_) | Value::Map(_));
		if nested && depth >= self.max_depth {
			return Err(DecodeError::DepthExceeded {
				max_depth: self.max_depth,
				path: self.path.label(),
			});
		}

		match value {
			Value::Array(items) => {
				for item in items {
					self.path.push_element();
					let visited = self.visit(item, depth + 1);
					self.path.pop();
					visited?;
				}
			}
			Value::Map(map) => {
				if let Some(key) = self.discriminator {
					match map.get(key).and_then(Value::as_str) {
						Some(kind) => {
							summary.variants.insert(kind.to_owned());
						}
						None => summary.untagged += 1,
					}
				}
				for (key, item) in map.iter() {
					if self.discriminator == Some(key) {
						continue;
					}
					self.path.push_field(&key.to_snake_case());
					let visited = self.visit(item, depth + 1);
					self.path.pop();
					visited?;
				}
			}
			_ => {}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
