use crate::decode::Result;

/// Dynamic tree consumed by the decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Explicit `null`.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	I64(i64),
	/// Unsigned integer scalar too large for `I64`.
	U64(u64),
	/// Floating point scalar.
	F64(f64),
	/// String scalar.
	String(Box<str>),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// Ordered field map with unique keys.
	Map(MapValue),
}

/// Ordered string-keyed map node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapValue {
	/// Entries in insertion order. Maps parsed from JSON arrive sorted by key.
	pub entries: Vec<Entry>,
}

/// One key/value pair of a [`MapValue`].
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
	/// Key as it appeared in the input.
	pub key: Box<str>,
	/// Associated value.
	pub value: Value,
}

impl Value {
	/// Parse serialized JSON bytes into a tree.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let json: serde_json::Value = serde_json::from_slice(bytes)?;
		Ok(Self::from(json))
	}

	/// Short label of the node kind, used in mismatch messages.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::I64(_) | Value::U64(_) => "integer",
			Value::F64(_) => "number",
			Value::String(_) => "string",
			Value::Array(_) => "array",
			Value::Map(_) => "object",
		}
	}

	/// Whether this node is `null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Borrow the string payload, if any.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(value) => Some(value),
			_ => None,
		}
	}

	/// Borrow the map payload, if any.
	pub fn as_map(&self) -> Option<&MapValue> {
		match self {
			Value::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Borrow the array payload, if any.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Value::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Render a scalar for diagnostics; containers render as their kind name.
	pub fn describe(&self) -> String {
		match self {
			Value::Null => "null".to_owned(),
			Value::Bool(v) => v.to_string(),
			Value::I64(v) => v.to_string(),
			Value::U64(v) => v.to_string(),
			Value::F64(v) => v.to_string(),
			Value::String(v) => format!("{v:?}"),
			Value::Array(items) => format!("array[{}]", items.len()),
			Value::Map(map) => format!("object{{{}}}", map.len()),
		}
	}
}

impl MapValue {
	/// Create an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Look up a value by exact key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries.iter().find(|entry| entry.key.as_ref() == key).map(|entry| &entry.value)
	}

	/// Whether `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Insert or replace a value, keeping the position of an existing key.
	pub fn insert(&mut self, key: impl Into<Box<str>>, value: Value) {
		let key = key.into();
		match self.entries.iter_mut().find(|entry| entry.key == key) {
			Some(entry) => entry.value = value,
			None => self.entries.push(Entry { key, value }),
		}
	}

	/// Iterate entries in order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.entries.iter().map(|entry| (entry.key.as_ref(), &entry.value))
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the map has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<K: Into<Box<str>>> FromIterator<(K, Value)> for MapValue {
	fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
		let mut map = MapValue::new();
		for (key, value) in iter {
			map.insert(key, value);
		}
		map
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(v) => Value::Bool(v),
			serde_json::Value::Number(n) => {
				if let Some(v) = n.as_i64() {
					Value::I64(v)
				} else if let Some(v) = n.as_u64() {
					Value::U64(v)
				} else {
					Value::F64(n.as_f64().unwrap_or(f64::NAN))
				}
			}
			serde_json::Value::String(v) => Value::String(v.into_boxed_str()),
			serde_json::Value::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
			// serde_json keys are unique.
			serde_json::Value::Object(map) => Value::Map(MapValue {
				entries: map
					.into_iter()
					.map(|(key, value)| Entry {
						key: key.into_boxed_str(),
						value: Value::from(value),
					})
					.collect(),
			}),
		}
	}
}

impl From<&Value> for serde_json::Value {
	fn from(value: &Value) -> Self {
		match value {
			Value::Null => serde_json::Value::Null,
			Value::Bool(v) => serde_json::json!(v),
			Value::I64(v) => serde_json::json!(v),
			Value::U64(v) => serde_json::json!(v),
			Value::F64(v) => serde_json::Number::from_f64(*v).map_or(serde_json::Value::Null, serde_json::Value::Number),
			Value::String(v) => serde_json::Value::String(v.to_string()),
			Value::Array(items) => serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect()),
			Value::Map(map) => serde_json::Value::Object(
				map.iter()
					.map(|(key, value)| (key.to_owned(), serde_json::Value::from(value)))
					.collect(),
			),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::I64(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::F64(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value.into_boxed_str())
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Value::Array(items)
	}
}

impl From<MapValue> for Value {
	fn from(map: MapValue) -> Self {
		Value::Map(map)
	}
}
