use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors produced while parsing, decoding, and back-filling defaults.
///
/// Every variant is terminal for the top-level call that produced it.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Serialized input could not be parsed into a tree.
	#[error("parse: {0}")]
	Parse(#[from] serde_json::Error),
	/// Object has no string value under the discriminator key.
	#[error("missing discriminator {key:?} at {path}")]
	MissingDiscriminator {
		/// Discriminator key that was looked up.
		key: String,
		/// Schema path of the object.
		path: String,
	},
	/// Factory rejected the discriminator value.
	#[error("unknown variant {kind:?} at {path}: {message}")]
	UnknownVariant {
		/// Discriminator value handed to the factory.
		kind: String,
		/// Schema path of the object.
		path: String,
		/// Factory error message, unmodified.
		message: String,
	},
	/// Value cannot be coerced into the declared field type.
	#[error("type mismatch at {path}: expected {expected}, got {got}")]
	TypeMismatch {
		/// Schema path of the value.
		path: String,
		/// Declared destination type.
		expected: String,
		/// Description of the offending value.
		got: String,
	},
	/// No oneOf candidate accepted the object.
	#[error("no matching schema at {path}: {reason}")]
	NoMatchingSchema {
		/// Schema path of the object.
		path: String,
		/// Why resolution failed.
		reason: String,
	},
	/// More than one oneOf candidate accepted the object.
	#[error("ambiguous schema at {path}: candidates {candidates:?}")]
	AmbiguousSchema {
		/// Schema path of the object.
		path: String,
		/// Names of every matching candidate.
		candidates: Vec<String>,
	},
	/// Default spec string does not parse into the field type.
	#[error("invalid default {spec:?} for {field}: {reason}")]
	InvalidDefault {
		/// Qualified field name (`Record.field`).
		field: String,
		/// Offending default spec.
		spec: String,
		/// Parser error text.
		reason: String,
	},
	/// Decode target cannot be populated from the input root.
	#[error("invalid target {target}: {reason}")]
	InvalidTarget {
		/// Kind of the target record.
		target: String,
		/// Why the target was rejected.
		reason: String,
	},
	/// Input nesting exceeded the configured limit.
	#[error("decode depth exceeded (max={max_depth}) at {path}")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
		/// Schema path where the limit was hit.
		path: String,
	},
	/// Schema path expression syntax is invalid.
	#[error("invalid schema path: {path}")]
	InvalidSchemaPath {
		/// Original path expression.
		path: String,
	},
}
