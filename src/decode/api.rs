use crate::decode::context::Mode;
use crate::decode::{Context, DecodeError, DecodeOptions, Factory, Record, Result, SchemaPaths, Value, Variant};

/// Reusable entry point carrying [`DecodeOptions`].
///
/// The free functions delegate to a decoder with default options (`decode_with_defaults` only toggles
/// `apply_defaults`).
#[derive(Debug, Clone, Default)]
pub struct Decoder {
	options: DecodeOptions,
}

impl Decoder {
	/// Create a decoder with explicit options.
	pub fn new(options: DecodeOptions) -> Self {
		Self { options }
	}

	/// Options used for every call.
	pub fn options(&self) -> &DecodeOptions {
		&self.options
	}

	/// Decode a tree whose root and nested objects are selected by `discriminator`.
	pub fn decode(&self, tree: &Value, discriminator: &str, factory: &dyn Factory) -> Result<Box<dyn Variant>> {
		let mut cx = Context::new(Mode::Discriminated { key: discriminator, factory }, &self.options);
		let Value::Map(map) = tree else {
			return Err(cx.mismatch("object", tree));
		};
		cx.instantiate(map, discriminator, factory)
	}

	/// Decode like [`Decoder::decode`] and require the root to be an `R`.
	pub fn decode_as<R: Record + Variant>(&self, tree: &Value, discriminator: &str, factory: &dyn Factory) -> Result<R> {
		let variant = self.decode(tree, discriminator, factory)?;
		let kind = variant.kind().to_owned();
		match variant.downcast::<R>() {
			Some(record) => Ok(*record),
			None => Err(DecodeError::TypeMismatch {
				path: "<root>".to_owned(),
				expected: R::KIND.to_owned(),
				got: format!("variant {kind:?}"),
			}),
		}
	}

	/// Parse serialized bytes, then [`Decoder::decode`].
	pub fn decode_bytes(&self, bytes: &[u8], discriminator: &str, factory: &dyn Factory) -> Result<Box<dyn Variant>> {
		self.decode(&Value::parse(bytes)?, discriminator, factory)
	}

	/// Populate a caller-owned record from a tree, resolving polymorphic fields via `schema`.
	///
	/// The root must be an object. On error the target may hold a partial decode and should be
	/// discarded.
	pub fn decode_into(&self, tree: &Value, target: &mut dyn Variant, schema: Option<&SchemaPaths>) -> Result<()> {
		let Value::Map(map) = tree else {
			return Err(DecodeError::InvalidTarget {
				target: target.kind().to_owned(),
				reason: format!("cannot populate a record from {}", tree.kind_name()),
			});
		};
		let mut cx = Context::new(Mode::Structural { schema }, &self.options);
		cx.populate_root(target, map)
	}

	/// Parse serialized bytes, then [`Decoder::decode_into`].
	pub fn decode_bytes_into(&self, bytes: &[u8], target: &mut dyn Variant, schema: Option<&SchemaPaths>) -> Result<()> {
		self.decode_into(&Value::parse(bytes)?, target, schema)
	}

	/// Decode into a fresh `R`, leaving nothing behind on failure.
	pub fn decode_new<R: Record + Variant>(&self, tree: &Value, schema: Option<&SchemaPaths>) -> Result<R> {
		let mut record = R::default();
		self.decode_into(tree, &mut record, schema)?;
		Ok(record)
	}
}

/// Decode a tree through `discriminator` and `factory` with default options.
pub fn decode(tree: &Value, discriminator: &str, factory: &dyn Factory) -> Result<Box<dyn Variant>> {
	Decoder::default().decode(tree, discriminator, factory)
}

/// Decode a tree and require the root to be an `R`.
pub fn decode_as<R: Record + Variant>(tree: &Value, discriminator: &str, factory: &dyn Factory) -> Result<R> {
	Decoder::default().decode_as(tree, discriminator, factory)
}

/// Parse serialized bytes and decode them through `discriminator` and `factory`.
pub fn decode_bytes(bytes: &[u8], discriminator: &str, factory: &dyn Factory) -> Result<Box<dyn Variant>> {
	Decoder::default().decode_bytes(bytes, discriminator, factory)
}

/// Populate `target` from a tree, resolving polymorphic fields via `schema`.
pub fn decode_into(tree: &Value, target: &mut dyn Variant, schema: Option<&SchemaPaths>) -> Result<()> {
	Decoder::default().decode_into(tree, target, schema)
}

/// Parse serialized bytes and populate `target`.
pub fn decode_bytes_into(bytes: &[u8], target: &mut dyn Variant, schema: Option<&SchemaPaths>) -> Result<()> {
	Decoder::default().decode_bytes_into(bytes, target, schema)
}

/// Populate `target`, then back-fill declared defaults when `apply_defaults` is set.
///
/// Defaults are applied to the root and to every nested record decoded from an object.
/// Nested records absent from the input keep their `Default` value untouched.
pub fn decode_with_defaults(tree: &Value, target: &mut dyn Variant, schema: Option<&SchemaPaths>, apply_defaults: bool) -> Result<()> {
	let options = DecodeOptions {
		apply_defaults,
		..DecodeOptions::default()
	};
	Decoder::new(options).decode_into(tree, target, schema)
}
