use heck::ToSnakeCase;
use tracing::{debug, trace};

use crate::decode::oneof::ResolveError;
use crate::decode::{Decode, DecodeError, Factory, MapValue, Record, Result, SchemaPath, SchemaPaths, Value, Variant};

/// Runtime limits and behavior switches for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting depth of objects and arrays.
	pub max_depth: u32,
	/// Back-fill declared defaults into every record decoded from an object.
	pub apply_defaults: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			apply_defaults: false,
		}
	}
}

impl DecodeOptions {
	/// Preset for configuration-style documents: shallow and defaulted.
	pub fn for_config() -> Self {
		Self {
			max_depth: 16,
			apply_defaults: true,
		}
	}
}

/// How objects without a statically known shape are resolved.
#[derive(Clone, Copy)]
pub(crate) enum Mode<'a> {
	/// Every object carries a discriminator resolved through a factory.
	Discriminated {
		/// Key holding the discriminator value.
		key: &'a str,
		/// Kind to constructor mapping.
		factory: &'a dyn Factory,
	},
	/// Objects decode positionally; polymorphic fields consult the schema path table.
	Structural {
		/// Optional path-keyed resolver table.
		schema: Option<&'a SchemaPaths>,
	},
}

/// Per-call decode state: resolution mode, current path, and depth.
///
/// A context is created by the entry points for one top-level call and handed to every
/// [`Decode`] and [`Variant`] implementation along the traversal.
pub struct Context<'a> {
	mode: Mode<'a>,
	options: &'a DecodeOptions,
	path: SchemaPath,
	depth: u32,
}

impl<'a> Context<'a> {
	pub(crate) fn new(mode: Mode<'a>, options: &'a DecodeOptions) -> Self {
		Self {
			mode,
			options,
			path: SchemaPath::root(),
			depth: 0,
		}
	}

	/// Structural path of the value currently being decoded.
	pub fn path(&self) -> &SchemaPath {
		&self.path
	}

	/// Options in effect for this call.
	pub fn options(&self) -> &DecodeOptions {
		self.options
	}

	/// Decode any value into `T`, routing `null` through [`Decode::decode_null`].
	pub fn decode_value<T: Decode>(&mut self, value: &Value) -> Result<T> {
		if value.is_null() { T::decode_null(self) } else { T::decode(value, self) }
	}

	/// Decode every element of a sequence into `T`.
	pub fn decode_elements<T: Decode>(&mut self, items: &[Value]) -> Result<Vec<T>> {
		self.enter()?;
		let decoded = self.decode_each(items);
		self.leave();
		decoded
	}

	fn decode_each<T: Decode>(&mut self, items: &[Value]) -> Result<Vec<T>> {
		let mut out = Vec::with_capacity(items.len());
		for item in items {
			self.path.push_element();
			let decoded = self.decode_value::<T>(item);
			self.path.pop();
			out.push(decoded?);
		}
		Ok(out)
	}

	/// Decode an object into a concrete record type.
	///
	/// With a discriminator in effect the object is instantiated through the factory and the
	/// resulting variant must be an `R`; otherwise a fresh `R` is populated field by field.
	pub fn decode_record<R: Record + Variant>(&mut self, value: &Value) -> Result<R> {
		let Value::Map(map) = value else {
			return Err(self.mismatch(R::KIND, value));
		};

		match self.mode {
			Mode::Discriminated { key, factory } => {
				let variant = self.instantiate(map, key, factory)?;
				let kind = variant.kind().to_owned();
				match variant.downcast::<R>() {
					Some(record) => Ok(*record),
					None => Err(self.mismatch_text(R::KIND, format!("variant {kind:?}"))),
				}
			}
			Mode::Structural { .. } => {
				let mut record = R::default();
				self.populate(&mut record, map, None)?;
				Ok(record)
			}
		}
	}

	/// Decode an object whose concrete shape is chosen at runtime.
	///
	/// Uses the discriminator and factory when one is in effect, the resolver registered at the
	/// current path otherwise.
	pub fn decode_variant(&mut self, value: &Value) -> Result<Box<dyn Variant>> {
		let Value::Map(map) = value else {
			return Err(self.mismatch("object", value));
		};

		match self.mode {
			Mode::Discriminated { key, factory } => self.instantiate(map, key, factory),
			Mode::Structural { schema } => self.resolve_one_of(map, schema),
		}
	}

	/// Build a [`DecodeError::TypeMismatch`] for `got` at the current path.
	pub fn mismatch(&self, expected: &str, got: &Value) -> DecodeError {
		self.mismatch_text(expected, got.describe())
	}

	/// Build a [`DecodeError::TypeMismatch`] with a free-form description of the value.
	pub fn mismatch_text(&self, expected: &str, got: impl Into<String>) -> DecodeError {
		DecodeError::TypeMismatch {
			path: self.path.label(),
			expected: expected.to_owned(),
			got: got.into(),
		}
	}

	pub(crate) fn populate_root(&mut self, target: &mut dyn Variant, map: &MapValue) -> Result<()> {
		let skip = match self.mode {
			Mode::Discriminated { key, .. } => Some(key),
			Mode::Structural { .. } => None,
		};
		self.populate(target, map, skip)
	}

	pub(crate) fn instantiate(&mut self, map: &MapValue, key: &str, factory: &dyn Factory) -> Result<Box<dyn Variant>> {
		let Some(Value::String(kind)) = map.get(key) else {
			return Err(DecodeError::MissingDiscriminator {
				key: key.to_owned(),
				path: self.path.label(),
			});
		};

		let mut variant = factory.create(kind).map_err(|message| DecodeError::UnknownVariant {
			kind: kind.to_string(),
			path: self.path.label(),
			message,
		})?;
		debug!(kind = %kind, path = %self.path, "instantiated variant");

		self.populate(variant.as_mut(), map, Some(key))?;
		Ok(variant)
	}

	fn resolve_one_of(&mut self, map: &MapValue, schema: Option<&SchemaPaths>) -> Result<Box<dyn Variant>> {
		let resolver = schema
			.and_then(|table| table.get(&self.path))
			.ok_or_else(|| DecodeError::NoMatchingSchema {
				path: self.path.label(),
				reason: "no resolver registered for this path".to_owned(),
			})?;

		let mut variant = resolver.resolve(map).map_err(|err| match err {
			ResolveError::NoMatch { reason } => DecodeError::NoMatchingSchema {
				path: self.path.label(),
				reason,
			},
			ResolveError::Ambiguous { candidates } => DecodeError::AmbiguousSchema {
				path: self.path.label(),
				candidates,
			},
		})?;
		debug!(kind = variant.kind(), path = %self.path, "selected oneOf shape");

		self.populate(variant.as_mut(), map, None)?;
		Ok(variant)
	}

	fn populate(&mut self, target: &mut dyn Variant, map: &MapValue, skip: Option<&str>) -> Result<()> {
		self.enter()?;
		let populated = self.populate_fields(target, map, skip);
		self.leave();
		populated
	}

	fn populate_fields(&mut self, target: &mut dyn Variant, map: &MapValue, skip: Option<&str>) -> Result<()> {
		for (key, value) in map.iter() {
			if skip == Some(key) {
				continue;
			}

			let field = key.to_snake_case();
			self.path.push_field(&field);
			let assigned = match target.assign(&field, value, self) {
				Ok(false) => self.check_unclaimed(value).map(|()| false),
				other => other,
			};
			self.path.pop();
			if !assigned? {
				trace!(kind = target.kind(), key, path = %self.path, "ignoring key without matching field");
			}
		}

		if self.options.apply_defaults {
			target.fill_defaults(false)?;
		}
		Ok(())
	}

	/// Instantiate and drop objects under a key no field claims, so every discriminator in the
	/// tree is resolved even when its value is discarded.
	fn check_unclaimed(&mut self, value: &Value) -> Result<()> {
		let Mode::Discriminated { key, factory } = self.mode else {
			return Ok(());
		};

		match value {
			Value::Map(map) => self.instantiate(map, key, factory).map(drop),
			Value::Array(items) => {
				self.enter()?;
				let checked = self.check_unclaimed_each(items);
				self.leave();
				checked
			}
			_ => Ok(()),
		}
	}

	fn check_unclaimed_each(&mut self, items: &[Value]) -> Result<()> {
		for item in items {
			self.path.push_element();
			let checked = self.check_unclaimed(item);
			self.path.pop();
			checked?;
		}
		Ok(())
	}

	fn enter(&mut self) -> Result<()> {
		if self.depth >= self.options.max_depth {
			return Err(DecodeError::DepthExceeded {
				max_depth: self.options.max_depth,
				path: self.path.label(),
			});
		}
		self.depth += 1;
		Ok(())
	}

	fn leave(&mut self) {
		self.depth = self.depth.saturating_sub(1);
	}
}
