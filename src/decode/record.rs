use tracing::trace;

use crate::decode::{Context, Decode, DecodeError, DefaultSpec, Encode, MapValue, Result, Value};

/// A statically declared target structure with a field table.
///
/// Implemented by [`record!`](crate::record), which also provides the matching [`Decode`],
/// [`Encode`], and [`Variant`](crate::decode::Variant) impls.
pub trait Record: Default + 'static {
	/// Kind identity reported by instances of this record.
	const KIND: &'static str;

	/// Field table, built once per type.
	fn descriptor() -> &'static Descriptor<Self>;
}

/// Field table of one record type.
pub struct Descriptor<T> {
	name: &'static str,
	fields: Vec<Field<T>>,
}

/// One registered field of a record.
pub struct Field<T> {
	name: &'static str,
	default: Option<&'static str>,
	slot: Box<dyn Slot<T>>,
}

/// Incremental construction of a [`Descriptor`].
pub struct DescriptorBuilder<T> {
	name: &'static str,
	fields: Vec<Field<T>>,
}

/// Type-erased access to one field of `T`.
trait Slot<T>: Send + Sync {
	fn decode(&self, target: &mut T, value: &Value, cx: &mut Context<'_>) -> Result<()>;

	fn apply_default(&self, _target: &mut T, _field: &str, _spec: &'static str) -> Result<()> {
		Ok(())
	}

	fn nested_defaults(&self, target: &mut T) -> Result<()>;

	fn encode(&self, target: &T, discriminator: Option<&str>) -> Option<Value>;
}

struct Accessor<T, F> {
	get: fn(&T) -> &F,
	get_mut: fn(&mut T) -> &mut F,
}

struct Defaulted<T, F>(Accessor<T, F>);

impl<T, F> Slot<T> for Accessor<T, F>
where
	F: Decode + Encode + 'static,
{
	fn decode(&self, target: &mut T, value: &Value, cx: &mut Context<'_>) -> Result<()> {
		*(self.get_mut)(target) = cx.decode_value::<F>(value)?;
		Ok(())
	}

	fn nested_defaults(&self, target: &mut T) -> Result<()> {
		(self.get_mut)(target).apply_defaults(true)
	}

	fn encode(&self, target: &T, discriminator: Option<&str>) -> Option<Value> {
		let value = (self.get)(target);
		if value.is_absent() { None } else { Some(value.encode(discriminator)) }
	}
}

impl<T, F> Slot<T> for Defaulted<T, F>
where
	F: Decode + Encode + DefaultSpec + 'static,
{
	fn decode(&self, target: &mut T, value: &Value, cx: &mut Context<'_>) -> Result<()> {
		self.0.decode(target, value, cx)
	}

	fn apply_default(&self, target: &mut T, field: &str, spec: &'static str) -> Result<()> {
		let parsed = F::parse_default(spec).map_err(|reason| DecodeError::InvalidDefault {
			field: field.to_owned(),
			spec: spec.to_owned(),
			reason,
		})?;

		let slot = (self.0.get_mut)(target);
		if slot.is_zero() {
			*slot = parsed;
			trace!(field, spec, "applied default");
		}
		Ok(())
	}

	fn nested_defaults(&self, target: &mut T) -> Result<()> {
		self.0.nested_defaults(target)
	}

	fn encode(&self, target: &T, discriminator: Option<&str>) -> Option<Value> {
		self.0.encode(target, discriminator)
	}
}

impl<T: 'static> Descriptor<T> {
	/// Start a table for the record named `name`.
	pub fn builder(name: &'static str) -> DescriptorBuilder<T> {
		DescriptorBuilder { name, fields: Vec::new() }
	}

	/// Record name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Registered fields in declaration order.
	pub fn fields(&self) -> &[Field<T>] {
		&self.fields
	}

	/// Look up a field by its identifier.
	pub fn field(&self, name: &str) -> Option<&Field<T>> {
		self.fields.iter().find(|field| field.name == name)
	}

	/// Decode `value` into the field named `name`.
	///
	/// Returns `Ok(false)` when the record has no such field; the value is then ignored.
	pub fn assign(&self, target: &mut T, name: &str, value: &Value, cx: &mut Context<'_>) -> Result<bool> {
		let Some(field) = self.field(name) else {
			return Ok(false);
		};
		field.slot.decode(target, value, cx)?;
		Ok(true)
	}

	/// Back-fill defaults into zero-valued fields, optionally descending into record fields.
	pub fn apply_defaults(&self, target: &mut T, nested: bool) -> Result<()> {
		for field in &self.fields {
			if let Some(spec) = field.default {
				field.slot.apply_default(target, &format!("{}.{}", self.name, field.name), spec)?;
			}
			if nested {
				field.slot.nested_defaults(target)?;
			}
		}
		Ok(())
	}

	/// Encode `target` as an object, emitting `discriminator: kind` first when requested.
	pub fn encode(&self, target: &T, kind: &str, discriminator: Option<&str>) -> Value {
		let mut map = MapValue::new();
		if let Some(key) = discriminator {
			map.insert(key, Value::from(kind));
		}
		for field in &self.fields {
			if let Some(value) = field.slot.encode(target, discriminator) {
				map.insert(field.name, value);
			}
		}
		Value::Map(map)
	}
}

impl<T> Field<T> {
	/// Field identifier, matched against normalized input keys.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Declared default spec, if any.
	pub fn default_spec(&self) -> Option<&'static str> {
		self.default
	}
}

impl<T: 'static> DescriptorBuilder<T> {
	/// Register a field without a default.
	pub fn field<F>(mut self, name: &'static str, get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self
	where
		F: Decode + Encode + 'static,
	{
		self.fields.push(Field {
			name,
			default: None,
			slot: Box::new(Accessor { get, get_mut }),
		});
		self
	}

	/// Register a field with a default spec applied while it holds its zero value.
	pub fn field_default<F>(mut self, name: &'static str, spec: &'static str, get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self
	where
		F: Decode + Encode + DefaultSpec + 'static,
	{
		self.fields.push(Field {
			name,
			default: Some(spec),
			slot: Box::new(Defaulted(Accessor { get, get_mut })),
		});
		self
	}

	/// Finish the table.
	pub fn build(self) -> Descriptor<T> {
		Descriptor {
			name: self.name,
			fields: self.fields,
		}
	}
}

/// Register a struct as a decodable record.
///
/// Lists the fields the decoder may assign, optionally with a default spec, and an optional
/// kind (defaults to the type name). The struct must implement [`Default`] and every listed
/// field type must implement [`Decode`] and [`Encode`]; fields with a default also need
/// [`DefaultSpec`].
///
/// ```
/// #[derive(Debug, Default)]
/// pub struct Pet {
/// 	name: String,
/// 	age: Option<i64>,
/// 	lost: bool,
/// }
///
/// polydecode::record! {
/// 	Pet as "pet" {
/// 		name,
/// 		age = "1",
/// 		lost,
/// 	}
/// }
/// ```
#[macro_export]
macro_rules! record {
	($ty:ident $(as $kind:literal)? { $($field:ident $(= $default:literal)?),* $(,)? }) => {
		impl $crate::decode::Record for $ty {
			const KIND: &'static str = $crate::__record_kind!($ty $(, $kind)?);

			fn descriptor() -> &'static $crate::decode::Descriptor<Self> {
				static DESCRIPTOR: ::std::sync::OnceLock<$crate::decode::Descriptor<$ty>> = ::std::sync::OnceLock::new();
				DESCRIPTOR.get_or_init(|| {
					let builder = $crate::decode::Descriptor::<$ty>::builder(<$ty as $crate::decode::Record>::KIND);
					$(let builder = $crate::__record_field!(builder, $field $(, $default)?);)*
					builder.build()
				})
			}
		}

		impl $crate::decode::Decode for $ty {
			const EXPECTED: &'static str = <$ty as $crate::decode::Record>::KIND;

			fn decode(value: &$crate::decode::Value, cx: &mut $crate::decode::Context<'_>) -> $crate::decode::Result<Self> {
				cx.decode_record::<Self>(value)
			}

			fn apply_defaults(&mut self, nested: bool) -> $crate::decode::Result<()> {
				<$ty as $crate::decode::Record>::descriptor().apply_defaults(self, nested)
			}
		}

		impl $crate::decode::Encode for $ty {
			fn encode(&self, discriminator: Option<&str>) -> $crate::decode::Value {
				<$ty as $crate::decode::Record>::descriptor().encode(self, <$ty as $crate::decode::Record>::KIND, discriminator)
			}
		}

		impl $crate::decode::Variant for $ty {
			fn kind(&self) -> &str {
				<$ty as $crate::decode::Record>::KIND
			}

			fn assign(
				&mut self,
				field: &str,
				value: &$crate::decode::Value,
				cx: &mut $crate::decode::Context<'_>,
			) -> $crate::decode::Result<bool> {
				<$ty as $crate::decode::Record>::descriptor().assign(self, field, value, cx)
			}

			fn fill_defaults(&mut self, nested: bool) -> $crate::decode::Result<()> {
				<$ty as $crate::decode::Record>::descriptor().apply_defaults(self, nested)
			}

			fn to_value(&self, discriminator: Option<&str>) -> $crate::decode::Value {
				<$ty as $crate::decode::Encode>::encode(self, discriminator)
			}
		}
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_kind {
	($ty:ident) => {
		stringify!($ty)
	};
	($ty:ident, $kind:literal) => {
		$kind
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_field {
	($builder:ident, $field:ident) => {
		$builder.field(stringify!($field), |target| &target.$field, |target| &mut target.$field)
	};
	($builder:ident, $field:ident, $default:literal) => {
		$builder.field_default(stringify!($field), $default, |target| &target.$field, |target| &mut target.$field)
	};
}
