use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::decode::{Value, Variant};

/// Rebuild a dynamic value from a decoded field.
///
/// Records re-emit the discriminator key with their kind when `discriminator` is set, so the
/// output decodes back into an equal result.
pub trait Encode {
	/// Encode this value.
	fn encode(&self, discriminator: Option<&str>) -> Value;

	/// Whether the field should be left out of an encoded record.
	fn is_absent(&self) -> bool {
		false
	}
}

impl Encode for bool {
	fn encode(&self, _discriminator: Option<&str>) -> Value {
		Value::Bool(*self)
	}
}

impl Encode for String {
	fn encode(&self, _discriminator: Option<&str>) -> Value {
		Value::String(self.as_str().into())
	}
}

macro_rules! encode_int {
	($($ty:ty),*) => {$(
		impl Encode for $ty {
			fn encode(&self, _discriminator: Option<&str>) -> Value {
				Value::I64(i64::from(*self))
			}
		}
	)*};
}

encode_int!(i8, i16, i32, i64, u8, u16, u32);

impl Encode for u64 {
	fn encode(&self, _discriminator: Option<&str>) -> Value {
		match i64::try_from(*self) {
			Ok(v) => Value::I64(v),
			Err(_) => Value::U64(*self),
		}
	}
}

impl Encode for f32 {
	fn encode(&self, _discriminator: Option<&str>) -> Value {
		Value::F64(f64::from(*self))
	}
}

impl Encode for f64 {
	fn encode(&self, _discriminator: Option<&str>) -> Value {
		Value::F64(*self)
	}
}

impl Encode for OffsetDateTime {
	fn encode(&self, _discriminator: Option<&str>) -> Value {
		match self.format(&Rfc3339) {
			Ok(text) => Value::String(text.into_boxed_str()),
			Err(_) => Value::Null,
		}
	}
}

impl<T: Encode> Encode for Option<T> {
	fn encode(&self, discriminator: Option<&str>) -> Value {
		match self {
			Some(value) => value.encode(discriminator),
			None => Value::Null,
		}
	}

	fn is_absent(&self) -> bool {
		self.is_none()
	}
}

impl<T: Encode> Encode for Vec<T> {
	fn encode(&self, discriminator: Option<&str>) -> Value {
		Value::Array(self.iter().map(|item| item.encode(discriminator)).collect())
	}
}

impl Encode for Box<dyn Variant> {
	fn encode(&self, discriminator: Option<&str>) -> Value {
		self.to_value(discriminator)
	}
}
