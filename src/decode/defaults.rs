use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::decode::{Record, Result};

/// A field type that accepts a declarative default string.
///
/// Only types implementing this trait can be registered with a default, so a default on an
/// unsupported kind of field is rejected at compile time rather than at decode time.
pub trait DefaultSpec: Sized {
	/// Whether the value equals the type's zero value.
	fn is_zero(&self) -> bool;

	/// Parse a default spec using the same rules as value coercion.
	fn parse_default(spec: &str) -> std::result::Result<Self, String>;
}

impl DefaultSpec for bool {
	fn is_zero(&self) -> bool {
		!*self
	}

	fn parse_default(spec: &str) -> std::result::Result<Self, String> {
		spec.parse::<bool>().map_err(|err| err.to_string())
	}
}

impl DefaultSpec for String {
	fn is_zero(&self) -> bool {
		self.is_empty()
	}

	fn parse_default(spec: &str) -> std::result::Result<Self, String> {
		Ok(spec.to_owned())
	}
}

macro_rules! default_int {
	($($ty:ty),*) => {$(
		impl DefaultSpec for $ty {
			fn is_zero(&self) -> bool {
				*self == 0
			}

			fn parse_default(spec: &str) -> std::result::Result<Self, String> {
				spec.parse::<$ty>().map_err(|err| err.to_string())
			}
		}
	)*};
}

default_int!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! default_float {
	($($ty:ty),*) => {$(
		impl DefaultSpec for $ty {
			fn is_zero(&self) -> bool {
				*self == 0.0
			}

			fn parse_default(spec: &str) -> std::result::Result<Self, String> {
				let value = spec.parse::<$ty>().map_err(|err| err.to_string())?;
				if !value.is_finite() {
					return Err(format!("{spec} is out of range for {}", stringify!($ty)));
				}
				Ok(value)
			}
		}
	)*};
}

default_float!(f32, f64);

impl DefaultSpec for OffsetDateTime {
	fn is_zero(&self) -> bool {
		*self == OffsetDateTime::UNIX_EPOCH
	}

	fn parse_default(spec: &str) -> std::result::Result<Self, String> {
		OffsetDateTime::parse(spec, &Rfc3339).map_err(|err| err.to_string())
	}
}

impl<T: DefaultSpec> DefaultSpec for Option<T> {
	fn is_zero(&self) -> bool {
		self.is_none()
	}

	fn parse_default(spec: &str) -> std::result::Result<Self, String> {
		T::parse_default(spec).map(Some)
	}
}

/// Back-fill declared defaults into a constructed record.
///
/// Every field with a default spec whose value is zero receives the parsed default. Every spec
/// is parsed even when the field is already set, so a malformed default always surfaces as
/// [`DecodeError::InvalidDefault`](crate::decode::DecodeError::InvalidDefault). With `nested`
/// set, record-typed fields are processed the same way; optional and polymorphic fields are not
/// descended into.
pub fn apply_defaults<R: Record>(target: &mut R, nested: bool) -> Result<()> {
	R::descriptor().apply_defaults(target, nested)
}
