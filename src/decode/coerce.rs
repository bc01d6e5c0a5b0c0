use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::decode::{Context, Result, Value, Variant};

/// A field type the decoder can produce from a dynamic value.
pub trait Decode: Sized {
	/// Name of the declared type in mismatch messages.
	const EXPECTED: &'static str;

	/// Decode a present, non-null value.
	fn decode(value: &Value, cx: &mut Context<'_>) -> Result<Self>;

	/// Decode an explicit `null`. Only optional types accept it.
	fn decode_null(cx: &mut Context<'_>) -> Result<Self> {
		Err(cx.mismatch(Self::EXPECTED, &Value::Null))
	}

	/// Post-decode default pass. Records recurse into their own fields; scalars have nothing to do.
	fn apply_defaults(&mut self, nested: bool) -> Result<()> {
		let _ = nested;
		Ok(())
	}
}

impl Decode for bool {
	const EXPECTED: &'static str = "bool";

	fn decode(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		match value {
			Value::Bool(v) => Ok(*v),
			_ => Err(cx.mismatch(Self::EXPECTED, value)),
		}
	}
}

impl Decode for String {
	const EXPECTED: &'static str = "string";

	fn decode(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		match value {
			Value::String(v) => Ok(v.to_string()),
			_ => Err(cx.mismatch(Self::EXPECTED, value)),
		}
	}
}

macro_rules! decode_int {
	($($ty:ty),* $(,)?) => {$(
		impl Decode for $ty {
			const EXPECTED: &'static str = stringify!($ty);

			fn decode(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
				let converted = match value {
					Value::I64(v) => <$ty>::try_from(*v).ok(),
					Value::U64(v) => <$ty>::try_from(*v).ok(),
					Value::F64(v) => integral_float(*v).and_then(|v| <$ty>::try_from(v).ok()),
					_ => return Err(cx.mismatch(Self::EXPECTED, value)),
				};
				converted.ok_or_else(|| cx.mismatch_text(Self::EXPECTED, format!("{} (out of range)", value.describe())))
			}
		}
	)*};
}

decode_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl Decode for f64 {
	const EXPECTED: &'static str = "f64";

	fn decode(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		match value {
			Value::F64(v) => Ok(*v),
			Value::I64(v) => Ok(*v as f64),
			Value::U64(v) => Ok(*v as f64),
			_ => Err(cx.mismatch(Self::EXPECTED, value)),
		}
	}
}

impl Decode for f32 {
	const EXPECTED: &'static str = "f32";

	fn decode(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		match value {
			Value::F64(v) if v.is_finite() && v.abs() > f64::from(f32::MAX) => {
				Err(cx.mismatch_text(Self::EXPECTED, format!("{} (out of range)", value.describe())))
			}
			Value::F64(v) => Ok(*v as f32),
			Value::I64(v) => Ok(*v as f32),
			Value::U64(v) => Ok(*v as f32),
			_ => Err(cx.mismatch(Self::EXPECTED, value)),
		}
	}
}

impl Decode for OffsetDateTime {
	const EXPECTED: &'static str = "RFC 3339 timestamp";

	fn decode(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		let Value::String(text) = value else {
			return Err(cx.mismatch(Self::EXPECTED, value));
		};
		OffsetDateTime::parse(text, &Rfc3339).map_err(|err| cx.mismatch_text(Self::EXPECTED, format!("{text:?} ({err})")))
	}
}

impl<T: Decode> Decode for Option<T> {
	const EXPECTED: &'static str = T::EXPECTED;

	fn decode(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		T::decode(value, cx).map(Some)
	}

	fn decode_null(_cx: &mut Context<'_>) -> Result<Self> {
		Ok(None)
	}
}

impl<T: Decode> Decode for Vec<T> {
	const EXPECTED: &'static str = "array";

	fn decode(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		match value {
			Value::Array(items) => cx.decode_elements(items),
			_ => Err(cx.mismatch(Self::EXPECTED, value)),
		}
	}
}

impl Decode for Box<dyn Variant> {
	const EXPECTED: &'static str = "object";

	fn decode(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		cx.decode_variant(value)
	}
}

/// Timestamp field that is not optional; zero is the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub OffsetDateTime);

impl Default for Timestamp {
	fn default() -> Self {
		Timestamp(OffsetDateTime::UNIX_EPOCH)
	}
}

impl From<OffsetDateTime> for Timestamp {
	fn from(value: OffsetDateTime) -> Self {
		Timestamp(value)
	}
}

/// Implement decoding, encoding, and default parsing for a newtype over a scalar.
///
/// The value is coerced into the wrapped type first and then re-tagged:
///
/// ```
/// #[derive(Debug, Clone, Default, PartialEq)]
/// pub struct MyString(pub String);
/// polydecode::scalar_alias!(MyString, String);
/// ```
#[macro_export]
macro_rules! scalar_alias {
	($alias:ident, $inner:ty) => {
		impl $crate::decode::Decode for $alias {
			const EXPECTED: &'static str = <$inner as $crate::decode::Decode>::EXPECTED;

			fn decode(value: &$crate::decode::Value, cx: &mut $crate::decode::Context<'_>) -> $crate::decode::Result<Self> {
				<$inner as $crate::decode::Decode>::decode(value, cx).map($alias)
			}
		}

		impl $crate::decode::Encode for $alias {
			fn encode(&self, discriminator: Option<&str>) -> $crate::decode::Value {
				<$inner as $crate::decode::Encode>::encode(&self.0, discriminator)
			}
		}

		impl $crate::decode::DefaultSpec for $alias {
			fn is_zero(&self) -> bool {
				<$inner as $crate::decode::DefaultSpec>::is_zero(&self.0)
			}

			fn parse_default(spec: &str) -> ::std::result::Result<Self, String> {
				<$inner as $crate::decode::DefaultSpec>::parse_default(spec).map($alias)
			}
		}
	};
}

scalar_alias!(Timestamp, OffsetDateTime);

/// Integral part of a float, if it has no fractional part.
fn integral_float(value: f64) -> Option<i128> {
	if !value.is_finite() || value.fract() != 0.0 {
		return None;
	}
	if value < i128::MIN as f64 || value >= i128::MAX as f64 {
		return None;
	}
	Some(value as i128)
}
