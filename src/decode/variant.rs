use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::decode::{Context, Record, Result, Value};

/// A Kind-tagged record instance whose concrete type is chosen at decode time.
///
/// The kind is fixed by the implementing type; the decoder never changes it.
pub trait Variant: Any + fmt::Debug {
	/// Discriminator value identifying this shape.
	fn kind(&self) -> &str;

	/// Decode `value` into the field named `field` (already normalized to snake_case).
	///
	/// Returns `Ok(false)` when the shape has no such field.
	fn assign(&mut self, field: &str, value: &Value, cx: &mut Context<'_>) -> Result<bool>;

	/// Back-fill declared defaults.
	fn fill_defaults(&mut self, nested: bool) -> Result<()>;

	/// Encode back into a dynamic value.
	fn to_value(&self, discriminator: Option<&str>) -> Value;
}

impl dyn Variant {
	/// Whether the concrete type is `T`.
	pub fn is<T: Variant>(&self) -> bool {
		(self as &dyn Any).is::<T>()
	}

	/// Borrow as the concrete type `T`.
	pub fn downcast_ref<T: Variant>(&self) -> Option<&T> {
		(self as &dyn Any).downcast_ref::<T>()
	}

	/// Mutably borrow as the concrete type `T`.
	pub fn downcast_mut<T: Variant>(&mut self) -> Option<&mut T> {
		(self as &mut dyn Any).downcast_mut::<T>()
	}

	/// Take ownership as the concrete type `T`.
	pub fn downcast<T: Variant>(self: Box<Self>) -> Option<Box<T>> {
		let any: Box<dyn Any> = self;
		any.downcast::<T>().ok()
	}
}

impl PartialEq for dyn Variant {
	fn eq(&self, other: &Self) -> bool {
		self.kind() == other.kind() && self.to_value(None) == other.to_value(None)
	}
}

/// Maps a discriminator value to a freshly constructed, empty variant.
///
/// A lookup miss must be reported as an error; its message is surfaced unchanged in
/// [`DecodeError::UnknownVariant`](crate::decode::DecodeError::UnknownVariant).
pub trait Factory: Send + Sync {
	/// Construct the variant for `kind`.
	fn create(&self, kind: &str) -> std::result::Result<Box<dyn Variant>, String>;
}

impl<F> Factory for F
where
	F: Fn(&str) -> std::result::Result<Box<dyn Variant>, String> + Send + Sync,
{
	fn create(&self, kind: &str) -> std::result::Result<Box<dyn Variant>, String> {
		self(kind)
	}
}

/// Constructor of an empty variant.
pub type Constructor = fn() -> Box<dyn Variant>;

type Build = Arc<dyn Fn() -> Box<dyn Variant> + Send + Sync>;

/// Immutable kind-to-constructor table.
///
/// Every entry is keyed by the [`Record::KIND`] of the type it builds, so a decoded variant
/// always reports the discriminator value that selected it.
#[derive(Clone, Default)]
pub struct Registry {
	constructors: BTreeMap<Box<str>, Build>,
}

impl Registry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `R` under its record kind, constructed with [`Default`].
	pub fn with<R: Record + Variant>(self) -> Self {
		self.with_constructor(R::default)
	}

	/// Register `R` under its record kind, constructed by `constructor`.
	pub fn with_constructor<R, F>(mut self, constructor: F) -> Self
	where
		R: Record + Variant,
		F: Fn() -> R + Send + Sync + 'static,
	{
		self.constructors
			.insert(R::KIND.into(), Arc::new(move || Box::new(constructor()) as Box<dyn Variant>));
		self
	}

	/// Registered kinds in sorted order.
	pub fn kinds(&self) -> impl Iterator<Item = &str> {
		self.constructors.keys().map(|kind| kind.as_ref())
	}

	/// Number of registered kinds.
	pub fn len(&self) -> usize {
		self.constructors.len()
	}

	/// Whether no kinds are registered.
	pub fn is_empty(&self) -> bool {
		self.constructors.is_empty()
	}
}

impl Factory for Registry {
	fn create(&self, kind: &str) -> std::result::Result<Box<dyn Variant>, String> {
		match self.constructors.get(kind) {
			Some(constructor) => Ok(constructor()),
			None => Err(format!("cannot find type {kind}")),
		}
	}
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.kinds()).finish()
	}
}

pub(crate) fn construct_default<R: Record + Variant>() -> Box<dyn Variant> {
	Box::new(R::default())
}
