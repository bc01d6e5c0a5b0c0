//! Shape selection for objects that carry no discriminator.
//!
//! A [`SchemaPaths`] table maps the structural path of a polymorphic field to a [`Resolver`]
//! that inspects the candidate object and constructs the shape it represents. The stock
//! [`OneOf`] resolver matches candidates by required properties and by property values whose
//! meaning is local to that field.

use std::collections::HashMap;
use std::fmt;

use heck::ToSnakeCase;

use crate::decode::variant::{Constructor, construct_default};
use crate::decode::{MapValue, Record, Result, SchemaPath, Value, Variant};

/// Why a resolver could not pick a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
	/// No candidate accepted the object.
	NoMatch {
		/// Human-readable explanation.
		reason: String,
	},
	/// Several candidates accepted the object.
	Ambiguous {
		/// Names of the matching candidates.
		candidates: Vec<String>,
	},
}

/// Picks and constructs the shape of an object found at a registered path.
pub trait Resolver: Send + Sync {
	/// Construct the empty shape `candidate` should be decoded into.
	fn resolve(&self, candidate: &MapValue) -> std::result::Result<Box<dyn Variant>, ResolveError>;
}

impl<F> Resolver for F
where
	F: Fn(&MapValue) -> std::result::Result<Box<dyn Variant>, ResolveError> + Send + Sync,
{
	fn resolve(&self, candidate: &MapValue) -> std::result::Result<Box<dyn Variant>, ResolveError> {
		self(candidate)
	}
}

/// Immutable table of resolvers keyed by schema path.
#[derive(Default)]
pub struct SchemaPaths {
	resolvers: HashMap<SchemaPath, Box<dyn Resolver>>,
}

impl SchemaPaths {
	/// Create an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `resolver` at the path expression `path` (e.g. `owners[].lives_in`).
	pub fn with(mut self, path: &str, resolver: impl Resolver + 'static) -> Result<Self> {
		self.insert(SchemaPath::parse(path)?, resolver);
		Ok(self)
	}

	/// Register `resolver` at an already parsed path, replacing any previous entry.
	pub fn insert(&mut self, path: SchemaPath, resolver: impl Resolver + 'static) {
		self.resolvers.insert(path, Box::new(resolver));
	}

	/// Resolver registered at `path`.
	pub fn get(&self, path: &SchemaPath) -> Option<&dyn Resolver> {
		self.resolvers.get(path).map(|resolver| resolver.as_ref())
	}

	/// Number of registered paths.
	pub fn len(&self) -> usize {
		self.resolvers.len()
	}

	/// Whether no paths are registered.
	pub fn is_empty(&self) -> bool {
		self.resolvers.is_empty()
	}
}

impl fmt::Debug for SchemaPaths {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut paths: Vec<String> = self.resolvers.keys().map(SchemaPath::to_string).collect();
		paths.sort();
		f.debug_struct("SchemaPaths").field("paths", &paths).finish()
	}
}

/// One shape a oneOf field may take.
#[derive(Clone)]
pub struct Candidate {
	name: String,
	required: Vec<String>,
	tags: Vec<(String, String)>,
	construct: Constructor,
}

impl Candidate {
	/// Candidate for record `R`, named after its kind.
	pub fn of<R: Record + Variant>() -> Self {
		Self::with_constructor(R::KIND, construct_default::<R>)
	}

	/// Candidate with an explicit constructor.
	pub fn with_constructor(name: &str, construct: Constructor) -> Self {
		Self {
			name: name.to_owned(),
			required: Vec::new(),
			tags: Vec::new(),
			construct,
		}
	}

	/// Require `property` to be present.
	pub fn require(mut self, property: &str) -> Self {
		self.required.push(property.to_snake_case());
		self
	}

	/// Require `property` to be the string `value`.
	pub fn tag(mut self, property: &str, value: &str) -> Self {
		self.tags.push((property.to_snake_case(), value.to_owned()));
		self
	}

	/// Candidate name reported in ambiguity errors.
	pub fn name(&self) -> &str {
		&self.name
	}

	fn matches(&self, candidate: &MapValue) -> bool {
		let lookup = |property: &str| candidate.iter().find(|(key, _)| key.to_snake_case() == property).map(|(_, value)| value);

		self.required.iter().all(|property| lookup(property.as_str()).is_some())
			&& self
				.tags
				.iter()
				.all(|(property, expected)| matches!(lookup(property.as_str()), Some(Value::String(actual)) if &**actual == expected.as_str()))
	}
}

impl fmt::Debug for Candidate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Candidate")
			.field("name", &self.name)
			.field("required", &self.required)
			.field("tags", &self.tags)
			.finish()
	}
}

/// Resolver choosing among candidates; exactly one must match.
#[derive(Debug, Clone, Default)]
pub struct OneOf {
	candidates: Vec<Candidate>,
}

impl OneOf {
	/// Create a resolver without candidates.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a candidate.
	pub fn candidate(mut self, candidate: Candidate) -> Self {
		self.candidates.push(candidate);
		self
	}

	/// Add record `R` selected when `property` equals its kind.
	pub fn tagged<R: Record + Variant>(self, property: &str) -> Self {
		self.candidate(Candidate::of::<R>().tag(property, R::KIND))
	}

	/// Candidates in registration order.
	pub fn candidates(&self) -> &[Candidate] {
		&self.candidates
	}
}

impl Resolver for OneOf {
	fn resolve(&self, candidate: &MapValue) -> std::result::Result<Box<dyn Variant>, ResolveError> {
		let matched: Vec<&Candidate> = self.candidates.iter().filter(|item| item.matches(candidate)).collect();
		match matched.as_slice() {
			[] => {
				let names: Vec<&str> = self.candidates.iter().map(Candidate::name).collect();
				let keys: Vec<&str> = candidate.iter().map(|(key, _)| key).collect();
				Err(ResolveError::NoMatch {
					reason: format!("none of {names:?} accepts properties {keys:?}"),
				})
			}
			[only] => Ok((only.construct)()),
			many => Err(ResolveError::Ambiguous {
				candidates: many.iter().map(|item| item.name.clone()).collect(),
			}),
		}
	}
}

#[cfg(test)]
mod tests;
