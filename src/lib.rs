//! Decode self-describing dynamic trees into statically declared records.
//!
//! Polymorphic children are resolved either through a discriminator key embedded in
//! each object (see [`decode::decode`]) or, for objects without one, through a table of
//! resolvers keyed by the object's structural path (see [`decode::SchemaPaths`]).

/// Value model, coercion, variant resolution, defaults, and decode entry points.
pub mod decode;
