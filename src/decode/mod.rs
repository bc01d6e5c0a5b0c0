mod api;
mod coerce;
mod context;
mod defaults;
mod encode;
mod error;
mod oneof;
mod path;
mod record;
mod scan;
mod value;
mod variant;

/// Top-level decode entry points and the option-carrying decoder.
pub use api::{Decoder, decode, decode_as, decode_bytes, decode_bytes_into, decode_into, decode_with_defaults};
/// Field coercion trait and the non-optional timestamp field type.
pub use coerce::{Decode, Timestamp};
/// Per-call traversal state and options.
pub use context::{Context, DecodeOptions};
/// Declarative default parsing and application.
pub use defaults::{DefaultSpec, apply_defaults};
/// Value rebuilding for round trips.
pub use encode::Encode;
/// Error and result aliases.
pub use error::{DecodeError, Result};
/// Structural oneOf resolution.
pub use oneof::{Candidate, OneOf, ResolveError, Resolver, SchemaPaths};
/// Schema path types.
pub use path::{PathStep, SchemaPath};
/// Record field tables.
pub use record::{Descriptor, DescriptorBuilder, Field, Record};
/// Schema path inventory of a dynamic tree.
pub use scan::{PathKind, PathSummary, scan_paths};
/// Dynamic tree types.
pub use value::{Entry, MapValue, Value};
/// Polymorphic record trait and kind registries.
pub use variant::{Constructor, Factory, Registry, Variant};
