//! rya — sortable byte encoding of typed RDF statements for key-value
//! stores.
//!
//! Typed RDF values (IRIs, literals with datatypes, custom types) are
//! encoded into byte sequences that a sorted key-value store can
//! range-scan, and decoded back losslessly. Each statement is written once
//! per table layout (SPO, POS, OSP) so a partial-key scan can bound any
//! position.
//!
//! Quick start: encode a single value
//!
//! ```
//! use rya::{RyaType, TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//! let value = RyaType::plain("mydata");
//! let bytes = registry.serialize(&value).expect("encode");
//! assert_eq!(registry.deserialize(&bytes).expect("decode"), value);
//! ```
//!
//! Produce and reverse the per-layout rows of a statement
//!
//! ```
//! use rya::{RyaConfig, RyaIri, RyaStatement, RyaType, TableLayout, TripleContext};
//!
//! let context = TripleContext::new(&RyaConfig::default());
//! let statement = RyaStatement::builder()
//!     .subject(RyaIri::new("urn:example#subj").unwrap())
//!     .predicate(RyaIri::new("urn:example#pred").unwrap())
//!     .object(RyaType::plain("mydata"))
//!     .build()
//!     .unwrap();
//!
//! let rows = context.serialize_triple(&statement).expect("rows");
//! let back = context
//!     .deserialize_triple(TableLayout::Spo, &rows[&TableLayout::Spo])
//!     .expect("statement");
//! assert_eq!(back, statement);
//! ```

extern crate derive_builder;

pub mod config;
pub mod consts;
pub mod context;
pub mod conversions;
pub mod error;
pub mod escape;
pub mod model;
pub mod options;
pub mod registry;
pub mod resolver;
pub mod rows;

pub use config::RyaConfig;
pub use context::TripleContext;
pub use error::{InvalidRyaIriError, TripleRowResolverError, TypeResolverError};
pub use model::{RyaIri, RyaStatement, RyaStatementBuilder, RyaType, TripleRow};
pub use options::RowKeyHashing;
pub use registry::TypeRegistry;
pub use resolver::{Resolver, ValueEncoding};
pub use rows::{TableLayout, TripleRowResolver};
