//! Configuration-bound entry point for statement (de)serialization.

use crate::config::RyaConfig;
use crate::error::TripleRowResolverError;
use crate::model::{RyaStatement, TripleRow};
use crate::registry::TypeRegistry;
use crate::rows::{TableLayout, TripleRowResolver};
use log::debug;
use std::collections::BTreeMap;

/// Wires a [`TripleRowResolver`] with the configuration's hashing policy
/// and table prefix, so configuration is read once instead of on every
/// call. Cheap to clone; immutable after construction.
#[derive(Debug, Clone)]
pub struct TripleContext {
    resolver: TripleRowResolver,
    table_prefix: String,
}

impl TripleContext {
    pub fn new(config: &RyaConfig) -> Self {
        debug!(
            "triple context: hashing={:?} table_prefix={}",
            config.row_key_hashing, config.table_prefix
        );
        TripleContext {
            resolver: TripleRowResolver::new(TypeRegistry::new(), config.row_key_hashing),
            table_prefix: config.table_prefix.clone(),
        }
    }

    /// The registry used for value-level encode/decode.
    pub fn registry(&self) -> &TypeRegistry {
        self.resolver.registry()
    }

    /// One row per table layout for `statement`.
    pub fn serialize_triple(
        &self,
        statement: &RyaStatement,
    ) -> Result<BTreeMap<TableLayout, TripleRow>, TripleRowResolverError> {
        self.resolver.serialize_triple(statement)
    }

    /// Reconstruct the statement a row was produced from.
    pub fn deserialize_triple(
        &self,
        layout: TableLayout,
        row: &TripleRow,
    ) -> Result<RyaStatement, TripleRowResolverError> {
        self.resolver.deserialize_triple(layout, row)
    }

    /// The physical table names this context writes to.
    pub fn table_names(&self) -> Vec<String> {
        TableLayout::all()
            .iter()
            .map(|layout| layout.table_name(&self.table_prefix))
            .collect()
    }
}

impl Default for TripleContext {
    fn default() -> Self {
        TripleContext::new(&RyaConfig::default())
    }
}
