//! The immutable registry that dispatches encode/decode calls to codecs.

use crate::error::TypeResolverError;
use crate::model::RyaType;
use crate::resolver::{Resolver, ValueEncoding};
use log::debug;
use std::collections::BTreeMap;

/// Maps datatype IRIs and marker bytes to their codecs.
///
/// Built once from the closed codec set and never mutated afterward, so a
/// `&TypeRegistry` can be shared across any number of threads without
/// locking. Construct one per independently configured pipeline instead of
/// reaching for a process-wide global.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    by_marker: BTreeMap<u8, Resolver>,
    by_datatype: BTreeMap<String, Resolver>,
}

impl TypeRegistry {
    /// Build the registry over every codec in [`Resolver::ALL`].
    pub fn new() -> Self {
        let mut by_marker = BTreeMap::new();
        let mut by_datatype = BTreeMap::new();
        for resolver in Resolver::ALL {
            let previous = by_marker.insert(resolver.marker(), resolver);
            debug_assert!(
                previous.is_none(),
                "duplicate marker byte {}",
                resolver.marker()
            );
            if let Some(datatype) = resolver.datatype() {
                by_datatype.insert(datatype.as_str().to_string(), resolver);
            }
        }
        debug!("type registry built with {} resolvers", by_marker.len());
        TypeRegistry {
            by_marker,
            by_datatype,
        }
    }

    /// The codec dedicated to `value`'s datatype, or the catch-all when no
    /// dedicated codec is registered.
    pub fn resolver_for(&self, value: &RyaType) -> Resolver {
        self.by_datatype
            .get(value.datatype().as_str())
            .copied()
            .unwrap_or(Resolver::Custom)
    }

    /// The codec registered under `marker`.
    pub fn resolver_for_marker(&self, marker: u8) -> Result<Resolver, TypeResolverError> {
        self.by_marker
            .get(&marker)
            .copied()
            .ok_or(TypeResolverError::UnknownMarker(marker))
    }

    /// Encode a typed value into its stored byte form.
    pub fn serialize(&self, value: &RyaType) -> Result<Vec<u8>, TypeResolverError> {
        self.resolver_for(value).serialize_single(value)
    }

    /// Encode a typed value, keeping the data and suffix halves separate.
    pub fn serialize_parts(&self, value: &RyaType) -> Result<ValueEncoding, TypeResolverError> {
        self.resolver_for(value).serialize(value)
    }

    /// Decode a stored byte form back into a typed value. The trailing
    /// marker byte selects the codec.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<RyaType, TypeResolverError> {
        let marker = *bytes
            .last()
            .ok_or_else(|| TypeResolverError::MissingDelimiter(Vec::new()))?;
        self.resolver_for_marker(marker)?.deserialize(bytes)
    }

    /// The registered marker bytes, in ascending order.
    pub fn markers(&self) -> impl Iterator<Item = u8> + '_ {
        self.by_marker.keys().copied()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        TypeRegistry::new()
    }
}
