//! Table layouts and whole-row statement (de)serialization.
//!
//! A statement is written once per layout so a range scan can bound any of
//! subject, predicate or object. The row key concatenates the layout's
//! three positional segments separated by the reserved row delimiter;
//! subject and predicate contribute their data bytes only (their type is
//! fixed to IRI), the object contributes its full typed encoding. Context
//! rides in the column family, visibility/timestamp/metadata in the row's
//! payload positions.

use crate::consts::{HASH_PREFIX_LEN, ROW_DELIM};
use crate::error::{TripleRowResolverError, TypeResolverError};
use crate::escape;
use crate::model::{RyaIri, RyaStatement, TripleRow};
use crate::options::RowKeyHashing;
use crate::registry::TypeRegistry;
use std::collections::BTreeMap;
use std::fmt;

/// The physical orderings a statement is written under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableLayout {
    /// Subject-Predicate-Object.
    Spo,
    /// Predicate-Object-Subject.
    Pos,
    /// Object-Subject-Predicate.
    Osp,
}

impl TableLayout {
    /// Every supported layout.
    pub fn all() -> &'static [TableLayout] {
        &[TableLayout::Spo, TableLayout::Pos, TableLayout::Osp]
    }

    /// The short name of this layout.
    pub fn name(self) -> &'static str {
        match self {
            TableLayout::Spo => "spo",
            TableLayout::Pos => "pos",
            TableLayout::Osp => "osp",
        }
    }

    /// The physical table name under `prefix`.
    pub fn table_name(self, prefix: &str) -> String {
        format!("{}{}", prefix, self.name())
    }
}

impl fmt::Display for TableLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Builds the per-layout rows for a statement and reverses them.
#[derive(Debug, Clone, Default)]
pub struct TripleRowResolver {
    registry: TypeRegistry,
    hashing: RowKeyHashing,
}

impl TripleRowResolver {
    pub fn new(registry: TypeRegistry, hashing: RowKeyHashing) -> Self {
        TripleRowResolver { registry, hashing }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn hashing(&self) -> RowKeyHashing {
        self.hashing
    }

    /// One row per table layout for `statement`.
    pub fn serialize_triple(
        &self,
        statement: &RyaStatement,
    ) -> Result<BTreeMap<TableLayout, TripleRow>, TripleRowResolverError> {
        let subject = escape::escape(statement.subject().as_str().as_bytes());
        let predicate = escape::escape(statement.predicate().as_str().as_bytes());
        let object = self.registry.serialize(statement.object())?;
        let column_family = statement
            .context()
            .map(|c| escape::escape(c.as_str().as_bytes()))
            .unwrap_or_default();

        let mut rows = BTreeMap::new();
        for &layout in TableLayout::all() {
            let segments: [&[u8]; 3] = match layout {
                TableLayout::Spo => [&subject, &predicate, &object],
                TableLayout::Pos => [&predicate, &object, &subject],
                TableLayout::Osp => [&object, &subject, &predicate],
            };
            rows.insert(
                layout,
                TripleRow {
                    row: self.build_row_key(&segments),
                    column_family: column_family.clone(),
                    column_qualifier: Vec::new(),
                    column_visibility: statement.column_visibility().to_vec(),
                    timestamp: statement.timestamp(),
                    value: statement
                        .metadata()
                        .map(|m| m.as_bytes().to_vec())
                        .unwrap_or_default(),
                },
            );
        }
        Ok(rows)
    }

    /// Reconstruct the statement a row was produced from. Exact inverse of
    /// [`TripleRowResolver::serialize_triple`] for the same hashing mode.
    pub fn deserialize_triple(
        &self,
        layout: TableLayout,
        row: &TripleRow,
    ) -> Result<RyaStatement, TripleRowResolverError> {
        let mut segments: Vec<&[u8]> = row.row.split(|&b| b == ROW_DELIM).collect();
        let expected = if self.hashing.is_enabled() { 4 } else { 3 };
        if segments.len() != expected {
            return Err(TripleRowResolverError::MalformedRow {
                layout: layout.name(),
                expected,
                found: segments.len(),
            });
        }
        if self.hashing.is_enabled() {
            segments.remove(0);
        }
        let (subject, predicate, object) = match layout {
            TableLayout::Spo => (
                iri_segment(segments[0])?,
                iri_segment(segments[1])?,
                self.registry.deserialize(segments[2])?,
            ),
            TableLayout::Pos => (
                iri_segment(segments[2])?,
                iri_segment(segments[0])?,
                self.registry.deserialize(segments[1])?,
            ),
            TableLayout::Osp => (
                iri_segment(segments[1])?,
                iri_segment(segments[2])?,
                self.registry.deserialize(segments[0])?,
            ),
        };
        let context = if row.column_family.is_empty() {
            None
        } else {
            Some(iri_segment(&row.column_family)?)
        };
        let metadata = if row.value.is_empty() {
            None
        } else {
            Some(
                String::from_utf8(row.value.clone())
                    .map_err(|e| TripleRowResolverError::Payload(e.into_bytes()))?,
            )
        };
        Ok(RyaStatement::from_row_parts(
            subject,
            predicate,
            object,
            context,
            row.column_visibility.clone(),
            row.timestamp,
            metadata,
        ))
    }

    fn build_row_key(&self, segments: &[&[u8]; 3]) -> Vec<u8> {
        let mut row = Vec::with_capacity(
            segments.iter().map(|s| s.len() + 1).sum::<usize>() + HASH_PREFIX_LEN + 1,
        );
        if self.hashing.is_enabled() {
            row.extend_from_slice(hash_prefix(segments[0]).as_bytes());
            row.push(ROW_DELIM);
        }
        row.extend_from_slice(segments[0]);
        row.push(ROW_DELIM);
        row.extend_from_slice(segments[1]);
        row.push(ROW_DELIM);
        row.extend_from_slice(segments[2]);
        row
    }
}

/// Decode an IRI-position segment: unescape, then validate as an IRI.
fn iri_segment(segment: &[u8]) -> Result<RyaIri, TripleRowResolverError> {
    let raw = escape::unescape(segment)?;
    let iri = String::from_utf8(raw).map_err(|e| {
        TripleRowResolverError::Value(TypeResolverError::InvalidData {
            datatype: RyaIri::datatype().as_str().to_string(),
            reason: e.to_string(),
        })
    })?;
    Ok(RyaIri::new(iri)?)
}

/// Fixed-width shard-balancing prefix: the leading hex characters of the
/// blake3 hash of the row's first segment. Deterministic and stable across
/// process restarts.
fn hash_prefix(segment: &[u8]) -> String {
    let hex = blake3::hash(segment).to_hex();
    hex[..HASH_PREFIX_LEN].to_string()
}
