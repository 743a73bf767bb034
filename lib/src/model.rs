//! The in-memory value model: IRIs, typed values, statements, and the
//! physical rows derived from them.

use crate::consts::{XSD_ANY_URI, XSD_STRING};
use crate::error::InvalidRyaIriError;
use chrono::{DateTime, SecondsFormat, Utc};
use derive_builder::Builder;
use oxigraph::model::{NamedNode, NamedNodeRef};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A validated IRI. The datatype of every IRI value is fixed to
/// `xsd:anyURI`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RyaIri(String);

impl RyaIri {
    /// Validate and wrap an IRI string.
    ///
    /// Rejects empty input, strings without a scheme separator, and strings
    /// containing whitespace or control bytes (which include the reserved
    /// row delimiters).
    pub fn new(iri: impl Into<String>) -> Result<Self, InvalidRyaIriError> {
        let iri = iri.into();
        if iri.is_empty()
            || !iri.contains(':')
            || iri.chars().any(|c| c.is_control() || c.is_whitespace())
        {
            return Err(InvalidRyaIriError { iri });
        }
        Ok(RyaIri(iri))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The fixed datatype of IRI values.
    pub fn datatype() -> NamedNodeRef<'static> {
        XSD_ANY_URI
    }
}

impl fmt::Display for RyaIri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RyaIri {
    type Err = InvalidRyaIriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RyaIri::new(s)
    }
}

// oxigraph has already validated these, so the conversions are infallible.
impl From<NamedNode> for RyaIri {
    fn from(node: NamedNode) -> Self {
        RyaIri(node.into_string())
    }
}

impl From<NamedNodeRef<'_>> for RyaIri {
    fn from(node: NamedNodeRef<'_>) -> Self {
        RyaIri(node.as_str().to_string())
    }
}

impl Serialize for RyaIri {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RyaIri {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let iri = String::deserialize(deserializer)?;
        RyaIri::new(iri).map_err(serde::de::Error::custom)
    }
}

/// An RDF value: a datatype IRI plus the value's lexical form.
///
/// Two values are equal iff both fields match as strings. The natural order
/// compares the lexical form first and the datatype IRI second. Values are
/// immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RyaType {
    datatype: RyaIri,
    data: String,
}

impl RyaType {
    pub fn new(datatype: RyaIri, data: impl Into<String>) -> Self {
        RyaType {
            datatype,
            data: data.into(),
        }
    }

    /// A plain `xsd:string` value.
    pub fn plain(data: impl Into<String>) -> Self {
        RyaType::new(XSD_STRING.into(), data)
    }

    /// A canonical `xsd:dateTime` value: UTC RFC 3339 with millisecond
    /// precision, the form the dateTime codec round-trips exactly.
    pub fn datetime(when: DateTime<Utc>) -> Self {
        RyaType::new(
            crate::consts::XSD_DATE_TIME.into(),
            when.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn datatype(&self) -> &RyaIri {
        &self.datatype
    }

    /// True if this value is an IRI (`xsd:anyURI`).
    pub fn is_iri(&self) -> bool {
        self.datatype.as_str() == XSD_ANY_URI.as_str()
    }
}

impl Ord for RyaType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.data
            .cmp(&other.data)
            .then_with(|| self.datatype.as_str().cmp(other.datatype.as_str()))
    }
}

impl PartialOrd for RyaType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<RyaIri> for RyaType {
    fn from(iri: RyaIri) -> Self {
        RyaType {
            datatype: XSD_ANY_URI.into(),
            data: iri.into_string(),
        }
    }
}

impl fmt::Display for RyaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}^^<{}>", self.data, self.datatype)
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A single RDF statement plus its storage payload fields.
///
/// The storage identity of a statement is the (subject, predicate, object,
/// context) tuple; visibility, timestamp and metadata ride along as payload.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), pattern = "owned")]
pub struct RyaStatement {
    subject: RyaIri,
    predicate: RyaIri,
    object: RyaType,
    #[builder(default)]
    context: Option<RyaIri>,
    #[builder(default)]
    column_visibility: Vec<u8>,
    #[builder(default = "now_millis()")]
    timestamp: i64,
    #[builder(default)]
    metadata: Option<String>,
}

impl RyaStatement {
    /// A statement with default payload fields (no context, empty
    /// visibility, current timestamp, no metadata).
    pub fn new(subject: RyaIri, predicate: RyaIri, object: impl Into<RyaType>) -> Self {
        RyaStatement {
            subject,
            predicate,
            object: object.into(),
            context: None,
            column_visibility: Vec::new(),
            timestamp: now_millis(),
            metadata: None,
        }
    }

    pub fn builder() -> RyaStatementBuilder {
        RyaStatementBuilder::default()
    }

    /// This statement with `context` attached.
    pub fn with_context(mut self, context: RyaIri) -> Self {
        self.context = Some(context);
        self
    }

    pub fn subject(&self) -> &RyaIri {
        &self.subject
    }

    pub fn predicate(&self) -> &RyaIri {
        &self.predicate
    }

    pub fn object(&self) -> &RyaType {
        &self.object
    }

    pub fn context(&self) -> Option<&RyaIri> {
        self.context.as_ref()
    }

    pub fn column_visibility(&self) -> &[u8] {
        &self.column_visibility
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_row_parts(
        subject: RyaIri,
        predicate: RyaIri,
        object: RyaType,
        context: Option<RyaIri>,
        column_visibility: Vec<u8>,
        timestamp: i64,
        metadata: Option<String>,
    ) -> Self {
        RyaStatement {
            subject,
            predicate,
            object,
            context,
            column_visibility,
            timestamp,
            metadata,
        }
    }
}

impl fmt::Display for RyaStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> {}", self.subject, self.predicate, self.object)?;
        if let Some(context) = &self.context {
            write!(f, " <{}>", context)?;
        }
        Ok(())
    }
}

/// One physical row for a statement under a particular table layout.
///
/// Rows are a derived, ephemeral projection: produced fresh for every write
/// or scan and never kept as the statement of record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleRow {
    /// The sort key.
    pub row: Vec<u8>,
    pub column_family: Vec<u8>,
    pub column_qualifier: Vec<u8>,
    pub column_visibility: Vec<u8>,
    pub timestamp: i64,
    /// Statement metadata payload.
    pub value: Vec<u8>,
}
