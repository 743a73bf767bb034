//! Error types for value-level and row-level (de)serialization.

use std::fmt;

/// A string was rejected as an IRI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRyaIriError {
    pub iri: String,
}

impl fmt::Display for InvalidRyaIriError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "not a valid IRI: {:?}", self.iri)
    }
}

impl std::error::Error for InvalidRyaIriError {}

/// Errors that can arise while encoding or decoding a single typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeResolverError {
    /// The byte sequence carries no datatype suffix delimiter.
    MissingDelimiter(Vec<u8>),
    /// The trailing marker byte is not registered with any resolver.
    UnknownMarker(u8),
    /// The byte sequence carries a different marker than the resolver asked
    /// to decode it.
    MarkerMismatch { expected: u8, found: u8 },
    /// The datatype suffix is not a valid IRI.
    InvalidDatatype(Vec<u8>),
    /// The data segment cannot be parsed under the value's datatype.
    InvalidData { datatype: String, reason: String },
    /// The data segment contains a truncated or unknown escape pair.
    BadEscape(Vec<u8>),
}

impl fmt::Display for TypeResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeResolverError::MissingDelimiter(bytes) => {
                write!(f, "no type delimiter in {}-byte value {:?}", bytes.len(), bytes)
            }
            TypeResolverError::UnknownMarker(marker) => {
                write!(f, "no resolver registered for marker byte {}", marker)
            }
            TypeResolverError::MarkerMismatch { expected, found } => {
                write!(f, "expected marker byte {}, found {}", expected, found)
            }
            TypeResolverError::InvalidDatatype(bytes) => {
                write!(f, "datatype suffix is not a valid IRI: {:?}", bytes)
            }
            TypeResolverError::InvalidData { datatype, reason } => {
                write!(f, "cannot parse data as {}: {}", datatype, reason)
            }
            TypeResolverError::BadEscape(bytes) => {
                write!(f, "bad escape sequence in data segment {:?}", bytes)
            }
        }
    }
}

impl std::error::Error for TypeResolverError {}

/// Errors that can arise while converting a statement to rows or back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripleRowResolverError {
    /// The row does not split into the number of segments its layout and
    /// hashing mode require.
    MalformedRow {
        layout: &'static str,
        expected: usize,
        found: usize,
    },
    /// A positional value could not be encoded or decoded.
    Value(TypeResolverError),
    /// A subject, predicate or context segment is not a valid IRI.
    Iri(InvalidRyaIriError),
    /// The row's payload (statement metadata) is not valid UTF-8.
    Payload(Vec<u8>),
}

impl fmt::Display for TripleRowResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripleRowResolverError::MalformedRow {
                layout,
                expected,
                found,
            } => write!(
                f,
                "{} row has {} delimited segments, expected {}",
                layout, found, expected
            ),
            TripleRowResolverError::Value(e) => write!(f, "{}", e),
            TripleRowResolverError::Iri(e) => write!(f, "{}", e),
            TripleRowResolverError::Payload(bytes) => {
                write!(f, "statement metadata is not valid UTF-8: {:?}", bytes)
            }
        }
    }
}

impl std::error::Error for TripleRowResolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TripleRowResolverError::Value(e) => Some(e),
            TripleRowResolverError::Iri(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TypeResolverError> for TripleRowResolverError {
    fn from(e: TypeResolverError) -> Self {
        TripleRowResolverError::Value(e)
    }
}

impl From<InvalidRyaIriError> for TripleRowResolverError {
    fn from(e: InvalidRyaIriError) -> Self {
        TripleRowResolverError::Iri(e)
    }
}
