//! Per-datatype codecs behind a closed marker-byte dispatch.
//!
//! Every encoded value ends with a fixed-format suffix: a type delimiter,
//! the datatype IRI, another type delimiter, and a one-byte marker naming
//! the codec that produced the data segment:
//!
//! `[escaped data] 0x01 [datatype IRI utf8] 0x01 [marker]`
//!
//! Data segments are escaped (see [`crate::escape`]) so they never contain
//! a delimiter byte, and each codec's output sorts byte-wise the way its
//! value domain sorts: text lexicographically, integers and dateTimes
//! numerically via a sign-bit flip, floats via the IEEE total-order
//! transform. The datatype IRI is stored verbatim, so a value routed to a
//! compact codec keeps its exact datatype on decode.

use crate::consts::{
    TYPE_DELIM, XSD_ANY_URI, XSD_BOOLEAN, XSD_BYTE, XSD_DATE_TIME, XSD_DOUBLE, XSD_FLOAT, XSD_INT,
    XSD_LONG, XSD_SHORT, XSD_STRING,
};
use crate::error::TypeResolverError;
use crate::escape;
use crate::model::{RyaIri, RyaType};
use chrono::{DateTime, SecondsFormat, Utc};
use oxigraph::model::NamedNodeRef;
use std::fmt;
use std::str::FromStr;

/// The two halves of an encoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueEncoding {
    /// Codec-specific, escaped encoding of the value's lexical form.
    pub data: Vec<u8>,
    /// Type delimiter + datatype IRI + type delimiter + marker byte.
    pub type_suffix: Vec<u8>,
}

impl ValueEncoding {
    /// Concatenate the two halves into the stored form.
    pub fn into_single(mut self) -> Vec<u8> {
        self.data.extend_from_slice(&self.type_suffix);
        self.data
    }
}

/// Enumerates the registered codecs; discriminants are the marker bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Resolver {
    /// IRI values (`xsd:anyURI`).
    Iri = 2,
    /// Plain text literals (`xsd:string`).
    Text = 3,
    /// `xsd:long`.
    Long = 4,
    /// `xsd:int`.
    Int = 5,
    /// `xsd:double`.
    Double = 6,
    /// `xsd:dateTime`.
    DateTime = 7,
    /// Catch-all for datatypes without a dedicated codec.
    Custom = 8,
    /// `xsd:boolean`.
    Boolean = 9,
    /// `xsd:byte`.
    Byte = 10,
    /// `xsd:short`.
    Short = 11,
    /// `xsd:float`.
    Float = 12,
}

impl Resolver {
    /// Every registered codec.
    pub const ALL: [Resolver; 11] = [
        Resolver::Iri,
        Resolver::Text,
        Resolver::Long,
        Resolver::Int,
        Resolver::Double,
        Resolver::DateTime,
        Resolver::Custom,
        Resolver::Boolean,
        Resolver::Byte,
        Resolver::Short,
        Resolver::Float,
    ];

    /// Convert a marker byte back into a codec, if registered.
    pub fn from_marker(v: u8) -> Option<Self> {
        use Resolver::*;
        Some(match v {
            2 => Iri,
            3 => Text,
            4 => Long,
            5 => Int,
            6 => Double,
            7 => DateTime,
            8 => Custom,
            9 => Boolean,
            10 => Byte,
            11 => Short,
            12 => Float,
            _ => return None,
        })
    }

    /// The marker byte emitted at the end of this codec's encodings.
    pub fn marker(self) -> u8 {
        self as u8
    }

    /// The datatype this codec is dedicated to, or `None` for the
    /// catch-all.
    pub fn datatype(self) -> Option<NamedNodeRef<'static>> {
        match self {
            Resolver::Iri => Some(XSD_ANY_URI),
            Resolver::Text => Some(XSD_STRING),
            Resolver::Long => Some(XSD_LONG),
            Resolver::Int => Some(XSD_INT),
            Resolver::Double => Some(XSD_DOUBLE),
            Resolver::DateTime => Some(XSD_DATE_TIME),
            Resolver::Custom => None,
            Resolver::Boolean => Some(XSD_BOOLEAN),
            Resolver::Byte => Some(XSD_BYTE),
            Resolver::Short => Some(XSD_SHORT),
            Resolver::Float => Some(XSD_FLOAT),
        }
    }

    /// Encode `value` into its data and suffix halves.
    pub fn serialize(self, value: &RyaType) -> Result<ValueEncoding, TypeResolverError> {
        let data = self.encode_data(value)?;
        Ok(ValueEncoding {
            data,
            type_suffix: type_suffix(value.datatype(), self.marker()),
        })
    }

    /// Encode `value` into a single byte sequence.
    pub fn serialize_single(self, value: &RyaType) -> Result<Vec<u8>, TypeResolverError> {
        Ok(self.serialize(value)?.into_single())
    }

    /// True if `bytes` ends in a well-formed suffix carrying this codec's
    /// marker.
    pub fn deserializable(self, bytes: &[u8]) -> bool {
        matches!(split_encoded(bytes), Ok(parts) if parts.marker == self.marker())
    }

    /// Decode a byte sequence produced by [`Resolver::serialize_single`].
    pub fn deserialize(self, bytes: &[u8]) -> Result<RyaType, TypeResolverError> {
        let parts = split_encoded(bytes)?;
        if parts.marker != self.marker() {
            return Err(TypeResolverError::MarkerMismatch {
                expected: self.marker(),
                found: parts.marker,
            });
        }
        let datatype = parse_datatype(parts.datatype)?;
        let raw = escape::unescape(parts.data)?;
        let data = self.decode_data(&raw, &datatype)?;
        Ok(RyaType::new(datatype, data))
    }

    fn encode_data(self, value: &RyaType) -> Result<Vec<u8>, TypeResolverError> {
        let raw = match self {
            Resolver::Iri | Resolver::Text | Resolver::Custom => {
                value.data().as_bytes().to_vec()
            }
            Resolver::Boolean => vec![parse_lexical::<bool>(value)? as u8],
            Resolver::Byte => vec![parse_lexical::<i8>(value)? as u8 ^ 0x80],
            Resolver::Short => ((parse_lexical::<i16>(value)? as u16) ^ 0x8000)
                .to_be_bytes()
                .to_vec(),
            Resolver::Int => ((parse_lexical::<i32>(value)? as u32) ^ 0x8000_0000)
                .to_be_bytes()
                .to_vec(),
            Resolver::Long => ((parse_lexical::<i64>(value)? as u64) ^ (1 << 63))
                .to_be_bytes()
                .to_vec(),
            Resolver::Float => order_f32(parse_lexical::<f32>(value)?).to_vec(),
            Resolver::Double => order_f64(parse_lexical::<f64>(value)?).to_vec(),
            Resolver::DateTime => {
                let parsed =
                    DateTime::parse_from_rfc3339(value.data()).map_err(|e| {
                        TypeResolverError::InvalidData {
                            datatype: value.datatype().to_string(),
                            reason: e.to_string(),
                        }
                    })?;
                let millis = parsed.with_timezone(&Utc).timestamp_millis();
                ((millis as u64) ^ (1 << 63)).to_be_bytes().to_vec()
            }
        };
        Ok(escape::escape(&raw))
    }

    fn decode_data(self, raw: &[u8], datatype: &RyaIri) -> Result<String, TypeResolverError> {
        match self {
            Resolver::Iri | Resolver::Text | Resolver::Custom => String::from_utf8(raw.to_vec())
                .map_err(|_| TypeResolverError::InvalidData {
                    datatype: datatype.to_string(),
                    reason: "data is not valid UTF-8".to_string(),
                }),
            Resolver::Boolean => match raw {
                [0] => Ok("false".to_string()),
                [1] => Ok("true".to_string()),
                _ => Err(TypeResolverError::InvalidData {
                    datatype: datatype.to_string(),
                    reason: "expected a single 0/1 byte".to_string(),
                }),
            },
            Resolver::Byte => {
                let bytes = fixed_bytes::<1>(raw, datatype)?;
                Ok(((bytes[0] ^ 0x80) as i8).to_string())
            }
            Resolver::Short => {
                let bytes = fixed_bytes::<2>(raw, datatype)?;
                Ok(((u16::from_be_bytes(bytes) ^ 0x8000) as i16).to_string())
            }
            Resolver::Int => {
                let bytes = fixed_bytes::<4>(raw, datatype)?;
                Ok(((u32::from_be_bytes(bytes) ^ 0x8000_0000) as i32).to_string())
            }
            Resolver::Long => {
                let bytes = fixed_bytes::<8>(raw, datatype)?;
                Ok(((u64::from_be_bytes(bytes) ^ (1 << 63)) as i64).to_string())
            }
            Resolver::Float => {
                let bytes = fixed_bytes::<4>(raw, datatype)?;
                Ok(unorder_f32(bytes).to_string())
            }
            Resolver::Double => {
                let bytes = fixed_bytes::<8>(raw, datatype)?;
                Ok(unorder_f64(bytes).to_string())
            }
            Resolver::DateTime => {
                let bytes = fixed_bytes::<8>(raw, datatype)?;
                let millis = (u64::from_be_bytes(bytes) ^ (1 << 63)) as i64;
                let when = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
                    TypeResolverError::InvalidData {
                        datatype: datatype.to_string(),
                        reason: format!("timestamp {} out of range", millis),
                    }
                })?;
                Ok(when.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
        }
    }
}

impl fmt::Display for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.datatype() {
            Some(dt) => write!(f, "{}", dt.as_str()),
            None => write!(f, "custom"),
        }
    }
}

struct EncodedParts<'a> {
    data: &'a [u8],
    datatype: &'a [u8],
    marker: u8,
}

/// Split an encoded value into data, datatype and marker.
///
/// The suffix is located from the end: the marker is the final byte, the
/// delimiter before it sits at a fixed offset, and the datatype runs back
/// to the last type delimiter. Datatype IRIs never contain delimiter
/// bytes, so the right-to-left scan cannot land inside the data segment.
fn split_encoded(bytes: &[u8]) -> Result<EncodedParts<'_>, TypeResolverError> {
    if bytes.len() < 3 || bytes[bytes.len() - 2] != TYPE_DELIM {
        return Err(TypeResolverError::MissingDelimiter(bytes.to_vec()));
    }
    let marker = bytes[bytes.len() - 1];
    let body = &bytes[..bytes.len() - 2];
    let sep = body
        .iter()
        .rposition(|&b| b == TYPE_DELIM)
        .ok_or_else(|| TypeResolverError::MissingDelimiter(bytes.to_vec()))?;
    Ok(EncodedParts {
        data: &body[..sep],
        datatype: &body[sep + 1..],
        marker,
    })
}

fn type_suffix(datatype: &RyaIri, marker: u8) -> Vec<u8> {
    let iri = datatype.as_str().as_bytes();
    let mut out = Vec::with_capacity(iri.len() + 3);
    out.push(TYPE_DELIM);
    out.extend_from_slice(iri);
    out.push(TYPE_DELIM);
    out.push(marker);
    out
}

fn parse_datatype(bytes: &[u8]) -> Result<RyaIri, TypeResolverError> {
    let iri = std::str::from_utf8(bytes)
        .map_err(|_| TypeResolverError::InvalidDatatype(bytes.to_vec()))?;
    RyaIri::new(iri).map_err(|_| TypeResolverError::InvalidDatatype(bytes.to_vec()))
}

fn parse_lexical<T>(value: &RyaType) -> Result<T, TypeResolverError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .data()
        .parse::<T>()
        .map_err(|e| TypeResolverError::InvalidData {
            datatype: value.datatype().to_string(),
            reason: e.to_string(),
        })
}

fn fixed_bytes<const N: usize>(
    raw: &[u8],
    datatype: &RyaIri,
) -> Result<[u8; N], TypeResolverError> {
    raw.try_into().map_err(|_| TypeResolverError::InvalidData {
        datatype: datatype.to_string(),
        reason: format!("expected {} data bytes, found {}", N, raw.len()),
    })
}

// IEEE-754 total-order transform: negative values bit-flip entirely,
// non-negative values flip the sign bit, so the byte form sorts
// numerically.
fn order_f32(v: f32) -> [u8; 4] {
    let bits = v.to_bits();
    let bits = if bits & 0x8000_0000 != 0 {
        !bits
    } else {
        bits ^ 0x8000_0000
    };
    bits.to_be_bytes()
}

fn unorder_f32(bytes: [u8; 4]) -> f32 {
    let bits = u32::from_be_bytes(bytes);
    let bits = if bits & 0x8000_0000 != 0 {
        bits ^ 0x8000_0000
    } else {
        !bits
    };
    f32::from_bits(bits)
}

fn order_f64(v: f64) -> [u8; 8] {
    let bits = v.to_bits();
    let bits = if bits & (1 << 63) != 0 {
        !bits
    } else {
        bits ^ (1 << 63)
    };
    bits.to_be_bytes()
}

fn unorder_f64(bytes: [u8; 8]) -> f64 {
    let bits = u64::from_be_bytes(bytes);
    let bits = if bits & (1 << 63) != 0 {
        bits ^ (1 << 63)
    } else {
        !bits
    };
    f64::from_bits(bits)
}
