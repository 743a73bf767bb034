//! Defines constant NamedNodeRefs for the datatypes with dedicated codecs,
//! plus the reserved bytes of the row format.

use oxigraph::model::NamedNodeRef;

pub const XSD_ANY_URI: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#anyURI");
pub const XSD_STRING: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#string");
pub const XSD_BOOLEAN: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#boolean");
pub const XSD_BYTE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#byte");
pub const XSD_SHORT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#short");
pub const XSD_INT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#int");
pub const XSD_LONG: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#long");
pub const XSD_FLOAT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#float");
pub const XSD_DOUBLE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#double");
pub const XSD_DATE_TIME: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#dateTime");
pub const RDF_LANG_STRING: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#langString");

/// Separates the positional segments of a row key.
pub const ROW_DELIM: u8 = 0x00;
/// Separates a value's data bytes from its datatype suffix, and the suffix
/// from the trailing marker byte.
pub const TYPE_DELIM: u8 = 0x01;
/// Introduces a two-byte escape pair inside data segments.
pub const ESCAPE: u8 = 0x02;

/// Default prefix for the physical table names.
pub const DEFAULT_TABLE_PREFIX: &str = "rya_";

/// Width in characters of the hex hash prepended to row keys in hashed mode.
pub const HASH_PREFIX_LEN: usize = 16;
