//! Conversions between the oxigraph term model and the Rya value model.
//!
//! Upstream loaders parse RDF with oxigraph and hand terms to this crate
//! for encoding; scan results convert back the other way. Blank nodes are
//! carried as `_:label` identifiers; language-tagged literals map to
//! `rdf:langString` with the lexical form as data.

use crate::consts::{RDF_LANG_STRING, XSD_STRING};
use crate::error::InvalidRyaIriError;
use crate::model::{RyaIri, RyaStatement, RyaType};
use oxigraph::model::{
    BlankNode, GraphName, Literal, NamedNode, Quad, Subject, Term,
};

/// Convert an oxigraph subject (named or blank node) into an IRI value.
pub fn subject_to_iri(subject: &Subject) -> Result<RyaIri, InvalidRyaIriError> {
    match subject {
        Subject::NamedNode(node) => Ok(node.clone().into()),
        Subject::BlankNode(node) => RyaIri::new(format!("_:{}", node.as_str())),
        _ => Err(InvalidRyaIriError {
            iri: subject.to_string(),
        }),
    }
}

/// Convert an oxigraph term into a Rya typed value.
pub fn term_to_rya(term: &Term) -> Result<RyaType, InvalidRyaIriError> {
    match term {
        Term::NamedNode(node) => Ok(RyaIri::from(node.clone()).into()),
        Term::BlankNode(node) => Ok(RyaIri::new(format!("_:{}", node.as_str()))?.into()),
        Term::Literal(literal) => Ok(literal_to_rya(literal)),
        _ => Err(InvalidRyaIriError {
            iri: term.to_string(),
        }),
    }
}

/// Convert an oxigraph literal into a Rya typed value.
pub fn literal_to_rya(literal: &Literal) -> RyaType {
    if literal.language().is_some() {
        // the language tag is not carried; see DESIGN.md
        RyaType::new(RDF_LANG_STRING.into(), literal.value())
    } else {
        RyaType::new(literal.datatype().into(), literal.value())
    }
}

/// Convert a Rya typed value back into an oxigraph term.
pub fn rya_to_term(value: &RyaType) -> Result<Term, InvalidRyaIriError> {
    if value.is_iri() {
        let iri = RyaIri::new(value.data())?;
        return Ok(if let Some(label) = iri.as_str().strip_prefix("_:") {
            BlankNode::new(label)
                .map_err(|_| InvalidRyaIriError {
                    iri: iri.as_str().to_string(),
                })?
                .into()
        } else {
            iri_to_named(&iri)?.into()
        });
    }
    if value.datatype().as_str() == XSD_STRING.as_str() {
        return Ok(Literal::new_simple_literal(value.data()).into());
    }
    let datatype =
        NamedNode::new(value.datatype().as_str()).map_err(|_| InvalidRyaIriError {
            iri: value.datatype().as_str().to_string(),
        })?;
    Ok(Literal::new_typed_literal(value.data(), datatype).into())
}

/// Convert an IRI value into an oxigraph subject, resurrecting `_:label`
/// identifiers as blank nodes.
pub fn iri_to_subject(iri: &RyaIri) -> Result<Subject, InvalidRyaIriError> {
    if let Some(label) = iri.as_str().strip_prefix("_:") {
        let node = BlankNode::new(label).map_err(|_| InvalidRyaIriError {
            iri: iri.as_str().to_string(),
        })?;
        Ok(node.into())
    } else {
        let node = NamedNode::new(iri.as_str()).map_err(|_| InvalidRyaIriError {
            iri: iri.as_str().to_string(),
        })?;
        Ok(node.into())
    }
}

fn iri_to_named(iri: &RyaIri) -> Result<NamedNode, InvalidRyaIriError> {
    NamedNode::new(iri.as_str()).map_err(|_| InvalidRyaIriError {
        iri: iri.as_str().to_string(),
    })
}

/// Convert an oxigraph quad into a Rya statement with default payload
/// fields. The default graph maps to an absent context.
pub fn quad_to_statement(quad: &Quad) -> Result<RyaStatement, InvalidRyaIriError> {
    let subject = subject_to_iri(&quad.subject)?;
    let predicate: RyaIri = quad.predicate.clone().into();
    let object = term_to_rya(&quad.object)?;
    let statement = RyaStatement::new(subject, predicate, object);
    Ok(match &quad.graph_name {
        GraphName::DefaultGraph => statement,
        GraphName::NamedNode(node) => statement.with_context(node.clone().into()),
        GraphName::BlankNode(node) => {
            statement.with_context(RyaIri::new(format!("_:{}", node.as_str()))?)
        }
    })
}

/// Convert a Rya statement back into an oxigraph quad. Payload fields
/// (visibility, timestamp, metadata) have no quad counterpart and are
/// dropped.
pub fn statement_to_quad(statement: &RyaStatement) -> Result<Quad, InvalidRyaIriError> {
    let subject = iri_to_subject(statement.subject())?;
    let predicate = iri_to_named(statement.predicate())?;
    let object = rya_to_term(statement.object())?;
    let graph_name = match statement.context() {
        None => GraphName::DefaultGraph,
        Some(context) => {
            if let Some(label) = context.as_str().strip_prefix("_:") {
                GraphName::BlankNode(BlankNode::new(label).map_err(|_| {
                    InvalidRyaIriError {
                        iri: context.as_str().to_string(),
                    }
                })?)
            } else {
                GraphName::NamedNode(iri_to_named(context)?)
            }
        }
    };
    Ok(Quad::new(subject, predicate, object, graph_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::vocab::xsd;

    #[test]
    fn named_node_roundtrip() {
        let node = NamedNode::new("urn:test#1234").unwrap();
        let value = term_to_rya(&Term::from(node.clone())).unwrap();
        assert!(value.is_iri());
        assert_eq!(value.data(), "urn:test#1234");
        assert_eq!(rya_to_term(&value).unwrap(), Term::from(node));
    }

    #[test]
    fn simple_literal_roundtrip() {
        let literal = Literal::new_simple_literal("mydata");
        let value = term_to_rya(&Term::from(literal.clone())).unwrap();
        assert_eq!(value.datatype().as_str(), xsd::STRING.as_str());
        assert_eq!(rya_to_term(&value).unwrap(), Term::from(literal));
    }

    #[test]
    fn typed_literal_roundtrip() {
        let datatype = NamedNode::new("urn:test#customDataType").unwrap();
        let literal = Literal::new_typed_literal("mydata", datatype);
        let value = term_to_rya(&Term::from(literal.clone())).unwrap();
        assert_eq!(value.datatype().as_str(), "urn:test#customDataType");
        assert_eq!(rya_to_term(&value).unwrap(), Term::from(literal));
    }

    #[test]
    fn blank_node_roundtrip() {
        let node = BlankNode::new("b0").unwrap();
        let value = term_to_rya(&Term::from(node.clone())).unwrap();
        assert_eq!(value.data(), "_:b0");
        assert_eq!(rya_to_term(&value).unwrap(), Term::from(node));
    }

    #[test]
    fn quad_roundtrip_with_named_graph() {
        let quad = Quad::new(
            NamedNode::new("urn:test#subj").unwrap(),
            NamedNode::new("urn:test#pred").unwrap(),
            Literal::new_simple_literal("mydata"),
            NamedNode::new("urn:test#context").unwrap(),
        );
        let statement = quad_to_statement(&quad).unwrap();
        assert_eq!(statement.context().unwrap().as_str(), "urn:test#context");
        assert_eq!(statement_to_quad(&statement).unwrap(), quad);
    }

    #[test]
    fn default_graph_maps_to_no_context() {
        let quad = Quad::new(
            NamedNode::new("urn:test#subj").unwrap(),
            NamedNode::new("urn:test#pred").unwrap(),
            Literal::new_simple_literal("mydata"),
            GraphName::DefaultGraph,
        );
        let statement = quad_to_statement(&quad).unwrap();
        assert!(statement.context().is_none());
        assert_eq!(statement_to_quad(&statement).unwrap(), quad);
    }
}
