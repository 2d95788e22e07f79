//! OWL document assembly from parsed RDF statements.
//!
//! The RDF mapping of OWL reifies anonymous class expressions as blank
//! nodes: a restriction is a bnode carrying `owl:onProperty` plus a filler
//! edge, boolean expressions carry an RDF list of operands. This module
//! walks that encoding and produces the flat
//! [`OntologyDocument`](ontodex_model::OntologyDocument) the indexers
//! consume.
//!
//! Unsupported expression shapes (cardinality restrictions, hasValue, …) are
//! dropped with a debug log; everything that is neither a declaration nor a
//! structural axiom becomes an annotation assertion.

use crate::rdf::{RdfLiteral, RdfNode, RdfObject, RdfStatement};
use ontodex_model::{
    vocab, AnnotationAssertion, AnnotationValue, ClassExpression, Entity, EntityKind,
    EquivalentClassesAxiom, OntologyDocument, SubClassOfAxiom, SubPropertyOfAxiom, TermIri,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
const RDFS_SUBPROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
const RDFS_DATATYPE: &str = "http://www.w3.org/2000/01/rdf-schema#Datatype";
const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
const OWL_RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";
const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
const OWL_ANNOTATION_PROPERTY: &str = "http://www.w3.org/2002/07/owl#AnnotationProperty";
const OWL_NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";
const OWL_IMPORTS: &str = "http://www.w3.org/2002/07/owl#imports";
const OWL_VERSION_IRI: &str = "http://www.w3.org/2002/07/owl#versionIRI";
const OWL_EQUIVALENT_CLASS: &str = "http://www.w3.org/2002/07/owl#equivalentClass";
const OWL_ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";
const OWL_SOME_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#someValuesFrom";
const OWL_ALL_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#allValuesFrom";
const OWL_INTERSECTION_OF: &str = "http://www.w3.org/2002/07/owl#intersectionOf";
const OWL_UNION_OF: &str = "http://www.w3.org/2002/07/owl#unionOf";
const OWL_COMPLEMENT_OF: &str = "http://www.w3.org/2002/07/owl#complementOf";
const OWL_DISJOINT_WITH: &str = "http://www.w3.org/2002/07/owl#disjointWith";
const OWL_INVERSE_OF: &str = "http://www.w3.org/2002/07/owl#inverseOf";

/// Predicates that describe structure rather than annotate a term.
fn is_structural_predicate(iri: &str) -> bool {
    matches!(
        iri,
        RDF_TYPE
            | RDF_FIRST
            | RDF_REST
            | RDFS_SUBCLASS_OF
            | RDFS_SUBPROPERTY_OF
            | OWL_IMPORTS
            | OWL_VERSION_IRI
            | OWL_EQUIVALENT_CLASS
            | OWL_ON_PROPERTY
            | OWL_SOME_VALUES_FROM
            | OWL_ALL_VALUES_FROM
            | OWL_INTERSECTION_OF
            | OWL_UNION_OF
            | OWL_COMPLEMENT_OF
            | OWL_DISJOINT_WITH
            | OWL_INVERSE_OF
    )
}

/// Per-blank-node view of the statement list.
struct BnodeGraph<'a> {
    edges: HashMap<&'a str, Vec<(&'a str, &'a RdfObject)>>,
}

impl<'a> BnodeGraph<'a> {
    fn build(statements: &'a [RdfStatement]) -> Self {
        let mut edges: HashMap<&str, Vec<(&str, &RdfObject)>> = HashMap::new();
        for statement in statements {
            if let RdfNode::BlankNode(id) = &statement.subject {
                edges
                    .entry(id.as_str())
                    .or_default()
                    .push((statement.predicate_iri.as_str(), &statement.object));
            }
        }
        Self { edges }
    }

    fn object_of(&self, bnode: &str, predicate: &str) -> Option<&'a RdfObject> {
        self.edges
            .get(bnode)?
            .iter()
            .find(|(p, _)| *p == predicate)
            .map(|(_, o)| *o)
    }

    /// Walk an RDF list starting at `head`, cycle-safe.
    fn list_members(&self, head: &'a RdfNode) -> Vec<&'a RdfObject> {
        let mut out = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut cursor = head;
        loop {
            let id = match cursor {
                RdfNode::Iri(iri) if iri.as_str() == RDF_NIL => break,
                RdfNode::BlankNode(id) => id.as_str(),
                RdfNode::Iri(_) => break,
            };
            if !seen.insert(id) {
                debug!(bnode = id, "cyclic RDF list; truncating");
                break;
            }
            if let Some(first) = self.object_of(id, RDF_FIRST) {
                out.push(first);
            }
            match self.object_of(id, RDF_REST) {
                Some(RdfObject::Node(next)) => cursor = next,
                _ => break,
            }
        }
        out
    }

    /// Resolve a blank node into a class expression, when its shape is one we
    /// understand.
    fn expression(&self, bnode: &str, visited: &mut HashSet<String>) -> Option<ClassExpression> {
        if !visited.insert(bnode.to_string()) {
            debug!(bnode, "cyclic class expression; dropping");
            return None;
        }

        if let Some(RdfObject::Node(RdfNode::Iri(property))) = self.object_of(bnode, OWL_ON_PROPERTY)
        {
            if let Some(filler) = self.object_of(bnode, OWL_SOME_VALUES_FROM) {
                let filler = self.expression_from_object(filler, visited)?;
                return Some(ClassExpression::SomeValuesFrom {
                    property: TermIri::from(property.as_str()),
                    filler: Box::new(filler),
                });
            }
            if let Some(filler) = self.object_of(bnode, OWL_ALL_VALUES_FROM) {
                let filler = self.expression_from_object(filler, visited)?;
                return Some(ClassExpression::AllValuesFrom {
                    property: TermIri::from(property.as_str()),
                    filler: Box::new(filler),
                });
            }
        }

        if let Some(RdfObject::Node(head)) = self.object_of(bnode, OWL_INTERSECTION_OF) {
            let operands = self.expression_list(head, visited);
            if !operands.is_empty() {
                return Some(ClassExpression::IntersectionOf(operands));
            }
        }
        if let Some(RdfObject::Node(head)) = self.object_of(bnode, OWL_UNION_OF) {
            let operands = self.expression_list(head, visited);
            if !operands.is_empty() {
                return Some(ClassExpression::UnionOf(operands));
            }
        }
        if let Some(operand) = self.object_of(bnode, OWL_COMPLEMENT_OF) {
            let operand = self.expression_from_object(operand, visited)?;
            return Some(ClassExpression::ComplementOf(Box::new(operand)));
        }

        debug!(bnode, "unsupported class expression shape; dropping");
        None
    }

    fn expression_from_object(
        &self,
        object: &RdfObject,
        visited: &mut HashSet<String>,
    ) -> Option<ClassExpression> {
        match object {
            RdfObject::Node(RdfNode::Iri(iri)) => {
                Some(ClassExpression::Named(TermIri::from(iri.as_str())))
            }
            RdfObject::Node(RdfNode::BlankNode(id)) => self.expression(id, visited),
            RdfObject::Literal(_) => None,
        }
    }

    fn expression_list(
        &self,
        head: &'a RdfNode,
        visited: &mut HashSet<String>,
    ) -> Vec<ClassExpression> {
        self.list_members(head)
            .into_iter()
            .filter_map(|member| self.expression_from_object(member, visited))
            .collect()
    }
}

fn annotation_value(object: &RdfObject) -> Option<AnnotationValue> {
    match object {
        RdfObject::Node(RdfNode::Iri(iri)) => Some(AnnotationValue::Iri(TermIri::from(iri.as_str()))),
        RdfObject::Node(RdfNode::BlankNode(_)) => None,
        RdfObject::Literal(RdfLiteral {
            lexical,
            datatype,
            language,
        }) => Some(AnnotationValue::Literal {
            lexical: lexical.clone(),
            language: language.clone(),
            datatype: datatype.as_deref().map(TermIri::from),
        }),
    }
}

/// Assemble an [`OntologyDocument`] from a flat statement list.
pub fn document_from_statements(statements: &[RdfStatement]) -> OntologyDocument {
    let bnodes = BnodeGraph::build(statements);
    let mut document = OntologyDocument::default();
    let mut declared: HashSet<&str> = HashSet::new();

    for statement in statements {
        let RdfNode::Iri(subject) = &statement.subject else {
            continue; // blank-node subjects are reached through the bnode graph
        };
        let subject_iri = TermIri::from(subject.as_str());
        let predicate = statement.predicate_iri.as_str();

        match predicate {
            RDF_TYPE => {
                let RdfObject::Node(RdfNode::Iri(type_iri)) = &statement.object else {
                    continue;
                };
                let kind = match type_iri.as_str() {
                    OWL_ONTOLOGY => {
                        if document.iri.is_none() {
                            document.iri = Some(subject_iri);
                        }
                        continue;
                    }
                    OWL_CLASS => Some(EntityKind::Class),
                    OWL_OBJECT_PROPERTY => Some(EntityKind::ObjectProperty),
                    OWL_DATATYPE_PROPERTY => Some(EntityKind::DataProperty),
                    OWL_ANNOTATION_PROPERTY => Some(EntityKind::AnnotationProperty),
                    OWL_NAMED_INDIVIDUAL => Some(EntityKind::NamedIndividual),
                    RDFS_DATATYPE | OWL_RESTRICTION => None,
                    other => {
                        // a named, non-vocabulary type is a class assertion on
                        // an individual
                        if other.starts_with(vocab::OWL_NS)
                            || other.starts_with(vocab::RDF_NS)
                            || other.starts_with(vocab::RDFS_NS)
                        {
                            None
                        } else {
                            Some(EntityKind::NamedIndividual)
                        }
                    }
                };
                if let Some(kind) = kind {
                    if declared.insert(subject.as_str()) {
                        document.declarations.push(Entity::new(subject_iri, kind));
                    }
                }
            }
            OWL_IMPORTS => {
                if let RdfObject::Node(RdfNode::Iri(import)) = &statement.object {
                    document.imports.push(TermIri::from(import.as_str()));
                }
            }
            OWL_VERSION_IRI => {
                if let RdfObject::Node(RdfNode::Iri(version)) = &statement.object {
                    document.version_iri = Some(TermIri::from(version.as_str()));
                }
            }
            RDFS_SUBCLASS_OF => match &statement.object {
                RdfObject::Node(RdfNode::Iri(superclass)) => {
                    document.subclass_axioms.push(SubClassOfAxiom {
                        subject: subject_iri,
                        superclass: ClassExpression::Named(TermIri::from(superclass.as_str())),
                    });
                }
                RdfObject::Node(RdfNode::BlankNode(id)) => {
                    let mut visited = HashSet::new();
                    if let Some(superclass) = bnodes.expression(id, &mut visited) {
                        document
                            .subclass_axioms
                            .push(SubClassOfAxiom {
                                subject: subject_iri,
                                superclass,
                            });
                    }
                }
                RdfObject::Literal(_) => {}
            },
            OWL_EQUIVALENT_CLASS => match &statement.object {
                RdfObject::Node(RdfNode::Iri(other)) => {
                    document.equivalence_axioms.push(EquivalentClassesAxiom {
                        subject: subject_iri,
                        expression: ClassExpression::Named(TermIri::from(other.as_str())),
                    });
                }
                RdfObject::Node(RdfNode::BlankNode(id)) => {
                    let mut visited = HashSet::new();
                    if let Some(expression) = bnodes.expression(id, &mut visited) {
                        document
                            .equivalence_axioms
                            .push(EquivalentClassesAxiom {
                                subject: subject_iri,
                                expression,
                            });
                    }
                }
                RdfObject::Literal(_) => {}
            },
            RDFS_SUBPROPERTY_OF => {
                if let RdfObject::Node(RdfNode::Iri(super_property)) = &statement.object {
                    document.subproperty_axioms.push(SubPropertyOfAxiom {
                        subject: subject_iri,
                        super_property: TermIri::from(super_property.as_str()),
                    });
                }
            }
            _ if is_structural_predicate(predicate) => {}
            _ => {
                if let Some(value) = annotation_value(&statement.object) {
                    document.annotations.push(AnnotationAssertion {
                        subject: subject_iri,
                        property: TermIri::from(predicate),
                        value,
                    });
                }
            }
        }
    }

    document
}
