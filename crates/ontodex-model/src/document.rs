//! Parsed ontology documents and their import closure.
//!
//! An [`OntologyDocument`] is what a loader hands the indexing engine: the
//! declared entity signature plus the asserted axioms the indexers consume
//! (annotation assertions, subclass axioms, equivalent-class axioms). The
//! [`ImportClosure`] groups the root document with every resolved import and
//! exposes combined views across all of them.

use crate::entity::{Entity, EntityKind};
use crate::iri::TermIri;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The value of an annotation assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationValue {
    Iri(TermIri),
    Literal {
        lexical: String,
        language: Option<String>,
        datatype: Option<TermIri>,
    },
}

impl AnnotationValue {
    pub fn literal(lexical: impl Into<String>) -> Self {
        Self::Literal {
            lexical: lexical.into(),
            language: None,
            datatype: None,
        }
    }
}

/// `subject property value`, asserted on a named entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationAssertion {
    pub subject: TermIri,
    pub property: TermIri,
    pub value: AnnotationValue,
}

/// A class expression as it appears on the right-hand side of an axiom.
///
/// `Named` is the only non-anonymous shape; everything else is rendered to a
/// display string by an [`crate::render::ExpressionRenderer`] rather than
/// resolved to an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassExpression {
    Named(TermIri),
    SomeValuesFrom {
        property: TermIri,
        filler: Box<ClassExpression>,
    },
    AllValuesFrom {
        property: TermIri,
        filler: Box<ClassExpression>,
    },
    IntersectionOf(Vec<ClassExpression>),
    UnionOf(Vec<ClassExpression>),
    ComplementOf(Box<ClassExpression>),
}

impl ClassExpression {
    pub fn is_anonymous(&self) -> bool {
        !matches!(self, ClassExpression::Named(_))
    }

    pub fn as_named(&self) -> Option<&TermIri> {
        match self {
            ClassExpression::Named(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn some(property: impl Into<TermIri>, filler: ClassExpression) -> Self {
        ClassExpression::SomeValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    pub fn named(iri: impl Into<TermIri>) -> Self {
        ClassExpression::Named(iri.into())
    }
}

/// `subject subClassOf superclass`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubClassOfAxiom {
    pub subject: TermIri,
    pub superclass: ClassExpression,
}

/// `subject equivalentTo expression`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalentClassesAxiom {
    pub subject: TermIri,
    pub expression: ClassExpression,
}

/// `subject subPropertyOf super_property`, named properties only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPropertyOfAxiom {
    pub subject: TermIri,
    pub super_property: TermIri,
}

/// One parsed ontology document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OntologyDocument {
    pub iri: Option<TermIri>,
    pub version_iri: Option<TermIri>,
    /// Logical IRIs of directly imported ontologies.
    pub imports: Vec<TermIri>,
    pub declarations: Vec<Entity>,
    pub annotations: Vec<AnnotationAssertion>,
    pub subclass_axioms: Vec<SubClassOfAxiom>,
    pub equivalence_axioms: Vec<EquivalentClassesAxiom>,
    pub subproperty_axioms: Vec<SubPropertyOfAxiom>,
}

impl OntologyDocument {
    pub fn new(iri: Option<TermIri>) -> Self {
        Self {
            iri,
            ..Default::default()
        }
    }
}

/// A root document plus every resolved import, with combined views.
///
/// A closure always contains at least its root document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportClosure {
    documents: Vec<OntologyDocument>,
}

impl ImportClosure {
    pub fn new(root: OntologyDocument) -> Self {
        Self {
            documents: vec![root],
        }
    }

    pub fn push(&mut self, document: OntologyDocument) {
        self.documents.push(document);
    }

    pub fn root(&self) -> &OntologyDocument {
        &self.documents[0]
    }

    pub fn documents(&self) -> &[OntologyDocument] {
        &self.documents
    }

    /// The combined entity signature, deduplicated by IRI.
    ///
    /// Kind is immutable once observed: if two documents declare the same IRI
    /// with different kinds, the first declaration wins.
    pub fn signature(&self) -> Vec<Entity> {
        let mut seen: HashMap<&TermIri, EntityKind> = HashMap::new();
        let mut out = Vec::new();
        for document in &self.documents {
            for entity in &document.declarations {
                if seen.insert(&entity.iri, entity.kind).is_none() {
                    out.push(entity.clone());
                }
            }
        }
        out
    }

    /// All annotation assertions on `subject`, across the whole closure.
    pub fn annotations_for<'a>(
        &'a self,
        subject: &'a TermIri,
    ) -> impl Iterator<Item = &'a AnnotationAssertion> {
        self.documents
            .iter()
            .flat_map(|d| d.annotations.iter())
            .filter(move |a| &a.subject == subject)
    }

    /// Asserted superclass expressions of `subject`, across the closure.
    pub fn superclass_expressions<'a>(
        &'a self,
        subject: &'a TermIri,
    ) -> impl Iterator<Item = &'a ClassExpression> {
        self.documents
            .iter()
            .flat_map(|d| d.subclass_axioms.iter())
            .filter(move |ax| &ax.subject == subject)
            .map(|ax| &ax.superclass)
    }

    /// Asserted equivalent-class expressions of `subject`, across the closure.
    pub fn equivalent_expressions<'a>(
        &'a self,
        subject: &'a TermIri,
    ) -> impl Iterator<Item = &'a ClassExpression> {
        self.documents
            .iter()
            .flat_map(|d| d.equivalence_axioms.iter())
            .filter(move |ax| &ax.subject == subject)
            .map(|ax| &ax.expression)
    }

    /// Asserted named super-properties of `subject`, across the closure.
    pub fn super_properties<'a>(
        &'a self,
        subject: &'a TermIri,
    ) -> impl Iterator<Item = &'a TermIri> {
        self.documents
            .iter()
            .flat_map(|d| d.subproperty_axioms.iter())
            .filter(move |ax| &ax.subject == subject)
            .map(|ax| &ax.super_property)
    }

    /// Literal values asserted for `property` on any subject, used to seed
    /// display-label providers. Last assertion wins per subject.
    pub fn literal_assertions(&self, property: &TermIri) -> HashMap<TermIri, String> {
        let mut out = HashMap::new();
        for document in &self.documents {
            for annotation in &document.annotations {
                if &annotation.property != property {
                    continue;
                }
                if let AnnotationValue::Literal { lexical, .. } = &annotation.value {
                    out.insert(annotation.subject.clone(), lexical.clone());
                }
            }
        }
        out
    }
}
