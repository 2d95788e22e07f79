//! Entities: a term identifier plus an immutable kind tag.

use crate::iri::TermIri;
use serde::{Deserialize, Serialize};

/// The kind of a declared ontology entity.
///
/// Datatype declarations are deliberately absent: the loader drops them, the
/// index never records them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Class,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    NamedIndividual,
}

/// A uniquely identified element of an ontology.
///
/// Identity is by IRI equality; the kind is fixed at first observation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub iri: TermIri,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(iri: impl Into<TermIri>, kind: EntityKind) -> Self {
        Self {
            iri: iri.into(),
            kind,
        }
    }
}
