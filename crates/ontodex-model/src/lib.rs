//! Ontodex core model
//!
//! This crate defines the shared vocabulary of the Ontodex workspace:
//!
//! - [`TermIri`] and the identifier resolver (short forms, legacy
//!   `PREFIX:NUMBER` ids)
//! - the entity/document model produced by a loader
//!   ([`Entity`], [`OntologyDocument`], [`ImportClosure`])
//! - class expressions ([`ClassExpression`]) and the
//!   [`ExpressionRenderer`] capability with a Manchester-style default
//! - the immutable [`SourceConfig`] describing one ontology source
//! - the [`OntologyLoader`] capability boundary
//!
//! Everything here is plain data; the indexing pass itself lives in
//! `ontodex-index`.

pub mod config;
pub mod document;
pub mod entity;
pub mod iri;
pub mod loader;
pub mod render;
pub mod vocab;

pub use config::{ConfigError, SourceConfig};
pub use document::{
    AnnotationAssertion, AnnotationValue, ClassExpression, EquivalentClassesAxiom, ImportClosure,
    OntologyDocument, SubClassOfAxiom, SubPropertyOfAxiom,
};
pub use entity::{Entity, EntityKind};
pub use iri::{derive_obo_id, extract_short_form, TermIri};
pub use loader::{LoadError, OntologyLoader};
pub use render::{ExpressionRenderer, ManchesterRenderer};
