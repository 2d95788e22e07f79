//! Reasoner capability boundary.
//!
//! The indexing engine drives a description-logic reasoner through five
//! queries, each over named classes only:
//!
//! - direct / transitive subclasses
//! - direct / transitive superclasses
//! - equivalent classes
//!
//! Classification itself is an external concern. This crate defines the
//! capability traits plus [`StructuralReasoner`], a told-subsumption
//! implementation over the asserted axioms of an import closure, which is the
//! default provider when no full DL reasoner is wired in.

pub mod structural;

pub use structural::{StructuralReasoner, StructuralReasonerProvider};

use ontodex_model::{ImportClosure, TermIri};
use std::collections::BTreeSet;
use thiserror::Error;

/// Degraded, per-entity reasoner failures. The engine logs these and omits
/// the affected class's edges.
#[derive(Debug, Error)]
pub enum ReasonerError {
    #[error("failed to create reasoner: {0}")]
    Creation(String),
    #[error("classification query failed for `{class}`: {message}")]
    Query { class: TermIri, message: String },
}

pub type Result<T> = std::result::Result<T, ReasonerError>;

/// The classification queries the indexing engine consumes.
///
/// Implementations are not required to be thread-safe beyond `Send + Sync`
/// bounds for ownership transfer; the engine never issues concurrent queries.
pub trait Reasoner: Send + Sync {
    fn direct_subclasses(&self, class: &TermIri) -> Result<BTreeSet<TermIri>>;
    fn all_subclasses(&self, class: &TermIri) -> Result<BTreeSet<TermIri>>;
    fn direct_superclasses(&self, class: &TermIri) -> Result<BTreeSet<TermIri>>;
    fn all_superclasses(&self, class: &TermIri) -> Result<BTreeSet<TermIri>>;
    /// Named classes equivalent to `class`, excluding `class` itself.
    fn equivalent_classes(&self, class: &TermIri) -> Result<BTreeSet<TermIri>>;
}

/// Chooses and constructs a reasoner for a loaded closure.
///
/// Construction may itself fail (a malformed ontology can defeat
/// classification); the engine treats that as a degraded state and indexes
/// annotations only.
pub trait ReasonerProvider: Send + Sync {
    fn create(&self, closure: &ImportClosure) -> Result<Box<dyn Reasoner>>;
}
