//! Well-known RDF/RDFS/OWL vocabulary.
//!
//! The indexing pass needs a handful of fixed IRIs: the built-in classes and
//! properties that count as "vocabulary noise" in reasoner answers, the
//! default annotation properties, and the OBO-in-OWL conventions used by
//! biomedical ontologies.

use crate::iri::TermIri;
use std::collections::BTreeSet;

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
pub const OBO_IN_OWL_NS: &str = "http://www.geneontology.org/formats/oboInOwl#";

pub fn rdf(local: &str) -> TermIri {
    TermIri::new(format!("{RDF_NS}{local}"))
}

pub fn rdfs(local: &str) -> TermIri {
    TermIri::new(format!("{RDFS_NS}{local}"))
}

pub fn owl(local: &str) -> TermIri {
    TermIri::new(format!("{OWL_NS}{local}"))
}

pub fn obo_in_owl(local: &str) -> TermIri {
    TermIri::new(format!("{OBO_IN_OWL_NS}{local}"))
}

pub fn owl_thing() -> TermIri {
    owl("Thing")
}

pub fn owl_nothing() -> TermIri {
    owl("Nothing")
}

pub fn owl_top_object_property() -> TermIri {
    owl("topObjectProperty")
}

pub fn owl_bottom_object_property() -> TermIri {
    owl("bottomObjectProperty")
}

pub fn owl_deprecated() -> TermIri {
    owl("deprecated")
}

pub fn rdfs_label() -> TermIri {
    rdfs("label")
}

pub fn obo_subset_property() -> TermIri {
    obo_in_owl("subset_property")
}

pub fn obo_obsolete_class() -> TermIri {
    obo_in_owl("ObsoleteClass")
}

/// Built-in identifiers that are filtered out of every hierarchy and
/// equivalence answer before indexing.
pub fn builtin_vocabulary() -> BTreeSet<TermIri> {
    [
        owl_thing(),
        owl_nothing(),
        owl_top_object_property(),
        owl_bottom_object_property(),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_vocabulary_members() {
        let noise = builtin_vocabulary();
        assert_eq!(noise.len(), 4);
        assert!(noise.contains(&TermIri::from("http://www.w3.org/2002/07/owl#Thing")));
        assert!(noise.contains(&TermIri::from("http://www.w3.org/2002/07/owl#Nothing")));
    }
}
