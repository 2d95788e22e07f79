//! Reasoner-driven hierarchy indexing for one class.

use crate::store::TermIndex;
use ontodex_model::{vocab, SourceConfig, TermIri};
use ontodex_reasoner::{Reasoner, ReasonerError};
use std::collections::BTreeSet;

/// Strip built-in vocabulary noise from a reasoner answer.
pub(crate) fn without_builtins(
    mut terms: BTreeSet<TermIri>,
    noise: &BTreeSet<TermIri>,
) -> BTreeSet<TermIri> {
    terms.retain(|iri| !noise.contains(iri));
    terms
}

/// Query root/obsolete membership and the four hierarchy sets for `class`.
///
/// Failures propagate to the caller, which logs and omits this class's edges;
/// the rest of the pass is unaffected.
pub(crate) fn index_class_hierarchy(
    index: &mut TermIndex,
    class: &TermIri,
    reasoner: &dyn Reasoner,
    config: &SourceConfig,
    noise: &BTreeSet<TermIri>,
) -> Result<(), ReasonerError> {
    // a root is a direct child of the universal top class
    if reasoner
        .direct_subclasses(&vocab::owl_thing())?
        .contains(class)
    {
        index.add_root(class.clone());
    }

    // obsolete means anywhere under the configured marker class
    if reasoner
        .all_subclasses(&config.obsolete_marker_class)?
        .contains(class)
    {
        index.add_obsolete(class.clone());
    }

    let direct_children = without_builtins(reasoner.direct_subclasses(class)?, noise);
    index.add_direct_children(class.clone(), direct_children);

    let all_children = without_builtins(reasoner.all_subclasses(class)?, noise);
    index.add_all_children(class.clone(), all_children);

    let direct_parents = without_builtins(reasoner.direct_superclasses(class)?, noise);
    index.add_direct_parents(class.clone(), direct_parents);

    let all_parents = without_builtins(reasoner.all_superclasses(class)?, noise);
    index.add_all_parents(class.clone(), all_parents);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(local: &str) -> TermIri {
        TermIri::from(format!("http://x.org/onto#{local}").as_str())
    }

    #[test]
    fn test_builtin_noise_is_removed() {
        let noise = vocab::builtin_vocabulary();
        let answer: BTreeSet<TermIri> = [iri("A"), vocab::owl_thing(), vocab::owl_nothing()]
            .into_iter()
            .collect();
        let cleaned = without_builtins(answer, &noise);
        assert_eq!(cleaned, [iri("A")].into_iter().collect());
    }
}
