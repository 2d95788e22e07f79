//! Equivalence indexing for one class.

use crate::hierarchy::without_builtins;
use crate::store::TermIndex;
use ontodex_model::{ExpressionRenderer, ImportClosure, TermIri};
use ontodex_reasoner::{Reasoner, ReasonerError};
use std::collections::BTreeSet;

/// Record the reasoner's equivalent-class answer (named members only) and
/// render any anonymous asserted equivalents.
pub(crate) fn index_class_equivalence(
    index: &mut TermIndex,
    class: &TermIri,
    closure: &ImportClosure,
    reasoner: &dyn Reasoner,
    renderer: &dyn ExpressionRenderer,
    noise: &BTreeSet<TermIri>,
) -> Result<(), ReasonerError> {
    let equivalent = without_builtins(reasoner.equivalent_classes(class)?, noise);
    index.add_equivalent_terms(class.clone(), equivalent);

    let mut descriptions: BTreeSet<String> = BTreeSet::new();
    for expression in closure.equivalent_expressions(class) {
        if expression.is_anonymous() {
            descriptions.insert(renderer.render(expression));
        }
    }
    index.add_equivalent_class_descriptions(class.clone(), descriptions);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontodex_model::{
        vocab, ClassExpression, EquivalentClassesAxiom, ManchesterRenderer, OntologyDocument,
    };
    use ontodex_reasoner::StructuralReasoner;

    fn iri(local: &str) -> TermIri {
        TermIri::from(format!("http://x.org/onto#{local}").as_str())
    }

    #[test]
    fn test_named_and_anonymous_equivalents() {
        let mut document = OntologyDocument::default();
        document.equivalence_axioms.push(EquivalentClassesAxiom {
            subject: iri("B"),
            expression: ClassExpression::Named(iri("C")),
        });
        document.equivalence_axioms.push(EquivalentClassesAxiom {
            subject: iri("B"),
            expression: ClassExpression::some(iri("partOf"), ClassExpression::named(iri("D"))),
        });
        let closure = ImportClosure::new(document);
        let reasoner = StructuralReasoner::for_closure(&closure);
        let renderer = ManchesterRenderer::new();
        let noise = vocab::builtin_vocabulary();

        let mut index = TermIndex::default();
        index_class_equivalence(&mut index, &iri("B"), &closure, &reasoner, &renderer, &noise)
            .unwrap();

        assert_eq!(
            index.equivalent_terms(&iri("B")),
            &[iri("C")].into_iter().collect()
        );
        assert!(index
            .equivalent_class_descriptions(&iri("B"))
            .contains("partOf some D"));
    }
}
