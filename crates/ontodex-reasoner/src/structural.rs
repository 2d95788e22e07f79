//! Told-subsumption reasoning over asserted axioms.
//!
//! [`StructuralReasoner`] answers the classification queries from the named
//! subclass and equivalent-class axioms of an import closure, without any
//! logical inference beyond transitive closure:
//!
//! - a class with no asserted named superclass sits directly under
//!   `owl:Thing`, so "direct subclasses of Thing" enumerates the told roots;
//! - transitive sub/superclass answers are reachability over the asserted
//!   edges (cycle-safe, self excluded);
//! - equivalence is the symmetric-transitive closure of the asserted named
//!   equivalences, with the queried class excluded.

use crate::{Reasoner, ReasonerError, ReasonerProvider, Result};
use ontodex_model::{vocab, ImportClosure, TermIri};
use std::collections::{BTreeSet, HashMap, VecDeque};

#[derive(Debug, Default)]
pub struct StructuralReasoner {
    /// Declared classes plus every named participant of a class axiom.
    classes: BTreeSet<TermIri>,
    /// Asserted named superclasses, subject -> supers.
    supers: HashMap<TermIri, BTreeSet<TermIri>>,
    /// Reverse of `supers`.
    subs: HashMap<TermIri, BTreeSet<TermIri>>,
    /// Symmetric adjacency of asserted named equivalences.
    equivalents: HashMap<TermIri, BTreeSet<TermIri>>,
    /// Classes with no asserted named superclass; told children of Thing.
    parentless: BTreeSet<TermIri>,
}

impl StructuralReasoner {
    pub fn for_closure(closure: &ImportClosure) -> Self {
        let mut reasoner = StructuralReasoner::default();
        let thing = vocab::owl_thing();

        for document in closure.documents() {
            for entity in &document.declarations {
                if entity.kind == ontodex_model::EntityKind::Class {
                    reasoner.classes.insert(entity.iri.clone());
                }
            }
            for axiom in &document.subclass_axioms {
                reasoner.classes.insert(axiom.subject.clone());
                let Some(superclass) = axiom.superclass.as_named() else {
                    continue;
                };
                reasoner.classes.insert(superclass.clone());
                reasoner
                    .supers
                    .entry(axiom.subject.clone())
                    .or_default()
                    .insert(superclass.clone());
                reasoner
                    .subs
                    .entry(superclass.clone())
                    .or_default()
                    .insert(axiom.subject.clone());
            }
            for axiom in &document.equivalence_axioms {
                let Some(other) = axiom.expression.as_named() else {
                    continue;
                };
                if other == &axiom.subject {
                    continue;
                }
                reasoner.classes.insert(axiom.subject.clone());
                reasoner.classes.insert(other.clone());
                reasoner
                    .equivalents
                    .entry(axiom.subject.clone())
                    .or_default()
                    .insert(other.clone());
                reasoner
                    .equivalents
                    .entry(other.clone())
                    .or_default()
                    .insert(axiom.subject.clone());
            }
        }

        reasoner.parentless = reasoner
            .classes
            .iter()
            .filter(|class| *class != &thing)
            .filter(|class| reasoner.supers.get(*class).map_or(true, |s| s.is_empty()))
            .cloned()
            .collect();

        tracing::debug!(
            classes = reasoner.classes.len(),
            subclass_edges = reasoner.supers.values().map(|s| s.len()).sum::<usize>(),
            roots = reasoner.parentless.len(),
            "structural reasoner ready"
        );
        reasoner
    }

    fn told_direct_superclasses(&self, class: &TermIri) -> BTreeSet<TermIri> {
        let thing = vocab::owl_thing();
        if class == &thing {
            return BTreeSet::new();
        }
        match self.supers.get(class) {
            Some(supers) if !supers.is_empty() => supers.clone(),
            _ => [thing].into_iter().collect(),
        }
    }

    fn told_direct_subclasses(&self, class: &TermIri) -> BTreeSet<TermIri> {
        let mut out = self.subs.get(class).cloned().unwrap_or_default();
        if class == &vocab::owl_thing() {
            out.extend(self.parentless.iter().cloned());
        }
        out
    }

    /// Reachability over told edges, self excluded, cycle-safe.
    fn closure_over(
        &self,
        start: &TermIri,
        step: impl Fn(&Self, &TermIri) -> BTreeSet<TermIri>,
    ) -> BTreeSet<TermIri> {
        let mut seen: BTreeSet<TermIri> = BTreeSet::new();
        let mut queue: VecDeque<TermIri> = step(self, start).into_iter().collect();
        while let Some(next) = queue.pop_front() {
            if next == *start || !seen.insert(next.clone()) {
                continue;
            }
            queue.extend(step(self, &next));
        }
        seen
    }
}

impl Reasoner for StructuralReasoner {
    fn direct_subclasses(&self, class: &TermIri) -> Result<BTreeSet<TermIri>> {
        Ok(self.told_direct_subclasses(class))
    }

    fn all_subclasses(&self, class: &TermIri) -> Result<BTreeSet<TermIri>> {
        Ok(self.closure_over(class, Self::told_direct_subclasses))
    }

    fn direct_superclasses(&self, class: &TermIri) -> Result<BTreeSet<TermIri>> {
        Ok(self.told_direct_superclasses(class))
    }

    fn all_superclasses(&self, class: &TermIri) -> Result<BTreeSet<TermIri>> {
        Ok(self.closure_over(class, Self::told_direct_superclasses))
    }

    fn equivalent_classes(&self, class: &TermIri) -> Result<BTreeSet<TermIri>> {
        Ok(self.closure_over(class, |reasoner, iri| {
            reasoner.equivalents.get(iri).cloned().unwrap_or_default()
        }))
    }
}

/// Default provider: one [`StructuralReasoner`] per closure.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralReasonerProvider;

impl ReasonerProvider for StructuralReasonerProvider {
    fn create(&self, closure: &ImportClosure) -> Result<Box<dyn Reasoner>> {
        if closure.documents().is_empty() {
            return Err(ReasonerError::Creation("empty import closure".to_string()));
        }
        Ok(Box::new(StructuralReasoner::for_closure(closure)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontodex_model::{
        ClassExpression, Entity, EntityKind, EquivalentClassesAxiom, ImportClosure,
        OntologyDocument, SubClassOfAxiom,
    };

    fn iri(local: &str) -> TermIri {
        TermIri::from(format!("http://x.org/onto#{local}").as_str())
    }

    fn closure_with(
        classes: &[&str],
        subclass_of: &[(&str, &str)],
        equivalent: &[(&str, &str)],
    ) -> ImportClosure {
        let mut document = OntologyDocument::new(Some(TermIri::from("http://x.org/onto")));
        for class in classes {
            document
                .declarations
                .push(Entity::new(iri(class), EntityKind::Class));
        }
        for (sub, sup) in subclass_of {
            document.subclass_axioms.push(SubClassOfAxiom {
                subject: iri(sub),
                superclass: ClassExpression::Named(iri(sup)),
            });
        }
        for (a, b) in equivalent {
            document.equivalence_axioms.push(EquivalentClassesAxiom {
                subject: iri(a),
                expression: ClassExpression::Named(iri(b)),
            });
        }
        ImportClosure::new(document)
    }

    #[test]
    fn test_parentless_classes_sit_under_thing() {
        let closure = closure_with(&["A", "B"], &[("B", "A")], &[]);
        let reasoner = StructuralReasoner::for_closure(&closure);

        let roots = reasoner.direct_subclasses(&vocab::owl_thing()).unwrap();
        assert!(roots.contains(&iri("A")));
        assert!(!roots.contains(&iri("B")));
        assert_eq!(
            reasoner.direct_superclasses(&iri("A")).unwrap(),
            [vocab::owl_thing()].into_iter().collect()
        );
    }

    #[test]
    fn test_transitive_closures() {
        let closure = closure_with(&["A", "B", "C"], &[("B", "A"), ("C", "B")], &[]);
        let reasoner = StructuralReasoner::for_closure(&closure);

        let all_subs = reasoner.all_subclasses(&iri("A")).unwrap();
        assert!(all_subs.contains(&iri("B")));
        assert!(all_subs.contains(&iri("C")));

        let all_supers = reasoner.all_superclasses(&iri("C")).unwrap();
        assert!(all_supers.contains(&iri("B")));
        assert!(all_supers.contains(&iri("A")));
        assert!(all_supers.contains(&vocab::owl_thing()));
    }

    #[test]
    fn test_direct_answers_are_subsets_of_transitive_answers() {
        let closure = closure_with(&["A", "B", "C"], &[("B", "A"), ("C", "B")], &[]);
        let reasoner = StructuralReasoner::for_closure(&closure);

        for class in ["A", "B", "C"].map(iri) {
            let direct = reasoner.direct_subclasses(&class).unwrap();
            let all = reasoner.all_subclasses(&class).unwrap();
            assert!(direct.is_subset(&all), "direct subs must be within all subs");

            let direct = reasoner.direct_superclasses(&class).unwrap();
            let all = reasoner.all_superclasses(&class).unwrap();
            assert!(direct.is_subset(&all), "direct supers must be within all supers");
        }
    }

    #[test]
    fn test_equivalence_closure_excludes_self() {
        let closure = closure_with(&["A", "B", "C"], &[], &[("A", "B"), ("B", "C")]);
        let reasoner = StructuralReasoner::for_closure(&closure);

        let of_a = reasoner.equivalent_classes(&iri("A")).unwrap();
        assert_eq!(of_a, [iri("B"), iri("C")].into_iter().collect());

        let of_b = reasoner.equivalent_classes(&iri("B")).unwrap();
        assert_eq!(of_b, [iri("A"), iri("C")].into_iter().collect());

        assert!(reasoner.equivalent_classes(&iri("D")).unwrap().is_empty());
    }

    #[test]
    fn test_subclass_cycles_terminate() {
        let closure = closure_with(&["A", "B"], &[("A", "B"), ("B", "A")], &[]);
        let reasoner = StructuralReasoner::for_closure(&closure);

        let supers = reasoner.all_superclasses(&iri("A")).unwrap();
        assert!(supers.contains(&iri("B")));
        assert!(!supers.contains(&iri("A")));
    }
}
