//! Restriction-based "related term" edges.
//!
//! Only existential restrictions with a named filler become typed edges;
//! every other anonymous superclass shape survives as rendered text. Edges
//! whose property is configured hierarchical are additionally promoted into
//! the related-parent map, with a reverse edge keyed by the filler.

use crate::store::TermIndex;
use ontodex_model::{ClassExpression, ExpressionRenderer, ImportClosure, SourceConfig, TermIri};
use std::collections::{BTreeMap, BTreeSet};

pub(crate) fn index_class_relations(
    index: &mut TermIndex,
    class: &TermIri,
    closure: &ImportClosure,
    config: &SourceConfig,
    renderer: &dyn ExpressionRenderer,
) {
    let mut related: BTreeMap<TermIri, BTreeSet<TermIri>> = BTreeMap::new();
    let mut related_parents: BTreeMap<TermIri, BTreeSet<TermIri>> = BTreeMap::new();
    let mut descriptions: BTreeSet<String> = BTreeSet::new();

    for expression in closure.superclass_expressions(class) {
        if !expression.is_anonymous() {
            continue;
        }

        if let ClassExpression::SomeValuesFrom { property, filler } = expression {
            if let Some(filler) = filler.as_named() {
                related
                    .entry(property.clone())
                    .or_default()
                    .insert(filler.clone());

                if config.hierarchical_properties.contains(property) {
                    related_parents
                        .entry(property.clone())
                        .or_default()
                        .insert(filler.clone());
                    index.add_related_child(filler.clone(), class.clone());
                }
            }
        }

        descriptions.insert(renderer.render(expression));
    }

    index.add_related_terms(class.clone(), related);
    index.add_related_parent_terms(class.clone(), related_parents);
    index.add_superclass_descriptions(class.clone(), descriptions);
    // transitive closure of related-term edges is deliberately not computed
}
