//! Annotation classification.
//!
//! Every annotation assertion on an entity, across the whole import closure,
//! lands in exactly one bucket: label, synonyms, definitions, subset tags,
//! the obsolete flag, or the generic per-property map. Hidden properties land
//! nowhere. A value that is neither a literal nor a shortenable IRI is
//! dropped without error.

use crate::store::TermIndex;
use ontodex_model::{AnnotationValue, Entity, ImportClosure, SourceConfig};
use std::collections::BTreeSet;
use tracing::warn;

/// Stringify an annotation value: literals yield their lexical text,
/// IRI values their short form.
fn value_as_string(value: &AnnotationValue) -> Option<String> {
    match value {
        AnnotationValue::Literal { lexical, .. } => Some(lexical.clone()),
        AnnotationValue::Iri(iri) => iri.short_form(),
    }
}

/// Label values always resolve: fall back to the entity's short form, and as
/// a last resort to its full identifier.
fn label_value(entity: &Entity, value: &AnnotationValue) -> String {
    if let Some(text) = value_as_string(value) {
        return text;
    }
    if let Some(short_form) = entity.iri.short_form() {
        return short_form;
    }
    warn!(
        entity = %entity.iri,
        "entity label value could not be resolved; using the full identifier"
    );
    entity.iri.to_string()
}

/// Classify every annotation asserted on `entity` and record the non-empty
/// buckets. Multiple label assertions resolve to the last one seen.
pub(crate) fn classify_annotations(
    index: &mut TermIndex,
    entity: &Entity,
    closure: &ImportClosure,
    config: &SourceConfig,
) {
    let mut synonyms: BTreeSet<String> = BTreeSet::new();
    let mut definitions: BTreeSet<String> = BTreeSet::new();
    let mut subsets: BTreeSet<String> = BTreeSet::new();

    for assertion in closure.annotations_for(&entity.iri) {
        let property = &assertion.property;
        if config.hidden_properties.contains(property) {
            continue;
        }

        if property == &config.label_property {
            index.set_label(entity.iri.clone(), label_value(entity, &assertion.value));
        } else if config.synonym_properties.contains(property) {
            if let Some(text) = value_as_string(&assertion.value) {
                synonyms.insert(text);
            }
        } else if config.definition_properties.contains(property) {
            if let Some(text) = value_as_string(&assertion.value) {
                definitions.insert(text);
            }
        } else if property == &config.subset_property {
            if let Some(text) = value_as_string(&assertion.value) {
                subsets.insert(text);
            }
        } else if property == &config.deprecated_property {
            index.add_obsolete(entity.iri.clone());
        } else if let Some(text) = value_as_string(&assertion.value) {
            index.add_annotation(entity.iri.clone(), property.clone(), text);
        }
    }

    index.add_synonyms(entity.iri.clone(), synonyms);
    index.add_definitions(entity.iri.clone(), definitions);
    index.add_subsets(entity.iri.clone(), subsets);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontodex_model::{AnnotationAssertion, EntityKind, OntologyDocument, TermIri};

    fn iri(local: &str) -> TermIri {
        TermIri::from(format!("http://x.org/onto#{local}").as_str())
    }

    fn assertion(subject: &TermIri, property: TermIri, value: AnnotationValue) -> AnnotationAssertion {
        AnnotationAssertion {
            subject: subject.clone(),
            property,
            value,
        }
    }

    fn classify(assertions: Vec<AnnotationAssertion>, config: &SourceConfig) -> TermIndex {
        let mut document = OntologyDocument::default();
        document.annotations = assertions;
        let closure = ImportClosure::new(document);
        let entity = Entity::new(iri("A"), EntityKind::Class);
        let mut index = TermIndex::default();
        classify_annotations(&mut index, &entity, &closure, config);
        index
    }

    fn config() -> SourceConfig {
        SourceConfig::new("http://x.org/onto", "onto.ttl")
            .with_synonym_properties([iri("synonym")])
            .with_definition_properties([iri("definition")])
            .with_hidden_properties([iri("hidden")])
    }

    #[test]
    fn test_buckets() {
        let subject = iri("A");
        let config = config();
        let index = classify(
            vec![
                assertion(
                    &subject,
                    config.label_property.clone(),
                    AnnotationValue::literal("cell"),
                ),
                assertion(&subject, iri("synonym"), AnnotationValue::literal("cellule")),
                assertion(
                    &subject,
                    iri("definition"),
                    AnnotationValue::literal("a basic unit"),
                ),
                assertion(
                    &subject,
                    config.subset_property.clone(),
                    AnnotationValue::literal("goslim_generic"),
                ),
                assertion(&subject, iri("comment"), AnnotationValue::literal("misc")),
            ],
            &config,
        );

        assert_eq!(index.label(&subject), Some("cell"));
        assert!(index.synonyms(&subject).contains("cellule"));
        assert!(index.definitions(&subject).contains("a basic unit"));
        assert!(index.subsets(&subject).contains("goslim_generic"));
        assert!(index.annotations(&subject).get(&iri("comment")).is_some());
        assert!(!index.is_obsolete(&subject));
    }

    #[test]
    fn test_deprecated_marks_obsolete() {
        let subject = iri("A");
        let config = config();
        let index = classify(
            vec![assertion(
                &subject,
                config.deprecated_property.clone(),
                AnnotationValue::literal("true"),
            )],
            &config,
        );
        assert!(index.is_obsolete(&subject));
    }

    #[test]
    fn test_hidden_properties_land_nowhere() {
        let subject = iri("A");
        let config = config();
        let index = classify(
            vec![assertion(
                &subject,
                iri("hidden"),
                AnnotationValue::literal("secret"),
            )],
            &config,
        );
        assert!(index.annotations(&subject).is_empty());
        assert!(index.synonyms(&subject).is_empty());
    }

    #[test]
    fn test_iri_values_resolve_to_short_forms() {
        let subject = iri("A");
        let config = config();
        let index = classify(
            vec![assertion(
                &subject,
                iri("synonym"),
                AnnotationValue::Iri(iri("OtherTerm")),
            )],
            &config,
        );
        assert!(index.synonyms(&subject).contains("OtherTerm"));
    }

    #[test]
    fn test_last_label_wins() {
        let subject = iri("A");
        let config = config();
        let index = classify(
            vec![
                assertion(
                    &subject,
                    config.label_property.clone(),
                    AnnotationValue::literal("first"),
                ),
                assertion(
                    &subject,
                    config.label_property.clone(),
                    AnnotationValue::literal("second"),
                ),
            ],
            &config,
        );
        assert_eq!(index.label(&subject), Some("second"));
    }
}
