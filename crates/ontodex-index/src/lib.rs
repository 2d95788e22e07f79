//! The Ontodex indexing engine.
//!
//! [`IndexEngine`] walks the entity signature of a loaded ontology once and
//! assembles a [`TermIndex`]: accessions, labels, synonyms, definitions,
//! subset tags, generic annotations, local/obsolete/root flags, parent and
//! child closures, equivalence sets, restriction-based related-term edges,
//! and rendered logical descriptions.
//!
//! The pass is strictly sequential; the reasoner and renderer are never
//! invoked concurrently. Readers go through [`TermIndexStore`], whose
//! accessors block until the pass has published its snapshot — including
//! after a failed load, in which case the snapshot is empty apart from the
//! ontology metadata (documented partial-data contract; a degraded load is
//! logged, never thrown at readers).
//!
//! ```no_run
//! use ontodex_index::IndexEngine;
//! use ontodex_ingest::RdfOntologyLoader;
//! use ontodex_model::SourceConfig;
//! use ontodex_reasoner::StructuralReasonerProvider;
//!
//! # fn main() -> Result<(), ontodex_model::ConfigError> {
//! let config = SourceConfig::new("http://purl.obolibrary.org/obo/cl.owl", "cl.owl")
//!     .with_base_namespaces(["http://purl.obolibrary.org/obo/CL_"]);
//! let engine = IndexEngine::new(
//!     config,
//!     Box::new(RdfOntologyLoader::new()),
//!     Box::new(StructuralReasonerProvider),
//! )?;
//! let store = engine.spawn();
//! // any thread, any time; blocks until the build completes
//! let index = store.index();
//! # Ok(())
//! # }
//! ```

mod annotations;
mod equivalence;
mod hierarchy;
mod relations;
pub mod store;

pub use store::{TermIndex, TermIndexStore};

use ontodex_model::{
    derive_obo_id, vocab, ConfigError, EntityKind, ExpressionRenderer, ImportClosure, LoadError,
    ManchesterRenderer, OntologyLoader, SourceConfig, TermIri,
};
use ontodex_reasoner::{Reasoner, ReasonerError, ReasonerProvider};
use std::collections::BTreeSet;
use tracing::{debug, error, info, warn};

/// One engine instance performs one build over one immutable configuration.
pub struct IndexEngine {
    config: SourceConfig,
    loader: Box<dyn OntologyLoader>,
    reasoner_provider: Box<dyn ReasonerProvider>,
    renderer: Option<Box<dyn ExpressionRenderer>>,
}

impl IndexEngine {
    /// Validates the configured locations; a malformed location or import
    /// mapping aborts construction before any build attempt.
    pub fn new(
        config: SourceConfig,
        loader: Box<dyn OntologyLoader>,
        reasoner_provider: Box<dyn ReasonerProvider>,
    ) -> Result<Self, ConfigError> {
        loader.validate(&config)?;
        Ok(Self {
            config,
            loader,
            reasoner_provider,
            renderer: None,
        })
    }

    /// Replace the default Manchester-style renderer.
    pub fn with_renderer(mut self, renderer: Box<dyn ExpressionRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Run the pass to completion. A load failure degrades to an index that
    /// carries only the ontology metadata.
    pub fn build(&self) -> TermIndex {
        match self.try_build() {
            Ok(index) => index,
            Err(e) => {
                error!(
                    ontology = %self.config.ontology_iri,
                    error = %e,
                    "failed to load ontology; index will be empty"
                );
                let mut index = TermIndex::default();
                index.set_ontology(
                    Some(self.config.ontology_iri.clone()),
                    self.config.namespace.clone(),
                );
                index
            }
        }
    }

    /// Run the build on a named background thread; the returned store
    /// releases its readers once the pass completes, success or failure.
    pub fn spawn(self) -> TermIndexStore {
        let store = TermIndexStore::new();
        let publisher = store.clone();
        std::thread::Builder::new()
            .name("ontodex-index-build".to_string())
            .spawn(move || {
                publisher.publish(self.build());
            })
            .expect("failed to spawn index build thread");
        store
    }

    fn try_build(&self) -> Result<TermIndex, LoadError> {
        debug!(ontology = %self.config.ontology_iri, "loading ontology");
        let closure = self.loader.load(&self.config)?;

        let ontology_iri = closure
            .root()
            .iri
            .clone()
            .unwrap_or_else(|| self.config.ontology_iri.clone());
        let ontology_name = self.config.namespace.clone().unwrap_or_else(|| {
            ontology_iri.short_form().unwrap_or_else(|| {
                warn!(ontology = %ontology_iri, "cannot shorten the ontology name");
                ontology_iri.to_string()
            })
        });

        let default_renderer;
        let renderer: &dyn ExpressionRenderer = match &self.renderer {
            Some(renderer) => renderer.as_ref(),
            None => {
                default_renderer =
                    ManchesterRenderer::for_closure(&closure, &self.config.label_property);
                &default_renderer
            }
        };

        let reasoner = match self.reasoner_provider.create(&closure) {
            Ok(reasoner) => Some(reasoner),
            Err(e) => {
                error!(
                    error = %e,
                    "unable to create reasoner; hierarchy, relation and equivalence indexes will be empty"
                );
                None
            }
        };

        let noise = vocab::builtin_vocabulary();
        let mut index = TermIndex::default();
        index.set_ontology(Some(ontology_iri), Some(ontology_name));

        debug!("computing indexes");
        for entity in closure.signature() {
            annotations::classify_annotations(&mut index, &entity, &closure, &self.config);

            if let Some(short_form) = entity.iri.short_form() {
                index.add_accession(entity.iri.clone(), short_form.clone());
                // no label annotation: fall back to the short form
                if index.label(&entity.iri).is_none() {
                    index.set_label(entity.iri.clone(), short_form.clone());
                }
                if let Some(obo_id) = derive_obo_id(&short_form) {
                    index.add_obo_id(entity.iri.clone(), obo_id);
                }
            }

            if self.config.is_local(&entity.iri) {
                index.add_local(entity.iri.clone());
            }

            match entity.kind {
                EntityKind::Class => {
                    if entity.iri.as_str().contains(vocab::OWL_NS) {
                        continue;
                    }
                    index.add_class(entity.iri.clone());
                    if let Some(reasoner) = reasoner.as_deref() {
                        if let Err(e) = Self::index_class(
                            &mut index,
                            &entity.iri,
                            &closure,
                            reasoner,
                            renderer,
                            &self.config,
                            &noise,
                        ) {
                            error!(
                                class = %entity.iri,
                                error = %e,
                                "classification failed; omitting this class's edges"
                            );
                        }
                    }
                }
                EntityKind::ObjectProperty => {
                    index.add_object_property(entity.iri.clone());
                    let supers: BTreeSet<TermIri> =
                        closure.super_properties(&entity.iri).cloned().collect();
                    index.add_direct_parents(entity.iri.clone(), supers);
                }
                EntityKind::DataProperty => index.add_data_property(entity.iri.clone()),
                EntityKind::AnnotationProperty => index.add_annotation_property(entity.iri.clone()),
                EntityKind::NamedIndividual => index.add_individual(entity.iri.clone()),
            }
        }

        info!(
            ontology = %self.config.ontology_iri,
            classes = index.classes().len(),
            "done loading/indexing"
        );
        Ok(index)
    }

    fn index_class(
        index: &mut TermIndex,
        class: &TermIri,
        closure: &ImportClosure,
        reasoner: &dyn Reasoner,
        renderer: &dyn ExpressionRenderer,
        config: &SourceConfig,
        noise: &BTreeSet<TermIri>,
    ) -> Result<(), ReasonerError> {
        hierarchy::index_class_hierarchy(index, class, reasoner, config, noise)?;
        relations::index_class_relations(index, class, closure, config, renderer);
        equivalence::index_class_equivalence(index, class, closure, reasoner, renderer, noise)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontodex_model::{
        ClassExpression, Entity, EquivalentClassesAxiom, OntologyDocument, SubClassOfAxiom,
    };
    use ontodex_reasoner::StructuralReasonerProvider;

    fn iri(local: &str) -> TermIri {
        TermIri::from(format!("http://x.org/onto#{local}").as_str())
    }

    /// Loader that serves a pre-built closure, for engine tests without I/O.
    struct FixtureLoader {
        closure: ImportClosure,
    }

    impl OntologyLoader for FixtureLoader {
        fn load(&self, _config: &SourceConfig) -> Result<ImportClosure, LoadError> {
            Ok(self.closure.clone())
        }
    }

    /// Loader that always fails, for the degraded-load contract.
    struct FailingLoader;

    impl OntologyLoader for FailingLoader {
        fn load(&self, config: &SourceConfig) -> Result<ImportClosure, LoadError> {
            Err(LoadError::Parse {
                location: config.location.clone(),
                message: "fixture failure".to_string(),
            })
        }
    }

    fn sample_closure() -> ImportClosure {
        let mut document = OntologyDocument::new(Some(TermIri::from("http://x.org/onto")));
        for class in ["A", "B", "C", "D"] {
            document
                .declarations
                .push(Entity::new(iri(class), EntityKind::Class));
        }
        document
            .declarations
            .push(Entity::new(iri("partOf"), EntityKind::ObjectProperty));
        document.subclass_axioms.push(SubClassOfAxiom {
            subject: iri("B"),
            superclass: ClassExpression::Named(iri("A")),
        });
        document.subclass_axioms.push(SubClassOfAxiom {
            subject: iri("B"),
            superclass: ClassExpression::some(iri("partOf"), ClassExpression::named(iri("D"))),
        });
        document.equivalence_axioms.push(EquivalentClassesAxiom {
            subject: iri("C"),
            expression: ClassExpression::Named(iri("B")),
        });
        ImportClosure::new(document)
    }

    fn sample_engine() -> IndexEngine {
        let config = SourceConfig::new("http://x.org/onto", "onto.ttl")
            .with_base_namespaces(["http://x.org/onto#"])
            .with_hierarchical_properties([iri("partOf")]);
        IndexEngine::new(
            config,
            Box::new(FixtureLoader {
                closure: sample_closure(),
            }),
            Box::new(StructuralReasonerProvider),
        )
        .unwrap()
    }

    #[test]
    fn test_end_to_end_pass() {
        let index = sample_engine().build();

        assert!(index.is_root(&iri("A")));
        assert!(!index.is_root(&iri("B")));
        assert_eq!(
            index.direct_children(&iri("A")),
            &[iri("B")].into_iter().collect()
        );
        assert_eq!(
            index.equivalent_terms(&iri("B")),
            &[iri("C")].into_iter().collect()
        );
        assert_eq!(
            index.related_parent_terms(&iri("B")).get(&iri("partOf")),
            Some(&[iri("D")].into_iter().collect())
        );
        assert_eq!(
            index.related_child_terms(&iri("D")),
            &[iri("B")].into_iter().collect()
        );
        assert!(index.is_local(&iri("A")));
        assert_eq!(index.label(&iri("A")), Some("A"));
        assert_eq!(index.accession(&iri("A")), Some("A"));
        assert_eq!(index.ontology_name(), Some("onto"));
    }

    #[test]
    fn test_direct_edges_are_within_transitive_edges() {
        let index = sample_engine().build();
        for class in index.classes() {
            let direct = index.direct_parents(class);
            let all = index.all_parents(class);
            if !direct.is_empty() && !all.is_empty() {
                assert!(direct.is_subset(all));
            }
            let direct = index.direct_children(class);
            let all = index.all_children(class);
            if !direct.is_empty() && !all.is_empty() {
                assert!(direct.is_subset(all));
            }
        }
    }

    #[test]
    fn test_no_builtin_noise_in_any_edge_set() {
        let index = sample_engine().build();
        let noise = vocab::builtin_vocabulary();
        for class in index.classes() {
            for set in [
                index.direct_parents(class),
                index.all_parents(class),
                index.direct_children(class),
                index.all_children(class),
                index.equivalent_terms(class),
            ] {
                assert!(set.is_disjoint(&noise), "noise leaked for {class}");
            }
        }
    }

    #[test]
    fn test_two_builds_are_identical() {
        let a = serde_json::to_string(&sample_engine().build()).unwrap();
        let b = serde_json::to_string(&sample_engine().build()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_failed_load_still_releases_readers() {
        let config = SourceConfig::new("http://x.org/onto", "onto.ttl");
        let engine = IndexEngine::new(
            config,
            Box::new(FailingLoader),
            Box::new(StructuralReasonerProvider),
        )
        .unwrap();

        let store = engine.spawn();
        let index = store.index(); // must not hang
        assert!(index.classes().is_empty());
        assert_eq!(
            index.ontology_iri().map(|iri| iri.as_str()),
            Some("http://x.org/onto")
        );
    }

    #[test]
    fn test_readers_see_the_finished_index() {
        let store = sample_engine().spawn();
        let early = store.index();
        let late = store.index();
        assert_eq!(early.classes(), late.classes());
        assert!(early.is_root(&iri("A")));
    }
}
