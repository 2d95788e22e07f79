//! The term index snapshot and its readiness-gated store.
//!
//! [`TermIndex`] is append-only while the build pass runs and immutable
//! afterwards; nothing outside this crate can mutate it. [`TermIndexStore`]
//! is the handle readers hold: cheap to clone, and its [`index`] accessor
//! blocks until the build publishes, so a reader can never observe a
//! partially written map.
//!
//! Every read accessor is total. An absent key yields an empty collection,
//! `None` or `false`, never an error.
//!
//! [`index`]: TermIndexStore::index

use ontodex_model::TermIri;
use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::warn;

static EMPTY_STRINGS: BTreeSet<String> = BTreeSet::new();
static EMPTY_TERMS: BTreeSet<TermIri> = BTreeSet::new();
static EMPTY_TERM_SETS: BTreeMap<TermIri, BTreeSet<TermIri>> = BTreeMap::new();
static EMPTY_STRING_SETS: BTreeMap<TermIri, BTreeSet<String>> = BTreeMap::new();

/// All derived indexes for one ontology, keyed by term IRI.
///
/// Inner collections are ordered so two builds over the same input serialize
/// identically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermIndex {
    ontology_iri: Option<TermIri>,
    ontology_name: Option<String>,

    accessions: BTreeMap<TermIri, String>,
    obo_ids: BTreeMap<TermIri, String>,
    labels: BTreeMap<TermIri, String>,
    synonyms: BTreeMap<TermIri, BTreeSet<String>>,
    definitions: BTreeMap<TermIri, BTreeSet<String>>,
    subsets: BTreeMap<TermIri, BTreeSet<String>>,
    annotations: BTreeMap<TermIri, BTreeMap<TermIri, BTreeSet<String>>>,

    local_terms: BTreeSet<TermIri>,
    obsolete_terms: BTreeSet<TermIri>,
    root_terms: BTreeSet<TermIri>,

    classes: BTreeSet<TermIri>,
    object_properties: BTreeSet<TermIri>,
    data_properties: BTreeSet<TermIri>,
    annotation_properties: BTreeSet<TermIri>,
    individuals: BTreeSet<TermIri>,

    direct_parents: BTreeMap<TermIri, BTreeSet<TermIri>>,
    all_parents: BTreeMap<TermIri, BTreeSet<TermIri>>,
    direct_children: BTreeMap<TermIri, BTreeSet<TermIri>>,
    all_children: BTreeMap<TermIri, BTreeSet<TermIri>>,
    equivalent_terms: BTreeMap<TermIri, BTreeSet<TermIri>>,

    related_terms: BTreeMap<TermIri, BTreeMap<TermIri, BTreeSet<TermIri>>>,
    related_parent_terms: BTreeMap<TermIri, BTreeMap<TermIri, BTreeSet<TermIri>>>,
    related_child_terms: BTreeMap<TermIri, BTreeSet<TermIri>>,

    superclass_descriptions: BTreeMap<TermIri, BTreeSet<String>>,
    equivalent_class_descriptions: BTreeMap<TermIri, BTreeSet<String>>,
}

impl TermIndex {
    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    pub fn ontology_iri(&self) -> Option<&TermIri> {
        self.ontology_iri.as_ref()
    }

    pub fn ontology_name(&self) -> Option<&str> {
        self.ontology_name.as_deref()
    }

    pub fn accession(&self, iri: &TermIri) -> Option<&str> {
        self.accessions.get(iri).map(String::as_str)
    }

    pub fn obo_id(&self, iri: &TermIri) -> Option<&str> {
        self.obo_ids.get(iri).map(String::as_str)
    }

    pub fn label(&self, iri: &TermIri) -> Option<&str> {
        self.labels.get(iri).map(String::as_str)
    }

    pub fn labels(&self) -> &BTreeMap<TermIri, String> {
        &self.labels
    }

    pub fn synonyms(&self, iri: &TermIri) -> &BTreeSet<String> {
        self.synonyms.get(iri).unwrap_or(&EMPTY_STRINGS)
    }

    pub fn definitions(&self, iri: &TermIri) -> &BTreeSet<String> {
        self.definitions.get(iri).unwrap_or(&EMPTY_STRINGS)
    }

    pub fn subsets(&self, iri: &TermIri) -> &BTreeSet<String> {
        self.subsets.get(iri).unwrap_or(&EMPTY_STRINGS)
    }

    pub fn annotations(&self, iri: &TermIri) -> &BTreeMap<TermIri, BTreeSet<String>> {
        self.annotations.get(iri).unwrap_or(&EMPTY_STRING_SETS)
    }

    pub fn is_local(&self, iri: &TermIri) -> bool {
        self.local_terms.contains(iri)
    }

    pub fn is_obsolete(&self, iri: &TermIri) -> bool {
        self.obsolete_terms.contains(iri)
    }

    pub fn is_root(&self, iri: &TermIri) -> bool {
        self.root_terms.contains(iri)
    }

    pub fn classes(&self) -> &BTreeSet<TermIri> {
        &self.classes
    }

    pub fn object_properties(&self) -> &BTreeSet<TermIri> {
        &self.object_properties
    }

    pub fn data_properties(&self) -> &BTreeSet<TermIri> {
        &self.data_properties
    }

    pub fn annotation_properties(&self) -> &BTreeSet<TermIri> {
        &self.annotation_properties
    }

    pub fn individuals(&self) -> &BTreeSet<TermIri> {
        &self.individuals
    }

    pub fn direct_parents(&self, iri: &TermIri) -> &BTreeSet<TermIri> {
        self.direct_parents.get(iri).unwrap_or(&EMPTY_TERMS)
    }

    pub fn direct_parents_map(&self) -> &BTreeMap<TermIri, BTreeSet<TermIri>> {
        &self.direct_parents
    }

    pub fn all_parents(&self, iri: &TermIri) -> &BTreeSet<TermIri> {
        self.all_parents.get(iri).unwrap_or(&EMPTY_TERMS)
    }

    pub fn all_parents_map(&self) -> &BTreeMap<TermIri, BTreeSet<TermIri>> {
        &self.all_parents
    }

    pub fn direct_children(&self, iri: &TermIri) -> &BTreeSet<TermIri> {
        self.direct_children.get(iri).unwrap_or(&EMPTY_TERMS)
    }

    pub fn direct_children_map(&self) -> &BTreeMap<TermIri, BTreeSet<TermIri>> {
        &self.direct_children
    }

    pub fn all_children(&self, iri: &TermIri) -> &BTreeSet<TermIri> {
        self.all_children.get(iri).unwrap_or(&EMPTY_TERMS)
    }

    pub fn all_children_map(&self) -> &BTreeMap<TermIri, BTreeSet<TermIri>> {
        &self.all_children
    }

    pub fn equivalent_terms(&self, iri: &TermIri) -> &BTreeSet<TermIri> {
        self.equivalent_terms.get(iri).unwrap_or(&EMPTY_TERMS)
    }

    pub fn equivalent_terms_map(&self) -> &BTreeMap<TermIri, BTreeSet<TermIri>> {
        &self.equivalent_terms
    }

    pub fn related_terms(&self, iri: &TermIri) -> &BTreeMap<TermIri, BTreeSet<TermIri>> {
        self.related_terms.get(iri).unwrap_or(&EMPTY_TERM_SETS)
    }

    pub fn related_parent_terms(&self, iri: &TermIri) -> &BTreeMap<TermIri, BTreeSet<TermIri>> {
        self.related_parent_terms.get(iri).unwrap_or(&EMPTY_TERM_SETS)
    }

    pub fn related_child_terms(&self, iri: &TermIri) -> &BTreeSet<TermIri> {
        self.related_child_terms.get(iri).unwrap_or(&EMPTY_TERMS)
    }

    pub fn superclass_descriptions(&self, iri: &TermIri) -> &BTreeSet<String> {
        self.superclass_descriptions.get(iri).unwrap_or(&EMPTY_STRINGS)
    }

    pub fn superclass_descriptions_map(&self) -> &BTreeMap<TermIri, BTreeSet<String>> {
        &self.superclass_descriptions
    }

    pub fn equivalent_class_descriptions(&self, iri: &TermIri) -> &BTreeSet<String> {
        self.equivalent_class_descriptions
            .get(iri)
            .unwrap_or(&EMPTY_STRINGS)
    }

    pub fn equivalent_class_descriptions_map(&self) -> &BTreeMap<TermIri, BTreeSet<String>> {
        &self.equivalent_class_descriptions
    }

    // ------------------------------------------------------------------
    // Build-time mutators. Set-valued entries are only created when the
    // incoming set is non-empty; absent key means empty set.
    // ------------------------------------------------------------------

    pub(crate) fn set_ontology(&mut self, iri: Option<TermIri>, name: Option<String>) {
        self.ontology_iri = iri;
        self.ontology_name = name;
    }

    pub(crate) fn add_accession(&mut self, iri: TermIri, accession: String) {
        self.accessions.insert(iri, accession);
    }

    pub(crate) fn add_obo_id(&mut self, iri: TermIri, obo_id: String) {
        self.obo_ids.insert(iri, obo_id);
    }

    pub(crate) fn set_label(&mut self, iri: TermIri, label: String) {
        self.labels.insert(iri, label);
    }

    pub(crate) fn add_synonyms(&mut self, iri: TermIri, synonyms: BTreeSet<String>) {
        if !synonyms.is_empty() {
            self.synonyms.insert(iri, synonyms);
        }
    }

    pub(crate) fn add_definitions(&mut self, iri: TermIri, definitions: BTreeSet<String>) {
        if !definitions.is_empty() {
            self.definitions.insert(iri, definitions);
        }
    }

    pub(crate) fn add_subsets(&mut self, iri: TermIri, subsets: BTreeSet<String>) {
        if !subsets.is_empty() {
            self.subsets.insert(iri, subsets);
        }
    }

    pub(crate) fn add_annotation(&mut self, iri: TermIri, property: TermIri, value: String) {
        self.annotations
            .entry(iri)
            .or_default()
            .entry(property)
            .or_default()
            .insert(value);
    }

    pub(crate) fn add_local(&mut self, iri: TermIri) {
        self.local_terms.insert(iri);
    }

    pub(crate) fn add_obsolete(&mut self, iri: TermIri) {
        self.obsolete_terms.insert(iri);
    }

    pub(crate) fn add_root(&mut self, iri: TermIri) {
        self.root_terms.insert(iri);
    }

    pub(crate) fn add_class(&mut self, iri: TermIri) {
        self.classes.insert(iri);
    }

    pub(crate) fn add_object_property(&mut self, iri: TermIri) {
        self.object_properties.insert(iri);
    }

    pub(crate) fn add_data_property(&mut self, iri: TermIri) {
        self.data_properties.insert(iri);
    }

    pub(crate) fn add_annotation_property(&mut self, iri: TermIri) {
        self.annotation_properties.insert(iri);
    }

    pub(crate) fn add_individual(&mut self, iri: TermIri) {
        self.individuals.insert(iri);
    }

    pub(crate) fn add_direct_parents(&mut self, iri: TermIri, parents: BTreeSet<TermIri>) {
        if !parents.is_empty() {
            self.direct_parents.insert(iri, parents);
        }
    }

    pub(crate) fn add_all_parents(&mut self, iri: TermIri, parents: BTreeSet<TermIri>) {
        if !parents.is_empty() {
            self.all_parents.insert(iri, parents);
        }
    }

    pub(crate) fn add_direct_children(&mut self, iri: TermIri, children: BTreeSet<TermIri>) {
        if !children.is_empty() {
            self.direct_children.insert(iri, children);
        }
    }

    pub(crate) fn add_all_children(&mut self, iri: TermIri, children: BTreeSet<TermIri>) {
        if !children.is_empty() {
            self.all_children.insert(iri, children);
        }
    }

    pub(crate) fn add_equivalent_terms(&mut self, iri: TermIri, equivalent: BTreeSet<TermIri>) {
        if !equivalent.is_empty() {
            self.equivalent_terms.insert(iri, equivalent);
        }
    }

    pub(crate) fn add_related_terms(
        &mut self,
        iri: TermIri,
        related: BTreeMap<TermIri, BTreeSet<TermIri>>,
    ) {
        if !related.is_empty() {
            self.related_terms.insert(iri, related);
        }
    }

    pub(crate) fn add_related_parent_terms(
        &mut self,
        iri: TermIri,
        related: BTreeMap<TermIri, BTreeSet<TermIri>>,
    ) {
        if !related.is_empty() {
            self.related_parent_terms.insert(iri, related);
        }
    }

    pub(crate) fn add_related_child(&mut self, parent: TermIri, child: TermIri) {
        self.related_child_terms
            .entry(parent)
            .or_default()
            .insert(child);
    }

    pub(crate) fn add_superclass_descriptions(
        &mut self,
        iri: TermIri,
        descriptions: BTreeSet<String>,
    ) {
        if !descriptions.is_empty() {
            self.superclass_descriptions.insert(iri, descriptions);
        }
    }

    pub(crate) fn add_equivalent_class_descriptions(
        &mut self,
        iri: TermIri,
        descriptions: BTreeSet<String>,
    ) {
        if !descriptions.is_empty() {
            self.equivalent_class_descriptions.insert(iri, descriptions);
        }
    }
}

#[derive(Default)]
struct StoreShared {
    slot: Mutex<Option<Arc<TermIndex>>>,
    ready: Condvar,
}

/// Readiness-gated handle to the index.
///
/// Clones share the same slot. The store transitions to ready exactly once;
/// there is no way back to building.
#[derive(Clone, Default)]
pub struct TermIndexStore {
    shared: Arc<StoreShared>,
}

impl TermIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.shared.slot.lock().is_some()
    }

    /// Publish the finished index and release every waiting reader.
    pub fn publish(&self, index: TermIndex) {
        let mut slot = self.shared.slot.lock();
        if slot.is_some() {
            warn!("term index already published; ignoring second publish");
            return;
        }
        *slot = Some(Arc::new(index));
        self.shared.ready.notify_all();
    }

    /// Block until the build completes, then return the snapshot.
    pub fn index(&self) -> Arc<TermIndex> {
        let mut slot = self.shared.slot.lock();
        loop {
            if let Some(index) = slot.as_ref() {
                return Arc::clone(index);
            }
            self.shared.ready.wait(&mut slot);
        }
    }

    /// Non-blocking variant; `None` while the build is still running.
    pub fn try_index(&self) -> Option<Arc<TermIndex>> {
        self.shared.slot.lock().as_ref().map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn iri(local: &str) -> TermIri {
        TermIri::from(format!("http://x.org/onto#{local}").as_str())
    }

    #[test]
    fn test_accessors_are_total() {
        let index = TermIndex::default();
        let missing = iri("missing");
        assert!(index.synonyms(&missing).is_empty());
        assert!(index.annotations(&missing).is_empty());
        assert!(index.direct_parents(&missing).is_empty());
        assert!(index.related_terms(&missing).is_empty());
        assert!(!index.is_root(&missing));
        assert!(index.label(&missing).is_none());
    }

    #[test]
    fn test_empty_sets_create_no_entries() {
        let mut index = TermIndex::default();
        index.add_direct_parents(iri("A"), BTreeSet::new());
        index.add_synonyms(iri("A"), BTreeSet::new());
        assert!(index.direct_parents_map().is_empty());
        assert!(index.synonyms(&iri("A")).is_empty());
    }

    #[test]
    fn test_readers_block_until_publish() {
        let store = TermIndexStore::new();
        assert!(!store.is_ready());
        assert!(store.try_index().is_none());

        let reader = store.clone();
        let handle = std::thread::spawn(move || reader.index().is_root(&iri("A")));

        std::thread::sleep(Duration::from_millis(20));
        let mut index = TermIndex::default();
        index.add_root(iri("A"));
        store.publish(index);

        assert!(handle.join().unwrap());
        assert!(store.is_ready());
    }

    #[test]
    fn test_second_publish_is_ignored() {
        let store = TermIndexStore::new();
        let mut first = TermIndex::default();
        first.add_root(iri("A"));
        store.publish(first);
        store.publish(TermIndex::default());
        assert!(store.index().is_root(&iri("A")));
    }

    #[test]
    fn test_snapshot_serializes_deterministically() {
        let build = || {
            let mut index = TermIndex::default();
            index.add_direct_parents(iri("B"), [iri("A")].into_iter().collect());
            index.add_synonyms(iri("B"), ["cell".to_string()].into_iter().collect());
            index
        };
        let a = serde_json::to_string(&build()).unwrap();
        let b = serde_json::to_string(&build()).unwrap();
        assert_eq!(a, b);
    }
}
