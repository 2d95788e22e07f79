//! Immutable configuration for one ontology source.
//!
//! A [`SourceConfig`] is assembled once, before the engine is constructed,
//! and never mutated afterwards. Defaults follow the conventions of
//! biomedical ontologies: `rdfs:label` for labels, `oboInOwl:subset_property`
//! for slim tags, `oboInOwl:ObsoleteClass` as the obsolete marker and
//! `owl:deprecated` as the deprecation flag.

use crate::iri::TermIri;
use crate::vocab;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Fatal, construction-time configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed resource location `{location}`: {reason}")]
    MalformedLocation { location: String, reason: String },
    #[error("unresolvable import mapping for `{iri}`: {reason}")]
    UnresolvableMapping { iri: TermIri, reason: String },
}

/// Where and how to index one ontology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Logical IRI of the ontology to load.
    pub ontology_iri: TermIri,
    /// Short name of the ontology; derived from the ontology IRI when absent.
    pub namespace: Option<String>,
    /// Physical location of the document: a filesystem path or `file://` URL.
    pub location: String,
    /// Logical IRI -> physical location for imported ontologies.
    pub import_mappings: BTreeMap<TermIri, String>,
    /// Namespace prefixes that mark a term as local to this ontology.
    pub base_namespaces: Vec<String>,
    pub label_property: TermIri,
    pub synonym_properties: BTreeSet<TermIri>,
    pub definition_properties: BTreeSet<TermIri>,
    /// Annotation properties classified into no bucket at all.
    pub hidden_properties: BTreeSet<TermIri>,
    /// Restriction properties promoted to parent/child edges.
    pub hierarchical_properties: BTreeSet<TermIri>,
    pub obsolete_marker_class: TermIri,
    pub subset_property: TermIri,
    pub deprecated_property: TermIri,
}

impl SourceConfig {
    pub fn new(ontology_iri: impl Into<TermIri>, location: impl Into<String>) -> Self {
        Self {
            ontology_iri: ontology_iri.into(),
            namespace: None,
            location: location.into(),
            import_mappings: BTreeMap::new(),
            base_namespaces: Vec::new(),
            label_property: vocab::rdfs_label(),
            synonym_properties: BTreeSet::new(),
            definition_properties: BTreeSet::new(),
            hidden_properties: BTreeSet::new(),
            hierarchical_properties: BTreeSet::new(),
            obsolete_marker_class: vocab::obo_obsolete_class(),
            subset_property: vocab::obo_subset_property(),
            deprecated_property: vocab::owl_deprecated(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_base_namespaces<I, S>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_namespaces = bases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_label_property(mut self, property: impl Into<TermIri>) -> Self {
        self.label_property = property.into();
        self
    }

    pub fn with_synonym_properties<I, T>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TermIri>,
    {
        self.synonym_properties = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_definition_properties<I, T>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TermIri>,
    {
        self.definition_properties = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hidden_properties<I, T>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TermIri>,
    {
        self.hidden_properties = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hierarchical_properties<I, T>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TermIri>,
    {
        self.hierarchical_properties = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_obsolete_marker(mut self, class: impl Into<TermIri>) -> Self {
        self.obsolete_marker_class = class.into();
        self
    }

    pub fn with_import_mapping(
        mut self,
        logical: impl Into<TermIri>,
        physical: impl Into<String>,
    ) -> Self {
        self.import_mappings.insert(logical.into(), physical.into());
        self
    }

    /// Is `iri` inside one of this ontology's own namespaces?
    pub fn is_local(&self, iri: &TermIri) -> bool {
        self.base_namespaces
            .iter()
            .any(|base| iri.as_str().starts_with(base.as_str()))
    }
}
