//! RDF-backed ontology loading for Ontodex (boundary adapter).
//!
//! This crate sits at the interop boundary:
//!
//! - it parses RDF-serialized OWL documents (untrusted input),
//! - it emits the neutral [`OntologyDocument`] model consumed by the
//!   indexing engine,
//! - it resolves `owl:imports` through configured logical-IRI to physical
//!   location mappings, never over the network.
//!
//! Supported serializations: N-Triples (`.nt`), Turtle (`.ttl`), RDF/XML
//! (`.rdf`, `.owl`, `.xml`).

pub mod owl;
pub mod rdf;

use ontodex_model::{
    ConfigError, ImportClosure, LoadError, OntologyDocument, OntologyLoader, SourceConfig, TermIri,
};
use rdf::RdfFormat;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default [`OntologyLoader`]: reads documents from the filesystem.
///
/// An import whose logical IRI has no configured physical mapping is skipped
/// with a warning; a root document that cannot be read or parsed fails the
/// load.
#[derive(Debug, Default, Clone, Copy)]
pub struct RdfOntologyLoader;

impl RdfOntologyLoader {
    pub fn new() -> Self {
        Self
    }
}

/// Turn a configured location into a filesystem path.
///
/// Accepted forms: a plain path, or a `file://` URL. Remote URLs are
/// rejected here rather than fetched.
pub fn resolve_location(location: &str) -> Result<PathBuf, ConfigError> {
    if location.is_empty() {
        return Err(ConfigError::MalformedLocation {
            location: location.to_string(),
            reason: "location is empty".to_string(),
        });
    }
    if let Some(path) = location.strip_prefix("file://") {
        if path.is_empty() {
            return Err(ConfigError::MalformedLocation {
                location: location.to_string(),
                reason: "file:// URL has no path".to_string(),
            });
        }
        return Ok(PathBuf::from(path));
    }
    if location.contains("://") {
        return Err(ConfigError::MalformedLocation {
            location: location.to_string(),
            reason: "only filesystem paths and file:// URLs are supported".to_string(),
        });
    }
    Ok(PathBuf::from(location))
}

fn parse_document(path: &Path) -> Result<OntologyDocument, LoadError> {
    let format = RdfFormat::from_path(path).ok_or_else(|| {
        LoadError::UnsupportedFormat(path.display().to_string())
    })?;
    let bytes = std::fs::read(path)?;
    let statements = rdf::parse_statements(&bytes, format).map_err(|e| LoadError::Parse {
        location: path.display().to_string(),
        message: e.to_string(),
    })?;
    let document = owl::document_from_statements(&statements);
    debug!(
        location = %path.display(),
        declarations = document.declarations.len(),
        annotations = document.annotations.len(),
        "parsed ontology document"
    );
    Ok(document)
}

impl OntologyLoader for RdfOntologyLoader {
    fn validate(&self, config: &SourceConfig) -> Result<(), ConfigError> {
        resolve_location(&config.location)?;
        for (logical, physical) in &config.import_mappings {
            resolve_location(physical).map_err(|e| ConfigError::UnresolvableMapping {
                iri: logical.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    fn load(&self, config: &SourceConfig) -> Result<ImportClosure, LoadError> {
        let root_path = resolve_location(&config.location).map_err(|e| LoadError::Parse {
            location: config.location.clone(),
            message: e.to_string(),
        })?;
        let root = parse_document(&root_path)?;

        let mut queue: VecDeque<TermIri> = root.imports.iter().cloned().collect();
        let mut seen: HashSet<TermIri> = HashSet::new();
        seen.insert(config.ontology_iri.clone());
        if let Some(iri) = &root.iri {
            seen.insert(iri.clone());
        }

        let mut closure = ImportClosure::new(root);
        while let Some(logical) = queue.pop_front() {
            if !seen.insert(logical.clone()) {
                continue;
            }
            let Some(physical) = config.import_mappings.get(&logical) else {
                warn!(import = %logical, "no physical mapping for import; skipping");
                continue;
            };
            // mappings were validated at construction time
            let path = match resolve_location(physical) {
                Ok(path) => path,
                Err(e) => {
                    warn!(import = %logical, error = %e, "bad import mapping; skipping");
                    continue;
                }
            };
            match parse_document(&path) {
                Ok(imported) => {
                    queue.extend(imported.imports.iter().cloned());
                    closure.push(imported);
                }
                Err(e) => {
                    warn!(import = %logical, error = %e, "failed to load import; skipping");
                }
            }
        }
        Ok(closure)
    }
}
