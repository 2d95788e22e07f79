//! The ontology-loader capability boundary.
//!
//! Loading and parsing ontology documents is an external concern; the engine
//! only needs something that turns a [`SourceConfig`] into an
//! [`ImportClosure`]. The default RDF-backed implementation lives in
//! `ontodex-ingest`.

use crate::config::{ConfigError, SourceConfig};
use crate::document::ImportClosure;
use thiserror::Error;

/// Degraded, non-fatal load failures. The engine logs these and still
/// publishes an empty index so blocked readers are released.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("i/o error reading ontology document: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse `{location}`: {message}")]
    Parse { location: String, message: String },
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Resolves and parses an ontology document plus its import closure.
pub trait OntologyLoader: Send + Sync {
    /// Validate the configuration before any build attempt. Called at engine
    /// construction; failures here are fatal.
    fn validate(&self, config: &SourceConfig) -> Result<(), ConfigError> {
        let _ = config;
        Ok(())
    }

    fn load(&self, config: &SourceConfig) -> Result<ImportClosure, LoadError>;
}
