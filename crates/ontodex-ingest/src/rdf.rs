//! RDF statement parsing via Sophia.
//!
//! Sophia hands back triples whose terms we re-read from their display forms
//! (`<iri>`, `_:bnode`, `"literal"@lang` / `^^<datatype>`); that keeps this
//! module independent of Sophia's term generics while supporting the three
//! serializations OWL documents actually ship in: N-Triples, Turtle and
//! RDF/XML.

use anyhow::{anyhow, Result};
use sophia::api::prelude::*;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RdfNode {
    Iri(String),
    BlankNode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RdfLiteral {
    pub lexical: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RdfObject {
    Node(RdfNode),
    Literal(RdfLiteral),
}

#[derive(Debug, Clone)]
pub struct RdfStatement {
    pub subject: RdfNode,
    pub predicate_iri: String,
    pub object: RdfObject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    NTriples,
    Turtle,
    RdfXml,
}

impl RdfFormat {
    /// Sniff the serialization from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|s| s.to_str())?;
        match ext.to_ascii_lowercase().as_str() {
            "nt" => Some(RdfFormat::NTriples),
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            "rdf" | "owl" | "xml" => Some(RdfFormat::RdfXml),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct RdfSinkError {
    message: String,
}

impl From<anyhow::Error> for RdfSinkError {
    fn from(value: anyhow::Error) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

fn unescape_rdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn parse_term_display(term: &str) -> Result<RdfObject> {
    let s = term.trim();

    if let Some(rest) = s.strip_prefix("<").and_then(|t| t.strip_suffix(">")) {
        return Ok(RdfObject::Node(RdfNode::Iri(rest.to_string())));
    }

    if let Some(rest) = s.strip_prefix("_:") {
        return Ok(RdfObject::Node(RdfNode::BlankNode(rest.to_string())));
    }

    if s.starts_with('"') {
        let mut end_quote = None;
        let mut prev_was_escape = false;
        for (i, ch) in s.char_indices().skip(1) {
            if ch == '"' && !prev_was_escape {
                end_quote = Some(i);
                break;
            }
            prev_was_escape = ch == '\\' && !prev_was_escape;
            if ch != '\\' {
                prev_was_escape = false;
            }
        }
        let Some(end) = end_quote else {
            return Err(anyhow!("invalid literal term (missing closing quote): {s}"));
        };

        let lexical = unescape_rdf_string(&s[1..end]);
        let rest = s[end + 1..].trim();

        let mut language = None;
        let mut datatype = None;
        if let Some(lang) = rest.strip_prefix('@') {
            language = Some(lang.to_string());
        } else if let Some(dt) = rest.strip_prefix("^^") {
            let dt = dt.trim();
            if let Some(dt_iri) = dt.strip_prefix("<").and_then(|t| t.strip_suffix(">")) {
                datatype = Some(dt_iri.to_string());
            } else if !dt.is_empty() {
                datatype = Some(dt.to_string());
            }
        }

        return Ok(RdfObject::Literal(RdfLiteral {
            lexical,
            datatype,
            language,
        }));
    }

    Err(anyhow!("unsupported RDF term form: {s}"))
}

fn parse_node_term_display(term: &str) -> Result<RdfNode> {
    match parse_term_display(term)? {
        RdfObject::Node(node) => Ok(node),
        RdfObject::Literal(_) => Err(anyhow!("expected IRI/blank node, got literal: {term}")),
    }
}

/// Parse a serialized document into a flat statement list.
pub fn parse_statements(bytes: &[u8], format: RdfFormat) -> Result<Vec<RdfStatement>> {
    let cursor = std::io::Cursor::new(bytes);
    let reader = std::io::BufReader::new(cursor);

    let mut out: Vec<RdfStatement> = Vec::new();

    macro_rules! drain_triples {
        ($parser:expr, $label:literal) => {{
            let mut parser = $parser;
            parser
                .try_for_each_triple(|t| -> std::result::Result<(), RdfSinkError> {
                    let subject =
                        parse_node_term_display(&t.s().to_string()).map_err(RdfSinkError::from)?;
                    let predicate =
                        parse_node_term_display(&t.p().to_string()).map_err(RdfSinkError::from)?;
                    let RdfNode::Iri(predicate_iri) = predicate else {
                        return Ok(());
                    };
                    let object =
                        parse_term_display(&t.o().to_string()).map_err(RdfSinkError::from)?;
                    out.push(RdfStatement {
                        subject,
                        predicate_iri,
                        object,
                    });
                    Ok(())
                })
                .map_err(|e| anyhow!(concat!("failed to parse ", $label, ": {}"), e))?;
        }};
    }

    match format {
        RdfFormat::NTriples => {
            drain_triples!(sophia::turtle::parser::nt::parse_bufread(reader), "N-Triples")
        }
        RdfFormat::Turtle => {
            drain_triples!(sophia::turtle::parser::turtle::parse_bufread(reader), "Turtle")
        }
        RdfFormat::RdfXml => {
            drain_triples!(sophia::xml::parser::parse_bufread(reader), "RDF/XML")
        }
    }

    Ok(out)
}
