//! Term identifiers and the short-form / legacy-id resolver.
//!
//! A [`TermIri`] is an opaque, globally unique identifier. Two derived display
//! forms exist:
//!
//! - the **short form**: the human-friendly trailing part of the IRI
//!   (fragment > last path segment > whole path > none)
//! - the **legacy id**: a `PREFIX:NUMBER` identifier recovered from short
//!   forms shaped like `CL_0000001`, as used by biomedical ontologies

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full IRI of an ontology term.
///
/// Identity is by string equality; the wrapper exists so maps keyed by terms
/// cannot be confused with maps keyed by arbitrary strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermIri(String);

impl TermIri {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short display form of this IRI, when one can be derived.
    pub fn short_form(&self) -> Option<String> {
        extract_short_form(self.as_str())
    }
}

impl fmt::Display for TermIri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TermIri {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TermIri {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Extract the "final part" of an IRI for display.
///
/// Rules, in order:
/// 1. a non-empty fragment (`...#Foo`) wins;
/// 2. else, if the remainder after the scheme/authority contains a `/`, the
///    segment after the last `/` (empty trailing segments cannot be
///    shortened);
/// 3. else the whole remainder, when non-empty.
pub fn extract_short_form(iri: &str) -> Option<String> {
    if let Some((_, fragment)) = iri.split_once('#') {
        if !fragment.is_empty() {
            return Some(fragment.to_string());
        }
    }

    // Strip scheme + authority separator; what remains plays the role of the
    // path for precedence purposes.
    let rest = match iri.find("://") {
        Some(at) => &iri[at + 3..],
        None => iri,
    };
    let rest = rest.split('#').next().unwrap_or(rest);

    if rest.contains('/') {
        let segment = rest.rsplit('/').next().unwrap_or("");
        if segment.is_empty() {
            None
        } else {
            Some(segment.to_string())
        }
    } else if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

/// Derive a legacy `PREFIX:NUMBER` identifier from a short form.
///
/// This is a *find*, not a full match: `obo_CL_0000001` yields
/// `CL:0000001` via its first embedded occurrence.
pub fn derive_obo_id(short_form: &str) -> Option<String> {
    let pattern = Regex::new(r"([A-Za-z_]+)_([0-9]+)").unwrap();
    let captures = pattern.captures(short_form)?;
    let prefix = captures.get(1)?.as_str();
    let number = captures.get(2)?.as_str();
    Some(format!("{prefix}:{number}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_form_prefers_fragment() {
        assert_eq!(
            extract_short_form("http://x.org/onto#Foo"),
            Some("Foo".to_string())
        );
        assert_eq!(
            extract_short_form("http://x.org/onto/sub#Bar"),
            Some("Bar".to_string())
        );
    }

    #[test]
    fn test_short_form_falls_back_to_last_path_segment() {
        assert_eq!(
            extract_short_form("http://x.org/onto/Foo"),
            Some("Foo".to_string())
        );
        assert_eq!(
            extract_short_form("http://purl.obolibrary.org/obo/CL_0000001"),
            Some("CL_0000001".to_string())
        );
    }

    #[test]
    fn test_short_form_whole_path_when_no_slash() {
        assert_eq!(extract_short_form("http://x.org"), Some("x.org".to_string()));
        assert_eq!(
            extract_short_form("urn:lsid:example"),
            Some("urn:lsid:example".to_string())
        );
    }

    #[test]
    fn test_short_form_none_when_nothing_usable() {
        assert_eq!(extract_short_form("http://x.org/onto/"), None);
        assert_eq!(extract_short_form(""), None);
        // empty fragment falls through to the path rules
        assert_eq!(extract_short_form("http://x.org/onto/#"), None);
    }

    #[test]
    fn test_obo_id_round_trip() {
        assert_eq!(derive_obo_id("CL_0000001"), Some("CL:0000001".to_string()));
        assert_eq!(derive_obo_id("GO_123"), Some("GO:123".to_string()));
        assert_eq!(derive_obo_id("hasPart"), None);
        assert_eq!(derive_obo_id(""), None);
    }

    #[test]
    fn test_obo_id_uses_first_embedded_match() {
        // find semantics: a match inside a longer string is accepted
        assert_eq!(
            derive_obo_id("obo_CL_0000001_extra"),
            Some("obo_CL:0000001".to_string())
        );
    }

    proptest! {
        #[test]
        fn prop_short_form_never_empty(iri in "\\PC*") {
            if let Some(short) = extract_short_form(&iri) {
                prop_assert!(!short.is_empty());
            }
        }

        #[test]
        fn prop_obo_id_from_well_formed_short_form(
            prefix in "[A-Za-z_]{1,8}",
            number in "[0-9]{1,7}",
        ) {
            let short = format!("{prefix}_{number}");
            let derived = derive_obo_id(&short).unwrap();
            prop_assert!(derived.contains(':'));
            prop_assert!(derived.ends_with(&number));
        }
    }
}
