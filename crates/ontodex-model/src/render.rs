//! Rendering anonymous class expressions for display.
//!
//! Structural edges carry identifiers; everything else (restrictions,
//! intersections, complements) is kept as text. The renderer is an injectable
//! capability so a serving layer can swap in its own syntax.

use crate::document::{ClassExpression, ImportClosure};
use crate::iri::TermIri;
use std::collections::HashMap;

/// Capability: render an anonymous class expression to a display string.
pub trait ExpressionRenderer: Send + Sync {
    fn render(&self, expression: &ClassExpression) -> String;
}

/// Manchester-style rendering (`partOf some Leg`, `A and B`, `not A`).
///
/// Terms display as their asserted label when one is known, else their short
/// form, else the full IRI.
#[derive(Debug, Default)]
pub struct ManchesterRenderer {
    labels: HashMap<TermIri, String>,
}

impl ManchesterRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(labels: HashMap<TermIri, String>) -> Self {
        Self { labels }
    }

    /// Seed the display provider from the closure's asserted labels.
    pub fn for_closure(closure: &ImportClosure, label_property: &TermIri) -> Self {
        Self {
            labels: closure.literal_assertions(label_property),
        }
    }

    fn display_term(&self, iri: &TermIri) -> String {
        if let Some(label) = self.labels.get(iri) {
            return label.clone();
        }
        iri.short_form().unwrap_or_else(|| iri.to_string())
    }

    fn render_operand(&self, expression: &ClassExpression) -> String {
        // parenthesize everything but bare names to keep nesting unambiguous
        match expression {
            ClassExpression::Named(_) => self.render(expression),
            _ => format!("({})", self.render(expression)),
        }
    }
}

impl ExpressionRenderer for ManchesterRenderer {
    fn render(&self, expression: &ClassExpression) -> String {
        match expression {
            ClassExpression::Named(iri) => self.display_term(iri),
            ClassExpression::SomeValuesFrom { property, filler } => {
                format!(
                    "{} some {}",
                    self.display_term(property),
                    self.render_operand(filler)
                )
            }
            ClassExpression::AllValuesFrom { property, filler } => {
                format!(
                    "{} only {}",
                    self.display_term(property),
                    self.render_operand(filler)
                )
            }
            ClassExpression::IntersectionOf(operands) => operands
                .iter()
                .map(|operand| self.render_operand(operand))
                .collect::<Vec<_>>()
                .join(" and "),
            ClassExpression::UnionOf(operands) => operands
                .iter()
                .map(|operand| self.render_operand(operand))
                .collect::<Vec<_>>()
                .join(" or "),
            ClassExpression::ComplementOf(operand) => {
                format!("not {}", self.render_operand(operand))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part_of() -> TermIri {
        TermIri::from("http://x.org/onto#partOf")
    }

    #[test]
    fn test_renders_existential_restriction() {
        let renderer = ManchesterRenderer::new();
        let expression = ClassExpression::some(part_of(), ClassExpression::named("http://x.org/onto#D"));
        assert_eq!(renderer.render(&expression), "partOf some D");
    }

    #[test]
    fn test_prefers_labels_over_short_forms() {
        let mut labels = HashMap::new();
        labels.insert(TermIri::from("http://x.org/onto#D"), "leg".to_string());
        let renderer = ManchesterRenderer::with_labels(labels);
        let expression = ClassExpression::some(part_of(), ClassExpression::named("http://x.org/onto#D"));
        assert_eq!(renderer.render(&expression), "partOf some leg");
    }

    #[test]
    fn test_nested_operands_are_parenthesized() {
        let renderer = ManchesterRenderer::new();
        let expression = ClassExpression::IntersectionOf(vec![
            ClassExpression::named("http://x.org/onto#A"),
            ClassExpression::some(part_of(), ClassExpression::named("http://x.org/onto#B")),
        ]);
        assert_eq!(renderer.render(&expression), "A and (partOf some B)");
    }

    #[test]
    fn test_complement() {
        let renderer = ManchesterRenderer::new();
        let expression =
            ClassExpression::ComplementOf(Box::new(ClassExpression::named("http://x.org/onto#A")));
        assert_eq!(renderer.render(&expression), "not A");
    }
}
