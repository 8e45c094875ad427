//! Layout engine for dependency arcs and span rectangles
//!
//! Every pass draws onto a caller-owned [`Surface`] and returns its size plus the hit regions
//! it produced. Token bounds are estimated first so the arc and span passes can anchor to them.

pub mod config;
pub mod dependency;
pub mod depth;
pub mod error;
pub mod metrics;
pub mod span;
pub mod tokens;
pub mod types;

pub use config::{DependencyLayoutConfig, LayoutConfig, SpanLayoutConfig, TokenLayoutConfig};
pub use error::LayoutError;
pub use metrics::{MonospaceMetrics, TextMetrics};
pub use types::*;

use std::collections::{BTreeSet, HashSet};

use tracing::warn;

use crate::model::{Edge, Token};
use crate::stylesheet::Stylesheet;

/// Everything a layout pass reads but never changes
pub struct LayoutContext<'a, M: TextMetrics> {
    pub config: &'a LayoutConfig,
    pub stylesheet: &'a Stylesheet,
    pub metrics: &'a M,
}

impl<'a, M: TextMetrics> LayoutContext<'a, M> {
    pub fn new(config: &'a LayoutConfig, stylesheet: &'a Stylesheet, metrics: &'a M) -> Self {
        Self {
            config,
            stylesheet,
            metrics,
        }
    }

    /// Width of `text` in the configured font family
    pub fn label_width(&self, text: &str, font_size: u32) -> i32 {
        self.metrics
            .text_width(text, font_size, &self.config.font_family)
    }
}

/// Validate that every edge endpoint names a token of the instance.
pub fn validate_references(tokens: &[Token], edges: &[Edge]) -> Result<(), LayoutError> {
    let defined: BTreeSet<usize> = tokens.iter().map(|t| t.index).collect();

    for edge in edges {
        for endpoint in [edge.start, edge.end] {
            if !defined.contains(&endpoint) {
                return Err(LayoutError::invalid_reference(
                    edge.label.clone(),
                    edge.start,
                    edge.end,
                    endpoint,
                ));
            }
        }
    }
    Ok(())
}

/// Restrict `edges` to an explicit visible set.
///
/// `None` or an empty set leaves the edges untouched.
pub fn filter_visible(edges: Vec<Edge>, visible: Option<&HashSet<Edge>>) -> Vec<Edge> {
    let Some(visible) = visible.filter(|v| !v.is_empty()) else {
        return edges;
    };

    edges
        .into_iter()
        .filter(|edge| {
            let keep = visible.contains(edge);
            if !keep {
                warn!(
                    label = %edge.label,
                    start = edge.start,
                    end = edge.end,
                    "edge not in visible set, skipping"
                );
            }
            keep
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(n: usize) -> Vec<Token> {
        (0..n).map(|i| Token::new(i).with_property("word", "w")).collect()
    }

    #[test]
    fn test_validate_references_ok() {
        let edges = vec![Edge::dependency(0, 2, "nsubj", "dep"), Edge::span(1, 1, "NN", "pos")];
        assert!(validate_references(&tokens(3), &edges).is_ok());
    }

    #[test]
    fn test_validate_references_reports_missing_endpoint() {
        let edges = vec![Edge::dependency(0, 5, "obj", "dep")];
        assert_eq!(
            validate_references(&tokens(3), &edges),
            Err(LayoutError::invalid_reference("obj".to_string(), 0, 5, 5))
        );
    }

    #[test]
    fn test_filter_visible_empty_set_keeps_everything() {
        let edges = vec![Edge::dependency(0, 1, "a", "dep"), Edge::dependency(1, 2, "b", "dep")];
        assert_eq!(filter_visible(edges.clone(), None), edges);
        assert_eq!(filter_visible(edges.clone(), Some(&HashSet::new())), edges);
    }

    #[test]
    fn test_filter_visible_intersects() {
        let a = Edge::dependency(0, 1, "a", "dep");
        let b = Edge::dependency(1, 2, "b", "dep");
        // notes are not part of edge identity
        let visible = HashSet::from([b.clone().with_note("?")]);
        assert_eq!(filter_visible(vec![a, b.clone()], Some(&visible)), vec![b]);
    }
}
