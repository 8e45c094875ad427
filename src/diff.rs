//! Gold/guess comparison of two annotations of the same token sequence
//!
//! The result is an ordinary [`Instance`] whose edge types carry the evaluation status as a
//! postfix (`dep:Match`, `dep:FP`, `dep:FN`), so layout groups them by annotation type and the
//! stylesheet can color them by property.

use std::collections::HashSet;

use tracing::debug;

use crate::model::{Edge, Instance};

/// Evaluation status of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Match,
    /// Only in the guess
    FalsePositive,
    /// Only in the gold annotation
    FalseNegative,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Match => "Match",
            Status::FalsePositive => "FP",
            Status::FalseNegative => "FN",
        }
    }

    /// Status carried by a diffed edge's type postfix
    pub fn of(edge: &Edge) -> Option<Status> {
        match edge.type_postfix()? {
            "Match" => Some(Status::Match),
            "FP" => Some(Status::FalsePositive),
            "FN" => Some(Status::FalseNegative),
            _ => None,
        }
    }
}

/// Edge counts per status in a diffed instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub matches: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

pub fn tally(instance: &Instance) -> Tally {
    let mut tally = Tally::default();
    for edge in &instance.edges {
        match Status::of(edge) {
            Some(Status::Match) => tally.matches += 1,
            Some(Status::FalsePositive) => tally.false_positives += 1,
            Some(Status::FalseNegative) => tally.false_negatives += 1,
            None => {}
        }
    }
    tally
}

fn mark(edge: &Edge, status: Status) -> Edge {
    let mut marked = edge.clone();
    marked.edge_type = format!("{}:{}", edge.edge_type, status.as_str());
    marked.properties.insert(status.as_str().to_string());
    marked
}

/// Compare `guess` against `gold`; tokens are taken from the guess.
pub fn diff(gold: &Instance, guess: &Instance) -> Instance {
    let gold_edges: HashSet<&Edge> = gold.edges.iter().collect();
    let guess_edges: HashSet<&Edge> = guess.edges.iter().collect();

    let mut edges = Vec::with_capacity(gold.edges.len().max(guess.edges.len()));
    let mut seen = HashSet::new();
    for edge in &guess.edges {
        if !seen.insert(edge) {
            continue;
        }
        let status = if gold_edges.contains(edge) {
            Status::Match
        } else {
            Status::FalsePositive
        };
        edges.push(mark(edge, status));
    }
    for edge in &gold.edges {
        if !guess_edges.contains(edge) && seen.insert(edge) {
            edges.push(mark(edge, Status::FalseNegative));
        }
    }

    edges.sort_by(|a, b| {
        (a.start, a.end, &a.edge_type, &a.label).cmp(&(b.start, b.end, &b.edge_type, &b.label))
    });

    debug!(
        gold = gold.edges.len(),
        guess = guess.edges.len(),
        result = edges.len(),
        "diffed instances"
    );

    Instance {
        tokens: guess.tokens.clone(),
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sentence(edges: Vec<Edge>) -> Instance {
        let mut instance = Instance::new();
        instance.push_token(&[("word", "John")]);
        instance.push_token(&[("word", "sleeps")]);
        instance.push_token(&[("word", "well")]);
        instance.edges = edges;
        instance
    }

    #[test]
    fn test_statuses() {
        let gold = sentence(vec![
            Edge::dependency(1, 0, "nsubj", "dep"),
            Edge::dependency(1, 2, "advmod", "dep"),
        ]);
        let guess = sentence(vec![
            Edge::dependency(1, 0, "nsubj", "dep"),
            Edge::dependency(2, 1, "advmod", "dep"),
        ]);
        let result = diff(&gold, &guess);

        let summary: Vec<_> = result
            .edges
            .iter()
            .map(|e| (e.start, e.end, e.edge_type.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![(1, 0, "dep:Match"), (1, 2, "dep:FN"), (2, 1, "dep:FP")]
        );
        assert!(result.edges[1].properties.contains("FN"));
        assert_eq!(result.tokens, guess.tokens);
    }

    #[test]
    fn test_note_does_not_affect_matching() {
        let gold = sentence(vec![Edge::span(0, 0, "PER", "ner")]);
        let guess = sentence(vec![Edge::span(0, 0, "PER", "ner").with_note("0.9")]);
        let result = diff(&gold, &guess);

        assert_eq!(result.edges.len(), 1);
        assert_eq!(result.edges[0].edge_type, "ner:Match");
        assert_eq!(result.edges[0].note.as_deref(), Some("0.9"));
        assert_eq!(result.edges[0].type_prefix(), "ner");
    }

    #[test]
    fn test_label_mismatch_is_fp_and_fn() {
        let gold = sentence(vec![Edge::dependency(1, 0, "nsubj", "dep")]);
        let guess = sentence(vec![Edge::dependency(1, 0, "dobj", "dep")]);
        let result = diff(&gold, &guess);
        let types: Vec<_> = result.edges.iter().map(|e| e.edge_type.as_str()).collect();
        assert_eq!(types, vec!["dep:FN", "dep:FP"]);
    }

    #[test]
    fn test_identical_instances_match_everywhere() {
        let edges = vec![
            Edge::dependency(1, 0, "nsubj", "dep"),
            Edge::span(0, 2, "S", "clause"),
        ];
        let result = diff(&sentence(edges.clone()), &sentence(edges));
        assert!(result.edges.iter().all(|e| e.properties.contains("Match")));
    }

    #[test]
    fn test_tally() {
        let gold = sentence(vec![
            Edge::dependency(1, 0, "nsubj", "dep"),
            Edge::dependency(1, 2, "advmod", "dep"),
        ]);
        let guess = sentence(vec![
            Edge::dependency(1, 0, "nsubj", "dep"),
            Edge::dependency(2, 1, "advmod", "dep"),
            Edge::span(0, 2, "S", "clause"),
        ]);
        let result = diff(&gold, &guess);
        assert_eq!(Status::of(&result.edges[0]), Some(Status::Match));
        assert_eq!(
            tally(&result),
            Tally {
                matches: 1,
                false_positives: 2,
                false_negatives: 1,
            }
        );
        // undiffed edges carry no status
        assert_eq!(Status::of(&gold.edges[0]), None);
        assert_eq!(tally(&gold), Tally::default());
    }
}
