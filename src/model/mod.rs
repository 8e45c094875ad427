//! Annotated token sequences: tokens, typed edges and the interval relations between edges
//!
//! An [`Instance`] is what upstream collaborators hand to the layout engine: an ordered token
//! sequence plus the edges (dependencies and spans) drawn over it.

pub mod edge;
pub mod relations;
pub mod token;

pub use edge::{Edge, RenderKind};
pub use token::{Token, TokenProperty};

/// A sentence (or any token sequence) with its annotation edges
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instance {
    pub tokens: Vec<Token>,
    pub edges: Vec<Edge>,
}

impl Instance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token whose index is its position in the sequence
    pub fn push_token(&mut self, properties: &[(&str, &str)]) -> usize {
        let index = self.tokens.len();
        let mut token = Token::new(index);
        for (name, value) in properties {
            token.add_property(*name, *value);
        }
        self.tokens.push(token);
        index
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.iter().find(|t| t.index == index)
    }

    /// Edges of one render kind, in insertion order
    pub fn edges_of_kind(&self, kind: RenderKind) -> Vec<Edge> {
        self.edges
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }
}
