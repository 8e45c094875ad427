//! Error types for the layout engine

use thiserror::Error;

/// Errors that can occur during layout computation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// An edge points at a token that is not in the token sequence
    #[error("edge '{label}' ({start} -> {end}) references missing token {missing}")]
    InvalidEdgeReference {
        label: String,
        start: usize,
        end: usize,
        missing: usize,
    },

    /// The dominance relation between edges is not acyclic
    #[error("dominance cycle between edges: {}", cycle.join(" -> "))]
    CycleDetected { cycle: Vec<String> },
}

impl LayoutError {
    /// Create an invalid edge reference error
    pub fn invalid_reference(
        label: impl Into<String>,
        start: usize,
        end: usize,
        missing: usize,
    ) -> Self {
        Self::InvalidEdgeReference {
            label: label.into(),
            start,
            end,
            missing,
        }
    }

    /// Create a cycle error
    pub fn cycle(cycle: Vec<String>) -> Self {
        Self::CycleDetected { cycle }
    }
}
