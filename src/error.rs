//! Error types for loading instance documents

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read instance file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse instance TOML: {0}")]
    Syntax(#[from] toml::de::Error),

    #[error("token index {index} is used by more than one token")]
    DuplicateTokenIndex { index: usize },

    #[error("edge #{edge} has unknown kind '{kind}' (expected \"dependency\" or \"span\")")]
    UnknownEdgeKind { edge: usize, kind: String },
}

impl DocumentError {
    pub fn duplicate_token(index: usize) -> Self {
        Self::DuplicateTokenIndex { index }
    }

    pub fn unknown_kind(edge: usize, kind: impl Into<String>) -> Self {
        Self::UnknownEdgeKind {
            edge,
            kind: kind.into(),
        }
    }
}
