//! Typed, labeled edges over token positions

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// How an edge is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderKind {
    /// Directed arc above the tokens
    #[default]
    Dependency,
    /// Labeled rectangle under a contiguous token range
    Span,
}

/// A labeled connection between two tokens (equal endpoints make a self-loop)
///
/// Identity is `(start, end, label, edge_type)`. The `note`, `properties` and `description`
/// decorate an edge but never change which edge it is.
#[derive(Debug, Clone)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
    pub label: String,
    /// Optionally `prefix:postfix`; the prefix groups edges, the postfix carries eval status
    pub edge_type: String,
    pub kind: RenderKind,
    pub note: Option<String>,
    pub properties: BTreeSet<String>,
    pub description: Option<String>,
}

impl Edge {
    pub fn new(
        start: usize,
        end: usize,
        label: impl Into<String>,
        edge_type: impl Into<String>,
        kind: RenderKind,
    ) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            edge_type: edge_type.into(),
            kind,
            note: None,
            properties: BTreeSet::new(),
            description: None,
        }
    }

    pub fn dependency(
        start: usize,
        end: usize,
        label: impl Into<String>,
        edge_type: impl Into<String>,
    ) -> Self {
        Self::new(start, end, label, edge_type, RenderKind::Dependency)
    }

    pub fn span(
        start: usize,
        end: usize,
        label: impl Into<String>,
        edge_type: impl Into<String>,
    ) -> Self {
        Self::new(start, end, label, edge_type, RenderKind::Span)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.properties.insert(property.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }

    /// Part of the type before the first `:`, or the whole type
    pub fn type_prefix(&self) -> &str {
        match self.edge_type.split_once(':') {
            Some((prefix, _)) => prefix,
            None => &self.edge_type,
        }
    }

    /// Part of the type after the first `:`, if any
    pub fn type_postfix(&self) -> Option<&str> {
        self.edge_type.split_once(':').map(|(_, postfix)| postfix)
    }

    /// Label as drawn: the note, when present, is appended
    pub fn display_label(&self) -> String {
        match &self.note {
            Some(note) => format!("{}{}", self.label, note),
            None => self.label.clone(),
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.label == other.label
            && self.edge_type == other.edge_type
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        self.label.hash(state);
        self.edge_type.hash(state);
    }
}
