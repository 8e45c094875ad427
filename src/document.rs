//! TOML instance documents
//!
//! ```toml
//! [[tokens]]
//! properties = [{ name = "word", value = "The" }, { name = "pos", value = "DT" }]
//!
//! [[edges]]
//! start = 1
//! end = 0
//! label = "det"
//! type = "dep"
//! ```
//!
//! A token's index defaults to its position in the list, and a property's `level` to its
//! position among the token's properties. Edge endpoints are not checked here;
//! layout rejects edges that point at missing tokens.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::DocumentError;
use crate::model::{Edge, Instance, RenderKind, Token};

#[derive(Deserialize)]
struct TomlInstance {
    #[serde(default)]
    tokens: Vec<TomlToken>,
    #[serde(default)]
    edges: Vec<TomlEdge>,
}

#[derive(Deserialize)]
struct TomlToken {
    index: Option<usize>,
    #[serde(default)]
    properties: Vec<TomlProperty>,
}

#[derive(Deserialize)]
struct TomlProperty {
    name: String,
    value: String,
    level: Option<usize>,
}

#[derive(Deserialize)]
struct TomlEdge {
    start: usize,
    end: usize,
    label: String,
    #[serde(rename = "type", default)]
    edge_type: String,
    kind: Option<String>,
    note: Option<String>,
    #[serde(default)]
    properties: Vec<String>,
    description: Option<String>,
}

fn parse_kind(position: usize, kind: Option<&str>) -> Result<RenderKind, DocumentError> {
    match kind {
        None | Some("dependency") => Ok(RenderKind::Dependency),
        Some("span") => Ok(RenderKind::Span),
        Some(other) => Err(DocumentError::unknown_kind(position, other)),
    }
}

/// Parse an instance from TOML text
pub fn parse(content: &str) -> Result<Instance, DocumentError> {
    let parsed: TomlInstance = toml::from_str(content)?;
    let mut instance = Instance::new();

    let mut seen = BTreeSet::new();
    for (position, raw) in parsed.tokens.into_iter().enumerate() {
        let index = raw.index.unwrap_or(position);
        if !seen.insert(index) {
            return Err(DocumentError::duplicate_token(index));
        }
        let mut token = Token::new(index);
        for property in raw.properties {
            match property.level {
                Some(level) => token.add_property_at_level(property.name, property.value, level),
                None => token.add_property(property.name, property.value),
            }
        }
        instance.tokens.push(token);
    }

    for (position, raw) in parsed.edges.into_iter().enumerate() {
        let kind = parse_kind(position, raw.kind.as_deref())?;
        let mut edge = Edge::new(raw.start, raw.end, raw.label, raw.edge_type, kind);
        edge.note = raw.note;
        edge.description = raw.description;
        edge.properties.extend(raw.properties);
        instance.add_edge(edge);
    }

    debug!(
        tokens = instance.tokens.len(),
        edges = instance.edges.len(),
        "parsed instance"
    );
    Ok(instance)
}

/// Read and parse an instance file
pub fn load(path: &Path) -> Result<Instance, DocumentError> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}
