//! Stylesheet system for edge and token colors
//!
//! Edges are colored by explicit, prioritized rules: property colors first (lowest level wins,
//! ties by property name), then type rules in order (first match wins), then the caller's
//! fallback. Stylesheets are TOML documents so a palette can be swapped without code changes.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::Color;
use crate::model::Edge;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("type color rule #{index} must set exactly one of `contains` or `exact`")]
    InvalidRule { index: usize },
}

/// How a type color rule matches an edge type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeMatch {
    /// Edge type contains the substring
    Contains(String),
    /// Edge type equals the string
    Exact(String),
}

impl TypeMatch {
    pub fn matches(&self, edge_type: &str) -> bool {
        match self {
            TypeMatch::Contains(needle) => edge_type.contains(needle.as_str()),
            TypeMatch::Exact(value) => edge_type == value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeColorRule {
    pub matcher: TypeMatch,
    pub color: Color,
}

/// Color for edges carrying `property`; lower `level` takes priority
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyColor {
    pub property: String,
    pub color: Color,
    #[serde(default)]
    pub level: i32,
}

/// A palette for tokens, arcs and spans
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub type_colors: Vec<TypeColorRule>,
    pub property_colors: Vec<PropertyColor>,
    /// First property row of each token
    pub token_primary: Color,
    /// Remaining property rows
    pub token_secondary: Color,
    /// Fill for spans no rule colors
    pub span_fill: Color,
    pub separator: Color,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: TomlColors,
    #[serde(default)]
    type_colors: Vec<TomlTypeRule>,
    #[serde(default)]
    property_colors: Vec<PropertyColor>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct TomlColors {
    token_primary: Option<Color>,
    token_secondary: Option<Color>,
    span_fill: Option<Color>,
    separator: Option<Color>,
}

#[derive(Deserialize)]
struct TomlTypeRule {
    contains: Option<String>,
    exact: Option<String>,
    color: Color,
}

/// Default palette - black arcs, gray secondary rows, diff statuses in red and blue
const DEFAULT_PALETTE: &str = r##"
[metadata]
name = "default"

[colors]
token-primary = "#000000"
token-secondary = "#808080"
span-fill = "#d3d3d3"
separator = "#d3d3d3"

# Diff statuses: a missing gold edge outranks a spurious guess edge
[[property_colors]]
property = "FN"
color = "#0000ff"
level = 0

[[property_colors]]
property = "FP"
color = "#ff0000"
level = 1
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    ///
    /// Token and span colors missing from the document fall back to the default palette.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        let type_colors = parsed
            .type_colors
            .into_iter()
            .enumerate()
            .map(|(index, rule)| {
                let matcher = match (rule.contains, rule.exact) {
                    (Some(needle), None) => TypeMatch::Contains(needle),
                    (None, Some(value)) => TypeMatch::Exact(value),
                    _ => return Err(StylesheetError::InvalidRule { index }),
                };
                Ok(TypeColorRule {
                    matcher,
                    color: rule.color,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            type_colors,
            property_colors: parsed.property_colors,
            token_primary: parsed.colors.token_primary.unwrap_or(Color::BLACK),
            token_secondary: parsed.colors.token_secondary.unwrap_or(Color::GRAY),
            span_fill: parsed.colors.span_fill.unwrap_or(Color::LIGHT_GRAY),
            separator: parsed.colors.separator.unwrap_or(Color::LIGHT_GRAY),
        })
    }

    /// Append a type rule; rules added earlier win
    pub fn with_type_color(mut self, matcher: TypeMatch, color: Color) -> Self {
        self.type_colors.push(TypeColorRule { matcher, color });
        self
    }

    pub fn with_property_color(
        mut self,
        property: impl Into<String>,
        color: Color,
        level: i32,
    ) -> Self {
        self.property_colors.push(PropertyColor {
            property: property.into(),
            color,
            level,
        });
        self
    }

    /// Resolve the color of an edge, or None when no rule applies
    pub fn edge_color(&self, edge: &Edge) -> Option<Color> {
        let by_property = self
            .property_colors
            .iter()
            .filter(|rule| edge.properties.contains(&rule.property))
            .min_by(|a, b| a.level.cmp(&b.level).then_with(|| a.property.cmp(&b.property)));
        if let Some(rule) = by_property {
            return Some(rule.color);
        }

        self.type_colors
            .iter()
            .find(|rule| rule.matcher.matches(&edge.edge_type))
            .map(|rule| rule.color)
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}
