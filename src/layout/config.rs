//! Configuration for the layout engine

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a layout configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read layout config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse layout config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Token stacking and spacing
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TokenLayoutConfig {
    /// Vertical distance between property rows
    pub row_height: i32,
    /// Horizontal gap between neighbouring tokens
    pub margin: i32,
    pub font_size: u32,
}

impl Default for TokenLayoutConfig {
    fn default() -> Self {
        Self {
            row_height: 14,
            margin: 20,
            font_size: 12,
        }
    }
}

impl TokenLayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_height(mut self, row_height: i32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }
}

/// Arcs drawn above the tokens
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DependencyLayoutConfig {
    pub height_per_level: i32,
    /// Extra room around a token shared out between its anchors
    pub vertex_extra_space: i32,
    /// Bezier halves instead of rectangular paths
    pub curve: bool,
    pub arrow_size: i32,
    pub font_size: u32,
    /// Distance from the apex down to the label baseline
    pub label_offset: i32,
}

impl Default for DependencyLayoutConfig {
    fn default() -> Self {
        Self {
            height_per_level: 15,
            vertex_extra_space: 12,
            curve: true,
            arrow_size: 2,
            font_size: 9,
            label_offset: 10,
        }
    }
}

impl DependencyLayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_height_per_level(mut self, height: i32) -> Self {
        self.height_per_level = height;
        self
    }

    pub fn with_vertex_extra_space(mut self, space: i32) -> Self {
        self.vertex_extra_space = space;
        self
    }

    pub fn with_curve(mut self, curve: bool) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_arrow_size(mut self, size: i32) -> Self {
        self.arrow_size = size;
        self
    }
}

/// Rectangles stacked under the tokens
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpanLayoutConfig {
    pub height_per_level: i32,
    /// Gap kept above and below each rectangle inside its band
    pub buffer_height: i32,
    /// Horizontal room a label needs beyond its text width
    pub total_text_margin: i32,
    /// Shallow spans closest to the tokens
    pub revert: bool,
    pub separation_lines: bool,
    /// Rounded rectangles
    pub curve: bool,
    pub corner_radius: i32,
    pub font_size: u32,
    /// Vertical priority by edge type prefix; higher values are drawn farther out
    pub type_order: HashMap<String, i32>,
}

impl Default for SpanLayoutConfig {
    fn default() -> Self {
        Self {
            height_per_level: 15,
            buffer_height: 1,
            total_text_margin: 6,
            revert: true,
            separation_lines: true,
            curve: true,
            corner_radius: 5,
            font_size: 9,
            type_order: HashMap::new(),
        }
    }
}

impl SpanLayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_revert(mut self, revert: bool) -> Self {
        self.revert = revert;
        self
    }

    pub fn with_separation_lines(mut self, enabled: bool) -> Self {
        self.separation_lines = enabled;
        self
    }

    pub fn with_curve(mut self, curve: bool) -> Self {
        self.curve = curve;
        self
    }

    /// Give all spans whose type prefix is `edge_type` an explicit vertical priority
    pub fn with_type_order(mut self, edge_type: impl Into<String>, order: i32) -> Self {
        self.type_order.insert(edge_type.into(), order);
        self
    }
}

/// Configuration options for layout computation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub tokens: TokenLayoutConfig,
    pub dependency: DependencyLayoutConfig,
    pub span: SpanLayoutConfig,
    /// Handed to the text metrics provider
    pub font_family: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tokens: TokenLayoutConfig::default(),
            dependency: DependencyLayoutConfig::default(),
            span: SpanLayoutConfig::default(),
            font_family: "sans-serif".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_tokens(mut self, tokens: TokenLayoutConfig) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_dependency(mut self, dependency: DependencyLayoutConfig) -> Self {
        self.dependency = dependency;
        self
    }

    pub fn with_span(mut self, span: SpanLayoutConfig) -> Self {
        self.span = span;
        self
    }

    /// Switch curved drawing on or off for both arcs and spans
    pub fn with_curve(mut self, curve: bool) -> Self {
        self.dependency.curve = curve;
        self.span.curve = curve;
        self
    }
}
