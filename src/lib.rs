//! arcspan - layout of dependency arcs and span rectangles over token sequences
//!
//! This library lays out an annotated sentence: directed arcs stacked above the tokens,
//! labeled span rectangles in bands below them, and renders the result to SVG.
//!
//! # Example
//!
//! ```rust
//! use arcspan::{render, Edge, Instance};
//!
//! let mut sentence = Instance::new();
//! sentence.push_token(&[("word", "dogs")]);
//! sentence.push_token(&[("word", "bark")]);
//! sentence.add_edge(Edge::dependency(1, 0, "nsubj", "dep"));
//!
//! let svg = render(&sentence).unwrap();
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("nsubj"));
//! ```

pub mod diff;
pub mod document;
pub mod error;
pub mod layout;
pub mod model;
pub mod renderer;
pub mod stylesheet;

pub use error::DocumentError;
pub use layout::{LayoutConfig, LayoutContext, LayoutError, MonospaceMetrics, TextMetrics};
pub use model::{Edge, Instance, RenderKind, Token};
pub use renderer::{render_sentence, render_svg, SentenceLayout, SvgConfig};

use thiserror::Error;
use tracing::info;

// Re-export Stylesheet for public API
pub use stylesheet::Stylesheet;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error while reading an instance document
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
    /// Debug mode: outline hit regions and log them
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Render an instance to SVG with default configuration
pub fn render(instance: &Instance) -> Result<String, RenderError> {
    render_with_config(instance, RenderConfig::default())
}

/// Render an instance to SVG with custom configuration
///
/// Text is measured with [`MonospaceMetrics`].
///
/// # Example
///
/// ```rust
/// use arcspan::{render_with_config, Edge, Instance, LayoutConfig, RenderConfig, SvgConfig};
///
/// let mut sentence = Instance::new();
/// sentence.push_token(&[("word", "Paris")]);
/// sentence.add_edge(Edge::span(0, 0, "LOC", "ner"));
///
/// let config = RenderConfig::new()
///     .with_layout(LayoutConfig::default().with_curve(false))
///     .with_svg(SvgConfig::default().with_padding(10));
///
/// let svg = render_with_config(&sentence, config).unwrap();
/// assert!(svg.contains("LOC"));
/// ```
pub fn render_with_config(
    instance: &Instance,
    config: RenderConfig,
) -> Result<String, RenderError> {
    let metrics = MonospaceMetrics::default();
    let ctx = LayoutContext::new(&config.layout, &config.stylesheet, &metrics);
    let sentence = render_sentence(instance, &ctx, None)?;

    let mut svg_config = config.svg;
    if config.debug {
        info!(width = sentence.width, height = sentence.height, "layout");
        for hit in &sentence.hits {
            let target = match hit.target {
                layout::HitTarget::Edge(i) => sentence
                    .edges
                    .get(i)
                    .map(|e| format!("edge {}({}->{})", e.label, e.start, e.end))
                    .unwrap_or_default(),
                layout::HitTarget::Token(i) => format!("token {}", i),
            };
            info!(
                x = hit.origin.x,
                y = hit.origin.y,
                w = hit.width,
                h = hit.height,
                "{}",
                target
            );
        }
        svg_config.show_hits = true;
    }

    Ok(render_svg(&sentence, &svg_config))
}
