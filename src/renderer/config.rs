//! Configuration for SVG rendering

/// Configuration options for SVG output
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Padding around the drawing, in pixels
    pub padding: i32,

    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "as-" for "as-arc")
    pub class_prefix: Option<String>,

    /// Outline every hit region in red
    pub show_hits: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            padding: 5,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("as-".to_string()),
            show_hits: false,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    pub fn with_show_hits(mut self, show: bool) -> Self {
        self.show_hits = show;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SvgConfig::default();
        assert_eq!(config.padding, 5);
        assert!(config.standalone);
        assert!(config.pretty_print);
        assert_eq!(config.class_prefix, Some("as-".to_string()));
        assert!(!config.show_hits);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SvgConfig::new()
            .with_padding(10)
            .with_standalone(false)
            .with_pretty_print(false)
            .with_class_prefix("my-")
            .with_show_hits(true);

        assert_eq!(config.padding, 10);
        assert!(!config.standalone);
        assert!(!config.pretty_print);
        assert_eq!(config.class_prefix, Some("my-".to_string()));
        assert!(config.show_hits);
        assert_eq!(config.without_class_prefix().class_prefix, None);
    }
}
