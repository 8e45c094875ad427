//! Text width estimation used to size tokens and labels

use unicode_width::UnicodeWidthStr;

/// Deterministic text width in pixels for a font configuration
pub trait TextMetrics {
    fn text_width(&self, text: &str, font_size: u32, font_family: &str) -> i32;
}

impl<F> TextMetrics for F
where
    F: Fn(&str, u32, &str) -> i32,
{
    fn text_width(&self, text: &str, font_size: u32, font_family: &str) -> i32 {
        self(text, font_size, font_family)
    }
}

/// Fixed advance per terminal column, scaled by font size
///
/// Wide (CJK) characters count as two columns. The family is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Advance of one column as a fraction of the font size
    pub advance: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str, font_size: u32, _font_family: &str) -> i32 {
        let columns = text.width() as f64;
        (columns * font_size as f64 * self.advance).ceil() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_width() {
        let metrics = MonospaceMetrics::default();
        assert_eq!(metrics.text_width("", 10, "sans-serif"), 0);
        assert_eq!(metrics.text_width("abcde", 10, "sans-serif"), 30);
        assert_eq!(metrics.text_width("ab", 12, "serif"), 15);
    }

    #[test]
    fn test_wide_characters_count_double() {
        let metrics = MonospaceMetrics::default();
        assert_eq!(
            metrics.text_width("日本", 10, "sans-serif"),
            metrics.text_width("abcd", 10, "sans-serif")
        );
    }

    #[test]
    fn test_closure_metrics() {
        let fixed = |text: &str, _size: u32, _family: &str| text.len() as i32 * 7;
        assert_eq!(fixed.text_width("abc", 10, "mono"), 21);
    }
}
