//! Tokens and their stacked properties

/// A named value attached to a token, drawn in rows ordered by `level`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenProperty {
    pub name: String,
    pub value: String,
    pub level: usize,
}

/// A single position in the token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Position in the linear order. Not the array position after filtering.
    pub index: usize,
    properties: Vec<TokenProperty>,
}

impl Token {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            properties: Vec::new(),
        }
    }

    /// Add a property at the next free level
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let level = self.properties.len();
        self.add_property_at_level(name, value, level);
    }

    pub fn add_property_at_level(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        level: usize,
    ) {
        self.properties.push(TokenProperty {
            name: name.into(),
            value: value.into(),
            level,
        });
        // Stable: equal levels keep insertion order.
        self.properties.sort_by_key(|p| p.level);
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_property(name, value);
        self
    }

    /// Properties in drawing order (ascending level)
    pub fn properties(&self) -> &[TokenProperty] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Value of the topmost property, usually the word form
    pub fn text(&self) -> &str {
        self.properties
            .first()
            .map(|p| p.value.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_property_count() {
        let token = Token::new(0).with_property("word", "ran").with_property("pos", "VBD");
        let levels: Vec<_> = token.properties().iter().map(|p| p.level).collect();
        assert_eq!(levels, vec![0, 1]);
    }

    #[test]
    fn test_explicit_level_reorders() {
        let mut token = Token::new(3);
        token.add_property("pos", "NN");
        token.add_property("lemma", "dog");
        token.add_property_at_level("word", "dogs", 0);

        let names: Vec<_> = token.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["pos", "word", "lemma"]);
        assert_eq!(token.property("lemma"), Some("dog"));
        assert_eq!(token.text(), "NN");
    }

    #[test]
    fn test_text_of_empty_token() {
        assert_eq!(Token::new(0).text(), "");
    }
}
