//! Editing behaviour registered alongside the token styles.

/// An opening and closing character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair {
    pub open: char,
    pub close: char,
}

const fn pair(open: char, close: char) -> Pair {
    Pair { open, close }
}

/// Static language configuration for an editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Identifier the language is registered under.
    pub id: &'static str,
    pub line_comment: &'static str,
    /// Pairs matched for bracket highlighting.
    pub brackets: &'static [Pair],
    /// Pairs closed automatically when the opener is typed.
    pub auto_closing_pairs: &'static [Pair],
    /// Pairs that wrap a selection when the opener is typed.
    pub surrounding_pairs: &'static [Pair],
}

const BRACKETS: [Pair; 3] = [pair('{', '}'), pair('[', ']'), pair('(', ')')];

const QUOTED: [Pair; 5] = [
    pair('{', '}'),
    pair('[', ']'),
    pair('(', ')'),
    pair('"', '"'),
    pair('\'', '\''),
];

/// Configuration of the `toml` language.
pub const TOML: LanguageConfig = LanguageConfig {
    id: "toml",
    line_comment: "#",
    brackets: &BRACKETS,
    auto_closing_pairs: &QUOTED,
    surrounding_pairs: &QUOTED,
};

impl LanguageConfig {
    /// Character inserted after `open` when it is typed, if any.
    #[must_use]
    pub fn auto_close(&self, open: char) -> Option<char> {
        self.auto_closing_pairs
            .iter()
            .find(|p| p.open == open)
            .map(|p| p.close)
    }

    /// Whether `c` is one half of a bracket pair.
    #[must_use]
    pub fn is_bracket(&self, c: char) -> bool {
        self.brackets.iter().any(|p| p.open == c || p.close == c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_close_but_are_not_brackets() {
        assert_eq!(TOML.auto_close('\''), Some('\''));
        assert_eq!(TOML.auto_close('{'), Some('}'));
        assert_eq!(TOML.auto_close('x'), None);
        assert!(TOML.is_bracket(']'));
        assert!(!TOML.is_bracket('"'));
    }
}
