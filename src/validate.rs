//! Parser adapters that produce [`ParseError`]s.

use crate::diagnostic::ParseError;

/// Something that checks a whole document.
pub trait Validator {
    /// # Errors
    ///
    /// Returns the parser's error when `text` is not valid.
    fn validate(&mut self, text: &str) -> Result<(), ParseError>;
}

impl<F> Validator for F
where
    F: FnMut(&str) -> Result<(), ParseError>,
{
    fn validate(&mut self, text: &str) -> Result<(), ParseError> {
        self(text)
    }
}

/// Validates documents with the `toml` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlValidator;

impl Validator for TomlValidator {
    fn validate(&mut self, text: &str) -> Result<(), ParseError> {
        toml::from_str::<toml::Table>(text)
            .map(drop)
            .map_err(|err| from_toml_error(&err, text))
    }
}

/// Convert a `toml` error into a [`ParseError`].
///
/// Errors that carry a byte span become positioned TOML errors; the
/// rest are reported without a position.
#[must_use]
pub fn from_toml_error(err: &toml::de::Error, text: &str) -> ParseError {
    let message = err.message().trim_end().to_string();
    match err.span() {
        Some(span) => {
            let (line, column) = position(text, span.start);
            ParseError::toml(message, line, column)
        }
        None => ParseError::other("Error", message),
    }
}

/// 0-based line and character column of a byte offset.
#[must_use]
pub fn position(text: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &text[..offset];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before[line_start..].chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_counts_chars() {
        let text = "a = 1\nbé = x";
        assert_eq!(position(text, 0), (0, 0));
        assert_eq!(position(text, 6), (1, 0));
        // `=` sits after a two-byte character
        assert_eq!(position(text, 10), (1, 3));
        assert_eq!(position(text, 100), (1, 6));
    }

    #[test]
    fn valid_document() {
        assert!(TomlValidator.validate("[a]\nb = 1\n").is_ok());
    }

    #[test]
    fn invalid_document_is_positioned() {
        let err = TomlValidator
            .validate("a = 1\nb = ?\n")
            .expect_err("missing value");
        assert!(err.is_positioned());
        assert_eq!(err.line, 1);
    }

    #[test]
    fn closures_are_validators() {
        let mut reject =
            |_: &str| -> Result<(), ParseError> { Err(ParseError::other("Boom", "no")) };
        assert_eq!(reject.validate("").unwrap_err().name, "Boom");
    }
}
