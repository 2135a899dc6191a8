use std::fmt;

/// Byte range of a token within the text handed to the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Token categories produced by the lexer.
///
/// The set is closed: every byte of input lands in exactly one token
/// of one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Comment (`# ...`).
    Comment,
    /// Table header (`[name]`).
    TableHeader,
    /// Array-of-tables header (`[[name]]`).
    ArrayTableHeader,
    /// Bare or quoted key on the left of `=`.
    Key,
    /// The `=` of a key assignment.
    Delimiter,
    /// Run of spaces, tabs, and line breaks.
    Whitespace,
    /// String text, including its quotes.
    StringLiteral,
    /// Recognised escape sequence inside a string.
    StringEscape,
    /// Backslash sequence that is not a valid escape.
    StringEscapeInvalid,
    /// `true` or `false`.
    Boolean,
    /// Decimal integer.
    Integer,
    /// Decimal float with a fraction and/or exponent.
    Float,
    /// Local date (`1979-05-27`).
    Date,
    /// Local date-time (`1979-05-27T07:32:00`).
    DateTime,
    /// Offset date-time (`1979-05-27T07:32:00Z`).
    DateTimeTz,
    /// Anything no rule classifies.
    Unknown,
}

impl TokenKind {
    /// Every token kind, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Comment,
        Self::TableHeader,
        Self::ArrayTableHeader,
        Self::Key,
        Self::Delimiter,
        Self::Whitespace,
        Self::StringLiteral,
        Self::StringEscape,
        Self::StringEscapeInvalid,
        Self::Boolean,
        Self::Integer,
        Self::Float,
        Self::Date,
        Self::DateTime,
        Self::DateTimeTz,
        Self::Unknown,
    ];

    /// Short kebab-case name of the category.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::TableHeader => "table-header",
            Self::ArrayTableHeader => "array-table-header",
            Self::Key => "key",
            Self::Delimiter => "delimiter",
            Self::Whitespace => "whitespace",
            Self::StringLiteral => "string-literal",
            Self::StringEscape => "string-escape",
            Self::StringEscapeInvalid => "string-escape-invalid",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::DateTimeTz => "date-time-tz",
            Self::Unknown => "unknown",
        }
    }

    /// Editor scope name, for renderers that bind styles by scope.
    #[must_use]
    pub const fn scope(self) -> &'static str {
        match self {
            Self::Comment => "comment.line.number-sign.toml",
            Self::TableHeader => "entity.name.section.table.toml",
            Self::ArrayTableHeader => "entity.name.section.table.array.toml",
            Self::Key => "key.toml",
            Self::Delimiter => "delimiter.toml",
            Self::Whitespace => "white.toml",
            Self::StringLiteral => "string.quoted.toml",
            Self::StringEscape => "string.escape.toml",
            Self::StringEscapeInvalid => "string.escape.invalid.toml",
            Self::Boolean => "constant.other.boolean.toml",
            Self::Integer => "constant.numeric.integer.toml",
            Self::Float => "constant.numeric.float.toml",
            Self::Date => "constant.other.date.toml",
            Self::DateTime => "constant.other.datetime.toml",
            Self::DateTimeTz => "constant.other.datetime-with-timezone.toml",
            Self::Unknown => "source.toml",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}
