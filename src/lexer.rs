//! Resumable TOML lexer for syntax highlighting.
//!
//! The lexer never fails: every byte of input is classified into
//! exactly one token, and tokens are contiguous. Classification is
//! driven by ordered rule tables, one per lexical mode; at each scan
//! position the first rule that matches wins.
//!
//! Strings may be left open at the end of the input. The returned
//! [`LexState`] then still holds the string mode, so a caller lexing
//! line by line keeps classifying the following lines as string text
//! until the closing quote shows up.

use std::collections::VecDeque;

use crate::token::{Span, Token, TokenKind};

/// Lexical mode in effect at a scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Top-level TOML.
    Root,
    /// Inside a `'...'` string.
    SingleQuoted,
    /// Inside a `"..."` string.
    DoubleQuoted,
}

impl Mode {
    const fn quote(self) -> Option<u8> {
        match self {
            Self::Root => None,
            Self::SingleQuoted => Some(b'\''),
            Self::DoubleQuoted => Some(b'"'),
        }
    }
}

/// Mode stack carried from one lexer call to the next.
///
/// `Mode::Root` always sits at the bottom of the stack and is never
/// popped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LexState {
    stack: Vec<Mode>,
}

impl LexState {
    #[must_use]
    pub fn root() -> Self {
        Self {
            stack: vec![Mode::Root],
        }
    }

    /// The innermost mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.stack.last().copied().unwrap_or(Mode::Root)
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.stack.len() == 1
    }

    /// All modes, outermost first.
    #[must_use]
    pub fn modes(&self) -> &[Mode] {
        &self.stack
    }

    fn push(&mut self, mode: Mode) {
        self.stack.push(mode);
    }

    fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }
}

impl Default for LexState {
    fn default() -> Self {
        Self::root()
    }
}

/// A named entry in a rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    scan: fn(&Cursor<'_>) -> Option<Scan>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Root-mode rules in precedence order.
///
/// The order matters: `[[` headers before `[` headers, and each date
/// form before the shorter form it extends, and floats before
/// integers so `1.0` and `1e9` are never cut short.
pub const ROOT_RULES: &[Rule] = &[
    Rule {
        name: "comment",
        scan: scan_comment,
    },
    Rule {
        name: "array-table-header",
        scan: scan_array_table_header,
    },
    Rule {
        name: "table-header",
        scan: scan_table_header,
    },
    Rule {
        name: "key",
        scan: scan_key,
    },
    Rule {
        name: "date-time-tz",
        scan: scan_date_time_tz,
    },
    Rule {
        name: "date-time",
        scan: scan_date_time,
    },
    Rule {
        name: "date",
        scan: scan_date,
    },
    Rule {
        name: "float",
        scan: scan_float,
    },
    Rule {
        name: "integer",
        scan: scan_integer,
    },
    Rule {
        name: "boolean",
        scan: scan_boolean,
    },
    Rule {
        name: "string",
        scan: scan_string_open,
    },
    Rule {
        name: "whitespace",
        scan: scan_whitespace,
    },
];

/// Rules for both string modes. The quote comes from the active mode.
pub const STRING_RULES: &[Rule] = &[
    Rule {
        name: "string-text",
        scan: scan_string_text,
    },
    Rule {
        name: "string-escape",
        scan: scan_escape,
    },
    Rule {
        name: "string-escape-invalid",
        scan: scan_invalid_escape,
    },
    Rule {
        name: "string-close",
        scan: scan_string_close,
    },
];

/// Tokenize `input` starting in `state`.
///
/// Returns every token together with the state to resume from on the
/// next piece of text.
#[must_use]
pub fn tokenize(input: &str, state: LexState) -> (Vec<Token>, LexState) {
    let mut lexer = Lexer::with_state(input, state);
    let tokens = lexer.by_ref().collect();
    (tokens, lexer.into_state())
}

/// Tokenize a whole document starting from the root mode.
#[must_use]
pub fn tokenize_document(input: &str) -> Vec<Token> {
    tokenize(input, LexState::root()).0
}

/// Lazy token stream over one piece of text.
#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    state: LexState,
    pending: VecDeque<Token>,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_state(input, LexState::root())
    }

    #[must_use]
    pub fn with_state(input: &'a str, state: LexState) -> Self {
        Self {
            input,
            pos: 0,
            state,
            pending: VecDeque::new(),
        }
    }

    /// State after the tokens yielded so far.
    #[must_use]
    pub const fn state(&self) -> &LexState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> LexState {
        self.state
    }

    fn step(&mut self) {
        let mode = self.state.mode();
        let cursor = Cursor {
            input: self.input,
            pos: self.pos,
            mode,
        };
        let rules = match mode {
            Mode::Root => ROOT_RULES,
            Mode::SingleQuoted | Mode::DoubleQuoted => STRING_RULES,
        };
        let scan = rules
            .iter()
            .find_map(|rule| (rule.scan)(&cursor))
            .unwrap_or_else(|| scan_unknown(&cursor));

        for (kind, len) in scan.pieces {
            let start = self.pos;
            let end = start + len;
            self.pending.push_back(Token {
                kind,
                text: self.input[start..end].to_string(),
                span: Span::new(start, end),
            });
            self.pos = end;
        }

        match scan.transition {
            Transition::Stay => {}
            Transition::Push(mode) => self.state.push(mode),
            Transition::Pop => self.state.pop(),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.pending.is_empty() && self.pos < self.input.len() {
            self.step();
        }
        self.pending.pop_front()
    }
}

#[derive(Debug, Clone, Copy)]
enum Transition {
    Stay,
    Push(Mode),
    Pop,
}

/// Result of a matching rule: one or more adjacent pieces, all
/// non-empty, plus the mode change to apply afterwards.
#[derive(Debug)]
struct Scan {
    pieces: Vec<(TokenKind, usize)>,
    transition: Transition,
}

impl Scan {
    fn single(kind: TokenKind, len: usize) -> Self {
        Self {
            pieces: vec![(kind, len)],
            transition: Transition::Stay,
        }
    }

    const fn then(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    mode: Mode,
}

impl Cursor<'_> {
    fn rest(&self) -> &[u8] {
        &self.input.as_bytes()[self.pos..]
    }

    /// Only spaces and tabs between the previous line break and here.
    fn at_line_start(&self) -> bool {
        self.input.as_bytes()[..self.pos]
            .iter()
            .rev()
            .take_while(|&&b| b != b'\n')
            .all(|&b| matches!(b, b' ' | b'\t' | b'\r'))
    }

    /// `len` if the match is not glued to a word character on either side.
    fn bounded(&self, len: usize) -> Option<usize> {
        let bytes = self.input.as_bytes();
        let before = self.pos > 0 && is_word(bytes[self.pos - 1]);
        let after = bytes.get(self.pos + len).is_some_and(|&b| is_word(b));
        (!before && !after).then_some(len)
    }
}

const fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

const fn is_bare_key(b: u8) -> bool {
    is_word(b) || b == b'-' || b == b'$'
}

fn scan_comment(cursor: &Cursor<'_>) -> Option<Scan> {
    let rest = cursor.rest();
    if rest.first() != Some(&b'#') {
        return None;
    }
    let len = rest
        .iter()
        .position(|&b| b == b'\n' || b == b'\r')
        .unwrap_or(rest.len());
    Some(Scan::single(TokenKind::Comment, len))
}

/// Length of the bracket contents starting at `from`.
fn header_name_len(rest: &[u8], from: usize) -> usize {
    rest[from..]
        .iter()
        .take_while(|&&b| !matches!(b, b'[' | b']' | b'\n'))
        .count()
}

fn scan_array_table_header(cursor: &Cursor<'_>) -> Option<Scan> {
    let rest = cursor.rest();
    if !rest.starts_with(b"[[") || !cursor.at_line_start() {
        return None;
    }
    let end = 2 + header_name_len(rest, 2);
    rest[end..]
        .starts_with(b"]]")
        .then(|| Scan::single(TokenKind::ArrayTableHeader, end + 2))
}

fn scan_table_header(cursor: &Cursor<'_>) -> Option<Scan> {
    let rest = cursor.rest();
    if rest.first() != Some(&b'[') || !cursor.at_line_start() {
        return None;
    }
    let end = 1 + header_name_len(rest, 1);
    (rest.get(end) == Some(&b']')).then(|| Scan::single(TokenKind::TableHeader, end + 1))
}

fn scan_key(cursor: &Cursor<'_>) -> Option<Scan> {
    if !cursor.at_line_start() {
        return None;
    }
    let rest = cursor.rest();
    let key_len = match rest.first() {
        Some(&quote @ (b'\'' | b'"')) => {
            let inner = rest[1..]
                .iter()
                .position(|&b| b == quote || b == b'\n')?;
            if rest[1 + inner] != quote {
                return None;
            }
            inner + 2
        }
        Some(&b) if is_bare_key(b) => rest.iter().take_while(|&&b| is_bare_key(b)).count(),
        _ => return None,
    };
    let ws = rest[key_len..]
        .iter()
        .take_while(|&&b| b == b' ' || b == b'\t')
        .count();
    if rest.get(key_len + ws) != Some(&b'=') {
        return None;
    }

    let mut pieces = vec![(TokenKind::Key, key_len)];
    if ws > 0 {
        pieces.push((TokenKind::Whitespace, ws));
    }
    pieces.push((TokenKind::Delimiter, 1));
    Some(Scan {
        pieces,
        transition: Transition::Stay,
    })
}

fn digits(bytes: &[u8], at: usize, count: usize) -> bool {
    bytes
        .get(at..at + count)
        .is_some_and(|s| s.iter().all(u8::is_ascii_digit))
}

/// `YYYY-MM-DD`
fn date_len(b: &[u8]) -> Option<usize> {
    let ok = digits(b, 0, 4)
        && b.get(4) == Some(&b'-')
        && digits(b, 5, 2)
        && b.get(7) == Some(&b'-')
        && digits(b, 8, 2);
    ok.then_some(10)
}

/// `THH:MM:SS` at `at`, returning the base length and the length of an
/// optional `.fraction` that follows it.
fn time_len(b: &[u8], at: usize) -> Option<(usize, usize)> {
    let ok = b.get(at) == Some(&b'T')
        && digits(b, at + 1, 2)
        && b.get(at + 3) == Some(&b':')
        && digits(b, at + 4, 2)
        && b.get(at + 6) == Some(&b':')
        && digits(b, at + 7, 2);
    if !ok {
        return None;
    }
    let base = 9;
    let fraction = if b.get(at + base) == Some(&b'.') {
        let run = b[at + base + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if run > 0 { run + 1 } else { 0 }
    } else {
        0
    };
    Some((base, fraction))
}

/// `Z` or `+HH:MM` / `-HH:MM`
fn offset_len(b: &[u8], at: usize) -> Option<usize> {
    match b.get(at) {
        Some(b'Z') => Some(1),
        Some(b'+' | b'-')
            if digits(b, at + 1, 2) && b.get(at + 3) == Some(&b':') && digits(b, at + 4, 2) =>
        {
            Some(6)
        }
        _ => None,
    }
}

fn scan_date_time_tz(cursor: &Cursor<'_>) -> Option<Scan> {
    let rest = cursor.rest();
    let date = date_len(rest)?;
    let (time, fraction) = time_len(rest, date)?;
    let head = date + time + fraction;
    let offset = offset_len(rest, head)?;
    let len = cursor.bounded(head + offset)?;
    Some(Scan::single(TokenKind::DateTimeTz, len))
}

fn scan_date_time(cursor: &Cursor<'_>) -> Option<Scan> {
    let rest = cursor.rest();
    let date = date_len(rest)?;
    let (time, fraction) = time_len(rest, date)?;
    // A fraction glued to a word character falls back to the bare time.
    let len = cursor
        .bounded(date + time + fraction)
        .or_else(|| cursor.bounded(date + time))?;
    Some(Scan::single(TokenKind::DateTime, len))
}

fn scan_date(cursor: &Cursor<'_>) -> Option<Scan> {
    let len = cursor.bounded(date_len(cursor.rest())?)?;
    Some(Scan::single(TokenKind::Date, len))
}

/// `(_?[0-9])*`
fn digit_run(b: &[u8]) -> usize {
    let mut i = 0;
    loop {
        match (b.get(i), b.get(i + 1)) {
            (Some(d), _) if d.is_ascii_digit() => i += 1,
            (Some(b'_'), Some(d)) if d.is_ascii_digit() => i += 2,
            _ => return i,
        }
    }
}

/// `[+-]?(0|[1-9](_?[0-9])*)`
fn integer_len(b: &[u8]) -> Option<usize> {
    let sign = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    match b.get(sign) {
        Some(b'0') => Some(sign + 1),
        Some(b'1'..=b'9') => Some(sign + 1 + digit_run(&b[sign + 1..])),
        _ => None,
    }
}

/// `.[0-9](_?[0-9])*`, or 0 when absent.
fn fraction_len(b: &[u8]) -> usize {
    match (b.first(), b.get(1)) {
        (Some(b'.'), Some(d)) if d.is_ascii_digit() => 2 + digit_run(&b[2..]),
        _ => 0,
    }
}

/// `[eE][+-]?[0-9](_?[0-9])*`, or 0 when absent.
fn exponent_len(b: &[u8]) -> usize {
    if !matches!(b.first(), Some(b'e' | b'E')) {
        return 0;
    }
    let sign = usize::from(matches!(b.get(1), Some(b'+' | b'-')));
    match b.get(1 + sign) {
        Some(d) if d.is_ascii_digit() => 2 + sign + digit_run(&b[2 + sign..]),
        _ => 0,
    }
}

fn scan_float(cursor: &Cursor<'_>) -> Option<Scan> {
    let rest = cursor.rest();
    let int = integer_len(rest)?;
    let fraction = fraction_len(&rest[int..]);
    let exponent = exponent_len(&rest[int + fraction..]);
    if fraction == 0 && exponent == 0 {
        return None;
    }
    let len = cursor.bounded(int + fraction + exponent)?;
    Some(Scan::single(TokenKind::Float, len))
}

fn scan_integer(cursor: &Cursor<'_>) -> Option<Scan> {
    let len = cursor.bounded(integer_len(cursor.rest())?)?;
    Some(Scan::single(TokenKind::Integer, len))
}

fn scan_boolean(cursor: &Cursor<'_>) -> Option<Scan> {
    let rest = cursor.rest();
    let len = if rest.starts_with(b"true") {
        4
    } else if rest.starts_with(b"false") {
        5
    } else {
        return None;
    };
    Some(Scan::single(TokenKind::Boolean, cursor.bounded(len)?))
}

fn scan_string_open(cursor: &Cursor<'_>) -> Option<Scan> {
    let mode = match cursor.rest().first() {
        Some(b'\'') => Mode::SingleQuoted,
        Some(b'"') => Mode::DoubleQuoted,
        _ => return None,
    };
    Some(Scan::single(TokenKind::StringLiteral, 1).then(Transition::Push(mode)))
}

fn scan_whitespace(cursor: &Cursor<'_>) -> Option<Scan> {
    let len = cursor
        .rest()
        .iter()
        .take_while(|&&b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        .count();
    (len > 0).then(|| Scan::single(TokenKind::Whitespace, len))
}

/// Fallback: a run of word characters, or a single character.
fn scan_unknown(cursor: &Cursor<'_>) -> Scan {
    let rest = cursor.rest();
    let words = rest.iter().take_while(|&&b| is_word(b)).count();
    let len = if words > 0 {
        words
    } else {
        cursor.input[cursor.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8)
    };
    Scan::single(TokenKind::Unknown, len)
}

fn scan_string_text(cursor: &Cursor<'_>) -> Option<Scan> {
    let quote = cursor.mode.quote()?;
    let len = cursor
        .rest()
        .iter()
        .take_while(|&&b| b != quote && b != b'\\')
        .count();
    (len > 0).then(|| Scan::single(TokenKind::StringLiteral, len))
}

fn hex_run(b: &[u8], max: usize) -> usize {
    b.iter()
        .take(max)
        .take_while(|b| b.is_ascii_hexdigit())
        .count()
}

fn scan_escape(cursor: &Cursor<'_>) -> Option<Scan> {
    let rest = cursor.rest();
    if rest.first() != Some(&b'\\') {
        return None;
    }
    let len = match rest.get(1)? {
        b'a' | b'b' | b'f' | b'n' | b'r' | b't' | b'v' | b'\\' | b'"' | b'\'' => 2,
        b'x' => match hex_run(&rest[2..], 4) {
            0 => return None,
            n => 2 + n,
        },
        b'u' if hex_run(&rest[2..], 4) == 4 => 6,
        b'U' if hex_run(&rest[2..], 8) == 8 => 10,
        _ => return None,
    };
    Some(Scan::single(TokenKind::StringEscape, len))
}

fn scan_invalid_escape(cursor: &Cursor<'_>) -> Option<Scan> {
    if cursor.rest().first() != Some(&b'\\') {
        return None;
    }
    let next = cursor.input[cursor.pos + 1..]
        .chars()
        .next()
        .filter(|&c| c != '\n' && c != '\r')
        .map_or(0, char::len_utf8);
    Some(Scan::single(TokenKind::StringEscapeInvalid, 1 + next))
}

fn scan_string_close(cursor: &Cursor<'_>) -> Option<Scan> {
    let quote = cursor.mode.quote()?;
    (cursor.rest().first() == Some(&quote))
        .then(|| Scan::single(TokenKind::StringLiteral, 1).then(Transition::Pop))
}
