//! Per-line highlight cache with incremental re-lexing.
//!
//! Each line remembers the lexer state it was scanned from and the
//! state it ended in. After an edit, lines are re-lexed from the edited
//! one until a line's start state is the one it was last scanned with;
//! everything below that point is still valid.

use std::ops::Range;

use crate::Error;
use crate::lexer::{LexState, tokenize};
use crate::token::Token;

/// Highlight information for a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHighlights {
    /// Line text without its trailing `\n`.
    pub text: String,
    /// Tokens with offsets relative to the start of the line.
    pub tokens: Vec<Token>,
    /// State the line was scanned from.
    pub start_state: LexState,
    /// State to resume from on the next line.
    pub end_state: LexState,
}

impl LineHighlights {
    fn unscanned(text: String) -> Self {
        Self {
            text,
            tokens: Vec::new(),
            start_state: LexState::root(),
            end_state: LexState::root(),
        }
    }

    fn scan(&mut self, start_state: LexState) {
        let (tokens, end_state) = tokenize(&self.text, start_state.clone());
        self.tokens = tokens;
        self.start_state = start_state;
        self.end_state = end_state;
    }
}

/// Highlight state for a whole document, one entry per line.
///
/// There is always at least one line; empty text is a single empty line.
#[derive(Debug, Clone)]
pub struct Highlighter {
    lines: Vec<LineHighlights>,
    revision: u64,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new("")
    }
}

impl Highlighter {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut highlighter = Self {
            lines: Vec::new(),
            revision: 0,
        };
        highlighter.set_text(text);
        highlighter
    }

    /// Replace the whole document and re-lex every line.
    pub fn set_text(&mut self, text: &str) {
        self.lines = split_lines(text);
        let mut state = LexState::root();
        for line in &mut self.lines {
            line.scan(state);
            state = line.end_state.clone();
        }
        self.revision += 1;
    }

    /// Replace line `index` with `text`. Text containing `\n` replaces
    /// the one line with several.
    ///
    /// Returns the range of lines that had to be re-lexed.
    pub fn replace_line(&mut self, index: usize, text: &str) -> Result<Range<usize>, Error> {
        self.line_mut(index)?;
        let added = split_lines(text);
        let count = added.len();
        self.lines.splice(index..=index, added);
        Ok(self.relex(index..index + count))
    }

    /// Insert `text` before line `index`. `index == line_count()` appends;
    /// text containing `\n` inserts several lines.
    pub fn insert_line(&mut self, index: usize, text: &str) -> Result<Range<usize>, Error> {
        if index > self.lines.len() {
            return Err(Error::LineOutOfRange {
                line: index,
                count: self.lines.len(),
            });
        }
        let added = split_lines(text);
        let count = added.len();
        self.lines.splice(index..index, added);
        Ok(self.relex(index..index + count))
    }

    /// Remove line `index`. Removing the only line leaves one empty line.
    pub fn remove_line(&mut self, index: usize) -> Result<Range<usize>, Error> {
        self.line_mut(index)?;
        self.lines.remove(index);
        if self.lines.is_empty() {
            self.lines.push(LineHighlights::unscanned(String::new()));
        }
        let from = index.min(self.lines.len() - 1);
        Ok(self.relex(from..from + 1))
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&LineHighlights> {
        self.lines.get(index)
    }

    #[must_use]
    pub fn lines(&self) -> &[LineHighlights] {
        &self.lines
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Bumped on every edit.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// State after the last line.
    #[must_use]
    pub fn end_state(&self) -> &LexState {
        &self.lines[self.lines.len() - 1].end_state
    }

    /// The document text, lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut LineHighlights, Error> {
        let count = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(Error::LineOutOfRange { line: index, count })
    }

    /// Re-lex every line in `dirty`, then onwards until a line's start
    /// state is unchanged.
    fn relex(&mut self, dirty: Range<usize>) -> Range<usize> {
        self.revision += 1;
        let mut index = dirty.start;
        while index < self.lines.len() {
            let start_state = if index == 0 {
                LexState::root()
            } else {
                self.lines[index - 1].end_state.clone()
            };
            if index >= dirty.end && self.lines[index].start_state == start_state {
                break;
            }
            self.lines[index].scan(start_state);
            index += 1;
        }
        dirty.start..index
    }
}

fn split_lines(text: &str) -> Vec<LineHighlights> {
    text.split('\n')
        .map(|line| LineHighlights::unscanned(line.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Mode;
    use crate::token::TokenKind;

    #[test]
    fn splits_lines_and_carries_state() {
        let hl = Highlighter::new("a = 'x\ny'\nb = 1");
        assert_eq!(hl.line_count(), 3);
        assert_eq!(hl.lines()[0].end_state.mode(), Mode::SingleQuoted);
        assert!(hl.lines()[1].end_state.is_root());
        assert_eq!(hl.lines()[2].tokens[0].kind, TokenKind::Key);
    }

    #[test]
    fn edit_without_state_change_relexes_one_line() {
        let mut hl = Highlighter::new("a = 1\nb = 2\nc = 3");
        let range = hl.replace_line(0, "a = 10").expect("in range");
        assert_eq!(range, 0..1);
    }

    #[test]
    fn opening_a_string_relexes_following_lines() {
        let mut hl = Highlighter::new("a = 1\nb = 2\nc = 3");
        let range = hl.replace_line(0, "a = \"open").expect("in range");
        assert_eq!(range, 0..3);
        assert_eq!(hl.end_state().mode(), Mode::DoubleQuoted);
    }

    #[test]
    fn out_of_range_edit() {
        let mut hl = Highlighter::new("a = 1");
        let err = hl.replace_line(3, "x").unwrap_err();
        assert_eq!(err, Error::LineOutOfRange { line: 3, count: 1 });
    }

    #[test]
    fn multi_line_replacement_splits() {
        let mut hl = Highlighter::new("a = 1\nc = 3");
        let range = hl.replace_line(0, "a = 1\nb = 2").expect("in range");
        assert_eq!(range, 0..2);
        assert_eq!(hl.line_count(), 3);
        assert_eq!(hl.lines()[1].tokens[0].kind, TokenKind::Key);
    }

    #[test]
    fn removing_only_line_leaves_empty_line() {
        let mut hl = Highlighter::new("a = 1");
        hl.remove_line(0).expect("in range");
        assert_eq!(hl.line_count(), 1);
        assert_eq!(hl.text(), "");
    }
}
