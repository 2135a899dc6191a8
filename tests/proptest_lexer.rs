//! Property-based tests with proptest.
//!
//! The lexer must classify every byte of any input exactly once, give
//! the same answer every time, and the incremental highlighter must
//! agree with a from-scratch lex after any sequence of line edits.

mod common;

use common::assert_covers;
use proptest::prelude::*;
use sithra_toml::{Highlighter, LexState, tokenize};

// -- Strategies --

/// Text built from the characters the rules care about, so that
/// headers, keys, numbers, dates, and strings actually show up.
fn tomlish() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9 \\t\\[\\]=#'\"\\\\._:+eTZ-]{0,40}",
        "[ ]{0,2}[a-z]{1,6} = (true|1979-05-27T07:32:00Z|-1_000|6\\.5e-3|'[a-z\\\\]{0,6}'?)",
        "[ ]{0,2}\\[{1,2}[a-z.]{0,6}\\]{1,2}",
    ]
}

/// Edit payloads. Some carry line breaks and so span several lines.
fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => tomlish(),
        1 => "[^\\n]{0,20}",
        1 => "[a-z =']{0,6}\\n[a-z =\"\\n]{0,12}",
    ]
}

fn start_state() -> impl Strategy<Value = LexState> {
    prop_oneof![
        Just(LexState::root()),
        Just(tokenize("'", LexState::root()).1),
        Just(tokenize("\"", LexState::root()).1),
    ]
}

#[derive(Debug, Clone)]
enum Edit {
    Replace(usize, String),
    Insert(usize, String),
    Remove(usize),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => (0..8usize, line()).prop_map(|(i, s)| Edit::Replace(i, s)),
        1 => (0..8usize, line()).prop_map(|(i, s)| Edit::Insert(i, s)),
        1 => (0..8usize).prop_map(Edit::Remove),
    ]
}

// -- Properties --

proptest! {
    #[test]
    fn arbitrary_text_is_fully_covered(input in any::<String>(), state in start_state()) {
        let (tokens, _) = tokenize(&input, state);
        assert_covers(&input, &tokens);
    }

    #[test]
    fn tomlish_text_is_fully_covered(input in tomlish(), state in start_state()) {
        let (tokens, _) = tokenize(&input, state);
        assert_covers(&input, &tokens);
    }

    #[test]
    fn lexing_is_idempotent(input in tomlish()) {
        prop_assert_eq!(
            tokenize(&input, LexState::root()),
            tokenize(&input, LexState::root())
        );
    }

    #[test]
    fn incremental_matches_fresh_lex(
        lines in prop::collection::vec(line(), 1..8),
        edits in prop::collection::vec(edit(), 0..12),
    ) {
        let mut hl = Highlighter::new(&lines.join("\n"));
        for edit in edits {
            let count = hl.line_count();
            // Indices are wrapped so every edit applies.
            let result = match edit {
                Edit::Replace(i, s) => hl.replace_line(i % count, &s),
                Edit::Insert(i, s) => hl.insert_line(i % (count + 1), &s),
                Edit::Remove(i) => hl.remove_line(i % count),
            };
            prop_assert!(result.is_ok());
        }
        let fresh = Highlighter::new(&hl.text());
        prop_assert_eq!(hl.lines(), fresh.lines());
    }
}
