//! Incremental highlighting across line edits.

use sithra_toml::{Error, Highlighter, LexState, Mode, TokenKind, tokenize};

fn line_kinds(hl: &Highlighter, index: usize) -> Vec<TokenKind> {
    hl.line(index)
        .expect("line exists")
        .tokens
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn empty_document_has_one_line() {
    let hl = Highlighter::default();
    assert_eq!(hl.line_count(), 1);
    assert!(hl.lines()[0].tokens.is_empty());
    assert!(hl.end_state().is_root());
}

#[test]
fn trailing_newline_adds_empty_line() {
    let hl = Highlighter::new("a = 1\n");
    assert_eq!(hl.line_count(), 2);
    assert_eq!(hl.text(), "a = 1\n");
}

#[test]
fn line_tokens_match_direct_tokenize() {
    let hl = Highlighter::new("a = 'x\nstill string' = 1\nb = 2");
    let mut state = LexState::root();
    for (index, text) in ["a = 'x", "still string' = 1", "b = 2"].iter().enumerate() {
        let (tokens, next) = tokenize(text, state);
        assert_eq!(hl.lines()[index].tokens, tokens);
        state = next;
    }
}

#[test]
fn string_continues_onto_next_line() {
    let hl = Highlighter::new("s = \"abc\ndef\" # done");
    assert_eq!(hl.lines()[0].end_state.mode(), Mode::DoubleQuoted);
    assert_eq!(
        line_kinds(&hl, 1),
        vec![
            TokenKind::StringLiteral,
            TokenKind::StringLiteral,
            TokenKind::Whitespace,
            TokenKind::Comment,
        ]
    );
}

#[test]
fn closing_a_string_recolors_following_lines() {
    let mut hl = Highlighter::new("s = \"open\nb = 1\nc = 2");
    assert_eq!(line_kinds(&hl, 2), vec![TokenKind::StringLiteral]);

    let range = hl.replace_line(0, "s = \"open\"").expect("in range");
    assert_eq!(range, 0..3);
    assert_eq!(line_kinds(&hl, 2)[0], TokenKind::Key);
    assert!(hl.end_state().is_root());
}

#[test]
fn relex_stops_once_states_agree() {
    let mut hl = Highlighter::new("a = 1\nb = 'x\ny'\nc = 3\nd = 4");
    // Line 1 still ends inside the string, so line 2 is untouched.
    let range = hl.replace_line(1, "bb = 'xyz").expect("in range");
    assert_eq!(range, 1..2);
}

#[test]
fn insert_and_remove_lines() {
    let mut hl = Highlighter::new("a = 1\nc = 3");
    hl.insert_line(1, "b = 2").expect("in range");
    assert_eq!(hl.text(), "a = 1\nb = 2\nc = 3");

    hl.insert_line(3, "d = 4").expect("append");
    assert_eq!(hl.line_count(), 4);

    hl.remove_line(0).expect("in range");
    assert_eq!(hl.text(), "b = 2\nc = 3\nd = 4");
    assert_eq!(line_kinds(&hl, 0)[0], TokenKind::Key);
}

#[test]
fn inserting_open_quote_swallows_rest() {
    let mut hl = Highlighter::new("a = 1\nb = 2");
    let range = hl.insert_line(0, "x = '").expect("in range");
    assert_eq!(range, 0..3);
    assert_eq!(hl.end_state().mode(), Mode::SingleQuoted);
}

#[test]
fn revision_moves_on_every_edit() {
    let mut hl = Highlighter::new("a = 1");
    let before = hl.revision();
    hl.replace_line(0, "a = 2").expect("in range");
    assert!(hl.revision() > before);
}

#[test]
fn insert_past_end_is_rejected() {
    let mut hl = Highlighter::new("a = 1");
    assert_eq!(
        hl.insert_line(5, "x"),
        Err(Error::LineOutOfRange { line: 5, count: 1 })
    );
    assert_eq!(
        hl.remove_line(1),
        Err(Error::LineOutOfRange { line: 1, count: 1 })
    );
}

#[test]
fn edits_with_line_breaks_become_separate_lines() {
    let mut hl = Highlighter::new("a = 1");
    let range = hl.replace_line(0, "a = 1\nb = 2").expect("in range");
    assert_eq!(range, 0..2);
    assert_eq!(hl.text(), "a = 1\nb = 2");
    assert_eq!(hl.lines(), Highlighter::new("a = 1\nb = 2").lines());

    hl.insert_line(1, "s = 'x\ny'").expect("in range");
    assert_eq!(hl.line_count(), 4);
    assert_eq!(hl.lines()[1].end_state.mode(), Mode::SingleQuoted);
    assert_eq!(hl.lines(), Highlighter::new(&hl.text()).lines());
}
