#![allow(dead_code)]

use sithra_toml::{LexState, Token, TokenKind, tokenize};

/// Tokenize from the root mode and assert the coverage invariants:
/// tokens are non-empty, contiguous, and rebuild the input exactly.
pub fn lex_checked(input: &str) -> (Vec<Token>, LexState) {
    let (tokens, state) = tokenize(input, LexState::root());
    assert_covers(input, &tokens);
    (tokens, state)
}

pub fn assert_covers(input: &str, tokens: &[Token]) {
    let mut offset = 0;
    for token in tokens {
        assert!(!token.span.is_empty(), "empty token in {input:?}: {token:?}");
        assert_eq!(token.span.len(), token.text.len());
        assert_eq!(
            token.span.start, offset,
            "gap or overlap in {input:?} at {token:?}"
        );
        assert_eq!(&input[token.span.start..token.span.end], token.text);
        offset = token.span.end;
    }
    assert_eq!(offset, input.len(), "tokens stop short in {input:?}");
}

pub fn kinds(input: &str) -> Vec<TokenKind> {
    lex_checked(input).0.iter().map(|t| t.kind).collect()
}

/// `(kind, text)` pairs, ignoring whitespace tokens.
pub fn significant(input: &str) -> Vec<(TokenKind, String)> {
    lex_checked(input)
        .0
        .into_iter()
        .filter(|t| t.kind != TokenKind::Whitespace)
        .map(|t| (t.kind, t.text))
        .collect()
}
