//! TOML lexer, diagnostics, and validation scheduling for editors.
//!
//! The pieces behind a TOML editing surface: a resumable lexer that
//! classifies text for syntax highlighting, a mapper from parser errors
//! to editor markers, a debounce gate that decides when validation
//! runs, and the token styles of the light and dark themes.
//!
//! # Quick start
//!
//! ## Highlight text line by line
//!
//! ```
//! use sithra_toml::{LexState, Mode, TokenKind, tokenize};
//!
//! let (tokens, state) = tokenize("name = 'half", LexState::root());
//! assert_eq!(tokens[0].kind, TokenKind::Key);
//! assert_eq!(state.mode(), Mode::SingleQuoted);
//!
//! let (tokens, state) = tokenize("done'", state);
//! assert_eq!(tokens[0].text, "done");
//! assert!(state.is_root());
//! ```
//!
//! ## Turn a parser error into a marker
//!
//! ```
//! use sithra_toml::{ParseError, to_markers};
//!
//! let markers = to_markers(&ParseError::toml("expected `=`", 2, 5)).unwrap();
//! assert_eq!((markers[0].start_line, markers[0].start_column), (3, 6));
//! ```
//!
//! ## Validate while typing
//!
//! ```
//! use std::time::Duration;
//! use sithra_toml::{ManualClock, Session, SessionConfig, TomlValidator};
//!
//! let clock = ManualClock::new();
//! let mut session = Session::with_clock(SessionConfig::default(), TomlValidator, clock.clone());
//! session.set_text("a = ");
//! assert!(session.poll().is_none());
//!
//! clock.advance(Duration::from_millis(200));
//! let markers = session.poll().unwrap().unwrap();
//! assert_eq!(markers.len(), 1);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod config;
pub mod diagnostic;
pub mod document;
pub mod language;
pub mod lexer;
pub mod schedule;
pub mod session;
pub mod theme;
pub mod token;
pub mod validate;

pub use config::SessionConfig;
pub use diagnostic::{Marker, ParseError, Severity, TOML_ERROR, to_markers};
pub use document::{Highlighter, LineHighlights};
pub use language::{LanguageConfig, Pair, TOML};
pub use lexer::{LexState, Lexer, Mode, ROOT_RULES, STRING_RULES, tokenize, tokenize_document};
pub use schedule::{
    Clock, DEFAULT_WAIT, Debounced, Debouncer, ManualClock, SystemClock, Ticket, debounce,
    debounce_with_clock,
};
pub use session::Session;
pub use theme::{Color, FontWeight, Palette, Style, ThemeMode, style_for};
pub use token::{Span, Token, TokenKind};
pub use validate::{TomlValidator, Validator};

/// Unified error type for the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The parser failed with something other than a positioned
    /// TOML parse error.
    #[error("{name}: {message}")]
    Unpositioned { name: String, message: String },
    /// A line index past the end of the document.
    #[error("line {line} out of range, document has {count} line(s)")]
    LineOutOfRange { line: usize, count: usize },
    /// Unrecognised theme mode name.
    #[error("unknown theme mode: {0} (expected `light` or `dark`)")]
    InvalidThemeMode(String),
    /// Colour not in `#rrggbb` form.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}
