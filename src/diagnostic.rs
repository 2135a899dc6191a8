//! Translation of parser failures into editor markers.
//!
//! Parsers report positions 0-based; editors count lines and columns
//! from 1. Only errors identified as TOML parse errors carry a usable
//! position. Anything else is handed back as [`Error::Unpositioned`]
//! so the host can show a plain notification instead.

use std::fmt;

use crate::Error;

/// Name carried by positioned TOML parse errors.
pub const TOML_ERROR: &str = "TomlError";

/// Structured error reported by an external TOML parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub name: String,
    pub message: String,
    /// 0-based line.
    pub line: usize,
    /// 0-based column.
    pub column: usize,
}

impl ParseError {
    /// A positioned TOML parse error.
    #[must_use]
    pub fn toml(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            name: TOML_ERROR.to_string(),
            message: message.into(),
            line,
            column,
        }
    }

    /// A failure without a meaningful position.
    #[must_use]
    pub fn other(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            line: 0,
            column: 0,
        }
    }

    #[must_use]
    pub fn is_positioned(&self) -> bool {
        self.name == TOML_ERROR
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

/// Marker severity, with the numeric codes editors use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Hint,
    Info,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Hint => 1,
            Self::Info => 2,
            Self::Warning => 4,
            Self::Error => 8,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hint => "hint",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A positioned diagnostic in 1-based editor coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub message: String,
    pub severity: Severity,
}

impl Marker {
    /// Zero-width error marker at a 1-based position.
    #[must_use]
    pub fn error_at(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            start_line: line,
            start_column: column,
            end_line: line,
            end_column: column,
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.start_line, self.start_column, self.severity, self.message
        )
    }
}

/// Map a parser error to editor markers.
///
/// # Errors
///
/// Returns [`Error::Unpositioned`] when `error` is not a positioned
/// TOML parse error.
pub fn to_markers(error: &ParseError) -> Result<Vec<Marker>, Error> {
    if !error.is_positioned() {
        return Err(Error::Unpositioned {
            name: error.name.clone(),
            message: error.message.clone(),
        });
    }
    Ok(vec![Marker::error_at(
        error.line + 1,
        error.column + 1,
        error.message.clone(),
    )])
}
