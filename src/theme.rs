//! Token styles for the light and dark editor themes.

use std::fmt;
use std::str::FromStr;

use crate::Error;
use crate::token::TokenKind;

/// Which of the two editor themes is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    /// Name the theme is registered under.
    #[must_use]
    pub const fn theme_name(self) -> &'static str {
        match self {
            Self::Light => "sithra-light",
            Self::Dark => "sithra-dark",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(Error::InvalidThemeMode(s.to_string())),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

/// 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// ANSI truecolor foreground escape.
    #[must_use]
    pub fn ansi_fg(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parses `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Visual style of one token category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    pub foreground: Color,
    pub font_weight: FontWeight,
}

impl Style {
    const fn plain(foreground: Color) -> Self {
        Self {
            foreground,
            font_weight: FontWeight::Normal,
        }
    }

    const fn bold(foreground: Color) -> Self {
        Self {
            foreground,
            font_weight: FontWeight::Bold,
        }
    }

    /// ANSI escape that switches to this style.
    #[must_use]
    pub fn ansi(self) -> String {
        match self.font_weight {
            FontWeight::Normal => self.foreground.ansi_fg(),
            FontWeight::Bold => format!("\x1b[1m{}", self.foreground.ansi_fg()),
        }
    }
}

/// Editor chrome colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub line_highlight: Color,
    pub cursor: Color,
    pub selection: Color,
    pub error: Color,
    pub muted: Color,
    pub primary: Color,
    pub section: Color,
    pub key: Color,
    pub string: Color,
    pub boolean: Color,
    pub date: Color,
}

const LIGHT: Palette = Palette {
    background: Color::rgb(0xf0, 0xf2, 0xf5),
    foreground: Color::rgb(0x4c, 0x55, 0x66),
    line_highlight: Color::rgb(0xe5, 0xe7, 0xeb),
    cursor: Color::rgb(0x63, 0x66, 0xf1),
    selection: Color::rgb(0xe0, 0xe7, 0xff),
    error: Color::rgb(0xef, 0x44, 0x44),
    muted: Color::rgb(0x6e, 0x74, 0x87),
    primary: Color::rgb(0x8b, 0x5c, 0xf6),
    section: Color::rgb(0x76, 0x62, 0xb5),
    key: Color::rgb(0x4b, 0x53, 0x83),
    string: Color::rgb(0x63, 0x66, 0xf1),
    boolean: Color::rgb(0xec, 0x48, 0x99),
    date: Color::rgb(0x0e, 0xa5, 0xe9),
};

const DARK: Palette = Palette {
    background: Color::rgb(0x1e, 0x1e, 0x2e),
    foreground: Color::rgb(0xe6, 0xe9, 0xef),
    line_highlight: Color::rgb(0x31, 0x32, 0x44),
    cursor: Color::rgb(0xf5, 0xe0, 0xdc),
    selection: Color::rgb(0x58, 0x5b, 0x70),
    error: Color::rgb(0xf3, 0x8b, 0xa8),
    muted: Color::rgb(0x8e, 0x9a, 0xc0),
    primary: Color::rgb(0xc4, 0xb5, 0xfd),
    section: Color::rgb(0xbc, 0xa8, 0xff),
    key: Color::rgb(0xd5, 0xe3, 0xff),
    string: Color::rgb(0xa5, 0xb4, 0xfc),
    boolean: Color::rgb(0xfb, 0x71, 0x85),
    date: Color::rgb(0x38, 0xbd, 0xf8),
};

impl Palette {
    #[must_use]
    pub const fn for_mode(mode: ThemeMode) -> &'static Self {
        match mode {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }
}

/// Style for a token category under the given theme.
#[must_use]
pub const fn style_for(kind: TokenKind, mode: ThemeMode) -> Style {
    let p = Palette::for_mode(mode);
    match kind {
        TokenKind::Comment => Style::plain(p.muted),
        TokenKind::TableHeader | TokenKind::ArrayTableHeader => Style::bold(p.section),
        TokenKind::Key => Style::plain(p.key),
        TokenKind::StringLiteral => Style::plain(p.string),
        TokenKind::StringEscape | TokenKind::Integer | TokenKind::Float => Style::plain(p.primary),
        TokenKind::StringEscapeInvalid => Style::plain(p.error),
        TokenKind::Boolean => Style::plain(p.boolean),
        TokenKind::Date | TokenKind::DateTime | TokenKind::DateTimeTz => Style::plain(p.date),
        TokenKind::Delimiter | TokenKind::Whitespace | TokenKind::Unknown => {
            Style::plain(p.foreground)
        }
    }
}

/// Every category with its style, for one-time registration with a
/// rendering surface.
pub fn rules(mode: ThemeMode) -> impl Iterator<Item = (TokenKind, Style)> {
    TokenKind::ALL
        .into_iter()
        .map(move |kind| (kind, style_for(kind, mode)))
}
