//! Indentation configuration for generated literals.

use std::{fmt, str::FromStr};

const SPACES: &str = "                ";

/// Widest supported space indentation; wider requests are clamped.
pub const MAX_SPACES: u8 = SPACES.len() as u8;

/// Indentation unit repeated once per nesting level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
    /// Any other unit, written verbatim (e.g. two tabs).
    Custom(String),
}

impl Indent {
    /// Tab indentation, as gofmt writes it.
    pub const GO: Self = Self::Tab;

    /// 2-space indentation.
    pub const TWO_SPACES: Self = Self::Spaces(2);

    /// An arbitrary indent unit.
    pub fn custom(unit: impl Into<String>) -> Self {
        Self::Custom(unit.into())
    }

    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Spaces(width) => &SPACES[..usize::from((*width).min(MAX_SPACES))],
            Self::Tab => "\t",
            Self::Custom(unit) => unit,
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::GO
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spaces(width) => write!(f, "{}", width),
            Self::Tab => f.write_str("tab"),
            Self::Custom(unit) => f.write_str(unit),
        }
    }
}

/// Error returned when an indent specification cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIndentError(String);

impl fmt::Display for ParseIndentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid indent '{}': expected 'tab', a width, or a run of whitespace",
            self.0
        )
    }
}

impl std::error::Error for ParseIndentError {}

impl FromStr for Indent {
    type Err = ParseIndentError;

    /// Accepts `tab`, `\t`, a width such as `4`, a literal run of spaces, or
    /// any other run of spaces and tabs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("tab") || s == "\t" {
            return Ok(Self::Tab);
        }
        if !s.is_empty() && s.bytes().all(|b| b == b' ') {
            return Ok(Self::Spaces(clamp_width(s.len())));
        }
        if !s.is_empty() && s.bytes().all(|b| b == b' ' || b == b'\t') {
            return Ok(Self::Custom(s.to_string()));
        }
        s.trim()
            .parse::<usize>()
            .map(|width| Self::Spaces(clamp_width(width)))
            .map_err(|_| ParseIndentError(s.to_string()))
    }
}

fn clamp_width(width: usize) -> u8 {
    u8::try_from(width).unwrap_or(MAX_SPACES).min(MAX_SPACES)
}
