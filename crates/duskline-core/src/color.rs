//! 24-bit RGB colors written as CSS-style hex strings.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string (without `#`) was neither 3 nor 6 digits long.
    #[error("color `{0}` must have 3 or 6 hex digits")]
    Length(String),
    /// The string contained a character that is not a hex digit.
    #[error("color `{0}` contains a non-hex digit")]
    Digit(String),
}

/// A 24-bit RGB color.
///
/// Parses `#rgb` and `#rrggbb` (the leading `#` is optional) and always
/// prints as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as a tuple.
    pub const fn channels(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::Digit(s.to_string()));
        }

        let expanded: String = match digits.len() {
            // Shorthand: each digit doubles, so `#abc` is `#aabbcc`.
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(ColorError::Length(s.to_string())),
        };

        let n = u32::from_str_radix(&expanded, 16).map_err(|_| ColorError::Digit(s.to_string()))?;
        Ok(Self::new(
            ((n >> 16) & 0xff) as u8,
            ((n >> 8) & 0xff) as u8,
            (n & 0xff) as u8,
        ))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl From<HexColor> for Color {
    fn from(color: HexColor) -> Self {
        Color::Rgb(color.r, color.g, color.b)
    }
}
