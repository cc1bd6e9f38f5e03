#![forbid(unsafe_code)]

//! Pixel and color types.
//!
//! A [`Pixel`] is one character cell: a glyph plus a foreground and
//! background [`Color`]. Compositing is "paint top over bottom": each of the
//! three channels keeps the top value unless the top is transparent.
//!
//! ```
//! use pixl_render::cell::{Color, Pixel};
//!
//! let bottom = Pixel::new('#', Color::Gray, Color::Black);
//! let top = Pixel::TRANSPARENT.with_background(Color::Red);
//! assert_eq!(bottom.merge(top), Pixel::new('#', Color::Gray, Color::Red));
//! ```

use core::fmt;
use core::str::FromStr;

/// A 16-entry palette color plus the [`Color::Transparent`] sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    DarkBlue = 1,
    DarkGreen = 2,
    DarkCyan = 3,
    DarkRed = 4,
    DarkMagenta = 5,
    DarkYellow = 6,
    Gray = 7,
    DarkGray = 8,
    Blue = 9,
    Green = 10,
    Cyan = 11,
    Red = 12,
    Magenta = 13,
    Yellow = 14,
    White = 15,
    /// Lets whatever is underneath show through.
    #[default]
    Transparent = 16,
}

impl Color {
    /// The 16 concrete colors in index order.
    pub const PALETTE: [Color; 16] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkCyan,
        Self::DarkRed,
        Self::DarkMagenta,
        Self::DarkYellow,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Cyan,
        Self::Red,
        Self::Magenta,
        Self::Yellow,
        Self::White,
    ];

    /// Palette index, or `None` for [`Color::Transparent`].
    #[inline]
    pub const fn index(self) -> Option<u8> {
        match self {
            Self::Transparent => None,
            other => Some(other as u8),
        }
    }

    /// Look up a concrete color by palette index.
    pub const fn from_index(index: u8) -> Result<Self, ColorError> {
        if index < 16 {
            Ok(Self::PALETTE[index as usize])
        } else {
            Err(ColorError::IndexOutOfRange(index))
        }
    }

    #[inline]
    pub const fn is_transparent(self) -> bool {
        matches!(self, Self::Transparent)
    }

    /// `top` unless it is transparent, else `self`.
    #[inline]
    pub const fn merge(self, top: Color) -> Color {
        if top.is_transparent() { self } else { top }
    }

    /// The next concrete palette color, wrapping after [`Color::White`].
    ///
    /// Never yields [`Color::Transparent`]; `Transparent.next()` is
    /// [`Color::Black`].
    pub const fn next(self) -> Color {
        match self.index() {
            Some(i) => Self::PALETTE[((i + 1) % 16) as usize],
            None => Self::Black,
        }
    }

    /// Standard terminal 16-color index for SGR output (0-7 normal, 8-15 bright).
    pub const fn ansi_index(self) -> Option<u8> {
        let ansi = match self {
            Self::Black => 0,
            Self::DarkRed => 1,
            Self::DarkGreen => 2,
            Self::DarkYellow => 3,
            Self::DarkBlue => 4,
            Self::DarkMagenta => 5,
            Self::DarkCyan => 6,
            Self::Gray => 7,
            Self::DarkGray => 8,
            Self::Red => 9,
            Self::Green => 10,
            Self::Yellow => 11,
            Self::Blue => 12,
            Self::Magenta => 13,
            Self::Cyan => 14,
            Self::White => 15,
            Self::Transparent => return None,
        };
        Some(ansi)
    }

    /// Lower-case name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::DarkBlue => "darkblue",
            Self::DarkGreen => "darkgreen",
            Self::DarkCyan => "darkcyan",
            Self::DarkRed => "darkred",
            Self::DarkMagenta => "darkmagenta",
            Self::DarkYellow => "darkyellow",
            Self::Gray => "gray",
            Self::DarkGray => "darkgray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Red => "red",
            Self::Magenta => "magenta",
            Self::Yellow => "yellow",
            Self::White => "white",
            Self::Transparent => "transparent",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Parse a color name, ignoring case, `_`, `-`, and spaces
    /// (`"Dark Blue"`, `"dark_blue"`, `"DARKBLUE"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let normalized = match normalized.as_str() {
            "grey" => "gray",
            "darkgrey" => "darkgray",
            other => other,
        };
        Self::PALETTE
            .iter()
            .copied()
            .chain([Self::Transparent])
            .find(|c| c.name() == normalized)
            .ok_or_else(|| ColorError::UnknownName(s.to_owned()))
    }
}

impl TryFrom<u8> for Color {
    type Error = ColorError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

/// Color lookup failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Palette indices run from 0 to 15.
    IndexOutOfRange(u8),
    /// The name matched no palette color.
    UnknownName(String),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange(index) => write!(f, "color index {index} is outside 0..16"),
            Self::UnknownName(name) => write!(f, "unknown color name: {name:?}"),
        }
    }
}

impl std::error::Error for ColorError {}

/// One character cell.
///
/// Pixels are immutable value data with structural equality. The
/// [`TRANSPARENT_CHAR`](Pixel::TRANSPARENT_CHAR) glyph and
/// [`Color::Transparent`] let lower layers show through when merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub character: char,
    pub foreground: Color,
    pub background: Color,
}

impl Pixel {
    /// Glyph sentinel meaning "keep the character underneath".
    pub const TRANSPARENT_CHAR: char = '\0';
    /// Glyph used when a pixel keeps only its colors.
    pub const BLANK_CHAR: char = ' ';

    /// A pixel that changes nothing when merged on top.
    pub const TRANSPARENT: Self = Self::new(
        Self::TRANSPARENT_CHAR,
        Color::Transparent,
        Color::Transparent,
    );

    #[inline]
    pub const fn new(character: char, foreground: Color, background: Color) -> Self {
        Self {
            character,
            foreground,
            background,
        }
    }

    /// A glyph with transparent colors.
    #[inline]
    pub const fn from_char(character: char) -> Self {
        Self::new(character, Color::Transparent, Color::Transparent)
    }

    #[inline]
    pub const fn with_character(mut self, character: char) -> Self {
        self.character = character;
        self
    }

    #[inline]
    pub const fn with_foreground(mut self, foreground: Color) -> Self {
        self.foreground = foreground;
        self
    }

    #[inline]
    pub const fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[inline]
    pub const fn has_transparent_char(&self) -> bool {
        self.character == Self::TRANSPARENT_CHAR
    }

    /// Check if every channel is transparent.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.has_transparent_char()
            && self.foreground.is_transparent()
            && self.background.is_transparent()
    }

    /// Paint `top` over `self`, channel by channel.
    #[inline]
    pub const fn merge(self, top: Pixel) -> Pixel {
        Pixel {
            character: if top.has_transparent_char() {
                self.character
            } else {
                top.character
            },
            foreground: self.foreground.merge(top.foreground),
            background: self.background.merge(top.background),
        }
    }

    /// Same colors with the glyph blanked.
    #[inline]
    pub const fn colors_only(self) -> Pixel {
        self.with_character(Self::BLANK_CHAR)
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}
