//! Errors raised while building a color scheme
//!
//! Scheme anchors come from CLI flags, config files and interactive prompts
//! as hex strings in either the `#rgb` or `#rrggbb` form (the `#` is
//! optional). [`ParseColorError`] reports why such a string was rejected;
//! [`SchemeError`] wraps it with the anchor it belonged to.

use std::fmt;
use std::num::ParseIntError;

/// A background or text anchor that is not a usable hex color.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Neither 3 nor 6 digits after the optional `#`; holds the count seen
    DigitCount(usize),
    /// The string contains non-ASCII characters
    NonAscii,
    /// A digit outside `0-9`, `a-f`, `A-F`
    NotHex(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::NotHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::DigitCount(n) => {
                write!(f, "expected #rgb or #rrggbb, got {} digits", n)
            }
            ParseColorError::NonAscii => write!(f, "hex color must be ASCII"),
            ParseColorError::NotHex(err) => write!(f, "not a hex digit ({})", err),
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let ParseColorError::NotHex(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

/// Error type for scheme construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemeError {
    /// No preset is registered under this name
    UnknownScheme(String),
    /// The background anchor could not be parsed
    InvalidBackground(ParseColorError),
    /// The text anchor could not be parsed
    InvalidText(ParseColorError),
}

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemeError::UnknownScheme(name) => write!(f, "unknown color scheme '{}'", name),
            SchemeError::InvalidBackground(err) => write!(f, "invalid background color: {}", err),
            SchemeError::InvalidText(err) => write!(f, "invalid text color: {}", err),
        }
    }
}

impl std::error::Error for SchemeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemeError::InvalidBackground(err) | SchemeError::InvalidText(err) => Some(err),
            SchemeError::UnknownScheme(_) => None,
        }
    }
}
