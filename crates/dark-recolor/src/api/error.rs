//! Unified error type for the dark-recolor public API.
//!
//! [`RecolorError`] wraps all error types from the crate into a single enum
//! for convenient `?` propagation in application code.

use std::fmt;

use crate::pixel::ImageError;
use crate::scheme::{ParseColorError, SchemeError};

/// Unified error type for the dark-recolor public API.
///
/// # Example
///
/// ```
/// use dark_recolor::{Color, RecolorError, Scheme};
///
/// fn scheme_from_hex(bg: &str, text: &str) -> Result<Scheme, RecolorError> {
///     let bg: Color = bg.parse()?;
///     let text: Color = text.parse()?;
///     Ok(Scheme::new("mine", bg, text))
/// }
///
/// assert!(scheme_from_hex("#000", "#fff").is_ok());
/// assert!(scheme_from_hex("#0000", "#fff").is_err());
/// ```
#[derive(Debug)]
pub enum RecolorError {
    /// Scheme lookup or construction failed
    Scheme(SchemeError),
    /// Color parsing error (invalid hex string)
    ParseColor(ParseColorError),
    /// Pixel buffer does not match its dimensions
    Image(ImageError),
}

impl fmt::Display for RecolorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecolorError::Scheme(err) => write!(f, "scheme error: {}", err),
            RecolorError::ParseColor(err) => write!(f, "color parse error: {}", err),
            RecolorError::Image(err) => write!(f, "image error: {}", err),
        }
    }
}

impl std::error::Error for RecolorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecolorError::Scheme(err) => Some(err),
            RecolorError::ParseColor(err) => Some(err),
            RecolorError::Image(err) => Some(err),
        }
    }
}

impl From<SchemeError> for RecolorError {
    fn from(err: SchemeError) -> Self {
        RecolorError::Scheme(err)
    }
}

impl From<ParseColorError> for RecolorError {
    fn from(err: ParseColorError) -> Self {
        RecolorError::ParseColor(err)
    }
}

impl From<ImageError> for RecolorError {
    fn from(err: ImageError) -> Self {
        RecolorError::Image(err)
    }
}
