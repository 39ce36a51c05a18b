//! Two-color dark-mode schemes and the preset registry

use std::borrow::Cow;

use super::error::SchemeError;
use crate::color::Color;

/// Channel-pair difference at or above which an anchor counts as tinted.
pub const NEAR_GRAY_TOLERANCE: f64 = 0.02;

/// Built-in schemes as `(name, background, text)` 8-bit triples.
const PRESETS: &[(&str, [u8; 3], [u8; 3])] = &[
    ("dark", [0x1a, 0x1a, 0x1a], [0xe0, 0xe0, 0xe0]),
    ("dracula", [0x28, 0x2a, 0x36], [0xf8, 0xf8, 0xf2]),
    ("gruvbox", [0x28, 0x28, 0x28], [0xeb, 0xdb, 0xb2]),
    ("monokai", [0x27, 0x28, 0x22], [0xf8, 0xf8, 0xf0]),
    ("nord", [0x2e, 0x34, 0x40], [0xec, 0xef, 0xf4]),
    ("sepia", [0x1e, 0x19, 0x14], [0xe6, 0xda, 0xc8]),
    ("solarized", [0x00, 0x2b, 0x36], [0x83, 0x94, 0x96]),
];

/// A dark-mode target palette.
///
/// `background` is the dark anchor that light page tones map to; `text` is
/// the light anchor that dark ink maps to. Schemes are built once and shared
/// read-only by every transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Scheme {
    name: Cow<'static, str>,
    background: Color,
    text: Color,
}

impl Scheme {
    /// Create a scheme from two anchor colors.
    pub fn new(name: impl Into<Cow<'static, str>>, background: Color, text: Color) -> Self {
        Self {
            name: name.into(),
            background,
            text,
        }
    }

    /// Look up a built-in scheme by name (case-insensitive).
    ///
    /// # Example
    /// ```
    /// use dark_recolor::Scheme;
    /// let nord = Scheme::preset("Nord").unwrap();
    /// assert_eq!(nord.background().hex(), "#2e3440");
    /// assert!(Scheme::preset("midnight").is_err());
    /// ```
    pub fn preset(name: &str) -> Result<Self, SchemeError> {
        let wanted = name.trim().to_ascii_lowercase();
        PRESETS
            .iter()
            .find(|(preset, _, _)| *preset == wanted)
            .map(|&(preset, bg, text)| {
                Self::new(preset, Color::from_bytes(bg), Color::from_bytes(text))
            })
            .ok_or_else(|| SchemeError::UnknownScheme(name.to_string()))
    }

    /// Names of all built-in schemes, sorted.
    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(name, _, _)| *name)
    }

    /// All built-in schemes, sorted by name.
    pub fn presets() -> impl Iterator<Item = Scheme> {
        PRESETS
            .iter()
            .map(|&(name, bg, text)| Self::new(name, Color::from_bytes(bg), Color::from_bytes(text)))
    }

    /// Build a scheme named `custom` from two hex strings.
    pub fn custom(background: &str, text: &str) -> Result<Self, SchemeError> {
        let background: Color = background
            .parse()
            .map_err(SchemeError::InvalidBackground)?;
        let text: Color = text.parse().map_err(SchemeError::InvalidText)?;
        Ok(Self::new("custom", background, text))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn background(&self) -> Color {
        self.background
    }

    #[inline]
    pub fn text(&self) -> Color {
        self.text
    }

    /// True when either anchor is visibly non-gray.
    ///
    /// Content rewriting uses this to decide whether single-channel gray and
    /// CMYK operators must be promoted to RGB to carry the tint.
    pub fn is_tinted(&self) -> bool {
        !self.background.is_near_gray(NEAR_GRAY_TOLERANCE)
            || !self.text.is_near_gray(NEAR_GRAY_TOLERANCE)
    }
}

impl Default for Scheme {
    /// The neutral `dark` preset.
    fn default() -> Self {
        Self::new(
            "dark",
            Color::from_bytes([0x1a, 0x1a, 0x1a]),
            Color::from_bytes([0xe0, 0xe0, 0xe0]),
        )
    }
}
