//! RGB color type

use std::fmt;
use std::str::FromStr;

use crate::scheme::ParseColorError;

/// A normalized RGB color.
///
/// Channels are in the range 0.0..=1.0 (mapping to 0..255 for 8-bit).
/// Colors are plain values; every transform returns a new one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel (0.0..=1.0)
    pub r: f64,
    /// Green channel (0.0..=1.0)
    pub g: f64,
    /// Blue channel (0.0..=1.0)
    pub b: f64,
}

impl Color {
    /// Neutral mid-gray, the pull target for dark document tones.
    pub const MID_GRAY: Color = Color::new(0.5, 0.5, 0.5);

    /// Create a color from normalized channel values.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a neutral gray with all channels set to `value`.
    #[inline]
    pub const fn gray(value: f64) -> Self {
        Self::new(value, value, value)
    }

    /// Create a color from 8-bit channel values.
    ///
    /// # Example
    /// ```
    /// use dark_recolor::Color;
    /// let red = Color::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    ///
    /// Rounds and clamps values to the 0..=255 range.
    ///
    /// # Example
    /// ```
    /// use dark_recolor::Color;
    /// let bytes = Color::new(1.0, 0.5, -0.2).to_bytes();
    /// assert_eq!(bytes, [255, 128, 0]);
    /// ```
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Lowercase `#rrggbb` representation of the 8-bit mirror.
    pub fn hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Per-channel linear interpolation; `t = 0` yields `self`, `t = 1` yields `other`.
    #[inline]
    pub fn lerp(self, other: Color, t: f64) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// True when no channel pair differs by `tolerance` or more.
    pub fn is_near_gray(self, tolerance: f64) -> bool {
        (self.r - self.g).abs() < tolerance
            && (self.g - self.b).abs() < tolerance
            && (self.r - self.b).abs() < tolerance
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive, with
    /// surrounding whitespace trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use dark_recolor::Color;
    ///
    /// let bg: Color = "#1a1a1a".parse().unwrap();
    /// assert_eq!(bg.to_bytes(), [26, 26, 26]);
    ///
    /// let red: Color = "F00".parse().unwrap();
    /// assert_eq!(red.r, 1.0);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::NonAscii);
        }

        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            n => Err(ParseColorError::DigitCount(n)),
        }
    }
}
