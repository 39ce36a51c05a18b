//! Document/colorful classification

use crate::color::saturation;

/// Saturation below which a color is treated as part of the document itself.
///
/// The boundary is exclusive on the document side: a saturation of exactly
/// 0.15 is colorful content.
pub const DOCUMENT_SATURATION_THRESHOLD: f64 = 0.15;

/// How a color is treated by the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorClass {
    /// Near-neutral page background, text and rules.
    DocumentColor,
    /// Photographs, charts, highlights.
    ColorfulContent,
}

/// Classify a color by its HSL saturation alone.
///
/// # Example
/// ```
/// use dark_recolor::{classify, ColorClass};
/// assert_eq!(classify(0.5, 0.5, 0.5), ColorClass::DocumentColor);
/// assert_eq!(classify(0.9, 0.1, 0.1), ColorClass::ColorfulContent);
/// ```
#[inline]
pub fn classify(r: f64, g: f64, b: f64) -> ColorClass {
    if saturation(r, g, b) < DOCUMENT_SATURATION_THRESHOLD {
        ColorClass::DocumentColor
    } else {
        ColorClass::ColorfulContent
    }
}
