//! Color value type and color space conversions
//!
//! All conversions work on normalized `f64` channels in `0.0..=1.0` and are
//! total: out-of-range input produces out-of-range output, never a panic.

mod cmyk;
mod hsl;
mod rgb;

pub use cmyk::{cmyk_to_rgb, rgb_to_cmyk};
pub use hsl::{hsl_to_rgb, lightness, rgb_to_hsl, saturation};
pub use rgb::Color;
