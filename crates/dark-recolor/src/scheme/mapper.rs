//! Color remapping under a scheme
//!
//! Document colors are placed on a piecewise curve between the scheme
//! anchors by lightness. Colorful content keeps its hue and is moved into a
//! lightness band that stays legible on the dark background.

use super::scheme::Scheme;
use crate::classify::{classify, ColorClass};
use crate::color::{hsl_to_rgb, lightness, rgb_to_hsl, Color};

/// Map a document color, given its HSL lightness, onto the scheme.
///
/// # Example
/// ```
/// use dark_recolor::{map_document_color, Scheme};
/// let scheme = Scheme::default();
/// assert_eq!(map_document_color(1.0, &scheme), scheme.background());
/// assert_eq!(map_document_color(0.0, &scheme), scheme.text());
/// ```
pub fn map_document_color(l: f64, scheme: &Scheme) -> Color {
    if l > 0.9 {
        scheme.background()
    } else if l > 0.7 {
        scheme.text().lerp(scheme.background(), (l - 0.7) / 0.2)
    } else if l < 0.15 {
        scheme.text()
    } else if l < 0.4 {
        scheme.text().lerp(Color::MID_GRAY, l / 0.4)
    } else {
        // Mid tones are inverted as plain gray regardless of the scheme tint
        Color::gray(1.0 - l)
    }
}

/// Remap a colorful color: keep hue, lift lightness into a readable band,
/// boost saturation by 15%.
pub fn map_colorful_content(r: f64, g: f64, b: f64) -> Color {
    let (h, s, l) = rgb_to_hsl(r, g, b);

    let l = if l < 0.55 {
        0.55 + (l / 0.55) * 0.2
    } else if l > 0.85 {
        0.70 + (l - 0.85) * 0.5
    } else {
        l
    };
    let s = (s * 1.15).min(1.0);

    let (r, g, b) = hsl_to_rgb(h, s, l);
    Color::new(r, g, b)
}

/// Classify a color and route it through the matching mapping.
pub fn map_color(r: f64, g: f64, b: f64, scheme: &Scheme) -> Color {
    match classify(r, g, b) {
        ColorClass::DocumentColor => map_document_color(lightness(r, g, b), scheme),
        ColorClass::ColorfulContent => map_colorful_content(r, g, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::saturation;

    fn dark() -> Scheme {
        Scheme::default()
    }

    fn assert_close(a: Color, b: Color) {
        assert!(
            (a.r - b.r).abs() < 1e-9 && (a.g - b.g).abs() < 1e-9 && (a.b - b.b).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn test_document_segments() {
        let scheme = dark();
        let bg = scheme.background();
        let text = scheme.text();

        assert_eq!(map_document_color(0.95, &scheme), bg);
        assert_eq!(map_document_color(0.1, &scheme), text);
        assert_close(map_document_color(0.8, &scheme), text.lerp(bg, 0.5));
        assert_close(
            map_document_color(0.2, &scheme),
            text.lerp(Color::MID_GRAY, 0.5),
        );
        assert_close(map_document_color(0.55, &scheme), Color::gray(0.45));
    }

    #[test]
    fn test_document_segment_edges() {
        let scheme = dark();
        // 0.9 itself is the end of the blend, which lands on the background
        assert_close(map_document_color(0.9, &scheme), scheme.background());
        // 0.7 is in the inversion band
        assert_close(map_document_color(0.7, &scheme), Color::gray(0.3));
        // 0.4 is in the inversion band, 0.15 starts the mid-gray blend
        assert_close(map_document_color(0.4, &scheme), Color::gray(0.6));
        assert_close(
            map_document_color(0.15, &scheme),
            scheme.text().lerp(Color::MID_GRAY, 0.375),
        );
    }

    #[test]
    fn test_mid_band_ignores_tint() {
        let sepia = Scheme::preset("sepia").unwrap();
        let mapped = map_document_color(0.5, &sepia);
        assert_close(mapped, Color::gray(0.5));
    }

    #[test]
    fn test_colorful_lightness_bands() {
        // Dark red (l = 0.25) lifts into 0.55..0.75
        let dark_red = map_colorful_content(0.5, 0.0, 0.0);
        let l = lightness(dark_red.r, dark_red.g, dark_red.b);
        assert!((l - (0.55 + (0.25 / 0.55) * 0.2)).abs() < 1e-9);

        // Pale blue (l = 0.9) is pulled down
        let (h, s, _) = rgb_to_hsl(0.8, 0.8, 1.0);
        let (r, g, b) = hsl_to_rgb(h, s, 0.9);
        let pale = map_colorful_content(r, g, b);
        let l = lightness(pale.r, pale.g, pale.b);
        assert!((l - 0.725).abs() < 1e-9);

        // Mid lightness passes through
        let mid = map_colorful_content(0.9, 0.5, 0.3);
        assert!((lightness(mid.r, mid.g, mid.b) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_colorful_band_edges_pass_through() {
        // Both edges are outside the strict comparisons
        assert_eq!(lightness(0.8, 0.3, 0.3), 0.55);
        let low = map_colorful_content(0.8, 0.3, 0.3);
        assert!((lightness(low.r, low.g, low.b) - 0.55).abs() < 1e-9);

        assert_eq!(lightness(1.0, 0.7, 0.7), 0.85);
        let high = map_colorful_content(1.0, 0.7, 0.7);
        assert!((lightness(high.r, high.g, high.b) - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_colorful_keeps_hue_and_boosts_saturation() {
        let (h0, s0, _) = rgb_to_hsl(0.2, 0.5, 0.3);
        let out = map_colorful_content(0.2, 0.5, 0.3);
        let (h1, s1, _) = rgb_to_hsl(out.r, out.g, out.b);
        assert!((h0 - h1).abs() < 1e-9);
        assert!((s1 - (s0 * 1.15).min(1.0)).abs() < 1e-9);

        // Fully saturated colors stay at 1
        let red = map_colorful_content(1.0, 0.0, 0.0);
        assert!((saturation(red.r, red.g, red.b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_map_color_routes_by_class() {
        let scheme = dark();
        assert_eq!(map_color(1.0, 1.0, 1.0, &scheme), scheme.background());
        assert_eq!(map_color(0.0, 0.0, 0.0, &scheme), scheme.text());
        assert_close(
            map_color(0.9, 0.1, 0.1, &scheme),
            map_colorful_content(0.9, 0.1, 0.1),
        );
    }
}
